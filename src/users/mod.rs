use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod password;
pub mod services;

pub use dto::{CreatedUserResponse, PublicUser, RegisterRequest, RegistrationType, UserDocument};

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
