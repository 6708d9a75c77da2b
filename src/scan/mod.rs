pub mod classifier;
pub mod dto;
pub mod gate;
pub mod handlers;
pub mod image;
pub mod model;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::router()
}
