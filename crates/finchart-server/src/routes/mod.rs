pub mod finance;
pub mod health;

use crate::state::AppState;
use axum::Router;

pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(finance::routes(state))
        .merge(health::routes())
}
