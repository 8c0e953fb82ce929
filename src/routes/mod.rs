// Route definitions

use axum::{extract::FromRef, routing::{get, post}, Router};
use tower_http::trace::TraceLayer;

use crate::runtime::UiHandle;

mod actions;
mod pages;

// Shared state handed to every handler
#[derive(Clone, FromRef)]
pub struct AppState {
    pub ui: UiHandle,
}

pub fn create_router(app_state: AppState) -> Router {
    // Every user interaction posts here and is redirected back to the page
    let action_router = Router::new()
        .route("/search", post(actions::search))
        .route("/filters", post(actions::apply_filters))
        .route("/page/prev", post(actions::prev_page))
        .route("/page/next", post(actions::next_page))
        .route("/view/:mode", post(actions::switch_view))
        .route("/reload", post(actions::reload))
        .route("/modal/open/:name", post(actions::open_modal))
        .route("/modal/close", post(actions::close_modal));

    Router::new()
        .route("/", get(pages::index))
        .route("/results", get(pages::results_fragment))
        .nest("/actions", action_router)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
