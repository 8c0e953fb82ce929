use axum::{extract::State, response::Html};

use crate::{error::AppResult, paint, runtime::UiHandle};

// Whole page for the current screen
pub async fn index(State(ui): State<UiHandle>) -> AppResult<Html<String>> {
    let screen = ui.screen();
    Ok(Html(paint::paint_page(&screen, None)?))
}

// Just the results container, for partial refreshes
pub async fn results_fragment(State(ui): State<UiHandle>) -> AppResult<Html<String>> {
    let screen = ui.screen();
    Ok(Html(paint::paint_fragment(&screen.results.fragment)?))
}
