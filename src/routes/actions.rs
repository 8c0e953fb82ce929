// Handlers for user interactions. Each one forwards an Action to the event loop.

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    app::FilterEdit,
    error::{AppError, AppResult, DispatchError},
    modal::Modal,
    models::{EnergyType, VehicleType},
    paint,
    render::ViewMode,
    runtime::{Action, UiHandle},
};

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    query: String,
}

// Checkbox fields are only present when ticked. Prices stay raw text so a
// cleared or fractional number input never rejects the whole form.
#[derive(Debug, Default, Deserialize)]
pub struct FilterForm {
    price_min: Option<String>,
    price_max: Option<String>,
    suv: Option<String>,
    sedan: Option<String>,
    mpv: Option<String>,
    hatchback: Option<String>,
    fuel: Option<String>,
    hybrid: Option<String>,
    electric: Option<String>,
}

// Whole numbers as typed, decimals truncated, anything else ignored
fn parse_price(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.trunc() as i64)
}

impl From<FilterForm> for FilterEdit {
    fn from(form: FilterForm) -> Self {
        let vehicle_types = [
            (VehicleType::Suv, &form.suv),
            (VehicleType::Sedan, &form.sedan),
            (VehicleType::Mpv, &form.mpv),
            (VehicleType::Hatchback, &form.hatchback),
        ]
        .into_iter()
        .filter_map(|(vt, field)| field.is_some().then_some(vt))
        .collect();
        let energy_types = [
            (EnergyType::Fuel, &form.fuel),
            (EnergyType::Hybrid, &form.hybrid),
            (EnergyType::Electric, &form.electric),
        ]
        .into_iter()
        .filter_map(|(et, field)| field.is_some().then_some(et))
        .collect();

        FilterEdit {
            price_min: parse_price(form.price_min.as_deref()),
            price_max: parse_price(form.price_max.as_deref()),
            vehicle_types,
            energy_types,
        }
    }
}

async fn dispatch_and_return(ui: &UiHandle, action: Action) -> AppResult<Redirect> {
    ui.dispatch(action).await?;
    Ok(Redirect::to("/"))
}

pub async fn search(State(ui): State<UiHandle>, Form(form): Form<SearchForm>) -> AppResult<Response> {
    match ui.dispatch(Action::Search(form.query)).await {
        Ok(()) => Ok(Redirect::to("/").into_response()),
        Err(DispatchError::Query(prompt)) => {
            // Validation failure: nothing was sent, show the prompt in place
            tracing::info!("Rejected search: {}", prompt);
            let html = paint::paint_page(&ui.screen(), Some(&prompt.to_string()))?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(html)).into_response())
        }
        Err(e) => Err(AppError::from(e)),
    }
}

pub async fn apply_filters(State(ui): State<UiHandle>, Form(form): Form<FilterForm>) -> AppResult<Redirect> {
    dispatch_and_return(&ui, Action::ApplyFilters(form.into())).await
}

pub async fn prev_page(State(ui): State<UiHandle>) -> AppResult<Redirect> {
    dispatch_and_return(&ui, Action::PrevPage).await
}

pub async fn next_page(State(ui): State<UiHandle>) -> AppResult<Redirect> {
    dispatch_and_return(&ui, Action::NextPage).await
}

pub async fn switch_view(State(ui): State<UiHandle>, Path(mode): Path<ViewMode>) -> AppResult<Redirect> {
    dispatch_and_return(&ui, Action::SwitchView(mode)).await
}

pub async fn reload(State(ui): State<UiHandle>) -> AppResult<Redirect> {
    dispatch_and_return(&ui, Action::Reload).await
}

pub async fn open_modal(State(ui): State<UiHandle>, Path(modal): Path<Modal>) -> AppResult<Redirect> {
    dispatch_and_return(&ui, Action::OpenModal(modal)).await
}

pub async fn close_modal(State(ui): State<UiHandle>) -> AppResult<Redirect> {
    dispatch_and_return(&ui, Action::CloseModal).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticked_checkboxes_become_categories() {
        let form = FilterForm {
            price_min: Some("5".to_string()),
            price_max: Some("25".to_string()),
            suv: Some("suv".to_string()),
            hatchback: Some("hatchback".to_string()),
            electric: Some("electric".to_string()),
            ..Default::default()
        };
        let edit = FilterEdit::from(form);
        assert_eq!(edit.vehicle_types, vec![VehicleType::Suv, VehicleType::Hatchback]);
        assert_eq!(edit.energy_types, vec![EnergyType::Electric]);
        assert_eq!((edit.price_min, edit.price_max), (Some(5), Some(25)));
    }

    #[test]
    fn unusable_prices_are_left_out() {
        assert_eq!(parse_price(None), None);
        assert_eq!(parse_price(Some("")), None);
        assert_eq!(parse_price(Some("  ")), None);
        assert_eq!(parse_price(Some("abc")), None);
        assert_eq!(parse_price(Some("inf")), None);
        assert_eq!(parse_price(Some(" 12 ")), Some(12));
        assert_eq!(parse_price(Some("12.7")), Some(12));
        assert_eq!(parse_price(Some("-3")), Some(-3));
    }
}
