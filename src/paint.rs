// Paint step: turns the view model into HTML through askama templates.
// Askama escapes every interpolated value, so backend text can't inject markup.

use askama::Template;

use crate::app::{Screen, QUERY_TAGS};
use crate::filters::FilterState;
use crate::models::{EnergyType, VehicleType};
use crate::render::{
    DisplayFragment, ExampleQuery, PaginationView, ResultCard, ViewMode, EMPTY_EXAMPLES, EMPTY_HINT,
    EMPTY_TITLE, ERROR_TITLE, LOADING_MESSAGE,
};

#[derive(Template)]
#[template(path = "loading.html")]
struct LoadingTemplate<'a> {
    message: &'a str,
}

#[derive(Template)]
#[template(path = "empty.html")]
struct EmptyTemplate<'a> {
    title: &'a str,
    hint: &'a str,
    examples: &'a [ExampleQuery],
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    title: &'a str,
    message: &'a str,
}

#[derive(Template)]
#[template(path = "cards.html")]
struct CardsTemplate<'a> {
    container_class: &'a str,
    cards: &'a [ResultCard],
}

// One filter checkbox as the form shows it
struct Checkbox {
    name: &'static str,
    label: &'static str,
    checked: bool,
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    query: &'a str,
    prompt: &'a str,
    tags: &'a [&'a str],
    price_min: u32,
    price_max: u32,
    vehicle_boxes: Vec<Checkbox>,
    energy_boxes: Vec<Checkbox>,
    list_active: bool,
    grid_active: bool,
    count_label: &'a str,
    results_html: String,
    pagination: PaginationView,
    refresh: bool,
    modal_title: &'a str,
    modal_body: &'a str,
    modal_open: bool,
}

pub fn paint_fragment(fragment: &DisplayFragment) -> Result<String, askama::Error> {
    match fragment {
        DisplayFragment::Loading => LoadingTemplate {
            message: LOADING_MESSAGE,
        }
        .render(),
        DisplayFragment::Empty => EmptyTemplate {
            title: EMPTY_TITLE,
            hint: EMPTY_HINT,
            examples: &EMPTY_EXAMPLES,
        }
        .render(),
        DisplayFragment::Error { message } => ErrorTemplate {
            title: ERROR_TITLE,
            message,
        }
        .render(),
        DisplayFragment::Cards { mode, cards } => CardsTemplate {
            container_class: match mode {
                ViewMode::List => "results-container",
                ViewMode::Grid => "results-container grid-view",
            },
            cards,
        }
        .render(),
    }
}

fn checkboxes(filters: &FilterState) -> (Vec<Checkbox>, Vec<Checkbox>) {
    let vehicles = VehicleType::ALL
        .into_iter()
        .map(|vt| Checkbox {
            name: vt.as_str(),
            label: vt.label(),
            checked: filters.vehicle_types().contains(&vt),
        })
        .collect();
    let energies = EnergyType::ALL
        .into_iter()
        .map(|et| Checkbox {
            name: et.as_str(),
            label: et.label(),
            checked: filters.energy_types().contains(&et),
        })
        .collect();
    (vehicles, energies)
}

/// Paints the whole page. `prompt` is a one-off notice such as the empty-query prompt.
pub fn paint_page(screen: &Screen, prompt: Option<&str>) -> Result<String, askama::Error> {
    let (vehicle_boxes, energy_boxes) = checkboxes(&screen.filters);
    let modal = screen.modal;

    PageTemplate {
        query: &screen.query_text,
        prompt: prompt.unwrap_or_default(),
        tags: &QUERY_TAGS,
        price_min: screen.filters.price_min(),
        price_max: screen.filters.price_max(),
        vehicle_boxes,
        energy_boxes,
        list_active: screen.view == ViewMode::List,
        grid_active: screen.view == ViewMode::Grid,
        count_label: &screen.results.count_label,
        results_html: paint_fragment(&screen.results.fragment)?,
        pagination: screen.results.pagination,
        refresh: screen.is_loading(),
        modal_title: modal.map(|m| m.title()).unwrap_or_default(),
        modal_body: modal.map(|m| m.body()).unwrap_or_default(),
        modal_open: modal.is_some(),
    }
    .render()
}
