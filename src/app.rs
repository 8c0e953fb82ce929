//! The whole UI state as one value.
//!
//! [`App`] owns the query text, draft and applied filters, the query
//! controller, the held result set with its page, the view mode and the open
//! modal. Every user interaction is one method here; none of them perform I/O.
//! Methods that need the network hand back a [`Ticket`] for the caller to send,
//! and the answer comes back through [`App::settle`].
//!
//! [`App::screen`] derives an immutable [`Screen`] from the current state, which
//! is all the paint step ever reads.

use crate::controller::{Generation, QueryController, QueryPhase, Settlement, Ticket};
use crate::error::{QueryError, TransportError};
use crate::filters::FilterState;
use crate::modal::{Modal, ModalState};
use crate::models::{EnergyType, FilterSnapshot, QueryResponse, ResultItem, ResultSet, VehicleType};
use crate::pagination::{PageState, PAGE_SIZE};
use crate::render::{self, DisplayFragment, ResultsView, ViewMode};

/// Example queries offered as one-click tags.
pub const QUERY_TAGS: [&str; 4] = ["20万预算的SUV", "15万左右的SUV", "最省油的混动车", "油耗最低的轿车"];

// What currently occupies the results container
#[derive(Debug, Clone, PartialEq, Eq)]
enum Panel {
    Results,
    Loading,
    Error(String),
}

/// Values submitted by the filter form. A `None` bound keeps the draft value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterEdit {
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub vehicle_types: Vec<VehicleType>,
    pub energy_types: Vec<EnergyType>,
}

/// Read-only snapshot of everything the page shows.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    pub query_text: String,
    pub filters: FilterState,
    pub view: ViewMode,
    pub phase: QueryPhase,
    pub results: ResultsView,
    pub modal: Option<Modal>,
}

impl Screen {
    pub fn is_loading(&self) -> bool {
        self.phase == QueryPhase::Loading
    }
}

#[derive(Debug, Clone)]
pub struct App {
    query_text: String,
    filters: FilterState,
    applied: FilterSnapshot,
    controller: QueryController,
    results: ResultSet,
    page: PageState,
    view: ViewMode,
    modals: ModalState,
    panel: Panel,
}

impl Default for App {
    fn default() -> Self {
        App::new()
    }
}

impl App {
    /// Startup state: default filters, list view, the showcase results on page 1.
    pub fn new() -> Self {
        let filters = FilterState::default();
        let results = ResultSet::new(showcase_results());
        App {
            query_text: String::new(),
            applied: filters.apply(),
            filters,
            controller: QueryController::default(),
            page: PageState::new(1, results.len()),
            results,
            view: ViewMode::default(),
            modals: ModalState::default(),
            panel: Panel::Results,
        }
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn applied_filters(&self) -> &FilterSnapshot {
        &self.applied
    }

    pub fn phase(&self) -> &QueryPhase {
        self.controller.phase()
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_query_text(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    /// Submits the held query text with the applied filters and current page.
    pub fn submit(&mut self) -> Result<Ticket, QueryError> {
        let ticket = self
            .controller
            .submit(&self.query_text, &self.applied, self.page.page(), PAGE_SIZE)?;
        tracing::info!(
            generation = %ticket.generation,
            query = %ticket.request.query,
            page = ticket.request.page,
            "Submitting query"
        );
        self.panel = Panel::Loading;
        Ok(ticket)
    }

    /// Sets the query text and submits it, as typing plus Enter or a tag click does.
    pub fn search(&mut self, text: impl Into<String>) -> Result<Ticket, QueryError> {
        self.set_query_text(text);
        self.submit()
    }

    /// Applies the result of the request stamped `generation`.
    pub fn settle(&mut self, generation: Generation, outcome: Result<QueryResponse, TransportError>) {
        match self.controller.settle(generation, outcome) {
            Settlement::Stale => {}
            Settlement::Success { results, page } => {
                tracing::info!(%generation, count = results.len(), page, "Query succeeded");
                self.page = PageState::new(page, results.len());
                self.results = results;
                self.panel = Panel::Results;
            }
            Settlement::Failed(error) => {
                // held results stay; only the display is replaced
                self.panel = Panel::Error(error.to_string());
            }
        }
    }

    /// Replaces the draft filters with the form values, snapshots them, and
    /// re-runs the search when there is query text to run.
    pub fn apply_filters(&mut self, edit: FilterEdit) -> Option<Ticket> {
        let price_min = edit.price_min.unwrap_or(i64::from(self.filters.price_min()));
        let price_max = edit.price_max.unwrap_or(i64::from(self.filters.price_max()));
        self.filters.set_price_range(price_min, price_max);
        self.filters.set_vehicle_types(edit.vehicle_types);
        self.filters.set_energy_types(edit.energy_types);
        self.applied = self.filters.apply();
        tracing::info!(filters = ?self.applied, "Filters applied");

        if self.query_text.trim().is_empty() {
            return None;
        }
        self.submit().ok()
    }

    pub fn prev_page(&mut self) -> bool {
        let moved = self.page.prev_page();
        if moved {
            tracing::debug!(page = self.page.page(), "Moved to previous page");
            self.panel = Panel::Results;
        }
        moved
    }

    pub fn next_page(&mut self) -> bool {
        let moved = self.page.next_page();
        if moved {
            tracing::debug!(page = self.page.page(), "Moved to next page");
            self.panel = Panel::Results;
        }
        moved
    }

    pub fn switch_view(&mut self, mode: ViewMode) {
        tracing::info!(view = %mode, "Switching view");
        self.view = mode;
        self.panel = Panel::Results;
    }

    pub fn open_modal(&mut self, modal: Modal) {
        self.modals.open(modal);
    }

    pub fn close_modal(&mut self) {
        self.modals.close();
    }

    /// Back to startup state, as a page reload would do.
    ///
    /// Generations keep increasing across the reload, so a response to a query
    /// sent before it is discarded.
    pub fn reload(&mut self) {
        let mut controller = std::mem::take(&mut self.controller);
        controller.reset();
        *self = App {
            controller,
            ..App::new()
        };
        tracing::info!("Client state reloaded");
    }

    pub fn screen(&self) -> Screen {
        let mut results = render::render_results(&self.results, &self.page, self.view);
        match &self.panel {
            Panel::Results => {}
            Panel::Loading => results.fragment = DisplayFragment::Loading,
            Panel::Error(message) => {
                results.fragment = DisplayFragment::Error {
                    message: message.clone(),
                }
            }
        }
        Screen {
            query_text: self.query_text.clone(),
            filters: self.filters.clone(),
            view: self.view,
            phase: self.controller.phase().clone(),
            results,
            modal: self.modals.current(),
        }
    }
}

// Records shown before the first query
fn showcase_results() -> Vec<ResultItem> {
    let item = |name: &str,
                brand: &str,
                category: &str,
                price_range: &str,
                rating: f64,
                engine: &str,
                transmission: &str,
                series: u32| ResultItem {
        name: name.to_string(),
        brand: Some(brand.to_string()),
        category: Some(category.to_string()),
        price_range: Some(price_range.to_string()),
        rating: Some(rating),
        energy_type: Some("混动车型".to_string()),
        engine: Some(engine.to_string()),
        transmission: Some(transmission.to_string()),
        detail_url: Some(format!("https://car.autohome.com.cn/price/series-{series}.html")),
    };

    vec![
        item("RAV4荣放", "丰田", "紧凑型SUV", "16.98-23.88万", 4.43, "发 动 机：2.0L 2.5L", "变 速 箱：无级", 770),
        item("天籁", "日产", "中型车", "13.99-23.98万", 4.5, "发 动 机：2.0L 2.0T", "变 速 箱：无级", 634),
        item(
            "海狮06",
            "比亚迪",
            "中型SUV",
            "13.98-16.38万",
            4.47,
            "发 动 机：1.5L 1.5T",
            "变 速 箱：手自一体 干式双离合 自动",
            8087,
        ),
    ]
}
