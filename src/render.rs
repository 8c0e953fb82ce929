//! Pure transformation from a page of results into a typed view model.
//!
//! Nothing here touches HTML; [`crate::paint`] turns these values into markup.
//! The substitution rules for missing fields are mode dependent and are kept
//! as named constants so the two layouts can't drift into each other.

use std::fmt;

use serde::Deserialize;

use crate::models::{ResultItem, ResultSet};
use crate::pagination::{compute_slice, PageState};

pub const RATING_MISSING: &str = "N/A";
pub const UNKNOWN_BRAND: &str = "未知品牌";
pub const UNKNOWN_CATEGORY: &str = "未知级别";
pub const UNKNOWN_ENERGY: &str = "未知能源";
pub const LIST_PRICE_MISSING: &str = "暂无价格信息";
pub const GRID_PRICE_MISSING: &str = "暂无价格";
pub const DETAIL_URL_MISSING: &str = "#";

// Labels embedded in the scraped engine/transmission values
const ENGINE_LABEL: &str = "发 动 机：";
const TRANSMISSION_LABEL: &str = "变 速 箱：";

pub const LOADING_MESSAGE: &str = "正在查询汽车知识图谱，请稍候...";
pub const EMPTY_TITLE: &str = "没有找到匹配的结果";
pub const EMPTY_HINT: &str = "请尝试调整您的查询条件，例如\"15万左右的SUV\"或\"最省油的混动车\"";
pub const ERROR_TITLE: &str = "查询出错";

/// Example card shown in the zero-result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleQuery {
    pub query: &'static str,
    pub outcome: &'static str,
}

pub const EMPTY_EXAMPLES: [ExampleQuery; 2] = [
    ExampleQuery {
        query: "\"20万预算，适合家庭的SUV\"",
        outcome: "系统将返回20万价格区间的家庭SUV",
    },
    ExampleQuery {
        query: "\"油耗最低的轿车\"",
        outcome: "系统将返回油耗表现最佳的轿车",
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    List,
    Grid,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::List => "list",
            ViewMode::Grid => "grid",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon shown in front of a meta entry (list view only).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaIcon {
    Tag,
    Car,
    Bolt,
}

impl MetaIcon {
    pub fn css_class(self) -> &'static str {
        match self {
            MetaIcon::Tag => "fas fa-tag",
            MetaIcon::Car => "fas fa-car",
            MetaIcon::Bolt => "fas fa-bolt",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetaEntry {
    pub icon: Option<MetaIcon>,
    pub text: String,
}

/// One vehicle, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCard {
    pub avatar: String,
    pub name: String,
    pub rating: String,
    pub meta: Vec<MetaEntry>,
    pub price: String,
    pub description: String,
    pub detail_url: String,
    pub show_compare: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayFragment {
    Loading,
    Empty,
    Cards { mode: ViewMode, cards: Vec<ResultCard> },
    Error { message: String },
}

/// Page counter and button state as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationView {
    pub current: usize,
    pub total: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsView {
    pub fragment: DisplayFragment,
    pub pagination: PaginationView,
    pub count_label: String,
}

// Empty strings count as missing, like the falsy checks of a template would.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

// One decimal, exact halves rounded away from zero. At one decimal the only
// exact halves a double can hold are odd multiples of 0.25.
fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r.is_finite() && r != 0.0 => {
            let quarters = r * 4.0;
            let r = if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
                (r * 10.0).round() / 10.0
            } else {
                r
            };
            format!("{r:.1}")
        }
        _ => RATING_MISSING.to_string(),
    }
}

fn strip_label(value: &str, label: &str) -> String {
    value.replacen(label, "", 1)
}

fn describe_drivetrain(item: &ResultItem) -> String {
    let mut parts = String::new();
    if let Some(engine) = present(&item.engine) {
        parts.push_str(&format!("发动机: {} | ", strip_label(engine, ENGINE_LABEL)));
    }
    if let Some(transmission) = present(&item.transmission) {
        parts.push_str(&format!("变速箱: {}", strip_label(transmission, TRANSMISSION_LABEL)));
    }
    parts
}

pub fn render_card(item: &ResultItem, mode: ViewMode) -> ResultCard {
    let brand = present(&item.brand);
    let avatar = match brand {
        Some(b) => b.to_string(),
        None => item.name.chars().next().map(String::from).unwrap_or_default(),
    };
    let brand_label = brand.unwrap_or(UNKNOWN_BRAND).to_string();
    let category = present(&item.category).unwrap_or(UNKNOWN_CATEGORY).to_string();
    let detail_url = present(&item.detail_url).unwrap_or(DETAIL_URL_MISSING).to_string();

    match mode {
        ViewMode::List => ResultCard {
            avatar,
            name: item.name.clone(),
            rating: format_rating(item.rating),
            meta: vec![
                MetaEntry { icon: Some(MetaIcon::Tag), text: brand_label },
                MetaEntry { icon: Some(MetaIcon::Car), text: category },
                MetaEntry {
                    icon: Some(MetaIcon::Bolt),
                    text: present(&item.energy_type).unwrap_or(UNKNOWN_ENERGY).to_string(),
                },
            ],
            price: format!("价格: {}", present(&item.price_range).unwrap_or(LIST_PRICE_MISSING)),
            description: describe_drivetrain(item),
            detail_url,
            show_compare: true,
        },
        ViewMode::Grid => ResultCard {
            avatar,
            name: item.name.clone(),
            rating: format_rating(item.rating),
            meta: vec![
                MetaEntry { icon: None, text: brand_label },
                MetaEntry { icon: None, text: category },
            ],
            price: present(&item.price_range).unwrap_or(GRID_PRICE_MISSING).to_string(),
            description: present(&item.energy_type).unwrap_or_default().to_string(),
            detail_url,
            show_compare: false,
        },
    }
}

/// Renders a page slice. No items means the fixed empty-state panel.
pub fn render(items: &[ResultItem], mode: ViewMode) -> DisplayFragment {
    if items.is_empty() {
        return DisplayFragment::Empty;
    }
    DisplayFragment::Cards {
        mode,
        cards: items.iter().map(|item| render_card(item, mode)).collect(),
    }
}

pub fn pagination_view(results: &ResultSet, page: &PageState) -> PaginationView {
    if results.is_empty() {
        return PaginationView {
            current: 0,
            total: 0,
            prev_enabled: false,
            next_enabled: false,
        };
    }
    let nav = page.nav();
    PaginationView {
        current: page.page(),
        total: page.total_pages(),
        prev_enabled: nav.prev_enabled,
        next_enabled: nav.next_enabled,
    }
}

pub fn count_label(results: &ResultSet) -> String {
    format!("({})", results.len())
}

/// Full results area for the current page of `results`.
pub fn render_results(results: &ResultSet, page: &PageState, mode: ViewMode) -> ResultsView {
    ResultsView {
        fragment: render(compute_slice(results.items(), page), mode),
        pagination: pagination_view(results, page),
        count_label: count_label(results),
    }
}
