// Wire types exchanged with the knowledge-graph search backend.

use serde::{Deserialize, Serialize};

// Vehicle categories offered as filter checkboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Suv,
    Sedan,
    Mpv,
    Hatchback,
}

impl VehicleType {
    pub const ALL: [VehicleType; 4] = [
        VehicleType::Suv,
        VehicleType::Sedan,
        VehicleType::Mpv,
        VehicleType::Hatchback,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Suv => "suv",
            VehicleType::Sedan => "sedan",
            VehicleType::Mpv => "mpv",
            VehicleType::Hatchback => "hatchback",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VehicleType::Suv => "SUV",
            VehicleType::Sedan => "轿车",
            VehicleType::Mpv => "MPV",
            VehicleType::Hatchback => "两厢车",
        }
    }
}

// Fuel / energy categories offered as filter checkboxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyType {
    Fuel,
    Hybrid,
    Electric,
}

impl EnergyType {
    pub const ALL: [EnergyType; 3] = [EnergyType::Fuel, EnergyType::Hybrid, EnergyType::Electric];

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyType::Fuel => "fuel",
            EnergyType::Hybrid => "hybrid",
            EnergyType::Electric => "electric",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnergyType::Fuel => "燃油",
            EnergyType::Hybrid => "混动",
            EnergyType::Electric => "纯电",
        }
    }
}

/// Applied filters as sent to the backend. Produced by `FilterState::apply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    pub(crate) price_min: u32,
    pub(crate) price_max: u32,
    pub(crate) vehicle_types: Vec<VehicleType>,
    pub(crate) energy_types: Vec<EnergyType>,
}

impl FilterSnapshot {
    pub fn price_min(&self) -> u32 {
        self.price_min
    }

    pub fn price_max(&self) -> u32 {
        self.price_max
    }

    pub fn vehicle_types(&self) -> &[VehicleType] {
        &self.vehicle_types
    }

    pub fn energy_types(&self) -> &[EnergyType] {
        &self.energy_types
    }
}

// Body of POST {backend}/query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query: String,
    pub filters: FilterSnapshot,
    pub page: usize,
    pub page_size: usize,
}

// One matched vehicle. Only `name` is guaranteed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,
}

impl ResultItem {
    pub fn named(name: impl Into<String>) -> Self {
        ResultItem {
            name: name.into(),
            ..Default::default()
        }
    }
}

// Response body for both the success and the failure case
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    // a body without the flag is a failure
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub results: Option<Vec<ResultItem>>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn found(results: Vec<ResultItem>, page: usize) -> Self {
        QueryResponse {
            success: true,
            results: Some(results),
            page: Some(page),
            error: None,
        }
    }

    pub fn failed(error: Option<&str>) -> Self {
        QueryResponse {
            success: false,
            error: error.map(str::to_string),
            ..Default::default()
        }
    }
}

/// Ordered results of one query. Backend order is kept as-is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new(items: Vec<ResultItem>) -> Self {
        ResultSet { items }
    }

    pub fn items(&self) -> &[ResultItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_without_results_or_page_decodes() {
        let response: QueryResponse = serde_json::from_value(json!({ "success": true })).unwrap();
        assert!(response.success);
        assert_eq!(response.results, None);
        assert_eq!(response.page, None);
    }

    #[test]
    fn response_without_success_flag_is_a_failure() {
        let response: QueryResponse = serde_json::from_value(json!({ "error": "no match" })).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("no match"));
    }

    #[test]
    fn item_with_only_name_decodes() {
        let item: ResultItem = serde_json::from_value(json!({ "name": "天籁", "rating": null })).unwrap();
        assert_eq!(item, ResultItem::named("天籁"));
    }

    #[test]
    fn item_without_name_is_rejected() {
        let decoded = serde_json::from_value::<ResultItem>(json!({ "brand": "丰田" }));
        assert!(decoded.is_err());
    }

    #[test]
    fn categories_serialize_lowercase() {
        assert_eq!(serde_json::to_value(VehicleType::Hatchback).unwrap(), json!("hatchback"));
        assert_eq!(serde_json::to_value(EnergyType::Electric).unwrap(), json!("electric"));
        for vt in VehicleType::ALL {
            assert_eq!(serde_json::to_value(vt).unwrap(), json!(vt.as_str()));
        }
    }
}
