//! Draft filter selections: price bounds plus category checkboxes.
//!
//! Edits never fail. Numeric input outside `u32` is clamped, and when one bound
//! crosses the other the bound that was *not* edited is moved to match, so
//! `price_min <= price_max` holds after every call.

use std::collections::BTreeSet;

use crate::models::{EnergyType, FilterSnapshot, VehicleType};

pub const DEFAULT_PRICE_MIN: u32 = 0;
pub const DEFAULT_PRICE_MAX: u32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    price_min: u32,
    price_max: u32,
    vehicle_types: BTreeSet<VehicleType>,
    energy_types: BTreeSet<EnergyType>,
}

impl Default for FilterState {
    fn default() -> Self {
        FilterState {
            price_min: DEFAULT_PRICE_MIN,
            price_max: DEFAULT_PRICE_MAX,
            vehicle_types: BTreeSet::new(),
            energy_types: BTreeSet::new(),
        }
    }
}

fn clamp_price(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

impl FilterState {
    pub fn price_min(&self) -> u32 {
        self.price_min
    }

    pub fn price_max(&self) -> u32 {
        self.price_max
    }

    pub fn vehicle_types(&self) -> &BTreeSet<VehicleType> {
        &self.vehicle_types
    }

    pub fn energy_types(&self) -> &BTreeSet<EnergyType> {
        &self.energy_types
    }

    /// Lower slider moved. Drags the upper bound along when crossed.
    pub fn set_price_min(&mut self, value: i64) {
        self.price_min = clamp_price(value);
        if self.price_min > self.price_max {
            self.price_max = self.price_min;
        }
    }

    /// Upper slider moved. Drags the lower bound along when crossed.
    pub fn set_price_max(&mut self, value: i64) {
        self.price_max = clamp_price(value);
        if self.price_max < self.price_min {
            self.price_min = self.price_max;
        }
    }

    /// Sets both bounds at once.
    ///
    /// The bound that differs from the stored value counts as the edited one and
    /// wins a conflict; if both changed, the lower bound wins.
    pub fn set_price_range(&mut self, min: i64, max: i64) {
        if clamp_price(min) != self.price_min {
            self.set_price_max(max);
            self.set_price_min(min);
        } else {
            self.set_price_min(min);
            self.set_price_max(max);
        }
    }

    pub fn set_vehicle_types(&mut self, types: impl IntoIterator<Item = VehicleType>) {
        self.vehicle_types = types.into_iter().collect();
    }

    pub fn set_energy_types(&mut self, types: impl IntoIterator<Item = EnergyType>) {
        self.energy_types = types.into_iter().collect();
    }

    /// Freezes the current draft into the snapshot that requests carry.
    pub fn apply(&self) -> FilterSnapshot {
        FilterSnapshot {
            price_min: self.price_min,
            price_max: self.price_max,
            vehicle_types: self.vehicle_types.iter().copied().collect(),
            energy_types: self.energy_types.iter().copied().collect(),
        }
    }
}
