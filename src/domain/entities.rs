use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Price charged per boundary point when no other value is configured.
pub const DEFAULT_PRICE_PER_POINT: PricePerPoint = PricePerPoint(1000);

/// Local input rejection. Never reaches the lookup provider.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("cadastral number must not be empty")]
    EmptyIdentifier,
}

/// User-supplied cadastral number, e.g. `77:01:0001001:1234`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParcelIdentifier(String);

impl ParcelIdentifier {
    /// Trims the raw input and rejects it if nothing is left.
    /// No format checks beyond that; the provider decides what exists.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParcelIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parcel data returned by the lookup provider.
///
/// Only `points_count` feeds the cost; the rest is descriptive and may be
/// unknown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CadastralRecord {
    pub identifier: String,
    pub points_count: u32,
    /// Square metres. `None` when the provider reports nothing usable.
    pub area: Option<f64>,
    pub assessed_cost: Option<f64>,
    pub category: Option<String>,
    pub address: Option<String>,
}

impl CadastralRecord {
    pub fn new(identifier: impl Into<String>, points_count: u32) -> Self {
        Self {
            identifier: identifier.into(),
            points_count,
            area: None,
            assessed_cost: None,
            category: None,
            address: None,
        }
    }

    pub fn with_area(mut self, area: Option<f64>) -> Self {
        self.area = area.filter(|value| value.is_finite() && *value > 0.0);
        self
    }

    pub fn with_assessed_cost(mut self, cost: Option<f64>) -> Self {
        self.assessed_cost = cost.filter(|value| value.is_finite() && *value >= 0.0);
        self
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = non_blank(category);
        self
    }

    pub fn with_address(mut self, address: Option<String>) -> Self {
        self.address = non_blank(address);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Fixed price for one boundary point, in whole currency units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePerPoint(pub u64);

impl PricePerPoint {
    pub fn amount(self) -> u64 {
        self.0
    }
}

impl Default for PricePerPoint {
    fn default() -> Self {
        DEFAULT_PRICE_PER_POINT
    }
}

/// Currency used when rendering totals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub symbol: &'static str,
}

impl Currency {
    pub const RUB: Currency = Currency {
        code: "RUB",
        symbol: "₽",
    };
}

impl Default for Currency {
    fn default() -> Self {
        Currency::RUB
    }
}
