//! Cost derivation and ru-RU display formatting.
//!
//! Everything here is pure: the same input always renders the same string.

use super::entities::{Currency, PricePerPoint};

/// Number of point badges rendered individually before collapsing the rest.
pub const MAX_POINT_BADGES: u32 = 12;

const GROUP_SEPARATOR: char = '\u{a0}';
const DECIMAL_SEPARATOR: char = ',';
const AREA_FRACTION_DIGITS: u32 = 3;
const MISSING_VALUE: &str = "—";

/// One rendered point badge. `index` is 1-based, as displayed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointBadge {
    pub index: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointBadges {
    pub badges: Vec<PointBadge>,
    pub overflow: u32,
}

pub fn derived_total(points_count: u32, price: PricePerPoint) -> u64 {
    u64::from(points_count).saturating_mul(price.amount())
}

/// Formats an amount with zero fractional digits, e.g. `7 000 ₽`.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    if !amount.is_finite() {
        return MISSING_VALUE.to_string();
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    // `as` saturates for magnitudes beyond u64.
    let units = rounded.abs() as u64;
    format!(
        "{sign}{}{GROUP_SEPARATOR}{}",
        group_thousands(units),
        currency.symbol
    )
}

/// Integer variant of [`format_currency`] that keeps full u64 precision.
pub fn format_currency_units(amount: u64, currency: Currency) -> String {
    format!(
        "{}{GROUP_SEPARATOR}{}",
        group_thousands(amount),
        currency.symbol
    )
}

/// `7 × 1 000 ₽`, shown under the total.
pub fn cost_breakdown(points_count: u32, price: PricePerPoint, currency: Currency) -> String {
    format!(
        "{points_count} × {}",
        format_currency_units(price.amount(), currency)
    )
}

/// Area in square metres with up to three fractional digits, e.g. `1 234,5 м²`.
pub fn format_area(area: f64) -> String {
    if !area.is_finite() || area < 0.0 {
        return MISSING_VALUE.to_string();
    }
    let scale = 10u64.pow(AREA_FRACTION_DIGITS);
    let scaled = (area * scale as f64).round() as u64;
    let whole = group_thousands(scaled / scale);
    let fraction = format!(
        "{:0width$}",
        scaled % scale,
        width = AREA_FRACTION_DIGITS as usize
    );
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{whole} м²")
    } else {
        format!("{whole}{DECIMAL_SEPARATOR}{fraction} м²")
    }
}

pub fn point_badges(points_count: u32) -> PointBadges {
    let shown = points_count.min(MAX_POINT_BADGES);
    PointBadges {
        badges: (1..=shown).map(|index| PointBadge { index }).collect(),
        overflow: points_count.saturating_sub(MAX_POINT_BADGES),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
