//! Domain logic for parcel cost estimation lives here.

pub mod entities;
pub mod lookup;
pub mod pricing;
pub mod workflow;

pub use entities::{
    CadastralRecord, Currency, ParcelIdentifier, PricePerPoint, ValidationError,
    DEFAULT_PRICE_PER_POINT,
};
pub use lookup::{LookupError, ParcelLookup};
pub use pricing::{
    cost_breakdown, derived_total, format_area, format_currency, format_currency_units,
    point_badges, PointBadge, PointBadges, MAX_POINT_BADGES,
};
pub use workflow::{
    CalculationWorkflow, LookupTicket, PendingLookup, SubmitDecision, WorkflowState, WorkflowView,
};
