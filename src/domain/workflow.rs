//! The calculation state machine.
//!
//! - One lookup in flight at most; submits while `Loading` are ignored.
//! - Every transition replaces the whole state. Nothing from an earlier
//!   result survives a new submit.
//! - The total is derived from the state on every [`CalculationWorkflow::view`]
//!   call and never stored.

use tracing::{debug, info, warn};

use super::entities::{CadastralRecord, ParcelIdentifier, ValidationError};
use super::lookup::LookupError;
use super::pricing::{
    cost_breakdown, derived_total, format_area, format_currency_units, point_badges, PointBadge,
};
use crate::config::PricingConfig;

/// Handle for one started lookup. Only the newest ticket can resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LookupTicket {
    generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum WorkflowState {
    #[default]
    Idle,
    Loading {
        identifier: ParcelIdentifier,
        ticket: LookupTicket,
    },
    Success(CadastralRecord),
    Failed(String),
}

impl WorkflowState {
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::Loading { .. } => "loading",
            WorkflowState::Success(_) => "success",
            WorkflowState::Failed(_) => "failed",
        }
    }
}

/// A lookup the caller must now perform and hand back via
/// [`CalculationWorkflow::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingLookup {
    pub identifier: ParcelIdentifier,
    pub ticket: LookupTicket,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitDecision {
    Started(PendingLookup),
    /// A lookup is already in flight.
    Ignored,
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkflowView {
    pub state: WorkflowState,
    pub derived_total: Option<u64>,
    pub formatted_total: Option<String>,
    pub formatted_price_per_point: String,
    pub breakdown: Option<String>,
    pub formatted_area: Option<String>,
    pub point_badges: Vec<PointBadge>,
    pub overflow_count: u32,
    pub error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct CalculationWorkflow {
    pricing: PricingConfig,
    state: WorkflowState,
    next_generation: u64,
}

impl CalculationWorkflow {
    pub fn new(pricing: PricingConfig) -> Self {
        Self {
            pricing,
            state: WorkflowState::Idle,
            next_generation: 0,
        }
    }

    pub fn pricing(&self) -> &PricingConfig {
        &self.pricing
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, WorkflowState::Loading { .. })
    }

    /// Whether the submit control should be enabled for this input.
    pub fn can_submit(&self, raw: &str) -> bool {
        !self.is_loading() && !raw.trim().is_empty()
    }

    /// Validates the input and, unless a lookup is already running, moves to
    /// `Loading`. An invalid input leaves the state untouched.
    pub fn begin_submit(&mut self, raw: &str) -> Result<SubmitDecision, ValidationError> {
        let identifier = ParcelIdentifier::parse(raw)?;

        if self.is_loading() {
            debug!(%identifier, "Lookup already in flight; ignoring submit");
            return Ok(SubmitDecision::Ignored);
        }

        self.next_generation += 1;
        let ticket = LookupTicket {
            generation: self.next_generation,
        };
        info!(%identifier, from = self.state.label(), "Starting parcel lookup");
        self.state = WorkflowState::Loading {
            identifier: identifier.clone(),
            ticket,
        };

        Ok(SubmitDecision::Started(PendingLookup { identifier, ticket }))
    }

    /// Applies the outcome of the lookup identified by `ticket`.
    /// Returns `false` (and changes nothing) if that lookup is not the one in flight.
    pub fn resolve(
        &mut self,
        ticket: LookupTicket,
        outcome: Result<CadastralRecord, LookupError>,
    ) -> bool {
        let in_flight = matches!(
            &self.state,
            WorkflowState::Loading { ticket: current, .. } if *current == ticket
        );
        if !in_flight {
            warn!(?ticket, state = self.state.label(), "Dropping stale lookup result");
            return false;
        }

        self.state = match outcome {
            Ok(record) => {
                info!(
                    identifier = %record.identifier,
                    points = record.points_count,
                    "Lookup succeeded"
                );
                WorkflowState::Success(record)
            }
            Err(error) => {
                warn!(?error, "Lookup failed");
                WorkflowState::Failed(error.detail())
            }
        };
        true
    }

    /// Back to `Idle`. Refused while a lookup is in flight.
    pub fn reset(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.state = WorkflowState::Idle;
        true
    }

    pub fn view(&self) -> WorkflowView {
        let price = self.pricing.price_per_point;
        let currency = self.pricing.currency;
        let formatted_price_per_point = format_currency_units(price.amount(), currency);

        match &self.state {
            WorkflowState::Success(record) => {
                let total = derived_total(record.points_count, price);
                let badges = point_badges(record.points_count);
                WorkflowView {
                    state: self.state.clone(),
                    derived_total: Some(total),
                    formatted_total: Some(format_currency_units(total, currency)),
                    formatted_price_per_point,
                    breakdown: Some(cost_breakdown(record.points_count, price, currency)),
                    formatted_area: record.area.map(format_area),
                    point_badges: badges.badges,
                    overflow_count: badges.overflow,
                    error: None,
                }
            }
            other => WorkflowView {
                state: other.clone(),
                derived_total: None,
                formatted_total: None,
                formatted_price_per_point,
                breakdown: None,
                formatted_area: None,
                point_badges: Vec::new(),
                overflow_count: 0,
                error: match other {
                    WorkflowState::Failed(message) => Some(message.clone()),
                    _ => None,
                },
            },
        }
    }
}

impl Default for CalculationWorkflow {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}
