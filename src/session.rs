//! Drives a [`CalculationWorkflow`] across the lookup's suspension point.
//!
//! The workflow lock is only held to read or replace the state, never while
//! the lookup is awaited, so the renderer can keep reading `Loading`.
//! A submit future dropped mid-lookup fails its ticket instead of leaving
//! the workflow in `Loading`.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::config::PricingConfig;
use crate::domain::{
    CalculationWorkflow, LookupError, LookupTicket, ParcelLookup, SubmitDecision,
    ValidationError, WorkflowState, WorkflowView,
};

const CANCELLED_CAUSE: &str = "запрос отменён";

/// What a call to [`CalculatorSession::submit`] ended up doing.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The lookup ran and this is the state it produced.
    Completed(WorkflowState),
    /// Another lookup was already in flight.
    Ignored,
}

pub struct CalculatorSession<L: ParcelLookup> {
    workflow: Arc<Mutex<CalculationWorkflow>>,
    lookup: Arc<L>,
}

impl<L: ParcelLookup> Clone for CalculatorSession<L> {
    fn clone(&self) -> Self {
        Self {
            workflow: Arc::clone(&self.workflow),
            lookup: Arc::clone(&self.lookup),
        }
    }
}

impl<L: ParcelLookup> CalculatorSession<L> {
    pub fn new(lookup: L, pricing: PricingConfig) -> Self {
        Self::from_shared(Arc::new(lookup), pricing)
    }

    pub fn from_shared(lookup: Arc<L>, pricing: PricingConfig) -> Self {
        Self {
            workflow: Arc::new(Mutex::new(CalculationWorkflow::new(pricing))),
            lookup,
        }
    }

    /// Validates, looks the parcel up and applies the result.
    ///
    /// Empty input fails fast with no state change. A submit made while
    /// another lookup is in flight returns [`SubmitOutcome::Ignored`].
    pub async fn submit(&self, raw: &str) -> Result<SubmitOutcome, ValidationError> {
        let decision = self.workflow.lock().await.begin_submit(raw)?;
        let pending = match decision {
            SubmitDecision::Started(pending) => pending,
            SubmitDecision::Ignored => return Ok(SubmitOutcome::Ignored),
        };

        let mut in_flight = InFlight {
            workflow: Arc::clone(&self.workflow),
            ticket: Some(pending.ticket),
        };
        let outcome = self.lookup.fetch_record(&pending.identifier).await;

        let mut workflow = self.workflow.lock().await;
        in_flight.ticket = None;
        let applied = workflow.resolve(pending.ticket, outcome);
        debug!(applied, state = workflow.state().label(), "Lookup resolved");
        Ok(SubmitOutcome::Completed(workflow.state().clone()))
    }

    pub async fn can_submit(&self, raw: &str) -> bool {
        self.workflow.lock().await.can_submit(raw)
    }

    pub async fn reset(&self) -> bool {
        self.workflow.lock().await.reset()
    }

    pub async fn state(&self) -> WorkflowState {
        self.workflow.lock().await.state().clone()
    }

    pub async fn snapshot(&self) -> WorkflowView {
        self.workflow.lock().await.view()
    }
}

/// Fails the pending ticket if `submit` is dropped before it resolves.
struct InFlight {
    workflow: Arc<Mutex<CalculationWorkflow>>,
    ticket: Option<LookupTicket>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let Some(ticket) = self.ticket.take() else {
            return;
        };
        warn!(?ticket, "Submit dropped before the lookup finished");

        if let Ok(mut workflow) = self.workflow.try_lock() {
            workflow.resolve(ticket, Err(cancelled()));
            return;
        }
        // Lock is busy: finish on the runtime once it frees up.
        match Handle::try_current() {
            Ok(handle) => {
                let workflow = Arc::clone(&self.workflow);
                handle.spawn(async move {
                    workflow.lock().await.resolve(ticket, Err(cancelled()));
                });
            }
            Err(_) => warn!(?ticket, "No runtime to release the cancelled lookup"),
        }
    }
}

fn cancelled() -> LookupError {
    LookupError::Transport {
        cause: CANCELLED_CAUSE.to_string(),
    }
}
