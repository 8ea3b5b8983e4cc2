//! Parcel boundary staking cost calculator.
//!
//! A cadastral number is looked up remotely, the returned point count is
//! multiplied by a fixed price per point, and the result is exposed as a
//! render-ready [`domain::WorkflowView`].

pub mod config;
pub mod domain;
pub mod infra;
pub mod logging;
pub mod session;

#[cfg(feature = "ui")]
pub mod app;
#[cfg(feature = "ui")]
pub mod ui;

pub use config::{CalculatorConfig, ConfigError, LookupConfig, PricingConfig};
pub use domain::{
    CadastralRecord, CalculationWorkflow, LookupError, ParcelIdentifier, ParcelLookup,
    PricePerPoint, ValidationError, WorkflowState, WorkflowView,
};
pub use infra::{LookupClient, LookupClientError};
pub use session::{CalculatorSession, SubmitOutcome};
