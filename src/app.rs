use dioxus::{prelude::*, signals::Signal};
use tracing::{debug, error, warn};

use crate::{
    config::CalculatorConfig,
    domain::{CalculationWorkflow, LookupError, SubmitDecision},
    infra::LookupClient,
    ui::{pages::CalculatorPage, shell::Shell, theme::STYLES},
};

/// Lookup client shared with the pages, or the reason it could not be built.
#[derive(Clone)]
pub struct LookupHandle(Result<LookupClient, String>);

impl LookupHandle {
    pub fn error(&self) -> Option<String> {
        self.0.as_ref().err().cloned()
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(|| {
        CalculatorConfig::from_env().unwrap_or_else(|err| {
            warn!(%err, "Invalid environment configuration; using defaults");
            CalculatorConfig::default()
        })
    });

    let workflow = use_signal(|| CalculationWorkflow::new(config.pricing));
    use_context_provider(|| workflow);

    let lookup = use_hook(|| {
        LookupHandle(LookupClient::from_config(&config.lookup).map_err(|err| {
            error!(%err, "Failed to initialise lookup client");
            format!("Failed to initialise lookup client: {err}")
        }))
    });
    use_context_provider(|| lookup.clone());

    rsx! {
        document::Style { "{STYLES}" }
        Shell { CalculatorPage {} }
    }
}

/// Starts a lookup for `raw` unless the input is blank or one is already running.
pub fn submit_calculation(
    mut workflow: Signal<CalculationWorkflow>,
    lookup: LookupHandle,
    raw: String,
) {
    let pending = match workflow.with_mut(|wf| wf.begin_submit(&raw)) {
        Ok(SubmitDecision::Started(pending)) => pending,
        Ok(SubmitDecision::Ignored) => return,
        Err(err) => {
            debug!(%err, "Rejected submit");
            return;
        }
    };

    spawn(async move {
        let outcome = match &lookup.0 {
            Ok(client) => client.fetch(&pending.identifier).await,
            Err(cause) => Err(LookupError::Transport {
                cause: cause.clone(),
            }),
        };
        workflow.with_mut(|wf| wf.resolve(pending.ticket, outcome));
    });
}
