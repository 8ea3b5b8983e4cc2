use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use parcel_cost_calculator::{
    CadastralRecord, CalculatorSession, LookupClient, LookupError, ParcelIdentifier,
    ParcelLookup, PricingConfig, SubmitOutcome, ValidationError, WorkflowState,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use tokio::sync::Notify;
use wiremock::{matchers::method, Mock, MockServer, ResponseTemplate};

/// Replays queued outcomes. When `gated`, each call waits for `release`.
#[derive(Default)]
struct ScriptedLookup {
    outcomes: Mutex<VecDeque<Result<CadastralRecord, LookupError>>>,
    requested: Mutex<Vec<String>>,
    calls: AtomicUsize,
    gated: bool,
    started: Notify,
    release: Notify,
}

impl ScriptedLookup {
    fn with(outcomes: Vec<Result<CadastralRecord, LookupError>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Self::default()
        }
    }

    fn gated(outcomes: Vec<Result<CadastralRecord, LookupError>>) -> Self {
        Self {
            gated: true,
            ..Self::with(outcomes)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ParcelLookup for ScriptedLookup {
    async fn fetch_record(
        &self,
        identifier: &ParcelIdentifier,
    ) -> Result<CadastralRecord, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested
            .lock()
            .unwrap()
            .push(identifier.as_str().to_string());
        if self.gated {
            self.started.notify_one();
            self.release.notified().await;
        }
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted outcome left")
    }
}

fn session(lookup: &Arc<ScriptedLookup>) -> CalculatorSession<ScriptedLookup> {
    CalculatorSession::from_shared(Arc::clone(lookup), PricingConfig::default())
}

#[tokio::test]
async fn total_is_points_times_price() {
    for points in [0u32, 1, 7, 12, 13, 250] {
        let lookup = Arc::new(ScriptedLookup::with(vec![Ok(CadastralRecord::new(
            "p", points,
        ))]));
        let session = session(&lookup);
        session.submit("p").await.unwrap();

        let view = session.snapshot().await;
        assert_eq!(view.derived_total, Some(u64::from(points) * 1000));
        assert_eq!(view.point_badges.len() as u32, points.min(12));
        assert_eq!(view.overflow_count, points.saturating_sub(12));
    }
}

#[tokio::test]
async fn empty_input_never_reaches_lookup() {
    let lookup = Arc::new(ScriptedLookup::default());
    let session = session(&lookup);

    assert_eq!(
        session.submit("").await,
        Err(ValidationError::EmptyIdentifier)
    );
    assert_eq!(
        session.submit(" \t ").await,
        Err(ValidationError::EmptyIdentifier)
    );
    assert_eq!(lookup.calls(), 0);
    assert_eq!(session.state().await, WorkflowState::Idle);
    assert!(!session.can_submit("").await);
}

#[tokio::test]
async fn submit_while_loading_is_ignored() {
    let lookup = Arc::new(ScriptedLookup::gated(vec![Ok(CadastralRecord::new(
        "first", 5,
    ))]));
    let session = session(&lookup);

    let in_flight = tokio::spawn({
        let session = session.clone();
        async move { session.submit("first").await }
    });
    lookup.started.notified().await;

    assert!(matches!(
        session.state().await,
        WorkflowState::Loading { .. }
    ));
    assert!(!session.can_submit("second").await);
    assert!(!session.reset().await);
    assert_eq!(session.submit("second").await, Ok(SubmitOutcome::Ignored));
    assert_eq!(lookup.calls(), 1);

    lookup.release.notify_one();
    let outcome = tokio::time::timeout(Duration::from_secs(5), in_flight)
        .await
        .unwrap()
        .unwrap()
        .unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Completed(WorkflowState::Success(CadastralRecord::new("first", 5)))
    );
    assert_eq!(lookup.calls(), 1);
    assert_eq!(*lookup.requested.lock().unwrap(), vec!["first".to_string()]);
}

#[tokio::test]
async fn repeated_submits_do_not_leak_earlier_results() {
    let lookup = Arc::new(ScriptedLookup::with(vec![
        Ok(CadastralRecord::new("77:01:0001001:1234", 20)
            .with_area(Some(450.0))
            .with_address(Some("first address".into()))),
        Ok(CadastralRecord::new("77:01:0001001:1234", 3)),
    ]));
    let session = session(&lookup);

    session.submit("77:01:0001001:1234").await.unwrap();
    let first = session.snapshot().await;
    assert_eq!(first.derived_total, Some(20_000));
    assert_eq!(first.overflow_count, 8);

    session.submit("77:01:0001001:1234").await.unwrap();
    let second = session.snapshot().await;
    assert_eq!(
        second.state,
        WorkflowState::Success(CadastralRecord::new("77:01:0001001:1234", 3))
    );
    assert_eq!(second.derived_total, Some(3000));
    assert_eq!(second.formatted_area, None);
    assert_eq!(second.overflow_count, 0);
    assert_eq!(lookup.calls(), 2);
}

#[tokio::test]
async fn failure_then_success_recovers() {
    let lookup = Arc::new(ScriptedLookup::with(vec![
        Err(LookupError::Transport {
            cause: "connection reset".into(),
        }),
        Ok(CadastralRecord::new("X", 2)),
    ]));
    let session = session(&lookup);

    let outcome = session.submit("X").await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Completed(WorkflowState::Failed(
            "Ошибка при получении данных: connection reset".into()
        ))
    );
    assert!(session.can_submit("X").await);

    session.submit("X").await.unwrap();
    let view = session.snapshot().await;
    assert_eq!(view.error, None);
    assert_eq!(view.derived_total, Some(2000));
}

#[tokio::test]
async fn scenario_found_parcel_is_priced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "pointsCount": 7, "area": 450 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = LookupClient::with_base_url(&server.uri()).unwrap();
    let session = CalculatorSession::new(client, PricingConfig::default());
    session.submit("77:01:0001001:1234").await.unwrap();

    let view = session.snapshot().await;
    assert!(matches!(view.state, WorkflowState::Success(_)));
    assert_eq!(view.derived_total, Some(7000));
    assert_eq!(view.formatted_total.as_deref(), Some("7\u{a0}000\u{a0}₽"));
    assert_eq!(view.formatted_area.as_deref(), Some("450 м²"));
    assert_eq!(view.point_badges.len(), 7);
    assert_eq!(view.overflow_count, 0);
}

#[tokio::test]
async fn scenario_unknown_parcel_fails_with_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Parcel not found" })),
        )
        .mount(&server)
        .await;

    let client = LookupClient::with_base_url(&server.uri()).unwrap();
    let session = CalculatorSession::new(client, PricingConfig::default());
    session.submit("00:00:0000000:0000").await.unwrap();

    let view = session.snapshot().await;
    assert_eq!(view.state, WorkflowState::Failed("Parcel not found".into()));
    assert_eq!(view.error.as_deref(), Some("Parcel not found"));
    assert_eq!(view.formatted_total, None);
}

#[tokio::test]
async fn scenario_network_failure_fails_gracefully() {
    let client = LookupClient::with_base_url("http://127.0.0.1:1/").unwrap();
    let session = CalculatorSession::new(client, PricingConfig::default());

    let outcome = session.submit("X").await.unwrap();
    match outcome {
        SubmitOutcome::Completed(WorkflowState::Failed(message)) => {
            assert!(message.starts_with("Ошибка при получении данных: "), "{message}");
        }
        other => panic!("expected a failed lookup, got {other:?}"),
    }
    assert!(session.can_submit("X").await);
}

#[tokio::test]
async fn dropped_submit_releases_the_workflow() {
    let lookup = Arc::new(ScriptedLookup::gated(vec![Ok(CadastralRecord::new("Y", 4))]));
    let session = session(&lookup);

    let abandoned = tokio::time::timeout(Duration::from_millis(50), session.submit("X")).await;
    assert!(abandoned.is_err());
    assert!(session.can_submit("Y").await);
    assert_eq!(
        session.state().await,
        WorkflowState::Failed("Ошибка при получении данных: запрос отменён".into())
    );

    lookup.release.notify_one();
    let outcome = session.submit("Y").await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Completed(WorkflowState::Success(CadastralRecord::new("Y", 4)))
    );
    assert_eq!(
        *lookup.requested.lock().unwrap(),
        vec!["X".to_string(), "Y".to_string()]
    );
}

#[tokio::test]
async fn aborted_submit_task_releases_the_workflow() {
    let lookup = Arc::new(ScriptedLookup::gated(Vec::new()));
    let session = session(&lookup);

    let task = tokio::spawn({
        let session = session.clone();
        async move { session.submit("X").await }
    });
    lookup.started.notified().await;
    assert!(!session.can_submit("Y").await);

    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    assert!(session.can_submit("Y").await);
    assert!(session.reset().await);
}
