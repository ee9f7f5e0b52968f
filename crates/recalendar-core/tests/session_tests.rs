mod common;

use common::{
    create_session_with_client, create_test_session, FailingRenderer, GatedRenderer,
    PanicOnceRenderer, RecordingObserver, RecordingRenderer,
};
use recalendar_core::{
    CalendarError, GenerationOutcome, GenerationState, ItineraryEntry, ItineraryTarget,
    WorkerBuilder, WorkerHealth, DOWNLOAD_FILENAME,
};

#[tokio::test]
async fn test_full_generation_saves_document() {
    let observer = RecordingObserver::default();
    let (temp_dir, session) = create_test_session(common::scenario_state());
    let mut session = session.with_observer(observer.clone());

    let outcome = session.generate(false).await.expect("request accepted");
    let GenerationOutcome::Saved { path, .. } = outcome else {
        panic!("expected a saved document, got {outcome:?}");
    };
    assert_eq!(path, temp_dir.path().join(DOWNLOAD_FILENAME));
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));

    let events = observer.events();
    assert_eq!(events[0], "state:generating full document");
    assert!(events[1].starts_with("saved:"));
    assert_eq!(events[2], "state:idle");
    assert!(session.artifacts().live_handle().is_none());
}

#[tokio::test]
async fn test_new_preview_revokes_previous_handle() {
    let (_temp_dir, mut session) = create_test_session(common::scenario_state());

    let GenerationOutcome::Preview { handle: first, .. } = session.generate(true).await.unwrap()
    else {
        panic!("expected a preview");
    };
    let bytes = session.artifacts().resolve(&first).expect("first handle live");
    assert!(bytes.starts_with(b"%PDF-"));

    let GenerationOutcome::Preview { handle: second, .. } = session.generate(true).await.unwrap()
    else {
        panic!("expected a preview");
    };
    assert_ne!(first, second);
    assert!(session.artifacts().resolve(&first).is_none());
    assert!(session.artifacts().resolve(&second).is_some());
    assert_eq!(session.artifacts().revoked_count(), 1);

    session.teardown();
    assert!(session.artifacts().resolve(&second).is_none());
    assert_eq!(session.worker_health(), WorkerHealth::Stopped);
}

#[tokio::test]
async fn test_second_request_while_busy_is_rejected() {
    let (renderer, release) = GatedRenderer::new();
    let client = WorkerBuilder::new().with_renderer(renderer).build().unwrap();
    let (_temp_dir, mut session) = create_session_with_client(common::scenario_state(), client);

    let first = session.request_generation(true).unwrap();
    assert_eq!(session.generation_state(), GenerationState::GeneratingPreview);

    let error = session.request_generation(false).unwrap_err();
    assert!(matches!(error, CalendarError::Busy { id } if id == first.0));
    assert_eq!(session.generation_state(), GenerationState::GeneratingPreview);

    release.send(()).unwrap();
    let outcome = session.process_next().await.unwrap();
    assert_eq!(outcome.request_id(), first);
    assert_eq!(session.generation_state(), GenerationState::Idle);

    release.send(()).unwrap();
    session.request_generation(false).unwrap();
    assert!(matches!(
        session.process_next().await.unwrap(),
        GenerationOutcome::Saved { .. }
    ));
}

#[tokio::test]
async fn test_stale_response_is_dropped() {
    let (renderer, release) = GatedRenderer::new();
    let mut client = WorkerBuilder::new().with_renderer(renderer).build().unwrap();
    let state = common::scenario_state();

    let first_id = client.next_request_id();
    client.submit(state.snapshot(first_id, true).unwrap()).unwrap();
    assert_eq!(client.abandon(), Some(first_id));

    let second_id = client.next_request_id();
    client.submit(state.snapshot(second_id, true).unwrap()).unwrap();

    release.send(()).unwrap();
    release.send(()).unwrap();
    let response = client.next_response().await.expect("response for latest");
    assert_eq!(response.request_id, second_id);
    assert_eq!(response.outcome.unwrap(), b"document #2".to_vec());
    assert!(!client.is_busy());
    assert!(client.next_response().await.is_none());
}

#[tokio::test]
async fn test_failure_carries_request_scope_and_clears_busy() {
    let observer = RecordingObserver::default();
    let client = WorkerBuilder::new()
        .with_renderer(FailingRenderer)
        .build()
        .unwrap();
    let (_temp_dir, session) = create_session_with_client(common::scenario_state(), client);
    let mut session = session.with_observer(observer.clone());

    let outcome = session.generate(false).await.unwrap();
    let GenerationOutcome::Failed {
        request_id,
        is_preview,
        error,
    } = outcome
    else {
        panic!("expected a failure");
    };
    assert_eq!(request_id.0, 1);
    assert!(!is_preview);
    assert!(matches!(error, CalendarError::Layout { .. }));

    assert_eq!(session.generation_state(), GenerationState::Idle);
    assert_eq!(
        observer.events(),
        vec![
            "state:generating full document".to_string(),
            "failed:full".to_string(),
            "state:idle".to_string(),
        ]
    );
    assert_eq!(session.worker_health(), WorkerHealth::Running);
    session.request_generation(true).unwrap();
}

#[tokio::test]
async fn test_worker_crash_requires_restart() {
    let client = WorkerBuilder::new()
        .with_renderer(PanicOnceRenderer::default())
        .build()
        .unwrap();
    let (_temp_dir, mut session) = create_session_with_client(common::scenario_state(), client);

    let outcome = session.generate(true).await.unwrap();
    let GenerationOutcome::Failed {
        is_preview, error, ..
    } = outcome
    else {
        panic!("expected a failure");
    };
    assert!(is_preview);
    assert!(matches!(error, CalendarError::WorkerUnavailable { .. }));
    assert_eq!(session.generation_state(), GenerationState::Idle);
    assert_eq!(session.worker_health(), WorkerHealth::Stopped);

    let error = session.request_generation(true).unwrap_err();
    assert!(matches!(error, CalendarError::WorkerUnavailable { .. }));

    session.restart_worker().unwrap();
    assert_eq!(session.worker_health(), WorkerHealth::Running);
    let outcome = session.generate(true).await.unwrap();
    assert!(matches!(outcome, GenerationOutcome::Preview { .. }));
}

#[tokio::test]
async fn test_invalid_month_count_never_reaches_worker() {
    let renderer = RecordingRenderer::default();
    let seen = renderer.seen.clone();
    let client = WorkerBuilder::new().with_renderer(renderer).build().unwrap();
    let (_temp_dir, mut session) = create_session_with_client(common::scenario_state(), client);

    let error = session.state_mut().set_month_count(13).unwrap_err();
    assert!(error.is_validation());
    assert_eq!(session.generation_state(), GenerationState::Idle);
    assert!(seen.lock().unwrap().is_empty());

    session.generate(false).await.unwrap();
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].configuration.month_count(), 3);
}

#[tokio::test]
async fn test_edits_after_submission_do_not_reach_request() {
    let renderer = RecordingRenderer::default();
    let seen = renderer.seen.clone();
    let client = WorkerBuilder::new().with_renderer(renderer).build().unwrap();
    let (_temp_dir, mut session) = create_session_with_client(common::scenario_state(), client);

    session.request_generation(true).unwrap();
    session
        .state_mut()
        .upsert_entry(
            ItineraryTarget::Month,
            1,
            ItineraryEntry::Item("Added later".to_string()),
        )
        .unwrap();
    session.process_next().await.unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(
        seen[0].itineraries.month(),
        &[ItineraryEntry::Item("Buy books".to_string())]
    );
    assert_eq!(session.state().itineraries().month().len(), 2);
}
