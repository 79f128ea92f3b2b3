//! Integration tests for the engine components working together through
//! `LoopState`, driven the way the poll loop drives them.

use hwbot_common::config::TrackingPolicy;
use hwbot_common::error::{AppError, ErrorKind};
use hwbot_engine::{LoopState, StatusChange};

// ============================================================
// Shared helpers
// ============================================================

const ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

fn reviewing(name: &str) -> String {
    format!("Изменился статус проверки работы \"{name}\". Работа взята на проверку ревьюером.")
}

fn approved(name: &str) -> String {
    format!(
        "Изменился статус проверки работы \"{name}\". Работа проверена: ревьюеру всё понравилось. Ура!"
    )
}

fn unavailable() -> AppError {
    AppError::BadStatusCode {
        endpoint: ENDPOINT.to_string(),
        code: 404,
    }
}

/// Apply a successful poll the way `StatusPoller` does; returns whether the
/// chat would have received a message.
fn succeed(state: &mut LoopState, latest: Option<&str>, current_date: Option<i64>) -> bool {
    let notified = match state.detect(latest) {
        StatusChange::Changed(message) => {
            state.record_delivery(message, true);
            true
        }
        StatusChange::Unchanged => false,
    };
    state.record_success(current_date);
    notified
}

// ============================================================
// Status tracking
// ============================================================

#[test]
fn test_review_lifecycle() {
    let mut state = LoopState::new(TrackingPolicy::OnDetection);

    assert!(succeed(&mut state, Some(reviewing("hw1").as_str()), Some(100)));
    assert!(!succeed(&mut state, Some(reviewing("hw1").as_str()), Some(200)));
    assert!(!succeed(&mut state, None, Some(300)));
    assert!(succeed(&mut state, Some(approved("hw1").as_str()), Some(400)));

    assert_eq!(state.tracked().as_str(), approved("hw1"));
    assert_eq!(state.cursor().from_date(), 400);
}

#[test]
fn test_new_homework_with_same_verdict_is_a_change() {
    let mut state = LoopState::default();

    assert!(succeed(&mut state, Some(approved("hw1").as_str()), None));
    assert!(succeed(&mut state, Some(approved("hw2").as_str()), None));
    assert_eq!(state.cursor().from_date(), 0);
}

// ============================================================
// Error edge triggering
// ============================================================

#[test]
fn test_persisting_failure_notifies_once() {
    let mut state = LoopState::default();

    let reports: Vec<_> = (0..5).map(|_| state.record_failure(&unavailable())).collect();

    assert_eq!(reports.iter().filter(|r| r.notify).count(), 1);
    assert!(reports[0].notify);
    assert!(reports.iter().all(|r| r.kind == ErrorKind::BadStatusCode));
    assert_eq!(state.health().consecutive_failures(), 5);
}

#[test]
fn test_success_between_failures_rearms() {
    let mut state = LoopState::default();

    assert!(state.record_failure(&unavailable()).notify);
    assert!(!state.record_failure(&unavailable()).notify);

    succeed(&mut state, None, Some(1000));

    assert!(state.record_failure(&unavailable()).notify);
}

#[test]
fn test_failure_does_not_touch_tracked_status() {
    let mut state = LoopState::default();
    succeed(&mut state, Some(approved("hw1").as_str()), Some(100));

    let report = state.record_failure(&AppError::UnrecognizedVerdict("lost".to_string()));
    assert!(report.message.contains("lost"));
    assert_eq!(state.tracked().as_str(), approved("hw1"));
    assert_eq!(state.cursor().from_date(), 100);

    // Recovery with the same status stays silent
    assert!(!succeed(&mut state, Some(approved("hw1").as_str()), Some(200)));
}
