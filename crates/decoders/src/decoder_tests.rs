//! Payload-level tests for the response validator, the status extractor
//! and `ResponseDecoder`.

use serde_json::{Value, json};

use hwbot_common::error::{AppError, ErrorKind};
use hwbot_common::types::Verdict;

use crate::homework::HOMEWORK_OBJECT;
use crate::response::RESPONSE_OBJECT;
use crate::{ResponseContract, ResponseDecoder, parse_status, preview, validate_response};

// ───────────────────────────── helpers ──────────────────────────────

fn record(name: &str, status: &str) -> Value {
    json!({
        "id": 124,
        "homework_name": name,
        "status": status,
        "reviewer_comment": "Всё нравится",
        "date_updated": "2020-02-13T14:40:57Z",
        "lesson_name": "Итоговый проект"
    })
}

fn decoder() -> ResponseDecoder {
    ResponseDecoder::new(ResponseContract::default())
}

// ═══════════════════════════════════════════════════════════════════
//  Response validator
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_missing_homeworks_key() {
    for payload in [json!({}), json!({ "current_date": 1000 }), json!({ "homework": [] })] {
        let err = validate_response(&payload, ResponseContract::default()).unwrap_err();
        assert!(
            matches!(err, AppError::MissingField { ref key, ref object } if key == "homeworks" && object == RESPONSE_OBJECT),
            "unexpected error for {payload}: {err:?}"
        );
    }
}

#[test]
fn test_homeworks_not_a_list() {
    for homeworks in [json!({}), json!("hw1"), json!(7), json!(true)] {
        let payload = json!({ "homeworks": homeworks, "current_date": 1000 });
        let err = validate_response(&payload, ResponseContract::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse, "payload: {payload}");
    }
}

#[test]
fn test_response_not_an_object() {
    let payload = json!("not-an-object");
    let err = validate_response(&payload, ResponseContract::default()).unwrap_err();
    match err {
        AppError::MalformedResponse { value, expected } => {
            assert_eq!(value, "\"not-an-object\"");
            assert_eq!(expected, "объект");
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }

    let list = json!([{ "homeworks": [] }]);
    assert_eq!(
        validate_response(&list, ResponseContract::default())
            .unwrap_err()
            .kind(),
        ErrorKind::MalformedResponse
    );
}

#[test]
fn test_homeworks_returned_verbatim() {
    let payload = json!({
        "homeworks": [record("hw2", "reviewing"), record("hw1", "approved")],
        "current_date": 1000
    });
    let validated = validate_response(&payload, ResponseContract::default()).unwrap();
    let records = payload["homeworks"].as_array().unwrap();
    assert_eq!(validated.homeworks, records.as_slice());
    // Borrowed from the payload, not copied
    assert!(std::ptr::eq(validated.homeworks.as_ptr(), records.as_ptr()));
}

// ═══════════════════════════════════════════════════════════════════
//  Status extractor
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_parse_every_known_verdict() {
    let cases = [
        ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
        ("reviewing", "Работа взята на проверку ревьюером."),
        ("rejected", "Работа проверена: у ревьюера есть замечания."),
    ];
    for (code, text) in cases {
        let status = parse_status(&record("hw1", code)).unwrap();
        assert_eq!(status.verdict.code(), code);
        assert_eq!(
            status.message(),
            format!("Изменился статус проверки работы \"hw1\". {text}")
        );
    }
}

#[test]
fn test_unrecognized_verdict_carries_raw_value() {
    let err = parse_status(&record("hw1", "on_hold")).unwrap_err();
    assert!(matches!(err, AppError::UnrecognizedVerdict(ref code) if code == "on_hold"));
    assert!(err.to_string().contains("on_hold"));
}

#[test]
fn test_missing_record_fields() {
    let no_name = json!({ "status": "approved" });
    let err = parse_status(&no_name).unwrap_err();
    assert!(
        matches!(err, AppError::MissingField { ref key, ref object } if key == "homework_name" && object == HOMEWORK_OBJECT)
    );

    let no_status = json!({ "homework_name": "hw1" });
    let err = parse_status(&no_status).unwrap_err();
    assert!(matches!(err, AppError::MissingField { ref key, .. } if key == "status"));

    let empty_status = json!({ "homework_name": "hw1", "status": "" });
    let err = parse_status(&empty_status).unwrap_err();
    assert!(matches!(err, AppError::MissingField { ref key, .. } if key == "status"));
}

#[test]
fn test_record_not_an_object() {
    let err = parse_status(&json!(["hw1", "approved"])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

// ═══════════════════════════════════════════════════════════════════
//  ResponseDecoder
// ═══════════════════════════════════════════════════════════════════

#[test]
fn test_decoder_takes_first_record_only() {
    let payload = json!({
        "homeworks": [record("hw2", "reviewing"), record("hw1", "bogus")],
        "current_date": 1500
    });
    let snapshot = decoder().decode(&payload).unwrap();
    let latest = snapshot.latest.unwrap();
    assert_eq!(latest.homework_name, "hw2");
    assert_eq!(latest.verdict, Verdict::Reviewing);
    assert_eq!(snapshot.homework_count, 2);
    assert_eq!(snapshot.current_date, Some(1500));
}

#[test]
fn test_decoder_empty_batch() {
    let snapshot = decoder()
        .decode(&json!({ "homeworks": [], "current_date": 1000 }))
        .unwrap();
    assert_eq!(snapshot.latest, None);
    assert_eq!(snapshot.homework_count, 0);
    assert_eq!(snapshot.current_date, Some(1000));
}

#[test]
fn test_decoder_propagates_extractor_errors() {
    let payload = json!({ "homeworks": [record("hw1", "lost")], "current_date": 1 });
    let err = decoder().decode(&payload).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnrecognizedVerdict);
}

#[test]
fn test_preview_truncates_long_values() {
    let long = Value::String("я".repeat(500));
    let rendered = preview(&long);
    assert_eq!(rendered.chars().count(), 201);
    assert!(rendered.ends_with('…'));

    assert_eq!(preview(&json!(42)), "42");
}
