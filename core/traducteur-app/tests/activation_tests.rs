mod common;

use chrono::{DateTime, Duration, Utc};
use common::{harness, FullDisk};
use std::sync::Arc;
use pretty_assertions::assert_eq;
use serde_json::json;
use traducteur_api::{ApiErrorKind, TransportFailure, UNREACHABLE_MESSAGE};
use traducteur_app::{ActivationFlow, ActivationOutcome, AppError, Route, INVALID_KEY_MESSAGE};
use traducteur_license::{
    ActivationRecord, ActivationStore, LicenseError, SecureStorage, ACTIVATION_KEY,
};

fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339).unwrap().with_timezone(&Utc)
}

#[tokio::test]
async fn valid_key_stores_server_expiry() {
    let h = harness();
    h.service.respond(
        "/api/activate",
        200,
        json!({
            "success": true,
            "message": "ok",
            "userId": "u1",
            "expiresAt": "2099-03-01T00:00:00.000Z"
        }),
    );
    let flow = ActivationFlow::new(h.api.clone(), h.store.clone());

    let outcome = flow.activate("VALID123").await.unwrap();

    let stored = h.store.get().unwrap();
    assert_eq!(outcome, ActivationOutcome::Activated(stored.clone()));
    assert_eq!(stored.user_id, "u1");
    assert_eq!(stored.expires_at, at("2099-03-01T00:00:00Z"));
    assert_eq!(h.service.last_body(), Some(json!({ "key": "VALID123" })));
}

#[tokio::test]
async fn missing_server_expiry_falls_back_to_one_year() {
    let h = harness();
    h.service.respond(
        "/api/activate",
        200,
        json!({ "success": true, "message": "ok", "userId": "u1" }),
    );
    let flow = ActivationFlow::new(h.api.clone(), h.store.clone());
    let now = Utc::now();

    let outcome = flow.activate_at("VALID123", now).await.unwrap();

    let ActivationOutcome::Activated(record) = outcome else {
        panic!("expected activation");
    };
    assert_eq!(record, ActivationRecord::new("u1", now, now + Duration::days(365)));
    assert!(h.store.is_activated());
}

#[tokio::test]
async fn key_is_trimmed_before_sending() {
    let h = harness();
    h.service.respond(
        "/api/activate",
        200,
        json!({ "success": false, "message": "Clé inconnue" }),
    );
    let flow = ActivationFlow::new(h.api.clone(), h.store.clone());

    flow.activate("  ABC-123 \n").await.unwrap();

    assert_eq!(h.service.last_body(), Some(json!({ "key": "ABC-123" })));
}

#[tokio::test]
async fn blank_key_is_rejected_locally() {
    let h = harness();
    let flow = ActivationFlow::new(h.api.clone(), h.store.clone());

    let err = flow.activate("   ").await.unwrap_err();

    assert!(matches!(err, AppError::EmptyActivationKey));
    assert!(err.is_validation());
    assert_eq!(h.service.sent_count(), 0);
}

#[tokio::test]
async fn refused_key_uses_server_message() {
    let h = harness();
    h.service.respond(
        "/api/activate",
        200,
        json!({ "success": false, "message": "Clé expirée" }),
    );
    let flow = ActivationFlow::new(h.api.clone(), h.store.clone());

    let outcome = flow.activate("OLD").await.unwrap();

    assert_eq!(outcome, ActivationOutcome::Rejected("Clé expirée".into()));
    assert!(!h.store.is_activated());
}

#[tokio::test]
async fn refused_key_without_message_uses_default() {
    let h = harness();
    h.service
        .respond("/api/activate", 200, json!({ "success": false, "message": "" }));
    let flow = ActivationFlow::new(h.api.clone(), h.store.clone());

    let outcome = flow.activate("X").await.unwrap();
    assert_eq!(outcome, ActivationOutcome::Rejected(INVALID_KEY_MESSAGE.into()));
}

#[tokio::test]
async fn refused_key_with_null_message_uses_default() {
    let h = harness();
    h.service
        .respond("/api/activate", 200, json!({ "success": false, "message": null }));
    let flow = ActivationFlow::new(h.api.clone(), h.store.clone());

    let outcome = flow.activate("K").await.unwrap();
    assert_eq!(outcome, ActivationOutcome::Rejected(INVALID_KEY_MESSAGE.into()));
}

#[tokio::test]
async fn offsetless_server_expiry_is_stored_as_utc() {
    for (sent, expected) in [
        ("2099-03-01T00:00:00", "2099-03-01T00:00:00Z"),
        ("2099-03-01", "2099-03-01T00:00:00Z"),
    ] {
        let h = harness();
        h.service.respond(
            "/api/activate",
            200,
            json!({ "success": true, "userId": "u1", "expiresAt": sent }),
        );

        ActivationFlow::new(h.api.clone(), h.store.clone())
            .activate("VALID123")
            .await
            .unwrap();

        assert_eq!(h.store.get().unwrap().expires_at, at(expected), "{sent}");
    }
}

#[tokio::test]
async fn success_without_user_id_is_not_activation() {
    let h = harness();
    h.service.respond(
        "/api/activate",
        200,
        json!({ "success": true, "message": "ok" }),
    );
    let flow = ActivationFlow::new(h.api.clone(), h.store.clone());

    let outcome = flow.activate("X").await.unwrap();
    assert!(!outcome.is_activated());
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn unreachable_service_surfaces_connectivity_message() {
    let h = harness();
    h.service.fail(
        "/api/activate",
        TransportFailure::NoResponse("dns error".into()),
    );
    let flow = ActivationFlow::new(h.api.clone(), h.store.clone());

    let err = flow.activate("VALID123").await.unwrap_err();

    let AppError::Api(api) = &err else {
        panic!("expected api error, got {err:?}");
    };
    assert_eq!(api.kind(), ApiErrorKind::Unreachable);
    assert_eq!(err.to_string(), UNREACHABLE_MESSAGE);
    assert!(!h.store.is_activated());
}

#[tokio::test]
async fn failed_save_is_reported_as_persistence_error() {
    let h = harness();
    h.service.respond(
        "/api/activate",
        200,
        json!({ "success": true, "message": "ok", "userId": "u1" }),
    );
    let store = Arc::new(ActivationStore::new(Arc::new(FullDisk)));

    let err = ActivationFlow::new(h.api.clone(), store.clone())
        .activate("VALID123")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::License(LicenseError::Persistence(_))));
    assert!(err.to_string().starts_with("failed to save activation data"));
    assert_eq!(Route::resolve(&store), Route::Activation);
}

#[tokio::test]
async fn activation_replaces_previous_record() {
    let h = harness();
    let old = ActivationRecord::new("old", Utc::now(), Utc::now() + Duration::days(3));
    h.store.store(&old).unwrap();
    h.service.respond(
        "/api/activate",
        200,
        json!({ "success": true, "message": "ok", "userId": "new" }),
    );

    ActivationFlow::new(h.api.clone(), h.store.clone())
        .activate("K")
        .await
        .unwrap();

    assert_eq!(h.store.get().unwrap().user_id, "new");
}

// ── Navigation gate ──────────────────────────────────────────────

#[tokio::test]
async fn gate_follows_activation_state() {
    let h = harness();
    assert_eq!(Route::resolve(&h.store), Route::Activation);

    h.service.respond(
        "/api/activate",
        200,
        json!({ "success": true, "message": "ok", "userId": "u1" }),
    );
    ActivationFlow::new(h.api.clone(), h.store.clone())
        .activate("K")
        .await
        .unwrap();

    assert_eq!(Route::resolve(&h.store), Route::Translator);
}

#[test]
fn gate_clears_expired_record() {
    let h = harness();
    let expired = ActivationRecord::new(
        "u1",
        Utc::now() - Duration::days(400),
        Utc::now() - Duration::days(35),
    );
    h.store.store(&expired).unwrap();

    assert_eq!(Route::resolve(&h.store), Route::Activation);
    assert!(h.storage.get_item(ACTIVATION_KEY).unwrap().is_none());
}
