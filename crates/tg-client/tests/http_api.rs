mod support;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use tg_client::{
    ClientError, HttpFraudApi, IdentityResolver, SuspiciousActivityClient, TransactionClient,
    TrustScoreClient,
};
use tg_config::ServiceConfig;
use tg_core::{AccountId, Identity, TransactionStatus};

use support::{MockService, closed_base_url};

fn alice() -> Identity {
    Identity::new("alice@x.com").expect("valid")
}

#[tokio::test]
async fn fetch_current_posts_email_and_reads_snapshot() {
    let service = MockService::start(vec![(
        200,
        r#"{"user_id": "42", "score": 70, "flag": "Normal", "message": "Limit €5,000"}"#,
    )]);
    let client = TrustScoreClient::new(service.api());

    let snapshot = client.fetch_current("alice@x.com").await.expect("snapshot");
    assert_eq!(snapshot.score, Some(70.0));
    assert_eq!(snapshot.flag, "Normal");
    assert_eq!(snapshot.warning, "Limit €5,000");

    let requests = service.finish();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, "/score");
    assert_eq!(requests[0].json(), json!({"email": "alice@x.com"}));
}

#[tokio::test]
async fn recalculate_returns_new_score() {
    let service = MockService::start(vec![(200, r#"{"score_calculated": 742, "reasons": []}"#)]);
    let client = TrustScoreClient::new(service.api());

    let score = client.recalculate("alice@x.com").await.expect("score");
    assert!((score - 742.0).abs() < f64::EPSILON);
    assert_eq!(service.finish()[0].url, "/score/calculate");
}

#[tokio::test]
async fn service_error_surfaces_error_field() {
    let service = MockService::start(vec![(404, r#"{"error": "User not found"}"#)]);
    let client = TrustScoreClient::new(service.api());

    let err = client.fetch_current("ghost@x.com").await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Service {
            status: 404,
            message: Some("User not found".into()),
        }
    );
}

#[tokio::test]
async fn resolver_reads_user_id() {
    let service = MockService::start(vec![(200, r#"{"user_id": 42, "score": 95}"#)]);
    let resolver = IdentityResolver::new(service.api());
    let id = resolver.resolve("alice@x.com").await.expect("resolved");
    assert_eq!(id.as_str(), "42");
}

#[tokio::test]
async fn resolver_fails_without_user_id() {
    let service = MockService::start(vec![(200, r#"{"score": 95}"#)]);
    let resolver = IdentityResolver::new(service.api());
    let err = resolver.resolve("alice@x.com").await.unwrap_err();
    assert!(matches!(err, ClientError::Resolution { .. }), "{err:?}");
}

#[tokio::test]
async fn resolver_maps_rejection_to_resolution_error() {
    let service = MockService::start(vec![(404, r#"{"error": "User not found"}"#)]);
    let resolver = IdentityResolver::new(service.api());
    let err = resolver.resolve("ghost@x.com").await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Resolution {
            email: "ghost@x.com".into(),
            reason: "User not found".into(),
        }
    );
}

#[tokio::test]
async fn suspicious_reasons_empty_and_missing_are_clear() {
    let service = MockService::start(vec![
        (200, r#"{"score_calculated": 90, "reasons": []}"#),
        (200, r#"{"score_calculated": 90}"#),
        (
            200,
            r#"{"score_calculated": 20, "reasons": ["Many transactions in a short time"]}"#,
        ),
    ]);
    let client = SuspiciousActivityClient::new(service.api());

    assert!(client.list_reasons("alice@x.com").await.expect("ok").is_empty());
    assert!(client.list_reasons("alice@x.com").await.expect("ok").is_empty());
    assert_eq!(
        client.list_reasons("alice@x.com").await.expect("ok"),
        vec!["Many transactions in a short time".to_string()]
    );
}

#[tokio::test]
async fn suspicious_non_ok_is_an_error_not_an_empty_list() {
    let service = MockService::start(vec![(500, r#"{"detail": "boom"}"#)]);
    let client = SuspiciousActivityClient::new(service.api());
    let err = client.list_reasons("alice@x.com").await.unwrap_err();
    assert_eq!(err.service_message(), Some("boom"));
}

#[tokio::test]
async fn submit_sends_pending_transfer_and_keeps_it_pending() {
    let service = MockService::start(vec![(
        201,
        r#"{"recipient": {"user_email": "bob@x.com"}, "amount": 50, "status": "flagged"}"#,
    )]);
    let client = TransactionClient::new(service.api());
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap();

    let submission = client
        .submit_transfer(&alice(), "bob@x.com", "50.00", at)
        .await
        .expect("submitted");
    assert_eq!(submission.record.status(), TransactionStatus::Pending);
    assert_eq!(
        submission.server_echo.map(|echo| echo.status),
        Some(TransactionStatus::Flagged)
    );

    let requests = service.finish();
    assert_eq!(requests[0].method, "POST");
    assert_eq!(requests[0].url, "/transactions");
    assert_eq!(
        requests[0].json(),
        json!({
            "sender": {"user_email": "alice@x.com"},
            "recipient": {"user_email": "bob@x.com"},
            "amount": 50.0,
            "status": "pending",
            "timestamp": "2025-03-01T09:30:00.000Z"
        })
    );
}

#[tokio::test]
async fn submit_rejection_carries_service_message() {
    let service = MockService::start(vec![(
        403,
        r#"{"error": "Transaction exceeds your limit"}"#,
    )]);
    let client = TransactionClient::new(service.api());
    let err = client
        .submit_transfer(&alice(), "bob@x.com", "9000", Utc::now())
        .await
        .unwrap_err();
    assert_eq!(err.service_message(), Some("Transaction exceeds your limit"));
}

#[tokio::test]
async fn invalid_amount_makes_no_request() {
    let service = MockService::start(vec![(201, "{}")]);
    let client = TransactionClient::new(service.api());

    let err = client
        .submit_transfer(&alice(), "bob@x.com", "-5", Utc::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn list_history_without_account_id_makes_no_request() {
    let service = MockService::start(vec![(200, "[]")]);
    let client = TransactionClient::new(service.api());

    let err = client.list_history(None).await.unwrap_err();
    assert_eq!(err, ClientError::UnresolvedIdentity);
    assert!(service.requests().is_empty());
}

#[tokio::test]
async fn list_history_reads_wrapped_and_bare_bodies() {
    let service = MockService::start(vec![
        (
            200,
            r#"{"transactions": [
                {"recipient": {"user_email": "bob@x.com"}, "amount": 50, "status": "approved"},
                {"recipient": {"user_email": "carol@x.com"}, "amount": 12.5, "status": "rejected"}
            ]}"#,
        ),
        (200, "[]"),
    ]);
    let client = TransactionClient::new(service.api());
    let id = AccountId::new("42").expect("id");

    let history = client.list_history(Some(&id)).await.expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].recipient_email, "bob@x.com");
    assert_eq!(history[1].status, TransactionStatus::Rejected);

    assert!(client.list_history(Some(&id)).await.expect("empty").is_empty());

    let requests = service.finish();
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "/transactions/42");
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    let config = ServiceConfig {
        base_url: closed_base_url(),
        timeout_secs: 2,
        ..ServiceConfig::default()
    };
    let client = TrustScoreClient::new(HttpFraudApi::new(&config).expect("client builds"));
    let err = client.fetch_current("alice@x.com").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn undecodable_success_body_is_a_network_error() {
    let service = MockService::start(vec![(200, "<html>gateway</html>")]);
    let client = TrustScoreClient::new(service.api());
    let err = client.fetch_current("alice@x.com").await.unwrap_err();
    assert!(matches!(err, ClientError::Network(_)), "{err:?}");
}
