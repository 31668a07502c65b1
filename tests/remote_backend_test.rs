//! Remote backend integration tests
//!
//! Stands up a throwaway wagering API on a loopback port and drives the
//! session bridge against it through the real HTTP client.

use axum::{
    extract::Path,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use reelgate::{Session, SettleTicket, WrapperConfig, WrapperError};
use serde_json::{json, Value};
use std::sync::Arc;

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn remote_session(base_url: &str) -> Session {
    let config = WrapperConfig::remote(base_url);
    let backend = reelgate::build_backend(&config).unwrap();
    Session::new(backend, &config)
}

#[tokio::test]
async fn wager_success_debits_and_adopts_echoed_balance() {
    let router = Router::new().route(
        "/wager",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["amount"], 250);
            assert_eq!(body["lines"], 1);
            Json(json!({
                "id": "r-1",
                "won": true,
                "scenario": "AAA",
                "balance": 9_750
            }))
        }),
    );
    let base = spawn_backend(router).await;
    let session = remote_session(&base);

    let outcome = session.wager(250, 1, None).await.unwrap();
    assert_eq!(outcome.ticket.id, "r-1");
    assert!(outcome.ticket.won);
    // Wager is filled from the request when the server does not echo it.
    assert_eq!(outcome.ticket.wager, 250);
    // Server-echoed balance wins over the local debit.
    assert_eq!(session.balance(), 9_750);
    assert_eq!(session.cost(), 250);
}

#[tokio::test]
async fn wager_http_500_is_transport_error_and_balance_unchanged() {
    let router = Router::new().route(
        "/wager",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let base = spawn_backend(router).await;
    let session = remote_session(&base);
    let before = session.account();

    let err = session.wager(250, 1, None).await.unwrap_err();
    match err {
        WrapperError::Transport { status, .. } => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR)
        }
        other => panic!("expected transport error, got {:?}", other),
    }
    assert_eq!(session.account(), before);
}

#[tokio::test]
async fn wager_malformed_body_is_validation_error() {
    let router = Router::new().route(
        "/wager",
        post(|| async { Json(json!({"id": "r-1"})) }),
    );
    let base = spawn_backend(router).await;
    let session = remote_session(&base);

    let err = session.wager(100, 1, None).await.unwrap_err();
    assert!(matches!(err, WrapperError::Validation(_)));
    assert_eq!(session.cost(), 0);
}

#[tokio::test]
async fn settle_credits_total_win_and_is_idempotent() {
    let router = Router::new().route(
        "/settle",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body["tickets"][0]["id"], "r-1");
            Json(json!({"totalWin": 700}))
        }),
    );
    let base = spawn_backend(router).await;
    let session = remote_session(&base);
    let before = session.balance();

    let ticket = SettleTicket {
        id: "r-1".to_string(),
        won: true,
    };
    let outcome = session.settle(vec![ticket.clone()]).await.unwrap();
    assert_eq!(outcome.total_win, 700);
    assert_eq!(session.wins(), 700);
    assert_eq!(session.balance(), before + 700);

    // Settling the same ticket again credits nothing.
    let repeat = session.settle(vec![ticket]).await.unwrap();
    assert_eq!(repeat.total_win, 0);
    assert_eq!(session.wins(), 700);
}

#[tokio::test]
async fn update_forwards_payload_without_touching_account() {
    let router = Router::new().route(
        "/transaction/:id",
        put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
            Json(json!({"transactionId": id, "accepted": body}))
        }),
    );
    let base = spawn_backend(router).await;
    let session = remote_session(&base);
    let before = session.account();

    let outcome = session
        .update("tx-42", json!({"step": 3}))
        .await
        .unwrap();
    assert_eq!(outcome.transaction_id, "tx-42");
    assert_eq!(outcome.data["accepted"]["step"], 3);
    assert_eq!(session.account(), before);
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    // Bind and immediately drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = remote_session(&format!("http://{}", addr));
    let err = session.wager(100, 1, None).await.unwrap_err();
    assert!(matches!(err, WrapperError::Network(_)));
}

#[tokio::test]
async fn concurrent_remote_wagers_are_rejected() {
    let router = Router::new().route(
        "/wager",
        post(|| async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            Json(json!({"id": "slow-1", "won": false, "scenario": "ABC"}))
        }),
    );
    let base = spawn_backend(router).await;
    let session = Arc::new(remote_session(&base));

    let (a, b) = tokio::join!(session.wager(100, 1, None), session.wager(100, 1, None));
    let rejected = [&a, &b]
        .iter()
        .filter(|r| matches!(r, Err(WrapperError::RoundInProgress)))
        .count();
    assert_eq!(rejected, 1);
    assert_eq!(session.cost(), 100);
}
