//! ExecutorWallet against an in-process stand-in for the wallet executor.

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use l402::{L402Error, LightningSendStatus, LightningWallet};
use l402_wallet::{CreateInvoice, ExecutorConfig, ExecutorWallet};
use serde_json::{json, Value};
use std::sync::Mutex;
use std::time::Duration;

const TOKEN: &str = "executor-test-token";

#[derive(Default)]
struct Recorded {
    bodies: Mutex<Vec<Value>>,
    paths: Mutex<Vec<String>>,
}

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TOKEN}"))
        .unwrap_or(false)
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({
        "ok": false,
        "error": { "code": "unauthorized", "message": "missing or invalid bearer token" }
    }))
}

async fn pay_bolt11(
    req: HttpRequest,
    body: web::Json<Value>,
    state: web::Data<Recorded>,
) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    state.bodies.lock().unwrap().push(body.0.clone());

    let invoice = body["payment"]["invoice"].as_str().unwrap_or_default();
    if invoice == "lnbc1000u1pfail" {
        return HttpResponse::Ok().json(json!({
            "ok": false,
            "error": { "code": "payment_failed", "message": "no route to destination" }
        }));
    }
    if invoice == "lnbc1000u1pfee" {
        return HttpResponse::Ok().json(json!({
            "ok": false,
            "error": { "code": "fee_exceeded", "message": "fee above limit" }
        }));
    }

    HttpResponse::Ok().json(json!({
        "ok": true,
        "requestId": body["requestId"],
        "result": { "id": "ls_abc/1", "status": "LIGHTNING_PAYMENT_INITIATED" }
    }))
}

async fn lightning_send(
    req: HttpRequest,
    state: web::Data<Recorded>,
) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    state.paths.lock().unwrap().push(req.uri().path().to_string());
    let id = req.match_info().get("id").unwrap_or_default().to_string();

    HttpResponse::Ok().json(json!({
        "ok": true,
        "result": {
            "id": id,
            "status": "TRANSFER_COMPLETED",
            "paymentPreimage": "9f".repeat(32)
        }
    }))
}

async fn balance(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({
        "ok": true,
        "result": {
            "balanceSats": 21000,
            "tokenBalances": [
                { "tokenIdentifier": "btkn1qexample", "ticker": "USDB", "balance": "340282366920938463463374607431768211455" }
            ]
        }
    }))
}

async fn create_invoice(
    req: HttpRequest,
    body: web::Json<Value>,
    state: web::Data<Recorded>,
) -> HttpResponse {
    if !authorized(&req) {
        return unauthorized();
    }
    state.bodies.lock().unwrap().push(body.0.clone());
    HttpResponse::Ok().json(json!({
        "ok": true,
        "result": { "encodedInvoice": "lnbc10u1pjq0rtz" }
    }))
}

async fn not_json() -> HttpResponse {
    HttpResponse::BadGateway()
        .content_type("text/html")
        .body("<html>upstream down</html>")
}

async fn stalled() -> HttpResponse {
    actix_rt::time::sleep(Duration::from_secs(2)).await;
    HttpResponse::Ok().json(json!({"ok": true, "result": {"id": "late", "status": "TRANSFER_COMPLETED"}}))
}

async fn spawn_executor() -> (String, web::Data<Recorded>) {
    let state = web::Data::new(Recorded::default());
    let app_state = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .route("/pay-bolt11", web::post().to(pay_bolt11))
            .route("/lightning-send/{id}", web::get().to(lightning_send))
            .route("/balance", web::get().to(balance))
            .route("/create-invoice", web::post().to(create_invoice))
            .route("/broken/balance", web::get().to(not_json))
            .route("/broken/pay-bolt11", web::post().to(not_json))
            .route("/slow/pay-bolt11", web::post().to(stalled))
            .route("/slow/balance", web::get().to(stalled))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .unwrap();
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    (format!("http://{addr}"), state)
}

fn wallet(base_url: &str, token: Option<&str>) -> ExecutorWallet {
    let mut config = ExecutorConfig::new(base_url).unwrap();
    if let Some(token) = token {
        config = config.with_auth_token(token);
    }
    ExecutorWallet::new(config).unwrap()
}

#[actix_rt::test]
async fn test_pay_invoice_sends_fee_cap_and_maps_status() {
    let (url, state) = spawn_executor().await;
    let wallet = wallet(&url, Some(TOKEN));

    let send = wallet.pay_invoice("lnbc10u1pjq0rtz", 7).await.unwrap();

    assert_eq!(send.id, "ls_abc/1");
    assert_eq!(send.status, LightningSendStatus::Initiated);
    assert!(send.preimage.is_none());

    let bodies = state.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["payment"]["invoice"], "lnbc10u1pjq0rtz");
    assert_eq!(bodies[0]["payment"]["maxFeeSats"], 7);
    assert_eq!(bodies[0]["payment"]["preferSpark"], true);
    assert!(bodies[0]["requestId"].as_str().is_some());
}

#[actix_rt::test]
async fn test_status_query_encodes_id_and_returns_preimage() {
    let (url, state) = spawn_executor().await;
    let wallet = wallet(&url, Some(TOKEN));

    let send = wallet.lightning_send_status("ls_abc/1").await.unwrap();

    assert_eq!(send.status, LightningSendStatus::Succeeded);
    assert_eq!(send.preimage.as_deref(), Some("9f".repeat(32).as_str()));
    assert_eq!(
        state.paths.lock().unwrap().as_slice(),
        ["/lightning-send/ls_abc%2F1".to_string()]
    );
}

#[actix_rt::test]
async fn test_payment_failed_code_maps_to_payment_failed() {
    let (url, _state) = spawn_executor().await;
    let wallet = wallet(&url, Some(TOKEN));

    let err = wallet.pay_invoice("lnbc1000u1pfail", 10).await.unwrap_err();
    assert!(matches!(err, L402Error::PaymentFailed(ref m) if m == "no route to destination"));

    let err = wallet.pay_invoice("lnbc1000u1pfee", 10).await.unwrap_err();
    assert!(matches!(err, L402Error::WalletError(ref m) if m.starts_with("fee_exceeded")));
}

#[actix_rt::test]
async fn test_missing_token_is_authentication_error() {
    let (url, _state) = spawn_executor().await;
    let wallet = wallet(&url, None);

    let err = wallet.balance().await.unwrap_err();
    assert!(matches!(err, L402Error::WalletError(ref m) if m.contains("authentication")));
}

#[actix_rt::test]
async fn test_balance_keeps_large_token_amounts() {
    let (url, _state) = spawn_executor().await;
    let wallet = wallet(&url, Some(TOKEN));

    let balance = wallet.balance().await.unwrap();
    assert_eq!(balance.balance_sats, 21_000);
    assert_eq!(balance.token_balances.len(), 1);
    assert_eq!(balance.token_balances[0].ticker.as_deref(), Some("USDB"));
    assert_eq!(
        balance.token_balances[0].balance,
        "340282366920938463463374607431768211455"
    );
}

#[actix_rt::test]
async fn test_create_invoice_posts_parameters() {
    let (url, state) = spawn_executor().await;
    let wallet = wallet(&url, Some(TOKEN));

    let bolt11 = wallet
        .create_invoice(&CreateInvoice::new(1000).memo("Test payment - 1000 sats"))
        .await
        .unwrap();

    assert_eq!(bolt11, "lnbc10u1pjq0rtz");
    let bodies = state.bodies.lock().unwrap();
    assert_eq!(bodies[0]["invoice"]["amountSats"], 1000);
    assert_eq!(bodies[0]["invoice"]["expirySeconds"], 3600);
    assert_eq!(bodies[0]["invoice"]["includeSparkAddress"], true);
}

#[actix_rt::test]
async fn test_zero_amount_invoice_rejected_locally() {
    let (url, state) = spawn_executor().await;
    let wallet = wallet(&url, Some(TOKEN));

    let err = wallet
        .create_invoice(&CreateInvoice::new(0))
        .await
        .unwrap_err();
    assert!(matches!(err, L402Error::InvalidRequest(_)));
    assert!(state.bodies.lock().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_non_json_reply_is_wallet_error() {
    let (url, _state) = spawn_executor().await;
    let wallet = wallet(&format!("{url}/broken"), Some(TOKEN));

    let err = wallet.balance().await.unwrap_err();
    assert!(matches!(err, L402Error::WalletError(ref m) if m.contains("parse failed")));
}

#[actix_rt::test]
async fn test_unanswered_pay_request_is_unconfirmed() {
    let (url, _state) = spawn_executor().await;
    let config = ExecutorConfig::new(&format!("{url}/slow"))
        .unwrap()
        .with_auth_token(TOKEN)
        .with_timeout(Duration::from_millis(200));
    let wallet = ExecutorWallet::new(config).unwrap();

    let err = wallet.pay_invoice("lnbc10u1pjq0rtz", 10).await.unwrap_err();
    assert!(matches!(err, L402Error::PaymentUnconfirmed(_)), "{err:?}");
    assert!(err.is_fatal_payment_error());

    // Read-only routes stay ordinary wallet errors
    let err = wallet.balance().await.unwrap_err();
    assert!(matches!(err, L402Error::WalletError(_)), "{err:?}");
    assert!(!err.is_fatal_payment_error());
}

#[actix_rt::test]
async fn test_unreadable_pay_reply_is_unconfirmed() {
    let (url, _state) = spawn_executor().await;
    let wallet = wallet(&format!("{url}/broken"), Some(TOKEN));

    let err = wallet.pay_invoice("lnbc10u1pjq0rtz", 10).await.unwrap_err();
    assert!(matches!(err, L402Error::PaymentUnconfirmed(ref m) if m.contains("parse failed")));
}

#[actix_rt::test]
async fn test_refused_connection_is_not_fatal() {
    let wallet = wallet("http://127.0.0.1:1", Some(TOKEN));

    let err = wallet.pay_invoice("lnbc10u1pjq0rtz", 10).await.unwrap_err();
    assert!(matches!(err, L402Error::WalletError(_)), "{err:?}");
    assert!(!err.is_fatal_payment_error());
}
