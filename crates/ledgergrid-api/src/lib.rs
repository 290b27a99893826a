//! HTTP grid server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::accounts: the account grid
//! - routes::transactions: the per-account transaction grid
//! - routes::grid: shared grid rendering

pub mod error;
pub mod routes;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    response::Redirect,
    routing::{get, post},
    Router,
};
use ledgergrid_config::Config;
use ledgergrid_core::{AccountCodec, CollectionView, TransactionCodec, ViewOptions};
use ledgergrid_rpc::LedgerService;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub service: LedgerService,
    accounts: Arc<CollectionView<AccountCodec>>,
    transactions: Arc<RwLock<HashMap<String, Arc<CollectionView<TransactionCodec>>>>>,
}

impl AppState {
    pub fn new(config: Config, service: LedgerService) -> Self {
        let options = ViewOptions::from_config(&config);
        let accounts = CollectionView::new(AccountCodec, Arc::new(service.accounts_port()), options);
        Self {
            config,
            service,
            accounts: Arc::new(accounts),
            transactions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn accounts(&self) -> Arc<CollectionView<AccountCodec>> {
        self.accounts.clone()
    }

    /// Transaction collection of one stored account, created on first use
    pub async fn transactions(
        &self,
        account_number: &str,
    ) -> Result<Arc<CollectionView<TransactionCodec>>, ApiError> {
        if let Some(view) = self.transactions.read().await.get(account_number) {
            return Ok(view.clone());
        }

        if !self.service.account_exists(account_number).await {
            return Err(ApiError::NotFound {
                resource: format!("account {}", account_number),
            });
        }

        let mut views = self.transactions.write().await;
        let view = views
            .entry(account_number.to_string())
            .or_insert_with(|| {
                log::debug!(target: "ledgergrid::api", "opening transactions of {}", account_number);
                let port = self.service.transactions_port(account_number);
                Arc::new(CollectionView::new(
                    TransactionCodec::new(account_number),
                    Arc::new(port),
                    ViewOptions::from_config(&self.config),
                ))
            })
            .clone();
        Ok(view)
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{
        api_accounts, htmx_account_add, htmx_account_cancel, htmx_account_save, htmx_account_stop,
        htmx_accounts_dismiss, htmx_accounts_grid, page_accounts,
    };
    use routes::transactions::{
        api_account_transactions, htmx_transaction_add, htmx_transaction_cancel,
        htmx_transaction_save, htmx_transaction_stop, htmx_transactions_dismiss,
        htmx_transactions_grid, page_account_transactions,
    };

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/accounts", get(api_accounts))
        .route("/api/accounts/:number/transactions", get(api_account_transactions))
        // Pages
        .route("/", get(index_page))
        .route("/accounts", get(page_accounts))
        .route("/accounts/:number/transactions", get(page_account_transactions))
        // Account grid partials
        .route("/accounts/grid", get(htmx_accounts_grid))
        .route("/accounts/rows/new", post(htmx_account_add))
        .route("/accounts/rows/new/save", post(htmx_account_save))
        .route("/accounts/rows/new/cancel", post(htmx_account_cancel))
        .route("/accounts/rows/new/stop", post(htmx_account_stop))
        .route("/accounts/notification/dismiss", post(htmx_accounts_dismiss))
        // Transaction grid partials
        .route("/accounts/:number/transactions/grid", get(htmx_transactions_grid))
        .route("/accounts/:number/transactions/rows/new", post(htmx_transaction_add))
        .route("/accounts/:number/transactions/rows/new/save", post(htmx_transaction_save))
        .route("/accounts/:number/transactions/rows/new/cancel", post(htmx_transaction_cancel))
        .route("/accounts/:number/transactions/rows/new/stop", post(htmx_transaction_stop))
        .route(
            "/accounts/:number/transactions/notification/dismiss",
            post(htmx_transactions_dismiss),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn index_page() -> Redirect {
    Redirect::to("/accounts")
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Ledgergrid</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    <header class="bg-white border-b px-6 py-4"><a href="/accounts" class="text-xl font-bold text-indigo-600">Ledgergrid</a></header>
    <main class="max-w-6xl mx-auto p-6">{}</main>
</body>
</html>"#,
        title, content
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        inner_content.to_string()
    } else {
        base_html(title, inner_content)
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the process is
/// interrupted.
pub async fn start_server(config: Config, service: LedgerService) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let state = AppState::new(config, service);
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Ledgergrid server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /accounts (Account grid)");
    log::info!("  - /accounts/:number/transactions (Transactions of one account)");
    log::info!("  - /api/* (JSON snapshots)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use ledgergrid_rpc::{WireAccount, WireTransaction};
    use tower::ServiceExt;

    fn state() -> AppState {
        AppState::new(Config::default(), LedgerService::new())
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, form: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    async fn seed_accounts(service: &LedgerService, count: usize) {
        for i in 0..count {
            service
                .create_account(WireAccount {
                    number: format!("A{i}"),
                    name: format!("Holder {i}"),
                    ..WireAccount::default()
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(create_router(state()), get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }

    #[tokio::test]
    async fn test_index_redirects() {
        let response = create_router(state()).oneshot(get("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/accounts");
    }

    #[tokio::test]
    async fn test_empty_accounts_page() {
        let (status, body) = send(create_router(state()), get("/accounts")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<!DOCTYPE html>"));
        assert!(body.contains("No accounts yet."));
        assert!(body.contains("Add one now"));
        assert!(body.contains("Acc Number"));
    }

    #[tokio::test]
    async fn test_add_and_save_account() {
        let state = state();
        let router = create_router(state.clone());

        let (_, body) = send(router.clone(), post("/accounts/rows/new", "")).await;
        assert!(body.contains("id='row-new'"));
        assert!(body.contains("name='number'"));

        let form = "number=A1&name=Alice&iban=NL91ABNA0417164300&address=Main+St+1";
        let (status, body) = send(router, post("/accounts/rows/new/save", form)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("New account saved"));
        assert!(body.contains("Main St 1"));
        assert!(body.contains("/accounts/A1/transactions"));
        assert!(!body.contains("id='row-new'"));

        let stored = state.service.list_accounts(10, 1).await.unwrap();
        assert_eq!(stored.total_count, 1);
        assert_eq!(stored.items[0].name, "Alice");
    }

    #[tokio::test]
    async fn test_duplicate_account_shows_error() {
        let state = state();
        seed_accounts(&state.service, 1).await;
        let router = create_router(state);

        send(router.clone(), post("/accounts/rows/new", "")).await;
        let (status, body) = send(router, post("/accounts/rows/new/save", "number=A0&name=Bob")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("`Account Number` already exists"));
        assert!(body.contains("data-severity='error'"));
        assert!(body.contains("id='row-new'"));
    }

    #[tokio::test]
    async fn test_cancel_and_escape_discard_draft() {
        let router = create_router(state());
        send(router.clone(), post("/accounts/rows/new", "")).await;
        let (_, body) = send(router.clone(), post("/accounts/rows/new/cancel", "")).await;
        assert!(!body.contains("id='row-new'"));

        send(router.clone(), post("/accounts/rows/new", "")).await;
        let (_, body) = send(router, post("/accounts/rows/new/stop?reason=escapeKeyDown", "")).await;
        assert!(!body.contains("id='row-new'"));
    }

    #[tokio::test]
    async fn test_draft_left_in_view_can_be_cancelled() {
        let router = create_router(state());
        send(router.clone(), post("/accounts/rows/new", "")).await;

        let (_, body) = send(router.clone(), post("/accounts/rows/new/stop?reason=tabKeyDown", "")).await;
        assert!(body.contains("id='row-new'"));
        assert!(!body.contains("name='number'"));
        assert!(body.contains("hx-post='/accounts/rows/new/cancel'"));
        assert!(body.contains("hx-target='#grid' disabled>+ Add"));

        let (_, body) = send(router, post("/accounts/rows/new/cancel", "")).await;
        assert!(!body.contains("id='row-new'"));
        assert!(body.contains("hx-target='#grid'>+ Add"));
    }

    #[tokio::test]
    async fn test_pagination() {
        let state = state();
        seed_accounts(&state.service, 12).await;
        let router = create_router(state);

        let (_, body) = send(router.clone(), get("/accounts/grid?page=1&page_size=10")).await;
        assert!(body.contains("11-12 of 12"));
        assert!(body.contains("Holder 10"));
        assert!(!body.contains("Holder 9<"));

        let (_, body) = send(router, get("/accounts/grid?page=0&page_size=7")).await;
        assert!(body.contains("1-10 of 12"));
    }

    #[tokio::test]
    async fn test_transactions_grid() {
        let state = state();
        seed_accounts(&state.service, 1).await;
        let router = create_router(state.clone());

        let (status, body) = send(router.clone(), get("/accounts/A0/transactions")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Back to accounts"));
        assert!(body.contains("No transactions yet."));

        send(router.clone(), post("/accounts/A0/transactions/rows/new", "")).await;
        let (_, body) = send(
            router.clone(),
            post("/accounts/A0/transactions/rows/new/save", "type=1&amount=1500"),
        )
        .await;
        assert!(body.contains("New transaction saved"));
        assert!(body.contains("WITHDRAWAL"));
        assert!(body.contains("1,500"));

        let stored = state.service.list_transactions("A0", 10, 1).await.unwrap();
        assert_eq!(
            stored.items[0],
            WireTransaction {
                id: stored.items[0].id.clone(),
                account_number: "A0".to_string(),
                amount: 1500,
                kind: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_bad_amount_rejected() {
        let state = state();
        seed_accounts(&state.service, 1).await;
        let router = create_router(state);
        send(router.clone(), post("/accounts/A0/transactions/rows/new", "")).await;
        let (status, body) = send(
            router,
            post("/accounts/A0/transactions/rows/new/save", "type=0&amount=ten"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let details: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(details["code"], "INVALID_FIELD");
        assert_eq!(details["details"]["field"], "amount");
    }

    #[tokio::test]
    async fn test_unknown_account_not_found() {
        let state = state();
        seed_accounts(&state.service, 1).await;
        let router = create_router(state.clone());

        let (status, _) = send(router.clone(), get("/accounts/missing/transactions")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(router.clone(), get("/api/accounts/missing/transactions")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(router.clone(), post("/accounts/missing/transactions/rows/new", "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(router, get("/api/accounts/A0/transactions")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.transactions.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_dismiss_notification() {
        let router = create_router(state());
        send(router.clone(), post("/accounts/rows/new", "")).await;
        send(router.clone(), post("/accounts/rows/new/save", "number=A1&name=Alice")).await;

        let (_, body) = send(router, post("/accounts/notification/dismiss", "")).await;
        assert!(!body.contains("id='toast'"));
    }

    #[tokio::test]
    async fn test_json_snapshot() {
        let state = state();
        seed_accounts(&state.service, 2).await;
        let router = create_router(state);
        send(router.clone(), get("/accounts/grid?page=0&page_size=10")).await;

        let (status, body) = send(router, get("/api/accounts")).await;
        assert_eq!(status, StatusCode::OK);
        let snapshot: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(snapshot["total_count"], 2);
        assert_eq!(snapshot["rows"][0]["key"].as_str().map(str::len), Some(32));
        assert_eq!(snapshot["rows"][1]["fields"]["number"], "A1");
        assert_eq!(snapshot["page_size_options"], serde_json::json!([10, 50, 100]));
    }
}
