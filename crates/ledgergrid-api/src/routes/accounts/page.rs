//! Accounts page rendering

use axum::response::Html;
use ledgergrid_core::{AccountFields, GridSnapshot};

use crate::routes::grid::{self, GridRoutes};
use crate::routes::transactions::transactions_base;
use crate::{page_response, ApiError, AppState};

pub const ACCOUNTS_BASE: &str = "/accounts";

pub fn render_accounts_grid(snapshot: &GridSnapshot<AccountFields>) -> String {
    grid::render_grid(
        snapshot,
        &GridRoutes::new(ACCOUNTS_BASE),
        "No accounts yet.",
        |row| (!row.key.is_draft()).then(|| transactions_base(&row.fields.number)),
    )
}

/// Full accounts page; the current page is fetched again on every visit
pub async fn page_accounts(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> Result<Html<String>, ApiError> {
    let view = state.accounts();
    grid::reload(&view).await?;

    let content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Accounts</h2></div>
<div id='grid'>{}</div>"#,
        render_accounts_grid(&view.snapshot())
    );
    Ok(Html(page_response(&headers, "Accounts", &content)))
}
