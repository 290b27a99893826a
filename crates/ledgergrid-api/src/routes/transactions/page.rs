//! Transactions page rendering

use axum::extract::Path;
use axum::response::Html;
use ledgergrid_core::{GridSnapshot, TransactionFields};
use ledgergrid_utils::escape_html;

use crate::routes::grid::{self, GridRoutes};
use crate::{page_response, ApiError, AppState};

/// Base path of an account's transaction grid
pub fn transactions_base(account_number: &str) -> String {
    format!("/accounts/{}/transactions", urlencoding::encode(account_number))
}

pub fn render_transactions_grid(snapshot: &GridSnapshot<TransactionFields>, account_number: &str) -> String {
    grid::render_grid(
        snapshot,
        &GridRoutes::new(transactions_base(account_number)),
        "No transactions yet.",
        |_| None,
    )
}

pub async fn page_account_transactions(
    state: axum::extract::State<AppState>,
    Path(number): Path<String>,
    headers: axum::http::HeaderMap,
) -> Result<Html<String>, ApiError> {
    let view = state.transactions(&number).await?;
    grid::reload(&view).await?;

    let content = format!(
        r#"<div class='mb-6'>
    <a href='/accounts' class='text-sm text-indigo-600 hover:underline'>&larr; Back to accounts</a>
    <h2 class='text-2xl font-bold mt-2'>Transactions of {}</h2>
</div>
<div id='grid'>{}</div>"#,
        escape_html(&number),
        render_transactions_grid(&view.snapshot(), &number)
    );
    Ok(Html(page_response(&headers, "Transactions", &content)))
}
