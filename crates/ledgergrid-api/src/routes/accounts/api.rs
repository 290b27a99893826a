//! Accounts API endpoints - JSON snapshot and HTMX partial responses

use std::collections::HashMap;

use axum::extract::Query;
use axum::response::Html;
use axum::Json;
use ledgergrid_core::{AccountCodec, AccountFields, CollectionView, GridSnapshot};

use super::page::render_accounts_grid;
use crate::routes::grid::{self, StopQuery};
use crate::{ApiError, AppState};

fn fragment(view: &CollectionView<AccountCodec>) -> Html<String> {
    Html(render_accounts_grid(&view.snapshot()))
}

pub async fn api_accounts(state: axum::extract::State<AppState>) -> Json<GridSnapshot<AccountFields>> {
    Json(state.accounts().snapshot())
}

pub async fn htmx_accounts_grid(
    state: axum::extract::State<AppState>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let view = state.accounts();
    grid::show_page(&view, &query).await?;
    Ok(fragment(&view))
}

pub async fn htmx_account_add(state: axum::extract::State<AppState>) -> Result<Html<String>, ApiError> {
    let view = state.accounts();
    grid::add_row(&view).await?;
    Ok(fragment(&view))
}

pub async fn htmx_account_save(
    state: axum::extract::State<AppState>,
    body: String,
) -> Result<Html<String>, ApiError> {
    let view = state.accounts();
    grid::save_row(&view, &body).await?;
    Ok(fragment(&view))
}

pub async fn htmx_account_cancel(state: axum::extract::State<AppState>) -> Result<Html<String>, ApiError> {
    let view = state.accounts();
    grid::cancel_row(&view).await?;
    Ok(fragment(&view))
}

pub async fn htmx_account_stop(
    state: axum::extract::State<AppState>,
    Query(stop): Query<StopQuery>,
) -> Result<Html<String>, ApiError> {
    let view = state.accounts();
    grid::stop_row(&view, stop.reason).await?;
    Ok(fragment(&view))
}

pub async fn htmx_accounts_dismiss(state: axum::extract::State<AppState>) -> Result<Html<String>, ApiError> {
    let view = state.accounts();
    grid::dismiss(&view).await?;
    Ok(fragment(&view))
}
