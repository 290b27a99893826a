//! Transactions API endpoints - JSON snapshot and HTMX partial responses

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::response::Html;
use axum::Json;
use ledgergrid_core::{CollectionView, GridSnapshot, TransactionCodec, TransactionFields};

use super::page::render_transactions_grid;
use crate::routes::grid::{self, StopQuery};
use crate::{ApiError, AppState};

fn fragment(view: &CollectionView<TransactionCodec>) -> Html<String> {
    Html(render_transactions_grid(
        &view.snapshot(),
        view.codec().account_number(),
    ))
}

pub async fn api_account_transactions(
    state: axum::extract::State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<GridSnapshot<TransactionFields>>, ApiError> {
    Ok(Json(state.transactions(&number).await?.snapshot()))
}

pub async fn htmx_transactions_grid(
    state: axum::extract::State<AppState>,
    Path(number): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Html<String>, ApiError> {
    let view = state.transactions(&number).await?;
    grid::show_page(&view, &query).await?;
    Ok(fragment(&view))
}

pub async fn htmx_transaction_add(
    state: axum::extract::State<AppState>,
    Path(number): Path<String>,
) -> Result<Html<String>, ApiError> {
    let view = state.transactions(&number).await?;
    grid::add_row(&view).await?;
    Ok(fragment(&view))
}

pub async fn htmx_transaction_save(
    state: axum::extract::State<AppState>,
    Path(number): Path<String>,
    body: String,
) -> Result<Html<String>, ApiError> {
    let view = state.transactions(&number).await?;
    grid::save_row(&view, &body).await?;
    Ok(fragment(&view))
}

pub async fn htmx_transaction_cancel(
    state: axum::extract::State<AppState>,
    Path(number): Path<String>,
) -> Result<Html<String>, ApiError> {
    let view = state.transactions(&number).await?;
    grid::cancel_row(&view).await?;
    Ok(fragment(&view))
}

pub async fn htmx_transaction_stop(
    state: axum::extract::State<AppState>,
    Path(number): Path<String>,
    Query(stop): Query<StopQuery>,
) -> Result<Html<String>, ApiError> {
    let view = state.transactions(&number).await?;
    grid::stop_row(&view, stop.reason).await?;
    Ok(fragment(&view))
}

pub async fn htmx_transactions_dismiss(
    state: axum::extract::State<AppState>,
    Path(number): Path<String>,
) -> Result<Html<String>, ApiError> {
    let view = state.transactions(&number).await?;
    grid::dismiss(&view).await?;
    Ok(fragment(&view))
}
