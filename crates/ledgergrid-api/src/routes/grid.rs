//! Grid rendering and the request handling shared by both collections

use std::collections::HashMap;

use chrono::Utc;
use ledgergrid_core::{
    CellValue, CollectionView, ColumnSpec, EditKind, EditMode, EditStopReason, ErrorCode, GridError,
    GridFields, GridIntent, GridSnapshot, RecordCodec, RowKey, RowView, ViewOptions,
};
use ledgergrid_utils::{escape_html, format_number};
use serde::Deserialize;

use crate::ApiError;

const FORM_ID: &str = "draft-form";

/// URLs of one grid, relative to its base path
#[derive(Debug, Clone)]
pub struct GridRoutes {
    base: String,
}

impl GridRoutes {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn grid(&self, page: usize, page_size: usize) -> String {
        format!("{}/grid?page={}&page_size={}", self.base, page, page_size)
    }

    pub fn add(&self) -> String {
        format!("{}/rows/new", self.base)
    }

    pub fn save(&self) -> String {
        format!("{}/rows/new/save", self.base)
    }

    pub fn cancel(&self) -> String {
        format!("{}/rows/new/cancel", self.base)
    }

    pub fn stop(&self) -> String {
        format!("{}/rows/new/stop", self.base)
    }

    pub fn dismiss(&self) -> String {
        format!("{}/notification/dismiss", self.base)
    }
}

/// Query of a key press that ended editing
#[derive(Debug, Deserialize)]
pub struct StopQuery {
    pub reason: EditStopReason,
}

/// Decode an `application/x-www-form-urlencoded` body
pub fn parse_form(body: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in body.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urlencoding::decode(&key.replace('+', " "))
            .map(|k| k.into_owned())
            .unwrap_or_default();
        let value = urlencoding::decode(&value.replace('+', " "))
            .map(|v| v.into_owned())
            .unwrap_or_default();
        params.insert(key, value);
    }
    params
}

/// Page index and size from the grid query; unknown sizes fall back to the default
pub fn page_query(options: &ViewOptions, query: &HashMap<String, String>) -> (usize, usize) {
    let page = query
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(0);
    let page_size = options.resolve_page_size(query.get("page_size").and_then(|s| s.parse().ok()));
    (page, page_size)
}

/// Reject only malformed input; every other grid failure has already been
/// logged or surfaced as a notification, so the grid is rendered as is.
fn settle<T>(result: Result<T, GridError>) -> Result<(), ApiError> {
    match result {
        Ok(_) => Ok(()),
        Err(error) => match error.code() {
            ErrorCode::InvalidField | ErrorCode::InvalidPage => Err(error.into()),
            _ => {
                log::debug!(target: "ledgergrid::api", "grid action settled: {}", error);
                Ok(())
            }
        },
    }
}

pub async fn reload<C: RecordCodec>(view: &CollectionView<C>) -> Result<(), ApiError> {
    settle(view.reload().await)
}

pub async fn show_page<C: RecordCodec>(
    view: &CollectionView<C>,
    query: &HashMap<String, String>,
) -> Result<(), ApiError> {
    let (page_index, page_size) = page_query(view.options(), query);
    settle(
        view.dispatch(GridIntent::PaginationModelChange {
            page_index,
            page_size,
        })
        .await,
    )
}

pub async fn add_row<C: RecordCodec>(view: &CollectionView<C>) -> Result<(), ApiError> {
    settle(view.dispatch(GridIntent::Add).await)
}

/// Save the draft with the submitted form values
pub async fn save_row<C: RecordCodec>(view: &CollectionView<C>, body: &str) -> Result<(), ApiError> {
    let Some(mut fields) = view.draft_fields() else {
        return Ok(());
    };
    let form = parse_form(body);
    for column in C::Fields::columns().iter().filter(|column| column.editable) {
        if let Some(raw) = form.get(column.field) {
            fields.set_value(column.field, raw)?;
        }
    }
    settle(
        view.dispatch(GridIntent::ProcessRowUpdate {
            key: RowKey::Draft,
            fields,
        })
        .await,
    )
}

pub async fn cancel_row<C: RecordCodec>(view: &CollectionView<C>) -> Result<(), ApiError> {
    settle(view.dispatch(GridIntent::Cancel { key: RowKey::Draft }).await)
}

pub async fn stop_row<C: RecordCodec>(
    view: &CollectionView<C>,
    reason: EditStopReason,
) -> Result<(), ApiError> {
    settle(
        view.dispatch(GridIntent::RowEditStop {
            key: RowKey::Draft,
            reason,
        })
        .await,
    )
}

pub async fn dismiss<C: RecordCodec>(view: &CollectionView<C>) -> Result<(), ApiError> {
    settle(view.dispatch(GridIntent::DismissNotification).await)
}

// ==================== Rendering ====================

/// Render a whole grid: toast, toolbar, table and pager
pub fn render_grid<F: GridFields>(
    snapshot: &GridSnapshot<F>,
    routes: &GridRoutes,
    empty_message: &str,
    row_link: impl Fn(&RowView<F>) -> Option<String>,
) -> String {
    let has_draft = snapshot.rows.iter().any(|row| row.key.is_draft());

    let header: String = snapshot
        .columns
        .iter()
        .map(|column| format!("<th class='px-4 py-2 text-left'>{}</th>", escape_html(column.label)))
        .collect();

    let body = if snapshot.rows.is_empty() {
        format!(
            r#"<tr><td colspan='{}' class='px-4 py-8 text-center text-gray-500'>{} <button class='text-indigo-600 underline' hx-post='{}' hx-target='#grid'>Add one now</button></td></tr>"#,
            snapshot.columns.len() + 1,
            escape_html(empty_message),
            routes.add()
        )
    } else {
        snapshot
            .rows
            .iter()
            .map(|row| render_row(row, &snapshot.columns, routes, row_link(row)))
            .collect()
    };

    let add_disabled = if has_draft { " disabled" } else { "" };
    let loading = if snapshot.loading {
        "<span class='text-sm text-gray-400'>Loading</span>"
    } else {
        ""
    };

    format!(
        r#"{toast}<div class='flex items-center justify-between mb-4'>
    <button class='px-4 py-2 bg-indigo-600 text-white rounded-lg disabled:opacity-50' hx-post='{add}' hx-target='#grid'{add_disabled}>+ Add</button>{loading}
</div>
<form id='{form_id}' hx-post='{save}' hx-target='#grid'></form>
<div class='bg-white rounded-xl shadow-sm overflow-x-auto'>
<table class='min-w-full text-sm'>
    <thead class='bg-gray-50'><tr>{header}<th class='px-4 py-2'></th></tr></thead>
    <tbody>{body}</tbody>
</table>
</div>
{pager}"#,
        toast = render_toast(snapshot, routes),
        add = routes.add(),
        form_id = FORM_ID,
        save = routes.save(),
        pager = render_pager(snapshot, routes),
    )
}

fn render_row<F: GridFields>(
    row: &RowView<F>,
    columns: &[ColumnSpec],
    routes: &GridRoutes,
    link: Option<String>,
) -> String {
    let editing = row.mode == EditMode::Edit && row.editable;
    let cells: String = columns
        .iter()
        .map(|column| {
            let value = row.fields.value(column.field);
            let content = if editing && column.editable {
                render_input(column, value, row, routes)
            } else {
                display_value(value)
            };
            format!("<td class='px-4 py-2'>{}</td>", content)
        })
        .collect();

    let actions = if editing && row.busy {
        "<span class='text-gray-400'>Saving</span>".to_string()
    } else if editing {
        format!(
            r#"<button type='submit' form='{}' class='text-indigo-600 mr-2'>Save</button><button class='text-gray-500' hx-post='{}' hx-target='#grid'>Cancel</button>"#,
            FORM_ID,
            routes.cancel()
        )
    } else if row.key.is_draft() {
        format!(
            r#"<button class='text-gray-500' hx-post='{}' hx-target='#grid'>Cancel</button>"#,
            routes.cancel()
        )
    } else if let Some(href) = link {
        format!("<a href='{}' class='text-indigo-600 hover:underline'>Transactions</a>", href)
    } else {
        String::new()
    };

    format!(
        "<tr id='row-{}' class='border-t'>{}<td class='px-4 py-2 text-right'>{}</td></tr>",
        escape_html(&row.key.to_string()),
        cells,
        actions
    )
}

fn render_input<F>(
    column: &ColumnSpec,
    value: Option<CellValue>,
    row: &RowView<F>,
    routes: &GridRoutes,
) -> String {
    let mut attrs = format!(
        r#"form='{}' name='{}' class='border rounded px-2 py-1 w-full' hx-post='{}?reason=escapeKeyDown' hx-trigger='keyup[key=="Escape"]' hx-target='#grid'"#,
        FORM_ID,
        column.field,
        routes.stop()
    );
    if row.focus_field == Some(column.field) {
        attrs.push_str(" autofocus");
    }
    if row.busy {
        attrs.push_str(" disabled");
    }

    match (&column.edit, value) {
        (EditKind::Choice(options), value) => {
            let selected = match value {
                Some(CellValue::Choice { value, .. }) => Some(value),
                _ => None,
            };
            let options: String = options
                .iter()
                .map(|option| {
                    let mark = if selected == Some(option.value) { " selected" } else { "" };
                    format!(
                        "<option value='{}'{}>{}</option>",
                        option.value,
                        mark,
                        escape_html(option.label)
                    )
                })
                .collect();
            format!("<select {}>{}</select>", attrs, options)
        }
        (EditKind::Numeric, value) => {
            let number = match value {
                Some(CellValue::Number(n)) => n.to_string(),
                _ => String::new(),
            };
            format!("<input type='number' step='1' value='{}' {}>", number, attrs)
        }
        (EditKind::Text, value) => {
            let text = value.map(|v| v.to_string()).unwrap_or_default();
            format!("<input type='text' value='{}' {}>", escape_html(&text), attrs)
        }
    }
}

fn display_value(value: Option<CellValue>) -> String {
    match value {
        Some(CellValue::Number(n)) => format_number(n),
        Some(other) => escape_html(&other.to_string()),
        None => String::new(),
    }
}

fn render_toast<F>(snapshot: &GridSnapshot<F>, routes: &GridRoutes) -> String {
    let Some(notification) = &snapshot.notification else {
        return String::new();
    };
    let elapsed = (Utc::now() - notification.shown_at).num_milliseconds();
    let remaining = (snapshot.auto_hide_ms - elapsed).max(0);
    let colour = match notification.severity {
        ledgergrid_core::Severity::Success => "bg-green-50 border-green-300 text-green-800",
        ledgergrid_core::Severity::Error => "bg-red-50 border-red-300 text-red-800",
    };
    format!(
        r#"<div id='toast' role='status' data-severity='{severity}' class='fixed bottom-4 left-1/2 -translate-x-1/2 flex items-center gap-4 px-4 py-3 border rounded-lg shadow {colour}'>
    <span>{text}</span>
    <button class='font-bold' hx-post='{dismiss}' hx-target='#grid' aria-label='Dismiss'>&times;</button>
    <script>setTimeout(function() {{ var t = document.getElementById('toast'); if (t) {{ t.remove(); }} }}, {remaining});</script>
</div>"#,
        severity = notification.severity,
        colour = colour,
        text = escape_html(&notification.text),
        dismiss = routes.dismiss(),
        remaining = remaining,
    )
}

fn render_pager<F>(snapshot: &GridSnapshot<F>, routes: &GridRoutes) -> String {
    let size_options: String = snapshot
        .page_size_options
        .iter()
        .map(|size| {
            let mark = if *size == snapshot.page_size { " selected" } else { "" };
            format!("<option value='{}'{}>{}</option>", size, mark, size)
        })
        .collect();

    let total = i64::try_from(snapshot.total_count).unwrap_or(i64::MAX);
    let first = (snapshot.page_index * snapshot.page_size) as i64;
    let range = if total == 0 {
        "0 of 0".to_string()
    } else {
        let last = (first + snapshot.page_size as i64).min(total);
        format!(
            "{}-{} of {}",
            format_number((first + 1).min(total)),
            format_number(last),
            format_number(total)
        )
    };

    let nav_button = |label: &str, enabled: bool, page: usize| {
        if enabled {
            format!(
                "<button class='px-3 py-1 border rounded' hx-get='{}' hx-target='#grid'>{}</button>",
                routes.grid(page, snapshot.page_size),
                label
            )
        } else {
            format!("<button class='px-3 py-1 border rounded opacity-50' disabled>{}</button>", label)
        }
    };

    format!(
        r#"<div class='flex items-center justify-end gap-4 mt-4 text-sm text-gray-600'>
    <label>Rows per page <select name='page_size' class='border rounded px-2 py-1' hx-get='{base}/grid?page=0' hx-target='#grid' hx-trigger='change'>{size_options}</select></label>
    <span>{range}</span>
    {previous}{next}
</div>"#,
        base = routes.base(),
        size_options = size_options,
        range = range,
        previous = nav_button("Previous", snapshot.has_previous(), snapshot.page_index.saturating_sub(1)),
        next = nav_button("Next", snapshot.has_next(), snapshot.page_index + 1),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_form_decodes_values() {
        let form = parse_form("number=A%2F1&name=Alice+Smith&iban=&flag");
        assert_eq!(form.get("number").map(String::as_str), Some("A/1"));
        assert_eq!(form.get("name").map(String::as_str), Some("Alice Smith"));
        assert_eq!(form.get("iban").map(String::as_str), Some(""));
        assert_eq!(form.get("flag").map(String::as_str), Some(""));
    }

    #[test]
    fn test_page_query_falls_back_to_default_size() {
        let options = ViewOptions::default();
        let mut query = HashMap::new();
        query.insert("page".to_string(), "3".to_string());
        query.insert("page_size".to_string(), "7".to_string());
        assert_eq!(page_query(&options, &query), (3, 10));

        query.insert("page_size".to_string(), "100".to_string());
        assert_eq!(page_query(&options, &query), (3, 100));
        assert_eq!(page_query(&options, &HashMap::new()), (0, 10));
    }

    #[test]
    fn test_routes() {
        let routes = GridRoutes::new("/accounts/A1/transactions");
        assert_eq!(routes.grid(2, 50), "/accounts/A1/transactions/grid?page=2&page_size=50");
        assert_eq!(routes.save(), "/accounts/A1/transactions/rows/new/save");
        assert_eq!(routes.dismiss(), "/accounts/A1/transactions/notification/dismiss");
    }
}
