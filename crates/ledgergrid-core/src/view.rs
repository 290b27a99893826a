//! A paged, editable collection bound to one remote port

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use ledgergrid_config::Config;
use ledgergrid_rpc::PortRef;
use serde::Serialize;

use crate::codec::RecordCodec;
use crate::edit::RowEditController;
use crate::error::{GridError, GridResult};
use crate::model::GridFields;
use crate::notify::{Notification, Notifier, Severity};
use crate::types::{ColumnSpec, EditMode, Record, Row, RowKey};
use crate::window::PageWindow;

const MAX_AUTO_HIDE_MS: u64 = 24 * 60 * 60 * 1000;

/// Paging and notification settings for a view
#[derive(Debug, Clone, PartialEq)]
pub struct ViewOptions {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub auto_hide: Duration,
}

impl ViewOptions {
    pub fn from_config(config: &Config) -> Self {
        let auto_hide_ms = config.notifications.auto_hide_ms.min(MAX_AUTO_HIDE_MS);
        Self {
            page_size: config.grid.page_size,
            page_size_options: config.grid.page_size_options.clone(),
            auto_hide: Duration::milliseconds(auto_hide_ms as i64),
        }
    }

    /// The requested size when it is offered, otherwise the default
    pub fn resolve_page_size(&self, requested: Option<usize>) -> usize {
        requested
            .filter(|size| self.page_size_options.contains(size))
            .unwrap_or(self.page_size)
    }
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Result of a save that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome<F> {
    /// The record as confirmed by the service
    Saved(Record<F>),
    /// The draft was cancelled or paged away before the service replied
    Abandoned,
}

/// Result of a page fetch that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFetch {
    Loaded,
    Superseded,
}

/// One row as rendered
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView<F> {
    pub key: RowKey,
    pub mode: EditMode,
    pub editable: bool,
    pub busy: bool,
    pub focus_field: Option<&'static str>,
    pub fields: F,
}

/// Render model of a whole collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSnapshot<F> {
    pub noun: &'static str,
    pub page_index: usize,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub total_count: u64,
    pub loading: bool,
    pub columns: Vec<ColumnSpec>,
    pub rows: Vec<RowView<F>>,
    pub notification: Option<Notification>,
    pub auto_hide_ms: i64,
}

impl<F> GridSnapshot<F> {
    /// Number of pages the total spans; at least one
    pub fn page_count(&self) -> usize {
        let total = usize::try_from(self.total_count).unwrap_or(usize::MAX);
        total.div_ceil(self.page_size.max(1)).max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }
}

struct ViewState<F> {
    window: PageWindow<F>,
    editor: RowEditController,
    notifier: Notifier,
}

/// Collection of one record type: the current page, the single draft row
/// and the latest notification. Shared across tasks; the internal lock is
/// released before every call to the port.
pub struct CollectionView<C: RecordCodec> {
    codec: C,
    port: PortRef<C::Wire>,
    options: ViewOptions,
    state: Mutex<ViewState<C::Fields>>,
}

impl<C: RecordCodec> CollectionView<C> {
    pub fn new(codec: C, port: PortRef<C::Wire>, options: ViewOptions) -> Self {
        let state = ViewState {
            window: PageWindow::new(options.page_size),
            editor: RowEditController::new(),
            notifier: Notifier::new(options.auto_hide),
        };
        Self {
            codec,
            port,
            options,
            state: Mutex::new(state),
        }
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    fn state(&self) -> MutexGuard<'_, ViewState<C::Fields>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Open a blank draft at the end of the page. No-op when one exists.
    pub fn add(&self) -> bool {
        let mut state = self.state();
        if state.editor.begin_draft(C::Fields::focus_field()).is_none() {
            return false;
        }
        state.window.push_draft(self.codec.blank());
        log::debug!(target: "ledgergrid::view", "opened {} draft", C::Fields::noun());
        true
    }

    pub fn is_editable(&self, key: &RowKey) -> bool {
        self.state().editor.is_editable(key)
    }

    pub fn mode(&self, key: &RowKey) -> EditMode {
        self.state().editor.mode(key)
    }

    pub fn set_mode(&self, key: &RowKey, mode: EditMode) -> bool {
        self.state().editor.set_mode(key, mode)
    }

    /// Apply one typed field edit to the draft
    pub fn edit_draft(&self, field: &str, raw: &str) -> GridResult<()> {
        let mut state = self.state();
        if state.editor.is_busy(&RowKey::Draft) {
            return Err(GridError::RowBusy {
                key: RowKey::Draft.to_string(),
            });
        }
        let mut fields = state.window.draft_fields().cloned().ok_or(GridError::NoDraft)?;
        fields.set_value(field, raw)?;
        state.window.update_draft(fields);
        Ok(())
    }

    /// Leave edit mode; the draft row is discarded. Returns true when a
    /// draft was removed.
    pub fn cancel(&self, key: &RowKey) -> bool {
        let mut state = self.state();
        let discarded = state.editor.cancel(key);
        if key.is_draft() {
            state.window.remove_draft();
        }
        discarded
    }

    pub fn draft_fields(&self) -> Option<C::Fields> {
        self.state().window.draft_fields().cloned()
    }

    pub fn rows(&self) -> Vec<Row<C::Fields>> {
        self.state().window.rows().to_vec()
    }

    pub fn total_count(&self) -> u64 {
        self.state().window.total_count()
    }

    /// Submit the draft with `fields` through the port
    pub async fn save(
        &self,
        key: &RowKey,
        fields: C::Fields,
    ) -> GridResult<SaveOutcome<C::Fields>> {
        let ticket = {
            let mut state = self.state();
            let ticket = state.editor.begin_save(key)?;
            state.window.update_draft(fields.clone());
            ticket
        };

        let request = self.codec.encode_draft(&fields);
        let result = match self.port.create(request).await {
            Ok(wire) => self.codec.decode(wire),
            Err(error) => Err(GridError::create(&error)),
        };

        let mut state = self.state();
        if !state.editor.finish_save(ticket, result.is_ok()) {
            log::debug!(
                target: "ledgergrid::view",
                "dropping {} save {}: draft no longer current",
                C::Fields::noun(),
                ticket.token()
            );
            return Ok(SaveOutcome::Abandoned);
        }

        let now = Utc::now();
        match result {
            Ok(record) => {
                log::info!(
                    target: "ledgergrid::view",
                    "created {} {}",
                    C::Fields::noun(),
                    record.id
                );
                state.window.on_record_created(record.clone());
                state
                    .notifier
                    .show(Severity::Success, format!("New {} saved", C::Fields::noun()), now);
                Ok(SaveOutcome::Saved(record))
            }
            Err(error) => {
                log::warn!(
                    target: "ledgergrid::view",
                    "failed to create {}: {}",
                    C::Fields::noun(),
                    error
                );
                state.notifier.show(Severity::Error, error.to_string(), now);
                Err(error)
            }
        }
    }

    /// Move to a page and fetch it. Modes and the draft are dropped before
    /// the request goes out.
    pub async fn set_page(&self, page_index: usize, page_size: usize) -> GridResult<PageFetch> {
        let request = {
            let mut state = self.state();
            let request = state.window.set_page(page_index, page_size)?;
            state.editor.reset();
            request
        };

        let result = match self.port.list(request.page_number, request.page_size).await {
            Ok(page) => page
                .items
                .into_iter()
                .map(|wire| self.codec.decode(wire))
                .collect::<Result<Vec<_>, _>>()
                .map(|records| (records, page.total_count)),
            Err(error) => Err(GridError::fetch(&error)),
        };

        let mut state = self.state();
        match result {
            Ok((records, total_count)) => {
                if !state.window.apply_page(request.token, records, total_count) {
                    return Ok(PageFetch::Superseded);
                }
                state.editor.reset();
                Ok(PageFetch::Loaded)
            }
            Err(error) => {
                if !state.window.fail_page(request.token) {
                    return Ok(PageFetch::Superseded);
                }
                log::warn!(
                    target: "ledgergrid::view",
                    "failed to load {} page {}: {}",
                    C::Fields::noun(),
                    request.page_number,
                    error
                );
                Err(error)
            }
        }
    }

    /// Fetch the current page again
    pub async fn reload(&self) -> GridResult<PageFetch> {
        let (page_index, page_size) = {
            let state = self.state();
            (state.window.page_index(), state.window.page_size())
        };
        self.set_page(page_index, page_size).await
    }

    pub fn dismiss_notification(&self) {
        self.state().notifier.dismiss();
    }

    pub fn notification(&self) -> Option<Notification> {
        self.state().notifier.current_at(Utc::now()).cloned()
    }

    pub fn snapshot(&self) -> GridSnapshot<C::Fields> {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> GridSnapshot<C::Fields> {
        let state = self.state();
        let rows = state
            .window
            .rows()
            .iter()
            .map(|row| RowView {
                key: row.key.clone(),
                mode: state.editor.mode(&row.key),
                editable: state.editor.is_editable(&row.key),
                busy: state.editor.is_busy(&row.key),
                focus_field: state.editor.focus_field(&row.key),
                fields: row.fields.clone(),
            })
            .collect();

        GridSnapshot {
            noun: C::Fields::noun(),
            page_index: state.window.page_index(),
            page_size: state.window.page_size(),
            page_size_options: self.options.page_size_options.clone(),
            total_count: state.window.total_count(),
            loading: state.window.is_loading(),
            columns: C::Fields::columns(),
            rows,
            notification: state.notifier.current_at(now).cloned(),
            auto_hide_ms: state.notifier.auto_hide().num_milliseconds(),
        }
    }
}
