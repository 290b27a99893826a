//! The locally held page of rows and the server-reported total

use crate::error::GridError;
use crate::types::{Record, Row};

/// A list call to issue for the window, tagged with its request token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub token: u64,
    /// 1-based page number as the service expects it
    pub page_number: u32,
    pub page_size: u32,
}

/// The page a pending request is for
#[derive(Debug, Clone, Copy)]
struct PendingPage {
    token: u64,
    page_index: usize,
    page_size: usize,
}

/// Current page of rows plus the total row count. Page index and size
/// describe the rows on display; a requested page takes effect only when
/// its response is applied.
#[derive(Debug)]
pub struct PageWindow<F> {
    page_index: usize,
    page_size: usize,
    rows: Vec<Row<F>>,
    total_count: u64,
    latest_request: u64,
    pending: Option<PendingPage>,
}

impl<F: Clone> PageWindow<F> {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
            rows: Vec::new(),
            total_count: 0,
            latest_request: 0,
            pending: None,
        }
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn rows(&self) -> &[Row<F>] {
        &self.rows
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Whether the latest list request is still outstanding
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Request a page. Any draft row is discarded right away; persisted
    /// rows, index and size stay until the response for this request is applied.
    pub fn set_page(&mut self, page_index: usize, page_size: usize) -> Result<PageRequest, GridError> {
        if page_size == 0 {
            return Err(GridError::InvalidPage {
                message: "page size must be positive".to_string(),
            });
        }
        let page_number = u32::try_from(page_index + 1).map_err(|_| GridError::InvalidPage {
            message: format!("page {} is out of range", page_index),
        })?;
        let wire_size = u32::try_from(page_size).map_err(|_| GridError::InvalidPage {
            message: format!("page size {} is out of range", page_size),
        })?;

        self.remove_draft();
        self.latest_request += 1;
        self.pending = Some(PendingPage {
            token: self.latest_request,
            page_index,
            page_size,
        });

        Ok(PageRequest {
            token: self.latest_request,
            page_number,
            page_size: wire_size,
        })
    }

    /// Apply a list response. Responses to superseded requests are dropped.
    pub fn apply_page(&mut self, token: u64, records: Vec<Record<F>>, total_count: u64) -> bool {
        let Some(page) = self.pending.filter(|page| page.token == token) else {
            log::debug!(
                target: "ledgergrid::window",
                "dropping stale page response {} (latest {})",
                token,
                self.latest_request
            );
            return false;
        };
        self.page_index = page.page_index;
        self.page_size = page.page_size;
        self.rows = records.into_iter().map(Row::from).collect();
        self.total_count = total_count;
        self.pending = None;
        true
    }

    /// Record that a list request failed; the last applied page is kept whole
    pub fn fail_page(&mut self, token: u64) -> bool {
        if !self.pending.map_or(false, |page| page.token == token) {
            return false;
        }
        self.pending = None;
        true
    }

    pub fn has_draft(&self) -> bool {
        self.rows.iter().any(Row::is_draft)
    }

    /// Current values of the draft row
    pub fn draft_fields(&self) -> Option<&F> {
        self.rows.iter().find(|row| row.is_draft()).map(|row| &row.fields)
    }

    /// Append a draft row at the end; refused when one exists
    pub fn push_draft(&mut self, fields: F) -> bool {
        if self.has_draft() {
            return false;
        }
        self.rows.push(Row::draft(fields));
        true
    }

    /// Replace the draft row's values
    pub fn update_draft(&mut self, fields: F) -> bool {
        match self.rows.iter_mut().find(|row| row.is_draft()) {
            Some(row) => {
                row.fields = fields;
                true
            }
            None => false,
        }
    }

    pub fn remove_draft(&mut self) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| !row.is_draft());
        self.rows.len() != before
    }

    /// Splice a newly created record into the window in place of the draft.
    /// The oldest rows are dropped from view while the page overflows.
    pub fn on_record_created(&mut self, record: Record<F>) {
        self.remove_draft();
        self.rows.push(Row::from(record));
        if self.rows.len() > self.page_size {
            let excess = self.rows.len() - self.page_size;
            self.rows.drain(..excess);
        }
        self.total_count += 1;
    }
}
