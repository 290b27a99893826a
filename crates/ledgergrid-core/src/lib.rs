//! Ledgergrid core
//!
//! Keeps a paged, editable grid consistent with a remote record store:
//! one draft row at a time, stale responses ignored, saves reconciled
//! with the record the service returns.

pub mod codec;
pub mod edit;
pub mod error;
pub mod intent;
pub mod model;
pub mod notify;
pub mod types;
pub mod view;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use codec::{AccountCodec, RecordCodec, TransactionCodec};
pub use error::{ErrorCode, ErrorDetails, ErrorSeverity, GridError, GridResult};
pub use intent::{EditStopReason, GridIntent};
pub use model::{AccountFields, GridFields, TransactionFields, TransactionKind};
pub use notify::{Notification, Severity};
pub use types::{CellValue, ColumnSpec, EditKind, EditMode, Record, RecordId, Row, RowKey, DRAFT_KEY};
pub use view::{CollectionView, GridSnapshot, PageFetch, RowView, SaveOutcome, ViewOptions};
