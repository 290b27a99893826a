//! Grid events and how a collection reacts to them

use serde::Deserialize;

use crate::codec::RecordCodec;
use crate::error::{GridError, GridResult};
use crate::types::{EditMode, Record, RowKey};
use crate::view::{CollectionView, SaveOutcome};

/// Why the grid stopped editing a row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditStopReason {
    RowFocusOut,
    EscapeKeyDown,
    EnterKeyDown,
    TabKeyDown,
    ShiftTabKeyDown,
}

/// An event raised by the grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridIntent<F> {
    Add,
    RowModesChange { key: RowKey, mode: EditMode },
    RowEditStop { key: RowKey, reason: EditStopReason },
    ProcessRowUpdate { key: RowKey, fields: F },
    Cancel { key: RowKey },
    PaginationModelChange { page_index: usize, page_size: usize },
    DismissNotification,
}

impl<C: RecordCodec> CollectionView<C> {
    /// Route a grid event. Returns the created record when the event
    /// completed a save.
    pub async fn dispatch(
        &self,
        intent: GridIntent<C::Fields>,
    ) -> GridResult<Option<Record<C::Fields>>> {
        match intent {
            GridIntent::Add => {
                self.add();
            }
            GridIntent::RowModesChange { key, mode } => {
                self.set_mode(&key, mode);
            }
            GridIntent::RowEditStop { key, reason } => return self.stop_editing(key, reason).await,
            GridIntent::ProcessRowUpdate { key, fields } => {
                return self.save(&key, fields).await.map(saved_record);
            }
            GridIntent::Cancel { key } => {
                self.cancel(&key);
            }
            GridIntent::PaginationModelChange {
                page_index,
                page_size,
            } => {
                self.set_page(page_index, page_size).await?;
            }
            GridIntent::DismissNotification => self.dismiss_notification(),
        }
        Ok(None)
    }

    async fn stop_editing(
        &self,
        key: RowKey,
        reason: EditStopReason,
    ) -> GridResult<Option<Record<C::Fields>>> {
        match reason {
            // Clicking elsewhere keeps the row in edit
            EditStopReason::RowFocusOut => Ok(None),
            EditStopReason::EscapeKeyDown => {
                self.cancel(&key);
                Ok(None)
            }
            EditStopReason::EnterKeyDown if key.is_draft() => {
                let fields = self.draft_fields().ok_or(GridError::NoDraft)?;
                self.save(&key, fields).await.map(saved_record)
            }
            _ => {
                self.set_mode(&key, EditMode::View);
                Ok(None)
            }
        }
    }
}

fn saved_record<F>(outcome: SaveOutcome<F>) -> Option<Record<F>> {
    match outcome {
        SaveOutcome::Saved(record) => Some(record),
        SaveOutcome::Abandoned => None,
    }
}
