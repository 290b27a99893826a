//! Row edit modes and the draft-row lifecycle

use std::collections::HashMap;

use crate::error::GridError;
use crate::types::{EditMode, RowKey};

#[derive(Debug, Clone)]
struct DraftState {
    /// Distinguishes this draft from any earlier, since-discarded one
    generation: u64,
    focus_field: &'static str,
    /// Token of the outstanding create call
    in_flight: Option<u64>,
}

/// Handle for one submitted save, redeemed with `finish_save`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveTicket {
    token: u64,
    generation: u64,
}

impl SaveTicket {
    pub fn token(&self) -> u64 {
        self.token
    }
}

/// Owns per-row edit modes and the single draft row
#[derive(Debug, Default)]
pub struct RowEditController {
    modes: HashMap<RowKey, EditMode>,
    draft: Option<DraftState>,
    next_token: u64,
}

impl RowEditController {
    pub fn new() -> Self {
        Self::default()
    }

    fn issue_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    /// Mode of a row; rows without an entry are in `View`
    pub fn mode(&self, key: &RowKey) -> EditMode {
        self.modes.get(key).copied().unwrap_or_default()
    }

    /// Change a row's mode. Only the draft row may enter `Edit`.
    pub fn set_mode(&mut self, key: &RowKey, mode: EditMode) -> bool {
        match mode {
            EditMode::View => {
                self.modes.remove(key);
                true
            }
            EditMode::Edit if self.is_editable(key) => {
                self.modes.insert(key.clone(), EditMode::Edit);
                true
            }
            EditMode::Edit => false,
        }
    }

    pub fn has_draft(&self) -> bool {
        self.draft.is_some()
    }

    /// A row is editable only while it is the live draft
    pub fn is_editable(&self, key: &RowKey) -> bool {
        key.is_draft() && self.draft.is_some()
    }

    /// Whether the draft has a save outstanding
    pub fn is_busy(&self, key: &RowKey) -> bool {
        key.is_draft()
            && self
                .draft
                .as_ref()
                .map_or(false, |draft| draft.in_flight.is_some())
    }

    /// Field to focus on the draft row, while it is being edited
    pub fn focus_field(&self, key: &RowKey) -> Option<&'static str> {
        if self.mode(key) != EditMode::Edit {
            return None;
        }
        self.draft.as_ref().map(|draft| draft.focus_field)
    }

    /// Open a draft in `Edit` mode. Returns `None` when one already exists.
    pub fn begin_draft(&mut self, focus_field: &'static str) -> Option<RowKey> {
        if self.draft.is_some() {
            return None;
        }
        let generation = self.issue_token();
        self.draft = Some(DraftState {
            generation,
            focus_field,
            in_flight: None,
        });
        self.modes.insert(RowKey::Draft, EditMode::Edit);
        Some(RowKey::Draft)
    }

    /// Leave edit mode; cancelling the draft key discards the draft.
    /// Returns true when a draft was discarded.
    pub fn cancel(&mut self, key: &RowKey) -> bool {
        self.modes.remove(key);
        key.is_draft() && self.draft.take().is_some()
    }

    /// Mark the draft as submitted
    pub fn begin_save(&mut self, key: &RowKey) -> Result<SaveTicket, GridError> {
        if !key.is_draft() {
            return Err(GridError::NotEditable { key: key.to_string() });
        }
        let token = self.next_token + 1;
        let draft = self.draft.as_mut().ok_or(GridError::NoDraft)?;
        if draft.in_flight.is_some() {
            return Err(GridError::RowBusy { key: key.to_string() });
        }
        draft.in_flight = Some(token);
        let generation = draft.generation;
        self.next_token = token;
        Ok(SaveTicket { token, generation })
    }

    /// Resolve a submitted save. Returns false when the ticket no longer
    /// matches the live draft, in which case nothing changes.
    pub fn finish_save(&mut self, ticket: SaveTicket, succeeded: bool) -> bool {
        let current = self.draft.as_ref().map_or(false, |draft| {
            draft.generation == ticket.generation && draft.in_flight == Some(ticket.token)
        });
        if !current {
            return false;
        }

        if succeeded {
            self.draft = None;
            self.modes.remove(&RowKey::Draft);
        } else if let Some(draft) = self.draft.as_mut() {
            draft.in_flight = None;
        }
        true
    }

    /// Drop every mode and the draft
    pub fn reset(&mut self) {
        self.modes.clear();
        self.draft = None;
    }
}
