//! Basic types shared by the grid components

use serde::{Deserialize, Serialize, Serializer};

/// Row key of the draft row
pub const DRAFT_KEY: &str = "new";

/// Server-assigned record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wrap a server id; `None` for an empty id
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of a grid row: a persisted record id or the draft sentinel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Persisted(RecordId),
    Draft,
}

impl RowKey {
    pub fn is_draft(&self) -> bool {
        matches!(self, RowKey::Draft)
    }

    /// Parse a key as the grid reports it
    pub fn parse(raw: &str) -> Option<Self> {
        if raw == DRAFT_KEY {
            Some(RowKey::Draft)
        } else {
            RecordId::new(raw).map(RowKey::Persisted)
        }
    }
}

impl From<RecordId> for RowKey {
    fn from(id: RecordId) -> Self {
        RowKey::Persisted(id)
    }
}

impl std::fmt::Display for RowKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowKey::Persisted(id) => write!(f, "{}", id),
            RowKey::Draft => f.write_str(DRAFT_KEY),
        }
    }
}

impl Serialize for RowKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-row edit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    View,
    Edit,
}

impl std::fmt::Display for EditMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditMode::View => write!(f, "view"),
            EditMode::Edit => write!(f, "edit"),
        }
    }
}

/// A persisted record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record<F> {
    pub id: RecordId,
    pub fields: F,
}

impl<F> Record<F> {
    pub fn new(id: RecordId, fields: F) -> Self {
        Self { id, fields }
    }
}

/// A grid row: a record's fields plus the row key
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row<F> {
    pub key: RowKey,
    pub fields: F,
}

impl<F> Row<F> {
    pub fn draft(fields: F) -> Self {
        Self {
            key: RowKey::Draft,
            fields,
        }
    }

    pub fn is_draft(&self) -> bool {
        self.key.is_draft()
    }
}

impl<F> From<Record<F>> for Row<F> {
    fn from(record: Record<F>) -> Self {
        Self {
            key: RowKey::Persisted(record.id),
            fields: record.fields,
        }
    }
}

/// One option of an enumerated column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceOption {
    pub value: i32,
    pub label: &'static str,
}

/// How a column's cells are edited
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "camelCase")]
pub enum EditKind {
    Text,
    Numeric,
    Choice(Vec<ChoiceOption>),
}

/// Column description handed to the grid widget
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSpec {
    pub field: &'static str,
    pub label: &'static str,
    pub edit: EditKind,
    pub editable: bool,
}

impl ColumnSpec {
    pub fn text(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            edit: EditKind::Text,
            editable: true,
        }
    }

    pub fn numeric(field: &'static str, label: &'static str) -> Self {
        Self {
            field,
            label,
            edit: EditKind::Numeric,
            editable: true,
        }
    }

    pub fn choice(field: &'static str, label: &'static str, options: Vec<ChoiceOption>) -> Self {
        Self {
            field,
            label,
            edit: EditKind::Choice(options),
            editable: true,
        }
    }
}

/// Typed value of one cell
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(i64),
    Choice { value: i32, label: &'static str },
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Text(text) => f.write_str(text),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Choice { label, .. } => f.write_str(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_key_parse() {
        assert_eq!(RowKey::parse("new"), Some(RowKey::Draft));
        assert_eq!(
            RowKey::parse("42"),
            Some(RowKey::Persisted(RecordId::new("42").unwrap()))
        );
        assert_eq!(RowKey::parse(""), None);
    }

    #[test]
    fn test_row_key_serializes_as_string() {
        let draft = serde_json::to_string(&RowKey::Draft).unwrap();
        assert_eq!(draft, "\"new\"");
        let persisted = RowKey::from(RecordId::new("7").unwrap());
        assert_eq!(serde_json::to_string(&persisted).unwrap(), "\"7\"");
    }

    #[test]
    fn test_empty_record_id_rejected() {
        assert!(RecordId::new("").is_none());
        assert_eq!(RecordId::new("abc").unwrap().as_str(), "abc");
    }

    #[test]
    fn test_edit_mode_default_is_view() {
        assert_eq!(EditMode::default(), EditMode::View);
    }
}
