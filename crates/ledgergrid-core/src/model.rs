//! Record field types and their grid bindings

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::error::GridError;
use crate::types::{CellValue, ChoiceOption, ColumnSpec};

/// Field set of one record type as the grid sees it
pub trait GridFields: Clone + Debug + PartialEq + Serialize + Send + Sync + 'static {
    /// Singular record name used in messages ("account")
    fn noun() -> &'static str;

    /// Column layout, in display order
    fn columns() -> Vec<ColumnSpec>;

    /// Field that receives focus when a draft is opened
    fn focus_field() -> &'static str;

    /// Current value of a column
    fn value(&self, field: &str) -> Option<CellValue>;

    /// Apply a raw edit to a column, checking it against the column's edit type
    fn set_value(&mut self, field: &str, raw: &str) -> Result<(), GridError>;
}

fn unknown_field(field: &str) -> GridError {
    GridError::InvalidField {
        field: field.to_string(),
        message: "not an editable column".to_string(),
    }
}

// ==================== Accounts ====================

/// Account fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountFields {
    pub number: String,
    pub name: String,
    pub iban: String,
    pub address: String,
}

impl GridFields for AccountFields {
    fn noun() -> &'static str {
        "account"
    }

    fn columns() -> Vec<ColumnSpec> {
        vec![
            ColumnSpec::text("number", "Acc Number"),
            ColumnSpec::text("name", "Acc Name"),
            ColumnSpec::text("iban", "IBAN"),
            ColumnSpec::text("address", "Address"),
        ]
    }

    fn focus_field() -> &'static str {
        "number"
    }

    fn value(&self, field: &str) -> Option<CellValue> {
        let text = match field {
            "number" => &self.number,
            "name" => &self.name,
            "iban" => &self.iban,
            "address" => &self.address,
            _ => return None,
        };
        Some(CellValue::Text(text.clone()))
    }

    fn set_value(&mut self, field: &str, raw: &str) -> Result<(), GridError> {
        let slot = match field {
            "number" => &mut self.number,
            "name" => &mut self.name,
            "iban" => &mut self.iban,
            "address" => &mut self.address,
            _ => return Err(unknown_field(field)),
        };
        *slot = raw.to_string();
        Ok(())
    }
}

// ==================== Transactions ====================

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    #[default]
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 2] = [TransactionKind::Deposit, TransactionKind::Withdrawal];

    /// Wire value
    pub fn value(self) -> i32 {
        match self {
            TransactionKind::Deposit => ledgergrid_rpc::TRANSACTION_TYPE_DEPOSIT,
            TransactionKind::Withdrawal => ledgergrid_rpc::TRANSACTION_TYPE_WITHDRAWAL,
        }
    }

    pub fn from_value(value: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.value() == value)
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Transaction fields; `account_number` is fixed by the owning collection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionFields {
    pub account_number: String,
    pub amount: i64,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl GridFields for TransactionFields {
    fn noun() -> &'static str {
        "transaction"
    }

    fn columns() -> Vec<ColumnSpec> {
        let options = TransactionKind::ALL
            .into_iter()
            .map(|kind| ChoiceOption {
                value: kind.value(),
                label: kind.label(),
            })
            .collect();
        vec![
            ColumnSpec::choice("type", "Type", options),
            ColumnSpec::numeric("amount", "Amount"),
        ]
    }

    fn focus_field() -> &'static str {
        "type"
    }

    fn value(&self, field: &str) -> Option<CellValue> {
        match field {
            "type" => Some(CellValue::Choice {
                value: self.kind.value(),
                label: self.kind.label(),
            }),
            "amount" => Some(CellValue::Number(self.amount)),
            _ => None,
        }
    }

    fn set_value(&mut self, field: &str, raw: &str) -> Result<(), GridError> {
        match field {
            "type" => {
                self.kind = raw
                    .trim()
                    .parse::<i32>()
                    .ok()
                    .and_then(TransactionKind::from_value)
                    .ok_or_else(|| GridError::InvalidField {
                        field: field.to_string(),
                        message: format!("'{}' is not a transaction type", raw),
                    })?;
            }
            "amount" => {
                let raw = raw.trim();
                self.amount = if raw.is_empty() {
                    0
                } else {
                    raw.parse().map_err(|_| GridError::InvalidField {
                        field: field.to_string(),
                        message: format!("'{}' is not a whole number", raw),
                    })?
                };
            }
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EditKind;

    #[test]
    fn test_account_columns() {
        let columns = AccountFields::columns();
        let fields: Vec<_> = columns.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["number", "name", "iban", "address"]);
        assert!(columns.iter().all(|c| c.editable && c.edit == EditKind::Text));
        assert_eq!(AccountFields::focus_field(), "number");
    }

    #[test]
    fn test_account_set_value() {
        let mut fields = AccountFields::default();
        fields.set_value("iban", "DE89 3704").unwrap();
        assert_eq!(fields.value("iban"), Some(CellValue::Text("DE89 3704".to_string())));
        assert!(fields.set_value("id", "42").is_err());
    }

    #[test]
    fn test_transaction_columns() {
        let columns = TransactionFields::columns();
        assert_eq!(columns[0].field, "type");
        match &columns[0].edit {
            EditKind::Choice(options) => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[1].label, "WITHDRAWAL");
                assert_eq!(options[1].value, 1);
            }
            other => panic!("unexpected edit kind: {other:?}"),
        }
        assert_eq!(columns[1].edit, EditKind::Numeric);
        assert_eq!(TransactionFields::focus_field(), "type");
    }

    #[test]
    fn test_transaction_set_value_checks_types() {
        let mut fields = TransactionFields::default();
        fields.set_value("amount", "250").unwrap();
        fields.set_value("type", "1").unwrap();
        assert_eq!(fields.amount, 250);
        assert_eq!(fields.kind, TransactionKind::Withdrawal);

        assert!(fields.set_value("amount", "12.5").is_err());
        assert!(fields.set_value("type", "9").is_err());
        assert!(fields.set_value("account_number", "B2").is_err());
        assert_eq!(fields.amount, 250);
    }

    #[test]
    fn test_transaction_kind_values() {
        assert_eq!(TransactionKind::from_value(0), Some(TransactionKind::Deposit));
        assert_eq!(TransactionKind::from_value(1), Some(TransactionKind::Withdrawal));
        assert_eq!(TransactionKind::from_value(2), None);
    }
}
