//! Mapping between wire records and grid records

use ledgergrid_rpc::{WireAccount, WireTransaction};

use crate::error::GridError;
use crate::model::{AccountFields, GridFields, TransactionFields, TransactionKind};
use crate::types::{Record, RecordId};

/// Stateless conversion between one wire type and its grid fields
pub trait RecordCodec: Send + Sync + 'static {
    type Wire: Send + 'static;
    type Fields: GridFields;

    /// Decode a persisted wire record
    fn decode(&self, wire: Self::Wire) -> Result<Record<Self::Fields>, GridError>;

    /// Encode draft fields as a create request (no id)
    fn encode_draft(&self, fields: &Self::Fields) -> Self::Wire;

    /// Zero-valued fields for a fresh draft
    fn blank(&self) -> Self::Fields;
}

fn record_id(raw: String) -> Result<RecordId, GridError> {
    RecordId::new(raw).ok_or_else(|| GridError::InvalidRecord {
        message: "record has no id".to_string(),
    })
}

/// Codec for the account collection
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountCodec;

impl RecordCodec for AccountCodec {
    type Wire = WireAccount;
    type Fields = AccountFields;

    fn decode(&self, wire: WireAccount) -> Result<Record<AccountFields>, GridError> {
        let id = record_id(wire.id)?;
        Ok(Record::new(
            id,
            AccountFields {
                number: wire.number,
                name: wire.name,
                iban: wire.iban,
                address: wire.address,
            },
        ))
    }

    fn encode_draft(&self, fields: &AccountFields) -> WireAccount {
        WireAccount {
            id: String::new(),
            number: fields.number.clone(),
            name: fields.name.clone(),
            address: fields.address.clone(),
            iban: fields.iban.clone(),
        }
    }

    fn blank(&self) -> AccountFields {
        AccountFields::default()
    }
}

/// Codec for the transactions of one account
#[derive(Debug, Clone)]
pub struct TransactionCodec {
    account_number: String,
}

impl TransactionCodec {
    pub fn new(account_number: impl Into<String>) -> Self {
        Self {
            account_number: account_number.into(),
        }
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }
}

impl RecordCodec for TransactionCodec {
    type Wire = WireTransaction;
    type Fields = TransactionFields;

    fn decode(&self, wire: WireTransaction) -> Result<Record<TransactionFields>, GridError> {
        let kind = TransactionKind::from_value(wire.kind).ok_or_else(|| GridError::InvalidRecord {
            message: format!("unknown transaction type {}", wire.kind),
        })?;
        let id = record_id(wire.id)?;
        Ok(Record::new(
            id,
            TransactionFields {
                account_number: wire.account_number,
                amount: wire.amount,
                kind,
            },
        ))
    }

    fn encode_draft(&self, fields: &TransactionFields) -> WireTransaction {
        WireTransaction {
            id: String::new(),
            account_number: self.account_number.clone(),
            amount: fields.amount,
            kind: fields.kind.value(),
        }
    }

    fn blank(&self) -> TransactionFields {
        TransactionFields {
            account_number: self.account_number.clone(),
            amount: 0,
            kind: TransactionKind::Deposit,
        }
    }
}
