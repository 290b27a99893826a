//! Wire records exchanged with the record-storage service

use serde::{Deserialize, Serialize};

/// Wire value of a deposit
pub const TRANSACTION_TYPE_DEPOSIT: i32 = 0;
/// Wire value of a withdrawal
pub const TRANSACTION_TYPE_WITHDRAWAL: i32 = 1;

/// Account as sent over the wire; `id` is empty until the service assigns one
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireAccount {
    pub id: String,
    pub number: String,
    pub name: String,
    pub address: String,
    pub iban: String,
}

/// Transaction as sent over the wire
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireTransaction {
    pub id: String,
    pub account_number: String,
    pub amount: i64,
    /// Transaction type, see `TRANSACTION_TYPE_*`
    #[serde(rename = "type")]
    pub kind: i32,
}

/// One page of a list call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<W> {
    pub items: Vec<W>,
    /// Total number of records on the server, across all pages
    pub total_count: u64,
}

impl<W> ListPage<W> {
    pub fn new(items: Vec<W>, total_count: u64) -> Self {
        Self { items, total_count }
    }

    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }
}
