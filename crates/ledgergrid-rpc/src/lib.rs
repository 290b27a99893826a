//! Record-storage port and in-process ledger service
//!
//! `RemotePort` is the only way grid collections reach stored records.

pub mod error;
pub mod port;
pub mod service;
pub mod types;

pub use error::{PortError, StatusCode};
pub use port::{PortRef, RemotePort};
pub use service::{AccountsPort, LedgerService, TransactionsPort};
pub use types::{
    ListPage, WireAccount, WireTransaction, TRANSACTION_TYPE_DEPOSIT, TRANSACTION_TYPE_WITHDRAWAL,
};
