//! Route modules for the grid server
//!
//! - accounts: the account grid
//! - transactions: the transaction grid of one account
//! - grid: rendering and intent handling shared by both
//!
//! Each collection module has:
//! - api.rs: JSON snapshot and HTMX partial endpoints
//! - page.rs: full page rendering

pub mod accounts;
pub mod grid;
pub mod transactions;
