//! Account routes
//!
//! Accounts are listed a page at a time; new accounts are added through
//! the draft row. Each row links to the account's transactions.

pub mod api;
pub mod page;

pub use api::{
    api_accounts, htmx_account_add, htmx_account_cancel, htmx_account_save, htmx_account_stop,
    htmx_accounts_dismiss, htmx_accounts_grid,
};
pub use page::{page_accounts, render_accounts_grid, ACCOUNTS_BASE};
