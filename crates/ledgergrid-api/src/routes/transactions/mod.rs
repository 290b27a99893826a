//! Transaction routes for one account, under `/accounts/:number/transactions`

pub mod api;
pub mod page;

pub use api::{
    api_account_transactions, htmx_transaction_add, htmx_transaction_cancel, htmx_transaction_save,
    htmx_transaction_stop, htmx_transactions_dismiss, htmx_transactions_grid,
};
pub use page::{page_account_transactions, render_transactions_grid, transactions_base};
