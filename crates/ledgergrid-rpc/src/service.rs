//! In-process ledger service
//!
//! Stores accounts and transactions in memory and answers the same
//! list/create calls a remote record-storage service would, including its
//! validation rules and status codes.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::PortError;
use crate::port::RemotePort;
use crate::types::{
    ListPage, WireAccount, WireTransaction, TRANSACTION_TYPE_DEPOSIT, TRANSACTION_TYPE_WITHDRAWAL,
};

/// In-memory record data
#[derive(Debug, Default)]
struct LedgerStore {
    accounts: Vec<WireAccount>,
    transactions: Vec<WireTransaction>,
}

/// Shared handle to the in-process ledger
#[derive(Debug, Clone, Default)]
pub struct LedgerService {
    store: Arc<RwLock<LedgerStore>>,
}

impl LedgerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// List accounts, newest last
    pub async fn list_accounts(
        &self,
        page_size: u32,
        page_number: u32,
    ) -> Result<ListPage<WireAccount>, PortError> {
        let store = self.store.read().await;
        paginate(&store.accounts, page_size, page_number)
    }

    /// List the transactions of one account
    pub async fn list_transactions(
        &self,
        account_number: &str,
        page_size: u32,
        page_number: u32,
    ) -> Result<ListPage<WireTransaction>, PortError> {
        let store = self.store.read().await;
        let matching: Vec<WireTransaction> = store
            .transactions
            .iter()
            .filter(|t| t.account_number == account_number)
            .cloned()
            .collect();
        paginate(&matching, page_size, page_number)
    }

    /// Whether an account with this number is stored
    pub async fn account_exists(&self, account_number: &str) -> bool {
        let store = self.store.read().await;
        store.accounts.iter().any(|a| a.number == account_number)
    }

    /// Add an account and return its id
    pub async fn create_account(&self, account: WireAccount) -> Result<String, PortError> {
        validate_account(&account)?;

        let mut store = self.store.write().await;
        if store.accounts.iter().any(|a| a.number == account.number) {
            return Err(PortError::already_exists("`Account Number` already exists"));
        }

        let id = new_document_id();
        store.accounts.push(WireAccount {
            id: id.clone(),
            ..account
        });
        log::info!(target: "ledgergrid::service", "account created: {}", id);
        Ok(id)
    }

    /// Add a transaction and return its id
    pub async fn create_transaction(&self, transaction: WireTransaction) -> Result<String, PortError> {
        validate_transaction(&transaction)?;

        let mut store = self.store.write().await;
        let id = new_document_id();
        store.transactions.push(WireTransaction {
            id: id.clone(),
            ..transaction
        });
        log::info!(target: "ledgergrid::service", "transaction created: {}", id);
        Ok(id)
    }

    /// Port over the account collection
    pub fn accounts_port(&self) -> AccountsPort {
        AccountsPort {
            service: self.clone(),
        }
    }

    /// Port over the transactions of one account
    pub fn transactions_port(&self, account_number: impl Into<String>) -> TransactionsPort {
        TransactionsPort {
            service: self.clone(),
            account_number: account_number.into(),
        }
    }
}

fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn paginate<W: Clone>(items: &[W], page_size: u32, page_number: u32) -> Result<ListPage<W>, PortError> {
    if page_number == 0 {
        return Err(PortError::invalid_argument("invalid input: page number must be positive"));
    }
    if page_size == 0 {
        return Err(PortError::invalid_argument("invalid input: page size must be positive"));
    }

    let offset = (page_number as usize - 1).saturating_mul(page_size as usize);
    let page = items
        .iter()
        .skip(offset)
        .take(page_size as usize)
        .cloned()
        .collect();
    Ok(ListPage::new(page, items.len() as u64))
}

fn validate_account(account: &WireAccount) -> Result<(), PortError> {
    if account.number.is_empty() {
        return Err(PortError::invalid_argument("invalid input: number is empty"));
    }
    if account.name.is_empty() {
        return Err(PortError::invalid_argument("invalid input: name is empty"));
    }
    Ok(())
}

fn validate_transaction(transaction: &WireTransaction) -> Result<(), PortError> {
    if transaction.account_number.is_empty() {
        return Err(PortError::invalid_argument("invalid input: account number is empty"));
    }
    if transaction.amount == 0 {
        return Err(PortError::invalid_argument("invalid input: amount is empty"));
    }
    if transaction.kind != TRANSACTION_TYPE_DEPOSIT && transaction.kind != TRANSACTION_TYPE_WITHDRAWAL {
        return Err(PortError::invalid_argument("invalid input: type is empty"));
    }
    Ok(())
}

/// `RemotePort` over the account collection
#[derive(Debug, Clone)]
pub struct AccountsPort {
    service: LedgerService,
}

#[async_trait]
impl RemotePort<WireAccount> for AccountsPort {
    async fn list(&self, page_number: u32, page_size: u32) -> Result<ListPage<WireAccount>, PortError> {
        self.service.list_accounts(page_size, page_number).await
    }

    async fn create(&self, draft: WireAccount) -> Result<WireAccount, PortError> {
        let id = self.service.create_account(draft.clone()).await?;
        Ok(WireAccount { id, ..draft })
    }
}

/// `RemotePort` over the transactions of a single account
#[derive(Debug, Clone)]
pub struct TransactionsPort {
    service: LedgerService,
    account_number: String,
}

impl TransactionsPort {
    pub fn account_number(&self) -> &str {
        &self.account_number
    }
}

#[async_trait]
impl RemotePort<WireTransaction> for TransactionsPort {
    async fn list(&self, page_number: u32, page_size: u32) -> Result<ListPage<WireTransaction>, PortError> {
        self.service
            .list_transactions(&self.account_number, page_size, page_number)
            .await
    }

    async fn create(&self, draft: WireTransaction) -> Result<WireTransaction, PortError> {
        let id = self.service.create_transaction(draft.clone()).await?;
        Ok(WireTransaction { id, ..draft })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StatusCode;

    fn account(number: &str, name: &str) -> WireAccount {
        WireAccount {
            number: number.to_string(),
            name: name.to_string(),
            ..WireAccount::default()
        }
    }

    fn deposit(account_number: &str, amount: i64) -> WireTransaction {
        WireTransaction {
            account_number: account_number.to_string(),
            amount,
            kind: TRANSACTION_TYPE_DEPOSIT,
            ..WireTransaction::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let service = LedgerService::new();
        let port = service.accounts_port();

        let created = port.create(account("A1", "Alice")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.number, "A1");

        let page = port.list(1, 10).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items, vec![created]);
    }

    #[tokio::test]
    async fn test_account_validation() {
        let service = LedgerService::new();

        let err = service.create_account(account("", "Alice")).await.unwrap_err();
        assert_eq!(err.message(), "invalid input: number is empty");
        assert_eq!(err.status(), StatusCode::InvalidArgument.as_u32());

        let err = service.create_account(account("A1", "")).await.unwrap_err();
        assert_eq!(err.message(), "invalid input: name is empty");
    }

    #[tokio::test]
    async fn test_duplicate_account_number() {
        let service = LedgerService::new();
        service.create_account(account("A1", "Alice")).await.unwrap();

        let err = service.create_account(account("A1", "Bob")).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::AlreadyExists.as_u32());
        assert_eq!(err.message(), "`Account Number` already exists");
    }

    #[tokio::test]
    async fn test_account_exists() {
        let service = LedgerService::new();
        assert!(!service.account_exists("A1").await);
        service.create_account(account("A1", "Alice")).await.unwrap();
        assert!(service.account_exists("A1").await);
        assert!(!service.account_exists("a1").await);
    }

    #[tokio::test]
    async fn test_pagination_and_total() {
        let service = LedgerService::new();
        for i in 0..25 {
            service
                .create_account(account(&format!("A{i}"), "Holder"))
                .await
                .unwrap();
        }

        let page = service.list_accounts(10, 3).await.unwrap();
        assert_eq!(page.total_count, 25);
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].number, "A20");

        let beyond = service.list_accounts(10, 4).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 25);

        assert!(service.list_accounts(10, 0).await.is_err());
        assert!(service.list_accounts(0, 1).await.is_err());
    }

    #[tokio::test]
    async fn test_transactions_scoped_by_account() {
        let service = LedgerService::new();
        let port_a = service.transactions_port("A1");
        let port_b = service.transactions_port("B1");

        port_a.create(deposit("A1", 100)).await.unwrap();
        port_a.create(deposit("A1", 250)).await.unwrap();
        port_b.create(deposit("B1", 50)).await.unwrap();

        let page = port_a.list(1, 10).await.unwrap();
        assert_eq!(page.total_count, 2);
        assert!(page.items.iter().all(|t| t.account_number == "A1"));
        assert_eq!(port_b.list(1, 10).await.unwrap().total_count, 1);
    }

    #[tokio::test]
    async fn test_transaction_validation() {
        let service = LedgerService::new();

        let err = service.create_transaction(deposit("A1", 0)).await.unwrap_err();
        assert_eq!(err.message(), "invalid input: amount is empty");

        let err = service.create_transaction(deposit("", 10)).await.unwrap_err();
        assert_eq!(err.message(), "invalid input: account number is empty");

        let mut unknown = deposit("A1", 10);
        unknown.kind = 7;
        let err = service.create_transaction(unknown).await.unwrap_err();
        assert_eq!(err.message(), "invalid input: type is empty");
    }
}
