//! Scripted ports for exercising collections in tests

use async_trait::async_trait;
use ledgergrid_rpc::{ListPage, PortError, RemotePort, WireAccount};
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::oneshot;

pub fn wire_account(id: &str, number: &str) -> WireAccount {
    WireAccount {
        id: id.to_string(),
        number: number.to_string(),
        name: format!("Holder {number}"),
        ..WireAccount::default()
    }
}

pub fn account_page(ids: &[&str], total_count: u64) -> ListPage<WireAccount> {
    ListPage::new(
        ids.iter().map(|id| wire_account(id, &format!("N{id}"))).collect(),
        total_count,
    )
}

/// Answers calls immediately from queued results
pub struct QueuedPort<W> {
    lists: Mutex<VecDeque<Result<ListPage<W>, PortError>>>,
    creates: Mutex<VecDeque<Result<W, PortError>>>,
    list_calls: Mutex<Vec<(u32, u32)>>,
    create_calls: Mutex<Vec<W>>,
}

impl<W: Clone> QueuedPort<W> {
    pub fn new() -> Self {
        Self {
            lists: Mutex::new(VecDeque::new()),
            creates: Mutex::new(VecDeque::new()),
            list_calls: Mutex::new(Vec::new()),
            create_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_list(&self, result: Result<ListPage<W>, PortError>) {
        self.lists.lock().unwrap().push_back(result);
    }

    pub fn push_create(&self, result: Result<W, PortError>) {
        self.creates.lock().unwrap().push_back(result);
    }

    pub fn list_calls(&self) -> Vec<(u32, u32)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> Vec<W> {
        self.create_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl<W: Clone + Send + 'static> RemotePort<W> for QueuedPort<W> {
    async fn list(&self, page_number: u32, page_size: u32) -> Result<ListPage<W>, PortError> {
        self.list_calls.lock().unwrap().push((page_number, page_size));
        let next = self.lists.lock().unwrap().pop_front();
        next.unwrap_or(Err(PortError::EmptyResponse))
    }

    async fn create(&self, draft: W) -> Result<W, PortError> {
        self.create_calls.lock().unwrap().push(draft);
        let next = self.creates.lock().unwrap().pop_front();
        next.unwrap_or(Err(PortError::EmptyResponse))
    }
}

enum GatedCall<W> {
    List(oneshot::Sender<Result<ListPage<W>, PortError>>),
    Create(oneshot::Sender<Result<W, PortError>>),
}

/// Holds every call open until the test resolves it by index
pub struct GatedPort<W> {
    calls: Mutex<Vec<Option<GatedCall<W>>>>,
}

impl<W: Send + 'static> GatedPort<W> {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Yield until at least `count` calls have been issued
    pub async fn wait_for_calls(&self, count: usize) {
        while self.call_count() < count {
            tokio::task::yield_now().await;
        }
    }

    pub fn resolve_list(&self, index: usize, result: Result<ListPage<W>, PortError>) {
        let call = self.calls.lock().unwrap()[index].take();
        match call {
            Some(GatedCall::List(reply)) => {
                let _ = reply.send(result);
            }
            _ => panic!("call {index} is not an open list call"),
        }
    }

    pub fn resolve_create(&self, index: usize, result: Result<W, PortError>) {
        let call = self.calls.lock().unwrap()[index].take();
        match call {
            Some(GatedCall::Create(reply)) => {
                let _ = reply.send(result);
            }
            _ => panic!("call {index} is not an open create call"),
        }
    }
}

#[async_trait]
impl<W: Send + 'static> RemotePort<W> for GatedPort<W> {
    async fn list(&self, _page_number: u32, _page_size: u32) -> Result<ListPage<W>, PortError> {
        let (reply, response) = oneshot::channel();
        self.calls.lock().unwrap().push(Some(GatedCall::List(reply)));
        response.await.unwrap_or(Err(PortError::EmptyResponse))
    }

    async fn create(&self, _draft: W) -> Result<W, PortError> {
        let (reply, response) = oneshot::channel();
        self.calls.lock().unwrap().push(Some(GatedCall::Create(reply)));
        response.await.unwrap_or(Err(PortError::EmptyResponse))
    }
}
