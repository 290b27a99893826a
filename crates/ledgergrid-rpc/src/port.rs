//! The record-storage boundary consumed by grid collections

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::PortError;
use crate::types::ListPage;

/// Shared port reference type
pub type PortRef<W> = Arc<dyn RemotePort<W>>;

/// Remote list/create operations for one record type.
///
/// Page numbers are 1-based. Each call is independent; a caller abandons a
/// call by dropping its future or ignoring the result.
#[async_trait]
pub trait RemotePort<W: Send + 'static>: Send + Sync {
    /// Fetch one page of records together with the server-side total
    async fn list(&self, page_number: u32, page_size: u32) -> Result<ListPage<W>, PortError>;

    /// Persist a draft and return it with its server-assigned id
    async fn create(&self, draft: W) -> Result<W, PortError>;
}
