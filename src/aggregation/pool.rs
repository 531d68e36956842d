//! Bounded worker pool shared by every request.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Caps how many provider calls run at once across all requests.
///
/// Cloning shares the same permits. Once closed, [`WorkerPool::acquire`]
/// returns `None` for waiting and future callers.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    semaphore: Arc<Semaphore>,
    size: usize,
}

impl WorkerPool {
    pub const DEFAULT_SIZE: usize = 5;

    /// A pool with `size` permits (at least one).
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(size)),
            size,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Permits not currently held by a running task.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Wait for a free worker slot. The slot is released when the permit drops.
    pub async fn acquire(&self) -> Option<OwnedSemaphorePermit> {
        self.semaphore.clone().acquire_owned().await.ok()
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    pub fn close(&self) {
        self.semaphore.close();
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}
