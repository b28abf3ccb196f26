//! Copy-on-write snapshots shared by the bus, registry and chain.
//!
//! Structural mutation takes the write lock; readers clone the current `Arc`
//! and release the lock before doing any work. A handler may therefore call
//! back into the structure that is dispatching it without deadlocking, and an
//! in-flight dispatch never observes a mutation made while it runs.

use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
pub(crate) struct Snapshot<T> {
    current: RwLock<Arc<T>>,
}

impl<T: Clone> Snapshot<T> {
    /// The current contents, fixed at the moment of the call.
    pub(crate) fn load(&self) -> Arc<T> {
        // Every mutation is a single insert or remove, so a poisoned lock
        // still guards consistent data.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Mutate under the exclusive lock.
    ///
    /// Outstanding snapshots keep the old contents; `make_mut` only copies when
    /// one exists.
    pub(crate) fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        f(Arc::make_mut(&mut *guard))
    }
}
