//! A cloneable handle that serializes arena operations across threads.
//!
//! [`Arena`] itself is single-threaded. [`SharedArena`] puts it behind one
//! mutex so that every operation, including the multi-slot sweeps of
//! `restore` and `clear`, is observed all-or-nothing by other threads.

use std::sync::{Arc, Mutex, MutexGuard};

use slotarena_core::{ArenaError, BlockId, EventSink};

use crate::arena::Arena;
use crate::outcome::{Allocation, CheckpointOutcome, ClearReport, Freed, Grown, Restored};
use crate::snapshot::ArenaSnapshot;

/// Shared, mutex-serialized access to an [`Arena`].
pub struct SharedArena<S: EventSink> {
    inner: Arc<Mutex<Arena<S>>>,
}

// Compile-time assertion: SharedArena must be Send + Sync for a Send sink.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<SharedArena<slotarena_core::NullSink>>();
};

impl<S: EventSink> Clone for SharedArena<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EventSink> SharedArena<S> {
    /// Wrap an arena for shared use.
    pub fn new(arena: Arena<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(arena)),
        }
    }

    /// A sink that panics inside `restore` or `clear` leaves the sweep half
    /// applied, so poison is propagated rather than recovered.
    fn lock(&self) -> MutexGuard<'_, Arena<S>> {
        self.inner
            .lock()
            .unwrap_or_else(|_| panic!("arena lock poisoned: an operation panicked mid-way"))
    }

    /// Whether an earlier operation panicked while holding the lock.
    ///
    /// Every other method panics on a poisoned arena.
    pub fn is_poisoned(&self) -> bool {
        self.inner.is_poisoned()
    }

    /// Run several operations under a single lock acquisition.
    pub fn with<R>(&self, f: impl FnOnce(&mut Arena<S>) -> R) -> R {
        f(&mut self.lock())
    }

    /// See [`Arena::allocate`].
    pub fn allocate(&self, size: u32, has_finalizer: bool) -> Result<Allocation, ArenaError> {
        self.lock().allocate(size, has_finalizer)
    }

    /// See [`Arena::free`].
    pub fn free(&self, slot_index: usize) -> Result<Freed, ArenaError> {
        self.lock().free(slot_index)
    }

    /// See [`Arena::free_block`].
    pub fn free_block(&self, id: BlockId) -> Result<Freed, ArenaError> {
        self.lock().free_block(id)
    }

    /// See [`Arena::checkpoint`].
    pub fn checkpoint(&self) -> CheckpointOutcome {
        self.lock().checkpoint()
    }

    /// See [`Arena::restore`].
    pub fn restore(&self) -> Result<Restored, ArenaError> {
        self.lock().restore()
    }

    /// See [`Arena::reallocate_any_without_finalizer`].
    pub fn reallocate_any_without_finalizer(&self) -> Result<Grown, ArenaError> {
        self.lock().reallocate_any_without_finalizer()
    }

    /// See [`Arena::clear`].
    pub fn clear(&self) -> ClearReport {
        self.lock().clear()
    }

    /// See [`Arena::snapshot`].
    pub fn snapshot(&self) -> ArenaSnapshot {
        self.lock().snapshot()
    }

    /// Recover the arena if this is the last handle.
    ///
    /// Panics if the lock is poisoned.
    pub fn try_unwrap(self) -> Result<Arena<S>, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => Ok(mutex
                .into_inner()
                .unwrap_or_else(|_| panic!("arena lock poisoned: an operation panicked mid-way"))),
            Err(inner) => Err(Self { inner }),
        }
    }
}
