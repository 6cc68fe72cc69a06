//! Thread-safe handle around a [`GraphEngine`].
//!
//! `build` clears and repopulates the snapshot in several steps, so a query
//! running alongside it could see a half-built graph. `SharedEngine` puts
//! the whole engine behind one mutex: a build and every query each hold the
//! lock for their full duration.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::Result;
use crate::graph::{BuildSummary, EngineState, GraphEngine};
use crate::store::RecordStore;
use crate::types::{Shelter, ShelterId};

/// Cloneable, lock-guarded engine handle.
pub struct SharedEngine<S> {
    inner: Arc<Mutex<GraphEngine<S>>>,
}

impl<S> Clone for SharedEngine<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: RecordStore> SharedEngine<S> {
    pub fn new(engine: GraphEngine<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Acquire the engine lock, recovering from a poisoned mutex.
    pub fn lock(&self) -> MutexGuard<'_, GraphEngine<S>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("Recovering from poisoned graph engine mutex");
                poisoned.into_inner()
            }
        }
    }

    pub fn build(&self, year: i32) -> Result<BuildSummary> {
        self.lock().build(year)
    }

    pub fn state(&self) -> EngineState {
        self.lock().state()
    }

    pub fn nodes(&self) -> Vec<Shelter> {
        self.lock().nodes().into_iter().cloned().collect()
    }

    pub fn degree(&self, shelter: &Shelter) -> usize {
        self.lock().degree(shelter)
    }

    pub fn component_count(&self) -> usize {
        self.lock().component_count()
    }

    pub fn reachable(&self, start: ShelterId) -> Vec<Shelter> {
        self.lock().reachable(start).into_iter().cloned().collect()
    }

    /// Run several queries against one consistent snapshot.
    pub fn with<R>(&self, f: impl FnOnce(&GraphEngine<S>) -> R) -> R {
        f(&self.lock())
    }
}
