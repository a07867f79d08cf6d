//! In-memory navigation history

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use super::Navigator;
use crate::params::UrlParams;

/// A [`Navigator`] that records every navigation.
///
/// Clones share the same history, so a test can keep one handle and give
/// the other to a controller.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Arc<Mutex<Vec<UrlParams>>>,
}

impl MemoryHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UrlParams>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of navigations so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been navigated to.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// The most recent parameters navigated to.
    pub fn current(&self) -> Option<UrlParams> {
        self.lock().last().cloned()
    }

    /// Every navigation, oldest first.
    pub fn entries(&self) -> Vec<UrlParams> {
        self.lock().clone()
    }
}

impl Navigator for MemoryHistory {
    fn navigate(&mut self, params: &UrlParams) {
        self.lock().push(params.clone());
    }
}
