use std::collections::{BTreeMap, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::trace;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{Color, Result};

/// Worker limit used by [`ColorCache::new`].
pub const DEFAULT_WORKERS: usize = 4;

/// Memoizes hex text → [`Color`] parsing.
///
/// Construct one and hand it to whatever converts many colors. Lookups take
/// the shared read lock and inserts take the write lock; entries are never
/// changed once inserted. Batch conversions run on a pool with a fixed
/// number of workers.
///
/// [`ColorCache::clear`] is a coarse reset. A batch running concurrently may
/// re-insert entries right after the clear returns.
pub struct ColorCache {
    entries: RwLock<HashMap<String, Color>>,
    pool: ThreadPool,
}

impl ColorCache {
    pub fn new() -> Result<Self> {
        Self::with_workers(DEFAULT_WORKERS)
    }

    pub fn with_workers(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("tonal-cache-{i}"))
            .build()?;
        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            pool,
        })
    }

    /// Parses `text` exactly as `text.parse::<Color>()` would, reusing an
    /// earlier result for the same text. Invalid input is never cached.
    pub fn parse(&self, text: &str) -> Result<Color> {
        if let Some(color) = self.read().get(text) {
            trace!("color cache hit for {text}");
            return Ok(*color);
        }

        trace!("color cache miss for {text}");
        let color: Color = text.parse()?;
        self.write().entry(text.to_owned()).or_insert(color);
        Ok(color)
    }

    /// Parses every entry on the worker pool. Results keep input order.
    pub fn parse_batch<S>(&self, texts: &[S]) -> Vec<Result<Color>>
    where
        S: AsRef<str> + Sync,
    {
        self.pool
            .install(|| texts.par_iter().map(|text| self.parse(text.as_ref())).collect())
    }

    /// Parses `(name, hex)` pairs into a name-keyed map. Fails with the
    /// first invalid entry in input order.
    pub fn parse_named<N, S>(&self, entries: &[(N, S)]) -> Result<BTreeMap<String, Color>>
    where
        N: AsRef<str> + Sync,
        S: AsRef<str> + Sync,
    {
        let texts: Vec<&str> = entries.iter().map(|(_, text)| text.as_ref()).collect();
        entries
            .iter()
            .zip(self.parse_batch(texts.as_slice()))
            .map(|((name, _), color)| Ok((name.as_ref().to_owned(), color?)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    // Entries are immutable once inserted, so a poisoned map is still valid.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Color>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Color>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}
