//! In-memory [`FeiraLivreRepository`] for tests, with failure injection

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::Utc;

use super::FeiraLivreRepository;
use crate::models::{FeiraLivre, FeiraLivreData, FeiraLivreFilter, Pagination, StoredFeiraLivre};

#[derive(Debug)]
struct State {
    rows: BTreeMap<i64, StoredFeiraLivre>,
    next_id: i64,
}

#[derive(Debug)]
pub struct InMemoryRepository {
    state: Mutex<State>,
    failing_ids: HashSet<i64>,
    sync_failure: Option<String>,
    fail_everything: bool,
    panic_on_upsert: bool,
    upsert_calls: AtomicUsize,
    sync_calls: AtomicUsize,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self {
            state: Mutex::new(State {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
            failing_ids: HashSet::new(),
            sync_failure: None,
            fail_everything: false,
            panic_on_upsert: false,
            upsert_calls: AtomicUsize::new(0),
            sync_calls: AtomicUsize::new(0),
        }
    }
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts of these ids fail
    pub fn failing_ids(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.failing_ids.extend(ids);
        self
    }

    /// `sync_sequence` fails with `message`
    pub fn failing_sync(mut self, message: &str) -> Self {
        self.sync_failure = Some(message.to_string());
        self
    }

    /// Every operation fails, as if the store were unreachable
    pub fn unavailable(mut self) -> Self {
        self.fail_everything = true;
        self
    }

    /// Every upsert panics, taking its calling task down
    pub fn panicking(mut self) -> Self {
        self.panic_on_upsert = true;
        self
    }

    pub fn with_rows(self, feiras: impl IntoIterator<Item = FeiraLivre>) -> Self {
        {
            let mut state = self.lock();
            let now = Utc::now();
            for feira in feiras {
                state.rows.insert(
                    feira.id,
                    StoredFeiraLivre {
                        feira,
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }
        self
    }

    pub fn rows(&self) -> Vec<StoredFeiraLivre> {
        self.lock().rows.values().cloned().collect()
    }

    pub fn row(&self, id: i64) -> Option<StoredFeiraLivre> {
        self.lock().rows.get(&id).cloned()
    }

    pub fn next_id(&self) -> i64 {
        self.lock().next_id
    }

    pub fn upsert_calls(&self) -> usize {
        self.upsert_calls.load(Ordering::SeqCst)
    }

    pub fn sync_calls(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    #[allow(clippy::unwrap_used)]
    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn check_available(&self) -> Result<()> {
        if self.fail_everything {
            bail!("connection refused");
        }
        Ok(())
    }
}

#[async_trait]
impl FeiraLivreRepository for InMemoryRepository {
    async fn get_by_id(&self, id: i64) -> Result<Option<StoredFeiraLivre>> {
        self.check_available()?;
        Ok(self.row(id))
    }

    async fn list(
        &self,
        filter: &FeiraLivreFilter,
        pagination: Pagination,
    ) -> Result<Vec<StoredFeiraLivre>> {
        self.check_available()?;
        Ok(self
            .lock()
            .rows
            .values()
            .filter(|row| filter.matches(&row.feira.data))
            .skip(pagination.offset.max(0) as usize)
            .take(pagination.limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn create(&self, data: &FeiraLivreData) -> Result<StoredFeiraLivre> {
        self.check_available()?;
        let mut state = self.lock();
        let id = state.next_id;
        if state.rows.contains_key(&id) {
            bail!("duplicate key value violates unique constraint \"feiras_livres_pkey\"");
        }
        state.next_id += 1;

        let now = Utc::now();
        let stored = StoredFeiraLivre {
            feira: FeiraLivre::new(id, data.clone()),
            created_at: now,
            updated_at: now,
        };
        state.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn create_or_update(&self, feira: &FeiraLivre) -> Result<StoredFeiraLivre> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        if self.panic_on_upsert {
            panic!("injected panic for id {}", feira.id);
        }
        self.check_available()?;
        if self.failing_ids.contains(&feira.id) {
            return Err(anyhow!("injected failure for id {}", feira.id));
        }

        let mut state = self.lock();
        let now = Utc::now();
        let created_at = state.rows.get(&feira.id).map_or(now, |row| row.created_at);
        let stored = StoredFeiraLivre {
            feira: feira.clone(),
            created_at,
            updated_at: now,
        };
        state.rows.insert(feira.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, feira: &FeiraLivre) -> Result<Option<StoredFeiraLivre>> {
        self.check_available()?;
        let mut state = self.lock();
        Ok(state.rows.get_mut(&feira.id).map(|row| {
            row.feira = feira.clone();
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn remove(&self, id: i64) -> Result<bool> {
        self.check_available()?;
        Ok(self.lock().rows.remove(&id).is_some())
    }

    async fn sync_sequence(&self) -> Result<i64> {
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if let Some(message) = &self.sync_failure {
            bail!("{message}");
        }
        let mut state = self.lock();
        state.next_id = state.rows.keys().next_back().map_or(1, |max| max + 1);
        Ok(state.next_id)
    }

    async fn ping(&self) -> Result<()> {
        self.check_available()
    }
}
