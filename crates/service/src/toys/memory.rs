use std::sync::Arc;

use async_trait::async_trait;
use configs::IdStrategy;
use tokio::sync::RwLock;
use tracing::debug;

use super::domain::{seed_toys, Toy, ToyFields};
use super::repository::ToyRepository;
use crate::errors::ServiceError;

struct ToyTable {
    toys: Vec<Toy>,
    // only read under `IdStrategy::Monotonic`
    next_id: u64,
}

impl ToyTable {
    fn assign_id(&mut self, strategy: IdStrategy) -> u64 {
        match strategy {
            IdStrategy::Monotonic => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
            IdStrategy::Count => self.toys.len() as u64 + 1,
        }
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.toys.iter().position(|t| t.id == id)
    }
}

/// Process-lifetime toy collection guarded by a single `RwLock`.
///
/// Every read-modify-write (create, update, delete) happens under one write
/// guard, so id assignment and the append it feeds cannot interleave.
pub struct InMemoryToyStore {
    inner: RwLock<ToyTable>,
    strategy: IdStrategy,
}

impl InMemoryToyStore {
    /// Empty store.
    pub fn new(strategy: IdStrategy) -> Arc<Self> {
        Self::with_toys(Vec::new(), strategy)
    }

    /// Store preloaded with the two seed records.
    pub fn seeded(strategy: IdStrategy) -> Arc<Self> {
        Self::with_toys(seed_toys(), strategy)
    }

    pub fn with_toys(toys: Vec<Toy>, strategy: IdStrategy) -> Arc<Self> {
        let next_id = toys.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Arc::new(Self { inner: RwLock::new(ToyTable { toys, next_id }), strategy })
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.toys.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ToyRepository for InMemoryToyStore {
    async fn list(&self) -> Vec<Toy> {
        self.inner.read().await.toys.clone()
    }

    async fn create(&self, fields: ToyFields) -> Toy {
        let mut table = self.inner.write().await;
        let id = table.assign_id(self.strategy);
        let toy = Toy::new(id, fields);
        table.toys.push(toy.clone());
        debug!(toy_id = id, total = table.toys.len(), "toy created");
        toy
    }

    async fn update(&self, id: u64, patch: ToyFields) -> Result<Toy, ServiceError> {
        let mut table = self.inner.write().await;
        let idx = table.position(id).ok_or_else(|| ServiceError::not_found("toy"))?;
        let toy = &mut table.toys[idx];
        toy.merge(patch);
        Ok(toy.clone())
    }

    async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let mut table = self.inner.write().await;
        let idx = table.position(id).ok_or_else(|| ServiceError::not_found("toy"))?;
        table.toys.remove(idx);
        debug!(toy_id = id, total = table.toys.len(), "toy deleted");
        Ok(())
    }
}
