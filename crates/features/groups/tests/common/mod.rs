#![allow(dead_code)]

use cargroup_event_bus::EventBus;
use cargroup_groups::model::Group;
use cargroup_groups::store::{GroupStore, MemoryStore};
use cargroup_groups::{GroupRegistry, GroupsError, MembershipPolicy, SeedingService};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};

pub const BRANDS: [&str; 8] =
    ["Tata", "Mahindra", "Kia", "Hyundai", "Honda", "Maruti", "Volkswagen", "Toyota"];

pub fn brands() -> Vec<String> {
    BRANDS.iter().map(|b| (*b).to_owned()).collect()
}

pub fn seeding<S: GroupStore>(
    store: S,
    timeout: Duration,
    events: &EventBus,
) -> (Arc<GroupRegistry<S>>, Arc<SeedingService<S>>) {
    let registry = Arc::new(GroupRegistry::new(store, timeout, events.clone()));
    let service = SeedingService::new(
        Arc::clone(&registry),
        brands(),
        MembershipPolicy::Derived,
        events.clone(),
    );
    (registry, Arc::new(service))
}

/// Accepts `budget` inserts, then fails every insert until healed.
#[derive(Debug)]
pub struct FlakyStore {
    inner: MemoryStore,
    budget: Arc<AtomicUsize>,
}

impl FlakyStore {
    pub fn new(budget: usize) -> (Self, Arc<AtomicUsize>) {
        let budget = Arc::new(AtomicUsize::new(budget));
        (Self { inner: MemoryStore::new(), budget: Arc::clone(&budget) }, budget)
    }
}

pub fn heal(budget: &AtomicUsize) {
    budget.store(usize::MAX, Ordering::SeqCst);
}

impl GroupStore for FlakyStore {
    async fn insert(&self, group: Group) -> Result<(), GroupsError> {
        let taken = self
            .budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1));
        if taken.is_err() {
            return Err(GroupsError::Persistence { message: "disk full".into(), context: None });
        }
        self.inner.insert(group).await
    }

    async fn get(&self, region: &str, brand: &str) -> Result<Option<Group>, GroupsError> {
        self.inner.get(region, brand).await
    }

    async fn list_region(&self, region: &str) -> Result<Vec<Group>, GroupsError> {
        self.inner.list_region(region).await
    }

    async fn list_all(&self) -> Result<Vec<Group>, GroupsError> {
        self.inner.list_all().await
    }

    async fn update<F>(&self, region: &str, brand: &str, apply: F) -> Result<Group, GroupsError>
    where
        F: FnOnce(&mut Group) -> Result<(), GroupsError> + Send,
    {
        self.inner.update(region, brand, apply).await
    }

    async fn len(&self) -> Result<usize, GroupsError> {
        self.inner.len().await
    }
}

/// Parks every insert until the gate opens; signals when the first insert arrives.
#[derive(Debug)]
pub struct Gate {
    pub entered: Notify,
    open: Semaphore,
}

impl Default for Gate {
    fn default() -> Self {
        Self { entered: Notify::new(), open: Semaphore::new(0) }
    }
}

impl Gate {
    pub fn open(&self) {
        self.open.add_permits(1);
    }
}

#[derive(Debug)]
pub struct GatedStore {
    inner: MemoryStore,
    gate: Arc<Gate>,
}

impl GatedStore {
    pub fn new() -> (Self, Arc<Gate>) {
        let gate = Arc::new(Gate::default());
        (Self { inner: MemoryStore::new(), gate: Arc::clone(&gate) }, gate)
    }
}

impl GroupStore for GatedStore {
    async fn insert(&self, group: Group) -> Result<(), GroupsError> {
        self.gate.entered.notify_one();
        let _permit = self.gate.open.acquire().await.map_err(|e| GroupsError::Internal {
            message: e.to_string().into(),
            context: None,
        })?;
        self.inner.insert(group).await
    }

    async fn get(&self, region: &str, brand: &str) -> Result<Option<Group>, GroupsError> {
        self.inner.get(region, brand).await
    }

    async fn list_region(&self, region: &str) -> Result<Vec<Group>, GroupsError> {
        self.inner.list_region(region).await
    }

    async fn list_all(&self) -> Result<Vec<Group>, GroupsError> {
        self.inner.list_all().await
    }

    async fn update<F>(&self, region: &str, brand: &str, apply: F) -> Result<Group, GroupsError>
    where
        F: FnOnce(&mut Group) -> Result<(), GroupsError> + Send,
    {
        self.inner.update(region, brand, apply).await
    }

    async fn len(&self) -> Result<usize, GroupsError> {
        self.inner.len().await
    }
}

/// Sleeps `delay` before every call.
#[derive(Debug, Default)]
pub struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self { inner: MemoryStore::new(), delay }
    }
}

impl GroupStore for SlowStore {
    async fn insert(&self, group: Group) -> Result<(), GroupsError> {
        tokio::time::sleep(self.delay).await;
        self.inner.insert(group).await
    }

    async fn get(&self, region: &str, brand: &str) -> Result<Option<Group>, GroupsError> {
        tokio::time::sleep(self.delay).await;
        self.inner.get(region, brand).await
    }

    async fn list_region(&self, region: &str) -> Result<Vec<Group>, GroupsError> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_region(region).await
    }

    async fn list_all(&self) -> Result<Vec<Group>, GroupsError> {
        tokio::time::sleep(self.delay).await;
        self.inner.list_all().await
    }

    async fn update<F>(&self, region: &str, brand: &str, apply: F) -> Result<Group, GroupsError>
    where
        F: FnOnce(&mut Group) -> Result<(), GroupsError> + Send,
    {
        tokio::time::sleep(self.delay).await;
        self.inner.update(region, brand, apply).await
    }

    async fn len(&self) -> Result<usize, GroupsError> {
        tokio::time::sleep(self.delay).await;
        self.inner.len().await
    }
}
