//! In-memory [`InspectionStore`] for tests and local runs.
//!
//! Transactions stage their rows and publish them on commit, so a dropped or
//! rolled-back transaction leaves nothing behind. Generated ids come from
//! per-table counters and are never reused, matching auto-increment columns.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::store::{ChunkTransaction, DEFAULT_MAX_BIND_PARAMS, InspectionStore, StoreError};
use super::types::{
    AssetDetail, AssetId, CategoryId, CheckGroupTemplate, CheckItemTemplate, GroupTemplateId,
    LocationId, NewAssetCheck, NewCheckGroup, NewCheckItem,
};

/// A written row together with its generated id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stored<T> {
    pub id: i32,
    pub row: T,
}

#[derive(Default)]
struct Tables {
    locations: Vec<(LocationId, Option<LocationId>)>,
    assets: Vec<(AssetDetail, LocationId)>,
    group_templates: Vec<CheckGroupTemplate>,
    item_templates: Vec<CheckItemTemplate>,

    asset_checks: Vec<Stored<NewAssetCheck>>,
    check_groups: Vec<Stored<NewCheckGroup>>,
    check_items: Vec<Stored<NewCheckItem>>,
    next_asset_check_id: i32,
    next_check_group_id: i32,
    next_check_item_id: i32,

    inserts: usize,
    fail_insert_at: Option<usize>,
    commit_attempts: usize,
    fail_commit_at: Option<usize>,
    fail_lookups: bool,
    lookups: usize,
    begun: usize,
    committed: usize,
    rolled_back: usize,
    committed_chunk_sizes: Vec<usize>,
}

impl Tables {
    fn lookup(&mut self) -> Result<(), StoreError> {
        self.lookups += 1;
        if self.fail_lookups {
            return Err(StoreError::Database("lookup failed".into()));
        }
        Ok(())
    }

    fn next_insert(&mut self) -> Result<(), StoreError> {
        self.inserts += 1;
        if self.fail_insert_at == Some(self.inserts) {
            return Err(StoreError::Rejected(format!(
                "insert #{} rejected",
                self.inserts
            )));
        }
        Ok(())
    }
}

fn next_id(counter: &mut i32) -> i32 {
    *counter += 1;
    *counter
}

/// Store backed by plain vectors behind a mutex.
#[derive(Clone)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
    max_bind_params: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(Mutex::new(Tables::default())),
            max_bind_params: DEFAULT_MAX_BIND_PARAMS,
        }
    }

    pub fn with_max_bind_params(mut self, limit: usize) -> Self {
        self.max_bind_params = limit;
        self
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        lock(&self.tables)
    }

    pub fn add_location(&self, id: LocationId, parent_id: Option<LocationId>) {
        self.tables().locations.push((id, parent_id));
    }

    pub fn add_asset(
        &self,
        id: AssetId,
        product_id: i32,
        category_id: CategoryId,
        location_id: LocationId,
    ) {
        self.tables().assets.push((
            AssetDetail {
                id,
                product_id,
                category_id,
            },
            location_id,
        ));
    }

    pub fn add_group_template(&self, id: GroupTemplateId, name: &str, category_id: CategoryId) {
        self.tables().group_templates.push(CheckGroupTemplate {
            id,
            name: name.to_string(),
            category_id,
        });
    }

    pub fn add_item_template(&self, id: i32, name: &str, check_group_template_id: GroupTemplateId) {
        self.tables().item_templates.push(CheckItemTemplate {
            id,
            name: name.to_string(),
            check_group_template_id,
        });
    }

    /// Make the n-th insert (1-based, counted over the store's lifetime) fail.
    pub fn fail_insert_at(&self, n: usize) {
        self.tables().fail_insert_at = Some(n);
    }

    /// Make the n-th commit (1-based) fail. Its rows are discarded.
    pub fn fail_commit_at(&self, n: usize) {
        self.tables().fail_commit_at = Some(n);
    }

    /// Make every subsequent lookup fail.
    pub fn fail_lookups(&self) {
        self.tables().fail_lookups = true;
    }

    pub fn asset_checks(&self) -> Vec<Stored<NewAssetCheck>> {
        self.tables().asset_checks.clone()
    }

    pub fn check_groups(&self) -> Vec<Stored<NewCheckGroup>> {
        self.tables().check_groups.clone()
    }

    pub fn check_items(&self) -> Vec<Stored<NewCheckItem>> {
        self.tables().check_items.clone()
    }

    /// Number of lookup calls made so far.
    pub fn lookups(&self) -> usize {
        self.tables().lookups
    }

    pub fn transactions_begun(&self) -> usize {
        self.tables().begun
    }

    pub fn transactions_committed(&self) -> usize {
        self.tables().committed
    }

    /// Explicit rollbacks plus transactions dropped without commit.
    pub fn transactions_rolled_back(&self) -> usize {
        self.tables().rolled_back
    }

    /// Asset checks written by each committed transaction, in commit order.
    pub fn committed_chunk_sizes(&self) -> Vec<usize> {
        self.tables().committed_chunk_sizes.clone()
    }
}

fn lock(tables: &Mutex<Tables>) -> MutexGuard<'_, Tables> {
    tables.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl InspectionStore for MemoryStore {
    async fn child_locations(
        &self,
        parents: &[LocationId],
    ) -> Result<Vec<LocationId>, StoreError> {
        let mut tables = self.tables();
        tables.lookup()?;
        Ok(tables
            .locations
            .iter()
            .filter(|(_, parent)| parent.is_some_and(|p| parents.contains(&p)))
            .map(|(id, _)| *id)
            .collect())
    }

    async fn assets_at(&self, locations: &[LocationId]) -> Result<Vec<AssetDetail>, StoreError> {
        let mut tables = self.tables();
        tables.lookup()?;
        Ok(tables
            .assets
            .iter()
            .filter(|(_, location)| locations.contains(location))
            .map(|(asset, _)| asset.clone())
            .collect())
    }

    async fn group_templates(
        &self,
        categories: &[CategoryId],
    ) -> Result<Vec<CheckGroupTemplate>, StoreError> {
        let mut tables = self.tables();
        tables.lookup()?;
        Ok(tables
            .group_templates
            .iter()
            .filter(|template| categories.contains(&template.category_id))
            .cloned()
            .collect())
    }

    async fn item_templates(
        &self,
        groups: &[GroupTemplateId],
    ) -> Result<Vec<CheckItemTemplate>, StoreError> {
        let mut tables = self.tables();
        tables.lookup()?;
        Ok(tables
            .item_templates
            .iter()
            .filter(|template| groups.contains(&template.check_group_template_id))
            .cloned()
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn ChunkTransaction>, StoreError> {
        self.tables().begun += 1;
        Ok(Box::new(MemoryTransaction {
            tables: Arc::clone(&self.tables),
            asset_checks: Vec::new(),
            check_groups: Vec::new(),
            check_items: Vec::new(),
            finished: false,
        }))
    }

    fn max_bind_params(&self) -> usize {
        self.max_bind_params
    }
}

/// Rows staged by one transaction.
struct MemoryTransaction {
    tables: Arc<Mutex<Tables>>,
    asset_checks: Vec<Stored<NewAssetCheck>>,
    check_groups: Vec<Stored<NewCheckGroup>>,
    check_items: Vec<Stored<NewCheckItem>>,
    finished: bool,
}

#[async_trait]
impl ChunkTransaction for MemoryTransaction {
    async fn insert_asset_check(&mut self, row: NewAssetCheck) -> Result<i32, StoreError> {
        let id = {
            let mut tables = lock(&self.tables);
            tables.next_insert()?;
            next_id(&mut tables.next_asset_check_id)
        };
        self.asset_checks.push(Stored { id, row });
        Ok(id)
    }

    async fn insert_check_group(&mut self, row: NewCheckGroup) -> Result<i32, StoreError> {
        let id = {
            let mut tables = lock(&self.tables);
            tables.next_insert()?;
            next_id(&mut tables.next_check_group_id)
        };
        self.check_groups.push(Stored { id, row });
        Ok(id)
    }

    async fn insert_check_item(&mut self, row: NewCheckItem) -> Result<i32, StoreError> {
        let id = {
            let mut tables = lock(&self.tables);
            tables.next_insert()?;
            next_id(&mut tables.next_check_item_id)
        };
        self.check_items.push(Stored { id, row });
        Ok(id)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let mut this = *self;
        this.finished = true;
        let mut tables = lock(&this.tables);
        tables.commit_attempts += 1;
        if tables.fail_commit_at == Some(tables.commit_attempts) {
            tables.rolled_back += 1;
            return Err(StoreError::Database(format!(
                "commit #{} failed",
                tables.commit_attempts
            )));
        }
        tables.committed += 1;
        tables.committed_chunk_sizes.push(this.asset_checks.len());
        tables.asset_checks.append(&mut this.asset_checks);
        tables.check_groups.append(&mut this.check_groups);
        tables.check_items.append(&mut this.check_items);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        let mut this = *self;
        this.finished = true;
        lock(&this.tables).rolled_back += 1;
        Ok(())
    }
}

impl Drop for MemoryTransaction {
    fn drop(&mut self) {
        if !self.finished {
            lock(&self.tables).rolled_back += 1;
        }
    }
}
