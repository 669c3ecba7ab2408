use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CheckStatus;

pub type LocationId = i32;
pub type AssetId = i32;
pub type CategoryId = i32;
pub type GroupTemplateId = i32;

/// An asset found somewhere in a location closure, with the category of its product.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetDetail {
    pub id: AssetId,
    pub product_id: i32,
    pub category_id: CategoryId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckGroupTemplate {
    pub id: GroupTemplateId,
    pub name: String,
    pub category_id: CategoryId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckItemTemplate {
    pub id: i32,
    pub name: String,
    pub check_group_template_id: GroupTemplateId,
}

/// Row written to `AssetCheck`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewAssetCheck {
    pub asset_id: AssetId,
    pub owner: String,
    pub updated_at: DateTime<Utc>,
    pub status: CheckStatus,
}

/// Row written to `CheckGroup`. The name is copied from its template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCheckGroup {
    pub name: String,
    pub asset_check_id: i32,
    pub status: CheckStatus,
}

/// Row written to `CheckItems`. The name is copied from its template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCheckItem {
    pub name: String,
    pub check_group_id: i32,
    pub status: CheckStatus,
    pub updated_at: DateTime<Utc>,
}

/// Template hierarchy resolved once per run.
///
/// Both mappings are total over the keys they were resolved for, and lookups
/// for unknown keys yield an empty slice, so the writer never has to handle
/// absence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateSet {
    groups_by_category: BTreeMap<CategoryId, Vec<CheckGroupTemplate>>,
    items_by_group: BTreeMap<GroupTemplateId, Vec<CheckItemTemplate>>,
}

impl TemplateSet {
    pub fn new(
        groups_by_category: BTreeMap<CategoryId, Vec<CheckGroupTemplate>>,
        items_by_group: BTreeMap<GroupTemplateId, Vec<CheckItemTemplate>>,
    ) -> Self {
        Self {
            groups_by_category,
            items_by_group,
        }
    }

    pub fn groups_for(&self, category_id: CategoryId) -> &[CheckGroupTemplate] {
        self.groups_by_category
            .get(&category_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn items_for(&self, group_template_id: GroupTemplateId) -> &[CheckItemTemplate] {
        self.items_by_group
            .get(&group_template_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn groups_by_category(&self) -> &BTreeMap<CategoryId, Vec<CheckGroupTemplate>> {
        &self.groups_by_category
    }

    pub fn items_by_group(&self) -> &BTreeMap<GroupTemplateId, Vec<CheckItemTemplate>> {
        &self.items_by_group
    }

    /// Ids of every group template across all categories.
    pub fn group_template_ids(&self) -> BTreeSet<GroupTemplateId> {
        self.groups_by_category
            .values()
            .flatten()
            .map(|template| template.id)
            .collect()
    }
}

/// Counts reported by a successful run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PassOutcome {
    /// Locations in the closure, root included.
    #[schema(example = 4)]
    pub locations: usize,
    #[schema(example = 23)]
    pub assets: usize,
    /// Chunk transactions committed.
    #[schema(example = 3)]
    pub chunks: usize,
    pub asset_checks: usize,
    pub check_groups: usize,
    pub check_items: usize,
}
