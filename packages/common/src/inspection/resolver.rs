use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use super::error::{LookupStage, PipelineError};
use super::store::{InspectionStore, StoreError};
use super::types::{CategoryId, CheckGroupTemplate, CheckItemTemplate, GroupTemplateId, TemplateSet};

/// Resolves the check-group and check-item templates for a set of categories.
pub struct TemplateResolver<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: InspectionStore + ?Sized> TemplateResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Group templates per category. Every requested category gets an entry,
    /// empty when it has no templates.
    pub async fn resolve_groups(
        &self,
        categories: &BTreeSet<CategoryId>,
    ) -> Result<BTreeMap<CategoryId, Vec<CheckGroupTemplate>>, StoreError> {
        let mut by_category: BTreeMap<CategoryId, Vec<CheckGroupTemplate>> =
            categories.iter().map(|&id| (id, Vec::new())).collect();

        let ids: Vec<CategoryId> = categories.iter().copied().collect();
        for chunk in ids.chunks(self.store.max_bind_params().max(1)) {
            for template in self.store.group_templates(chunk).await? {
                if let Some(templates) = by_category.get_mut(&template.category_id) {
                    templates.push(template);
                }
            }
        }

        Ok(by_category)
    }

    /// Item templates per group template, total over `groups`.
    pub async fn resolve_items(
        &self,
        groups: &BTreeSet<GroupTemplateId>,
    ) -> Result<BTreeMap<GroupTemplateId, Vec<CheckItemTemplate>>, StoreError> {
        let mut by_group: BTreeMap<GroupTemplateId, Vec<CheckItemTemplate>> =
            groups.iter().map(|&id| (id, Vec::new())).collect();

        let ids: Vec<GroupTemplateId> = groups.iter().copied().collect();
        for chunk in ids.chunks(self.store.max_bind_params().max(1)) {
            for template in self.store.item_templates(chunk).await? {
                if let Some(templates) = by_group.get_mut(&template.check_group_template_id) {
                    templates.push(template);
                }
            }
        }

        Ok(by_group)
    }

    /// Resolve both levels into one snapshot.
    pub async fn resolve(
        &self,
        categories: &BTreeSet<CategoryId>,
    ) -> Result<TemplateSet, PipelineError> {
        let groups = self
            .resolve_groups(categories)
            .await
            .map_err(PipelineError::lookup(LookupStage::GroupTemplates))?;

        let group_ids: BTreeSet<GroupTemplateId> =
            groups.values().flatten().map(|template| template.id).collect();

        let items = self
            .resolve_items(&group_ids)
            .await
            .map_err(PipelineError::lookup(LookupStage::ItemTemplates))?;

        debug!(
            categories = categories.len(),
            group_templates = group_ids.len(),
            item_templates = items.values().map(Vec::len).sum::<usize>(),
            "Resolved check templates"
        );

        Ok(TemplateSet::new(groups, items))
    }
}
