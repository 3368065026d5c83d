use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::domain::EntityId;

/// Category → linked sub-categories. Holds foreign keys only; existence of both ends is
/// checked by the owning `Taxonomy` before a link is added.
#[derive(Debug, Clone, Default)]
pub struct MappingStore {
    links: BTreeMap<EntityId, BTreeSet<EntityId>>,
}

/// Serializable snapshot of one category's links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryMapping {
    pub category_id: EntityId,
    pub subcategory_ids: BTreeSet<EntityId>,
}

impl MappingStore {
    pub fn from_links<I, S>(links: I) -> Self
    where
        I: IntoIterator<Item = (EntityId, S)>,
        S: IntoIterator<Item = EntityId>,
    {
        let mut store = Self::default();
        for (category, subcategories) in links {
            let set: BTreeSet<EntityId> = subcategories.into_iter().collect();
            if !set.is_empty() {
                store.links.insert(category, set);
            }
        }
        store
    }

    /// Never fails; unknown categories have no links.
    pub fn linked(&self, category: EntityId) -> BTreeSet<EntityId> {
        self.links.get(&category).cloned().unwrap_or_default()
    }

    pub fn is_linked(&self, category: EntityId, subcategory: EntityId) -> bool {
        self.links
            .get(&category)
            .is_some_and(|set| set.contains(&subcategory))
    }

    /// Flip the link and return the category's new set. Without a category context this is
    /// a no-op that returns the empty set.
    pub fn toggle_link(
        &mut self,
        category: Option<EntityId>,
        subcategory: EntityId,
    ) -> BTreeSet<EntityId> {
        let Some(category) = category else {
            return BTreeSet::new();
        };

        let set = self.links.entry(category).or_default();
        if !set.remove(&subcategory) {
            set.insert(subcategory);
        }

        let current = set.clone();
        if current.is_empty() {
            self.links.remove(&category);
        }
        current
    }

    /// Reverse lookup: every category whose set contains `subcategory`.
    pub fn categories_for(&self, subcategory: EntityId) -> BTreeSet<EntityId> {
        self.links
            .iter()
            .filter(|(_, set)| set.contains(&subcategory))
            .map(|(category, _)| *category)
            .collect()
    }

    /// Drop every link owned by `category`. Returns the sub-categories it was linked to.
    pub fn remove_category(&mut self, category: EntityId) -> BTreeSet<EntityId> {
        self.links.remove(&category).unwrap_or_default()
    }

    /// Drop `subcategory` from every category. Returns the categories that lost a link.
    pub fn unlink_subcategory(&mut self, subcategory: EntityId) -> BTreeSet<EntityId> {
        let affected = self.categories_for(subcategory);
        for category in &affected {
            if let Some(set) = self.links.get_mut(category) {
                set.remove(&subcategory);
                if set.is_empty() {
                    self.links.remove(category);
                }
            }
        }
        affected
    }

    pub fn mappings(&self) -> Vec<CategoryMapping> {
        self.links
            .iter()
            .map(|(category, set)| CategoryMapping {
                category_id: *category,
                subcategory_ids: set.clone(),
            })
            .collect()
    }
}
