use std::collections::BTreeSet;

use serde::Serialize;

use super::domain::{EntityId, LabelKind, Profession, ProfessionDraft, RecordKind};
use super::error::TaxonomyError;
use super::mapping::MappingStore;
use super::qualification::QualificationCatalog;
use super::store::{EntityStore, IdSequence};
use super::validation::validate_profession;

pub const UNKNOWN_LABEL: &str = "Unknown";

/// Everything a profession draft is checked against.
#[derive(Clone, Copy)]
pub struct ProfessionRefs<'a> {
    pub categories: &'a EntityStore,
    pub subcategories: &'a EntityStore,
    pub mapping: &'a MappingStore,
    pub qualifications: &'a dyn QualificationCatalog,
}

impl ProfessionRefs<'_> {
    /// Display label for a foreign key. Dangling ids degrade to "Unknown" instead of failing.
    pub fn resolve_label(&self, kind: LabelKind, id: EntityId) -> String {
        let resolved = match kind {
            LabelKind::Category => self.categories.get(id).map(|record| record.name.clone()),
            LabelKind::SubCategory => self.subcategories.get(id).map(|record| record.name.clone()),
            LabelKind::Qualification => self.qualifications.qualification_label(id),
        };
        resolved.unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }

    pub fn view(&self, profession: &Profession) -> ProfessionView {
        ProfessionView {
            category: self.resolve_label(LabelKind::Category, profession.category_id),
            subcategory: self.resolve_label(LabelKind::SubCategory, profession.subcategory_id),
            qualification: self.resolve_label(LabelKind::Qualification, profession.qualification_id),
            profession: profession.clone(),
        }
    }
}

/// Profession with category, sub-category and qualification labels resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfessionView {
    #[serde(flatten)]
    pub profession: Profession,
    pub category: String,
    pub subcategory: String,
    pub qualification: String,
}

impl ProfessionDraft {
    /// Choose a category. A previously chosen sub-category survives only if it is linked
    /// to the new category.
    pub fn select_category(&mut self, category: EntityId, mapping: &MappingStore) {
        self.category_id = Some(category);
        if let Some(subcategory) = self.subcategory_id {
            if !mapping.is_linked(category, subcategory) {
                self.subcategory_id = None;
            }
        }
    }

    /// Choose a sub-category. Refused (returns `false`, draft unchanged) unless it is
    /// linked to the selected category.
    pub fn select_subcategory(&mut self, subcategory: EntityId, mapping: &MappingStore) -> bool {
        let allowed = self
            .category_id
            .is_some_and(|category| mapping.is_linked(category, subcategory));
        if allowed {
            self.subcategory_id = Some(subcategory);
        }
        allowed
    }

    pub fn clear_category(&mut self) {
        self.category_id = None;
        self.subcategory_id = None;
    }

    /// Sub-categories the draft may currently pick from.
    pub fn selectable_subcategories(&self, mapping: &MappingStore) -> BTreeSet<EntityId> {
        self.category_id
            .map(|category| mapping.linked(category))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfessionStore {
    records: Vec<Profession>,
    sequence: IdSequence,
}

impl ProfessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Profession>) -> Self {
        let sequence = IdSequence::starting_after(records.iter().map(|record| record.id));
        Self { records, sequence }
    }

    pub fn records(&self) -> &[Profession] {
        &self.records
    }

    pub fn get(&self, id: EntityId) -> Option<&Profession> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Name-only, case-insensitive match.
    pub fn list(&self, filter: &str) -> Vec<&Profession> {
        let needle = filter.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn referencing(&self, kind: RecordKind, id: EntityId) -> impl Iterator<Item = &Profession> {
        self.records
            .iter()
            .filter(move |record| record.references(kind, id))
    }

    pub fn create(
        &mut self,
        draft: &ProfessionDraft,
        refs: &ProfessionRefs<'_>,
    ) -> Result<Profession, TaxonomyError> {
        let (category_id, subcategory_id, qualification_id) =
            validate_profession(draft, refs).map_err(TaxonomyError::Validation)?;

        let record = Profession {
            id: self.sequence.next_id(),
            name: draft.name.clone(),
            category_id,
            subcategory_id,
            qualification_id,
            is_active: true,
        };
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn update(
        &mut self,
        id: EntityId,
        draft: &ProfessionDraft,
        refs: &ProfessionRefs<'_>,
    ) -> Result<Profession, TaxonomyError> {
        let index = self.position(id)?;
        let (category_id, subcategory_id, qualification_id) =
            validate_profession(draft, refs).map_err(TaxonomyError::Validation)?;

        let record = &mut self.records[index];
        record.name = draft.name.clone();
        record.category_id = category_id;
        record.subcategory_id = subcategory_id;
        record.qualification_id = qualification_id;
        Ok(record.clone())
    }

    pub fn remove(&mut self, id: EntityId) -> Result<Profession, TaxonomyError> {
        let index = self.position(id)?;
        Ok(self.records.remove(index))
    }

    pub fn toggle_active(&mut self, id: EntityId) -> Result<Profession, TaxonomyError> {
        let index = self.position(id)?;
        let record = &mut self.records[index];
        record.is_active = !record.is_active;
        Ok(record.clone())
    }

    fn position(&self, id: EntityId) -> Result<usize, TaxonomyError> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(TaxonomyError::NotFound {
                kind: RecordKind::Profession,
                id,
            })
    }
}
