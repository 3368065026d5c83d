use std::collections::BTreeSet;

use super::domain::{
    Dimension, EntityId, LabelKind, NamedEntity, NamedEntityDraft, Profession, ProfessionDraft,
    Qualification, QualificationDraft, RecordKind,
};
use super::error::TaxonomyError;
use super::mapping::MappingStore;
use super::profession::{ProfessionRefs, ProfessionStore, ProfessionView};
use super::qualification::{QualificationLabels, QualificationRefs, QualificationStore, QualificationView};
use super::seed;
use super::store::EntityStore;

/// Every store of the taxonomy, plus the rules that span more than one of them.
///
/// Deleting a category or sub-category removes its mapping links. Deleting any record that
/// a profession or qualification still points at is refused with `InUse`, and so is
/// unlinking a category/sub-category pair a profession uses.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: EntityStore,
    subcategories: EntityStore,
    degree_types: EntityStore,
    degrees: EntityStore,
    specialisations: EntityStore,
    qualifications: QualificationStore,
    mapping: MappingStore,
    professions: ProfessionStore,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::empty()
    }
}

impl Taxonomy {
    pub fn empty() -> Self {
        Self {
            categories: EntityStore::new(Dimension::Category),
            subcategories: EntityStore::new(Dimension::SubCategory),
            degree_types: EntityStore::new(Dimension::DegreeType),
            degrees: EntityStore::new(Dimension::Degree),
            specialisations: EntityStore::new(Dimension::Specialisation),
            qualifications: QualificationStore::new(),
            mapping: MappingStore::default(),
            professions: ProfessionStore::new(),
        }
    }

    pub fn seeded() -> Self {
        Self {
            categories: EntityStore::with_records(Dimension::Category, seed::categories()),
            subcategories: EntityStore::with_records(Dimension::SubCategory, seed::subcategories()),
            degree_types: EntityStore::with_records(Dimension::DegreeType, seed::degree_types()),
            degrees: EntityStore::with_records(Dimension::Degree, seed::degrees()),
            specialisations: EntityStore::with_records(
                Dimension::Specialisation,
                seed::specialisations(),
            ),
            qualifications: QualificationStore::with_records(seed::qualifications()),
            mapping: seed::mapping(),
            professions: ProfessionStore::with_records(seed::professions()),
        }
    }

    pub fn store(&self, dimension: Dimension) -> &EntityStore {
        match dimension {
            Dimension::Category => &self.categories,
            Dimension::SubCategory => &self.subcategories,
            Dimension::DegreeType => &self.degree_types,
            Dimension::Degree => &self.degrees,
            Dimension::Specialisation => &self.specialisations,
        }
    }

    fn store_mut(&mut self, dimension: Dimension) -> &mut EntityStore {
        match dimension {
            Dimension::Category => &mut self.categories,
            Dimension::SubCategory => &mut self.subcategories,
            Dimension::DegreeType => &mut self.degree_types,
            Dimension::Degree => &mut self.degrees,
            Dimension::Specialisation => &mut self.specialisations,
        }
    }

    pub fn mapping(&self) -> &MappingStore {
        &self.mapping
    }

    pub fn qualifications(&self) -> &QualificationStore {
        &self.qualifications
    }

    pub fn professions(&self) -> &ProfessionStore {
        &self.professions
    }

    pub fn qualification_refs(&self) -> QualificationRefs<'_> {
        QualificationRefs {
            degree_types: &self.degree_types,
            degrees: &self.degrees,
            specialisations: &self.specialisations,
        }
    }

    // ---- named entities -------------------------------------------------------------

    pub fn list_entities(&self, dimension: Dimension, filter: &str) -> Vec<&NamedEntity> {
        self.store(dimension).list(filter)
    }

    pub fn get_entity(&self, dimension: Dimension, id: EntityId) -> Result<&NamedEntity, TaxonomyError> {
        self.store(dimension)
            .get(id)
            .ok_or(TaxonomyError::NotFound {
                kind: dimension.kind(),
                id,
            })
    }

    pub fn create_entity(
        &mut self,
        dimension: Dimension,
        draft: &NamedEntityDraft,
    ) -> Result<NamedEntity, TaxonomyError> {
        self.store_mut(dimension).create(draft)
    }

    pub fn update_entity(
        &mut self,
        dimension: Dimension,
        id: EntityId,
        draft: &NamedEntityDraft,
    ) -> Result<NamedEntity, TaxonomyError> {
        self.store_mut(dimension).update(id, draft)
    }

    pub fn toggle_entity(
        &mut self,
        dimension: Dimension,
        id: EntityId,
    ) -> Result<NamedEntity, TaxonomyError> {
        self.store_mut(dimension).toggle_active(id)
    }

    pub fn remove_entity(
        &mut self,
        dimension: Dimension,
        id: EntityId,
    ) -> Result<NamedEntity, TaxonomyError> {
        let kind = dimension.kind();
        self.get_entity(dimension, id)?;

        let referenced_by = match dimension {
            Dimension::Category | Dimension::SubCategory => self
                .professions
                .referencing(kind, id)
                .next()
                .map(|_| RecordKind::Profession),
            Dimension::DegreeType | Dimension::Degree | Dimension::Specialisation => self
                .qualifications
                .referencing(kind, id)
                .next()
                .map(|_| RecordKind::Qualification),
        };
        if let Some(referenced_by) = referenced_by {
            return Err(TaxonomyError::InUse {
                kind,
                id,
                referenced_by,
            });
        }

        let removed = self.store_mut(dimension).remove(id)?;
        match dimension {
            Dimension::Category => {
                self.mapping.remove_category(id);
            }
            Dimension::SubCategory => {
                self.mapping.unlink_subcategory(id);
            }
            _ => {}
        }
        Ok(removed)
    }

    // ---- category mapping -----------------------------------------------------------

    pub fn linked(&self, category: EntityId) -> BTreeSet<EntityId> {
        self.mapping.linked(category)
    }

    pub fn categories_for(&self, subcategory: EntityId) -> BTreeSet<EntityId> {
        self.mapping.categories_for(subcategory)
    }

    /// Toggle a link after checking both ends exist, so the mapping never gains a
    /// dangling id. A link a profession is built on cannot be removed.
    pub fn toggle_link(
        &mut self,
        category: EntityId,
        subcategory: EntityId,
    ) -> Result<BTreeSet<EntityId>, TaxonomyError> {
        if self.mapping.is_linked(category, subcategory) {
            let in_use = self.professions.records().iter().any(|profession| {
                profession.category_id == category && profession.subcategory_id == subcategory
            });
            if in_use {
                return Err(TaxonomyError::InUse {
                    kind: RecordKind::SubCategory,
                    id: subcategory,
                    referenced_by: RecordKind::Profession,
                });
            }
        } else {
            if !self.categories.contains(category) {
                return Err(TaxonomyError::ReferentialViolation {
                    kind: RecordKind::Category,
                    id: category,
                });
            }
            if !self.subcategories.contains(subcategory) {
                return Err(TaxonomyError::ReferentialViolation {
                    kind: RecordKind::SubCategory,
                    id: subcategory,
                });
            }
        }
        Ok(self.mapping.toggle_link(Some(category), subcategory))
    }

    /// Sub-category records a profession in `category` may use, in store order.
    pub fn selectable_subcategories(&self, category: EntityId) -> Vec<&NamedEntity> {
        let linked = self.mapping.linked(category);
        self.subcategories
            .records()
            .iter()
            .filter(|record| linked.contains(&record.id))
            .collect()
    }

    // ---- qualifications -------------------------------------------------------------

    pub fn list_qualifications(&self, filter: &str) -> Vec<QualificationView> {
        let refs = self.qualification_refs();
        self.qualifications
            .list(filter, &refs)
            .into_iter()
            .map(|qualification| refs.view(qualification))
            .collect()
    }

    pub fn create_qualification(
        &mut self,
        draft: &QualificationDraft,
    ) -> Result<Qualification, TaxonomyError> {
        let refs = QualificationRefs {
            degree_types: &self.degree_types,
            degrees: &self.degrees,
            specialisations: &self.specialisations,
        };
        self.qualifications.create(draft, &refs)
    }

    pub fn update_qualification(
        &mut self,
        id: EntityId,
        draft: &QualificationDraft,
    ) -> Result<Qualification, TaxonomyError> {
        let refs = QualificationRefs {
            degree_types: &self.degree_types,
            degrees: &self.degrees,
            specialisations: &self.specialisations,
        };
        self.qualifications.update(id, draft, &refs)
    }

    pub fn toggle_qualification(&mut self, id: EntityId) -> Result<Qualification, TaxonomyError> {
        self.qualifications.toggle_active(id)
    }

    pub fn remove_qualification(&mut self, id: EntityId) -> Result<Qualification, TaxonomyError> {
        if !self.qualifications.contains(id) {
            return Err(TaxonomyError::NotFound {
                kind: RecordKind::Qualification,
                id,
            });
        }
        if self
            .professions
            .referencing(RecordKind::Qualification, id)
            .next()
            .is_some()
        {
            return Err(TaxonomyError::InUse {
                kind: RecordKind::Qualification,
                id,
                referenced_by: RecordKind::Profession,
            });
        }
        self.qualifications.remove(id)
    }

    pub fn qualification_label(&self, qualification: &Qualification) -> String {
        self.qualification_refs().label(qualification)
    }

    // ---- professions ----------------------------------------------------------------

    pub fn list_professions(&self, filter: &str) -> Vec<ProfessionView> {
        let labels = QualificationLabels {
            store: &self.qualifications,
            refs: self.qualification_refs(),
        };
        let refs = ProfessionRefs {
            categories: &self.categories,
            subcategories: &self.subcategories,
            mapping: &self.mapping,
            qualifications: &labels,
        };
        self.professions
            .list(filter)
            .into_iter()
            .map(|profession| refs.view(profession))
            .collect()
    }

    pub fn resolve_label(&self, kind: LabelKind, id: EntityId) -> String {
        let labels = QualificationLabels {
            store: &self.qualifications,
            refs: self.qualification_refs(),
        };
        let refs = ProfessionRefs {
            categories: &self.categories,
            subcategories: &self.subcategories,
            mapping: &self.mapping,
            qualifications: &labels,
        };
        refs.resolve_label(kind, id)
    }

    pub fn create_profession(
        &mut self,
        draft: &ProfessionDraft,
    ) -> Result<Profession, TaxonomyError> {
        let labels = QualificationLabels {
            store: &self.qualifications,
            refs: QualificationRefs {
                degree_types: &self.degree_types,
                degrees: &self.degrees,
                specialisations: &self.specialisations,
            },
        };
        let refs = ProfessionRefs {
            categories: &self.categories,
            subcategories: &self.subcategories,
            mapping: &self.mapping,
            qualifications: &labels,
        };
        self.professions.create(draft, &refs)
    }

    pub fn update_profession(
        &mut self,
        id: EntityId,
        draft: &ProfessionDraft,
    ) -> Result<Profession, TaxonomyError> {
        let labels = QualificationLabels {
            store: &self.qualifications,
            refs: QualificationRefs {
                degree_types: &self.degree_types,
                degrees: &self.degrees,
                specialisations: &self.specialisations,
            },
        };
        let refs = ProfessionRefs {
            categories: &self.categories,
            subcategories: &self.subcategories,
            mapping: &self.mapping,
            qualifications: &labels,
        };
        self.professions.update(id, draft, &refs)
    }

    pub fn toggle_profession(&mut self, id: EntityId) -> Result<Profession, TaxonomyError> {
        self.professions.toggle_active(id)
    }

    pub fn remove_profession(&mut self, id: EntityId) -> Result<Profession, TaxonomyError> {
        self.professions.remove(id)
    }
}
