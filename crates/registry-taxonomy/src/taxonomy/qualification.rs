use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{EntityId, Qualification, QualificationDraft, RecordKind};
use super::error::TaxonomyError;
use super::store::{EntityStore, IdSequence};
use super::validation::validate_qualification;

const UNKNOWN: &str = "Unknown";

/// Read-only lookup of qualification labels, the only view professions need.
pub trait QualificationCatalog {
    fn qualification_label(&self, id: EntityId) -> Option<String>;

    fn contains_qualification(&self, id: EntityId) -> bool {
        self.qualification_label(id).is_some()
    }
}

/// A plain id → label list, for qualifications managed outside the taxonomy.
impl QualificationCatalog for BTreeMap<EntityId, String> {
    fn qualification_label(&self, id: EntityId) -> Option<String> {
        self.get(&id).cloned()
    }
}

/// The stores a qualification draft references.
#[derive(Debug, Clone, Copy)]
pub struct QualificationRefs<'a> {
    pub degree_types: &'a EntityStore,
    pub degrees: &'a EntityStore,
    pub specialisations: &'a EntityStore,
}

impl QualificationRefs<'_> {
    /// "MBBS - General Practice (5 yrs 6 mos)"; unresolved parts render as "Unknown".
    pub fn label(&self, qualification: &Qualification) -> String {
        let degree = self
            .degrees
            .get(qualification.degree_id)
            .map_or(UNKNOWN, |degree| degree.short_label());
        let specialisation = self
            .specialisations
            .get(qualification.specialisation_id)
            .map_or(UNKNOWN, |specialisation| specialisation.name.as_str());
        format!("{degree} - {specialisation} ({})", qualification.duration)
    }

    pub fn view(&self, qualification: &Qualification) -> QualificationView {
        QualificationView {
            label: self.label(qualification),
            degree_type: self
                .degree_types
                .get(qualification.degree_type_id)
                .map_or_else(|| UNKNOWN.to_string(), |record| record.name.clone()),
            degree: self
                .degrees
                .get(qualification.degree_id)
                .map_or_else(|| UNKNOWN.to_string(), |record| record.name.clone()),
            specialisation: self
                .specialisations
                .get(qualification.specialisation_id)
                .map_or_else(|| UNKNOWN.to_string(), |record| record.name.clone()),
            qualification: qualification.clone(),
        }
    }
}

/// Qualification with its foreign keys resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualificationView {
    #[serde(flatten)]
    pub qualification: Qualification,
    pub label: String,
    pub degree_type: String,
    pub degree: String,
    pub specialisation: String,
}

#[derive(Debug, Clone, Default)]
pub struct QualificationStore {
    records: Vec<Qualification>,
    sequence: IdSequence,
}

impl QualificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Qualification>) -> Self {
        let sequence = IdSequence::starting_after(records.iter().map(|record| record.id));
        Self { records, sequence }
    }

    pub fn records(&self) -> &[Qualification] {
        &self.records
    }

    pub fn get(&self, id: EntityId) -> Option<&Qualification> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matches degree abbreviation, degree type name or specialisation name.
    pub fn list(&self, filter: &str, refs: &QualificationRefs<'_>) -> Vec<&Qualification> {
        let needle = filter.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                let degree = refs
                    .degrees
                    .get(record.degree_id)
                    .map(|degree| degree.short_label().to_lowercase());
                let degree_type = refs
                    .degree_types
                    .get(record.degree_type_id)
                    .map(|degree_type| degree_type.name.to_lowercase());
                let specialisation = refs
                    .specialisations
                    .get(record.specialisation_id)
                    .map(|specialisation| specialisation.name.to_lowercase());

                [degree, degree_type, specialisation]
                    .into_iter()
                    .map(|label| label.unwrap_or_else(|| UNKNOWN.to_lowercase()))
                    .any(|label| label.contains(&needle))
            })
            .collect()
    }

    pub fn referencing(&self, kind: RecordKind, id: EntityId) -> impl Iterator<Item = &Qualification> {
        self.records
            .iter()
            .filter(move |record| record.references(kind, id))
    }

    pub fn create(
        &mut self,
        draft: &QualificationDraft,
        refs: &QualificationRefs<'_>,
    ) -> Result<Qualification, TaxonomyError> {
        let (degree_type_id, degree_id, specialisation_id) =
            self.validated(draft, None, refs)?;

        let record = Qualification {
            id: self.sequence.next_id(),
            degree_type_id,
            degree_id,
            specialisation_id,
            duration: draft.duration,
            is_active: true,
        };
        self.records.push(record.clone());
        Ok(record)
    }

    pub fn update(
        &mut self,
        id: EntityId,
        draft: &QualificationDraft,
        refs: &QualificationRefs<'_>,
    ) -> Result<Qualification, TaxonomyError> {
        let index = self.position(id)?;
        let (degree_type_id, degree_id, specialisation_id) =
            self.validated(draft, Some(id), refs)?;

        let record = &mut self.records[index];
        record.degree_type_id = degree_type_id;
        record.degree_id = degree_id;
        record.specialisation_id = specialisation_id;
        record.duration = draft.duration;
        Ok(record.clone())
    }

    pub fn remove(&mut self, id: EntityId) -> Result<Qualification, TaxonomyError> {
        let index = self.position(id)?;
        Ok(self.records.remove(index))
    }

    pub fn toggle_active(&mut self, id: EntityId) -> Result<Qualification, TaxonomyError> {
        let index = self.position(id)?;
        let record = &mut self.records[index];
        record.is_active = !record.is_active;
        Ok(record.clone())
    }

    fn validated(
        &self,
        draft: &QualificationDraft,
        editing: Option<EntityId>,
        refs: &QualificationRefs<'_>,
    ) -> Result<(EntityId, EntityId, EntityId), TaxonomyError> {
        validate_qualification(draft, &self.records, editing, refs)
            .map_err(TaxonomyError::Validation)
    }

    fn position(&self, id: EntityId) -> Result<usize, TaxonomyError> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .ok_or(TaxonomyError::NotFound {
                kind: RecordKind::Qualification,
                id,
            })
    }
}

/// Qualification store paired with the stores needed to render its labels.
pub struct QualificationLabels<'a> {
    pub store: &'a QualificationStore,
    pub refs: QualificationRefs<'a>,
}

impl QualificationCatalog for QualificationLabels<'_> {
    fn qualification_label(&self, id: EntityId) -> Option<String> {
        self.store
            .get(id)
            .map(|qualification| self.refs.label(qualification))
    }

    fn contains_qualification(&self, id: EntityId) -> bool {
        self.store.contains(id)
    }
}
