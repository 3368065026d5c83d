use super::domain::{Dimension, EntityId, NamedEntity, NamedEntityDraft};
use super::error::TaxonomyError;
use super::validation::validate_named;

/// Monotonic id source. Ids are never reused for the lifetime of the owning store.
#[derive(Debug, Clone)]
pub(crate) struct IdSequence {
    next: u64,
}

impl IdSequence {
    pub(crate) fn starting_after<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = EntityId>,
    {
        let highest = ids.into_iter().map(|id| id.0).max().unwrap_or(0);
        Self { next: highest + 1 }
    }

    pub(crate) fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

/// Ordered collection of records for one taxonomy dimension.
#[derive(Debug, Clone)]
pub struct EntityStore {
    dimension: Dimension,
    records: Vec<NamedEntity>,
    sequence: IdSequence,
}

impl EntityStore {
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            records: Vec::new(),
            sequence: IdSequence::default(),
        }
    }

    /// Seed a store with existing records, keeping their ids and order.
    pub fn with_records(dimension: Dimension, records: Vec<NamedEntity>) -> Self {
        let sequence = IdSequence::starting_after(records.iter().map(|record| record.id));
        Self {
            dimension,
            records,
            sequence,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn records(&self) -> &[NamedEntity] {
        &self.records
    }

    pub fn get(&self, id: EntityId) -> Option<&NamedEntity> {
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

    /// Records whose name, code or abbreviation contains `filter`, ignoring case.
    pub fn list(&self, filter: &str) -> Vec<&NamedEntity> {
        let needle = filter.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.matches(&needle))
            .collect()
    }

    /// Active records only, the set offered in selection lists.
    pub fn active(&self) -> impl Iterator<Item = &NamedEntity> {
        self.records.iter().filter(|record| record.is_active)
    }

    pub fn create(&mut self, draft: &NamedEntityDraft) -> Result<NamedEntity, TaxonomyError> {
        validate_named(self.dimension, draft, &self.records, None).into_result()?;

        let mut record = NamedEntity {
            id: self.sequence.next_id(),
            name: String::new(),
            code: String::new(),
            description: None,
            abbreviation: None,
            is_active: true,
        };
        record.apply(draft);
        self.records.push(record.clone());
        Ok(record)
    }

    /// Replace the editable fields; `is_active` and position are preserved.
    pub fn update(
        &mut self,
        id: EntityId,
        draft: &NamedEntityDraft,
    ) -> Result<NamedEntity, TaxonomyError> {
        let index = self.position(id)?;
        validate_named(self.dimension, draft, &self.records, Some(id)).into_result()?;

        let record = &mut self.records[index];
        record.apply(draft);
        Ok(record.clone())
    }

    pub fn remove(&mut self, id: EntityId) -> Result<NamedEntity, TaxonomyError> {
        let index = self.position(id)?;
        Ok(self.records.remove(index))
    }

    pub fn toggle_active(&mut self, id: EntityId) -> Result<NamedEntity, TaxonomyError> {
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
                kind: self.dimension.kind(),
                id,
            })
    }
}
