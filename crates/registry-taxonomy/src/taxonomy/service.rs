use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::aggregate::Taxonomy;
use super::domain::{
    Dimension, EntityId, LabelKind, NamedEntity, NamedEntityDraft, Profession, ProfessionDraft,
    Qualification, QualificationDraft, RecordKind,
};
use super::error::TaxonomyError;
use super::import::{ImportRow, ImportSummary, RejectedRow};
use super::mapping::CategoryMapping;
use super::notify::{Notification, NotificationSink};
use super::profession::ProfessionView;
use super::qualification::QualificationView;

/// Shared entry point for the HTTP layer and the CLI.
///
/// Wraps the [`Taxonomy`] behind a mutex and reports each mutation to the notification sink.
/// Validation rejections go back to the caller only; they are field-level feedback, not
/// notifications.
pub struct TaxonomyService<N> {
    taxonomy: Mutex<Taxonomy>,
    notifier: Arc<N>,
}

impl<N> TaxonomyService<N>
where
    N: NotificationSink + 'static,
{
    pub fn new(taxonomy: Taxonomy, notifier: Arc<N>) -> Self {
        Self {
            taxonomy: Mutex::new(taxonomy),
            notifier,
        }
    }

    pub fn notifier(&self) -> &Arc<N> {
        &self.notifier
    }

    /// Copy of the current state, for callers that need a consistent multi-store read.
    pub fn snapshot(&self) -> Taxonomy {
        self.lock().clone()
    }

    pub fn list_entities(&self, dimension: Dimension, filter: &str) -> Vec<NamedEntity> {
        self.lock()
            .list_entities(dimension, filter)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn get_entity(&self, dimension: Dimension, id: EntityId) -> Result<NamedEntity, TaxonomyError> {
        self.lock().get_entity(dimension, id).cloned()
    }

    pub fn create_entity(
        &self,
        dimension: Dimension,
        draft: &NamedEntityDraft,
    ) -> Result<NamedEntity, TaxonomyError> {
        let result = self.lock().create_entity(dimension, draft);
        self.report(result, |record| {
            info!(%dimension, id = %record.id, code = %record.code, "record created");
            format!("{} added", dimension.kind())
        })
    }

    pub fn update_entity(
        &self,
        dimension: Dimension,
        id: EntityId,
        draft: &NamedEntityDraft,
    ) -> Result<NamedEntity, TaxonomyError> {
        let result = self.lock().update_entity(dimension, id, draft);
        self.report(result, |record| {
            info!(%dimension, id = %record.id, code = %record.code, "record updated");
            format!("{} updated", dimension.kind())
        })
    }

    pub fn remove_entity(
        &self,
        dimension: Dimension,
        id: EntityId,
    ) -> Result<NamedEntity, TaxonomyError> {
        let result = self.lock().remove_entity(dimension, id);
        self.report(result, |record| {
            info!(%dimension, id = %record.id, "record deleted");
            format!("{} deleted", dimension.kind())
        })
    }

    pub fn toggle_entity(
        &self,
        dimension: Dimension,
        id: EntityId,
    ) -> Result<NamedEntity, TaxonomyError> {
        let result = self.lock().toggle_entity(dimension, id);
        self.report(result, |record| {
            info!(%dimension, id = %record.id, active = record.is_active, "record toggled");
            format!("{} {}", record.short_label(), activation(record.is_active))
        })
    }

    pub fn linked(&self, category: EntityId) -> BTreeSet<EntityId> {
        self.lock().linked(category)
    }

    pub fn categories_for(&self, subcategory: EntityId) -> BTreeSet<EntityId> {
        self.lock().categories_for(subcategory)
    }

    pub fn mappings(&self) -> Vec<CategoryMapping> {
        self.lock().mapping().mappings()
    }

    pub fn toggle_link(
        &self,
        category: EntityId,
        subcategory: EntityId,
    ) -> Result<BTreeSet<EntityId>, TaxonomyError> {
        let result = self.lock().toggle_link(category, subcategory);
        self.report(result, |linked| {
            info!(
                %category,
                %subcategory,
                linked = linked.contains(&subcategory),
                "mapping toggled"
            );
            "Mapping updated".to_string()
        })
    }

    pub fn profession_options(&self, category: EntityId) -> Vec<NamedEntity> {
        self.lock()
            .selectable_subcategories(category)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn resolve_label(&self, kind: LabelKind, id: EntityId) -> String {
        self.lock().resolve_label(kind, id)
    }

    pub fn list_professions(&self, filter: &str) -> Vec<ProfessionView> {
        self.lock().list_professions(filter)
    }

    pub fn create_profession(&self, draft: &ProfessionDraft) -> Result<Profession, TaxonomyError> {
        let result = self.lock().create_profession(draft);
        self.report(result, |record| {
            info!(id = %record.id, name = %record.name, "profession created");
            format!("{} added", RecordKind::Profession)
        })
    }

    pub fn update_profession(
        &self,
        id: EntityId,
        draft: &ProfessionDraft,
    ) -> Result<Profession, TaxonomyError> {
        let result = self.lock().update_profession(id, draft);
        self.report(result, |record| {
            info!(id = %record.id, name = %record.name, "profession updated");
            format!("{} updated", RecordKind::Profession)
        })
    }

    pub fn remove_profession(&self, id: EntityId) -> Result<Profession, TaxonomyError> {
        let result = self.lock().remove_profession(id);
        self.report(result, |record| {
            info!(id = %record.id, "profession deleted");
            format!("{} deleted", RecordKind::Profession)
        })
    }

    pub fn toggle_profession(&self, id: EntityId) -> Result<Profession, TaxonomyError> {
        let result = self.lock().toggle_profession(id);
        self.report(result, |record| {
            info!(id = %record.id, active = record.is_active, "profession toggled");
            format!("{} {}", record.name, activation(record.is_active))
        })
    }

    pub fn list_qualifications(&self, filter: &str) -> Vec<QualificationView> {
        self.lock().list_qualifications(filter)
    }

    pub fn create_qualification(
        &self,
        draft: &QualificationDraft,
    ) -> Result<Qualification, TaxonomyError> {
        let result = self.lock().create_qualification(draft);
        self.report(result, |record| {
            info!(id = %record.id, "qualification created");
            format!("{} added", RecordKind::Qualification)
        })
    }

    pub fn update_qualification(
        &self,
        id: EntityId,
        draft: &QualificationDraft,
    ) -> Result<Qualification, TaxonomyError> {
        let result = self.lock().update_qualification(id, draft);
        self.report(result, |record| {
            info!(id = %record.id, "qualification updated");
            format!("{} updated", RecordKind::Qualification)
        })
    }

    pub fn remove_qualification(&self, id: EntityId) -> Result<Qualification, TaxonomyError> {
        let result = self.lock().remove_qualification(id);
        self.report(result, |record| {
            info!(id = %record.id, "qualification deleted");
            format!("{} deleted", RecordKind::Qualification)
        })
    }

    pub fn toggle_qualification(&self, id: EntityId) -> Result<Qualification, TaxonomyError> {
        let (result, label) = {
            let mut taxonomy = self.lock();
            let result = taxonomy.toggle_qualification(id);
            let label = result
                .as_ref()
                .map(|record| taxonomy.qualification_label(record))
                .unwrap_or_default();
            (result, label)
        };
        self.report(result, |record| {
            info!(id = %record.id, active = record.is_active, "qualification toggled");
            format!("{} {}", label, activation(record.is_active))
        })
    }

    /// Create every row through the normal validation path. One summary notification is
    /// sent for the whole batch.
    pub fn import_entities(&self, dimension: Dimension, rows: Vec<ImportRow>) -> ImportSummary {
        let mut summary = ImportSummary::default();
        {
            let mut taxonomy = self.lock();
            for row in rows {
                match taxonomy.create_entity(dimension, &row.draft) {
                    Ok(record) => {
                        debug!(%dimension, line = row.line, id = %record.id, "import row created");
                        summary.created.push(record);
                    }
                    Err(error) => {
                        debug!(%dimension, line = row.line, %error, "import row rejected");
                        summary.rejected.push(RejectedRow {
                            line: row.line,
                            code: row.draft.code,
                            errors: error.field_errors().cloned().unwrap_or_default(),
                        });
                    }
                }
            }
        }

        info!(
            %dimension,
            created = summary.created.len(),
            rejected = summary.rejected.len(),
            "import finished"
        );
        let message = format!(
            "{} import: {} added, {} rejected",
            dimension.kind(),
            summary.created.len(),
            summary.rejected.len()
        );
        if summary.is_clean() {
            self.send(Notification::success(message));
        } else {
            self.send(Notification::error(message));
        }
        summary
    }

    fn lock(&self) -> MutexGuard<'_, Taxonomy> {
        // mutations validate before writing, so a poisoned lock still guards consistent state
        self.taxonomy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn report<T, F>(&self, result: Result<T, TaxonomyError>, describe: F) -> Result<T, TaxonomyError>
    where
        F: FnOnce(&T) -> String,
    {
        match &result {
            Ok(value) => self.send(Notification::success(describe(value))),
            Err(TaxonomyError::Validation(errors)) => {
                debug!(fields = errors.len(), "draft rejected by validation");
            }
            Err(error) => {
                warn!(%error, "taxonomy operation rejected");
                self.send(Notification::error(error.to_string()));
            }
        }
        result
    }

    fn send(&self, notification: Notification) {
        if let Err(error) = self.notifier.notify(notification) {
            warn!(%error, "notification delivery failed");
        }
    }
}

fn activation(active: bool) -> &'static str {
    if active {
        "activated"
    } else {
        "deactivated"
    }
}
