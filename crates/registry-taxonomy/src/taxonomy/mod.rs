//! Taxonomy stores, composers and validation rules.
//!
//! The [`Taxonomy`] aggregate owns every store and enforces the rules that span them.
//! [`TaxonomyService`] shares it with the HTTP router and reports outcomes to a
//! [`NotificationSink`]. Drafts live in an [`EditSession`] until a commit succeeds.

pub mod aggregate;
pub mod domain;
pub mod error;
pub mod import;
pub mod mapping;
pub mod notify;
pub mod profession;
pub mod qualification;
pub mod router;
mod seed;
pub mod service;
pub mod session;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use aggregate::Taxonomy;
pub use domain::{
    CourseDuration, Dimension, EntityId, LabelKind, NamedEntity, NamedEntityDraft, Profession,
    ProfessionDraft, Qualification, QualificationDraft, RecordKind,
};
pub use error::TaxonomyError;
pub use import::{parse_rows, ImportRow, ImportSummary, RejectedRow};
pub use mapping::{CategoryMapping, MappingStore};
pub use notify::{Notification, NotificationKind, NotificationSink, NotifyError, TracingNotifier};
pub use profession::{ProfessionRefs, ProfessionStore, ProfessionView, UNKNOWN_LABEL};
pub use qualification::{
    QualificationCatalog, QualificationLabels, QualificationRefs, QualificationStore,
    QualificationView,
};
pub use router::{taxonomy_router, ListQuery};
pub use service::TaxonomyService;
pub use session::{EditSession, EditTarget, SessionState};
pub use store::EntityStore;
pub use validation::FieldErrors;
