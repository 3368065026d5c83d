use std::mem;

use super::domain::EntityId;
use super::error::TaxonomyError;
use super::validation::FieldErrors;

/// Whether a session will create a new record or edit an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    Create,
    Update(EntityId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState<D> {
    Closed,
    Drafting {
        target: EditTarget,
        draft: D,
        errors: FieldErrors,
    },
    Validating {
        target: EditTarget,
    },
}

/// Lifecycle of one edit dialog: `Closed → Drafting → Validating → Closed | Drafting`.
///
/// The draft is owned by the session until a commit succeeds, so a rejected submit never
/// loses user input and cancelling never touches stored state.
#[derive(Debug, Clone)]
pub struct EditSession<D> {
    state: SessionState<D>,
}

impl<D> Default for EditSession<D> {
    fn default() -> Self {
        Self {
            state: SessionState::Closed,
        }
    }
}

impl<D> EditSession<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState<D> {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, SessionState::Closed)
    }

    pub fn open_update(&mut self, id: EntityId, draft: D) {
        self.state = SessionState::Drafting {
            target: EditTarget::Update(id),
            draft,
            errors: FieldErrors::new(),
        };
    }

    pub fn target(&self) -> Option<EditTarget> {
        match &self.state {
            SessionState::Closed => None,
            SessionState::Drafting { target, .. } | SessionState::Validating { target } => {
                Some(*target)
            }
        }
    }

    pub fn draft(&self) -> Option<&D> {
        match &self.state {
            SessionState::Drafting { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut D> {
        match &mut self.state {
            SessionState::Drafting { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        match &self.state {
            SessionState::Drafting { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Abandon the draft. Returns it so the caller may inspect what was discarded.
    pub fn cancel(&mut self) -> Option<D> {
        match mem::replace(&mut self.state, SessionState::Closed) {
            SessionState::Drafting { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Hand the draft to `commit`. Success closes the session; a validation rejection
    /// returns to drafting with the field errors attached; any other error returns to
    /// drafting with the previous errors cleared.
    pub fn submit<R, F>(&mut self, commit: F) -> Result<R, TaxonomyError>
    where
        F: FnOnce(EditTarget, &D) -> Result<R, TaxonomyError>,
    {
        let (target, draft) = match mem::replace(&mut self.state, SessionState::Closed) {
            SessionState::Drafting { target, draft, .. } => (target, draft),
            other => {
                self.state = other;
                return Err(TaxonomyError::NoActiveDraft);
            }
        };

        self.state = SessionState::Validating { target };
        match commit(target, &draft) {
            Ok(result) => {
                self.state = SessionState::Closed;
                Ok(result)
            }
            Err(error) => {
                let errors = error.field_errors().cloned().unwrap_or_default();
                self.state = SessionState::Drafting {
                    target,
                    draft,
                    errors,
                };
                Err(error)
            }
        }
    }
}

impl<D: Default> EditSession<D> {
    pub fn open_create(&mut self) {
        self.state = SessionState::Drafting {
            target: EditTarget::Create,
            draft: D::default(),
            errors: FieldErrors::new(),
        };
    }
}
