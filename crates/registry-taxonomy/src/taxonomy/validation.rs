//! Field rules shared by every editor.
//!
//! Each validator writes at most one message per field into a [`FieldErrors`] map. Rules are
//! evaluated independently so the caller sees every problem at once; when two rules fail on
//! the same field the later rule's message replaces the earlier one.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::domain::{
    Dimension, EntityId, NamedEntity, NamedEntityDraft, ProfessionDraft, Qualification,
    QualificationDraft,
};
use super::error::TaxonomyError;
use super::profession::ProfessionRefs;
use super::qualification::QualificationRefs;

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9_]+$").expect("code pattern compiles"));

/// Field keys as they appear in serialized drafts.
pub mod fields {
    pub const NAME: &str = "name";
    pub const CODE: &str = "code";
    pub const ABBREVIATION: &str = "abbreviation";
    pub const CATEGORY_ID: &str = "category_id";
    pub const SUBCATEGORY_ID: &str = "subcategory_id";
    pub const QUALIFICATION_ID: &str = "qualification_id";
    pub const DEGREE_TYPE_ID: &str = "degree_type_id";
    pub const DEGREE_ID: &str = "degree_id";
    pub const SPECIALISATION_ID: &str = "specialisation_id";
    pub const DURATION: &str = "duration";
}

pub const NAME_REQUIRED: &str = "Name is required";
pub const CODE_REQUIRED: &str = "Code is required";
pub const CODE_FORMAT: &str = "Code must be uppercase alphanumeric";
pub const CODE_DUPLICATE: &str = "This code already exists";
pub const ABBREVIATION_REQUIRED: &str = "Abbreviation is required";
pub const SUBCATEGORY_NOT_MAPPED: &str = "Sub-category is not mapped to the selected category";
pub const DURATION_REQUIRED: &str = "At least one duration value is required";
pub const QUALIFICATION_DUPLICATE: &str = "This qualification combination already exists";

/// Field name → message. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    /// `Ok(())` when no rule fired, otherwise the collected errors as a `TaxonomyError`.
    pub fn into_result(self) -> Result<(), TaxonomyError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(TaxonomyError::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        f.write_str(&rendered.join("; "))
    }
}

pub fn require_text(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

pub fn require_reference(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<EntityId>,
    message: &str,
) -> Option<EntityId> {
    if value.is_none() {
        errors.insert(field, message);
    }
    value
}

pub fn require_existing(
    errors: &mut FieldErrors,
    field: &str,
    exists: bool,
    message: &str,
) -> bool {
    if !exists {
        errors.insert(field, message);
    }
    exists
}

/// Blank codes are left to `require_text`.
pub fn code_format(errors: &mut FieldErrors, code: &str) {
    if !code.is_empty() && !CODE_PATTERN.is_match(code) {
        errors.insert(fields::CODE, CODE_FORMAT);
    }
}

/// Case-sensitive, ignoring the record currently being edited.
pub fn unique_code(
    errors: &mut FieldErrors,
    code: &str,
    existing: &[NamedEntity],
    editing: Option<EntityId>,
) {
    let duplicate = existing
        .iter()
        .any(|entity| entity.code == code && Some(entity.id) != editing);
    if duplicate {
        errors.insert(fields::CODE, CODE_DUPLICATE);
    }
}

pub fn validate_named(
    dimension: Dimension,
    draft: &NamedEntityDraft,
    existing: &[NamedEntity],
    editing: Option<EntityId>,
) -> FieldErrors {
    let mut errors = FieldErrors::new();

    require_text(&mut errors, fields::NAME, &draft.name, NAME_REQUIRED);
    require_text(&mut errors, fields::CODE, &draft.code, CODE_REQUIRED);
    code_format(&mut errors, &draft.code);
    unique_code(&mut errors, &draft.code, existing, editing);

    if dimension.requires_abbreviation() {
        require_text(
            &mut errors,
            fields::ABBREVIATION,
            draft.abbreviation.as_deref().unwrap_or_default(),
            ABBREVIATION_REQUIRED,
        );
    }

    errors
}

/// Checks a profession draft and returns its category, sub-category and qualification ids.
pub fn validate_profession(
    draft: &ProfessionDraft,
    refs: &ProfessionRefs<'_>,
) -> Result<(EntityId, EntityId, EntityId), FieldErrors> {
    let mut errors = FieldErrors::new();

    require_text(&mut errors, fields::NAME, &draft.name, NAME_REQUIRED);

    let category = require_reference(
        &mut errors,
        fields::CATEGORY_ID,
        draft.category_id,
        "Category is required",
    );
    let subcategory = require_reference(
        &mut errors,
        fields::SUBCATEGORY_ID,
        draft.subcategory_id,
        "Sub-category is required",
    );
    let qualification = require_reference(
        &mut errors,
        fields::QUALIFICATION_ID,
        draft.qualification_id,
        "Qualification is required",
    );

    let category_exists = category.is_some_and(|id| {
        require_existing(
            &mut errors,
            fields::CATEGORY_ID,
            refs.categories.contains(id),
            "Category does not exist",
        )
    });

    if let Some(subcategory) = subcategory {
        let exists = require_existing(
            &mut errors,
            fields::SUBCATEGORY_ID,
            refs.subcategories.contains(subcategory),
            "Sub-category does not exist",
        );
        if let (true, true, Some(category)) = (exists, category_exists, category) {
            require_existing(
                &mut errors,
                fields::SUBCATEGORY_ID,
                refs.mapping.is_linked(category, subcategory),
                SUBCATEGORY_NOT_MAPPED,
            );
        }
    }

    if let Some(qualification) = qualification {
        require_existing(
            &mut errors,
            fields::QUALIFICATION_ID,
            refs.qualifications.contains_qualification(qualification),
            "Qualification does not exist",
        );
    }

    match (category, subcategory, qualification) {
        (Some(category), Some(subcategory), Some(qualification)) if errors.is_empty() => {
            Ok((category, subcategory, qualification))
        }
        _ => Err(errors),
    }
}

pub fn validate_qualification(
    draft: &QualificationDraft,
    existing: &[Qualification],
    editing: Option<EntityId>,
    refs: &QualificationRefs<'_>,
) -> Result<(EntityId, EntityId, EntityId), FieldErrors> {
    let mut errors = FieldErrors::new();

    let degree_type = require_reference(
        &mut errors,
        fields::DEGREE_TYPE_ID,
        draft.degree_type_id,
        "Degree type is required",
    );
    let degree = require_reference(
        &mut errors,
        fields::DEGREE_ID,
        draft.degree_id,
        "Degree is required",
    );
    let specialisation = require_reference(
        &mut errors,
        fields::SPECIALISATION_ID,
        draft.specialisation_id,
        "Specialisation is required",
    );

    if draft.duration.is_unspecified() {
        errors.insert(fields::DURATION, DURATION_REQUIRED);
    }

    if let Some(id) = degree_type {
        require_existing(
            &mut errors,
            fields::DEGREE_TYPE_ID,
            refs.degree_types.contains(id),
            "Degree type does not exist",
        );
    }
    if let Some(id) = degree {
        require_existing(
            &mut errors,
            fields::DEGREE_ID,
            refs.degrees.contains(id),
            "Degree does not exist",
        );
    }
    if let Some(id) = specialisation {
        require_existing(
            &mut errors,
            fields::SPECIALISATION_ID,
            refs.specialisations.contains(id),
            "Specialisation does not exist",
        );
    }

    if let (Some(degree_type), Some(degree), Some(specialisation)) =
        (degree_type, degree, specialisation)
    {
        let duplicate = existing.iter().any(|qualification| {
            qualification.degree_type_id == degree_type
                && qualification.degree_id == degree
                && qualification.specialisation_id == specialisation
                && Some(qualification.id) != editing
        });
        if duplicate {
            errors.insert(fields::DEGREE_ID, QUALIFICATION_DUPLICATE);
        }
    }

    match (degree_type, degree, specialisation) {
        (Some(degree_type), Some(degree), Some(specialisation)) if errors.is_empty() => {
            Ok((degree_type, degree, specialisation))
        }
        _ => Err(errors),
    }
}
