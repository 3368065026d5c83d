use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper shared by every taxonomy record. Unique within its own store only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reference-data dimensions managed through a plain `EntityStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    #[serde(rename = "categories")]
    Category,
    #[serde(rename = "sub-categories")]
    SubCategory,
    #[serde(rename = "degree-types")]
    DegreeType,
    #[serde(rename = "degrees")]
    Degree,
    #[serde(rename = "specialisations")]
    Specialisation,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Category,
        Dimension::SubCategory,
        Dimension::DegreeType,
        Dimension::Degree,
        Dimension::Specialisation,
    ];

    /// URL/CLI slug, identical to the serde representation.
    pub const fn slug(self) -> &'static str {
        match self {
            Dimension::Category => "categories",
            Dimension::SubCategory => "sub-categories",
            Dimension::DegreeType => "degree-types",
            Dimension::Degree => "degrees",
            Dimension::Specialisation => "specialisations",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        let slug = slug.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|dimension| dimension.slug() == slug)
    }

    pub const fn kind(self) -> RecordKind {
        match self {
            Dimension::Category => RecordKind::Category,
            Dimension::SubCategory => RecordKind::SubCategory,
            Dimension::DegreeType => RecordKind::DegreeType,
            Dimension::Degree => RecordKind::Degree,
            Dimension::Specialisation => RecordKind::Specialisation,
        }
    }

    /// Degrees carry a short abbreviation (e.g. "B.Pharm") that the other dimensions lack.
    pub const fn requires_abbreviation(self) -> bool {
        matches!(self, Dimension::Degree)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Every kind of record the taxonomy holds, used for error reporting and confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Category,
    SubCategory,
    DegreeType,
    Degree,
    Specialisation,
    Qualification,
    Profession,
}

impl RecordKind {
    pub const fn label(self) -> &'static str {
        match self {
            RecordKind::Category => "Category",
            RecordKind::SubCategory => "Sub-category",
            RecordKind::DegreeType => "Degree type",
            RecordKind::Degree => "Degree",
            RecordKind::Specialisation => "Specialisation",
            RecordKind::Qualification => "Qualification",
            RecordKind::Profession => "Profession",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A reference-data "dimension" record (category, sub-category, degree type, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntity {
    pub id: EntityId,
    pub name: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    pub is_active: bool,
}

impl NamedEntity {
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.code.to_lowercase().contains(needle)
            || self
                .abbreviation
                .as_deref()
                .is_some_and(|abbreviation| abbreviation.to_lowercase().contains(needle))
    }

    /// Short label used in confirmations: the abbreviation when present, otherwise the name.
    pub fn short_label(&self) -> &str {
        self.abbreviation.as_deref().unwrap_or(&self.name)
    }

    pub(crate) fn apply(&mut self, draft: &NamedEntityDraft) {
        self.name = draft.name.clone();
        self.code = draft.code.clone();
        self.description = non_blank(draft.description.as_deref());
        self.abbreviation = non_blank(draft.abbreviation.as_deref());
    }
}

/// Uncommitted input for a `NamedEntity`; discarded untouched when an edit is cancelled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEntityDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

impl NamedEntityDraft {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: None,
            abbreviation: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }
}

impl From<&NamedEntity> for NamedEntityDraft {
    fn from(entity: &NamedEntity) -> Self {
        Self {
            name: entity.name.clone(),
            code: entity.code.clone(),
            description: entity.description.clone(),
            abbreviation: entity.abbreviation.clone(),
        }
    }
}

/// A registrable profession: one category, one mapped sub-category, one qualification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profession {
    pub id: EntityId,
    pub name: String,
    pub category_id: EntityId,
    pub subcategory_id: EntityId,
    pub qualification_id: EntityId,
    pub is_active: bool,
}

impl Profession {
    pub fn references(&self, kind: RecordKind, id: EntityId) -> bool {
        match kind {
            RecordKind::Category => self.category_id == id,
            RecordKind::SubCategory => self.subcategory_id == id,
            RecordKind::Qualification => self.qualification_id == id,
            _ => false,
        }
    }
}

/// Draft for a profession. Selections stay optional until the draft is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category_id: Option<EntityId>,
    #[serde(default)]
    pub subcategory_id: Option<EntityId>,
    #[serde(default)]
    pub qualification_id: Option<EntityId>,
}

impl From<&Profession> for ProfessionDraft {
    fn from(profession: &Profession) -> Self {
        Self {
            name: profession.name.clone(),
            category_id: Some(profession.category_id),
            subcategory_id: Some(profession.subcategory_id),
            qualification_id: Some(profession.qualification_id),
        }
    }
}

/// Course length of a qualification. Any component may be zero, but not all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDuration {
    #[serde(default)]
    pub years: u16,
    #[serde(default)]
    pub months: u16,
    #[serde(default)]
    pub hours: u16,
}

impl CourseDuration {
    pub const fn new(years: u16, months: u16, hours: u16) -> Self {
        Self {
            years,
            months,
            hours,
        }
    }

    pub const fn is_unspecified(&self) -> bool {
        self.years == 0 && self.months == 0 && self.hours == 0
    }
}

impl fmt::Display for CourseDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unspecified() {
            return f.write_str("Not specified");
        }

        let parts: Vec<String> = [(self.years, "yr"), (self.months, "mo"), (self.hours, "hr")]
            .into_iter()
            .filter(|(value, _)| *value > 0)
            .map(|(value, unit)| {
                let plural = if value > 1 { "s" } else { "" };
                format!("{value} {unit}{plural}")
            })
            .collect();

        f.write_str(&parts.join(" "))
    }
}

/// Degree type + degree + specialisation + duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {
    pub id: EntityId,
    pub degree_type_id: EntityId,
    pub degree_id: EntityId,
    pub specialisation_id: EntityId,
    pub duration: CourseDuration,
    pub is_active: bool,
}

impl Qualification {
    pub fn references(&self, kind: RecordKind, id: EntityId) -> bool {
        match kind {
            RecordKind::DegreeType => self.degree_type_id == id,
            RecordKind::Degree => self.degree_id == id,
            RecordKind::Specialisation => self.specialisation_id == id,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationDraft {
    #[serde(default)]
    pub degree_type_id: Option<EntityId>,
    #[serde(default)]
    pub degree_id: Option<EntityId>,
    #[serde(default)]
    pub specialisation_id: Option<EntityId>,
    #[serde(default)]
    pub duration: CourseDuration,
}

impl From<&Qualification> for QualificationDraft {
    fn from(qualification: &Qualification) -> Self {
        Self {
            degree_type_id: Some(qualification.degree_type_id),
            degree_id: Some(qualification.degree_id),
            specialisation_id: Some(qualification.specialisation_id),
            duration: qualification.duration,
        }
    }
}

/// Foreign keys a profession can display as a resolved label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Category,
    SubCategory,
    Qualification,
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
