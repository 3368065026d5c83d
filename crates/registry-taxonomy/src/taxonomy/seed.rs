//! Reference records the registration console ships with.

use super::domain::{CourseDuration, EntityId, NamedEntity, Profession, Qualification};
use super::mapping::MappingStore;

fn entity(id: u64, name: &str, code: &str, description: Option<&str>) -> NamedEntity {
    NamedEntity {
        id: EntityId(id),
        name: name.to_string(),
        code: code.to_string(),
        description: description.map(str::to_string),
        abbreviation: None,
        is_active: true,
    }
}

fn degree(id: u64, name: &str, code: &str, abbreviation: &str, description: &str) -> NamedEntity {
    NamedEntity {
        abbreviation: Some(abbreviation.to_string()),
        ..entity(id, name, code, Some(description))
    }
}

pub(crate) fn categories() -> Vec<NamedEntity> {
    vec![
        entity(1, "Medical", "MED", Some("Medical professionals")),
        entity(2, "Dental", "DENT", Some("Dental professionals")),
        entity(3, "Nursing", "NURS", Some("Nursing professionals")),
        entity(4, "Pharmacy", "PHARM", Some("Pharmacy professionals")),
        entity(5, "Allied Health", "ALLIED", Some("Allied health professionals")),
    ]
}

pub(crate) fn subcategories() -> Vec<NamedEntity> {
    vec![
        entity(1, "General Physician", "GP", None),
        entity(2, "Surgeon", "SURG", None),
        entity(3, "Pediatrician", "PEDI", None),
        entity(4, "Orthodontist", "ORTHO_D", None),
        entity(5, "Staff Nurse", "SN", None),
        entity(6, "Clinical Pharmacist", "CLIN_PH", None),
    ]
}

pub(crate) fn mapping() -> MappingStore {
    let ids = |raw: &[u64]| raw.iter().copied().map(EntityId).collect::<Vec<_>>();
    MappingStore::from_links([
        (EntityId(1), ids(&[1, 2, 3])),
        (EntityId(2), ids(&[4])),
        (EntityId(3), ids(&[5])),
        (EntityId(4), ids(&[6])),
    ])
}

pub(crate) fn degree_types() -> Vec<NamedEntity> {
    vec![
        entity(1, "Bachelor's Degree", "BACHELOR", Some("Undergraduate academic degree")),
        entity(2, "Master's Degree", "MASTER", Some("Postgraduate academic degree")),
        entity(3, "Diploma", "DIPLOMA", Some("Certificate of competency")),
        entity(4, "Doctorate", "DOCTORATE", Some("Highest academic degree")),
        entity(5, "Certificate", "CERT", Some("Short-term certification course")),
    ]
}

pub(crate) fn degrees() -> Vec<NamedEntity> {
    vec![
        degree(
            1,
            "Bachelor of Medicine and Bachelor of Surgery",
            "MBBS",
            "MBBS",
            "Primary medical qualification",
        ),
        degree(2, "Bachelor of Dental Surgery", "BDS", "BDS", "Dental surgery qualification"),
        degree(3, "Bachelor of Pharmacy", "BPHARM", "B.Pharm", "Pharmacy qualification"),
        degree(4, "Bachelor of Physiotherapy", "BPT", "BPT", "Physiotherapy qualification"),
        degree(
            5,
            "Bachelor of Science in Nursing",
            "BSCNURSING",
            "B.Sc Nursing",
            "Nursing qualification",
        ),
        degree(6, "Master of Surgery", "MS", "M.S.", "Postgraduate surgical degree"),
    ]
}

pub(crate) fn specialisations() -> Vec<NamedEntity> {
    vec![
        entity(1, "Cardiology", "CARDIO", Some("Heart and cardiovascular system")),
        entity(2, "Neurology", "NEURO", Some("Nervous system disorders")),
        entity(3, "Orthopedics", "ORTHO", Some("Musculoskeletal system")),
        entity(4, "Pediatrics", "PEDIA", Some("Medical care of infants and children")),
        entity(5, "Dermatology", "DERM", Some("Skin, hair, and nail conditions")),
        entity(6, "Ophthalmology", "OPTH", Some("Eye and vision care")),
        entity(7, "General Practice", "GP", Some("Primary healthcare services")),
    ]
}

pub(crate) fn qualifications() -> Vec<Qualification> {
    let qualification = |id: u64, degree_type: u64, degree: u64, specialisation: u64, duration| {
        Qualification {
            id: EntityId(id),
            degree_type_id: EntityId(degree_type),
            degree_id: EntityId(degree),
            specialisation_id: EntityId(specialisation),
            duration,
            is_active: true,
        }
    };

    vec![
        qualification(1, 1, 1, 7, CourseDuration::new(5, 6, 0)),
        qualification(2, 2, 6, 1, CourseDuration::new(3, 0, 0)),
        qualification(3, 3, 5, 7, CourseDuration::new(2, 0, 0)),
    ]
}

pub(crate) fn professions() -> Vec<Profession> {
    vec![
        Profession {
            id: EntityId(1),
            name: "General Physician".to_string(),
            category_id: EntityId(1),
            subcategory_id: EntityId(1),
            qualification_id: EntityId(1),
            is_active: true,
        },
        Profession {
            id: EntityId(2),
            name: "Staff Nurse".to_string(),
            category_id: EntityId(3),
            subcategory_id: EntityId(5),
            qualification_id: EntityId(3),
            is_active: true,
        },
    ]
}
