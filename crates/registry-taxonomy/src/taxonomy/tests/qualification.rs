use super::common::*;
use crate::taxonomy::validation::{fields, DURATION_REQUIRED, QUALIFICATION_DUPLICATE};
use crate::taxonomy::{
    CourseDuration, Dimension, QualificationDraft, RecordKind, Taxonomy, TaxonomyError,
};

fn draft(degree_type: u64, degree: u64, specialisation: u64, years: u16) -> QualificationDraft {
    QualificationDraft {
        degree_type_id: Some(id(degree_type)),
        degree_id: Some(id(degree)),
        specialisation_id: Some(id(specialisation)),
        duration: CourseDuration::new(years, 0, 0),
    }
}

#[test]
fn new_combination_is_accepted_and_labelled() {
    let mut taxonomy = Taxonomy::seeded();

    let created = taxonomy
        .create_qualification(&draft(1, 3, 7, 4))
        .expect("new combination");

    assert_eq!(created.id, id(4));
    assert_eq!(
        taxonomy.qualification_label(&created),
        "B.Pharm - General Practice (4 yrs)"
    );
}

#[test]
fn repeated_combination_is_rejected_on_the_degree_field() {
    let mut taxonomy = Taxonomy::seeded();

    match taxonomy.create_qualification(&draft(1, 1, 7, 6)) {
        Err(TaxonomyError::Validation(errors)) => {
            assert_eq!(errors.get(fields::DEGREE_ID), Some(QUALIFICATION_DUPLICATE));
        }
        other => panic!("expected duplicate rejection, got {other:?}"),
    }

    // editing the record that owns the combination is not a duplicate
    taxonomy
        .update_qualification(id(1), &draft(1, 1, 7, 6))
        .expect("own combination");
    let stored = taxonomy.qualifications().get(id(1)).expect("seeded");
    assert_eq!(stored.duration, CourseDuration::new(6, 0, 0));
}

#[test]
fn duration_must_be_given() {
    let mut taxonomy = Taxonomy::seeded();
    let unspecified = QualificationDraft {
        duration: CourseDuration::default(),
        ..draft(4, 4, 3, 0)
    };

    match taxonomy.create_qualification(&unspecified) {
        Err(TaxonomyError::Validation(errors)) => {
            assert_eq!(errors.get(fields::DURATION), Some(DURATION_REQUIRED));
            assert_eq!(errors.len(), 1);
        }
        other => panic!("expected duration error, got {other:?}"),
    }
}

#[test]
fn missing_and_unknown_parts_are_reported_per_field() {
    let mut taxonomy = Taxonomy::seeded();
    let incomplete = QualificationDraft {
        degree_type_id: None,
        specialisation_id: Some(id(99)),
        ..draft(1, 1, 1, 1)
    };

    match taxonomy.create_qualification(&incomplete) {
        Err(TaxonomyError::Validation(errors)) => {
            assert_eq!(errors.get(fields::DEGREE_TYPE_ID), Some("Degree type is required"));
            assert_eq!(
                errors.get(fields::SPECIALISATION_ID),
                Some("Specialisation does not exist")
            );
            assert!(!errors.contains(fields::DEGREE_ID));
        }
        other => panic!("expected field errors, got {other:?}"),
    }
}

#[test]
fn list_matches_degree_type_and_specialisation_names() {
    let taxonomy = Taxonomy::seeded();

    let masters = taxonomy.list_qualifications("master");
    assert_eq!(masters.len(), 1);
    assert_eq!(masters[0].label, "M.S. - Cardiology (3 yrs)");
    assert_eq!(masters[0].degree_type, "Master's Degree");

    assert_eq!(taxonomy.list_qualifications("general practice").len(), 2);
    assert_eq!(taxonomy.list_qualifications("").len(), 3);
}

#[test]
fn labels_survive_deleted_parts() {
    let mut taxonomy = Taxonomy::seeded();
    let created = taxonomy
        .create_qualification(&draft(4, 4, 2, 2))
        .expect("physiotherapy neurology");

    taxonomy
        .remove_qualification(created.id)
        .expect("unreferenced qualification");
    taxonomy
        .remove_entity(Dimension::Degree, id(4))
        .expect("degree no longer used");

    let orphan = crate::taxonomy::Qualification {
        id: id(50),
        ..created
    };
    assert_eq!(
        taxonomy.qualification_label(&orphan),
        "Unknown - Neurology (2 yrs)"
    );
}

#[test]
fn toggling_and_removing_unknown_qualifications_is_not_found() {
    let mut taxonomy = Taxonomy::seeded();

    for result in [
        taxonomy.toggle_qualification(id(9)).map(|_| ()),
        taxonomy.remove_qualification(id(9)).map(|_| ()),
    ] {
        match result {
            Err(TaxonomyError::NotFound { kind, .. }) => {
                assert_eq!(kind, RecordKind::Qualification)
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
