use std::collections::BTreeMap;

use super::common::*;
use crate::taxonomy::validation::{
    fields, validate_profession, NAME_REQUIRED, SUBCATEGORY_NOT_MAPPED,
};
use crate::taxonomy::{
    Dimension, EntityStore, LabelKind, MappingStore, NamedEntityDraft, ProfessionDraft,
    ProfessionRefs, ProfessionStore, RecordKind, Taxonomy, TaxonomyError, UNKNOWN_LABEL,
};

#[test]
fn mapped_profession_is_accepted() {
    let mut taxonomy = Taxonomy::seeded();
    let draft = ProfessionDraft {
        name: "Cardiac Surgeon".to_string(),
        category_id: Some(id(1)),
        subcategory_id: Some(id(2)),
        qualification_id: Some(id(2)),
    };

    let created = taxonomy.create_profession(&draft).expect("valid profession");

    assert_eq!(created.id, id(3));
    assert_eq!(created.name, "Cardiac Surgeon");
    assert_eq!(created.category_id, id(1));
    assert_eq!(created.subcategory_id, id(2));
    assert_eq!(created.qualification_id, id(2));
    assert!(created.is_active);
}

#[test]
fn unmapped_subcategory_is_rejected() {
    let mut taxonomy = Taxonomy::seeded();
    let draft = ProfessionDraft {
        subcategory_id: Some(id(5)),
        ..physician_draft("Nurse Physician")
    };

    match taxonomy.create_profession(&draft) {
        Err(TaxonomyError::Validation(errors)) => {
            assert_eq!(errors.get(fields::SUBCATEGORY_ID), Some(SUBCATEGORY_NOT_MAPPED));
            assert_eq!(errors.len(), 1);
        }
        other => panic!("expected mapping rejection, got {other:?}"),
    }
    assert_eq!(taxonomy.professions().len(), 2);
}

#[test]
fn empty_draft_reports_every_required_field() {
    let mut taxonomy = Taxonomy::seeded();

    match taxonomy.create_profession(&ProfessionDraft::default()) {
        Err(TaxonomyError::Validation(errors)) => {
            assert_eq!(errors.get(fields::NAME), Some(NAME_REQUIRED));
            assert_eq!(errors.get(fields::CATEGORY_ID), Some("Category is required"));
            assert_eq!(errors.get(fields::SUBCATEGORY_ID), Some("Sub-category is required"));
            assert_eq!(
                errors.get(fields::QUALIFICATION_ID),
                Some("Qualification is required")
            );
        }
        other => panic!("expected required-field errors, got {other:?}"),
    }
}

#[test]
fn unknown_references_are_field_errors() {
    let mut taxonomy = Taxonomy::seeded();
    let draft = ProfessionDraft {
        category_id: Some(id(77)),
        qualification_id: Some(id(88)),
        ..physician_draft("Ghost")
    };

    match taxonomy.create_profession(&draft) {
        Err(TaxonomyError::Validation(errors)) => {
            assert_eq!(errors.get(fields::CATEGORY_ID), Some("Category does not exist"));
            assert_eq!(
                errors.get(fields::QUALIFICATION_ID),
                Some("Qualification does not exist")
            );
            assert!(!errors.contains(fields::SUBCATEGORY_ID));
        }
        other => panic!("expected existence errors, got {other:?}"),
    }
}

#[test]
fn duplicate_triples_are_permitted() {
    let mut taxonomy = Taxonomy::seeded();

    let second = taxonomy
        .create_profession(&physician_draft("Family Physician"))
        .expect("same triple, different name");

    assert_eq!(second.category_id, id(1));
    assert_eq!(taxonomy.professions().len(), 3);
}

#[test]
fn changing_category_clears_unlinked_subcategory() {
    let taxonomy = Taxonomy::seeded();
    let mut draft = physician_draft("Physician");

    draft.select_category(id(3), taxonomy.mapping());

    assert_eq!(draft.category_id, Some(id(3)));
    assert_eq!(draft.subcategory_id, None);
    assert_eq!(draft.qualification_id, Some(id(1)));
}

#[test]
fn changing_category_keeps_a_subcategory_linked_to_both() {
    let mut taxonomy = Taxonomy::seeded();
    taxonomy.toggle_link(id(5), id(1)).expect("link allied health");
    let mut draft = physician_draft("Physician");

    draft.select_category(id(5), taxonomy.mapping());

    assert_eq!(draft.subcategory_id, Some(id(1)));
}

#[test]
fn subcategory_selection_is_limited_to_linked_options() {
    let taxonomy = Taxonomy::seeded();
    let mut draft = ProfessionDraft::default();

    assert!(!draft.select_subcategory(id(1), taxonomy.mapping()));
    assert!(draft.selectable_subcategories(taxonomy.mapping()).is_empty());

    draft.select_category(id(3), taxonomy.mapping());
    assert!(!draft.select_subcategory(id(1), taxonomy.mapping()));
    assert!(draft.select_subcategory(id(5), taxonomy.mapping()));
    assert_eq!(draft.subcategory_id, Some(id(5)));

    draft.clear_category();
    assert_eq!(draft.category_id, None);
    assert_eq!(draft.subcategory_id, None);

    let options: Vec<_> = taxonomy
        .selectable_subcategories(id(1))
        .into_iter()
        .map(|record| record.code.as_str())
        .collect();
    assert_eq!(options, ["GP", "SURG", "PEDI"]);
}

#[test]
fn labels_resolve_or_fall_back_to_unknown() {
    let taxonomy = Taxonomy::seeded();

    assert_eq!(taxonomy.resolve_label(LabelKind::Category, id(1)), "Medical");
    assert_eq!(
        taxonomy.resolve_label(LabelKind::SubCategory, id(5)),
        "Staff Nurse"
    );
    assert_eq!(
        taxonomy.resolve_label(LabelKind::Qualification, id(1)),
        "MBBS - General Practice (5 yrs 6 mos)"
    );
    assert_eq!(taxonomy.resolve_label(LabelKind::Category, id(999)), UNKNOWN_LABEL);
}

#[test]
fn profession_store_accepts_an_external_qualification_catalog() {
    let mut categories = EntityStore::new(Dimension::Category);
    let mut subcategories = EntityStore::new(Dimension::SubCategory);
    let medical = categories
        .create(&NamedEntityDraft::new("Medical", "MED"))
        .expect("category");
    let surgeon = subcategories
        .create(&NamedEntityDraft::new("Surgeon", "SURG"))
        .expect("sub-category");
    let mapping = MappingStore::from_links([(medical.id, vec![surgeon.id])]);
    let catalog = BTreeMap::from([(id(10), "MS - Cardiology (3 yrs)".to_string())]);
    let refs = ProfessionRefs {
        categories: &categories,
        subcategories: &subcategories,
        mapping: &mapping,
        qualifications: &catalog,
    };
    let mut store = ProfessionStore::new();

    let created = store
        .create(
            &ProfessionDraft {
                name: "Cardiac Surgeon".to_string(),
                category_id: Some(medical.id),
                subcategory_id: Some(surgeon.id),
                qualification_id: Some(id(10)),
            },
            &refs,
        )
        .expect("valid against the external catalog");

    let view = refs.view(&created);
    assert_eq!(view.category, "Medical");
    assert_eq!(view.subcategory, "Surgeon");
    assert_eq!(view.qualification, "MS - Cardiology (3 yrs)");
}

#[test]
fn professions_referencing_a_qualification_block_its_removal() {
    let mut taxonomy = Taxonomy::seeded();

    match taxonomy.remove_qualification(id(1)) {
        Err(TaxonomyError::InUse {
            kind,
            referenced_by,
            ..
        }) => {
            assert_eq!(kind, RecordKind::Qualification);
            assert_eq!(referenced_by, RecordKind::Profession);
        }
        other => panic!("expected in-use rejection, got {other:?}"),
    }

    taxonomy.remove_profession(id(1)).expect("profession exists");
    taxonomy
        .remove_qualification(id(1))
        .expect("no longer referenced");
}

#[test]
fn update_validates_before_writing() {
    let mut taxonomy = Taxonomy::seeded();
    let draft = ProfessionDraft {
        name: String::new(),
        ..physician_draft("ignored")
    };

    assert!(taxonomy.update_profession(id(1), &draft).is_err());
    let stored = taxonomy.professions().get(id(1)).expect("seeded");
    assert_eq!(stored.name, "General Physician");

    assert!(matches!(
        taxonomy.update_profession(id(999), &physician_draft("Ghost")),
        Err(TaxonomyError::NotFound { .. })
    ));
}

#[test]
fn profession_list_filters_by_name() {
    let taxonomy = Taxonomy::seeded();

    let views = taxonomy.list_professions("nurse");

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].category, "Nursing");
    assert_eq!(views[0].qualification, "B.Sc Nursing - General Practice (2 yrs)");
}

#[test]
fn validator_hands_back_the_checked_ids() {
    let mut categories = EntityStore::new(Dimension::Category);
    let mut subcategories = EntityStore::new(Dimension::SubCategory);
    let medical = categories
        .create(&NamedEntityDraft::new("Medical", "MED"))
        .expect("category");
    let surgeon = subcategories
        .create(&NamedEntityDraft::new("Surgeon", "SURG"))
        .expect("sub-category");
    let mapping = MappingStore::from_links([(medical.id, vec![surgeon.id])]);
    let catalog = BTreeMap::from([(id(10), "MS - Cardiology (3 yrs)".to_string())]);
    let refs = ProfessionRefs {
        categories: &categories,
        subcategories: &subcategories,
        mapping: &mapping,
        qualifications: &catalog,
    };
    let mut draft = ProfessionDraft {
        name: "Cardiac Surgeon".to_string(),
        category_id: Some(medical.id),
        subcategory_id: Some(surgeon.id),
        qualification_id: Some(id(10)),
    };

    assert_eq!(
        validate_profession(&draft, &refs),
        Ok((medical.id, surgeon.id, id(10)))
    );

    draft.qualification_id = None;
    let mut store = ProfessionStore::new();
    match store.create(&draft, &refs) {
        Err(TaxonomyError::Validation(errors)) => {
            assert!(!errors.is_empty());
            assert!(errors.contains(fields::QUALIFICATION_ID));
        }
        other => panic!("expected qualification error, got {other:?}"),
    }
    assert!(store.is_empty());
}
