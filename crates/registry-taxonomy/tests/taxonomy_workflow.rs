use std::collections::BTreeSet;
use std::sync::Arc;

use registry_taxonomy::taxonomy::validation::{fields, CODE_DUPLICATE, NAME_REQUIRED};
use registry_taxonomy::taxonomy::{
    Dimension, EntityId, EntityStore, MappingStore, NamedEntity, NamedEntityDraft,
    ProfessionDraft, Taxonomy, TaxonomyError, TaxonomyService, TracingNotifier,
};

fn medical_only() -> EntityStore {
    EntityStore::with_records(
        Dimension::Category,
        vec![NamedEntity {
            id: EntityId(1),
            name: "Medical".to_string(),
            code: "MED".to_string(),
            description: None,
            abbreviation: None,
            is_active: true,
        }],
    )
}

#[test]
fn duplicate_code_leaves_the_collection_unchanged() {
    let mut store = medical_only();

    match store.create(&NamedEntityDraft::new("Dental", "MED")) {
        Err(TaxonomyError::Validation(errors)) => {
            assert_eq!(errors.get(fields::CODE), Some(CODE_DUPLICATE));
        }
        other => panic!("expected duplicate code, got {other:?}"),
    }
    assert_eq!(store.len(), 1);
}

#[test]
fn toggling_a_link_twice_restores_the_empty_mapping() {
    let mut mapping = MappingStore::default();

    let linked = mapping.toggle_link(Some(EntityId(1)), EntityId(5));
    assert_eq!(linked, BTreeSet::from([EntityId(5)]));

    let linked = mapping.toggle_link(Some(EntityId(1)), EntityId(5));
    assert!(linked.is_empty());
    assert!(mapping.linked(EntityId(1)).is_empty());
}

#[test]
fn profession_with_a_mapped_subcategory_is_created_active() {
    let mut taxonomy = Taxonomy::seeded();
    taxonomy
        .toggle_link(EntityId(1), EntityId(3))
        .expect("unlink pediatrician");
    assert_eq!(
        taxonomy.linked(EntityId(1)),
        BTreeSet::from([EntityId(1), EntityId(2)])
    );

    let created = taxonomy
        .create_profession(&ProfessionDraft {
            name: "Cardiac Surgeon".to_string(),
            category_id: Some(EntityId(1)),
            subcategory_id: Some(EntityId(2)),
            qualification_id: Some(EntityId(2)),
        })
        .expect("mapped profession");

    assert_eq!(created.name, "Cardiac Surgeon");
    assert_eq!(created.category_id, EntityId(1));
    assert_eq!(created.subcategory_id, EntityId(2));
    assert_eq!(created.qualification_id, EntityId(2));
    assert!(created.is_active);
}

#[test]
fn updating_a_missing_id_is_not_found_in_every_store() {
    let mut taxonomy = Taxonomy::seeded();
    let draft = NamedEntityDraft::new("Ghost", "GHOST").with_abbreviation("G");

    for dimension in Dimension::ALL {
        let before = taxonomy.store(dimension).records().to_vec();
        match taxonomy.update_entity(dimension, EntityId(999), &draft) {
            Err(TaxonomyError::NotFound { kind, id }) => {
                assert_eq!(kind, dimension.kind());
                assert_eq!(id, EntityId(999));
            }
            other => panic!("expected not found for {dimension}, got {other:?}"),
        }
        assert_eq!(taxonomy.store(dimension).records(), before.as_slice());
    }
}

#[test]
fn blank_name_with_valid_code_reports_a_single_error() {
    let service = TaxonomyService::new(Taxonomy::seeded(), Arc::new(TracingNotifier));

    match service.create_entity(Dimension::SubCategory, &NamedEntityDraft::new("", "X")) {
        Err(TaxonomyError::Validation(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors.get(fields::NAME), Some(NAME_REQUIRED));
        }
        other => panic!("expected name error, got {other:?}"),
    }
}
