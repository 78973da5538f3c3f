use super::*;

use stockhub_core::{Patch, ServiceError};
use stockhub_inventory::{SectionPatch, WarehousePatch};

#[test]
fn warehouse_requires_existing_locality() {
    let fx = Fixture::new();

    let err = fx.warehouses().create(new_warehouse("WH-1", 77)).unwrap_err();

    assert_eq!(err, ServiceError::dependency_not_found("locality", "id: 77"));
}

#[test]
fn warehouse_code_is_unique() {
    let fx = Fixture::new();
    let locality = fx.locality(1);
    fx.warehouse("WH-1", locality.id);

    let err = fx.warehouses().create(new_warehouse("WH-1", locality.id)).unwrap_err();

    assert_eq!(err, ServiceError::conflict("warehouse", "warehouse_code: WH-1"));
}

#[test]
fn warehouse_accepts_zero_degrees() {
    let fx = Fixture::new();
    let locality = fx.locality(1);

    let warehouse = fx.warehouse("WH-0", locality.id);

    assert_eq!(warehouse.minimum_temperature, 0.0);
}

#[test]
fn warehouse_update_keeps_own_code() {
    let fx = Fixture::new();
    let locality = fx.locality(1);
    let warehouse = fx.warehouse("WH-1", locality.id);

    let updated = fx
        .warehouses()
        .update(
            warehouse.id,
            WarehousePatch {
                warehouse_code: Patch::Set("WH-1".into()),
                address: Patch::Set("Dock 2".into()),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.address, "Dock 2");
    assert_eq!(updated.telephone, warehouse.telephone);
}

#[test]
fn empty_patch_is_rejected_after_lookup() {
    let fx = Fixture::new();
    let (_, warehouse, _) = fx.topology();

    assert_eq!(
        fx.warehouses().update(warehouse.id, WarehousePatch::default()).unwrap_err(),
        ServiceError::EmptyArguments
    );
    assert_eq!(
        fx.warehouses().update(404, WarehousePatch::default()).unwrap_err(),
        ServiceError::not_found("warehouse")
    );
}

#[test]
fn warehouse_delete_with_sections_is_internal() {
    let fx = Fixture::new();
    let (_, warehouse, _) = fx.topology();

    let err = fx.warehouses().delete(warehouse.id).unwrap_err();

    assert!(matches!(err, ServiceError::Internal(_)));
}

#[test]
fn section_number_taken_by_another_section_conflicts() {
    let fx = Fixture::new();
    let (_, warehouse, first) = fx.topology();
    let second = fx.section(2, warehouse.id);

    let err = fx
        .sections()
        .update(
            second.id,
            SectionPatch {
                section_number: Patch::Set(first.section_number),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert_eq!(err, ServiceError::conflict("section", "id: 1"));
}

#[test]
fn section_capacity_rule_wins_over_uniqueness() {
    let fx = Fixture::new();
    let (_, warehouse, first) = fx.topology();
    let second = fx.section(2, warehouse.id);

    let err = fx
        .sections()
        .update(
            second.id,
            SectionPatch {
                section_number: Patch::Set(first.section_number),
                minimum_capacity: Patch::Set(100),
                maximum_capacity: Patch::Set(10),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, ServiceError::BadRequest(_)));
}

#[test]
fn section_required_field_wins_over_rules() {
    let fx = Fixture::new();
    let (_, warehouse, _) = fx.topology();

    let mut input = new_section(3, warehouse.id);
    input.product_type_id = 0;
    input.minimum_capacity = 500;

    assert_eq!(
        fx.sections().create(input).unwrap_err(),
        ServiceError::ZeroValue("product_type_id")
    );
}

#[test]
fn section_unknown_product_type_is_dependency_not_found() {
    let fx = Fixture::new();
    let (_, warehouse, _) = fx.topology();

    let mut input = new_section(3, warehouse.id);
    input.product_type_id = 40;

    assert_eq!(
        fx.sections().create(input).unwrap_err(),
        ServiceError::dependency_not_found("product_type", "id: 40")
    );
}

#[test]
fn section_update_of_missing_section_is_not_found() {
    let fx = Fixture::new();
    fx.topology();

    let err = fx
        .sections()
        .update(
            99,
            SectionPatch {
                warehouse_id: Patch::Set(12345),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert_eq!(err, ServiceError::not_found("section"));
}

#[test]
fn lost_uniqueness_race_reports_conflict() {
    let fx = Fixture::new();
    let (_, warehouse, _) = fx.topology();
    let racing = Arc::new(RacingSections { inner: fx.store.clone() });
    let service = SectionService::new(racing, fx.store.clone(), fx.store.clone());

    let err = service.create(new_section(1, warehouse.id)).unwrap_err();

    assert_eq!(err, ServiceError::conflict("section", "id: 1"));
}

#[test]
fn section_report_sums_batch_quantities() {
    let fx = Fixture::new();
    let (_, warehouse, stocked) = fx.topology();
    let empty = fx.section(2, warehouse.id);
    let product = fx.product("P-1", None);
    fx.batch(10, product.id, stocked.id, 30);
    fx.batch(11, product.id, stocked.id, 12);

    let report = fx.sections().report_products(None).unwrap();

    let count = |id| report.iter().find(|r| r.section_id == id).map(|r| r.products_count);
    assert_eq!(count(stocked.id), Some(42));
    assert_eq!(count(empty.id), Some(0));

    assert_eq!(
        fx.sections().report_products(Some(77)).unwrap_err(),
        ServiceError::not_found("section")
    );
}

#[test]
fn section_create_capacity_rule_before_duplicate_number() {
    let fx = Fixture::new();
    let (_, warehouse, taken) = fx.topology();

    let mut input = new_section(taken.section_number, warehouse.id);
    input.minimum_capacity = 5;
    input.maximum_capacity = 4;

    assert_eq!(
        fx.sections().create(input).unwrap_err(),
        ServiceError::bad_request("minimum_capacity cannot be greater than maximum_capacity")
    );
}

#[test]
fn section_renumbered_onto_taken_number_names_the_number() {
    let fx = Fixture::new();
    let (_, warehouse, _) = fx.topology();
    fx.section(2, warehouse.id);
    let moving = fx.section(7, warehouse.id);

    let err = fx
        .sections()
        .update(
            moving.id,
            SectionPatch {
                section_number: Patch::Set(2),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert_eq!(err, ServiceError::conflict("section", "id: 2"));
    assert_eq!(err.to_string(), "conflict: section with id: 2 already exists");
}
