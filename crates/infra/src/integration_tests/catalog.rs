use super::*;

use proptest::prelude::*;

use stockhub_core::{Patch, ServiceError};
use stockhub_products::ProductPatch;
use stockhub_purchasing::{NewInboundOrder, NewPurchaseOrder};

#[test]
fn product_requires_seller_only_when_given() {
    let fx = Fixture::new();

    let unowned = fx.product("P-1", None);
    assert_eq!(unowned.seller_id, None);

    let err = fx.products().create(new_product("P-2", Some(8))).unwrap_err();
    assert_eq!(err, ServiceError::dependency_not_found("seller", "id: 8"));
}

#[test]
fn product_code_conflict() {
    let fx = Fixture::new();
    fx.product("P-1", None);

    assert_eq!(
        fx.products().create(new_product("P-1", None)).unwrap_err(),
        ServiceError::conflict("product", "product_code: P-1")
    );
}

#[test]
fn product_update_can_move_to_zero_degrees() {
    let fx = Fixture::new();
    let product = fx.product("P-1", None);

    let updated = fx
        .products()
        .update(
            product.id,
            ProductPatch {
                recommended_freezing_temperature: Patch::Set(0.0),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(updated.recommended_freezing_temperature, 0.0);
    assert_eq!(updated.product_code, "P-1");
}

#[test]
fn product_with_records_cannot_be_deleted() {
    let fx = Fixture::new();
    let product = fx.product("P-1", None);
    fx.record(product.id);

    assert!(matches!(
        fx.products().delete(product.id).unwrap_err(),
        ServiceError::Internal(_)
    ));

    let report = fx.products().report_records(None).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].records_count, 1);
}

#[test]
fn record_prices_must_be_positive() {
    let fx = Fixture::new();
    let product = fx.product("P-1", None);

    let err = fx
        .records()
        .create(NewProductRecord {
            last_update_date: Some(timestamp()),
            purchase_price: -1.0,
            sale_price: 3.0,
            product_id: product.id,
        })
        .unwrap_err();

    assert!(matches!(err, ServiceError::BadRequest(_)));
}

#[test]
fn record_for_unknown_product() {
    let fx = Fixture::new();

    let err = fx
        .records()
        .create(NewProductRecord {
            last_update_date: Some(timestamp()),
            purchase_price: 1.0,
            sale_price: 3.0,
            product_id: 12,
        })
        .unwrap_err();

    assert_eq!(err, ServiceError::dependency_not_found("product", "id: 12"));
}

#[test]
fn batch_rules_run_before_foreign_keys() {
    let fx = Fixture::new();

    let mut input = new_batch(1, 50, 60, 10);
    input.current_quantity = Some(11);

    assert!(matches!(
        fx.batches().create(input).unwrap_err(),
        ServiceError::BadRequest(_)
    ));
}

#[test]
fn batch_number_conflict_and_missing_section() {
    let fx = Fixture::new();
    let (_, _, section) = fx.topology();
    let product = fx.product("P-1", None);
    fx.batch(1, product.id, section.id, 10);

    assert_eq!(
        fx.batches().create(new_batch(1, product.id, section.id, 10)).unwrap_err(),
        ServiceError::conflict("product_batch", "batch_number: 1")
    );
    assert_eq!(
        fx.batches().create(new_batch(2, product.id, 404, 10)).unwrap_err(),
        ServiceError::dependency_not_found("section", "id: 404")
    );
}

#[test]
fn batch_at_midnight_with_zero_stock_is_valid() {
    let fx = Fixture::new();
    let (_, _, section) = fx.topology();
    let product = fx.product("P-1", None);

    let batch = fx.batch(3, product.id, section.id, 0);

    assert_eq!(batch.current_quantity, 0);
    assert_eq!(batch.manufacturing_hour, 0);
}

#[test]
fn purchase_and_inbound_order_chains() {
    let fx = Fixture::new();
    let (_, warehouse, section) = fx.topology();
    let employee = fx.employee("E-1", warehouse.id);
    let buyer = fx.buyer("B-1");
    let product = fx.product("P-1", None);
    let record = fx.record(product.id);
    let batch = fx.batch(1, product.id, section.id, 4);

    let purchase = NewPurchaseOrder {
        order_number: "PO-1".into(),
        order_date: Some(date(2024, 5, 5)),
        tracking_code: "TRK".into(),
        buyer_id: buyer.id,
        product_record_id: record.id,
        order_status_id: 1,
    };
    let created = fx.purchase_orders().create(purchase.clone()).unwrap();
    assert_eq!(fx.purchase_orders().get_by_id(created.id).unwrap(), created);
    assert_eq!(
        fx.purchase_orders().create(purchase).unwrap_err(),
        ServiceError::conflict("purchase_order", "order_number: PO-1")
    );

    let inbound = NewInboundOrder {
        order_date: Some(date(2024, 5, 6)),
        order_number: "IN-1".into(),
        employee_id: employee.id,
        product_batch_id: batch.id,
        warehouse_id: warehouse.id,
    };
    fx.inbound_orders().create(inbound.clone()).unwrap();
    let err = fx
        .inbound_orders()
        .create(NewInboundOrder {
            order_number: "IN-2".into(),
            product_batch_id: 999,
            ..inbound
        })
        .unwrap_err();
    assert_eq!(err, ServiceError::dependency_not_found("product_batch", "id: 999"));
}

#[test]
fn missing_order_date_is_zero_value() {
    let fx = Fixture::new();

    let err = fx
        .inbound_orders()
        .create(NewInboundOrder {
            order_date: None,
            order_number: "IN-1".into(),
            employee_id: 1,
            product_batch_id: 1,
            warehouse_id: 1,
        })
        .unwrap_err();

    assert_eq!(err, ServiceError::ZeroValue("order_date"));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Property: fields absent from an update keep their stored values.
    #[test]
    fn product_update_preserves_unset_fields(
        width in proptest::option::of(0.1f64..100.0),
        description in proptest::option::of("[a-z]{1,12}"),
    ) {
        let fx = Fixture::new();
        let before = fx.product("P-1", None);
        let patch = ProductPatch {
            width: width.into(),
            description: description.clone().into(),
            net_weight: Patch::Set(before.net_weight),
            ..Default::default()
        };

        let after = fx.products().update(before.id, patch).unwrap();

        prop_assert_eq!(after.width, width.unwrap_or(before.width));
        prop_assert_eq!(&after.description, description.as_ref().unwrap_or(&before.description));
        prop_assert_eq!(after.height, before.height);
        prop_assert_eq!(after.product_type_id, before.product_type_id);
        prop_assert_eq!(after.seller_id, before.seller_id);
    }
}
