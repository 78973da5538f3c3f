use super::*;

use stockhub_core::{Patch, ServiceError};
use stockhub_parties::{BuyerPatch, EmployeePatch, SellerPatch};
use stockhub_purchasing::{NewInboundOrder, NewPurchaseOrder};

#[test]
fn unknown_employee_delete_never_reaches_store() {
    let fx = Fixture::new();
    let spy = Arc::new(EmployeeSpy {
        inner: fx.store.clone(),
        deletes: AtomicUsize::new(0),
    });
    let service = EmployeeService::new(spy.clone(), fx.store.clone());

    let err = service.delete(999).unwrap_err();

    assert_eq!(err, ServiceError::not_found("employee"));
    assert_eq!(spy.deletes.load(Ordering::SeqCst), 0);
}

#[test]
fn employee_requires_existing_warehouse() {
    let fx = Fixture::new();

    let err = fx
        .employees()
        .create(NewEmployee {
            card_number_id: "E-1".into(),
            first_name: "Ana".into(),
            last_name: "Ruiz".into(),
            warehouse_id: 3,
        })
        .unwrap_err();

    assert_eq!(err, ServiceError::dependency_not_found("warehouse", "id: 3"));
}

#[test]
fn employee_update_to_unknown_warehouse_fails_only_when_changed() {
    let fx = Fixture::new();
    let (_, warehouse, _) = fx.topology();
    let employee = fx.employee("E-1", warehouse.id);

    let same = fx
        .employees()
        .update(
            employee.id,
            EmployeePatch {
                warehouse_id: Patch::Set(warehouse.id),
                first_name: Patch::Set("Ines".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(same.first_name, "Ines");

    let err = fx
        .employees()
        .update(
            employee.id,
            EmployeePatch {
                warehouse_id: Patch::Set(500),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, ServiceError::dependency_not_found("warehouse", "id: 500"));
}

#[test]
fn restricted_employee_delete_is_invalid_arguments() {
    let fx = Fixture::new();
    let (_, warehouse, section) = fx.topology();
    let employee = fx.employee("E-1", warehouse.id);
    let product = fx.product("P-1", None);
    let batch = fx.batch(1, product.id, section.id, 5);
    fx.inbound_orders()
        .create(NewInboundOrder {
            order_date: Some(date(2024, 2, 1)),
            order_number: "IN-1".into(),
            employee_id: employee.id,
            product_batch_id: batch.id,
            warehouse_id: warehouse.id,
        })
        .unwrap();

    let err = fx.employees().delete(employee.id).unwrap_err();

    assert!(matches!(err, ServiceError::InvalidArguments(_)));
    assert_eq!(err.status_code(), 422);
}

#[test]
fn employee_report_counts_inbound_orders() {
    let fx = Fixture::new();
    let (_, warehouse, section) = fx.topology();
    let busy = fx.employee("E-1", warehouse.id);
    let idle = fx.employee("E-2", warehouse.id);
    let product = fx.product("P-1", None);
    let batch = fx.batch(1, product.id, section.id, 5);
    for number in ["IN-1", "IN-2"] {
        fx.inbound_orders()
            .create(NewInboundOrder {
                order_date: Some(date(2024, 2, 1)),
                order_number: number.into(),
                employee_id: busy.id,
                product_batch_id: batch.id,
                warehouse_id: warehouse.id,
            })
            .unwrap();
    }

    let report = fx.employees().report_inbound_orders(None).unwrap();

    let count = |id| report.iter().find(|r| r.id == id).map(|r| r.inbound_orders_count);
    assert_eq!(count(busy.id), Some(2));
    assert_eq!(count(idle.id), Some(0));
}

#[test]
fn buyer_card_number_is_unique_except_self() {
    let fx = Fixture::new();
    let first = fx.buyer("B-1");
    let second = fx.buyer("B-2");

    let kept = fx
        .buyers()
        .update(
            first.id,
            BuyerPatch {
                card_number_id: Patch::Set("B-1".into()),
                last_name: Patch::Set("Gil".into()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(kept.last_name, "Gil");
    assert_eq!(kept.first_name, first.first_name);

    let err = fx
        .buyers()
        .update(
            second.id,
            BuyerPatch {
                card_number_id: Patch::Set("B-1".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, ServiceError::conflict("buyer", "card_number_id: B-1"));
}

#[test]
fn buyer_update_with_empty_name_is_zero_value() {
    let fx = Fixture::new();
    let buyer = fx.buyer("B-1");

    let err = fx
        .buyers()
        .update(
            buyer.id,
            BuyerPatch {
                first_name: Patch::Set(String::new()),
                ..Default::default()
            },
        )
        .unwrap_err();

    assert_eq!(err, ServiceError::ZeroValue("first_name"));
}

#[test]
fn buyer_with_orders_cannot_be_deleted() {
    let fx = Fixture::new();
    let buyer = fx.buyer("B-1");
    let product = fx.product("P-1", None);
    let record = fx.record(product.id);
    fx.purchase_orders()
        .create(NewPurchaseOrder {
            order_number: "PO-1".into(),
            order_date: Some(date(2024, 4, 2)),
            tracking_code: "TRK-1".into(),
            buyer_id: buyer.id,
            product_record_id: record.id,
            order_status_id: 1,
        })
        .unwrap();

    let err = fx.buyers().delete(buyer.id).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArguments(_)));

    let report = fx.buyers().report_purchase_orders(Some(buyer.id)).unwrap();
    assert_eq!(report[0].purchase_orders_count, 1);
}

#[test]
fn seller_cid_must_be_positive() {
    let fx = Fixture::new();
    let locality = fx.locality(1);

    let err = fx
        .sellers()
        .create(NewSeller {
            cid: -4,
            company_name: "Frigo SA".into(),
            address: "Dock 4".into(),
            telephone: "555".into(),
            locality_id: locality.id,
        })
        .unwrap_err();

    assert!(matches!(err, ServiceError::BadRequest(_)));
}

#[test]
fn seller_cid_conflict_and_delete_policy() {
    let fx = Fixture::new();
    let locality = fx.locality(1);
    let first = fx.seller(10, locality.id);
    let second = fx.seller(11, locality.id);

    let err = fx
        .sellers()
        .update(
            second.id,
            SellerPatch {
                cid: Patch::Set(10),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert_eq!(err, ServiceError::conflict("seller", "cid: 10"));

    fx.product("P-1", Some(first.id));
    let err = fx.sellers().delete(first.id).unwrap_err();
    assert!(matches!(err, ServiceError::Internal(_)));

    fx.sellers().delete(second.id).unwrap();
    assert_eq!(
        fx.sellers().get_by_id(second.id).unwrap_err(),
        ServiceError::not_found("seller")
    );
}

#[test]
fn carry_cid_is_unique() {
    let fx = Fixture::new();
    let locality = fx.locality(1);
    let input = || stockhub_parties::NewCarry {
        cid: "CAR-1".into(),
        company_name: "Andes Cargo".into(),
        address: "Route 9".into(),
        telephone: "555-0199".into(),
        locality_id: locality.id,
    };
    fx.carries().create(input()).unwrap();

    assert_eq!(
        fx.carries().create(input()).unwrap_err(),
        ServiceError::conflict("carry", "cid: CAR-1")
    );
}
