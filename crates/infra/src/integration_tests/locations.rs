use super::*;

use stockhub_core::ServiceError;

#[test]
fn save_creates_missing_country_and_province() {
    let fx = Fixture::new();

    let locality = fx.localities().save(new_locality(7, "Palermo", "Buenos Aires", "Argentina")).unwrap();

    assert_eq!(locality.id, 7);
    let country = CountryRepository::get_by_name(&*fx.store, "Argentina").unwrap();
    let province = ProvinceRepository::get_by_name(&*fx.store, "Buenos Aires", country.id).unwrap();
    assert_eq!(locality.province_id, province.id);
}

#[test]
fn save_reuses_existing_country_and_province() {
    let fx = Fixture::new();
    let service = fx.localities();

    let first = service.save(new_locality(1, "Palermo", "Buenos Aires", "Argentina")).unwrap();
    let second = service.save(new_locality(2, "Recoleta", "Buenos Aires", "Argentina")).unwrap();

    assert_eq!(first.province_id, second.province_id);
    let countries: Vec<_> = (1..=3)
        .filter_map(|id| Lookup::<Country>::get_by_id(&*fx.store, id).ok())
        .collect();
    assert_eq!(countries.len(), 1);
}

#[test]
fn padded_names_adopt_existing_rows() {
    let fx = Fixture::new();
    let service = fx.localities();

    let first = service.save(new_locality(1, "Palermo", "Buenos Aires", "Argentina")).unwrap();
    let second = service
        .save(new_locality(2, " Recoleta ", "Buenos Aires  ", "Argentina "))
        .unwrap();

    assert_eq!(first.province_id, second.province_id);
    assert_eq!(second.locality_name, "Recoleta");
    assert!(Lookup::<Country>::get_by_id(&*fx.store, 2).is_err());
    let country = CountryRepository::get_by_name(&*fx.store, "Argentina").unwrap();
    assert_eq!(country.id, 1);
}

#[test]
fn same_province_name_in_another_country_is_a_new_province() {
    let fx = Fixture::new();
    let service = fx.localities();

    let a = service.save(new_locality(1, "Centro", "Cordoba", "Argentina")).unwrap();
    let b = service.save(new_locality(2, "Centro", "Cordoba", "Spain")).unwrap();

    assert_ne!(a.province_id, b.province_id);
}

#[test]
fn duplicate_id_conflicts_before_touching_geography() {
    let fx = Fixture::new();
    fx.locality(5);

    let spy = Arc::new(GeoSpy::new(fx.store.clone()));
    let service = LocalityService::new(fx.store.clone(), spy.clone(), spy.clone());

    let err = service.save(new_locality(5, "Nueva", "Mendoza", "Chile")).unwrap_err();

    assert_eq!(err, ServiceError::conflict("locality", "id"));
    assert_eq!(spy.calls(), 0);
}

#[test]
fn required_fields_are_checked_in_order() {
    let fx = Fixture::new();

    let err = fx.localities().save(new_locality(0, "", "", "")).unwrap_err();
    assert_eq!(err, ServiceError::ZeroValue("locality_name"));

    let err = fx.localities().save(new_locality(0, "Palermo", "", "")).unwrap_err();
    assert_eq!(err, ServiceError::ZeroValue("id"));

    let err = fx.localities().save(new_locality(3, "Palermo", "BA", " ")).unwrap_err();
    assert_eq!(err, ServiceError::ZeroValue("country_name"));
}

#[test]
fn failed_insert_keeps_created_province() {
    let fx = Fixture::new();
    let broken = Arc::new(BrokenLocalities { inner: fx.store.clone() });
    let service = LocalityService::new(broken, fx.store.clone(), fx.store.clone());

    let err = service.save(new_locality(9, "Palermo", "Buenos Aires", "Uruguay")).unwrap_err();

    assert!(matches!(err, ServiceError::Internal(_)));
    let country = CountryRepository::get_by_name(&*fx.store, "Uruguay").unwrap();
    assert!(ProvinceRepository::get_by_name(&*fx.store, "Buenos Aires", country.id).is_ok());
}

#[test]
fn unknown_locality_is_not_found() {
    let fx = Fixture::new();
    assert_eq!(
        fx.localities().get_by_id(42).unwrap_err(),
        ServiceError::not_found("locality")
    );
}

#[test]
fn seller_report_counts_zero_for_empty_localities() {
    let fx = Fixture::new();
    let busy = fx.locality(1);
    let quiet = fx.locality(2);
    fx.seller(100, busy.id);
    fx.seller(101, busy.id);

    let report = fx.localities().report_sellers(None).unwrap();

    let count = |id| report.iter().find(|r| r.locality_id == id).map(|r| r.sellers_count);
    assert_eq!(count(busy.id), Some(2));
    assert_eq!(count(quiet.id), Some(0));
}

#[test]
fn carry_report_for_one_locality() {
    let fx = Fixture::new();
    let locality = fx.locality(1);
    fx.carries()
        .create(stockhub_parties::NewCarry {
            cid: "CAR-1".into(),
            company_name: "Andes Cargo".into(),
            address: "Route 9".into(),
            telephone: "555-0199".into(),
            locality_id: locality.id,
        })
        .unwrap();

    let report = fx.localities().report_carries(Some(locality.id)).unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].carries_count, 1);

    assert_eq!(
        fx.localities().report_carries(Some(99)).unwrap_err(),
        ServiceError::not_found("locality")
    );
}
