//! Service-level integration tests against `InMemoryStore`.
//!
//! Verifies:
//! - The locality cascade resolves or creates countries and provinces
//! - Validation order: required fields, domain rules, foreign keys, uniqueness
//! - Store-level unique violations surface as conflicts
//! - Per-entity delete failure mapping

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use stockhub_core::{Lookup, StoreError, StoreResult};
use stockhub_inventory::{
    NewSection, NewWarehouse, Section, SectionProducts, SectionRepository, SectionService,
    Warehouse, WarehouseService,
};
use stockhub_locations::{
    Country, CountryRepository, Locality, LocalityCarries, LocalityRepository, LocalitySellers,
    LocalityService, NewLocality, Province, ProvinceRepository,
};
use stockhub_parties::{
    Buyer, BuyerService, CarryService, Employee, EmployeeInboundOrders, EmployeeRepository,
    EmployeeService, NewBuyer, NewEmployee, NewSeller, Seller, SellerService,
};
use stockhub_products::{
    NewProduct, NewProductBatch, NewProductRecord, Product, ProductBatch, ProductBatchService,
    ProductRecord, ProductRecordService, ProductService,
};
use stockhub_purchasing::{InboundOrderService, PurchaseOrderService};

use crate::store::InMemoryStore;

mod catalog;
mod inventory;
mod locations;
mod parties;

/// A seeded store plus helpers that create valid rows through the services.
struct Fixture {
    store: Arc<InMemoryStore>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::seeded()),
        }
    }

    fn localities(&self) -> LocalityService {
        LocalityService::new(self.store.clone(), self.store.clone(), self.store.clone())
    }

    fn warehouses(&self) -> WarehouseService {
        WarehouseService::new(self.store.clone(), self.store.clone())
    }

    fn sections(&self) -> SectionService {
        SectionService::new(self.store.clone(), self.store.clone(), self.store.clone())
    }

    fn employees(&self) -> EmployeeService {
        EmployeeService::new(self.store.clone(), self.store.clone())
    }

    fn buyers(&self) -> BuyerService {
        BuyerService::new(self.store.clone())
    }

    fn sellers(&self) -> SellerService {
        SellerService::new(self.store.clone(), self.store.clone())
    }

    fn carries(&self) -> CarryService {
        CarryService::new(self.store.clone(), self.store.clone())
    }

    fn products(&self) -> ProductService {
        ProductService::new(self.store.clone(), self.store.clone(), self.store.clone())
    }

    fn records(&self) -> ProductRecordService {
        ProductRecordService::new(self.store.clone(), self.store.clone())
    }

    fn batches(&self) -> ProductBatchService {
        ProductBatchService::new(self.store.clone(), self.store.clone(), self.store.clone())
    }

    fn purchase_orders(&self) -> PurchaseOrderService {
        PurchaseOrderService::new(self.store.clone(), self.store.clone(), self.store.clone())
    }

    fn inbound_orders(&self) -> InboundOrderService {
        InboundOrderService::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
        )
    }

    fn locality(&self, id: i64) -> Locality {
        self.localities()
            .save(new_locality(id, "Palermo", "Buenos Aires", "Argentina"))
            .unwrap()
    }

    fn warehouse(&self, code: &str, locality_id: i64) -> Warehouse {
        self.warehouses()
            .create(new_warehouse(code, locality_id))
            .unwrap()
    }

    fn section(&self, number: i64, warehouse_id: i64) -> Section {
        self.sections()
            .create(new_section(number, warehouse_id))
            .unwrap()
    }

    fn employee(&self, card: &str, warehouse_id: i64) -> Employee {
        self.employees()
            .create(NewEmployee {
                card_number_id: card.to_string(),
                first_name: "Ana".into(),
                last_name: "Ruiz".into(),
                warehouse_id,
            })
            .unwrap()
    }

    fn buyer(&self, card: &str) -> Buyer {
        self.buyers()
            .create(NewBuyer {
                card_number_id: card.to_string(),
                first_name: "Luis".into(),
                last_name: "Paz".into(),
            })
            .unwrap()
    }

    fn seller(&self, cid: i64, locality_id: i64) -> Seller {
        self.sellers()
            .create(NewSeller {
                cid,
                company_name: "Frigo SA".into(),
                address: "Dock 4".into(),
                telephone: "555-0101".into(),
                locality_id,
            })
            .unwrap()
    }

    fn product(&self, code: &str, seller_id: Option<i64>) -> Product {
        self.products()
            .create(new_product(code, seller_id))
            .unwrap()
    }

    fn record(&self, product_id: i64) -> ProductRecord {
        self.records()
            .create(NewProductRecord {
                last_update_date: Some(timestamp()),
                purchase_price: 10.0,
                sale_price: 15.5,
                product_id,
            })
            .unwrap()
    }

    fn batch(&self, number: i64, product_id: i64, section_id: i64, quantity: i64) -> ProductBatch {
        self.batches()
            .create(new_batch(number, product_id, section_id, quantity))
            .unwrap()
    }

    /// Locality 1 with warehouse "WH-1" and section 1.
    fn topology(&self) -> (Locality, Warehouse, Section) {
        let locality = self.locality(1);
        let warehouse = self.warehouse("WH-1", locality.id);
        let section = self.section(1, warehouse.id);
        (locality, warehouse, section)
    }
}

fn new_locality(id: i64, name: &str, province: &str, country: &str) -> NewLocality {
    NewLocality {
        id,
        locality_name: name.to_string(),
        province_name: province.to_string(),
        country_name: country.to_string(),
    }
}

fn new_warehouse(code: &str, locality_id: i64) -> NewWarehouse {
    NewWarehouse {
        warehouse_code: code.to_string(),
        address: "Main St 1".into(),
        telephone: "555-0100".into(),
        locality_id,
        minimum_capacity: 10,
        minimum_temperature: Some(0.0),
    }
}

fn new_section(number: i64, warehouse_id: i64) -> NewSection {
    NewSection {
        section_number: number,
        current_temperature: Some(-5.0),
        minimum_temperature: Some(-20.0),
        current_capacity: Some(0),
        minimum_capacity: 5,
        maximum_capacity: 50,
        warehouse_id,
        product_type_id: 1,
    }
}

fn new_product(code: &str, seller_id: Option<i64>) -> NewProduct {
    NewProduct {
        product_code: code.to_string(),
        description: "frozen peas".into(),
        width: 1.0,
        height: 2.0,
        length: 3.0,
        net_weight: 0.5,
        expiration_rate: 0.1,
        recommended_freezing_temperature: Some(-18.0),
        freezing_rate: 0.2,
        product_type_id: 1,
        seller_id,
    }
}

fn new_batch(number: i64, product_id: i64, section_id: i64, quantity: i64) -> NewProductBatch {
    NewProductBatch {
        batch_number: number,
        current_quantity: Some(quantity),
        current_temperature: Some(-10.0),
        due_date: Some(date(2024, 12, 31)),
        initial_quantity: quantity.max(1),
        manufacturing_date: Some(date(2024, 1, 15)),
        manufacturing_hour: Some(0),
        minimum_temperature: Some(-20.0),
        product_id,
        section_id,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn timestamp() -> NaiveDateTime {
    date(2024, 3, 1).and_hms_opt(9, 30, 0).unwrap()
}

/// Counts every country and province call; delegates to the store.
struct GeoSpy {
    inner: Arc<InMemoryStore>,
    calls: AtomicUsize,
}

impl GeoSpy {
    fn new(inner: Arc<InMemoryStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl Lookup<Country> for GeoSpy {
    fn get_by_id(&self, id: i64) -> StoreResult<Country> {
        self.hit();
        self.inner.get_by_id(id)
    }
}

impl CountryRepository for GeoSpy {
    fn get_by_name(&self, country_name: &str) -> StoreResult<Country> {
        self.hit();
        CountryRepository::get_by_name(&*self.inner, country_name)
    }

    fn create(&self, country_name: &str) -> StoreResult<Country> {
        self.hit();
        CountryRepository::create(&*self.inner, country_name)
    }
}

impl Lookup<Province> for GeoSpy {
    fn get_by_id(&self, id: i64) -> StoreResult<Province> {
        self.hit();
        self.inner.get_by_id(id)
    }
}

impl ProvinceRepository for GeoSpy {
    fn get_by_name(&self, province_name: &str, country_id: i64) -> StoreResult<Province> {
        self.hit();
        ProvinceRepository::get_by_name(&*self.inner, province_name, country_id)
    }

    fn create(&self, province_name: &str, country_id: i64) -> StoreResult<Province> {
        self.hit();
        ProvinceRepository::create(&*self.inner, province_name, country_id)
    }
}

/// Localities whose insert always fails after the cascade ran.
struct BrokenLocalities {
    inner: Arc<InMemoryStore>,
}

impl Lookup<Locality> for BrokenLocalities {
    fn get_by_id(&self, id: i64) -> StoreResult<Locality> {
        self.inner.get_by_id(id)
    }
}

impl LocalityRepository for BrokenLocalities {
    fn get_all(&self) -> StoreResult<Vec<Locality>> {
        LocalityRepository::get_all(&*self.inner)
    }

    fn create(&self, _locality: &Locality) -> StoreResult<Locality> {
        Err(StoreError::backend("disk full"))
    }

    fn report_sellers(&self, locality_id: Option<i64>) -> StoreResult<Vec<LocalitySellers>> {
        self.inner.report_sellers(locality_id)
    }

    fn report_carries(&self, locality_id: Option<i64>) -> StoreResult<Vec<LocalityCarries>> {
        self.inner.report_carries(locality_id)
    }
}

/// Sections whose uniqueness probe never sees the competing row, as when a
/// concurrent request inserts between probe and write.
struct RacingSections {
    inner: Arc<InMemoryStore>,
}

impl Lookup<Section> for RacingSections {
    fn get_by_id(&self, id: i64) -> StoreResult<Section> {
        self.inner.get_by_id(id)
    }
}

impl SectionRepository for RacingSections {
    fn get_all(&self) -> StoreResult<Vec<Section>> {
        SectionRepository::get_all(&*self.inner)
    }

    fn get_by_section_number(&self, _section_number: i64) -> StoreResult<Section> {
        Err(StoreError::NotFound)
    }

    fn create(&self, section: &Section) -> StoreResult<Section> {
        SectionRepository::create(&*self.inner, section)
    }

    fn update(&self, section: &Section) -> StoreResult<Section> {
        SectionRepository::update(&*self.inner, section)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        SectionRepository::delete(&*self.inner, id)
    }

    fn report_products(&self, section_id: Option<i64>) -> StoreResult<Vec<SectionProducts>> {
        self.inner.report_products(section_id)
    }
}

/// Counts employee deletes; delegates everything.
struct EmployeeSpy {
    inner: Arc<InMemoryStore>,
    deletes: AtomicUsize,
}

impl Lookup<Employee> for EmployeeSpy {
    fn get_by_id(&self, id: i64) -> StoreResult<Employee> {
        self.inner.get_by_id(id)
    }
}

impl EmployeeRepository for EmployeeSpy {
    fn get_all(&self) -> StoreResult<Vec<Employee>> {
        EmployeeRepository::get_all(&*self.inner)
    }

    fn create(&self, employee: &Employee) -> StoreResult<Employee> {
        EmployeeRepository::create(&*self.inner, employee)
    }

    fn update(&self, employee: &Employee) -> StoreResult<Employee> {
        EmployeeRepository::update(&*self.inner, employee)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        EmployeeRepository::delete(&*self.inner, id)
    }

    fn report_inbound_orders(
        &self,
        employee_id: Option<i64>,
    ) -> StoreResult<Vec<EmployeeInboundOrders>> {
        self.inner.report_inbound_orders(employee_id)
    }
}
