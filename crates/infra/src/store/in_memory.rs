use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockhub_core::{Entity, Lookup, StoreError, StoreResult};
use stockhub_inventory::{
    ProductType, ProductTypeRepository, Section, SectionProducts, SectionRepository, Warehouse,
    WarehouseRepository,
};
use stockhub_locations::{
    Country, CountryRepository, Locality, LocalityCarries, LocalityRepository, LocalitySellers,
    Province, ProvinceRepository,
};
use stockhub_parties::{
    Buyer, BuyerPurchaseOrders, BuyerRepository, Carry, CarryRepository, Employee,
    EmployeeInboundOrders, EmployeeRepository, Seller, SellerRepository,
};
use stockhub_products::{
    Product, ProductBatch, ProductBatchRepository, ProductRecord, ProductRecordRepository,
    ProductRecords, ProductRepository,
};
use stockhub_purchasing::{
    InboundOrder, InboundOrderRepository, PurchaseOrder, PurchaseOrderRepository,
};

/// Product types available in a fresh store.
pub(crate) const DEFAULT_PRODUCT_TYPES: [&str; 3] = ["frozen", "refrigerated", "dry"];

trait Row: Entity + Clone {
    fn set_id(&mut self, id: i64);
}

macro_rules! impl_row {
    ($($t:ty),* $(,)?) => {
        $(impl Row for $t {
            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })*
    };
}

impl_row!(
    Country,
    Province,
    Locality,
    Warehouse,
    ProductType,
    Section,
    Employee,
    Buyer,
    Seller,
    Carry,
    Product,
    ProductRecord,
    ProductBatch,
    PurchaseOrder,
    InboundOrder,
);

#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Row> Table<T> {
    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: i64) -> StoreResult<T> {
        self.rows.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> StoreResult<T> {
        self.rows
            .values()
            .find(|row| pred(*row))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    fn count(&self, pred: impl Fn(&T) -> bool) -> i64 {
        self.rows.values().filter(|row| pred(*row)).count() as i64
    }

    /// Fails with `Conflict(constraint)` when a row other than `except`
    /// matches `clash`.
    fn unique(
        &self,
        except: Option<i64>,
        constraint: &str,
        clash: impl Fn(&T) -> bool,
    ) -> StoreResult<()> {
        let taken = self
            .rows
            .values()
            .any(|row| Some(row.id()) != except && clash(row));
        if taken {
            Err(StoreError::conflict(constraint))
        } else {
            Ok(())
        }
    }

    fn insert(&mut self, row: &T) -> T {
        self.last_id += 1;
        let mut row = row.clone();
        row.set_id(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn insert_keyed(&mut self, row: &T, constraint: &str) -> StoreResult<T> {
        if self.rows.contains_key(&row.id()) {
            return Err(StoreError::conflict(constraint));
        }
        self.last_id = self.last_id.max(row.id());
        self.rows.insert(row.id(), row.clone());
        Ok(row.clone())
    }

    fn replace(&mut self, row: &T) -> StoreResult<T> {
        match self.rows.get_mut(&row.id()) {
            Some(slot) => {
                *slot = row.clone();
                Ok(row.clone())
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn remove(&mut self, id: i64) -> StoreResult<()> {
        self.rows.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

#[derive(Debug, Default)]
struct Tables {
    countries: Table<Country>,
    provinces: Table<Province>,
    localities: Table<Locality>,
    warehouses: Table<Warehouse>,
    product_types: Table<ProductType>,
    sections: Table<Section>,
    employees: Table<Employee>,
    buyers: Table<Buyer>,
    sellers: Table<Seller>,
    carries: Table<Carry>,
    products: Table<Product>,
    product_records: Table<ProductRecord>,
    product_batches: Table<ProductBatch>,
    purchase_orders: Table<PurchaseOrder>,
    inbound_orders: Table<InboundOrder>,
}

fn restrict(referenced: bool, constraint: &str) -> StoreResult<()> {
    if referenced {
        Err(StoreError::backend(format!(
            "delete violates foreign key constraint {constraint}"
        )))
    } else {
        Ok(())
    }
}

/// In-memory implementation of every repository.
///
/// Enforces the unique and delete-restrict constraints declared by the SQL
/// schema so both backends fail the same way. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with the default product types.
    pub fn seeded() -> Self {
        let mut tables = Tables::default();
        for description in DEFAULT_PRODUCT_TYPES {
            tables.product_types.insert(&ProductType {
                id: 0,
                description: description.to_string(),
            });
        }
        Self {
            tables: RwLock::new(tables),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))
    }
}

macro_rules! impl_lookup {
    ($($t:ty => $table:ident),* $(,)?) => {
        $(impl Lookup<$t> for InMemoryStore {
            fn get_by_id(&self, id: i64) -> StoreResult<$t> {
                self.read()?.$table.get(id)
            }
        })*
    };
}

impl_lookup!(
    Country => countries,
    Province => provinces,
    Locality => localities,
    Warehouse => warehouses,
    ProductType => product_types,
    Section => sections,
    Employee => employees,
    Buyer => buyers,
    Seller => sellers,
    Carry => carries,
    Product => products,
    ProductRecord => product_records,
    ProductBatch => product_batches,
    PurchaseOrder => purchase_orders,
    InboundOrder => inbound_orders,
);

impl CountryRepository for InMemoryStore {
    fn get_by_name(&self, country_name: &str) -> StoreResult<Country> {
        self.read()?
            .countries
            .find(|c| c.country_name == country_name)
    }

    fn create(&self, country_name: &str) -> StoreResult<Country> {
        let mut tables = self.write()?;
        tables
            .countries
            .unique(None, "countries_country_name_key", |c| c.country_name == country_name)?;
        Ok(tables.countries.insert(&Country {
            id: 0,
            country_name: country_name.to_string(),
        }))
    }
}

impl ProvinceRepository for InMemoryStore {
    fn get_by_name(&self, province_name: &str, country_id: i64) -> StoreResult<Province> {
        self.read()?
            .provinces
            .find(|p| p.province_name == province_name && p.country_id == country_id)
    }

    fn create(&self, province_name: &str, country_id: i64) -> StoreResult<Province> {
        let mut tables = self.write()?;
        tables.provinces.unique(None, "provinces_name_country_key", |p| {
            p.province_name == province_name && p.country_id == country_id
        })?;
        Ok(tables.provinces.insert(&Province {
            id: 0,
            province_name: province_name.to_string(),
            country_id,
        }))
    }
}

impl LocalityRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<Locality>> {
        Ok(self.read()?.localities.all())
    }

    fn create(&self, locality: &Locality) -> StoreResult<Locality> {
        self.write()?
            .localities
            .insert_keyed(locality, "localities_pkey")
    }

    fn report_sellers(&self, locality_id: Option<i64>) -> StoreResult<Vec<LocalitySellers>> {
        let tables = self.read()?;
        Ok(tables
            .localities
            .rows
            .values()
            .filter(|l| locality_id.is_none_or(|id| id == l.id))
            .map(|l| LocalitySellers {
                locality_id: l.id,
                locality_name: l.locality_name.clone(),
                sellers_count: tables.sellers.count(|s| s.locality_id == l.id),
            })
            .collect())
    }

    fn report_carries(&self, locality_id: Option<i64>) -> StoreResult<Vec<LocalityCarries>> {
        let tables = self.read()?;
        Ok(tables
            .localities
            .rows
            .values()
            .filter(|l| locality_id.is_none_or(|id| id == l.id))
            .map(|l| LocalityCarries {
                locality_id: l.id,
                locality_name: l.locality_name.clone(),
                carries_count: tables.carries.count(|c| c.locality_id == l.id),
            })
            .collect())
    }
}

impl WarehouseRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<Warehouse>> {
        Ok(self.read()?.warehouses.all())
    }

    fn get_by_code(&self, warehouse_code: &str) -> StoreResult<Warehouse> {
        self.read()?
            .warehouses
            .find(|w| w.warehouse_code == warehouse_code)
    }

    fn create(&self, warehouse: &Warehouse) -> StoreResult<Warehouse> {
        let mut tables = self.write()?;
        tables
            .warehouses
            .unique(None, "warehouses_warehouse_code_key", |w| {
                w.warehouse_code == warehouse.warehouse_code
            })?;
        Ok(tables.warehouses.insert(warehouse))
    }

    fn update(&self, warehouse: &Warehouse) -> StoreResult<Warehouse> {
        let mut tables = self.write()?;
        tables
            .warehouses
            .unique(Some(warehouse.id), "warehouses_warehouse_code_key", |w| {
                w.warehouse_code == warehouse.warehouse_code
            })?;
        tables.warehouses.replace(warehouse)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.write()?;
        restrict(
            tables.sections.count(|s| s.warehouse_id == id) > 0,
            "sections_warehouse_id_fkey",
        )?;
        restrict(
            tables.employees.count(|e| e.warehouse_id == id) > 0,
            "employees_warehouse_id_fkey",
        )?;
        restrict(
            tables.inbound_orders.count(|o| o.warehouse_id == id) > 0,
            "inbound_orders_warehouse_id_fkey",
        )?;
        tables.warehouses.remove(id)
    }
}

impl ProductTypeRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<ProductType>> {
        Ok(self.read()?.product_types.all())
    }
}

impl SectionRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<Section>> {
        Ok(self.read()?.sections.all())
    }

    fn get_by_section_number(&self, section_number: i64) -> StoreResult<Section> {
        self.read()?
            .sections
            .find(|s| s.section_number == section_number)
    }

    fn create(&self, section: &Section) -> StoreResult<Section> {
        let mut tables = self.write()?;
        tables
            .sections
            .unique(None, "sections_section_number_key", |s| {
                s.section_number == section.section_number
            })?;
        Ok(tables.sections.insert(section))
    }

    fn update(&self, section: &Section) -> StoreResult<Section> {
        let mut tables = self.write()?;
        tables
            .sections
            .unique(Some(section.id), "sections_section_number_key", |s| {
                s.section_number == section.section_number
            })?;
        tables.sections.replace(section)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.write()?;
        restrict(
            tables.product_batches.count(|b| b.section_id == id) > 0,
            "product_batches_section_id_fkey",
        )?;
        tables.sections.remove(id)
    }

    fn report_products(&self, section_id: Option<i64>) -> StoreResult<Vec<SectionProducts>> {
        let tables = self.read()?;
        Ok(tables
            .sections
            .rows
            .values()
            .filter(|s| section_id.is_none_or(|id| id == s.id))
            .map(|s| SectionProducts {
                section_id: s.id,
                section_number: s.section_number,
                products_count: tables
                    .product_batches
                    .rows
                    .values()
                    .filter(|b| b.section_id == s.id)
                    .map(|b| b.current_quantity)
                    .sum(),
            })
            .collect())
    }
}

impl EmployeeRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.read()?.employees.all())
    }

    fn create(&self, employee: &Employee) -> StoreResult<Employee> {
        let mut tables = self.write()?;
        tables
            .employees
            .unique(None, "employees_card_number_id_key", |e| {
                e.card_number_id == employee.card_number_id
            })?;
        Ok(tables.employees.insert(employee))
    }

    fn update(&self, employee: &Employee) -> StoreResult<Employee> {
        let mut tables = self.write()?;
        tables
            .employees
            .unique(Some(employee.id), "employees_card_number_id_key", |e| {
                e.card_number_id == employee.card_number_id
            })?;
        tables.employees.replace(employee)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.write()?;
        restrict(
            tables.inbound_orders.count(|o| o.employee_id == id) > 0,
            "inbound_orders_employee_id_fkey",
        )?;
        tables.employees.remove(id)
    }

    fn report_inbound_orders(
        &self,
        employee_id: Option<i64>,
    ) -> StoreResult<Vec<EmployeeInboundOrders>> {
        let tables = self.read()?;
        Ok(tables
            .employees
            .rows
            .values()
            .filter(|e| employee_id.is_none_or(|id| id == e.id))
            .map(|e| EmployeeInboundOrders {
                id: e.id,
                card_number_id: e.card_number_id.clone(),
                first_name: e.first_name.clone(),
                last_name: e.last_name.clone(),
                warehouse_id: e.warehouse_id,
                inbound_orders_count: tables.inbound_orders.count(|o| o.employee_id == e.id),
            })
            .collect())
    }
}

impl BuyerRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<Buyer>> {
        Ok(self.read()?.buyers.all())
    }

    fn create(&self, buyer: &Buyer) -> StoreResult<Buyer> {
        let mut tables = self.write()?;
        tables
            .buyers
            .unique(None, "buyers_card_number_id_key", |b| {
                b.card_number_id == buyer.card_number_id
            })?;
        Ok(tables.buyers.insert(buyer))
    }

    fn update(&self, buyer: &Buyer) -> StoreResult<Buyer> {
        let mut tables = self.write()?;
        tables
            .buyers
            .unique(Some(buyer.id), "buyers_card_number_id_key", |b| {
                b.card_number_id == buyer.card_number_id
            })?;
        tables.buyers.replace(buyer)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.write()?;
        restrict(
            tables.purchase_orders.count(|o| o.buyer_id == id) > 0,
            "purchase_orders_buyer_id_fkey",
        )?;
        tables.buyers.remove(id)
    }

    fn report_purchase_orders(&self, buyer_id: Option<i64>) -> StoreResult<Vec<BuyerPurchaseOrders>> {
        let tables = self.read()?;
        Ok(tables
            .buyers
            .rows
            .values()
            .filter(|b| buyer_id.is_none_or(|id| id == b.id))
            .map(|b| BuyerPurchaseOrders {
                id: b.id,
                card_number_id: b.card_number_id.clone(),
                first_name: b.first_name.clone(),
                last_name: b.last_name.clone(),
                purchase_orders_count: tables.purchase_orders.count(|o| o.buyer_id == b.id),
            })
            .collect())
    }
}

impl SellerRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<Seller>> {
        Ok(self.read()?.sellers.all())
    }

    fn get_by_cid(&self, cid: i64) -> StoreResult<Seller> {
        self.read()?.sellers.find(|s| s.cid == cid)
    }

    fn create(&self, seller: &Seller) -> StoreResult<Seller> {
        let mut tables = self.write()?;
        tables
            .sellers
            .unique(None, "sellers_cid_key", |s| s.cid == seller.cid)?;
        Ok(tables.sellers.insert(seller))
    }

    fn update(&self, seller: &Seller) -> StoreResult<Seller> {
        let mut tables = self.write()?;
        tables
            .sellers
            .unique(Some(seller.id), "sellers_cid_key", |s| s.cid == seller.cid)?;
        tables.sellers.replace(seller)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.write()?;
        restrict(
            tables.products.count(|p| p.seller_id == Some(id)) > 0,
            "products_seller_id_fkey",
        )?;
        tables.sellers.remove(id)
    }
}

impl CarryRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<Carry>> {
        Ok(self.read()?.carries.all())
    }

    fn get_by_cid(&self, cid: &str) -> StoreResult<Carry> {
        self.read()?.carries.find(|c| c.cid == cid)
    }

    fn create(&self, carry: &Carry) -> StoreResult<Carry> {
        let mut tables = self.write()?;
        tables
            .carries
            .unique(None, "carries_cid_key", |c| c.cid == carry.cid)?;
        Ok(tables.carries.insert(carry))
    }
}

impl ProductRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<Product>> {
        Ok(self.read()?.products.all())
    }

    fn get_by_code(&self, product_code: &str) -> StoreResult<Product> {
        self.read()?
            .products
            .find(|p| p.product_code == product_code)
    }

    fn create(&self, product: &Product) -> StoreResult<Product> {
        let mut tables = self.write()?;
        tables
            .products
            .unique(None, "products_product_code_key", |p| {
                p.product_code == product.product_code
            })?;
        Ok(tables.products.insert(product))
    }

    fn update(&self, product: &Product) -> StoreResult<Product> {
        let mut tables = self.write()?;
        tables
            .products
            .unique(Some(product.id), "products_product_code_key", |p| {
                p.product_code == product.product_code
            })?;
        tables.products.replace(product)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.write()?;
        restrict(
            tables.product_records.count(|r| r.product_id == id) > 0,
            "product_records_product_id_fkey",
        )?;
        restrict(
            tables.product_batches.count(|b| b.product_id == id) > 0,
            "product_batches_product_id_fkey",
        )?;
        tables.products.remove(id)
    }

    fn report_records(&self, product_id: Option<i64>) -> StoreResult<Vec<ProductRecords>> {
        let tables = self.read()?;
        Ok(tables
            .products
            .rows
            .values()
            .filter(|p| product_id.is_none_or(|id| id == p.id))
            .map(|p| ProductRecords {
                product_id: p.id,
                description: p.description.clone(),
                records_count: tables.product_records.count(|r| r.product_id == p.id),
            })
            .collect())
    }
}

impl ProductRecordRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<ProductRecord>> {
        Ok(self.read()?.product_records.all())
    }

    fn create(&self, record: &ProductRecord) -> StoreResult<ProductRecord> {
        Ok(self.write()?.product_records.insert(record))
    }
}

impl ProductBatchRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<ProductBatch>> {
        Ok(self.read()?.product_batches.all())
    }

    fn get_by_batch_number(&self, batch_number: i64) -> StoreResult<ProductBatch> {
        self.read()?
            .product_batches
            .find(|b| b.batch_number == batch_number)
    }

    fn create(&self, batch: &ProductBatch) -> StoreResult<ProductBatch> {
        let mut tables = self.write()?;
        tables
            .product_batches
            .unique(None, "product_batches_batch_number_key", |b| {
                b.batch_number == batch.batch_number
            })?;
        Ok(tables.product_batches.insert(batch))
    }
}

impl PurchaseOrderRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<PurchaseOrder>> {
        Ok(self.read()?.purchase_orders.all())
    }

    fn find_by_order_number(&self, order_number: &str) -> StoreResult<PurchaseOrder> {
        self.read()?
            .purchase_orders
            .find(|o| o.order_number == order_number)
    }

    fn create(&self, order: &PurchaseOrder) -> StoreResult<PurchaseOrder> {
        let mut tables = self.write()?;
        tables
            .purchase_orders
            .unique(None, "purchase_orders_order_number_key", |o| {
                o.order_number == order.order_number
            })?;
        Ok(tables.purchase_orders.insert(order))
    }
}

impl InboundOrderRepository for InMemoryStore {
    fn get_all(&self) -> StoreResult<Vec<InboundOrder>> {
        Ok(self.read()?.inbound_orders.all())
    }

    fn find_by_order_number(&self, order_number: &str) -> StoreResult<InboundOrder> {
        self.read()?
            .inbound_orders
            .find(|o| o.order_number == order_number)
    }

    fn create(&self, order: &InboundOrder) -> StoreResult<InboundOrder> {
        let mut tables = self.write()?;
        tables
            .inbound_orders
            .unique(None, "inbound_orders_order_number_key", |o| {
                o.order_number == order.order_number
            })?;
        Ok(tables.inbound_orders.insert(order))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warehouse(code: &str) -> Warehouse {
        Warehouse {
            warehouse_code: code.to_string(),
            address: "Main St 1".into(),
            telephone: "555".into(),
            locality_id: 1,
            minimum_capacity: 10,
            minimum_temperature: 2.0,
            ..Default::default()
        }
    }

    #[test]
    fn ids_are_assigned_in_sequence() {
        let store = InMemoryStore::new();
        let a = WarehouseRepository::create(&store, &warehouse("A")).unwrap();
        let b = WarehouseRepository::create(&store, &warehouse("B")).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[test]
    fn unique_code_is_enforced_on_write() {
        let store = InMemoryStore::new();
        WarehouseRepository::create(&store, &warehouse("A")).unwrap();
        let err = WarehouseRepository::create(&store, &warehouse("A")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn update_may_keep_its_own_code() {
        let store = InMemoryStore::new();
        let mut stored = WarehouseRepository::create(&store, &warehouse("A")).unwrap();
        stored.address = "Side St 2".into();
        let updated = WarehouseRepository::update(&store, &stored).unwrap();
        assert_eq!(updated.address, "Side St 2");
    }

    #[test]
    fn caller_keyed_locality_rejects_reused_id() {
        let store = InMemoryStore::new();
        let locality = Locality {
            id: 7,
            locality_name: "Palermo".into(),
            province_id: 1,
        };
        LocalityRepository::create(&store, &locality).unwrap();
        let err = LocalityRepository::create(&store, &locality).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn missing_row_is_not_found() {
        let store = InMemoryStore::new();
        let result: StoreResult<Buyer> = store.get_by_id(3);
        assert_eq!(result, Err(StoreError::NotFound));
        assert_eq!(BuyerRepository::delete(&store, 3), Err(StoreError::NotFound));
    }

    #[test]
    fn referenced_warehouse_cannot_be_deleted() {
        let store = InMemoryStore::new();
        let w = WarehouseRepository::create(&store, &warehouse("A")).unwrap();
        EmployeeRepository::create(
            &store,
            &Employee {
                card_number_id: "E-1".into(),
                first_name: "Ana".into(),
                last_name: "Ruiz".into(),
                warehouse_id: w.id,
                ..Default::default()
            },
        )
        .unwrap();
        let err = WarehouseRepository::delete(&store, w.id).unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn seeded_store_has_default_product_types() {
        let store = InMemoryStore::seeded();
        let types = ProductTypeRepository::get_all(&store).unwrap();
        assert_eq!(types.len(), DEFAULT_PRODUCT_TYPES.len());
    }
}
