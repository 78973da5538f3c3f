use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure, ensure_exists, require_found, Entity, Lookup, RequiredFields, ServiceError,
    ServiceResult, StoreResult,
};

use crate::product::Product;

/// A price snapshot for a product. Records are append-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub last_update_date: NaiveDateTime,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub product_id: i64,
}

impl Entity for ProductRecord {
    const NAME: &'static str = "product_record";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewProductRecord {
    pub last_update_date: Option<NaiveDateTime>,
    pub purchase_price: f64,
    pub sale_price: f64,
    pub product_id: i64,
}

pub trait ProductRecordRepository: Lookup<ProductRecord> {
    fn get_all(&self) -> StoreResult<Vec<ProductRecord>>;
    fn create(&self, record: &ProductRecord) -> StoreResult<ProductRecord>;
}

#[derive(Clone)]
pub struct ProductRecordService {
    records: Arc<dyn ProductRecordRepository>,
    products: Arc<dyn Lookup<Product>>,
}

impl ProductRecordService {
    pub fn new(
        records: Arc<dyn ProductRecordRepository>,
        products: Arc<dyn Lookup<Product>>,
    ) -> Self {
        Self { records, products }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<ProductRecord>> {
        self.records.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<ProductRecord> {
        require_found(&*self.records, id)
    }

    pub fn create(&self, input: NewProductRecord) -> ServiceResult<ProductRecord> {
        RequiredFields::new()
            .field("last_update_date", &input.last_update_date)
            .field("purchase_price", &input.purchase_price)
            .field("sale_price", &input.sale_price)
            .field("product_id", &input.product_id)
            .check()?;
        ensure(input.purchase_price > 0.0, "purchase_price must be greater than zero")?;
        ensure(input.sale_price > 0.0, "sale_price must be greater than zero")?;

        ensure_exists::<Product, _>(&*self.products, input.product_id)?;

        let record = ProductRecord {
            id: 0,
            last_update_date: input.last_update_date.unwrap_or_default(),
            purchase_price: input.purchase_price,
            sale_price: input.sale_price,
            product_id: input.product_id,
        };
        self.records
            .create(&record)
            .map_err(ServiceError::from_store)
    }
}
