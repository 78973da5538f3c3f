use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure, ensure_exists, ensure_temperature, ensure_unique, require_found, Entity, Lookup,
    RequiredFields, ServiceError, ServiceResult, StoreResult,
};
use stockhub_inventory::Section;

use crate::product::Product;

/// Units of a product manufactured together and stored in one section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductBatch {
    pub id: i64,
    pub batch_number: i64,
    pub current_quantity: i64,
    pub current_temperature: f64,
    pub due_date: NaiveDate,
    pub initial_quantity: i64,
    pub manufacturing_date: NaiveDate,
    pub manufacturing_hour: i64,
    pub minimum_temperature: f64,
    pub product_id: i64,
    pub section_id: i64,
}

impl Entity for ProductBatch {
    const NAME: &'static str = "product_batch";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Create request. Quantities, temperatures, the hour, and both dates are
/// required by presence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewProductBatch {
    pub batch_number: i64,
    pub current_quantity: Option<i64>,
    pub current_temperature: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub initial_quantity: i64,
    pub manufacturing_date: Option<NaiveDate>,
    pub manufacturing_hour: Option<i64>,
    pub minimum_temperature: Option<f64>,
    pub product_id: i64,
    pub section_id: i64,
}

/// Batches are unique by `batch_number`.
pub trait ProductBatchRepository: Lookup<ProductBatch> {
    fn get_all(&self) -> StoreResult<Vec<ProductBatch>>;
    fn get_by_batch_number(&self, batch_number: i64) -> StoreResult<ProductBatch>;
    fn create(&self, batch: &ProductBatch) -> StoreResult<ProductBatch>;
}

#[derive(Clone)]
pub struct ProductBatchService {
    batches: Arc<dyn ProductBatchRepository>,
    products: Arc<dyn Lookup<Product>>,
    sections: Arc<dyn Lookup<Section>>,
}

impl ProductBatchService {
    pub fn new(
        batches: Arc<dyn ProductBatchRepository>,
        products: Arc<dyn Lookup<Product>>,
        sections: Arc<dyn Lookup<Section>>,
    ) -> Self {
        Self {
            batches,
            products,
            sections,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<ProductBatch>> {
        self.batches.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<ProductBatch> {
        require_found(&*self.batches, id)
    }

    pub fn create(&self, input: NewProductBatch) -> ServiceResult<ProductBatch> {
        RequiredFields::new()
            .field("batch_number", &input.batch_number)
            .field("current_quantity", &input.current_quantity)
            .field("current_temperature", &input.current_temperature)
            .field("due_date", &input.due_date)
            .field("initial_quantity", &input.initial_quantity)
            .field("manufacturing_date", &input.manufacturing_date)
            .field("manufacturing_hour", &input.manufacturing_hour)
            .field("minimum_temperature", &input.minimum_temperature)
            .field("product_id", &input.product_id)
            .field("section_id", &input.section_id)
            .check()?;

        let batch = ProductBatch {
            id: 0,
            batch_number: input.batch_number,
            current_quantity: input.current_quantity.unwrap_or_default(),
            current_temperature: input.current_temperature.unwrap_or_default(),
            due_date: input.due_date.unwrap_or_default(),
            initial_quantity: input.initial_quantity,
            manufacturing_date: input.manufacturing_date.unwrap_or_default(),
            manufacturing_hour: input.manufacturing_hour.unwrap_or_default(),
            minimum_temperature: input.minimum_temperature.unwrap_or_default(),
            product_id: input.product_id,
            section_id: input.section_id,
        };
        check_rules(&batch)?;

        ensure_exists::<Product, _>(&*self.products, batch.product_id)?;
        ensure_exists::<Section, _>(&*self.sections, batch.section_id)?;
        ensure_unique(
            self.batches.get_by_batch_number(batch.batch_number),
            None,
            || number_attr(batch.batch_number),
        )?;

        self.batches
            .create(&batch)
            .map_err(|e| ServiceError::from_write(ProductBatch::NAME, number_attr(batch.batch_number), e))
    }
}

fn check_rules(batch: &ProductBatch) -> ServiceResult<()> {
    ensure(
        batch.initial_quantity > 0,
        "initial_quantity must be greater than zero",
    )?;
    ensure(
        (0..=batch.initial_quantity).contains(&batch.current_quantity),
        "current_quantity must be between zero and initial_quantity",
    )?;
    ensure(
        batch.manufacturing_date <= batch.due_date,
        "manufacturing_date cannot be after due_date",
    )?;
    ensure(
        (0..=23).contains(&batch.manufacturing_hour),
        "manufacturing_hour must be between 0 and 23",
    )?;
    ensure_temperature("current_temperature", batch.current_temperature)?;
    ensure_temperature("minimum_temperature", batch.minimum_temperature)
}

fn number_attr(batch_number: i64) -> String {
    format!("batch_number: {batch_number}")
}
