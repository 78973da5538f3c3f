use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure_exists, ensure_unique, require_found, Entity, Lookup, RequiredFields, ServiceError,
    ServiceResult, StoreResult,
};
use stockhub_parties::Buyer;
use stockhub_products::ProductRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: i64,
    pub order_number: String,
    pub order_date: NaiveDate,
    pub tracking_code: String,
    pub buyer_id: i64,
    pub product_record_id: i64,
    pub order_status_id: i64,
}

impl Entity for PurchaseOrder {
    const NAME: &'static str = "purchase_order";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewPurchaseOrder {
    pub order_number: String,
    pub order_date: Option<NaiveDate>,
    pub tracking_code: String,
    pub buyer_id: i64,
    pub product_record_id: i64,
    pub order_status_id: i64,
}

/// Purchase orders are unique by `order_number`.
pub trait PurchaseOrderRepository: Lookup<PurchaseOrder> {
    fn get_all(&self) -> StoreResult<Vec<PurchaseOrder>>;
    fn find_by_order_number(&self, order_number: &str) -> StoreResult<PurchaseOrder>;
    fn create(&self, order: &PurchaseOrder) -> StoreResult<PurchaseOrder>;
}

#[derive(Clone)]
pub struct PurchaseOrderService {
    orders: Arc<dyn PurchaseOrderRepository>,
    buyers: Arc<dyn Lookup<Buyer>>,
    records: Arc<dyn Lookup<ProductRecord>>,
}

impl PurchaseOrderService {
    pub fn new(
        orders: Arc<dyn PurchaseOrderRepository>,
        buyers: Arc<dyn Lookup<Buyer>>,
        records: Arc<dyn Lookup<ProductRecord>>,
    ) -> Self {
        Self {
            orders,
            buyers,
            records,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<PurchaseOrder>> {
        self.orders.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<PurchaseOrder> {
        require_found(&*self.orders, id)
    }

    pub fn create(&self, input: NewPurchaseOrder) -> ServiceResult<PurchaseOrder> {
        RequiredFields::new()
            .field("order_number", &input.order_number)
            .field("order_date", &input.order_date)
            .field("tracking_code", &input.tracking_code)
            .field("buyer_id", &input.buyer_id)
            .field("product_record_id", &input.product_record_id)
            .field("order_status_id", &input.order_status_id)
            .check()?;

        ensure_exists::<Buyer, _>(&*self.buyers, input.buyer_id)?;
        ensure_exists::<ProductRecord, _>(&*self.records, input.product_record_id)?;
        ensure_unique(
            self.orders.find_by_order_number(&input.order_number),
            None,
            || number_attr(&input.order_number),
        )?;

        let order = PurchaseOrder {
            id: 0,
            order_number: input.order_number,
            order_date: input.order_date.unwrap_or_default(),
            tracking_code: input.tracking_code,
            buyer_id: input.buyer_id,
            product_record_id: input.product_record_id,
            order_status_id: input.order_status_id,
        };
        self.orders
            .create(&order)
            .map_err(|e| ServiceError::from_write(PurchaseOrder::NAME, number_attr(&order.order_number), e))
    }
}

pub(crate) fn number_attr(order_number: &str) -> String {
    format!("order_number: {order_number}")
}
