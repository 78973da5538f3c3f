use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure_exists, ensure_unique, require_found, Entity, Lookup, RequiredFields, ServiceError,
    ServiceResult, StoreResult,
};
use stockhub_inventory::Warehouse;
use stockhub_parties::Employee;
use stockhub_products::ProductBatch;

use crate::purchase::number_attr;

/// A batch received into a warehouse by an employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundOrder {
    pub id: i64,
    pub order_date: NaiveDate,
    pub order_number: String,
    pub employee_id: i64,
    pub product_batch_id: i64,
    pub warehouse_id: i64,
}

impl Entity for InboundOrder {
    const NAME: &'static str = "inbound_order";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewInboundOrder {
    pub order_date: Option<NaiveDate>,
    pub order_number: String,
    pub employee_id: i64,
    pub product_batch_id: i64,
    pub warehouse_id: i64,
}

pub trait InboundOrderRepository: Lookup<InboundOrder> {
    fn get_all(&self) -> StoreResult<Vec<InboundOrder>>;
    fn find_by_order_number(&self, order_number: &str) -> StoreResult<InboundOrder>;
    fn create(&self, order: &InboundOrder) -> StoreResult<InboundOrder>;
}

#[derive(Clone)]
pub struct InboundOrderService {
    orders: Arc<dyn InboundOrderRepository>,
    employees: Arc<dyn Lookup<Employee>>,
    batches: Arc<dyn Lookup<ProductBatch>>,
    warehouses: Arc<dyn Lookup<Warehouse>>,
}

impl InboundOrderService {
    pub fn new(
        orders: Arc<dyn InboundOrderRepository>,
        employees: Arc<dyn Lookup<Employee>>,
        batches: Arc<dyn Lookup<ProductBatch>>,
        warehouses: Arc<dyn Lookup<Warehouse>>,
    ) -> Self {
        Self {
            orders,
            employees,
            batches,
            warehouses,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<InboundOrder>> {
        self.orders.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<InboundOrder> {
        require_found(&*self.orders, id)
    }

    pub fn create(&self, input: NewInboundOrder) -> ServiceResult<InboundOrder> {
        RequiredFields::new()
            .field("order_date", &input.order_date)
            .field("order_number", &input.order_number)
            .field("employee_id", &input.employee_id)
            .field("product_batch_id", &input.product_batch_id)
            .field("warehouse_id", &input.warehouse_id)
            .check()?;

        ensure_exists::<Employee, _>(&*self.employees, input.employee_id)?;
        ensure_exists::<ProductBatch, _>(&*self.batches, input.product_batch_id)?;
        ensure_exists::<Warehouse, _>(&*self.warehouses, input.warehouse_id)?;
        ensure_unique(
            self.orders.find_by_order_number(&input.order_number),
            None,
            || number_attr(&input.order_number),
        )?;

        let order = InboundOrder {
            id: 0,
            order_date: input.order_date.unwrap_or_default(),
            order_number: input.order_number,
            employee_id: input.employee_id,
            product_batch_id: input.product_batch_id,
            warehouse_id: input.warehouse_id,
        };
        self.orders
            .create(&order)
            .map_err(|e| ServiceError::from_write(InboundOrder::NAME, number_attr(&order.order_number), e))
    }
}
