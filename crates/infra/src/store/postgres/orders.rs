use sqlx::postgres::PgRow;
use sqlx::Row;

use stockhub_core::StoreResult;
use stockhub_purchasing::{
    InboundOrder, InboundOrderRepository, PurchaseOrder, PurchaseOrderRepository,
};

use super::{lookup_by_id, Decode, PgStore};

const PURCHASE_COLUMNS: &str =
    "id, order_number, order_date, tracking_code, buyer_id, product_record_id, order_status_id";

const INBOUND_COLUMNS: &str =
    "id, order_date, order_number, employee_id, product_batch_id, warehouse_id";

impl Decode for PurchaseOrder {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(PurchaseOrder {
            id: row.try_get("id")?,
            order_number: row.try_get("order_number")?,
            order_date: row.try_get("order_date")?,
            tracking_code: row.try_get("tracking_code")?,
            buyer_id: row.try_get("buyer_id")?,
            product_record_id: row.try_get("product_record_id")?,
            order_status_id: row.try_get("order_status_id")?,
        })
    }
}

impl Decode for InboundOrder {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(InboundOrder {
            id: row.try_get("id")?,
            order_date: row.try_get("order_date")?,
            order_number: row.try_get("order_number")?,
            employee_id: row.try_get("employee_id")?,
            product_batch_id: row.try_get("product_batch_id")?,
            warehouse_id: row.try_get("warehouse_id")?,
        })
    }
}

lookup_by_id!(
    PurchaseOrder,
    "SELECT id, order_number, order_date, tracking_code, buyer_id, product_record_id, \
     order_status_id FROM purchase_orders WHERE id = $1",
    "purchase_order_by_id"
);
lookup_by_id!(
    InboundOrder,
    "SELECT id, order_date, order_number, employee_id, product_batch_id, warehouse_id \
     FROM inbound_orders WHERE id = $1",
    "inbound_order_by_id"
);

impl PurchaseOrderRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<PurchaseOrder>> {
        let sql = format!("SELECT {PURCHASE_COLUMNS} FROM purchase_orders ORDER BY id");
        self.fetch_all("list_purchase_orders", sqlx::query(&sql))
    }

    fn find_by_order_number(&self, order_number: &str) -> StoreResult<PurchaseOrder> {
        let sql = format!("SELECT {PURCHASE_COLUMNS} FROM purchase_orders WHERE order_number = $1");
        self.fetch_one("purchase_order_by_number", sqlx::query(&sql).bind(order_number))
    }

    fn create(&self, o: &PurchaseOrder) -> StoreResult<PurchaseOrder> {
        let sql = format!(
            "INSERT INTO purchase_orders (order_number, order_date, tracking_code, buyer_id, \
             product_record_id, order_status_id) VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {PURCHASE_COLUMNS}"
        );
        self.fetch_one(
            "create_purchase_order",
            sqlx::query(&sql)
                .bind(&o.order_number)
                .bind(o.order_date)
                .bind(&o.tracking_code)
                .bind(o.buyer_id)
                .bind(o.product_record_id)
                .bind(o.order_status_id),
        )
    }
}

impl InboundOrderRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<InboundOrder>> {
        let sql = format!("SELECT {INBOUND_COLUMNS} FROM inbound_orders ORDER BY id");
        self.fetch_all("list_inbound_orders", sqlx::query(&sql))
    }

    fn find_by_order_number(&self, order_number: &str) -> StoreResult<InboundOrder> {
        let sql = format!("SELECT {INBOUND_COLUMNS} FROM inbound_orders WHERE order_number = $1");
        self.fetch_one("inbound_order_by_number", sqlx::query(&sql).bind(order_number))
    }

    fn create(&self, o: &InboundOrder) -> StoreResult<InboundOrder> {
        let sql = format!(
            "INSERT INTO inbound_orders (order_date, order_number, employee_id, product_batch_id, \
             warehouse_id) VALUES ($1, $2, $3, $4, $5) RETURNING {INBOUND_COLUMNS}"
        );
        self.fetch_one(
            "create_inbound_order",
            sqlx::query(&sql)
                .bind(o.order_date)
                .bind(&o.order_number)
                .bind(o.employee_id)
                .bind(o.product_batch_id)
                .bind(o.warehouse_id),
        )
    }
}
