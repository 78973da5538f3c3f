use sqlx::postgres::PgRow;
use sqlx::Row;

use stockhub_core::StoreResult;
use stockhub_parties::{
    Buyer, BuyerPurchaseOrders, BuyerRepository, Carry, CarryRepository, Employee,
    EmployeeInboundOrders, EmployeeRepository, Seller, SellerRepository,
};

use super::{lookup_by_id, Decode, PgStore};

const SELLER_COLUMNS: &str = "id, cid, company_name, address, telephone, locality_id";

impl Decode for Employee {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Employee {
            id: row.try_get("id")?,
            card_number_id: row.try_get("card_number_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            warehouse_id: row.try_get("warehouse_id")?,
        })
    }
}

impl Decode for EmployeeInboundOrders {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(EmployeeInboundOrders {
            id: row.try_get("id")?,
            card_number_id: row.try_get("card_number_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            warehouse_id: row.try_get("warehouse_id")?,
            inbound_orders_count: row.try_get("inbound_orders_count")?,
        })
    }
}

impl Decode for Buyer {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Buyer {
            id: row.try_get("id")?,
            card_number_id: row.try_get("card_number_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
        })
    }
}

impl Decode for BuyerPurchaseOrders {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(BuyerPurchaseOrders {
            id: row.try_get("id")?,
            card_number_id: row.try_get("card_number_id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            purchase_orders_count: row.try_get("purchase_orders_count")?,
        })
    }
}

impl Decode for Seller {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Seller {
            id: row.try_get("id")?,
            cid: row.try_get("cid")?,
            company_name: row.try_get("company_name")?,
            address: row.try_get("address")?,
            telephone: row.try_get("telephone")?,
            locality_id: row.try_get("locality_id")?,
        })
    }
}

impl Decode for Carry {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Carry {
            id: row.try_get("id")?,
            cid: row.try_get("cid")?,
            company_name: row.try_get("company_name")?,
            address: row.try_get("address")?,
            telephone: row.try_get("telephone")?,
            locality_id: row.try_get("locality_id")?,
        })
    }
}

lookup_by_id!(
    Employee,
    "SELECT id, card_number_id, first_name, last_name, warehouse_id FROM employees WHERE id = $1",
    "employee_by_id"
);
lookup_by_id!(
    Buyer,
    "SELECT id, card_number_id, first_name, last_name FROM buyers WHERE id = $1",
    "buyer_by_id"
);
lookup_by_id!(
    Seller,
    "SELECT id, cid, company_name, address, telephone, locality_id FROM sellers WHERE id = $1",
    "seller_by_id"
);
lookup_by_id!(
    Carry,
    "SELECT id, cid, company_name, address, telephone, locality_id FROM carries WHERE id = $1",
    "carry_by_id"
);

impl EmployeeRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<Employee>> {
        self.fetch_all(
            "list_employees",
            sqlx::query(
                "SELECT id, card_number_id, first_name, last_name, warehouse_id \
                 FROM employees ORDER BY id",
            ),
        )
    }

    fn create(&self, e: &Employee) -> StoreResult<Employee> {
        self.fetch_one(
            "create_employee",
            sqlx::query(
                "INSERT INTO employees (card_number_id, first_name, last_name, warehouse_id) \
                 VALUES ($1, $2, $3, $4) \
                 RETURNING id, card_number_id, first_name, last_name, warehouse_id",
            )
            .bind(&e.card_number_id)
            .bind(&e.first_name)
            .bind(&e.last_name)
            .bind(e.warehouse_id),
        )
    }

    fn update(&self, e: &Employee) -> StoreResult<Employee> {
        self.fetch_one(
            "update_employee",
            sqlx::query(
                "UPDATE employees SET card_number_id = $2, first_name = $3, last_name = $4, \
                 warehouse_id = $5 WHERE id = $1 \
                 RETURNING id, card_number_id, first_name, last_name, warehouse_id",
            )
            .bind(e.id)
            .bind(&e.card_number_id)
            .bind(&e.first_name)
            .bind(&e.last_name)
            .bind(e.warehouse_id),
        )
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.execute(
            "delete_employee",
            sqlx::query("DELETE FROM employees WHERE id = $1").bind(id),
        )
    }

    fn report_inbound_orders(
        &self,
        employee_id: Option<i64>,
    ) -> StoreResult<Vec<EmployeeInboundOrders>> {
        self.fetch_all(
            "report_employee_inbound_orders",
            sqlx::query(
                "SELECT e.id, e.card_number_id, e.first_name, e.last_name, e.warehouse_id, \
                 COUNT(o.id) AS inbound_orders_count \
                 FROM employees e LEFT JOIN inbound_orders o ON o.employee_id = e.id \
                 WHERE $1::BIGINT IS NULL OR e.id = $1 \
                 GROUP BY e.id ORDER BY e.id",
            )
            .bind(employee_id),
        )
    }
}

impl BuyerRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<Buyer>> {
        self.fetch_all(
            "list_buyers",
            sqlx::query("SELECT id, card_number_id, first_name, last_name FROM buyers ORDER BY id"),
        )
    }

    fn create(&self, b: &Buyer) -> StoreResult<Buyer> {
        self.fetch_one(
            "create_buyer",
            sqlx::query(
                "INSERT INTO buyers (card_number_id, first_name, last_name) VALUES ($1, $2, $3) \
                 RETURNING id, card_number_id, first_name, last_name",
            )
            .bind(&b.card_number_id)
            .bind(&b.first_name)
            .bind(&b.last_name),
        )
    }

    fn update(&self, b: &Buyer) -> StoreResult<Buyer> {
        self.fetch_one(
            "update_buyer",
            sqlx::query(
                "UPDATE buyers SET card_number_id = $2, first_name = $3, last_name = $4 \
                 WHERE id = $1 RETURNING id, card_number_id, first_name, last_name",
            )
            .bind(b.id)
            .bind(&b.card_number_id)
            .bind(&b.first_name)
            .bind(&b.last_name),
        )
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.execute(
            "delete_buyer",
            sqlx::query("DELETE FROM buyers WHERE id = $1").bind(id),
        )
    }

    fn report_purchase_orders(&self, buyer_id: Option<i64>) -> StoreResult<Vec<BuyerPurchaseOrders>> {
        self.fetch_all(
            "report_buyer_purchase_orders",
            sqlx::query(
                "SELECT b.id, b.card_number_id, b.first_name, b.last_name, \
                 COUNT(o.id) AS purchase_orders_count \
                 FROM buyers b LEFT JOIN purchase_orders o ON o.buyer_id = b.id \
                 WHERE $1::BIGINT IS NULL OR b.id = $1 \
                 GROUP BY b.id ORDER BY b.id",
            )
            .bind(buyer_id),
        )
    }
}

impl SellerRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<Seller>> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers ORDER BY id");
        self.fetch_all("list_sellers", sqlx::query(&sql))
    }

    fn get_by_cid(&self, cid: i64) -> StoreResult<Seller> {
        let sql = format!("SELECT {SELLER_COLUMNS} FROM sellers WHERE cid = $1");
        self.fetch_one("seller_by_cid", sqlx::query(&sql).bind(cid))
    }

    fn create(&self, s: &Seller) -> StoreResult<Seller> {
        let sql = format!(
            "INSERT INTO sellers (cid, company_name, address, telephone, locality_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {SELLER_COLUMNS}"
        );
        self.fetch_one(
            "create_seller",
            sqlx::query(&sql)
                .bind(s.cid)
                .bind(&s.company_name)
                .bind(&s.address)
                .bind(&s.telephone)
                .bind(s.locality_id),
        )
    }

    fn update(&self, s: &Seller) -> StoreResult<Seller> {
        let sql = format!(
            "UPDATE sellers SET cid = $2, company_name = $3, address = $4, telephone = $5, \
             locality_id = $6 WHERE id = $1 RETURNING {SELLER_COLUMNS}"
        );
        self.fetch_one(
            "update_seller",
            sqlx::query(&sql)
                .bind(s.id)
                .bind(s.cid)
                .bind(&s.company_name)
                .bind(&s.address)
                .bind(&s.telephone)
                .bind(s.locality_id),
        )
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.execute(
            "delete_seller",
            sqlx::query("DELETE FROM sellers WHERE id = $1").bind(id),
        )
    }
}

impl CarryRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<Carry>> {
        self.fetch_all(
            "list_carries",
            sqlx::query(
                "SELECT id, cid, company_name, address, telephone, locality_id \
                 FROM carries ORDER BY id",
            ),
        )
    }

    fn get_by_cid(&self, cid: &str) -> StoreResult<Carry> {
        self.fetch_one(
            "carry_by_cid",
            sqlx::query(
                "SELECT id, cid, company_name, address, telephone, locality_id \
                 FROM carries WHERE cid = $1",
            )
            .bind(cid),
        )
    }

    fn create(&self, c: &Carry) -> StoreResult<Carry> {
        self.fetch_one(
            "create_carry",
            sqlx::query(
                "INSERT INTO carries (cid, company_name, address, telephone, locality_id) \
                 VALUES ($1, $2, $3, $4, $5) \
                 RETURNING id, cid, company_name, address, telephone, locality_id",
            )
            .bind(&c.cid)
            .bind(&c.company_name)
            .bind(&c.address)
            .bind(&c.telephone)
            .bind(c.locality_id),
        )
    }
}
