use sqlx::postgres::PgRow;
use sqlx::Row;

use stockhub_core::StoreResult;
use stockhub_products::{
    Product, ProductBatch, ProductBatchRepository, ProductRecord, ProductRecordRepository,
    ProductRecords, ProductRepository,
};

use super::{lookup_by_id, Decode, PgStore};

const PRODUCT_COLUMNS: &str = "id, product_code, description, width, height, length, \
     net_weight, expiration_rate, recommended_freezing_temperature, freezing_rate, \
     product_type_id, seller_id";

const RECORD_COLUMNS: &str = "id, last_update_date, purchase_price, sale_price, product_id";

const BATCH_COLUMNS: &str = "id, batch_number, current_quantity, current_temperature, due_date, \
     initial_quantity, manufacturing_date, manufacturing_hour, minimum_temperature, product_id, \
     section_id";

impl Decode for Product {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Product {
            id: row.try_get("id")?,
            product_code: row.try_get("product_code")?,
            description: row.try_get("description")?,
            width: row.try_get("width")?,
            height: row.try_get("height")?,
            length: row.try_get("length")?,
            net_weight: row.try_get("net_weight")?,
            expiration_rate: row.try_get("expiration_rate")?,
            recommended_freezing_temperature: row.try_get("recommended_freezing_temperature")?,
            freezing_rate: row.try_get("freezing_rate")?,
            product_type_id: row.try_get("product_type_id")?,
            seller_id: row.try_get("seller_id")?,
        })
    }
}

impl Decode for ProductRecords {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRecords {
            product_id: row.try_get("product_id")?,
            description: row.try_get("description")?,
            records_count: row.try_get("records_count")?,
        })
    }
}

impl Decode for ProductRecord {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRecord {
            id: row.try_get("id")?,
            last_update_date: row.try_get("last_update_date")?,
            purchase_price: row.try_get("purchase_price")?,
            sale_price: row.try_get("sale_price")?,
            product_id: row.try_get("product_id")?,
        })
    }
}

impl Decode for ProductBatch {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductBatch {
            id: row.try_get("id")?,
            batch_number: row.try_get("batch_number")?,
            current_quantity: row.try_get("current_quantity")?,
            current_temperature: row.try_get("current_temperature")?,
            due_date: row.try_get("due_date")?,
            initial_quantity: row.try_get("initial_quantity")?,
            manufacturing_date: row.try_get("manufacturing_date")?,
            manufacturing_hour: row.try_get("manufacturing_hour")?,
            minimum_temperature: row.try_get("minimum_temperature")?,
            product_id: row.try_get("product_id")?,
            section_id: row.try_get("section_id")?,
        })
    }
}

lookup_by_id!(
    Product,
    "SELECT id, product_code, description, width, height, length, net_weight, expiration_rate, \
     recommended_freezing_temperature, freezing_rate, product_type_id, seller_id \
     FROM products WHERE id = $1",
    "product_by_id"
);
lookup_by_id!(
    ProductRecord,
    "SELECT id, last_update_date, purchase_price, sale_price, product_id \
     FROM product_records WHERE id = $1",
    "product_record_by_id"
);
lookup_by_id!(
    ProductBatch,
    "SELECT id, batch_number, current_quantity, current_temperature, due_date, initial_quantity, \
     manufacturing_date, manufacturing_hour, minimum_temperature, product_id, section_id \
     FROM product_batches WHERE id = $1",
    "product_batch_by_id"
);

impl ProductRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id");
        self.fetch_all("list_products", sqlx::query(&sql))
    }

    fn get_by_code(&self, product_code: &str) -> StoreResult<Product> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_code = $1");
        self.fetch_one("product_by_code", sqlx::query(&sql).bind(product_code))
    }

    fn create(&self, p: &Product) -> StoreResult<Product> {
        let sql = format!(
            "INSERT INTO products (product_code, description, width, height, length, net_weight, \
             expiration_rate, recommended_freezing_temperature, freezing_rate, product_type_id, \
             seller_id) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        self.fetch_one(
            "create_product",
            sqlx::query(&sql)
                .bind(&p.product_code)
                .bind(&p.description)
                .bind(p.width)
                .bind(p.height)
                .bind(p.length)
                .bind(p.net_weight)
                .bind(p.expiration_rate)
                .bind(p.recommended_freezing_temperature)
                .bind(p.freezing_rate)
                .bind(p.product_type_id)
                .bind(p.seller_id),
        )
    }

    fn update(&self, p: &Product) -> StoreResult<Product> {
        let sql = format!(
            "UPDATE products SET product_code = $2, description = $3, width = $4, height = $5, \
             length = $6, net_weight = $7, expiration_rate = $8, \
             recommended_freezing_temperature = $9, freezing_rate = $10, product_type_id = $11, \
             seller_id = $12 WHERE id = $1 RETURNING {PRODUCT_COLUMNS}"
        );
        self.fetch_one(
            "update_product",
            sqlx::query(&sql)
                .bind(p.id)
                .bind(&p.product_code)
                .bind(&p.description)
                .bind(p.width)
                .bind(p.height)
                .bind(p.length)
                .bind(p.net_weight)
                .bind(p.expiration_rate)
                .bind(p.recommended_freezing_temperature)
                .bind(p.freezing_rate)
                .bind(p.product_type_id)
                .bind(p.seller_id),
        )
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.execute(
            "delete_product",
            sqlx::query("DELETE FROM products WHERE id = $1").bind(id),
        )
    }

    fn report_records(&self, product_id: Option<i64>) -> StoreResult<Vec<ProductRecords>> {
        self.fetch_all(
            "report_product_records",
            sqlx::query(
                "SELECT p.id AS product_id, p.description, COUNT(r.id) AS records_count \
                 FROM products p LEFT JOIN product_records r ON r.product_id = p.id \
                 WHERE $1::BIGINT IS NULL OR p.id = $1 \
                 GROUP BY p.id, p.description ORDER BY p.id",
            )
            .bind(product_id),
        )
    }
}

impl ProductRecordRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<ProductRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM product_records ORDER BY id");
        self.fetch_all("list_product_records", sqlx::query(&sql))
    }

    fn create(&self, r: &ProductRecord) -> StoreResult<ProductRecord> {
        let sql = format!(
            "INSERT INTO product_records (last_update_date, purchase_price, sale_price, product_id) \
             VALUES ($1, $2, $3, $4) RETURNING {RECORD_COLUMNS}"
        );
        self.fetch_one(
            "create_product_record",
            sqlx::query(&sql)
                .bind(r.last_update_date)
                .bind(r.purchase_price)
                .bind(r.sale_price)
                .bind(r.product_id),
        )
    }
}

impl ProductBatchRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<ProductBatch>> {
        let sql = format!("SELECT {BATCH_COLUMNS} FROM product_batches ORDER BY id");
        self.fetch_all("list_product_batches", sqlx::query(&sql))
    }

    fn get_by_batch_number(&self, batch_number: i64) -> StoreResult<ProductBatch> {
        let sql = format!("SELECT {BATCH_COLUMNS} FROM product_batches WHERE batch_number = $1");
        self.fetch_one("product_batch_by_number", sqlx::query(&sql).bind(batch_number))
    }

    fn create(&self, b: &ProductBatch) -> StoreResult<ProductBatch> {
        let sql = format!(
            "INSERT INTO product_batches (batch_number, current_quantity, current_temperature, \
             due_date, initial_quantity, manufacturing_date, manufacturing_hour, \
             minimum_temperature, product_id, section_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING {BATCH_COLUMNS}"
        );
        self.fetch_one(
            "create_product_batch",
            sqlx::query(&sql)
                .bind(b.batch_number)
                .bind(b.current_quantity)
                .bind(b.current_temperature)
                .bind(b.due_date)
                .bind(b.initial_quantity)
                .bind(b.manufacturing_date)
                .bind(b.manufacturing_hour)
                .bind(b.minimum_temperature)
                .bind(b.product_id)
                .bind(b.section_id),
        )
    }
}
