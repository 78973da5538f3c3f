use sqlx::postgres::PgRow;
use sqlx::Row;

use stockhub_core::StoreResult;
use stockhub_inventory::{
    ProductType, ProductTypeRepository, Section, SectionProducts, SectionRepository, Warehouse,
    WarehouseRepository,
};

use super::{lookup_by_id, Decode, PgStore};

const WAREHOUSE_COLUMNS: &str =
    "id, warehouse_code, address, telephone, locality_id, minimum_capacity, minimum_temperature";

const SECTION_COLUMNS: &str = "id, section_number, current_temperature, minimum_temperature, \
     current_capacity, minimum_capacity, maximum_capacity, warehouse_id, product_type_id";

impl Decode for Warehouse {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Warehouse {
            id: row.try_get("id")?,
            warehouse_code: row.try_get("warehouse_code")?,
            address: row.try_get("address")?,
            telephone: row.try_get("telephone")?,
            locality_id: row.try_get("locality_id")?,
            minimum_capacity: row.try_get("minimum_capacity")?,
            minimum_temperature: row.try_get("minimum_temperature")?,
        })
    }
}

impl Decode for ProductType {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductType {
            id: row.try_get("id")?,
            description: row.try_get("description")?,
        })
    }
}

impl Decode for Section {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Section {
            id: row.try_get("id")?,
            section_number: row.try_get("section_number")?,
            current_temperature: row.try_get("current_temperature")?,
            minimum_temperature: row.try_get("minimum_temperature")?,
            current_capacity: row.try_get("current_capacity")?,
            minimum_capacity: row.try_get("minimum_capacity")?,
            maximum_capacity: row.try_get("maximum_capacity")?,
            warehouse_id: row.try_get("warehouse_id")?,
            product_type_id: row.try_get("product_type_id")?,
        })
    }
}

impl Decode for SectionProducts {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(SectionProducts {
            section_id: row.try_get("section_id")?,
            section_number: row.try_get("section_number")?,
            products_count: row.try_get("products_count")?,
        })
    }
}

lookup_by_id!(
    Warehouse,
    "SELECT id, warehouse_code, address, telephone, locality_id, minimum_capacity, \
     minimum_temperature FROM warehouses WHERE id = $1",
    "warehouse_by_id"
);
lookup_by_id!(
    ProductType,
    "SELECT id, description FROM product_types WHERE id = $1",
    "product_type_by_id"
);
lookup_by_id!(
    Section,
    "SELECT id, section_number, current_temperature, minimum_temperature, current_capacity, \
     minimum_capacity, maximum_capacity, warehouse_id, product_type_id FROM sections WHERE id = $1",
    "section_by_id"
);

impl WarehouseRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<Warehouse>> {
        let sql = format!("SELECT {WAREHOUSE_COLUMNS} FROM warehouses ORDER BY id");
        self.fetch_all("list_warehouses", sqlx::query(&sql))
    }

    fn get_by_code(&self, warehouse_code: &str) -> StoreResult<Warehouse> {
        let sql = format!("SELECT {WAREHOUSE_COLUMNS} FROM warehouses WHERE warehouse_code = $1");
        self.fetch_one("warehouse_by_code", sqlx::query(&sql).bind(warehouse_code))
    }

    fn create(&self, w: &Warehouse) -> StoreResult<Warehouse> {
        let sql = format!(
            "INSERT INTO warehouses (warehouse_code, address, telephone, locality_id, \
             minimum_capacity, minimum_temperature) VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {WAREHOUSE_COLUMNS}"
        );
        self.fetch_one(
            "create_warehouse",
            sqlx::query(&sql)
                .bind(&w.warehouse_code)
                .bind(&w.address)
                .bind(&w.telephone)
                .bind(w.locality_id)
                .bind(w.minimum_capacity)
                .bind(w.minimum_temperature),
        )
    }

    fn update(&self, w: &Warehouse) -> StoreResult<Warehouse> {
        let sql = format!(
            "UPDATE warehouses SET warehouse_code = $2, address = $3, telephone = $4, \
             locality_id = $5, minimum_capacity = $6, minimum_temperature = $7 \
             WHERE id = $1 RETURNING {WAREHOUSE_COLUMNS}"
        );
        self.fetch_one(
            "update_warehouse",
            sqlx::query(&sql)
                .bind(w.id)
                .bind(&w.warehouse_code)
                .bind(&w.address)
                .bind(&w.telephone)
                .bind(w.locality_id)
                .bind(w.minimum_capacity)
                .bind(w.minimum_temperature),
        )
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.execute(
            "delete_warehouse",
            sqlx::query("DELETE FROM warehouses WHERE id = $1").bind(id),
        )
    }
}

impl ProductTypeRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<ProductType>> {
        self.fetch_all(
            "list_product_types",
            sqlx::query("SELECT id, description FROM product_types ORDER BY id"),
        )
    }
}

impl SectionRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<Section>> {
        let sql = format!("SELECT {SECTION_COLUMNS} FROM sections ORDER BY id");
        self.fetch_all("list_sections", sqlx::query(&sql))
    }

    fn get_by_section_number(&self, section_number: i64) -> StoreResult<Section> {
        let sql = format!("SELECT {SECTION_COLUMNS} FROM sections WHERE section_number = $1");
        self.fetch_one("section_by_number", sqlx::query(&sql).bind(section_number))
    }

    fn create(&self, s: &Section) -> StoreResult<Section> {
        let sql = format!(
            "INSERT INTO sections (section_number, current_temperature, minimum_temperature, \
             current_capacity, minimum_capacity, maximum_capacity, warehouse_id, product_type_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {SECTION_COLUMNS}"
        );
        self.fetch_one(
            "create_section",
            sqlx::query(&sql)
                .bind(s.section_number)
                .bind(s.current_temperature)
                .bind(s.minimum_temperature)
                .bind(s.current_capacity)
                .bind(s.minimum_capacity)
                .bind(s.maximum_capacity)
                .bind(s.warehouse_id)
                .bind(s.product_type_id),
        )
    }

    fn update(&self, s: &Section) -> StoreResult<Section> {
        let sql = format!(
            "UPDATE sections SET section_number = $2, current_temperature = $3, \
             minimum_temperature = $4, current_capacity = $5, minimum_capacity = $6, \
             maximum_capacity = $7, warehouse_id = $8, product_type_id = $9 \
             WHERE id = $1 RETURNING {SECTION_COLUMNS}"
        );
        self.fetch_one(
            "update_section",
            sqlx::query(&sql)
                .bind(s.id)
                .bind(s.section_number)
                .bind(s.current_temperature)
                .bind(s.minimum_temperature)
                .bind(s.current_capacity)
                .bind(s.minimum_capacity)
                .bind(s.maximum_capacity)
                .bind(s.warehouse_id)
                .bind(s.product_type_id),
        )
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.execute(
            "delete_section",
            sqlx::query("DELETE FROM sections WHERE id = $1").bind(id),
        )
    }

    fn report_products(&self, section_id: Option<i64>) -> StoreResult<Vec<SectionProducts>> {
        self.fetch_all(
            "report_section_products",
            sqlx::query(
                "SELECT s.id AS section_id, s.section_number, \
                 COALESCE(SUM(b.current_quantity), 0)::BIGINT AS products_count \
                 FROM sections s LEFT JOIN product_batches b ON b.section_id = s.id \
                 WHERE $1::BIGINT IS NULL OR s.id = $1 \
                 GROUP BY s.id, s.section_number ORDER BY s.id",
            )
            .bind(section_id),
        )
    }
}
