use sqlx::postgres::PgRow;
use sqlx::Row;

use stockhub_core::StoreResult;
use stockhub_locations::{
    Country, CountryRepository, Locality, LocalityCarries, LocalityRepository, LocalitySellers,
    Province, ProvinceRepository,
};

use super::{lookup_by_id, Decode, PgStore};

impl Decode for Country {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Country {
            id: row.try_get("id")?,
            country_name: row.try_get("country_name")?,
        })
    }
}

impl Decode for Province {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Province {
            id: row.try_get("id")?,
            province_name: row.try_get("province_name")?,
            country_id: row.try_get("country_id")?,
        })
    }
}

impl Decode for Locality {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(Locality {
            id: row.try_get("id")?,
            locality_name: row.try_get("locality_name")?,
            province_id: row.try_get("province_id")?,
        })
    }
}

impl Decode for LocalitySellers {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(LocalitySellers {
            locality_id: row.try_get("locality_id")?,
            locality_name: row.try_get("locality_name")?,
            sellers_count: row.try_get("sellers_count")?,
        })
    }
}

impl Decode for LocalityCarries {
    fn decode(row: &PgRow) -> Result<Self, sqlx::Error> {
        Ok(LocalityCarries {
            locality_id: row.try_get("locality_id")?,
            locality_name: row.try_get("locality_name")?,
            carries_count: row.try_get("carries_count")?,
        })
    }
}

lookup_by_id!(
    Country,
    "SELECT id, country_name FROM countries WHERE id = $1",
    "country_by_id"
);
lookup_by_id!(
    Province,
    "SELECT id, province_name, country_id FROM provinces WHERE id = $1",
    "province_by_id"
);
lookup_by_id!(
    Locality,
    "SELECT id, locality_name, province_id FROM localities WHERE id = $1",
    "locality_by_id"
);

impl CountryRepository for PgStore {
    fn get_by_name(&self, country_name: &str) -> StoreResult<Country> {
        self.fetch_one(
            "country_by_name",
            sqlx::query("SELECT id, country_name FROM countries WHERE country_name = $1")
                .bind(country_name),
        )
    }

    fn create(&self, country_name: &str) -> StoreResult<Country> {
        self.fetch_one(
            "create_country",
            sqlx::query("INSERT INTO countries (country_name) VALUES ($1) RETURNING id, country_name")
                .bind(country_name),
        )
    }
}

impl ProvinceRepository for PgStore {
    fn get_by_name(&self, province_name: &str, country_id: i64) -> StoreResult<Province> {
        self.fetch_one(
            "province_by_name",
            sqlx::query(
                "SELECT id, province_name, country_id FROM provinces \
                 WHERE province_name = $1 AND country_id = $2",
            )
            .bind(province_name)
            .bind(country_id),
        )
    }

    fn create(&self, province_name: &str, country_id: i64) -> StoreResult<Province> {
        self.fetch_one(
            "create_province",
            sqlx::query(
                "INSERT INTO provinces (province_name, country_id) VALUES ($1, $2) \
                 RETURNING id, province_name, country_id",
            )
            .bind(province_name)
            .bind(country_id),
        )
    }
}

impl LocalityRepository for PgStore {
    fn get_all(&self) -> StoreResult<Vec<Locality>> {
        self.fetch_all(
            "list_localities",
            sqlx::query("SELECT id, locality_name, province_id FROM localities ORDER BY id"),
        )
    }

    fn create(&self, locality: &Locality) -> StoreResult<Locality> {
        self.fetch_one(
            "create_locality",
            sqlx::query(
                "INSERT INTO localities (id, locality_name, province_id) VALUES ($1, $2, $3) \
                 RETURNING id, locality_name, province_id",
            )
            .bind(locality.id)
            .bind(&locality.locality_name)
            .bind(locality.province_id),
        )
    }

    fn report_sellers(&self, locality_id: Option<i64>) -> StoreResult<Vec<LocalitySellers>> {
        self.fetch_all(
            "report_locality_sellers",
            sqlx::query(
                "SELECT l.id AS locality_id, l.locality_name, COUNT(s.id) AS sellers_count \
                 FROM localities l LEFT JOIN sellers s ON s.locality_id = l.id \
                 WHERE $1::BIGINT IS NULL OR l.id = $1 \
                 GROUP BY l.id, l.locality_name ORDER BY l.id",
            )
            .bind(locality_id),
        )
    }

    fn report_carries(&self, locality_id: Option<i64>) -> StoreResult<Vec<LocalityCarries>> {
        self.fetch_all(
            "report_locality_carries",
            sqlx::query(
                "SELECT l.id AS locality_id, l.locality_name, COUNT(c.id) AS carries_count \
                 FROM localities l LEFT JOIN carries c ON c.locality_id = l.id \
                 WHERE $1::BIGINT IS NULL OR l.id = $1 \
                 GROUP BY l.id, l.locality_name ORDER BY l.id",
            )
            .bind(locality_id),
        )
    }
}
