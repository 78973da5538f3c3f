use serde::{Deserialize, Serialize};

use stockhub_core::{Entity, Lookup, StoreResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: i64,
    pub province_name: String,
    pub country_id: i64,
}

impl Entity for Province {
    const NAME: &'static str = "province";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Provinces are unique by name within a country.
pub trait ProvinceRepository: Lookup<Province> {
    fn get_by_name(&self, province_name: &str, country_id: i64) -> StoreResult<Province>;

    fn create(&self, province_name: &str, country_id: i64) -> StoreResult<Province>;
}
