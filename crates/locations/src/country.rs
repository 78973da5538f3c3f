use serde::{Deserialize, Serialize};

use stockhub_core::{Entity, Lookup, StoreResult};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub country_name: String,
}

impl Entity for Country {
    const NAME: &'static str = "country";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Countries are unique by name.
pub trait CountryRepository: Lookup<Country> {
    fn get_by_name(&self, country_name: &str) -> StoreResult<Country>;

    /// Insert and return the row with its assigned id.
    fn create(&self, country_name: &str) -> StoreResult<Country>;
}
