use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockhub_core::{
    presence, require_found, Entity, Lookup, RequiredFields, ServiceError, ServiceResult,
    StoreResult,
};

use crate::country::CountryRepository;
use crate::province::ProvinceRepository;

/// A locality. Its id is chosen by the caller (postal code style), not generated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locality {
    pub id: i64,
    pub locality_name: String,
    pub province_id: i64,
}

impl Entity for Locality {
    const NAME: &'static str = "locality";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Create request: the province and country are given by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewLocality {
    pub id: i64,
    pub locality_name: String,
    pub province_name: String,
    pub country_name: String,
}

impl NewLocality {
    /// Names are matched and stored without surrounding whitespace.
    fn trimmed(self) -> Self {
        Self {
            id: self.id,
            locality_name: self.locality_name.trim().to_string(),
            province_name: self.province_name.trim().to_string(),
            country_name: self.country_name.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalitySellers {
    pub locality_id: i64,
    pub locality_name: String,
    pub sellers_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalityCarries {
    pub locality_id: i64,
    pub locality_name: String,
    pub carries_count: i64,
}

pub trait LocalityRepository: Lookup<Locality> {
    fn get_all(&self) -> StoreResult<Vec<Locality>>;
    fn create(&self, locality: &Locality) -> StoreResult<Locality>;

    /// Sellers per locality; `None` covers every locality.
    fn report_sellers(&self, locality_id: Option<i64>) -> StoreResult<Vec<LocalitySellers>>;

    /// Carriers per locality; `None` covers every locality.
    fn report_carries(&self, locality_id: Option<i64>) -> StoreResult<Vec<LocalityCarries>>;
}

/// Locality use cases.
///
/// `save` runs the cascade locality-id check → country → province → insert.
/// Each step short-circuits; a country or province created along the way is
/// kept even when a later step fails. There is no compensation.
#[derive(Clone)]
pub struct LocalityService {
    localities: Arc<dyn LocalityRepository>,
    provinces: Arc<dyn ProvinceRepository>,
    countries: Arc<dyn CountryRepository>,
}

impl LocalityService {
    pub fn new(
        localities: Arc<dyn LocalityRepository>,
        provinces: Arc<dyn ProvinceRepository>,
        countries: Arc<dyn CountryRepository>,
    ) -> Self {
        Self {
            localities,
            provinces,
            countries,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Locality>> {
        self.localities.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Locality> {
        require_found(&*self.localities, id)
    }

    pub fn save(&self, input: NewLocality) -> ServiceResult<Locality> {
        let input = input.trimmed();
        RequiredFields::new()
            .field("locality_name", &input.locality_name)
            .field("id", &input.id)
            .field("province_name", &input.province_name)
            .field("country_name", &input.country_name)
            .check()?;

        if presence(self.localities.get_by_id(input.id))
            .map_err(ServiceError::from_store)?
            .is_some()
        {
            return Err(ServiceError::conflict(Locality::NAME, "id"));
        }

        let country = resolve_or_create(
            self.countries.get_by_name(&input.country_name),
            || self.countries.create(&input.country_name),
            || format!("country_name: {}", input.country_name),
        )?;

        let province = resolve_or_create(
            self.provinces.get_by_name(&input.province_name, country.id),
            || self.provinces.create(&input.province_name, country.id),
            || format!("province_name: {}", input.province_name),
        )?;

        let locality = Locality {
            id: input.id,
            locality_name: input.locality_name,
            province_id: province.id,
        };
        self.localities
            .create(&locality)
            .map_err(|e| ServiceError::from_write(Locality::NAME, "id", e))
    }

    pub fn report_sellers(&self, locality_id: Option<i64>) -> ServiceResult<Vec<LocalitySellers>> {
        if let Some(id) = locality_id {
            self.get_by_id(id)?;
        }
        self.localities
            .report_sellers(locality_id)
            .map_err(ServiceError::from_store)
    }

    pub fn report_carries(&self, locality_id: Option<i64>) -> ServiceResult<Vec<LocalityCarries>> {
        if let Some(id) = locality_id {
            self.get_by_id(id)?;
        }
        self.localities
            .report_carries(locality_id)
            .map_err(ServiceError::from_store)
    }
}

/// Adopt the row found by `probe`, or insert it with `create`.
fn resolve_or_create<T, F>(
    probe: StoreResult<T>,
    create: F,
    attr: impl FnOnce() -> String,
) -> ServiceResult<T>
where
    T: Entity,
    F: FnOnce() -> StoreResult<T>,
{
    if let Some(existing) = presence(probe).map_err(ServiceError::from_store)? {
        tracing::debug!(entity = T::NAME, id = existing.id(), "resolved existing row");
        return Ok(existing);
    }

    let created = create().map_err(|e| ServiceError::from_write(T::NAME, attr(), e))?;
    tracing::debug!(entity = T::NAME, id = created.id(), "created missing row");
    Ok(created)
}
