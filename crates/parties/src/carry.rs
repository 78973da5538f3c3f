use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure_exists, ensure_unique, require_found, Entity, Lookup, RequiredFields, ServiceError,
    ServiceResult, StoreResult,
};
use stockhub_locations::Locality;

/// A carrier company delivering to a locality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Carry {
    pub id: i64,
    pub cid: String,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: i64,
}

impl Entity for Carry {
    const NAME: &'static str = "carry";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewCarry {
    pub cid: String,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: i64,
}

/// Carriers are unique by `cid`.
pub trait CarryRepository: Lookup<Carry> {
    fn get_all(&self) -> StoreResult<Vec<Carry>>;
    fn get_by_cid(&self, cid: &str) -> StoreResult<Carry>;
    fn create(&self, carry: &Carry) -> StoreResult<Carry>;
}

#[derive(Clone)]
pub struct CarryService {
    carries: Arc<dyn CarryRepository>,
    localities: Arc<dyn Lookup<Locality>>,
}

impl CarryService {
    pub fn new(carries: Arc<dyn CarryRepository>, localities: Arc<dyn Lookup<Locality>>) -> Self {
        Self {
            carries,
            localities,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Carry>> {
        self.carries.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Carry> {
        require_found(&*self.carries, id)
    }

    pub fn create(&self, input: NewCarry) -> ServiceResult<Carry> {
        RequiredFields::new()
            .field("cid", &input.cid)
            .field("company_name", &input.company_name)
            .field("address", &input.address)
            .field("telephone", &input.telephone)
            .field("locality_id", &input.locality_id)
            .check()?;

        ensure_exists::<Locality, _>(&*self.localities, input.locality_id)?;
        ensure_unique(self.carries.get_by_cid(&input.cid), None, || cid_attr(&input.cid))?;

        let carry = Carry {
            id: 0,
            cid: input.cid,
            company_name: input.company_name,
            address: input.address,
            telephone: input.telephone,
            locality_id: input.locality_id,
        };
        self.carries
            .create(&carry)
            .map_err(|e| ServiceError::from_write(Carry::NAME, cid_attr(&carry.cid), e))
    }
}

fn cid_attr(cid: &str) -> String {
    format!("cid: {cid}")
}
