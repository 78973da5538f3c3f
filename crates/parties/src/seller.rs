use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure, ensure_exists, ensure_unique, require_found, DeleteFailure, Entity, Lookup, Merge,
    Patch, RequiredFields, ServiceError, ServiceResult, StoreResult,
};
use stockhub_locations::Locality;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seller {
    pub id: i64,
    pub cid: i64,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: i64,
}

impl Entity for Seller {
    const NAME: &'static str = "seller";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewSeller {
    pub cid: i64,
    pub company_name: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SellerPatch {
    pub cid: Patch<i64>,
    pub company_name: Patch<String>,
    pub address: Patch<String>,
    pub telephone: Patch<String>,
    pub locality_id: Patch<i64>,
}

impl Merge<Seller> for SellerPatch {
    fn is_empty(&self) -> bool {
        !(self.cid.is_set()
            || self.company_name.is_set()
            || self.address.is_set()
            || self.telephone.is_set()
            || self.locality_id.is_set())
    }

    fn merge(self, current: Seller) -> Seller {
        Seller {
            id: current.id,
            cid: self.cid.apply(current.cid),
            company_name: self.company_name.apply(current.company_name),
            address: self.address.apply(current.address),
            telephone: self.telephone.apply(current.telephone),
            locality_id: self.locality_id.apply(current.locality_id),
        }
    }
}

/// Sellers are unique by `cid`.
pub trait SellerRepository: Lookup<Seller> {
    fn get_all(&self) -> StoreResult<Vec<Seller>>;
    fn get_by_cid(&self, cid: i64) -> StoreResult<Seller>;
    fn create(&self, seller: &Seller) -> StoreResult<Seller>;
    fn update(&self, seller: &Seller) -> StoreResult<Seller>;
    fn delete(&self, id: i64) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct SellerService {
    sellers: Arc<dyn SellerRepository>,
    localities: Arc<dyn Lookup<Locality>>,
}

impl SellerService {
    pub fn new(sellers: Arc<dyn SellerRepository>, localities: Arc<dyn Lookup<Locality>>) -> Self {
        Self {
            sellers,
            localities,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Seller>> {
        self.sellers.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Seller> {
        require_found(&*self.sellers, id)
    }

    pub fn create(&self, input: NewSeller) -> ServiceResult<Seller> {
        RequiredFields::new()
            .field("cid", &input.cid)
            .field("company_name", &input.company_name)
            .field("address", &input.address)
            .field("telephone", &input.telephone)
            .field("locality_id", &input.locality_id)
            .check()?;
        ensure(input.cid > 0, "cid must be a positive number")?;

        ensure_exists::<Locality, _>(&*self.localities, input.locality_id)?;
        ensure_unique(self.sellers.get_by_cid(input.cid), None, || cid_attr(input.cid))?;

        let seller = Seller {
            id: 0,
            cid: input.cid,
            company_name: input.company_name,
            address: input.address,
            telephone: input.telephone,
            locality_id: input.locality_id,
        };
        self.sellers
            .create(&seller)
            .map_err(|e| ServiceError::from_write(Seller::NAME, cid_attr(seller.cid), e))
    }

    pub fn update(&self, id: i64, patch: SellerPatch) -> ServiceResult<Seller> {
        let current = require_found(&*self.sellers, id)?;
        if patch.is_empty() {
            return Err(ServiceError::EmptyArguments);
        }

        RequiredFields::new()
            .patched("cid", &patch.cid)
            .patched("company_name", &patch.company_name)
            .patched("address", &patch.address)
            .patched("telephone", &patch.telephone)
            .patched("locality_id", &patch.locality_id)
            .check()?;

        if let Some(&locality_id) = patch.locality_id.changed_from(&current.locality_id) {
            ensure_exists::<Locality, _>(&*self.localities, locality_id)?;
        }

        let new_cid = patch.cid.changed_from(&current.cid).copied();
        let merged = patch.merge(current);
        ensure(merged.cid > 0, "cid must be a positive number")?;

        if let Some(cid) = new_cid {
            ensure_unique(self.sellers.get_by_cid(cid), Some(id), || cid_attr(cid))?;
        }

        self.sellers
            .update(&merged)
            .map_err(|e| ServiceError::from_write(Seller::NAME, cid_attr(merged.cid), e))
    }

    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        require_found(&*self.sellers, id)?;
        self.sellers
            .delete(id)
            .map_err(|e| DeleteFailure::Internal.translate(Seller::NAME, e))
    }
}

fn cid_attr(cid: i64) -> String {
    format!("cid: {cid}")
}
