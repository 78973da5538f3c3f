use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockhub_core::{
    reject_duplicate, require_found, DeleteFailure, Entity, Lookup, Merge, Patch, RequiredFields,
    ServiceError, ServiceResult, StoreResult,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Buyer {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl Entity for Buyer {
    const NAME: &'static str = "buyer";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewBuyer {
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BuyerPatch {
    pub card_number_id: Patch<String>,
    pub first_name: Patch<String>,
    pub last_name: Patch<String>,
}

impl Merge<Buyer> for BuyerPatch {
    fn is_empty(&self) -> bool {
        !(self.card_number_id.is_set() || self.first_name.is_set() || self.last_name.is_set())
    }

    fn merge(self, current: Buyer) -> Buyer {
        Buyer {
            id: current.id,
            card_number_id: self.card_number_id.apply(current.card_number_id),
            first_name: self.first_name.apply(current.first_name),
            last_name: self.last_name.apply(current.last_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerPurchaseOrders {
    pub id: i64,
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
    pub purchase_orders_count: i64,
}

pub trait BuyerRepository: Lookup<Buyer> {
    fn get_all(&self) -> StoreResult<Vec<Buyer>>;
    fn create(&self, buyer: &Buyer) -> StoreResult<Buyer>;
    fn update(&self, buyer: &Buyer) -> StoreResult<Buyer>;
    fn delete(&self, id: i64) -> StoreResult<()>;
    fn report_purchase_orders(&self, buyer_id: Option<i64>) -> StoreResult<Vec<BuyerPurchaseOrders>>;
}

/// Buyer use cases. Card numbers are checked against the full buyer list.
#[derive(Clone)]
pub struct BuyerService {
    buyers: Arc<dyn BuyerRepository>,
}

impl BuyerService {
    pub fn new(buyers: Arc<dyn BuyerRepository>) -> Self {
        Self { buyers }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Buyer>> {
        self.buyers.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Buyer> {
        require_found(&*self.buyers, id)
    }

    pub fn create(&self, input: NewBuyer) -> ServiceResult<Buyer> {
        RequiredFields::new()
            .field("card_number_id", &input.card_number_id)
            .field("first_name", &input.first_name)
            .field("last_name", &input.last_name)
            .check()?;

        self.reject_card_number(&input.card_number_id, None)?;

        let buyer = Buyer {
            id: 0,
            card_number_id: input.card_number_id,
            first_name: input.first_name,
            last_name: input.last_name,
        };
        self.buyers
            .create(&buyer)
            .map_err(|e| ServiceError::from_write(Buyer::NAME, card_attr(&buyer.card_number_id), e))
    }

    pub fn update(&self, id: i64, patch: BuyerPatch) -> ServiceResult<Buyer> {
        let current = require_found(&*self.buyers, id)?;
        if patch.is_empty() {
            return Err(ServiceError::EmptyArguments);
        }

        RequiredFields::new()
            .patched("card_number_id", &patch.card_number_id)
            .patched("first_name", &patch.first_name)
            .patched("last_name", &patch.last_name)
            .check()?;

        if let Some(card) = patch.card_number_id.changed_from(&current.card_number_id) {
            self.reject_card_number(card, Some(id))?;
        }

        let merged = patch.merge(current);
        self.buyers
            .update(&merged)
            .map_err(|e| ServiceError::from_write(Buyer::NAME, card_attr(&merged.card_number_id), e))
    }

    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        require_found(&*self.buyers, id)?;
        self.buyers
            .delete(id)
            .map_err(|e| DeleteFailure::InvalidArguments.translate(Buyer::NAME, e))
    }

    pub fn report_purchase_orders(
        &self,
        buyer_id: Option<i64>,
    ) -> ServiceResult<Vec<BuyerPurchaseOrders>> {
        if let Some(id) = buyer_id {
            self.get_by_id(id)?;
        }
        self.buyers
            .report_purchase_orders(buyer_id)
            .map_err(ServiceError::from_store)
    }

    fn reject_card_number(&self, card_number_id: &str, except: Option<i64>) -> ServiceResult<()> {
        let all = self.buyers.get_all().map_err(ServiceError::from_store)?;
        reject_duplicate(
            &all,
            card_number_id,
            |b: &Buyer| b.card_number_id.as_str(),
            except,
            || card_attr(card_number_id),
        )
    }
}

fn card_attr(card_number_id: &str) -> String {
    format!("card_number_id: {card_number_id}")
}
