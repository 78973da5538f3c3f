use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockhub_core::{require_found, Entity, Lookup, ServiceError, ServiceResult, StoreResult};

/// Classification shared by sections and products (frozen, chilled, dry, …).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductType {
    pub id: i64,
    pub description: String,
}

impl Entity for ProductType {
    const NAME: &'static str = "product_type";

    fn id(&self) -> i64 {
        self.id
    }
}

pub trait ProductTypeRepository: Lookup<ProductType> {
    fn get_all(&self) -> StoreResult<Vec<ProductType>>;
}

/// Read-only catalogue of product types.
#[derive(Clone)]
pub struct ProductTypeService {
    product_types: Arc<dyn ProductTypeRepository>,
}

impl ProductTypeService {
    pub fn new(product_types: Arc<dyn ProductTypeRepository>) -> Self {
        Self { product_types }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<ProductType>> {
        self.product_types.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<ProductType> {
        require_found(&*self.product_types, id)
    }
}
