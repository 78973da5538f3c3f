use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure, ensure_exists, ensure_temperature, ensure_unique, require_found, DeleteFailure, Entity,
    Lookup, Merge, Patch, RequiredFields, ServiceError, ServiceResult, StoreResult,
};
use stockhub_inventory::ProductType;
use stockhub_parties::Seller;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_code: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub net_weight: f64,
    pub expiration_rate: f64,
    pub recommended_freezing_temperature: f64,
    pub freezing_rate: f64,
    pub product_type_id: i64,
    pub seller_id: Option<i64>,
}

impl Entity for Product {
    const NAME: &'static str = "product";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Create request. The freezing temperature may be zero, so it is required
/// by presence. `seller_id` is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewProduct {
    pub product_code: String,
    pub description: String,
    pub width: f64,
    pub height: f64,
    pub length: f64,
    pub net_weight: f64,
    pub expiration_rate: f64,
    pub recommended_freezing_temperature: Option<f64>,
    pub freezing_rate: f64,
    pub product_type_id: i64,
    pub seller_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProductPatch {
    pub product_code: Patch<String>,
    pub description: Patch<String>,
    pub width: Patch<f64>,
    pub height: Patch<f64>,
    pub length: Patch<f64>,
    pub net_weight: Patch<f64>,
    pub expiration_rate: Patch<f64>,
    pub recommended_freezing_temperature: Patch<f64>,
    pub freezing_rate: Patch<f64>,
    pub product_type_id: Patch<i64>,
    pub seller_id: Patch<i64>,
}

impl Merge<Product> for ProductPatch {
    fn is_empty(&self) -> bool {
        !(self.product_code.is_set()
            || self.description.is_set()
            || self.width.is_set()
            || self.height.is_set()
            || self.length.is_set()
            || self.net_weight.is_set()
            || self.expiration_rate.is_set()
            || self.recommended_freezing_temperature.is_set()
            || self.freezing_rate.is_set()
            || self.product_type_id.is_set()
            || self.seller_id.is_set())
    }

    fn merge(self, current: Product) -> Product {
        Product {
            id: current.id,
            product_code: self.product_code.apply(current.product_code),
            description: self.description.apply(current.description),
            width: self.width.apply(current.width),
            height: self.height.apply(current.height),
            length: self.length.apply(current.length),
            net_weight: self.net_weight.apply(current.net_weight),
            expiration_rate: self.expiration_rate.apply(current.expiration_rate),
            recommended_freezing_temperature: self
                .recommended_freezing_temperature
                .apply(current.recommended_freezing_temperature),
            freezing_rate: self.freezing_rate.apply(current.freezing_rate),
            product_type_id: self.product_type_id.apply(current.product_type_id),
            seller_id: self.seller_id.into_option().or(current.seller_id),
        }
    }
}

/// Number of price records held by a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecords {
    pub product_id: i64,
    pub description: String,
    pub records_count: i64,
}

/// Products are unique by `product_code`.
pub trait ProductRepository: Lookup<Product> {
    fn get_all(&self) -> StoreResult<Vec<Product>>;
    fn get_by_code(&self, product_code: &str) -> StoreResult<Product>;
    fn create(&self, product: &Product) -> StoreResult<Product>;
    fn update(&self, product: &Product) -> StoreResult<Product>;
    fn delete(&self, id: i64) -> StoreResult<()>;
    fn report_records(&self, product_id: Option<i64>) -> StoreResult<Vec<ProductRecords>>;
}

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    product_types: Arc<dyn Lookup<ProductType>>,
    sellers: Arc<dyn Lookup<Seller>>,
}

impl ProductService {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        product_types: Arc<dyn Lookup<ProductType>>,
        sellers: Arc<dyn Lookup<Seller>>,
    ) -> Self {
        Self {
            products,
            product_types,
            sellers,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Product>> {
        self.products.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Product> {
        require_found(&*self.products, id)
    }

    pub fn create(&self, input: NewProduct) -> ServiceResult<Product> {
        RequiredFields::new()
            .field("product_code", &input.product_code)
            .field("description", &input.description)
            .field("width", &input.width)
            .field("height", &input.height)
            .field("length", &input.length)
            .field("net_weight", &input.net_weight)
            .field("expiration_rate", &input.expiration_rate)
            .field(
                "recommended_freezing_temperature",
                &input.recommended_freezing_temperature,
            )
            .field("freezing_rate", &input.freezing_rate)
            .field("product_type_id", &input.product_type_id)
            .check()?;

        let product = Product {
            id: 0,
            product_code: input.product_code,
            description: input.description,
            width: input.width,
            height: input.height,
            length: input.length,
            net_weight: input.net_weight,
            expiration_rate: input.expiration_rate,
            recommended_freezing_temperature: input
                .recommended_freezing_temperature
                .unwrap_or_default(),
            freezing_rate: input.freezing_rate,
            product_type_id: input.product_type_id,
            seller_id: input.seller_id.filter(|&id| id != 0),
        };
        check_rules(&product)?;

        ensure_exists::<ProductType, _>(&*self.product_types, product.product_type_id)?;
        if let Some(seller_id) = product.seller_id {
            ensure_exists::<Seller, _>(&*self.sellers, seller_id)?;
        }
        ensure_unique(self.products.get_by_code(&product.product_code), None, || {
            code_attr(&product.product_code)
        })?;

        self.products
            .create(&product)
            .map_err(|e| ServiceError::from_write(Product::NAME, code_attr(&product.product_code), e))
    }

    pub fn update(&self, id: i64, patch: ProductPatch) -> ServiceResult<Product> {
        let current = require_found(&*self.products, id)?;
        if patch.is_empty() {
            return Err(ServiceError::EmptyArguments);
        }

        RequiredFields::new()
            .patched("product_code", &patch.product_code)
            .patched("description", &patch.description)
            .patched("width", &patch.width)
            .patched("height", &patch.height)
            .patched("length", &patch.length)
            .patched("net_weight", &patch.net_weight)
            .patched("expiration_rate", &patch.expiration_rate)
            .patched("freezing_rate", &patch.freezing_rate)
            .patched("product_type_id", &patch.product_type_id)
            .patched("seller_id", &patch.seller_id)
            .check()?;

        if let Some(&type_id) = patch.product_type_id.changed_from(&current.product_type_id) {
            ensure_exists::<ProductType, _>(&*self.product_types, type_id)?;
        }
        if let Some(&seller_id) = patch.seller_id.as_set() {
            if current.seller_id != Some(seller_id) {
                ensure_exists::<Seller, _>(&*self.sellers, seller_id)?;
            }
        }

        let new_code = patch
            .product_code
            .changed_from(&current.product_code)
            .cloned();
        let merged = patch.merge(current);
        check_rules(&merged)?;

        if let Some(code) = new_code {
            ensure_unique(self.products.get_by_code(&code), Some(id), || code_attr(&code))?;
        }

        self.products
            .update(&merged)
            .map_err(|e| ServiceError::from_write(Product::NAME, code_attr(&merged.product_code), e))
    }

    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        require_found(&*self.products, id)?;
        self.products
            .delete(id)
            .map_err(|e| DeleteFailure::Internal.translate(Product::NAME, e))
    }

    pub fn report_records(&self, product_id: Option<i64>) -> ServiceResult<Vec<ProductRecords>> {
        if let Some(id) = product_id {
            self.get_by_id(id)?;
        }
        self.products
            .report_records(product_id)
            .map_err(ServiceError::from_store)
    }
}

fn check_rules(product: &Product) -> ServiceResult<()> {
    for (attr, value) in [
        ("width", product.width),
        ("height", product.height),
        ("length", product.length),
        ("net_weight", product.net_weight),
        ("expiration_rate", product.expiration_rate),
        ("freezing_rate", product.freezing_rate),
    ] {
        ensure(value > 0.0, format!("{attr} must be greater than zero"))?;
    }
    ensure_temperature(
        "recommended_freezing_temperature",
        product.recommended_freezing_temperature,
    )
}

fn code_attr(product_code: &str) -> String {
    format!("product_code: {product_code}")
}
