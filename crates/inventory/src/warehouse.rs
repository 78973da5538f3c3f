use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure, ensure_exists, ensure_temperature, ensure_unique, require_found, DeleteFailure, Entity,
    Lookup, Merge, Patch, RequiredFields, ServiceError, ServiceResult, StoreResult,
};
use stockhub_locations::Locality;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub warehouse_code: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: i64,
    pub minimum_capacity: i64,
    pub minimum_temperature: f64,
}

impl Entity for Warehouse {
    const NAME: &'static str = "warehouse";

    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewWarehouse {
    pub warehouse_code: String,
    pub address: String,
    pub telephone: String,
    pub locality_id: i64,
    pub minimum_capacity: i64,
    pub minimum_temperature: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WarehousePatch {
    pub warehouse_code: Patch<String>,
    pub address: Patch<String>,
    pub telephone: Patch<String>,
    pub locality_id: Patch<i64>,
    pub minimum_capacity: Patch<i64>,
    pub minimum_temperature: Patch<f64>,
}

impl Merge<Warehouse> for WarehousePatch {
    fn is_empty(&self) -> bool {
        !(self.warehouse_code.is_set()
            || self.address.is_set()
            || self.telephone.is_set()
            || self.locality_id.is_set()
            || self.minimum_capacity.is_set()
            || self.minimum_temperature.is_set())
    }

    fn merge(self, current: Warehouse) -> Warehouse {
        Warehouse {
            id: current.id,
            warehouse_code: self.warehouse_code.apply(current.warehouse_code),
            address: self.address.apply(current.address),
            telephone: self.telephone.apply(current.telephone),
            locality_id: self.locality_id.apply(current.locality_id),
            minimum_capacity: self.minimum_capacity.apply(current.minimum_capacity),
            minimum_temperature: self.minimum_temperature.apply(current.minimum_temperature),
        }
    }
}

/// Warehouses are unique by `warehouse_code`.
pub trait WarehouseRepository: Lookup<Warehouse> {
    fn get_all(&self) -> StoreResult<Vec<Warehouse>>;
    fn get_by_code(&self, warehouse_code: &str) -> StoreResult<Warehouse>;
    fn create(&self, warehouse: &Warehouse) -> StoreResult<Warehouse>;
    fn update(&self, warehouse: &Warehouse) -> StoreResult<Warehouse>;
    fn delete(&self, id: i64) -> StoreResult<()>;
}

#[derive(Clone)]
pub struct WarehouseService {
    warehouses: Arc<dyn WarehouseRepository>,
    localities: Arc<dyn Lookup<Locality>>,
}

impl WarehouseService {
    pub fn new(
        warehouses: Arc<dyn WarehouseRepository>,
        localities: Arc<dyn Lookup<Locality>>,
    ) -> Self {
        Self {
            warehouses,
            localities,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Warehouse>> {
        self.warehouses.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Warehouse> {
        require_found(&*self.warehouses, id)
    }

    pub fn create(&self, input: NewWarehouse) -> ServiceResult<Warehouse> {
        RequiredFields::new()
            .field("warehouse_code", &input.warehouse_code)
            .field("address", &input.address)
            .field("telephone", &input.telephone)
            .field("locality_id", &input.locality_id)
            .field("minimum_capacity", &input.minimum_capacity)
            .field("minimum_temperature", &input.minimum_temperature)
            .check()?;

        let warehouse = Warehouse {
            id: 0,
            warehouse_code: input.warehouse_code,
            address: input.address,
            telephone: input.telephone,
            locality_id: input.locality_id,
            minimum_capacity: input.minimum_capacity,
            minimum_temperature: input.minimum_temperature.unwrap_or_default(),
        };
        check_rules(&warehouse)?;

        ensure_exists::<Locality, _>(&*self.localities, warehouse.locality_id)?;
        ensure_unique(
            self.warehouses.get_by_code(&warehouse.warehouse_code),
            None,
            || code_attr(&warehouse.warehouse_code),
        )?;

        self.warehouses
            .create(&warehouse)
            .map_err(|e| ServiceError::from_write(Warehouse::NAME, code_attr(&warehouse.warehouse_code), e))
    }

    pub fn update(&self, id: i64, patch: WarehousePatch) -> ServiceResult<Warehouse> {
        let current = require_found(&*self.warehouses, id)?;
        if patch.is_empty() {
            return Err(ServiceError::EmptyArguments);
        }

        RequiredFields::new()
            .patched("warehouse_code", &patch.warehouse_code)
            .patched("address", &patch.address)
            .patched("telephone", &patch.telephone)
            .patched("locality_id", &patch.locality_id)
            .patched("minimum_capacity", &patch.minimum_capacity)
            .check()?;

        if let Some(&locality_id) = patch.locality_id.changed_from(&current.locality_id) {
            ensure_exists::<Locality, _>(&*self.localities, locality_id)?;
        }

        let new_code = patch
            .warehouse_code
            .changed_from(&current.warehouse_code)
            .cloned();
        let merged = patch.merge(current);
        check_rules(&merged)?;

        if let Some(code) = &new_code {
            ensure_unique(self.warehouses.get_by_code(code), Some(id), || code_attr(code))?;
        }

        self.warehouses
            .update(&merged)
            .map_err(|e| ServiceError::from_write(Warehouse::NAME, code_attr(&merged.warehouse_code), e))
    }

    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        require_found(&*self.warehouses, id)?;
        self.warehouses
            .delete(id)
            .map_err(|e| DeleteFailure::Internal.translate(Warehouse::NAME, e))
    }
}

fn check_rules(warehouse: &Warehouse) -> ServiceResult<()> {
    ensure(
        warehouse.minimum_capacity > 0,
        "minimum_capacity must be greater than zero",
    )?;
    ensure_temperature("minimum_temperature", warehouse.minimum_temperature)
}

fn code_attr(code: &str) -> String {
    format!("warehouse_code: {code}")
}
