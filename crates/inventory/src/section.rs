use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stockhub_core::{
    ensure, ensure_exists, ensure_temperature, ensure_unique, require_found, DeleteFailure, Entity,
    Lookup, Merge, Patch, RequiredFields, ServiceError, ServiceResult, StoreResult,
};

use crate::product_type::ProductType;
use crate::warehouse::Warehouse;

/// A temperature-controlled area of a warehouse.
///
/// Invariants: `minimum_capacity <= maximum_capacity`, `current_capacity`
/// within `0..=maximum_capacity`, temperatures not below absolute zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub section_number: i64,
    pub current_temperature: f64,
    pub minimum_temperature: f64,
    pub current_capacity: i64,
    pub minimum_capacity: i64,
    pub maximum_capacity: i64,
    pub warehouse_id: i64,
    pub product_type_id: i64,
}

impl Entity for Section {
    const NAME: &'static str = "section";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Create request. Temperatures and current capacity may legitimately be
/// zero, so they are required by presence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewSection {
    pub section_number: i64,
    pub current_temperature: Option<f64>,
    pub minimum_temperature: Option<f64>,
    pub current_capacity: Option<i64>,
    pub minimum_capacity: i64,
    pub maximum_capacity: i64,
    pub warehouse_id: i64,
    pub product_type_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionPatch {
    pub section_number: Patch<i64>,
    pub current_temperature: Patch<f64>,
    pub minimum_temperature: Patch<f64>,
    pub current_capacity: Patch<i64>,
    pub minimum_capacity: Patch<i64>,
    pub maximum_capacity: Patch<i64>,
    pub warehouse_id: Patch<i64>,
    pub product_type_id: Patch<i64>,
}

impl Merge<Section> for SectionPatch {
    fn is_empty(&self) -> bool {
        !(self.section_number.is_set()
            || self.current_temperature.is_set()
            || self.minimum_temperature.is_set()
            || self.current_capacity.is_set()
            || self.minimum_capacity.is_set()
            || self.maximum_capacity.is_set()
            || self.warehouse_id.is_set()
            || self.product_type_id.is_set())
    }

    fn merge(self, current: Section) -> Section {
        Section {
            id: current.id,
            section_number: self.section_number.apply(current.section_number),
            current_temperature: self.current_temperature.apply(current.current_temperature),
            minimum_temperature: self.minimum_temperature.apply(current.minimum_temperature),
            current_capacity: self.current_capacity.apply(current.current_capacity),
            minimum_capacity: self.minimum_capacity.apply(current.minimum_capacity),
            maximum_capacity: self.maximum_capacity.apply(current.maximum_capacity),
            warehouse_id: self.warehouse_id.apply(current.warehouse_id),
            product_type_id: self.product_type_id.apply(current.product_type_id),
        }
    }
}

/// Stock held by a section: the sum of its batches' current quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionProducts {
    pub section_id: i64,
    pub section_number: i64,
    pub products_count: i64,
}

/// Sections are unique by `section_number`.
pub trait SectionRepository: Lookup<Section> {
    fn get_all(&self) -> StoreResult<Vec<Section>>;
    fn get_by_section_number(&self, section_number: i64) -> StoreResult<Section>;
    fn create(&self, section: &Section) -> StoreResult<Section>;
    fn update(&self, section: &Section) -> StoreResult<Section>;
    fn delete(&self, id: i64) -> StoreResult<()>;
    fn report_products(&self, section_id: Option<i64>) -> StoreResult<Vec<SectionProducts>>;
}

#[derive(Clone)]
pub struct SectionService {
    sections: Arc<dyn SectionRepository>,
    warehouses: Arc<dyn Lookup<Warehouse>>,
    product_types: Arc<dyn Lookup<ProductType>>,
}

impl SectionService {
    pub fn new(
        sections: Arc<dyn SectionRepository>,
        warehouses: Arc<dyn Lookup<Warehouse>>,
        product_types: Arc<dyn Lookup<ProductType>>,
    ) -> Self {
        Self {
            sections,
            warehouses,
            product_types,
        }
    }

    pub fn get_all(&self) -> ServiceResult<Vec<Section>> {
        self.sections.get_all().map_err(ServiceError::from_store)
    }

    pub fn get_by_id(&self, id: i64) -> ServiceResult<Section> {
        require_found(&*self.sections, id)
    }

    pub fn create(&self, input: NewSection) -> ServiceResult<Section> {
        RequiredFields::new()
            .field("section_number", &input.section_number)
            .field("current_temperature", &input.current_temperature)
            .field("minimum_temperature", &input.minimum_temperature)
            .field("current_capacity", &input.current_capacity)
            .field("minimum_capacity", &input.minimum_capacity)
            .field("maximum_capacity", &input.maximum_capacity)
            .field("warehouse_id", &input.warehouse_id)
            .field("product_type_id", &input.product_type_id)
            .check()?;

        let section = Section {
            id: 0,
            section_number: input.section_number,
            current_temperature: input.current_temperature.unwrap_or_default(),
            minimum_temperature: input.minimum_temperature.unwrap_or_default(),
            current_capacity: input.current_capacity.unwrap_or_default(),
            minimum_capacity: input.minimum_capacity,
            maximum_capacity: input.maximum_capacity,
            warehouse_id: input.warehouse_id,
            product_type_id: input.product_type_id,
        };
        check_rules(&section)?;

        ensure_exists::<Warehouse, _>(&*self.warehouses, section.warehouse_id)?;
        ensure_exists::<ProductType, _>(&*self.product_types, section.product_type_id)?;
        ensure_unique(
            self.sections.get_by_section_number(section.section_number),
            None,
            || number_attr(section.section_number),
        )?;

        self.sections
            .create(&section)
            .map_err(|e| ServiceError::from_write(Section::NAME, number_attr(section.section_number), e))
    }

    pub fn update(&self, id: i64, patch: SectionPatch) -> ServiceResult<Section> {
        let current = require_found(&*self.sections, id)?;
        if patch.is_empty() {
            return Err(ServiceError::EmptyArguments);
        }

        RequiredFields::new()
            .patched("section_number", &patch.section_number)
            .patched("minimum_capacity", &patch.minimum_capacity)
            .patched("maximum_capacity", &patch.maximum_capacity)
            .patched("warehouse_id", &patch.warehouse_id)
            .patched("product_type_id", &patch.product_type_id)
            .check()?;

        if let Some(&warehouse_id) = patch.warehouse_id.changed_from(&current.warehouse_id) {
            ensure_exists::<Warehouse, _>(&*self.warehouses, warehouse_id)?;
        }
        if let Some(&product_type_id) = patch.product_type_id.changed_from(&current.product_type_id) {
            ensure_exists::<ProductType, _>(&*self.product_types, product_type_id)?;
        }

        let new_number = patch.section_number.changed_from(&current.section_number).copied();
        let merged = patch.merge(current);
        check_rules(&merged)?;

        if let Some(number) = new_number {
            ensure_unique(
                self.sections.get_by_section_number(number),
                Some(id),
                || number_attr(number),
            )?;
        }

        self.sections
            .update(&merged)
            .map_err(|e| ServiceError::from_write(Section::NAME, number_attr(merged.section_number), e))
    }

    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        require_found(&*self.sections, id)?;
        self.sections
            .delete(id)
            .map_err(|e| DeleteFailure::Internal.translate(Section::NAME, e))
    }

    pub fn report_products(&self, section_id: Option<i64>) -> ServiceResult<Vec<SectionProducts>> {
        if let Some(id) = section_id {
            self.get_by_id(id)?;
        }
        self.sections
            .report_products(section_id)
            .map_err(ServiceError::from_store)
    }
}

fn check_rules(section: &Section) -> ServiceResult<()> {
    ensure(
        section.minimum_capacity <= section.maximum_capacity,
        "minimum_capacity cannot be greater than maximum_capacity",
    )?;
    ensure(
        (0..=section.maximum_capacity).contains(&section.current_capacity),
        "current_capacity must be between zero and maximum_capacity",
    )?;
    ensure_temperature("current_temperature", section.current_temperature)?;
    ensure_temperature("minimum_temperature", section.minimum_temperature)
}

fn number_attr(section_number: i64) -> String {
    format!("id: {section_number}")
}
