//! Storage topology: warehouses, their sections, and the product types a
//! section is dedicated to.

pub mod product_type;
pub mod section;
pub mod warehouse;

pub use product_type::{ProductType, ProductTypeRepository, ProductTypeService};
pub use section::{NewSection, Section, SectionPatch, SectionProducts, SectionRepository, SectionService};
pub use warehouse::{NewWarehouse, Warehouse, WarehousePatch, WarehouseRepository, WarehouseService};
