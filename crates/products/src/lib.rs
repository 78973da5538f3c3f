//! Catalog: products, their price history records, and the physical batches
//! stored in sections.

pub mod batch;
pub mod product;
pub mod record;

pub use batch::{NewProductBatch, ProductBatch, ProductBatchRepository, ProductBatchService};
pub use product::{
    NewProduct, Product, ProductPatch, ProductRecords, ProductRepository, ProductService,
};
pub use record::{NewProductRecord, ProductRecord, ProductRecordRepository, ProductRecordService};
