//! Service wiring: every entity service over one storage backend.

use std::sync::Arc;

use anyhow::Context;

use stockhub_infra::{Backend, InMemoryStore, PgStore};
use stockhub_inventory::{ProductTypeService, SectionService, WarehouseService};
use stockhub_locations::LocalityService;
use stockhub_parties::{BuyerService, CarryService, EmployeeService, SellerService};
use stockhub_products::{ProductBatchService, ProductRecordService, ProductService};
use stockhub_purchasing::{InboundOrderService, PurchaseOrderService};

use crate::config::StorageConfig;

#[derive(Clone)]
pub struct AppServices {
    pub localities: LocalityService,
    pub warehouses: WarehouseService,
    pub product_types: ProductTypeService,
    pub sections: SectionService,
    pub employees: EmployeeService,
    pub buyers: BuyerService,
    pub sellers: SellerService,
    pub carries: CarryService,
    pub products: ProductService,
    pub product_records: ProductRecordService,
    pub product_batches: ProductBatchService,
    pub purchase_orders: PurchaseOrderService,
    pub inbound_orders: InboundOrderService,
}

impl AppServices {
    /// Wire every service to `store`, which serves as each repository and
    /// every cross-entity lookup.
    pub fn new<S: Backend>(store: Arc<S>) -> Self {
        let s = || store.clone();
        Self {
            localities: LocalityService::new(s(), s(), s()),
            warehouses: WarehouseService::new(s(), s()),
            product_types: ProductTypeService::new(s()),
            sections: SectionService::new(s(), s(), s()),
            employees: EmployeeService::new(s(), s()),
            buyers: BuyerService::new(s()),
            sellers: SellerService::new(s(), s()),
            carries: CarryService::new(s(), s()),
            products: ProductService::new(s(), s(), s()),
            product_records: ProductRecordService::new(s(), s()),
            product_batches: ProductBatchService::new(s(), s(), s()),
            purchase_orders: PurchaseOrderService::new(s(), s(), s()),
            inbound_orders: InboundOrderService::new(s(), s(), s(), s()),
        }
    }

    /// In-memory wiring with the default product types (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryStore::seeded()))
    }
}

pub async fn build_services(storage: &StorageConfig) -> anyhow::Result<AppServices> {
    match storage {
        StorageConfig::InMemory => {
            tracing::info!("using in-memory stores");
            Ok(AppServices::in_memory())
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let store = PgStore::connect(database_url, *max_connections)
                .await
                .context("failed to connect to postgres")?;
            store
                .migrate()
                .await
                .context("failed to apply database schema")?;
            tracing::info!(max_connections, "using postgres stores");
            Ok(AppServices::new(Arc::new(store)))
        }
    }
}
