//! Repository implementations.
//!
//! Both backends implement every repository trait from the domain crates and
//! report failures as [`StoreError`](stockhub_core::StoreError):
//!
//! | Condition | `StoreError` |
//! |-----------|--------------|
//! | no row for the key | `NotFound` |
//! | unique constraint violated (`23505`) | `Conflict(constraint)` |
//! | anything else, including restricted deletes (`23503`) | `Backend(message)` |

mod in_memory;
mod postgres;

pub use in_memory::InMemoryStore;
pub use postgres::PgStore;

use stockhub_inventory::{ProductTypeRepository, SectionRepository, WarehouseRepository};
use stockhub_locations::{CountryRepository, LocalityRepository, ProvinceRepository};
use stockhub_parties::{BuyerRepository, CarryRepository, EmployeeRepository, SellerRepository};
use stockhub_products::{ProductBatchRepository, ProductRecordRepository, ProductRepository};
use stockhub_purchasing::{InboundOrderRepository, PurchaseOrderRepository};

/// A store that backs every repository in the system.
pub trait Backend:
    CountryRepository
    + ProvinceRepository
    + LocalityRepository
    + WarehouseRepository
    + SectionRepository
    + ProductTypeRepository
    + EmployeeRepository
    + BuyerRepository
    + SellerRepository
    + CarryRepository
    + ProductRepository
    + ProductRecordRepository
    + ProductBatchRepository
    + PurchaseOrderRepository
    + InboundOrderRepository
    + 'static
{
}

impl<S> Backend for S where
    S: CountryRepository
        + ProvinceRepository
        + LocalityRepository
        + WarehouseRepository
        + SectionRepository
        + ProductTypeRepository
        + EmployeeRepository
        + BuyerRepository
        + SellerRepository
        + CarryRepository
        + ProductRepository
        + ProductRecordRepository
        + ProductBatchRepository
        + PurchaseOrderRepository
        + InboundOrderRepository
        + 'static
{
}
