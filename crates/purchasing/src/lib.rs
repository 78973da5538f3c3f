//! Order flows: purchase orders placed by buyers and inbound orders received
//! into warehouses by employees.

pub mod inbound;
pub mod purchase;

pub use inbound::{InboundOrder, InboundOrderRepository, InboundOrderService, NewInboundOrder};
pub use purchase::{NewPurchaseOrder, PurchaseOrder, PurchaseOrderRepository, PurchaseOrderService};
