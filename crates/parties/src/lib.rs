//! People and companies the warehouse deals with: buyers, sellers,
//! employees and carriers.

pub mod buyer;
pub mod carry;
pub mod employee;
pub mod seller;

pub use buyer::{Buyer, BuyerPatch, BuyerPurchaseOrders, BuyerRepository, BuyerService, NewBuyer};
pub use carry::{Carry, CarryRepository, CarryService, NewCarry};
pub use employee::{
    Employee, EmployeeInboundOrders, EmployeePatch, EmployeeRepository, EmployeeService, NewEmployee,
};
pub use seller::{NewSeller, Seller, SellerPatch, SellerRepository, SellerService};
