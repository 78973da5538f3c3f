//! Geography: countries, provinces and localities.
//!
//! Localities are created through a resolve-or-create cascade: the country
//! and province are looked up by name and created on demand.

pub mod country;
pub mod locality;
pub mod province;

pub use country::{Country, CountryRepository};
pub use locality::{
    Locality, LocalityCarries, LocalityRepository, LocalitySellers, LocalityService, NewLocality,
};
pub use province::{Province, ProvinceRepository};
