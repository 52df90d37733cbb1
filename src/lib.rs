//! SWIFT/BIC validation, decomposition and enrichment.
//!
//! [`BicResult`] normalizes a raw code, validates its layout, slices it into
//! bank / country / location / branch segments, resolves the ISO 3166
//! country name and looks the code up in a per-country bank dataset.

pub mod batch;
pub mod generator;
pub mod logging;
pub mod reference;
pub mod registry;
pub mod swift;
pub mod util;
pub mod validation;

pub use registry::{BankRecord, BankRegistry, DirectoryRegistry, MemoryRegistry, NoRegistry};
pub use swift::BicResult;
pub use validation::BicError;
