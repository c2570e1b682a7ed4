//! Catalog domain module.
//!
//! This crate contains the business rules for the coffee & tea catalog,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no
//! storage beyond process memory).

pub mod product;
pub mod repository;
pub mod service;

pub use product::{Coffee, LeafType, Product, RoastType, Tea};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::CatalogService;
