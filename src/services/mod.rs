pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService, Removal};
pub use catalog_service_impl::DefaultCatalogService;

pub mod ingestion;
pub use ingestion::IngestionEngine;

pub mod query_planner;
pub use query_planner::{QueryPlan, QueryPlanner};

#[cfg(test)]
pub(crate) mod test_support;
