//! Domain layer for the biodegradation sample service.
//!
//! This crate provides:
//! - [`SampleCatalog`] for listing samples together with their filter facets
//! - [`FilterFacets`] and [`SampleFilter`] for material/environment filtering
//! - [`Simulator`] and [`predict_degradation`], the placeholder degradation model

pub mod catalog;
pub mod error;
pub mod facets;
pub mod simulation;

pub use catalog::{Listing, SampleCatalog};
pub use error::DomainError;
pub use facets::{FilterFacets, SampleFilter};
pub use simulation::{
    SimulationParams, SimulationRequest, SimulationResult, Simulator, predict_degradation,
};
