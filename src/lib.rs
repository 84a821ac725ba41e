//! Campaign Forge: Themed Ad Campaign Generation
//!
//! Turns a product shot and a brand name into themed marketing variations,
//! persists the rendered images to a local asset library, and packages them
//! into a downloadable zip bundle. Falls back to a fixed mock dataset whenever
//! the model service is unavailable.

pub mod campaign;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod gateway;
pub mod library;
pub mod logging;
pub mod orchestrator;
pub mod package;
pub mod parser;
pub mod prompt;
pub mod provider;
