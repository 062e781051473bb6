//! Domain models and DTOs shared across the pipeline.

pub mod metric;
pub mod outcome;
pub mod project;
pub mod tool;
