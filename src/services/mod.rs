//! Business logic services.

pub mod projects;
pub mod scan;
pub mod storage;
