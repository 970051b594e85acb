//! Hotel - flat-file registry of customers, rooms and room assignments
//!
//! This library exports the core modules for testing and potential reuse.

pub mod app;
pub mod logging;
pub mod models;
pub mod storage;
