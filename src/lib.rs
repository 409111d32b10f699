pub mod apis;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod schedule;
pub mod storage;
pub mod types;

// Ports the pipeline depends on, and their production adapters
pub mod app;
pub mod infra;
