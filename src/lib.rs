pub mod actor;
pub mod api;
pub mod blueprint;
pub mod config;
pub mod error;
pub mod geometry;
pub mod instrumentation;
pub mod simulation;
pub mod summary;
