//! services/api/src/lib.rs
//!
//! The HTTP service for the rental marketplace: adapters for the core ports,
//! configuration, and the axum web layer.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
