//! CTD cast log - operations log API for CTD casts and water sampling at sea
//!
//! This library exposes the core modules for testing and reuse.

pub mod cast;
pub mod common;
pub mod config;
pub mod entity;
pub mod error;
pub mod identity;
pub mod reference;
pub mod routes;
pub mod sampling;
pub mod validation;
