//! Library exports for the bookmark service
//!
//! This module exposes internal components for integration tests and
//! potential library usage.

pub mod config;
pub mod database;
pub mod error;
pub mod fetch;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod route;
