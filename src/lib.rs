//! Converts a catalog of USD package prices into other currencies using
//! live exchange rates, and renders the result as JSON.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod logging;
