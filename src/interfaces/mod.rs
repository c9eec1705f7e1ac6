//! Outward-facing formats.

pub mod json;
