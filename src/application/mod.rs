//! Application layer: the controller that owns the converter state.
//!
//! `PricingConverter` applies catalog edits, drives the
//! Idle → Converting → Succeeded/Failed cycle and hands results to the
//! presenter and clipboard.

pub mod converter;
