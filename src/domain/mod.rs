//! Pure domain types: the price catalog, currency codes, rate tables and the
//! conversion itself. Nothing in here performs I/O; the ports module names the
//! seams where infrastructure plugs in.

pub mod catalog;
pub mod conversion;
pub mod currency;
pub mod ports;
pub mod rates;
