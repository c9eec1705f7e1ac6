//! Adapters implementing the domain ports: the HTTP rate source, the system
//! clipboard and in-memory stand-ins for both.

pub mod clipboard;
pub mod http;
pub mod in_memory;
