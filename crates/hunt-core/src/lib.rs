//! Hunt Core - Domain models, configuration, storage layout and ports
//!
//! This crate contains the core domain types shared by every City Chamber
//! Hunt crate, plus the port traits that the network adapters implement.

pub mod config;
pub mod error;
pub mod imaging;
pub mod layout;
pub mod models;
pub mod ports;

pub use error::{HuntError, Result};
