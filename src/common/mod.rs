//! Common types shared across avltree.
//!
//! This module contains the ambient pieces used by every tree operation:
//! - Configuration constants and [`TreeConfig`]
//! - Error types

pub mod config;
pub mod error;

pub use config::TreeConfig;
pub use error::{Error, Result};
