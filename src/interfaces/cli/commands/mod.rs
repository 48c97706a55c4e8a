//! CLI command implementations
//!
//! This module re-exports all CLI command functions.

mod analytics;
mod campaign_management;
mod config_gen;
mod helpers;
mod landing;
mod session;

pub use analytics::*;
pub use campaign_management::*;
pub use config_gen::*;
pub use landing::*;
pub use session::*;
