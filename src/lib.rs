//! Reelpage - client for a video-campaign landing page and analytics backend
//!
//! This library provides the client side of the campaign system: admin
//! session handling, the campaign REST access layer, fire-and-forget event
//! tracking, analytics reads and the page controllers that tie them together.
//!
//! # Features
//! - **cli**: Command-line interface (default)
//!
//! # Architecture
//! - `session`: Token storage and the admin-view guard
//! - `client`: REST clients (auth, campaigns, tracking / analytics)
//! - `tracking`: Sink seam, emitters and per-page de-duplication
//! - `controllers`: Login, landing, campaign dashboard and analytics state machines
//! - `meta`: Social-preview meta tags
//! - `router`: Path → view table
//! - `config`: Configuration management
//! - `system`: Logging setup

#[cfg(feature = "cli")]
pub mod cli;
pub mod client;
pub mod config;
pub mod controllers;
pub mod errors;
pub mod interfaces;
pub mod meta;
pub mod models;
pub mod router;
pub mod session;
pub mod system;
pub mod tracking;
pub mod utils;
