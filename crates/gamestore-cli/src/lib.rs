//! # gamestore-cli
//!
//! Non-interactive operator commands for the storefront.

pub mod app;
pub mod commands;
