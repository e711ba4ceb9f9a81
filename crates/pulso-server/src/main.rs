//! Pulso Vital HTTP Server - Binary Entry Point
//!
//! This is the main entry point for the pulso-server binary.
//! The core implementation is in the library crate.

mod config;
#[path = "main_impl.rs"]
mod main_impl;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    main_impl::run().await
}
