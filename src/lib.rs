// pricewatch library crate
// Exposes modules for integration testing

pub mod alerts;
pub mod cli;
pub mod config;
pub mod fetcher;
pub mod monitor;
