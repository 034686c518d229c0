//! Checkout Tracker Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod error;
mod filter;
mod models;
mod reconcile;
mod registration;
mod rows;
mod store;
mod widgets;

fn main() {
    console_error_panic_hook::set_once();
    app::start();
}
