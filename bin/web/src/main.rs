//! Browser entry point for the amber-vault banking client.
//!
//! The binary compiles to WebAssembly and renders entirely on the
//! client. All API calls go to the external banking backend named in
//! [`config::ClientConfig`].

#![allow(non_snake_case)]

mod api;
mod app;
mod config;
mod exchange;
mod guard;
mod pages;
mod storage;
mod types;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
