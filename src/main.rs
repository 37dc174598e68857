//! SACCO Dashboard
//!
//! Browser frontend for a branch-based member savings and loan cooperative,
//! built with Leptos (WASM).
//!
//! # Features
//!
//! - Role-specific dashboards (admin, branch lead, member)
//! - Contribution tracking and loan request/approval workflows
//! - Penalty tracking and share/interest projections
//! - Financial report generation and download
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. All durable state lives behind the cooperative REST API;
//! the dashboards poll it on fixed intervals and merge responses into a
//! shared reactive store.

use leptos::*;

mod api;
mod app;
mod components;
mod model;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
