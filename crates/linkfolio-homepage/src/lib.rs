//! # Linkfolio Homepage
//!
//! Serves link-in-bio pages over HTTP. Pages are rendered on the server with
//! Dioxus SSR; the "Save Contact" action downloads the vCard from
//! `/{user_id}/contact.vcf`.
//!
//! ```rust,ignore
//! use linkfolio_homepage::{AppState, HomepageConfig, serve};
//!
//! serve(HomepageConfig::default(), AppState::new(loader)).await?;
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod routes;
pub mod server;

pub use config::HomepageConfig;
pub use error::HomepageError;
pub use render::{render_not_found, render_profile};
pub use routes::{AppState, router};
pub use server::{serve, serve_on};
