//! Client for the project tracking and reporting dashboard backend.
//!
//! Two pieces: [`routes`], the navigation table deciding which page renders
//! for a path, and [`api`], one function per backend operation, all issued
//! through a shared [`client::ApiClient`].

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod routes;
pub mod types;

pub use client::{ApiClient, ApiClientBuilder, Middleware, RequestLog};
pub use config::Config;
pub use error::{Result, TrackerError};
pub use routes::{Page, ResolvedRoute, RouteTable};
