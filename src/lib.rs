//! Controller for the vehicle knowledge-graph search page.
//!
//! Free-text queries and structured filters go to a remote search backend;
//! the returned vehicles are shown a page at a time in a list or grid layout.
//! The state machine lives in [`app`], driven by the single event loop in
//! [`runtime`] and served to a browser by [`routes`].

pub mod app;
pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod filters;
pub mod modal;
pub mod models;
pub mod paint;
pub mod pagination;
pub mod render;
pub mod routes;
pub mod runtime;
