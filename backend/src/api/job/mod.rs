//! Module for the job report API.
//!
//! Single-title reports and multi-title comparisons.

pub mod handlers;
pub mod routes;
