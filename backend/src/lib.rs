//! Backend for job title resolution and AI displacement risk reports.
//!
//! Resolves free-text job titles to SOC codes, serves labor statistics from a
//! freshness-checked store (refilling it from the upstream API on a miss),
//! scores AI displacement risk and exposes it all over a small JSON API.

pub mod api;
pub mod classification;
pub mod config;
pub mod database;
pub mod errors;
pub mod services;
