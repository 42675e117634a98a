//! Module for title autocomplete and the search-log views.

pub mod handlers;
pub mod routes;
