//! BibleGet API client.
//!
//! This crate is the single source of truth for the lookup wire contract:
//! quote search by reference and the version catalog.
//!
//! Blocking, no retries, no caching. Callers decide how failures are shown.

mod client;

pub use client::{
    BibleGetClient, ClientError, LookupService, PreferOrigin,
    APP_ID, DEFAULT_VERSION, METADATA_ENDPOINT, QUERY_ENDPOINT,
    parse_quote_response, parse_versions_response,
};
