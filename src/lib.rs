//! Creatuno JSON API service.
//!
//! Read endpoints choose a caching intent per route through
//! [`cache::EndpointPolicies`] and emit their payloads with
//! [`cache::cached_json`], which owns the `Cache-Control` encoding.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
