//! HTTP response caching policy.
//!
//! Handlers never write `Cache-Control` by hand. They pick an
//! [`EndpointClass`], resolve it through the injected [`EndpointPolicies`],
//! and hand the payload to [`cached_json`] (or return a [`CachedJson`]):
//!
//! ```text
//! public, max-age=300, stale-while-revalidate=600   // platform stats
//! public, max-age=60, stale-while-revalidate=300    // public listings
//! private, max-age=0                                // user-scoped data
//! ```
//!
//! Freshness windows are configured under `[cache]` in `creatuno.toml`.

mod policy;
mod response;
mod selector;

pub use policy::{CachePolicy, Visibility};
pub use response::{CachedJson, cached_json, private_cached_json, public_cached_json};
pub use selector::{EndpointClass, EndpointPolicies, Freshness};
