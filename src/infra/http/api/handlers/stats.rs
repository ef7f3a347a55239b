use axum::extract::State;
use creatuno_api_types::PlatformStats;

use crate::cache::{CachedJson, EndpointClass};
use crate::infra::http::api::state::ApiState;

/// Aggregate counters. Degraded snapshots are served but not kept by shared caches.
pub async fn platform_stats(State(state): State<ApiState>) -> CachedJson<PlatformStats> {
    let snapshot = state.stats.snapshot().await;
    let class = if snapshot.degraded {
        EndpointClass::Fallback
    } else {
        EndpointClass::PlatformStats
    };
    CachedJson::new(snapshot.stats, state.policies.select(class))
}
