use std::sync::Arc;

use tracing::warn;

use crate::application::repos::{PlatformStats, StatsRepo};

const SOURCE: &str = "application::stats::StatsService";

/// Platform stats plus whether they came from the zeroed fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub stats: PlatformStats,
    pub degraded: bool,
}

#[derive(Clone)]
pub struct StatsService {
    stats: Arc<dyn StatsRepo>,
}

impl StatsService {
    pub fn new(stats: Arc<dyn StatsRepo>) -> Self {
        Self { stats }
    }

    /// Never fails: a datastore error yields zeroed counters flagged as degraded.
    pub async fn snapshot(&self) -> StatsSnapshot {
        match self.stats.platform_stats().await {
            Ok(stats) => StatsSnapshot {
                stats,
                degraded: false,
            },
            Err(err) => {
                warn!(
                    target = SOURCE,
                    error = %err,
                    "platform stats unavailable, serving zeroed fallback"
                );
                StatsSnapshot {
                    stats: PlatformStats::default(),
                    degraded: true,
                }
            }
        }
    }
}
