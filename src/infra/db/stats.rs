use async_trait::async_trait;

use crate::application::repos::{PlatformStats, RepoError, StatsRepo};
use crate::domain::types::EscrowStatus;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct StatsRow {
    creatives: i64,
    mentors: i64,
    open_opportunities: i64,
    completed_projects: i64,
}

#[async_trait]
impl StatsRepo for PostgresRepositories {
    async fn platform_stats(&self) -> Result<PlatformStats, RepoError> {
        let row = sqlx::query_as::<_, StatsRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM profiles WHERE role = 'creative') AS creatives,
                (SELECT COUNT(*) FROM profiles WHERE role = 'mentor') AS mentors,
                (SELECT COUNT(*) FROM opportunities WHERE is_open) AS open_opportunities,
                (SELECT COUNT(*) FROM escrow_payments WHERE status = $1) AS completed_projects
            "#,
        )
        .bind(EscrowStatus::Released)
        .fetch_one(self.pool())
        .await
        .map_err(map_sqlx_error)?;

        Ok(PlatformStats {
            creatives: row.creatives,
            mentors: row.mentors,
            open_opportunities: row.open_opportunities,
            completed_projects: row.completed_projects,
        })
    }
}
