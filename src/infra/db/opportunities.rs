use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{OpportunitiesRepo, OpportunityQueryFilter, RepoError};
use crate::domain::entities::OpportunityRecord;

use super::{PostgresRepositories, map_sqlx_error};

#[derive(sqlx::FromRow)]
struct OpportunityRow {
    id: Uuid,
    title: String,
    category: String,
    company_name: Option<String>,
    location: Option<String>,
    budget_min: Option<i64>,
    budget_max: Option<i64>,
    currency: String,
    is_open: bool,
    created_at: OffsetDateTime,
}

impl From<OpportunityRow> for OpportunityRecord {
    fn from(row: OpportunityRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            category: row.category,
            company_name: row.company_name,
            location: row.location,
            budget_min: row.budget_min,
            budget_max: row.budget_max,
            currency: row.currency,
            is_open: row.is_open,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl OpportunitiesRepo for PostgresRepositories {
    async fn list_open(
        &self,
        filter: &OpportunityQueryFilter,
        limit: u32,
    ) -> Result<Vec<OpportunityRecord>, RepoError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new(
            "SELECT o.id, o.title, o.category, o.company_name, o.location, o.budget_min, \
             o.budget_max, o.currency, o.is_open, o.created_at \
             FROM opportunities o WHERE o.is_open",
        );

        if let Some(category) = filter.category.as_ref() {
            qb.push(" AND LOWER(o.category) = ");
            qb.push_bind(category);
        }

        qb.push(" ORDER BY o.created_at DESC, o.id DESC LIMIT ");
        qb.push_bind(i64::from(limit));

        let rows = qb
            .build_query_as::<OpportunityRow>()
            .fetch_all(self.pool())
            .await
            .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(OpportunityRecord::from).collect())
    }
}
