use std::sync::Arc;

use creatuno_api_types::OpportunityView;

use crate::application::repos::{OpportunitiesRepo, OpportunityQueryFilter, RepoError};
use crate::domain::entities::OpportunityRecord;

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 50;

#[derive(Clone)]
pub struct OpportunityService {
    opportunities: Arc<dyn OpportunitiesRepo>,
}

impl OpportunityService {
    pub fn new(opportunities: Arc<dyn OpportunitiesRepo>) -> Self {
        Self { opportunities }
    }

    pub async fn list_open(
        &self,
        category: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<OpportunityView>, RepoError> {
        let filter = OpportunityQueryFilter {
            category: normalize_category(category),
        };
        let records = self
            .opportunities
            .list_open(&filter, clamp_limit(limit))
            .await?;
        Ok(records.into_iter().map(opportunity_view).collect())
    }
}

pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

fn normalize_category(category: Option<&str>) -> Option<String> {
    category
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

fn opportunity_view(record: OpportunityRecord) -> OpportunityView {
    OpportunityView {
        id: record.id,
        title: record.title,
        category: record.category,
        company_name: record.company_name,
        location: record.location,
        budget_min: record.budget_min,
        budget_max: record.budget_max,
        currency: record.currency,
        created_at: record.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(500)), MAX_LIMIT);
        assert_eq!(clamp_limit(Some(7)), 7);
    }

    #[test]
    fn category_is_trimmed_and_lowercased() {
        assert_eq!(
            normalize_category(Some("  Design ")),
            Some("design".to_string())
        );
        assert_eq!(normalize_category(Some("   ")), None);
        assert_eq!(normalize_category(None), None);
    }
}
