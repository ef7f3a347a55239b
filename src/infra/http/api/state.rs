use std::sync::Arc;

use axum::http::HeaderName;

use crate::application::escrow::EscrowService;
use crate::application::inbox::InboxService;
use crate::application::opportunities::OpportunityService;
use crate::application::push::PushService;
use crate::application::repos::HealthRepo;
use crate::application::stats::StatsService;
use crate::cache::EndpointPolicies;

/// Everything a handler needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct ApiState {
    pub stats: Arc<StatsService>,
    pub opportunities: Arc<OpportunityService>,
    pub inbox: Arc<InboxService>,
    pub escrow: Arc<EscrowService>,
    pub push: Arc<PushService>,
    pub health: Arc<dyn HealthRepo>,
    pub policies: EndpointPolicies,
    pub session_header: HeaderName,
}
