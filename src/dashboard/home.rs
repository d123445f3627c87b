use serde::Serialize;

use crate::{
    api::{donations, public},
    client::ApiClient,
    error::ApiResult,
    models::{DashboardStats, DonationRequest, Role},
    session::Session,
};

/// How many of the requester's latest requests the landing page shows.
pub const RECENT_REQUESTS: u32 = 3;

/// DashboardHome
///
/// The landing page. Staff get the site-wide counters, donors get their most
/// recent requests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardHome {
    pub greeting: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<DashboardStats>,
    pub recent_requests: Vec<DonationRequest>,
}

impl DashboardHome {
    pub async fn load(client: &ApiClient, session: &Session, role: Role) -> ApiResult<Self> {
        let greeting = format!("Welcome, {}!", session.author_name());

        if role.is_staff() {
            let stats = public::get_dashboard_stats(client).await?;
            return Ok(Self {
                greeting,
                role,
                stats: Some(stats),
                recent_requests: Vec::new(),
            });
        }

        let recent_requests =
            donations::get_my_donation_requests(client, session.email(), Some(RECENT_REQUESTS)).await?;
        Ok(Self {
            greeting,
            role,
            stats: None,
            recent_requests,
        })
    }
}
