use serde::Serialize;
use tokio::sync::OnceCell;

use crate::{
    api::users,
    client::ApiClient,
    config::ClientConfig,
    error::{ApiError, ApiResult},
    feedback::{Prompt, Tone},
    models::{Role, RoleInfo, UserStatus},
    session::Session,
};

/// RoleGate
///
/// Resolves the signed-in user's role and status once and keeps the answer for the
/// lifetime of the session. There is no revalidation; a new session gets a new gate.
///
/// Everything decided here is cosmetic. The backend enforces authorization.
pub struct RoleGate {
    client: ApiClient,
    resolved: OnceCell<RoleInfo>,
}

impl RoleGate {
    pub fn for_session(config: &ClientConfig, session: &Session) -> ApiResult<Self> {
        Ok(Self::with_client(ApiClient::for_session(config, session)?))
    }

    pub fn with_client(client: ApiClient) -> Self {
        Self {
            client,
            resolved: OnceCell::new(),
        }
    }

    /// resolve
    ///
    /// Fetches `/get-user-role` on first use. Concurrent first callers share one
    /// request; a failed lookup is not cached, so the next call tries again.
    pub async fn resolve(&self) -> ApiResult<&RoleInfo> {
        self.resolved
            .get_or_try_init(|| async {
                let info = users::get_user_role(&self.client).await?;
                tracing::info!(role = %info.role, status = %info.effective_status(), "role resolved");
                Ok::<_, ApiError>(info)
            })
            .await
    }

    /// The cached answer, if resolution already happened.
    pub fn cached(&self) -> Option<&RoleInfo> {
        self.resolved.get()
    }

    pub async fn role(&self) -> ApiResult<Role> {
        Ok(self.resolve().await?.role)
    }

    pub async fn status(&self) -> ApiResult<UserStatus> {
        Ok(self.resolve().await?.effective_status())
    }

    pub async fn navigation(&self) -> ApiResult<Navigation> {
        Ok(Navigation::for_role(self.role().await?))
    }

    /// create_request_gate
    ///
    /// Blocked users see a prompt and are sent away from the create-request page.
    pub async fn create_request_gate(&self) -> ApiResult<CreateRequestGate> {
        Ok(CreateRequestGate::for_status(self.status().await?))
    }
}

/// NavItem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub to: &'static str,
    pub label: &'static str,
}

const fn nav(to: &'static str, label: &'static str) -> NavItem {
    NavItem { to, label }
}

const DASHBOARD_HOME: NavItem = nav("/dashboard", "Dashboard Home");

const ADMIN_LINKS: [NavItem; 6] = [
    DASHBOARD_HOME,
    nav("/dashboard/manage-users", "Manage Users"),
    nav("/dashboard/manage-donations", "Manage Requests"),
    nav("/dashboard/content-management", "Content Mgmt"),
    nav("/dashboard/funding", "Funding"),
    nav("/dashboard/contacts", "Contacts"),
];

const VOLUNTEER_LINKS: [NavItem; 4] = [
    DASHBOARD_HOME,
    nav("/dashboard/all-blood-donation-request", "All Requests"),
    nav("/dashboard/contacts", "Messages"),
    nav("/dashboard/content-management", "Manage Blogs"),
];

const GENERAL_LINKS: [NavItem; 5] = [
    DASHBOARD_HOME,
    nav("/dashboard/my-donation-requests", "My Requests"),
    nav("/dashboard/create-donation-request", "Create Request"),
    nav("/dashboard/add-blog", "Add Blog"),
    nav("/dashboard/profile", "My Profile"),
];

/// Navigation
///
/// The dashboard sidebar for one role: an optional "power" section for staff and
/// the general menu everybody gets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub power_title: Option<&'static str>,
    pub power: Vec<NavItem>,
    pub general: Vec<NavItem>,
}

impl Navigation {
    pub fn for_role(role: Role) -> Self {
        let (power_title, power): (Option<&'static str>, &[NavItem]) = match role {
            Role::Admin => (Some("Admin Tools"), &ADMIN_LINKS[..]),
            Role::Volunteer => (Some("Volunteer Tools"), &VOLUNTEER_LINKS[..]),
            Role::Donor => (None, &[][..]),
        };

        // Staff already see Dashboard Home in their power section.
        let general = if role.is_staff() {
            &GENERAL_LINKS[1..]
        } else {
            &GENERAL_LINKS[..]
        };

        Self {
            power_title,
            power: power.to_vec(),
            general: general.to_vec(),
        }
    }

    pub fn contains(&self, to: &str) -> bool {
        self.power.iter().chain(self.general.iter()).any(|item| item.to == to)
    }
}

/// CreateRequestGate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateRequestGate {
    Allowed,
    /// Show the prompt, then navigate to `redirect_to`.
    Blocked { prompt: Prompt, redirect_to: &'static str },
}

impl CreateRequestGate {
    pub fn for_status(status: UserStatus) -> Self {
        match status {
            UserStatus::Active => CreateRequestGate::Allowed,
            UserStatus::Blocked => {
                tracing::warn!("blocked user attempted to open the create-request page");
                CreateRequestGate::Blocked {
                    prompt: Prompt::new(
                        Tone::Error,
                        "Blocked!",
                        "You are blocked and cannot create requests.",
                        "OK",
                    ),
                    redirect_to: "/",
                }
            }
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, CreateRequestGate::Allowed)
    }
}
