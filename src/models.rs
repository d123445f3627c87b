use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blood::BloodGroup;

// --- Enumerations ---

/// Role
///
/// The RBAC field on a user record. Gates dashboard sections; the backend is the
/// authority on what each role may actually do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Donor,
    Volunteer,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Donor, Role::Volunteer, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Donor => "donor",
            Role::Volunteer => "volunteer",
            Role::Admin => "admin",
        }
    }

    /// Admins and volunteers get the "power" dashboard section.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Volunteer)
    }
}

/// UserStatus
///
/// Account status. A `blocked` user may not create donation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Active,
    Blocked,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Blocked => "blocked",
        }
    }
}

/// DonationStatus
///
/// Lifecycle of a donation request: `pending → inprogress → {done, canceled}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    #[default]
    Pending,
    #[serde(rename = "inprogress")]
    InProgress,
    Done,
    Canceled,
}

impl DonationStatus {
    pub const ALL: [DonationStatus; 4] = [
        DonationStatus::Pending,
        DonationStatus::InProgress,
        DonationStatus::Done,
        DonationStatus::Canceled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::InProgress => "inprogress",
            DonationStatus::Done => "done",
            DonationStatus::Canceled => "canceled",
        }
    }

    /// Statuses reachable from `self` in one step.
    pub fn allowed_transitions(self) -> &'static [DonationStatus] {
        match self {
            DonationStatus::Pending => &[DonationStatus::InProgress],
            DonationStatus::InProgress => &[DonationStatus::Done, DonationStatus::Canceled],
            DonationStatus::Done | DonationStatus::Canceled => &[],
        }
    }

    pub fn can_transition_to(self, next: DonationStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

/// BlogStatus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

impl BlogStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BlogStatus::Draft => "draft",
            BlogStatus::Published => "published",
        }
    }

    /// The only permitted transition: draft ↔ published.
    pub fn toggled(self) -> Self {
        match self {
            BlogStatus::Draft => BlogStatus::Published,
            BlogStatus::Published => BlogStatus::Draft,
        }
    }
}

/// A status or role string that matched no known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! display_from_str {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownVariant;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    serde_json::from_value(serde_json::Value::String(s.trim().to_lowercase()))
                        .map_err(|_| UnknownVariant {
                            kind: stringify!($ty),
                            value: s.to_string(),
                        })
                }
            }
        )+
    };
}

display_from_str!(Role, UserStatus, DonationStatus, BlogStatus);

// --- Core Records (exchanged verbatim with the backend) ---

/// User
///
/// A registered account. `email` is the unique key; the record mirrors the
/// external identity provider's account 1:1.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub name: String,
    #[serde(rename = "photoURL")]
    pub photo_url: String,
    pub role: Role,
    // Legacy records may carry no status at all.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    pub blood_group: String,
    pub district: String,
    pub upazila: String,
}

impl User {
    /// Status as rendered: a missing status counts as active.
    pub fn effective_status(&self) -> UserStatus {
        self.status.unwrap_or_default()
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "Unknown User"
        } else {
            &self.name
        }
    }
}

/// DonationRequest
///
/// A patient's need for blood, posted by a requester and fulfilled by a responding donor.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DonationRequest {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub requester_name: String,
    pub requester_email: String,
    pub recipient_name: String,
    pub recipient_district: String,
    pub recipient_upazila: String,
    pub hospital_name: String,
    pub address_line: String,
    pub blood_group: String,
    pub donation_date: String,
    pub donation_time: String,
    pub donation_status: DonationStatus,
    pub request_message: String,
    // Filled in once a donor responds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donor_email: Option<String>,
}

/// Blog
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Blog {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub thumbnail: String,
    pub content: String,
    pub author: String,
    pub author_email: String,
    pub author_photo: String,
    pub status: BlogStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// FundingRecord
///
/// Append-only; written after the payment gateway confirms a payment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FundingRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_email: String,
    pub amount: f64,
    pub funding_date: DateTime<Utc>,
    #[serde(default)]
    pub payment_id: String,
    #[serde(default)]
    pub status: String,
}

/// Contact
///
/// Append-only inbound message from the public contact form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// --- Request Payloads ---

/// DonationRequestForm
///
/// The fields a requester types in. Requester identity and the initial status are
/// added by [`NewDonationRequest::new`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequestForm {
    pub recipient_name: String,
    pub recipient_district: String,
    pub recipient_upazila: String,
    pub hospital_name: String,
    #[serde(default)]
    pub address_line: String,
    pub blood_group: BloodGroup,
    pub donation_date: NaiveDate,
    pub donation_time: String,
    #[serde(default)]
    pub request_message: String,
}

/// NewDonationRequest
///
/// Input payload for `POST /donation-request`. Always created as `pending`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewDonationRequest {
    pub requester_name: String,
    pub requester_email: String,
    #[serde(flatten)]
    pub form: DonationRequestForm,
    pub donation_status: DonationStatus,
}

impl NewDonationRequest {
    pub fn new(
        requester_name: impl Into<String>,
        requester_email: impl Into<String>,
        form: DonationRequestForm,
    ) -> Self {
        Self {
            requester_name: requester_name.into(),
            requester_email: requester_email.into(),
            form,
            donation_status: DonationStatus::Pending,
        }
    }
}

/// DonationRequestUpdate
///
/// Partial update for `PATCH /donation-request/{id}`. Only provided fields are sent.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DonationRequestUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_upazila: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospital_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub donation_status: Option<DonationStatus>,
}

impl DonationRequestUpdate {
    pub fn status(status: DonationStatus) -> Self {
        Self {
            donation_status: Some(status),
            ..Self::default()
        }
    }
}

/// UserProfileUpdate
///
/// Partial update of the caller's own profile (`PATCH /update-user`) or, for admins,
/// of any user (`PATCH /user/{email}`).
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "photoURL", skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upazila: Option<String>,
}

/// NewBlog
///
/// Input payload for `POST /blogs`. New posts always start as drafts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBlog {
    pub title: String,
    pub thumbnail: String,
    pub content: String,
    pub author: String,
    pub author_email: String,
    pub author_photo: String,
    pub status: BlogStatus,
    pub created_at: DateTime<Utc>,
}

/// NewFunding
///
/// Input payload for `POST /fundings`, sent once the gateway reports success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewFunding {
    pub user_name: String,
    pub user_email: String,
    pub amount: f64,
    pub funding_date: DateTime<Utc>,
    pub payment_id: String,
    pub status: String,
}

/// NewContact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

// --- Response Schemas ---

/// RoleInfo
///
/// Output of `GET /get-user-role` for the bearer of the token.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RoleInfo {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

impl RoleInfo {
    pub fn effective_status(&self) -> UserStatus {
        self.status.unwrap_or_default()
    }
}

/// MutationAck
///
/// Write acknowledgement returned by the backend for inserts, updates and deletes.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct MutationAck {
    pub acknowledged: bool,
    pub inserted_id: Option<String>,
    pub matched_count: u64,
    pub modified_count: u64,
    pub deleted_count: u64,
}

impl MutationAck {
    /// True when the write touched at least one document.
    pub fn changed_anything(&self) -> bool {
        self.inserted_id.is_some() || self.modified_count > 0 || self.deleted_count > 0
    }
}

/// PaymentIntent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub client_secret: String,
}

/// FundingPage
///
/// One server-side page of `GET /fundings?page&limit`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FundingPage {
    pub fundings: Vec<FundingRecord>,
    pub total: u64,
}

/// FundingTotal
///
/// Output of `GET /fundings/total`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FundingTotal {
    #[serde(alias = "totalFundingAmount", alias = "totalAmount")]
    pub total: f64,
}

/// DashboardStats
///
/// Output of `GET /admin-dashboard-stats`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_request: u64,
    pub total_funding: u64,
    pub total_funding_amount: f64,
}

/// ShortageRow
///
/// Per-district shortage scores keyed by blood group display form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ShortageRow {
    pub district: String,
    pub scores: BTreeMap<String, f64>,
}

/// Hospital
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Hospital {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub district: String,
    pub verified: bool,
}
