use crate::{
    blood::BloodGroup,
    models::{Blog, BlogStatus, Contact, DonationRequest, DonationStatus, Role, User, UserStatus},
    view::{Filter, matches_term},
};

/// StatusSelection
///
/// The user-status dropdown. Legacy records without a status are only reachable
/// through `Missing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusSelection {
    #[default]
    All,
    Only(UserStatus),
    Missing,
}

/// UserFilter
///
/// Search by name or email, plus status and role dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserFilter {
    pub search: String,
    pub status: StatusSelection,
    pub role: Option<Role>,
}

impl Filter<User> for UserFilter {
    fn matches(&self, user: &User) -> bool {
        let status_ok = match self.status {
            StatusSelection::All => true,
            StatusSelection::Only(status) => user.status == Some(status),
            StatusSelection::Missing => user.status.is_none(),
        };
        status_ok
            && self.role.is_none_or(|role| user.role == role)
            && matches_term(&self.search, &[user.name.as_str(), user.email.as_str()])
    }
}

/// AdminRequestFilter
///
/// Search by requester, recipient or district, plus blood group and status dropdowns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdminRequestFilter {
    pub search: String,
    pub blood_group: Option<BloodGroup>,
    pub status: Option<DonationStatus>,
}

impl Filter<DonationRequest> for AdminRequestFilter {
    fn matches(&self, request: &DonationRequest) -> bool {
        self.blood_group
            .is_none_or(|group| request.blood_group == group.as_str())
            && self.status.is_none_or(|status| request.donation_status == status)
            && matches_term(
                &self.search,
                &[
                    request.requester_name.as_str(),
                    request.recipient_name.as_str(),
                    request.recipient_district.as_str(),
                ],
            )
    }
}

/// MyRequestFilter
///
/// The requester's own list: search by recipient, district or blood group, plus status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MyRequestFilter {
    pub search: String,
    pub status: Option<DonationStatus>,
}

impl Filter<DonationRequest> for MyRequestFilter {
    fn matches(&self, request: &DonationRequest) -> bool {
        self.status.is_none_or(|status| request.donation_status == status)
            && matches_term(
                &self.search,
                &[
                    request.recipient_name.as_str(),
                    request.recipient_district.as_str(),
                    request.blood_group.as_str(),
                ],
            )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlogFilter {
    pub search: String,
    pub status: Option<BlogStatus>,
}

impl Filter<Blog> for BlogFilter {
    fn matches(&self, blog: &Blog) -> bool {
        self.status.is_none_or(|status| blog.status == status)
            && matches_term(&self.search, &[blog.title.as_str(), blog.author.as_str()])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFilter {
    pub search: String,
}

impl Filter<Contact> for ContactFilter {
    fn matches(&self, contact: &Contact) -> bool {
        matches_term(
            &self.search,
            &[
                contact.name.as_str(),
                contact.email.as_str(),
                contact.subject.as_str(),
            ],
        )
    }
}
