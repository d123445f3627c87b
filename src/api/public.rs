use crate::{
    blood::BloodGroup,
    client::ApiClient,
    error::ApiResult,
    models::{Contact, DashboardStats, Hospital, MutationAck, NewContact, ShortageRow, User},
};

/// search_donors
///
/// `GET /search-donors?bloodGroup=&district=&upazila=`. The blood group travels in
/// its wire code (`"ABp"` for AB+), see [`BloodGroup::wire_code`].
pub async fn search_donors(
    client: &ApiClient,
    blood_group: BloodGroup,
    district: &str,
    upazila: &str,
) -> ApiResult<Vec<User>> {
    let code = blood_group.wire_code();
    client
        .get_with_query(
            &["search-donors"],
            &[
                ("bloodGroup", code.as_str()),
                ("district", district),
                ("upazila", upazila),
            ],
        )
        .await
}

/// `GET /search-donors-dynamic?query=`. Free-text donor search.
pub async fn search_donors_dynamic(client: &ApiClient, query: &str) -> ApiResult<Vec<User>> {
    client
        .get_with_query(&["search-donors-dynamic"], &[("query", query)])
        .await
}

/// `POST /contacts`.
pub async fn submit_contact_form(client: &ApiClient, contact: &NewContact) -> ApiResult<MutationAck> {
    client.post(&["contacts"], contact).await
}

/// `GET /contacts`.
pub async fn get_all_contacts(client: &ApiClient) -> ApiResult<Vec<Contact>> {
    client.get(&["contacts"]).await
}

/// `GET /admin-dashboard-stats`.
pub async fn get_dashboard_stats(client: &ApiClient) -> ApiResult<DashboardStats> {
    client.get(&["admin-dashboard-stats"]).await
}

/// `GET /stats/shortage`.
pub async fn get_blood_shortage_stats(client: &ApiClient) -> ApiResult<Vec<ShortageRow>> {
    client.get(&["stats", "shortage"]).await
}

/// `GET /hospitals?verified=true`.
pub async fn get_verified_hospitals(client: &ApiClient) -> ApiResult<Vec<Hospital>> {
    client
        .get_with_query(&["hospitals"], &[("verified", "true")])
        .await
}
