use serde_json::json;

use crate::{
    client::ApiClient,
    error::ApiResult,
    models::{DonationRequest, DonationRequestUpdate, DonationStatus, MutationAck, NewDonationRequest},
};

/// [Secure] `POST /donation-request`.
pub async fn create_donation_request(
    client: &ApiClient,
    request: &NewDonationRequest,
) -> ApiResult<MutationAck> {
    client.post(&["donation-request"], request).await
}

/// get_all_donation_requests
///
/// `GET /public-donation-requests`. When `exclude_email` is given the caller's own
/// requests are left out.
pub async fn get_all_donation_requests(
    client: &ApiClient,
    exclude_email: Option<&str>,
) -> ApiResult<Vec<DonationRequest>> {
    match exclude_email {
        Some(email) => {
            client
                .get_with_query(&["public-donation-requests"], &[("email", email)])
                .await
        }
        None => client.get(&["public-donation-requests"]).await,
    }
}

/// `GET /donation-request/public?status=pending`. Feeds the urgent board.
pub async fn get_pending_public_requests(client: &ApiClient) -> ApiResult<Vec<DonationRequest>> {
    client
        .get_with_query(
            &["donation-request", "public"],
            &[("status", DonationStatus::Pending.as_str())],
        )
        .await
}

/// get_my_donation_requests
///
/// `GET /my-donation-requests?email=&limit=`. `limit` caps the result for the
/// dashboard home's "recent requests" card.
pub async fn get_my_donation_requests(
    client: &ApiClient,
    email: &str,
    limit: Option<u32>,
) -> ApiResult<Vec<DonationRequest>> {
    let mut query = vec![("email", email.to_string())];
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    client
        .get_with_query(&["my-donation-requests"], &query)
        .await
}

/// [Admin] `GET /all-donation-requests`.
pub async fn get_all_donation_requests_admin(client: &ApiClient) -> ApiResult<Vec<DonationRequest>> {
    client.get(&["all-donation-requests"]).await
}

/// `GET /donation-request/{id}`.
pub async fn get_donation_request(client: &ApiClient, request_id: &str) -> ApiResult<DonationRequest> {
    client.get(&["donation-request", request_id]).await
}

/// respond_to_donation_request
///
/// [Secure] `PATCH /donation-request/{id}/respond`. The caller volunteers as donor;
/// the backend moves the request to `inprogress` and records the donor.
pub async fn respond_to_donation_request(
    client: &ApiClient,
    request_id: &str,
) -> ApiResult<MutationAck> {
    client
        .patch_empty(&["donation-request", request_id, "respond"])
        .await
}

/// `PATCH /donation-request/{id}`. Partial update, also used by requesters to mark
/// their request `done` or `canceled`.
pub async fn update_donation_request(
    client: &ApiClient,
    request_id: &str,
    update: &DonationRequestUpdate,
) -> ApiResult<MutationAck> {
    client.patch(&["donation-request", request_id], update).await
}

/// [Admin] `PATCH /donation-request-status/{id}`.
pub async fn update_donation_status(
    client: &ApiClient,
    request_id: &str,
    status: DonationStatus,
) -> ApiResult<MutationAck> {
    client
        .patch(&["donation-request-status", request_id], &json!({ "status": status }))
        .await
}

/// `DELETE /donation-request/{id}`.
pub async fn delete_donation_request(client: &ApiClient, request_id: &str) -> ApiResult<MutationAck> {
    client.delete(&["donation-request", request_id]).await
}
