use serde_json::json;

use crate::{
    client::ApiClient,
    error::ApiResult,
    models::{FundingPage, FundingTotal, MutationAck, NewFunding, PaymentIntent},
};

/// create_payment_intent
///
/// `POST /create-payment-intent`. Returns the client secret the payment gateway
/// needs to confirm the card payment.
pub async fn create_payment_intent(client: &ApiClient, amount: f64) -> ApiResult<PaymentIntent> {
    client
        .post(&["create-payment-intent"], &json!({ "amount": amount }))
        .await
}

/// `POST /fundings`. Call only after the gateway reports the payment as succeeded.
pub async fn save_funding(client: &ApiClient, funding: &NewFunding) -> ApiResult<MutationAck> {
    client.post(&["fundings"], funding).await
}

/// get_all_fundings
///
/// `GET /fundings?page=&limit=`. The one collection paginated server-side; `page`
/// is 1-based.
pub async fn get_all_fundings(client: &ApiClient, page: usize, limit: usize) -> ApiResult<FundingPage> {
    client
        .get_with_query(&["fundings"], &[("page", page), ("limit", limit)])
        .await
}

/// `GET /fundings/total`.
pub async fn get_total_funding(client: &ApiClient) -> ApiResult<FundingTotal> {
    client.get(&["fundings", "total"]).await
}
