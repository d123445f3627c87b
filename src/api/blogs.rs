use serde_json::json;

use crate::{
    client::ApiClient,
    error::ApiResult,
    models::{Blog, BlogStatus, MutationAck, NewBlog},
};

/// `POST /blogs`.
pub async fn create_blog(client: &ApiClient, blog: &NewBlog) -> ApiResult<MutationAck> {
    client.post(&["blogs"], blog).await
}

/// `GET /blogs`. Drafts included.
pub async fn get_all_blogs(client: &ApiClient) -> ApiResult<Vec<Blog>> {
    client.get(&["blogs"]).await
}

/// `GET /blogs?status=published`.
pub async fn get_published_blogs(client: &ApiClient) -> ApiResult<Vec<Blog>> {
    client
        .get_with_query(&["blogs"], &[("status", BlogStatus::Published.as_str())])
        .await
}

/// [Secure, admin] `PATCH /blogs/{id}/publish`. Sets the blog to `status`.
pub async fn publish_blog(
    client: &ApiClient,
    blog_id: &str,
    status: BlogStatus,
) -> ApiResult<MutationAck> {
    client
        .patch(&["blogs", blog_id, "publish"], &json!({ "status": status }))
        .await
}

/// [Secure, admin] `DELETE /blogs/{id}`.
pub async fn delete_blog(client: &ApiClient, blog_id: &str) -> ApiResult<MutationAck> {
    client.delete(&["blogs", blog_id]).await
}
