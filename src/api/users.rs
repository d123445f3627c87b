use serde_json::json;

use crate::{
    client::ApiClient,
    error::ApiResult,
    models::{MutationAck, Role, RoleInfo, User, UserProfileUpdate, UserStatus},
};

/// register_user
///
/// `POST /add-user`. Registers a new account, or records a login for an existing one.
pub async fn register_user(client: &ApiClient, user: &User) -> ApiResult<MutationAck> {
    client.post(&["add-user"], user).await
}

/// get_user_role
///
/// [Secure] `GET /get-user-role`. Role and status of the token's bearer.
pub async fn get_user_role(client: &ApiClient) -> ApiResult<RoleInfo> {
    client.get(&["get-user-role"]).await
}

/// `GET /get-user-by-email?email=`.
pub async fn get_user_by_email(client: &ApiClient, email: &str) -> ApiResult<User> {
    client
        .get_with_query(&["get-user-by-email"], &[("email", email)])
        .await
}

/// `GET /get-user/{id}`.
pub async fn get_user_by_id(client: &ApiClient, user_id: &str) -> ApiResult<User> {
    client.get(&["get-user", user_id]).await
}

/// get_all_users
///
/// [Secure, admin] `GET /get-users`. The full user directory; filtering and
/// pagination happen client-side.
pub async fn get_all_users(client: &ApiClient) -> ApiResult<Vec<User>> {
    client.get(&["get-users"]).await
}

/// [Secure] `PATCH /update-user`. Updates the caller's own profile.
pub async fn update_user_profile(
    client: &ApiClient,
    update: &UserProfileUpdate,
) -> ApiResult<MutationAck> {
    client.patch(&["update-user"], update).await
}

/// [Secure, admin] `PATCH /user/{email}`.
pub async fn update_user_by_email(
    client: &ApiClient,
    email: &str,
    update: &UserProfileUpdate,
) -> ApiResult<MutationAck> {
    client.patch(&["user", email], update).await
}

/// [Secure, admin] `PATCH /update-role`.
pub async fn update_user_role(client: &ApiClient, email: &str, role: Role) -> ApiResult<MutationAck> {
    client
        .patch(&["update-role"], &json!({ "email": email, "role": role }))
        .await
}

/// update_user_status
///
/// `PATCH /update-status`. Blocks or unblocks an account. The backend sends the
/// user an SMS notification on change.
pub async fn update_user_status(
    client: &ApiClient,
    email: &str,
    status: UserStatus,
) -> ApiResult<MutationAck> {
    client
        .patch(&["update-status"], &json!({ "email": email, "status": status }))
        .await
}

/// [Secure, admin] `DELETE /user/{email}`.
pub async fn delete_user(client: &ApiClient, email: &str) -> ApiResult<MutationAck> {
    client.delete(&["user", email]).await
}
