//! Users API
//!
//! Member accounts, registration approval, and the per-member shares
//! read-model.

use futures_util::FutureExt;

use crate::api::{cache, client};
use crate::model::{MemberShare, Role, User};

#[derive(Debug, serde::Deserialize)]
struct UserListData {
    users: Vec<User>,
}

/// Fetch all users visible to the current role
pub async fn fetch_users() -> Result<Vec<User>, String> {
    let data: UserListData = client::get_json("/users").await?;
    Ok(data.users)
}

/// Create a member account from the admin form
pub async fn create_user(
    name: &str,
    email: &str,
    password: &str,
    role: Role,
    branch: &str,
) -> Result<User, String> {
    #[derive(serde::Serialize)]
    struct CreateUserRequest {
        name: String,
        email: String,
        password: String,
        role: Role,
        branch: String,
    }

    client::post_json(
        "/users",
        &CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
            branch: branch.to_string(),
        },
    )
    .await
}

/// Approve or reject a pending registration
pub async fn approve_user(id: u32, approved: bool) -> Result<User, String> {
    #[derive(serde::Serialize)]
    struct ApproveRequest {
        approved: bool,
    }

    client::post_json(&format!("/users/{}/approve", id), &ApproveRequest { approved }).await
}

/// Delete a member. The row is only dropped locally once the backend
/// confirms.
pub async fn delete_user(id: u32) -> Result<(), String> {
    client::delete_json::<serde_json::Value>(&format!("/users/{}", id))
        .await
        .map(|_| ())
}

/// Fetch the per-member shares read-model. This endpoint is asked for by
/// several dashboard widgets at once, so it goes through the TTL cache.
pub async fn fetch_member_shares() -> Result<Vec<MemberShare>, String> {
    #[derive(serde::Deserialize)]
    struct SharesData {
        shares: Vec<MemberShare>,
    }

    let value = cache::fetch_cached("users/shares", cache::DEFAULT_TTL_MS, || {
        client::get_json::<serde_json::Value>("/users/shares").boxed_local()
    })
    .await?;

    let data: SharesData =
        serde_json::from_value(value).map_err(|e| format!("Parse error: {}", e))?;
    Ok(data.shares)
}
