//! Authentication API
//!
//! Login, registration, and password-reset calls. The bearer token returned
//! by login is stored in local storage and attached to every later request.

use crate::api::client;
use crate::model::User;

/// Successful login payload
#[derive(Debug, serde::Deserialize)]
pub struct AuthData {
    pub token: String,
    pub user: User,
}

/// Log in with email and password
pub async fn login(email: &str, password: &str) -> Result<AuthData, String> {
    #[derive(serde::Serialize)]
    struct LoginRequest {
        email: String,
        password: String,
    }

    client::post_json(
        "/auth/login",
        &LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        },
    )
    .await
}

/// Register a new member. The account stays pending until an admin
/// approves it, so no token is returned.
pub async fn register(
    name: &str,
    email: &str,
    password: &str,
    branch: &str,
) -> Result<User, String> {
    #[derive(serde::Serialize)]
    struct RegisterRequest {
        name: String,
        email: String,
        password: String,
        branch: String,
    }

    #[derive(serde::Deserialize)]
    struct RegisterData {
        user: User,
    }

    let data: RegisterData = client::post_json(
        "/auth/register",
        &RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            branch: branch.to_string(),
        },
    )
    .await?;

    Ok(data.user)
}

/// Request a password-reset email
pub async fn forgot_password(email: &str) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct ForgotRequest {
        email: String,
    }

    client::post_json::<serde_json::Value, _>(
        "/auth/forgot-password",
        &ForgotRequest {
            email: email.to_string(),
        },
    )
    .await
    .map(|_| ())
}

/// Set a new password using the token from the reset email
pub async fn reset_password(token: &str, password: &str) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct ResetRequest {
        token: String,
        password: String,
    }

    client::post_json::<serde_json::Value, _>(
        "/auth/reset-password",
        &ResetRequest {
            token: token.to_string(),
            password: password.to_string(),
        },
    )
    .await
    .map(|_| ())
}

/// Redirect the browser to the backend's Google OAuth entry point
pub fn start_google_login() {
    let url = format!("{}/auth/google", client::get_api_base());
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(&url);
    }
}
