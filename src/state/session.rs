//! Auth Session
//!
//! Current user and token cached in local storage so a reload lands back on
//! the right dashboard. This is a routing convenience, not a security
//! boundary: the backend checks the bearer token on every call.

use crate::api::client;
use crate::model::{Role, User};

const SESSION_KEY: &str = "sacco_session";

/// An authenticated session
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Session {
    pub user: User,
    pub token: String,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.user.role == Role::Admin
    }

    pub fn is_branch_lead(&self) -> bool {
        self.user.role == Role::BranchLead
    }
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Load the cached session, if any
pub fn load_session() -> Option<Session> {
    let raw = local_storage()?.get_item(SESSION_KEY).ok()??;
    match serde_json::from_str::<Session>(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            web_sys::console::error_1(&format!("Dropping stale session: {}", e).into());
            clear_session();
            None
        }
    }
}

/// Persist the session and its bearer token
pub fn store_session(session: &Session) {
    client::set_auth_token(&session.token);
    if let Some(storage) = local_storage() {
        if let Ok(raw) = serde_json::to_string(session) {
            let _ = storage.set_item(SESSION_KEY, &raw);
        }
    }
}

/// Drop the cached session and token
pub fn clear_session() {
    client::clear_auth_token();
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}
