//! Contributions API
//!
//! Contribution history and the backend-computed net/gross balance.

use futures_util::FutureExt;

use crate::api::{cache, client};
use crate::model::{Contribution, ContributionKind, NetBalance};

#[derive(Debug, serde::Deserialize)]
struct ContributionListData {
    contributions: Vec<Contribution>,
}

/// Fetch contributions visible to the current role
pub async fn fetch_contributions() -> Result<Vec<Contribution>, String> {
    let data: ContributionListData = client::get_json("/contributions").await?;
    Ok(data.contributions)
}

/// Record a contribution for a member (admin/branch-lead "add money")
pub async fn add_contribution(
    member_id: u32,
    amount: f64,
    kind: ContributionKind,
    note: Option<String>,
) -> Result<Contribution, String> {
    #[derive(serde::Serialize)]
    struct NewContribution {
        member_id: u32,
        amount: f64,
        kind: ContributionKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
    }

    client::post_json(
        "/contributions",
        &NewContribution {
            member_id,
            amount,
            kind,
            note,
        },
    )
    .await
}

/// Fetch the pooled net/gross balance. Shared by every dashboard's stat
/// cards, so it goes through the TTL cache.
pub async fn fetch_net_balance() -> Result<NetBalance, String> {
    let value = cache::fetch_cached("contributions/net", cache::DEFAULT_TTL_MS, || {
        client::get_json::<serde_json::Value>("/contributions/net").boxed_local()
    })
    .await?;

    serde_json::from_value(value).map_err(|e| format!("Parse error: {}", e))
}
