//! Penalties API

use crate::api::client;
use crate::model::Penalty;

#[derive(Debug, serde::Deserialize)]
struct PenaltyListData {
    penalties: Vec<Penalty>,
}

/// Fetch penalties visible to the current role
pub async fn fetch_penalties() -> Result<Vec<Penalty>, String> {
    let data: PenaltyListData = client::get_json("/penalties").await?;
    Ok(data.penalties)
}

/// Charge a penalty to a member
pub async fn assign_penalty(
    member_id: u32,
    amount: f64,
    reason: &str,
) -> Result<Penalty, String> {
    #[derive(serde::Serialize)]
    struct NewPenalty {
        member_id: u32,
        amount: f64,
        reason: String,
    }

    client::post_json(
        "/penalties",
        &NewPenalty {
            member_id,
            amount,
            reason: reason.to_string(),
        },
    )
    .await
}

/// Mark a penalty as paid
pub async fn pay_penalty(id: u32) -> Result<Penalty, String> {
    client::post_empty(&format!("/penalties/{}/pay", id)).await
}
