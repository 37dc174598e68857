//! Loans API
//!
//! Loan requests and their lifecycle transitions. Every transition is a
//! round-trip; the returned loan is dispatched into the store as-is.

use crate::api::client;
use crate::model::Loan;

#[derive(Debug, serde::Deserialize)]
struct LoanListData {
    loans: Vec<Loan>,
}

/// Fetch all loans visible to the current role
pub async fn fetch_loans() -> Result<Vec<Loan>, String> {
    let data: LoanListData = client::get_json("/loans").await?;
    Ok(data.loans)
}

/// Submit a loan request for the current member
pub async fn request_loan(
    amount: f64,
    duration_months: u32,
    purpose: &str,
) -> Result<Loan, String> {
    #[derive(serde::Serialize)]
    struct LoanRequest {
        amount: f64,
        duration_months: u32,
        purpose: String,
    }

    client::post_json(
        "/loans",
        &LoanRequest {
            amount,
            duration_months,
            purpose: purpose.to_string(),
        },
    )
    .await
}

pub async fn approve_loan(id: u32) -> Result<Loan, String> {
    client::post_empty(&format!("/loans/{}/approve", id)).await
}

pub async fn reject_loan(id: u32, reason: &str) -> Result<Loan, String> {
    #[derive(serde::Serialize)]
    struct RejectRequest {
        reason: String,
    }

    client::post_json(
        &format!("/loans/{}/reject", id),
        &RejectRequest {
            reason: reason.to_string(),
        },
    )
    .await
}

/// Pay out an approved loan, moving it to active
pub async fn disburse_loan(id: u32) -> Result<Loan, String> {
    client::post_empty(&format!("/loans/{}/disburse", id)).await
}

/// Record a repayment against an active loan
pub async fn repay_loan(id: u32, amount: f64) -> Result<Loan, String> {
    #[derive(serde::Serialize)]
    struct RepayRequest {
        amount: f64,
    }

    client::post_json(&format!("/loans/{}/repay", id), &RepayRequest { amount }).await
}
