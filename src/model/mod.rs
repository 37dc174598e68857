//! Domain Model
//!
//! Client-side mirrors of backend records. The backend owns every entity;
//! these types only hold the last-fetched snapshot, refreshed by polling.

pub mod loan_math;
pub mod pagination;
pub mod period;
pub mod validate;

pub use period::ReportPeriod;

/// Role of an authenticated user
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    BranchLead,
    Member,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::BranchLead => "Branch Lead",
            Role::Member => "Member",
        }
    }

    /// Dashboard route for this role
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin",
            Role::BranchLead => "/branch",
            Role::Member => "/member",
        }
    }
}

/// Cooperative member or staff account
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub branch: String,
    #[serde(default)]
    pub approved: bool,
    /// Cumulative contribution total reported by the backend
    #[serde(default)]
    pub contribution_total: f64,
    #[serde(default)]
    pub active_loan_id: Option<u32>,
    /// Sum of this member's unpaid penalties
    #[serde(default)]
    pub unpaid_penalties: f64,
    /// Registration timestamp (ms since epoch)
    #[serde(default)]
    pub joined_at: i64,
}

/// Loan lifecycle status as reported by the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    Pending,
    Approved,
    Rejected,
    Active,
    Repaid,
}

impl LoanStatus {
    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "Pending",
            LoanStatus::Approved => "Approved",
            LoanStatus::Rejected => "Rejected",
            LoanStatus::Active => "Active",
            LoanStatus::Repaid => "Repaid",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            LoanStatus::Pending => "bg-yellow-500",
            LoanStatus::Approved => "bg-blue-500",
            LoanStatus::Rejected => "bg-red-500",
            LoanStatus::Active => "bg-green-500",
            LoanStatus::Repaid => "bg-gray-500",
        }
    }
}

/// A loan as stored by the backend
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Loan {
    pub id: u32,
    pub member_id: u32,
    #[serde(default)]
    pub member_name: String,
    pub amount: f64,
    pub duration_months: u32,
    pub status: LoanStatus,
    #[serde(default)]
    pub purpose: Option<String>,
    /// Request timestamp (ms since epoch)
    #[serde(default)]
    pub requested_at: i64,
    #[serde(default)]
    pub approved_at: Option<i64>,
    #[serde(default)]
    pub due_at: Option<i64>,
    /// Total already repaid on an active loan
    #[serde(default)]
    pub repaid: f64,
    /// Backend-computed repayment total; omitted for pending requests
    #[serde(default)]
    pub repayment_total: Option<f64>,
}

impl Loan {
    /// Repayment total, falling back to the local projection when the
    /// backend has not computed one yet.
    pub fn repayment(&self) -> f64 {
        self.repayment_total
            .unwrap_or_else(|| loan_math::repayment_total(self.amount, self.duration_months))
    }

    pub fn outstanding(&self) -> f64 {
        (self.repayment() - self.repaid).max(0.0)
    }
}

/// Kind of contribution record
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    Regular,
    Adjustment,
    Penalty,
    Interest,
}

impl ContributionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ContributionKind::Regular => "Regular",
            ContributionKind::Adjustment => "Adjustment",
            ContributionKind::Penalty => "Penalty",
            ContributionKind::Interest => "Interest",
        }
    }
}

/// A single contribution record
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contribution {
    pub id: u32,
    pub member_id: u32,
    #[serde(default)]
    pub member_name: String,
    pub amount: f64,
    pub kind: ContributionKind,
    /// Contribution date (ms since epoch)
    pub date: i64,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyStatus {
    Pending,
    Paid,
}

/// A penalty charged to a member
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Penalty {
    pub id: u32,
    pub member_id: u32,
    #[serde(default)]
    pub member_name: String,
    pub amount: f64,
    pub status: PenaltyStatus,
    #[serde(default)]
    pub reason: Option<String>,
    /// Assignment date (ms since epoch)
    #[serde(default)]
    pub date: i64,
}

/// Per-member share read-model fetched wholesale from the reporting
/// endpoint. Never computed locally; cached for a short TTL only.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemberShare {
    pub member_id: u32,
    #[serde(default)]
    pub member_name: String,
    pub contribution_total: f64,
    pub share_percent: f64,
    #[serde(default)]
    pub interest_earned: f64,
    #[serde(default)]
    pub interest_projected: f64,
}

/// Backend-computed aggregate balances used for eligibility display
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NetBalance {
    pub net: f64,
    #[serde(default)]
    pub gross: f64,
}

/// Group lending rules for a branch
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BranchRules {
    /// Loanable multiple of a member's savings
    pub loan_multiplier: f64,
    /// Hard cap on a single loan
    pub loan_cap: f64,
    /// Day of month by which the regular contribution is due
    pub contribution_due_day: u32,
    /// Flat penalty for a late contribution
    pub late_penalty: f64,
}

impl Default for BranchRules {
    fn default() -> Self {
        Self {
            loan_multiplier: 3.0,
            loan_cap: 50_000.0,
            contribution_due_day: 10,
            late_penalty: 25.0,
        }
    }
}

/// A generated report as listed by the backend
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub id: u32,
    pub period: String,
    /// Generation timestamp (ms since epoch)
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub file_name: Option<String>,
}

/// Format an amount in the cooperative's currency
pub fn format_amount(value: f64) -> String {
    format!("€{:.2}", value)
}

/// Format an epoch-ms timestamp for table display
pub fn format_date(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%b %d, %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        let json = serde_json::to_string(&Role::BranchLead).unwrap();
        assert_eq!(json, "\"branch_lead\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_loan_repayment_fallback() {
        let loan = Loan {
            id: 1,
            member_id: 7,
            member_name: String::new(),
            amount: 1000.0,
            duration_months: 6,
            status: LoanStatus::Pending,
            purpose: None,
            requested_at: 0,
            approved_at: None,
            due_at: None,
            repaid: 0.0,
            repayment_total: None,
        };
        assert!((loan.repayment() - 1075.0).abs() < 1e-9);

        let loan = Loan {
            repayment_total: Some(1100.0),
            repaid: 300.0,
            ..loan
        };
        assert!((loan.repayment() - 1100.0).abs() < 1e-9);
        assert!((loan.outstanding() - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_user_defaults_tolerate_sparse_payloads() {
        let user: User = serde_json::from_str(
            r#"{"id":3,"name":"Ana","email":"ana@coop.example","role":"member","branch":"north"}"#,
        )
        .unwrap();
        assert!(!user.approved);
        assert_eq!(user.contribution_total, 0.0);
        assert_eq!(user.active_loan_id, None);
    }
}
