//! Loan Arithmetic
//!
//! Straight-line interest and eligibility figures shown on the dashboards.
//! The backend makes the actual decisions; these mirror its formulas so the
//! UI can project totals before a request round-trips.

use super::BranchRules;

/// Flat monthly interest rate applied to every loan
pub const MONTHLY_INTEREST_RATE: f64 = 0.0125;

/// Interest for a principal over a duration in months
pub fn interest(principal: f64, months: u32) -> f64 {
    principal * MONTHLY_INTEREST_RATE * months as f64
}

/// Principal plus interest
pub fn repayment_total(principal: f64, months: u32) -> f64 {
    principal + interest(principal, months)
}

/// Even monthly installment over the loan duration
pub fn monthly_installment(principal: f64, months: u32) -> f64 {
    if months == 0 {
        return 0.0;
    }
    repayment_total(principal, months) / months as f64
}

/// Maximum amount a member may request: a multiple of their savings,
/// capped by the group rules.
pub fn max_loanable(savings: f64, rules: &BranchRules) -> f64 {
    (savings * rules.loan_multiplier).min(rules.loan_cap)
}

/// Fraction of the repayment total already paid, clamped to 0..=1
pub fn repayment_progress(repayment_total: f64, repaid: f64) -> f64 {
    if repayment_total <= 0.0 {
        return 0.0;
    }
    (repaid / repayment_total).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_example() {
        // P=1000, n=6 months at 1.25%/month
        assert!((interest(1000.0, 6) - 75.0).abs() < 1e-9);
        assert!((repayment_total(1000.0, 6) - 1075.0).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_installment() {
        let installment = monthly_installment(1000.0, 6);
        assert!((installment - 1075.0 / 6.0).abs() < 1e-9);
        assert_eq!(monthly_installment(1000.0, 0), 0.0);
    }

    #[test]
    fn test_max_loanable_multiplier_side() {
        let rules = BranchRules::default();
        // 3x savings well under the cap
        assert!((max_loanable(2000.0, &rules) - 6000.0).abs() < 1e-9);
    }

    #[test]
    fn test_max_loanable_cap_side() {
        let rules = BranchRules {
            loan_multiplier: 3.0,
            loan_cap: 10_000.0,
            ..BranchRules::default()
        };
        assert!((max_loanable(20_000.0, &rules) - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_repayment_progress_clamps() {
        assert!((repayment_progress(1075.0, 537.5) - 0.5).abs() < 1e-9);
        assert_eq!(repayment_progress(1075.0, 2000.0), 1.0);
        assert_eq!(repayment_progress(0.0, 100.0), 0.0);
    }
}
