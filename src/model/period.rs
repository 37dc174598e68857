//! Reporting Periods
//!
//! Period filters for the reports page and the monthly contribution
//! deadline rule.

use chrono::Datelike;

use super::{BranchRules, Contribution, Role, User};

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Time window selected on the reports page
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportPeriod {
    Week,
    Month,
    All,
}

impl ReportPeriod {
    pub fn label(&self) -> &'static str {
        match self {
            ReportPeriod::Week => "Last 7 days",
            ReportPeriod::Month => "Last 30 days",
            ReportPeriod::All => "All time",
        }
    }

    /// Wire value used when requesting a backend report
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportPeriod::Week => "week",
            ReportPeriod::Month => "month",
            ReportPeriod::All => "all",
        }
    }

    /// Parse a select-box value; unknown values fall back to All.
    pub fn parse(value: &str) -> Self {
        match value {
            "week" => ReportPeriod::Week,
            "month" => ReportPeriod::Month,
            _ => ReportPeriod::All,
        }
    }

    /// Inclusive lower bound for record dates, or None for All
    pub fn cutoff_ms(&self, now_ms: i64) -> Option<i64> {
        match self {
            ReportPeriod::Week => Some(now_ms - 7 * DAY_MS),
            ReportPeriod::Month => Some(now_ms - 30 * DAY_MS),
            ReportPeriod::All => None,
        }
    }
}

/// Whether a record dated `date_ms` falls inside the period.
pub fn in_period(date_ms: i64, period: ReportPeriod, now_ms: i64) -> bool {
    match period.cutoff_ms(now_ms) {
        Some(cutoff) => date_ms >= cutoff,
        None => true,
    }
}

/// Filter users for a report. Dated periods filter on the join date;
/// "all" keeps everyone except admin accounts.
pub fn filter_users(users: &[User], period: ReportPeriod, now_ms: i64) -> Vec<User> {
    users
        .iter()
        .filter(|u| match period {
            ReportPeriod::All => u.role != Role::Admin,
            _ => in_period(u.joined_at, period, now_ms),
        })
        .cloned()
        .collect()
}

/// Day of month for an epoch-ms timestamp
fn day_of_month(date_ms: i64) -> u32 {
    chrono::DateTime::from_timestamp_millis(date_ms)
        .map(|dt| dt.day())
        .unwrap_or(1)
}

/// A contribution dated after the due day of its month is late.
pub fn is_late(date_ms: i64, rules: &BranchRules) -> bool {
    day_of_month(date_ms) > rules.contribution_due_day
}

/// Flat penalty owed for a late contribution, if any.
pub fn late_penalty_for(contribution: &Contribution, rules: &BranchRules) -> Option<f64> {
    if is_late(contribution.date, rules) {
        Some(rules.late_penalty)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContributionKind;
    use chrono::TimeZone;

    fn ms(year: i32, month: u32, day: u32) -> i64 {
        chrono::Utc
            .with_ymd_and_hms(year, month, day, 12, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn contribution(date: i64) -> Contribution {
        Contribution {
            id: 1,
            member_id: 2,
            member_name: String::new(),
            amount: 100.0,
            kind: ContributionKind::Regular,
            date,
            note: None,
        }
    }

    fn user(role: Role, joined_at: i64) -> User {
        User {
            id: 1,
            name: "Ana".to_string(),
            email: "ana@coop.example".to_string(),
            role,
            branch: "north".to_string(),
            approved: true,
            contribution_total: 0.0,
            active_loan_id: None,
            unpaid_penalties: 0.0,
            joined_at,
        }
    }

    #[test]
    fn test_late_after_the_tenth() {
        let rules = BranchRules::default();
        assert!(is_late(ms(2026, 3, 11), &rules));
        assert!(!is_late(ms(2026, 3, 10), &rules));
        assert!(!is_late(ms(2026, 3, 1), &rules));
    }

    #[test]
    fn test_late_penalty_amount() {
        let rules = BranchRules::default();
        assert_eq!(
            late_penalty_for(&contribution(ms(2026, 3, 15)), &rules),
            Some(25.0)
        );
        assert_eq!(late_penalty_for(&contribution(ms(2026, 3, 10)), &rules), None);
    }

    #[test]
    fn test_week_period_boundary() {
        let now = ms(2026, 3, 20);
        assert!(in_period(ms(2026, 3, 14), ReportPeriod::Week, now));
        assert!(!in_period(ms(2026, 3, 12), ReportPeriod::Week, now));
        assert!(in_period(ms(2020, 1, 1), ReportPeriod::All, now));
    }

    #[test]
    fn test_all_period_excludes_admins() {
        let now = ms(2026, 3, 20);
        let users = vec![
            user(Role::Admin, ms(2026, 3, 19)),
            user(Role::Member, ms(2020, 1, 1)),
            user(Role::BranchLead, ms(2020, 1, 1)),
        ];
        let filtered = filter_users(&users, ReportPeriod::All, now);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|u| u.role != Role::Admin));
    }

    #[test]
    fn test_week_period_filters_users_by_join_date() {
        let now = ms(2026, 3, 20);
        let users = vec![
            user(Role::Member, ms(2026, 3, 18)),
            user(Role::Member, ms(2026, 1, 1)),
        ];
        let filtered = filter_users(&users, ReportPeriod::Week, now);
        assert_eq!(filtered.len(), 1);
    }
}
