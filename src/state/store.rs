//! Global Store
//!
//! Reducer-style application state built on Leptos signals. Components read
//! the signals directly; every mutation goes through `dispatch`, which
//! merges backend responses last-write-wins by id.

use leptos::*;

use crate::model::{
    BranchRules, Contribution, ContributionKind, Loan, MemberShare, NetBalance, Penalty, User,
};
use crate::state::session::{self, Session};

/// Global application state provided to all components
#[derive(Clone)]
pub struct GlobalState {
    /// Authenticated session, if any
    pub session: RwSignal<Option<Session>>,
    /// Last-fetched user list
    pub users: RwSignal<Vec<User>>,
    /// Last-fetched loan book
    pub loans: RwSignal<Vec<Loan>>,
    /// Last-fetched contribution history
    pub contributions: RwSignal<Vec<Contribution>>,
    /// Last-fetched penalty ledger
    pub penalties: RwSignal<Vec<Penalty>>,
    /// Per-member shares read-model
    pub shares: RwSignal<Vec<MemberShare>>,
    /// Pooled net/gross balance
    pub net_balance: RwSignal<Option<NetBalance>>,
    /// Group lending rules
    pub rules: RwSignal<BranchRules>,
    /// Whether the last poll round-trip succeeded
    pub online: RwSignal<bool>,
    /// Timestamp of the last successful refresh
    pub last_refresh: RwSignal<Option<i64>>,
    /// Error message to display
    pub error: RwSignal<Option<String>>,
    /// Success message (for toasts)
    pub success: RwSignal<Option<String>>,
}

/// Store mutations. Fetched pages replace a collection wholesale; single
/// entities returned by workflow calls upsert into it.
pub enum Action {
    SessionLoaded(Session),
    LoggedOut,
    UsersLoaded(Vec<User>),
    UserUpserted(User),
    UserRemoved(u32),
    LoansLoaded(Vec<Loan>),
    LoanUpserted(Loan),
    ContributionsLoaded(Vec<Contribution>),
    ContributionAdded(Contribution),
    PenaltiesLoaded(Vec<Penalty>),
    PenaltyUpserted(Penalty),
    SharesLoaded(Vec<MemberShare>),
    NetBalanceLoaded(NetBalance),
    Refreshed(i64),
    ConnectionChanged(bool),
}

/// Replace-or-append by id; last write wins.
fn upsert<T>(list: &mut Vec<T>, item: T, id_of: impl Fn(&T) -> u32) {
    match list.iter_mut().find(|existing| id_of(existing) == id_of(&item)) {
        Some(existing) => *existing = item,
        None => list.push(item),
    }
}

impl GlobalState {
    pub fn dispatch(&self, action: Action) {
        match action {
            Action::SessionLoaded(new_session) => {
                session::store_session(&new_session);
                self.session.set(Some(new_session));
            }
            Action::LoggedOut => {
                session::clear_session();
                crate::api::cache::clear();
                self.session.set(None);
                self.users.set(Vec::new());
                self.loans.set(Vec::new());
                self.contributions.set(Vec::new());
                self.penalties.set(Vec::new());
                self.shares.set(Vec::new());
                self.net_balance.set(None);
                self.last_refresh.set(None);
            }
            Action::UsersLoaded(users) => self.users.set(users),
            Action::UserUpserted(user) => {
                self.users.update(|users| upsert(users, user, |u| u.id));
            }
            Action::UserRemoved(id) => {
                self.users.update(|users| users.retain(|u| u.id != id));
            }
            Action::LoansLoaded(loans) => self.loans.set(loans),
            Action::LoanUpserted(loan) => {
                self.loans.update(|loans| upsert(loans, loan, |l| l.id));
            }
            Action::ContributionsLoaded(contributions) => self.contributions.set(contributions),
            Action::ContributionAdded(contribution) => {
                self.contributions
                    .update(|list| upsert(list, contribution, |c| c.id));
            }
            Action::PenaltiesLoaded(penalties) => self.penalties.set(penalties),
            Action::PenaltyUpserted(penalty) => {
                self.penalties
                    .update(|list| upsert(list, penalty, |p| p.id));
            }
            Action::SharesLoaded(shares) => self.shares.set(shares),
            Action::NetBalanceLoaded(balance) => self.net_balance.set(Some(balance)),
            Action::Refreshed(timestamp) => {
                self.last_refresh.set(Some(timestamp));
                self.online.set(true);
            }
            Action::ConnectionChanged(online) => self.online.set(online),
        }
    }

    /// Current user, if logged in
    pub fn current_user(&self) -> Option<User> {
        self.session.get().map(|s| s.user)
    }

    /// Savings counted toward loan eligibility: everything except penalty
    /// entries.
    pub fn savings_for(&self, member_id: u32) -> f64 {
        let from_history: f64 = self
            .contributions
            .get()
            .iter()
            .filter(|c| c.member_id == member_id && c.kind != ContributionKind::Penalty)
            .map(|c| c.amount)
            .sum();

        if from_history > 0.0 {
            return from_history;
        }

        // Fall back to the backend's cumulative total before history loads
        self.users
            .get()
            .iter()
            .find(|u| u.id == member_id)
            .map(|u| u.contribution_total)
            .unwrap_or(0.0)
    }

    /// Active loan for a member, if any
    pub fn active_loan_for(&self, member_id: u32) -> Option<Loan> {
        self.loans
            .get()
            .iter()
            .find(|l| l.member_id == member_id && l.status == crate::model::LoanStatus::Active)
            .cloned()
    }

    /// Show a success message (auto-clears after timeout)
    pub fn show_success(&self, message: &str) {
        self.success.set(Some(message.to_string()));

        let success_signal = self.success;
        gloo_timers::callback::Timeout::new(3000, move || {
            success_signal.set(None);
        })
        .forget();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));

        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(5000, move || {
            error_signal.set(None);
        })
        .forget();
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() {
    let state = GlobalState {
        session: create_rw_signal(session::load_session()),
        users: create_rw_signal(Vec::new()),
        loans: create_rw_signal(Vec::new()),
        contributions: create_rw_signal(Vec::new()),
        penalties: create_rw_signal(Vec::new()),
        shares: create_rw_signal(Vec::new()),
        net_balance: create_rw_signal(None),
        rules: create_rw_signal(BranchRules::default()),
        online: create_rw_signal(true),
        last_refresh: create_rw_signal(None),
        error: create_rw_signal(None),
        success: create_rw_signal(None),
    };

    provide_context(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LoanStatus, Role};

    fn loan(id: u32, status: LoanStatus) -> Loan {
        Loan {
            id,
            member_id: 1,
            member_name: String::new(),
            amount: 500.0,
            duration_months: 6,
            status,
            purpose: None,
            requested_at: 0,
            approved_at: None,
            due_at: None,
            repaid: 0.0,
            repayment_total: None,
        }
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut loans = vec![loan(1, LoanStatus::Pending), loan(2, LoanStatus::Active)];
        upsert(&mut loans, loan(1, LoanStatus::Approved), |l| l.id);

        assert_eq!(loans.len(), 2);
        assert_eq!(loans[0].status, LoanStatus::Approved);
    }

    #[test]
    fn test_upsert_appends_unknown_id() {
        let mut loans = vec![loan(1, LoanStatus::Pending)];
        upsert(&mut loans, loan(9, LoanStatus::Pending), |l| l.id);

        assert_eq!(loans.len(), 2);
    }

    #[test]
    fn test_role_helpers() {
        // sanity check on the session helpers used for route gating
        let session = Session {
            user: User {
                id: 1,
                name: "Lead".to_string(),
                email: "lead@coop.example".to_string(),
                role: Role::BranchLead,
                branch: "north".to_string(),
                approved: true,
                contribution_total: 0.0,
                active_loan_id: None,
                unpaid_penalties: 0.0,
                joined_at: 0,
            },
            token: "t".to_string(),
        };
        assert!(session.is_branch_lead());
        assert!(!session.is_admin());
    }
}
