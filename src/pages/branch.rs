//! Branch Lead Dashboard
//!
//! The admin widgets scoped to the lead's own branch: members, loan
//! requests, and contribution entry. Branch leads cannot approve
//! registrations or disburse loans.

use futures_util::FutureExt;
use leptos::*;

use crate::api;
use crate::components::{
    CardSkeleton, ContributionForm, ListSkeleton, Modal, Paginator, StatCard,
};
use crate::model::{format_amount, format_date, pagination, LoanStatus, Role, User};
use crate::state::{polling, Action, GlobalState};

const POLL_INTERVAL_MS: u32 = 20_000;
const PAGE_SIZE: usize = 10;

/// Branch lead dashboard page component
#[component]
pub fn BranchLeadDashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    crate::app::use_role_gate(&[Role::BranchLead]);

    let (loaded, set_loaded) = create_signal(false);

    let state_for_poll = state.clone();
    let poller = polling::start(POLL_INTERVAL_MS, move |alive| {
        let state = state_for_poll.clone();
        async move {
            let result: Result<(), String> = async {
                let users = api::users::fetch_users().await?;
                let loans = api::loans::fetch_loans().await?;
                let contributions = api::contributions::fetch_contributions().await?;

                if !alive.get() {
                    return Ok(());
                }

                state.dispatch(Action::UsersLoaded(users));
                state.dispatch(Action::LoansLoaded(loans));
                state.dispatch(Action::ContributionsLoaded(contributions));
                state.dispatch(Action::Refreshed(chrono::Utc::now().timestamp_millis()));
                set_loaded.set(true);
                Ok(())
            }
            .await;

            if result.is_err() && alive.get() {
                state.dispatch(Action::ConnectionChanged(false));
            }
            result
        }
        .boxed_local()
    });
    on_cleanup(move || poller.stop());

    // Members of the lead's own branch
    let state_for_branch = state.clone();
    let branch_members = create_memo(move |_| {
        let branch = state_for_branch
            .current_user()
            .map(|u| u.branch)
            .unwrap_or_default();
        state_for_branch
            .users
            .get()
            .into_iter()
            .filter(|u| u.approved && u.role == Role::Member && u.branch == branch)
            .collect::<Vec<_>>()
    });

    // Loan requests from those members
    let state_for_loans = state.clone();
    let branch_loans = create_memo(move |_| {
        let member_ids: Vec<u32> = branch_members.get().iter().map(|u| u.id).collect();
        state_for_loans
            .loans
            .get()
            .into_iter()
            .filter(|l| member_ids.contains(&l.member_id))
            .collect::<Vec<_>>()
    });

    let branch_savings = create_memo(move |_| {
        branch_members
            .get()
            .iter()
            .map(|u| u.contribution_total)
            .sum::<f64>()
    });

    let open_requests = create_memo(move |_| {
        branch_loans
            .get()
            .iter()
            .filter(|l| l.status == LoanStatus::Pending)
            .count()
    });

    let state_for_title = state.clone();

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Branch Dashboard"</h1>
                <p class="text-gray-400 mt-1 capitalize">
                    {move || {
                        state_for_title
                            .current_user()
                            .map(|u| format!("Branch: {}", u.branch))
                            .unwrap_or_default()
                    }}
                </p>
            </div>

            // Stat cards
            {move || {
                if loaded.get() {
                    view! {
                        <div class="grid grid-cols-3 gap-4">
                            <StatCard
                                label="Branch members"
                                value=Signal::derive(move || branch_members.get().len().to_string())
                                icon="👥"
                            />
                            <StatCard
                                label="Branch savings"
                                value=Signal::derive(move || format_amount(branch_savings.get()))
                                icon="💶"
                            />
                            <StatCard
                                label="Open requests"
                                value=Signal::derive(move || open_requests.get().to_string())
                                icon="📋"
                            />
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-3 gap-4">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }.into_view()
                }
            }}

            <BranchLoanRequests loans=branch_loans.into() />
            <BranchMembers members=branch_members.into() loaded=loaded.into() />
        </div>
    }
}

/// Pending loan requests from the branch, with approve/reject actions
#[component]
fn BranchLoanRequests(loans: Signal<Vec<crate::model::Loan>>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let open = create_memo(move |_| {
        loans
            .get()
            .into_iter()
            .filter(|l| l.status == LoanStatus::Pending)
            .collect::<Vec<_>>()
    });

    let state_for_approve = state.clone();
    let approve = move |id: u32| {
        let state = state_for_approve.clone();
        spawn_local(async move {
            match api::loans::approve_loan(id).await {
                Ok(loan) => {
                    state.dispatch(Action::LoanUpserted(loan));
                    state.show_success("Loan approved");
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
        });
    };

    let state_for_reject = state.clone();
    let reject = move |id: u32| {
        let reason = web_sys::window()
            .and_then(|w| w.prompt_with_message("Reason for rejection").ok().flatten())
            .unwrap_or_default();
        if reason.trim().is_empty() {
            return;
        }

        let state = state_for_reject.clone();
        spawn_local(async move {
            match api::loans::reject_loan(id, &reason).await {
                Ok(loan) => {
                    state.dispatch(Action::LoanUpserted(loan));
                    state.show_success("Loan rejected");
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Loan Requests"</h2>

            <div class="space-y-2">
                {move || {
                    let rows = open.get();
                    if rows.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">"No open loan requests in your branch"</p>
                        }.into_view()
                    } else {
                        rows.into_iter().map(|loan| {
                            let approve = approve.clone();
                            let reject = reject.clone();
                            let id = loan.id;

                            view! {
                                <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                    <div>
                                        <span class="font-medium">{loan.member_name.clone()}</span>
                                        <span class="ml-2">{format_amount(loan.amount)}</span>
                                        <span class="text-gray-400 text-sm ml-2">
                                            {format!("{} months", loan.duration_months)}
                                        </span>
                                        <span class="text-gray-500 text-sm ml-2">
                                            {format_date(loan.requested_at)}
                                        </span>
                                    </div>
                                    <div class="flex space-x-2">
                                        <button
                                            on:click=move |_| approve(id)
                                            class="px-3 py-1 bg-green-600 hover:bg-green-700 rounded text-sm transition-colors"
                                        >
                                            "Approve"
                                        </button>
                                        <button
                                            on:click=move |_| reject(id)
                                            class="px-3 py-1 bg-red-600 hover:bg-red-700 rounded text-sm transition-colors"
                                        >
                                            "Reject"
                                        </button>
                                    </div>
                                </div>
                            }
                        }).collect_view().into_view()
                    }
                }}
            </div>
        </section>
    }
}

/// Paginated branch member list with contribution entry
#[component]
fn BranchMembers(
    members: Signal<Vec<User>>,
    loaded: Signal<bool>,
) -> impl IntoView {
    let page = create_rw_signal(1usize);
    let (show_contribution, set_show_contribution) = create_signal(false);

    let paged = create_memo(move |_| pagination::paginate(&members.get(), page.get(), PAGE_SIZE));

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"Members"</h2>
                <button
                    on:click=move |_| set_show_contribution.set(true)
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg text-sm font-medium transition-colors"
                >
                    "+ Add Money"
                </button>
            </div>

            {move || {
                if !loaded.get() {
                    return view! { <ListSkeleton count=5 /> }.into_view();
                }

                let rows = paged.get();
                if rows.is_empty() {
                    return view! {
                        <p class="text-gray-400 text-sm">"No members in this branch yet"</p>
                    }.into_view();
                }

                rows.into_iter().map(|user| view! {
                    <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                        <div>
                            <span class="font-medium">{user.name.clone()}</span>
                            <span class="text-gray-500 text-sm ml-2">{user.email.clone()}</span>
                        </div>
                        <div class="text-sm">
                            <span>{format_amount(user.contribution_total)}</span>
                            {(user.unpaid_penalties > 0.0).then(|| view! {
                                <span class="text-red-400 ml-3">
                                    {format!("{} due", format_amount(user.unpaid_penalties))}
                                </span>
                            })}
                        </div>
                    </div>
                }).collect_view().into_view()
            }}

            <Paginator page=page total=Signal::derive(move || members.get().len()) page_size=PAGE_SIZE />

            {move || {
                if show_contribution.get() {
                    view! {
                        <Modal title="Record Contribution" on_close=move || set_show_contribution.set(false)>
                            <ContributionForm
                                members=members
                                on_close=move || set_show_contribution.set(false)
                            />
                        </Modal>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}
        </section>
    }
}
