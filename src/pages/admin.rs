//! Admin Dashboard
//!
//! Cooperative-wide view: registration approvals, the loan workflow, the
//! member table, and the penalty ledger. Polls the backend on a fixed
//! interval and merges results into the global store.

use futures_util::FutureExt;
use leptos::*;

use crate::api;
use crate::components::{
    CardSkeleton, ContributionForm, ListSkeleton, Modal, Paginator, StatCard,
};
use crate::model::{
    format_amount, format_date, pagination, validate, LoanStatus, PenaltyStatus, Role, User,
};
use crate::state::{polling, Action, GlobalState};

const POLL_INTERVAL_MS: u32 = 15_000;
const PAGE_SIZE: usize = 10;

/// Admin dashboard page component
#[component]
pub fn AdminDashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    crate::app::use_role_gate(&[Role::Admin]);

    let (loaded, set_loaded) = create_signal(false);
    let (net_delta, set_net_delta) = create_signal(None::<f64>);

    // Poll the admin read models; last write wins into the store
    let state_for_poll = state.clone();
    let poller = polling::start(POLL_INTERVAL_MS, move |alive| {
        let state = state_for_poll.clone();
        async move {
            let result: Result<(), String> = async {
                let users = api::users::fetch_users().await?;
                let loans = api::loans::fetch_loans().await?;
                let contributions = api::contributions::fetch_contributions().await?;
                let penalties = api::penalties::fetch_penalties().await?;
                let net = api::contributions::fetch_net_balance().await?;

                // Unmounted while the requests were in flight
                if !alive.get() {
                    return Ok(());
                }

                let previous = state.net_balance.get_untracked().map(|b| b.net);
                set_net_delta.set(previous.map(|p| net.net - p));

                state.dispatch(Action::UsersLoaded(users));
                state.dispatch(Action::LoansLoaded(loans));
                state.dispatch(Action::ContributionsLoaded(contributions));
                state.dispatch(Action::PenaltiesLoaded(penalties));
                state.dispatch(Action::NetBalanceLoaded(net));
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

    // Stat card figures
    let state_for_members = state.clone();
    let member_count = create_memo(move |_| {
        state_for_members
            .users
            .get()
            .iter()
            .filter(|u| u.approved && u.role != Role::Admin)
            .count()
    });

    let state_for_net = state.clone();
    let pool_balance = create_memo(move |_| {
        state_for_net
            .net_balance
            .get()
            .map(|b| format_amount(b.net))
            .unwrap_or_else(|| "—".to_string())
    });

    let state_for_pending = state.clone();
    let pending_loans = create_memo(move |_| {
        state_for_pending
            .loans
            .get()
            .iter()
            .filter(|l| l.status == LoanStatus::Pending)
            .count()
    });

    let state_for_unpaid = state.clone();
    let unpaid_penalties = create_memo(move |_| {
        state_for_unpaid
            .penalties
            .get()
            .iter()
            .filter(|p| p.status == PenaltyStatus::Pending)
            .map(|p| p.amount)
            .sum::<f64>()
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"Admin Dashboard"</h1>
                <p class="text-gray-400 mt-1">"Cooperative overview and approvals"</p>
            </div>

            // Stat cards
            {move || {
                if loaded.get() {
                    view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            <StatCard
                                label="Members"
                                value=Signal::derive(move || member_count.get().to_string())
                                icon="👥"
                            />
                            <StatCard
                                label="Pool balance"
                                value=pool_balance
                                delta=net_delta
                                icon="💶"
                            />
                            <StatCard
                                label="Pending loans"
                                value=Signal::derive(move || pending_loans.get().to_string())
                                icon="📋"
                            />
                            <StatCard
                                label="Unpaid penalties"
                                value=Signal::derive(move || format_amount(unpaid_penalties.get()))
                                icon="⚠️"
                            />
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                            <CardSkeleton />
                        </div>
                    }.into_view()
                }
            }}

            <PendingRegistrations />
            <LoanQueue />
            <MembersTable loaded=loaded.into() />
            <PenaltyLedger />
        </div>
    }
}

/// Registration approval queue
#[component]
fn PendingRegistrations() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_pending = state.clone();
    let pending = create_memo(move |_| {
        state_for_pending
            .users
            .get()
            .into_iter()
            .filter(|u| !u.approved)
            .collect::<Vec<_>>()
    });

    let state_for_decide = state.clone();
    let decide = move |id: u32, approved: bool| {
        let state = state_for_decide.clone();
        spawn_local(async move {
            match api::users::approve_user(id, approved).await {
                Ok(user) => {
                    if approved {
                        state.dispatch(Action::UserUpserted(user));
                        state.show_success("Member approved");
                    } else {
                        state.dispatch(Action::UserRemoved(id));
                        state.show_success("Registration rejected");
                    }
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Pending Registrations"</h2>

            <div class="space-y-2">
                {move || {
                    let rows = pending.get();
                    if rows.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">"No pending registrations"</p>
                        }.into_view()
                    } else {
                        rows.into_iter().map(|user| {
                            let approve = decide.clone();
                            let reject = decide.clone();
                            let id = user.id;

                            view! {
                                <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                    <div>
                                        <span class="font-medium">{user.name.clone()}</span>
                                        <span class="text-gray-400 text-sm ml-2">{user.email.clone()}</span>
                                        <span class="text-gray-500 text-sm ml-2 capitalize">
                                            {format!("branch: {}", user.branch)}
                                        </span>
                                        <span class="text-gray-500 text-sm ml-2">
                                            {user.role.label()}
                                        </span>
                                    </div>
                                    <div class="flex space-x-2">
                                        <button
                                            on:click=move |_| approve(id, true)
                                            class="px-3 py-1 bg-green-600 hover:bg-green-700 rounded text-sm transition-colors"
                                        >
                                            "Approve"
                                        </button>
                                        <button
                                            on:click=move |_| reject(id, false)
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

/// Loan requests awaiting a decision, plus approved loans awaiting payout
#[component]
fn LoanQueue() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_queue = state.clone();
    let queue = create_memo(move |_| {
        state_for_queue
            .loans
            .get()
            .into_iter()
            .filter(|l| matches!(l.status, LoanStatus::Pending | LoanStatus::Approved))
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

    let state_for_disburse = state.clone();
    let disburse = move |id: u32, summary: String| {
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!("Disburse {}?", summary))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let state = state_for_disburse.clone();
        spawn_local(async move {
            match api::loans::disburse_loan(id).await {
                Ok(loan) => {
                    state.dispatch(Action::LoanUpserted(loan));
                    state.show_success("Loan disbursed");
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
                    let rows = queue.get();
                    if rows.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">"No open loan requests"</p>
                        }.into_view()
                    } else {
                        rows.into_iter().map(|loan| {
                            let approve = approve.clone();
                            let reject = reject.clone();
                            let disburse = disburse.clone();
                            let id = loan.id;
                            let summary = format!("{} to {}", format_amount(loan.amount), loan.member_name);
                            let repayment = loan.repayment();

                            view! {
                                <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                    <div>
                                        <span class="font-medium">{loan.member_name.clone()}</span>
                                        <span class="ml-2">{format_amount(loan.amount)}</span>
                                        <span class="text-gray-400 text-sm ml-2">
                                            {format!("{} months · repayment {}", loan.duration_months, format_amount(repayment))}
                                        </span>
                                        <span class="text-gray-500 text-sm ml-2">
                                            {format_date(loan.requested_at)}
                                        </span>
                                        {loan.purpose.clone().map(|purpose| view! {
                                            <span class="text-gray-400 text-sm ml-2 italic">{purpose}</span>
                                        })}
                                        <span class=format!(
                                            "{} text-xs px-2 py-0.5 rounded-full text-white ml-2",
                                            loan.status.badge_class()
                                        )>
                                            {loan.status.label()}
                                        </span>
                                    </div>

                                    <div class="flex space-x-2">
                                        {match loan.status {
                                            LoanStatus::Pending => view! {
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
                                            }.into_view(),
                                            LoanStatus::Approved => view! {
                                                <button
                                                    on:click=move |_| disburse(id, summary.clone())
                                                    class="px-3 py-1 bg-primary-600 hover:bg-primary-700 rounded text-sm transition-colors"
                                                >
                                                    "Disburse"
                                                </button>
                                            }.into_view(),
                                            _ => view! {}.into_view(),
                                        }}
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

/// Column the member table sorts on
#[derive(Clone, Copy, PartialEq)]
enum MemberSort {
    Name,
    Savings,
}

/// Searchable, sortable, paginated member table
#[component]
fn MembersTable(loaded: Signal<bool>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (search, set_search) = create_signal(String::new());
    let (sort, set_sort) = create_signal(MemberSort::Name);
    let page = create_rw_signal(1usize);
    let (show_contribution, set_show_contribution) = create_signal(false);
    let (show_create, set_show_create) = create_signal(false);
    let (penalty_target, set_penalty_target) = create_signal(None::<User>);

    // Filter and sort client-side over the fetched page of data
    let state_for_filter = state.clone();
    let filtered = create_memo(move |_| {
        let needle = search.get().to_lowercase();
        let mut members: Vec<User> = state_for_filter
            .users
            .get()
            .into_iter()
            .filter(|u| u.approved && u.role != Role::Admin)
            .filter(|u| {
                needle.is_empty()
                    || u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
                    || u.branch.to_lowercase().contains(&needle)
            })
            .collect();

        match sort.get() {
            MemberSort::Name => members.sort_by(|a, b| a.name.cmp(&b.name)),
            MemberSort::Savings => members.sort_by(|a, b| {
                b.contribution_total
                    .partial_cmp(&a.contribution_total)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
        }
        members
    });

    let paged = create_memo(move |_| pagination::paginate(&filtered.get(), page.get(), PAGE_SIZE));

    let state_for_members = state.clone();
    let selectable_members = Signal::derive(move || {
        state_for_members
            .users
            .get()
            .into_iter()
            .filter(|u| u.approved && u.role != Role::Admin)
            .collect::<Vec<_>>()
    });

    let state_for_delete = state.clone();
    let delete = move |user: User| {
        let confirmed = web_sys::window()
            .map(|w| {
                w.confirm_with_message(&format!("Delete member {}?", user.name))
                    .unwrap_or(false)
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }

        let state = state_for_delete.clone();
        spawn_local(async move {
            match api::users::delete_user(user.id).await {
                Ok(()) => {
                    // Only drop the row once the backend confirms
                    state.dispatch(Action::UserRemoved(user.id));
                    state.show_success("Member deleted");
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <div class="flex items-center justify-between mb-4">
                <h2 class="text-xl font-semibold">"Members"</h2>

                <div class="flex items-center space-x-2">
                    <input
                        type="text"
                        placeholder="Search members"
                        prop:value=move || search.get()
                        on:input=move |ev| {
                            set_search.set(event_target_value(&ev));
                            page.set(1);
                        }
                        class="bg-gray-700 rounded-lg px-3 py-2 text-sm
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                    <button
                        on:click=move |_| set_show_contribution.set(true)
                        class="px-4 py-2 bg-primary-600 hover:bg-primary-700 rounded-lg text-sm font-medium transition-colors"
                    >
                        "+ Add Money"
                    </button>
                    <button
                        on:click=move |_| set_show_create.set(true)
                        class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg text-sm font-medium transition-colors"
                    >
                        "+ New Member"
                    </button>
                </div>
            </div>

            {move || {
                if !loaded.get() {
                    return view! { <ListSkeleton count=5 /> }.into_view();
                }

                let rows = paged.get();
                if rows.is_empty() {
                    return view! {
                        <p class="text-gray-400 text-sm">"No members match"</p>
                    }.into_view();
                }

                view! {
                    <table class="w-full text-sm">
                        <thead>
                            <tr class="text-left text-gray-400 border-b border-gray-700">
                                <th
                                    class="py-2 cursor-pointer hover:text-white"
                                    on:click=move |_| set_sort.set(MemberSort::Name)
                                >
                                    "Name"
                                </th>
                                <th class="py-2">"Branch"</th>
                                <th
                                    class="py-2 cursor-pointer hover:text-white"
                                    on:click=move |_| set_sort.set(MemberSort::Savings)
                                >
                                    "Savings"
                                </th>
                                <th class="py-2">"Penalties"</th>
                                <th class="py-2 text-right">"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {rows.into_iter().map(|user| {
                                let delete = delete.clone();
                                let user_for_delete = user.clone();
                                let user_for_penalty = user.clone();

                                view! {
                                    <tr class="border-b border-gray-700 last:border-0">
                                        <td class="py-2">
                                            <span class="font-medium">{user.name.clone()}</span>
                                            <span class="text-gray-500 ml-2">{user.email.clone()}</span>
                                            {user.active_loan_id.map(|_| view! {
                                                <span class="ml-2" title="Has an active loan">"🏦"</span>
                                            })}
                                        </td>
                                        <td class="py-2 capitalize">{user.branch.clone()}</td>
                                        <td class="py-2">{format_amount(user.contribution_total)}</td>
                                        <td class="py-2">
                                            {if user.unpaid_penalties > 0.0 {
                                                view! {
                                                    <span class="text-red-400">
                                                        {format_amount(user.unpaid_penalties)}
                                                    </span>
                                                }.into_view()
                                            } else {
                                                view! { <span class="text-gray-500">"—"</span> }.into_view()
                                            }}
                                        </td>
                                        <td class="py-2 text-right space-x-2">
                                            <button
                                                on:click=move |_| set_penalty_target.set(Some(user_for_penalty.clone()))
                                                class="px-2 py-1 bg-gray-700 hover:bg-gray-600 rounded transition-colors"
                                            >
                                                "Penalty"
                                            </button>
                                            <button
                                                on:click=move |_| delete(user_for_delete.clone())
                                                class="px-2 py-1 bg-red-700 hover:bg-red-600 rounded transition-colors"
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }).collect_view()}
                        </tbody>
                    </table>
                }.into_view()
            }}

            <Paginator page=page total=Signal::derive(move || filtered.get().len()) page_size=PAGE_SIZE />

            // Add-contribution modal
            {move || {
                if show_contribution.get() {
                    view! {
                        <Modal title="Record Contribution" on_close=move || set_show_contribution.set(false)>
                            <ContributionForm
                                members=selectable_members
                                on_close=move || set_show_contribution.set(false)
                            />
                        </Modal>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            // New-member modal
            {move || {
                if show_create.get() {
                    view! {
                        <Modal title="New Member" on_close=move || set_show_create.set(false)>
                            <CreateMemberForm on_close=move || set_show_create.set(false) />
                        </Modal>
                    }.into_view()
                } else {
                    view! {}.into_view()
                }
            }}

            // Assign-penalty modal
            {move || {
                penalty_target.get().map(|user| view! {
                    <Modal
                        title=format!("Penalty for {}", user.name)
                        on_close=move || set_penalty_target.set(None)
                    >
                        <PenaltyForm
                            member=user.clone()
                            on_close=move || set_penalty_target.set(None)
                        />
                    </Modal>
                })
            }}
        </section>
    }
}

/// Admin form for creating an account directly, already approved
#[component]
fn CreateMemberForm(on_close: impl Fn() + 'static + Clone) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (branch, set_branch) = create_signal(String::new());
    let (role, set_role) = create_signal(Role::Member);
    let (password, set_password) = create_signal(String::new());
    let (field_error, set_field_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if name.get().trim().is_empty() || branch.get().trim().is_empty() {
            set_field_error.set(Some("Name and branch are required".to_string()));
            return;
        }
        if let Err(e) = validate::validate_email(&email.get()) {
            set_field_error.set(Some(e));
            return;
        }
        if let Err(e) = validate::validate_password(&password.get()) {
            set_field_error.set(Some(e));
            return;
        }

        set_field_error.set(None);
        set_submitting.set(true);

        let full_name = name.get();
        let address = email.get();
        let secret = password.get();
        let group = branch.get();
        let new_role = role.get();
        let state_clone = state.clone();
        let on_close = on_close.clone();
        spawn_local(async move {
            match api::users::create_user(&full_name, &address, &secret, new_role, &group).await {
                Ok(user) => {
                    state_clone.dispatch(Action::UserUpserted(user));
                    state_clone.show_success("Member created");
                    on_close();
                }
                Err(e) => {
                    state_clone.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Full name"</label>
                <input
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| set_name.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Email"</label>
                <input
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| set_email.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Branch"</label>
                <input
                    type="text"
                    placeholder="e.g., north"
                    prop:value=move || branch.get()
                    on:input=move |ev| set_branch.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Role"</label>
                <select
                    on:change=move |ev| {
                        set_role.set(match event_target_value(&ev).as_str() {
                            "branch_lead" => Role::BranchLead,
                            _ => Role::Member,
                        });
                    }
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                >
                    <option value="member">"Member"</option>
                    <option value="branch_lead">"Branch Lead"</option>
                </select>
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                <input
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            {move || {
                field_error.get().map(|e| view! {
                    <p class="text-red-400 text-sm">{e}</p>
                })
            }}

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Creating..." } else { "Create Member" }}
            </button>
        </form>
    }
}

/// Penalty assignment form shown inside a modal
#[component]
fn PenaltyForm(
    member: User,
    on_close: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let default_amount = state.rules.get_untracked().late_penalty;
    let (amount, set_amount) = create_signal(format!("{:.2}", default_amount));
    let (reason, set_reason) = create_signal("Late contribution".to_string());
    let (field_error, set_field_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let member_id = member.id;
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Ok(value) = amount.get().trim().parse::<f64>() else {
            set_field_error.set(Some("Enter a valid amount".to_string()));
            return;
        };
        if let Err(e) = validate::validate_amount(value) {
            set_field_error.set(Some(e));
            return;
        }

        set_field_error.set(None);
        set_submitting.set(true);

        let why = reason.get();
        let state_clone = state.clone();
        let on_close = on_close.clone();
        spawn_local(async move {
            match api::penalties::assign_penalty(member_id, value, &why).await {
                Ok(penalty) => {
                    state_clone.dispatch(Action::PenaltyUpserted(penalty));
                    state_clone.show_success("Penalty assigned");
                    on_close();
                }
                Err(e) => {
                    state_clone.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form on:submit=on_submit class="space-y-4">
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Amount"</label>
                <input
                    type="number"
                    min="0"
                    step="0.01"
                    prop:value=move || amount.get()
                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            <div>
                <label class="block text-sm text-gray-400 mb-2">"Reason"</label>
                <input
                    type="text"
                    prop:value=move || reason.get()
                    on:input=move |ev| set_reason.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            {move || {
                field_error.get().map(|e| view! {
                    <p class="text-red-400 text-sm">{e}</p>
                })
            }}

            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Assigning..." } else { "Assign Penalty" }}
            </button>
        </form>
    }
}

/// Penalty ledger with pay action
#[component]
fn PenaltyLedger() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_rows = state.clone();
    let penalties = create_memo(move |_| state_for_rows.penalties.get());

    let state_for_pay = state.clone();
    let pay = move |id: u32| {
        let state = state_for_pay.clone();
        spawn_local(async move {
            match api::penalties::pay_penalty(id).await {
                Ok(penalty) => {
                    state.dispatch(Action::PenaltyUpserted(penalty));
                    state.show_success("Penalty marked paid");
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Penalty Ledger"</h2>

            <div class="space-y-2">
                {move || {
                    let rows = penalties.get();
                    if rows.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">"No penalties on record"</p>
                        }.into_view()
                    } else {
                        rows.into_iter().map(|penalty| {
                            let pay = pay.clone();
                            let id = penalty.id;
                            let pending = penalty.status == PenaltyStatus::Pending;

                            view! {
                                <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                    <div>
                                        <span class="font-medium">{penalty.member_name.clone()}</span>
                                        <span class="ml-2">{format_amount(penalty.amount)}</span>
                                        <span class="text-gray-400 text-sm ml-2">
                                            {penalty.reason.clone().unwrap_or_default()}
                                        </span>
                                        <span class="text-gray-500 text-sm ml-2">
                                            {format_date(penalty.date)}
                                        </span>
                                    </div>

                                    {if pending {
                                        view! {
                                            <button
                                                on:click=move |_| pay(id)
                                                class="px-3 py-1 bg-primary-600 hover:bg-primary-700 rounded text-sm transition-colors"
                                            >
                                                "Mark Paid"
                                            </button>
                                        }.into_view()
                                    } else {
                                        view! {
                                            <span class="text-green-400 text-sm">"Paid"</span>
                                        }.into_view()
                                    }}
                                </div>
                            }
                        }).collect_view().into_view()
                    }
                }}
            </div>
        </section>
    }
}
