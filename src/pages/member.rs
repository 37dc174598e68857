//! Member Dashboard
//!
//! A member's own view: savings, share projection, loan request/repayment,
//! contribution history, and penalties.

use futures_util::FutureExt;
use leptos::*;

use crate::api;
use crate::components::{
    CardSkeleton, ListSkeleton, LoanRequestForm, Modal, Paginator, StatCard,
};
use crate::model::{
    format_amount, format_date, loan_math, pagination, period, validate, Contribution,
    ContributionKind, Loan, LoanStatus, PenaltyStatus, Role,
};
use crate::state::{polling, Action, GlobalState};

const POLL_INTERVAL_MS: u32 = 30_000;
const PAGE_SIZE: usize = 10;

/// Member dashboard page component
#[component]
pub fn MemberDashboard() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    crate::app::use_role_gate(&[Role::Member]);

    let (loaded, set_loaded) = create_signal(false);
    let (savings_delta, set_savings_delta) = create_signal(None::<f64>);

    let state_for_poll = state.clone();
    let poller = polling::start(POLL_INTERVAL_MS, move |alive| {
        let state = state_for_poll.clone();
        async move {
            let result: Result<(), String> = async {
                let contributions = api::contributions::fetch_contributions().await?;
                let loans = api::loans::fetch_loans().await?;
                let penalties = api::penalties::fetch_penalties().await?;
                let shares = api::users::fetch_member_shares().await?;

                if !alive.get() {
                    return Ok(());
                }

                // Compare new savings against the previous snapshot
                if let Some(session) = state.session.get_untracked() {
                    let sum = |list: &[Contribution]| {
                        list.iter()
                            .filter(|c| {
                                c.member_id == session.user.id
                                    && c.kind != ContributionKind::Penalty
                            })
                            .map(|c| c.amount)
                            .sum::<f64>()
                    };
                    let before = sum(&state.contributions.get_untracked());
                    let after = sum(&contributions);
                    set_savings_delta.set((before > 0.0).then(|| after - before));
                }
                state.dispatch(Action::ContributionsLoaded(contributions));

                state.dispatch(Action::LoansLoaded(loans));
                state.dispatch(Action::PenaltiesLoaded(penalties));
                state.dispatch(Action::SharesLoaded(shares));
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

    let state_for_id = state.clone();
    let member_id = create_memo(move |_| {
        state_for_id.current_user().map(|u| u.id).unwrap_or(0)
    });

    let state_for_savings = state.clone();
    let savings = create_memo(move |_| state_for_savings.savings_for(member_id.get()));

    // Own row of the shares read-model
    let state_for_share = state.clone();
    let my_share = create_memo(move |_| {
        state_for_share
            .shares
            .get()
            .into_iter()
            .find(|s| s.member_id == member_id.get())
    });

    let state_for_loan = state.clone();
    let active_loan = create_memo(move |_| state_for_loan.active_loan_for(member_id.get()));

    view! {
        <div class="space-y-8">
            // Page header
            <div>
                <h1 class="text-3xl font-bold">"My Savings"</h1>
                <p class="text-gray-400 mt-1">"Your contributions, loans, and share of the pool"</p>
            </div>

            // Stat cards
            {move || {
                if loaded.get() {
                    view! {
                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                            <StatCard
                                label="My savings"
                                value=Signal::derive(move || format_amount(savings.get()))
                                delta=savings_delta
                                icon="💰"
                            />
                            <StatCard
                                label="Share of pool"
                                value=Signal::derive(move || {
                                    my_share.get()
                                        .map(|s| format!("{:.2}%", s.share_percent))
                                        .unwrap_or_else(|| "—".to_string())
                                })
                                icon="📊"
                            />
                            <StatCard
                                label="Interest projected"
                                value=Signal::derive(move || {
                                    my_share.get()
                                        .map(|s| format_amount(s.interest_projected))
                                        .unwrap_or_else(|| "—".to_string())
                                })
                                icon="📈"
                            />
                            <StatCard
                                label="Loan outstanding"
                                value=Signal::derive(move || {
                                    active_loan.get()
                                        .map(|l| format_amount(l.outstanding()))
                                        .unwrap_or_else(|| "—".to_string())
                                })
                                icon="🏦"
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

            // Loan section and penalties side by side
            <div class="grid md:grid-cols-2 gap-8">
                <LoanSection active_loan=active_loan.into() member_id=member_id.into() />
                <MyPenalties member_id=member_id.into() />
            </div>

            <ContributionHistory member_id=member_id.into() loaded=loaded.into() />
        </div>
    }
}

/// Active loan progress with repayment, or the request form when the
/// member has no active loan.
#[component]
fn LoanSection(
    active_loan: Signal<Option<Loan>>,
    member_id: Signal<u32>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let (show_repay, set_show_repay) = create_signal(false);

    // A pending or approved request blocks a new one
    let state_for_open = state.clone();
    let open_request = create_memo(move |_| {
        state_for_open
            .loans
            .get()
            .into_iter()
            .find(|l| {
                l.member_id == member_id.get()
                    && matches!(l.status, LoanStatus::Pending | LoanStatus::Approved)
            })
    });

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Loan"</h2>

            {move || {
                if let Some(loan) = active_loan.get() {
                    let total = loan.repayment();
                    let progress = loan_math::repayment_progress(total, loan.repaid);
                    let percent = (progress * 100.0) as i32;

                    view! {
                        <div class="space-y-4">
                            <div class="flex justify-between text-sm">
                                <span class="text-gray-400">"Borrowed"</span>
                                <span>{format_amount(loan.amount)}</span>
                            </div>
                            <div class="flex justify-between text-sm">
                                <span class="text-gray-400">"Total repayment"</span>
                                <span>{format_amount(total)}</span>
                            </div>
                            <div class="flex justify-between text-sm">
                                <span class="text-gray-400">"Repaid so far"</span>
                                <span>{format_amount(loan.repaid)}</span>
                            </div>
                            {loan.approved_at.map(|approved| view! {
                                <div class="flex justify-between text-sm">
                                    <span class="text-gray-400">"Approved"</span>
                                    <span>{format_date(approved)}</span>
                                </div>
                            })}
                            {loan.due_at.map(|due| view! {
                                <div class="flex justify-between text-sm">
                                    <span class="text-gray-400">"Due"</span>
                                    <span>{format_date(due)}</span>
                                </div>
                            })}

                            // Repayment progress bar
                            <div class="w-full bg-gray-700 rounded-full h-3">
                                <div
                                    class="bg-primary-500 h-3 rounded-full transition-all"
                                    style=format!("width: {}%", percent)
                                />
                            </div>
                            <p class="text-gray-400 text-sm">{format!("{}% repaid", percent)}</p>

                            <button
                                on:click=move |_| set_show_repay.set(true)
                                class="w-full bg-primary-600 hover:bg-primary-700 rounded-lg py-3
                                       font-semibold transition-colors"
                            >
                                "Make a Repayment"
                            </button>
                        </div>
                    }.into_view()
                } else if let Some(request) = open_request.get() {
                    view! {
                        <div class="text-center py-6 space-y-2">
                            <div class="text-4xl">"⏳"</div>
                            <p class="text-gray-300">
                                {format!(
                                    "Your request for {} is {}",
                                    format_amount(request.amount),
                                    request.status.label().to_lowercase()
                                )}
                            </p>
                            <p class="text-gray-500 text-sm">
                                "You can request a new loan once this one is settled"
                            </p>
                        </div>
                    }.into_view()
                } else {
                    view! { <LoanRequestForm /> }.into_view()
                }
            }}

            // Repayment modal
            {move || {
                match (show_repay.get(), active_loan.get()) {
                    (true, Some(loan)) => view! {
                        <Modal title="Make a Repayment" on_close=move || set_show_repay.set(false)>
                            <RepaymentForm loan=loan on_close=move || set_show_repay.set(false) />
                        </Modal>
                    }.into_view(),
                    _ => view! {}.into_view(),
                }
            }}
        </section>
    }
}

/// Repayment entry form shown inside a modal
#[component]
fn RepaymentForm(
    loan: Loan,
    on_close: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let outstanding = loan.outstanding();
    let suggested = loan_math::monthly_installment(loan.amount, loan.duration_months);
    let (amount, set_amount) = create_signal(format!("{:.2}", suggested.min(outstanding)));
    let (field_error, set_field_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let loan_id = loan.id;
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
        if value > outstanding {
            set_field_error.set(Some(format!(
                "Only {} is outstanding",
                format_amount(outstanding)
            )));
            return;
        }

        set_field_error.set(None);
        set_submitting.set(true);

        let state_clone = state.clone();
        let on_close = on_close.clone();
        spawn_local(async move {
            match api::loans::repay_loan(loan_id, value).await {
                Ok(loan) => {
                    let settled = loan.status == LoanStatus::Repaid;
                    state_clone.dispatch(Action::LoanUpserted(loan));
                    state_clone.show_success(if settled {
                        "Loan fully repaid 🎉"
                    } else {
                        "Repayment recorded"
                    });
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
            <p class="text-sm text-gray-400">
                "Outstanding: "
                <span class="text-white font-medium">{format_amount(outstanding)}</span>
            </p>

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
                {move || if submitting.get() { "Recording..." } else { "Repay" }}
            </button>
        </form>
    }
}

/// Member's own penalties with a pay action
#[component]
fn MyPenalties(member_id: Signal<u32>) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_rows = state.clone();
    let penalties = create_memo(move |_| {
        state_for_rows
            .penalties
            .get()
            .into_iter()
            .filter(|p| p.member_id == member_id.get())
            .collect::<Vec<_>>()
    });

    let state_for_pay = state.clone();
    let pay = move |id: u32| {
        let state = state_for_pay.clone();
        spawn_local(async move {
            match api::penalties::pay_penalty(id).await {
                Ok(penalty) => {
                    state.dispatch(Action::PenaltyUpserted(penalty));
                    state.show_success("Penalty paid");
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
        });
    };

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Penalties"</h2>

            <div class="space-y-2">
                {move || {
                    let rows = penalties.get();
                    if rows.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">"No penalties, keep it up"</p>
                        }.into_view()
                    } else {
                        rows.into_iter().map(|penalty| {
                            let pay = pay.clone();
                            let id = penalty.id;
                            let pending = penalty.status == PenaltyStatus::Pending;

                            view! {
                                <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                    <div>
                                        <span>{format_amount(penalty.amount)}</span>
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
                                                "Pay"
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

/// Paginated contribution history for the member
#[component]
fn ContributionHistory(
    member_id: Signal<u32>,
    loaded: Signal<bool>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let page = create_rw_signal(1usize);

    let state_for_rows = state.clone();
    let history = create_memo(move |_| {
        let mut rows: Vec<Contribution> = state_for_rows
            .contributions
            .get()
            .into_iter()
            .filter(|c| c.member_id == member_id.get())
            .collect();
        // Newest first
        rows.sort_by(|a, b| b.date.cmp(&a.date));
        rows
    });

    let paged = create_memo(move |_| pagination::paginate(&history.get(), page.get(), PAGE_SIZE));

    let state_for_rules = state.clone();

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Contribution History"</h2>

            {move || {
                if !loaded.get() {
                    return view! { <ListSkeleton count=5 /> }.into_view();
                }

                let rows = paged.get();
                if rows.is_empty() {
                    return view! {
                        <p class="text-gray-400 text-sm">"No contributions yet"</p>
                    }.into_view();
                }

                let rules = state_for_rules.rules.get();
                rows.into_iter().map(|contribution| {
                    let fine = period::late_penalty_for(&contribution, &rules);

                    view! {
                        <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                            <div>
                                <span class="font-medium">{format_amount(contribution.amount)}</span>
                                <span class="text-gray-400 text-sm ml-2">
                                    {contribution.kind.label()}
                                </span>
                                {contribution.note.clone().map(|note| view! {
                                    <span class="text-gray-500 text-sm ml-2">{note}</span>
                                })}
                                {fine.map(|amount| view! {
                                    <span class="text-yellow-400 text-sm ml-2">
                                        {format!("Late · {} penalty", format_amount(amount))}
                                    </span>
                                })}
                            </div>
                            <span class="text-gray-400 text-sm">{format_date(contribution.date)}</span>
                        </div>
                    }
                }).collect_view().into_view()
            }}

            <Paginator page=page total=Signal::derive(move || history.get().len()) page_size=PAGE_SIZE />
        </section>
    }
}
