//! Reports Page
//!
//! Period-filtered summary tables assembled from the fetched collections,
//! backend PDF generation, and report download/email actions.

use std::collections::HashMap;

use leptos::*;

use crate::api;
use crate::components::Loading;
use crate::model::{
    format_amount, format_date, period, ContributionKind, LoanStatus, PenaltyStatus, Report,
    ReportPeriod, Role,
};
use crate::state::{Action, GlobalState};

/// Reports page component
#[component]
pub fn Reports() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    crate::app::use_role_gate(&[Role::Admin, Role::BranchLead]);

    let (loaded, set_loaded) = create_signal(false);
    let (selected_period, set_selected_period) = create_signal(ReportPeriod::Month);
    let reports = create_rw_signal(Vec::<Report>::new());

    // One-shot fetch of everything the summaries need
    let state_for_effect = state.clone();
    create_effect(move |_| {
        let state = state_for_effect.clone();
        spawn_local(async move {
            match api::users::fetch_users().await {
                Ok(users) => state.dispatch(Action::UsersLoaded(users)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch users: {}", e).into());
                }
            }
            match api::loans::fetch_loans().await {
                Ok(loans) => state.dispatch(Action::LoansLoaded(loans)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch loans: {}", e).into());
                }
            }
            match api::contributions::fetch_contributions().await {
                Ok(contributions) => state.dispatch(Action::ContributionsLoaded(contributions)),
                Err(e) => {
                    web_sys::console::error_1(
                        &format!("Failed to fetch contributions: {}", e).into(),
                    );
                }
            }
            match api::penalties::fetch_penalties().await {
                Ok(penalties) => state.dispatch(Action::PenaltiesLoaded(penalties)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch penalties: {}", e).into());
                }
            }
            match api::users::fetch_member_shares().await {
                Ok(shares) => state.dispatch(Action::SharesLoaded(shares)),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load shares data: {}", e).into());
                }
            }
            match api::reports::fetch_reports().await {
                Ok(list) => reports.set(list),
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to fetch reports: {}", e).into());
                }
            }
            set_loaded.set(true);
        });
    });

    // Branch leads see only their own branch's records
    let state_for_scope = state.clone();
    let scoped_contributions = create_memo(move |_| {
        let contributions = state_for_scope.contributions.get();
        match state_for_scope.session.get() {
            Some(session) if session.is_branch_lead() => {
                let branch_ids: Vec<u32> = state_for_scope
                    .users
                    .get()
                    .iter()
                    .filter(|u| u.branch == session.user.branch)
                    .map(|u| u.id)
                    .collect();
                contributions
                    .into_iter()
                    .filter(|c| branch_ids.contains(&c.member_id))
                    .collect()
            }
            _ => contributions,
        }
    });

    // Contributions grouped per member inside the period
    let contribution_summary = create_memo(move |_| {
        let now = chrono::Utc::now().timestamp_millis();
        let current = selected_period.get();

        let mut by_member: HashMap<String, (f64, usize)> = HashMap::new();
        for contribution in scoped_contributions.get() {
            if contribution.kind == ContributionKind::Penalty {
                continue;
            }
            if !period::in_period(contribution.date, current, now) {
                continue;
            }
            let entry = by_member
                .entry(contribution.member_name.clone())
                .or_insert((0.0, 0));
            entry.0 += contribution.amount;
            entry.1 += 1;
        }

        let mut rows: Vec<(String, f64, usize)> = by_member
            .into_iter()
            .map(|(name, (total, count))| (name, total, count))
            .collect();
        rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        rows
    });

    // Loan book totals per status inside the period
    let state_for_loans = state.clone();
    let loan_summary = create_memo(move |_| {
        let now = chrono::Utc::now().timestamp_millis();
        let current = selected_period.get();

        [
            LoanStatus::Pending,
            LoanStatus::Approved,
            LoanStatus::Active,
            LoanStatus::Repaid,
            LoanStatus::Rejected,
        ]
        .into_iter()
        .map(|status| {
            let loans = state_for_loans.loans.get();
            let matching = loans
                .iter()
                .filter(|l| l.status == status && period::in_period(l.requested_at, current, now));
            let count = matching.clone().count();
            let total: f64 = matching.map(|l| l.amount).sum();
            (status, count, total)
        })
        .collect::<Vec<_>>()
    });

    // Penalty totals inside the period
    let state_for_penalties = state.clone();
    let penalty_summary = create_memo(move |_| {
        let now = chrono::Utc::now().timestamp_millis();
        let current = selected_period.get();

        let penalties = state_for_penalties.penalties.get();
        let in_window = penalties
            .iter()
            .filter(|p| period::in_period(p.date, current, now));
        let pending: f64 = in_window
            .clone()
            .filter(|p| p.status == PenaltyStatus::Pending)
            .map(|p| p.amount)
            .sum();
        let paid: f64 = in_window
            .filter(|p| p.status == PenaltyStatus::Paid)
            .map(|p| p.amount)
            .sum();
        (pending, paid)
    });

    // Member count under the period rules ("all" drops admin accounts)
    let state_for_members = state.clone();
    let member_count = create_memo(move |_| {
        let now = chrono::Utc::now().timestamp_millis();
        period::filter_users(&state_for_members.users.get(), selected_period.get(), now).len()
    });

    let export_csv = move |_| {
        let mut csv = String::from("member,total,contributions\n");
        for (name, total, count) in contribution_summary.get() {
            csv.push_str(&format!("{},{:.2},{}\n", name, total, count));
        }
        let file_name = format!("sacco-summary-{}.csv", selected_period.get().as_str());
        if let Err(e) = api::reports::save_csv(&file_name, &csv) {
            web_sys::console::error_1(&format!("CSV export failed: {}", e).into());
        }
    };

    view! {
        <div class="space-y-8">
            // Header with period selector
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Reports"</h1>
                    <p class="text-gray-400 mt-1">"Financial summaries for the cooperative"</p>
                </div>

                <div class="flex items-center space-x-2">
                    <select
                        on:change=move |ev| {
                            set_selected_period.set(ReportPeriod::parse(&event_target_value(&ev)))
                        }
                        prop:value=move || selected_period.get().as_str().to_string()
                        class="bg-gray-700 rounded-lg px-4 py-2
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    >
                        <option value="week">"Last 7 days"</option>
                        <option value="month">"Last 30 days"</option>
                        <option value="all">"All time"</option>
                    </select>

                    <button
                        on:click=export_csv
                        class="px-4 py-2 bg-gray-600 hover:bg-gray-500 rounded-lg text-sm
                               font-medium transition-colors"
                    >
                        "Export CSV"
                    </button>
                </div>
            </div>

            {move || {
                if !loaded.get() {
                    return view! { <Loading /> }.into_view();
                }

                view! {
                    <div class="space-y-8">
                        // Headline for the period
                        <p class="text-gray-400 text-sm">
                            {move || format!(
                                "{} · {} members included",
                                selected_period.get().label(),
                                member_count.get()
                            )}
                        </p>

                        // Contributions by member
                        <section class="bg-gray-800 rounded-xl p-6">
                            <h2 class="text-xl font-semibold mb-4">"Contributions by Member"</h2>
                            {move || {
                                let rows = contribution_summary.get();
                                if rows.is_empty() {
                                    view! {
                                        <p class="text-gray-400 text-sm">"No contributions in this period"</p>
                                    }.into_view()
                                } else {
                                    view! {
                                        <table class="w-full text-sm">
                                            <thead>
                                                <tr class="text-left text-gray-400 border-b border-gray-700">
                                                    <th class="py-2">"Member"</th>
                                                    <th class="py-2">"Entries"</th>
                                                    <th class="py-2 text-right">"Total"</th>
                                                </tr>
                                            </thead>
                                            <tbody>
                                                {rows.into_iter().map(|(name, total, count)| view! {
                                                    <tr class="border-b border-gray-700 last:border-0">
                                                        <td class="py-2 font-medium">{name}</td>
                                                        <td class="py-2">{count}</td>
                                                        <td class="py-2 text-right">{format_amount(total)}</td>
                                                    </tr>
                                                }).collect_view()}
                                            </tbody>
                                        </table>
                                    }.into_view()
                                }
                            }}
                        </section>

                        // Loan book and penalties side by side
                        <div class="grid md:grid-cols-2 gap-8">
                            <section class="bg-gray-800 rounded-xl p-6">
                                <h2 class="text-xl font-semibold mb-4">"Loan Book"</h2>
                                <div class="space-y-2">
                                    {move || {
                                        loan_summary.get().into_iter().map(|(status, count, total)| view! {
                                            <div class="flex items-center justify-between py-1 text-sm">
                                                <span class=format!(
                                                    "{} text-xs px-2 py-0.5 rounded-full text-white",
                                                    status.badge_class()
                                                )>
                                                    {status.label()}
                                                </span>
                                                <span class="text-gray-400">{format!("{} loans", count)}</span>
                                                <span>{format_amount(total)}</span>
                                            </div>
                                        }).collect_view()
                                    }}
                                </div>
                            </section>

                            <section class="bg-gray-800 rounded-xl p-6">
                                <h2 class="text-xl font-semibold mb-4">"Penalties"</h2>
                                {move || {
                                    let (pending, paid) = penalty_summary.get();
                                    view! {
                                        <div class="space-y-2 text-sm">
                                            <div class="flex justify-between py-1">
                                                <span class="text-gray-400">"Outstanding"</span>
                                                <span class="text-red-400">{format_amount(pending)}</span>
                                            </div>
                                            <div class="flex justify-between py-1">
                                                <span class="text-gray-400">"Collected"</span>
                                                <span class="text-green-400">{format_amount(paid)}</span>
                                            </div>
                                        </div>
                                    }
                                }}
                            </section>
                        </div>

                        <ShareRegister />
                        <GeneratedReports reports=reports period=selected_period.into() />
                    </div>
                }.into_view()
            }}
        </div>
    }
}

/// Per-member share register, straight from the shares read-model
#[component]
fn ShareRegister() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_rows = state.clone();
    let shares = create_memo(move |_| {
        let mut rows = state_for_rows.shares.get();
        rows.sort_by(|a, b| {
            b.contribution_total
                .partial_cmp(&a.contribution_total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows
    });

    view! {
        <section class="bg-gray-800 rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Share Register"</h2>

            {move || {
                let rows = shares.get();
                if rows.is_empty() {
                    view! {
                        <p class="text-gray-400 text-sm">"Failed to load shares data"</p>
                    }.into_view()
                } else {
                    view! {
                        <table class="w-full text-sm">
                            <thead>
                                <tr class="text-left text-gray-400 border-b border-gray-700">
                                    <th class="py-2">"Member"</th>
                                    <th class="py-2">"Contributions"</th>
                                    <th class="py-2">"Share"</th>
                                    <th class="py-2 text-right">"Interest earned"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows.into_iter().map(|share| view! {
                                    <tr class="border-b border-gray-700 last:border-0">
                                        <td class="py-2 font-medium">{share.member_name}</td>
                                        <td class="py-2">{format_amount(share.contribution_total)}</td>
                                        <td class="py-2">{format!("{:.2}%", share.share_percent)}</td>
                                        <td class="py-2 text-right">{format_amount(share.interest_earned)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view()
                }
            }}
        </section>
    }
}

/// Backend-generated PDF reports: generate, download, email
#[component]
fn GeneratedReports(
    reports: RwSignal<Vec<Report>>,
    period: Signal<ReportPeriod>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (generating, set_generating) = create_signal(false);
    let (downloading, set_downloading) = create_signal(None::<u32>);

    // Emailing reports is an admin-only side-call
    let state_for_admin = state.clone();
    let can_email = create_memo(move |_| {
        state_for_admin
            .session
            .get()
            .map(|s| s.is_admin())
            .unwrap_or(false)
    });

    let state_for_generate = state.clone();
    let generate = move |_| {
        set_generating.set(true);

        let state = state_for_generate.clone();
        let selected = period.get();
        spawn_local(async move {
            match api::reports::generate_report(selected).await {
                Ok(report) => {
                    reports.update(|list| list.insert(0, report));
                    state.show_success("Report generation started");
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            // Refresh the list so ready flags catch up
            if let Ok(list) = api::reports::fetch_reports().await {
                reports.set(list);
            }
            set_generating.set(false);
        });
    };

    let state_for_download = state.clone();
    let download = move |report: Report| {
        set_downloading.set(Some(report.id));

        let state = state_for_download.clone();
        spawn_local(async move {
            match api::reports::download_report(&report).await {
                Ok(()) => {
                    state.show_success("Report downloaded");
                }
                Err(e) => {
                    state.show_error(&e);
                }
            }
            set_downloading.set(None);
        });
    };

    let state_for_email = state.clone();
    let email = move |id: u32| {
        let recipient = web_sys::window()
            .and_then(|w| w.prompt_with_message("Send report to (email)").ok().flatten())
            .unwrap_or_default();
        if recipient.trim().is_empty() {
            return;
        }

        let state = state_for_email.clone();
        spawn_local(async move {
            match api::reports::email_report(id, &recipient).await {
                Ok(()) => {
                    state.show_success("Report emailed");
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
                <h2 class="text-xl font-semibold">"Generated Reports"</h2>
                <button
                    on:click=generate
                    disabled=move || generating.get()
                    class="px-4 py-2 bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg text-sm font-medium transition-colors"
                >
                    {move || if generating.get() { "Generating..." } else { "Generate PDF" }}
                </button>
            </div>

            <div class="space-y-2">
                {move || {
                    let rows = reports.get();
                    if rows.is_empty() {
                        view! {
                            <p class="text-gray-400 text-sm">"No reports generated yet"</p>
                        }.into_view()
                    } else {
                        rows.into_iter().map(|report| {
                            let download = download.clone();
                            let email = email.clone();
                            let id = report.id;
                            let ready = report.ready;
                            let report_for_download = report.clone();

                            view! {
                                <div class="flex items-center justify-between py-2 border-b border-gray-700 last:border-0">
                                    <div>
                                        <span class="font-medium capitalize">{report.period.clone()}</span>
                                        <span class="text-gray-500 text-sm ml-2">
                                            {format_date(report.created_at)}
                                        </span>
                                        {(!ready).then(|| view! {
                                            <span class="text-yellow-400 text-sm ml-2">"Preparing..."</span>
                                        })}
                                    </div>

                                    <div class="flex space-x-2">
                                        <button
                                            on:click=move |_| download(report_for_download.clone())
                                            disabled=move || !ready || downloading.get() == Some(id)
                                            class="px-3 py-1 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                                   disabled:text-gray-500 rounded text-sm transition-colors"
                                        >
                                            {move || if downloading.get() == Some(id) {
                                                "Downloading..."
                                            } else {
                                                "Download"
                                            }}
                                        </button>
                                        {can_email.get().then(|| {
                                            let email = email.clone();
                                            view! {
                                                <button
                                                    on:click=move |_| email(id)
                                                    disabled=move || !ready
                                                    class="px-3 py-1 bg-gray-600 hover:bg-gray-500 disabled:bg-gray-700
                                                           disabled:text-gray-500 rounded text-sm transition-colors"
                                                >
                                                    "Email"
                                                </button>
                                            }
                                        })}
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
