//! Loan Request Form
//!
//! Member-facing loan request, gated by the savings-based eligibility
//! ceiling. Shows a repayment projection before submitting.

use leptos::*;

use crate::api;
use crate::model::{format_amount, loan_math, validate};
use crate::state::{Action, GlobalState};

const DURATION_OPTIONS: [u32; 6] = [3, 6, 9, 12, 18, 24];

/// Loan request form component
#[component]
pub fn LoanRequestForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (amount, set_amount) = create_signal(String::new());
    let (duration, set_duration) = create_signal(6u32);
    let (purpose, set_purpose) = create_signal(String::new());
    let (field_error, set_field_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    // Savings-based eligibility ceiling
    let state_for_savings = state.clone();
    let savings = create_memo(move |_| {
        state_for_savings
            .current_user()
            .map(|u| state_for_savings.savings_for(u.id))
            .unwrap_or(0.0)
    });

    let state_for_max = state.clone();
    let max_amount = create_memo(move |_| {
        loan_math::max_loanable(savings.get(), &state_for_max.rules.get())
    });

    // Interest/repayment projection for the entered amount
    let projection = create_memo(move |_| {
        amount
            .get()
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|a| *a > 0.0)
            .map(|a| {
                let months = duration.get();
                (
                    loan_math::interest(a, months),
                    loan_math::repayment_total(a, months),
                    loan_math::monthly_installment(a, months),
                )
            })
    });

    let state_for_submit = state.clone();
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Ok(requested) = amount.get().trim().parse::<f64>() else {
            set_field_error.set(Some("Enter a valid amount".to_string()));
            return;
        };

        let rules = state_for_submit.rules.get();
        if let Err(e) = validate::validate_loan_request(requested, savings.get(), &rules) {
            set_field_error.set(Some(e));
            return;
        }

        set_field_error.set(None);
        set_submitting.set(true);

        let months = duration.get();
        let reason = purpose.get();
        let state_clone = state_for_submit.clone();
        spawn_local(async move {
            match api::loans::request_loan(requested, months, &reason).await {
                Ok(loan) => {
                    state_clone.dispatch(Action::LoanUpserted(loan));
                    state_clone.show_success("Loan request submitted");
                    set_amount.set(String::new());
                    set_purpose.set(String::new());
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
            // Eligibility ceiling
            <p class="text-sm text-gray-400">
                "Based on savings of "
                {move || format_amount(savings.get())}
                " you can borrow up to "
                <span class="text-white font-medium">
                    {move || format_amount(max_amount.get())}
                </span>
            </p>

            // Amount
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Amount"</label>
                <input
                    type="number"
                    min="0"
                    step="0.01"
                    placeholder="e.g., 1000"
                    prop:value=move || amount.get()
                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            // Duration
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Duration"</label>
                <select
                    on:change=move |ev| {
                        if let Ok(months) = event_target_value(&ev).parse() {
                            set_duration.set(months);
                        }
                    }
                    prop:value=move || duration.get().to_string()
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                >
                    {DURATION_OPTIONS.into_iter().map(|months| view! {
                        <option value=months.to_string()>{format!("{} months", months)}</option>
                    }).collect_view()}
                </select>
            </div>

            // Purpose
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Purpose"</label>
                <input
                    type="text"
                    placeholder="e.g., school fees"
                    prop:value=move || purpose.get()
                    on:input=move |ev| set_purpose.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            // Repayment projection
            {move || {
                projection.get().map(|(interest, total, installment)| view! {
                    <div class="bg-gray-700 rounded-lg p-4 text-sm space-y-1">
                        <div class="flex justify-between">
                            <span class="text-gray-400">"Interest"</span>
                            <span>{format_amount(interest)}</span>
                        </div>
                        <div class="flex justify-between">
                            <span class="text-gray-400">"Total repayment"</span>
                            <span class="font-medium">{format_amount(total)}</span>
                        </div>
                        <div class="flex justify-between">
                            <span class="text-gray-400">"Monthly installment"</span>
                            <span>{format_amount(installment)}</span>
                        </div>
                    </div>
                })
            }}

            // Inline validation error
            {move || {
                field_error.get().map(|e| view! {
                    <p class="text-red-400 text-sm">{e}</p>
                })
            }}

            // Submit
            <button
                type="submit"
                disabled=move || submitting.get()
                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                       disabled:cursor-not-allowed rounded-lg py-3 font-semibold
                       transition-colors"
            >
                {move || if submitting.get() { "Submitting..." } else { "Request Loan" }}
            </button>
        </form>
    }
}
