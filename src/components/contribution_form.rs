//! Contribution Form
//!
//! Admin/branch-lead "add money" form. Flags the flat late penalty when
//! recording a contribution after the monthly due day.

use leptos::*;

use crate::api;
use crate::model::{format_amount, period, ContributionKind, User};
use crate::state::{Action, GlobalState};

/// Contribution entry form, shown inside a modal
#[component]
pub fn ContributionForm(
    /// Members selectable in the form
    #[prop(into)]
    members: Signal<Vec<User>>,
    /// Called after a successful save
    on_close: impl Fn() + 'static + Clone,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (member_id, set_member_id) = create_signal(None::<u32>);
    let (amount, set_amount) = create_signal(String::new());
    let (kind, set_kind) = create_signal(ContributionKind::Regular);
    let (note, set_note) = create_signal(String::new());
    let (field_error, set_field_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    // Default the selection to the first member once the list arrives
    create_effect(move |_| {
        if member_id.get().is_none() {
            if let Some(first) = members.get().first() {
                set_member_id.set(Some(first.id));
            }
        }
    });

    // Late-contribution notice for today's date
    let state_for_late = state.clone();
    let late_notice = create_memo(move |_| {
        let rules = state_for_late.rules.get();
        let now = chrono::Utc::now().timestamp_millis();
        if period::is_late(now, &rules) {
            Some(format!(
                "Contributions after day {} of the month are flagged with a {} penalty",
                rules.contribution_due_day,
                format_amount(rules.late_penalty)
            ))
        } else {
            None
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(member) = member_id.get() else {
            set_field_error.set(Some("Select a member".to_string()));
            return;
        };
        let Ok(value) = amount.get().trim().parse::<f64>() else {
            set_field_error.set(Some("Enter a valid amount".to_string()));
            return;
        };
        if let Err(e) = crate::model::validate::validate_amount(value) {
            set_field_error.set(Some(e));
            return;
        }

        set_field_error.set(None);
        set_submitting.set(true);

        let entry_kind = kind.get();
        let entry_note = {
            let n = note.get();
            if n.trim().is_empty() { None } else { Some(n) }
        };
        let state_clone = state.clone();
        let on_close = on_close.clone();
        spawn_local(async move {
            match api::contributions::add_contribution(member, value, entry_kind, entry_note).await {
                Ok(contribution) => {
                    state_clone.dispatch(Action::ContributionAdded(contribution));
                    state_clone.show_success("Contribution recorded");
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
            // Member selector
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Member"</label>
                <select
                    on:change=move |ev| {
                        if let Ok(id) = event_target_value(&ev).parse() {
                            set_member_id.set(Some(id));
                        }
                    }
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                >
                    {move || {
                        members.get().into_iter().map(|member| view! {
                            <option value=member.id.to_string()>{member.name}</option>
                        }).collect_view()
                    }}
                </select>
            </div>

            // Amount
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

            // Kind
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Type"</label>
                <select
                    on:change=move |ev| {
                        set_kind.set(match event_target_value(&ev).as_str() {
                            "adjustment" => ContributionKind::Adjustment,
                            "interest" => ContributionKind::Interest,
                            _ => ContributionKind::Regular,
                        });
                    }
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                >
                    <option value="regular">"Regular"</option>
                    <option value="adjustment">"Adjustment"</option>
                    <option value="interest">"Interest"</option>
                </select>
            </div>

            // Note
            <div>
                <label class="block text-sm text-gray-400 mb-2">"Note (optional)"</label>
                <input
                    type="text"
                    prop:value=move || note.get()
                    on:input=move |ev| set_note.set(event_target_value(&ev))
                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                />
            </div>

            // Late penalty notice
            {move || {
                late_notice.get().map(|notice| view! {
                    <p class="text-yellow-400 text-sm">"⚠ "{notice}</p>
                })
            }}

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
                       rounded-lg py-3 font-semibold transition-colors"
            >
                {move || if submitting.get() { "Saving..." } else { "Record Contribution" }}
            </button>
        </form>
    }
}
