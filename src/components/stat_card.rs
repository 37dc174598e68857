//! Stat Card Component
//!
//! Headline figure with an optional delta against the previous refresh.

use leptos::*;

/// Stat card component
#[component]
pub fn StatCard(
    /// Card label
    #[prop(into)]
    label: String,
    /// Formatted headline value
    #[prop(into)]
    value: Signal<String>,
    /// Change since the previous poll snapshot
    #[prop(optional, into)]
    delta: Option<Signal<Option<f64>>>,
    /// Optional emoji icon
    #[prop(optional)]
    icon: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="bg-gray-800 rounded-lg p-4 border border-gray-700 hover:border-gray-600 transition">
            // Header with label
            <div class="flex items-center justify-between">
                <span class="text-gray-400 text-sm">{label}</span>
                {icon.map(|i| view! {
                    <span class="text-lg">{i}</span>
                })}
            </div>

            // Headline value
            <div class="text-3xl font-bold mt-2">
                {move || value.get()}
            </div>

            // Delta indicator
            {delta.map(|delta| view! {
                <div class="mt-2">
                    {move || {
                        match delta.get() {
                            Some(diff) => {
                                let (arrow, color) = if diff > 0.005 {
                                    ("↑", "text-green-400")
                                } else if diff < -0.005 {
                                    ("↓", "text-red-400")
                                } else {
                                    ("→", "text-gray-400")
                                };

                                view! {
                                    <span class=format!("text-sm {}", color)>
                                        {arrow}
                                        " "
                                        {format!("{:+.2}", diff)}
                                        " since last refresh"
                                    </span>
                                }.into_view()
                            }
                            None => view! {
                                <span class="text-sm text-gray-500">"No change yet"</span>
                            }.into_view()
                        }
                    }}
                </div>
            })}
        </div>
    }
}
