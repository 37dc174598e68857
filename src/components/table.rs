//! Table Pagination Controls
//!
//! Prev/next controls for tables paginated client-side over the fetched
//! page of data.

use leptos::*;

use crate::model::pagination;

/// Pagination footer for a table
#[component]
pub fn Paginator(
    /// 1-based current page
    page: RwSignal<usize>,
    /// Total number of items
    #[prop(into)]
    total: Signal<usize>,
    /// Items per page
    page_size: usize,
) -> impl IntoView {
    let pages = create_memo(move |_| pagination::page_count(total.get(), page_size));

    view! {
        <div class="flex items-center justify-between mt-4 text-sm">
            <span class="text-gray-400">
                {move || {
                    let current = pagination::clamp_page(page.get(), total.get(), page_size);
                    format!("Page {} of {} ({} items)", current, pages.get(), total.get())
                }}
            </span>

            <div class="flex space-x-2">
                <button
                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                    disabled=move || page.get() <= 1
                    class="px-3 py-1 bg-gray-700 hover:bg-gray-600 disabled:bg-gray-800
                           disabled:text-gray-600 rounded transition-colors"
                >
                    "Prev"
                </button>
                <button
                    on:click=move |_| {
                        let last = pages.get();
                        page.update(|p| *p = (*p + 1).min(last));
                    }
                    disabled=move || page.get() >= pages.get()
                    class="px-3 py-1 bg-gray-700 hover:bg-gray-600 disabled:bg-gray-800
                           disabled:text-gray-600 rounded transition-colors"
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
