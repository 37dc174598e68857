//! Navigation Component
//!
//! Header navigation bar with role-aware links and logout.

use leptos::*;
use leptos_router::*;

use crate::model::Role;
use crate::state::{Action, GlobalState};

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let state_for_logout = state.clone();
    let on_logout = move |_| {
        state_for_logout.dispatch(Action::LoggedOut);
        navigate("/login", Default::default());
    };

    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🏦"</span>
                        <span class="text-xl font-bold text-white">"SACCO"</span>
                    </A>

                    // Navigation links
                    {move || {
                        match state.session.get() {
                            Some(session) => {
                                let links: &[(&str, &str)] = match session.user.role {
                                    Role::Admin => &[("/admin", "Dashboard"), ("/reports", "Reports")],
                                    Role::BranchLead => &[("/branch", "Dashboard"), ("/reports", "Reports")],
                                    Role::Member => &[("/member", "My Savings")],
                                };
                                let on_logout = on_logout.clone();

                                view! {
                                    <div class="flex items-center space-x-1">
                                        {links.iter().copied().map(|(href, label)| view! {
                                            <NavLink href=href label=label />
                                        }).collect_view()}

                                        <span class="px-3 text-sm text-gray-400">
                                            {session.user.name.clone()}
                                        </span>
                                        <button
                                            on:click=on_logout
                                            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
                                        >
                                            "Log out"
                                        </button>
                                    </div>
                                }.into_view()
                            }
                            None => view! {
                                <div class="flex items-center space-x-1">
                                    <NavLink href="/login" label="Log in" />
                                    <NavLink href="/register" label="Register" />
                                </div>
                            }.into_view(),
                        }
                    }}
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
        >
            {label}
        </A>
    }
}
