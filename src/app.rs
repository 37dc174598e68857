//! App Root Component
//!
//! Routing shell with the role gate, global providers, and toasts. The
//! gate is a UX affordance only; the backend enforces authorization with
//! its bearer-token check on every call.

use leptos::*;
use leptos_router::*;

use crate::components::{Loading, Nav, Toast};
use crate::model::Role;
use crate::pages::{
    AdminDashboard, BranchLeadDashboard, ForgotPassword, Login, MemberDashboard, Register,
    Reports, ResetPassword,
};
use crate::state::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components; restores any cached session
    provide_global_state();

    view! {
        <Router>
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8 pb-24">
                    <Routes>
                        <Route path="/" view=HomeRedirect />
                        <Route path="/login" view=Login />
                        <Route path="/register" view=Register />
                        <Route path="/forgot-password" view=ForgotPassword />
                        <Route path="/reset-password" view=ResetPassword />
                        <Route path="/admin" view=AdminDashboard />
                        <Route path="/branch" view=BranchLeadDashboard />
                        <Route path="/member" view=MemberDashboard />
                        <Route path="/reports" view=Reports />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Footer with connection status
                <Footer />

                // Toast notifications
                <Toast />
            </div>
        </Router>
    }
}

/// Redirect from the root to the role's dashboard, or to login
#[component]
fn HomeRedirect() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    create_effect(move |_| {
        let target = match state.session.get() {
            Some(session) => session.user.role.home_path(),
            None => "/login",
        };
        navigate(target, Default::default());
    });

    view! { <Loading /> }
}

/// Redirect away from a dashboard the current session may not see.
pub fn use_role_gate(allowed: &'static [Role]) {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    create_effect(move |_| {
        match state.session.get() {
            None => navigate("/login", Default::default()),
            Some(session) if !allowed.contains(&session.user.role) => {
                navigate(session.user.role.home_path(), Default::default());
            }
            _ => {}
        }
    });
}

/// Footer component showing poll status
#[component]
fn Footer() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <footer class="fixed bottom-0 left-0 right-0 bg-gray-800 border-t border-gray-700 py-3 px-4">
            <div class="container mx-auto flex items-center justify-between text-sm">
                // Connection status from the last poll round-trip
                <div class="flex items-center space-x-2">
                    {move || {
                        if state.online.get() {
                            view! {
                                <span class="flex items-center space-x-1 text-green-400">
                                    <span class="w-2 h-2 bg-green-400 rounded-full pulse" />
                                    <span>"Live"</span>
                                </span>
                            }.into_view()
                        } else {
                            view! {
                                <span class="flex items-center space-x-1 text-red-400">
                                    <span class="w-2 h-2 bg-red-400 rounded-full" />
                                    <span>"Retrying"</span>
                                </span>
                            }.into_view()
                        }
                    }}
                </div>

                // Last refresh time
                <div class="text-gray-400">
                    {move || {
                        state.last_refresh.get()
                            .and_then(|ts| chrono::DateTime::from_timestamp_millis(ts))
                            .map(|dt| format!("Last refresh: {}", dt.format("%H:%M:%S")))
                            .unwrap_or_else(|| "Not refreshed".to_string())
                    }}
                </div>
            </div>
        </footer>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Go to Dashboard"
            </A>
        </div>
    }
}
