//! Auth Pages
//!
//! Login, registration, and password-reset flows.

use leptos::*;
use leptos_router::*;

use crate::api;
use crate::model::validate;
use crate::state::{Action, GlobalState, Session};

/// Login page component
#[component]
pub fn Login() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();

    let (email, set_email) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let address = email.get();
        let secret = password.get();
        if address.is_empty() || secret.is_empty() {
            set_error.set(Some("Email and password are required".to_string()));
            return;
        }

        set_submitting.set(true);
        set_error.set(None);

        let state_clone = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::auth::login(&address, &secret).await {
                Ok(auth) => {
                    let home = auth.user.role.home_path();
                    state_clone.dispatch(Action::SessionLoaded(Session {
                        user: auth.user,
                        token: auth.token,
                    }));
                    navigate(home, Default::default());
                }
                Err(e) => {
                    set_error.set(Some(e));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthShell title="Welcome back" subtitle="Sign in to your cooperative account">
            <form on:submit=on_submit class="space-y-4">
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
                    error.get().map(|e| view! {
                        <p class="text-red-400 text-sm">{e}</p>
                    })
                }}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg py-3 font-semibold transition-colors"
                >
                    {move || if submitting.get() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>

            // Google OAuth entry point; the backend drives the redirect flow
            <button
                on:click=move |_| api::auth::start_google_login()
                class="w-full mt-3 bg-gray-700 hover:bg-gray-600 rounded-lg py-3
                       font-medium transition-colors"
            >
                "Continue with Google"
            </button>

            <div class="flex justify-between mt-6 text-sm text-gray-400">
                <A href="/register" class="hover:text-white">"Create an account"</A>
                <A href="/forgot-password" class="hover:text-white">"Forgot password?"</A>
            </div>
        </AuthShell>
    }
}

/// Registration page component
#[component]
pub fn Register() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (name, set_name) = create_signal(String::new());
    let (email, set_email) = create_signal(String::new());
    let (branch, set_branch) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);
    let (submitted, set_submitted) = create_signal(false);

    let score = create_memo(move |_| validate::password_score(&password.get()));

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        if name.get().trim().is_empty() || branch.get().trim().is_empty() {
            set_error.set(Some("Name and branch are required".to_string()));
            return;
        }
        if let Err(e) = validate::validate_email(&email.get()) {
            set_error.set(Some(e));
            return;
        }
        if let Err(e) = validate::validate_password(&password.get()) {
            set_error.set(Some(e));
            return;
        }
        if password.get() != confirm.get() {
            set_error.set(Some("Passwords do not match".to_string()));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);

        let full_name = name.get();
        let address = email.get();
        let secret = password.get();
        let group = branch.get();
        let state_clone = state.clone();
        spawn_local(async move {
            match api::auth::register(&full_name, &address, &secret, &group).await {
                Ok(_user) => {
                    set_submitted.set(true);
                }
                Err(e) => {
                    state_clone.show_error(&e);
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthShell title="Join the cooperative" subtitle="Your account activates once an admin approves it">
            {move || {
                if submitted.get() {
                    view! {
                        <div class="text-center space-y-4">
                            <div class="text-5xl">"✅"</div>
                            <p class="text-gray-300">
                                "Registration received. You can sign in once an admin approves your account."
                            </p>
                            <A href="/login" class="text-primary-400 hover:text-primary-300">
                                "Back to sign in"
                            </A>
                        </div>
                    }.into_view()
                } else {
                    view! {
                        <form on:submit=on_submit.clone() class="space-y-4">
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
                                <label class="block text-sm text-gray-400 mb-2">"Password"</label>
                                <input
                                    type="password"
                                    prop:value=move || password.get()
                                    on:input=move |ev| set_password.set(event_target_value(&ev))
                                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                                />
                                <StrengthMeter score=score.into() />
                            </div>

                            <div>
                                <label class="block text-sm text-gray-400 mb-2">"Confirm password"</label>
                                <input
                                    type="password"
                                    prop:value=move || confirm.get()
                                    on:input=move |ev| set_confirm.set(event_target_value(&ev))
                                    class="w-full bg-gray-700 rounded-lg px-4 py-3
                                           border border-gray-600 focus:border-primary-500 focus:outline-none"
                                />
                            </div>

                            {move || {
                                error.get().map(|e| view! {
                                    <p class="text-red-400 text-sm">{e}</p>
                                })
                            }}

                            <button
                                type="submit"
                                disabled=move || submitting.get()
                                class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                                       rounded-lg py-3 font-semibold transition-colors"
                            >
                                {move || if submitting.get() { "Registering..." } else { "Register" }}
                            </button>
                        </form>
                    }.into_view()
                }
            }}
        </AuthShell>
    }
}

/// Password strength meter under the registration password field
#[component]
fn StrengthMeter(score: Signal<u8>) -> impl IntoView {
    view! {
        <div class="flex space-x-1 mt-2">
            {(0..4u8).map(|slot| view! {
                <div class=move || {
                    let filled = score.get() > slot;
                    let color = match score.get() {
                        0 | 1 => "bg-red-500",
                        2 | 3 => "bg-yellow-500",
                        _ => "bg-green-500",
                    };
                    if filled {
                        format!("flex-1 h-1 rounded {}", color)
                    } else {
                        "flex-1 h-1 rounded bg-gray-700".to_string()
                    }
                } />
            }).collect_view()}
        </div>
    }
}

/// Forgot-password page component
#[component]
pub fn ForgotPassword() -> impl IntoView {
    let (email, set_email) = create_signal(String::new());
    let (message, set_message) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let address = email.get();
        if validate::validate_email(&address).is_err() {
            set_message.set(Some("Enter a valid email address".to_string()));
            return;
        }

        set_submitting.set(true);
        spawn_local(async move {
            // Same message either way; the backend does not reveal accounts
            let _ = api::auth::forgot_password(&address).await;
            set_message.set(Some(
                "If that address has an account, a reset email is on its way".to_string(),
            ));
            set_submitting.set(false);
        });
    };

    view! {
        <AuthShell title="Reset your password" subtitle="We will email you a reset link">
            <form on:submit=on_submit class="space-y-4">
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

                {move || {
                    message.get().map(|m| view! {
                        <p class="text-gray-300 text-sm">{m}</p>
                    })
                }}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg py-3 font-semibold transition-colors"
                >
                    {move || if submitting.get() { "Sending..." } else { "Send Reset Link" }}
                </button>
            </form>

            <div class="mt-6 text-sm text-center">
                <A href="/login" class="text-gray-400 hover:text-white">"Back to sign in"</A>
            </div>
        </AuthShell>
    }
}

/// Reset-password page component; the token arrives as a query parameter
#[component]
pub fn ResetPassword() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let navigate = use_navigate();
    let query = use_query_map();

    let (password, set_password) = create_signal(String::new());
    let (confirm, set_confirm) = create_signal(String::new());
    let (error, set_error) = create_signal(None::<String>);
    let (submitting, set_submitting) = create_signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let Some(token) = query.with(|q| q.get("token").cloned()) else {
            set_error.set(Some("Reset link is missing its token".to_string()));
            return;
        };
        if let Err(e) = validate::validate_password(&password.get()) {
            set_error.set(Some(e));
            return;
        }
        if password.get() != confirm.get() {
            set_error.set(Some("Passwords do not match".to_string()));
            return;
        }

        set_error.set(None);
        set_submitting.set(true);

        let secret = password.get();
        let state_clone = state.clone();
        let navigate = navigate.clone();
        spawn_local(async move {
            match api::auth::reset_password(&token, &secret).await {
                Ok(()) => {
                    state_clone.show_success("Password updated, sign in with the new one");
                    navigate("/login", Default::default());
                }
                Err(e) => {
                    set_error.set(Some(e));
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <AuthShell title="Choose a new password" subtitle="">
            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="block text-sm text-gray-400 mb-2">"New password"</label>
                    <input
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                <div>
                    <label class="block text-sm text-gray-400 mb-2">"Confirm password"</label>
                    <input
                        type="password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| set_confirm.set(event_target_value(&ev))
                        class="w-full bg-gray-700 rounded-lg px-4 py-3
                               border border-gray-600 focus:border-primary-500 focus:outline-none"
                    />
                </div>

                {move || {
                    error.get().map(|e| view! {
                        <p class="text-red-400 text-sm">{e}</p>
                    })
                }}

                <button
                    type="submit"
                    disabled=move || submitting.get()
                    class="w-full bg-primary-600 hover:bg-primary-700 disabled:bg-gray-600
                           rounded-lg py-3 font-semibold transition-colors"
                >
                    {move || if submitting.get() { "Saving..." } else { "Update Password" }}
                </button>
            </form>
        </AuthShell>
    }
}

/// Shared centered card layout for the auth pages
#[component]
fn AuthShell(
    title: &'static str,
    subtitle: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-[70vh]">
            <div class="bg-gray-800 rounded-xl p-8 w-full max-w-md">
                <h1 class="text-2xl font-bold">{title}</h1>
                {(!subtitle.is_empty()).then(|| view! {
                    <p class="text-gray-400 mt-1 mb-6">{subtitle}</p>
                })}
                <div class="mt-4">
                    {children()}
                </div>
            </div>
        </div>
    }
}
