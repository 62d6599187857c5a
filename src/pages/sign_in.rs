//! Sign-in page: email + password exchanged for a bearer token.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::SIGN_UP_ROUTE;
use crate::services::auth::validate_sign_in;
#[cfg(feature = "csr")]
use crate::state::session::Session;

#[component]
pub fn SignInPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let navigate = use_navigate();

    #[cfg(feature = "csr")]
    let session = expect_context::<RwSignal<Session>>();
    #[cfg(feature = "csr")]
    let api = StoredValue::new(expect_context::<crate::app::WebApi>());

    let navigate_home = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(String::new());
        let (email_value, password_value) = (email.get(), password.get());
        if let Err(e) = validate_sign_in(&email_value, &password_value) {
            error.set(e.to_string());
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            let navigate_home = navigate_home.clone();
            leptos::task::spawn_local(async move {
                match crate::services::auth::sign_in(&api, &session, &email_value, &password_value).await {
                    Ok(_) => navigate_home(crate::app::HOME_ROUTE, NavigateOptions::default()),
                    Err(e) => error.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &navigate_home;
            busy.set(false);
        }
    };

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h2>"Sign In"</h2>
                <Show when=move || !error.get().is_empty()>
                    <div class="auth-card__error">{move || error.get()}</div>
                </Show>
                <input
                    class="auth-input"
                    type="email"
                    name="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    class="auth-input"
                    type="password"
                    name="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Logging in..." } else { "Login" }}
                </button>
                <button
                    class="btn btn--secondary"
                    type="button"
                    on:click=move |_| navigate(SIGN_UP_ROUTE, NavigateOptions::default())
                >
                    "Sign Up"
                </button>
            </form>
        </div>
    }
}
