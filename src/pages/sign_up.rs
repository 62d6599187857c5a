//! Sign-up page. Registration does not sign the user in; success goes to
//! the sign-in route.

#[cfg(test)]
#[path = "sign_up_test.rs"]
mod sign_up_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::SIGN_IN_ROUTE;
use crate::net::types::SignUpRequest;
use crate::services::auth::validate_sign_up;

/// Form fields in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignUpField {
    Name,
    Email,
    Password,
    PhoneNumber,
    Address,
}

impl SignUpField {
    pub const ALL: [Self; 5] = [Self::Name, Self::Email, Self::Password, Self::PhoneNumber, Self::Address];

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::PhoneNumber => "Phone Number",
            Self::Address => "Address",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::Email => "email",
            _ => "text",
        }
    }

    pub fn value(self, form: &SignUpRequest) -> &str {
        match self {
            Self::Name => &form.name,
            Self::Email => &form.email,
            Self::Password => &form.password,
            Self::PhoneNumber => &form.phone_number,
            Self::Address => &form.address,
        }
    }

    pub fn set(self, form: &mut SignUpRequest, value: String) {
        let slot = match self {
            Self::Name => &mut form.name,
            Self::Email => &mut form.email,
            Self::Password => &mut form.password,
            Self::PhoneNumber => &mut form.phone_number,
            Self::Address => &mut form.address,
        };
        *slot = value;
    }
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    let form = RwSignal::new(SignUpRequest::default());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let navigate = use_navigate();

    #[cfg(feature = "csr")]
    let api = StoredValue::new(expect_context::<crate::app::WebApi>());

    let navigate_sign_in = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        error.set(String::new());
        let submitted = form.get();
        if let Err(e) = validate_sign_up(&submitted) {
            error.set(e.to_string());
            return;
        }
        busy.set(true);

        #[cfg(feature = "csr")]
        {
            let api = api.get_value();
            let navigate_sign_in = navigate_sign_in.clone();
            leptos::task::spawn_local(async move {
                match crate::services::auth::sign_up(&api, &submitted).await {
                    Ok(()) => navigate_sign_in(SIGN_IN_ROUTE, NavigateOptions::default()),
                    Err(e) => error.set(e.to_string()),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = &navigate_sign_in;
            busy.set(false);
        }
    };

    let inputs = SignUpField::ALL
        .into_iter()
        .map(|field| {
            view! {
                <input
                    class="auth-input"
                    type=field.input_type()
                    placeholder=field.placeholder()
                    prop:value=move || form.with(|f| field.value(f).to_owned())
                    on:input=move |ev| form.update(|f| field.set(f, event_target_value(&ev)))
                />
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="auth-page">
            <form class="auth-card" on:submit=on_submit>
                <h2>"Sign Up"</h2>
                <Show when=move || !error.get().is_empty()>
                    <p class="auth-card__error">{move || error.get()}</p>
                </Show>
                {inputs}
                <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                    "Register"
                </button>
                <button
                    class="btn btn--secondary"
                    type="button"
                    on:click=move |_| navigate(SIGN_IN_ROUTE, NavigateOptions::default())
                >
                    "Sign In"
                </button>
            </form>
        </div>
    }
}
