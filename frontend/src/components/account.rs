use shared::{
    api::{Api, ClientError},
    notify::Notification,
    session::{Session, User},
    validation::{check, LoginRequest, ValidationErrors},
};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::rpc::Client;

#[derive(Properties, PartialEq)]
pub struct AccountProps {
    pub session: Session,
    pub on_sign_in: Callback<User>,
    pub on_sign_out: Callback<()>,
    pub on_notify: Callback<Notification>,
}

fn field_errors(errors: &ValidationErrors, field: &str) -> Html {
    errors
        .for_field(field)
        .map(|message| html! { <small class="field-error">{ message.to_owned() }</small> })
        .collect()
}

#[function_component]
pub fn Account(props: &AccountProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let errors = use_state(ValidationErrors::default);
    let pending = use_state(|| false);

    if let Some(user) = props.session.current_user() {
        let on_sign_out = props.on_sign_out.clone();
        return html! {
            <div class="account">
                <span>{ format!("Signed in as {}", user.name) }</span>
                <button onclick={move |_| on_sign_out.emit(())}>{ "Sign out" }</button>
            </div>
        };
    }

    let bind = |state: &UseStateHandle<String>| {
        let state = state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
        })
    };
    let on_email = bind(&email);
    let on_password = bind(&password);

    let onsubmit = {
        let email = email.clone();
        let password = password.clone();
        let errors = errors.clone();
        let pending = pending.clone();
        let on_sign_in = props.on_sign_in.clone();
        let on_notify = props.on_notify.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *pending {
                return;
            }

            let req = LoginRequest {
                email: email.trim().to_owned(),
                password: (*password).clone(),
            };
            if let Err(found) = check(&req) {
                errors.set(found);
                return;
            }

            errors.set(ValidationErrors::default());
            pending.set(true);

            let errors = errors.clone();
            let pending = pending.clone();
            let on_sign_in = on_sign_in.clone();
            let on_notify = on_notify.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match Client.login(&req).await {
                    Ok(_) => {
                        let name = req.email.split('@').next().unwrap_or_default();
                        on_sign_in.emit(User::new(name, req.email.clone()));
                    }
                    Err(ClientError::Api(body)) => match serde_json::from_value(body) {
                        Ok(found) => errors.set(found),
                        Err(_) => on_notify.emit(Notification::destructive(
                            "Sign in failed",
                            "The server rejected the request.",
                        )),
                    },
                    Err(err) => {
                        tracing::error!(error = %err, "login request failed");
                        on_notify.emit(Notification::destructive(
                            "Sign in failed",
                            "Could not reach the server. Please try again.",
                        ));
                    }
                }
                pending.set(false);
            });
        })
    };

    html! {
        <form class="account" {onsubmit}>
            <label>
                { "Email" }
                <input type="email" value={(*email).clone()} oninput={on_email} />
                { field_errors(&errors, "email") }
            </label>
            <label>
                { "Password" }
                <input type="password" value={(*password).clone()} oninput={on_password} />
                { field_errors(&errors, "password") }
            </label>
            <button type="submit" disabled={*pending}>{ "Sign in" }</button>
        </form>
    }
}
