use shared::StoreError;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::auth::{AuthClient, Session};
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct LoginFormProps {
    pub auth: AuthClient,
    pub on_login: Callback<Session>,
}

#[function_component(LoginForm)]
pub fn login_form(props: &LoginFormProps) -> Html {
    let email = use_state(String::new);
    let password = use_state(String::new);
    let signing_in = use_state(|| false);
    let error_message = use_state(|| Option::<String>::None);

    let on_email_change = {
        let email = email.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            email.set(input.value());
        })
    };

    let on_password_change = {
        let password = password.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            password.set(input.value());
        })
    };

    let on_submit = {
        let auth = props.auth.clone();
        let on_login = props.on_login.clone();
        let email = email.clone();
        let password = password.clone();
        let signing_in = signing_in.clone();
        let error_message = error_message.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let email_value = email.trim().to_string();
            if email_value.is_empty() || password.is_empty() {
                error_message.set(Some("Please enter your email and password".to_string()));
                return;
            }

            let auth = auth.clone();
            let on_login = on_login.clone();
            let password_value = (*password).clone();
            let signing_in = signing_in.clone();
            let error_message = error_message.clone();

            spawn_local(async move {
                signing_in.set(true);
                error_message.set(None);

                match auth.sign_in(&email_value, &password_value).await {
                    Ok(session) => {
                        Logger::info_with_component("login", &format!("Signed in as {}", session.user.email));
                        on_login.emit(session);
                    }
                    Err(StoreError::Unauthorized) => {
                        error_message.set(Some("Invalid email or password".to_string()));
                    }
                    Err(e) => {
                        Logger::error_with_component("login", &format!("Sign-in failed: {}", e));
                        error_message.set(Some(format!("Sign-in failed: {}", e)));
                    }
                }

                signing_in.set(false);
            });
        })
    };

    html! {
        <div class="login-page">
            <form class="login-form" onsubmit={on_submit}>
                <h1>{"CredHex"}</h1>
                <p class="login-subtitle">{"Sign in to manage your certificates"}</p>

                {if let Some(error) = (*error_message).clone() {
                    html! { <div class="form-message error">{error}</div> }
                } else {
                    html! {}
                }}

                <div class="form-group">
                    <label for="login-email">{"Email"}</label>
                    <input
                        id="login-email"
                        type="email"
                        value={(*email).clone()}
                        oninput={on_email_change}
                        disabled={*signing_in}
                        autofocus=true
                    />
                </div>

                <div class="form-group">
                    <label for="login-password">{"Password"}</label>
                    <input
                        id="login-password"
                        type="password"
                        value={(*password).clone()}
                        oninput={on_password_change}
                        disabled={*signing_in}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={*signing_in}>
                    {if *signing_in { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
        </div>
    }
}
