use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;

use components::dashboard::Dashboard;
use components::login_form::LoginForm;
use config::AppConfig;
use services::auth::{AuthClient, Session};
use services::logging::{self, Logger};

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| AppConfig::from_build_env());
    let auth = use_memo(config.clone(), |config| AuthClient::new(config));
    let session = use_state(|| Option::<Session>::None);

    let on_login = {
        let session = session.clone();
        Callback::from(move |signed_in: Session| session.set(Some(signed_in)))
    };

    let on_logout = {
        let session = session.clone();
        let auth = auth.clone();
        Callback::from(move |_| {
            let Some(current) = (*session).clone() else {
                return;
            };
            // The local session is dropped even if the backend call fails
            session.set(None);
            let auth = auth.clone();
            spawn_local(async move {
                match auth.sign_out(&current).await {
                    Ok(()) => Logger::info_with_component("app", "Signed out"),
                    Err(e) => Logger::warn_with_component("app", &format!("Sign-out request failed: {}", e)),
                }
            });
        })
    };

    match &*session {
        Some(current) => html! {
            <Dashboard
                key={current.user.id.clone()}
                session={current.clone()}
                config={(*config).clone()}
                {on_logout}
            />
        },
        None => html! {
            <LoginForm auth={(*auth).clone()} {on_login} />
        },
    }
}

fn main() {
    let config = AppConfig::from_build_env();
    logging::init(config.log_level);
    Logger::info_with_component("app", &format!("Starting CredHex against {}", config.supabase_url));
    yew::Renderer::<App>::new().render();
}
