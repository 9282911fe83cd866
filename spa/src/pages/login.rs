use shared::epoch::RequestEpoch;
use shared::guard::post_login_destination;
use shared::session::SessionCommand;
use shared::{LoginFieldErrors, UserCredentials};
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_hooks::prelude::*;
use yew_router::prelude::*;
use yew_router::prelude::use_location;

use crate::api::auth_api;
use crate::components::composite::login_form::LoginForm;
use crate::router::{AppRoute, RedirectFrom};
use crate::user_session::use_session;

#[function_component(Login)]
pub fn login() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let from = use_location()
        .and_then(|location| location.state::<RedirectFrom>())
        .map(|state| state.0);
    let server_errors = use_state(LoginFieldErrors::default);
    let epoch = use_memo((), |_| RequestEpoch::default());

    {
        let epoch = epoch.clone();
        use_unmount(move || epoch.invalidate());
    }

    let on_login_event = {
        let session = session.clone();
        let server_errors = server_errors.clone();
        Callback::from(move |credentials: UserCredentials| {
            let session = session.clone();
            let navigator = navigator.clone();
            let server_errors = server_errors.clone();
            let ticket = epoch.begin();
            spawn_local(async move {
                let result = match auth_api::auth_client() {
                    Ok(client) => client.login(&credentials).await,
                    Err(error) => Err(error),
                };
                if !ticket.is_current() {
                    log::debug!("Dropping superseded login response, generation={}", ticket.generation());
                    return;
                }
                match result {
                    Ok(token) => {
                        log::info!("User login successful, email={}", credentials.email);
                        server_errors.set(LoginFieldErrors::default());
                        session.dispatch(SessionCommand::SetToken(token));
                        if let Some(navigator) = navigator {
                            navigator.push(&AppRoute::from(post_login_destination(from)));
                        }
                    }
                    Err(error) => {
                        let mut errors = (*server_errors).clone();
                        if errors.apply_login_error(&error) {
                            server_errors.set(errors);
                        }
                    }
                }
            });
        })
    };

    let on_toggle_remember = {
        let session = session.clone();
        Callback::from(move |_: bool| session.dispatch(SessionCommand::ToggleCheck))
    };

    html! {
        <main class="main bg-dark">
            <section class="sign-in-content">
                <i class="fa fa-user-circle sign-in-icon"></i>
                <h1>{ "Sign In" }</h1>
                <LoginForm
                    on_login={on_login_event}
                    server_errors={(*server_errors).clone()}
                    remember={session.session().persist_is_checked}
                    on_toggle_remember={on_toggle_remember} />
            </section>
        </main>
    }
}
