use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::AppRoute;
use crate::user_session::use_session;

#[function_component(NavigationBar)]
pub fn navigation_bar() -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let user = session.memoized_user();

    let on_sign_out = {
        let session = session.clone();
        Callback::from(move |event: MouseEvent| {
            event.prevent_default();
            log::info!("User logged out");
            session.purge();
            if let Some(navigator) = &navigator {
                navigator.push(&AppRoute::Login);
            }
        })
    };

    html! {
        <nav class="main-nav">
            <Link<AppRoute> classes={classes!("main-nav-logo")} to={AppRoute::Home}>
                <img class="main-nav-logo-image" src="/img/argentBankLogo.png" alt="Argent Bank Logo" />
                <h1 class="sr-only">{ "Argent Bank" }</h1>
            </Link<AppRoute>>
            <ul class="main-nav-items">
                if session.logged() {
                    <li class="main-nav-item">
                        <Link<AppRoute> to={AppRoute::Profile}>
                            <i class="fa fa-user-circle"></i>
                            { user.first_name.clone() }
                        </Link<AppRoute>>
                    </li>
                    <li class="main-nav-item">
                        <a href="/login" onclick={on_sign_out}>
                            <i class="fa fa-sign-out"></i>
                            { "Sign Out" }
                        </a>
                    </li>
                } else {
                    <li class="main-nav-item">
                        <Link<AppRoute> to={AppRoute::Login}>
                            <i class="fa fa-user-circle"></i>
                            { "Sign In" }
                        </Link<AppRoute>>
                    </li>
                }
            </ul>
        </nav>
    }
}
