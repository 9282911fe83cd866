use shared::guard::{self, Navigation, Route};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::{home::Home, login::Login, not_found::NotFound, profile::Profile};
use crate::user_session::use_session;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum AppRoute {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/profile")]
    Profile,
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl From<&AppRoute> for Route {
    fn from(value: &AppRoute) -> Self {
        match value {
            AppRoute::Home => Route::Home,
            AppRoute::Login => Route::Login,
            AppRoute::Profile => Route::Profile,
            AppRoute::NotFound => Route::NotFound,
        }
    }
}

impl From<Route> for AppRoute {
    fn from(value: Route) -> Self {
        match value {
            Route::Home => AppRoute::Home,
            Route::Login => AppRoute::Login,
            Route::Profile => AppRoute::Profile,
            Route::NotFound => AppRoute::NotFound,
        }
    }
}

/// History state left by a guard redirect: the route originally requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedirectFrom(pub Route);

pub fn switch(route: AppRoute) -> Html {
    match route {
        AppRoute::Home => html! { <Home /> },
        AppRoute::Login => html! {
            <Guarded route={AppRoute::Login}><Login /></Guarded>
        },
        AppRoute::Profile => html! {
            <Guarded route={AppRoute::Profile}><Profile /></Guarded>
        },
        AppRoute::NotFound => html! { <NotFound /> },
    }
}

#[derive(PartialEq, Properties)]
pub struct GuardedProps {
    pub route: AppRoute,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(Guarded)]
fn guarded(props: &GuardedProps) -> Html {
    let session = use_session();
    let navigator = use_navigator();
    let navigation = guard::navigate(session.session(), Route::from(&props.route));

    use_effect_with(navigation, move |navigation| {
        if let (Navigation::Redirect { to, from }, Some(navigator)) = (navigation, navigator) {
            log::info!("Navigation redirected, to={to:?}, from={from:?}");
            let to = AppRoute::from(*to);
            match from {
                Some(from) => navigator.replace_with_state(&to, RedirectFrom(*from)),
                None => navigator.replace(&to),
            }
        }
        || ()
    });

    match navigation {
        Navigation::Permit => props.children.clone(),
        Navigation::Redirect { .. } => html! {},
    }
}
