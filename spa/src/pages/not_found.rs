use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::AppRoute;

#[function_component(NotFound)]
pub fn not_found() -> Html {
    html! {
        <main class="main bg-dark">
            <section class="error-content">
                <h1>{ "Error 404" }</h1>
                <Link<AppRoute> to={AppRoute::Home}>{ "Back to the home page" }</Link<AppRoute>>
            </section>
        </main>
    }
}
