use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::composite::{footer::Footer, navigation_bar::NavigationBar};
use crate::router::{switch, AppRoute};
use crate::user_session::SessionProvider;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <SessionProvider>
            <BrowserRouter>
                <NavigationBar />
                <Switch<AppRoute> render={switch} />
                <Footer />
            </BrowserRouter>
        </SessionProvider>
    }
}
