use yew::prelude::*;

#[function_component(Footer)]
pub fn footer() -> Html {
    html! {
        <footer class="footer">
            <p class="footer-text">{ "Copyright 2020 Argent Bank" }</p>
        </footer>
    }
}
