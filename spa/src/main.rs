mod api;
mod app;
mod components;
mod pages;
mod router;
mod user_session;

fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("Starting Argent Bank, api={}", api::API_BASE_URL);
    yew::Renderer::<app::App>::new().render();
}
