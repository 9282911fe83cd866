use shared::client::DEFAULT_BASE_URL;

pub mod auth_api;

pub const API_BASE_URL: &str = match option_env!("API_BASE_URL") {
    Some(url) => url,
    None => DEFAULT_BASE_URL,
};
