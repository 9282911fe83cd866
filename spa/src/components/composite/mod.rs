pub mod account_summary;
pub mod footer;
pub mod login_form;
pub mod navigation_bar;
pub mod profile_form;
