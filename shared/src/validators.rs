//! Form field validators.
//!
//! Every validator returns an empty string when the value is accepted and a
//! human readable message otherwise, so results can be rendered as-is.

use std::sync::LazyLock;

use regex::Regex;

pub type Validator = fn(&str) -> &'static str;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+@([A-Za-z0-9_-]+\.)+[A-Za-z0-9_-]{2,4}$")
        .expect("email regex is valid")
});

static SINGLE_LINE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\r\n\x{2028}\x{2029}]*$").expect("single line regex is valid")
});

static DIGIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("digit regex is valid"));

static LOWERCASE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]").expect("lowercase regex is valid"));

static NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z]+(?:([',. -][a-zA-Z ])?[a-zA-Z])$").expect("name regex is valid")
});

/// Checks applied to the login form fields.
pub const EMAIL_FIELD: &[Validator] = &[required, valid_email];
pub const PASSWORD_FIELD: &[Validator] = &[required, valid_password];

pub const REQUIRED_MESSAGE: &str = "Required";
pub const INVALID_EMAIL_MESSAGE: &str = "You must enter a valid email.";
pub const INVALID_PASSWORD_MESSAGE: &str = "You must enter a valid password.";
pub const INVALID_NAME_MESSAGE: &str = "You must enter a valid name.";

pub fn required(value: &str) -> &'static str {
    if value.is_empty() {
        REQUIRED_MESSAGE
    } else {
        ""
    }
}

pub fn valid_email(value: &str) -> &'static str {
    if EMAIL_REGEX.is_match(value) {
        ""
    } else {
        INVALID_EMAIL_MESSAGE
    }
}

/// At least one digit and one lowercase letter, 8 to 32 characters on a single
/// line. Length counts UTF-16 code units, as browsers do.
pub fn valid_password(value: &str) -> &'static str {
    let length = value.encode_utf16().count();
    let accepted = (8..=32).contains(&length)
        && SINGLE_LINE_REGEX.is_match(value)
        && DIGIT_REGEX.is_match(value)
        && LOWERCASE_REGEX.is_match(value);
    if accepted {
        ""
    } else {
        INVALID_PASSWORD_MESSAGE
    }
}

pub fn valid_name(value: &str) -> &'static str {
    if NAME_REGEX.is_match(value) {
        ""
    } else {
        INVALID_NAME_MESSAGE
    }
}

/// Chains validators left to right and stops at the first failure.
pub fn compose(validators: &[Validator]) -> impl Fn(&str) -> &'static str + '_ {
    move |value| {
        validators
            .iter()
            .map(|validator| validator(value))
            .find(|message| !message.is_empty())
            .unwrap_or("")
    }
}
