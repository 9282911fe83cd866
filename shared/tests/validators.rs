use shared::validators::{
    compose, required, valid_email, valid_name, valid_password, INVALID_EMAIL_MESSAGE,
    INVALID_NAME_MESSAGE, INVALID_PASSWORD_MESSAGE, REQUIRED_MESSAGE, Validator,
};
use shared::UserCredentials;

#[test]
fn test_valid_credentials_pass_every_check() {
    let pairs = [
        ("tony@stark.com", "password123"),
        ("steve.rogers@avengers.org", "shield2024x"),
        ("a@b.co", "abcd1234"),
    ];
    for (email, password) in pairs {
        assert_eq!(required(email), "");
        assert_eq!(required(password), "");
        assert_eq!(valid_email(email), "", "email={email}");
        assert_eq!(valid_password(password), "", "password={password}");
    }
}

#[test]
fn test_email_format() {
    assert_eq!(valid_email("not-an-email"), INVALID_EMAIL_MESSAGE);
    assert_eq!(valid_email("a@b.co"), "");
    assert_eq!(valid_email("first-last_1@mail.server.info"), "");
    // Top level domain is 2 to 4 characters long
    assert_eq!(valid_email("a@b.c"), INVALID_EMAIL_MESSAGE);
    assert_eq!(valid_email("a@b.museum"), INVALID_EMAIL_MESSAGE);
    assert_eq!(valid_email("a b@c.com"), INVALID_EMAIL_MESSAGE);
    assert_eq!(valid_email(""), INVALID_EMAIL_MESSAGE);
}

#[test]
fn test_password_format() {
    assert_eq!(valid_password("short"), INVALID_PASSWORD_MESSAGE);
    assert_eq!(valid_password("abcd1234"), "");
    // Needs a digit
    assert_eq!(valid_password("abcdefgh"), INVALID_PASSWORD_MESSAGE);
    // Needs a lowercase letter
    assert_eq!(valid_password("ABCD1234"), INVALID_PASSWORD_MESSAGE);
    assert_eq!(valid_password(&format!("a1{}", "x".repeat(30))), "");
    assert_eq!(
        valid_password(&format!("a1{}", "x".repeat(31))),
        INVALID_PASSWORD_MESSAGE
    );
}

#[test]
fn test_password_must_fit_on_one_line() {
    assert_eq!(valid_password("abcd1234\r"), INVALID_PASSWORD_MESSAGE);
    assert_eq!(valid_password("abcd\r1234"), INVALID_PASSWORD_MESSAGE);
    assert_eq!(valid_password("abcd\n1234"), INVALID_PASSWORD_MESSAGE);
    assert_eq!(valid_password("abcd\u{2028}1234"), INVALID_PASSWORD_MESSAGE);
    assert_eq!(valid_password("abcd\t1234"), "");
}

#[test]
fn test_password_length_counts_utf16_units() {
    // Each emoji is two UTF-16 units
    assert_eq!(valid_password(&format!("a1{}", "😀".repeat(15))), "");
    assert_eq!(
        valid_password(&format!("a1{}", "😀".repeat(16))),
        INVALID_PASSWORD_MESSAGE
    );
    assert_eq!(valid_password("a1é45678"), "");
}

#[test]
fn test_name_format() {
    assert_eq!(valid_name("Jane"), "");
    assert_eq!(valid_name("Doe"), "");
    assert_eq!(valid_name("Mary-Jo"), "");
    assert_eq!(valid_name("Mary Jo"), "");
    assert_eq!(valid_name("J"), INVALID_NAME_MESSAGE);
    assert_eq!(valid_name("R2D2"), INVALID_NAME_MESSAGE);
    assert_eq!(valid_name(""), INVALID_NAME_MESSAGE);
}

#[test]
fn test_compose_stops_at_first_failure() {
    let validators: [Validator; 2] = [required, valid_email];
    let email_field = compose(&validators);
    assert_eq!(email_field(""), REQUIRED_MESSAGE);
    assert_eq!(email_field("nope"), INVALID_EMAIL_MESSAGE);
    assert_eq!(email_field("tony@stark.com"), "");

    let none: [Validator; 0] = [];
    let nothing = compose(&none);
    assert_eq!(nothing("anything"), "");
}

#[test]
fn test_credentials_are_trimmed_and_validated() {
    let credentials = UserCredentials::new("  tony@stark.com ", " password123 ");
    assert_eq!(credentials.email, "tony@stark.com");
    assert!(credentials.validate().is_empty());

    let errors = UserCredentials::new("", "short").validate();
    assert_eq!(errors.email, REQUIRED_MESSAGE);
    assert_eq!(errors.password, INVALID_PASSWORD_MESSAGE);
}
