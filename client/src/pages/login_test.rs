use super::*;

#[test]
fn normalize_code_input_uppercases_letters() {
    assert_eq!(normalize_code_input("abc234"), "ABC234");
}

#[test]
fn validate_request_code_input_trims_and_requires_value() {
    assert_eq!(
        validate_request_code_input("  user@example.com  "),
        Ok("user@example.com".to_owned())
    );
    assert_eq!(validate_request_code_input("   "), Err("Enter an email first."));
}

#[test]
fn validate_verify_code_input_trims_and_requires_both_fields() {
    assert_eq!(
        validate_verify_code_input(" a@b.com ", " abc234 "),
        Ok(("a@b.com".to_owned(), "abc234".to_owned()))
    );
    assert_eq!(
        validate_verify_code_input("", "abc234"),
        Err("Enter both email and 6-char code.")
    );
    assert_eq!(
        validate_verify_code_input("a@b.com", "   "),
        Err("Enter both email and 6-char code.")
    );
}

#[test]
fn validate_verify_code_input_rejects_wrong_length() {
    assert_eq!(
        validate_verify_code_input("a@b.com", "ABC23"),
        Err("Enter both email and 6-char code.")
    );
    assert_eq!(
        validate_verify_code_input("a@b.com", "ABC2345"),
        Err("Enter both email and 6-char code.")
    );
}
