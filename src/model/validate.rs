//! Form Validation
//!
//! Field-level checks run before a form submits. Messages are shown inline
//! next to the offending field.

use super::{loan_math, BranchRules};

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Password strength check: length, upper, lower, digit, special.
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("Password must contain an uppercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err("Password must contain a lowercase letter".to_string());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err("Password must contain a digit".to_string());
    }
    if !password.chars().any(|c| !c.is_alphanumeric()) {
        return Err("Password must contain a special character".to_string());
    }
    Ok(())
}

/// Rough strength score for the registration meter, 0..=4
pub fn password_score(password: &str) -> u8 {
    let mut score = 0u8;
    if password.chars().count() >= MIN_PASSWORD_LEN {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
    {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 1;
    }
    score
}

/// Minimal email shape check; the backend does the real validation.
pub fn validate_email(email: &str) -> Result<(), String> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Enter a valid email address".to_string());
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err("Enter a valid email address".to_string());
    }
    Ok(())
}

/// Positive, finite monetary amount
pub fn validate_amount(amount: f64) -> Result<(), String> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("Enter an amount greater than zero".to_string());
    }
    Ok(())
}

/// A loan request must be positive and within the member's eligibility.
pub fn validate_loan_request(
    amount: f64,
    savings: f64,
    rules: &BranchRules,
) -> Result<(), String> {
    validate_amount(amount)?;
    let max = loan_math::max_loanable(savings, rules);
    if amount > max {
        return Err(format!(
            "Amount exceeds your eligible maximum of {}",
            super::format_amount(max)
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_accepts_strong() {
        assert!(validate_password("Str0ng!Pass").is_ok());
    }

    #[test]
    fn test_password_rejects_weak() {
        assert!(validate_password("weak").is_err());
        // long enough but no special character
        assert!(validate_password("Str0ngPass").is_err());
        // no digit
        assert!(validate_password("Strong!Pass").is_err());
        // no uppercase
        assert!(validate_password("str0ng!pass").is_err());
    }

    #[test]
    fn test_password_score() {
        assert_eq!(password_score("weak"), 0);
        assert_eq!(password_score("Str0ng!Pass"), 4);
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("ana@coop.example").is_ok());
        assert!(validate_email("ana").is_err());
        assert!(validate_email("ana@").is_err());
        assert!(validate_email("@coop.example").is_err());
        assert!(validate_email("ana@coop").is_err());
    }

    #[test]
    fn test_loan_request_within_eligibility() {
        let rules = BranchRules::default();
        // savings 1000 -> max 3000
        assert!(validate_loan_request(2500.0, 1000.0, &rules).is_ok());
        assert!(validate_loan_request(3500.0, 1000.0, &rules).is_err());
        assert!(validate_loan_request(-5.0, 1000.0, &rules).is_err());
    }
}
