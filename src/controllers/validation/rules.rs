//! Rule constructors.
//!
//! A rule maps the current field value to an error message, or `None`
//! when the value is acceptable. Every rule except [`required`] accepts
//! empty input so optional fields can still carry format rules.

use std::sync::{Arc, OnceLock};

use regex::Regex;

use super::Rule;

fn rule(check: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Rule {
    Arc::new(check)
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

fn phone_regex() -> &'static Regex {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    PHONE_REGEX.get_or_init(|| {
        // 10 to 15 digits, optional leading +
        Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern is a valid regex")
    })
}

pub fn required() -> Rule {
    rule(|value| {
        if value.trim().is_empty() {
            Some("This field is required".to_string())
        } else {
            None
        }
    })
}

pub fn email() -> Rule {
    rule(|value| {
        if !value.is_empty() && !email_regex().is_match(value) {
            Some("Please enter a valid email address".to_string())
        } else {
            None
        }
    })
}

/// Minimum length in characters.
pub fn min_length(min: usize) -> Rule {
    rule(move |value| {
        if !value.is_empty() && value.chars().count() < min {
            Some(format!("Must be at least {} characters", min))
        } else {
            None
        }
    })
}

/// Maximum length in characters.
pub fn max_length(max: usize) -> Rule {
    rule(move |value| {
        if value.chars().count() > max {
            Some(format!("Must be no more than {} characters", max))
        } else {
            None
        }
    })
}

pub fn pattern(regex: Regex, message: impl Into<String>) -> Rule {
    let message = message.into();
    rule(move |value| {
        if !value.is_empty() && !regex.is_match(value) {
            Some(message.clone())
        } else {
            None
        }
    })
}

/// Phone number: whitespace is ignored, then 10-15 digits with an optional `+`.
pub fn phone() -> Rule {
    rule(|value| {
        let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if !compact.is_empty() && !phone_regex().is_match(&compact) {
            Some("Please enter a valid phone number".to_string())
        } else {
            None
        }
    })
}

/// Numeric lower bound. Input that is not a number fails.
pub fn min(min: f64) -> Rule {
    rule(move |value| match parse_number(value) {
        None => None,
        Some(Ok(n)) if n >= min => None,
        Some(Ok(_)) => Some(format!("Must be at least {}", min)),
        Some(Err(())) => Some("Must be a number".to_string()),
    })
}

/// Numeric upper bound. Input that is not a number fails.
pub fn max(max: f64) -> Rule {
    rule(move |value| match parse_number(value) {
        None => None,
        Some(Ok(n)) if n <= max => None,
        Some(Ok(_)) => Some(format!("Must be no more than {}", max)),
        Some(Err(())) => Some("Must be a number".to_string()),
    })
}

/// Keeps `inner`'s verdict but reports `message` instead of its text.
pub fn with_message(inner: Rule, message: impl Into<String>) -> Rule {
    let message = message.into();
    rule(move |value| inner(value).map(|_| message.clone()))
}

// None for empty input, otherwise the parse outcome.
fn parse_number(value: &str) -> Option<Result<f64, ()>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or(()),
    )
}
