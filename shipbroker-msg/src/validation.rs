//! Rule checking shared by every request entity.
//!
//! Entities never fail on a broken rule. They report a list of
//! [`RuleViolation`] values that is recomputed from the current field values
//! on every call, so the list can be shown to a user as a whole. Composite
//! entities build their list with [`Rules`], which appends their own field
//! checks first and the flattened checks of owned sub-entities after.

use crate::wire::is_markup_char;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("Failed to compile EMAIL_REGEX")
});

static PLAIN_TEXT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N} ]*$").expect("Failed to compile PLAIN_TEXT_REGEX"));

/// One failed rule: the field it concerns and a description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleViolation {
    /// Wire name of the field, prefixed with the owner path for nested entities.
    pub field: String,
    /// Description of the failure.
    pub message: String,
}

impl RuleViolation {
    /// Create a new violation.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn prefixed(self, prefix: &str) -> Self {
        Self {
            field: format!("{}.{}", prefix, self.field),
            message: self.message,
        }
    }
}

impl fmt::Display for RuleViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trait for entities that check their own business rules.
pub trait Validate {
    /// All rule violations for the current field values, in field order.
    fn violations(&self) -> Vec<RuleViolation>;

    /// Whether [`violations`](Validate::violations) is empty.
    fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }
}

impl<T: Validate + ?Sized> Validate for &T {
    fn violations(&self) -> Vec<RuleViolation> {
        (**self).violations()
    }
}

/// Accumulator for rule checks.
///
/// Every check appends at most one violation. Checks on optional values are
/// skipped when the value is absent.
#[derive(Debug, Default)]
pub struct Rules {
    violations: Vec<RuleViolation>,
}

impl Rules {
    /// Start an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.violations.push(RuleViolation::new(field, message));
        }
        self
    }

    /// Text must not be blank.
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(!value.trim().is_empty(), field, "is required")
    }

    /// Text must not exceed `max` characters.
    pub fn max_len(&mut self, field: &str, value: &str, max: usize) -> &mut Self {
        let len = value.chars().count();
        self.check(
            len <= max,
            field,
            format!("must be at most {} characters long (was {})", max, len),
        )
    }

    /// Optional text must not exceed `max` characters.
    pub fn opt_max_len(&mut self, field: &str, value: Option<&str>, max: usize) -> &mut Self {
        match value {
            Some(value) => self.max_len(field, value, max),
            None => self,
        }
    }

    /// Optional text must be between `min` and `max` characters.
    pub fn opt_len_between(
        &mut self,
        field: &str,
        value: Option<&str>,
        min: usize,
        max: usize,
    ) -> &mut Self {
        let Some(value) = value else {
            return self;
        };
        let len = value.chars().count();
        self.check(
            (min..=max).contains(&len),
            field,
            format!(
                "must be between {} and {} characters long (was {})",
                min, max, len
            ),
        )
    }

    /// Text must only hold characters a markup document can carry.
    pub fn markup_text(&mut self, field: &str, value: &str) -> &mut Self {
        self.check(
            value.chars().all(is_markup_char),
            field,
            "contains characters not allowed in markup",
        )
    }

    /// Optional text must only hold characters a markup document can carry.
    pub fn opt_markup_text(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) => self.markup_text(field, value),
            None => self,
        }
    }

    /// Optional text must look like an email address.
    pub fn opt_email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) => self.check(
                EMAIL_REGEX.is_match(value),
                field,
                "must be a valid email address",
            ),
            None => self,
        }
    }

    /// Optional text may only hold letters, digits and spaces.
    pub fn opt_plain_text(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) => self.check(
                PLAIN_TEXT_REGEX.is_match(value),
                field,
                "may only contain letters, digits and spaces",
            ),
            None => self,
        }
    }

    /// Optional text must be an absolute http or https URL.
    pub fn opt_url(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        let Some(value) = value else {
            return self;
        };
        let ok = url::Url::parse(value)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        self.check(ok, field, "must be an absolute http or https URL")
    }

    /// Number must be finite and greater than zero.
    pub fn positive(&mut self, field: &str, value: f64) -> &mut Self {
        self.check(
            value.is_finite() && value > 0.0,
            field,
            "must be greater than zero",
        )
    }

    /// Optional number must be finite and greater than zero.
    pub fn opt_positive(&mut self, field: &str, value: Option<f64>) -> &mut Self {
        match value {
            Some(value) => self.positive(field, value),
            None => self,
        }
    }

    /// Number must be finite and not negative.
    pub fn non_negative(&mut self, field: &str, value: f64) -> &mut Self {
        self.check(
            value.is_finite() && value >= 0.0,
            field,
            "must not be negative",
        )
    }

    /// Optional number must be finite and not negative.
    pub fn opt_non_negative(&mut self, field: &str, value: Option<f64>) -> &mut Self {
        match value {
            Some(value) => self.non_negative(field, value),
            None => self,
        }
    }

    /// Integer must be at least `min`.
    pub fn at_least(&mut self, field: &str, value: u64, min: u64) -> &mut Self {
        self.check(value >= min, field, format!("must be at least {}", min))
    }

    /// Append the violations of an owned sub-entity under `field`.
    pub fn nested(&mut self, field: &str, entity: &impl Validate) -> &mut Self {
        self.violations.extend(
            entity
                .violations()
                .into_iter()
                .map(|violation| violation.prefixed(field)),
        );
        self
    }

    /// Append the violations of an optional sub-entity under `field`.
    pub fn nested_opt<V: Validate>(&mut self, field: &str, entity: Option<&V>) -> &mut Self {
        match entity {
            Some(entity) => self.nested(field, entity),
            None => self,
        }
    }

    /// Append the violations of every list element under `field[index]`.
    pub fn nested_all<V: Validate>(&mut self, field: &str, entities: &[V]) -> &mut Self {
        for (index, entity) in entities.iter().enumerate() {
            self.nested(&format!("{}[{}]", field, index), entity);
        }
        self
    }

    /// Append violations produced elsewhere, unchanged.
    pub fn extend(&mut self, violations: impl IntoIterator<Item = RuleViolation>) -> &mut Self {
        self.violations.extend(violations);
        self
    }

    /// The accumulated list.
    pub fn finish(&mut self) -> Vec<RuleViolation> {
        std::mem::take(&mut self.violations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Leaf {
        name: String,
    }

    impl Validate for Leaf {
        fn violations(&self) -> Vec<RuleViolation> {
            Rules::new()
                .required("name", &self.name)
                .max_len("name", &self.name, 4)
                .finish()
        }
    }

    #[test]
    fn test_required_and_length() {
        assert!(Leaf { name: "abcd".into() }.is_valid());
        assert_eq!(
            Leaf { name: "  ".into() }.violations(),
            vec![RuleViolation::new("name", "is required")]
        );
        let too_long = Leaf {
            name: "abcde".into(),
        }
        .violations();
        assert_eq!(too_long.len(), 1);
        assert_eq!(too_long[0].field, "name");
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        assert!(Leaf { name: "ěščř".into() }.is_valid());
    }

    #[test]
    fn test_nested_prefixes() {
        let leaves = vec![Leaf { name: "ok".into() }, Leaf { name: "".into() }];
        let violations = Rules::new()
            .nested("owner", &Leaf { name: "".into() })
            .nested_all("leaves", &leaves)
            .finish();
        assert_eq!(
            violations
                .iter()
                .map(|v| v.field.as_str())
                .collect::<Vec<_>>(),
            vec!["owner.name", "leaves[1].name"]
        );
    }

    #[test]
    fn test_markup_text() {
        let check = |value: &str| Rules::new().markup_text("name", value).finish();
        assert!(check("Mug\tfor \"Jerry\" & co.\r\n").is_empty());
        assert_eq!(
            check("Mug\u{1}\u{8}"),
            vec![RuleViolation::new(
                "name",
                "contains characters not allowed in markup"
            )]
        );
        assert!(!check("\u{C}").is_empty());
        assert!(Rules::new().opt_markup_text("name", None).finish().is_empty());
    }

    #[test]
    fn test_email() {
        let check = |value: &str| Rules::new().opt_email("email", Some(value)).finish();
        assert!(check("jan.novak@example.cz").is_empty());
        assert!(!check("jan.novak@example").is_empty());
        assert!(!check("jan novak@example.cz").is_empty());
        assert!(!check("@example.cz").is_empty());
        assert!(Rules::new().opt_email("email", None).finish().is_empty());
    }

    #[test]
    fn test_plain_text() {
        let check = |value: &str| Rules::new().opt_plain_text("ref", Some(value)).finish();
        assert!(check("Order 42 Žluťoučký kůň").is_empty());
        assert!(!check("Order #42").is_empty());
        assert!(!check("a-b").is_empty());
    }

    #[test]
    fn test_url() {
        let check = |value: &str| Rules::new().opt_url("url", Some(value)).finish();
        assert!(check("https://shop.example.cz/callback?id=1").is_empty());
        assert!(!check("ftp://example.cz").is_empty());
        assert!(!check("not a url").is_empty());
    }

    #[test]
    fn test_numbers() {
        assert!(Rules::new().positive("w", 0.0001).finish().is_empty());
        assert!(!Rules::new().positive("w", 0.0).finish().is_empty());
        assert!(!Rules::new().positive("w", f64::NAN).finish().is_empty());
        assert!(Rules::new().non_negative("p", 0.0).finish().is_empty());
        assert!(!Rules::new().non_negative("p", -0.01).finish().is_empty());
        assert!(Rules::new().non_negative("p", -0.0).finish().is_empty());
        assert!(!Rules::new().at_least("q", 0, 1).finish().is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            RuleViolation::new("to_address.postal_code", "is required").to_string(),
            "to_address.postal_code: is required"
        );
    }
}
