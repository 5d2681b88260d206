//! Textual Boolean literals.
//!
//! A literal is a variable name optionally prefixed with the negation marker `¬`.
//! Identity is purely textual: no validation is performed on the variable part,
//! so any token the formula splitter produces is a valid literal.

use std::fmt::{self, Display};
use std::ops::Neg;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Negation marker used in normalized literals.
pub const NEGATION: char = '¬';

lazy_static! {
    /// Matches a leading `NOT` keyword followed by whitespace (any case).
    static ref RE_LEADING_NOT: Regex = Regex::new(r"(?i)^NOT\s+").expect("RE_LEADING_NOT regex is valid");
}

/// A Boolean literal (variable or its negation), kept as text.
///
/// # Examples
///
/// ```
/// use clique_reduce::literal::Literal;
///
/// let a = Literal::positive("A");
/// let not_a = Literal::negative("A");
///
/// assert_eq!(-a.clone(), not_a);
/// assert_eq!(not_a.as_str(), "¬A");
/// assert!(a.is_complementary(&not_a));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Literal(String);

impl Literal {
    /// Creates a positive literal for the given variable name.
    pub fn positive(var: impl Into<String>) -> Self {
        Self(var.into())
    }

    /// Creates a negative literal for the given variable name.
    pub fn negative(var: impl AsRef<str>) -> Self {
        Self(format!("{}{}", NEGATION, var.as_ref()))
    }

    /// Parses a single literal token as typed by a user.
    ///
    /// The token is trimmed and a leading `NOT` keyword (case-insensitive, followed
    /// by whitespace) is rewritten into the `¬` prefix. Everything else is kept verbatim.
    ///
    /// The match is anchored at the start of the token: `NOT` appearing later in the
    /// token is left alone, so `"A NOT B"` stays `"A NOT B"` rather than becoming `"A ¬B"`.
    ///
    /// ```
    /// use clique_reduce::literal::Literal;
    ///
    /// assert_eq!(Literal::parse("  NOT A ").as_str(), "¬A");
    /// assert_eq!(Literal::parse("not b").as_str(), "¬b");
    /// assert_eq!(Literal::parse("C").as_str(), "C");
    /// assert_eq!(Literal::parse("A NOT B").as_str(), "A NOT B");
    /// ```
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        let text = RE_LEADING_NOT.replace(token, NEGATION.to_string().as_str());
        Self(text.into_owned())
    }

    /// Returns the literal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the variable name: the text with every negation marker removed.
    pub fn variable(&self) -> String {
        self.0.chars().filter(|&c| c != NEGATION).collect()
    }

    /// Returns true if the literal text starts with the negation marker.
    pub fn is_negated(&self) -> bool {
        self.0.starts_with(NEGATION)
    }

    /// Returns true if this is an empty literal (produced by blank clause segments).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if `self` and `other` name the same variable with opposite signs.
    pub fn is_complementary(&self, other: &Literal) -> bool {
        if self.variable() != other.variable() {
            return false;
        }
        self.is_negated() != other.is_negated()
    }

    /// Returns the negation of this literal.
    pub fn negate(&self) -> Self {
        match self.0.strip_prefix(NEGATION) {
            Some(rest) => Self(rest.to_string()),
            None => Self::negative(&self.0),
        }
    }
}

// -Literal
impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negate()
    }
}

impl From<&str> for Literal {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<Literal> for String {
    fn from(lit: Literal) -> Self {
        lit.0
    }
}

impl AsRef<str> for Literal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use test_log::test;

    #[test]
    fn test_literal_creation() {
        let pos = Literal::positive("A");
        assert!(!pos.is_negated());
        assert_eq!(pos.variable(), "A");

        let neg = Literal::negative("A");
        assert!(neg.is_negated());
        assert_eq!(neg.variable(), "A");
        assert_eq!(neg.to_string(), "¬A");
    }

    #[test]
    fn test_literal_negation() {
        let pos = Literal::positive("x1");
        let neg = -pos.clone();
        assert_eq!(neg.as_str(), "¬x1");
        assert_eq!(-neg, pos);
    }

    #[test]
    fn test_parse_not_variants() {
        for token in ["NOT A", "not A", "Not A", "nOt   A", "  NOT\tA  "] {
            assert_eq!(Literal::parse(token).as_str(), "¬A", "token = {:?}", token);
        }
    }

    #[test]
    fn test_parse_keeps_unknown_tokens_verbatim() {
        assert_eq!(Literal::parse("x_1").as_str(), "x_1");
        assert_eq!(Literal::parse("NOTE").as_str(), "NOTE");
        assert_eq!(Literal::parse("A NOT B").as_str(), "A NOT B");
        assert_eq!(Literal::parse("").as_str(), "");
        assert!(Literal::parse("   ").is_empty());
    }

    #[test]
    fn test_parse_only_rewrites_first_not() {
        assert_eq!(Literal::parse("NOT NOT A").as_str(), "¬NOT A");
    }

    #[test]
    fn test_complementary() {
        let a = Literal::positive("A");
        let not_a = Literal::negative("A");
        let b = Literal::positive("B");
        let not_b = Literal::negative("B");

        assert!(a.is_complementary(&not_a));
        assert!(not_a.is_complementary(&a));
        assert!(!a.is_complementary(&a));
        assert!(!not_a.is_complementary(&not_a));
        assert!(!a.is_complementary(&b));
        assert!(!a.is_complementary(&not_b));
    }

    #[test]
    fn test_complementary_ignores_repeated_markers() {
        let a = Literal::positive("A");
        let double = Literal::from("¬¬A");
        assert_eq!(double.variable(), "A");
        assert!(a.is_complementary(&double));
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&Literal::negative("A")).unwrap();
        assert_eq!(json, "\"¬A\"");
    }
}
