//! Namespacing of configuration variables in fragment templates.
//!
//! Fragment markup references configuration values as bare names:
//!
//! ```text
//! ${displayStyle!"cards"}
//! [#if (showRatings)] ... [#elseif (showBadge)] ... [/#if]
//! ```
//!
//! The rendering engine resolves them against a `configuration` object, so
//! each listed variable must be written as `configuration.<name>`:
//!
//! ```text
//! ${configuration.displayStyle!"cards"}
//! [#if (configuration.showRatings)] ... [#elseif (configuration.showBadge)] ... [/#if]
//! ```
//!
//! The transform is pure text-in/text-out; file handling lives in
//! [`crate::fix`].

use regex::{Captures, Regex};
use std::borrow::Cow;
use thiserror::Error;

/// Namespace every listed variable is moved under.
pub const NAMESPACE: &str = "configuration";

/// `NAMESPACE` plus the member separator, as it appears in templates.
const NAMESPACE_PREFIX: &str = "configuration.";

#[derive(Debug, Error)]
pub enum PlaceholderError {
    #[error("`{0}` is not a valid template variable name")]
    InvalidVariable(String),

    #[error("failed to compile rewrite rule")]
    Regex(#[from] regex::Error),
}

/// Template variable names: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ============================================================================
// Rules
// ============================================================================

/// The three places a variable reference can appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleKind {
    /// `${name...}`
    Expression,
    /// `[#if (name...)`
    If,
    /// `[#elseif (name...)`
    ElseIf,
}

impl RuleKind {
    /// Application order for each variable.
    const ALL: [Self; 3] = [Self::Expression, Self::If, Self::ElseIf];

    /// Regex capturing the reference (name plus trailing default/operators)
    /// in group 1. The name must end on a word boundary so `showBadge`
    /// never matches inside `showBadgeText`.
    fn pattern(self, name: &str) -> String {
        let name = regex::escape(name);
        match self {
            Self::Expression => format!(r"\$\{{({name}\b[^}}]*)\}}"),
            Self::If => format!(r"\[#if\s*\(({name}\b[^)]*)\)"),
            Self::ElseIf => format!(r"\[#elseif\s*\(({name}\b[^)]*)\)"),
        }
    }

    const fn open(self) -> &'static str {
        match self {
            Self::Expression => "${",
            Self::If => "[#if (",
            Self::ElseIf => "[#elseif (",
        }
    }

    const fn close(self) -> &'static str {
        match self {
            Self::Expression => "}",
            Self::If | Self::ElseIf => ")",
        }
    }
}

/// One compiled (variable, kind) substitution.
#[derive(Debug)]
struct Rule {
    kind: RuleKind,
    regex: Regex,
}

impl Rule {
    fn new(kind: RuleKind, name: &str) -> Result<Self, PlaceholderError> {
        let regex = Regex::new(&kind.pattern(name))?;
        Ok(Self { kind, regex })
    }

    /// Returns `Cow::Borrowed` when nothing matched.
    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.regex.replace_all(text, |caps: &Captures| {
            let reference = &caps[1];
            // Already namespaced (only reachable for a variable literally
            // called `configuration`).
            if reference.starts_with(NAMESPACE_PREFIX) {
                return caps[0].to_string();
            }
            format!(
                "{}{NAMESPACE_PREFIX}{reference}{}",
                self.kind.open(),
                self.kind.close()
            )
        })
    }

    fn needs_rewrite(&self, text: &str) -> bool {
        self.regex
            .captures_iter(text)
            .any(|caps| !caps[1].starts_with(NAMESPACE_PREFIX))
    }
}

// ============================================================================
// Rewriter
// ============================================================================

/// Compiled rewrite rules for an ordered variable allow-list.
///
/// Rules run variable by variable, and for each variable in
/// [`RuleKind::ALL`] order, every rule scanning the output of the one
/// before it.
#[derive(Debug)]
pub struct Rewriter {
    rules: Vec<Rule>,
}

impl Rewriter {
    pub fn new<S: AsRef<str>>(variables: &[S]) -> Result<Self, PlaceholderError> {
        let mut rules = Vec::with_capacity(variables.len() * RuleKind::ALL.len());
        for name in variables {
            let name = name.as_ref();
            if !is_identifier(name) {
                return Err(PlaceholderError::InvalidVariable(name.to_string()));
            }
            for kind in RuleKind::ALL {
                rules.push(Rule::new(kind, name)?);
            }
        }
        Ok(Self { rules })
    }

    /// Rewrite all bare references to listed variables.
    ///
    /// The result may be `Owned` yet equal to the input; compare to detect
    /// changes.
    pub fn rewrite<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut text = Cow::Borrowed(text);
        for rule in &self.rules {
            let next = match rule.apply(&text) {
                Cow::Owned(next) => Some(next),
                Cow::Borrowed(_) => None,
            };
            if let Some(next) = next {
                text = Cow::Owned(next);
            }
        }
        text
    }

    /// Whether [`Self::rewrite`] would change `text`.
    pub fn needs_rewrite(&self, text: &str) -> bool {
        self.rules.iter().any(|rule| rule.needs_rewrite(text))
    }
}

// ============================================================================
// Tests
// ============================================================================
