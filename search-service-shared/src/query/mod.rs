//! Free-text query sanitization.
//!
//! Raw caller input is turned into a `to_tsquery` expression with
//! any-token-matches semantics: tokens are split on whitespace, stripped to
//! their alphanumeric characters and OR-joined, so `"agenda items"` becomes
//! `"agenda | items"`. Stripping removes every tsquery operator and quote
//! character, which means the produced expression cannot change meaning no
//! matter what the caller sends. The store additionally binds the expression
//! as a statement parameter; it is never spliced into SQL text.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A sanitized, OR-joined expression safe to hand to `to_tsquery`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchExpression(String);

impl SearchExpression {
    /// The expression text, e.g. `"agenda | items"`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rejection raised when no searchable expression can be built from the
/// caller's input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryRejected {
    /// The input contained no searchable terms after sanitization.
    #[error("query contains no searchable terms")]
    NoSearchableTerms,
}

/// Sanitize raw free text into a search expression.
///
/// Splits on whitespace, keeps only alphanumeric characters within each
/// token (Unicode-aware, so accented and non-Latin words survive), drops
/// tokens that end up empty and joins the rest with `" | "`. Input without
/// any surviving token is rejected.
pub fn sanitize(raw: &str) -> Result<SearchExpression, QueryRejected> {
    let terms: Vec<String> = raw
        .split_whitespace()
        .map(|token| token.chars().filter(|c| c.is_alphanumeric()).collect())
        .filter(|term: &String| !term.is_empty())
        .collect();

    if terms.is_empty() {
        return Err(QueryRejected::NoSearchableTerms);
    }
    Ok(SearchExpression(terms.join(" | ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_tokens_with_or() {
        assert_eq!(sanitize("hello world").unwrap().as_str(), "hello | world");
    }

    #[test]
    fn single_token_stays_bare() {
        assert_eq!(sanitize("agenda").unwrap().as_str(), "agenda");
    }

    #[test]
    fn collapses_repeated_whitespace() {
        assert_eq!(
            sanitize("  agenda \t items \n").unwrap().as_str(),
            "agenda | items"
        );
    }

    #[test]
    fn strips_tsquery_metacharacters() {
        assert_eq!(
            sanitize("a|b c&d !e (f) g:h i'j").unwrap().as_str(),
            "ab | cd | e | f | gh | ij"
        );
    }

    #[test]
    fn neutralizes_injection_attempts() {
        let expression = sanitize("\"); drop table models; --").unwrap();
        assert_eq!(expression.as_str(), "drop | table | models");
    }

    #[test]
    fn keeps_unicode_words() {
        assert_eq!(
            sanitize("Tagesordnung Anträge").unwrap().as_str(),
            "Tagesordnung | Anträge"
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(sanitize(""), Err(QueryRejected::NoSearchableTerms));
    }

    #[test]
    fn rejects_whitespace_only_input() {
        assert_eq!(sanitize("   \t \n "), Err(QueryRejected::NoSearchableTerms));
    }

    #[test]
    fn rejects_punctuation_only_input() {
        assert_eq!(sanitize("()| & !! --"), Err(QueryRejected::NoSearchableTerms));
    }
}
