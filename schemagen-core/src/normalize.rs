//! Pure normalization rules shared by every catalog dialect.
//!
//! - [`normalize_identifier`]: catalog identifier to upper-camel name
//! - [`normalize_default`]: catalog default expression to generation-ready literal
//! - [`TypeMap`]: immutable native-type to [`SemanticType`] lookup

use crate::models::{CatalogValue, DefaultValue, SemanticType};

/// Marker introducing a type cast in a default expression (`'x'::text`).
pub const CAST_SUFFIX_MARKER: &str = "::";

/// Converts a raw catalog identifier into a generation-friendly name.
///
/// Splits on whitespace, upper-cases the first character of each token and
/// joins the tokens with no separator. Underscores are not split.
///
/// # Example
/// ```rust
/// use schemagen_core::normalize::normalize_identifier;
///
/// assert_eq!(normalize_identifier("user name"), "UserName");
/// assert_eq!(normalize_identifier("user_name"), "User_name");
/// ```
pub fn normalize_identifier(raw: &str) -> String {
    raw.split_whitespace().map(capitalize_first).collect()
}

fn capitalize_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// How much of the default-literal rule a dialect applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRule {
    /// Strip a `::type` cast suffix, then trim and unescape quotes
    CastSuffix,
    /// Trim and unescape quotes only
    QuoteOnly,
}

/// Normalizes a catalog default into a [`DefaultValue`].
///
/// Textual defaults become double-quoted literals; every other catalog value
/// passes through untouched.
///
/// # Example
/// ```rust
/// use schemagen_core::models::{CatalogValue, DefaultValue};
/// use schemagen_core::normalize::{DefaultRule, normalize_default};
///
/// let raw = CatalogValue::Text("'active'::character varying".to_string());
/// assert_eq!(
///     normalize_default(raw, DefaultRule::CastSuffix),
///     DefaultValue::Literal("\"active\"".to_string())
/// );
/// ```
pub fn normalize_default(raw: CatalogValue, rule: DefaultRule) -> DefaultValue {
    match raw {
        CatalogValue::Text(text) => DefaultValue::Literal(normalize_default_text(&text, rule)),
        other => DefaultValue::Raw(other),
    }
}

/// Applies the textual default rule and returns the quoted literal.
pub fn normalize_default_text(text: &str, rule: DefaultRule) -> String {
    let expression = match rule {
        DefaultRule::CastSuffix => strip_cast_suffix(text),
        DefaultRule::QuoteOnly => text,
    };
    quote_literal(&unescape_quotes(trim_one_quote_layer(expression)))
}

/// Truncates at the first cast marker, if any.
pub fn strip_cast_suffix(text: &str) -> &str {
    text.find(CAST_SUFFIX_MARKER)
        .map_or(text, |position| &text[..position])
}

/// Removes at most one leading and one trailing single quote.
pub fn trim_one_quote_layer(text: &str) -> &str {
    let text = text.strip_prefix('\'').unwrap_or(text);
    text.strip_suffix('\'').unwrap_or(text)
}

/// Collapses SQL-escaped `''` into `'`.
pub fn unescape_quotes(text: &str) -> String {
    text.replace("''", "'")
}

/// Emits `text` as a double-quoted literal with `"`, `\` and control
/// characters escaped. Everything else, combining marks included, is kept
/// verbatim.
pub fn quote_literal(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            c if c.is_control() => quoted.extend(c.escape_default()),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Immutable lookup from a dialect's native type names to [`SemanticType`].
///
/// Exact entries are consulted first, then prefix entries in declaration
/// order. Anything unmatched is [`SemanticType::Unknown`].
#[derive(Debug, Clone, Copy)]
pub struct TypeMap {
    exact: &'static [(&'static str, SemanticType)],
    prefixes: &'static [(&'static str, SemanticType)],
}

impl TypeMap {
    /// Builds a map with exact entries only.
    pub const fn new(exact: &'static [(&'static str, SemanticType)]) -> Self {
        Self {
            exact,
            prefixes: &[],
        }
    }

    /// Adds prefix entries (e.g. `varchar(` for length-parameterized types).
    pub const fn with_prefixes(mut self, prefixes: &'static [(&'static str, SemanticType)]) -> Self {
        self.prefixes = prefixes;
        self
    }

    /// Classifies a native type name. Never fails.
    pub fn lookup(&self, native_type: &str) -> SemanticType {
        self.exact
            .iter()
            .find(|(name, _)| *name == native_type)
            .or_else(|| {
                self.prefixes
                    .iter()
                    .find(|(prefix, _)| native_type.starts_with(prefix))
            })
            .map_or(SemanticType::Unknown, |(_, semantic)| *semantic)
    }

    /// Exact entries, in declaration order.
    pub fn entries(&self) -> &'static [(&'static str, SemanticType)] {
        self.exact
    }
}
