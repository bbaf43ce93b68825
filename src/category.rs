//! Category identifiers and their presentation order.
//!
//! Category directories are named `<digits><suffix?>`, where the optional
//! suffix is a single word character:
//!
//! ```text
//! Categories/
//! ├── 2/        → number=2,   suffix=""
//! ├── 10/       → number=10,  suffix=""
//! ├── 12a/      → number=12,  suffix="a"
//! ├── 12b/      → number=12,  suffix="b"
//! └── 900/      → number=900, suffix=""   (special award)
//! ```
//!
//! Matching is loose: anything after the suffix character is ignored, so
//! `12a-aircraft` parses the same as `12a`. Stricter validation belongs in
//! [`parse_category`] alone; ordering and naming only see [`CategoryId`].
//!
//! ## Ordering
//!
//! Categories sort by number (numerically, so `2` precedes `10`), then by
//! suffix. The empty suffix sorts first: `5`, `5a`, `5b`, `6`.

use std::fmt;
use thiserror::Error;

/// Categories numbered at or above this are special awards by default.
pub const SPECIAL_AWARD_FROM: u32 = 900;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("category name has no leading number: {0:?}")]
    NoNumber(String),
    #[error("category number out of range: {0:?}")]
    OutOfRange(String),
}

/// A parsed category identifier.
///
/// Field order matters: the derived `Ord` compares `number` first, then
/// `suffix`, which is exactly the presentation order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryId {
    pub number: u32,
    /// Zero or one word character.
    pub suffix: String,
}

impl CategoryId {
    pub fn new(number: u32, suffix: impl Into<String>) -> Self {
        Self {
            number,
            suffix: suffix.into(),
        }
    }

    /// Whether this category is exempt from the low-entry check.
    pub fn is_special(&self, special_from: u32) -> bool {
        self.number >= special_from
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.suffix)
    }
}

impl std::str::FromStr for CategoryId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_category(s)
    }
}

/// Parse a category name: leading ASCII digits plus an optional single
/// word character. Trailing characters are ignored.
///
/// - `"12"` → number=12, suffix=""
/// - `"12a"` → number=12, suffix="a"
/// - `"12a-extra"` → number=12, suffix="a"
/// - `"12-extra"` → number=12, suffix=""
/// - `"a12"` → error
pub fn parse_category(name: &str) -> Result<CategoryId, ParseError> {
    let digits_end = name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len());
    if digits_end == 0 {
        return Err(ParseError::NoNumber(name.to_string()));
    }
    let number = name[..digits_end]
        .parse::<u32>()
        .map_err(|_| ParseError::OutOfRange(name.to_string()))?;

    let suffix = name[digits_end..]
        .chars()
        .next()
        .filter(|c| is_word_char(*c))
        .map(String::from)
        .unwrap_or_default();

    Ok(CategoryId { number, suffix })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether a raw directory name is a category candidate at all.
pub fn starts_with_digit(name: &str) -> bool {
    name.starts_with(|c: char| c.is_ascii_digit())
}
