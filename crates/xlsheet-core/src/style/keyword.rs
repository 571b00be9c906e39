//! Keyword tables for the closed vocabularies used in the styles part
//!
//! Each styling enum carries a `const` table of `(variant, keyword)` pairs. The
//! tables are plain statics, so both directions of the mapping are available
//! without any runtime initialisation.

use crate::error::{Error, Result};

/// A closed vocabulary mapped to and from markup keywords.
pub trait Keyword: Copy + PartialEq + 'static {
    /// Name of the vocabulary, used in error messages
    const VOCABULARY: &'static str;

    /// Every variant paired with its canonical keyword
    const TABLE: &'static [(Self, &'static str)];

    /// Whether parsing ignores ASCII case
    const CASE_INSENSITIVE: bool = true;

    /// The canonical markup keyword for this value
    fn as_keyword(self) -> &'static str {
        Self::TABLE
            .iter()
            .find(|(v, _)| *v == self)
            .map(|(_, k)| *k)
            .unwrap_or("")
    }

    /// Look up a keyword, failing with [`Error::UnknownEnumValue`] if it is not recognised
    fn from_keyword(s: &str) -> Result<Self> {
        Self::TABLE
            .iter()
            .find(|(_, k)| {
                if Self::CASE_INSENSITIVE {
                    k.eq_ignore_ascii_case(s)
                } else {
                    *k == s
                }
            })
            .map(|(v, _)| *v)
            .ok_or_else(|| Error::unknown_enum(Self::VOCABULARY, s))
    }
}
