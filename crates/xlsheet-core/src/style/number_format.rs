//! Number format types

/// A number format: an id plus its format code
///
/// Ids below [`NumberFormat::FIRST_CUSTOM_ID`] address the builtin catalog;
/// everything at or above it is a custom format that must be registered in the
/// stylesheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumberFormat {
    id: u32,
    code: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::general()
    }
}

impl NumberFormat {
    /// First id available to custom formats
    pub const FIRST_CUSTOM_ID: u32 = 164;

    // Built-in format IDs
    /// 0 - General
    pub const ID_GENERAL: u32 = 0;
    /// 2 - 0.00
    pub const ID_NUMBER_DEC2: u32 = 2;
    /// 9 - 0%
    pub const ID_PERCENT_INT: u32 = 9;
    /// 14 - mm-dd-yy
    pub const ID_DATE_SHORT: u32 = 14;
    /// 22 - m/d/yy h:mm
    pub const ID_DATETIME: u32 = 22;
    /// 49 - @
    pub const ID_TEXT: u32 = 49;

    /// Create a number format with an explicit id
    pub fn new<S: Into<String>>(id: u32, code: S) -> Self {
        Self {
            id,
            code: code.into(),
        }
    }

    /// The General format (id 0)
    pub fn general() -> Self {
        Self::new(Self::ID_GENERAL, "General")
    }

    /// Look up a format in the builtin catalog
    ///
    /// Returns `None` for ids the catalog does not define, including every
    /// custom id.
    pub fn from_builtin_id(id: u32) -> Option<Self> {
        builtin_code(id).map(|code| Self::new(id, code))
    }

    /// Find the builtin id whose catalog code equals `code`
    pub fn builtin_id_for(code: &str) -> Option<u32> {
        BUILTIN_FORMATS
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(id, _)| *id)
    }

    /// Whether `id` falls in the range reserved for builtin formats
    pub fn is_reserved_id(id: u32) -> bool {
        id < Self::FIRST_CUSTOM_ID
    }

    /// The numeric id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The format code
    pub fn format_code(&self) -> &str {
        &self.code
    }

    /// Whether this is a builtin catalog entry (same id and code)
    pub fn is_builtin(&self) -> bool {
        builtin_code(self.id) == Some(self.code.as_str())
    }
}

/// The builtin catalog: ids and their invariant-locale format codes
const BUILTIN_FORMATS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mmss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

fn builtin_code(id: u32) -> Option<&'static str> {
    BUILTIN_FORMATS
        .iter()
        .find(|(i, _)| *i == id)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(
            NumberFormat::from_builtin_id(0).unwrap().format_code(),
            "General"
        );
        assert_eq!(
            NumberFormat::from_builtin_id(14).unwrap().format_code(),
            "mm-dd-yy"
        );
        assert_eq!(NumberFormat::from_builtin_id(49).unwrap().format_code(), "@");
        assert!(NumberFormat::from_builtin_id(30).is_none());
        assert!(NumberFormat::from_builtin_id(164).is_none());
    }

    #[test]
    fn test_builtin_id_for() {
        assert_eq!(NumberFormat::builtin_id_for("0.00%"), Some(10));
        assert_eq!(NumberFormat::builtin_id_for("0.000"), None);
    }

    #[test]
    fn test_is_builtin() {
        assert!(NumberFormat::general().is_builtin());
        assert!(!NumberFormat::new(2, "0.000").is_builtin());
        assert!(!NumberFormat::new(164, "0.000").is_builtin());
    }
}
