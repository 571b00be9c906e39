//! A1-style cell addresses

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// A cell location, 0-based internally and rendered 1-based ("A1")
///
/// Absolute markers (`$`) are accepted on parse and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (0-based)
    pub row: u32,
    /// Column index (0-based, A=0, ..., XFD=16383)
    pub col: u16,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse an address such as `"B7"` or `"$B$7"`
    ///
    /// # Examples
    /// ```
    /// use xlsheet_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("$B$2").unwrap();
    /// assert_eq!((addr.row, addr.col), (1, 1));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidAddress(s.to_string());
        let rest = s.trim().trim_start_matches('$');

        let split = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (letters, digits) = rest.split_at(split);
        if letters.is_empty() {
            return Err(invalid());
        }
        let col = Self::letters_to_column(letters)?;

        let digits = digits.strip_prefix('$').unwrap_or(digits);
        let row: u32 = digits.parse().map_err(|_| invalid())?;
        if row == 0 || row > MAX_ROWS {
            return Err(invalid());
        }

        Ok(Self { row: row - 1, col })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u16) -> String {
        let mut letters = Vec::with_capacity(3);
        let mut n = col as u32 + 1;
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidAddress(letters.to_string()));
        }
        let col = letters.bytes().fold(0u32, |acc, b| {
            acc.saturating_mul(26) + (b.to_ascii_uppercase() - b'A' + 1) as u32
        });
        if col > MAX_COLS as u32 {
            return Err(Error::InvalidAddress(letters.to_string()));
        }
        Ok((col - 1) as u16)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        for (col, letters) in [(0, "A"), (25, "Z"), (26, "AA"), (701, "ZZ"), (16383, "XFD")] {
            assert_eq!(CellAddress::column_to_letters(col), letters);
            assert_eq!(CellAddress::letters_to_column(letters).unwrap(), col);
        }
        assert_eq!(CellAddress::letters_to_column("aa").unwrap(), 26);
    }

    #[test]
    fn test_parse() {
        assert_eq!(CellAddress::parse("A1").unwrap(), CellAddress::new(0, 0));
        assert_eq!(CellAddress::parse("$C$10").unwrap(), CellAddress::new(9, 2));
        assert_eq!(
            CellAddress::parse("XFD1048576").unwrap(),
            CellAddress::new(1_048_575, 16383)
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "A", "1", "A0", "A1048577", "XFE1", "A1B"] {
            assert!(CellAddress::parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(CellAddress::new(99, 2).to_string(), "C100");
        assert_eq!("B2".parse::<CellAddress>().unwrap().to_string(), "B2");
    }
}
