use std::{fmt::Formatter, str::FromStr};

use thiserror::Error;

/// 1-indexed spreadsheet column. Displays as letters (A, B, ..., Z, AA, ...).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Column(u32);

impl Column {
    pub fn new(value: u32) -> Self {
        if value == 0 {
            panic!("Column number cannot be zero");
        }
        Column(value)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::ops::Add<u32> for Column {
    type Output = Column;

    fn add(self, rhs: u32) -> Self::Output {
        Column(
            self.0
                .checked_add(rhs)
                .expect("attempt to add with overflow"),
        )
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", number_to_letters(self.0))
    }
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Show both the numeric and letter representation
        write!(f, "Column(u32: {}, letters: {})", self.0, self)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnParseError {
    #[error("Non-alphabetic character in column")]
    NonAlphabeticCharacter,
    #[error("Empty column string")]
    Empty,
}

impl FromStr for Column {
    type Err = ColumnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_col(s)
    }
}

impl From<Column> for String {
    fn from(col: Column) -> Self {
        number_to_letters(col.0)
    }
}

pub fn parse_col<T: AsRef<str>>(col_str: T) -> Result<Column, ColumnParseError> {
    if col_str.as_ref().is_empty() {
        return Err(ColumnParseError::Empty);
    }
    if col_str.as_ref().chars().any(|c| !c.is_ascii_alphabetic()) {
        return Err(ColumnParseError::NonAlphabeticCharacter);
    }

    let col_num = col_str
        .as_ref()
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .fold(0, |acc, c| acc * 26 + (c as u32 - 'A' as u32 + 1));

    Ok(Column(col_num))
}

fn number_to_letters(number: u32) -> String {
    if number == 0 {
        panic!("Column number cannot be zero");
    }

    let mut number = number;
    let mut result = String::new();
    while number > 0 {
        let remainder = (number - 1) % 26;
        let letter = (remainder as u8 + b'A') as char;
        result.push(letter);
        number = (number - remainder) / 26;
    }
    result.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_display_a() {
        assert_eq!(Column::new(1).to_string(), "A");
    }

    #[test]
    fn test_column_display_z() {
        assert_eq!(Column::new(26).to_string(), "Z");
    }

    #[test]
    fn test_column_display_aa() {
        assert_eq!(Column::new(27).to_string(), "AA");
    }

    #[test]
    fn test_column_display_az() {
        assert_eq!(Column::new(52).to_string(), "AZ");
    }

    #[test]
    fn test_column_display_ba() {
        assert_eq!(Column::new(53).to_string(), "BA");
    }

    #[test]
    fn test_column_add_offset() {
        // Output rows span columns A..H; H is A + 7
        assert_eq!((Column::new(1) + 7).to_string(), "H");
    }

    #[test]
    fn test_parse_col_valid() {
        assert_eq!(parse_col("A").unwrap(), Column(1));
        assert_eq!(parse_col("a").unwrap(), Column(1));
        assert_eq!(parse_col("Z").unwrap(), Column(26));
        assert_eq!(parse_col("AA").unwrap(), Column(27));
        assert_eq!(parse_col("AB").unwrap(), Column(28));
        assert_eq!(parse_col("Zz").unwrap(), Column(26 * 26 + 26));
    }

    #[test]
    fn test_parse_col_invalid() {
        assert!(matches!(
            parse_col("A1"),
            Err(ColumnParseError::NonAlphabeticCharacter)
        ));
        assert!(matches!(
            parse_col("$"),
            Err(ColumnParseError::NonAlphabeticCharacter)
        ));
        assert!(matches!(parse_col(""), Err(ColumnParseError::Empty)));
    }

    #[test]
    fn test_column_from_str() {
        let col: Column = "AB".parse().unwrap();
        assert_eq!(col, Column(28));
    }

    #[test]
    #[should_panic(expected = "Column number cannot be zero")]
    fn test_column_zero_panics() {
        let _ = Column::new(0);
    }
}
