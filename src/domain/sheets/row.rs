use std::{fmt::Formatter, num::ParseIntError, str::FromStr};

/// 1-indexed spreadsheet row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Row(pub u32);

impl Row {
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl std::ops::Add<u32> for Row {
    type Output = Row;

    fn add(self, rhs: u32) -> Self::Output {
        Row(self.0 + rhs)
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Row {
    fn from(value: u32) -> Self {
        Row(value)
    }
}

impl FromStr for Row {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Row(s.parse()?))
    }
}
