use super::{
    a1_notation::{A1Notation, ToA1Notation},
    column::Column,
    row::Row,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    pub col: Column,
    pub row: Row,
}

impl CellPosition {
    /// Top-left cell of a sheet.
    pub fn origin() -> Self {
        CellPosition {
            col: Column::new(1),
            row: Row(1),
        }
    }

    pub fn offset(&self, rows: u32, cols: u32) -> Self {
        CellPosition {
            col: self.col + cols,
            row: self.row + rows,
        }
    }
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        match sheet_name {
            Some(sheet_name) => A1Notation(format!("'{}'!{}{}", sheet_name, self.col, self.row)),
            None => A1Notation(format!("{}{}", self.col, self.row)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_a1() {
        assert_eq!(CellPosition::origin().to_a1_notation(None).as_ref(), "A1");
    }

    #[test]
    fn test_to_a1_notation_with_sheet() {
        let pos = CellPosition {
            col: Column::new(4),
            row: Row(7),
        };
        assert_eq!(
            pos.to_a1_notation(Some("Outputs")).as_ref(),
            "'Outputs'!D7"
        );
    }

    #[test]
    fn test_offset() {
        let pos = CellPosition::origin().offset(2, 7);
        assert_eq!(pos.to_a1_notation(None).as_ref(), "H3");
    }
}
