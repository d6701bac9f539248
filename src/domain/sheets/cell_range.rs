use super::{
    a1_notation::{A1Notation, ToA1Notation},
    cell_position::CellPosition,
};

/// Inclusive rectangular cell range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
}

impl CellRange {
    /// Range covering `rows` x `cols` cells with `start` as the top-left corner.
    pub fn spanning(start: CellPosition, rows: u32, cols: u32) -> Self {
        assert!(rows > 0 && cols > 0, "a cell range cannot be empty");
        CellRange {
            start,
            end: start.offset(rows - 1, cols - 1),
        }
    }

    pub fn row_count(&self) -> u32 {
        self.end.row.value() - self.start.row.value() + 1
    }

    pub fn column_count(&self) -> u32 {
        self.end.col.value() - self.start.col.value() + 1
    }
}

impl ToA1Notation for CellRange {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let start = self.start.to_a1_notation(None);
        let end = self.end.to_a1_notation(None);

        match sheet_name {
            Some(sheet_name) => A1Notation(format!(
                "'{}'!{}:{}",
                sheet_name.trim_start_matches('\'').trim_end_matches('\''),
                start,
                end
            )),
            None => A1Notation(format!("{}:{}", start, end)),
        }
    }
}
