use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use error_stack::ResultExt;
use thiserror::Error;
use tracing::instrument;

use crate::config::report_config::ReportConfig;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to create the report directory")]
    CreateDirFailed,
    #[error("Failed to write the CSV report")]
    WriteFailed,
}

/// Local CSV mirror of the rows written to the Outputs tab. One file per run,
/// named `<unix-timestamp>-mapping-output.csv`.
pub struct CsvReport {
    output_dir: PathBuf,
}

impl CsvReport {
    pub fn new(config: &ReportConfig) -> Self {
        CsvReport {
            output_dir: PathBuf::from(&config.output_dir),
        }
    }

    #[instrument(skip(self, header, rows))]
    pub fn write(
        &self,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> error_stack::Result<PathBuf, ReportError> {
        fs::create_dir_all(&self.output_dir)
            .change_context(ReportError::CreateDirFailed)
            .attach_printable_lazy(|| format!("directory: {}", self.output_dir.display()))?;

        let path = self
            .output_dir
            .join(format!("{}-mapping-output.csv", Utc::now().timestamp()));
        write_csv(&path, header, rows)?;
        Ok(path)
    }
}

fn write_csv(
    path: &Path,
    header: &[&str],
    rows: &[Vec<String>],
) -> error_stack::Result<(), ReportError> {
    let mut writer = csv::Writer::from_path(path)
        .change_context(ReportError::WriteFailed)
        .attach_printable_lazy(|| format!("file: {}", path.display()))?;

    writer
        .write_record(header)
        .change_context(ReportError::WriteFailed)?;
    for row in rows {
        writer
            .write_record(row)
            .change_context(ReportError::WriteFailed)?;
    }
    writer.flush().change_context(ReportError::WriteFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_round_trip() {
        let dir = std::env::temp_dir().join(format!("kpm-report-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.csv");

        let header = ["Learning Objective", "Thinking"];
        let rows = vec![
            vec!["Identify theme".to_owned(), "some, reasoning".to_owned()],
            vec!["Cite evidence".to_owned(), "line\nbreak".to_owned()],
        ];
        write_csv(&path, &header, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(
            reader.headers().unwrap(),
            &csv::StringRecord::from(header.as_slice())
        );
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][1], "some, reasoning");
        assert_eq!(&records[1][1], "line\nbreak");

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_creates_directory_and_names_file() {
        let dir = std::env::temp_dir().join(format!("kpm-report-name-test-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);

        let report = CsvReport {
            output_dir: dir.clone(),
        };
        let path = report.write(&["A"], &[vec!["1".to_owned()]]).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with("-mapping-output.csv"));
        assert!(path.exists());

        fs::remove_dir_all(&dir).unwrap();
    }
}
