pub mod csv_report;
