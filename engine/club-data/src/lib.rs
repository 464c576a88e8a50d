//! Club Data - week sources and report writers
//!
//! Reads a club's weekly CSV files into ordered weeks for the statistics
//! engine and writes the finished player and team reports back as CSV.

pub mod error;
pub mod layout;
pub mod reader;
pub mod writer;

pub use error::{DataError, Result};
pub use layout::ClubLayout;
pub use reader::CsvWeekSource;
pub use writer::{player_report_csv, team_table_csv, write_reports};
