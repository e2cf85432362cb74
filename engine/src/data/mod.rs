// Reading the procurement sheet and writing report files.
pub mod loader;
pub mod report_writer;
pub mod schema;
pub mod source_table;
