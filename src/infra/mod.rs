// File adapters for reading sources and writing cleaned copies

pub mod csv_loader;
pub mod csv_writer;

pub use csv_loader::CsvLoader;
pub use csv_writer::CsvTableWriter;
