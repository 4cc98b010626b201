pub mod csv;

pub use csv::CsvSource;
