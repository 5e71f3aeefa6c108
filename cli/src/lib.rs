pub mod convert;
pub mod listing;

pub use convert::{run_conversion, ConvertOptions, Summary};
