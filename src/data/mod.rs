pub mod dataset;

pub use dataset::{load_dataset, parse_dataset, parse_line, DataFormat, Dataset, Sample};
