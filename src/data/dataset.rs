//! Parsing of the tab-separated detector dataset.
//!
//! Format:
//! - one record per line, fields separated by a single TAB
//! - the first `inputs` fields are raw detector readings, divided by
//!   `scale_in` on parse
//! - the remaining `outputs` fields are the target vector, divided by
//!   `scale_out`
//! - a fixed number of records is read; anything after them is ignored

use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Number of input nodes of the detector network.
pub const INPUTS: usize = 8;
/// Number of output nodes (target classes).
pub const OUTPUTS: usize = 2;
pub const SCALE_IN: f64 = 1024.0;
pub const SCALE_OUT: f64 = 1.0;
/// Records in the training file.
pub const LEARNING_SIZE: usize = 110;
/// Records in the validation file.
pub const TEST_SIZE: usize = 40;
/// Seed of the generator that permutes the training set.
pub const SHUFFLE_SEED: u64 = 7777;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataFormat {
    pub inputs: usize,
    pub outputs: usize,
    pub scale_in: f64,
    pub scale_out: f64,
}

impl Default for DataFormat {
    fn default() -> Self {
        DataFormat {
            inputs: INPUTS,
            outputs: OUTPUTS,
            scale_in: SCALE_IN,
            scale_out: SCALE_OUT,
        }
    }
}

/// A scaled (input, target) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    samples: Vec<Sample>,
}

impl Dataset {
    pub fn new(samples: Vec<Sample>) -> Dataset {
        Dataset { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Permutes the samples in place (Fisher–Yates).
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.samples.shuffle(rng);
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Parses one record. `line_no` is 1-based and only used in errors.
pub fn parse_line(line: &str, line_no: usize, format: &DataFormat) -> Result<Sample> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let cells: Vec<&str> = line.split('\t').collect();

    let expected = format.inputs + format.outputs;
    if cells.len() != expected {
        return Err(Error::FieldCount {
            line: line_no,
            expected,
            found: cells.len(),
        });
    }

    let values = parse_floats(&cells, line_no)?;
    let (raw_input, raw_target) = values.split_at(format.inputs);

    Ok(Sample {
        input: raw_input.iter().map(|v| v / format.scale_in).collect(),
        target: raw_target.iter().map(|v| v / format.scale_out).collect(),
    })
}

/// Parses the first `expected_records` lines of `text`.
pub fn parse_dataset(text: &str, expected_records: usize, format: &DataFormat) -> Result<Dataset> {
    parse_records(text, expected_records, format, Path::new("<memory>"))
}

/// Reads and parses a dataset file.
pub fn load_dataset(
    path: impl AsRef<Path>,
    expected_records: usize,
    format: &DataFormat,
) -> Result<Dataset> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let dataset = parse_records(&text, expected_records, format, path)?;
    info!(path = %path.display(), records = dataset.len(), "dataset loaded");
    Ok(dataset)
}

fn parse_records(
    text: &str,
    expected_records: usize,
    format: &DataFormat,
    source: &Path,
) -> Result<Dataset> {
    let mut samples = Vec::with_capacity(expected_records);

    for (idx, line) in text.lines().take(expected_records).enumerate() {
        samples.push(parse_line(line, idx + 1, format)?);
    }

    if samples.len() < expected_records {
        return Err(Error::ShortDataset {
            path: source.to_path_buf(),
            expected: expected_records,
            found: samples.len(),
        });
    }

    let ignored = text.lines().count().saturating_sub(expected_records);
    if ignored > 0 {
        debug!(path = %source.display(), ignored, "trailing lines ignored");
    }

    Ok(Dataset::new(samples))
}

fn parse_floats(cells: &[&str], line_no: usize) -> Result<Vec<f64>> {
    cells
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            cell.trim().parse::<f64>().map_err(|_| Error::Parse {
                line: line_no,
                field: i + 1,
                value: cell.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::io::Write;
    use tempfile::tempdir;

    fn record(input: f64, class: usize) -> String {
        let mut fields = vec![input.to_string(); INPUTS];
        fields.push(if class == 0 { "1".into() } else { "0".into() });
        fields.push(if class == 1 { "1".into() } else { "0".into() });
        fields.join("\t")
    }

    #[test]
    fn test_input_scale_applied_once() {
        let sample = parse_line(&record(1024.0, 0), 1, &DataFormat::default()).unwrap();
        assert_eq!(sample.input, vec![1.0; INPUTS]);
        assert_eq!(sample.target, vec![1.0, 0.0]);
    }

    #[test]
    fn test_output_scale() {
        let format = DataFormat { scale_out: 2.0, ..DataFormat::default() };
        let sample = parse_line(&record(512.0, 1), 1, &format).unwrap();
        assert_relative_eq!(sample.input[0], 0.5);
        assert_eq!(sample.target, vec![0.0, 0.5]);
    }

    #[test]
    fn test_crlf_line_ending() {
        let line = format!("{}\r", record(2048.0, 1));
        let sample = parse_line(&line, 1, &DataFormat::default()).unwrap();
        assert_eq!(sample.input[7], 2.0);
        assert_eq!(sample.target, vec![0.0, 1.0]);
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_line("1\t2\t3", 4, &DataFormat::default()).unwrap_err();
        assert!(matches!(err, Error::FieldCount { line: 4, expected: 10, found: 3 }));
    }

    #[test]
    fn test_non_numeric_field() {
        let line = record(10.0, 0).replacen("10", "ten", 1);
        let err = parse_line(&line, 2, &DataFormat::default()).unwrap_err();
        match err {
            Error::Parse { line, field, value } => {
                assert_eq!((line, field), (2, 1));
                assert_eq!(value, "ten");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_short_dataset() {
        let text = [record(1.0, 0), record(2.0, 1)].join("\n");
        let err = parse_dataset(&text, 3, &DataFormat::default()).unwrap_err();
        assert!(matches!(err, Error::ShortDataset { expected: 3, found: 2, .. }));
    }

    #[test]
    fn test_extra_records_ignored() {
        let text = [record(1.0, 0), record(2.0, 1), record(3.0, 0)].join("\n") + "\n";
        let dataset = parse_dataset(&text, 2, &DataFormat::default()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_relative_eq!(dataset.get(1).unwrap().input[0], 2.0 / 1024.0);
    }

    #[test]
    fn test_shuffle_is_seeded_permutation() {
        let samples: Vec<Sample> = (0..20)
            .map(|i| Sample { input: vec![i as f64], target: vec![0.0] })
            .collect();
        let mut a = Dataset::new(samples.clone());
        let mut b = Dataset::new(samples);
        a.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));
        b.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));
        assert_eq!(a, b);

        let mut seen: Vec<f64> = a.iter().map(|s| s.input[0]).collect();
        seen.sort_by(|x, y| x.partial_cmp(y).unwrap());
        assert_eq!(seen, (0..20).map(|i| i as f64).collect::<Vec<_>>());
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset("/nonexistent/train.dat", 1, &DataFormat::default()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("train.dat");
        let mut file = std::fs::File::create(&path).unwrap();
        for i in 0..3 {
            writeln!(file, "{}", record(i as f64 * 1024.0, i % 2)).unwrap();
        }
        drop(file);

        let dataset = load_dataset(&path, 3, &DataFormat::default()).unwrap();
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.get(2).unwrap().input[0], 2.0);
    }
}
