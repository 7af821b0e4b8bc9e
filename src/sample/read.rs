use std::path::Path;

use csv::ReaderBuilder;
use nalgebra::DMatrix;
use thiserror::Error;

use super::Dataset;
use crate::BaggingError;

/// Failure to load a [`Dataset`] from disk.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// File could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV or a non-numeric field.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Header present but no records.
    #[error("CSV file contains no data records")]
    EmptyFile,

    /// No header matches the response name.
    #[error("response column `{0}` not found in CSV header")]
    MissingResponse(String),

    /// Parsed columns do not form a valid dataset.
    #[error(transparent)]
    Shape(#[from] BaggingError),
}

impl Dataset {
    /// Read a headered CSV of numeric columns.
    ///
    /// The `response` column becomes `y`; every other column becomes a predictor
    /// named after its header, in file order.
    pub fn read<P: AsRef<Path>>(path: P, response: &str) -> Result<Self, DatasetError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = rdr.headers()?.clone();
        let target = headers
            .iter()
            .position(|h| h == response)
            .ok_or_else(|| DatasetError::MissingResponse(response.to_string()))?;

        let mut rows: Vec<Vec<f64>> = Vec::new();
        for result in rdr.deserialize() {
            rows.push(result?);
        }

        if rows.is_empty() {
            return Err(DatasetError::EmptyFile);
        }

        let p = headers.len() - 1;
        let y: Vec<f64> = rows.iter().map(|row| row[target]).collect();
        let x = DMatrix::from_fn(rows.len(), p, |i, j| {
            let column = if j < target { j } else { j + 1 };
            rows[i][column]
        });
        let names = headers
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != target)
            .map(|(_, h)| h.to_string());

        Ok(Dataset::new(y, x)?.with_names(names)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_response_and_predictors() {
        let file = write_csv("wt, mpg, hp\n2.6, 21.0, 110\n2.9, 22.8, 93\n");
        let data = Dataset::read(file.path(), "mpg").unwrap();

        assert_eq!(data.response(), [21.0, 22.8]);
        assert_eq!(data.names(), ["wt", "hp"]);
        assert_eq!(data.design()[(1, 1)], 93.0);
        assert_eq!(data.design()[(0, 0)], 2.6);
    }

    #[test]
    fn missing_response_column() {
        let file = write_csv("a,b\n1,2\n");
        assert!(matches!(
            Dataset::read(file.path(), "y"),
            Err(DatasetError::MissingResponse(name)) if name == "y"
        ));
    }

    #[test]
    fn header_only_file_is_empty() {
        let file = write_csv("a,b\n");
        assert!(matches!(Dataset::read(file.path(), "a"), Err(DatasetError::EmptyFile)));
    }

    #[test]
    fn non_numeric_field_is_csv_error() {
        let file = write_csv("a,b\n1,oops\n");
        assert!(matches!(Dataset::read(file.path(), "a"), Err(DatasetError::Csv(_))));
    }

    #[test]
    fn temporary_file_is_removed_on_drop() {
        let file = write_csv("a,b\n1,2\n");
        let path = file.path().to_path_buf();
        assert!(Dataset::read(&path, "a").is_ok());
        drop(file);
        assert!(matches!(Dataset::read(&path, "a"), Err(DatasetError::Csv(_) | DatasetError::Io(_))));
    }
}
