use std::io;

use ndarray::{Array2, ArrayView2, Axis};
use rand::{Rng, seq::SliceRandom};

use crate::{MlErr, Result};

const IRIS_CSV: &str = include_str!("../data/iris.csv");

/// An in-memory labelled dataset: a feature matrix with one sample per row, the class index of
/// every sample, and the names for both the feature columns and the classes.
///
/// Class indices are positions in `target_names`.
#[derive(Debug, Clone)]
pub struct Dataset {
    x: Array2<f64>,
    y: Vec<usize>,
    feature_names: Vec<String>,
    target_names: Vec<String>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, one row per sample.
    /// * `y` - The class index of every sample.
    /// * `feature_names` - The name of every column of `x`.
    /// * `target_names` - The name of every class.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the shapes don't agree or a label has no name.
    pub fn new(
        x: Array2<f64>,
        y: Vec<usize>,
        feature_names: Vec<String>,
        target_names: Vec<String>,
    ) -> Result<Self> {
        if x.nrows() == 0 {
            return Err(MlErr::EmptyDataset);
        }

        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if x.ncols() != feature_names.len() {
            return Err(MlErr::SizeMismatch {
                what: "feature names",
                got: feature_names.len(),
                expected: x.ncols(),
            });
        }

        if let Some(&class) = y.iter().find(|&&class| class >= target_names.len()) {
            return Err(MlErr::ClassOutOfRange {
                class,
                n_classes: target_names.len(),
            });
        }

        Ok(Self {
            x,
            y,
            feature_names,
            target_names,
        })
    }

    /// Loads the Iris flower dataset bundled with this crate.
    ///
    /// 150 samples, 4 features measured in centimeters and 3 classes with 50 samples each.
    pub fn iris() -> Result<Self> {
        Self::from_csv(IRIS_CSV.as_bytes())
    }

    /// Parses a dataset from CSV. The header names the columns, every column but the last one
    /// holds a real-valued feature and the last one holds the class label. Classes are indexed
    /// in order of first appearance.
    ///
    /// # Arguments
    /// * `reader` - The CSV source.
    ///
    /// # Returns
    /// The parsed dataset or an error pointing at the offending line.
    pub fn from_csv<R: io::Read>(reader: R) -> Result<Self> {
        let mut reader = csv::Reader::from_reader(reader);

        let headers = reader.headers().map_err(csv_err)?.clone();
        if headers.len() < 2 {
            return Err(MlErr::MalformedRecord {
                line: 1,
                reason: "expected at least one feature column and a label column".into(),
            });
        }

        let n_features = headers.len() - 1;
        let feature_names: Vec<String> =
            headers.iter().take(n_features).map(String::from).collect();
        let mut target_names: Vec<String> = Vec::new();
        let mut data = Vec::new();
        let mut y = Vec::new();

        for record in reader.records() {
            let record = record.map_err(csv_err)?;
            let line = record.position().map_or(0, |pos| pos.line());

            for field in record.iter().take(n_features) {
                let value = field
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| MlErr::MalformedRecord {
                        line,
                        reason: format!("{field:?} is not a number: {e}"),
                    })?;

                data.push(value);
            }

            let label = record[n_features].trim();
            let class = match target_names.iter().position(|name| name == label) {
                Some(class) => class,
                None => {
                    target_names.push(label.to_string());
                    target_names.len() - 1
                }
            };

            y.push(class);
        }

        let x = Array2::from_shape_vec((y.len(), n_features), data).map_err(|_| {
            MlErr::SizeMismatch {
                what: "feature matrix",
                got: y.len(),
                expected: n_features,
            }
        })?;

        Self::new(x, y, feature_names, target_names)
    }

    /// Shuffles the samples and partitions them in a train and a test dataset. The test
    /// partition takes `ceil(test_ratio * len)` samples.
    ///
    /// # Arguments
    /// * `test_ratio` - The fraction of samples that goes to the test partition, in (0, 1).
    /// * `rng` - The random source for the shuffle, seed it for a reproducible split.
    ///
    /// # Returns
    /// The `(train, test)` datasets or an error if either would be empty.
    pub fn split<R>(&self, test_ratio: f64, rng: &mut R) -> Result<(Dataset, Dataset)>
    where
        R: Rng + ?Sized,
    {
        let len = self.len();
        let invalid = MlErr::InvalidSplit { test_ratio, len };

        if !(test_ratio > 0.0 && test_ratio < 1.0) {
            return Err(invalid);
        }

        let n_test = (test_ratio * len as f64).ceil() as usize;
        if n_test == 0 || n_test >= len {
            return Err(invalid);
        }

        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(rng);
        let (test, train) = indices.split_at(n_test);

        Ok((self.select(train), self.select(test)))
    }

    /// Encodes the labels as a `len x n_classes` matrix with a single one per row.
    pub fn one_hot(&self) -> Array2<f64> {
        let mut y = Array2::zeros((self.len(), self.n_classes()));

        for (row, &class) in self.y.iter().enumerate() {
            y[[row, class]] = 1.0;
        }

        y
    }

    pub fn x(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn labels(&self) -> &[usize] {
        &self.y
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn target_names(&self) -> &[String] {
        &self.target_names
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.target_names.len()
    }

    fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: indices.iter().map(|&i| self.y[i]).collect(),
            feature_names: self.feature_names.clone(),
            target_names: self.target_names.clone(),
        }
    }
}

fn csv_err(e: csv::Error) -> MlErr {
    MlErr::MalformedRecord {
        line: e.position().map_or(0, |pos| pos.line()),
        reason: e.to_string(),
    }
}
