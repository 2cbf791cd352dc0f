use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::personality::labeler::label_description;
use crate::personality::taxonomy::TraitCategory;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is empty")]
    Empty,

    #[error("Dataset has {0} records; at least 2 are needed for a train/test split")]
    TooSmall(usize),

    #[error("test_size must be strictly between 0 and 1, got {0}")]
    InvalidTestSize(f64),
}

/// Required columns; any others in the file are ignored.
#[derive(Debug, Deserialize)]
struct RawRecord {
    cv_text: String,
    trait_description: String,
}

/// One labelled row. `trait_category` is derived once, at load time.
#[derive(Debug, Clone)]
pub struct TrainingRecord {
    pub cv_text: String,
    pub trait_description: String,
    pub trait_category: TraitCategory,
}

impl TrainingRecord {
    pub fn new(cv_text: impl Into<String>, trait_description: impl Into<String>) -> Self {
        let trait_description = trait_description.into();
        let trait_category = label_description(&trait_description);
        Self {
            cv_text: cv_text.into(),
            trait_description,
            trait_category,
        }
    }
}

/// Row indices of the two partitions.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<TrainingRecord>,
}

impl Dataset {
    pub fn from_records(records: Vec<TrainingRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }
        Ok(Self { records })
    }

    /// Parses CSV with a header row containing `cv_text` and `trait_description`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(false).from_reader(reader);
        let mut records = Vec::new();
        for row in csv_reader.deserialize::<RawRecord>() {
            let raw = row?;
            records.push(TrainingRecord::new(raw.cv_text, raw.trait_description));
        }
        Self::from_records(records)
    }

    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path).map_err(csv::Error::from)?;
        let dataset = Self::from_reader(file)?;
        info!(
            "Loaded {} records from {}",
            dataset.len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn records(&self) -> &[TrainingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Record count per derived label, ordered by label.
    pub fn label_counts(&self) -> BTreeMap<TraitCategory, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.trait_category).or_insert(0) += 1;
        }
        counts
    }

    /// Shuffled split. The test partition gets `ceil(n * test_size)` rows and
    /// both partitions are guaranteed non-empty.
    pub fn split(&self, test_size: f64, seed: u64) -> Result<TrainTestSplit, DatasetError> {
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(DatasetError::InvalidTestSize(test_size));
        }
        let n = self.records.len();
        if n < 2 {
            return Err(DatasetError::TooSmall(n));
        }

        let n_test = ((n as f64 * test_size).ceil() as usize).clamp(1, n - 1);

        let mut indices: Vec<usize> = (0..n).collect();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        indices.shuffle(&mut rng);

        let train = indices.split_off(n_test);
        Ok(TrainTestSplit {
            train,
            test: indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
id,cv_text,trait_description
1,Led a team of five engineers,Very social and outgoing
2,Built a data pipeline,Organized and disciplined
3,Designed a new UI,Creative and curious
4,Volunteered at shelter,Empathy for others
5,Hiked the Alps,Enjoys nature
";

    #[test]
    fn test_from_reader_labels_records() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 5);
        let labels: Vec<_> = dataset.records().iter().map(|r| r.trait_category).collect();
        assert_eq!(
            labels,
            vec![
                TraitCategory::Extraversion,
                TraitCategory::Conscientiousness,
                TraitCategory::Openness,
                TraitCategory::Agreeableness,
                TraitCategory::WellRounded,
            ]
        );
        assert_eq!(dataset.records()[0].cv_text, "Led a team of five engineers");
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let csv = "cv_text,description\nfoo,bar\n";
        let err = Dataset::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::Csv(_)));
    }

    #[test]
    fn test_header_only_is_empty() {
        let csv = "cv_text,trait_description\n";
        assert!(matches!(
            Dataset::from_reader(csv.as_bytes()),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_ragged_row_is_an_error() {
        let csv = "cv_text,trait_description\nonly_one_field\n";
        assert!(Dataset::from_reader(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let dataset = Dataset::load(file.path()).unwrap();
        assert_eq!(dataset.len(), 5);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Dataset::load(&dir.path().join("nope.csv")).is_err());
    }

    #[test]
    fn test_split_sizes_and_disjointness() {
        let records = (0..10)
            .map(|i| TrainingRecord::new(format!("cv {i}"), "calm"))
            .collect();
        let dataset = Dataset::from_records(records).unwrap();
        let split = dataset.split(0.2, 42).unwrap();
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);

        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort();
        assert_eq!(all, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_reproducible_for_seed() {
        let records = (0..50)
            .map(|i| TrainingRecord::new(format!("cv {i}"), "calm"))
            .collect();
        let dataset = Dataset::from_records(records).unwrap();
        let a = dataset.split(0.2, 42).unwrap();
        let b = dataset.split(0.2, 42).unwrap();
        assert_eq!(a.train, b.train);
        assert_eq!(a.test, b.test);
        assert_eq!(a.test.len(), 10);
    }

    #[test]
    fn test_split_rounds_test_size_up() {
        let records = (0..7)
            .map(|i| TrainingRecord::new(format!("cv {i}"), "calm"))
            .collect();
        let dataset = Dataset::from_records(records).unwrap();
        // 7 * 0.2 = 1.4 -> 2
        assert_eq!(dataset.split(0.2, 1).unwrap().test.len(), 2);
    }

    #[test]
    fn test_split_rejects_tiny_dataset_and_bad_fraction() {
        let one = Dataset::from_records(vec![TrainingRecord::new("a", "b")]).unwrap();
        assert!(matches!(one.split(0.2, 42), Err(DatasetError::TooSmall(1))));

        let two = Dataset::from_records(vec![
            TrainingRecord::new("a", "b"),
            TrainingRecord::new("c", "d"),
        ])
        .unwrap();
        assert!(matches!(
            two.split(0.0, 42),
            Err(DatasetError::InvalidTestSize(_))
        ));
        assert!(matches!(
            two.split(1.0, 42),
            Err(DatasetError::InvalidTestSize(_))
        ));
        let split = two.split(0.5, 42).unwrap();
        assert_eq!((split.train.len(), split.test.len()), (1, 1));
    }

    #[test]
    fn test_label_counts() {
        let dataset = Dataset::from_reader(CSV.as_bytes()).unwrap();
        let counts = dataset.label_counts();
        assert_eq!(counts.get(&TraitCategory::Openness), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), 5);
    }
}
