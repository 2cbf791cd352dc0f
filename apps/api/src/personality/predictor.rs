use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::ml::forest::{ForestParams, RandomForest};
use crate::ml::tfidf::TfidfVectorizer;
use crate::personality::dataset::Dataset;
use crate::personality::taxonomy::TraitCategory;
use crate::personality::tips::improvement_tip;

#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    #[error("No dataset record is labelled '{0}'; cannot sample a description")]
    EmptyChoice(TraitCategory),
}

#[derive(Debug, Clone)]
pub struct TrainingParams {
    pub max_features: usize,
    pub n_trees: usize,
    pub test_size: f64,
    pub seed: u64,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            max_features: 500,
            n_trees: 200,
            test_size: 0.2,
            seed: 42,
        }
    }
}

/// Result of classifying one resume.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub category: TraitCategory,
    /// A dataset description sampled from records with the predicted label.
    pub description: String,
    pub tip: &'static str,
}

/// Startup metrics exposed on the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub records: usize,
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
    pub trees: usize,
    pub classes: Vec<TraitCategory>,
    pub holdout_accuracy: f64,
    pub trained_at: DateTime<Utc>,
}

/// Fitted vectorizer + forest, plus the dataset used to sample descriptions.
/// Built once at startup and shared read-only.
#[derive(Debug)]
pub struct TraitModel {
    dataset: Dataset,
    vectorizer: TfidfVectorizer,
    forest: RandomForest,
    /// Class index -> label, sorted.
    classes: Vec<TraitCategory>,
    summary: ModelSummary,
}

impl TraitModel {
    /// Splits the dataset, fits the vectorizer and forest on the training
    /// partition, then scores the held-out partition.
    pub fn train(dataset: Dataset, params: &TrainingParams) -> Result<Self> {
        let split = dataset
            .split(params.test_size, params.seed)
            .context("Failed to split dataset")?;
        let records = dataset.records();

        let train_texts: Vec<&str> = split.train.iter().map(|&i| records[i].cv_text.as_str()).collect();
        let train_labels: Vec<TraitCategory> =
            split.train.iter().map(|&i| records[i].trait_category).collect();

        let classes: Vec<TraitCategory> = train_labels
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let class_index = |c: TraitCategory| classes.binary_search(&c).ok();

        let vectorizer = TfidfVectorizer::fit(&train_texts, params.max_features);
        let train_rows = vectorizer.transform_many(&train_texts);
        let train_targets: Vec<usize> = train_labels
            .iter()
            .map(|&c| class_index(c).context("training label missing from class list"))
            .collect::<Result<_>>()?;

        info!(
            "Fitting random forest: {} trees, {} training rows, {} features, {} classes",
            params.n_trees,
            train_rows.len(),
            vectorizer.vocabulary_size(),
            classes.len()
        );
        let forest = RandomForest::fit(
            &train_rows,
            &train_targets,
            classes.len(),
            &ForestParams {
                n_trees: params.n_trees,
                seed: params.seed,
            },
        )
        .context("Failed to train random forest")?;

        let correct = split
            .test
            .iter()
            .filter(|&&i| {
                let predicted = forest.predict(&vectorizer.transform(&records[i].cv_text));
                classes[predicted] == records[i].trait_category
            })
            .count();
        let holdout_accuracy = correct as f64 / split.test.len() as f64;
        info!(
            "Held-out accuracy: {:.3} ({}/{})",
            holdout_accuracy,
            correct,
            split.test.len()
        );

        let summary = ModelSummary {
            records: dataset.len(),
            train_size: split.train.len(),
            test_size: split.test.len(),
            vocabulary_size: vectorizer.vocabulary_size(),
            trees: forest.n_trees(),
            classes: classes.clone(),
            holdout_accuracy,
            trained_at: Utc::now(),
        };

        Ok(Self {
            dataset,
            vectorizer,
            forest,
            classes,
            summary,
        })
    }

    pub fn summary(&self) -> &ModelSummary {
        &self.summary
    }

    pub fn classify(&self, cv_text: &str) -> TraitCategory {
        let row = self.vectorizer.transform(cv_text);
        self.classes[self.forest.predict(&row)]
    }

    /// Classifies `cv_text`, samples a matching description and looks up
    /// the improvement tip for the predicted label.
    pub fn predict<R: Rng + ?Sized>(
        &self,
        cv_text: &str,
        rng: &mut R,
    ) -> Result<Prediction, PredictError> {
        let category = self.classify(cv_text);

        let candidates: Vec<&str> = self
            .dataset
            .records()
            .iter()
            .filter(|r| r.trait_category == category)
            .map(|r| r.trait_description.as_str())
            .collect();
        let description = candidates
            .choose(rng)
            .ok_or(PredictError::EmptyChoice(category))?
            .to_string();

        let tip = improvement_tip(category.as_str());
        debug!(%category, candidates = candidates.len(), "Prediction complete");

        Ok(Prediction {
            category,
            description,
            tip,
        })
    }

    #[cfg(test)]
    pub(crate) fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.dataset = dataset;
        self
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::personality::dataset::TrainingRecord;

    /// Two well-separated groups: engineering CVs labelled conscientiousness,
    /// sales CVs labelled extraversion.
    pub(crate) fn fixture_dataset() -> Dataset {
        let mut records = Vec::new();
        for i in 0..20 {
            records.push(TrainingRecord::new(
                format!("backend engineer rust database migrations testing {i}"),
                format!("Very organized worker number {i}"),
            ));
            records.push(TrainingRecord::new(
                format!("sales manager clients networking events pitching {i}"),
                format!("Highly social person number {i}"),
            ));
        }
        Dataset::from_records(records).unwrap()
    }

    pub(crate) fn fixture_model() -> TraitModel {
        let params = TrainingParams {
            n_trees: 25,
            ..TrainingParams::default()
        };
        TraitModel::train(fixture_dataset(), &params).unwrap()
    }
}
