//! Random forest classifier over dense feature rows.
//!
//! Each tree is a fully grown CART tree (Gini impurity) trained on a bootstrap
//! resample. At every node `sqrt(n_features)` candidate features are examined;
//! features that are constant within the node do not count towards that
//! budget. Prediction is a majority vote, ties going to the lowest class.
//!
//! Trees are stored as flat node arrays with [`NO_CHILD`] sentinels.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use thiserror::Error;

pub type NodeId = u32;

/// Sentinel value for "no child" (leaf nodes).
pub const NO_CHILD: NodeId = u32::MAX;

const MIN_SAMPLES_SPLIT: usize = 2;

#[derive(Debug, Error, PartialEq)]
pub enum ForestError {
    #[error("Cannot train on an empty training set")]
    EmptyTrainingSet,

    #[error("Got {rows} feature rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("Label {label} is out of range for {n_classes} classes")]
    LabelOutOfRange { label: usize, n_classes: usize },

    #[error("Row {row} has {got} features, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },

    #[error("A forest needs at least one tree")]
    NoTrees,
}

#[derive(Debug, Clone)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 200,
            seed: 42,
        }
    }
}

#[derive(Clone, Debug)]
struct TreeNode {
    feature: u32,
    /// Rows with `value <= threshold` go left.
    threshold: f32,
    left: NodeId,
    right: NodeId,
    /// Majority class (only meaningful for leaves).
    class: u32,
    is_leaf: bool,
}

impl Default for TreeNode {
    fn default() -> Self {
        Self {
            feature: 0,
            threshold: 0.0,
            left: NO_CHILD,
            right: NO_CHILD,
            class: 0,
            is_leaf: true,
        }
    }
}

impl TreeNode {
    fn leaf(class: usize) -> Self {
        Self {
            class: class as u32,
            is_leaf: true,
            ..Default::default()
        }
    }

    fn split(feature: usize, threshold: f32, left: NodeId, right: NodeId) -> Self {
        Self {
            feature: feature as u32,
            threshold,
            left,
            right,
            is_leaf: false,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn predict(&self, row: &[f32]) -> usize {
        let mut node = &self.nodes[0];
        while !node.is_leaf {
            let value = row.get(node.feature as usize).copied().unwrap_or(0.0);
            let next = if value <= node.threshold {
                node.left
            } else {
                node.right
            };
            node = &self.nodes[next as usize];
        }
        node.class as usize
    }
}

struct Split {
    feature: usize,
    threshold: f32,
    impurity: f64,
}

struct TreeBuilder<'a> {
    rows: &'a [Vec<f32>],
    labels: &'a [usize],
    n_classes: usize,
    n_features: usize,
    max_features: usize,
}

impl TreeBuilder<'_> {
    fn build(&self, samples: Vec<usize>, rng: &mut Xoshiro256PlusPlus) -> DecisionTree {
        let mut nodes = vec![TreeNode::default()];
        let mut stack: Vec<(NodeId, Vec<usize>)> = vec![(0, samples)];

        while let Some((node_id, samples)) = stack.pop() {
            let counts = self.class_counts(&samples);
            let majority = argmax(&counts);
            let distinct = counts.iter().filter(|&&c| c > 0).count();

            if distinct <= 1 || samples.len() < MIN_SAMPLES_SPLIT {
                nodes[node_id as usize] = TreeNode::leaf(majority);
                continue;
            }

            let Some(split) = self.best_split(&samples, &counts, rng) else {
                nodes[node_id as usize] = TreeNode::leaf(majority);
                continue;
            };

            let (left, right): (Vec<usize>, Vec<usize>) = samples
                .iter()
                .partition(|&&i| self.rows[i][split.feature] <= split.threshold);

            let left_id = nodes.len() as NodeId;
            let right_id = left_id + 1;
            nodes.push(TreeNode::default());
            nodes.push(TreeNode::default());
            nodes[node_id as usize] =
                TreeNode::split(split.feature, split.threshold, left_id, right_id);

            stack.push((right_id, right));
            stack.push((left_id, left));
        }

        DecisionTree { nodes }
    }

    fn class_counts(&self, samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in samples {
            counts[self.labels[i]] += 1;
        }
        counts
    }

    fn best_split(
        &self,
        samples: &[usize],
        parent_counts: &[usize],
        rng: &mut Xoshiro256PlusPlus,
    ) -> Option<Split> {
        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(rng);

        let total = samples.len() as f64;
        let mut best: Option<Split> = None;
        let mut examined = 0;
        let mut column: Vec<(f32, usize)> = Vec::with_capacity(samples.len());

        for feature in features {
            if examined >= self.max_features {
                break;
            }
            if self.is_constant(samples, feature) {
                continue;
            }
            examined += 1;

            column.clear();
            column.extend(samples.iter().map(|&i| (self.rows[i][feature], self.labels[i])));
            column.sort_by(|a, b| a.0.total_cmp(&b.0));

            let mut left_counts = vec![0usize; self.n_classes];
            let mut right_counts = parent_counts.to_vec();

            for pos in 0..column.len() - 1 {
                let (value, label) = column[pos];
                left_counts[label] += 1;
                right_counts[label] -= 1;

                let next = column[pos + 1].0;
                if value == next {
                    continue;
                }

                let n_left = (pos + 1) as f64;
                let n_right = total - n_left;
                let impurity = (n_left * gini(&left_counts, n_left)
                    + n_right * gini(&right_counts, n_right))
                    / total;

                if best.as_ref().map_or(true, |b| impurity < b.impurity) {
                    let mut threshold = value / 2.0 + next / 2.0;
                    if threshold >= next {
                        threshold = value;
                    }
                    best = Some(Split {
                        feature,
                        threshold,
                        impurity,
                    });
                }
            }
        }

        best
    }

    fn is_constant(&self, samples: &[usize], feature: usize) -> bool {
        let first = self.rows[samples[0]][feature];
        samples.iter().all(|&i| self.rows[i][feature] == first)
    }
}

fn gini(counts: &[usize], total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Index of the largest count; the lowest index wins ties.
fn argmax(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    best
}

#[derive(Clone, Debug)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_classes: usize,
}

impl RandomForest {
    /// Trains `params.n_trees` trees. Labels are class indices in `0..n_classes`.
    pub fn fit(
        rows: &[Vec<f32>],
        labels: &[usize],
        n_classes: usize,
        params: &ForestParams,
    ) -> Result<Self, ForestError> {
        if params.n_trees == 0 {
            return Err(ForestError::NoTrees);
        }
        if rows.is_empty() {
            return Err(ForestError::EmptyTrainingSet);
        }
        if rows.len() != labels.len() {
            return Err(ForestError::LengthMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if let Some(&label) = labels.iter().find(|&&l| l >= n_classes) {
            return Err(ForestError::LabelOutOfRange { label, n_classes });
        }
        let n_features = rows[0].len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_features) {
            return Err(ForestError::RaggedRow {
                row,
                got: r.len(),
                expected: n_features,
            });
        }

        let builder = TreeBuilder {
            rows,
            labels,
            n_classes,
            n_features,
            max_features: ((n_features as f64).sqrt() as usize).max(1),
        };

        let n_samples = rows.len();
        let trees = (0..params.n_trees)
            .map(|t| {
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(params.seed.wrapping_add(t as u64));
                let bootstrap: Vec<usize> =
                    (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect();
                builder.build(bootstrap, &mut rng)
            })
            .collect();

        Ok(Self { trees, n_classes })
    }

    /// Majority vote across all trees.
    pub fn predict(&self, row: &[f32]) -> usize {
        let mut votes = vec![0usize; self.n_classes];
        for tree in &self.trees {
            votes[tree.predict(row)] += 1;
        }
        argmax(&votes)
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(n_trees: usize) -> ForestParams {
        ForestParams { n_trees, seed: 42 }
    }

    fn separable() -> (Vec<Vec<f32>>, Vec<usize>) {
        let rows = vec![
            vec![0.0],
            vec![0.1],
            vec![0.2],
            vec![0.15],
            vec![0.9],
            vec![1.0],
            vec![1.1],
            vec![0.95],
        ];
        let labels = vec![0, 0, 0, 0, 1, 1, 1, 1];
        (rows, labels)
    }

    #[test]
    fn test_learns_separable_threshold() {
        let (rows, labels) = separable();
        let forest = RandomForest::fit(&rows, &labels, 2, &params(25)).unwrap();
        assert_eq!(forest.n_trees(), 25);
        assert_eq!(forest.predict(&[0.05]), 0);
        assert_eq!(forest.predict(&[1.05]), 1);
    }

    #[test]
    fn test_learns_sparse_indicator_features() {
        // three classes, each marked by its own feature
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        for class in 0..3 {
            for _ in 0..6 {
                let mut row = vec![0.0; 5];
                row[class] = 1.0;
                rows.push(row);
                labels.push(class);
            }
        }
        let forest = RandomForest::fit(&rows, &labels, 3, &params(50)).unwrap();
        assert_eq!(forest.predict(&[1.0, 0.0, 0.0, 0.0, 0.0]), 0);
        assert_eq!(forest.predict(&[0.0, 1.0, 0.0, 0.0, 0.0]), 1);
        assert_eq!(forest.predict(&[0.0, 0.0, 1.0, 0.0, 0.0]), 2);
    }

    #[test]
    fn test_single_class_always_predicted() {
        let rows = vec![vec![0.0, 1.0], vec![1.0, 0.0], vec![0.5, 0.5]];
        let labels = vec![2, 2, 2];
        let forest = RandomForest::fit(&rows, &labels, 4, &params(10)).unwrap();
        assert_eq!(forest.predict(&[9.0, 9.0]), 2);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (rows, labels) = separable();
        let a = RandomForest::fit(&rows, &labels, 2, &params(15)).unwrap();
        let b = RandomForest::fit(&rows, &labels, 2, &params(15)).unwrap();
        for i in 0..=40 {
            let x = [i as f32 * 0.03];
            assert_eq!(a.predict(&x), b.predict(&x));
        }
    }

    #[test]
    fn test_constant_features_produce_leaf() {
        let rows = vec![vec![0.5, 0.5]; 4];
        let labels = vec![0, 1, 1, 0];
        let forest = RandomForest::fit(&rows, &labels, 2, &params(1)).unwrap();
        assert_eq!(forest.trees[0].nodes.len(), 1);
        assert!(forest.trees[0].nodes[0].is_leaf);
    }

    #[test]
    fn test_zero_feature_rows_are_accepted() {
        let rows = vec![vec![], vec![], vec![]];
        let labels = vec![1, 1, 0];
        let forest = RandomForest::fit(&rows, &labels, 2, &params(5)).unwrap();
        let prediction = forest.predict(&[]);
        assert!(prediction < 2);
    }

    #[test]
    fn test_input_validation() {
        assert_eq!(
            RandomForest::fit(&[], &[], 2, &params(1)).unwrap_err(),
            ForestError::EmptyTrainingSet
        );
        assert_eq!(
            RandomForest::fit(&[vec![1.0]], &[0, 1], 2, &params(1)).unwrap_err(),
            ForestError::LengthMismatch { rows: 1, labels: 2 }
        );
        assert_eq!(
            RandomForest::fit(&[vec![1.0]], &[3], 2, &params(1)).unwrap_err(),
            ForestError::LabelOutOfRange {
                label: 3,
                n_classes: 2
            }
        );
        assert_eq!(
            RandomForest::fit(&[vec![1.0], vec![1.0, 2.0]], &[0, 1], 2, &params(1)).unwrap_err(),
            ForestError::RaggedRow {
                row: 1,
                got: 2,
                expected: 1
            }
        );
        assert_eq!(
            RandomForest::fit(&[vec![1.0]], &[0], 1, &params(0)).unwrap_err(),
            ForestError::NoTrees
        );
    }

    #[test]
    fn test_gini_and_argmax() {
        assert_eq!(gini(&[4, 0], 4.0), 0.0);
        assert!((gini(&[2, 2], 4.0) - 0.5).abs() < 1e-12);
        assert_eq!(argmax(&[1, 3, 3]), 1);
        assert_eq!(argmax(&[0, 0]), 0);
    }
}
