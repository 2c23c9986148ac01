//! Decision-tree ensemble classifier.
//!
//! A bagged forest of CART trees (gini impurity, majority vote). Training is
//! seedable so a given dataset always produces the same model. Callers treat
//! the trained forest as an opaque handle: `classify` maps a feature vector
//! to a label index, `label_name` resolves the index to a disease name.

use crate::dataset::LabeledRows;
use crate::error::{MiraError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        label: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

impl DecisionTree {
    fn predict(&self, features: &[f64]) -> usize {
        let mut at = 0;
        loop {
            match &self.nodes[at] {
                Node::Leaf { label } => return *label,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    at = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

struct TreeBuilder<'a> {
    features: &'a [Vec<f64>],
    labels: &'a [usize],
    num_labels: usize,
    num_features: usize,
    features_per_split: usize,
    max_depth: usize,
    nodes: Vec<Node>,
}

impl<'a> TreeBuilder<'a> {
    fn majority(&self, rows: &[usize]) -> usize {
        let mut counts = vec![0usize; self.num_labels];
        for &r in rows {
            counts[self.labels[r]] += 1;
        }
        let mut best = 0;
        for (label, &count) in counts.iter().enumerate() {
            if count > counts[best] {
                best = label;
            }
        }
        best
    }

    fn gini(&self, rows: &[usize]) -> f64 {
        if rows.is_empty() {
            return 0.0;
        }
        let mut counts = vec![0usize; self.num_labels];
        for &r in rows {
            counts[self.labels[r]] += 1;
        }
        let n = rows.len() as f64;
        1.0 - counts
            .iter()
            .map(|&c| {
                let p = c as f64 / n;
                p * p
            })
            .sum::<f64>()
    }

    fn is_pure(&self, rows: &[usize]) -> bool {
        rows.windows(2)
            .all(|w| self.labels[w[0]] == self.labels[w[1]])
    }

    /// Best (threshold, weighted child gini) for one feature, if it splits
    fn best_split_for_feature(&self, rows: &[usize], feature: usize) -> Option<(f64, f64)> {
        let mut values: Vec<f64> = rows.iter().map(|&r| self.features[r][feature]).collect();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        values.dedup();
        if values.len() < 2 {
            return None;
        }

        let mut best: Option<(f64, f64)> = None;
        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let (left, right): (Vec<usize>, Vec<usize>) = rows
                .iter()
                .copied()
                .partition(|&r| self.features[r][feature] <= threshold);
            if left.is_empty() || right.is_empty() {
                continue;
            }
            let n = rows.len() as f64;
            let weighted = self.gini(&left) * left.len() as f64 / n
                + self.gini(&right) * right.len() as f64 / n;
            if best.map(|(_, g)| weighted < g).unwrap_or(true) {
                best = Some((threshold, weighted));
            }
        }
        best
    }

    fn build(&mut self, rows: &[usize], depth: usize, rng: &mut StdRng) -> usize {
        if depth >= self.max_depth || rows.len() < 2 || self.is_pure(rows) {
            let label = self.majority(rows);
            self.nodes.push(Node::Leaf { label });
            return self.nodes.len() - 1;
        }

        let parent_gini = self.gini(rows);
        let candidates =
            rand::seq::index::sample(rng, self.num_features, self.features_per_split).into_vec();

        let mut best: Option<(usize, f64, f64)> = None;
        for feature in candidates {
            if let Some((threshold, weighted)) = self.best_split_for_feature(rows, feature) {
                if best.map(|(_, _, g)| weighted < g).unwrap_or(true) {
                    best = Some((feature, threshold, weighted));
                }
            }
        }

        let (feature, threshold, weighted) = match best {
            Some(b) => b,
            None => {
                let label = self.majority(rows);
                self.nodes.push(Node::Leaf { label });
                return self.nodes.len() - 1;
            }
        };

        // No impurity reduction: stop here
        if weighted >= parent_gini {
            let label = self.majority(rows);
            self.nodes.push(Node::Leaf { label });
            return self.nodes.len() - 1;
        }

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .iter()
            .copied()
            .partition(|&r| self.features[r][feature] <= threshold);

        // Reserve the split slot before building children
        self.nodes.push(Node::Leaf { label: 0 });
        let at = self.nodes.len() - 1;
        let left = self.build(&left_rows, depth + 1, rng);
        let right = self.build(&right_rows, depth + 1, rng);
        self.nodes[at] = Node::Split {
            feature,
            threshold,
            left,
            right,
        };
        at
    }
}

/// Trained forest: the opaque classifier handle
#[derive(Debug, Clone)]
pub struct Forest {
    trees: Vec<DecisionTree>,
    label_names: Vec<String>,
    num_features: usize,
}

impl Forest {
    /// Train a bagged ensemble from labeled rows
    pub fn train(rows: &LabeledRows, trees: usize, max_depth: usize, seed: u64) -> Result<Self> {
        if rows.features.is_empty() {
            return Err(MiraError::Classifier(
                "no training rows available".to_string(),
            ));
        }
        let num_features = rows.features[0].len();
        if num_features == 0 {
            return Err(MiraError::Classifier(
                "training rows have no features".to_string(),
            ));
        }
        if rows.features.iter().any(|f| f.len() != num_features) {
            return Err(MiraError::Classifier(
                "inconsistent feature widths in training rows".to_string(),
            ));
        }

        let features_per_split = ((num_features as f64).sqrt().ceil() as usize).max(1);
        let mut rng = StdRng::seed_from_u64(seed);
        let n = rows.features.len();

        let mut built = Vec::with_capacity(trees);
        for _ in 0..trees.max(1) {
            let sample: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
            let mut builder = TreeBuilder {
                features: &rows.features,
                labels: &rows.labels,
                num_labels: rows.label_names.len().max(1),
                num_features,
                features_per_split,
                max_depth,
                nodes: Vec::new(),
            };
            builder.build(&sample, 0, &mut rng);
            built.push(DecisionTree {
                nodes: builder.nodes,
            });
        }

        Ok(Self {
            trees: built,
            label_names: rows.label_names.clone(),
            num_features,
        })
    }

    /// Majority-vote prediction. Errors when the vector width does not match
    /// the trained feature count.
    pub fn classify(&self, features: &[f64]) -> Result<usize> {
        if features.len() != self.num_features {
            return Err(MiraError::Classifier(format!(
                "feature vector has {} slots, classifier expects {}",
                features.len(),
                self.num_features
            )));
        }

        let mut votes = vec![0usize; self.label_names.len().max(1)];
        for tree in &self.trees {
            let label = tree.predict(features);
            if label < votes.len() {
                votes[label] += 1;
            }
        }

        // Ties resolve to the lowest label index
        let mut best = 0;
        for (label, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = label;
            }
        }
        Ok(best)
    }

    /// Display name for a predicted label index
    pub fn label_name(&self, index: usize) -> Option<&str> {
        self.label_names.get(index).map(|s| s.as_str())
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::LabeledRows;

    fn rows(features: Vec<Vec<f64>>, labels: Vec<usize>, names: &[&str]) -> LabeledRows {
        LabeledRows {
            features,
            labels,
            label_names: names.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn predictions_stay_in_label_range() {
        let train = rows(
            vec![
                vec![0.0, 0.0],
                vec![1.0, 0.0],
                vec![0.0, 1.0],
                vec![1.0, 1.0],
            ],
            vec![0, 0, 1, 1],
            &["cold", "flu"],
        );
        let forest = Forest::train(&train, 10, 8, 7).expect("train");
        for f in &train.features {
            let p = forest.classify(f).expect("classify");
            assert!(p < 2);
        }
    }

    #[test]
    fn training_is_deterministic_for_a_seed() {
        let train = rows(
            vec![
                vec![0.0, 0.0, 1.0],
                vec![1.0, 0.0, 0.0],
                vec![0.0, 1.0, 1.0],
                vec![1.0, 1.0, 0.0],
                vec![1.0, 0.0, 1.0],
            ],
            vec![0, 1, 0, 1, 1],
            &["cold", "flu"],
        );
        let a = Forest::train(&train, 15, 8, 99).expect("train");
        let b = Forest::train(&train, 15, 8, 99).expect("train");
        for f in &train.features {
            assert_eq!(a.classify(f).unwrap(), b.classify(f).unwrap());
        }
    }

    #[test]
    fn separable_data_fits_perfectly() {
        let train = rows(
            vec![vec![0.0], vec![0.0], vec![1.0], vec![1.0]],
            vec![0, 0, 1, 1],
            &["cold", "flu"],
        );
        let forest = Forest::train(&train, 20, 8, 3).expect("train");
        assert_eq!(forest.classify(&[0.0]).unwrap(), 0);
        assert_eq!(forest.classify(&[1.0]).unwrap(), 1);
    }

    #[test]
    fn wrong_width_vector_is_an_error() {
        let train = rows(vec![vec![0.0, 1.0]], vec![0], &["cold"]);
        let forest = Forest::train(&train, 3, 8, 1).expect("train");
        assert!(forest.classify(&[1.0]).is_err());
        assert!(forest.classify(&[1.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn label_name_resolves_and_bounds_checks() {
        let train = rows(vec![vec![1.0]], vec![0], &["RareX"]);
        let forest = Forest::train(&train, 3, 8, 1).expect("train");
        assert_eq!(forest.label_name(0), Some("RareX"));
        assert_eq!(forest.label_name(5), None);
    }

    #[test]
    fn empty_training_set_is_rejected() {
        let train = rows(vec![], vec![], &[]);
        assert!(Forest::train(&train, 3, 8, 1).is_err());
    }
}
