use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::SvmConfig;
use crate::error::SvmError;
use crate::math::Array2;

/// Multiclass linear SVM (Crammer-Singer formulation).
///
/// Holds a dense C x F weight matrix (one row per class), a single bias
/// shared by all classes, and the class-name-to-index mapping. Training runs
/// stochastic sub-gradient descent on the multiclass hinge loss with L2
/// weight decay; prediction picks the class with the highest linear score.
#[derive(Debug)]
pub struct LinearSvm {
    weights: Array2<f64>,
    bias: f64,
    classes: Vec<String>,
    class_index: HashMap<String, usize>,
    feature_dim: usize,
    config: SvmConfig,
}

/// Outcome of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    /// Number of epochs actually executed (<= the configured budget).
    pub epochs_run: usize,
    /// Average hinge loss of the last completed epoch. NaN when the
    /// training set was empty.
    pub final_loss: f64,
    /// Whether the loss change dropped below the tolerance before the
    /// epoch budget ran out.
    pub converged: bool,
}

impl LinearSvm {
    /// Create a classifier for the given class names and feature dimension.
    ///
    /// Weights and bias start at zero; `train` re-randomizes the weights.
    /// Duplicate class names are accepted, with the later occurrence owning
    /// the label mapping (labels resolve to the highest index carrying that
    /// name).
    pub fn new(
        classes: Vec<String>,
        feature_dim: usize,
        config: SvmConfig,
    ) -> Result<Self, SvmError> {
        if classes.is_empty() {
            return Err(SvmError::EmptyClassList);
        }
        if feature_dim == 0 {
            return Err(SvmError::ZeroFeatureDim);
        }

        let mut class_index = HashMap::with_capacity(classes.len());
        for (i, class) in classes.iter().enumerate() {
            class_index.insert(class.clone(), i);
        }

        Ok(LinearSvm {
            weights: Array2::zeros(classes.len(), feature_dim),
            bias: 0.0,
            classes,
            class_index,
            feature_dim,
            config,
        })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn feature_dim(&self) -> usize {
        self.feature_dim
    }

    pub fn config(&self) -> &SvmConfig {
        &self.config
    }

    /// Learned weight matrix, one row per class.
    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    /// Shared bias term.
    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Linear score of `x` for class `c`: `bias + w_c . x`.
    fn score(&self, x: &[f64], class: usize) -> f64 {
        let mut score = self.bias;
        for f in 0..self.feature_dim {
            score += self.weights[(class, f)] * x[f];
        }
        score
    }

    /// Train on labeled data, drawing the initial weights from an
    /// entropy-seeded RNG. See [`LinearSvm::train_with_rng`].
    pub fn train(&mut self, x: &Array2<f64>, y: &[&str]) -> Result<TrainReport, SvmError> {
        self.train_with_rng(x, y, &mut StdRng::from_entropy())
    }

    /// Train on labeled data with a caller-supplied RNG for the weight
    /// initialization, so runs can be reproduced from a fixed seed.
    ///
    /// Every weight is re-drawn uniformly from [-0.01, 0.01] before the
    /// first epoch; the bias keeps its current value. Samples are visited in
    /// input order on every epoch, with no shuffling, so the full trajectory
    /// is a function of the seed and the data. Training stops once the
    /// change in average epoch loss falls below the tolerance, or when the
    /// epoch budget is exhausted.
    ///
    /// An empty training set is not rejected: the per-epoch loss average
    /// becomes NaN, the convergence check never fires, and the full epoch
    /// budget runs with no weight updates.
    pub fn train_with_rng(
        &mut self,
        x: &Array2<f64>,
        y: &[&str],
        rng: &mut impl Rng,
    ) -> Result<TrainReport, SvmError> {
        let y_numeric = self.check_training_inputs(x, y)?;

        for w in self.weights.as_mut_slice().iter_mut() {
            *w = 0.01 * (2.0 * rng.gen::<f64>() - 1.0);
        }

        let n = x.nrows();
        let mut report = TrainReport {
            epochs_run: 0,
            final_loss: f64::NAN,
            converged: false,
        };

        let mut prev_loss = f64::INFINITY;
        for epoch in 0..self.config.epochs {
            let mut loss = 0.0;
            for i in 0..n {
                loss += self.sample_step(x.row_slice(i), y_numeric[i]);
            }
            loss /= n as f64;

            report.epochs_run = epoch + 1;
            report.final_loss = loss;

            if (prev_loss - loss).abs() < self.config.tolerance {
                log::info!("converged at epoch {} (loss: {:.6})", epoch, loss);
                report.converged = true;
                break;
            }
            prev_loss = loss;

            if epoch % 100 == 0 {
                log::info!("epoch {}: loss = {:.6}", epoch, loss);
            }
        }

        Ok(report)
    }

    /// One stochastic step on a single sample. Returns the hinge loss it
    /// contributed (zero when the margin constraint is already satisfied).
    fn sample_step(&mut self, x: &[f64], true_class: usize) -> f64 {
        let n_classes = self.classes.len();

        let mut scores = Vec::with_capacity(n_classes);
        for c in 0..n_classes {
            scores.push(self.score(x, c));
        }

        // Highest-scoring competitor, seeded with the true class's own score
        // so it only moves when a competitor strictly beats it.
        let mut best = scores[true_class];
        let mut best_idx = true_class;
        for (c, &s) in scores.iter().enumerate() {
            if c != true_class && s > best {
                best = s;
                best_idx = c;
            }
        }

        let lr = self.config.learning_rate;
        let decay = lr * self.config.lambda;

        let margin = best - scores[true_class] + 1.0;
        if margin > 0.0 {
            // Push the true class up and the offender down, then decay both
            // touched rows. When best_idx == true_class the two gradient
            // halves cancel and only the (doubled) decay remains.
            for f in 0..self.feature_dim {
                self.weights[(true_class, f)] += lr * x[f];
                self.weights[(best_idx, f)] -= lr * x[f];

                let w = self.weights[(true_class, f)];
                self.weights[(true_class, f)] -= decay * w;
                let w = self.weights[(best_idx, f)];
                self.weights[(best_idx, f)] -= decay * w;
            }
            self.bias += lr;
            self.bias -= decay * self.bias;
            margin
        } else {
            // No violation: regularization still applies, to every weight.
            for w in self.weights.as_mut_slice().iter_mut() {
                *w -= decay * *w;
            }
            self.bias -= decay * self.bias;
            0.0
        }
    }

    fn check_training_inputs(
        &self,
        x: &Array2<f64>,
        y: &[&str],
    ) -> Result<Vec<usize>, SvmError> {
        if x.ncols() != self.feature_dim {
            return Err(SvmError::ShapeMismatch {
                expected: self.feature_dim,
                got: x.ncols(),
            });
        }
        if x.nrows() != y.len() {
            return Err(SvmError::LengthMismatch {
                rows: x.nrows(),
                labels: y.len(),
            });
        }
        y.iter()
            .map(|&label| {
                self.class_index
                    .get(label)
                    .copied()
                    .ok_or_else(|| SvmError::UnknownLabel(label.to_string()))
            })
            .collect()
    }

    /// Predict the class of a single feature vector.
    ///
    /// Classes are scanned in ascending index order with a strict `>`
    /// comparison, so ties go to the lower-indexed class.
    pub fn predict(&self, x: &[f64]) -> Result<String, SvmError> {
        if x.len() != self.feature_dim {
            return Err(SvmError::ShapeMismatch {
                expected: self.feature_dim,
                got: x.len(),
            });
        }

        let mut max_score = f64::NEG_INFINITY;
        let mut best = "";
        for (c, class) in self.classes.iter().enumerate() {
            let score = self.score(x, c);
            if score > max_score {
                max_score = score;
                best = class;
            }
        }

        Ok(best.to_string())
    }

    /// Predict one class per row of `x`, preserving row order.
    pub fn predict_batch(&self, x: &Array2<f64>) -> Result<Vec<String>, SvmError> {
        if x.ncols() != self.feature_dim {
            return Err(SvmError::ShapeMismatch {
                expected: self.feature_dim,
                got: x.ncols(),
            });
        }
        x.iter_rows().map(|row| self.predict(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn config() -> SvmConfig {
        SvmConfig::new(0.1, 0.01, 1e-6, 200)
    }

    #[test]
    fn duplicate_class_names_resolve_to_later_index() {
        let clf = LinearSvm::new(classes(&["A", "B", "A"]), 2, config()).unwrap();
        assert_eq!(clf.class_index["A"], 2);
        assert_eq!(clf.class_index["B"], 1);
        assert_eq!(clf.classes().len(), 3);
    }

    #[test]
    fn predict_tie_goes_to_lower_index() {
        // Zero weights, shared bias: every class scores identically.
        let clf = LinearSvm::new(classes(&["first", "second"]), 2, config()).unwrap();
        assert_eq!(clf.predict(&[1.0, -1.0]).unwrap(), "first");
    }

    #[test]
    fn violating_step_widens_the_margin() {
        let mut clf = LinearSvm::new(classes(&["A", "B"]), 2, config()).unwrap();
        // Class B outscores the true class A on this sample.
        clf.weights[(0, 0)] = -0.5;
        clf.weights[(1, 0)] = 0.5;

        let x = [1.0, 0.0];
        let gap_before = clf.score(&x, 0) - clf.score(&x, 1);
        let loss = clf.sample_step(&x, 0);
        let gap_after = clf.score(&x, 0) - clf.score(&x, 1);

        assert!(loss > 0.0, "hinge loss should be active");
        assert!(
            gap_after > gap_before,
            "update must widen the true-vs-competitor gap: {} -> {}",
            gap_before,
            gap_after
        );
    }

    #[test]
    fn zero_weights_are_a_fixed_point_of_decay() {
        let mut clf = LinearSvm::new(classes(&["A", "B"]), 2, config()).unwrap();
        // Zero weights make the degenerate case: the true class is its own
        // best competitor, the gradient halves cancel, and decay acts on
        // zeros.
        let loss = clf.sample_step(&[1.0, 2.0], 1);
        assert_eq!(loss, 1.0);
        for w in clf.weights.as_slice() {
            assert_eq!(*w, 0.0);
        }
        assert!(clf.bias > 0.0, "bias still takes the gradient step");
    }

    #[test]
    fn training_is_deterministic_for_a_fixed_seed() {
        let x = Array2::from_shape_vec((2, 2), vec![1.0, 1.0, -1.0, -1.0]).unwrap();
        let y = ["A", "B"];

        let mut a = LinearSvm::new(classes(&["A", "B"]), 2, config()).unwrap();
        let mut b = LinearSvm::new(classes(&["A", "B"]), 2, config()).unwrap();
        let ra = a
            .train_with_rng(&x, &y, &mut StdRng::seed_from_u64(42))
            .unwrap();
        let rb = b
            .train_with_rng(&x, &y, &mut StdRng::seed_from_u64(42))
            .unwrap();

        assert_eq!(ra, rb);
        assert_eq!(a.weights(), b.weights());
        assert_eq!(a.bias(), b.bias());
    }

    #[test]
    fn bias_is_not_reset_by_train() {
        let x = Array2::from_shape_vec((1, 1), vec![1.0]).unwrap();
        let mut clf = LinearSvm::new(classes(&["A"]), 1, SvmConfig::new(0.1, 0.0, 0.0, 1))
            .unwrap();
        clf.bias = 3.0;
        clf.train_with_rng(&x, &["A"], &mut StdRng::seed_from_u64(0))
            .unwrap();
        // One degenerate violating step: bias += lr, no decay (lambda = 0).
        assert!((clf.bias() - 3.1).abs() < 1e-12);
    }

    #[test]
    fn empty_training_set_runs_full_budget_with_nan_loss() {
        let x = Array2::from_shape_vec((0, 2), vec![]).unwrap();
        let mut clf = LinearSvm::new(classes(&["A", "B"]), 2, SvmConfig::new(0.1, 0.01, 1.0, 5))
            .unwrap();
        let report = clf
            .train_with_rng(&x, &[], &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(report.epochs_run, 5);
        assert!(report.final_loss.is_nan());
        assert!(!report.converged);
    }
}
