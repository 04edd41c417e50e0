//! L2-regularised binary logistic regression trained by full-batch gradient descent.

use super::vectorizer::SparseVector;

#[derive(Debug, Clone)]
pub struct LogisticModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct TrainingReport {
    pub iterations: usize,
    pub converged: bool,
    pub final_gradient: f64,
}

pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

fn dot(coefficients: &[f64], x: &SparseVector) -> f64 {
    x.iter().map(|(i, v)| coefficients[*i] * v).sum()
}

impl LogisticModel {
    /// Minimise `0.5*|w|^2 + C * sum(logloss)` with an unpenalised intercept.
    ///
    /// Inputs are L2-normalised, so `1 + C*n/2` bounds the gradient's
    /// Lipschitz constant and `1/L` is a safe fixed step.
    pub fn fit(
        samples: &[SparseVector],
        labels: &[bool],
        n_features: usize,
        regularization: f64,
        max_iterations: usize,
        tolerance: f64,
    ) -> (Self, TrainingReport) {
        let mut coefficients = vec![0.0; n_features];
        let mut intercept = 0.0;

        let lipschitz = 1.0 + regularization * samples.len() as f64 / 2.0;
        let step = 1.0 / lipschitz;

        let mut report = TrainingReport {
            iterations: 0,
            converged: false,
            final_gradient: f64::INFINITY,
        };

        for iteration in 0..max_iterations {
            let mut gradient = coefficients.clone();
            let mut intercept_gradient = 0.0;

            for (x, &label) in samples.iter().zip(labels) {
                let p = sigmoid(dot(&coefficients, x) + intercept);
                let target = if label { 1.0 } else { 0.0 };
                let residual = regularization * (p - target);

                for (i, v) in x {
                    gradient[*i] += residual * v;
                }
                intercept_gradient += residual;
            }

            let max_gradient = gradient
                .iter()
                .fold(intercept_gradient.abs(), |acc, g| acc.max(g.abs()));

            report.iterations = iteration;
            report.final_gradient = max_gradient;

            if max_gradient < tolerance {
                report.converged = true;
                break;
            }

            for (w, g) in coefficients.iter_mut().zip(&gradient) {
                *w -= step * g;
            }
            intercept -= step * intercept_gradient;
            report.iterations = iteration + 1;
        }

        (
            Self {
                coefficients,
                intercept,
            },
            report,
        )
    }

    pub fn predict_proba(&self, x: &SparseVector) -> f64 {
        sigmoid(dot(&self.coefficients, x) + self.intercept)
    }

    pub fn coefficient(&self, index: usize) -> f64 {
        self.coefficients.get(index).copied().unwrap_or(0.0)
    }
}
