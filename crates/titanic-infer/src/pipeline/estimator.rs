//! Fitted estimators over a dense feature vector.

use serde::{Deserialize, Serialize};

use crate::error::{ArtifactError, ModelError};

/// One node of a fitted decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    /// Samples with `x[feature] <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Per-class weights, in the artifact's class order.
    Leaf { value: Vec<f64> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
    DecisionTree { nodes: Vec<TreeNode> },
    LinearSvc { coef: Vec<f64>, intercept: f64 },
}

impl Estimator {
    /// Human-readable estimator name, as shown in model info.
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::LogisticRegression { .. } => "LogisticRegression",
            Estimator::DecisionTree { .. } => "DecisionTreeClassifier",
            Estimator::LinearSvc { .. } => "LinearSVC",
        }
    }

    pub fn has_probabilities(&self) -> bool {
        !matches!(self, Estimator::LinearSvc { .. })
    }

    /// Feature count the estimator was fitted on, when it is fixed.
    ///
    /// Trees only know the highest feature index they split on, so they
    /// report `None` and are checked against that index instead.
    pub fn n_features(&self) -> Option<usize> {
        match self {
            Estimator::LogisticRegression { coef, .. } | Estimator::LinearSvc { coef, .. } => {
                Some(coef.len())
            }
            Estimator::DecisionTree { .. } => None,
        }
    }

    pub(crate) fn validate(&self, classes: usize) -> Result<(), ArtifactError> {
        match self {
            Estimator::LogisticRegression { coef, intercept }
            | Estimator::LinearSvc { coef, intercept } => {
                if classes != 2 {
                    return Err(ArtifactError::NotBinary {
                        estimator: self.kind(),
                        classes,
                    });
                }
                if let Some(index) = coef.iter().position(|c| !c.is_finite()) {
                    return Err(ArtifactError::NonFinite {
                        what: format!("coef[{index}]"),
                    });
                }
                if !intercept.is_finite() {
                    return Err(ArtifactError::NonFinite {
                        what: "intercept".to_string(),
                    });
                }
                Ok(())
            }
            Estimator::DecisionTree { nodes } => validate_tree(nodes, classes),
        }
    }

    /// Index into the class list of the predicted class.
    pub(crate) fn predict_index(&self, x: &[f64]) -> Result<usize, ModelError> {
        match self {
            Estimator::LogisticRegression { .. } | Estimator::LinearSvc { .. } => {
                Ok(usize::from(self.decision_function(x)? > 0.0))
            }
            Estimator::DecisionTree { nodes } => Ok(argmax(leaf(nodes, x)?)),
        }
    }

    /// Class probabilities in class order, or `None` for margin-only models.
    pub(crate) fn predict_proba(&self, x: &[f64]) -> Result<Option<Vec<f64>>, ModelError> {
        match self {
            Estimator::LogisticRegression { .. } => {
                let p = sigmoid(self.decision_function(x)?);
                Ok(Some(vec![1.0 - p, p]))
            }
            Estimator::DecisionTree { nodes } => {
                let weights = leaf(nodes, x)?;
                let total: f64 = weights.iter().sum();
                Ok(Some(weights.iter().map(|w| w / total).collect()))
            }
            Estimator::LinearSvc { .. } => Ok(None),
        }
    }

    fn decision_function(&self, x: &[f64]) -> Result<f64, ModelError> {
        let (coef, intercept) = match self {
            Estimator::LogisticRegression { coef, intercept }
            | Estimator::LinearSvc { coef, intercept } => (coef, *intercept),
            Estimator::DecisionTree { .. } => {
                return Err(ModelError::Other(
                    "decision trees have no decision function".to_string(),
                ));
            }
        };
        if x.len() != coef.len() {
            return Err(ModelError::FeatureCount {
                estimator: self.kind(),
                expected: coef.len(),
                actual: x.len(),
            });
        }
        Ok(coef.iter().zip(x).map(|(c, v)| c * v).sum::<f64>() + intercept)
    }
}

fn validate_tree(nodes: &[TreeNode], classes: usize) -> Result<(), ArtifactError> {
    if nodes.is_empty() {
        return Err(ArtifactError::EmptyTree);
    }
    for (node, entry) in nodes.iter().enumerate() {
        match entry {
            TreeNode::Split {
                threshold,
                left,
                right,
                ..
            } => {
                // Children always follow their parent, which rules out cycles.
                for child in [*left, *right] {
                    if child <= node || child >= nodes.len() {
                        return Err(ArtifactError::InvalidChild { node, child });
                    }
                }
                if !threshold.is_finite() {
                    return Err(ArtifactError::NonFinite {
                        what: format!("threshold of node {node}"),
                    });
                }
            }
            TreeNode::Leaf { value } => {
                if value.len() != classes {
                    return Err(ArtifactError::LeafWidth {
                        node,
                        width: value.len(),
                        classes,
                    });
                }
                if value.iter().any(|w| !w.is_finite() || *w < 0.0) {
                    return Err(ArtifactError::NonFinite {
                        what: format!("class weights of leaf {node}"),
                    });
                }
                if value.iter().sum::<f64>() <= 0.0 {
                    return Err(ArtifactError::EmptyLeaf { node });
                }
            }
        }
    }
    Ok(())
}

fn leaf<'a>(nodes: &'a [TreeNode], x: &[f64]) -> Result<&'a [f64], ModelError> {
    let mut index = 0;
    loop {
        match nodes.get(index) {
            Some(TreeNode::Leaf { value }) => return Ok(value),
            Some(TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            }) => {
                let value = x.get(*feature).ok_or(ModelError::FeatureCount {
                    estimator: "DecisionTreeClassifier",
                    expected: feature + 1,
                    actual: x.len(),
                })?;
                index = if *value <= *threshold { *left } else { *right };
            }
            None => {
                return Err(ModelError::Other(format!(
                    "tree node {index} does not exist"
                )));
            }
        }
    }
}

/// Position of the first maximum.
fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (index, value) in values.iter().enumerate() {
        if *value > values[best] {
            best = index;
        }
    }
    best
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> Estimator {
        Estimator::DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf {
                    value: vec![30.0, 10.0],
                },
                TreeNode::Leaf {
                    value: vec![5.0, 15.0],
                },
            ],
        }
    }

    #[test]
    fn tree_goes_left_on_equal() {
        let tree = stump();
        assert_eq!(tree.predict_index(&[0.5]).unwrap(), 0);
        assert_eq!(tree.predict_index(&[0.6]).unwrap(), 1);
        assert_eq!(
            tree.predict_proba(&[0.0]).unwrap(),
            Some(vec![0.75, 0.25])
        );
    }

    #[test]
    fn tie_picks_first_class() {
        assert_eq!(argmax(&[2.0, 2.0]), 0);
        assert_eq!(argmax(&[1.0, 3.0, 3.0]), 1);
    }

    #[test]
    fn logistic_regression_scores_with_sigmoid() {
        let model = Estimator::LogisticRegression {
            coef: vec![1.0, -1.0],
            intercept: 0.0,
        };
        assert_eq!(model.predict_proba(&[1.0, 1.0]).unwrap(), Some(vec![0.5, 0.5]));
        assert_eq!(model.predict_index(&[1.0, 1.0]).unwrap(), 0);
        assert_eq!(model.predict_index(&[2.0, 0.0]).unwrap(), 1);
    }

    #[test]
    fn linear_svc_has_no_probabilities() {
        let model = Estimator::LinearSvc {
            coef: vec![1.0],
            intercept: -1.0,
        };
        assert!(!model.has_probabilities());
        assert_eq!(model.predict_proba(&[3.0]).unwrap(), None);
        assert_eq!(model.predict_index(&[3.0]).unwrap(), 1);
    }

    #[test]
    fn feature_count_mismatch_names_the_estimator() {
        let model = Estimator::LogisticRegression {
            coef: vec![1.0, 2.0, 3.0],
            intercept: 0.0,
        };
        let error = model.predict_index(&[1.0]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "X has 1 features, but LogisticRegression is expecting 3 features as input"
        );
    }

    #[test]
    fn tree_validation() {
        assert_eq!(stump().validate(2), Ok(()));
        assert!(matches!(
            stump().validate(3),
            Err(ArtifactError::LeafWidth { node: 1, .. })
        ));
        let looped = Estimator::DecisionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 0,
            }],
        };
        assert_eq!(
            looped.validate(2),
            Err(ArtifactError::InvalidChild { node: 0, child: 0 })
        );
        assert_eq!(
            Estimator::DecisionTree { nodes: vec![] }.validate(2),
            Err(ArtifactError::EmptyTree)
        );
    }

    #[test]
    fn binary_models_need_two_classes() {
        let model = Estimator::LinearSvc {
            coef: vec![1.0],
            intercept: 0.0,
        };
        assert!(matches!(
            model.validate(3),
            Err(ArtifactError::NotBinary { classes: 3, .. })
        ));
        let nan = Estimator::LogisticRegression {
            coef: vec![f64::NAN],
            intercept: 0.0,
        };
        assert!(matches!(nan.validate(2), Err(ArtifactError::NonFinite { .. })));
    }
}
