//! Native decision-tree ensemble: node layout and traversal.
//!
//! The model artifact stores each tree as a flat node arena; node 0 is the
//! root, splits send a row left when `row[feature] <= threshold`. No model
//! runtime is involved; scoring is plain traversal.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// One node of a fitted decision tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

/// A fitted decision tree as stored in the model artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Structural validation against the artifact's feature and class counts.
    pub(crate) fn check(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if *feature >= n_features {
                        return Err(format!(
                            "node {index} splits on feature {feature}, artifact has {n_features}"
                        ));
                    }
                    if *left >= self.nodes.len() || *right >= self.nodes.len() {
                        return Err(format!("node {index} points outside the node arena"));
                    }
                }
                TreeNode::Leaf { class } => {
                    if *class >= n_classes {
                        return Err(format!(
                            "node {index} predicts class {class}, artifact has {n_classes}"
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    /// Traverse the tree for one feature row, returning the leaf class index.
    ///
    /// `tree` is the tree's position in the ensemble, used for error context.
    /// Traversal is bounded by the node count so a cyclic arena cannot hang
    /// the scorer.
    pub fn predict_class(&self, tree: usize, row: &[f32]) -> Result<usize, PipelineError> {
        let mut index = 0usize;
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { class }) => return Ok(*class),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = row.get(*feature).ok_or(PipelineError::MalformedTree {
                        tree,
                        reason: "split feature outside the row",
                    })?;
                    index = if *value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(PipelineError::MalformedTree {
                        tree,
                        reason: "node index outside the arena",
                    })
                }
            }
        }
        Err(PipelineError::MalformedTree {
            tree,
            reason: "traversal did not reach a leaf",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// days <= 30.5 ? (workers <= 0.5 ? class 1 : class 0) : class 2
    fn two_split_tree() -> DecisionTree {
        DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 30.5,
                    left: 1,
                    right: 4,
                },
                TreeNode::Split {
                    feature: 1,
                    threshold: 0.5,
                    left: 2,
                    right: 3,
                },
                TreeNode::Leaf { class: 1 },
                TreeNode::Leaf { class: 0 },
                TreeNode::Leaf { class: 2 },
            ],
        }
    }

    #[test]
    fn test_traversal_reaches_expected_leaves() {
        let tree = two_split_tree();
        assert_eq!(tree.predict_class(0, &[15.0, 3.0]).unwrap(), 0);
        assert_eq!(tree.predict_class(0, &[15.0, 0.0]).unwrap(), 1);
        assert_eq!(tree.predict_class(0, &[45.0, 3.0]).unwrap(), 2);
    }

    #[test]
    fn test_threshold_is_inclusive_on_the_left() {
        let tree = two_split_tree();
        assert_eq!(tree.predict_class(0, &[30.5, 3.0]).unwrap(), 0);
        assert_eq!(tree.predict_class(0, &[30.6, 3.0]).unwrap(), 2);
    }

    #[test]
    fn test_short_row_is_malformed() {
        let tree = two_split_tree();
        let err = tree.predict_class(3, &[15.0]).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedTree { tree: 3, .. }));
    }

    #[test]
    fn test_cyclic_arena_does_not_hang() {
        let tree = DecisionTree {
            nodes: vec![TreeNode::Split {
                feature: 0,
                threshold: 0.0,
                left: 0,
                right: 0,
            }],
        };
        let err = tree.predict_class(0, &[1.0]).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedTree { .. }));
    }

    #[test]
    fn test_check_rejects_out_of_range_references() {
        let tree = two_split_tree();
        assert!(tree.check(2, 3).is_ok());
        assert!(tree.check(1, 3).is_err()); // splits on feature 1
        assert!(tree.check(2, 2).is_err()); // leaf class 2

        let empty = DecisionTree { nodes: vec![] };
        assert!(empty.check(2, 3).is_err());
    }

    #[test]
    fn test_node_serialization_layout() {
        let tree = two_split_tree();
        let json = serde_json::to_string(&tree).unwrap();
        assert!(json.contains("\"split\""));
        assert!(json.contains("\"leaf\""));

        let back: DecisionTree = serde_json::from_str(&json).unwrap();
        assert_eq!(back.predict_class(0, &[15.0, 3.0]).unwrap(), 0);
    }
}
