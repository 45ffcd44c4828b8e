use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// RatingForest – the trained classifier
// ---------------------------------------------------------------------------

/// A trained random-forest classifier over the eight employee features.
///
/// This is the deserialized form of the model artifact; training happens in
/// an external process and this crate only ever reads the result. Named
/// fields ensure schema mismatches fail at deserialization time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingForest {
    /// Feature names in the column order the trees index into.
    pub feature_names: Vec<String>,
    /// Rating labels; leaf classes index into this list.
    pub classes: Vec<i64>,
    pub trees: Vec<Tree>,
}

/// One decision tree, nodes stored in a flat array with the root at 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    /// Go left when `features[feature] <= threshold`, else right.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Terminal node voting for `classes[class]`.
    Leaf { class: usize },
}

impl RatingForest {
    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Structural sanity check on a freshly deserialized forest.
    ///
    /// Child indices must point forward in the node array, which also
    /// guarantees every walk terminates.
    pub fn check(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        if self.classes.is_empty() {
            return Err("forest has no classes".to_string());
        }
        for (t, tree) in self.trees.iter().enumerate() {
            if tree.nodes.is_empty() {
                return Err(format!("tree {t} has no nodes"));
            }
            for (i, node) in tree.nodes.iter().enumerate() {
                match node {
                    Node::Split {
                        feature,
                        left,
                        right,
                        ..
                    } => {
                        if *feature >= self.n_features() {
                            return Err(format!(
                                "tree {t} node {i}: feature index {feature} out of range"
                            ));
                        }
                        if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                            return Err(format!("tree {t} node {i}: child index out of range"));
                        }
                        if *left <= i || *right <= i {
                            return Err(format!(
                                "tree {t} node {i}: child index does not point forward"
                            ));
                        }
                    }
                    Node::Leaf { class } => {
                        if *class >= self.classes.len() {
                            return Err(format!(
                                "tree {t} node {i}: class index {class} out of range"
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Predict the rating for one feature row by majority vote across
    /// trees. Ties break toward the lowest rating, so prediction is
    /// deterministic for identical input.
    pub fn predict_row(&self, features: &[f64]) -> i64 {
        let mut votes = vec![0usize; self.classes.len()];
        for tree in &self.trees {
            votes[walk(tree, features)] += 1;
        }

        let mut best = 0;
        for (class, &count) in votes.iter().enumerate() {
            if count > votes[best] {
                best = class;
            }
        }
        self.classes[best]
    }

    /// One prediction per row, in input order.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Vec<i64> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }
}

/// Walk a tree root-to-leaf and return the leaf's class index.
///
/// `check()` has verified child indices point forward, so the walk is
/// bounded by the node count.
fn walk(tree: &Tree, features: &[f64]) -> usize {
    let mut idx = 0;
    for _ in 0..tree.nodes.len() {
        match &tree.nodes[idx] {
            Node::Leaf { class } => return *class,
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                let value = features.get(*feature).copied().unwrap_or(f64::NAN);
                idx = if value <= *threshold { *left } else { *right };
            }
        }
    }
    // Unreachable for a checked forest; vote for the first class if not.
    0
}
