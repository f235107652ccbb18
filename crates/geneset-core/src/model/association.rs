//! Raw product-to-node associations.

use serde::{Deserialize, Serialize};

/// Qualifier value that negates an association.
pub const NEGATION_QUALIFIER: &str = "NOT";

/// Whether an association asserts or explicitly denies membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polarity {
    Positive,
    Negative,
}

/// A raw `(product, node, polarity)` triple before aggregation.
///
/// `qualifiers` holds every non-negating qualifier from the source row
/// (`contributes_to`, `colocalizes_with`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub product_id: String,
    pub node_id: String,
    pub polarity: Polarity,
    #[serde(default)]
    pub qualifiers: Vec<String>,
}

impl Association {
    /// A positive association with no qualifiers.
    pub fn positive(product_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            node_id: node_id.into(),
            polarity: Polarity::Positive,
            qualifiers: Vec::new(),
        }
    }

    /// A negated association.
    pub fn negative(product_id: impl Into<String>, node_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            node_id: node_id.into(),
            polarity: Polarity::Negative,
            qualifiers: Vec::new(),
        }
    }

    /// Build from a GAF-style qualifier column.
    ///
    /// The column may carry several `|`-separated values; any `NOT` negates the row.
    pub fn from_qualifier(
        product_id: impl Into<String>,
        node_id: impl Into<String>,
        qualifier: Option<&str>,
    ) -> Self {
        let mut polarity = Polarity::Positive;
        let mut qualifiers = Vec::new();

        for value in qualifier.unwrap_or("").split('|').map(str::trim) {
            if value.is_empty() {
                continue;
            }
            if value == NEGATION_QUALIFIER {
                polarity = Polarity::Negative;
            } else {
                qualifiers.push(value.to_string());
            }
        }

        Self {
            product_id: product_id.into(),
            node_id: node_id.into(),
            polarity,
            qualifiers,
        }
    }

    pub fn is_negated(&self) -> bool {
        self.polarity == Polarity::Negative
    }
}
