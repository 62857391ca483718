//! Expected-value evaluation of decision trees.
//!
//! - Outcome nodes are leaves: `net = value - cost`, `expected = net * p`.
//! - Chance nodes sum the expected values of their branches.
//! - Decision nodes take the branch with the highest expected value.
//!
//! The net value of a chance or decision node is its own expected value, and
//! its probability (default 1) weights it inside an enclosing chance node.

use crate::error::RiskError;
use serde::{Deserialize, Serialize};

/// Node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Terminal payoff
    Outcome,
    /// Uncertain event
    Chance,
    /// Choice between alternatives
    Decision,
}

/// A node of a decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionNode {
    /// Label
    pub name: String,
    /// Node type
    #[serde(alias = "type")]
    pub kind: NodeKind,
    /// Branch probability in `[0, 1]`; 1 when absent
    #[serde(default)]
    pub probability: Option<f64>,
    /// Payoff (outcome nodes)
    #[serde(default)]
    pub value: Option<f64>,
    /// Cost incurred (outcome nodes)
    #[serde(default)]
    pub cost: Option<f64>,
    /// Branches (chance and decision nodes)
    #[serde(default)]
    pub children: Vec<DecisionNode>,
}

impl DecisionNode {
    /// Terminal payoff node.
    pub fn outcome(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Outcome,
            probability: None,
            value: Some(value),
            cost: None,
            children: Vec::new(),
        }
    }

    /// Chance node over the given branches.
    pub fn chance(name: impl Into<String>, children: Vec<DecisionNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Chance,
            probability: None,
            value: None,
            cost: None,
            children,
        }
    }

    /// Decision node over the given alternatives.
    pub fn decision(name: impl Into<String>, children: Vec<DecisionNode>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Decision,
            probability: None,
            value: None,
            cost: None,
            children,
        }
    }

    /// Set the branch probability.
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Set the cost.
    pub fn with_cost(mut self, cost: f64) -> Self {
        self.cost = Some(cost);
        self
    }
}

/// Summary of one alternative at a decision node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alternative {
    /// Alternative name
    pub name: String,
    /// Its expected value
    pub expected_value: f64,
    /// Its risk range, when it is a chance node
    pub risk_range: Option<f64>,
}

/// Node-type specific part of a [`NodeEvaluation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeAnalysis {
    /// Leaf inputs
    Outcome {
        /// Payoff
        value: f64,
        /// Cost
        cost: f64,
    },
    /// Spread over the branches
    Chance {
        /// Highest branch net value
        best_case: f64,
        /// Lowest branch net value
        worst_case: f64,
        /// `best_case - worst_case`
        risk_range: f64,
        /// Evaluated branches
        outcomes: Vec<NodeEvaluation>,
    },
    /// Chosen alternative
    Decision {
        /// Name of the alternative with the highest expected value
        optimal_choice: String,
        /// Every alternative in input order
        alternatives: Vec<Alternative>,
        /// Evaluated alternatives
        options: Vec<NodeEvaluation>,
    },
}

/// Evaluated node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEvaluation {
    /// Node label
    pub name: String,
    /// Branch probability applied
    pub probability: f64,
    /// Value before weighting by `probability`
    pub net_value: f64,
    /// `net_value * probability`
    pub expected_value: f64,
    /// Node-type specific detail
    #[serde(flatten)]
    pub analysis: NodeAnalysis,
}

impl NodeEvaluation {
    /// Node type of the evaluated node.
    pub fn kind(&self) -> NodeKind {
        match self.analysis {
            NodeAnalysis::Outcome { .. } => NodeKind::Outcome,
            NodeAnalysis::Chance { .. } => NodeKind::Chance,
            NodeAnalysis::Decision { .. } => NodeKind::Decision,
        }
    }

    /// Chosen alternative of a decision node.
    pub fn optimal_choice(&self) -> Option<&str> {
        match &self.analysis {
            NodeAnalysis::Decision { optimal_choice, .. } => Some(optimal_choice),
            _ => None,
        }
    }

    /// Risk range of a chance node.
    pub fn risk_range(&self) -> Option<f64> {
        match self.analysis {
            NodeAnalysis::Chance { risk_range, .. } => Some(risk_range),
            _ => None,
        }
    }
}

/// Tolerance when checking that chance branch probabilities sum to one.
const PROBABILITY_SUM_TOLERANCE: f64 = 1e-6;

/// Evaluate a tree rooted at `node`.
///
/// # Errors
///
/// [`RiskError::InvalidInput`] when a probability lies outside `[0, 1]`, a
/// value or cost is not finite, or a chance or decision node has no children.
///
/// # Examples
///
/// ```
/// use econ_risk::{evaluate, DecisionNode};
///
/// let tree = DecisionNode::decision(
///     "launch",
///     vec![
///         DecisionNode::chance(
///             "go",
///             vec![
///                 DecisionNode::outcome("success", 100.0).with_probability(0.5),
///                 DecisionNode::outcome("failure", 0.0).with_probability(0.5),
///             ],
///         ),
///         DecisionNode::outcome("wait", 40.0),
///     ],
/// );
/// let result = evaluate(&tree).unwrap();
/// assert_eq!(result.optimal_choice(), Some("go"));
/// assert_eq!(result.expected_value, 50.0);
/// ```
pub fn evaluate(node: &DecisionNode) -> Result<NodeEvaluation, RiskError> {
    let probability = node.probability.unwrap_or(1.0);
    if !(0.0..=1.0).contains(&probability) {
        return Err(RiskError::invalid_input(format!(
            "probability of '{}' must be in [0, 1], got {}",
            node.name, probability
        )));
    }

    let (net_value, analysis) = match node.kind {
        NodeKind::Outcome => {
            let value = node.value.unwrap_or(0.0);
            let cost = node.cost.unwrap_or(0.0);
            if !value.is_finite() || !cost.is_finite() {
                return Err(RiskError::invalid_input(format!(
                    "value and cost of '{}' must be finite",
                    node.name
                )));
            }
            (value - cost, NodeAnalysis::Outcome { value, cost })
        }
        NodeKind::Chance => {
            let outcomes = evaluate_children(node)?;
            let total: f64 = outcomes.iter().map(|o| o.probability).sum();
            if (total - 1.0).abs() > PROBABILITY_SUM_TOLERANCE {
                tracing::debug!(node = %node.name, total, "chance branch probabilities do not sum to 1");
            }

            let expected: f64 = outcomes.iter().map(|o| o.expected_value).sum();
            let best_case = outcomes
                .iter()
                .map(|o| o.net_value)
                .fold(f64::NEG_INFINITY, f64::max);
            let worst_case = outcomes
                .iter()
                .map(|o| o.net_value)
                .fold(f64::INFINITY, f64::min);
            (
                expected,
                NodeAnalysis::Chance {
                    best_case,
                    worst_case,
                    risk_range: best_case - worst_case,
                    outcomes,
                },
            )
        }
        NodeKind::Decision => {
            let options = evaluate_children(node)?;
            let mut best = 0;
            for (i, option) in options.iter().enumerate().skip(1) {
                if option.expected_value > options[best].expected_value {
                    best = i;
                }
            }
            let alternatives = options
                .iter()
                .map(|o| Alternative {
                    name: o.name.clone(),
                    expected_value: o.expected_value,
                    risk_range: o.risk_range(),
                })
                .collect();
            (
                options[best].expected_value,
                NodeAnalysis::Decision {
                    optimal_choice: options[best].name.clone(),
                    alternatives,
                    options,
                },
            )
        }
    };

    Ok(NodeEvaluation {
        name: node.name.clone(),
        probability,
        net_value,
        expected_value: net_value * probability,
        analysis,
    })
}

fn evaluate_children(node: &DecisionNode) -> Result<Vec<NodeEvaluation>, RiskError> {
    if node.children.is_empty() {
        return Err(RiskError::invalid_input(format!(
            "{:?} node '{}' has no children",
            node.kind, node.name
        )));
    }
    node.children.iter().map(evaluate).collect()
}
