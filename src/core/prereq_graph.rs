//! Prerequisite graphs built from AND/OR prerequisite expressions
//!
//! An expression is either a leaf (a course code string, or a subject list plus a
//! course number) or an operator node with children. Building a graph creates one
//! node per operator occurrence, one node per distinct leaf, and links pointing from
//! each node to its parent, ending at the root course.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Boolean combinator in a prerequisite expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    /// Every child is required
    And,
    /// Any one child suffices
    Or,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "AND"),
            Self::Or => write!(f, "OR"),
        }
    }
}

/// Course number as stored: numeric or textual (e.g., "240" or 240)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CourseNumber {
    /// Plain number
    Number(u32),
    /// Number with letters or leading zeros
    Text(String),
}

impl fmt::Display for CourseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// AND/OR prerequisite expression
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrereqExpr {
    /// Operator applied to sub-expressions
    Node {
        /// AND or OR
        operator: Operator,
        /// Operands
        children: Vec<PrereqExpr>,
    },
    /// Cross-listed course (e.g., `{"subjects": ["COMP SCI", "MATH"], "course_number": 240}`)
    Course {
        /// Subjects the course is listed under
        subjects: Vec<String>,
        /// Course number
        course_number: CourseNumber,
    },
    /// Free-form course code
    Code(String),
}

impl PrereqExpr {
    /// Identifier of a leaf: the code itself, or `SUBJ1/SUBJ2 NUM`
    ///
    /// Returns `None` for operator nodes.
    #[must_use]
    pub fn leaf_id(&self) -> Option<String> {
        match self {
            Self::Node { .. } => None,
            Self::Course {
                subjects,
                course_number,
            } => Some(format!("{} {course_number}", subjects.join("/"))),
            Self::Code(code) => Some(code.clone()),
        }
    }
}

/// Role of a node in the graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum NodeKind {
    /// The course whose prerequisites are drawn
    Course,
    /// An AND operator occurrence
    And,
    /// An OR operator occurrence
    Or,
    /// A prerequisite course
    Leaf,
}

impl From<Operator> for NodeKind {
    fn from(op: Operator) -> Self {
        match op {
            Operator::And => Self::And,
            Operator::Or => Self::Or,
        }
    }
}

/// Graph node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique node id
    pub id: String,
    /// Node role
    #[serde(rename = "type")]
    pub kind: NodeKind,
}

/// Edge from a node to its parent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    /// Child node id
    pub source: String,
    /// Parent node id
    pub target: String,
}

/// Nodes and links of one prerequisite graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrereqGraph {
    /// Nodes, root first
    pub nodes: Vec<GraphNode>,
    /// Child-to-parent links
    pub links: Vec<GraphLink>,
}

/// State owned by a single build; the operator counter restarts with every build
struct GraphBuilder {
    graph: PrereqGraph,
    seen_leaves: HashSet<String>,
    next_operator: usize,
}

impl GraphBuilder {
    fn new(root: &str) -> Self {
        Self {
            graph: PrereqGraph {
                nodes: vec![GraphNode {
                    id: root.to_string(),
                    kind: NodeKind::Course,
                }],
                links: Vec::new(),
            },
            seen_leaves: HashSet::new(),
            next_operator: 0,
        }
    }

    fn operator_id(&mut self, op: Operator) -> String {
        self.next_operator += 1;
        format!("{op}_{}", self.next_operator)
    }

    fn link(&mut self, source: String, target: &str) {
        self.graph.links.push(GraphLink {
            source,
            target: target.to_string(),
        });
    }

    fn walk(&mut self, expr: &PrereqExpr, parent: &str) {
        if let PrereqExpr::Node { operator, children } = expr {
            let id = self.operator_id(*operator);
            self.graph.nodes.push(GraphNode {
                id: id.clone(),
                kind: (*operator).into(),
            });
            self.link(id.clone(), parent);
            for child in children {
                self.walk(child, &id);
            }
        } else if let Some(leaf) = expr.leaf_id() {
            if self.seen_leaves.insert(leaf.clone()) {
                self.graph.nodes.push(GraphNode {
                    id: leaf.clone(),
                    kind: NodeKind::Leaf,
                });
            }
            self.link(leaf, parent);
        }
    }
}

/// Build the prerequisite graph of `root_code`
///
/// # Arguments
/// * `root_code` - Course the prerequisites belong to (e.g., "COMP SCI 400")
/// * `expr` - Its prerequisite expression, or `None` when it has none
///
/// # Returns
/// A graph whose first node is the root course. Operator nodes are numbered
/// `AND_1`, `OR_2`, ... in visiting order, starting at 1 for every call.
#[must_use]
pub fn build_prereq_graph(root_code: &str, expr: Option<&PrereqExpr>) -> PrereqGraph {
    let mut builder = GraphBuilder::new(root_code);
    if let Some(expr) = expr {
        builder.walk(expr, root_code);
    }
    builder.graph
}
