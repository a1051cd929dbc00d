use std::fmt;
use std::mem;

use crate::ast::{Comparator, LogicalOperator};
use crate::value::ScimValue;

/// A single attribute test: `attr op value`, or `attr pr`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Dotted attribute path (e.g. `emails.type`)
    pub attribute_path: String,

    pub comparator: Comparator,

    /// Operand; `None` only for [`Comparator::Present`]
    pub value: Option<ScimValue>,
}

impl Condition {
    pub fn new(
        attribute_path: impl Into<String>,
        comparator: Comparator,
        value: impl Into<ScimValue>,
    ) -> Self {
        Condition {
            attribute_path: attribute_path.into(),
            comparator,
            value: Some(value.into()),
        }
    }

    /// `attr pr`
    pub fn present(attribute_path: impl Into<String>) -> Self {
        Condition {
            attribute_path: attribute_path.into(),
            comparator: Comparator::Present,
            value: None,
        }
    }
}

/// Filter expression tree.
///
/// Built once by the parser and only read afterwards. A chain like
/// `a and b and ... and z` nests once per term, so every walk over the tree
/// (clone, compare, drop, render, compile) runs on a heap work-stack rather
/// than the call stack.
pub enum ScimNode {
    /// Leaf attribute test
    Condition(Condition),

    /// Binary `and` / `or`, nested to the left for chains
    ///
    /// # Examples
    /// ```text
    /// a eq 1 and b eq 2 and c eq 3
    /// => Logical(and, Logical(and, a, b), c)
    /// ```
    Logical {
        operator: LogicalOperator,
        left: Box<ScimNode>,
        right: Box<ScimNode>,
    },

    /// Sub-filter applied to the elements of a multi-valued attribute
    ///
    /// # Examples
    /// ```text
    /// emails[type eq "work"]
    /// ```
    ArrayFilter { path: String, expr: Box<ScimNode> },
}

enum FoldStep<'a> {
    Visit(&'a ScimNode),
    Logical(LogicalOperator),
    Array(&'a str),
}

impl ScimNode {
    pub fn logical(operator: LogicalOperator, left: ScimNode, right: ScimNode) -> Self {
        ScimNode::Logical {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn array_filter(path: impl Into<String>, expr: ScimNode) -> Self {
        ScimNode::ArrayFilter {
            path: path.into(),
            expr: Box::new(expr),
        }
    }

    /// Logical operator of this node, if it is a logical node.
    pub fn operator(&self) -> Option<LogicalOperator> {
        match self {
            ScimNode::Logical { operator, .. } => Some(*operator),
            _ => None,
        }
    }

    /// Post-order fold over the tree, children before parents.
    pub fn fold<T>(
        &self,
        mut condition: impl FnMut(&Condition) -> T,
        mut logical: impl FnMut(LogicalOperator, T, T) -> T,
        mut array_filter: impl FnMut(&str, T) -> T,
    ) -> T {
        let mut steps = vec![FoldStep::Visit(self)];
        let mut results: Vec<T> = Vec::new();

        while let Some(step) = steps.pop() {
            match step {
                FoldStep::Visit(ScimNode::Condition(c)) => results.push(condition(c)),
                FoldStep::Visit(ScimNode::Logical {
                    operator,
                    left,
                    right,
                }) => {
                    steps.push(FoldStep::Logical(*operator));
                    steps.push(FoldStep::Visit(&**right));
                    steps.push(FoldStep::Visit(&**left));
                }
                FoldStep::Visit(ScimNode::ArrayFilter { path, expr }) => {
                    steps.push(FoldStep::Array(path.as_str()));
                    steps.push(FoldStep::Visit(&**expr));
                }
                FoldStep::Logical(operator) => {
                    let right = results.pop().expect("right operand folded");
                    let left = results.pop().expect("left operand folded");
                    results.push(logical(operator, left, right));
                }
                FoldStep::Array(path) => {
                    let expr = results.pop().expect("array filter body folded");
                    results.push(array_filter(path, expr));
                }
            }
        }

        results.pop().expect("root folded")
    }

    /// Move the boxed children out, leaving empty leaves behind.
    fn take_children(&mut self, out: &mut Vec<Box<ScimNode>>) {
        match self {
            ScimNode::Condition(_) => {}
            ScimNode::Logical { left, right, .. } => {
                out.push(mem::replace(left, Box::new(ScimNode::empty())));
                out.push(mem::replace(right, Box::new(ScimNode::empty())));
            }
            ScimNode::ArrayFilter { expr, .. } => {
                out.push(mem::replace(expr, Box::new(ScimNode::empty())));
            }
        }
    }

    fn empty() -> Self {
        ScimNode::Condition(Condition::present(String::new()))
    }
}

impl Drop for ScimNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

impl Clone for ScimNode {
    fn clone(&self) -> Self {
        self.fold(
            |c| ScimNode::Condition(c.clone()),
            ScimNode::logical,
            |path, expr| ScimNode::array_filter(path, expr),
        )
    }
}

impl PartialEq for ScimNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some(pair) = pending.pop() {
            match pair {
                (ScimNode::Condition(a), ScimNode::Condition(b)) => {
                    if a != b {
                        return false;
                    }
                }
                (
                    ScimNode::Logical {
                        operator: op_a,
                        left: left_a,
                        right: right_a,
                    },
                    ScimNode::Logical {
                        operator: op_b,
                        left: left_b,
                        right: right_b,
                    },
                ) => {
                    if op_a != op_b {
                        return false;
                    }
                    pending.push((&**right_a, &**right_b));
                    pending.push((&**left_a, &**left_b));
                }
                (
                    ScimNode::ArrayFilter {
                        path: path_a,
                        expr: expr_a,
                    },
                    ScimNode::ArrayFilter {
                        path: path_b,
                        expr: expr_b,
                    },
                ) => {
                    if path_a != path_b {
                        return false;
                    }
                    pending.push((&**expr_a, &**expr_b));
                }
                _ => return false,
            }
        }
        true
    }
}

/// Shows the canonical filter text, which identifies the tree exactly.
impl fmt::Debug for ScimNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScimNode({})", self)
    }
}

impl From<Condition> for ScimNode {
    fn from(condition: Condition) -> Self {
        ScimNode::Condition(condition)
    }
}

/// Write `s` as a double-quoted literal the lexer reads back as one token.
///
/// Escape pairs (`\x`) are kept as they are; a bare `"` or a trailing `\`
/// gets a backslash.
fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_str("\"")?;
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(next) => write!(f, "\\{}", next)?,
                None => f.write_str("\\\\")?,
            },
            '"' => f.write_str("\\\"")?,
            ch => write!(f, "{}", ch)?,
        }
    }
    f.write_str("\"")
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute_path, self.comparator)?;
        match &self.value {
            Some(ScimValue::String(s)) => {
                f.write_str(" ")?;
                write_quoted(f, s)
            }
            Some(value) => write!(f, " {}", value),
            None => Ok(()),
        }
    }
}

enum Piece<'a> {
    Node(&'a ScimNode),
    Text(&'static str),
    Path(&'a str),
}

/// Renders the canonical filter text.
///
/// Parsing the output yields the same tree for every tree the parser
/// produces. Hand-built string values containing a bare `"` come back with
/// that quote escaped.
impl fmt::Display for ScimNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pieces = vec![Piece::Node(self)];

        while let Some(piece) = pieces.pop() {
            match piece {
                Piece::Text(text) => f.write_str(text)?,
                Piece::Path(path) => f.write_str(path)?,
                Piece::Node(ScimNode::Condition(condition)) => write!(f, "{}", condition)?,
                Piece::Node(ScimNode::Logical {
                    operator,
                    left,
                    right,
                }) => {
                    // Pushed in reverse: left, operator, right.
                    // Chains nest to the left, so only a mixed-operator left child needs grouping
                    let group_right = right.operator().is_some();
                    let group_left = left.operator().is_some_and(|op| op != *operator);

                    if group_right {
                        pieces.push(Piece::Text(")"));
                    }
                    pieces.push(Piece::Node(&**right));
                    if group_right {
                        pieces.push(Piece::Text("("));
                    }
                    pieces.push(Piece::Text(" "));
                    pieces.push(Piece::Text(operator.as_str()));
                    pieces.push(Piece::Text(" "));
                    if group_left {
                        pieces.push(Piece::Text(")"));
                    }
                    pieces.push(Piece::Node(&**left));
                    if group_left {
                        pieces.push(Piece::Text("("));
                    }
                }
                Piece::Node(ScimNode::ArrayFilter { path, expr }) => {
                    pieces.push(Piece::Text("]"));
                    pieces.push(Piece::Node(&**expr));
                    pieces.push(Piece::Text("["));
                    pieces.push(Piece::Path(path.as_str()));
                }
            }
        }
        Ok(())
    }
}
