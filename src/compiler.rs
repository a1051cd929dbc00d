//! Translation of filter trees into MongoDB query documents.
//!
//! | filter              | query                                               |
//! |---------------------|-----------------------------------------------------|
//! | `a aco v`           | `{"a": v}`                                          |
//! | `a co "x"`          | `{"a": {"$regex": "x", "$options": "i"}}`           |
//! | `a eq v`            | `{"a": {"$eq": v}}`                                 |
//! | `a ew "x"`          | `{"a": {"$regex": "x$", "$options": "i"}}`          |
//! | `a ge v` / `a gt v` | `{"a": {"$gte": v}}` / `{"a": {"$gt": v}}`          |
//! | `a le v` / `a lt v` | `{"a": {"$lte": v}}` / `{"a": {"$lt": v}}`          |
//! | `a pr`              | `{"a": {"$exists": true}}`                          |
//! | `a sw "x"`          | `{"a": {"$regex": "^x", "$options": "i"}}`          |
//! | `x and y and z`     | `{"$and": [x, y, z]}`                               |
//! | `a[x]`              | `{"a": {"$elemMatch": x}}`                          |
//!
//! # Examples
//!
//! ```
//! use scim_filter::{compiler::compile, lexer::tokenize, parser::parse};
//! use serde_json::json;
//!
//! let node = parse(tokenize(r#"name sw "Jo""#)).unwrap();
//! assert_eq!(
//!     compile(&node),
//!     json!({"name": {"$regex": "^Jo", "$options": "i"}})
//! );
//! ```

use serde_json::{Map, Value, json};

use crate::ast::{Comparator, Condition, LogicalOperator, ScimNode};

enum Step<'a> {
    Visit(&'a ScimNode),
    Logical(LogicalOperator, usize),
    Array(&'a str),
}

/// Compile a filter tree into a query document.
///
/// Runs on an explicit work-stack, so arbitrarily long `and` / `or` chains
/// compile without deep recursion.
pub fn compile(node: &ScimNode) -> Value {
    let mut steps = vec![Step::Visit(node)];
    let mut compiled: Vec<Value> = Vec::new();

    while let Some(step) = steps.pop() {
        match step {
            Step::Visit(ScimNode::Condition(condition)) => {
                compiled.push(compile_condition(condition));
            }
            Step::Visit(ScimNode::Logical {
                operator,
                left,
                right,
            }) => {
                let operands = collect_operands(left, right, *operator);
                steps.push(Step::Logical(*operator, operands.len()));
                steps.extend(operands.into_iter().rev().map(Step::Visit));
            }
            Step::Visit(ScimNode::ArrayFilter { path, expr }) => {
                steps.push(Step::Array(path.as_str()));
                steps.push(Step::Visit(&**expr));
            }
            Step::Logical(operator, count) => {
                let operands = compiled.split_off(compiled.len() - count);
                compiled.push(single_entry(operator.mongo_key(), Value::Array(operands)));
            }
            Step::Array(path) => {
                let expr = compiled.pop().unwrap_or_else(|| Value::Object(Map::new()));
                compiled.push(single_entry(path, json!({ "$elemMatch": expr })));
            }
        }
    }

    compiled.pop().unwrap_or_else(|| Value::Object(Map::new()))
}

/// Like [`compile`], yielding `{}` when there is no tree.
pub fn compile_optional(node: Option<&ScimNode>) -> Value {
    node.map(compile).unwrap_or_else(|| Value::Object(Map::new()))
}

/// Gather, in order, the operands of the run of `operator` nodes under a
/// logical node.
fn collect_operands<'a>(
    left: &'a ScimNode,
    right: &'a ScimNode,
    operator: LogicalOperator,
) -> Vec<&'a ScimNode> {
    let mut operands = Vec::new();
    let mut pending = vec![right, left];

    while let Some(node) = pending.pop() {
        match node {
            ScimNode::Logical {
                operator: op,
                left,
                right,
            } if *op == operator => {
                pending.push(&**right);
                pending.push(&**left);
            }
            other => operands.push(other),
        }
    }
    operands
}

fn compile_condition(condition: &Condition) -> Value {
    let path = condition.attribute_path.as_str();
    let value = || {
        condition
            .value
            .clone()
            .map(Value::from)
            .unwrap_or(Value::Null)
    };
    let pattern = || {
        condition
            .value
            .as_ref()
            .map(|v| escape_regex(&v.to_string()))
            .unwrap_or_default()
    };

    let test = match condition.comparator {
        Comparator::ArrayContains => return single_entry(path, value()),
        Comparator::Contains => json!({ "$regex": pattern(), "$options": "i" }),
        Comparator::Equal => json!({ "$eq": value() }),
        Comparator::EndsWith => json!({ "$regex": format!("{}$", pattern()), "$options": "i" }),
        Comparator::GreaterEqual => json!({ "$gte": value() }),
        Comparator::GreaterThan => json!({ "$gt": value() }),
        Comparator::LessEqual => json!({ "$lte": value() }),
        Comparator::LessThan => json!({ "$lt": value() }),
        Comparator::Present => json!({ "$exists": true }),
        Comparator::StartsWith => json!({ "$regex": format!("^{}", pattern()), "$options": "i" }),
    };
    single_entry(path, test)
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

/// Backslash-escape regex metacharacters so the text matches literally.
pub fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(
            ch,
            '.' | '*' | '+' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']' | '\\'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
