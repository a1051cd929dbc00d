// tests/property_tests.rs

use proptest::prelude::*;
use scim_filter::ast::{Comparator, Condition, LogicalOperator, ScimNode};
use scim_filter::lexer::tokenize;
use scim_filter::parser::Parser;
use scim_filter::scim_to_mongo;
use scim_filter::value::ScimValue;

// ============================================================================
// Generators
// ============================================================================

/// Attribute paths that can never be read as a keyword or comparator.
fn arb_path() -> impl Strategy<Value = String> {
    "[a-z]{1,6}_[a-z0-9]{0,4}(\\.[a-z]{1,6})?"
}

fn arb_value() -> impl Strategy<Value = ScimValue> {
    prop_oneof![
        "[A-Za-z0-9 .@_-]{0,10}"
            .prop_filter("no doubled spaces", |s| !s.contains("  "))
            .prop_map(ScimValue::String),
        (0i64..1_000_000).prop_map(ScimValue::Integer),
        (0u32..10_000, 1u32..100).prop_map(|(whole, frac)| {
            ScimValue::Float(format!("{}.{}", whole, frac).parse().unwrap())
        }),
        any::<bool>().prop_map(ScimValue::Boolean),
    ]
}

fn arb_condition() -> impl Strategy<Value = ScimNode> {
    (
        arb_path(),
        prop::sample::select(Comparator::ALL.to_vec()),
        arb_value(),
    )
        .prop_map(|(path, comparator, value)| {
            let condition = if comparator.takes_value() {
                Condition::new(path, comparator, value)
            } else {
                Condition::present(path)
            };
            ScimNode::Condition(condition)
        })
}

fn arb_node() -> impl Strategy<Value = ScimNode> {
    arb_condition().prop_recursive(4, 24, 2, |inner| {
        prop_oneof![
            (
                prop_oneof![Just(LogicalOperator::And), Just(LogicalOperator::Or)],
                inner.clone(),
                inner.clone(),
            )
                .prop_map(|(op, left, right)| ScimNode::logical(op, left, right)),
            (arb_path(), inner).prop_map(|(path, expr)| ScimNode::array_filter(path, expr)),
        ]
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: The rendered filter parses back to the same tree.
    #[test]
    fn prop_display_round_trips(node in arb_node()) {
        let rendered = node.to_string();
        let reparsed = Parser::new(tokenize(&rendered)).parse();
        prop_assert_eq!(reparsed, Ok(node), "rendered: {}", rendered);
    }

    /// Property: Valid filters always compile to a JSON object.
    #[test]
    fn prop_valid_filters_compile_to_objects(node in arb_node()) {
        let query = scim_to_mongo(node.to_string().as_str());
        prop_assert!(query.is_ok());
        prop_assert!(query.unwrap().is_object());
    }

    /// Property: Arbitrary input never panics the pipeline.
    #[test]
    fn prop_arbitrary_input_never_panics(input in "[ -~]{0,40}") {
        let _ = scim_to_mongo(input.as_str());
    }
}
