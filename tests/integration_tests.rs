use scim_filter::{ParseError, ParseOptions, scim_to_mongo, scim_to_mongo_with};
use serde_json::json;

// ============================================================================
// Empty Input
// ============================================================================

#[test]
fn test_empty_filter() {
    assert_eq!(scim_to_mongo("").unwrap(), json!({}));
    assert_eq!(scim_to_mongo(None::<&str>).unwrap(), json!({}));
    assert_eq!(scim_to_mongo("  \n\t").unwrap(), json!({}));
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_simple_equality() {
    assert_eq!(
        scim_to_mongo(r#"userName eq "Joe""#).unwrap(),
        json!({"userName": {"$eq": "Joe"}})
    );
}

#[test]
fn test_and_of_two_conditions() {
    assert_eq!(
        scim_to_mongo(r#"userName eq "Joe" and drinksCoffee eq true"#).unwrap(),
        json!({"$and": [
            {"userName": {"$eq": "Joe"}},
            {"drinksCoffee": {"$eq": true}}
        ]})
    );
}

#[test]
fn test_array_filter() {
    assert_eq!(
        scim_to_mongo(r#"emails[type eq "work"]"#).unwrap(),
        json!({"emails": {"$elemMatch": {"type": {"$eq": "work"}}}})
    );
}

#[test]
fn test_present() {
    assert_eq!(
        scim_to_mongo("age pr").unwrap(),
        json!({"age": {"$exists": true}})
    );
}

#[test]
fn test_starts_with() {
    assert_eq!(
        scim_to_mongo(r#"name sw "Jo""#).unwrap(),
        json!({"name": {"$regex": "^Jo", "$options": "i"}})
    );
}

#[test]
fn test_array_filter_with_and() {
    assert_eq!(
        scim_to_mongo(r#"emails[type eq "work" and primary eq true]"#).unwrap(),
        json!({"emails": {"$elemMatch": {"$and": [
            {"type": {"$eq": "work"}},
            {"primary": {"$eq": true}}
        ]}}})
    );
}

#[test]
fn test_three_way_and_is_flat() {
    let query = scim_to_mongo("a eq 1 and b eq 2 and c eq 3").unwrap();
    assert_eq!(
        query,
        json!({"$and": [{"a": {"$eq": 1}}, {"b": {"$eq": 2}}, {"c": {"$eq": 3}}]})
    );
}

#[test]
fn test_mixed_chain_nests_left() {
    assert_eq!(
        scim_to_mongo("a eq 1 and b eq 2 or c eq 3").unwrap(),
        json!({"$or": [
            {"$and": [{"a": {"$eq": 1}}, {"b": {"$eq": 2}}]},
            {"c": {"$eq": 3}}
        ]})
    );
    assert_eq!(
        scim_to_mongo("a eq 1 or b eq 2 and c eq 3").unwrap(),
        json!({"$and": [
            {"$or": [{"a": {"$eq": 1}}, {"b": {"$eq": 2}}]},
            {"c": {"$eq": 3}}
        ]})
    );
}

#[test]
fn test_grouping_changes_shape() {
    assert_eq!(
        scim_to_mongo("a eq 1 or (b eq 2 and c eq 3)").unwrap(),
        json!({"$or": [
            {"a": {"$eq": 1}},
            {"$and": [{"b": {"$eq": 2}}, {"c": {"$eq": 3}}]}
        ]})
    );
}

#[test]
fn test_quoting_controls_typing() {
    assert_eq!(
        scim_to_mongo("age eq 30").unwrap(),
        json!({"age": {"$eq": 30}})
    );
    assert_eq!(
        scim_to_mongo(r#"age eq "30""#).unwrap(),
        json!({"age": {"$eq": "30"}})
    );
}

#[test]
fn test_regex_escaping_end_to_end() {
    assert_eq!(
        scim_to_mongo(r#"name co "a.b""#).unwrap(),
        json!({"name": {"$regex": r"a\.b", "$options": "i"}})
    );
}

#[test]
fn test_realistic_user_query() {
    let filter = r#"userType eq "Employee" and (emails.value co "example.com" or emails[type eq "work" and value ew ".org"]) and meta.lastModified gt "2011-05-13T04:42:34Z""#;
    assert_eq!(
        scim_to_mongo(filter).unwrap(),
        json!({"$and": [
            {"userType": {"$eq": "Employee"}},
            {"$or": [
                {"emails.value": {"$regex": r"example\.com", "$options": "i"}},
                {"emails": {"$elemMatch": {"$and": [
                    {"type": {"$eq": "work"}},
                    {"value": {"$regex": r"\.org$", "$options": "i"}}
                ]}}}
            ]},
            {"meta.lastModified": {"$gt": "2011-05-13T04:42:34Z"}}
        ]})
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_error_cases() {
    assert!(matches!(
        scim_to_mongo(r#"userName foo "x""#),
        Err(ParseError::UnsupportedComparator { .. })
    ));
    assert!(matches!(
        scim_to_mongo(r#"(userName eq "Joe""#),
        Err(ParseError::MissingClosing { expected: ')', .. })
    ));
    assert!(matches!(
        scim_to_mongo("userName eq"),
        Err(ParseError::InvalidCondition { .. })
    ));
}

#[test]
fn test_custom_depth_limit() {
    let options = ParseOptions { max_depth: 1 };
    assert!(scim_to_mongo_with(Some("(a pr)"), options).is_ok());
    assert!(matches!(
        scim_to_mongo_with(Some("((a pr))"), options),
        Err(ParseError::NestingTooDeep { limit: 1, .. })
    ));
}

// ============================================================================
// Long Chains
// ============================================================================

fn chain(terms: usize, operator: impl Fn(usize) -> &'static str) -> String {
    let mut filter = String::from("a0 eq 0");
    for i in 1..terms {
        filter.push_str(&format!(" {} a{} eq {}", operator(i), i, i));
    }
    filter
}

#[test]
fn test_long_and_chain_compiles_flat() {
    let query = scim_to_mongo(chain(100_000, |_| "and").as_str()).unwrap();
    let operands = query["$and"].as_array().unwrap();
    assert_eq!(operands.len(), 100_000);
    assert_eq!(operands[0], json!({"a0": {"$eq": 0}}));
    assert_eq!(operands[99_999], json!({"a99999": {"$eq": 99_999}}));
}

#[test]
fn test_long_or_chain_compiles_flat() {
    let query = scim_to_mongo(chain(100_000, |_| "or").as_str()).unwrap();
    assert_eq!(query["$or"].as_array().map(Vec::len), Some(100_000));
}

#[test]
fn test_alternating_chain_errors_instead_of_aborting() {
    for terms in [2_000, 20_000] {
        let input = chain(terms, |i| if i % 2 == 0 { "and" } else { "or" });
        assert!(matches!(
            scim_to_mongo(input.as_str()),
            Err(ParseError::NestingTooDeep { .. })
        ));
    }
}

#[test]
fn test_alternating_chain_within_limit_compiles() {
    // 3 switches: and -> or -> and -> or
    assert_eq!(
        scim_to_mongo("a pr and b pr or c pr and d pr or e pr").unwrap(),
        json!({"$or": [
            {"$and": [
                {"$or": [
                    {"$and": [{"a": {"$exists": true}}, {"b": {"$exists": true}}]},
                    {"c": {"$exists": true}}
                ]},
                {"d": {"$exists": true}}
            ]},
            {"e": {"$exists": true}}
        ]})
    );
}
