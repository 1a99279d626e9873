
use crate::{
    config::FilterConfig,
    error::CompileError,
    query::{
        ComparisonNode, Expression, ExpressionNode, FieldPath, Literal, Operator, Parameters,
        Predicate, build, compile,
    },
    record::Record,
    schema::LeafKind,
    test_fixtures::{Mock, Nested, child, date, mock_schema},
};

fn predicate(query: &[(&str, &str)]) -> Result<Predicate, CompileError> {
    let schema = mock_schema();
    let params: Parameters = query.iter().copied().collect();
    let expression = build(&schema, &params, &FilterConfig::default());

    compile(&expression, &schema)
}

fn accepts(query: &[(&str, &str)], record: &Mock) -> bool {
    predicate(query)
        .expect("query should compile")
        .matches(record)
}

fn leaf_expression(path: &str, operator: Operator, literal: Literal, kind: LeafKind) -> Expression {
    Expression::Tree(ExpressionNode::And(vec![ExpressionNode::Leaf(
        ComparisonNode {
            path: FieldPath::parse(path),
            operator,
            literal,
            kind,
        },
    )]))
}

// ---- empty / shape -------------------------------------------------------

#[test]
fn empty_expression_compiles_to_no_predicate() {
    let predicate = compile(&Expression::Empty, &mock_schema()).expect("empty compiles");

    assert!(predicate.is_none());
    assert!(predicate.expression().is_none());
    assert!(predicate.matches(&Mock::default()));
}

#[test]
fn compiled_predicate_keeps_rendered_expression() {
    let predicate = predicate(&[("intprop", "1,2")]).expect("compiles");
    assert_eq!(predicate.expression(), Some("(intprop == 1 OR intprop == 2)"));
}

#[test]
fn predicate_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Predicate>();
}

#[test]
fn into_fn_filters_records() {
    let records = [
        Mock {
            int_prop: 1,
            ..Mock::default()
        },
        Mock {
            int_prop: 2,
            ..Mock::default()
        },
    ];

    let keep = predicate(&[("intprop>", "2")]).expect("compiles").into_fn();
    let kept: Vec<i32> = records
        .iter()
        .filter(|record| keep(*record))
        .map(|record| record.int_prop)
        .collect();
    assert_eq!(kept, vec![2]);
}

// ---- bool ----------------------------------------------------------------

#[test]
fn bool_equality_and_inequality() {
    let record = Mock::default();

    assert!(accepts(&[("boolprop", "false")], &record));
    assert!(!accepts(&[("boolprop", "true")], &record));
    assert!(accepts(&[("boolprop!", "true")], &record));
    assert!(accepts(&[("boolprop", "FALSE")], &record));
}

#[test]
fn null_against_non_nullable_field_is_rejected() {
    for (key, value) in [("boolprop", "null"), ("intprop", "null"), ("intprop!", "null")] {
        let err = predicate(&[(key, value)]).unwrap_err();
        assert!(
            matches!(err, CompileError::NullComparison { ref path, .. } if path == key.trim_end_matches('!')),
            "unexpected error {err:?}"
        );
    }
}

#[test]
fn null_against_nullable_field_tests_absence() {
    let empty = Mock::default();
    let set = Mock {
        nullable_bool_prop: Some(true),
        nullable_int_prop: Some(24),
        ..Mock::default()
    };

    assert!(accepts(&[("nullableboolprop", "null")], &empty));
    assert!(!accepts(&[("nullableboolprop", "null")], &set));
    assert!(accepts(&[("nullableintprop!", "null")], &set));
    assert!(!accepts(&[("nullableintprop!", "null")], &empty));
}

#[test]
fn null_fields_fail_value_comparisons() {
    let empty = Mock::default();

    assert!(!accepts(&[("nullableboolprop", "true")], &empty));
    assert!(!accepts(&[("nullableintprop>", "0")], &empty));
    assert!(accepts(&[("nullableintprop!", "24")], &empty));
}

#[test]
fn ordering_on_bool_is_rejected() {
    let err = predicate(&[("boolprop<", "true")]).unwrap_err();
    assert!(matches!(err, CompileError::InvalidOperator { op: Operator::Le, .. }));
}

// ---- numeric -------------------------------------------------------------

#[test]
fn numeric_comparisons_are_inclusive() {
    let record = Mock {
        int_prop: 24,
        ..Mock::default()
    };

    assert!(accepts(&[("intprop", "24")], &record));
    assert!(accepts(&[("intprop<", "24")], &record));
    assert!(accepts(&[("intprop>", "24")], &record));
    assert!(!accepts(&[("intprop>", "25")], &record));
    assert!(!accepts(&[("intprop!", "24")], &record));
    assert!(accepts(&[("intprop", "1,24,99")], &record));
}

#[test]
fn numeric_literals_widen_across_representations() {
    let record = Mock {
        long_prop: i64::MIN,
        int_prop: 3,
        ..Mock::default()
    };

    assert!(accepts(&[("longprop", "-9223372036854775808")], &record));
    assert!(!accepts(&[("intprop", "18446744073709551615")], &record));
    assert!(accepts(&[("intprop<", "3.5")], &record));
    assert!(accepts(&[("intprop", "3.0")], &record));
}

#[test]
fn malformed_literals_are_rejected() {
    let cases = [
        ("intprop", "abc"),
        ("boolprop", "yes"),
        ("datetimeprop", "not-a-date"),
        ("enumprop", "Funday"),
        ("intprop", "NaN"),
    ];

    for (key, value) in cases {
        let err = predicate(&[(key, value)]).unwrap_err();
        assert!(err.is_literal_error(), "{key}={value} gave {err:?}");
        assert_eq!(err.path(), key);
    }
}

#[test]
fn string_operators_on_non_text_fields_are_rejected() {
    for key in ["intprop^", "boolprop$", "datetimeprop*", "enumprop^"] {
        let err = predicate(&[(key, "1")]).unwrap_err();
        assert!(
            matches!(err, CompileError::InvalidOperator { ref op, .. } if op.is_text_only()),
            "{key} gave {err:?}"
        );
    }
}

// ---- text ----------------------------------------------------------------

fn with_text(s: &str) -> Mock {
    Mock {
        string_prop: Some(s.to_string()),
        ..Mock::default()
    }
}

#[test]
fn text_equality_is_case_insensitive() {
    let record = with_text("Hello");

    assert!(accepts(&[("stringprop", "hello")], &record));
    assert!(accepts(&[("stringprop", "HELLO")], &record));
    assert!(!accepts(&[("stringprop!", "hello")], &record));
    assert!(!accepts(&[("stringprop", "hell")], &record));
}

#[test]
fn text_substring_operators_are_case_sensitive() {
    let record = with_text("Hello world");

    assert!(accepts(&[("stringprop^", "Hello")], &record));
    assert!(!accepts(&[("stringprop^", "hello")], &record));
    assert!(accepts(&[("stringprop$", "world")], &record));
    assert!(!accepts(&[("stringprop$", "World")], &record));
    assert!(accepts(&[("stringprop*", "o w")], &record));
    assert!(!accepts(&[("stringprop*", "O W")], &record));
}

#[test]
fn text_ordering_compares_for_equality() {
    let record = with_text("abc");

    assert!(accepts(&[("stringprop<", "ABC")], &record));
    assert!(!accepts(&[("stringprop>", "abd")], &record));
}

#[test]
fn absent_text_never_matches_substrings() {
    let record = Mock::default();

    assert!(!accepts(&[("stringprop*", "")], &record));
    assert!(!accepts(&[("stringprop", "x")], &record));
    assert!(accepts(&[("stringprop!", "x")], &record));
    assert!(accepts(&[("stringprop", "null")], &record));
}

// ---- enum ----------------------------------------------------------------

#[test]
fn enum_equality_ignores_case() {
    let record = Mock {
        enum_prop: 1,
        ..Mock::default()
    };

    assert!(accepts(&[("enumprop", "Monday")], &record));
    assert!(accepts(&[("enumprop", "monday")], &record));
    assert!(!accepts(&[("enumprop!", "MONDAY")], &record));
    assert!(accepts(&[("enumprop", "Sunday,Monday")], &record));
}

#[test]
fn enum_ordering_follows_declaration_order() {
    let wednesday = Mock {
        enum_prop: 3,
        ..Mock::default()
    };

    assert!(accepts(&[("enumprop>", "Tuesday")], &wednesday));
    assert!(accepts(&[("enumprop>", "Wednesday")], &wednesday));
    assert!(!accepts(&[("enumprop>", "Thursday")], &wednesday));
    assert!(accepts(&[("enumprop<", "saturday")], &wednesday));
}

#[test]
fn open_enums_support_equality_only() {
    let expression = leaf_expression(
        "mode",
        Operator::Ge,
        Literal::Bare("Fast".into()),
        LeafKind::Enum { variants: vec![] },
    );
    let schema = crate::schema::Schema::builder("Open")
        .enumeration("Mode", Vec::<String>::new())
        .build()
        .expect("schema");

    let err = compile(&expression, &schema).unwrap_err();
    assert!(matches!(err, CompileError::InvalidOperator { .. }));

    let expression = leaf_expression(
        "mode",
        Operator::Eq,
        Literal::Bare("anything".into()),
        LeafKind::Enum { variants: vec![] },
    );
    assert!(compile(&expression, &schema).is_ok());
}

// ---- date/time -----------------------------------------------------------

#[test]
fn date_time_comparisons() {
    let record = Mock {
        date_time_prop: date(2021, 6, 15),
        ..Mock::default()
    };

    assert!(accepts(&[("datetimeprop>", "2020-01-01")], &record));
    assert!(!accepts(&[("datetimeprop<", "2020-01-01")], &record));
    assert!(accepts(&[("datetimeprop", "2021-06-15T00:00:00")], &record));
    assert!(accepts(&[("datetimeprop", "2021-06-15T00:00:00Z")], &record));
    assert!(accepts(&[("datetimeprop!", "2021-06-16")], &record));
}

#[test]
fn nullable_date_time() {
    let empty = Mock::default();
    let set = Mock {
        nullable_date_time_prop: Some(date(2000, 1, 1)),
        ..Mock::default()
    };

    assert!(accepts(&[("nullabledatetimeprop", "null")], &empty));
    assert!(!accepts(&[("nullabledatetimeprop>", "1999-12-31")], &empty));
    assert!(accepts(&[("nullabledatetimeprop>", "1999-12-31")], &set));

    let err = predicate(&[("datetimeprop", "null")]).unwrap_err();
    assert!(matches!(err, CompileError::NullComparison { .. }));
}

// ---- nested and collections ----------------------------------------------

#[test]
fn nested_record_fields() {
    let record = Mock {
        nested_prop: Some(Nested {
            name: "Widget".into(),
            count: 4,
        }),
        ..Mock::default()
    };

    assert!(accepts(&[("nestedprop-name", "widget")], &record));
    assert!(accepts(&[("nestedprop.count>", "3")], &record));
    assert!(!accepts(&[("nestedprop-count<", "3")], &record));
    assert!(!accepts(&[("nestedprop-name", "widget")], &Mock::default()));
}

#[test]
fn collections_match_any_element() {
    let record = Mock {
        array_prop: vec![date(2020, 1, 1), date(2022, 1, 1)],
        children: vec![child("a", 1), child("b", 2)],
        ..Mock::default()
    };

    assert!(accepts(&[("arrayprop", "2022-01-01")], &record));
    assert!(!accepts(&[("arrayprop", "2021-01-01")], &record));
    assert!(accepts(&[("arrayprop>", "2021-01-01")], &record));
    assert!(accepts(&[("children-name", "B")], &record));
    assert!(accepts(&[("children-count>", "2")], &record));
    assert!(!accepts(&[("children-count>", "3")], &record));
}

#[test]
fn collection_inequality_means_no_element_equals() {
    let record = Mock {
        children: vec![child("a", 1), child("b", 2)],
        ..Mock::default()
    };

    assert!(!accepts(&[("children-name!", "a")], &record));
    assert!(accepts(&[("children-name!", "c")], &record));
    assert!(!accepts(&[("children-name", "a")], &Mock::default()));
}

#[test]
fn indices_select_one_element() {
    let record = Mock {
        children: vec![child("a", 1), child("b", 2)],
        ..Mock::default()
    };

    assert!(accepts(&[("children[1]-name", "b")], &record));
    assert!(!accepts(&[("children[0]-name", "b")], &record));
    assert!(!accepts(&[("children[5]-name", "a")], &record));
}

// ---- hand-built trees ----------------------------------------------------

#[test]
fn unknown_paths_are_rejected() {
    let expression = leaf_expression(
        "nosuch",
        Operator::Eq,
        Literal::Bare("1".into()),
        LeafKind::Int,
    );

    let err = compile(&expression, &mock_schema()).unwrap_err();
    assert_eq!(
        err,
        CompileError::UnknownField {
            path: "nosuch".into()
        }
    );
}

#[test]
fn record_terminals_are_rejected() {
    let expression = leaf_expression(
        "nestedprop",
        Operator::Eq,
        Literal::Quoted("x".into()),
        LeafKind::Text,
    );

    let err = compile(&expression, &mock_schema()).unwrap_err();
    assert!(matches!(err, CompileError::InvalidOperator { ref kind, .. } if kind == "record"));
}

#[test]
fn missing_fields_never_match() {
    struct Empty;

    impl Record for Empty {
        fn field(&self, _: &str) -> crate::record::Slot<'_> {
            crate::record::Slot::Missing
        }
    }

    let predicate = predicate(&[("intprop", "0")]).expect("compiles");
    assert!(!predicate.matches(&Empty));
}

// ---- configuration -------------------------------------------------------

fn predicate_with(query: &[(&str, &str)], config: &FilterConfig) -> Result<Predicate, CompileError> {
    let schema = mock_schema();
    let params: Parameters = query.iter().copied().collect();

    compile(&build(&schema, &params, config), &schema)
}

#[test]
fn repeated_keys_split_on_any_delimiter() {
    let config = FilterConfig::default()
        .with_value_delimiter('|')
        .expect("pipe is a valid delimiter");
    let predicate = predicate_with(&[("intprop", "1"), ("intprop", "2|3")], &config)
        .expect("repeated keys form one OR group");

    for (int_prop, expected) in [(1, true), (2, true), (3, true), (4, false)] {
        let mock = Mock {
            int_prop,
            ..Mock::default()
        };
        assert_eq!(predicate.matches(&mock), expected, "intprop = {int_prop}");
    }
}

#[test]
fn untrimmed_literals_are_parsed_as_given() {
    let raw = FilterConfig::default();
    for (key, literal) in [("intprop", " 24"), ("datetimeprop", "2020-01-01 ")] {
        let err = predicate_with(&[(key, literal)], &raw).unwrap_err();
        assert!(
            matches!(err, CompileError::InvalidLiteral { ref path, .. } if path == key),
            "{key}={literal:?}"
        );
    }

    let trimmed = FilterConfig::default().with_trim_values(true);
    let mock = Mock {
        int_prop: 24,
        string_prop: Some("a".into()),
        date_time_prop: date(2020, 1, 1),
        ..Mock::default()
    };
    for (key, literal) in [
        ("intprop", " 24"),
        ("stringprop", " a"),
        ("datetimeprop", "2020-01-01 "),
    ] {
        let predicate = predicate_with(&[(key, literal)], &trimmed).expect("compiles");
        assert!(predicate.matches(&mock), "{key}={literal:?}");
    }
    assert!(!accepts(&[("stringprop", " a")], &mock));
}
