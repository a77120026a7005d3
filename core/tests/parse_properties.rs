use std::collections::BTreeMap;

use getopts_core::{
    CompiledTable, DefinitionError, DefinitionTable, OptionKind, OptionValue, ParseResult,
};

fn compile(defs: DefinitionTable) -> CompiledTable {
    CompiledTable::compile(&defs).expect("definition table should compile")
}

fn single(kind: OptionKind) -> CompiledTable {
    compile(DefinitionTable::new().option("opt", kind, &["x", "opt"]))
}

fn value(result: &ParseResult) -> &OptionValue {
    result.get("opt").expect("declared option must be in the result")
}

fn strs(items: &[&str]) -> OptionValue {
    OptionValue::List(items.iter().map(|s| OptionValue::Str(s.to_string())).collect())
}

// ---------------------------------------------------------------------------
// Absent options
// ---------------------------------------------------------------------------

#[test]
fn absent_options_get_their_kind_default() {
    let mut defs = DefinitionTable::new();
    let mut expected = BTreeMap::new();
    for (i, kind) in OptionKind::ALL.into_iter().enumerate() {
        let id = format!("opt{i}");
        let long = format!("long{i}");
        defs = defs.option(&id, kind, &[long.as_str()]);
        expected.insert(id, kind.absent());
    }
    let table = compile(defs);

    let result = table.parse(["file", "other"]);
    assert!(result.error_messages().is_none());
    assert_eq!(result.values(), &expected);
    assert_eq!(result.get("opt2"), Some(&OptionValue::Count(0)));
    assert_eq!(result.get("opt0"), Some(&OptionValue::Bool(false)));
}

// ---------------------------------------------------------------------------
// Switch kinds
// ---------------------------------------------------------------------------

#[test]
fn switches_never_consume_following_tokens() {
    for kind in [OptionKind::Simple, OptionKind::Toggle, OptionKind::Count] {
        let table = single(kind);
        let result = table.parse(["-x", "value", "--opt", "other"]);
        assert!(!result.has_errors(), "{kind}");
        assert_eq!(result.positionals(), ["value", "other"], "{kind}");
    }
}

#[test]
fn toggle_is_true_for_odd_counts() {
    let table = single(OptionKind::Toggle);
    for n in 0..6 {
        let args = vec!["-x"; n];
        let expected = OptionValue::Bool(n % 2 == 1);
        assert_eq!(value(&table.parse(args)), &expected, "n = {n}");
    }
    // Spellings mix freely.
    assert_eq!(value(&table.parse(["-xx", "--opt"])), &OptionValue::Bool(true));
}

#[test]
fn count_counts_every_spelling() {
    let table = single(OptionKind::Count);
    let result = table.parse(["-xxx", "--opt", "-x"]);
    assert_eq!(value(&result), &OptionValue::Count(5));
}

// ---------------------------------------------------------------------------
// Value kinds
// ---------------------------------------------------------------------------

#[test]
fn value_last_wins() {
    let table = single(OptionKind::Value);
    let result = table.parse(["-x", "a", "--opt=b", "-xc"]);
    assert_eq!(value(&result), &OptionValue::Str("c".into()));
}

#[test]
fn value_multiple_keeps_all_in_order() {
    let table = single(OptionKind::ValueMultiple);
    assert_eq!(value(&table.parse(["-xa", "--opt", "b"])), &strs(&["a", "b"]));
    assert_eq!(value(&table.parse(["-xa"])), &strs(&["a"]));
}

#[test]
fn value_automatic_collapses_single_occurrence() {
    let table = single(OptionKind::ValueAutomatic);
    assert_eq!(value(&table.parse(["-xa"])), &OptionValue::Str("a".into()));
    assert_eq!(value(&table.parse(["-xa", "-xb"])), &strs(&["a", "b"]));
}

#[test]
fn missing_value_reports_spelling_used() {
    let table = single(OptionKind::Value);
    let result = table.parse(["--opt"]);
    assert_eq!(
        result.error_messages(),
        Some(vec![r#"Missing argument to option "--opt""#.to_string()])
    );
    assert_eq!(value(&result), &OptionValue::Bool(false));
}

#[test]
fn cluster_with_missing_value() {
    let table = compile(
        DefinitionTable::new()
            .option("a", OptionKind::Simple, &["a"])
            .option("b", OptionKind::Value, &["b"]),
    );
    let (errors, values, args) = table.parse(["-ab"]).into_parts();
    assert_eq!(
        errors,
        Some(vec![r#"Missing argument to option "-b""#.to_string()])
    );
    assert_eq!(values["a"], OptionValue::Bool(true));
    assert_eq!(values["b"], OptionValue::Bool(false));
    assert!(args.is_empty());
}

// ---------------------------------------------------------------------------
// Optional kinds
// ---------------------------------------------------------------------------

#[test]
fn optional_prefers_most_recent_value_over_later_flag() {
    let table = single(OptionKind::Optional);
    let result = table.parse(["-x", "-x=x", "--opt"]);
    assert_eq!(value(&result), &OptionValue::Str("x".into()));
}

#[test]
fn optional_without_value_is_true() {
    let table = single(OptionKind::Optional);
    assert_eq!(value(&table.parse(["--opt"])), &OptionValue::Bool(true));
}

#[test]
fn optional_uses_attached_value_only() {
    let table = single(OptionKind::Optional);
    let result = table.parse(["-x=5"]);
    assert_eq!(value(&result), &OptionValue::Str("5".into()));
    assert!(result.positionals().is_empty());

    let result = table.parse(["-x", "5"]);
    assert_eq!(value(&result), &OptionValue::Bool(true));
    assert_eq!(result.positionals(), ["5"]);
}

#[test]
fn optional_multiple_and_automatic_keep_markers() {
    let table = single(OptionKind::OptionalMultiple);
    assert_eq!(
        value(&table.parse(["-x", "--opt=a"])),
        &OptionValue::List(vec![OptionValue::Bool(true), OptionValue::Str("a".into())])
    );

    let table = single(OptionKind::OptionalAutomatic);
    assert_eq!(value(&table.parse(["-x"])), &OptionValue::Bool(true));
    assert_eq!(
        value(&table.parse(["-xa", "-x"])),
        &OptionValue::List(vec![OptionValue::Str("a".into()), OptionValue::Bool(true)])
    );
}

// ---------------------------------------------------------------------------
// Associative
// ---------------------------------------------------------------------------

#[test]
fn associative_collects_pairs() {
    let table = compile(DefinitionTable::new().option("set", OptionKind::Associative, &["set"]));
    let result = table.parse(["--set", "a=1", "--set", "b=2"]);
    assert!(result.error_messages().is_none());
    let expected = BTreeMap::from([
        ("a".to_string(), "1".to_string()),
        ("b".to_string(), "2".to_string()),
    ]);
    assert_eq!(result.get("set"), Some(&OptionValue::Map(expected)));
}

#[test]
fn associative_duplicate_key_keeps_first() {
    let table = compile(DefinitionTable::new().option("set", OptionKind::Associative, &["set"]));
    let result = table.parse(["--set", "a=1", "--set", "a=2"]);
    assert_eq!(
        result.error_messages(),
        Some(vec![r#"Duplicate key "a" to option "--set""#.to_string()])
    );
    let expected = BTreeMap::from([("a".to_string(), "1".to_string())]);
    assert_eq!(result.get("set"), Some(&OptionValue::Map(expected)));
}

#[test]
fn associative_malformed_and_missing() {
    let table = compile(DefinitionTable::new().option("tag", OptionKind::Associative, &["t", "tag"]));
    let result = table.parse(["--tag", "novalue", "-t"]);
    assert_eq!(
        result.error_messages(),
        Some(vec![
            r#"Malformed argument to option "--tag" (a "=" is missing)"#.to_string(),
            r#"Missing argument to option "-t""#.to_string(),
        ])
    );
}

// ---------------------------------------------------------------------------
// Separator, positionals, errors
// ---------------------------------------------------------------------------

#[test]
fn separator_makes_everything_positional() {
    let table = single(OptionKind::Simple);
    let result = table.parse(["--", "-x", "file", "--"]);
    assert!(!result.has_errors());
    assert_eq!(value(&result), &OptionValue::Bool(false));
    assert_eq!(result.positionals(), ["-x", "file", "--"]);
}

#[test]
fn bare_dash_is_an_error_not_a_positional() {
    let table = single(OptionKind::Simple);
    let result = table.parse(["-", "file"]);
    assert_eq!(
        result.error_messages(),
        Some(vec![r#"Invalid option "-""#.to_string()])
    );
    assert_eq!(result.positionals(), ["file"]);
}

#[test]
fn every_error_is_reported_in_one_pass() {
    let table = single(OptionKind::Value);
    let result = table.parse(["--foo", "-y", "-", "pos", "-x"]);
    let errors = result.error_messages().unwrap();
    assert_eq!(
        errors,
        vec![
            r#"Unknown option "--foo""#,
            r#"Unknown option "-y""#,
            r#"Invalid option "-""#,
            r#"Missing argument to option "-x""#,
        ]
    );
    assert_eq!(result.positionals(), ["pos"]);
}

// ---------------------------------------------------------------------------
// Definitions and shaping purity
// ---------------------------------------------------------------------------

#[test]
fn duplicate_spelling_fails_before_any_parse() {
    let defs = DefinitionTable::new()
        .option("verbose", OptionKind::Count, &["v"])
        .option("version", OptionKind::Simple, &["v", "version"]);
    assert_eq!(
        CompiledTable::compile(&defs),
        Err(DefinitionError::DuplicateName("v".into()))
    );
}

#[test]
fn definition_forms_are_equivalent() {
    let compact = DefinitionTable::new().compact("out", "Va o output").unwrap();
    let builder = DefinitionTable::new().option("out", OptionKind::ValueAutomatic, &["o", "output"]);
    let yaml: DefinitionTable = serde_yaml::from_str("out: { kind: Va, names: [o, output] }").unwrap();
    let json: DefinitionTable = serde_json::from_str(r#"{"out": ["Va", "o", "output"]}"#).unwrap();

    assert_eq!(compact, builder);
    assert_eq!(yaml, builder);
    assert_eq!(json, builder);
}

#[test]
fn shaping_is_repeatable() {
    let table = compile(
        DefinitionTable::new()
            .option("o", OptionKind::OptionalMultiple, &["o"])
            .option("s", OptionKind::Associative, &["s"]),
    );
    let state = table.parse_state(["-o", "-oa", "-s", "k=v"]);
    let first = state.shape();
    let second = state.shape();
    assert_eq!(first, second);
    assert_eq!(state.clone().finish().values(), &first);
}

#[test]
fn compiled_table_is_shareable_across_threads() {
    let table = single(OptionKind::Count);
    std::thread::scope(|scope| {
        let handles: Vec<_> = (1..4)
            .map(|n| {
                let table = &table;
                scope.spawn(move || {
                    let args = vec!["-x"; n];
                    table.parse(args).get("opt").cloned()
                })
            })
            .collect();
        for (n, handle) in (1..4).zip(handles) {
            assert_eq!(handle.join().unwrap(), Some(OptionValue::Count(n)));
        }
    });
}
