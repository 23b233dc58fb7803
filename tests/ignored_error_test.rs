use errdrop::{IgnoredErrorRule, ModuleName, Range, ERROR_IGNORED_DETAILS, ERROR_IGNORED_MESSAGE};
use indoc::indoc;
use pretty_assertions::assert_eq;

/// The source text covered by `range`, assuming the range sits on one line.
fn snippet(source: &str, range: Range) -> String {
    let line = source
        .lines()
        .nth(range.start.line - 1)
        .expect("range starts inside the source");
    line.chars()
        .skip(range.start.column - 1)
        .take(range.end.column - range.start.column)
        .collect()
}

fn findings_with(rule: &IgnoredErrorRule, source: &str) -> Vec<String> {
    let file = syn::parse_file(source).expect("fixture parses");
    rule.check_file(ModuleName::crate_root(), &file)
        .into_iter()
        .map(|finding| snippet(source, finding.range))
        .collect()
}

fn findings(source: &str) -> Vec<String> {
    findings_with(&IgnoredErrorRule::strict(), source)
}

#[test]
fn reports_wildcard_on_builtin_err() {
    let source = indoc! {"
        fn f(r: Result<(), String>) -> u8 {
            match r {
                Ok(()) => 1,
                Err(_) => 1,
            }
        }
    "};
    let file = syn::parse_file(source).expect("fixture parses");
    let found = IgnoredErrorRule::strict().check_file(ModuleName::crate_root(), &file);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].message, ERROR_IGNORED_MESSAGE);
    assert_eq!(found[0].details, vec![ERROR_IGNORED_DETAILS.to_string()]);
    assert_eq!(found[0].range.to_string(), "4:9-4:15");
    assert_eq!(snippet(source, found[0].range), "Err(_)");
}

#[test]
fn ignores_err_of_a_local_enum() {
    let source = indoc! {"
        enum Thing { Err(()) }
        use Thing::Err;

        fn f(t: Thing) -> u8 {
            match t {
                Err(_) => 1,
            }
        }
    "};
    assert_eq!(findings(source), Vec::<String>::new());
}

#[test]
fn ignores_qualified_err_of_another_type() {
    let source = indoc! {"
        enum Thing { Err(()) }

        fn f(t: Thing) -> u8 {
            match t {
                Thing::Err(_) => 1,
            }
        }
    "};
    assert_eq!(findings(source), Vec::<String>::new());
}

#[test]
fn ignores_err_with_a_used_or_structured_payload() {
    let source = indoc! {"
        fn f(r: Result<(), ()>, s: Result<(), String>) {
            match r {
                Err(()) => {}
                Ok(_) => {}
            }
            match s {
                Err(e) => drop(e),
                Ok(_) => {}
            }
        }
    "};
    assert_eq!(findings(source), Vec::<String>::new());
}

#[test]
fn reports_only_the_inner_pattern_when_nested() {
    let source = indoc! {"
        fn f(o: Option<Result<(), String>>) {
            match o {
                Some(Err(_)) => {}
                _ => {}
            }
        }
    "};
    assert_eq!(findings(source), vec!["Err(_)"]);
}

#[test]
fn reports_through_every_pattern_wrapper() {
    let source = indoc! {"
        fn f(
            items: &[Result<(), String>],
            pair: (u8, Result<(), String>),
            r: Result<(), String>,
        ) {
            match items {
                [Err(_), ..] => {}
                _ => {}
            }
            match items {
                [Err(_)] => {}
                _ => {}
            }
            match pair {
                (_, Err(_)) => {}
                _ => {}
            }
            match r {
                error @ Err(_) => drop(error),
                _ => {}
            }
            match &r {
                &(Err(_)) => {}
                _ => {}
            }
        }
    "};
    assert_eq!(findings(source), vec!["Err(_)"; 5]);
}

#[test]
fn qualified_builtin_paths_match_the_prelude() {
    let source = indoc! {"
        fn f(r: Result<(), String>) {
            match r {
                Result::Err(_) => {}
                _ => {}
            }
            match r {
                std::result::Result::Err(_) => {}
                core::result::Result::Err(_) => {}
                Ok(_) => {}
            }
        }
    "};
    assert_eq!(
        findings(source),
        vec![
            "Result::Err(_)",
            "std::result::Result::Err(_)",
            "core::result::Result::Err(_)"
        ]
    );
}

#[test]
fn or_patterns_report_each_alternative() {
    let source = indoc! {"
        fn f(r: Result<(), String>, s: Result<(), String>) {
            match (r, s) {
                (Err(_), _) | (_, Err(_)) => {}
                _ => {}
            }
        }
    "};
    assert_eq!(findings(source).len(), 2);
}

#[test]
fn arms_are_reported_in_source_order() {
    let source = indoc! {"
        fn f(o: Option<Result<(), String>>) {
            match o {
                Some(Err(_)) => {}
                Some(Ok(())) => {}
                None => {}
            }
            match o.unwrap() {
                Ok(()) => {}
                Err(_) => {}
            }
        }
    "};
    let file = syn::parse_file(source).expect("fixture parses");
    let lines: Vec<usize> = IgnoredErrorRule::strict()
        .check_file(ModuleName::crate_root(), &file)
        .iter()
        .map(|finding| finding.range.start.line)
        .collect();
    assert_eq!(lines, vec![3, 9]);
}

#[test]
fn shadowing_is_scoped_to_its_module() {
    let source = indoc! {"
        mod outcome {
            pub enum Outcome { Ok(u8), Err(()) }
            pub use self::Outcome::*;

            pub fn inner(o: Outcome) {
                match o {
                    Err(_) => {}
                    Ok(_) => {}
                }
            }
        }

        fn outer(r: Result<u8, ()>) {
            match r {
                Err(_) => {}
                Ok(_) => {}
            }
        }
    "};
    let file = syn::parse_file(source).expect("fixture parses");
    let found = IgnoredErrorRule::strict().check_file(ModuleName::crate_root(), &file);

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].range.start.line, 15);
}

#[test]
fn name_only_reports_shadowed_constructors_too() {
    let source = indoc! {"
        enum Thing { Err(()) }
        use Thing::Err;

        fn f(t: Thing) {
            match t {
                Err(_) => {}
            }
        }
    "};
    assert_eq!(
        findings_with(&IgnoredErrorRule::name_only(), source),
        vec!["Err(_)"]
    );
}

#[test]
fn matches_inside_closures_and_impls_are_visited() {
    let source = indoc! {"
        struct Loader;

        impl Loader {
            fn load(&self, r: Result<u8, String>) -> u8 {
                let fallback = |r: Result<u8, String>| match r {
                    Ok(v) => v,
                    Err(_) => 0,
                };
                fallback(r)
            }
        }
    "};
    assert_eq!(findings(source), vec!["Err(_)"]);
}

#[test]
fn glob_imports_follow_reexported_variants() {
    let source = indoc! {"
        mod outcome {
            pub enum Outcome { Ok(u8), Err(()) }
            pub use self::Outcome::*;
        }

        use outcome::*;

        fn f(o: outcome::Outcome) {
            match o {
                Err(_) => {}
                Ok(_) => {}
            }
        }
    "};
    assert!(findings(source).is_empty());
    assert_eq!(
        findings_with(&IgnoredErrorRule::name_only(), source),
        vec!["Err(_)"]
    );
}

#[test]
fn modules_declared_after_the_match_in_a_body_shadow_err() {
    let source = indoc! {"
        fn f(e: Result<(), ()>) {
            use helpers::*;
            match e {
                Err(_) => {}
                _ => {}
            }
            mod helpers {
                pub struct Err(pub ());
            }
        }
    "};
    assert!(findings(source).is_empty());
}
