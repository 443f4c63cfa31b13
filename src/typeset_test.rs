use std::io::Write;
use std::time::{Duration, Instant};

use super::*;

fn ts(src: &str) -> String {
    Typesetter::builtin().typeset(src)
}

#[test]
fn plain_text_passes_through() {
    assert_eq!(ts("x + 2 = 7"), "x + 2 = 7");
}

#[test]
fn math_delimiters_are_dropped() {
    assert_eq!(ts("$x = 5$"), "x = 5");
    assert_eq!(ts("\\(y\\) = 3"), "y = 3");
}

#[test]
fn fractions_wrap_compound_parts() {
    assert_eq!(ts("\\frac{1}{2}"), "1/2");
    assert_eq!(ts("\\frac{x+1}{2y}"), "(x+1)/2y");
    assert_eq!(ts("\\frac12"), "1/2");
}

#[test]
fn scripts_and_roots() {
    assert_eq!(ts("x^{2} + y_1"), "x^2 + y_1");
    assert_eq!(ts("e^{i\\pi}"), "e^(ipi)");
    assert_eq!(ts("\\sqrt{16} = 4"), "sqrt(16) = 4");
}

#[test]
fn operators_map_to_ascii() {
    assert_eq!(ts("3 \\cdot 4 = 12"), "3 * 4 = 12");
    assert_eq!(ts("a \\leq b"), "a <= b");
    assert_eq!(ts("\\left( 1 + 2 \\right) \\times 3"), "( 1 + 2 ) * 3");
}

#[test]
fn text_commands_keep_their_argument() {
    assert_eq!(ts("\\text{area} = 9"), "area = 9");
}

#[test]
fn unknown_commands_keep_their_name() {
    assert_eq!(ts("\\sin x"), "sin x");
}

#[test]
fn trailing_backslash_does_not_panic() {
    assert_eq!(ts("x \\"), "x");
}

#[test]
fn nested_groups_within_the_limit_are_typeset() {
    assert_eq!(ts("\\sqrt{\\sqrt{x}}"), "sqrt(sqrt(x))");
    assert_eq!(ts("{{{a}}}"), "a");
}

#[test]
fn runaway_brace_nesting_falls_back_to_literal_text() {
    let deep = "{".repeat(100_000);
    let out = ts(&deep);
    assert!(out.chars().all(|c| c == '{'));
    assert_eq!(out.len(), 100_000 - MAX_NESTING);
}

#[test]
fn runaway_macro_chain_falls_back_to_literal_text() {
    let deep = format!("{}x", "\\sqrt".repeat(10_000));
    let out = ts(&deep);
    assert!(out.starts_with("sqrt(sqrt("));
    assert!(out.ends_with(&format!("x{}", ")".repeat(MAX_NESTING + 1))));
}

#[test]
fn load_without_macros_is_builtin() {
    let engine = Typesetter::load(None).unwrap();
    assert_eq!(engine.typeset("\\div"), "/");
}

#[test]
fn load_merges_user_macros() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"\\deg": "deg", "cdot": "."}}"#).unwrap();

    let engine = Typesetter::load(Some(file.path())).unwrap();
    assert_eq!(engine.typeset("90\\deg"), "90deg");
    assert_eq!(engine.typeset("a\\cdot b"), "a. b");
}

#[test]
fn load_reports_bad_macro_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(matches!(Typesetter::load(Some(file.path())), Err(Error::Typeset(_))));

    let missing = Path::new("/definitely/not/here.json");
    assert!(matches!(Typesetter::load(Some(missing)), Err(Error::Typeset(_))));
}

fn settle(loader: &mut TypesetLoader) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if loader.poll() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn loader_signals_completion_once() {
    let mut loader = TypesetLoader::spawn(None);
    assert!(settle(&mut loader));
    assert!(!loader.is_pending());
    assert!(loader.engine().is_some());
    assert!(!loader.poll());
}

#[test]
fn loader_failure_degrades_to_no_engine() {
    let mut loader = TypesetLoader::spawn(Some(PathBuf::from("/definitely/not/here.json")));
    assert!(settle(&mut loader));
    assert!(loader.engine().is_none());
    assert!(!loader.is_pending());
}
