use super::*;

fn assign(name: &str, value: &str) -> AnalysisResult {
    AnalysisResult::Assignment { name: name.into(), value: value.into() }
}

fn eval(expression: &str, value: &str) -> AnalysisResult {
    AnalysisResult::Evaluation { expression: expression.into(), value: value.into() }
}

fn bbox(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Option<BoundingBox> {
    Some(BoundingBox { min_x, min_y, max_x, max_y })
}

#[test]
fn starts_hidden_and_empty() {
    let overlay = Overlay::new();
    assert_eq!(overlay.visibility(), Visibility::Hidden);
    assert!(overlay.labels().is_empty());
    assert_eq!(overlay.anchor(), DEFAULT_ANCHOR);
}

#[test]
fn empty_content_falls_back_to_default_anchor() {
    let p = placement(None);
    assert_eq!(p, DEFAULT_ANCHOR);
    assert!(p.x.is_finite() && p.y.is_finite());
}

#[test]
fn placement_is_center_of_content() {
    assert_eq!(placement(bbox(0, 0, 10, 10)), Point::new(5.0, 5.0));
    assert_eq!(placement(bbox(10, 20, 31, 40)), Point::new(20.5, 30.0));
}

#[test]
fn batch_records_assignments_and_labels_in_order() {
    let mut overlay = Overlay::new();
    let mut vars = VariableDictionary::new();

    let added = overlay.apply_batch(
        vec![assign("x", "5"), eval("x+2", "7")],
        &mut vars,
        bbox(0, 0, 10, 10),
        None,
    );

    assert_eq!(added, 2);
    assert_eq!(vars.len(), 1);
    assert_eq!(vars.get("x"), Some("5"));
    let texts: Vec<&str> = overlay.labels().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["x = 5", "x+2 = 7"]);
    assert_eq!(overlay.visibility(), Visibility::Shown);
    assert!(overlay.labels().iter().all(|l| l.position == Point::new(5.0, 5.0)));
}

#[test]
fn evaluations_do_not_touch_variables() {
    let mut overlay = Overlay::new();
    let mut vars = VariableDictionary::new();
    overlay.apply_batch(vec![eval("2+2", "4")], &mut vars, None, None);
    assert!(vars.is_empty());
    assert_eq!(overlay.labels()[0].position, DEFAULT_ANCHOR);
}

#[test]
fn empty_batch_still_shows_the_overlay() {
    let mut overlay = Overlay::new();
    let mut vars = VariableDictionary::new();
    assert_eq!(overlay.apply_batch(Vec::new(), &mut vars, None, None), 0);
    assert_eq!(overlay.visibility(), Visibility::Shown);
}

#[test]
fn new_anchor_applies_only_to_new_labels() {
    let mut overlay = Overlay::new();
    let mut vars = VariableDictionary::new();

    overlay.apply_batch(vec![eval("1+1", "2")], &mut vars, bbox(0, 0, 10, 10), None);
    overlay.apply_batch(vec![eval("2+2", "4")], &mut vars, bbox(100, 100, 120, 140), None);

    assert_eq!(overlay.labels()[0].position, Point::new(5.0, 5.0));
    assert_eq!(overlay.labels()[1].position, Point::new(110.0, 120.0));
    assert_eq!(overlay.anchor(), Point::new(110.0, 120.0));
}

#[test]
fn clear_hides_and_empties() {
    let mut overlay = Overlay::new();
    let mut vars = VariableDictionary::new();
    overlay.apply_batch(vec![assign("x", "5")], &mut vars, None, None);
    overlay.clear();

    assert!(overlay.labels().is_empty());
    assert_eq!(overlay.visibility(), Visibility::Hidden);
    // variables survive a clear
    assert_eq!(vars.get("x"), Some("5"));
}

#[test]
fn dragging_moves_only_the_grabbed_label() {
    let mut overlay = Overlay::new();
    let mut vars = VariableDictionary::new();
    overlay.apply_batch(vec![eval("a", "1")], &mut vars, bbox(0, 0, 100, 100), None);
    overlay.apply_batch(vec![eval("b", "2")], &mut vars, bbox(300, 300, 400, 400), None);

    // grab the first label just inside its top-left corner
    assert!(overlay.begin_drag(Point::new(52.0, 52.0)));
    overlay.drag_to(Point::new(62.0, 47.0));
    overlay.drag_to(Point::new(72.0, 42.0));
    overlay.end_drag();

    assert_eq!(overlay.labels()[0].position, Point::new(70.0, 40.0));
    assert_eq!(overlay.labels()[1].position, Point::new(350.0, 350.0));
    assert!(!overlay.is_dragging());
}

#[test]
fn drag_misses_empty_space_and_hidden_overlay() {
    let mut overlay = Overlay::new();
    assert!(!overlay.begin_drag(DEFAULT_ANCHOR));

    let mut vars = VariableDictionary::new();
    overlay.apply_batch(vec![eval("a", "1")], &mut vars, None, None);
    assert!(!overlay.begin_drag(Point::new(0.0, 0.0)));
    assert!(overlay.begin_drag(Point::new(12.0, 202.0)));
}

#[test]
fn topmost_label_wins_when_stacked() {
    let mut overlay = Overlay::new();
    let mut vars = VariableDictionary::new();
    overlay.apply_batch(vec![eval("a", "1"), eval("b", "2")], &mut vars, None, None);

    assert!(overlay.begin_drag(Point::new(12.0, 202.0)));
    overlay.drag_to(Point::new(22.0, 202.0));

    assert_eq!(overlay.labels()[0].position, DEFAULT_ANCHOR);
    assert_eq!(overlay.labels()[1].position, Point::new(20.0, 200.0));
}

#[test]
fn typesetter_renders_and_absence_keeps_plain_text() {
    let mut overlay = Overlay::new();
    let mut vars = VariableDictionary::new();
    overlay.apply_batch(vec![eval("\\frac{6}{2}", "3")], &mut vars, None, None);
    assert_eq!(overlay.labels()[0].rendered, "\\frac{6}{2} = 3");

    let engine = Typesetter::builtin();
    overlay.retypeset(Some(&engine));
    assert_eq!(overlay.labels()[0].rendered, "6/2 = 3");
    assert_eq!(overlay.labels()[0].text, "\\frac{6}{2} = 3");
}
