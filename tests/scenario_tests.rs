use camino::Utf8PathBuf;
use forestplot::domain::Domain;
use forestplot::render::axis::tick_labels;
use forestplot::scene::{Group, Node, Primitive};
use forestplot::{PlotInput, Scene, Surface, render};

fn fixture(name: &str) -> String {
    let path = Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {path}: {e}"))
}

fn worked_example() -> (PlotInput, Scene) {
    let input = PlotInput::from_json(&fixture("worked_example.json")).unwrap();
    let scene = render(&input).unwrap();
    (input, scene)
}

fn texts(groups: &[&Group]) -> Vec<String> {
    groups
        .iter()
        .filter_map(|g| g.children.iter().find_map(|c| c.content()))
        .map(str::to_string)
        .collect()
}

#[test]
fn domain_is_padded_by_ten_percent() {
    let (input, _) = worked_example();
    let domain = Domain::from_rows(&input.rows).unwrap();
    assert!((domain.low - 0.792).abs() < 1e-9, "low = {}", domain.low);
    assert!((domain.high - 1.133).abs() < 1e-9, "high = {}", domain.high);
}

#[test]
fn six_rows_make_a_234px_chart() {
    let (_, scene) = worked_example();
    assert_eq!(scene.width, 800.0);
    assert_eq!(scene.height, 234.0);
    assert_eq!(scene.groups("row").len(), 6);
}

#[test]
fn labels_follow_precedence() {
    let (_, scene) = worked_example();
    let labels = texts(&scene.groups("label"));
    insta::assert_snapshot!(labels.join("\n"), @r"
    0.92 (0.88, 0.95)
    0.95 (0.90, 1.00)
    0.97 (0.91, 1.03)
    Reference
    0.90 (0.88, 0.99)
    ");
}

#[test]
fn axis_ticks_and_title() {
    let (_, scene) = worked_example();
    let axes = scene.groups("axis");
    assert_eq!(axes.len(), 1);
    insta::assert_snapshot!(tick_labels(axes[0]).join(" "), @"0.80 0.85 0.90 0.95 1.00 1.05 1.10");

    let titles = scene.groups("title");
    assert_eq!(texts(&titles), ["Odds ratio"]);
}

#[test]
fn missing_row_shows_description_only() {
    let (_, scene) = worked_example();

    let descriptions = texts(&scene.groups("row"));
    assert_eq!(descriptions[3], "Quartile 3");

    let tree_rows: Vec<f64> = scene
        .groups("tree")
        .iter()
        .filter_map(|g| g.translate.map(|t| t.y))
        .collect();
    assert_eq!(tree_rows, vec![0.0, 26.0, 52.0, 104.0, 130.0]);

    let label_rows: Vec<f64> = scene
        .groups("label")
        .iter()
        .filter_map(|g| g.translate.map(|t| t.y))
        .collect();
    assert!(!label_rows.contains(&78.0));
}

#[test]
fn reference_line_spans_every_row() {
    let (_, scene) = worked_example();
    let vbars: Vec<_> = scene
        .walk()
        .into_iter()
        .filter_map(|(_, node)| match node {
            Node::Line(line) if line.class() == Some("vbar") => Some(line),
            _ => None,
        })
        .collect();
    assert_eq!(vbars.len(), 1);

    let line = vbars[0];
    assert_eq!(line.from.y, 0.0);
    assert_eq!(line.to.y, 156.0);
    assert_eq!(line.from.x, line.to.x);
    let expected = (1.0 - 0.792) / (1.133 - 0.792) * 320.0;
    assert!((line.from.x - expected).abs() < 1e-6);
    assert_eq!(line.dash, Some((5.0, 5.0)));
}

#[test]
fn marker_scales_with_marker_size() {
    let (_, scene) = worked_example();
    let sides: Vec<f64> = scene
        .groups("tree")
        .iter()
        .filter_map(|g| {
            g.children.iter().find_map(|c| match c {
                Node::Rect(r) => match r.width {
                    forestplot::types::Dimension::Px(side) => Some(side),
                    _ => None,
                },
                _ => None,
            })
        })
        .collect();
    assert_eq!(sides.len(), 5);
    assert_eq!(sides[0], 24.0);
    assert!((sides[2] - 14.4).abs() < 1e-9);
}

#[test]
fn svg_export_contains_every_label() {
    let svg = forestplot::forest_plot(&fixture("worked_example.json")).unwrap();
    for label in ["0.92 (0.88, 0.95)", "Reference", "Odds ratio", "Sensitivity analysis"] {
        assert!(svg.contains(&format!(">{label}</text>")), "missing {label}");
    }
    assert!(svg.contains(r#"stroke-dasharray="5, 5""#));
}

#[test]
fn drawing_twice_leaves_one_chart() {
    let source = fixture("worked_example.json");
    let mut surface = Surface::new();
    let first = surface.draw(&source).unwrap().clone();
    let second = surface.draw(&source).unwrap().clone();

    assert_eq!(surface.len(), 1);
    assert_eq!(first, second);
    assert_eq!(first.to_svg(), second.to_svg());
}

#[test]
fn malformed_draw_keeps_the_previous_chart() {
    let source = fixture("worked_example.json");
    let mut surface = Surface::new();
    let drawn = surface.draw(&source).unwrap().clone();

    let err = surface.draw(r#"{"plotConfig": {}}"#).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"missing top-level field `data`");
    assert_eq!(surface.get("#svg"), Some(&drawn));
}

#[test]
fn unreadable_effects_degrade_to_description_only() {
    let input = PlotInput::from_json(&fixture("unreadable_effects.json")).unwrap();
    let scene = render(&input).unwrap();

    assert_eq!(texts(&scene.groups("row")), ["A", "B", "C", "D", "E"]);
    let tree_rows: Vec<f64> = scene
        .groups("tree")
        .iter()
        .filter_map(|g| g.translate.map(|t| t.y))
        .collect();
    assert_eq!(tree_rows, vec![0.0, 104.0]);
    insta::assert_snapshot!(texts(&scene.groups("label")).join("\n"), @r"
    0.90 (0.80, 1.10)
    1.20 (1.10, 1.30)
    ");
}
