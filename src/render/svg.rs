//! SVG generation

use std::fmt::Write as _;

use crate::scene::{AttrValue, Primitive, Scene};

/// Serialize `scene` as a standalone SVG document.
pub fn write_svg(scene: &Scene) -> String {
    let mut out = String::new();
    let width = fmt_num(scene.width);
    let height = fmt_num(scene.height);
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    write_node(&mut out, &scene.root, 1);
    out.push_str("</svg>\n");
    out
}

fn write_node(out: &mut String, node: &impl Primitive, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = write!(out, "{indent}<{}", node.tag());
    for (name, value) in node.attributes() {
        let _ = write!(out, " {name}=\"{}\"", attr_value(&value));
    }

    let children = node.children();
    match node.content() {
        Some(text) => {
            let _ = writeln!(out, ">{}</{}>", escape(text), node.tag());
        }
        None if children.is_empty() => out.push_str("/>\n"),
        None => {
            out.push_str(">\n");
            for child in children {
                write_node(out, child, depth + 1);
            }
            let _ = writeln!(out, "{indent}</{}>", node.tag());
        }
    }
}

fn attr_value(value: &AttrValue) -> String {
    match value {
        AttrValue::Number(n) => fmt_num(*n),
        AttrValue::Text(s) => escape(s),
    }
}

/// Escape text for use in character data and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    result
}

/// Format a number like C's `%g`: 6 significant figures, trailing zeros trimmed.
pub fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
