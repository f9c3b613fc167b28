//! The scene: a tree of drawable primitives returned by a render.
//!
//! Nodes carry their own styling (fill, stroke, font) so a drawing surface
//! needs no other context to reproduce the chart. Group translations are
//! relative to the parent group, the way SVG `transform="translate(..)"`
//! nests.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::types::{Color, Dimension};

/// A value written as an attribute of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Number(v)
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<Color> for AttrValue {
    fn from(c: Color) -> Self {
        AttrValue::Text(c.to_string())
    }
}

impl From<Dimension> for AttrValue {
    fn from(d: Dimension) -> Self {
        match d {
            Dimension::Px(v) => AttrValue::Number(v),
            Dimension::Percent(p) => AttrValue::Text(format!("{p}%")),
        }
    }
}

pub type Attributes = Vec<(&'static str, AttrValue)>;

/// Common behavior of everything in the scene tree.
#[enum_dispatch]
pub trait Primitive {
    /// Element name on an SVG surface.
    fn tag(&self) -> &'static str;

    /// Presentation attributes in output order.
    fn attributes(&self) -> Attributes;

    /// Nested nodes (groups only).
    fn children(&self) -> &[Node] {
        &[]
    }

    /// Character data (text only).
    fn content(&self) -> Option<&str> {
        None
    }

    /// CSS class used to tag the role of a node (`row`, `tree`, ...).
    fn class(&self) -> Option<&'static str> {
        None
    }
}

/// Any node of the scene.
#[enum_dispatch(Primitive)]
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group,
    Rect,
    Line,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Middle,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Middle => "middle",
        }
    }
}

/// Font settings; unset fields inherit from the enclosing group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    pub size: Option<f64>,
    pub family: Option<String>,
    pub weight: Option<FontWeight>,
}

impl Font {
    pub fn new(size: f64, family: impl Into<String>) -> Self {
        Font {
            size: Some(size),
            family: Some(family.into()),
            weight: None,
        }
    }

    pub fn sized(size: f64) -> Self {
        Font {
            size: Some(size),
            ..Font::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = Some(FontWeight::Bold);
        self
    }

    fn push_attributes(&self, attrs: &mut Attributes) {
        if let Some(size) = self.size {
            attrs.push(("font-size", size.into()));
        }
        if let Some(family) = &self.family {
            attrs.push(("font-family", family.as_str().into()));
        }
        if let Some(FontWeight::Bold) = self.weight {
            attrs.push(("font-weight", "bold".into()));
        }
    }
}

/// Grouping node, optionally translated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub class: Option<&'static str>,
    pub translate: Option<DVec2>,
    /// Font inherited by descendant text
    pub font: Option<Font>,
    pub anchor: Option<TextAnchor>,
    pub children: Vec<Node>,
}

impl Group {
    pub fn new() -> Self {
        Group::default()
    }

    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    pub fn translated(mut self, offset: DVec2) -> Self {
        self.translate = Some(offset);
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn with_child(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }
}

impl Primitive for Group {
    fn tag(&self) -> &'static str {
        "g"
    }

    fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        if let Some(class) = self.class {
            attrs.push(("class", class.into()));
        }
        if let Some(offset) = self.translate {
            attrs.push(("transform", AttrValue::Text(translate(offset))));
        }
        if let Some(font) = &self.font {
            font.push_attributes(&mut attrs);
        }
        if let Some(anchor) = self.anchor {
            attrs.push(("text-anchor", anchor.as_str().into()));
        }
        attrs
    }

    fn children(&self) -> &[Node] {
        &self.children
    }

    fn class(&self) -> Option<&'static str> {
        self.class
    }
}

/// `translate(x, y)` with compact numbers.
pub fn translate(offset: DVec2) -> String {
    format!(
        "translate({}, {})",
        crate::render::svg::fmt_num(offset.x),
        crate::render::svg::fmt_num(offset.y)
    )
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: Dimension,
    pub height: Dimension,
    pub fill: Option<Color>,
}

impl Primitive for Rect {
    fn tag(&self) -> &'static str {
        "rect"
    }

    fn attributes(&self) -> Attributes {
        let mut attrs: Attributes = vec![
            ("x", self.x.into()),
            ("y", self.y.into()),
            ("width", self.width.into()),
            ("height", self.height.into()),
        ];
        if let Some(fill) = self.fill {
            attrs.push(("fill", fill.into()));
        }
        attrs
    }
}

/// Straight stroked segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub class: Option<&'static str>,
    pub from: DVec2,
    pub to: DVec2,
    pub stroke: Color,
    pub stroke_width: f64,
    /// Dash and gap lengths
    pub dash: Option<(f64, f64)>,
}

impl Line {
    pub fn new(from: DVec2, to: DVec2, stroke: Color, stroke_width: f64) -> Self {
        Line {
            class: None,
            from,
            to,
            stroke,
            stroke_width,
            dash: None,
        }
    }
}

impl Primitive for Line {
    fn tag(&self) -> &'static str {
        "line"
    }

    fn attributes(&self) -> Attributes {
        let mut attrs = Attributes::new();
        if let Some(class) = self.class {
            attrs.push(("class", class.into()));
        }
        attrs.extend([
            ("x1", self.from.x.into()),
            ("y1", self.from.y.into()),
            ("x2", self.to.x.into()),
            ("y2", self.to.y.into()),
            ("stroke", self.stroke.into()),
            ("stroke-width", self.stroke_width.into()),
        ]);
        if let Some((on, off)) = self.dash {
            let pattern = format!(
                "{}, {}",
                crate::render::svg::fmt_num(on),
                crate::render::svg::fmt_num(off)
            );
            attrs.push(("stroke-dasharray", pattern.into()));
        }
        attrs
    }

    fn class(&self) -> Option<&'static str> {
        self.class
    }
}

/// A run of text anchored at `(x, y)` (the baseline).
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    /// Extra baseline shift in em
    pub dy_em: Option<f64>,
    pub content: String,
    pub font: Option<Font>,
    pub fill: Option<Color>,
    pub anchor: Option<TextAnchor>,
}

impl Text {
    pub fn new(x: f64, y: f64, content: impl Into<String>) -> Self {
        Text {
            x,
            y,
            dy_em: None,
            content: content.into(),
            font: None,
            fill: None,
            anchor: None,
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = Some(anchor);
        self
    }
}

impl Primitive for Text {
    fn tag(&self) -> &'static str {
        "text"
    }

    fn attributes(&self) -> Attributes {
        let mut attrs: Attributes = vec![("x", self.x.into()), ("y", self.y.into())];
        if let Some(dy) = self.dy_em {
            attrs.push((
                "dy",
                AttrValue::Text(format!("{}em", crate::render::svg::fmt_num(dy))),
            ));
        }
        if let Some(fill) = self.fill {
            attrs.push(("fill", fill.into()));
        }
        if let Some(anchor) = self.anchor {
            attrs.push(("text-anchor", anchor.as_str().into()));
        }
        if let Some(font) = &self.font {
            font.push_attributes(&mut attrs);
        }
        attrs
    }

    fn content(&self) -> Option<&str> {
        Some(&self.content)
    }
}

/// A finished chart: the primitive tree plus the image size.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Mount point this chart is meant for
    pub mount_node: String,
    pub width: f64,
    pub height: f64,
    pub root: Group,
}

impl Scene {
    /// Serialize as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        crate::render::svg::write_svg(self)
    }

    /// Every node, depth first, paired with its absolute translation.
    pub fn walk(&self) -> Vec<(DVec2, &Node)> {
        fn visit<'a>(nodes: &'a [Node], origin: DVec2, out: &mut Vec<(DVec2, &'a Node)>) {
            for node in nodes {
                out.push((origin, node));
                if let Node::Group(group) = node {
                    let inner = origin + group.translate.unwrap_or(DVec2::ZERO);
                    visit(&group.children, inner, out);
                }
            }
        }

        let mut out = Vec::new();
        let origin = self.root.translate.unwrap_or(DVec2::ZERO);
        visit(&self.root.children, origin, &mut out);
        out
    }

    /// Groups tagged with `class`, in document order.
    pub fn groups(&self, class: &str) -> Vec<&Group> {
        self.walk()
            .into_iter()
            .filter_map(|(_, node)| match node {
                Node::Group(g) if g.class == Some(class) => Some(g),
                _ => None,
            })
            .collect()
    }

    /// Number of leaf primitives (rects, lines and text).
    pub fn primitive_count(&self) -> usize {
        self.walk()
            .into_iter()
            .filter(|(_, node)| !matches!(node, Node::Group(_)))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn group_attributes_include_translation_and_font() {
        let group = Group::new()
            .with_class("row")
            .translated(dvec2(0.0, 52.0))
            .with_font(Font::new(12.0, "Helvetica"));
        let attrs = group.attributes();
        assert_eq!(attrs[0], ("class", AttrValue::Text("row".into())));
        assert_eq!(attrs[1], ("transform", AttrValue::Text("translate(0, 52)".into())));
        assert_eq!(attrs[2], ("font-size", AttrValue::Number(12.0)));
        assert_eq!(attrs[3], ("font-family", AttrValue::Text("Helvetica".into())));
    }

    #[test]
    fn dashed_line_has_pattern() {
        let mut line = Line::new(dvec2(10.0, 0.0), dvec2(10.0, 156.0), Color::BLACK, 1.0);
        line.dash = Some((5.0, 5.0));
        let attrs = line.attributes();
        assert!(attrs.contains(&("stroke-dasharray", AttrValue::Text("5, 5".into()))));
    }

    #[test]
    fn dispatch_through_node() {
        let node: Node = Text::new(1.0, 2.0, "hello").into();
        assert_eq!(node.tag(), "text");
        assert_eq!(node.content(), Some("hello"));
        assert!(node.children().is_empty());

        let node: Node = Group::new().with_child(node).into();
        assert_eq!(node.tag(), "g");
        assert_eq!(node.children().len(), 1);
    }

    #[test]
    fn walk_accumulates_translations() {
        let inner = Group::new()
            .translated(dvec2(5.0, 5.0))
            .with_child(Text::new(0.0, 0.0, "x"));
        let root = Group::new()
            .translated(dvec2(20.0, 20.0))
            .with_child(Group::new().translated(dvec2(100.0, 0.0)).with_child(inner));
        let scene = Scene {
            mount_node: "#svg".into(),
            width: 200.0,
            height: 100.0,
            root,
        };
        let text_origin = scene
            .walk()
            .into_iter()
            .find(|(_, n)| matches!(n, Node::Text(_)))
            .map(|(origin, _)| origin);
        assert_eq!(text_origin, Some(dvec2(125.0, 25.0)));
        assert_eq!(scene.primitive_count(), 1);
    }
}
