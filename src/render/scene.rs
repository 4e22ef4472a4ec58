//! Scene - Retained drawing surface for one chart
//!
//! A [`Container`] holds the marks drawn by the last render plus transient
//! interaction state (flow node drags). Renderers always clear before drawing.

use ahash::AHashMap;

use crate::error::{Error, Result};
use crate::theme::Rgb;

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Start,
    Middle,
    End,
}

/// Geometry of a mark
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    /// Open polyline through the points
    Path { points: Vec<(f64, f64)> },
    Text {
        x: f64,
        y: f64,
        text: String,
        anchor: Anchor,
        size: f64,
    },
}

impl Shape {
    /// Axis-aligned bounds `(x0, y0, x1, y1)`; text has zero extent
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => (*x, *y, x + width, y + height),
            Shape::Line { x1, y1, x2, y2 } => (x1.min(*x2), y1.min(*y2), x1.max(*x2), y1.max(*y2)),
            Shape::Circle { cx, cy, r } => (cx - r, cy - r, cx + r, cy + r),
            Shape::Path { points } => points.iter().fold(
                (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
                |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
            ),
            Shape::Text { x, y, .. } => (*x, *y, *x, *y),
        }
    }

    /// Whether the point hits this shape (rects and circles only)
    fn contains(&self, px: f64, py: f64) -> bool {
        match self {
            Shape::Rect {
                x,
                y,
                width,
                height,
            } => px >= *x && px <= x + width && py >= *y && py <= y + height,
            Shape::Circle { cx, cy, r } => (px - cx).powi(2) + (py - cy).powi(2) <= r * r,
            _ => false,
        }
    }
}

/// Paint attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    pub fill: Option<Rgb>,
    pub stroke: Option<Rgb>,
    pub stroke_width: f64,
    pub opacity: f64,
    /// Dash pattern, e.g. "4,4"
    pub dash: Option<&'static str>,
    pub bold: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
            dash: None,
            bold: false,
        }
    }
}

/// One drawn element
#[derive(Debug, Clone, PartialEq)]
pub struct Mark {
    pub shape: Shape,
    pub style: Style,
    /// Semantic role, e.g. "bar", "cell", "title"
    pub class: &'static str,
    /// Read-only text shown on hover
    pub tooltip: Option<String>,
    /// Marks sharing a group move together when dragged
    pub group: Option<usize>,
}

impl Mark {
    pub fn new(class: &'static str, shape: Shape) -> Self {
        Self {
            shape,
            style: Style::default(),
            class,
            tooltip: None,
            group: None,
        }
    }

    pub fn rect(class: &'static str, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(
            class,
            Shape::Rect {
                x,
                y,
                width: width.max(0.0),
                height: height.max(0.0),
            },
        )
    }

    pub fn line(class: &'static str, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(class, Shape::Line { x1, y1, x2, y2 })
    }

    pub fn circle(class: &'static str, cx: f64, cy: f64, r: f64) -> Self {
        Self::new(class, Shape::Circle { cx, cy, r })
    }

    pub fn path(class: &'static str, points: Vec<(f64, f64)>) -> Self {
        Self::new(class, Shape::Path { points })
    }

    pub fn text(class: &'static str, x: f64, y: f64, text: impl Into<String>) -> Self {
        Self::new(
            class,
            Shape::Text {
                x,
                y,
                text: text.into(),
                anchor: Anchor::Start,
                size: 12.0,
            },
        )
    }

    pub fn fill(mut self, color: Rgb) -> Self {
        self.style.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Rgb, width: f64) -> Self {
        self.style.stroke = Some(color);
        self.style.stroke_width = width;
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.style.opacity = opacity;
        self
    }

    pub fn dashed(mut self, pattern: &'static str) -> Self {
        self.style.dash = Some(pattern);
        self
    }

    pub fn bold(mut self) -> Self {
        self.style.bold = true;
        self
    }

    /// Text alignment and size; no effect on other shapes
    pub fn font(mut self, anchor: Anchor, size: f64) -> Self {
        if let Shape::Text {
            anchor: a, size: s, ..
        } = &mut self.shape
        {
            *a = anchor;
            *s = size;
        }
        self
    }

    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    pub fn group(mut self, group: usize) -> Self {
        self.group = Some(group);
        self
    }

    /// Text content of a text mark
    pub fn label(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// Class of the single text mark drawn by `render_message`
pub const MESSAGE_CLASS: &str = "message";

/// Drawing target of one chart
#[derive(Debug, Clone)]
pub struct Container {
    id: String,
    width: f64,
    height: f64,
    attached: bool,
    marks: Vec<Mark>,
    /// Vertical drag offset per mark group; reset on clear
    offsets: AHashMap<usize, f64>,
}

impl Container {
    /// Attached container of the given size
    pub fn new(id: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            width,
            height,
            attached: true,
            marks: Vec::new(),
            offsets: AHashMap::new(),
        }
    }

    /// Container not yet placed in a page
    pub fn detached(id: impl Into<String>) -> Self {
        Self {
            attached: false,
            ..Self::new(id, 0.0, 0.0)
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Fails unless the container is attached and has a drawable size
    pub fn check_ready(&self) -> Result<()> {
        if !self.attached {
            return Err(Error::render_precondition(format!(
                "container {} is not attached",
                self.id
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(Error::render_precondition(format!(
                "container {} has no size",
                self.id
            )));
        }
        Ok(())
    }

    /// Remove every mark and all transient interaction state
    pub fn clear(&mut self) {
        self.marks.clear();
        self.offsets.clear();
    }

    pub fn push(&mut self, mark: Mark) {
        self.marks.push(mark);
    }

    pub fn extend(&mut self, marks: impl IntoIterator<Item = Mark>) {
        self.marks.extend(marks);
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Marks of a given class
    pub fn marks_of<'a>(&'a self, class: &'a str) -> impl Iterator<Item = &'a Mark> + 'a {
        self.marks.iter().filter(move |m| m.class == class)
    }

    /// Text of the message panel, when the container shows one
    pub fn message(&self) -> Option<&str> {
        self.marks_of(MESSAGE_CLASS).next().and_then(Mark::label)
    }

    /// Topmost mark with a tooltip under the point, honouring drag offsets
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Mark> {
        self.marks.iter().rev().find(|m| {
            let dy = m.group.map(|g| self.offset_of(g)).unwrap_or(0.0);
            m.tooltip.is_some() && m.shape.contains(x, y - dy)
        })
    }

    pub fn tooltip_at(&self, x: f64, y: f64) -> Option<&str> {
        self.hit_test(x, y).and_then(|m| m.tooltip.as_deref())
    }

    pub fn offset_of(&self, group: usize) -> f64 {
        self.offsets.get(&group).copied().unwrap_or(0.0)
    }

    /// Drag a mark group vertically, keeping it inside the container.
    /// Returns the applied offset, or `None` when the group has no marks.
    pub fn drag(&mut self, group: usize, dy: f64) -> Option<f64> {
        let (top, bottom) = self
            .marks
            .iter()
            .filter(|m| m.group == Some(group))
            .map(|m| m.shape.bounds())
            .fold(None, |acc: Option<(f64, f64)>, (_, y0, _, y1)| match acc {
                Some((top, bottom)) => Some((top.min(y0), bottom.max(y1))),
                None => Some((y0, y1)),
            })?;
        let wanted = self.offset_of(group) + dy;
        let applied = wanted.clamp(-top, (self.height - bottom).max(-top));
        self.offsets.insert(group, applied);
        Some(applied)
    }
}
