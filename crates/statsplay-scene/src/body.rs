//! Scene primitives
//!
//! A [`Scene`] is a flat list of circles and rectangles plus optional
//! distance links between them. It carries no physics state: a front end
//! creates one physics body per [`Body`] and steps its own engine.

use serde::{Deserialize, Serialize};

use crate::colormap::Color;

/// A point in canvas coordinates (y grows downwards)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Body geometry, centred on the body position
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle { radius: f64 },
    Rectangle { width: f64, height: f64 },
}

impl Shape {
    /// Horizontal extent before rotation
    pub fn width(&self) -> f64 {
        match self {
            Shape::Circle { radius } => 2.0 * radius,
            Shape::Rectangle { width, .. } => *width,
        }
    }

    /// Vertical extent before rotation
    pub fn height(&self) -> f64 {
        match self {
            Shape::Circle { radius } => 2.0 * radius,
            Shape::Rectangle { height, .. } => *height,
        }
    }
}

/// Fill and outline
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Color,
    pub stroke: Option<Color>,
    pub line_width: f64,
    pub visible: bool,
}

impl Style {
    pub fn fill(color: Color) -> Self {
        Self {
            fill: color,
            stroke: None,
            line_width: 0.0,
            visible: true,
        }
    }

    pub fn outlined(fill: Color, stroke: Color, line_width: f64) -> Self {
        Self {
            fill,
            stroke: Some(stroke),
            line_width,
            visible: true,
        }
    }

    /// Collides but is not drawn
    pub fn hidden() -> Self {
        Self {
            fill: Color::transparent(),
            stroke: None,
            line_width: 0.0,
            visible: false,
        }
    }
}

/// What a body stands for in its scene
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind {
    /// Canvas boundary or floor
    Wall,
    /// Tilted funnel plane
    Plane,
    /// Side, bottom or roof of a bell-curve bin, or a Galton slot divider
    BinWall,
    /// Ball representing probability mass in a bin
    BinBall,
    /// Box-plot whisker segment
    Whisker,
    /// Box-plot quartile box
    QuartileBox,
    MedianBar,
    MeanMarker,
    /// A sample value within the fences
    Inlier,
    /// A sample value outside the fences
    Outlier,
    /// A missing observation
    Missing,
    /// The sample mean
    Mean,
    /// The sample median
    Median,
    Peg,
    DataPoint,
    FitLine,
    Axis,
}

/// One circle or rectangle of a scene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub kind: BodyKind,
    pub position: Point,
    /// Rotation in radians
    pub angle: f64,
    pub shape: Shape,
    pub style: Style,
    pub is_static: bool,
    pub label: Option<String>,
    /// The data value this body represents, if any
    pub value: Option<f64>,
    /// Index into the input sample, if any
    pub data_index: Option<usize>,
}

impl Body {
    pub fn circle(kind: BodyKind, position: Point, radius: f64, style: Style) -> Self {
        Self::new(kind, position, Shape::Circle { radius }, style)
    }

    pub fn rectangle(
        kind: BodyKind,
        position: Point,
        width: f64,
        height: f64,
        style: Style,
    ) -> Self {
        Self::new(kind, position, Shape::Rectangle { width, height }, style)
    }

    fn new(kind: BodyKind, position: Point, shape: Shape, style: Style) -> Self {
        Self {
            kind,
            position,
            angle: 0.0,
            shape,
            style,
            is_static: false,
            label: None,
            value: None,
            data_index: None,
        }
    }

    pub fn fixed(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn rotated(mut self, angle: f64) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_data_index(mut self, index: usize) -> Self {
        self.data_index = Some(index);
        self
    }

    /// Radius for circles, `None` for rectangles
    pub fn radius(&self) -> Option<f64> {
        match self.shape {
            Shape::Circle { radius } => Some(radius),
            Shape::Rectangle { .. } => None,
        }
    }
}

/// Distance link between anchor points on two bodies
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub body_a: usize,
    pub body_b: usize,
    /// Anchor offset from the centre of `body_a`
    pub anchor_a: Point,
    /// Anchor offset from the centre of `body_b`
    pub anchor_b: Point,
    pub length: f64,
}

/// A complete scene description
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub bodies: Vec<Body>,
    pub links: Vec<Link>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            bodies: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Add a body and return its index
    pub fn push(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn extend(&mut self, bodies: impl IntoIterator<Item = Body>) {
        self.bodies.extend(bodies);
    }

    pub fn link(&mut self, link: Link) {
        self.links.push(link);
    }

    /// Four static walls just outside the canvas
    pub fn add_boundary_walls(&mut self, thickness: f64, color: Color) {
        let (w, h, t) = (self.width, self.height, thickness);
        let style = Style::fill(color);
        self.extend([
            Body::rectangle(BodyKind::Wall, Point::new(w / 2.0, -t / 2.0), w, t, style).fixed(),
            Body::rectangle(BodyKind::Wall, Point::new(w / 2.0, h + t / 2.0), w, t, style).fixed(),
            Body::rectangle(BodyKind::Wall, Point::new(-t / 2.0, h / 2.0), t, h, style).fixed(),
            Body::rectangle(BodyKind::Wall, Point::new(w + t / 2.0, h / 2.0), t, h, style).fixed(),
        ]);
    }

    /// Bodies of a given kind, in insertion order
    pub fn bodies_of(&self, kind: BodyKind) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |b| b.kind == kind)
    }

    pub fn count_of(&self, kind: BodyKind) -> usize {
        self.bodies_of(kind).count()
    }

    /// Serialize the scene for a front end
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
