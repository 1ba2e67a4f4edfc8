use glam::Vec2;
use serde_json::{json, Map, Value};

use crate::primitives::{Inset, Rect};
use crate::serial;

/// How a node sizes and places itself within its parent rectangle
///
/// Every node carries exactly one region:
/// - [`BoxRegion`] nodes are arranged by the parent's layout. The layout
///   feeds them a sibling offset and they size against the parent rectangle.
/// - [`AnchorRegion`] nodes self-place directly against the parent rectangle
///   and never participate in the parent's flow math.
#[derive(Clone, Debug, PartialEq)]
pub enum Region {
    Box(BoxRegion),
    Anchor(AnchorRegion),
}

impl Region {
    /// Resolve the node's rectangle from its parent rectangle and the
    /// sibling offset assigned by the parent's layout.
    ///
    /// Pure: identical inputs always produce identical output. Anchor
    /// regions ignore `offset` entirely.
    pub fn apply(&self, parent: Rect, offset: Vec2) -> Rect {
        match self {
            Region::Box(region) => region.apply(parent, offset),
            Region::Anchor(region) => region.apply(parent),
        }
    }

    pub const fn is_box(&self) -> bool {
        matches!(self, Region::Box(_))
    }

    pub const fn is_anchor(&self) -> bool {
        matches!(self, Region::Anchor(_))
    }

    /// Serialize to a tagged key-value document.
    pub fn to_value(&self) -> Value {
        match self {
            Region::Box(region) => region.to_value(),
            Region::Anchor(region) => region.to_value(),
        }
    }

    /// Deserialize from a tagged key-value document.
    ///
    /// Missing fields default; an unknown or missing tag degrades to a
    /// default box region with a warning rather than failing the caller.
    pub fn from_value(doc: &Value) -> Self {
        match serial::str_field(doc, "type") {
            Some("BoxConstraint") => Region::Box(BoxRegion::from_value(doc)),
            Some("AnchorConstraint") => Region::Anchor(AnchorRegion::from_value(doc)),
            tag => {
                log::warn!("unknown region type {tag:?}, using default box region");
                Region::default()
            }
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Region::Box(BoxRegion::default())
    }
}

impl From<BoxRegion> for Region {
    fn from(region: BoxRegion) -> Self {
        Region::Box(region)
    }
}

impl From<AnchorRegion> for Region {
    fn from(region: AnchorRegion) -> Self {
        Region::Anchor(region)
    }
}

/// Flow-arranged geometry: size as a fraction of the parent plus a pixel
/// delta, positioned by the parent layout's running cursor
#[derive(Clone, Debug, PartialEq)]
pub struct BoxRegion {
    /// Fraction of the parent size contributed to this node's size
    pub size_ratio: Vec2,
    /// Pixel size added after the ratio
    pub size_delta: Vec2,
    /// Share of leftover space along the parent layout's primary axis.
    /// Zero keeps the measured size exactly.
    pub flexible_weight: f32,
    /// Margin around the node, consumed by the parent layout
    pub margin: Inset,
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_height: Option<f32>,
}

impl BoxRegion {
    /// A region sized by a fixed pixel delta only
    pub fn fixed(width: f32, height: f32) -> Self {
        Self {
            size_ratio: Vec2::ZERO,
            size_delta: Vec2::new(width, height),
            ..Self::default()
        }
    }

    /// A region sized as a fraction of the parent
    pub fn fraction(x: f32, y: f32) -> Self {
        Self {
            size_ratio: Vec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_size_delta(mut self, delta: Vec2) -> Self {
        self.size_delta = delta;
        self
    }

    pub fn with_flexible_weight(mut self, weight: f32) -> Self {
        self.flexible_weight = weight;
        self
    }

    pub fn with_margin(mut self, margin: Inset) -> Self {
        self.margin = margin;
        self
    }

    /// Measure the size this region resolves to against a parent size,
    /// before any flexible-weight expansion.
    pub fn measure(&self, parent_size: Vec2) -> Vec2 {
        let mut size = parent_size * self.size_ratio + self.size_delta;
        if let Some(min) = self.min_width {
            size.x = size.x.max(min);
        }
        if let Some(max) = self.max_width {
            size.x = size.x.min(max);
        }
        if let Some(min) = self.min_height {
            size.y = size.y.max(min);
        }
        if let Some(max) = self.max_height {
            size.y = size.y.min(max);
        }
        size
    }

    fn apply(&self, parent: Rect, offset: Vec2) -> Rect {
        let size = self.measure(parent.size());
        let pos = parent.min + offset + Vec2::new(self.margin.left, self.margin.top);
        Rect::from_min_size(pos, size)
    }

    pub fn to_value(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("type".into(), json!("BoxConstraint"));
        doc.insert("sizeRatio".into(), serial::vec2_to_value(self.size_ratio));
        doc.insert("sizeDelta".into(), serial::vec2_to_value(self.size_delta));
        doc.insert("flexibleWeight".into(), json!(self.flexible_weight));
        doc.insert("margin".into(), serial::inset_to_value(self.margin));
        for (key, clamp) in [
            ("minWidth", self.min_width),
            ("maxWidth", self.max_width),
            ("minHeight", self.min_height),
            ("maxHeight", self.max_height),
        ] {
            if let Some(value) = clamp {
                doc.insert(key.into(), json!(value));
            }
        }
        Value::Object(doc)
    }

    pub fn from_value(doc: &Value) -> Self {
        let default = Self::default();
        Self {
            size_ratio: serial::vec2_field(doc, "sizeRatio", default.size_ratio),
            size_delta: serial::vec2_field(doc, "sizeDelta", default.size_delta),
            flexible_weight: serial::f32_field(doc, "flexibleWeight", default.flexible_weight),
            margin: serial::inset_field(doc, "margin", default.margin),
            min_width: serial::opt_f32_field(doc, "minWidth"),
            max_width: serial::opt_f32_field(doc, "maxWidth"),
            min_height: serial::opt_f32_field(doc, "minHeight"),
            max_height: serial::opt_f32_field(doc, "maxHeight"),
        }
    }
}

impl Default for BoxRegion {
    fn default() -> Self {
        Self {
            size_ratio: Vec2::ONE,
            size_delta: Vec2::ZERO,
            flexible_weight: 0.0,
            margin: Inset::zero(),
            min_width: None,
            max_width: None,
            min_height: None,
            max_height: None,
        }
    }
}

/// Self-placing geometry: a sub-rectangle of the parent described by two
/// anchors in [0, 1]² space, adjusted by pixel deltas
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorRegion {
    /// Lower-left anchor in parent-relative [0, 1]² space
    pub anchor_min: Vec2,
    /// Upper-right anchor in parent-relative [0, 1]² space
    pub anchor_max: Vec2,
    /// Pixel offset from the anchor-derived origin
    pub pos_delta: Vec2,
    /// Pixel size added to the anchor-derived span
    pub size_delta: Vec2,
    /// Origin in [0, 1]² used when distributing `size_delta`
    pub size_delta_pivot: Vec2,
}

impl AnchorRegion {
    /// Point anchor at the given parent-relative position, pivot matching
    fn at(anchor: Vec2) -> Self {
        Self {
            anchor_min: anchor,
            anchor_max: anchor,
            size_delta_pivot: anchor,
            ..Self::default()
        }
    }

    pub fn top_left() -> Self {
        Self::at(Vec2::new(0.0, 0.0))
    }

    pub fn top_right() -> Self {
        Self::at(Vec2::new(1.0, 0.0))
    }

    pub fn bottom_left() -> Self {
        Self::at(Vec2::new(0.0, 1.0))
    }

    pub fn bottom_right() -> Self {
        Self::at(Vec2::new(1.0, 1.0))
    }

    pub fn center() -> Self {
        Self::at(Vec2::new(0.5, 0.5))
    }

    /// Anchors spanning the whole parent rectangle
    pub fn stretch_all() -> Self {
        Self {
            anchor_min: Vec2::ZERO,
            anchor_max: Vec2::ONE,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size_delta = Vec2::new(width, height);
        self
    }

    pub fn with_pos_delta(mut self, delta: Vec2) -> Self {
        self.pos_delta = delta;
        self
    }

    fn apply(&self, parent: Rect) -> Rect {
        let size = parent.size() * (self.anchor_max - self.anchor_min) + self.size_delta;
        let pos = parent.min + parent.size() * self.anchor_min + self.pos_delta
            - self.size_delta * self.size_delta_pivot;
        Rect::from_min_size(pos, size)
    }

    pub fn to_value(&self) -> Value {
        json!({
            "type": "AnchorConstraint",
            "anchorMin": serial::vec2_to_value(self.anchor_min),
            "anchorMax": serial::vec2_to_value(self.anchor_max),
            "posDelta": serial::vec2_to_value(self.pos_delta),
            "sizeDelta": serial::vec2_to_value(self.size_delta),
            "sizeDeltaPivot": serial::vec2_to_value(self.size_delta_pivot),
        })
    }

    pub fn from_value(doc: &Value) -> Self {
        let default = Self::default();
        Self {
            anchor_min: serial::vec2_field(doc, "anchorMin", default.anchor_min),
            anchor_max: serial::vec2_field(doc, "anchorMax", default.anchor_max),
            pos_delta: serial::vec2_field(doc, "posDelta", default.pos_delta),
            size_delta: serial::vec2_field(doc, "sizeDelta", default.size_delta),
            size_delta_pivot: serial::vec2_field(doc, "sizeDeltaPivot", default.size_delta_pivot),
        }
    }
}

impl Default for AnchorRegion {
    fn default() -> Self {
        Self {
            anchor_min: Vec2::new(0.5, 0.5),
            anchor_max: Vec2::new(0.5, 0.5),
            pos_delta: Vec2::ZERO,
            size_delta: Vec2::ZERO,
            size_delta_pivot: Vec2::new(0.5, 0.5),
        }
    }
}
