use glam::Vec2;
use serde_json::{json, Value};

use crate::node::Node;
use crate::primitives::{Inset, Rect};
use crate::region::Region;
use crate::serial;

/// Horizontal alignment of arranged children
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl HorizontalAlign {
    pub const fn as_str(&self) -> &'static str {
        match self {
            HorizontalAlign::Left => "Left",
            HorizontalAlign::Center => "Center",
            HorizontalAlign::Right => "Right",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Left" => Some(HorizontalAlign::Left),
            "Center" => Some(HorizontalAlign::Center),
            "Right" => Some(HorizontalAlign::Right),
            _ => None,
        }
    }

    fn offset(&self, leftover: f32) -> f32 {
        match self {
            HorizontalAlign::Left => 0.0,
            HorizontalAlign::Center => leftover / 2.0,
            HorizontalAlign::Right => leftover,
        }
    }
}

/// Vertical alignment of arranged children
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

impl VerticalAlign {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VerticalAlign::Top => "Top",
            VerticalAlign::Center => "Center",
            VerticalAlign::Bottom => "Bottom",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Top" => Some(VerticalAlign::Top),
            "Center" => Some(VerticalAlign::Center),
            "Bottom" => Some(VerticalAlign::Bottom),
            _ => None,
        }
    }

    fn offset(&self, leftover: f32) -> f32 {
        match self {
            VerticalAlign::Top => 0.0,
            VerticalAlign::Center => leftover / 2.0,
            VerticalAlign::Bottom => leftover,
        }
    }
}

/// Which axes a fit-to-children operation replaces
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitTarget {
    WidthOnly,
    HeightOnly,
    Both,
}

impl FitTarget {
    pub const fn fits_width(&self) -> bool {
        matches!(self, FitTarget::WidthOnly | FitTarget::Both)
    }

    pub const fn fits_height(&self) -> bool {
        matches!(self, FitTarget::HeightOnly | FitTarget::Both)
    }
}

/// Measured extent of one flow-participating child: region size plus margins.
///
/// `None` for children a layout skips (inactive or anchor-region); those keep
/// their index slot so line membership stays addressable by original index.
#[derive(Clone, Copy, Debug)]
struct Slot {
    size: Vec2,
    margin: Inset,
    weight: f32,
}

impl Slot {
    fn total_width(&self) -> f32 {
        self.size.x + self.margin.horizontal()
    }

    fn total_height(&self) -> f32 {
        self.size.y + self.margin.vertical()
    }
}

fn slot_for(child: &Node, parent_size: Vec2) -> Option<Slot> {
    if !child.is_active_self() {
        return None;
    }
    match child.region() {
        Region::Box(region) => Some(Slot {
            size: region.measure(parent_size),
            margin: region.margin,
            weight: region.flexible_weight.max(0.0),
        }),
        Region::Anchor(_) => None,
    }
}

/// Rule for arranging a node's box-region children
///
/// Each strategy is a pure function of the container rectangle and the child
/// list: [`Layout::arrange`] produces one placement per child (by original
/// index) and [`Layout::measure_fitting_size`] re-runs the same measurement
/// math without touching any node, for fit-to-children sizing.
#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    Flow(FlowLayout),
    Horizontal(HorizontalLayout),
    Vertical(VerticalLayout),
}

impl Layout {
    /// Compute a placement rectangle per child.
    ///
    /// The returned vector is index-aligned with `children`; entries are
    /// `None` for children the layout does not arrange (inactive or
    /// anchor-region children, which self-place).
    pub fn arrange(&self, rect: Rect, children: &[Node]) -> Vec<Option<Rect>> {
        match self {
            Layout::Flow(layout) => layout.arrange(rect, children),
            Layout::Horizontal(layout) => layout.arrange(rect, children),
            Layout::Vertical(layout) => layout.arrange(rect, children),
        }
    }

    /// The size a container must have to wrap its arranged children,
    /// including this layout's padding. Does not mutate any node.
    pub fn measure_fitting_size(&self, parent: Rect, children: &[Node]) -> Vec2 {
        match self {
            Layout::Flow(layout) => layout.measure_fitting_size(parent, children),
            Layout::Horizontal(layout) => layout.measure_fitting_size(parent, children),
            Layout::Vertical(layout) => layout.measure_fitting_size(parent, children),
        }
    }

    pub fn padding(&self) -> Inset {
        match self {
            Layout::Flow(layout) => layout.padding,
            Layout::Horizontal(layout) => layout.padding,
            Layout::Vertical(layout) => layout.padding,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Layout::Flow(layout) => layout.to_value(),
            Layout::Horizontal(layout) => layout.to_value(),
            Layout::Vertical(layout) => layout.to_value(),
        }
    }

    /// Deserialize from a tagged key-value document; unknown tags degrade to
    /// the default flow layout with a warning.
    pub fn from_value(doc: &Value) -> Self {
        match serial::str_field(doc, "type") {
            Some("FlowLayout") => Layout::Flow(FlowLayout::from_value(doc)),
            Some("HorizontalLayout") => Layout::Horizontal(HorizontalLayout::from_value(doc)),
            Some("VerticalLayout") => Layout::Vertical(VerticalLayout::from_value(doc)),
            tag => {
                log::warn!("unknown layout type {tag:?}, using default flow layout");
                Layout::default()
            }
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Flow(FlowLayout::default())
    }
}

impl From<FlowLayout> for Layout {
    fn from(layout: FlowLayout) -> Self {
        Layout::Flow(layout)
    }
}

impl From<HorizontalLayout> for Layout {
    fn from(layout: HorizontalLayout) -> Self {
        Layout::Horizontal(layout)
    }
}

impl From<VerticalLayout> for Layout {
    fn from(layout: VerticalLayout) -> Self {
        Layout::Vertical(layout)
    }
}

/// Pack children left to right, wrapping to a new line when the next child
/// would exceed the available width
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlowLayout {
    pub padding: Inset,
    /// Spacing between children (x) and between lines (y)
    pub spacing: Vec2,
    pub h_align: HorizontalAlign,
    pub v_align: VerticalAlign,
}

/// One wrapped line: the child index range it covers plus its packed extent.
/// The range includes skipped children so alignment passes can revisit them
/// by original index.
#[derive(Clone, Copy, Debug)]
struct FlowLine {
    start: usize,
    end: usize,
    width: f32,
    height: f32,
}

impl FlowLayout {
    fn lines(&self, content: Rect, children: &[Node]) -> Vec<FlowLine> {
        let available = content.width();
        let mut lines = Vec::new();
        let mut start = 0;
        let mut width = 0.0_f32;
        let mut height = 0.0_f32;
        let mut placed = 0_usize;
        for (index, child) in children.iter().enumerate() {
            let Some(slot) = slot_for(child, content.size()) else {
                // Zero-cost placeholder: stays in the current line's range.
                continue;
            };
            let advance = slot.total_width();
            let extended = width + self.spacing.x + advance;
            // Wrap only when the line already holds a child; an oversized
            // first child occupies its line alone.
            if placed > 0 && extended > available {
                lines.push(FlowLine {
                    start,
                    end: index,
                    width,
                    height,
                });
                start = index;
                width = advance;
                height = slot.total_height();
                placed = 1;
            } else {
                width = if placed > 0 { extended } else { advance };
                height = height.max(slot.total_height());
                placed += 1;
            }
        }
        if start < children.len() {
            lines.push(FlowLine {
                start,
                end: children.len(),
                width,
                height,
            });
        }
        lines
    }

    fn arrange(&self, rect: Rect, children: &[Node]) -> Vec<Option<Rect>> {
        let content = rect.shrink(self.padding);
        let mut rects = vec![None; children.len()];
        let mut line_y = content.min.y;
        for line in self.lines(content, children) {
            let leftover = (content.width() - line.width).max(0.0);
            let mut x = content.min.x + self.h_align.offset(leftover);
            let mut placed = 0_usize;
            for index in line.start..line.end {
                let Some(slot) = slot_for(&children[index], content.size()) else {
                    continue;
                };
                if placed > 0 {
                    x += self.spacing.x;
                }
                let y = line_y + self.v_align.offset(line.height - slot.total_height());
                let min = Vec2::new(x + slot.margin.left, y + slot.margin.top);
                rects[index] = Some(Rect::from_min_size(min, slot.size));
                x += slot.total_width();
                placed += 1;
            }
            line_y += line.height + self.spacing.y;
        }
        rects
    }

    fn measure_fitting_size(&self, parent: Rect, children: &[Node]) -> Vec2 {
        let content = parent.shrink(self.padding);
        let mut width = 0.0_f32;
        let mut height = 0.0_f32;
        for (i, line) in self.lines(content, children).iter().enumerate() {
            width = width.max(line.width);
            if i > 0 {
                height += self.spacing.y;
            }
            height += line.height;
        }
        Vec2::new(
            width + self.padding.horizontal(),
            height + self.padding.vertical(),
        )
    }

    pub fn to_value(&self) -> Value {
        json!({
            "type": "FlowLayout",
            "padding": serial::inset_to_value(self.padding),
            "spacing": serial::vec2_to_value(self.spacing),
            "horizontalAlign": self.h_align.as_str(),
            "verticalAlign": self.v_align.as_str(),
        })
    }

    pub fn from_value(doc: &Value) -> Self {
        Self {
            padding: serial::inset_field(doc, "padding", Inset::zero()),
            spacing: serial::vec2_field(doc, "spacing", Vec2::ZERO),
            h_align: serial::parse_str_field(
                doc,
                "horizontalAlign",
                HorizontalAlign::parse,
                HorizontalAlign::default(),
            ),
            v_align: serial::parse_str_field(
                doc,
                "verticalAlign",
                VerticalAlign::parse,
                VerticalAlign::default(),
            ),
        }
    }
}

/// Arrange children in a single row
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HorizontalLayout {
    pub padding: Inset,
    /// Spacing before every child after the first
    pub spacing: f32,
    /// Primary-axis placement of leftover space when no child is flexible
    pub h_align: HorizontalAlign,
    /// Cross-axis placement of each child within the row
    pub v_align: VerticalAlign,
}

impl HorizontalLayout {
    fn arrange(&self, rect: Rect, children: &[Node]) -> Vec<Option<Rect>> {
        let content = rect.shrink(self.padding);
        let slots: Vec<Option<Slot>> = children
            .iter()
            .map(|child| slot_for(child, content.size()))
            .collect();
        let (natural, spacing_total, total_weight) = self.run_extent(&slots);
        let leftover = (content.width() - natural - spacing_total).max(0.0);

        let mut rects = vec![None; children.len()];
        let mut x = content.min.x;
        if total_weight <= 0.0 {
            x += self.h_align.offset(leftover);
        }
        let mut placed = 0_usize;
        for (index, slot) in slots.iter().enumerate() {
            let Some(slot) = slot else { continue };
            if placed > 0 {
                x += self.spacing;
            }
            // Flexible children receive their share of leftover space on top
            // of their measured size; weight 0 keeps the measured size.
            let extra = if total_weight > 0.0 {
                leftover * slot.weight / total_weight
            } else {
                0.0
            };
            let size = Vec2::new(slot.size.x + extra, slot.size.y);
            let cross_leftover = (content.height() - slot.total_height()).max(0.0);
            let y = content.min.y + self.v_align.offset(cross_leftover);
            let min = Vec2::new(x + slot.margin.left, y + slot.margin.top);
            rects[index] = Some(Rect::from_min_size(min, size));
            x += size.x + slot.margin.horizontal();
            placed += 1;
        }
        rects
    }

    fn run_extent(&self, slots: &[Option<Slot>]) -> (f32, f32, f32) {
        let mut natural = 0.0_f32;
        let mut total_weight = 0.0_f32;
        let mut placed = 0_usize;
        for slot in slots.iter().flatten() {
            natural += slot.total_width();
            total_weight += slot.weight;
            placed += 1;
        }
        let spacing_total = self.spacing * placed.saturating_sub(1) as f32;
        (natural, spacing_total, total_weight)
    }

    fn measure_fitting_size(&self, parent: Rect, children: &[Node]) -> Vec2 {
        let content = parent.shrink(self.padding);
        let slots: Vec<Option<Slot>> = children
            .iter()
            .map(|child| slot_for(child, content.size()))
            .collect();
        let (natural, spacing_total, _) = self.run_extent(&slots);
        let cross = slots
            .iter()
            .flatten()
            .map(Slot::total_height)
            .fold(0.0_f32, f32::max);
        Vec2::new(
            natural + spacing_total + self.padding.horizontal(),
            cross + self.padding.vertical(),
        )
    }

    pub fn to_value(&self) -> Value {
        json!({
            "type": "HorizontalLayout",
            "padding": serial::inset_to_value(self.padding),
            "spacing": self.spacing,
            "horizontalAlign": self.h_align.as_str(),
            "verticalAlign": self.v_align.as_str(),
        })
    }

    pub fn from_value(doc: &Value) -> Self {
        Self {
            padding: serial::inset_field(doc, "padding", Inset::zero()),
            spacing: serial::f32_field(doc, "spacing", 0.0),
            h_align: serial::parse_str_field(
                doc,
                "horizontalAlign",
                HorizontalAlign::parse,
                HorizontalAlign::default(),
            ),
            v_align: serial::parse_str_field(
                doc,
                "verticalAlign",
                VerticalAlign::parse,
                VerticalAlign::default(),
            ),
        }
    }
}

/// Arrange children in a single column
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VerticalLayout {
    pub padding: Inset,
    /// Spacing before every child after the first
    pub spacing: f32,
    /// Cross-axis placement of each child within the column
    pub h_align: HorizontalAlign,
    /// Primary-axis placement of leftover space when no child is flexible
    pub v_align: VerticalAlign,
}

impl VerticalLayout {
    fn arrange(&self, rect: Rect, children: &[Node]) -> Vec<Option<Rect>> {
        let content = rect.shrink(self.padding);
        let slots: Vec<Option<Slot>> = children
            .iter()
            .map(|child| slot_for(child, content.size()))
            .collect();
        let (natural, spacing_total, total_weight) = self.run_extent(&slots);
        let leftover = (content.height() - natural - spacing_total).max(0.0);

        let mut rects = vec![None; children.len()];
        let mut y = content.min.y;
        if total_weight <= 0.0 {
            y += self.v_align.offset(leftover);
        }
        let mut placed = 0_usize;
        for (index, slot) in slots.iter().enumerate() {
            let Some(slot) = slot else { continue };
            if placed > 0 {
                y += self.spacing;
            }
            let extra = if total_weight > 0.0 {
                leftover * slot.weight / total_weight
            } else {
                0.0
            };
            let size = Vec2::new(slot.size.x, slot.size.y + extra);
            let cross_leftover = (content.width() - slot.total_width()).max(0.0);
            let x = content.min.x + self.h_align.offset(cross_leftover);
            let min = Vec2::new(x + slot.margin.left, y + slot.margin.top);
            rects[index] = Some(Rect::from_min_size(min, size));
            y += size.y + slot.margin.vertical();
            placed += 1;
        }
        rects
    }

    fn run_extent(&self, slots: &[Option<Slot>]) -> (f32, f32, f32) {
        let mut natural = 0.0_f32;
        let mut total_weight = 0.0_f32;
        let mut placed = 0_usize;
        for slot in slots.iter().flatten() {
            natural += slot.total_height();
            total_weight += slot.weight;
            placed += 1;
        }
        let spacing_total = self.spacing * placed.saturating_sub(1) as f32;
        (natural, spacing_total, total_weight)
    }

    fn measure_fitting_size(&self, parent: Rect, children: &[Node]) -> Vec2 {
        let content = parent.shrink(self.padding);
        let slots: Vec<Option<Slot>> = children
            .iter()
            .map(|child| slot_for(child, content.size()))
            .collect();
        let (natural, spacing_total, _) = self.run_extent(&slots);
        let cross = slots
            .iter()
            .flatten()
            .map(Slot::total_width)
            .fold(0.0_f32, f32::max);
        Vec2::new(
            cross + self.padding.horizontal(),
            natural + spacing_total + self.padding.vertical(),
        )
    }

    pub fn to_value(&self) -> Value {
        json!({
            "type": "VerticalLayout",
            "padding": serial::inset_to_value(self.padding),
            "spacing": self.spacing,
            "horizontalAlign": self.h_align.as_str(),
            "verticalAlign": self.v_align.as_str(),
        })
    }

    pub fn from_value(doc: &Value) -> Self {
        Self {
            padding: serial::inset_field(doc, "padding", Inset::zero()),
            spacing: serial::f32_field(doc, "spacing", 0.0),
            h_align: serial::parse_str_field(
                doc,
                "horizontalAlign",
                HorizontalAlign::parse,
                HorizontalAlign::default(),
            ),
            v_align: serial::parse_str_field(
                doc,
                "verticalAlign",
                VerticalAlign::parse,
                VerticalAlign::default(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{AnchorRegion, BoxRegion};

    fn container(width: f32, height: f32) -> Rect {
        Rect::from_min_size(Vec2::ZERO, Vec2::new(width, height))
    }

    fn fixed_child(width: f32, height: f32) -> Node {
        Node::new("child").with_region(BoxRegion::fixed(width, height))
    }

    #[test]
    fn test_flow_wraps_when_line_is_full() {
        let children = vec![
            fixed_child(40.0, 10.0),
            fixed_child(40.0, 10.0),
            fixed_child(40.0, 10.0),
        ];
        let layout = FlowLayout::default();
        let rects = layout.arrange(container(100.0, 50.0), &children);

        assert_eq!(rects[0].unwrap().min, Vec2::new(0.0, 0.0));
        assert_eq!(rects[1].unwrap().min, Vec2::new(40.0, 0.0));
        // Third child exceeds the available width and starts line two.
        assert_eq!(rects[2].unwrap().min, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_flow_arrange_is_idempotent() {
        let children = vec![fixed_child(60.0, 10.0), fixed_child(60.0, 20.0)];
        let layout = FlowLayout {
            spacing: Vec2::new(4.0, 2.0),
            ..FlowLayout::default()
        };
        let first = layout.arrange(container(100.0, 50.0), &children);
        let second = layout.arrange(container(100.0, 50.0), &children);
        assert_eq!(first, second);
    }

    #[test]
    fn test_flow_oversized_first_child_keeps_its_line() {
        let children = vec![fixed_child(150.0, 10.0), fixed_child(40.0, 20.0)];
        let layout = FlowLayout::default();
        let rects = layout.arrange(container(100.0, 50.0), &children);
        assert_eq!(rects[0].unwrap().min, Vec2::new(0.0, 0.0));
        assert_eq!(rects[1].unwrap().min, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_flow_skips_inactive_and_anchor_children() {
        let children = vec![
            fixed_child(40.0, 10.0),
            fixed_child(40.0, 30.0).with_active(false),
            Node::new("badge").with_region(AnchorRegion::top_right().with_size(40.0, 40.0)),
            fixed_child(40.0, 10.0),
        ];
        let layout = FlowLayout::default();
        let rects = layout.arrange(container(100.0, 50.0), &children);

        assert!(rects[1].is_none());
        assert!(rects[2].is_none());
        // Skipped children cost nothing: the last child still fits on line 1,
        // and the inactive child's height does not stretch the line.
        assert_eq!(rects[3].unwrap().min, Vec2::new(40.0, 0.0));
    }

    #[test]
    fn test_flow_line_spacing_and_padding() {
        let children = vec![
            fixed_child(80.0, 10.0),
            fixed_child(80.0, 20.0),
            fixed_child(80.0, 30.0),
        ];
        let layout = FlowLayout {
            padding: Inset::all(5.0),
            spacing: Vec2::new(0.0, 4.0),
            ..FlowLayout::default()
        };
        let rects = layout.arrange(container(100.0, 200.0), &children);
        assert_eq!(rects[0].unwrap().min, Vec2::new(5.0, 5.0));
        assert_eq!(rects[1].unwrap().min, Vec2::new(5.0, 19.0));
        assert_eq!(rects[2].unwrap().min, Vec2::new(5.0, 43.0));

        let fitted = layout.measure_fitting_size(container(100.0, 200.0), &children);
        assert_eq!(fitted, Vec2::new(90.0, 78.0));
    }

    #[test]
    fn test_flow_line_alignment() {
        let children = vec![fixed_child(30.0, 10.0), fixed_child(30.0, 20.0)];
        let layout = FlowLayout {
            h_align: HorizontalAlign::Right,
            v_align: VerticalAlign::Bottom,
            ..FlowLayout::default()
        };
        let rects = layout.arrange(container(100.0, 50.0), &children);
        // Line width 60 leaves 40 on the right; the shorter child drops to
        // the line's bottom edge.
        assert_eq!(rects[0].unwrap().min, Vec2::new(40.0, 10.0));
        assert_eq!(rects[1].unwrap().min, Vec2::new(70.0, 0.0));
    }

    #[test]
    fn test_horizontal_flexible_weight_distribution() {
        let children = vec![
            Node::new("a").with_region(BoxRegion::fixed(50.0, 20.0).with_flexible_weight(1.0)),
            Node::new("b").with_region(BoxRegion::fixed(50.0, 20.0).with_flexible_weight(3.0)),
        ];
        let layout = HorizontalLayout::default();
        let rects = layout.arrange(container(300.0, 40.0), &children);

        assert_eq!(rects[0].unwrap().width(), 100.0);
        assert_eq!(rects[1].unwrap().width(), 200.0);
        assert_eq!(rects[1].unwrap().min.x, 100.0);
    }

    #[test]
    fn test_horizontal_weight_zero_keeps_measured_size() {
        let children = vec![
            Node::new("a").with_region(BoxRegion::fixed(50.0, 20.0)),
            Node::new("b").with_region(BoxRegion::fixed(50.0, 20.0).with_flexible_weight(2.0)),
        ];
        let layout = HorizontalLayout::default();
        let rects = layout.arrange(container(300.0, 40.0), &children);

        assert_eq!(rects[0].unwrap().width(), 50.0);
        assert_eq!(rects[1].unwrap().width(), 250.0);
    }

    #[test]
    fn test_horizontal_spacing_margins_and_fitting() {
        let children = vec![
            fixed_child(40.0, 10.0),
            Node::new("b")
                .with_region(BoxRegion::fixed(40.0, 24.0).with_margin(Inset::symmetric(3.0, 2.0))),
        ];
        let layout = HorizontalLayout {
            padding: Inset::lrtb(10.0, 10.0, 5.0, 5.0),
            spacing: 6.0,
            ..HorizontalLayout::default()
        };
        let rects = layout.arrange(container(300.0, 100.0), &children);
        assert_eq!(rects[0].unwrap().min, Vec2::new(10.0, 5.0));
        // 10 + 40 + spacing 6 + margin.left 3
        assert_eq!(rects[1].unwrap().min, Vec2::new(59.0, 7.0));

        let fitted = layout.measure_fitting_size(container(300.0, 100.0), &children);
        assert_eq!(fitted, Vec2::new(40.0 + 46.0 + 6.0 + 20.0, 28.0 + 10.0));
    }

    #[test]
    fn test_horizontal_alignment_without_flex() {
        let children = vec![fixed_child(40.0, 10.0), fixed_child(40.0, 10.0)];
        let layout = HorizontalLayout {
            h_align: HorizontalAlign::Center,
            v_align: VerticalAlign::Center,
            ..HorizontalLayout::default()
        };
        let rects = layout.arrange(container(200.0, 50.0), &children);
        assert_eq!(rects[0].unwrap().min, Vec2::new(60.0, 20.0));
        assert_eq!(rects[1].unwrap().min, Vec2::new(100.0, 20.0));
    }

    #[test]
    fn test_vertical_mirrors_horizontal() {
        let children = vec![
            Node::new("a").with_region(BoxRegion::fixed(20.0, 50.0).with_flexible_weight(1.0)),
            Node::new("b").with_region(BoxRegion::fixed(20.0, 50.0).with_flexible_weight(3.0)),
        ];
        let layout = VerticalLayout::default();
        let rects = layout.arrange(container(40.0, 300.0), &children);

        assert_eq!(rects[0].unwrap().height(), 100.0);
        assert_eq!(rects[1].unwrap().height(), 200.0);
        assert_eq!(rects[1].unwrap().min.y, 100.0);
    }

    #[test]
    fn test_vertical_cross_alignment_and_fitting() {
        let children = vec![fixed_child(20.0, 10.0), fixed_child(40.0, 10.0)];
        let layout = VerticalLayout {
            spacing: 5.0,
            h_align: HorizontalAlign::Right,
            ..VerticalLayout::default()
        };
        let rects = layout.arrange(container(100.0, 100.0), &children);
        assert_eq!(rects[0].unwrap().min, Vec2::new(80.0, 0.0));
        assert_eq!(rects[1].unwrap().min, Vec2::new(60.0, 15.0));

        let fitted = layout.measure_fitting_size(container(100.0, 100.0), &children);
        assert_eq!(fitted, Vec2::new(40.0, 25.0));
    }

    #[test]
    fn test_ratio_children_measure_against_padded_content() {
        let children = vec![Node::new("half").with_region(BoxRegion::fraction(0.5, 1.0))];
        let layout = HorizontalLayout {
            padding: Inset::all(10.0),
            ..HorizontalLayout::default()
        };
        let rects = layout.arrange(container(120.0, 60.0), &children);
        assert_eq!(rects[0].unwrap().size(), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn test_round_trip() {
        let samples = [
            Layout::default(),
            Layout::Flow(FlowLayout {
                padding: Inset::all(2.0),
                spacing: Vec2::new(4.0, 8.0),
                h_align: HorizontalAlign::Center,
                v_align: VerticalAlign::Bottom,
            }),
            Layout::Horizontal(HorizontalLayout {
                padding: Inset::lrtb(1.0, 2.0, 3.0, 4.0),
                spacing: 6.0,
                h_align: HorizontalAlign::Right,
                v_align: VerticalAlign::Center,
            }),
            Layout::Vertical(VerticalLayout {
                spacing: 12.0,
                ..VerticalLayout::default()
            }),
        ];
        for layout in samples {
            assert_eq!(Layout::from_value(&layout.to_value()), layout);
        }
    }

    #[test]
    fn test_from_value_defaults() {
        let layout = Layout::from_value(&json!({"type": "HorizontalLayout"}));
        assert_eq!(layout, Layout::Horizontal(HorizontalLayout::default()));

        // Unknown alignment string degrades field-by-field.
        let layout = Layout::from_value(&json!({
            "type": "VerticalLayout",
            "spacing": 3.0,
            "horizontalAlign": "Sideways",
        }));
        let expected = Layout::Vertical(VerticalLayout {
            spacing: 3.0,
            ..VerticalLayout::default()
        });
        assert_eq!(layout, expected);

        assert_eq!(Layout::from_value(&json!({"type": "GridLayout"})), Layout::default());
    }
}
