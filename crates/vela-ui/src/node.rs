use glam::Vec2;

use crate::component::Component;
use crate::layout::{FitTarget, Layout};
use crate::param::ParamTable;
use crate::primitives::Rect;
use crate::property::{AnyProperty, InteractionState, UpdateContext};
use crate::region::{BoxRegion, Region};

/// A tree element with a region, an optional child layout, and attached
/// components
///
/// Ownership is strictly parent to child: a node owns its children, removal
/// destroys the subtree, and re-parenting is a move. Names are labels for
/// lookup and diagnostics, not identifiers; they need not be unique.
///
/// A node's effective rectangle is written once per layout pass and is
/// immutable between passes.
pub struct Node {
    name: String,
    active_self: bool,
    active_in_hierarchy: bool,
    region: Region,
    layout: Option<Layout>,
    z_order: Option<i32>,
    interaction_state: InteractionState,
    style_states: Vec<String>,
    components: Vec<Box<dyn Component>>,
    children: Vec<Node>,
    computed: Option<Rect>,
}

impl Node {
    /// Create a new node with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active_self: true,
            active_in_hierarchy: true,
            region: Region::default(),
            layout: None,
            z_order: None,
            interaction_state: InteractionState::Default,
            style_states: Vec::new(),
            components: Vec::new(),
            children: Vec::new(),
            computed: None,
        }
    }

    pub fn with_region(mut self, region: impl Into<Region>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_layout(mut self, layout: impl Into<Layout>) -> Self {
        self.layout = Some(layout.into());
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active_self = active;
        self
    }

    /// Override the sibling draw order; higher draws later (on top).
    /// Siblings without an override keep insertion order at z 0.
    pub fn with_z_order(mut self, z_order: i32) -> Self {
        self.z_order = Some(z_order);
        self
    }

    /// Tag this node with a style state used as the extra axis of property
    /// resolution; descendants inherit it after their own tags
    pub fn with_style_state(mut self, name: impl Into<String>) -> Self {
        self.style_states.push(name.into());
        self
    }

    pub fn with_component(mut self, component: impl Component + 'static) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn is_active_self(&self) -> bool {
        self.active_self
    }

    /// Toggle this node. An inactive node and its whole subtree vanish from
    /// layout, property updates, and drawing without leaving the tree.
    pub fn set_active(&mut self, active: bool) {
        self.active_self = active;
    }

    /// Whether this node and all of its ancestors are active.
    /// Valid after the frame's update or layout pass.
    pub fn is_active_in_hierarchy(&self) -> bool {
        self.active_in_hierarchy
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn set_region(&mut self, region: impl Into<Region>) {
        self.region = region.into();
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn set_layout(&mut self, layout: Option<Layout>) {
        self.layout = layout;
    }

    pub fn z_order(&self) -> Option<i32> {
        self.z_order
    }

    pub fn set_z_order(&mut self, z_order: Option<i32>) {
        self.z_order = z_order;
    }

    pub fn interaction_state(&self) -> InteractionState {
        self.interaction_state
    }

    /// Written by the host input layer once per frame, before the canvas
    /// update
    pub fn set_interaction_state(&mut self, state: InteractionState) {
        self.interaction_state = state;
    }

    pub fn style_states(&self) -> &[String] {
        &self.style_states
    }

    pub fn set_style_states(&mut self, names: Vec<String>) {
        self.style_states = names;
    }

    pub fn add_component(&mut self, component: impl Component + 'static) {
        self.components.push(Box::new(component));
    }

    pub fn components(&self) -> &[Box<dyn Component>] {
        &self.components
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Append a child and return a reference to it
    pub fn add_child(&mut self, child: Node) -> &mut Node {
        self.children.push(child);
        self.children.last_mut().unwrap()
    }

    /// Remove and return the child at `index`; dropping the returned node
    /// destroys its subtree
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn remove_child(&mut self, index: usize) -> Node {
        self.children.remove(index)
    }

    /// Depth-first search of this subtree (including this node) for the
    /// first node with the given name
    pub fn find(&self, name: &str) -> Option<&Node> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Node> {
        if self.name == name {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_mut(name))
    }

    /// The effective rectangle written by the most recent layout pass
    pub fn computed_rect(&self) -> Option<Rect> {
        self.computed
    }

    /// Replace this node's region so its size matches its arranged
    /// children, per the current layout's fitting measurement.
    ///
    /// Fitted axes become fixed-size (`size_ratio` 0, `size_delta` set to
    /// the measured extent); for a box region the other axis and the margin
    /// are untouched, and an anchor region converts to a box region that
    /// preserves its current computed size on unfitted axes.
    ///
    /// Explicit, never automatic: callers refresh the layout afterwards for
    /// the new size to propagate to this node's own parent.
    pub fn fit_region_to_children(&mut self, target: FitTarget) {
        let rect = self.computed.unwrap_or_default();
        let layout = self.layout.clone().unwrap_or_default();
        let fitted = layout.measure_fitting_size(rect, &self.children);
        match &mut self.region {
            Region::Box(region) => {
                if target.fits_width() {
                    region.size_ratio.x = 0.0;
                    region.size_delta.x = fitted.x;
                }
                if target.fits_height() {
                    region.size_ratio.y = 0.0;
                    region.size_delta.y = fitted.y;
                }
            }
            Region::Anchor(_) => {
                let mut region = BoxRegion {
                    size_ratio: Vec2::ZERO,
                    size_delta: rect.size(),
                    ..BoxRegion::default()
                };
                if target.fits_width() {
                    region.size_delta.x = fitted.x;
                }
                if target.fits_height() {
                    region.size_delta.y = fitted.y;
                }
                self.region = Region::Box(region);
            }
        }
    }

    /// Visit every property of every component in this subtree
    pub fn visit_properties(&mut self, visit: &mut impl FnMut(&mut dyn AnyProperty)) {
        for component in &mut self.components {
            for property in component.properties() {
                visit(property);
            }
        }
        for child in &mut self.children {
            child.visit_properties(visit);
        }
    }

    /// Frame property pass: resolve every component property on every
    /// active node, accumulating inherited style states nearest-first.
    pub(crate) fn update_pass(
        &mut self,
        inherited_states: &[String],
        delta_time: f32,
        params: &ParamTable,
        parent_active: bool,
    ) {
        self.active_in_hierarchy = parent_active && self.active_self;
        let style_states: Vec<String> = self
            .style_states
            .iter()
            .chain(inherited_states.iter())
            .cloned()
            .collect();
        if self.active_in_hierarchy {
            let ctx = UpdateContext {
                interaction_state: self.interaction_state,
                style_states: &style_states,
                delta_time,
                params,
            };
            for component in &mut self.components {
                component.update(&ctx);
            }
        }
        let active = self.active_in_hierarchy;
        for child in &mut self.children {
            child.update_pass(&style_states, delta_time, params, active);
        }
    }

    /// Layout pass: assign this node's rectangle, arrange box-region
    /// children through the layout, self-place anchor children, recurse.
    pub(crate) fn layout_with_rect(&mut self, rect: Rect, parent_active: bool) {
        self.active_in_hierarchy = parent_active && self.active_self;
        self.computed = Some(rect);
        let placements = match &self.layout {
            Some(layout) => layout.arrange(rect, &self.children),
            None => self
                .children
                .iter()
                .map(|child| {
                    (child.active_self && child.region.is_box())
                        .then(|| child.region.apply(rect, Vec2::ZERO))
                })
                .collect(),
        };
        let active = self.active_in_hierarchy;
        for (child, placement) in self.children.iter_mut().zip(placements) {
            if !child.active_self {
                child.prune_inactive();
                continue;
            }
            // Anchor children self-place against the full parent rectangle;
            // box children take the layout's placement.
            let child_rect = match placement {
                Some(arranged) if child.region.is_box() => arranged,
                _ => child.region.apply(rect, Vec2::ZERO),
            };
            child.layout_with_rect(child_rect, active);
        }
    }

    fn prune_inactive(&mut self) {
        self.active_in_hierarchy = false;
        for child in &mut self.children {
            child.prune_inactive();
        }
    }

    /// Read-only draw pass: visit components with the resolved rectangle,
    /// then children ordered by z override (stable within equal z).
    pub fn draw(&self) {
        if !self.active_in_hierarchy {
            return;
        }
        let Some(rect) = self.computed else {
            return;
        };
        for component in &self.components {
            component.draw(&rect);
        }
        let mut order: Vec<usize> = (0..self.children.len()).collect();
        order.sort_by_key(|&index| self.children[index].z_order.unwrap_or(0));
        for index in order {
            self.children[index].draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FlowLayout, VerticalLayout};
    use crate::primitives::Inset;

    fn canvas_rect() -> Rect {
        Rect::from_min_size(Vec2::ZERO, Vec2::new(400.0, 300.0))
    }

    #[test]
    fn test_tree_editing() {
        let mut root = Node::new("root");
        root.add_child(Node::new("a"));
        root.add_child(Node::new("b").with_child(Node::new("deep")));
        assert_eq!(root.children().len(), 2);
        assert!(root.find("deep").is_some());
        assert!(root.find("missing").is_none());

        let removed = root.remove_child(0);
        assert_eq!(removed.name(), "a");
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn test_layout_pass_assigns_rects_once() {
        let mut root = Node::new("root")
            .with_layout(VerticalLayout::default())
            .with_children(vec![
                Node::new("a").with_region(BoxRegion::fixed(100.0, 40.0)),
                Node::new("b").with_region(BoxRegion::fixed(100.0, 60.0)),
            ]);
        root.layout_with_rect(canvas_rect(), true);

        assert_eq!(root.computed_rect(), Some(canvas_rect()));
        assert_eq!(
            root.children()[0].computed_rect(),
            Some(Rect::from_min_size(Vec2::ZERO, Vec2::new(100.0, 40.0)))
        );
        assert_eq!(
            root.children()[1].computed_rect().unwrap().min,
            Vec2::new(0.0, 40.0)
        );
    }

    #[test]
    fn test_inactive_subtree_is_pruned() {
        let mut root = Node::new("root").with_children(vec![
            Node::new("shown"),
            Node::new("hidden").with_active(false).with_child(Node::new("inner")),
        ]);
        root.layout_with_rect(canvas_rect(), true);

        assert!(root.children()[0].is_active_in_hierarchy());
        assert!(!root.children()[1].is_active_in_hierarchy());
        assert!(!root.children()[1].children()[0].is_active_in_hierarchy());
    }

    #[test]
    fn test_anchor_child_ignores_parent_layout() {
        let mut root = Node::new("root")
            .with_layout(VerticalLayout {
                padding: Inset::all(10.0),
                ..VerticalLayout::default()
            })
            .with_children(vec![
                Node::new("row").with_region(BoxRegion::fixed(50.0, 50.0)),
                Node::new("badge").with_region(
                    crate::region::AnchorRegion::top_right().with_size(30.0, 30.0),
                ),
            ]);
        root.layout_with_rect(canvas_rect(), true);

        // The badge places against the full parent rectangle, not the
        // padded content area, and takes no slot in the column.
        let badge = root.children()[1].computed_rect().unwrap();
        assert_eq!(badge.min, Vec2::new(370.0, 0.0));
        let row = root.children()[0].computed_rect().unwrap();
        assert_eq!(row.min, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_fit_region_to_children_is_idempotent() {
        let mut node = Node::new("panel")
            .with_region(BoxRegion::fraction(1.0, 1.0))
            .with_layout(FlowLayout {
                padding: Inset::all(5.0),
                ..FlowLayout::default()
            })
            .with_children(vec![
                Node::new("a").with_region(BoxRegion::fixed(40.0, 10.0)),
                Node::new("b").with_region(BoxRegion::fixed(40.0, 10.0)),
            ]);
        node.layout_with_rect(Rect::from_min_size(Vec2::ZERO, Vec2::new(200.0, 100.0)), true);

        node.fit_region_to_children(FitTarget::Both);
        let first = node.region().clone();
        node.fit_region_to_children(FitTarget::Both);
        assert_eq!(node.region(), &first);

        let Region::Box(region) = node.region() else {
            panic!("expected box region");
        };
        assert_eq!(region.size_ratio, Vec2::ZERO);
        assert_eq!(region.size_delta, Vec2::new(90.0, 20.0));
    }

    #[test]
    fn test_fit_width_only_leaves_height_sizing() {
        let mut node = Node::new("panel")
            .with_region(BoxRegion::fraction(1.0, 0.5))
            .with_layout(FlowLayout::default())
            .with_child(Node::new("a").with_region(BoxRegion::fixed(40.0, 10.0)));
        node.layout_with_rect(Rect::from_min_size(Vec2::ZERO, Vec2::new(200.0, 100.0)), true);

        node.fit_region_to_children(FitTarget::WidthOnly);
        let Region::Box(region) = node.region() else {
            panic!("expected box region");
        };
        assert_eq!(region.size_ratio, Vec2::new(0.0, 0.5));
        assert_eq!(region.size_delta.x, 40.0);
        assert_eq!(region.size_delta.y, 0.0);
    }

    #[test]
    fn test_fit_converts_anchor_region() {
        let mut root = Node::new("root").with_child(
            Node::new("popup")
                .with_region(crate::region::AnchorRegion::center().with_size(80.0, 60.0))
                .with_layout(FlowLayout::default())
                .with_child(Node::new("a").with_region(BoxRegion::fixed(40.0, 10.0))),
        );
        root.layout_with_rect(Rect::from_min_size(Vec2::ZERO, Vec2::new(200.0, 100.0)), true);

        let popup = root.find_mut("popup").unwrap();
        popup.fit_region_to_children(FitTarget::HeightOnly);
        let Region::Box(region) = popup.region() else {
            panic!("anchor region should convert to a box region");
        };
        // Unfitted axis preserves the computed width; fitted axis wraps.
        assert_eq!(region.size_delta, Vec2::new(80.0, 10.0));
    }
}
