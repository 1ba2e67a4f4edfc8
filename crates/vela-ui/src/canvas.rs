//! Canvas: root of a node tree and its frame driver
//!
//! The canvas owns the tree, the parameter table, and the frame order
//! contract: one `update` resolves every property first and then runs any
//! pending layout pass, so geometry read during `draw` always reflects the
//! frame's already-resolved property values. `draw` is read-only.

use glam::Vec2;

use crate::node::Node;
use crate::param::ParamTable;
use crate::primitives::Rect;

/// A root node, its parameter table, and the per-frame drive order
pub struct Canvas {
    rect: Rect,
    root: Node,
    params: ParamTable,
    needs_layout: bool,
}

impl Canvas {
    pub fn new(root: Node, rect: Rect) -> Self {
        Self {
            rect,
            root,
            params: ParamTable::new(),
            needs_layout: true,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Mutable tree access. Any structural edit may move geometry, so this
    /// conservatively schedules a layout pass for the next update.
    pub fn root_mut(&mut self) -> &mut Node {
        self.needs_layout = true;
        &mut self.root
    }

    pub fn params(&self) -> &ParamTable {
        &self.params
    }

    /// Mutable parameter access. Host/editor writes happen between frames;
    /// the update pass only reads the table.
    pub fn params_mut(&mut self) -> &mut ParamTable {
        &mut self.params
    }

    pub fn resize(&mut self, rect: Rect) {
        if rect != self.rect {
            self.rect = rect;
            self.needs_layout = true;
        }
    }

    /// Schedule a layout pass for the next update
    pub fn request_layout(&mut self) {
        self.needs_layout = true;
    }

    /// Advance one frame: resolve every property on every active node, then
    /// run a layout pass if one is pending.
    pub fn update(&mut self, delta_time: f32) {
        self.root.update_pass(&[], delta_time, &self.params, true);
        if self.needs_layout {
            self.refresh_layout();
        }
    }

    /// Synchronously recompute the whole tree's geometry.
    ///
    /// May be called explicitly mid-frame, e.g. after a programmatic resize
    /// or a fit-to-children edit. Repeating it within a frame is idempotent;
    /// each call re-walks the tree.
    pub fn refresh_layout(&mut self) {
        let rect = self.root.region().apply(self.rect, Vec2::ZERO);
        self.root.layout_with_rect(rect, true);
        self.needs_layout = false;
        log::trace!("layout pass over canvas {:?}", self.rect.size());
    }

    /// Read-only draw pass over the resolved tree
    pub fn draw(&self) {
        self.root.draw();
    }

    /// Clear every property parameter reference that no longer resolves to
    /// an existing, type-matching parameter, returning the cleared names.
    ///
    /// Resolution ignores dangling references on its own; the host runs this
    /// sweep at well-defined points (after paste, undo, parameter removal)
    /// to surface them to the user.
    pub fn remove_invalid_param_refs(&mut self) -> Vec<String> {
        let mut cleared = Vec::new();
        let params = &self.params;
        self.root.visit_properties(&mut |property| {
            let Some(name) = property.param_ref().map(str::to_owned) else {
                return;
            };
            let valid = params.get(&name).map(|value| value.ty()) == Some(property.edit_kind());
            if !valid {
                property.set_param_ref("");
                cleared.push(name);
            }
        });
        if !cleared.is_empty() {
            log::debug!("cleared {} dangling parameter reference(s)", cleared.len());
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::color::Color;
    use crate::component::Component;
    use crate::layout::VerticalLayout;
    use crate::property::{
        AnyProperty, InteractionState, Property, PropertyValue, SmoothProperty,
    };
    use crate::region::BoxRegion;

    type DrawLog = Rc<RefCell<Vec<String>>>;
    type FillProbe = Rc<RefCell<Color>>;

    struct Swatch {
        label: &'static str,
        fill: SmoothProperty<Color>,
        probe: FillProbe,
        log: DrawLog,
    }

    impl Swatch {
        fn new(label: &'static str, log: DrawLog) -> Self {
            Self {
                label,
                fill: SmoothProperty::from_value(
                    PropertyValue::new(Color::BLACK)
                        .with_state(InteractionState::Hovered, Color::WHITE),
                ),
                probe: Rc::new(RefCell::new(Color::BLACK)),
                log,
            }
        }

        fn with_probe(mut self, probe: FillProbe) -> Self {
            self.probe = probe;
            self
        }
    }

    impl Component for Swatch {
        fn update(&mut self, ctx: &crate::property::UpdateContext<'_>) {
            self.fill.update(ctx);
            *self.probe.borrow_mut() = *self.fill.current();
        }

        fn draw(&self, rect: &Rect) {
            self.log
                .borrow_mut()
                .push(format!("{}@{},{}", self.label, rect.min.x, rect.min.y));
        }

        fn properties(&mut self) -> Vec<&mut dyn AnyProperty> {
            vec![&mut self.fill]
        }
    }

    fn canvas_rect() -> Rect {
        Rect::from_min_size(Vec2::ZERO, Vec2::new(200.0, 100.0))
    }

    #[test]
    fn test_update_resolves_properties_then_lays_out() {
        let log: DrawLog = Rc::default();
        let root = Node::new("root")
            .with_layout(VerticalLayout::default())
            .with_child(
                Node::new("tile")
                    .with_region(BoxRegion::fixed(40.0, 20.0))
                    .with_component(Swatch::new("tile", log.clone())),
            );
        let mut canvas = Canvas::new(root, canvas_rect());
        canvas.update(1.0 / 60.0);

        assert_eq!(
            canvas.root().children()[0].computed_rect(),
            Some(Rect::from_min_size(Vec2::ZERO, Vec2::new(40.0, 20.0)))
        );

        canvas.draw();
        assert_eq!(log.borrow().as_slice(), ["tile@0,0"]);
    }

    #[test]
    fn test_resize_triggers_relayout() {
        let root = Node::new("root")
            .with_child(Node::new("half").with_region(BoxRegion::fraction(0.5, 1.0)));
        let mut canvas = Canvas::new(root, canvas_rect());
        canvas.update(1.0 / 60.0);
        assert_eq!(
            canvas.root().children()[0].computed_rect().unwrap().width(),
            100.0
        );

        canvas.resize(Rect::from_min_size(Vec2::ZERO, Vec2::new(300.0, 100.0)));
        canvas.update(1.0 / 60.0);
        assert_eq!(
            canvas.root().children()[0].computed_rect().unwrap().width(),
            150.0
        );
    }

    #[test]
    fn test_refresh_layout_is_idempotent() {
        let root = Node::new("root")
            .with_child(Node::new("a").with_region(BoxRegion::fixed(10.0, 10.0)));
        let mut canvas = Canvas::new(root, canvas_rect());
        canvas.refresh_layout();
        let first = canvas.root().children()[0].computed_rect();
        canvas.refresh_layout();
        assert_eq!(canvas.root().children()[0].computed_rect(), first);
    }

    #[test]
    fn test_draw_respects_z_order_overrides() {
        let log: DrawLog = Rc::default();
        let root = Node::new("root").with_children(vec![
            Node::new("back")
                .with_region(BoxRegion::fixed(10.0, 10.0))
                .with_z_order(5)
                .with_component(Swatch::new("overlay", log.clone())),
            Node::new("first")
                .with_region(BoxRegion::fixed(10.0, 10.0))
                .with_component(Swatch::new("first", log.clone())),
            Node::new("second")
                .with_region(BoxRegion::fixed(10.0, 10.0))
                .with_component(Swatch::new("second", log.clone())),
        ]);
        let mut canvas = Canvas::new(root, canvas_rect());
        canvas.update(1.0 / 60.0);
        canvas.draw();

        let labels: Vec<String> = log
            .borrow()
            .iter()
            .map(|entry| entry.split('@').next().unwrap().to_owned())
            .collect();
        // Insertion order within z 0, the z 5 override drawn last.
        assert_eq!(labels, ["first", "second", "overlay"]);
    }

    #[test]
    fn test_update_feeds_node_interaction_state_to_components() {
        let probe: FillProbe = Rc::new(RefCell::new(Color::transparent()));
        let root = Node::new("root").with_child(
            Node::new("tile")
                .with_region(BoxRegion::fixed(40.0, 20.0))
                .with_component(Swatch::new("tile", Rc::default()).with_probe(probe.clone())),
        );
        let mut canvas = Canvas::new(root, canvas_rect());
        canvas.update(1.0 / 60.0);
        assert_eq!(*probe.borrow(), Color::BLACK);

        canvas
            .root_mut()
            .find_mut("tile")
            .unwrap()
            .set_interaction_state(InteractionState::Hovered);
        // Smooth time is zero on the swatch fill, so the hover state snaps
        // on the very next update.
        canvas.update(1.0 / 60.0);
        assert_eq!(*probe.borrow(), Color::WHITE);
    }

    #[test]
    fn test_remove_invalid_param_refs_reports_cleared_names() {
        struct Bound {
            speed: Property<f32>,
            title: Property<String>,
        }

        impl Component for Bound {
            fn properties(&mut self) -> Vec<&mut dyn AnyProperty> {
                vec![&mut self.speed, &mut self.title]
            }
        }

        let mut speed = Property::new(1.0_f32);
        speed.set_param_ref("speed");
        let mut title = Property::new(String::new());
        title.set_param_ref("speed");

        let root = Node::new("root").with_component(Bound { speed, title });
        let mut canvas = Canvas::new(root, canvas_rect());
        canvas.params_mut().set("speed", 4.0);

        // "speed" exists and is a Number: the f32 binding survives, the
        // String binding is type-mismatched and gets cleared.
        let cleared = canvas.remove_invalid_param_refs();
        assert_eq!(cleared, ["speed"]);

        canvas.params_mut().remove("speed");
        let cleared = canvas.remove_invalid_param_refs();
        assert_eq!(cleared, ["speed"]);

        let cleared = canvas.remove_invalid_param_refs();
        assert!(cleared.is_empty());
    }
}
