//! Headless frame-stepping demo.
//!
//! Builds a small tree (a toolbar, a flexible content area, an anchored
//! badge), binds one property to a canvas parameter, then steps frames and
//! logs the resolved geometry and colors.
//!
//! Run with `RUST_LOG=info cargo run --example headless`.

use vela_ui::{
    AnchorRegion, AnyProperty, BoxRegion, Canvas, Color, Component, FitTarget, HorizontalLayout,
    Inset, InteractionState, Node, PropertyValue, Rect, SmoothProperty, Vec2, VerticalLayout,
};

/// A flat-colored panel whose fill eases between interaction states
struct Panel {
    label: &'static str,
    fill: SmoothProperty<Color>,
}

impl Panel {
    fn new(label: &'static str, base: Color) -> Self {
        Self {
            label,
            fill: SmoothProperty::from_value(
                PropertyValue::new(base)
                    .with_state(InteractionState::Hovered, Color::from_rgba8(90, 160, 255, 255))
                    .with_state(InteractionState::Pressed, Color::from_rgba8(30, 90, 200, 255))
                    .with_smooth_time(0.12),
            ),
        }
    }

    fn bound_to(mut self, param: &str) -> Self {
        self.fill.set_param_ref(param);
        self
    }
}

impl Component for Panel {
    fn draw(&self, rect: &Rect) {
        log::info!(
            "{:<8} {:>6.1},{:>6.1} {:>6.1}x{:>6.1} fill {}",
            self.label,
            rect.min.x,
            rect.min.y,
            rect.width(),
            rect.height(),
            self.fill.current().to_hex(),
        );
    }

    fn properties(&mut self) -> Vec<&mut dyn AnyProperty> {
        vec![&mut self.fill]
    }
}

fn build_tree() -> Node {
    Node::new("screen")
        .with_layout(VerticalLayout {
            spacing: 8.0,
            padding: Inset::all(16.0),
            ..VerticalLayout::default()
        })
        .with_children(vec![
            Node::new("toolbar")
                .with_region(BoxRegion::fraction(1.0, 0.0).with_size_delta(Vec2::new(0.0, 48.0)))
                .with_layout(HorizontalLayout {
                    spacing: 4.0,
                    ..HorizontalLayout::default()
                })
                .with_children(vec![
                    Node::new("open")
                        .with_region(BoxRegion::fixed(96.0, 48.0))
                        .with_component(Panel::new("open", Color::from_rgba8(60, 60, 70, 255))),
                    Node::new("save")
                        .with_region(BoxRegion::fixed(96.0, 48.0))
                        .with_component(Panel::new("save", Color::from_rgba8(60, 60, 70, 255))),
                ]),
            Node::new("content")
                .with_region(BoxRegion::fraction(1.0, 0.0).with_flexible_weight(1.0))
                .with_component(
                    Panel::new("content", Color::from_rgba8(35, 35, 40, 255)).bound_to("accent"),
                ),
        ])
        .with_child(
            Node::new("badge")
                .with_region(AnchorRegion::top_right().with_size(64.0, 64.0))
                .with_component(Panel::new("badge", Color::from_rgba8(220, 80, 80, 255))),
        )
}

fn main() {
    env_logger::init();

    let mut canvas = Canvas::new(
        build_tree(),
        Rect::from_min_size(Vec2::ZERO, Vec2::new(640.0, 360.0)),
    );
    canvas
        .params_mut()
        .set("accent", Color::from_rgba8(255, 170, 40, 255));

    let dt = 1.0 / 60.0;
    canvas.update(dt);
    log::info!("--- initial frame ---");
    canvas.draw();

    canvas
        .root_mut()
        .find_mut("save")
        .unwrap()
        .set_interaction_state(InteractionState::Hovered);
    for _ in 0..30 {
        canvas.update(dt);
    }
    log::info!("--- after hovering `save` for half a second ---");
    canvas.draw();

    // Shrink the toolbar to wrap its two buttons, then re-run layout so the
    // new size propagates.
    canvas
        .root_mut()
        .find_mut("toolbar")
        .unwrap()
        .fit_region_to_children(FitTarget::WidthOnly);
    canvas.refresh_layout();
    log::info!("--- after fitting the toolbar to its children ---");
    canvas.draw();
}
