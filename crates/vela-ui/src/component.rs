//! Component trait for behaviors attached to nodes
//!
//! Components are the extension point for everything a node can show or do:
//! drawable widgets, input handlers, editor adapters. The core only requires
//! that a component can resolve its properties once per frame and issue draw
//! data against the node's resolved rectangle.

use crate::primitives::Rect;
use crate::property::{AnyProperty, UpdateContext};

/// A behavior attached to a node
///
/// Components own their visual attributes as properties and expose them
/// through [`Component::properties`], which gives the frame driver and
/// generic editors one uniform surface over heterogeneous value types.
pub trait Component {
    /// Resolve this component's properties for the frame.
    ///
    /// The default implementation drives every property returned by
    /// [`Component::properties`]; override it when a component carries
    /// per-frame state beyond its properties.
    fn update(&mut self, ctx: &UpdateContext<'_>) {
        for property in self.properties() {
            property.update(ctx);
        }
    }

    /// Emit draw data for the node's resolved rectangle.
    ///
    /// Called during the read-only draw pass: implementations must not
    /// mutate layout geometry or property state.
    fn draw(&self, _rect: &Rect) {}

    /// The component's editable properties
    fn properties(&mut self) -> Vec<&mut dyn AnyProperty>;
}
