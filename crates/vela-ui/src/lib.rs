//! # vela-ui
//!
//! Rendering backend agnostic retained-mode UI core.
//!
//! This crate provides the layout/constraint engine and the property
//! resolution system for a retained node tree, with zero dependencies on any
//! graphics API. Rendering, text shaping, and input polling are supplied by
//! the embedding host through the [`Component`] boundary.
//!
//! ## Geometry
//!
//! - [`Region`] - a node's own placement rule: [`BoxRegion`] (arranged by
//!   the parent's layout) or [`AnchorRegion`] (self-placing)
//! - [`Layout`] - how a node arranges its box-region children:
//!   [`FlowLayout`], [`HorizontalLayout`], [`VerticalLayout`]
//! - [`Node`] / [`Canvas`] - the tree and its frame driver
//!
//! ## Properties
//!
//! - [`Property`] / [`SmoothProperty`] - per-attribute values resolved each
//!   frame from interaction state, style states, and parameters
//! - [`PropertyValue`] - the state-keyed value table with its fallback
//!   lattice
//! - [`ParamTable`] - named, typed values a property can bind to
//! - [`AnyProperty`] - the type-erased surface generic editors consume
//!
//! ## Frame contract
//!
//! The host calls [`Canvas::update`] once per frame (property resolution,
//! then any pending layout pass) followed by [`Canvas::draw`] (read-only).
//! Everything is single-threaded and synchronous; animation is nothing but
//! accumulated frame time advancing per-property smoothing.

mod canvas;
mod color;
mod component;
mod layout;
mod node;
mod param;
mod primitives;
mod property;
mod region;
mod serial;
pub mod smoothing;

pub use canvas::*;
pub use color::*;
pub use component::*;
pub use layout::*;
pub use node::*;
pub use param::*;
pub use primitives::*;
pub use property::*;
pub use region::*;
pub use smoothing::*;

pub use glam::Vec2;
