use std::collections::HashMap;

use glam::Vec2;

use crate::color::Color;
use crate::param::{FromParam, ParamTable, ParamType, ParamValue};
use crate::primitives::Inset;
use crate::smoothing::{approach, Lerp};

/// Input-derived state of a node, exactly one active per frame.
///
/// Written by the host's input layer before the frame's property update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionState {
    #[default]
    Default,
    Hovered,
    Pressed,
    Disabled,
}

/// Per-frame inputs to property resolution
#[derive(Clone, Copy)]
pub struct UpdateContext<'a> {
    pub interaction_state: InteractionState,
    /// Style states in effect for the node, nearest-ancestor first
    pub style_states: &'a [String],
    /// Seconds elapsed since the previous frame
    pub delta_time: f32,
    pub params: &'a ParamTable,
}

/// Optional per-interaction-state cells
#[derive(Clone, Debug)]
struct StateValues<T> {
    default: Option<T>,
    hovered: Option<T>,
    pressed: Option<T>,
    disabled: Option<T>,
}

impl<T> StateValues<T> {
    fn get(&self, state: InteractionState) -> Option<&T> {
        match state {
            InteractionState::Default => self.default.as_ref(),
            InteractionState::Hovered => self.hovered.as_ref(),
            InteractionState::Pressed => self.pressed.as_ref(),
            InteractionState::Disabled => self.disabled.as_ref(),
        }
    }

    fn slot_mut(&mut self, state: InteractionState) -> &mut Option<T> {
        match state {
            InteractionState::Default => &mut self.default,
            InteractionState::Hovered => &mut self.hovered,
            InteractionState::Pressed => &mut self.pressed,
            InteractionState::Disabled => &mut self.disabled,
        }
    }

    fn is_empty(&self) -> bool {
        self.default.is_none()
            && self.hovered.is_none()
            && self.pressed.is_none()
            && self.disabled.is_none()
    }
}

impl<T> Default for StateValues<T> {
    fn default() -> Self {
        Self {
            default: None,
            hovered: None,
            pressed: None,
            disabled: None,
        }
    }
}

/// Per-attribute value table keyed by interaction state and style state.
///
/// The `(Default, no style state)` cell is `default_value` and always
/// exists; every other cell is an optional override. Resolution walks a
/// strict two-axis fallback lattice, most specific first:
///
/// 1. `(style state, current interaction state)`
/// 2. `(style state, Default)`
/// 3. `(no style state, current interaction state)`
/// 4. `default_value`
///
/// where the style-state axis is supplied by the first name in the node's
/// active list that has any cell here.
#[derive(Clone, Debug)]
pub struct PropertyValue<T> {
    default_value: T,
    smooth_time: f32,
    base: StateValues<T>,
    styled: HashMap<String, StateValues<T>>,
}

impl<T> PropertyValue<T> {
    pub fn new(default_value: T) -> Self {
        Self {
            default_value,
            smooth_time: 0.0,
            base: StateValues::default(),
            styled: HashMap::new(),
        }
    }

    pub fn with_state(mut self, state: InteractionState, value: T) -> Self {
        self.try_set(state, None, value);
        self
    }

    pub fn with_style_state(
        mut self,
        style_state: impl Into<String>,
        state: InteractionState,
        value: T,
    ) -> Self {
        let name = style_state.into();
        self.try_set(state, Some(&name), value);
        self
    }

    /// Time constant for smoothing, in seconds; 0 snaps
    pub fn with_smooth_time(mut self, smooth_time: f32) -> Self {
        self.smooth_time = smooth_time;
        self
    }

    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    pub fn smooth_time(&self) -> f32 {
        self.smooth_time
    }

    pub fn set_smooth_time(&mut self, smooth_time: f32) {
        self.smooth_time = smooth_time;
    }

    /// Read the exact cell for a state combination, without fallback
    pub fn get(&self, state: InteractionState, style_state: Option<&str>) -> Option<&T> {
        match style_state {
            None if state == InteractionState::Default => Some(&self.default_value),
            None => self.base.get(state),
            Some(name) => self.styled.get(name).and_then(|cells| cells.get(state)),
        }
    }

    /// Write a cell, creating it if absent. Writing the
    /// `(Default, no style state)` cell replaces `default_value`.
    pub fn try_set(&mut self, state: InteractionState, style_state: Option<&str>, value: T) -> bool {
        match style_state {
            None if state == InteractionState::Default => self.default_value = value,
            None => *self.base.slot_mut(state) = Some(value),
            Some(name) => {
                *self
                    .styled
                    .entry(name.to_owned())
                    .or_default()
                    .slot_mut(state) = Some(value)
            }
        }
        true
    }

    /// Remove a cell. Refuses to remove the `(Default, no style state)`
    /// cell, which must always exist; returns false when nothing was
    /// removed.
    pub fn try_unset(&mut self, state: InteractionState, style_state: Option<&str>) -> bool {
        match style_state {
            None if state == InteractionState::Default => false,
            None => self.base.slot_mut(state).take().is_some(),
            Some(name) => {
                let Some(cells) = self.styled.get_mut(name) else {
                    return false;
                };
                let removed = cells.slot_mut(state).take().is_some();
                if cells.is_empty() {
                    self.styled.remove(name);
                }
                removed
            }
        }
    }

    /// Resolve the value for a frame's state. Total: always terminates at
    /// `default_value`. Never mutates the table.
    pub fn resolve(&self, state: InteractionState, style_states: &[String]) -> &T {
        for name in style_states {
            let Some(cells) = self.styled.get(name.as_str()) else {
                continue;
            };
            if let Some(value) = cells.get(state) {
                return value;
            }
            if let Some(value) = cells.get(InteractionState::Default) {
                return value;
            }
            // The nearest style state with any cell owns the style axis;
            // its misses fall through to the no-style-state cells.
            break;
        }
        if let Some(value) = self.base.get(state) {
            return value;
        }
        &self.default_value
    }
}

/// Value types a property can carry: the parameter binding and editor
/// string surface over the raw value.
pub trait PropertyType: FromParam + Into<ParamValue> + Clone + PartialEq {
    fn param_type() -> ParamType;

    fn to_display_string(&self) -> String {
        let value: ParamValue = self.clone().into();
        value.to_display_string()
    }

    fn parse_display(s: &str) -> Option<Self> {
        ParamValue::parse_for_type(Self::param_type(), s).and_then(|v| Self::from_param(&v))
    }
}

impl PropertyType for bool {
    fn param_type() -> ParamType {
        ParamType::Bool
    }
}

impl PropertyType for f32 {
    fn param_type() -> ParamType {
        ParamType::Number
    }
}

impl PropertyType for f64 {
    fn param_type() -> ParamType {
        ParamType::Number
    }
}

impl PropertyType for String {
    fn param_type() -> ParamType {
        ParamType::String
    }
}

impl PropertyType for Color {
    fn param_type() -> ParamType {
        ParamType::Color
    }
}

impl PropertyType for Vec2 {
    fn param_type() -> ParamType {
        ParamType::Vec2
    }
}

impl PropertyType for Inset {
    fn param_type() -> ParamType {
        ParamType::Inset
    }
}

fn resolve_target<T: PropertyType>(
    value: &PropertyValue<T>,
    param_ref: Option<&str>,
    ctx: &UpdateContext<'_>,
) -> T {
    // A bound, type-matching parameter masks the whole lattice; a dangling
    // or mismatched reference is ignored for resolution.
    if let Some(name) = param_ref {
        if let Some(param) = ctx.params.get(name) {
            if let Some(override_value) = T::from_param(param) {
                return override_value;
            }
        }
    }
    value.resolve(ctx.interaction_state, ctx.style_states).clone()
}

/// A visual attribute resolved once per frame, snapping to its target
#[derive(Clone, Debug)]
pub struct Property<T: PropertyType> {
    value: PropertyValue<T>,
    param_ref: Option<String>,
    current: T,
}

impl<T: PropertyType> Property<T> {
    pub fn new(default_value: T) -> Self {
        Self::from_value(PropertyValue::new(default_value))
    }

    pub fn from_value(value: PropertyValue<T>) -> Self {
        Self {
            current: value.default_value().clone(),
            value,
            param_ref: None,
        }
    }

    pub fn value(&self) -> &PropertyValue<T> {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut PropertyValue<T> {
        &mut self.value
    }

    /// The value resolved by the most recent update
    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn param_ref(&self) -> Option<&str> {
        self.param_ref.as_deref()
    }

    /// Bind to a named parameter; an empty name clears the binding
    pub fn set_param_ref(&mut self, name: &str) {
        self.param_ref = (!name.is_empty()).then(|| name.to_owned());
    }

    pub fn update(&mut self, ctx: &UpdateContext<'_>) {
        self.current = resolve_target(&self.value, self.param_ref.as_deref(), ctx);
    }
}

/// A visual attribute that eases toward its resolved target over
/// `smooth_time` seconds instead of snapping.
///
/// Smoothing state is local to the property: each instance tracks its own
/// current value independently of every other property.
#[derive(Clone, Debug)]
pub struct SmoothProperty<T: PropertyType + Lerp> {
    value: PropertyValue<T>,
    param_ref: Option<String>,
    current: T,
}

impl<T: PropertyType + Lerp> SmoothProperty<T> {
    pub fn new(default_value: T) -> Self {
        Self::from_value(PropertyValue::new(default_value))
    }

    pub fn from_value(value: PropertyValue<T>) -> Self {
        Self {
            current: value.default_value().clone(),
            value,
            param_ref: None,
        }
    }

    pub fn value(&self) -> &PropertyValue<T> {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut PropertyValue<T> {
        &mut self.value
    }

    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn param_ref(&self) -> Option<&str> {
        self.param_ref.as_deref()
    }

    /// Bind to a named parameter; an empty name clears the binding
    pub fn set_param_ref(&mut self, name: &str) {
        self.param_ref = (!name.is_empty()).then(|| name.to_owned());
    }

    pub fn update(&mut self, ctx: &UpdateContext<'_>) {
        let target = resolve_target(&self.value, self.param_ref.as_deref(), ctx);
        self.current = approach(self.current, target, ctx.delta_time, self.value.smooth_time());
    }
}

/// Type-erased property surface for generic editors.
///
/// Components expose their properties through this trait so heterogeneous
/// property lists can be listed, stringified, edited, and parameter-bound
/// without knowing the value type.
pub trait AnyProperty {
    /// The editor control kind for this property's value type
    fn edit_kind(&self) -> ParamType;

    /// Current resolved value in editor string form
    fn value_as_string(&self) -> String;

    /// Parse editor text and write the default cell; false if the text does
    /// not parse as this property's type
    fn try_set_from_string(&mut self, s: &str) -> bool;

    fn param_ref(&self) -> Option<&str>;

    /// Bind to a named parameter; an empty name clears the binding
    fn set_param_ref(&mut self, name: &str);

    /// Resolve this frame's value
    fn update(&mut self, ctx: &UpdateContext<'_>);
}

impl<T: PropertyType> AnyProperty for Property<T> {
    fn edit_kind(&self) -> ParamType {
        T::param_type()
    }

    fn value_as_string(&self) -> String {
        self.current.to_display_string()
    }

    fn try_set_from_string(&mut self, s: &str) -> bool {
        match T::parse_display(s) {
            Some(value) => self.value.try_set(InteractionState::Default, None, value),
            None => false,
        }
    }

    fn param_ref(&self) -> Option<&str> {
        Property::param_ref(self)
    }

    fn set_param_ref(&mut self, name: &str) {
        Property::set_param_ref(self, name);
    }

    fn update(&mut self, ctx: &UpdateContext<'_>) {
        Property::update(self, ctx);
    }
}

impl<T: PropertyType + Lerp> AnyProperty for SmoothProperty<T> {
    fn edit_kind(&self) -> ParamType {
        T::param_type()
    }

    fn value_as_string(&self) -> String {
        self.current.to_display_string()
    }

    fn try_set_from_string(&mut self, s: &str) -> bool {
        match T::parse_display(s) {
            Some(value) => self.value.try_set(InteractionState::Default, None, value),
            None => false,
        }
    }

    fn param_ref(&self) -> Option<&str> {
        SmoothProperty::param_ref(self)
    }

    fn set_param_ref(&mut self, name: &str) {
        SmoothProperty::set_param_ref(self, name);
    }

    fn update(&mut self, ctx: &UpdateContext<'_>) {
        SmoothProperty::update(self, ctx);
    }
}
