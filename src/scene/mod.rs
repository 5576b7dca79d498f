//! Retained widget scene.
//!
//! The scene is the drawing surface all intro and panel widgets live on. It is
//! a fixed-capacity arena: widgets are addressed by [`WidgetId`] handles that
//! carry a generation counter, so a handle to a deleted widget never resolves
//! to whatever reused its slot. That makes every handle weak by construction:
//! callers that keep one around (the battery refresh keeps the label id) just
//! get `None`/`false` back once the widget is gone.
//!
//! Mutations mark the scene dirty; the render loop checks [`Scene::take_dirty`]
//! and redraws only when something changed.
//!
//! - `align`: screen anchors
//! - `art`: built-in pictures
//! - `render`: drawing onto an `embedded-graphics` target
//! - `widget`: widget payload types

mod align;
mod art;
mod render;
mod widget;

use core::fmt;

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use embedded_graphics::pixelcolor::Rgb565;
use heapless::Vec;

pub use align::Align;
pub use art::Art;
pub use widget::{
    ArcWidget,
    Binding,
    ImageWidget,
    LABEL_LEN,
    LabelWidget,
    Orientation,
    Placement,
    SliderWidget,
    Widget,
    WidgetKind,
};

use crate::colors::BLACK;
use crate::config::layout::{MAX_WIDGETS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::easing::ArcAngles;

/// Screen size the scene lays widgets out on.
pub const SCREEN_SIZE: Size = Size::new(SCREEN_WIDTH, SCREEN_HEIGHT);

/// Errors reported by the scene.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SceneError {
    /// Every widget slot is taken.
    Full,
}

impl fmt::Display for SceneError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Full => write!(f, "scene full ({MAX_WIDGETS} widgets)"),
        }
    }
}

impl core::error::Error for SceneError {}

/// Generational handle to a widget on the scene.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct WidgetId {
    index: u8,
    generation: u16,
}

/// A slider value change, delivered to the control bindings.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ValueChanged {
    pub slider: WidgetId,
    pub binding: Binding,
    pub value: i32,
}

struct Slot {
    generation: u16,
    widget: Option<Widget>,
}

/// Fixed-capacity widget arena drawn in creation order.
pub struct Scene {
    slots: Vec<Slot, MAX_WIDGETS>,
    /// Live slot indices in creation order (= draw order).
    order: Vec<u8, MAX_WIDGETS>,
    background: Rgb565,
    dirty: bool,
}

impl Scene {
    /// Empty scene with a black background.
    pub const fn new() -> Self { Self::with_background(BLACK) }

    pub const fn with_background(background: Rgb565) -> Self {
        Self {
            slots: Vec::new(),
            order: Vec::new(),
            background,
            dirty: true,
        }
    }

    #[inline]
    pub const fn background(&self) -> Rgb565 { self.background }

    /// Number of live widgets.
    #[inline]
    pub fn len(&self) -> usize { self.order.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    /// Number of widgets that can still be created.
    #[inline]
    pub fn vacant(&self) -> usize { MAX_WIDGETS - self.order.len() }

    /// Fail with [`SceneError::Full`] unless `count` widgets can be created.
    ///
    /// Builders call this first so a multi-widget build either fully happens
    /// or creates nothing.
    pub fn reserve(
        &self,
        count: usize,
    ) -> Result<(), SceneError> {
        if self.vacant() >= count { Ok(()) } else { Err(SceneError::Full) }
    }

    /// Add a widget on top of everything else.
    pub fn create(
        &mut self,
        widget: impl Into<Widget>,
    ) -> Result<WidgetId, SceneError> {
        let widget = widget.into();

        let index = match self.slots.iter().position(|slot| slot.widget.is_none()) {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.generation = slot.generation.wrapping_add(1);
                slot.widget = Some(widget);
                index
            }
            None => {
                self.slots
                    .push(Slot {
                        generation: 0,
                        widget: Some(widget),
                    })
                    .map_err(|_| SceneError::Full)?;
                self.slots.len() - 1
            }
        };

        // order never holds more entries than there are slots
        self.order.push(index as u8).map_err(|_| SceneError::Full)?;
        self.dirty = true;

        let id = WidgetId {
            index: index as u8,
            generation: self.slots[index].generation,
        };
        trace!("scene: created widget in slot {}", index);
        Ok(id)
    }

    /// Remove a widget. Returns false if the handle was already stale.
    pub fn delete(
        &mut self,
        id: WidgetId,
    ) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.slots[usize::from(id.index)].widget = None;
        if let Some(pos) = self.order.iter().position(|&i| i == id.index) {
            self.order.remove(pos);
        }
        self.dirty = true;
        trace!("scene: deleted widget in slot {}", id.index);
        true
    }

    /// Whether the handle still refers to a live widget.
    pub fn contains(
        &self,
        id: WidgetId,
    ) -> bool {
        self.slots
            .get(usize::from(id.index))
            .is_some_and(|slot| slot.generation == id.generation && slot.widget.is_some())
    }

    pub fn get(
        &self,
        id: WidgetId,
    ) -> Option<&Widget> {
        let slot = self.slots.get(usize::from(id.index))?;
        if slot.generation != id.generation {
            return None;
        }
        slot.widget.as_ref()
    }

    /// Mutable access to a widget. Marks the scene dirty when the handle resolves.
    pub fn get_mut(
        &mut self,
        id: WidgetId,
    ) -> Option<&mut Widget> {
        let slot = self.slots.get_mut(usize::from(id.index))?;
        if slot.generation != id.generation {
            return None;
        }
        let widget = slot.widget.as_mut()?;
        self.dirty = true;
        Some(widget)
    }

    /// Live widgets in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (WidgetId, &Widget)> {
        self.order.iter().filter_map(|&index| {
            let slot = &self.slots[usize::from(index)];
            slot.widget.as_ref().map(|widget| {
                (
                    WidgetId {
                        index,
                        generation: slot.generation,
                    },
                    widget,
                )
            })
        })
    }

    // -------------------------------------------------------------------------
    // Typed accessors
    // -------------------------------------------------------------------------

    pub fn arc(
        &self,
        id: WidgetId,
    ) -> Option<&ArcWidget> {
        match &self.get(id)?.kind {
            WidgetKind::Arc(arc) => Some(arc),
            _ => None,
        }
    }

    pub fn slider(
        &self,
        id: WidgetId,
    ) -> Option<&SliderWidget> {
        match &self.get(id)?.kind {
            WidgetKind::Slider(slider) => Some(slider),
            _ => None,
        }
    }

    pub fn label(
        &self,
        id: WidgetId,
    ) -> Option<&LabelWidget> {
        match &self.get(id)?.kind {
            WidgetKind::Label(label) => Some(label),
            _ => None,
        }
    }

    pub fn image(
        &self,
        id: WidgetId,
    ) -> Option<&ImageWidget> {
        match &self.get(id)?.kind {
            WidgetKind::Image(image) => Some(image),
            _ => None,
        }
    }

    fn arc_mut(
        &mut self,
        id: WidgetId,
    ) -> Option<&mut ArcWidget> {
        match &mut self.get_mut(id)?.kind {
            WidgetKind::Arc(arc) => Some(arc),
            _ => None,
        }
    }

    fn label_mut(
        &mut self,
        id: WidgetId,
    ) -> Option<&mut LabelWidget> {
        match &mut self.get_mut(id)?.kind {
            WidgetKind::Label(label) => Some(label),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Anchor a widget to the screen with an offset.
    pub fn align(
        &mut self,
        id: WidgetId,
        align: Align,
        offset: Point,
    ) -> bool {
        match self.get_mut(id) {
            Some(widget) => {
                widget.placement = Placement { align, offset };
                true
            }
            None => false,
        }
    }

    /// Center a widget on the screen.
    #[inline]
    pub fn center(
        &mut self,
        id: WidgetId,
    ) -> bool {
        self.align(id, Align::Center, Point::zero())
    }

    /// Screen rectangle the widget currently occupies.
    pub fn bounds(
        &self,
        id: WidgetId,
    ) -> Option<Rectangle> {
        self.get(id).map(widget_bounds)
    }

    // -------------------------------------------------------------------------
    // Widget properties
    // -------------------------------------------------------------------------

    /// Set an arc's background start angle and sweep.
    pub fn set_arc_angles(
        &mut self,
        id: WidgetId,
        angles: ArcAngles,
    ) -> bool {
        self.arc_mut(id).map(|arc| arc.angles = angles).is_some()
    }

    /// Set an arc's rotation in degrees.
    pub fn set_arc_rotation(
        &mut self,
        id: WidgetId,
        rotation: u16,
    ) -> bool {
        self.arc_mut(id).map(|arc| arc.rotation = rotation % 360).is_some()
    }

    /// Replace a label's text (truncated to [`LABEL_LEN`] bytes).
    pub fn set_label_text(
        &mut self,
        id: WidgetId,
        text: &str,
    ) -> bool {
        self.label_mut(id).map(|label| label.set_text(text)).is_some()
    }

    pub fn set_label_color(
        &mut self,
        id: WidgetId,
        color: Rgb565,
    ) -> bool {
        self.label_mut(id).map(|label| label.color = color).is_some()
    }

    /// Current value of a slider.
    pub fn slider_value(
        &self,
        id: WidgetId,
    ) -> Option<i32> {
        self.slider(id).map(|slider| slider.value)
    }

    /// Move a slider to `value` (clamped to its range).
    ///
    /// Returns the notification for the slider's binding when the value
    /// actually changed. Unchanged values and unbound sliders notify nobody.
    pub fn set_slider_value(
        &mut self,
        id: WidgetId,
        value: i32,
    ) -> Option<ValueChanged> {
        let widget = self.get(id)?;
        let WidgetKind::Slider(slider) = &widget.kind else {
            return None;
        };
        let value = slider.clamp(value);
        if value == slider.value {
            return None;
        }

        let WidgetKind::Slider(slider) = &mut self.get_mut(id)?.kind else {
            return None;
        };
        slider.value = value;
        slider.binding.map(|binding| ValueChanged {
            slider: id,
            binding,
            value,
        })
    }

    // -------------------------------------------------------------------------
    // Redraw tracking
    // -------------------------------------------------------------------------

    /// Returns true once after any change, then clears the flag.
    pub fn take_dirty(&mut self) -> bool { core::mem::take(&mut self.dirty) }
}

impl Default for Scene {
    fn default() -> Self { Self::new() }
}

fn widget_bounds(widget: &Widget) -> Rectangle {
    let size = widget.size();
    let top_left = widget
        .placement
        .align
        .resolve(size, widget.placement.offset, SCREEN_SIZE);
    Rectangle::new(top_left, size)
}

// =============================================================================
// Unit Tests
// =============================================================================
