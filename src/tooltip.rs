//! Tooltip placement.
//!
//! The tooltip sits down-right of the pointer. Near the right or bottom edge
//! it flips to the other side of the pointer; in containers too small for
//! either side it is pinned `offset` pixels from the edge.

use serde::Deserialize;

use crate::interaction::PointerTarget;

/// Assumed tooltip footprint and pointer offset, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TooltipLayout {
    pub offset: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for TooltipLayout {
    fn default() -> Self {
        Self {
            offset: 15.0,
            width: 260.0,
            height: 80.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub width: f32,
    pub height: f32,
}

impl ContainerBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

/// Top-left corner of the tooltip, relative to the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPosition {
    pub left: f32,
    pub top: f32,
}

/// Place a tooltip for a pointer at `pointer` (container coordinates).
pub fn position(
    pointer: [f32; 2],
    bounds: ContainerBounds,
    layout: &TooltipLayout,
) -> TooltipPosition {
    TooltipPosition {
        left: place_axis(pointer[0], bounds.width, layout.width, layout.offset),
        top: place_axis(pointer[1], bounds.height, layout.height, layout.offset),
    }
}

fn place_axis(p: f32, extent: f32, size: f32, offset: f32) -> f32 {
    let extent = extent.max(0.0);
    let mut pos = p + offset;
    if pos + size > extent {
        pos = p - offset - size;
    }
    if pos < 0.0 {
        pos = offset.min(extent);
    }
    pos.clamp(0.0, extent)
}

/// Visible tooltip content plus its placement.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub target: PointerTarget,
    pub title: String,
    /// Omitted when the node has no description.
    pub body: Option<String>,
    pub position: TooltipPosition,
}

#[derive(Debug, Clone, Default)]
pub struct Tooltip {
    layout: TooltipLayout,
    content: Option<TooltipContent>,
}

impl Tooltip {
    pub fn new(layout: TooltipLayout) -> Self {
        Self {
            layout,
            content: None,
        }
    }

    pub fn layout(&self) -> &TooltipLayout {
        &self.layout
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn show(
        &mut self,
        target: PointerTarget,
        title: impl Into<String>,
        body: Option<String>,
        pointer: [f32; 2],
        bounds: ContainerBounds,
    ) {
        self.content = Some(TooltipContent {
            target,
            title: title.into(),
            body,
            position: position(pointer, bounds, &self.layout),
        });
    }

    /// Follow the pointer without changing the text.
    pub fn move_to(&mut self, pointer: [f32; 2], bounds: ContainerBounds) {
        let layout = self.layout;
        if let Some(c) = self.content.as_mut() {
            c.position = position(pointer, bounds, &layout);
        }
    }

    /// Hide only if the tooltip still belongs to `target`.
    pub fn hide_for(&mut self, target: &PointerTarget) {
        if self.content.as_ref().map(|c| &c.target) == Some(target) {
            self.content = None;
        }
    }

    pub fn hide(&mut self) {
        self.content = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TooltipLayout {
        TooltipLayout::default()
    }

    #[test]
    fn default_is_down_right_of_pointer() {
        let p = position([100.0, 100.0], ContainerBounds::new(800.0, 600.0), &layout());
        assert_eq!(p, TooltipPosition { left: 115.0, top: 115.0 });
    }

    #[test]
    fn flips_near_right_and_bottom_edges() {
        let p = position([700.0, 560.0], ContainerBounds::new(800.0, 600.0), &layout());
        assert_eq!(p.left, 700.0 - 15.0 - 260.0);
        assert_eq!(p.top, 560.0 - 15.0 - 80.0);
    }

    #[test]
    fn tiny_container_pins_to_offset() {
        let p = position([50.0, 30.0], ContainerBounds::new(120.0, 60.0), &layout());
        assert_eq!(p.left, 15.0);
        assert_eq!(p.top, 15.0);
    }

    #[test]
    fn degenerate_container_stays_at_origin() {
        let p = position([0.0, 0.0], ContainerBounds::new(0.0, 0.0), &layout());
        assert_eq!(p, TooltipPosition { left: 0.0, top: 0.0 });
    }

    #[test]
    fn hide_for_ignores_other_targets() {
        let bounds = ContainerBounds::new(400.0, 400.0);
        let mut t = Tooltip::new(layout());
        t.show(PointerTarget::Ring(2), "Ring", None, [10.0, 10.0], bounds);
        t.hide_for(&PointerTarget::Ring(1));
        assert!(t.is_visible());
        t.move_to([20.0, 20.0], bounds);
        assert_eq!(t.content().unwrap().position.left, 35.0);
        t.hide_for(&PointerTarget::Ring(2));
        assert!(!t.is_visible());
    }
}
