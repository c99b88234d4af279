//! Hover / selection state machine.
//!
//! Three independent axes:
//! - selected ring: toggled by ring clicks, cleared by the center disc
//! - hovered ring: set on enter, cleared on the matching leave
//! - selected leaf: toggled by the interpretation pills
//!
//! Transitions always read the current state, so a burst of clicks can
//! never act on a stale selection.

use crate::geometry::Geometry;
use crate::model::TreeNode;

/// What a pointer event struck.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// The center disc.
    Center,
    /// A ring band (rings without slices, or variants that hide slices).
    Ring(usize),
    /// A slice of a ring. Slices act on their parent ring.
    Slice { ring: usize, index: usize },
    /// An interpretation pill in the legend.
    Leaf(String),
    /// A dendrogram node, by layout index. Tooltip only.
    Node(usize),
}

impl PointerTarget {
    /// The ring this target belongs to, if any.
    pub fn ring(&self) -> Option<usize> {
        match *self {
            PointerTarget::Ring(r) | PointerTarget::Slice { ring: r, .. } => Some(r),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Enter,
    Move,
    Leave,
    Click,
}

/// A pointer event in container coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub pos: [f32; 2],
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, target: PointerTarget, pos: [f32; 2]) -> Self {
        Self { kind, pos, target }
    }

    pub fn enter(target: PointerTarget, pos: [f32; 2]) -> Self {
        Self::new(PointerKind::Enter, target, pos)
    }

    pub fn leave(target: PointerTarget, pos: [f32; 2]) -> Self {
        Self::new(PointerKind::Leave, target, pos)
    }

    pub fn moved(target: PointerTarget, pos: [f32; 2]) -> Self {
        Self::new(PointerKind::Move, target, pos)
    }

    pub fn click(target: PointerTarget, pos: [f32; 2]) -> Self {
        Self::new(PointerKind::Click, target, pos)
    }
}

/// Which axes an event changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    pub selection: bool,
    pub hover: bool,
    pub leaf: bool,
}

impl Transition {
    pub fn any(&self) -> bool {
        self.selection || self.hover || self.leaf
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    selected_ring: Option<usize>,
    hovered_ring: Option<usize>,
    selected_leaf: Option<String>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_ring(&self) -> Option<usize> {
        self.selected_ring
    }

    pub fn hovered_ring(&self) -> Option<usize> {
        self.hovered_ring
    }

    pub fn selected_leaf(&self) -> Option<&str> {
        self.selected_leaf.as_deref()
    }

    pub fn has_selection(&self) -> bool {
        self.selected_ring.is_some()
    }

    pub fn pointer_enter_ring(&mut self, ring: usize) -> bool {
        let changed = self.hovered_ring != Some(ring);
        self.hovered_ring = Some(ring);
        changed
    }

    /// Only clears the hover if it still belongs to `ring`.
    pub fn pointer_leave_ring(&mut self, ring: usize) -> bool {
        if self.hovered_ring == Some(ring) {
            self.hovered_ring = None;
            true
        } else {
            false
        }
    }

    pub fn click_ring(&mut self, ring: usize) {
        self.selected_ring = if self.selected_ring == Some(ring) {
            None
        } else {
            Some(ring)
        };
    }

    /// Reset to the overview.
    pub fn click_center(&mut self) -> bool {
        self.selected_ring.take().is_some()
    }

    pub fn click_leaf(&mut self, label: &str) {
        self.selected_leaf = if self.selected_leaf.as_deref() == Some(label) {
            None
        } else {
            Some(label.to_string())
        };
    }

    /// Dispatch a pointer event.
    pub fn apply(&mut self, event: &PointerEvent) -> Transition {
        let mut t = Transition::default();
        match (&event.kind, &event.target) {
            (PointerKind::Enter, target) => {
                if let Some(ring) = target.ring() {
                    t.hover = self.pointer_enter_ring(ring);
                }
            }
            (PointerKind::Leave, target) => {
                if let Some(ring) = target.ring() {
                    t.hover = self.pointer_leave_ring(ring);
                }
            }
            (PointerKind::Move, _) => {}
            (PointerKind::Click, PointerTarget::Center) => {
                t.selection = self.click_center();
            }
            (PointerKind::Click, PointerTarget::Leaf(label)) => {
                self.click_leaf(label);
                t.leaf = true;
            }
            (PointerKind::Click, target) => {
                if let Some(ring) = target.ring() {
                    self.click_ring(ring);
                    t.selection = true;
                }
            }
        }
        t
    }

    /// Selected or hovered rings hold still.
    pub fn is_frozen(&self, ring: usize) -> bool {
        self.selected_ring == Some(ring) || self.hovered_ring == Some(ring)
    }

    /// Slice labels are only drawn for the selected ring.
    pub fn shows_slice_labels(&self, ring: usize) -> bool {
        self.selected_ring == Some(ring)
    }

    /// A ring is dimmed when another ring holds the selection.
    pub fn is_dimmed(&self, ring: usize) -> bool {
        matches!(self.selected_ring, Some(s) if s != ring)
    }

    /// Whole-diagram zoom: `factor` while a ring is selected, 1.0 otherwise.
    pub fn focus_scale(&self, factor: f32) -> f32 {
        if self.selected_ring.is_some() {
            factor
        } else {
            1.0
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Turns "what is under the pointer this frame" into enter/move/leave events.
///
/// Immediate-mode UIs report hover positions, not boundary crossings; this
/// recovers the crossings so the state machine sees DOM-style events.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    current: Option<PointerTarget>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&PointerTarget> {
        self.current.as_ref()
    }

    pub fn update(&mut self, target: Option<PointerTarget>, pos: [f32; 2]) -> Vec<PointerEvent> {
        let mut events = Vec::with_capacity(2);
        if self.current == target {
            if let Some(t) = &target {
                events.push(PointerEvent::moved(t.clone(), pos));
            }
            return events;
        }
        if let Some(old) = self.current.take() {
            events.push(PointerEvent::leave(old, pos));
        }
        if let Some(new) = &target {
            events.push(PointerEvent::enter(new.clone(), pos));
        }
        self.current = target;
        events
    }

    /// Pointer left the canvas.
    pub fn exit(&mut self, pos: [f32; 2]) -> Vec<PointerEvent> {
        self.update(None, pos)
    }
}

/// One named entry in the detail panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub description: Option<String>,
}

impl Component {
    fn from_node(node: &TreeNode) -> Self {
        Self {
            name: node.name.clone(),
            description: node.description().map(str::to_string),
        }
    }
}

pub const NO_COMPONENTS_NOTE: &str = "No further sub-components on this layer.";

/// Extended text for the current selection, for a side/definition panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    /// `None` when showing the overview.
    pub ring_index: Option<usize>,
    pub title: String,
    pub description: Option<String>,
    pub components: Vec<Component>,
    pub empty_note: Option<&'static str>,
    /// Definition of the selected interpretation pill.
    pub definition: Option<Component>,
}

impl DetailView {
    pub fn build(geometry: &Geometry, state: &InteractionState) -> Self {
        let definition = state.selected_leaf().map(|label| {
            geometry
                .auxiliary
                .iter()
                .flat_map(|group| group.children.iter())
                .find(|c| c.name == label)
                .map(Component::from_node)
                .unwrap_or_else(|| Component {
                    name: label.to_string(),
                    description: None,
                })
        });

        match state.selected_ring().and_then(|r| geometry.ring(r)) {
            Some(ring) => {
                let components: Vec<Component> =
                    ring.source.children.iter().map(Component::from_node).collect();
                let empty_note = if components.is_empty() {
                    Some(NO_COMPONENTS_NOTE)
                } else {
                    None
                };
                Self {
                    ring_index: Some(ring.ring_index),
                    title: ring.source.name.clone(),
                    description: ring.source.description().map(str::to_string),
                    components,
                    empty_note,
                    definition,
                }
            }
            None => Self {
                ring_index: None,
                title: geometry.root_name.clone(),
                description: non_empty(&geometry.root_description),
                components: geometry
                    .rings
                    .iter()
                    .map(|r| Component::from_node(&r.source))
                    .collect(),
                empty_note: None,
                definition,
            },
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() {
        None
    } else {
        Some(t.to_string())
    }
}
