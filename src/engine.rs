//! The diagram engine: one instance per mounted diagram.
//!
//! Owns the tree, the memoized geometry, rotation and interaction state,
//! the tooltip and the animation loop handle. Geometry is rebuilt only when
//! the tree, canvas size or variant changes; interaction only restyles the
//! scene and animation frames only re-transform it.

use std::sync::Arc;

use crate::animation::{AnimationLoop, FrameScheduler};
use crate::config::DiagramConfig;
use crate::error::GeometryError;
use crate::geometry::{Geometry, GeometryCache};
use crate::interaction::{DetailView, InteractionState, PointerEvent, PointerKind, PointerTarget, Transition};
use crate::model::TreeNode;
use crate::render::dendrogram::{cluster_layout, ClusterLayout};
use crate::render::palette;
use crate::render::scene::{apply_rotation, build_scene, restyle, Scene, SceneContext};
use crate::render::Variant;
use crate::rotation::{RingSpeeds, RotationState};
use crate::tooltip::{ContainerBounds, Tooltip};

/// Extra pick radius around dendrogram markers.
const NODE_PICK_SLACK: f32 = 3.0;

pub struct DiagramEngine {
    tree: Arc<TreeNode>,
    /// `tree`, or the variant's regrouped copy of it.
    layout_tree: Arc<TreeNode>,
    config: DiagramConfig,
    size: [f32; 2],
    cache: GeometryCache,
    /// Cache generation the derived state below was built for.
    synced_generation: Option<u64>,
    rotation: RotationState,
    speeds: RingSpeeds,
    interaction: InteractionState,
    hover: Option<PointerTarget>,
    tooltip: Tooltip,
    animation: AnimationLoop,
    dendrogram: Option<ClusterLayout>,
    scene: Option<Scene>,
    scene_generation: u64,
    style_dirty: bool,
}

impl DiagramEngine {
    pub fn new(tree: TreeNode, config: DiagramConfig) -> Self {
        log_validation(&tree);
        let tree = Arc::new(tree);
        let layout_tree = layout_tree_for(&tree, &config);
        Self {
            size: [config.canvas.width, config.canvas.height],
            tooltip: Tooltip::new(config.tooltip),
            speeds: RingSpeeds::from_config(&config.rotation, config.ring_limit),
            tree,
            layout_tree,
            config,
            cache: GeometryCache::new(),
            synced_generation: None,
            rotation: RotationState::default(),
            interaction: InteractionState::default(),
            hover: None,
            animation: AnimationLoop::new(),
            dendrogram: None,
            scene: None,
            scene_generation: 0,
            style_dirty: false,
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.set_variant(variant);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.resize(width, height);
        self
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn size(&self) -> [f32; 2] {
        self.size
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn speeds(&self) -> &RingSpeeds {
        &self.speeds
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn hover(&self) -> Option<&PointerTarget> {
        self.hover.as_ref()
    }

    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }

    pub fn rotation_enabled(&self) -> bool {
        self.config.rotation.enabled && self.config.variant.rotates()
    }

    /// Zoom target: the configured factor while a ring is selected.
    pub fn focus_scale(&self) -> f32 {
        self.interaction.focus_scale(self.config.focus_scale)
    }

    // ─── Inputs that invalidate geometry ────────────────────────────

    /// Replace the tree. Everything derived from the old one is dropped.
    pub fn set_tree(&mut self, tree: TreeNode) {
        log_validation(&tree);
        self.animation.cancel();
        self.cache.invalidate();
        self.tree = Arc::new(tree);
        self.layout_tree = layout_tree_for(&self.tree, &self.config);
        self.reset_state();
        log::debug!("tree replaced: '{}'", self.tree.name);
    }

    pub fn set_variant(&mut self, variant: Variant) {
        if variant == self.config.variant {
            return;
        }
        self.animation.cancel();
        self.cache.invalidate();
        self.config.variant = variant;
        self.layout_tree = layout_tree_for(&self.tree, &self.config);
        self.reset_state();
        log::debug!("variant -> {}", variant);
    }

    /// New canvas size. Cancels the pending frame when the size changed.
    pub fn resize(&mut self, width: f32, height: f32) {
        if self.size == [width, height] {
            return;
        }
        self.animation.cancel();
        self.size = [width, height];
    }

    pub fn set_rotation_enabled(&mut self, enabled: bool) {
        self.config.rotation.enabled = enabled;
        if !enabled {
            self.animation.cancel();
        }
    }

    fn reset_state(&mut self) {
        self.synced_generation = None;
        self.rotation = RotationState::default();
        self.interaction.clear();
        self.hover = None;
        self.tooltip.hide();
        self.dendrogram = None;
        self.scene = None;
    }

    // ─── Geometry ───────────────────────────────────────────────────

    /// Current geometry snapshot, recomputed only when an input changed.
    pub fn geometry(&mut self) -> Result<Arc<Geometry>, GeometryError> {
        let variant = self.config.variant;
        let limit = variant.ring_limit(self.config.ring_limit);
        let params = self.config.geometry_params();
        let [w, h] = self.size;
        let geometry = self.cache.get(&self.layout_tree, w, h, limit, params)?;

        let generation = self.cache.generation();
        if self.synced_generation != Some(generation) {
            let rings = geometry.ring_count();
            self.rotation.reconcile(rings);
            self.speeds = RingSpeeds::from_config(&self.config.rotation, rings);
            self.dendrogram = (variant == Variant::Dendrogram)
                .then(|| cluster_layout(&self.tree, geometry.max_radius));
            self.synced_generation = Some(generation);
        }
        Ok(geometry)
    }

    /// Shape under a point in diagram space (origin at the center, focus
    /// zoom undone).
    pub fn hit_test(&mut self, pos: [f32; 2]) -> Option<PointerTarget> {
        let geometry = self.geometry().ok()?;
        let [x, y] = pos;
        let variant = self.config.variant;
        if variant == Variant::Dendrogram {
            return self
                .dendrogram
                .as_ref()?
                .hit_test(x, y, NODE_PICK_SLACK)
                .map(PointerTarget::Node);
        }
        match geometry.hit_test(x, y, &self.rotation)? {
            PointerTarget::Slice { ring, .. } if !variant.draws_slices() => Some(PointerTarget::Ring(ring)),
            target => Some(target),
        }
    }

    // ─── Pointer events ─────────────────────────────────────────────

    pub fn handle_pointer(&mut self, event: &PointerEvent, bounds: ContainerBounds) -> Transition {
        let transition = self.interaction.apply(event);
        let mut hover_changed = false;
        match event.kind {
            PointerKind::Enter => {
                hover_changed = self.hover.as_ref() != Some(&event.target);
                self.hover = Some(event.target.clone());
                match self.describe(&event.target) {
                    Some((title, body)) => {
                        self.tooltip.show(event.target.clone(), title, body, event.pos, bounds)
                    }
                    None => self.tooltip.hide(),
                }
            }
            PointerKind::Move => self.tooltip.move_to(event.pos, bounds),
            PointerKind::Leave => {
                if self.hover.as_ref() == Some(&event.target) {
                    self.hover = None;
                    hover_changed = true;
                }
                self.tooltip.hide_for(&event.target);
            }
            PointerKind::Click => {}
        }

        if transition.selection {
            log::debug!("selected ring -> {:?}", self.interaction.selected_ring());
        }
        if transition.leaf {
            log::debug!("selected leaf -> {:?}", self.interaction.selected_leaf());
        }
        if transition.any() || hover_changed {
            self.style_dirty = true;
        }
        transition
    }

    /// Tooltip text for a target: name plus description when there is one.
    fn describe(&mut self, target: &PointerTarget) -> Option<(String, Option<String>)> {
        let geometry = self.geometry().ok()?;
        match target {
            PointerTarget::Center => Some((
                geometry.root_name.clone(),
                non_blank(&geometry.root_description),
            )),
            PointerTarget::Ring(r) => {
                let ring = geometry.ring(*r)?;
                let title = if self.config.variant == Variant::FocusedSunburst {
                    palette::ring_label(*r, &ring.source).to_string()
                } else {
                    ring.source.name.clone()
                };
                Some((title, ring.source.description().map(str::to_string)))
            }
            PointerTarget::Slice { ring, index } => {
                let slice = geometry.slice(*ring, *index)?;
                Some((slice.name.clone(), slice.description().map(str::to_string)))
            }
            PointerTarget::Node(i) => {
                let node = self.dendrogram.as_ref()?.nodes.get(*i)?;
                Some((node.name.clone(), node.description().map(str::to_string)))
            }
            PointerTarget::Leaf(_) => None,
        }
    }

    /// Back to the overview: no selection, no hover. Ring angles are kept.
    pub fn reset_view(&mut self) {
        self.interaction.clear();
        self.hover = None;
        self.tooltip.hide();
        self.style_dirty = true;
    }

    /// Turn every ring back to angle 0.
    pub fn reset_rotation(&mut self) {
        self.rotation.reset();
    }

    /// Extended text for the current selection.
    pub fn detail(&mut self) -> Result<DetailView, GeometryError> {
        let geometry = self.geometry()?;
        Ok(DetailView::build(&geometry, &self.interaction))
    }

    // ─── Animation ──────────────────────────────────────────────────

    /// Drive one UI frame: consume the pending animation frame (ticking
    /// rotation once) and request the next. Returns whether rotation moved.
    pub fn frame<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) -> bool {
        if !self.rotation_enabled() || self.geometry().is_err() {
            if self.animation.is_running() {
                self.animation.cancel();
            }
            return false;
        }
        self.animation.start();
        let advanced = match self.animation.pending() {
            Some(token) if self.animation.begin_frame(token) => {
                self.tick();
                true
            }
            _ => false,
        };
        self.animation.schedule(scheduler);
        advanced
    }

    /// Advance every unfrozen ring by its speed.
    pub fn tick(&mut self) {
        self.rotation.advance(&self.interaction, &self.speeds);
    }

    /// Stop animating and drop the scene. The engine can be driven again.
    pub fn teardown(&mut self) {
        self.animation.cancel();
        self.scene = None;
        self.tooltip.hide();
    }

    // ─── Scene ──────────────────────────────────────────────────────

    /// Up-to-date scene: rebuilt on new geometry, restyled after
    /// interaction changes, re-transformed every call.
    pub fn scene(&mut self) -> Result<&Scene, GeometryError> {
        let geometry = self.geometry()?;
        let generation = self.cache.generation();

        let Self {
            config,
            interaction,
            hover,
            dendrogram,
            rotation,
            scene,
            scene_generation,
            style_dirty,
            ..
        } = self;

        let ctx = SceneContext {
            variant: config.variant,
            geometry: &geometry,
            interaction,
            hover: hover.as_ref(),
            focus_scale: config.focus_scale,
            dendrogram: dendrogram.as_ref(),
        };

        let fresh = scene.is_some() && *scene_generation == generation;
        if !fresh {
            *scene = None;
            *scene_generation = generation;
        } else if *style_dirty {
            if let Some(s) = scene.as_mut() {
                restyle(s, &ctx);
            }
        }
        *style_dirty = false;

        let s = scene.get_or_insert_with(|| build_scene(&ctx));
        apply_rotation(s, rotation);
        Ok(&*s)
    }
}

impl Drop for DiagramEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn layout_tree_for(tree: &Arc<TreeNode>, config: &DiagramConfig) -> Arc<TreeNode> {
    config
        .variant
        .layout_tree(tree, config.ring_limit)
        .map(Arc::new)
        .unwrap_or_else(|| Arc::clone(tree))
}

fn log_validation(tree: &TreeNode) {
    if let Err(errors) = tree.validate() {
        for e in &errors {
            log::warn!("tree '{}': {}", tree.name, e);
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::testing::CountingScheduler;
    use crate::model::system_model_tree;

    fn engine() -> DiagramEngine {
        DiagramEngine::new(system_model_tree(), DiagramConfig::default().with_canvas(900.0, 900.0))
    }

    fn bounds() -> ContainerBounds {
        ContainerBounds::new(900.0, 900.0)
    }

    #[test]
    fn geometry_is_memoized_across_interaction() {
        let mut e = engine();
        let a = e.geometry().unwrap();
        e.handle_pointer(&PointerEvent::click(PointerTarget::Ring(2), [0.0, 0.0]), bounds());
        let b = e.geometry().unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        e.resize(800.0, 900.0);
        let c = e.geometry().unwrap();
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn frames_tick_and_resize_cancels() {
        let sched = CountingScheduler::default();
        let mut e = engine();
        e.geometry().unwrap();

        assert!(!e.frame(&sched));
        assert!(e.frame(&sched));
        assert!(e.rotation().angle(1) > 0.0);
        assert_eq!(sched.requests(), 2);

        e.resize(700.0, 700.0);
        assert!(!e.animation().is_running());
        assert!(e.animation().pending().is_none());
        // first frame after a cancel only reschedules
        let before = e.rotation().angle(1);
        assert!(!e.frame(&sched));
        assert_eq!(e.rotation().angle(1), before);
    }

    #[test]
    fn static_variant_never_animates() {
        let sched = CountingScheduler::default();
        let mut e = engine().with_variant(Variant::RingExplorer);
        for _ in 0..5 {
            assert!(!e.frame(&sched));
        }
        assert_eq!(sched.requests(), 0);

        let mut e = DiagramEngine::new(system_model_tree(), DiagramConfig::default().with_rotation(false));
        assert!(!e.rotation_enabled());
        assert!(!e.frame(&sched));
    }

    #[test]
    fn hover_shows_tooltip_and_leave_hides_it() {
        let mut e = engine();
        let slice = PointerTarget::Slice { ring: 3, index: 1 };
        e.handle_pointer(&PointerEvent::enter(slice.clone(), [100.0, 100.0]), bounds());
        let tip = e.tooltip().content().unwrap();
        assert_eq!(tip.title, "Embodiment");
        assert!(tip.body.is_some());
        assert_eq!(tip.position.left, 115.0);
        assert_eq!(e.interaction().hovered_ring(), Some(3));

        e.handle_pointer(&PointerEvent::leave(slice, [100.0, 100.0]), bounds());
        assert!(!e.tooltip().is_visible());
        assert!(e.hover().is_none());
        assert_eq!(e.interaction().hovered_ring(), None);
    }

    #[test]
    fn nameless_description_shows_title_only() {
        let tree = TreeNode::named("root").with_children(vec![TreeNode::named("ring")]);
        let config = DiagramConfig::default()
            .with_canvas(400.0, 400.0)
            .with_variant(Variant::RingExplorer);
        let mut e = DiagramEngine::new(tree, config);
        e.handle_pointer(&PointerEvent::enter(PointerTarget::Ring(1), [5.0, 5.0]), ContainerBounds::new(400.0, 400.0));
        let tip = e.tooltip().content().unwrap();
        assert_eq!(tip.title, "ring");
        assert_eq!(tip.body, None);
    }

    #[test]
    fn hit_test_maps_slices_per_variant() {
        let mut e = engine();
        let g = e.geometry().unwrap();
        let r = g.rings[0].mid_radius();
        assert!(matches!(e.hit_test([0.0, -r]), Some(PointerTarget::Slice { ring: 1, index: 0 })));
        assert_eq!(e.hit_test([0.0, 0.0]), Some(PointerTarget::Center));

        let mut e = engine().with_variant(Variant::RingExplorer);
        let g = e.geometry().unwrap();
        let r = g.rings[4].mid_radius();
        assert_eq!(e.hit_test([0.0, -r]), Some(PointerTarget::Ring(5)));
    }

    #[test]
    fn dendrogram_picks_nodes() {
        let mut e = engine().with_variant(Variant::Dendrogram);
        assert_eq!(e.hit_test([0.0, 0.0]), Some(PointerTarget::Node(0)));
        e.handle_pointer(&PointerEvent::enter(PointerTarget::Node(0), [1.0, 1.0]), bounds());
        assert_eq!(e.tooltip().content().unwrap().title, "The Black Box");
        let scene = e.scene().unwrap();
        assert!(scene.dendrogram.is_some());
    }

    #[test]
    fn scene_restyles_on_selection_and_keeps_angles() {
        let sched = CountingScheduler::default();
        let mut e = engine();
        e.scene().unwrap();
        for _ in 0..4 {
            e.frame(&sched);
        }
        let angle = e.rotation().angle(2);
        assert!(angle != 0.0);

        e.handle_pointer(&PointerEvent::click(PointerTarget::Ring(2), [0.0, 0.0]), bounds());
        let scene = e.scene().unwrap();
        assert!((scene.focus_scale - 1.04).abs() < 1e-6);
        assert!((scene.ring(2).unwrap().rotation - angle.rem_euclid(std::f32::consts::TAU)).abs() < 1e-6);
        assert_eq!(e.rotation().angle(2), angle);
    }

    #[test]
    fn variant_switch_resets_state() {
        let mut e = engine();
        e.handle_pointer(&PointerEvent::click(PointerTarget::Ring(1), [0.0, 0.0]), bounds());
        e.rotation.set_angle(1, 2.0);
        e.set_variant(Variant::Mandala);
        assert_eq!(e.interaction().selected_ring(), None);
        assert_eq!(e.rotation().angle(1), 0.0);
        let g = e.geometry().unwrap();
        assert_eq!(g.ring_count(), 5);
        assert!(g.rings.iter().all(|r| r.slice_count() == 8));
    }

    #[test]
    fn reset_view_keeps_ring_angles() {
        let sched = CountingScheduler::default();
        let mut e = engine();
        e.geometry().unwrap();
        for _ in 0..50 {
            e.frame(&sched);
        }
        e.handle_pointer(&PointerEvent::click(PointerTarget::Ring(2), [0.0, 0.0]), bounds());
        let before: Vec<f32> = (1..=4).map(|r| e.rotation().angle(r)).collect();
        assert!(before.iter().all(|&a| a != 0.0));

        e.reset_view();
        let after: Vec<f32> = (1..=4).map(|r| e.rotation().angle(r)).collect();
        assert_eq!(before, after);
        assert_eq!(e.interaction().selected_ring(), None);

        e.reset_rotation();
        assert_eq!(e.rotation().angle(1), 0.0);
    }

    #[test]
    fn nothing_to_render_requests_no_frames() {
        let sched = CountingScheduler::default();
        let mut e = DiagramEngine::new(TreeNode::named("empty"), DiagramConfig::default());
        for _ in 0..10 {
            assert!(!e.frame(&sched));
        }
        assert_eq!(sched.requests(), 0);
        assert!(!e.animation().is_running());
    }

    #[test]
    fn zero_ring_tree_is_nothing_to_render() {
        let mut e = DiagramEngine::new(TreeNode::named("empty"), DiagramConfig::default());
        assert!(matches!(e.scene(), Err(GeometryError::NoRings { .. })));
        assert_eq!(e.hit_test([0.0, 0.0]), None);
    }

    #[test]
    fn detail_follows_selection() {
        let mut e = engine();
        e.handle_pointer(&PointerEvent::click(PointerTarget::Slice { ring: 4, index: 0 }, [0.0, 0.0]), bounds());
        let d = e.detail().unwrap();
        assert_eq!(d.ring_index, Some(4));
        assert_eq!(d.components.len(), 16);
        e.reset_view();
        assert_eq!(e.detail().unwrap().ring_index, None);
    }
}
