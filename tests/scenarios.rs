//! End-to-end scenarios through the public API.

use radial_diagram::geometry::GeometryParams;
use radial_diagram::interaction::{PointerEvent, PointerTarget, PointerTracker};
use radial_diagram::render::Variant;
use radial_diagram::tooltip::ContainerBounds;
use radial_diagram::{
    compute_geometry, system_model_tree, ConfigError, DiagramConfig, DiagramEngine, GeometryError,
    TreeNode,
};

fn tree_with_ring_sizes(sizes: &[usize]) -> TreeNode {
    TreeNode::named("root").with_children(
        sizes
            .iter()
            .enumerate()
            .map(|(r, &n)| {
                TreeNode::named(format!("ring {}", r + 1)).with_children(
                    (0..n)
                        .map(|s| TreeNode::new(format!("r{}s{}", r + 1, s), "leaf"))
                        .collect(),
                )
            })
            .collect(),
    )
}

fn engine() -> DiagramEngine {
    DiagramEngine::new(
        system_model_tree(),
        DiagramConfig::default().with_canvas(1000.0, 1000.0),
    )
}

fn bounds() -> ContainerBounds {
    ContainerBounds::new(1000.0, 1000.0)
}

#[test]
fn four_rings_thirty_slices() {
    let tree = tree_with_ring_sizes(&[3, 3, 8, 16]);
    let g = compute_geometry(&tree, 1000.0, 1000.0, 4, &GeometryParams::FOCUSED).unwrap();
    assert_eq!(g.ring_count(), 4);
    assert_eq!(g.slices.len(), 30);
    let counts: Vec<usize> = g.rings.iter().map(|r| r.slice_count()).collect();
    assert_eq!(counts, vec![3, 3, 8, 16]);
    // rings nest outward without overlapping
    for pair in g.rings.windows(2) {
        assert!(pair[0].outer_radius <= pair[1].inner_radius);
    }
}

#[test]
fn click_ring_then_center_returns_to_overview() {
    let mut e = engine();
    e.handle_pointer(&PointerEvent::click(PointerTarget::Ring(2), [10.0, 10.0]), bounds());
    assert_eq!(e.interaction().selected_ring(), Some(2));
    assert!((e.focus_scale() - 1.04).abs() < 1e-6);

    e.handle_pointer(&PointerEvent::click(PointerTarget::Center, [10.0, 10.0]), bounds());
    assert_eq!(e.interaction().selected_ring(), None);
    assert_eq!(e.focus_scale(), 1.0);
}

#[test]
fn hovered_ring_holds_still_then_resumes() {
    let mut e = engine();
    e.geometry().unwrap();
    // mid-rotation, not at rest
    for _ in 0..25 {
        e.tick();
    }
    assert!(e.rotation().angle(3) > 0.0);

    let ring3 = PointerTarget::Slice { ring: 3, index: 0 };
    e.handle_pointer(&PointerEvent::enter(ring3.clone(), [500.0, 200.0]), bounds());
    let held = e.rotation().angle(3);
    let ring2_before = e.rotation().angle(2);
    for _ in 0..10 {
        e.tick();
    }
    assert_eq!(e.rotation().angle(3), held);
    assert!(e.rotation().angle(2) != ring2_before);

    e.handle_pointer(&PointerEvent::leave(ring3, [500.0, 200.0]), bounds());
    let speed = e.speeds().speed(3);
    assert!(speed > 0.0);
    let mut last = e.rotation().angle(3);
    for _ in 0..10 {
        e.tick();
        let now = e.rotation().angle(3);
        assert!(now > last);
        last = now;
    }
    assert!((last - held - 10.0 * speed).abs() < 1e-5);
}

#[test]
fn tracker_drives_hover_and_tooltip() {
    let mut e = engine();
    let mut tracker = PointerTracker::new();
    let g = e.geometry().unwrap();
    let r = g.rings[1].mid_radius();

    // a point straight above the center, in ring 2
    let target = e.hit_test([0.0, -r]);
    assert!(matches!(target, Some(PointerTarget::Slice { ring: 2, .. })));
    for ev in tracker.update(target, [500.0, 500.0 - r]) {
        e.handle_pointer(&ev, bounds());
    }
    assert_eq!(e.interaction().hovered_ring(), Some(2));
    assert!(e.tooltip().is_visible());

    for ev in tracker.exit([0.0, 0.0]) {
        e.handle_pointer(&ev, bounds());
    }
    assert_eq!(e.interaction().hovered_ring(), None);
    assert!(!e.tooltip().is_visible());
}

#[test]
fn every_variant_builds_a_scene() {
    for v in Variant::ALL {
        let mut e = engine().with_variant(v);
        let scene = e.scene().unwrap();
        assert_eq!(scene.variant, v);
        if v == Variant::Dendrogram {
            assert!(scene.dendrogram.is_some());
        } else {
            assert!(!scene.rings.is_empty());
        }
    }
}

#[test]
fn empty_tree_reports_nothing_to_render() {
    let mut e = DiagramEngine::new(TreeNode::named("alone"), DiagramConfig::default());
    match e.scene() {
        Err(GeometryError::NoRings { root }) => assert_eq!(root, "alone"),
        other => panic!("unexpected: {:?}", other.map(|s| s.rings.len())),
    }
}

#[test]
fn config_file_round_trip() {
    let path = std::env::temp_dir().join(format!("radial-diagram-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        "variant = \"mandala\"\nfocus_scale = 1.1\n[canvas]\nwidth = 640\nheight = 480\n[rotation]\nenabled = false\n",
    )
    .unwrap();
    let config = DiagramConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.variant, Variant::Mandala);
    assert_eq!(config.canvas.width, 640.0);
    assert!(!config.rotation.enabled);

    let e = DiagramEngine::new(system_model_tree(), config);
    assert_eq!(e.size(), [640.0, 480.0]);
    assert!(!e.rotation_enabled());
}

#[test]
fn config_errors_are_typed() {
    assert!(matches!(
        DiagramConfig::load("/definitely/not/here.toml"),
        Err(ConfigError::Read { .. })
    ));
    assert!(matches!(
        DiagramConfig::from_toml_str("variant = \"pie\""),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        DiagramConfig::from_toml_str("ring_limit = 0"),
        Err(ConfigError::Invalid { field: "ring_limit", .. })
    ));
}
