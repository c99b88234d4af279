//! Segment × ring grid.
//!
//! The mandala regroups the hierarchy so every ring has the same number of
//! cells: one per segment, where segments are the children of the
//! lived-experience ring. Rings with fewer children repeat them around the
//! circle; rings with more merge consecutive children into one cell.

use crate::model::TreeNode;

/// Ring whose children define the segments when present.
pub const LIVED_RING: usize = 3;

/// Ring index (1-based) that supplies the segments, given each ring's child
/// count: the lived-experience ring when it has children, otherwise the
/// ring with the most children.
pub fn segment_ring(child_counts: &[usize]) -> Option<usize> {
    if child_counts.get(LIVED_RING - 1).is_some_and(|&k| k > 0) {
        return Some(LIVED_RING);
    }
    child_counts
        .iter()
        .enumerate()
        .filter(|&(_, &k)| k > 0)
        .max_by_key(|&(i, &k)| (k, std::cmp::Reverse(i)))
        .map(|(i, _)| i + 1)
}

/// Rebuild `tree` so each ring-bearing child (auxiliary groups included)
/// has exactly one child per segment.
///
/// Returns the tree unchanged when no ring has children.
pub fn mandala_tree(tree: &TreeNode, ring_limit: usize) -> TreeNode {
    let (rings, auxiliary) = tree.partition_rings(ring_limit);
    let counts: Vec<usize> = rings.iter().map(|r| r.children.len()).collect();
    let Some(seg_ring) = segment_ring(&counts) else {
        return tree.clone();
    };
    let segments = rings[seg_ring - 1].children.len();

    let children = rings
        .iter()
        .chain(auxiliary.iter())
        .map(|ring| {
            let cells = (0..segments).map(|s| cell(ring, s, segments)).collect();
            TreeNode::new(ring.name.clone(), ring.description.clone()).with_children(cells)
        })
        .collect();

    TreeNode::new(tree.name.clone(), tree.description.clone()).with_children(children)
}

fn cell(ring: &TreeNode, segment: usize, segments: usize) -> TreeNode {
    let k = ring.children.len();
    if k == 0 {
        return TreeNode::new(ring.name.clone(), ring.description.clone());
    }
    if k <= segments {
        return ring.children[segment % k].clone();
    }
    let start = segment * k / segments;
    let end = ((segment + 1) * k / segments).max(start + 1);
    let chunk = &ring.children[start..end.min(k)];
    if let [single] = chunk {
        return single.clone();
    }
    let name = chunk
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>()
        .join(" / ");
    let description = chunk
        .iter()
        .filter_map(|c| c.description())
        .collect::<Vec<_>>()
        .join(" ");
    TreeNode::new(name, description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::system_model_tree;

    #[test]
    fn every_ring_gets_one_cell_per_segment() {
        let m = mandala_tree(&system_model_tree(), 4);
        // four rings plus the auxiliary group
        assert_eq!(m.children.len(), 5);
        for ring in &m.children {
            assert_eq!(ring.children.len(), 8, "ring {}", ring.name);
        }
        assert_eq!(m.name, "The Black Box");
    }

    #[test]
    fn short_rings_repeat() {
        let m = mandala_tree(&system_model_tree(), 4);
        let ring1 = &m.children[0];
        assert_eq!(ring1.children[0].name, ring1.children[3].name);
        assert_eq!(ring1.children[1].name, ring1.children[4].name);
        let outer = &m.children[4];
        assert_eq!(outer.children[0].name, "Literacy");
        assert_eq!(outer.children[1].name, "Visibility");
        assert_eq!(outer.children[2].name, "Accountability");
        assert_eq!(outer.children[3].name, "Literacy");
    }

    #[test]
    fn long_rings_merge_consecutive_children() {
        let ring = TreeNode::named("pos").with_children(
            (0..16).map(|i| TreeNode::new(format!("p{}", i), format!("d{}.", i))).collect(),
        );
        let seg = TreeNode::named("lived").with_children(
            (0..8).map(|i| TreeNode::named(format!("s{}", i))).collect(),
        );
        let tree = TreeNode::named("root").with_children(vec![
            TreeNode::named("a").with_children(vec![TreeNode::named("x")]),
            TreeNode::named("b"),
            seg,
            ring,
        ]);
        let m = mandala_tree(&tree, 4);
        let cells = &m.children[3].children;
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0].name, "p0 / p1");
        assert_eq!(cells[7].name, "p14 / p15");
        assert_eq!(cells[0].description, "d0. d1.");
        // empty ring becomes a uniform ring of its own name
        assert_eq!(m.children[1].children[5].name, "b");
    }

    #[test]
    fn segment_ring_falls_back_to_largest() {
        assert_eq!(segment_ring(&[2, 1]), Some(1));
        // the lived ring wins whenever it has children
        assert_eq!(segment_ring(&[1, 4, 4]), Some(3));
        assert_eq!(segment_ring(&[1, 4, 0, 2]), Some(2));
        assert_eq!(segment_ring(&[3, 3, 8, 16]), Some(3));
        assert_eq!(segment_ring(&[0]), None);
    }

    #[test]
    fn flat_tree_is_returned_as_is() {
        let tree = TreeNode::named("root").with_children(vec![TreeNode::named("a")]);
        assert_eq!(mandala_tree(&tree, 4), tree);
    }
}
