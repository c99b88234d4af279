use std::sync::Arc;

use super::{compute_geometry, Geometry, GeometryParams};
use crate::error::GeometryError;
use crate::model::TreeNode;

/// Everything a geometry snapshot depends on. Trees compare by identity
/// (address of the shared allocation), so callers swapping trees must
/// [`GeometryCache::invalidate`] before dropping the old one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryKey {
    tree: usize,
    pub width: f32,
    pub height: f32,
    pub ring_limit: usize,
    pub params: GeometryParams,
}

impl GeometryKey {
    pub fn new(
        tree: &Arc<TreeNode>,
        width: f32,
        height: f32,
        ring_limit: usize,
        params: GeometryParams,
    ) -> Self {
        Self {
            tree: Arc::as_ptr(tree) as usize,
            width,
            height,
            ring_limit,
            params,
        }
    }
}

/// Memoized geometry keyed by [`GeometryKey`].
///
/// `generation` bumps on every recompute so consumers can tell a rebuilt
/// snapshot from the one they already hold.
#[derive(Debug, Default)]
pub struct GeometryCache {
    key: Option<GeometryKey>,
    value: Option<Result<Arc<Geometry>, GeometryError>>,
    generation: u64,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_fresh(&self, key: &GeometryKey) -> bool {
        self.key.as_ref() == Some(key) && self.value.is_some()
    }

    /// Return the cached snapshot, recomputing when the key changed.
    pub fn get(
        &mut self,
        tree: &Arc<TreeNode>,
        width: f32,
        height: f32,
        ring_limit: usize,
        params: GeometryParams,
    ) -> Result<Arc<Geometry>, GeometryError> {
        let key = GeometryKey::new(tree, width, height, ring_limit, params);
        if !self.is_fresh(&key) {
            let result = compute_geometry(tree, width, height, ring_limit, &params).map(Arc::new);
            match &result {
                Ok(g) => log::debug!(
                    "geometry rebuilt: {}x{} -> {} rings, {} slices",
                    width,
                    height,
                    g.rings.len(),
                    g.slices.len()
                ),
                Err(e) => log::warn!("geometry unavailable: {}", e),
            }
            self.key = Some(key);
            self.value = Some(result);
            self.generation = self.generation.wrapping_add(1);
        }
        match &self.value {
            Some(result) => result.clone(),
            None => Err(GeometryError::InvalidCanvas { width, height }),
        }
    }

    /// Forget the snapshot; the next `get` recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.value = None;
    }
}
