//! Per-ring rotation.
//!
//! Each ring turns at its own fixed per-frame speed. Adjacent rings
//! counter-rotate and slow down outward so the pattern never locks. A ring
//! that is selected or hovered is frozen in place.

use std::collections::BTreeMap;
use std::f32::consts::TAU;

use serde::Deserialize;

use crate::interaction::InteractionState;

/// Ring 1 speed in radians per frame.
pub const DEFAULT_BASE_SPEED: f32 = 0.0016;
/// Magnitude falloff from one ring to the next.
pub const DEFAULT_SPEED_DECAY: f32 = 0.78;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    pub enabled: bool,
    /// Explicit per-ring speeds (ring 1 first). Rings past the end of the
    /// list fall back to the generated alternating sequence.
    pub speeds: Vec<f32>,
    pub base_speed: f32,
    pub speed_decay: f32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            speeds: Vec::new(),
            base_speed: DEFAULT_BASE_SPEED,
            speed_decay: DEFAULT_SPEED_DECAY,
        }
    }
}

/// Fixed angular speed per ring.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSpeeds {
    speeds: Vec<f32>,
    base: f32,
    decay: f32,
}

impl RingSpeeds {
    /// `+base, -base*decay, +base*decay², ...`
    pub fn alternating(ring_count: usize, base: f32, decay: f32) -> Self {
        let speeds = (1..=ring_count)
            .map(|ring| alternating_speed(ring, base, decay))
            .collect();
        Self { speeds, base, decay }
    }

    pub fn from_config(config: &RotationConfig, ring_count: usize) -> Self {
        let mut speeds = Self::alternating(ring_count, config.base_speed, config.speed_decay);
        for (slot, &s) in speeds.speeds.iter_mut().zip(config.speeds.iter()) {
            *slot = s;
        }
        speeds
    }

    pub fn speed(&self, ring_index: usize) -> f32 {
        ring_index
            .checked_sub(1)
            .and_then(|i| self.speeds.get(i).copied())
            .unwrap_or_else(|| alternating_speed(ring_index.max(1), self.base, self.decay))
    }

    pub fn len(&self) -> usize {
        self.speeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speeds.is_empty()
    }
}

impl Default for RingSpeeds {
    fn default() -> Self {
        Self::alternating(4, DEFAULT_BASE_SPEED, DEFAULT_SPEED_DECAY)
    }
}

fn alternating_speed(ring_index: usize, base: f32, decay: f32) -> f32 {
    let sign = if ring_index % 2 == 1 { 1.0 } else { -1.0 };
    sign * base * decay.powi(ring_index as i32 - 1)
}

/// Current angle of every ring, in radians. Unbounded; wrap when drawing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RotationState {
    angles: BTreeMap<usize, f32>,
}

impl RotationState {
    /// Rings `1..=ring_count`, all at angle 0.
    pub fn for_rings(ring_count: usize) -> Self {
        Self {
            angles: (1..=ring_count).map(|r| (r, 0.0)).collect(),
        }
    }

    pub fn angle(&self, ring_index: usize) -> f32 {
        self.angles.get(&ring_index).copied().unwrap_or(0.0)
    }

    /// Angle in [0, 2π) for rendering.
    pub fn wrapped(&self, ring_index: usize) -> f32 {
        self.angle(ring_index).rem_euclid(TAU)
    }

    pub fn set_angle(&mut self, ring_index: usize, angle: f32) {
        self.angles.insert(ring_index, angle);
    }

    pub fn rings(&self) -> impl Iterator<Item = usize> + '_ {
        self.angles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.angles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Match the ring set to a new geometry while keeping in-progress
    /// angles of rings that survive.
    pub fn reconcile(&mut self, ring_count: usize) {
        self.angles.retain(|&r, _| r >= 1 && r <= ring_count);
        for r in 1..=ring_count {
            self.angles.entry(r).or_insert(0.0);
        }
    }

    pub fn reset(&mut self) {
        for a in self.angles.values_mut() {
            *a = 0.0;
        }
    }

    /// Advance in place by one frame.
    pub fn advance(&mut self, interaction: &InteractionState, speeds: &RingSpeeds) {
        for (&ring, angle) in self.angles.iter_mut() {
            if !interaction.is_frozen(ring) {
                *angle += speeds.speed(ring);
            }
        }
    }
}

/// One animation frame: every ring not selected or hovered moves by its speed.
pub fn tick(
    state: &RotationState,
    interaction: &InteractionState,
    speeds: &RingSpeeds,
) -> RotationState {
    let mut next = state.clone();
    next.advance(interaction, speeds);
    next
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_rings_counter_rotate() {
        let s = RingSpeeds::default();
        assert!(s.speed(1) > 0.0);
        assert!(s.speed(2) < 0.0);
        assert!(s.speed(3) > 0.0);
        assert!(s.speed(4) < 0.0);
        // magnitudes differ so rings drift apart
        assert!(s.speed(1).abs() > s.speed(2).abs());
        assert!(s.speed(2).abs() > s.speed(3).abs());
    }

    #[test]
    fn explicit_speeds_override_prefix() {
        let cfg = RotationConfig {
            speeds: vec![0.01, -0.02],
            ..RotationConfig::default()
        };
        let s = RingSpeeds::from_config(&cfg, 4);
        assert_eq!(s.len(), 4);
        assert_eq!(s.speed(1), 0.01);
        assert_eq!(s.speed(2), -0.02);
        assert!(s.speed(3) > 0.0);
        // unknown rings still get a sensible speed
        assert!(s.speed(9) > 0.0);
    }

    #[test]
    fn tick_moves_free_rings_only() {
        let state = RotationState::for_rings(3);
        let mut interaction = InteractionState::default();
        interaction.click_ring(2);
        let speeds = RingSpeeds::default();

        let next = tick(&state, &interaction, &speeds);
        assert_eq!(next.angle(2), 0.0);
        assert!((next.angle(1) - speeds.speed(1)).abs() < 1e-7);
        assert!((next.angle(3) - speeds.speed(3)).abs() < 1e-7);
        // input untouched
        assert_eq!(state.angle(1), 0.0);
    }

    #[test]
    fn reconcile_preserves_surviving_angles() {
        let mut state = RotationState::for_rings(4);
        state.set_angle(2, 1.25);
        state.set_angle(4, 3.0);
        state.reconcile(3);
        assert_eq!(state.len(), 3);
        assert_eq!(state.angle(2), 1.25);
        assert_eq!(state.angle(4), 0.0);

        state.reconcile(5);
        assert_eq!(state.len(), 5);
        assert_eq!(state.angle(2), 1.25);
    }

    #[test]
    fn wrapped_angle_is_in_range() {
        let mut state = RotationState::for_rings(1);
        state.set_angle(1, -0.5);
        let w = state.wrapped(1);
        assert!(w >= 0.0 && w < TAU);
        assert!((w - (TAU - 0.5)).abs() < 1e-5);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// A frozen ring never moves; a free ring moves strictly in the
        /// direction of its speed on every tick.
        #[test]
        fn frozen_still_free_monotonic(
            rings in 1usize..8,
            frozen in 1usize..8,
            ticks in 1usize..50,
            hover in any::<bool>(),
        ) {
            let frozen = frozen.min(rings);
            let mut interaction = InteractionState::default();
            if hover {
                interaction.pointer_enter_ring(frozen);
            } else {
                interaction.click_ring(frozen);
            }
            let speeds = RingSpeeds::alternating(rings, DEFAULT_BASE_SPEED, DEFAULT_SPEED_DECAY);
            let mut state = RotationState::for_rings(rings);

            for _ in 0..ticks {
                let next = tick(&state, &interaction, &speeds);
                for r in 1..=rings {
                    if r == frozen {
                        prop_assert_eq!(next.angle(r), state.angle(r));
                    } else if speeds.speed(r) > 0.0 {
                        prop_assert!(next.angle(r) > state.angle(r));
                    } else {
                        prop_assert!(next.angle(r) < state.angle(r));
                    }
                }
                state = next;
            }
        }
    }
}
