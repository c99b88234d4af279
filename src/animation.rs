//! Frame-driven animation loop handle.
//!
//! At most one frame is pending at a time. Every request carries a
//! [`FrameToken`]; cancelling bumps the generation so a frame requested
//! before the cancel is recognised as stale and does nothing.

/// Something that can wake the UI for another frame.
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl FrameScheduler for egui::Context {
    fn request_frame(&self) {
        self.request_repaint();
    }
}

/// Identifies the loop generation a frame was requested under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken(u64);

#[derive(Debug, Default)]
pub struct AnimationLoop {
    generation: u64,
    running: bool,
    pending: Option<FrameToken>,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("animation loop started (generation {})", self.generation);
            self.running = true;
        }
    }

    /// Stop the loop and orphan any pending frame.
    pub fn cancel(&mut self) {
        if self.running || self.pending.is_some() {
            log::debug!("animation loop cancelled (generation {})", self.generation);
        }
        self.running = false;
        self.pending = None;
        self.generation = self.generation.wrapping_add(1);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    /// Request the next frame unless one is already pending.
    pub fn schedule<S: FrameScheduler + ?Sized>(&mut self, scheduler: &S) -> Option<FrameToken> {
        if !self.running {
            return None;
        }
        if self.pending.is_none() {
            let token = FrameToken(self.generation);
            self.pending = Some(token);
            scheduler.request_frame();
        }
        self.pending
    }

    /// Consume the pending frame. Returns `false` for stale or unrequested
    /// frames, which must not touch any state.
    pub fn begin_frame(&mut self, token: FrameToken) -> bool {
        if !self.running || token.0 != self.generation {
            return false;
        }
        if self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        true
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        if self.running {
            self.cancel();
        }
    }
}
