//! The visual backend seam
//!
//! Orchestration logic never touches a renderer directly. It resolves the
//! pieces it animates to opaque [`TargetId`]s once, up front, and writes
//! scalar property values through [`VisualBackend`] every frame. Any host —
//! a retained-mode UI tree, a DOM bridge, a test recorder — implements the
//! trait and interprets the writes.
//!
//! Reveal masks are expressed as two clip fractions: `ClipTop = 1.0` hides
//! the element entirely from the top edge down, `ClipBottom = 1.0` from the
//! bottom edge up. Fully visible content has both at `0.0`.

use rustc_hash::FxHashMap;

/// Opaque handle to a host element
///
/// Allocated and interpreted by the backend; the orchestration layer only
/// stores and forwards it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(u64);

impl TargetId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

/// Scalar visual properties the orchestration layer drives
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisualProp {
    /// Fraction of the element hidden from its top edge (reveal mask), 0..=1
    ClipTop,
    /// Fraction of the element hidden from its bottom edge (reveal mask), 0..=1
    ClipBottom,
    Opacity,
    /// Uniform scale, 1.0 = natural size
    Scale,
    /// Rotation about the horizontal axis, degrees
    RotateX,
    /// Rotation about the vertical axis, degrees
    RotateY,
    TranslateX,
    TranslateY,
    /// Indicator fill amount, 0..=1
    FillAmount,
}

/// Sink for visual property writes
pub trait VisualBackend {
    /// Write one property value for one target
    ///
    /// Unknown targets must be ignored, not treated as errors: a stage whose
    /// element is absent degrades to a skipped stage.
    fn apply(&mut self, target: TargetId, prop: VisualProp, value: f32);
}

/// Test backend that records every write
///
/// Keeps both the full ordered log and the latest value per
/// (target, property) pair, so tests can assert sequencing or end state.
#[derive(Default)]
pub struct RecordingBackend {
    log: Vec<(TargetId, VisualProp, f32)>,
    latest: FxHashMap<(TargetId, VisualProp), f32>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest value written for (target, prop), if any
    pub fn last(&self, target: TargetId, prop: VisualProp) -> Option<f32> {
        self.latest.get(&(target, prop)).copied()
    }

    /// Number of writes recorded so far
    pub fn write_count(&self) -> usize {
        self.log.len()
    }

    /// Number of writes touching the given target
    pub fn writes_for(&self, target: TargetId) -> usize {
        self.log.iter().filter(|(t, _, _)| *t == target).count()
    }

    /// Full ordered write log
    pub fn log(&self) -> &[(TargetId, VisualProp, f32)] {
        &self.log
    }

    pub fn clear(&mut self) {
        self.log.clear();
        self.latest.clear();
    }
}

impl VisualBackend for RecordingBackend {
    fn apply(&mut self, target: TargetId, prop: VisualProp, value: f32) {
        self.log.push((target, prop, value));
        self.latest.insert((target, prop), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_backend_tracks_latest() {
        let mut backend = RecordingBackend::new();
        let t = TargetId::new(7);

        backend.apply(t, VisualProp::Opacity, 0.0);
        backend.apply(t, VisualProp::Opacity, 0.5);
        backend.apply(t, VisualProp::Scale, 0.9);

        assert_eq!(backend.last(t, VisualProp::Opacity), Some(0.5));
        assert_eq!(backend.last(t, VisualProp::Scale), Some(0.9));
        assert_eq!(backend.write_count(), 3);
        assert_eq!(backend.writes_for(t), 3);
        assert_eq!(backend.last(TargetId::new(8), VisualProp::Scale), None);
    }
}
