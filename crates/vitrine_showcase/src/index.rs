//! Progress → active index mapping
//!
//! Converts a pinned section's normalized progress into the discrete panel
//! index in focus, and produces the panel-aligned progress values used for
//! snapping and keyboard navigation. Both produce targets on the same grid
//! `k / (count − 1)`, so settling and stepping land identically.

/// Guard subtracted from the panel count so progress 1.0 still maps to the
/// last panel instead of one past it
const INDEX_EPSILON: f32 = 1e-4;

/// Maps normalized progress to a discrete active panel index
#[derive(Clone, Copy, Debug)]
pub struct IndexMapper {
    count: usize,
}

impl IndexMapper {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Number of inter-panel steps (0 for a single panel)
    pub fn steps(&self) -> usize {
        self.count.saturating_sub(1)
    }

    /// The panel index in focus at `progress`
    ///
    /// Non-decreasing in `progress`; 0 at progress 0, `count − 1` at 1.
    pub fn index_for(&self, progress: f32) -> usize {
        if self.count == 0 {
            return 0;
        }
        let p = progress.clamp(0.0, 1.0);
        let raw = (p * (self.count as f32 - INDEX_EPSILON)).floor() as usize;
        raw.min(self.count - 1)
    }

    /// Panel-aligned progress for an index
    pub fn progress_for(&self, index: usize) -> f32 {
        let steps = self.steps();
        if steps == 0 {
            return 0.0;
        }
        index.min(steps) as f32 / steps as f32
    }

    /// Nearest panel-aligned progress value
    ///
    /// With a single panel there is nothing to align to; the input passes
    /// through.
    pub fn snap_target(&self, progress: f32) -> f32 {
        let steps = self.steps();
        if steps == 0 {
            return progress;
        }
        let steps = steps as f32;
        (progress.clamp(0.0, 1.0) * steps).round() / steps
    }

    /// Panel-aligned progress one step away from `index`
    ///
    /// `direction` is negative for the previous panel, positive for the
    /// next; the result clamps at the ends.
    pub fn step_target(&self, index: usize, direction: i32) -> f32 {
        let steps = self.steps();
        if steps == 0 {
            return 0.0;
        }
        let next = if direction < 0 {
            index.saturating_sub(1)
        } else {
            (index + 1).min(steps)
        };
        next as f32 / steps as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints() {
        let mapper = IndexMapper::new(3);
        assert_eq!(mapper.index_for(0.0), 0);
        assert_eq!(mapper.index_for(1.0), 2);
    }

    #[test]
    fn monotone_over_sweep() {
        let mapper = IndexMapper::new(5);
        let mut last = 0;
        for i in 0..=1000 {
            let idx = mapper.index_for(i as f32 / 1000.0);
            assert!(idx >= last, "index regressed at p={}", i as f32 / 1000.0);
            assert!(idx < 5);
            last = idx;
        }
        assert_eq!(last, 4);
    }

    #[test]
    fn snap_rounds_to_panel_grid() {
        let mapper = IndexMapper::new(3);
        // Grid is {0, 0.5, 1}
        assert_eq!(mapper.snap_target(0.42), 0.5);
        assert_eq!(mapper.snap_target(0.2), 0.0);
        assert_eq!(mapper.snap_target(0.76), 1.0);
    }

    #[test]
    fn keyboard_targets_match_snap_grid() {
        let mapper = IndexMapper::new(4);
        assert_eq!(mapper.step_target(0, 1), mapper.progress_for(1));
        assert_eq!(mapper.step_target(2, 1), 1.0);
        assert_eq!(mapper.step_target(3, 1), 1.0);
        assert_eq!(mapper.step_target(1, -1), 0.0);
        assert_eq!(mapper.step_target(0, -1), 0.0);

        // Every step target is itself a snap fixpoint
        for i in 0..4 {
            for dir in [-1, 1] {
                let t = mapper.step_target(i, dir);
                assert_eq!(mapper.snap_target(t), t);
            }
        }
    }

    #[test]
    fn single_panel_degenerates_gracefully() {
        let mapper = IndexMapper::new(1);
        assert_eq!(mapper.index_for(0.7), 0);
        assert_eq!(mapper.snap_target(0.7), 0.7);
        assert_eq!(mapper.step_target(0, 1), 0.0);
    }
}
