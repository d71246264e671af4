//! Timeline orchestration
//!
//! A [`Timeline`] schedules many from→to entries at offsets on a single
//! clock. Before an entry's offset its value is the `from` value; after
//! offset + duration it holds `to`. The timeline finishes when the last
//! entry does.
//!
//! [`StaggerBuilder`] adds a run of identical entries whose offsets step by
//! a fixed amount, the pattern used for description lines and tag pills.

use crate::easing::Easing;

/// Handle to one entry within a timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimelineEntryId(usize);

#[derive(Clone, Debug)]
struct TimelineEntry {
    offset_ms: f32,
    duration_ms: f32,
    from: f32,
    to: f32,
    easing: Easing,
}

impl TimelineEntry {
    fn end_ms(&self) -> f32 {
        self.offset_ms + self.duration_ms
    }

    fn value_at(&self, time_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return if time_ms >= self.offset_ms {
                self.to
            } else {
                self.from
            };
        }
        let t = ((time_ms - self.offset_ms) / self.duration_ms).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    fn progress_at(&self, time_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return if time_ms >= self.offset_ms { 1.0 } else { 0.0 };
        }
        ((time_ms - self.offset_ms) / self.duration_ms).clamp(0.0, 1.0)
    }
}

/// A set of offset-scheduled animations on one clock
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
    time_ms: f32,
    playing: bool,
    /// Playback rate multiplier (1.0 = realtime)
    rate: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            time_ms: 0.0,
            playing: false,
            rate: 1.0,
        }
    }

    /// Add an entry with the default easing
    pub fn add(
        &mut self,
        offset_ms: f32,
        duration_ms: f32,
        from: f32,
        to: f32,
    ) -> TimelineEntryId {
        self.add_with_easing(offset_ms, duration_ms, from, to, Easing::default())
    }

    /// Add an entry with a specific easing
    pub fn add_with_easing(
        &mut self,
        offset_ms: f32,
        duration_ms: f32,
        from: f32,
        to: f32,
        easing: Easing,
    ) -> TimelineEntryId {
        self.entries.push(TimelineEntry {
            offset_ms: offset_ms.max(0.0),
            duration_ms: duration_ms.max(0.0),
            from,
            to,
            easing,
        });
        TimelineEntryId(self.entries.len() - 1)
    }

    /// Begin a staggered run of entries
    pub fn stagger(&mut self) -> StaggerBuilder<'_> {
        StaggerBuilder {
            timeline: self,
            offset_ms: 0.0,
            duration_ms: 0.0,
            from: 0.0,
            to: 1.0,
            easing: Easing::default(),
            step_ms: 0.0,
        }
    }

    /// Reset the clock and start playing
    pub fn start(&mut self) {
        self.time_ms = 0.0;
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// Resume without resetting the clock
    pub fn resume(&mut self) {
        if self.time_ms < self.total_duration_ms() {
            self.playing = true;
        }
    }

    /// Jump the clock to `time_ms`
    pub fn seek(&mut self, time_ms: f32) {
        self.time_ms = time_ms.clamp(0.0, self.total_duration_ms());
    }

    pub fn set_rate(&mut self, rate: f32) {
        self.rate = rate.max(0.0);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Whether the clock has reached the end of the last entry
    pub fn is_finished(&self) -> bool {
        !self.playing && self.time_ms >= self.total_duration_ms()
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry_ids(&self) -> Vec<TimelineEntryId> {
        (0..self.entries.len()).map(TimelineEntryId).collect()
    }

    /// End of the last entry, in ms
    pub fn total_duration_ms(&self) -> f32 {
        self.entries
            .iter()
            .map(TimelineEntry::end_ms)
            .fold(0.0, f32::max)
    }

    /// Overall progress of the clock through the timeline, 0..=1
    pub fn progress(&self) -> f32 {
        let total = self.total_duration_ms();
        if total <= 0.0 {
            return 1.0;
        }
        (self.time_ms / total).clamp(0.0, 1.0)
    }

    /// Current value of an entry
    pub fn value(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries.get(id.0).map(|e| e.value_at(self.time_ms))
    }

    /// Progress of one entry, 0..=1
    pub fn entry_progress(&self, id: TimelineEntryId) -> Option<f32> {
        self.entries.get(id.0).map(|e| e.progress_at(self.time_ms))
    }

    /// Advance the clock; returns true while still playing
    pub fn tick(&mut self, dt_ms: f32) -> bool {
        if !self.playing {
            return false;
        }
        self.time_ms += dt_ms.max(0.0) * self.rate;
        let total = self.total_duration_ms();
        if self.time_ms >= total {
            self.time_ms = total;
            self.playing = false;
        }
        self.playing
    }
}

/// Builder for a staggered run of identical entries
pub struct StaggerBuilder<'a> {
    timeline: &'a mut Timeline,
    offset_ms: f32,
    duration_ms: f32,
    from: f32,
    to: f32,
    easing: Easing,
    step_ms: f32,
}

impl StaggerBuilder<'_> {
    /// Offset of the first entry
    pub fn offset(mut self, offset_ms: f32) -> Self {
        self.offset_ms = offset_ms;
        self
    }

    pub fn duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn range(mut self, from: f32, to: f32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Delay added per successive entry
    pub fn step(mut self, step_ms: f32) -> Self {
        self.step_ms = step_ms;
        self
    }

    /// Add `count` entries, returning their ids in order
    pub fn add(self, count: usize) -> Vec<TimelineEntryId> {
        (0..count)
            .map(|i| {
                self.timeline.add_with_easing(
                    self.offset_ms + self.step_ms * i as f32,
                    self.duration_ms,
                    self.from,
                    self.to,
                    self.easing,
                )
            })
            .collect()
    }
}
