//! The horizontal gallery page
//!
//! Pins under [`GALLERY_PIN_ID`] and translates a horizontal track by the
//! scrolled extent, so vertical scrolling walks the cards sideways. A
//! fixed progress bar mirrors the section progress. No snapping here —
//! the track flows freely. Panels filter by category; changing category
//! resets the active index, remeasures the track, and rewinds the scroll
//! to the top of the gallery.

use crate::config::ShowcaseConfig;
use crate::index::IndexMapper;
use crate::panel::PanelSet;
use crate::sections::{InputMode, SectionLayout};
use vitrine_animation::{AnimatedTween, Easing, SchedulerHandle};
use vitrine_core::{TargetId, VisualBackend, VisualProp};
use vitrine_scroll::{ExtentPolicy, Pin, PinnedTracker, ScrollContext};

/// Pin registry identifier for the gallery page
pub const GALLERY_PIN_ID: &str = "works-gallery";

/// Extra scroll room past the end of the track
const TRACK_END_MARGIN: f32 = 200.0;
/// Category switches rewind with this ease
const REWIND_MS: f32 = 500.0;

/// Targets the host resolved for the gallery chrome
#[derive(Clone, Copy, Debug, Default)]
pub struct GalleryTargets {
    /// The horizontal track (TranslateX)
    pub track: Option<TargetId>,
    /// The fixed progress bar fill (FillAmount)
    pub progress_bar: Option<TargetId>,
}

/// Horizontally scrolled, category-filtered project gallery
pub struct GallerySection {
    all_panels: PanelSet,
    visible: PanelSet,
    active_category: Option<String>,
    config: ShowcaseConfig,
    layout: SectionLayout,
    mapper: IndexMapper,
    targets: GalleryTargets,
    bar: AnimatedTween,
    mode: InputMode,
    active_index: usize,
    progress: f32,
}

impl GallerySection {
    pub fn new(
        panels: PanelSet,
        config: ShowcaseConfig,
        handle: SchedulerHandle,
        targets: GalleryTargets,
        layout: SectionLayout,
        scroll: &mut ScrollContext,
    ) -> Self {
        let visible = panels.filtered(None);
        let mapper = IndexMapper::new(visible.len());
        let mut section = Self {
            all_panels: panels,
            visible,
            active_category: None,
            config,
            layout,
            mapper,
            targets,
            bar: AnimatedTween::new(handle, 0.0),
            mode: InputMode::Mobile,
            active_index: 0,
            progress: 0.0,
        };

        if scroll
            .viewport()
            .category_at(section.config.mobile_breakpoint)
            .is_mobile()
        {
            section.mode = InputMode::Mobile;
        } else {
            section.mount_desktop(scroll);
        }
        section
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn visible_panels(&self) -> &PanelSet {
        &self.visible
    }

    pub fn categories(&self) -> Vec<&str> {
        self.all_panels.categories()
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn mount_desktop(&mut self, scroll: &mut ScrollContext) {
        let mut tracker = PinnedTracker::new(ExtentPolicy::TrackMinusViewport {
            margin: TRACK_END_MARGIN,
        });
        tracker.set_pin_start(self.layout.pin_start);
        scroll.register_pin(GALLERY_PIN_ID, Pin::new(tracker, self.layout.track_size));
        self.mode = InputMode::Desktop;
    }

    /// Release the pin; safe to call repeatedly
    pub fn teardown(&mut self, scroll: &mut ScrollContext) {
        scroll.unregister_pin(GALLERY_PIN_ID);
        self.mode = InputMode::Mobile;
    }

    /// React to a viewport change already applied to the scroll context
    pub fn set_viewport(&mut self, scroll: &mut ScrollContext) {
        let mobile = scroll
            .viewport()
            .category_at(self.config.mobile_breakpoint)
            .is_mobile();
        match (self.mode, mobile) {
            (InputMode::Desktop, true) => self.teardown(scroll),
            (InputMode::Mobile, false) => self.mount_desktop(scroll),
            _ => {}
        }
    }

    /// Switch the category filter
    ///
    /// Re-registers the pin with the freshly measured track size (same id,
    /// so the old registration is replaced), resets the active index, and
    /// rewinds to the top of the gallery.
    pub fn set_category(
        &mut self,
        category: Option<&str>,
        track_size: f32,
        scroll: &mut ScrollContext,
    ) {
        self.active_category = category.map(String::from);
        self.visible = self.all_panels.filtered(category);
        self.mapper = IndexMapper::new(self.visible.len());
        self.active_index = 0;
        self.progress = 0.0;
        self.layout.track_size = track_size;

        if self.mode == InputMode::Desktop {
            self.mount_desktop(scroll);
            scroll.scroll_to(self.layout.pin_start, REWIND_MS, Easing::EaseOutQuad);
        }
        tracing::debug!(category = ?self.active_category, panels = self.visible.len(), "gallery filter changed");
    }

    // =========================================================================
    // Frame update
    // =========================================================================

    /// Pull progress from the scroll context and drive the track
    pub fn update(&mut self, scroll: &ScrollContext, backend: &mut dyn VisualBackend) {
        if self.mode != InputMode::Desktop {
            return;
        }
        let Some(pin) = scroll.pin(GALLERY_PIN_ID) else {
            return;
        };
        self.progress = pin.tracker().progress();
        self.active_index = self.mapper.index_for(self.progress);

        if let Some(track) = self.targets.track {
            let extent = pin.tracker().extent();
            backend.apply(track, VisualProp::TranslateX, -extent * self.progress);
        }

        if (self.bar.target() - self.progress).abs() > f32::EPSILON {
            self.bar.animate_to(
                self.progress,
                self.config.indicator_smoothing_ms,
                Easing::Linear,
            );
        }
        if let Some(bar) = self.targets.progress_bar {
            backend.apply(bar, VisualProp::FillAmount, self.bar.get());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::PanelItem;
    use vitrine_animation::AnimationScheduler;
    use vitrine_core::{RecordingBackend, Viewport};
    use vitrine_scroll::SmoothScrollConfig;

    fn panels() -> PanelSet {
        PanelSet::new(vec![
            PanelItem::new("1", "Commerce Platform", "storefront").category("web"),
            PanelItem::new("2", "Brand System", "identity work").category("design"),
            PanelItem::new("3", "Analytics Suite", "dashboards").category("web"),
            PanelItem::new("4", "Mobile Companion", "on the go").category("mobile"),
        ])
    }

    fn scroll_ctx() -> ScrollContext {
        let mut ctx = ScrollContext::new(
            SmoothScrollConfig::default(),
            Viewport::new(1280.0, 800.0),
        );
        ctx.set_content_limit(20_000.0);
        ctx
    }

    fn section(scroll: &mut ScrollContext, scheduler: &AnimationScheduler) -> GallerySection {
        GallerySection::new(
            panels(),
            ShowcaseConfig::default(),
            scheduler.handle(),
            GalleryTargets {
                track: Some(TargetId::new(1)),
                progress_bar: Some(TargetId::new(2)),
            },
            SectionLayout {
                pin_start: 1000.0,
                track_size: 4000.0,
            },
            scroll,
        )
    }

    fn force_offset(scroll: &mut ScrollContext, offset: f32) {
        scroll.scroll_to(offset, 0.0, Easing::Linear);
        scroll.tick(0.0);
    }

    #[test]
    fn track_translates_with_progress() {
        let scheduler = AnimationScheduler::new();
        let mut scroll = scroll_ctx();
        let mut gallery = section(&mut scroll, &scheduler);
        let mut backend = RecordingBackend::new();

        // Extent: 4000 - 1280 + 200 = 2920; halfway through the span
        force_offset(&mut scroll, 1000.0 + 1460.0);
        gallery.update(&scroll, &mut backend);

        assert!((gallery.progress() - 0.5).abs() < 1e-4);
        let tx = backend.last(TargetId::new(1), VisualProp::TranslateX).unwrap();
        assert!((tx + 1460.0).abs() < 1e-2);
        assert_eq!(gallery.active_index(), 1);
    }

    #[test]
    fn category_filter_resets_and_rewinds() {
        let scheduler = AnimationScheduler::new();
        let mut scroll = scroll_ctx();
        let mut gallery = section(&mut scroll, &scheduler);
        let mut backend = RecordingBackend::new();

        force_offset(&mut scroll, 3000.0);
        gallery.update(&scroll, &mut backend);
        assert!(gallery.active_index() > 0);

        gallery.set_category(Some("web"), 1800.0, &mut scroll);
        assert_eq!(gallery.active_index(), 0);
        assert_eq!(gallery.visible_panels().len(), 2);
        assert_eq!(scroll.pin_count(), 1);

        // Rewind eases back to the pin start
        for _ in 0..120 {
            scroll.tick(16.0);
            scheduler.tick(16.0);
        }
        assert!((scroll.eased_offset() - 1000.0).abs() < 1.0);
        gallery.update(&scroll, &mut backend);
        assert_eq!(gallery.active_index(), 0);

        // Back to all panels
        gallery.set_category(None, 4000.0, &mut scroll);
        assert_eq!(gallery.visible_panels().len(), 4);
        assert_eq!(gallery.categories(), vec!["web", "design", "mobile"]);
    }

    #[test]
    fn mobile_viewport_has_no_pin() {
        let scheduler = AnimationScheduler::new();
        let mut scroll = ScrollContext::new(
            SmoothScrollConfig::default(),
            Viewport::new(600.0, 900.0),
        );
        let gallery = section(&mut scroll, &scheduler);
        assert_eq!(gallery.input_mode(), InputMode::Mobile);
        assert_eq!(scroll.pin_count(), 0);
    }

    #[test]
    fn breakpoint_crossing_swaps_pin_exclusively() {
        let scheduler = AnimationScheduler::new();
        let mut scroll = scroll_ctx();
        let mut gallery = section(&mut scroll, &scheduler);
        assert_eq!(scroll.pin_count(), 1);

        scroll.set_viewport(Viewport::new(600.0, 900.0));
        gallery.set_viewport(&mut scroll);
        assert_eq!(gallery.input_mode(), InputMode::Mobile);
        assert_eq!(scroll.pin_count(), 0);

        scroll.set_viewport(Viewport::new(1400.0, 900.0));
        gallery.set_viewport(&mut scroll);
        assert_eq!(gallery.input_mode(), InputMode::Desktop);
        assert_eq!(scroll.pin_count(), 1);
    }
}
