use crate::anim::Ease;
use crate::renderer::camera::CameraPath;
use nalgebra_glm as glm;

/// Fraction of the viewport height a heading's top must reach before its
/// region starts scrubbing, and its bottom before the region completes.
const START_VIEWPORT_FRACTION: f32 = 0.70;
const END_VIEWPORT_FRACTION: f32 = 0.60;

/// Seconds of lag applied when chasing the target scroll progress, so the
/// camera glides instead of snapping to the wheel.
const SCRUB_LAG: f32 = 1.2;

/// A rendered heading's placement inside the scrollable content, in
/// content-space pixels from the top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingRect {
    pub top: f32,
    pub height: f32,
}

/// A scroll-offset range over which one waypoint transition is scrubbed.
/// Derived from a heading's layout; lifetime is the mounted page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerRegion {
    pub start: f32,
    pub end: f32,
}

impl TriggerRegion {
    fn from_heading(heading: HeadingRect, viewport_height: f32) -> Self {
        let start = heading.top - viewport_height * START_VIEWPORT_FRACTION;
        let end = heading.top + heading.height - viewport_height * END_VIEWPORT_FRACTION;
        // A short heading high on the page can produce an inverted range;
        // force a minimal forward window so progress stays well-defined.
        Self {
            start,
            end: end.max(start + 1.0),
        }
    }

    fn progress(&self, offset: f32) -> f32 {
        ((offset - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// Maps scroll position over trigger regions to eased interpolation
/// progress between consecutive camera waypoints, and reports which
/// section the scroll has most recently entered.
///
/// Regions are consumed in layout order, which must match waypoint order;
/// no reordering or overlap resolution happens. At most
/// `waypoints.len() - 1` regions are consumed — the rest are skipped.
pub struct ScrollBinder {
    path: CameraPath,
    regions: Vec<TriggerRegion>,
    display: Vec<f32>,
    entered: Vec<bool>,
    content_height: f32,
    viewport_height: f32,
    bound: bool,
}

impl ScrollBinder {
    pub fn new(path: CameraPath) -> Self {
        Self {
            path,
            regions: Vec::new(),
            display: Vec::new(),
            entered: Vec::new(),
            content_height: 0.0,
            viewport_height: 0.0,
            bound: false,
        }
    }

    /// Derive trigger regions from the current heading layout. Must be
    /// called again whenever the layout changes (asset load growing the
    /// page, viewport resize), otherwise scroll ranges desync from the
    /// visible content.
    pub fn bind(&mut self, headings: &[HeadingRect], viewport_height: f32, content_height: f32) {
        let consumed = self.path.transition_count(headings.len());
        if consumed < headings.len() {
            log::warn!(
                "{} scroll trigger(s) but only {} waypoint(s); skipping the trailing triggers",
                headings.len(),
                self.path.len(),
            );
        }
        self.regions = headings[..consumed]
            .iter()
            .map(|h| TriggerRegion::from_heading(*h, viewport_height))
            .collect();
        self.display.resize(consumed, 0.0);
        self.entered.resize(consumed, false);
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.bound = true;
    }

    /// Whether the layout has drifted from what `bind` last saw.
    pub fn needs_rebind(&self, viewport_height: f32, content_height: f32) -> bool {
        !self.bound
            || (self.content_height - content_height).abs() > 0.5
            || (self.viewport_height - viewport_height).abs() > 0.5
    }

    pub fn transition_count(&self) -> usize {
        self.regions.len()
    }

    /// Chase the scroll offset. Returns the index of a section freshly
    /// entered this update, if any, so the caller can switch the model's
    /// animation clip.
    pub fn update(&mut self, scroll_offset: f32, dt: f32) -> Option<usize> {
        let blend = if dt <= 0.0 {
            0.0
        } else {
            dt / (dt + SCRUB_LAG)
        };
        let mut newly_entered = None;
        for (i, region) in self.regions.iter().enumerate() {
            let target = region.progress(scroll_offset);
            self.display[i] += (target - self.display[i]) * blend;
            if target > 0.0 && !self.entered[i] {
                self.entered[i] = true;
                newly_entered = Some(i);
            } else if target == 0.0 {
                self.entered[i] = false;
            }
        }
        newly_entered
    }

    /// The camera pose for the current smoothed progress: the deepest
    /// region that has begun wins, mirroring how later timelines override
    /// earlier ones on the same properties.
    pub fn camera_pose(&self) -> Option<(glm::Vec3, glm::Vec3)> {
        if self.path.is_empty() {
            return None;
        }
        for (i, progress) in self.display.iter().enumerate().rev() {
            if *progress > 1e-4 {
                return self.path.pose(i, Ease::InOutQuad.apply(*progress));
            }
        }
        self.path
            .first()
            .map(|w| (glm::Vec3::from(w.position), glm::Vec3::from(w.target)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::Waypoint;

    const PATH_5: &[Waypoint] = &[
        Waypoint { position: [0.0, 0.0, 0.0], target: [0.0, 0.0, 0.0] },
        Waypoint { position: [1.0, 0.0, 0.0], target: [1.0, 0.0, 0.0] },
        Waypoint { position: [2.0, 0.0, 0.0], target: [2.0, 0.0, 0.0] },
        Waypoint { position: [3.0, 0.0, 0.0], target: [3.0, 0.0, 0.0] },
        Waypoint { position: [4.0, 0.0, 0.0], target: [4.0, 0.0, 0.0] },
    ];

    fn headings(n: usize) -> Vec<HeadingRect> {
        (0..n)
            .map(|i| HeadingRect {
                top: 1000.0 + 900.0 * i as f32,
                height: 60.0,
            })
            .collect()
    }

    #[test]
    fn five_waypoints_three_triggers_yield_three_transitions() {
        let mut binder = ScrollBinder::new(CameraPath::new(PATH_5));
        binder.bind(&headings(3), 800.0, 4000.0);
        assert_eq!(binder.transition_count(), 3);
    }

    #[test]
    fn excess_triggers_are_skipped() {
        let mut binder = ScrollBinder::new(CameraPath::new(PATH_5));
        binder.bind(&headings(7), 800.0, 8000.0);
        assert_eq!(binder.transition_count(), 4);
    }

    #[test]
    fn region_window_uses_viewport_fractions() {
        let region = TriggerRegion::from_heading(
            HeadingRect {
                top: 1000.0,
                height: 100.0,
            },
            800.0,
        );
        assert_eq!(region.start, 1000.0 - 0.70 * 800.0);
        assert_eq!(region.end, 1100.0 - 0.60 * 800.0);
    }

    #[test]
    fn degenerate_region_stays_forward() {
        let region = TriggerRegion::from_heading(
            HeadingRect {
                top: 10.0,
                height: 1.0,
            },
            800.0,
        );
        assert!(region.end > region.start);
    }

    #[test]
    fn progress_clamps_outside_region() {
        let region = TriggerRegion {
            start: 100.0,
            end: 200.0,
        };
        assert_eq!(region.progress(0.0), 0.0);
        assert_eq!(region.progress(150.0), 0.5);
        assert_eq!(region.progress(500.0), 1.0);
    }

    #[test]
    fn scrub_lag_smooths_toward_target() {
        let mut binder = ScrollBinder::new(CameraPath::new(PATH_5));
        binder.bind(&headings(3), 800.0, 4000.0);
        let mid = (binder.regions[0].start + binder.regions[0].end) / 2.0;
        binder.update(mid, 0.016);
        let after_one = binder.display[0];
        assert!(after_one > 0.0 && after_one < 0.5);
        for _ in 0..1000 {
            binder.update(mid, 0.016);
        }
        assert!((binder.display[0] - 0.5).abs() < 1e-3);
    }

    #[test]
    fn deepest_active_region_wins() {
        let mut binder = ScrollBinder::new(CameraPath::new(PATH_5));
        binder.bind(&headings(3), 800.0, 4000.0);
        // Scroll far past every region and let the smoothing settle.
        for _ in 0..2000 {
            binder.update(1e6, 0.016);
        }
        let (pos, _) = binder.camera_pose().unwrap();
        // Segment 2 fully scrubbed: the camera rests on waypoint 3.
        assert!((pos.x - 3.0).abs() < 1e-2);
    }

    #[test]
    fn unscrolled_page_rests_on_first_waypoint() {
        let mut binder = ScrollBinder::new(CameraPath::new(PATH_5));
        binder.bind(&headings(3), 800.0, 4000.0);
        let (pos, _) = binder.camera_pose().unwrap();
        assert_eq!(pos.x, 0.0);
    }

    #[test]
    fn section_entry_fires_once_until_exited() {
        let mut binder = ScrollBinder::new(CameraPath::new(PATH_5));
        binder.bind(&headings(3), 800.0, 4000.0);
        let inside = (binder.regions[0].start + binder.regions[0].end) / 2.0;
        assert_eq!(binder.update(inside, 0.016), Some(0));
        assert_eq!(binder.update(inside + 1.0, 0.016), None);
        binder.update(0.0, 0.016);
        assert_eq!(binder.update(inside, 0.016), Some(0));
    }

    #[test]
    fn layout_change_requires_rebind() {
        let mut binder = ScrollBinder::new(CameraPath::new(PATH_5));
        assert!(binder.needs_rebind(800.0, 4000.0));
        binder.bind(&headings(3), 800.0, 4000.0);
        assert!(!binder.needs_rebind(800.0, 4000.0));
        assert!(binder.needs_rebind(800.0, 4600.0));
        assert!(binder.needs_rebind(700.0, 4000.0));
    }
}
