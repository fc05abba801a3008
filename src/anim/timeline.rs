use super::Ease;

/// Where a tween starts relative to the tweens already on the timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Position {
    /// After everything added so far, plus a gap in seconds (`"+=gap"`).
    After(f32),
    /// Aligned with the start of the previously added tween (`"<"`).
    WithPrevious,
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    track: usize,
    from: f32,
    to: f32,
    start: f32,
    duration: f32,
    ease: Ease,
}

impl Tween {
    fn value_at(&self, time: f32) -> f32 {
        let t = if self.duration <= 0.0 {
            if time < self.start { 0.0 } else { 1.0 }
        } else {
            ((time - self.start) / self.duration).clamp(0.0, 1.0)
        };
        self.from + (self.to - self.from) * self.ease.apply(t)
    }
}

/// An ordered sequence of property tweens with relative start offsets.
///
/// One timeline drives one mounted thing (a page intro, the transition
/// mask); it is created on mount and dropped on unmount. It can be
/// stepped by wall-clock `dt` or scrubbed to a normalized progress.
/// Tracks are plain indices; callers name them with constants.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    tweens: Vec<Tween>,
    cursor: f32,
    duration: f32,
    prev_start: f32,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tween(
        mut self,
        track: usize,
        (from, to): (f32, f32),
        duration: f32,
        ease: Ease,
        position: Position,
    ) -> Self {
        let start = match position {
            Position::After(gap) => self.duration + gap,
            Position::WithPrevious => self.prev_start,
        };
        self.prev_start = start;
        self.duration = self.duration.max(start + duration);
        self.tweens.push(Tween {
            track,
            from,
            to,
            start,
            duration,
            ease,
        });
        self
    }

    /// One tween per track in `tracks`, each offset by `stagger` from the
    /// previous one.
    pub fn stagger(
        mut self,
        tracks: std::ops::Range<usize>,
        (from, to): (f32, f32),
        duration: f32,
        stagger: f32,
        ease: Ease,
        position: Position,
    ) -> Self {
        let base = match position {
            Position::After(gap) => self.duration + gap,
            Position::WithPrevious => self.prev_start,
        };
        for (i, track) in tracks.enumerate() {
            let start = base + stagger * i as f32;
            self.prev_start = start;
            self.duration = self.duration.max(start + duration);
            self.tweens.push(Tween {
                track,
                from,
                to,
                start,
                duration,
                ease,
            });
        }
        self
    }

    /// Advance the playhead. Returns true while the timeline is running.
    pub fn step(&mut self, dt: f32) -> bool {
        if self.finished() {
            return false;
        }
        self.cursor = (self.cursor + dt.max(0.0)).min(self.duration);
        !self.finished()
    }

    /// Scrub directly to a normalized progress in `[0, 1]`.
    #[allow(dead_code)]
    pub fn seek(&mut self, progress: f32) {
        self.cursor = self.duration * progress.clamp(0.0, 1.0);
    }

    pub fn finished(&self) -> bool {
        self.cursor >= self.duration
    }

    #[allow(dead_code)]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Current value of a track, or `default` if no tween touches it.
    ///
    /// When several tweens share a track, the latest-started one that has
    /// begun wins; before any has begun, the first tween's `from` applies.
    pub fn value(&self, track: usize, default: f32) -> f32 {
        let mut first: Option<&Tween> = None;
        let mut active: Option<&Tween> = None;
        for tween in self.tweens.iter().filter(|t| t.track == track) {
            if first.is_none_or(|f| tween.start < f.start) {
                first = Some(tween);
            }
            if tween.start <= self.cursor && active.is_none_or(|a| tween.start >= a.start) {
                active = Some(tween);
            }
        }
        match (active, first) {
            (Some(t), _) => t.value_at(self.cursor),
            (None, Some(f)) => f.from,
            (None, None) => default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_tweens_offset_each_other() {
        let tl = Timeline::new()
            .tween(0, (0.0, 1.0), 1.0, Ease::Linear, Position::After(0.0))
            .tween(1, (0.0, 1.0), 1.0, Ease::Linear, Position::After(0.25));
        assert_eq!(tl.duration(), 2.25);
    }

    #[test]
    fn with_previous_aligns_starts() {
        let mut tl = Timeline::new()
            .tween(0, (0.0, 10.0), 1.0, Ease::Linear, Position::After(0.0))
            .tween(1, (0.0, 10.0), 1.0, Ease::Linear, Position::WithPrevious);
        tl.seek(0.5 / tl.duration());
        assert!((tl.value(0, 0.0) - 5.0).abs() < 1e-4);
        assert!((tl.value(1, 0.0) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn stagger_spaces_tracks() {
        let mut tl =
            Timeline::new().stagger(0..4, (0.0, 1.0), 0.5, 0.25, Ease::Linear, Position::After(0.0));
        assert_eq!(tl.duration(), 0.5 + 0.25 * 3.0);
        tl.cursor = 0.5;
        assert_eq!(tl.value(0, 0.0), 1.0);
        assert!((tl.value(1, 0.0) - 0.5).abs() < 1e-4);
        // The last track has not started yet; it rests on its from-value.
        assert_eq!(tl.value(3, 0.0), 0.0);
    }

    #[test]
    fn step_runs_to_completion_and_stops() {
        let mut tl =
            Timeline::new().tween(0, (0.0, 1.0), 1.0, Ease::Linear, Position::After(0.0));
        assert!(tl.step(0.6));
        assert!(!tl.step(0.6));
        assert!(tl.finished());
        assert_eq!(tl.value(0, 0.0), 1.0);
        assert!(!tl.step(0.1));
    }

    #[test]
    fn value_before_first_tween_is_its_from() {
        let tl = Timeline::new().tween(2, (7.0, 9.0), 1.0, Ease::Linear, Position::After(5.0));
        assert_eq!(tl.value(2, 0.0), 7.0);
        assert_eq!(tl.value(3, 4.0), 4.0);
    }

    #[test]
    fn later_tween_on_same_track_wins_once_started() {
        let mut tl = Timeline::new()
            .tween(0, (0.0, 1.0), 1.0, Ease::Linear, Position::After(0.0))
            .tween(0, (1.0, 0.0), 1.0, Ease::Linear, Position::After(0.0));
        tl.seek(1.0);
        assert_eq!(tl.value(0, 0.5), 0.0);
    }

    #[test]
    fn scrub_is_reversible() {
        let mut tl =
            Timeline::new().tween(0, (0.0, 2.0), 1.0, Ease::Linear, Position::After(0.0));
        tl.seek(1.0);
        assert_eq!(tl.value(0, 0.0), 2.0);
        tl.seek(0.0);
        assert_eq!(tl.value(0, 0.0), 0.0);
    }
}
