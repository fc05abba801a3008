use crate::anim::{Ease, Position, Timeline};

pub const BANNER_COUNT: usize = 4;
const BANNER_DURATION: f32 = 0.5;
const BANNER_STAGGER: f32 = 0.25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Projects,
    Contact,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::About, Route::Projects, Route::Contact];

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Contact => "Contact",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Projects => "/projects",
            Self::Contact => "/contact",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    AnimatingOut,
    Navigating,
    AnimatingIn,
}

/// What the driver asks of its caller after a step.
#[derive(Debug, PartialEq, Eq)]
pub enum TransitionEvent {
    None,
    /// The mask fully covers the viewport; perform the route change now.
    Commit(Route),
}

/// Masked page transitions.
///
/// On a navigation request the four banner panels sweep down to cover
/// the viewport (staggered), the route change happens only once they
/// fully cover it, and the reverse sweep plays over the new page.
/// Requests arriving while a transition is in flight are ignored until
/// the driver is idle again; requesting the current route is a no-op.
/// The in-sweep always runs to completion, so the mask can never stay
/// parked over the viewport.
pub struct PageTransition {
    current: Route,
    phase: Phase,
    pending: Option<Route>,
    timeline: Timeline,
}

impl PageTransition {
    pub fn new(initial: Route) -> Self {
        Self {
            current: initial,
            phase: Phase::Idle,
            pending: None,
            timeline: Timeline::new(),
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Ask to navigate. Returns true when the request was accepted.
    pub fn request(&mut self, route: Route) -> bool {
        if self.phase != Phase::Idle {
            log::debug!("navigation to {} ignored mid-transition", route.path());
            return false;
        }
        if route == self.current {
            return false;
        }
        self.pending = Some(route);
        self.phase = Phase::AnimatingOut;
        // Panels start above the viewport (-1) and sweep to cover (0).
        self.timeline = Timeline::new().stagger(
            0..BANNER_COUNT,
            (-1.0, 0.0),
            BANNER_DURATION,
            BANNER_STAGGER,
            Ease::InOutQuad,
            Position::After(0.0),
        );
        true
    }

    /// Advance the mask animation.
    pub fn step(&mut self, dt: f32) -> TransitionEvent {
        match self.phase {
            Phase::Idle | Phase::Navigating => TransitionEvent::None,
            Phase::AnimatingOut => {
                if !self.timeline.step(dt) {
                    self.phase = Phase::Navigating;
                    // Pending is always set on this path; guard anyway.
                    match self.pending {
                        Some(route) => TransitionEvent::Commit(route),
                        None => {
                            self.phase = Phase::Idle;
                            TransitionEvent::None
                        }
                    }
                } else {
                    TransitionEvent::None
                }
            }
            Phase::AnimatingIn => {
                if !self.timeline.step(dt) {
                    self.phase = Phase::Idle;
                }
                TransitionEvent::None
            }
        }
    }

    /// The caller swapped the page; play the reveal sweep over it.
    pub fn finish_navigation(&mut self) {
        if self.phase != Phase::Navigating {
            return;
        }
        if let Some(route) = self.pending.take() {
            self.current = route;
        }
        self.phase = Phase::AnimatingIn;
        // Covering (0) down and away (+1), same stagger.
        self.timeline = Timeline::new().stagger(
            0..BANNER_COUNT,
            (0.0, 1.0),
            BANNER_DURATION,
            BANNER_STAGGER,
            Ease::InOutQuad,
            Position::After(0.0),
        );
    }

    /// Vertical offset of a banner panel in viewport heights:
    /// -1 fully above, 0 covering, +1 fully below. None while idle.
    pub fn banner_offset(&self, index: usize) -> Option<f32> {
        if self.phase == Phase::Idle || index >= BANNER_COUNT {
            return None;
        }
        let resting = match self.phase {
            Phase::Navigating => 0.0,
            _ => -1.0,
        };
        Some(self.timeline.value(index, resting))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_commit(driver: &mut PageTransition) -> Route {
        for _ in 0..600 {
            if let TransitionEvent::Commit(route) = driver.step(0.016) {
                return route;
            }
        }
        panic!("transition never committed");
    }

    fn run_until_idle(driver: &mut PageTransition) {
        for _ in 0..600 {
            driver.step(0.016);
            if driver.is_idle() {
                return;
            }
        }
        panic!("transition never settled");
    }

    #[test]
    fn full_cycle_returns_to_idle() {
        let mut driver = PageTransition::new(Route::Home);
        assert!(driver.request(Route::About));
        assert_eq!(driver.current(), Route::Home);

        let committed = run_until_commit(&mut driver);
        assert_eq!(committed, Route::About);
        // Route only changes after the caller acknowledges.
        assert_eq!(driver.current(), Route::Home);

        driver.finish_navigation();
        assert_eq!(driver.current(), Route::About);
        assert!(!driver.is_idle());
        run_until_idle(&mut driver);
    }

    #[test]
    fn requests_mid_transition_are_ignored() {
        let mut driver = PageTransition::new(Route::Home);
        assert!(driver.request(Route::About));
        driver.step(0.016);
        assert!(!driver.request(Route::Contact));
        let committed = run_until_commit(&mut driver);
        assert_eq!(committed, Route::About);
    }

    #[test]
    fn requesting_current_route_is_a_no_op() {
        let mut driver = PageTransition::new(Route::Projects);
        assert!(!driver.request(Route::Projects));
        assert!(driver.is_idle());
    }

    #[test]
    fn mask_fully_covers_before_commit() {
        let mut driver = PageTransition::new(Route::Home);
        driver.request(Route::Contact);
        run_until_commit(&mut driver);
        for i in 0..BANNER_COUNT {
            let offset = driver.banner_offset(i).unwrap();
            assert!(offset.abs() < 1e-4, "banner {i} at {offset}");
        }
    }

    #[test]
    fn banners_stagger_during_sweep() {
        let mut driver = PageTransition::new(Route::Home);
        driver.request(Route::About);
        driver.step(0.3);
        let first = driver.banner_offset(0).unwrap();
        let last = driver.banner_offset(3).unwrap();
        assert!(first > last, "first {first} last {last}");
    }

    #[test]
    fn no_mask_while_idle() {
        let driver = PageTransition::new(Route::Home);
        assert_eq!(driver.banner_offset(0), None);
    }

    #[test]
    fn reveal_sweep_moves_banners_below_viewport() {
        let mut driver = PageTransition::new(Route::Home);
        driver.request(Route::About);
        run_until_commit(&mut driver);
        driver.finish_navigation();
        run_until_idle(&mut driver);
        // Idle again: mask gone entirely.
        assert_eq!(driver.banner_offset(0), None);
    }

    #[test]
    fn navigation_usable_again_after_cycle() {
        let mut driver = PageTransition::new(Route::Home);
        driver.request(Route::About);
        run_until_commit(&mut driver);
        driver.finish_navigation();
        run_until_idle(&mut driver);
        assert!(driver.request(Route::Home));
    }
}
