/// Easing curves used by the page and camera animations.
///
/// The set mirrors the curves the authored timelines actually use:
/// quadratic for camera scrubbing and the transition mask, exponential
/// and back for page reveals, bounce and elastic for the about-page
/// timeline decorations.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InExpo,
    OutExpo,
    InBack,
    OutBounce,
    OutElastic,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Self::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * t - 10.0)
                }
            }
            Self::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            Self::InBack => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                C3 * t * t * t - C1 * t * t
            }
            Self::OutBounce => {
                const N1: f32 = 7.5625;
                const D1: f32 = 2.75;
                if t < 1.0 / D1 {
                    N1 * t * t
                } else if t < 2.0 / D1 {
                    let t = t - 1.5 / D1;
                    N1 * t * t + 0.75
                } else if t < 2.5 / D1 {
                    let t = t - 2.25 / D1;
                    N1 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / D1;
                    N1 * t * t + 0.984375
                }
            }
            Self::OutElastic => {
                const C4: f32 = std::f32::consts::TAU / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2.0_f32.powf(-10.0 * t) * ((t * 10.0 - 0.75) * C4).sin() + 1.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 9] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InExpo,
        Ease::OutExpo,
        Ease::InBack,
        Ease::OutBounce,
        Ease::OutElastic,
    ];

    #[test]
    fn endpoints_are_stable() {
        for ease in ALL {
            assert!((ease.apply(0.0)).abs() < 1e-5, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-5, "{ease:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        for ease in ALL {
            assert_eq!(ease.apply(-2.0), ease.apply(0.0));
            assert_eq!(ease.apply(3.0), ease.apply(1.0));
        }
    }

    #[test]
    fn monotonic_spot_check() {
        // Only the non-overshooting curves are monotonic.
        for ease in [
            Ease::Linear,
            Ease::InQuad,
            Ease::OutQuad,
            Ease::InOutQuad,
            Ease::InExpo,
            Ease::OutExpo,
        ] {
            let a = ease.apply(0.25);
            let b = ease.apply(0.5);
            let c = ease.apply(0.75);
            assert!(a < b, "{ease:?}");
            assert!(b < c, "{ease:?}");
        }
    }

    #[test]
    fn back_in_overshoots_negative() {
        assert!(Ease::InBack.apply(0.3) < 0.0);
    }
}
