//! Easing functions mapping a linear progress value in `[0, 1]` to an
//! eased value.
//!
//! Each family lives in its own module with `ease_in`, `ease_out` and
//! `ease_in_out` variants, e.g. `ease::cubic::ease_in_out`. The `back`
//! and `elastic` families intentionally overshoot outside `[0, 1]`.

use log::warn;

/// Easing function.
pub type EaseFn = fn(t: f32) -> f32;

#[inline]
pub fn linear(t: f32) -> f32 {
    t
}

macro_rules! power_ease {
    ($name:ident, $power:expr) => {
        pub mod $name {
            pub fn ease_in(t: f32) -> f32 {
                t.powi($power)
            }

            pub fn ease_out(t: f32) -> f32 {
                1.0 - (1.0 - t).powi($power)
            }

            pub fn ease_in_out(t: f32) -> f32 {
                if t < 0.5 {
                    f32::powi(2.0, $power - 1) * t.powi($power)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi($power) / 2.0
                }
            }
        }
    };
}

power_ease!(quad, 2);
power_ease!(cubic, 3);
power_ease!(quart, 4);
power_ease!(quint, 5);

pub mod sine {
    use core::f32::consts::PI;

    pub fn ease_in(t: f32) -> f32 {
        1.0 - (t * PI / 2.0).cos()
    }

    pub fn ease_out(t: f32) -> f32 {
        (t * PI / 2.0).sin()
    }

    pub fn ease_in_out(t: f32) -> f32 {
        -((PI * t).cos() - 1.0) / 2.0
    }
}

pub mod expo {
    pub fn ease_in(t: f32) -> f32 {
        if t == 0.0 {
            0.0
        } else {
            f32::powf(2.0, 10.0 * t - 10.0)
        }
    }

    pub fn ease_out(t: f32) -> f32 {
        if t == 1.0 {
            1.0
        } else {
            1.0 - f32::powf(2.0, -10.0 * t)
        }
    }

    pub fn ease_in_out(t: f32) -> f32 {
        if t == 0.0 {
            0.0
        } else if t == 1.0 {
            1.0
        } else if t < 0.5 {
            f32::powf(2.0, 20.0 * t - 10.0) / 2.0
        } else {
            (2.0 - f32::powf(2.0, -20.0 * t + 10.0)) / 2.0
        }
    }
}

pub mod circ {
    pub fn ease_in(t: f32) -> f32 {
        1.0 - (1.0 - t * t).sqrt()
    }

    pub fn ease_out(t: f32) -> f32 {
        (1.0 - (t - 1.0) * (t - 1.0)).sqrt()
    }

    pub fn ease_in_out(t: f32) -> f32 {
        if t < 0.5 {
            (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
        } else {
            ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
        }
    }
}

pub mod back {
    const C1: f32 = 1.70158;
    const C2: f32 = C1 * 1.525;
    const C3: f32 = C1 + 1.0;

    pub fn ease_in(t: f32) -> f32 {
        C3 * t * t * t - C1 * t * t
    }

    pub fn ease_out(t: f32) -> f32 {
        1.0 + C3 * (t - 1.0).powi(3) + C1 * (t - 1.0).powi(2)
    }

    pub fn ease_in_out(t: f32) -> f32 {
        if t < 0.5 {
            ((2.0 * t).powi(2) * ((C2 + 1.0) * 2.0 * t - C2)) / 2.0
        } else {
            ((2.0 * t - 2.0).powi(2)
                * ((C2 + 1.0) * (t * 2.0 - 2.0) + C2)
                + 2.0)
                / 2.0
        }
    }
}

pub mod elastic {
    use core::f32::consts::PI;

    const C4: f32 = (2.0 * PI) / 3.0;
    const C5: f32 = (2.0 * PI) / 4.5;

    pub fn ease_in(t: f32) -> f32 {
        if t == 0.0 {
            0.0
        } else if t == 1.0 {
            1.0
        } else {
            -f32::powf(2.0, 10.0 * t - 10.0)
                * ((t * 10.0 - 10.75) * C4).sin()
        }
    }

    pub fn ease_out(t: f32) -> f32 {
        if t == 0.0 {
            0.0
        } else if t == 1.0 {
            1.0
        } else {
            f32::powf(2.0, -10.0 * t) * ((t * 10.0 - 0.75) * C4).sin()
                + 1.0
        }
    }

    pub fn ease_in_out(t: f32) -> f32 {
        if t == 0.0 {
            0.0
        } else if t == 1.0 {
            1.0
        } else if t < 0.5 {
            -(f32::powf(2.0, 20.0 * t - 10.0)
                * ((20.0 * t - 11.125) * C5).sin())
                / 2.0
        } else {
            f32::powf(2.0, -20.0 * t + 10.0)
                * ((20.0 * t - 11.125) * C5).sin()
                / 2.0
                + 1.0
        }
    }
}

/// A named easing curve, resolvable from the names used in tour
/// definitions.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum EaseKind {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    QuartIn,
    QuartOut,
    QuartInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    SineIn,
    SineOut,
    SineInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    CircIn,
    CircOut,
    CircInOut,
    BackIn,
    BackOut,
    BackInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
}

impl EaseKind {
    /// Resolve the underlying easing function.
    pub fn function(self) -> EaseFn {
        match self {
            Self::Linear => linear,
            Self::QuadIn => quad::ease_in,
            Self::QuadOut => quad::ease_out,
            Self::QuadInOut => quad::ease_in_out,
            Self::CubicIn => cubic::ease_in,
            Self::CubicOut => cubic::ease_out,
            Self::CubicInOut => cubic::ease_in_out,
            Self::QuartIn => quart::ease_in,
            Self::QuartOut => quart::ease_out,
            Self::QuartInOut => quart::ease_in_out,
            Self::QuintIn => quint::ease_in,
            Self::QuintOut => quint::ease_out,
            Self::QuintInOut => quint::ease_in_out,
            Self::SineIn => sine::ease_in,
            Self::SineOut => sine::ease_out,
            Self::SineInOut => sine::ease_in_out,
            Self::ExpoIn => expo::ease_in,
            Self::ExpoOut => expo::ease_out,
            Self::ExpoInOut => expo::ease_in_out,
            Self::CircIn => circ::ease_in,
            Self::CircOut => circ::ease_out,
            Self::CircInOut => circ::ease_in_out,
            Self::BackIn => back::ease_in,
            Self::BackOut => back::ease_out,
            Self::BackInOut => back::ease_in_out,
            Self::ElasticIn => elastic::ease_in,
            Self::ElasticOut => elastic::ease_out,
            Self::ElasticInOut => elastic::ease_in_out,
        }
    }

    /// Apply the curve to a progress value.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        (self.function())(t)
    }

    /// Look up a curve by the name a tour definition carries.
    ///
    /// Unknown names fall back to [`EaseKind::Linear`] with a warning;
    /// an animation must never hard-fail over a bad easing name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "linear" => Self::Linear,
            "easeInQuad" => Self::QuadIn,
            "easeOutQuad" => Self::QuadOut,
            "easeInOutQuad" => Self::QuadInOut,
            "easeInCubic" => Self::CubicIn,
            "easeOutCubic" => Self::CubicOut,
            "easeInOutCubic" => Self::CubicInOut,
            "easeInQuart" => Self::QuartIn,
            "easeOutQuart" => Self::QuartOut,
            "easeInOutQuart" => Self::QuartInOut,
            "easeInQuint" => Self::QuintIn,
            "easeOutQuint" => Self::QuintOut,
            "easeInOutQuint" => Self::QuintInOut,
            "easeInSine" => Self::SineIn,
            "easeOutSine" => Self::SineOut,
            "easeInOutSine" => Self::SineInOut,
            "easeInExpo" => Self::ExpoIn,
            "easeOutExpo" => Self::ExpoOut,
            "easeInOutExpo" => Self::ExpoInOut,
            "easeInCirc" => Self::CircIn,
            "easeOutCirc" => Self::CircOut,
            "easeInOutCirc" => Self::CircInOut,
            "easeInBack" => Self::BackIn,
            "easeOutBack" => Self::BackOut,
            "easeInOutBack" => Self::BackInOut,
            "easeInElastic" => Self::ElasticIn,
            "easeOutElastic" => Self::ElasticOut,
            "easeInOutElastic" => Self::ElasticInOut,
            _ => {
                warn!(
                    "unknown easing name {name:?}, falling back to linear"
                );
                Self::Linear
            }
        }
    }

    /// The canonical name for this curve.
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::QuadIn => "easeInQuad",
            Self::QuadOut => "easeOutQuad",
            Self::QuadInOut => "easeInOutQuad",
            Self::CubicIn => "easeInCubic",
            Self::CubicOut => "easeOutCubic",
            Self::CubicInOut => "easeInOutCubic",
            Self::QuartIn => "easeInQuart",
            Self::QuartOut => "easeOutQuart",
            Self::QuartInOut => "easeInOutQuart",
            Self::QuintIn => "easeInQuint",
            Self::QuintOut => "easeOutQuint",
            Self::QuintInOut => "easeInOutQuint",
            Self::SineIn => "easeInSine",
            Self::SineOut => "easeOutSine",
            Self::SineInOut => "easeInOutSine",
            Self::ExpoIn => "easeInExpo",
            Self::ExpoOut => "easeOutExpo",
            Self::ExpoInOut => "easeInOutExpo",
            Self::CircIn => "easeInCirc",
            Self::CircOut => "easeOutCirc",
            Self::CircInOut => "easeInOutCirc",
            Self::BackIn => "easeInBack",
            Self::BackOut => "easeOutBack",
            Self::BackInOut => "easeInOutBack",
            Self::ElasticIn => "easeInElastic",
            Self::ElasticOut => "easeOutElastic",
            Self::ElasticInOut => "easeInOutElastic",
        }
    }
}

impl From<String> for EaseKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<EaseKind> for String {
    fn from(kind: EaseKind) -> Self {
        kind.name().to_owned()
    }
}
