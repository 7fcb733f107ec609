use std::f64::consts::PI;

/// Easing curve shape, independent of direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EaseFamily {
    Back,
    Bounce,
    Circular,
    Cubic,
    Elastic,
    Exponential,
    Quadratic,
    Quartic,
    Quintic,
    Sine,
}

/// Which half of the progress range the curve's acceleration lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EaseMode {
    In,
    Out,
    InOut,
    OutIn,
}

/// A named easing curve, e.g. `EaseOutBack`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Ease {
    pub family: EaseFamily,
    pub mode: EaseMode,
}

// Longer prefixes first: `InOut` must win over `In`.
const MODE_NAMES: &[(&str, EaseMode)] = &[
    ("InOut", EaseMode::InOut),
    ("OutIn", EaseMode::OutIn),
    ("In", EaseMode::In),
    ("Out", EaseMode::Out),
];

const FAMILY_NAMES: &[(&str, EaseFamily)] = &[
    ("Back", EaseFamily::Back),
    ("Bounce", EaseFamily::Bounce),
    ("Circular", EaseFamily::Circular),
    ("Circ", EaseFamily::Circular),
    ("Cubic", EaseFamily::Cubic),
    ("Elastic", EaseFamily::Elastic),
    ("Exponential", EaseFamily::Exponential),
    ("Expo", EaseFamily::Exponential),
    ("Quadratic", EaseFamily::Quadratic),
    ("Quad", EaseFamily::Quadratic),
    ("Quartic", EaseFamily::Quartic),
    ("Quart", EaseFamily::Quartic),
    ("Quintic", EaseFamily::Quintic),
    ("Quint", EaseFamily::Quintic),
    ("Sine", EaseFamily::Sine),
];

const BACK_OVERSHOOT: f64 = 1.70158;
const ELASTIC_PERIOD: f64 = 0.3;

impl Ease {
    pub const fn new(family: EaseFamily, mode: EaseMode) -> Self {
        Self { family, mode }
    }

    /// Look up a method name such as `EaseInOutQuad`.
    pub fn from_name(name: &str) -> Option<Self> {
        let rest = name.strip_prefix("Ease")?;
        let (mode, rest) = MODE_NAMES
            .iter()
            .find_map(|&(m, mode)| rest.strip_prefix(m).map(|r| (mode, r)))?;
        let family = FAMILY_NAMES
            .iter()
            .find(|&&(f, _)| f == rest)
            .map(|&(_, family)| family)?;
        Some(Self { family, mode })
    }

    pub fn is_valid_name(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// Every accepted method name, aliases included.
    pub fn names() -> impl Iterator<Item = String> {
        MODE_NAMES.iter().flat_map(|&(m, _)| {
            FAMILY_NAMES
                .iter()
                .map(move |&(f, _)| format!("Ease{m}{f}"))
        })
    }

    /// Canonical long-form method name.
    pub fn name(self) -> String {
        let mode = match self.mode {
            EaseMode::In => "In",
            EaseMode::Out => "Out",
            EaseMode::InOut => "InOut",
            EaseMode::OutIn => "OutIn",
        };
        let family = match self.family {
            EaseFamily::Back => "Back",
            EaseFamily::Bounce => "Bounce",
            EaseFamily::Circular => "Circular",
            EaseFamily::Cubic => "Cubic",
            EaseFamily::Elastic => "Elastic",
            EaseFamily::Exponential => "Exponential",
            EaseFamily::Quadratic => "Quadratic",
            EaseFamily::Quartic => "Quartic",
            EaseFamily::Quintic => "Quintic",
            EaseFamily::Sine => "Sine",
        };
        format!("Ease{mode}{family}")
    }

    /// Apply this easing function to normalized progress `t` in `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        let f = self.family;
        match self.mode {
            EaseMode::In => ease_in(f, t),
            EaseMode::Out => ease_out(f, t),
            EaseMode::InOut => {
                if t < 0.5 {
                    ease_in(f, 2.0 * t) / 2.0
                } else {
                    1.0 - ease_in(f, 2.0 - 2.0 * t) / 2.0
                }
            }
            EaseMode::OutIn => {
                if t < 0.5 {
                    ease_out(f, 2.0 * t) / 2.0
                } else {
                    0.5 + ease_in(f, 2.0 * t - 1.0) / 2.0
                }
            }
        }
    }
}

fn ease_out(f: EaseFamily, t: f64) -> f64 {
    1.0 - ease_in(f, 1.0 - t)
}

fn ease_in(f: EaseFamily, t: f64) -> f64 {
    match f {
        EaseFamily::Back => t * t * ((BACK_OVERSHOOT + 1.0) * t - BACK_OVERSHOOT),
        EaseFamily::Bounce => 1.0 - bounce_out(1.0 - t),
        EaseFamily::Circular => 1.0 - (1.0 - t * t).max(0.0).sqrt(),
        EaseFamily::Cubic => t.powi(3),
        EaseFamily::Elastic => {
            if t <= 0.0 || t >= 1.0 {
                return t.clamp(0.0, 1.0);
            }
            let s = ELASTIC_PERIOD / 4.0;
            let u = t - 1.0;
            -(2f64.powf(10.0 * u)) * ((u - s) * (2.0 * PI) / ELASTIC_PERIOD).sin()
        }
        EaseFamily::Exponential => {
            if t <= 0.0 {
                0.0
            } else {
                2f64.powf(10.0 * (t - 1.0))
            }
        }
        EaseFamily::Quadratic => t * t,
        EaseFamily::Quartic => t.powi(4),
        EaseFamily::Quintic => t.powi(5),
        EaseFamily::Sine => 1.0 - (t * PI / 2.0).cos(),
    }
}

fn bounce_out(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}
