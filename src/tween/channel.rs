use smallvec::SmallVec;

/// Target or start values for one tween, one entry per channel.
pub type ChannelValues = SmallVec<[f64; 4]>;

/// The animatable property a tween drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ChannelKind {
    Alpha,
    Color,
    ColorAndAlpha,
    FillAmount,

    PositionX,
    PositionY,
    PositionZ,
    PositionXY,
    PositionXZ,
    PositionYZ,
    PositionXYZ,

    RotationX,
    RotationY,
    RotationZ,
    RotationXY,
    RotationXZ,
    RotationYZ,
    RotationXYZ,

    ScaleX,
    ScaleY,
    ScaleZ,
    ScaleXY,
    ScaleXZ,
    ScaleYZ,
    ScaleXYZ,
}

/// Every name a tween call may use, short and long forms side by side.
const CHANNEL_NAMES: &[(&str, ChannelKind)] = &[
    ("A", ChannelKind::Alpha),
    ("Alpha", ChannelKind::Alpha),
    ("C", ChannelKind::Color),
    ("Color", ChannelKind::Color),
    ("CA", ChannelKind::ColorAndAlpha),
    ("ColorAndAlpha", ChannelKind::ColorAndAlpha),
    ("FillAmount", ChannelKind::FillAmount),
    ("P", ChannelKind::PositionXY),
    ("Position", ChannelKind::PositionXY),
    ("P3", ChannelKind::PositionXYZ),
    ("Position3D", ChannelKind::PositionXYZ),
    ("X", ChannelKind::PositionX),
    ("PositionX", ChannelKind::PositionX),
    ("Y", ChannelKind::PositionY),
    ("PositionY", ChannelKind::PositionY),
    ("Z", ChannelKind::PositionZ),
    ("PositionZ", ChannelKind::PositionZ),
    ("XY", ChannelKind::PositionXY),
    ("PositionXY", ChannelKind::PositionXY),
    ("XZ", ChannelKind::PositionXZ),
    ("PositionXZ", ChannelKind::PositionXZ),
    ("YZ", ChannelKind::PositionYZ),
    ("PositionYZ", ChannelKind::PositionYZ),
    ("XYZ", ChannelKind::PositionXYZ),
    ("PositionXYZ", ChannelKind::PositionXYZ),
    ("R", ChannelKind::RotationZ),
    ("Rotation", ChannelKind::RotationZ),
    ("R3", ChannelKind::RotationXYZ),
    ("Rotation3D", ChannelKind::RotationXYZ),
    ("RX", ChannelKind::RotationX),
    ("RotationX", ChannelKind::RotationX),
    ("RY", ChannelKind::RotationY),
    ("RotationY", ChannelKind::RotationY),
    ("RZ", ChannelKind::RotationZ),
    ("RotationZ", ChannelKind::RotationZ),
    ("RXY", ChannelKind::RotationXY),
    ("RotationXY", ChannelKind::RotationXY),
    ("RXZ", ChannelKind::RotationXZ),
    ("RotationXZ", ChannelKind::RotationXZ),
    ("RYZ", ChannelKind::RotationYZ),
    ("RotationYZ", ChannelKind::RotationYZ),
    ("RXYZ", ChannelKind::RotationXYZ),
    ("RotationXYZ", ChannelKind::RotationXYZ),
    ("S", ChannelKind::ScaleXY),
    ("Scale", ChannelKind::ScaleXY),
    ("S3", ChannelKind::ScaleXYZ),
    ("Scale3D", ChannelKind::ScaleXYZ),
    ("SX", ChannelKind::ScaleX),
    ("ScaleX", ChannelKind::ScaleX),
    ("SY", ChannelKind::ScaleY),
    ("ScaleY", ChannelKind::ScaleY),
    ("SZ", ChannelKind::ScaleZ),
    ("ScaleZ", ChannelKind::ScaleZ),
    ("SXY", ChannelKind::ScaleXY),
    ("ScaleXY", ChannelKind::ScaleXY),
    ("SXZ", ChannelKind::ScaleXZ),
    ("ScaleXZ", ChannelKind::ScaleXZ),
    ("SYZ", ChannelKind::ScaleYZ),
    ("ScaleYZ", ChannelKind::ScaleYZ),
    ("SXYZ", ChannelKind::ScaleXYZ),
    ("ScaleXYZ", ChannelKind::ScaleXYZ),
];

impl ChannelKind {
    pub fn from_name(name: &str) -> Option<Self> {
        CHANNEL_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|&(_, kind)| kind)
    }

    pub fn is_valid_name(name: &str) -> bool {
        Self::from_name(name).is_some()
    }

    /// All accepted call names.
    pub fn names() -> impl Iterator<Item = &'static str> {
        CHANNEL_NAMES.iter().map(|&(n, _)| n)
    }

    /// Number of scalar channels, in `1..=4`.
    pub fn width(self) -> usize {
        match self {
            Self::Alpha
            | Self::FillAmount
            | Self::PositionX
            | Self::PositionY
            | Self::PositionZ
            | Self::RotationX
            | Self::RotationY
            | Self::RotationZ
            | Self::ScaleX
            | Self::ScaleY
            | Self::ScaleZ => 1,
            Self::PositionXY
            | Self::PositionXZ
            | Self::PositionYZ
            | Self::RotationXY
            | Self::RotationXZ
            | Self::RotationYZ
            | Self::ScaleXY
            | Self::ScaleXZ
            | Self::ScaleYZ => 2,
            Self::Color | Self::PositionXYZ | Self::RotationXYZ | Self::ScaleXYZ => 3,
            Self::ColorAndAlpha => 4,
        }
    }

    /// Long-form name, e.g. `PositionXY`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Alpha => "Alpha",
            Self::Color => "Color",
            Self::ColorAndAlpha => "ColorAndAlpha",
            Self::FillAmount => "FillAmount",
            Self::PositionX => "PositionX",
            Self::PositionY => "PositionY",
            Self::PositionZ => "PositionZ",
            Self::PositionXY => "PositionXY",
            Self::PositionXZ => "PositionXZ",
            Self::PositionYZ => "PositionYZ",
            Self::PositionXYZ => "PositionXYZ",
            Self::RotationX => "RotationX",
            Self::RotationY => "RotationY",
            Self::RotationZ => "RotationZ",
            Self::RotationXY => "RotationXY",
            Self::RotationXZ => "RotationXZ",
            Self::RotationYZ => "RotationYZ",
            Self::RotationXYZ => "RotationXYZ",
            Self::ScaleX => "ScaleX",
            Self::ScaleY => "ScaleY",
            Self::ScaleZ => "ScaleZ",
            Self::ScaleXY => "ScaleXY",
            Self::ScaleXZ => "ScaleXZ",
            Self::ScaleYZ => "ScaleYZ",
            Self::ScaleXYZ => "ScaleXYZ",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_names_agree() {
        for (short, long) in [
            ("X", "PositionX"),
            ("Z", "PositionZ"),
            ("RZ", "RotationZ"),
            ("SZ", "ScaleZ"),
            ("S", "Scale"),
            ("C", "Color"),
            ("CA", "ColorAndAlpha"),
            ("R", "Rotation"),
            ("P3", "Position3D"),
        ] {
            assert_eq!(
                ChannelKind::from_name(short),
                ChannelKind::from_name(long),
                "{short} vs {long}"
            );
            assert!(ChannelKind::from_name(short).is_some());
        }
    }

    #[test]
    fn single_axis_names_map_to_their_own_axis() {
        assert_eq!(ChannelKind::from_name("Z"), Some(ChannelKind::PositionZ));
        assert_eq!(ChannelKind::from_name("RZ"), Some(ChannelKind::RotationZ));
        assert_eq!(ChannelKind::from_name("SZ"), Some(ChannelKind::ScaleZ));
    }

    #[test]
    fn long_name_round_trips() {
        for name in ChannelKind::names() {
            let kind = ChannelKind::from_name(name).unwrap();
            assert_eq!(ChannelKind::from_name(kind.name()), Some(kind));
        }
    }

    #[test]
    fn widths() {
        assert_eq!(ChannelKind::Alpha.width(), 1);
        assert_eq!(ChannelKind::ScaleXY.width(), 2);
        assert_eq!(ChannelKind::Color.width(), 3);
        assert_eq!(ChannelKind::ColorAndAlpha.width(), 4);
        assert!(!ChannelKind::is_valid_name("Opacity"));
        assert!(!ChannelKind::is_valid_name("x"));
    }
}
