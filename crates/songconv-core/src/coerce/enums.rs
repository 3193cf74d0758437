use strum::{EnumString, FromRepr, IntoStaticStr};

/// An engine enum that can be read from a symbolic name or its numeric value.
pub trait EnumTable: Copy + std::str::FromStr + 'static {
    fn from_value(value: i64) -> Option<Self>;
    fn value(self) -> i64;
}

macro_rules! enum_table {
    ($name:ident, $repr:ty) => {
        impl EnumTable for $name {
            fn from_value(value: i64) -> Option<Self> {
                <$repr>::try_from(value).ok().and_then(Self::from_repr)
            }

            fn value(self) -> i64 {
                self as i64
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let name: &'static str = self.into();
                write!(f, "{}", name)
            }
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumString, IntoStaticStr)]
#[repr(u8)]
pub enum Difficulty {
    #[strum(serialize = "NA")]
    Na = 0,
    Easy = 1,
    Normal = 2,
    Hard = 3,
    Extreme = 4,
}
enum_table!(Difficulty, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumString, IntoStaticStr)]
#[repr(u8)]
pub enum SweatDifficulty {
    Low = 1,
    Medium = 2,
    High = 3,
}
enum_table!(SweatDifficulty, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumString, IntoStaticStr)]
#[repr(u8)]
pub enum NumCoach {
    #[strum(serialize = "NA")]
    Na = 0,
    Solo = 1,
    Duo = 2,
    Trio = 3,
    Quatuor = 4,
    Quintet = 5,
    Sextet = 6,
}
enum_table!(NumCoach, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumString, IntoStaticStr)]
#[repr(u8)]
pub enum GameModeFlags {
    None = 0,
    Classic = 1,
    Mashup = 2,
    PartyMaster = 3,
    Sweat = 4,
    Battle = 5,
    OnStage = 6,
    MusicMotion = 7,
}
enum_table!(GameModeFlags, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumString, IntoStaticStr)]
#[repr(u8)]
pub enum GameModeStatus {
    Unavailable = 0,
    Hidden = 1,
    Locked = 2,
    Available = 3,
}
enum_table!(GameModeStatus, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumString, IntoStaticStr)]
#[repr(u8)]
pub enum GameMode {
    Classic = 0,
    Mashup = 1,
    PartyMaster = 2,
    Sweat = 3,
    Battle = 4,
    OnStage = 5,
    MusicMotion = 6,
}
enum_table!(GameMode, u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumString, IntoStaticStr)]
#[repr(i8)]
pub enum LyricsType {
    None = -1,
    OldSystem = 0,
    Classic = 1,
    OnStage = 2,
    WorldDanceFloor = 3,
}
enum_table!(LyricsType, i8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromRepr, EnumString, IntoStaticStr)]
#[repr(u8)]
pub enum BackgroundType {
    OldSystem = 0,
    Graph = 1,
    OnStage = 2,
    Sweat = 3,
    Extreme = 4,
    #[strum(serialize = "CMU")]
    Cmu = 5,
}
enum_table!(BackgroundType, u8);
