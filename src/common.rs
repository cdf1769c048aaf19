use enum_iterator::{all, Sequence};
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Client slot number as used by the server
#[derive(Copy, Clone, Eq, PartialEq, Debug, Ord, PartialOrd, Hash)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Reserved id used as the killer for environmental deaths
    pub const WORLD: PlayerId = PlayerId(1022);

    pub fn is_world(self) -> bool {
        self == Self::WORLD
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for PlayerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(PlayerId)
    }
}

/// Cause of death, in the order the server numbers them
#[derive(Copy, Clone, Eq, PartialEq, Debug, Ord, PartialOrd, Hash, Sequence)]
pub enum MeanOfDeath {
    Unknown,
    Shotgun,
    Gauntlet,
    Machinegun,
    Grenade,
    GrenadeSplash,
    Rocket,
    RocketSplash,
    Plasma,
    PlasmaSplash,
    Railgun,
    Lightning,
    Bfg,
    BfgSplash,
    Water,
    Slime,
    Lava,
    Crush,
    Telefrag,
    Falling,
    Suicide,
    TargetLaser,
    TriggerHurt,
    Nail,
    Chaingun,
    ProximityMine,
    Kamikaze,
    Juiced,
    Grapple,
}

impl MeanOfDeath {
    pub const COUNT: usize = <MeanOfDeath as Sequence>::CARDINALITY;

    /// Look up a cause by its numeric code, `None` if the code is out of range
    pub fn from_code(code: u32) -> Option<Self> {
        all::<MeanOfDeath>().nth(usize::try_from(code).ok()?)
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MeanOfDeath::Unknown => "MOD_UNKNOWN",
            MeanOfDeath::Shotgun => "MOD_SHOTGUN",
            MeanOfDeath::Gauntlet => "MOD_GAUNTLET",
            MeanOfDeath::Machinegun => "MOD_MACHINEGUN",
            MeanOfDeath::Grenade => "MOD_GRENADE",
            MeanOfDeath::GrenadeSplash => "MOD_GRENADE_SPLASH",
            MeanOfDeath::Rocket => "MOD_ROCKET",
            MeanOfDeath::RocketSplash => "MOD_ROCKET_SPLASH",
            MeanOfDeath::Plasma => "MOD_PLASMA",
            MeanOfDeath::PlasmaSplash => "MOD_PLASMA_SPLASH",
            MeanOfDeath::Railgun => "MOD_RAILGUN",
            MeanOfDeath::Lightning => "MOD_LIGHTNING",
            MeanOfDeath::Bfg => "MOD_BFG",
            MeanOfDeath::BfgSplash => "MOD_BFG_SPLASH",
            MeanOfDeath::Water => "MOD_WATER",
            MeanOfDeath::Slime => "MOD_SLIME",
            MeanOfDeath::Lava => "MOD_LAVA",
            MeanOfDeath::Crush => "MOD_CRUSH",
            MeanOfDeath::Telefrag => "MOD_TELEFRAG",
            MeanOfDeath::Falling => "MOD_FALLING",
            MeanOfDeath::Suicide => "MOD_SUICIDE",
            MeanOfDeath::TargetLaser => "MOD_TARGET_LASER",
            MeanOfDeath::TriggerHurt => "MOD_TRIGGER_HURT",
            MeanOfDeath::Nail => "MOD_NAIL",
            MeanOfDeath::Chaingun => "MOD_CHAINGUN",
            MeanOfDeath::ProximityMine => "MOD_PROXIMITY_MINE",
            MeanOfDeath::Kamikaze => "MOD_KAMIKAZE",
            MeanOfDeath::Juiced => "MOD_JUICED",
            MeanOfDeath::Grapple => "MOD_GRAPPLE",
        }
    }
}

impl Display for MeanOfDeath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

impl FromStr for MeanOfDeath {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all::<MeanOfDeath>().find(|mean| mean.as_str() == s).ok_or(())
    }
}

impl Serialize for MeanOfDeath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[test]
fn test_mean_of_death_codes() {
    assert_eq!(29, MeanOfDeath::COUNT);
    assert_eq!(Some(MeanOfDeath::Unknown), MeanOfDeath::from_code(0));
    assert_eq!(Some(MeanOfDeath::TriggerHurt), MeanOfDeath::from_code(22));
    assert_eq!("MOD_TRIGGER_HURT", MeanOfDeath::TriggerHurt.as_str());
    assert_eq!("MOD_PROXIMITY_MINE", MeanOfDeath::from_code(25).unwrap().as_str());
    assert_eq!(Some(MeanOfDeath::Grapple), MeanOfDeath::from_code(28));
    assert_eq!(None, MeanOfDeath::from_code(29));
    assert_eq!(None, MeanOfDeath::from_code(u32::MAX));
}

#[test]
fn test_mean_of_death_round_trip_names() {
    for (code, mean) in all::<MeanOfDeath>().enumerate() {
        assert_eq!(code as u32, mean.code());
        assert_eq!(Ok(mean), mean.as_str().parse());
    }
    assert_eq!(Err(()), "MOD_RAILGUN_SPLASH".parse::<MeanOfDeath>());
}
