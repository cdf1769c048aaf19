use crate::common::{MeanOfDeath, PlayerId};
use crate::error::ParseError;
use crate::event::{first_field, parse_field, Event};
use crate::parsing::{skip_matches, split_once, take_until};

#[derive(Debug, PartialEq)]
pub struct ConnectEvent {
    pub id: PlayerId,
}

impl<'a> Event<'a> for ConnectEvent {
    fn parse(input: &'a str) -> Result<Self, ParseError> {
        let (_, id) = first_field(input)?;
        Ok(ConnectEvent { id })
    }
}

/// Userinfo update, only the display name (`n\<name>`) is extracted
#[derive(Debug, PartialEq)]
pub struct UserinfoChangedEvent<'a> {
    pub id: PlayerId,
    pub name: &'a str,
}

impl<'a> Event<'a> for UserinfoChangedEvent<'a> {
    fn parse(input: &'a str) -> Result<Self, ParseError> {
        let (input, id) = first_field(input)?;
        let input = skip_matches(input, "n\\")?;
        let (_, name) = take_until(input, b'\\');
        if name.is_empty() {
            return Err(ParseError::Malformed);
        }
        Ok(UserinfoChangedEvent { id, name })
    }
}

#[derive(Debug, PartialEq)]
pub struct DisconnectEvent {
    pub id: PlayerId,
}

impl<'a> Event<'a> for DisconnectEvent {
    fn parse(input: &'a str) -> Result<Self, ParseError> {
        let (_, id) = first_field(input)?;
        Ok(DisconnectEvent { id })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KillerId {
    World,
    Player(PlayerId),
}

impl From<PlayerId> for KillerId {
    fn from(id: PlayerId) -> Self {
        if id.is_world() {
            KillerId::World
        } else {
            KillerId::Player(id)
        }
    }
}

/// `<killer> <victim> <cause>: <human readable description>`
#[derive(Debug, PartialEq)]
pub struct KillEvent {
    pub killer: KillerId,
    pub victim: PlayerId,
    pub mean_of_death: MeanOfDeath,
}

impl<'a> Event<'a> for KillEvent {
    fn parse(input: &'a str) -> Result<Self, ParseError> {
        let (input, killer) = first_field::<PlayerId>(input)?;
        let (input, victim) = first_field(input)?;
        let (mean_of_death, _) = split_once(input, b':', 1)?;
        Ok(KillEvent {
            killer: killer.into(),
            victim,
            mean_of_death: parse_field(mean_of_death)?,
        })
    }
}
