mod player;

use crate::common::{MeanOfDeath, PlayerId};
use crate::error::{ParseError, Result};
use crate::parsing::take_until;
use crate::raw_event::{RawEvent, RawEventType};
pub use player::*;
use std::str::FromStr;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GameEventError {
    #[error("malformed game event({ty:?}): {err} in \"{params}\"")]
    Error {
        err: ParseError,
        ty: RawEventType,
        params: String,
    },
}

trait GameEventErrTrait<T> {
    fn with_raw(self, raw: &RawEvent) -> Result<T, GameEventError>;
}

impl<T> GameEventErrTrait<T> for Result<T, ParseError> {
    fn with_raw(self, raw: &RawEvent) -> Result<T, GameEventError> {
        self.map_err(|err| GameEventError::Error {
            err,
            ty: raw.ty,
            params: raw.params.to_string(),
        })
    }
}

pub trait Event<'a>: Sized + 'a {
    fn parse(input: &'a str) -> Result<Self, ParseError>;
}

fn parse_event<'a, T: Event<'a>>(input: &'a str) -> Result<T, ParseError> {
    T::parse(input)
}

/// The events the match tracker acts on
#[derive(Debug, PartialEq)]
pub enum GameEvent<'a> {
    InitGame,
    ClientConnect(ConnectEvent),
    ClientUserinfoChanged(UserinfoChangedEvent<'a>),
    ClientDisconnect(DisconnectEvent),
    Kill(KillEvent),
    Untracked,
}

impl<'a> GameEvent<'a> {
    pub fn parse(raw: &RawEvent<'a>) -> Result<Self, GameEventError> {
        Ok(match raw.ty {
            RawEventType::InitGame => GameEvent::InitGame,
            RawEventType::ClientConnect => {
                GameEvent::ClientConnect(parse_event(raw.params).with_raw(raw)?)
            }
            RawEventType::ClientUserinfoChanged => {
                GameEvent::ClientUserinfoChanged(parse_event(raw.params).with_raw(raw)?)
            }
            RawEventType::ClientDisconnect => {
                GameEvent::ClientDisconnect(parse_event(raw.params).with_raw(raw)?)
            }
            RawEventType::Kill => GameEvent::Kill(parse_event(raw.params).with_raw(raw)?),
            _ => GameEvent::Untracked,
        })
    }
}

fn parse_from_str<'a, T: FromStr + 'a>(input: &'a str) -> Result<T, ParseError> {
    T::from_str(input).map_err(|_| ParseError::Malformed)
}

pub trait EventField<'a>: Sized + 'a {
    fn parse_field(input: &'a str) -> Result<Self, ParseError>;
}

pub trait EventFieldFromStr: FromStr {}

impl<'a, T: EventFieldFromStr + 'a> EventField<'a> for T {
    fn parse_field(input: &'a str) -> Result<Self, ParseError> {
        parse_from_str(input)
    }
}

impl EventFieldFromStr for u32 {}
impl EventFieldFromStr for PlayerId {}

impl<'a> EventField<'a> for MeanOfDeath {
    fn parse_field(input: &'a str) -> Result<Self, ParseError> {
        let code = u32::parse_field(input)?;
        MeanOfDeath::from_code(code).ok_or(ParseError::UnknownMeanOfDeath(code))
    }
}

pub fn parse_field<'a, T: EventField<'a>>(input: &'a str) -> Result<T, ParseError> {
    T::parse_field(input)
}

/// Parse the first space separated field of the payload, returning the remainder
fn first_field<'a, T: EventField<'a>>(input: &'a str) -> Result<(&'a str, T), ParseError> {
    let (input, field) = take_until(input, b' ');
    if field.is_empty() {
        return Err(ParseError::Incomplete);
    }
    Ok((input.trim_start(), parse_field(field)?))
}
