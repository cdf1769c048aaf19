use crate::error::ParseError;
use crate::parsing::{is_word, skip_matches, take_while};
use logos::Logos;
use std::fmt::{Display, Formatter};
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RawEventError {
    #[error("Empty log line")]
    Empty,
    #[error("Malformed log line: {0}")]
    Malformed(ParseError),
}

impl From<ParseError> for RawEventError {
    fn from(e: ParseError) -> Self {
        RawEventError::Malformed(e)
    }
}

/// Event that has only been minimally parsed.
/// that way we can decide if we're interested in handling the event before parsing further
#[derive(Debug, PartialEq)]
pub struct RawEvent<'a> {
    pub time: RawTime<'a>,
    pub ty: RawEventType,
    pub tag: &'a str,
    pub params: &'a str,
}

impl<'a> RawEvent<'a> {
    /// Parse a `<minutes>:<seconds> <Tag>: <payload>` line
    pub fn parse(line: &'a str) -> Result<Self, RawEventError> {
        if line.is_empty() {
            return Err(RawEventError::Empty);
        }
        let input = line.trim_start();

        let (input, minutes) = take_while(input, |b| b.is_ascii_digit());
        let input = skip_matches(non_empty(minutes, input)?, ":")?;
        let (input, seconds) = take_while(input, |b| b.is_ascii_digit());
        let input = skip_matches(non_empty(seconds, input)?, " ")?;

        let (input, tag) = take_while(input, is_word);
        let input = skip_matches(non_empty(tag, input)?, ": ")?;

        Ok(RawEvent {
            time: RawTime { minutes, seconds },
            ty: event_type_parser(tag),
            tag,
            params: input.trim_end(),
        })
    }
}

fn non_empty<'a>(field: &str, rest: &'a str) -> Result<&'a str, ParseError> {
    if field.is_empty() {
        Err(ParseError::Malformed)
    } else {
        Ok(rest)
    }
}

/// Server uptime at the moment the event was logged
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct RawTime<'a> {
    pub minutes: &'a str,
    pub seconds: &'a str,
}

impl RawTime<'_> {
    pub fn as_seconds(&self) -> Result<u32, ParseIntError> {
        Ok(self.minutes.parse::<u32>()? * 60 + self.seconds.parse::<u32>()?)
    }
}

impl Display for RawTime<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.minutes, self.seconds)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Logos)]
pub enum RawEventType {
    #[token("InitGame")]
    InitGame,
    #[token("ShutdownGame")]
    ShutdownGame,
    #[token("Exit")]
    Exit,
    #[token("ClientConnect")]
    ClientConnect,
    #[token("ClientUserinfoChanged")]
    ClientUserinfoChanged,
    #[token("ClientBegin")]
    ClientBegin,
    #[token("ClientDisconnect")]
    ClientDisconnect,
    #[token("Item")]
    Item,
    #[token("Kill")]
    Kill,
    #[token("score")]
    Score,
    #[token("say")]
    Say,
    #[token("sayteam")]
    SayTeam,
    #[error]
    Unknown,
}

impl RawEventType {
    /// Whether the match tracker acts on this event
    pub fn is_tracked(self) -> bool {
        matches!(
            self,
            RawEventType::InitGame
                | RawEventType::ClientConnect
                | RawEventType::ClientUserinfoChanged
                | RawEventType::ClientDisconnect
                | RawEventType::Kill
        )
    }
}

fn event_type_parser(tag: &str) -> RawEventType {
    let mut lexer = RawEventType::lexer(tag);
    match lexer.next() {
        Some(ty) if lexer.remainder().is_empty() => ty,
        _ => RawEventType::Unknown,
    }
}

#[test]
fn test_parse_raw() {
    let input = r#" 20:38 ClientUserinfoChanged: 2 n\Isgalamido\t\0\model\uriel/zael"#;
    let raw = RawEvent::parse(input).unwrap();
    assert_eq!(
        RawEvent {
            time: RawTime {
                minutes: "20",
                seconds: "38",
            },
            ty: RawEventType::ClientUserinfoChanged,
            tag: "ClientUserinfoChanged",
            params: r#"2 n\Isgalamido\t\0\model\uriel/zael"#,
        },
        raw
    );
    assert_eq!(Ok(20 * 60 + 38), raw.time.as_seconds());
    assert_eq!("20:38", raw.time.to_string());
}

#[test]
fn test_parse_kill() {
    let raw =
        RawEvent::parse("  1:08 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT")
            .unwrap();
    assert_eq!(RawEventType::Kill, raw.ty);
    assert_eq!("1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT", raw.params);
}

#[test]
fn test_parse_untracked_tags() {
    let raw = RawEvent::parse(" 20:37 ClientBegin: 2").unwrap();
    assert_eq!(RawEventType::ClientBegin, raw.ty);
    assert!(!raw.ty.is_tracked());

    let raw = RawEvent::parse(" 20:37 Killer: 2").unwrap();
    assert_eq!(RawEventType::Unknown, raw.ty);
    assert_eq!("Killer", raw.tag);

    let raw = RawEvent::parse(" 20:37 Flag_Capture: 2").unwrap();
    assert_eq!(RawEventType::Unknown, raw.ty);
}

#[test]
fn test_parse_rejects_other_shapes() {
    assert_eq!(Err(RawEventError::Empty), RawEvent::parse(""));
    for line in [
        "  0:00 ------------------------------------------------------------",
        " 20:37 ShutdownGame:",
        "   ",
        "InitGame: \\sv_hostname\\Code Miner Server",
        " 20:37 : 2",
        "20 ClientConnect: 2",
        ":37 ClientConnect: 2",
    ] {
        assert!(
            matches!(RawEvent::parse(line), Err(RawEventError::Malformed(_))),
            "{:?} should not parse",
            line
        );
    }
}
