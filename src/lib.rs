//! Per-match kill statistics from Quake 3 Arena server logs.
//!
//! ```
//! let log = r"  0:00 InitGame: \mapname\q3dm17
//!  20:34 ClientConnect: 2
//!  20:34 ClientUserinfoChanged: 2 n\Isgalamido\t\0
//!  20:54 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT";
//!
//! let report = quake_log_parser::parse_report(log, true).unwrap();
//! let game = report.game("game_1").unwrap();
//! assert_eq!(1, game.total_kills);
//! assert!(game.kills.is_empty());
//! ```

pub use crate::common::{MeanOfDeath, PlayerId};
pub use crate::error::{Error, ParseError, Result};
pub use crate::event::{GameEvent, GameEventError, KillerId};
pub use crate::matches::{EventKind, Kill, Killer, Match, Matches, Player, StateError};
pub use crate::raw_event::{RawEvent, RawEventError, RawEventType, RawTime};
pub use crate::report::{MatchSummary, Report};
use tracing::trace;

mod common;
mod error;
pub mod event;
mod matches;
mod parsing;
mod raw_event;
mod report;

/// Parse a full log into its matches.
///
/// Lines that don't have the `<minutes>:<seconds> <Tag>: <payload>` shape are skipped,
/// any error in an event line aborts the parse.
pub fn parse(log: &str) -> Result<Vec<Match>> {
    let mut matches = Matches::new();

    for (index, line) in log.lines().enumerate() {
        let raw = match RawEvent::parse(line) {
            Ok(raw) => raw,
            Err(_) => {
                trace!(line = index + 1, "skipping line without event");
                continue;
            }
        };
        matches.apply_raw(&raw).map_err(|source| Error::Line {
            line: index + 1,
            source: Box::new(source),
        })?;
    }

    Ok(matches.into_inner())
}

/// Parse a full log and summarize each match
pub fn parse_report(log: &str, by_means: bool) -> Result<Report> {
    Ok(Report::new(&parse(log)?, by_means))
}
