use crate::common::{MeanOfDeath, PlayerId};
use crate::error::Result;
use crate::event::{GameEvent, KillEvent, KillerId};
use crate::raw_event::RawEvent;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing::{debug, trace};

/// The kind of event that was rejected by the tracker
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Connect,
    Rename,
    Disconnect,
    Kill,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Connect => "ClientConnect",
            EventKind::Rename => "ClientUserinfoChanged",
            EventKind::Disconnect => "ClientDisconnect",
            EventKind::Kill => "Kill",
        }
    }
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("{0} without an initialized match")]
    NoMatch(EventKind),
    #[error("{0} with no players on match")]
    NoPlayers(EventKind),
    #[error("{kind} for player {id} that isn't connected")]
    PlayerNotFound { kind: EventKind, id: PlayerId },
    #[error("killer {0} isn't connected")]
    KillerNotFound(PlayerId),
    #[error("victim {0} isn't connected")]
    VictimNotFound(PlayerId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    /// Empty until the first userinfo update
    pub name: String,
    connection: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Killer {
    World,
    Player {
        id: PlayerId,
        /// Display name at the time of the kill
        name: String,
        /// Distinguishes the killer from later players reusing the same id
        connection: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Kill {
    pub killer: Killer,
    pub victim: PlayerId,
    pub mean_of_death: MeanOfDeath,
}

/// A single game, from `InitGame` until the next one or the end of the log
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Match {
    players: Vec<Player>,
    kills: Vec<Kill>,
    connections: u32,
}

impl Match {
    /// Players currently connected, in connection order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn kills(&self) -> &[Kill] {
        &self.kills
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id == id)
    }

    /// Current display name of the killer, or the name they had at the time of the kill
    /// when they have since left
    pub fn killer_name<'a>(&'a self, killer: &'a Killer) -> Option<&'a str> {
        match killer {
            Killer::World => None,
            Killer::Player {
                name, connection, ..
            } => Some(
                self.players
                    .iter()
                    .find(|player| player.connection == *connection)
                    .map(|player| player.name.as_str())
                    .unwrap_or(name.as_str()),
            ),
        }
    }

    fn position(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|player| player.id == id)
    }
}

/// Owner of all matches in a log, the last match is the active one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Matches(Vec<Match>);

impl Matches {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Match] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<Match> {
        self.0
    }

    pub fn active(&self) -> Option<&Match> {
        self.0.last()
    }

    fn active_mut(&mut self, kind: EventKind) -> Result<&mut Match, StateError> {
        self.0.last_mut().ok_or(StateError::NoMatch(kind))
    }

    fn roster_mut(&mut self, kind: EventKind) -> Result<&mut Match, StateError> {
        let active = self.active_mut(kind)?;
        if active.players.is_empty() {
            Err(StateError::NoPlayers(kind))
        } else {
            Ok(active)
        }
    }

    pub fn init_game(&mut self) {
        self.0.push(Match::default());
        debug!(game = self.0.len(), "new match");
    }

    /// Connecting an id that is already on the roster resets that slot
    pub fn connect(&mut self, id: PlayerId) -> Result<(), StateError> {
        let active = self.active_mut(EventKind::Connect)?;
        active.connections += 1;
        let player = Player {
            id,
            name: String::new(),
            connection: active.connections,
        };
        match active.position(id) {
            Some(index) => {
                debug!(%id, "client reconnected without disconnecting");
                active.players[index] = player;
            }
            None => {
                debug!(%id, "client connected");
                active.players.push(player);
            }
        }
        Ok(())
    }

    pub fn rename(&mut self, id: PlayerId, name: &str) -> Result<(), StateError> {
        let kind = EventKind::Rename;
        let active = self.roster_mut(kind)?;
        let index = active
            .position(id)
            .ok_or(StateError::PlayerNotFound { kind, id })?;
        let player = &mut active.players[index];
        if player.name != name {
            debug!(%id, from = %player.name, to = name, "client renamed");
            player.name.clear();
            player.name.push_str(name);
        }
        Ok(())
    }

    pub fn disconnect(&mut self, id: PlayerId) -> Result<Player, StateError> {
        let kind = EventKind::Disconnect;
        let active = self.roster_mut(kind)?;
        let index = active
            .position(id)
            .ok_or(StateError::PlayerNotFound { kind, id })?;
        let player = active.players.remove(index);
        debug!(%id, name = %player.name, "client disconnected");
        Ok(player)
    }

    pub fn kill(
        &mut self,
        killer: KillerId,
        victim: PlayerId,
        mean_of_death: MeanOfDeath,
    ) -> Result<(), StateError> {
        let active = self.roster_mut(EventKind::Kill)?;
        let killer = match killer {
            KillerId::World => Killer::World,
            KillerId::Player(id) => {
                let player = active
                    .player(id)
                    .ok_or(StateError::KillerNotFound(id))?;
                Killer::Player {
                    id,
                    name: player.name.clone(),
                    connection: player.connection,
                }
            }
        };
        if active.position(victim).is_none() {
            return Err(StateError::VictimNotFound(victim));
        }
        trace!(%victim, %mean_of_death, "kill");
        active.kills.push(Kill {
            killer,
            victim,
            mean_of_death,
        });
        Ok(())
    }

    pub fn apply(&mut self, event: &GameEvent) -> Result<(), StateError> {
        match event {
            GameEvent::InitGame => {
                self.init_game();
                Ok(())
            }
            GameEvent::ClientConnect(connect) => self.connect(connect.id),
            GameEvent::ClientUserinfoChanged(info) => self.rename(info.id, info.name),
            GameEvent::ClientDisconnect(disconnect) => self.disconnect(disconnect.id).map(drop),
            GameEvent::Kill(KillEvent {
                killer,
                victim,
                mean_of_death,
            }) => self.kill(*killer, *victim, *mean_of_death),
            GameEvent::Untracked => Ok(()),
        }
    }

    /// Apply an event line, untracked events are ignored without parsing their payload
    pub fn apply_raw(&mut self, raw: &RawEvent) -> Result<()> {
        if !raw.ty.is_tracked() {
            return Ok(());
        }
        trace!(time = %raw.time, tag = raw.tag, "event");
        let event = GameEvent::parse(raw)?;
        self.apply(&event)?;
        Ok(())
    }

    /// Parse and apply a single log line
    pub fn apply_line(&mut self, line: &str) -> Result<()> {
        self.apply_raw(&RawEvent::parse(line)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn names(game: &Match) -> Vec<(u32, &str)> {
        game.players()
            .iter()
            .map(|player| (player.id.0, player.name.as_str()))
            .collect()
    }

    fn two_player_match() -> Matches {
        let mut matches = Matches::new();
        matches.init_game();
        matches.connect(PlayerId(2)).unwrap();
        matches.rename(PlayerId(2), "Isgalamido").unwrap();
        matches.connect(PlayerId(3)).unwrap();
        matches.rename(PlayerId(3), "Mocinha").unwrap();
        matches
    }

    #[test]
    fn test_init_game_always_appends() {
        let mut matches = Matches::new();
        matches.init_game();
        assert_eq!(1, matches.len());
        assert_eq!(Some(&Match::default()), matches.active());

        let mut matches = two_player_match();
        matches.init_game();
        assert_eq!(2, matches.len());
        assert_eq!(Some(&Match::default()), matches.active());
        assert_eq!(2, matches.as_slice()[0].players().len());
    }

    #[test]
    fn test_connect_without_match() {
        let mut matches = Matches::new();
        assert_eq!(
            Err(StateError::NoMatch(EventKind::Connect)),
            matches.connect(PlayerId(2))
        );
        assert!(matches.is_empty());
    }

    #[test]
    fn test_connect_and_rename() {
        let mut matches = Matches::new();
        matches.init_game();
        matches.connect(PlayerId(2)).unwrap();
        assert_eq!(vec![(2, "")], names(matches.active().unwrap()));
        matches.rename(PlayerId(2), "Foo").unwrap();
        assert_eq!(vec![(2, "Foo")], names(matches.active().unwrap()));
    }

    #[test]
    fn test_reconnect_resets_slot() {
        let mut matches = two_player_match();
        matches.connect(PlayerId(2)).unwrap();
        assert_eq!(vec![(2, ""), (3, "Mocinha")], names(matches.active().unwrap()));
    }

    #[test]
    fn test_rename_errors() {
        let mut matches = Matches::new();
        assert_eq!(
            Err(StateError::NoMatch(EventKind::Rename)),
            matches.rename(PlayerId(2), "Foo")
        );
        matches.init_game();
        assert_eq!(
            Err(StateError::NoPlayers(EventKind::Rename)),
            matches.rename(PlayerId(2), "Foo")
        );
        matches.connect(PlayerId(2)).unwrap();
        assert_eq!(
            Err(StateError::PlayerNotFound {
                kind: EventKind::Rename,
                id: PlayerId(3)
            }),
            matches.rename(PlayerId(3), "Foo")
        );
        assert_eq!(vec![(2, "")], names(matches.active().unwrap()));
    }

    #[test]
    fn test_disconnect() {
        let mut matches = two_player_match();
        let player = matches.disconnect(PlayerId(2)).unwrap();
        assert_eq!("Isgalamido", player.name);
        assert_eq!(vec![(3, "Mocinha")], names(matches.active().unwrap()));
    }

    #[test]
    fn test_disconnect_errors() {
        let mut matches = Matches::new();
        assert_eq!(
            Err(StateError::NoMatch(EventKind::Disconnect)),
            matches.disconnect(PlayerId(2))
        );
        matches.init_game();
        assert_eq!(
            Err(StateError::NoPlayers(EventKind::Disconnect)),
            matches.disconnect(PlayerId(2))
        );

        let mut matches = two_player_match();
        let before = matches.clone();
        assert_eq!(
            Err(StateError::PlayerNotFound {
                kind: EventKind::Disconnect,
                id: PlayerId(4)
            }),
            matches.disconnect(PlayerId(4))
        );
        assert_eq!(before, matches);
    }

    #[test]
    fn test_kill_by_world() {
        let mut matches = two_player_match();
        matches
            .kill(KillerId::World, PlayerId(2), MeanOfDeath::TriggerHurt)
            .unwrap();
        assert_eq!(
            &[Kill {
                killer: Killer::World,
                victim: PlayerId(2),
                mean_of_death: MeanOfDeath::TriggerHurt,
            }],
            matches.active().unwrap().kills()
        );
    }

    #[test]
    fn test_kill_errors() {
        let mut matches = Matches::new();
        assert_eq!(
            Err(StateError::NoMatch(EventKind::Kill)),
            matches.kill(KillerId::World, PlayerId(2), MeanOfDeath::Lava)
        );
        matches.init_game();
        assert_eq!(
            Err(StateError::NoPlayers(EventKind::Kill)),
            matches.kill(KillerId::World, PlayerId(2), MeanOfDeath::Lava)
        );

        let mut matches = two_player_match();
        let before = matches.clone();
        assert_eq!(
            Err(StateError::KillerNotFound(PlayerId(4))),
            matches.kill(KillerId::Player(PlayerId(4)), PlayerId(2), MeanOfDeath::Rocket)
        );
        assert_eq!(
            Err(StateError::VictimNotFound(PlayerId(4))),
            matches.kill(KillerId::Player(PlayerId(2)), PlayerId(4), MeanOfDeath::Rocket)
        );
        assert_eq!(
            Err(StateError::VictimNotFound(PlayerId(4))),
            matches.kill(KillerId::World, PlayerId(4), MeanOfDeath::Falling)
        );
        assert_eq!(before, matches);
    }

    #[test]
    fn test_killer_name_after_leaving() {
        let mut matches = two_player_match();
        matches
            .kill(KillerId::Player(PlayerId(2)), PlayerId(3), MeanOfDeath::Railgun)
            .unwrap();
        matches.rename(PlayerId(2), "Isga").unwrap();
        let game = matches.active().unwrap();
        assert_eq!(Some("Isga"), game.killer_name(&game.kills()[0].killer));

        matches.disconnect(PlayerId(2)).unwrap();
        matches.connect(PlayerId(2)).unwrap();
        matches.rename(PlayerId(2), "Zeh").unwrap();
        let game = matches.active().unwrap();
        assert_eq!(Some("Isgalamido"), game.killer_name(&game.kills()[0].killer));
        assert_eq!(None, game.killer_name(&Killer::World));
    }

    #[test]
    fn test_apply_line() {
        let mut matches = Matches::new();
        matches
            .apply_line(r"  0:00 InitGame: \sv_floodProtect\1\mapname\q3dm17")
            .unwrap();
        matches.apply_line(" 20:34 ClientConnect: 2").unwrap();
        matches
            .apply_line(r" 20:34 ClientUserinfoChanged: 2 n\Isgalamido\t\0\model\xian/default")
            .unwrap();
        matches.apply_line(" 20:37 ClientBegin: 2").unwrap();
        matches
            .apply_line(" 20:54 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT")
            .unwrap();
        let game = matches.active().unwrap();
        assert_eq!(vec![(2, "Isgalamido")], names(game));
        assert_eq!(1, game.kills().len());
    }

    #[test]
    fn test_apply_line_errors() {
        let mut matches = Matches::new();
        assert!(matches!(matches.apply_line(""), Err(Error::RawEvent(_))));
        assert!(matches!(
            matches.apply_line(" 20:34 ClientConnect: two"),
            Err(Error::MalformedEvent(_))
        ));
        let err = matches.apply_line(" 20:34 ClientConnect: 2").unwrap_err();
        assert_eq!(Some(&StateError::NoMatch(EventKind::Connect)), err.state());
        assert_eq!(
            "ClientConnect without an initialized match",
            err.to_string()
        );
        assert!(matches.is_empty());
    }
}
