use crate::common::MeanOfDeath;
use crate::matches::Match;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Statistics for a single game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    /// All kills, including environmental ones
    pub total_kills: usize,
    /// Names of the players connected at the end of the game
    pub players: Vec<String>,
    /// Kills per killer name, environmental kills are not attributed
    pub kills: BTreeMap<String, u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kills_by_means: Option<BTreeMap<MeanOfDeath, u32>>,
}

impl MatchSummary {
    pub fn new(game: &Match, by_means: bool) -> Self {
        let mut kills = BTreeMap::new();
        let mut kills_by_means = by_means.then(BTreeMap::new);

        for kill in game.kills() {
            if let Some(by_means) = kills_by_means.as_mut() {
                *by_means.entry(kill.mean_of_death).or_insert(0) += 1;
            }
            if let Some(name) = game.killer_name(&kill.killer) {
                *kills.entry(name.to_string()).or_insert(0) += 1;
            }
        }

        MatchSummary {
            total_kills: game.kills().len(),
            players: game
                .players()
                .iter()
                .map(|player| player.name.clone())
                .collect(),
            kills,
            kills_by_means,
        }
    }
}

/// Per game summaries, serialized as an object keyed by `game_<n>`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    games: Vec<MatchSummary>,
}

impl Report {
    pub fn new(matches: &[Match], by_means: bool) -> Self {
        Report {
            games: matches
                .iter()
                .map(|game| MatchSummary::new(game, by_means))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// All games with their label, in log order
    pub fn games(&self) -> impl Iterator<Item = (String, &MatchSummary)> {
        self.games
            .iter()
            .enumerate()
            .map(|(index, game)| (game_label(index), game))
    }

    /// Look up a game by its `game_<n>` label
    pub fn game(&self, label: &str) -> Option<&MatchSummary> {
        let number: usize = label.strip_prefix("game_")?.parse().ok()?;
        self.games.get(number.checked_sub(1)?)
    }
}

fn game_label(index: usize) -> String {
    format!("game_{}", index + 1)
}

impl Serialize for Report {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.games.len()))?;
        for (label, game) in self.games() {
            map.serialize_entry(&label, game)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::PlayerId;
    use crate::event::KillerId;
    use crate::matches::Matches;
    use serde_json::json;

    fn sample() -> Matches {
        let mut matches = Matches::new();
        matches.init_game();
        matches.connect(PlayerId(2)).unwrap();
        matches.rename(PlayerId(2), "A").unwrap();
        matches.connect(PlayerId(3)).unwrap();
        matches.rename(PlayerId(3), "B").unwrap();
        matches
            .kill(KillerId::Player(PlayerId(2)), PlayerId(3), MeanOfDeath::TriggerHurt)
            .unwrap();
        matches
            .kill(KillerId::World, PlayerId(2), MeanOfDeath::Nail)
            .unwrap();
        matches
    }

    #[test]
    fn test_empty_report() {
        let report = Report::new(&[], true);
        assert!(report.is_empty());
        assert_eq!(json!({}), serde_json::to_value(&report).unwrap());
    }

    #[test]
    fn test_match_without_kills() {
        let mut matches = Matches::new();
        matches.init_game();
        matches.connect(PlayerId(2)).unwrap();

        let report = Report::new(matches.as_slice(), false);
        assert_eq!(
            json!({"game_1": {"total_kills": 0, "players": [""], "kills": {}}}),
            serde_json::to_value(&report).unwrap()
        );

        let report = Report::new(matches.as_slice(), true);
        assert_eq!(
            json!({"game_1": {"total_kills": 0, "players": [""], "kills": {}, "kills_by_means": {}}}),
            serde_json::to_value(&report).unwrap()
        );
    }

    #[test]
    fn test_world_kills() {
        let matches = sample();
        let report = Report::new(matches.as_slice(), true);
        let game = report.game("game_1").unwrap();
        assert_eq!(2, game.total_kills);
        assert_eq!(vec!["A", "B"], game.players);
        assert_eq!(Some(&1), game.kills.get("A"));
        assert_eq!(1, game.kills.len());
        assert_eq!(
            json!({
                "game_1": {
                    "total_kills": 2,
                    "players": ["A", "B"],
                    "kills": {"A": 1},
                    "kills_by_means": {"MOD_TRIGGER_HURT": 1, "MOD_NAIL": 1}
                }
            }),
            serde_json::to_value(&report).unwrap()
        );
    }

    #[test]
    fn test_game_labels_keep_log_order() {
        let mut matches = Matches::new();
        for _ in 0..11 {
            matches.init_game();
        }
        let report = Report::new(matches.as_slice(), false);
        let labels: Vec<String> = report.games().map(|(label, _)| label).collect();
        assert_eq!("game_1", labels[0]);
        assert_eq!("game_2", labels[1]);
        assert_eq!("game_11", labels[10]);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.find("\"game_2\"").unwrap() < json.find("\"game_10\"").unwrap());

        assert!(report.game("game_11").is_some());
        assert!(report.game("game_12").is_none());
        assert!(report.game("game_0").is_none());
        assert!(report.game("match_1").is_none());
    }

    #[test]
    fn test_aggregation_is_repeatable() {
        let matches = sample();
        assert_eq!(
            Report::new(matches.as_slice(), true),
            Report::new(matches.as_slice(), true)
        );
    }
}
