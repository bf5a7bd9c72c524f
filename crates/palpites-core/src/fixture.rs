// Match fixtures: the static list of scheduled matches grouped by day.
//
// The fixture file is a JSON object of day label -> list of matches, in the
// shape used by the original data file:
//
//   { "Sábado 01/11": [ { "hora": "16:00",
//                         "times": ["Flamengo", { "nome": "Palmeiras", "posicao": 2 }],
//                         "ultimos": { "Flamengo": [ { "resultado": "V", ... } ] } } ] }
//
// Day order is the order of the keys in the file.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::warn;

use crate::history::HistoryEntry;
use crate::selection::{MatchKey, MatchRef};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse fixtures: {0}")]
    Parse(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Data model
// ---------------------------------------------------------------------------

/// A team as listed in the fixture file: either a bare name or a name with
/// its league position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub position: Option<u32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTeam {
    Name(String),
    Full {
        #[serde(alias = "name")]
        nome: String,
        #[serde(alias = "position", default)]
        posicao: Option<u32>,
    },
}

impl From<RawTeam> for Team {
    fn from(raw: RawTeam) -> Self {
        match raw {
            RawTeam::Name(name) => Team {
                name,
                position: None,
            },
            RawTeam::Full { nome, posicao } => Team {
                name: nome,
                position: posicao,
            },
        }
    }
}

impl Team {
    /// Name with league position, e.g. `"Flamengo (1º)"`.
    pub fn display_name(&self) -> String {
        match self.position {
            Some(pos) => format!("{} ({}º)", self.name, pos),
            None => self.name.clone(),
        }
    }
}

#[derive(Deserialize)]
struct RawFixture {
    #[serde(alias = "time")]
    hora: String,
    #[serde(alias = "teams", default)]
    times: Vec<RawTeam>,
    #[serde(alias = "history", default, deserialize_with = "lenient_history")]
    ultimos: HashMap<String, Vec<HistoryEntry>>,
}

/// History is display-only: entries that don't fit `HistoryEntry` are
/// dropped with a warning instead of failing the whole file.
fn lenient_history<'de, D>(
    deserializer: D,
) -> Result<HashMap<String, Vec<HistoryEntry>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Object(teams) = raw else {
        warn!("Ignoring history block that is not an object");
        return Ok(HashMap::new());
    };

    let mut history = HashMap::new();
    for (team, entries) in teams {
        let serde_json::Value::Array(entries) = entries else {
            warn!("Ignoring history of {}: not a list", team);
            continue;
        };
        let parsed = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<HistoryEntry>(entry) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping history entry of {}: {}", team, e);
                    None
                }
            })
            .collect();
        history.insert(team, parsed);
    }
    Ok(history)
}

/// One scheduled match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub time: String,
    pub teams: (Team, Team),
    pub history: HashMap<String, Vec<HistoryEntry>>,
}

impl Fixture {
    /// Recent matches of `team_name`, most recent first as listed in the file.
    pub fn history_for(&self, team_name: &str) -> &[HistoryEntry] {
        self.history
            .get(team_name)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn match_ref(&self, day: &str) -> MatchRef {
        MatchRef::new(day, &self.time, &self.teams.0.name, &self.teams.1.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDay {
    pub label: String,
    pub matches: Vec<Fixture>,
}

/// All match days in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fixtures {
    pub days: Vec<MatchDay>,
}

impl Fixtures {
    /// Every match in display order with its identity.
    pub fn iter_matches(&self) -> impl Iterator<Item = (MatchRef, &Fixture)> {
        self.days.iter().flat_map(|day| {
            day.matches
                .iter()
                .map(move |fixture| (fixture.match_ref(&day.label), fixture))
        })
    }

    /// Whether `key` names a scheduled match.
    pub fn contains(&self, key: &MatchKey) -> bool {
        self.iter_matches().any(|(r, _)| r.key() == *key)
    }

    pub fn match_count(&self) -> usize {
        self.days.iter().map(|d| d.matches.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.match_count() == 0
    }
}

impl<'de> Deserialize<'de> for Fixtures {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FixturesVisitor)
    }
}

/// Map visitor that keeps day labels in file order.
struct FixturesVisitor;

impl<'de> Visitor<'de> for FixturesVisitor {
    type Value = Fixtures;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an object of day label -> list of matches")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut days = Vec::new();
        while let Some((label, raw)) = map.next_entry::<String, Vec<RawFixture>>()? {
            let matches = raw
                .into_iter()
                .filter_map(|r| into_fixture(&label, r))
                .collect();
            days.push(MatchDay { label, matches });
        }
        Ok(Fixtures { days })
    }
}

fn into_fixture(day: &str, raw: RawFixture) -> Option<Fixture> {
    let count = raw.times.len();
    let mut teams = raw.times.into_iter().map(Team::from);
    match (teams.next(), teams.next(), count) {
        (Some(home), Some(away), 2) => Some(Fixture {
            time: raw.hora,
            teams: (home, away),
            history: raw.ultimos,
        }),
        _ => {
            warn!(
                "Skipping match on {} at {}: expected 2 teams, found {}",
                day, raw.hora, count
            );
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

pub fn parse_fixtures(json: &str) -> Result<Fixtures, FixtureError> {
    Ok(serde_json::from_str(json)?)
}

pub fn load_fixtures(path: &Path) -> Result<Fixtures, FixtureError> {
    let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fixtures(&text)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryResult;

    const SAMPLE: &str = r#"{
        "Sábado 01/11": [
            {
                "hora": "16:00",
                "times": [{ "nome": "Flamengo", "posicao": 1 }, "Palmeiras"],
                "ultimos": {
                    "Flamengo": [
                        { "resultado": "V", "placar": "2 x 1 Santos", "data": "2025-10-26", "local": "casa" }
                    ]
                }
            },
            { "hora": "18:30", "times": ["Sozinho"] }
        ],
        "Domingo 02/11": [
            { "hora": "11:00", "times": ["Grêmio", "Inter"] }
        ],
        "Amanhã": []
    }"#;

    #[test]
    fn preserves_day_order() {
        let fixtures = parse_fixtures(SAMPLE).unwrap();
        let labels: Vec<&str> = fixtures.days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["Sábado 01/11", "Domingo 02/11", "Amanhã"]);
    }

    #[test]
    fn accepts_bare_and_full_teams() {
        let fixtures = parse_fixtures(SAMPLE).unwrap();
        let first = &fixtures.days[0].matches[0];
        assert_eq!(first.teams.0.name, "Flamengo");
        assert_eq!(first.teams.0.position, Some(1));
        assert_eq!(first.teams.0.display_name(), "Flamengo (1º)");
        assert_eq!(first.teams.1.display_name(), "Palmeiras");
    }

    #[test]
    fn skips_match_without_team_pair() {
        let fixtures = parse_fixtures(SAMPLE).unwrap();
        assert_eq!(fixtures.days[0].matches.len(), 1);
        assert_eq!(fixtures.match_count(), 2);
    }

    #[test]
    fn history_lookup_by_team_name() {
        let fixtures = parse_fixtures(SAMPLE).unwrap();
        let first = &fixtures.days[0].matches[0];
        let hist = first.history_for("Flamengo");
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].result, HistoryResult::Win);
        assert!(first.history_for("Palmeiras").is_empty());
    }

    #[test]
    fn iter_matches_yields_identities_in_order() {
        let fixtures = parse_fixtures(SAMPLE).unwrap();
        let keys: Vec<String> = fixtures
            .iter_matches()
            .map(|(r, _)| r.key().to_string())
            .collect();
        assert_eq!(
            keys,
            vec![
                "Sábado 01/11-16:00-Flamengo-Palmeiras",
                "Domingo 02/11-11:00-Grêmio-Inter"
            ]
        );
    }

    #[test]
    fn contains_known_keys_only() {
        let fixtures = parse_fixtures(SAMPLE).unwrap();
        let known = MatchRef::new("Domingo 02/11", "11:00", "Grêmio", "Inter");
        let unknown = MatchRef::new("Domingo 02/11", "11:00", "Inter", "Grêmio");
        assert!(fixtures.contains(&known.key()));
        assert!(!fixtures.contains(&unknown.key()));
    }

    #[test]
    fn bad_history_entries_keep_every_match() {
        let json = r#"{
            "Sábado 01/11": [
                {
                    "hora": "16:00",
                    "times": ["Flamengo", "Palmeiras"],
                    "ultimos": {
                        "Flamengo": [
                            { "resultado": "?", "placar": "2 x 1 Santos", "data": "2025-10-26" },
                            { "resultado": "V" },
                            { "resultado": "E", "placar": 3, "data": "19/10" },
                            "lixo"
                        ],
                        "Palmeiras": "sem dados"
                    }
                },
                { "hora": "18:30", "times": ["Botafogo", "Fortaleza"], "ultimos": [1, 2] }
            ]
        }"#;
        let fixtures = parse_fixtures(json).unwrap();
        assert_eq!(fixtures.match_count(), 2);

        let first = &fixtures.days[0].matches[0];
        let hist = first.history_for("Flamengo");
        assert_eq!(hist.len(), 2);
        assert_eq!(hist[0].result, HistoryResult::Unknown);
        assert_eq!(hist[0].score, "2 x 1 Santos");
        assert_eq!(hist[1].result, HistoryResult::Win);
        assert_eq!(hist[1].date, "");
        assert!(first.history_for("Palmeiras").is_empty());
        assert!(fixtures.days[0].matches[1].history.is_empty());
    }

    #[test]
    fn rejects_non_object_root() {
        assert!(matches!(parse_fixtures("[1, 2]"), Err(FixtureError::Parse(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_fixtures(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, FixtureError::Io { .. }));
    }
}
