// Recent-match history helpers: score lines and date display.
//
// History strings come straight from the fixture file and are often
// hand-typed. Nothing here fails: anything that doesn't parse is shown
// verbatim.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer};

// ---------------------------------------------------------------------------
// History entries
// ---------------------------------------------------------------------------

/// Outcome of a past match from the listed team's point of view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum HistoryResult {
    #[serde(rename = "V", alias = "W", alias = "Win", alias = "Vitória")]
    Win,
    #[serde(rename = "E", alias = "Draw", alias = "Empate")]
    Draw,
    #[serde(rename = "D", alias = "L", alias = "Loss", alias = "Derrota")]
    Loss,
    /// Missing or unrecognised `resultado`; the row is still shown.
    #[default]
    #[serde(other)]
    Unknown,
}

impl HistoryResult {
    /// Single-letter marker (V / E / D, `?` when unknown).
    pub fn marker(&self) -> &'static str {
        match self {
            HistoryResult::Win => "V",
            HistoryResult::Draw => "E",
            HistoryResult::Loss => "D",
            HistoryResult::Unknown => "?",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    /// Case-insensitive venue label. Anything unrecognised is no venue.
    pub fn from_label(label: &str) -> Option<Venue> {
        match label.trim().to_lowercase().as_str() {
            "home" | "casa" | "mandante" => Some(Venue::Home),
            "away" | "fora" | "visitante" => Some(Venue::Away),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Venue::Home => "(C)",
            Venue::Away => "(F)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "resultado", default)]
    pub result: HistoryResult,
    #[serde(rename = "placar", default)]
    pub score: String,
    #[serde(rename = "data", default)]
    pub date: String,
    #[serde(rename = "local", default, deserialize_with = "venue_label")]
    pub venue: Option<Venue>,
}

fn venue_label<'de, D>(deserializer: D) -> Result<Option<Venue>, D::Error>
where
    D: Deserializer<'de>,
{
    let label = Option::<String>::deserialize(deserializer)?;
    Ok(label.as_deref().and_then(Venue::from_label))
}

// ---------------------------------------------------------------------------
// Score lines
// ---------------------------------------------------------------------------

/// A parsed `"N x M Opponent"` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub goals_for: Option<u32>,
    pub goals_against: Option<u32>,
    pub opponent: String,
}

impl ScoreLine {
    pub fn is_parsed(&self) -> bool {
        self.goals_for.is_some() && self.goals_against.is_some()
    }
}

/// Parse `"2 x 1 Flamengo"` (separator `x` in either case, spaces around it
/// optional). On mismatch the goals are absent and `opponent` holds the raw
/// text for display.
pub fn parse_score_line(text: &str) -> ScoreLine {
    match try_parse_score_line(text.trim()) {
        Some((goals_for, goals_against, opponent)) => ScoreLine {
            goals_for: Some(goals_for),
            goals_against: Some(goals_against),
            opponent: opponent.to_string(),
        },
        None => ScoreLine {
            goals_for: None,
            goals_against: None,
            opponent: text.to_string(),
        },
    }
}

fn try_parse_score_line(s: &str) -> Option<(u32, u32, &str)> {
    let (goals_for, rest) = split_leading_digits(s)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix(|c: char| c == 'x' || c == 'X')?;
    let (goals_against, rest) = split_leading_digits(rest.trim_start())?;
    // The opponent must be separated from the score by whitespace.
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let opponent = rest.trim();
    if opponent.is_empty() {
        return None;
    }
    Some((goals_for, goals_against, opponent))
}

fn split_leading_digits(s: &str) -> Option<(u32, &str)> {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Parse a `YYYY-MM-DD` string by splitting its components. No timezone is
/// involved, so the calendar day never shifts.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.trim().splitn(3, '-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if year.len() != 4 || month.len() != 2 || day.len() != 2 {
        return None;
    }
    if ![year, month, day]
        .iter()
        .all(|p| p.chars().all(|c| c.is_ascii_digit()))
    {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

fn weekday_abbrev(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "seg",
        Weekday::Tue => "ter",
        Weekday::Wed => "qua",
        Weekday::Thu => "qui",
        Weekday::Fri => "sex",
        Weekday::Sat => "sáb",
        Weekday::Sun => "dom",
    }
}

/// Display form of a history date.
///
/// ISO input becomes `"26/10"` (short) or `"dom, 26/10/2025"` (long).
/// Anything else, including dates already written as `dd/mm`, is returned
/// unchanged.
pub fn format_date(text: &str, short: bool) -> String {
    match parse_iso_date(text) {
        Some(date) if short => format!("{:02}/{:02}", date.day(), date.month()),
        Some(date) => format!(
            "{}, {:02}/{:02}/{}",
            weekday_abbrev(date.weekday()),
            date.day(),
            date.month(),
            date.year()
        ),
        None => text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
