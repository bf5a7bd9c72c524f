// Betting-style markets offered for every match.
//
// Markets are closed enums internally; their string form ("1", "X2",
// "Mais de 2.5") only appears at the payload/summary boundary and when
// parsing raw selector values.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketParseError {
    #[error("unknown {field} option: `{value}`")]
    UnknownOption { field: Field, value: String },
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// The three per-match selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FinalResult,
    DoubleChance,
    GoalsLine,
}

impl Field {
    /// Selector order, left to right.
    pub const ALL: [Field; 3] = [Field::FinalResult, Field::DoubleChance, Field::GoalsLine];

    /// Short label shown above the selector.
    pub fn label(&self) -> &'static str {
        match self {
            Field::FinalResult => "Resultado",
            Field::DoubleChance => "Dupla",
            Field::GoalsLine => "Gols",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FinalResult => "final result",
            Field::DoubleChance => "double chance",
            Field::GoalsLine => "goals line",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Final result (1 / X / 2)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinalResult {
    Home,
    Draw,
    Away,
}

impl FinalResult {
    pub const OPTIONS: [FinalResult; 3] = [FinalResult::Home, FinalResult::Draw, FinalResult::Away];

    pub fn as_str(&self) -> &'static str {
        match self {
            FinalResult::Home => "1",
            FinalResult::Draw => "X",
            FinalResult::Away => "2",
        }
    }
}

impl fmt::Display for FinalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FinalResult {
    type Err = MarketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1" => Ok(FinalResult::Home),
            "X" => Ok(FinalResult::Draw),
            "2" => Ok(FinalResult::Away),
            _ => Err(MarketParseError::UnknownOption {
                field: Field::FinalResult,
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Double chance (1X / 12 / X2)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DoubleChance {
    HomeOrDraw,
    HomeOrAway,
    DrawOrAway,
}

impl DoubleChance {
    pub const OPTIONS: [DoubleChance; 3] = [
        DoubleChance::HomeOrDraw,
        DoubleChance::HomeOrAway,
        DoubleChance::DrawOrAway,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DoubleChance::HomeOrDraw => "1X",
            DoubleChance::HomeOrAway => "12",
            DoubleChance::DrawOrAway => "X2",
        }
    }
}

impl fmt::Display for DoubleChance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoubleChance {
    type Err = MarketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1X" => Ok(DoubleChance::HomeOrDraw),
            "12" => Ok(DoubleChance::HomeOrAway),
            "X2" => Ok(DoubleChance::DrawOrAway),
            _ => Err(MarketParseError::UnknownOption {
                field: Field::DoubleChance,
                value: s.to_string(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Goals line (Mais de / Menos de v)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoalsSide {
    Over,
    Under,
}

impl GoalsSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalsSide::Over => "Mais de",
            GoalsSide::Under => "Menos de",
        }
    }
}

/// Half-goal thresholds offered for the over/under market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Threshold {
    Half,
    OneAndHalf,
    TwoAndHalf,
    ThreeAndHalf,
}

impl Threshold {
    pub const ALL: [Threshold; 4] = [
        Threshold::Half,
        Threshold::OneAndHalf,
        Threshold::TwoAndHalf,
        Threshold::ThreeAndHalf,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Threshold::Half => "0.5",
            Threshold::OneAndHalf => "1.5",
            Threshold::TwoAndHalf => "2.5",
            Threshold::ThreeAndHalf => "3.5",
        }
    }

    fn from_str_value(s: &str) -> Option<Self> {
        // Accept the comma decimal separator too ("2,5").
        match s.trim().replace(',', ".").as_str() {
            "0.5" => Some(Threshold::Half),
            "1.5" => Some(Threshold::OneAndHalf),
            "2.5" => Some(Threshold::TwoAndHalf),
            "3.5" => Some(Threshold::ThreeAndHalf),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GoalsLine {
    pub side: GoalsSide,
    pub threshold: Threshold,
}

impl GoalsLine {
    pub fn over(threshold: Threshold) -> Self {
        GoalsLine {
            side: GoalsSide::Over,
            threshold,
        }
    }

    pub fn under(threshold: Threshold) -> Self {
        GoalsLine {
            side: GoalsSide::Under,
            threshold,
        }
    }

    /// All eight lines: every "Mais de" threshold, then every "Menos de".
    pub fn options() -> Vec<GoalsLine> {
        Threshold::ALL
            .iter()
            .map(|t| GoalsLine::over(*t))
            .chain(Threshold::ALL.iter().map(|t| GoalsLine::under(*t)))
            .collect()
    }
}

impl fmt::Display for GoalsLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.side.as_str(), self.threshold.as_str())
    }
}

impl FromStr for GoalsLine {
    type Err = MarketParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || MarketParseError::UnknownOption {
            field: Field::GoalsLine,
            value: s.to_string(),
        };
        let lower = s.trim().to_lowercase();
        let (side, rest) = if let Some(rest) = lower.strip_prefix("mais de") {
            (GoalsSide::Over, rest)
        } else if let Some(rest) = lower.strip_prefix("menos de") {
            (GoalsSide::Under, rest)
        } else if let Some(rest) = lower.strip_prefix("over") {
            (GoalsSide::Over, rest)
        } else if let Some(rest) = lower.strip_prefix("under") {
            (GoalsSide::Under, rest)
        } else {
            return Err(err());
        };
        let threshold = Threshold::from_str_value(rest).ok_or_else(err)?;
        Ok(GoalsLine { side, threshold })
    }
}

// ---------------------------------------------------------------------------
// PickUpdate
// ---------------------------------------------------------------------------

/// A single selector change. `None` is the empty "--Escolha--" choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickUpdate {
    FinalResult(Option<FinalResult>),
    DoubleChance(Option<DoubleChance>),
    GoalsLine(Option<GoalsLine>),
}

impl PickUpdate {
    pub fn field(&self) -> Field {
        match self {
            PickUpdate::FinalResult(_) => Field::FinalResult,
            PickUpdate::DoubleChance(_) => Field::DoubleChance,
            PickUpdate::GoalsLine(_) => Field::GoalsLine,
        }
    }

    /// The empty choice for `field`.
    pub fn clear(field: Field) -> Self {
        match field {
            Field::FinalResult => PickUpdate::FinalResult(None),
            Field::DoubleChance => PickUpdate::DoubleChance(None),
            Field::GoalsLine => PickUpdate::GoalsLine(None),
        }
    }

    /// Parse a raw selector value. Blank input is the empty choice.
    pub fn parse(field: Field, raw: &str) -> Result<Self, MarketParseError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(PickUpdate::clear(field));
        }
        Ok(match field {
            Field::FinalResult => PickUpdate::FinalResult(Some(raw.parse()?)),
            Field::DoubleChance => PickUpdate::DoubleChance(Some(raw.parse()?)),
            Field::GoalsLine => PickUpdate::GoalsLine(Some(raw.parse()?)),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_result_round_trips_through_display() {
        for opt in FinalResult::OPTIONS {
            assert_eq!(opt.to_string().parse::<FinalResult>(), Ok(opt));
        }
        assert_eq!("x".parse::<FinalResult>(), Ok(FinalResult::Draw));
    }

    #[test]
    fn double_chance_rejects_unknown() {
        let err = "21".parse::<DoubleChance>().unwrap_err();
        assert_eq!(
            err,
            MarketParseError::UnknownOption {
                field: Field::DoubleChance,
                value: "21".into()
            }
        );
    }

    #[test]
    fn goals_line_display_is_portuguese() {
        assert_eq!(GoalsLine::over(Threshold::TwoAndHalf).to_string(), "Mais de 2.5");
        assert_eq!(GoalsLine::under(Threshold::Half).to_string(), "Menos de 0.5");
    }

    #[test]
    fn goals_line_accepts_english_and_comma_tokens() {
        assert_eq!(
            "Over 1.5".parse::<GoalsLine>(),
            Ok(GoalsLine::over(Threshold::OneAndHalf))
        );
        assert_eq!(
            "Under 3.5".parse::<GoalsLine>(),
            Ok(GoalsLine::under(Threshold::ThreeAndHalf))
        );
        assert_eq!(
            "Mais de 2,5".parse::<GoalsLine>(),
            Ok(GoalsLine::over(Threshold::TwoAndHalf))
        );
    }

    #[test]
    fn goals_line_rejects_unoffered_threshold() {
        assert!("Mais de 4.5".parse::<GoalsLine>().is_err());
        assert!("Exactly 2".parse::<GoalsLine>().is_err());
    }

    #[test]
    fn goals_options_list_overs_then_unders() {
        let opts: Vec<String> = GoalsLine::options().iter().map(|g| g.to_string()).collect();
        assert_eq!(
            opts,
            vec![
                "Mais de 0.5",
                "Mais de 1.5",
                "Mais de 2.5",
                "Mais de 3.5",
                "Menos de 0.5",
                "Menos de 1.5",
                "Menos de 2.5",
                "Menos de 3.5",
            ]
        );
    }

    #[test]
    fn blank_raw_value_is_clear() {
        assert_eq!(
            PickUpdate::parse(Field::GoalsLine, "   "),
            Ok(PickUpdate::GoalsLine(None))
        );
        assert_eq!(
            PickUpdate::parse(Field::FinalResult, "2"),
            Ok(PickUpdate::FinalResult(Some(FinalResult::Away)))
        );
    }
}
