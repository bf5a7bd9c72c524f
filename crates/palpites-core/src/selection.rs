// Per-match picks and the session-scoped selection store.
//
// The store is a value type: `update` returns a new snapshot and leaves the
// receiver untouched, so the app loop can hand snapshots to the UI as the
// re-render signal.

use std::fmt;

use tracing::debug;

use crate::market::{DoubleChance, Field, FinalResult, GoalsLine, MarketParseError, PickUpdate};

// ---------------------------------------------------------------------------
// Match identity
// ---------------------------------------------------------------------------

/// Stable key for a scheduled match: `"{day}-{time}-{home}-{away}"`.
///
/// Two matches with the same day, time and team pair share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey(String);

impl MatchKey {
    pub fn new(day: &str, time: &str, home: &str, away: &str) -> Self {
        MatchKey(format!("{day}-{time}-{home}-{away}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Denormalized identity of a match, captured when the user first picks
/// something for it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchRef {
    pub day: String,
    pub time: String,
    pub teams: (String, String),
}

impl MatchRef {
    pub fn new(
        day: impl Into<String>,
        time: impl Into<String>,
        home: impl Into<String>,
        away: impl Into<String>,
    ) -> Self {
        MatchRef {
            day: day.into(),
            time: time.into(),
            teams: (home.into(), away.into()),
        }
    }

    pub fn key(&self) -> MatchKey {
        MatchKey::new(&self.day, &self.time, &self.teams.0, &self.teams.1)
    }

    /// Human-readable identity, e.g. `"Sábado 01/11 16:00 - Flamengo x Palmeiras"`.
    pub fn label(&self) -> String {
        format!(
            "{} {} - {} x {}",
            self.day, self.time, self.teams.0, self.teams.1
        )
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The user's picks for one match.
///
/// `final_result` and `double_chance` are never both set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub match_ref: MatchRef,
    pub final_result: Option<FinalResult>,
    pub double_chance: Option<DoubleChance>,
    pub goals_line: Option<GoalsLine>,
}

impl Selection {
    pub fn new(match_ref: MatchRef) -> Self {
        Selection {
            match_ref,
            final_result: None,
            double_chance: None,
            goals_line: None,
        }
    }

    /// A selection with no picks at all. Kept in the store but ignored at
    /// submission and in the summary.
    pub fn is_inert(&self) -> bool {
        self.final_result.is_none() && self.double_chance.is_none() && self.goals_line.is_none()
    }

    /// Current value of `field` in its display form.
    pub fn value_of(&self, field: Field) -> Option<String> {
        match field {
            Field::FinalResult => self.final_result.map(|v| v.to_string()),
            Field::DoubleChance => self.double_chance.map(|v| v.to_string()),
            Field::GoalsLine => self.goals_line.map(|v| v.to_string()),
        }
    }

    fn apply(&mut self, update: PickUpdate) {
        match update {
            PickUpdate::FinalResult(value) => {
                self.final_result = value;
                if value.is_some() {
                    self.double_chance = None;
                }
            }
            PickUpdate::DoubleChance(value) => {
                self.double_chance = value;
                if value.is_some() {
                    self.final_result = None;
                }
            }
            PickUpdate::GoalsLine(value) => {
                self.goals_line = value;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SelectionStore
// ---------------------------------------------------------------------------

/// All selections of the session, in first-interaction order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    entries: Vec<Selection>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one selector change and return the resulting snapshot.
    ///
    /// The selection for `match_ref` is created on first use. Setting a
    /// final result clears the double chance and vice versa; an empty choice
    /// removes only its own field. Other matches are untouched.
    pub fn update(&self, match_ref: &MatchRef, update: PickUpdate) -> SelectionStore {
        let key = match_ref.key();
        let mut next = self.clone();
        let idx = match next.position(&key) {
            Some(i) => i,
            None => {
                next.entries.push(Selection::new(match_ref.clone()));
                next.entries.len() - 1
            }
        };
        next.entries[idx].apply(update);
        debug!(match_key = %key, ?update, "selection updated");
        next
    }

    /// Same as [`update`](Self::update) but from a raw selector string.
    /// Blank input clears the field.
    pub fn update_raw(
        &self,
        match_ref: &MatchRef,
        field: Field,
        raw: &str,
    ) -> Result<SelectionStore, MarketParseError> {
        let update = PickUpdate::parse(field, raw)?;
        Ok(self.update(match_ref, update))
    }

    pub fn get(&self, key: &MatchKey) -> Option<&Selection> {
        self.position(key).map(|i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.entries.iter()
    }

    /// Selections with at least one pick, in store order.
    pub fn active(&self) -> impl Iterator<Item = &Selection> {
        self.entries.iter().filter(|s| !s.is_inert())
    }

    fn position(&self, key: &MatchKey) -> Option<usize> {
        self.entries.iter().position(|s| s.match_ref.key() == *key)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::Threshold;

    fn match_a() -> MatchRef {
        MatchRef::new("Sábado 01/11", "16:00", "Flamengo", "Palmeiras")
    }

    fn match_b() -> MatchRef {
        MatchRef::new("Domingo 02/11", "18:30", "Grêmio", "Inter")
    }

    #[test]
    fn key_is_derived_from_identity() {
        assert_eq!(
            match_a().key().as_str(),
            "Sábado 01/11-16:00-Flamengo-Palmeiras"
        );
        assert_eq!(match_a().key(), match_a().key());
        assert_ne!(match_a().key(), match_b().key());
    }

    #[test]
    fn label_includes_day_time_and_teams() {
        assert_eq!(
            match_a().label(),
            "Sábado 01/11 16:00 - Flamengo x Palmeiras"
        );
    }

    #[test]
    fn double_chance_replaces_final_result() {
        let store = SelectionStore::new()
            .update(&match_a(), PickUpdate::FinalResult(Some(FinalResult::Home)))
            .update(&match_a(), PickUpdate::DoubleChance(Some(DoubleChance::HomeOrAway)));
        let sel = store.get(&match_a().key()).unwrap();
        assert_eq!(sel.double_chance, Some(DoubleChance::HomeOrAway));
        assert_eq!(sel.final_result, None);
    }

    #[test]
    fn final_result_replaces_double_chance() {
        let store = SelectionStore::new()
            .update(&match_a(), PickUpdate::DoubleChance(Some(DoubleChance::HomeOrAway)))
            .update(&match_a(), PickUpdate::FinalResult(Some(FinalResult::Home)));
        let sel = store.get(&match_a().key()).unwrap();
        assert_eq!(sel.final_result, Some(FinalResult::Home));
        assert_eq!(sel.double_chance, None);
    }

    #[test]
    fn goals_line_is_independent_of_result_markets() {
        let store = SelectionStore::new()
            .update(&match_a(), PickUpdate::GoalsLine(Some(GoalsLine::over(Threshold::TwoAndHalf))))
            .update(&match_a(), PickUpdate::FinalResult(Some(FinalResult::Draw)))
            .update(&match_a(), PickUpdate::DoubleChance(Some(DoubleChance::DrawOrAway)));
        let sel = store.get(&match_a().key()).unwrap();
        assert_eq!(sel.goals_line, Some(GoalsLine::over(Threshold::TwoAndHalf)));
        assert_eq!(sel.double_chance, Some(DoubleChance::DrawOrAway));
    }

    #[test]
    fn empty_choice_removes_field() {
        let store = SelectionStore::new()
            .update_raw(&match_a(), Field::GoalsLine, "Over 2.5")
            .unwrap()
            .update_raw(&match_a(), Field::GoalsLine, "")
            .unwrap();
        let sel = store.get(&match_a().key()).unwrap();
        assert_eq!(sel.goals_line, None);
        assert!(sel.is_inert());
        // The inert entry stays in the store.
        assert_eq!(store.len(), 1);
        assert_eq!(store.active().count(), 0);
    }

    #[test]
    fn clearing_final_result_keeps_double_chance_absent() {
        let store = SelectionStore::new()
            .update(&match_a(), PickUpdate::DoubleChance(Some(DoubleChance::HomeOrDraw)))
            .update(&match_a(), PickUpdate::FinalResult(None));
        let sel = store.get(&match_a().key()).unwrap();
        assert_eq!(sel.double_chance, Some(DoubleChance::HomeOrDraw));
        assert_eq!(sel.final_result, None);
    }

    #[test]
    fn repeated_identical_update_is_idempotent() {
        let once = SelectionStore::new().update_raw(&match_a(), Field::FinalResult, "X").unwrap();
        let twice = once.update_raw(&match_a(), Field::FinalResult, "X").unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn update_returns_new_snapshot_without_mutating_old() {
        let before = SelectionStore::new();
        let after = before.update(&match_a(), PickUpdate::FinalResult(Some(FinalResult::Away)));
        assert!(before.is_empty());
        assert_eq!(after.len(), 1);
    }

    #[test]
    fn other_matches_are_unaffected() {
        let store = SelectionStore::new()
            .update(&match_a(), PickUpdate::FinalResult(Some(FinalResult::Home)))
            .update(&match_b(), PickUpdate::DoubleChance(Some(DoubleChance::HomeOrDraw)));
        assert_eq!(
            store.get(&match_a().key()).unwrap().final_result,
            Some(FinalResult::Home)
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn identity_is_captured_at_first_interaction() {
        let store = SelectionStore::new()
            .update(&match_a(), PickUpdate::FinalResult(Some(FinalResult::Home)));
        let sel = store.get(&match_a().key()).unwrap();
        assert_eq!(sel.match_ref, match_a());
    }

    #[test]
    fn iteration_follows_first_interaction_order() {
        let store = SelectionStore::new()
            .update(&match_b(), PickUpdate::FinalResult(Some(FinalResult::Home)))
            .update(&match_a(), PickUpdate::FinalResult(Some(FinalResult::Home)))
            .update(&match_b(), PickUpdate::FinalResult(Some(FinalResult::Away)));
        let teams: Vec<&str> = store.iter().map(|s| s.match_ref.teams.0.as_str()).collect();
        assert_eq!(teams, vec!["Grêmio", "Flamengo"]);
    }

    #[test]
    fn unknown_raw_value_is_reported() {
        let result = SelectionStore::new().update_raw(&match_a(), Field::DoubleChance, "3X");
        assert!(result.is_err());
    }

    #[test]
    fn value_of_returns_display_form() {
        let store = SelectionStore::new()
            .update(&match_a(), PickUpdate::GoalsLine(Some(GoalsLine::under(Threshold::OneAndHalf))));
        let sel = store.get(&match_a().key()).unwrap();
        assert_eq!(sel.value_of(Field::GoalsLine).as_deref(), Some("Menos de 1.5"));
        assert_eq!(sel.value_of(Field::FinalResult), None);
    }
}
