//! Storage-level narrowing of the candidate set
//!
//! Only the fields with a cheap column predicate take part: `time`, `cuisine`
//! and `difficulty`. The multi-valued fields are stored as JSON text and are
//! left to the [`FilterEngine`](super::FilterEngine).
//!
//! Whitespace-only text values are not pushed down since the engine drops them.
//! Neither are values with non-ASCII characters: databases fold the case of
//! those differently from the engine, so only ASCII case folding happens in
//! storage and rows holding non-ASCII text always reach the engine.
//!
//! The numeric check here accepts `0` while the time strategy does not. A
//! criterion of `time=0` therefore narrows the query to `time <= 0` and is then
//! dropped by the engine.

use super::engine::Criteria;
use super::strategy::FilterKind;
#[cfg(test)]
use crate::domain::recipe::Recipe;

/// Column predicates pushed down to the recipe query, combined with AND
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefilter {
    pub max_time: Option<i64>,
    /// Raw ASCII value, matched ignoring ASCII case anywhere in `recipes.cuisine`
    pub cuisine: Option<String>,
    /// Raw ASCII value, matched ignoring ASCII case anywhere in `recipes.difficulty`
    pub difficulty: Option<String>,
}

impl Prefilter {
    pub fn from_criteria(criteria: &Criteria) -> Self {
        let text = |kind: FilterKind| {
            criteria
                .get(kind.as_str())
                .filter(|v| !v.trim().is_empty() && v.is_ascii())
                .map(str::to_string)
        };

        Self {
            max_time: criteria
                .get(FilterKind::Time.as_str())
                .and_then(parse_non_negative),
            cuisine: text(FilterKind::Cuisine),
            difficulty: text(FilterKind::Difficulty),
        }
    }

    /// No predicate applies; the query returns every recipe
    pub fn is_empty(&self) -> bool {
        self.max_time.is_none() && self.cuisine.is_none() && self.difficulty.is_none()
    }

    /// In-memory model of the SQL built from this prefilter
    #[cfg(test)]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(max) = self.max_time
            && !recipe.time.is_some_and(|t| t <= max)
        {
            return false;
        }
        like_contains(recipe.cuisine.as_deref(), self.cuisine.as_deref())
            && like_contains(recipe.difficulty.as_deref(), self.difficulty.as_deref())
    }
}

fn parse_non_negative(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

// NULL columns never satisfy LIKE. Anything outside printable ASCII passes.
#[cfg(test)]
fn like_contains(column: Option<&str>, pattern: Option<&str>) -> bool {
    match (column, pattern) {
        (_, None) => true,
        (None, Some(_)) => false,
        (Some(col), Some(pat)) => {
            col.chars().any(|c| !(' '..='~').contains(&c))
                || col
                    .to_ascii_lowercase()
                    .contains(&pat.to_ascii_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria(pairs: &[(&str, &str)]) -> Criteria {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_only_column_fields_are_pushed_down() {
        let prefilter = Prefilter::from_criteria(&criteria(&[
            ("ingredients", "chicken"),
            ("tools", "oven"),
            ("taste", "sweet"),
        ]));
        assert!(prefilter.is_empty());
    }

    #[test]
    fn test_time_accepts_zero_but_not_garbage() {
        assert_eq!(
            Prefilter::from_criteria(&criteria(&[("time", "0")])).max_time,
            Some(0)
        );
        assert_eq!(
            Prefilter::from_criteria(&criteria(&[("time", "25")])).max_time,
            Some(25)
        );
        for bad in ["abc", "-1", "1.5", " 5", ""] {
            assert_eq!(
                Prefilter::from_criteria(&criteria(&[("time", bad)])).max_time,
                None,
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_text_fields_keep_raw_value() {
        let prefilter =
            Prefilter::from_criteria(&criteria(&[("cuisine", "Thai "), ("difficulty", "")]));
        assert_eq!(prefilter.cuisine.as_deref(), Some("Thai "));
        assert_eq!(prefilter.difficulty, None);

        let blank = Prefilter::from_criteria(&criteria(&[("difficulty", "  ")]));
        assert!(blank.is_empty());
    }

    #[test]
    fn test_non_ascii_values_stay_in_memory() {
        let prefilter = Prefilter::from_criteria(&criteria(&[
            ("cuisine", "CRÊPERIE"),
            ("difficulty", "easy"),
        ]));
        assert_eq!(prefilter.cuisine, None);
        assert_eq!(prefilter.difficulty.as_deref(), Some("easy"));
    }

    #[test]
    fn test_matches_mirrors_column_predicates() {
        let recipe = Recipe {
            id: 1,
            name: "Pad Thai".to_string(),
            time: Some(25),
            cuisine: Some("Thai".to_string()),
            ..Default::default()
        };
        let prefilter =
            Prefilter::from_criteria(&criteria(&[("time", "30"), ("cuisine", "thai")]));
        assert!(prefilter.matches(&recipe));

        let zero = Prefilter::from_criteria(&criteria(&[("time", "0")]));
        assert!(!zero.matches(&recipe));

        let needs_difficulty = Prefilter::from_criteria(&criteria(&[("difficulty", "easy")]));
        assert!(!needs_difficulty.matches(&recipe));

        // Only ASCII case is folded; non-ASCII columns always pass
        let kelvin = Recipe {
            difficulty: Some("\u{212A}ind of easy".to_string()),
            ..recipe.clone()
        };
        let needs_kind = Prefilter::from_criteria(&criteria(&[("difficulty", "KIND")]));
        assert!(needs_kind.matches(&kelvin));
        let needs_other = Prefilter::from_criteria(&criteria(&[("difficulty", "hard")]));
        assert!(needs_other.matches(&kelvin));
    }
}
