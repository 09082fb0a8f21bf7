//! Conjunctive evaluation of the active strategy set

use super::strategy::{FilterKind, Strategy};
use crate::domain::recipe::Recipe;

/// Raw filter criteria in the order they were supplied.
///
/// Values are untyped strings; names may be anything. Duplicate names are kept
/// and each produces its own strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    entries: Vec<(String, String)>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// First value supplied under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Criteria {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// In-memory recipe filter built from raw criteria.
///
/// Unknown names and invalid values are dropped during construction, so a
/// built engine never errors.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    active: Vec<Strategy>,
}

impl FilterEngine {
    pub fn new(criteria: &Criteria) -> Self {
        let active = criteria
            .iter()
            .filter_map(|(name, raw)| {
                let kind = FilterKind::from_name(name)?;
                Strategy::new(kind, raw)
                    .inspect_err(|e| {
                        tracing::debug!(criterion = name, error = %e, "Dropping invalid criterion")
                    })
                    .ok()
            })
            .collect();
        Self { active }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.active
    }

    pub fn is_identity(&self) -> bool {
        self.active.is_empty()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.active.iter().all(|s| s.matches(recipe))
    }

    /// Keep the recipes every active strategy accepts, preserving input order
    pub fn apply(&self, recipes: Vec<Recipe>) -> Vec<Recipe> {
        if self.is_identity() {
            return recipes;
        }
        recipes.into_iter().filter(|r| self.matches(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, time: Option<i64>, cuisine: &str, ingredients: &str) -> Recipe {
        Recipe {
            id,
            name: format!("recipe-{id}"),
            time,
            cuisine: Some(cuisine.to_string()),
            ingredients: Some(ingredients.to_string()),
            ..Default::default()
        }
    }

    fn catalog() -> Vec<Recipe> {
        vec![
            recipe(1, Some(20), "Italian", r#"["pasta", "tomato"]"#),
            recipe(2, Some(45), "Northern Italian", r#"["chicken", "cream"]"#),
            recipe(3, Some(15), "Mexican", r#"["beef", "tortilla"]"#),
            recipe(4, None, "Italian", r#"["chicken thigh"]"#),
        ]
    }

    fn ids(recipes: &[Recipe]) -> Vec<i64> {
        recipes.iter().map(|r| r.id).collect()
    }

    fn criteria(pairs: &[(&str, &str)]) -> Criteria {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let engine = FilterEngine::new(&Criteria::new());
        assert!(engine.is_identity());
        assert_eq!(engine.apply(catalog()), catalog());
    }

    #[test]
    fn test_unknown_field_is_inert() {
        for value in ["", "30", "anything"] {
            let engine = FilterEngine::new(&criteria(&[("rating", value)]));
            assert!(engine.is_identity());
            assert_eq!(engine.apply(catalog()), catalog());
        }
    }

    #[test]
    fn test_invalid_value_is_dropped() {
        let with_bad_time =
            FilterEngine::new(&criteria(&[("time", "abc"), ("cuisine", "Italian")]));
        let cuisine_only = FilterEngine::new(&criteria(&[("cuisine", "Italian")]));
        assert_eq!(with_bad_time.strategies(), cuisine_only.strategies());
        assert_eq!(
            ids(&with_bad_time.apply(catalog())),
            ids(&cuisine_only.apply(catalog()))
        );
    }

    #[test]
    fn test_conjunction() {
        let engine = FilterEngine::new(&criteria(&[("time", "30"), ("cuisine", "Italian")]));
        assert_eq!(ids(&engine.apply(catalog())), vec![1]);
    }

    #[test]
    fn test_criteria_order_does_not_change_result() {
        let forward = FilterEngine::new(&criteria(&[
            ("time", "60"),
            ("cuisine", "italian"),
            ("ingredients", "chick"),
        ]));
        let reverse = FilterEngine::new(&criteria(&[
            ("ingredients", "chick"),
            ("cuisine", "italian"),
            ("time", "60"),
        ]));
        assert_eq!(ids(&forward.apply(catalog())), vec![2]);
        assert_eq!(ids(&forward.apply(catalog())), ids(&reverse.apply(catalog())));
    }

    #[test]
    fn test_active_set_follows_insertion_order() {
        let engine = FilterEngine::new(&criteria(&[
            ("taste", "sweet"),
            ("bogus", "x"),
            ("time", "10"),
            ("tools", ""),
        ]));
        let kinds: Vec<FilterKind> = engine.strategies().iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, vec![FilterKind::Taste, FilterKind::Time]);
    }

    #[test]
    fn test_ingredient_any_match() {
        let engine = FilterEngine::new(&criteria(&[("ingredients", "chicken,beef")]));
        assert_eq!(ids(&engine.apply(catalog())), vec![2, 3, 4]);
    }

    #[test]
    fn test_absent_time_never_passes() {
        let engine = FilterEngine::new(&criteria(&[("time", "1000")]));
        assert_eq!(ids(&engine.apply(catalog())), vec![1, 2, 3]);
    }

    #[test]
    fn test_criteria_get_returns_first() {
        let c = criteria(&[("time", "10"), ("time", "20")]);
        assert_eq!(c.get("time"), Some("10"));
        assert_eq!(c.get("cuisine"), None);
        assert_eq!(c.len(), 2);
        assert!(!c.is_empty());
    }
}
