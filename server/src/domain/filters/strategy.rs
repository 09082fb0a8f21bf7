//! Per-field recipe predicates
//!
//! Each [`Strategy`] validates its raw value once, at construction. A built
//! strategy never fails at evaluation time.

use std::fmt;

use thiserror::Error;

use crate::domain::recipe::Recipe;

/// Filterable recipe fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Time,
    Cuisine,
    Difficulty,
    Ingredients,
    Tools,
    Taste,
}

impl FilterKind {
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Time,
        FilterKind::Tools,
        FilterKind::Ingredients,
        FilterKind::Taste,
        FilterKind::Cuisine,
        FilterKind::Difficulty,
    ];

    /// Registry lookup. Names outside the closed set are not filterable.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "time" => Some(Self::Time),
            "cuisine" => Some(Self::Cuisine),
            "difficulty" => Some(Self::Difficulty),
            "ingredients" => Some(Self::Ingredients),
            "tools" => Some(Self::Tools),
            "taste" => Some(Self::Taste),
            _ => None,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Cuisine => "cuisine",
            Self::Difficulty => "difficulty",
            Self::Ingredients => "ingredients",
            Self::Tools => "tools",
            Self::Taste => "taste",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw criterion value rejected by its strategy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCriterion {
    #[error("time must be a positive integer, got {0:?}")]
    Time(String),
    #[error("{0} must be non-empty")]
    Empty(FilterKind),
}

/// A validated predicate over one recipe field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Recipe time present and at most this many minutes
    MaxTime(i64),
    /// Lower-cased needle contained in the recipe cuisine
    Cuisine(String),
    /// Lower-cased needle contained in the recipe difficulty
    Difficulty(String),
    /// Any token is a substring of any recipe ingredient
    Ingredients(Vec<String>),
    /// Any token equals any recipe tool
    Tools(Vec<String>),
    /// Any token equals any recipe taste
    Taste(Vec<String>),
}

impl Strategy {
    pub fn new(kind: FilterKind, raw: &str) -> Result<Self, InvalidCriterion> {
        match kind {
            FilterKind::Time => parse_positive_minutes(raw).map(Self::MaxTime),
            FilterKind::Cuisine => needle(kind, raw).map(Self::Cuisine),
            FilterKind::Difficulty => needle(kind, raw).map(Self::Difficulty),
            FilterKind::Ingredients => tokens(kind, raw).map(Self::Ingredients),
            FilterKind::Tools => tokens(kind, raw).map(Self::Tools),
            FilterKind::Taste => tokens(kind, raw).map(Self::Taste),
        }
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            Self::MaxTime(_) => FilterKind::Time,
            Self::Cuisine(_) => FilterKind::Cuisine,
            Self::Difficulty(_) => FilterKind::Difficulty,
            Self::Ingredients(_) => FilterKind::Ingredients,
            Self::Tools(_) => FilterKind::Tools,
            Self::Taste(_) => FilterKind::Taste,
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            Self::MaxTime(max) => recipe.time.is_some_and(|t| t <= *max),
            Self::Cuisine(needle) => contains_folded(recipe.cuisine.as_deref(), needle),
            Self::Difficulty(needle) => contains_folded(recipe.difficulty.as_deref(), needle),
            Self::Ingredients(wanted) => {
                let have = lowered(recipe.ingredients());
                wanted
                    .iter()
                    .any(|w| have.iter().any(|h| h.contains(w.as_str())))
            }
            Self::Tools(wanted) => any_equal(wanted, &lowered(recipe.tools())),
            Self::Taste(wanted) => any_equal(wanted, &lowered(recipe.taste())),
        }
    }
}

fn parse_positive_minutes(raw: &str) -> Result<i64, InvalidCriterion> {
    let invalid = || InvalidCriterion::Time(raw.to_string());
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match raw.parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(invalid()),
    }
}

// The needle keeps surrounding whitespace; only emptiness is judged on the
// trimmed value.
fn needle(kind: FilterKind, raw: &str) -> Result<String, InvalidCriterion> {
    if raw.trim().is_empty() {
        return Err(InvalidCriterion::Empty(kind));
    }
    Ok(raw.to_lowercase())
}

fn tokens(kind: FilterKind, raw: &str) -> Result<Vec<String>, InvalidCriterion> {
    let list: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect();
    if list.is_empty() {
        return Err(InvalidCriterion::Empty(kind));
    }
    Ok(list)
}

fn contains_folded(field: Option<&str>, needle: &str) -> bool {
    field.unwrap_or_default().to_lowercase().contains(needle)
}

fn lowered(values: Vec<String>) -> Vec<String> {
    values.into_iter().map(|v| v.to_lowercase()).collect()
}

fn any_equal(wanted: &[String], have: &[String]) -> bool {
    wanted.iter().any(|w| have.contains(w))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: 1,
            name: "Chicken Parmesan".to_string(),
            time: Some(30),
            cuisine: Some("Northern Italian Cuisine".to_string()),
            difficulty: Some("Medium".to_string()),
            tools: Some(r#"["Oven", "stove"]"#.to_string()),
            ingredients: Some(r#"["Chicken breast", "parmesan"]"#.to_string()),
            taste: Some(r#"["Savory"]"#.to_string()),
            ..Default::default()
        }
    }

    fn build(kind: FilterKind, raw: &str) -> Strategy {
        Strategy::new(kind, raw).unwrap()
    }

    #[test]
    fn test_registry_lookup() {
        for kind in FilterKind::ALL {
            assert_eq!(FilterKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(FilterKind::from_name("rating"), None);
        assert_eq!(FilterKind::from_name("Time"), None);
    }

    #[test]
    fn test_time_validation() {
        assert_eq!(build(FilterKind::Time, "45"), Strategy::MaxTime(45));
        assert!(Strategy::new(FilterKind::Time, "0").is_err());
        assert!(Strategy::new(FilterKind::Time, "-5").is_err());
        assert!(Strategy::new(FilterKind::Time, "+5").is_err());
        assert!(Strategy::new(FilterKind::Time, " 5").is_err());
        assert!(Strategy::new(FilterKind::Time, "abc").is_err());
        assert!(Strategy::new(FilterKind::Time, "1.5").is_err());
        assert!(Strategy::new(FilterKind::Time, "").is_err());
        assert!(Strategy::new(FilterKind::Time, "99999999999999999999").is_err());
    }

    #[test]
    fn test_time_match_is_inclusive_and_requires_time() {
        assert!(build(FilterKind::Time, "30").matches(&recipe()));
        assert!(!build(FilterKind::Time, "29").matches(&recipe()));

        let untimed = Recipe {
            time: None,
            ..recipe()
        };
        assert!(!build(FilterKind::Time, "1000").matches(&untimed));
    }

    #[test]
    fn test_cuisine_substring_case_insensitive() {
        assert!(build(FilterKind::Cuisine, "italian").matches(&recipe()));
        assert!(build(FilterKind::Cuisine, "ITALIAN").matches(&recipe()));
        assert!(!build(FilterKind::Cuisine, "french").matches(&recipe()));

        let no_cuisine = Recipe {
            cuisine: None,
            ..recipe()
        };
        assert!(!build(FilterKind::Cuisine, "italian").matches(&no_cuisine));
    }

    #[test]
    fn test_text_needle_rejects_blank() {
        assert_eq!(
            Strategy::new(FilterKind::Cuisine, "   "),
            Err(InvalidCriterion::Empty(FilterKind::Cuisine))
        );
        assert!(Strategy::new(FilterKind::Difficulty, "").is_err());
    }

    #[test]
    fn test_text_needle_keeps_inner_whitespace() {
        assert_eq!(
            build(FilterKind::Cuisine, " Italian"),
            Strategy::Cuisine(" italian".to_string())
        );
        assert!(build(FilterKind::Cuisine, " Italian").matches(&recipe()));
        assert!(!build(FilterKind::Cuisine, "Italian ").matches(&Recipe {
            cuisine: Some("Italian".to_string()),
            ..recipe()
        }));
    }

    #[test]
    fn test_difficulty_substring() {
        assert!(build(FilterKind::Difficulty, "med").matches(&recipe()));
        assert!(!build(FilterKind::Difficulty, "hard").matches(&recipe()));
    }

    #[test]
    fn test_tokenization() {
        assert_eq!(
            build(FilterKind::Ingredients, " Chicken , ,BEEF,"),
            Strategy::Ingredients(vec!["chicken".to_string(), "beef".to_string()])
        );
        assert!(Strategy::new(FilterKind::Tools, " , ,").is_err());
        assert!(Strategy::new(FilterKind::Taste, "").is_err());
    }

    #[test]
    fn test_ingredients_partial_any_match() {
        assert!(build(FilterKind::Ingredients, "chick").matches(&recipe()));
        assert!(build(FilterKind::Ingredients, "beef,parm").matches(&recipe()));
        assert!(!build(FilterKind::Ingredients, "beef,pork").matches(&recipe()));
    }

    #[test]
    fn test_tools_exact_any_match() {
        assert!(build(FilterKind::Tools, "oven").matches(&recipe()));
        assert!(build(FilterKind::Tools, "grill, STOVE").matches(&recipe()));
        assert!(!build(FilterKind::Tools, "ove").matches(&recipe()));
    }

    #[test]
    fn test_taste_exact_any_match() {
        assert!(build(FilterKind::Taste, "savory").matches(&recipe()));
        assert!(!build(FilterKind::Taste, "sav").matches(&recipe()));
        assert!(!build(FilterKind::Taste, "sweet").matches(&recipe()));
    }

    #[test]
    fn test_multi_value_fields_absent_never_match() {
        let bare = Recipe {
            id: 2,
            name: "Water".to_string(),
            ..Default::default()
        };
        assert!(!build(FilterKind::Tools, "oven").matches(&bare));
        assert!(!build(FilterKind::Ingredients, "a").matches(&bare));
        assert!(!build(FilterKind::Taste, "sweet").matches(&bare));
    }

    #[test]
    fn test_strategy_kind() {
        for kind in FilterKind::ALL {
            let raw = if kind == FilterKind::Time { "10" } else { "x" };
            assert_eq!(build(kind, raw).kind(), kind);
        }
    }
}
