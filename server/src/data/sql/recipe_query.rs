//! Dynamic recipe queries

use super::{SqlDialect, SqlParams, SqlValue};
use crate::domain::filters::Prefilter;
use crate::utils::sql::contains_pattern;

/// Column list shared by every recipe SELECT, in row tuple order
pub const RECIPE_COLUMNS: &str =
    "id, name, description, image_url, time, cuisine, difficulty, tools, ingredients, taste";

/// Build the storage-level query for a [`Prefilter`].
///
/// Fragments are ANDed; an empty prefilter selects every recipe.
pub fn build_prefilter_query(
    prefilter: &Prefilter,
    dialect: &dyn SqlDialect,
) -> (String, SqlParams) {
    let mut params = SqlParams::default();
    let mut conditions = Vec::new();

    if let Some(max_time) = prefilter.max_time {
        let idx = params.push(SqlValue::Int(max_time));
        conditions.push(format!("time <= {}", dialect.placeholder(idx)));
    }
    for (column, value) in [
        ("cuisine", &prefilter.cuisine),
        ("difficulty", &prefilter.difficulty),
    ] {
        if let Some(value) = value {
            let idx = params.push(SqlValue::Text(contains_pattern(value)));
            conditions.push(dialect.ascii_ilike(column, idx));
        }
    }

    let mut sql = format!("SELECT {} FROM recipes", RECIPE_COLUMNS);
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY id");

    (sql, params)
}
