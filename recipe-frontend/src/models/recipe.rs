//! Recipe model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored recipe. Identity is an externally assigned string id such as
/// `rec_101`; list-valued fields are kept as comma-separated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub cuisine: String,
    pub is_vegetarian: bool,
    pub prep_time_minutes: i64,
    pub ingredients: String,
    pub difficulty: String,
    pub instructions: String,
    pub tags: String,
}

impl Recipe {
    /// The sample row inserted into an empty store.
    pub fn sample() -> Self {
        Self {
            id: "rec_101".to_string(),
            name: "Paneer Butter Masala".to_string(),
            cuisine: "Indian".to_string(),
            is_vegetarian: true,
            prep_time_minutes: 40,
            ingredients: "paneer, tomato, butter, cream".to_string(),
            difficulty: "Medium".to_string(),
            instructions: "Cook tomatoes. Add paneer. Add cream and spices.".to_string(),
            tags: "dinner,party".to_string(),
        }
    }

    pub fn ingredient_list(&self) -> Vec<&str> {
        split_list(&self.ingredients)
    }

    pub fn tag_list(&self) -> Vec<&str> {
        split_list(&self.tags)
    }
}

fn split_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_fields_are_split_and_trimmed() {
        let recipe = Recipe::sample();

        assert_eq!(
            recipe.ingredient_list(),
            vec!["paneer", "tomato", "butter", "cream"]
        );
        assert_eq!(recipe.tag_list(), vec!["dinner", "party"]);
    }

    #[test]
    fn test_empty_items_are_dropped() {
        let recipe = Recipe {
            tags: " , quick,, ".to_string(),
            ..Recipe::sample()
        };

        assert_eq!(recipe.tag_list(), vec!["quick"]);
    }
}
