//! Add-recipe form submissions.
//!
//! The form arrives as `(name, value)` pairs in document order. Ingredient
//! inputs share the `ingr-` prefix and come in rows of three:
//! description, quantity, unit.

use larder_api::{Ingredient, NewRecipe};

use crate::error::StoreError;

const INGREDIENT_PREFIX: &str = "ingr";

fn field<'a>(entries: &'a [(String, String)], name: &str) -> &'a str {
    entries
        .iter()
        .rev()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.trim())
        .unwrap_or("")
}

fn invalid(msg: impl Into<String>) -> StoreError {
    StoreError::Validation(msg.into())
}

fn parse_quantity(raw: &str) -> Result<Option<f64>, StoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<f64>() {
        Ok(q) if q.is_finite() && q > 0.0 => Ok(Some(q)),
        _ => Err(invalid(format!("Invalid ingredient quantity '{}'", raw))),
    }
}

fn parse_ingredients(entries: &[(String, String)]) -> Result<Vec<Ingredient>, StoreError> {
    let values: Vec<&str> = entries
        .iter()
        .filter(|(k, _)| k.starts_with(INGREDIENT_PREFIX))
        .map(|(_, v)| v.trim())
        .collect();

    let mut ingredients = Vec::with_capacity(values.len().div_ceil(3));
    for row in values.chunks(3) {
        let description = row.first().copied().unwrap_or("");
        let quantity = row.get(1).copied().unwrap_or("");
        let unit = row.get(2).copied().unwrap_or("");

        if description.is_empty() {
            if quantity.is_empty() && unit.is_empty() {
                continue;
            }
            return Err(invalid("Wrong ingredient format! Every ingredient needs a description"));
        }
        ingredients.push(Ingredient {
            quantity: parse_quantity(quantity)?,
            unit: unit.to_string(),
            description: description.to_string(),
        });
    }
    Ok(ingredients)
}

/// Build an upload payload from raw form entries.
pub fn parse_new_recipe(entries: &[(String, String)]) -> Result<NewRecipe, StoreError> {
    let title = field(entries, "title");
    if title.is_empty() {
        return Err(invalid("Title is required"));
    }

    let servings = match field(entries, "servings").parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => return Err(invalid("Servings must be a whole number of at least 1")),
    };
    let cooking_time = field(entries, "cookingTime")
        .parse::<u32>()
        .map_err(|_| invalid("Cooking time must be a whole number of minutes"))?;

    Ok(NewRecipe {
        title: title.to_string(),
        source_url: field(entries, "sourceUrl").to_string(),
        image: field(entries, "image").to_string(),
        publisher: field(entries, "publisher").to_string(),
        cooking_time,
        servings,
        ingredients: parse_ingredients(entries)?,
    })
}
