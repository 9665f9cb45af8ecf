use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Number of numbered ingredient/measure slots a record carries
pub const MAX_INGREDIENTS: usize = 20;

/// A meal as returned by TheMealDB.
///
/// Only the identifier is mandatory. Fields the crate does not name
/// (numbered ingredients, image source, modification date, ...) are kept
/// in `extra` so records survive a serialize round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal", default)]
    pub name: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
    #[serde(rename = "strTags", default)]
    pub tags: Option<String>,
    #[serde(rename = "strYoutube", default)]
    pub youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    pub source: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: Option<String>,
}

impl MealRecord {
    pub fn display_name(&self) -> &str {
        non_blank(self.name.as_deref()).unwrap_or("(untitled)")
    }

    pub fn category(&self) -> Option<&str> {
        non_blank(self.category.as_deref())
    }

    pub fn area(&self) -> Option<&str> {
        non_blank(self.area.as_deref())
    }

    pub fn instructions(&self) -> Option<&str> {
        non_blank(self.instructions.as_deref())
    }

    /// Comma separated `strTags` split into a list
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ingredient/measure pairs from the numbered fields, skipping blank slots
    pub fn ingredients(&self) -> Vec<Ingredient> {
        (1..=MAX_INGREDIENTS)
            .filter_map(|i| {
                let name = self.extra_text(&format!("strIngredient{i}"))?;
                let measure = self
                    .extra_text(&format!("strMeasure{i}"))
                    .map(str::to_string);
                Some(Ingredient {
                    name: name.to_string(),
                    measure,
                })
            })
            .collect()
    }

    fn extra_text(&self, key: &str) -> Option<&str> {
        match self.extra.get(key) {
            Some(Value::String(s)) => non_blank(Some(s.as_str())),
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse a TheMealDB response body.
///
/// `{"meals": null}` is the provider's "no results" and maps to an empty
/// list. A body that is not JSON, has no `meals` key, or carries anything
/// other than null or an array of records is malformed.
pub fn parse_meals(body: &str) -> Result<Vec<MealRecord>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("Response is not JSON: {e}")))?;

    let meals = value
        .as_object()
        .ok_or_else(|| Error::MalformedResponse("Response is not a JSON object".to_string()))?
        .get("meals")
        .ok_or_else(|| Error::MalformedResponse("Response has no `meals` field".to_string()))?;

    match meals {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => serde_json::from_value(meals.clone())
            .map_err(|e| Error::MalformedResponse(format!("Invalid meal record: {e}"))),
        other => Err(Error::MalformedResponse(format!(
            "Unexpected `meals` value: {other}"
        ))),
    }
}
