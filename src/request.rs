use log::{debug, warn};

use crate::model::RecipeRequest;
use crate::FormError;

/// Minimum number of non-empty ingredients per submission
pub const MIN_INGREDIENTS: usize = 3;

/// Build a request from raw row values.
///
/// Values are trimmed and empty ones dropped, keeping their order.
pub fn build_request<I, S>(values: I) -> Result<RecipeRequest, FormError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let ingredients: Vec<String> = values
        .into_iter()
        .map(|value| value.as_ref().trim().to_string())
        .filter(|value| !value.is_empty())
        .collect();

    debug!("Collected ingredients: {:?}", ingredients);

    if ingredients.len() < MIN_INGREDIENTS {
        warn!(
            "Validation failed: {} of {} ingredients filled",
            ingredients.len(),
            MIN_INGREDIENTS
        );
        return Err(FormError::Validation {
            found: ingredients.len(),
        });
    }

    Ok(RecipeRequest { ingredients })
}
