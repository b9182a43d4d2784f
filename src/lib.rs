pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;
pub mod render;
pub mod request;
pub mod rows;

pub use client::{ApiClient, RecipeService};
pub use config::FormConfig;
pub use controller::{
    Control, EventOutcome, FormController, FormEvent, ResponseArea, SubmitControl, SubmitOutcome,
};
pub use error::FormError;
pub use model::{normalize_envelope, RecipeRecord, RecipeRequest};
pub use rows::{IngredientRow, RowId, RowManager};

/// Generate a recipe from a list of ingredients without going through the form.
///
/// Uses configuration from `recipe-form.toml` and `RECIPE_FORM__*` variables.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), recipe_form::FormError> {
/// let recipe = recipe_form::generate_recipe(&["ovo", "farinha", "leite"]).await?;
/// println!("{}", recipe.title);
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipe<S: AsRef<str>>(ingredients: &[S]) -> Result<RecipeRecord, FormError> {
    let config = FormConfig::load()?;
    let request = request::build_request(ingredients)?;
    ApiClient::new(&config)?.fetch_recipe(&request).await
}
