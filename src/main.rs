use log::{debug, error};
use std::env;
use std::process::ExitCode;

use recipe_form::{FormConfig, FormController, SubmitOutcome};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    // Every argument is one ingredient
    let ingredients: Vec<String> = env::args().skip(1).collect();
    if ingredients.is_empty() {
        return Err("Usage: recipe-form <ingredient> <ingredient> <ingredient> [...]".into());
    }

    let config = FormConfig::load()?;
    debug!("{:?}", config);
    let controller = FormController::from_config(&config)?;

    while controller.rows().len() < ingredients.len() {
        controller.add_row();
    }
    for (id, ingredient) in controller.rows().ids().into_iter().zip(ingredients) {
        controller.set_value(id, ingredient);
    }

    match controller.submit().await {
        SubmitOutcome::Success(_) => {
            println!("{}", controller.response().html);
            Ok(ExitCode::SUCCESS)
        }
        SubmitOutcome::Failed(err) => {
            error!("{}", err);
            match controller.alert() {
                Some(alert) => eprintln!("{}", alert),
                None => println!("{}", controller.response().html),
            }
            Ok(ExitCode::FAILURE)
        }
        SubmitOutcome::Ignored => Ok(ExitCode::FAILURE),
    }
}
