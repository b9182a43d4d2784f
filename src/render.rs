//! HTML markup for the response area and the ingredient rows.
//!
//! Every function here is a pure function of its input; callers overwrite
//! the previous content with the returned markup.

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::error;
use serde_json::Value;

use crate::model::RecipeRecord;
use crate::rows::RowManager;
use crate::FormError;

pub const LOADING_TEXT: &str = "Carregando...";
pub const VALIDATION_MESSAGE: &str =
    "Por favor, preencha pelo menos três campos de ingrediente para gerar uma receita!";
pub const UNEXPECTED_FORMAT_MESSAGE: &str = "Erro: Formato de resposta inesperado da API.";
pub const RENDER_FAILED_MESSAGE: &str = "Erro ao renderizar a receita recebida.";

const INPUT_PLACEHOLDER: &str = "Informe um ingrediente culinário...";
const REMOVE_LABEL: &str = "Excluir";

/// Markup for a successfully generated recipe
pub fn render_success(record: &RecipeRecord) -> String {
    let mut html = format!(
        "<h2 class=\"text-2xl font-bold mb-4 text-gray-800\">{}</h2>",
        encode_text(&record.title)
    );

    let servings = record.servings();
    let prep_time = record.prep_time();
    if servings.is_some() || prep_time.is_some() {
        html.push_str("<div class=\"recipe-meta flex items-center text-gray-700 mb-4 space-x-4\">");
        if let Some(servings) = servings {
            html.push_str(&format!(
                "<p class=\"flex items-center\"><span class=\"mr-2 text-xl\">🍽️</span> {}</p>",
                encode_text(servings)
            ));
        }
        if let Some(prep_time) = prep_time {
            html.push_str(&format!(
                "<p class=\"flex items-center\"><span class=\"mr-2 text-xl\">⏱️</span> {}</p>",
                encode_text(prep_time)
            ));
        }
        html.push_str("</div>");
    }

    if !record.ingredients.is_empty() {
        html.push_str("<h3 class=\"text-xl font-semibold mb-2 text-gray-700\">Ingredientes:</h3>");
        html.push_str("<ul class=\"list-disc list-inside text-gray-700 mb-4\">");
        for ingredient in &record.ingredients {
            html.push_str(&format!("<li class=\"mb-1\">{}</li>", encode_text(ingredient)));
        }
        html.push_str("</ul>");
    }

    if !record.steps.is_empty() {
        html.push_str("<h3 class=\"text-xl font-semibold mb-2 text-gray-700\">Modo de Fazer:</h3>");
        html.push_str("<ol class=\"list-decimal list-inside text-gray-700 space-y-2\">");
        for step in &record.steps {
            html.push_str(&format!("<li>{}</li>", encode_text(step)));
        }
        html.push_str("</ol>");
    }

    html
}

/// A single styled error block
pub fn render_error(message: &str) -> String {
    format!(
        "<p class=\"error text-red-600 font-semibold\">{}</p>",
        encode_text(message)
    )
}

/// Validate a raw payload as a record and render it
pub fn render_record(value: &Value) -> Result<String, FormError> {
    match RecipeRecord::from_value(value) {
        Some(record) => Ok(render_success(&record)),
        None => {
            error!("Cannot render recipe, unexpected data: {}", value);
            Err(FormError::RenderValidation)
        }
    }
}

/// User-facing text for an error
pub fn error_message(err: &FormError) -> String {
    match err {
        FormError::Validation { .. } => VALIDATION_MESSAGE.to_string(),
        FormError::Network(message) => format!(
            "Ocorreu um erro ao tentar comunicar com o servidor: {}",
            message
        ),
        FormError::Api(message) => format!("Erro da API: {}", message),
        FormError::UnexpectedShape => UNEXPECTED_FORMAT_MESSAGE.to_string(),
        FormError::RenderValidation => RENDER_FAILED_MESSAGE.to_string(),
        other => other.to_string(),
    }
}

/// Markup for the outcome of a submission
pub fn render_outcome(outcome: &Result<RecipeRecord, FormError>) -> String {
    match outcome {
        Ok(record) => render_success(record),
        Err(err) => render_error(&error_message(err)),
    }
}

/// Markup for the ingredient rows, one input plus remove button each
pub fn render_rows(rows: &RowManager) -> String {
    let mut html = String::new();
    for row in rows.rows() {
        html.push_str(&format!(
            "<div class=\"ingredient-row flex items-center space-x-2\" data-row=\"{}\">",
            row.id
        ));
        html.push_str(&format!(
            "<input type=\"text\" class=\"ingredient ingredient-input flex-1 p-2 border border-gray-300 rounded\" placeholder=\"{}\" value=\"{}\">",
            INPUT_PLACEHOLDER,
            encode_double_quoted_attribute(&row.value)
        ));
        html.push_str(&format!(
            "<button class=\"btn-danger bg-red-500 text-white font-bold py-2 px-4 rounded text-sm\"{}>{}</button>",
            if row.remove_enabled { "" } else { " disabled" },
            REMOVE_LABEL
        ));
        html.push_str("</div>");
    }
    html
}
