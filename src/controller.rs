use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, warn};

use crate::client::{ApiClient, RecipeService};
use crate::config::FormConfig;
use crate::model::{normalize_envelope, RecipeRecord};
use crate::render::{render_outcome, render_rows, LOADING_TEXT, VALIDATION_MESSAGE};
use crate::request::build_request;
use crate::rows::{RowId, RowManager};
use crate::FormError;

pub const SUBMIT_IDLE_LABEL: &str = "Gerar Receita";
pub const SUBMIT_BUSY_LABEL: &str = "Gerando...";

/// Buttons of the form, addressed by their element id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    AddIngredient,
    GenerateRecipe,
    ClearIngredients,
}

impl Control {
    pub fn as_str(&self) -> &str {
        match self {
            Control::AddIngredient => "add-ingredient-btn",
            Control::GenerateRecipe => "generate-recipe-btn",
            Control::ClearIngredients => "clear-ingredients-btn",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "add-ingredient-btn" => Some(Control::AddIngredient),
            "generate-recipe-btn" => Some(Control::GenerateRecipe),
            "clear-ingredients-btn" => Some(Control::ClearIngredients),
            _ => None,
        }
    }
}

/// User interactions the controller reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    AddRow,
    RemoveRow(RowId),
    Clear,
    Edit(RowId, String),
    Submit,
}

/// What a handled event did
#[derive(Debug)]
pub enum EventOutcome {
    RowAdded(RowId),
    RowRemoved(bool),
    Cleared,
    Edited(bool),
    Submitted(SubmitOutcome),
}

/// Result of a submit action
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A recipe was generated and rendered
    Success(RecipeRecord),
    /// Validation, network or response failure; the message is on screen
    Failed(FormError),
    /// Another submission was still in flight
    Ignored,
}

/// State of the generate button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

impl SubmitControl {
    fn idle() -> Self {
        SubmitControl {
            enabled: true,
            label: SUBMIT_IDLE_LABEL.to_string(),
        }
    }

    fn busy() -> Self {
        SubmitControl {
            enabled: false,
            label: SUBMIT_BUSY_LABEL.to_string(),
        }
    }
}

/// Contents of the response area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseArea {
    pub html: String,
    pub hidden: bool,
    pub is_error: bool,
}

impl Default for ResponseArea {
    fn default() -> Self {
        ResponseArea {
            html: String::new(),
            hidden: true,
            is_error: false,
        }
    }
}

#[derive(Debug)]
struct FormState {
    rows: RowManager,
    submit: SubmitControl,
    response: ResponseArea,
    alert: Option<String>,
    in_flight: bool,
}

/// Owns the form state and routes events to rows, client and renderer.
///
/// State is locked only between await points, so concurrent handlers can
/// share one controller through `&self`.
pub struct FormController {
    state: Mutex<FormState>,
    service: Box<dyn RecipeService>,
}

/// Restores the generate button when a submission ends, including when the
/// submitting future is dropped mid-flight.
struct InFlightGuard<'a> {
    state: &'a Mutex<FormState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.in_flight = false;
        state.submit = SubmitControl::idle();
    }
}

impl FormController {
    pub fn new(config: &FormConfig, service: impl RecipeService + 'static) -> Self {
        let rows = RowManager::new(config.initial_rows());
        info!("Form ready with {} ingredient rows", rows.len());
        FormController {
            state: Mutex::new(FormState {
                rows,
                submit: SubmitControl::idle(),
                response: ResponseArea::default(),
                alert: None,
                in_flight: false,
            }),
            service: Box::new(service),
        }
    }

    /// Build a controller talking to the configured HTTP endpoint
    pub fn from_config(config: &FormConfig) -> Result<Self, FormError> {
        let client = ApiClient::new(config)?;
        Ok(Self::new(config, client))
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn handle(&self, event: FormEvent) -> EventOutcome {
        match event {
            FormEvent::AddRow => EventOutcome::RowAdded(self.add_row()),
            FormEvent::RemoveRow(id) => EventOutcome::RowRemoved(self.remove_row(id)),
            FormEvent::Clear => {
                self.clear_fields();
                EventOutcome::Cleared
            }
            FormEvent::Edit(id, value) => EventOutcome::Edited(self.set_value(id, value)),
            FormEvent::Submit => EventOutcome::Submitted(self.submit().await),
        }
    }

    /// Dispatch a click on the button with the given element id
    pub async fn click(&self, control_id: &str) -> Result<EventOutcome, FormError> {
        let control = Control::from_id(control_id)
            .ok_or_else(|| FormError::UnknownControl(control_id.to_string()))?;
        let event = match control {
            Control::AddIngredient => FormEvent::AddRow,
            Control::GenerateRecipe => FormEvent::Submit,
            Control::ClearIngredients => FormEvent::Clear,
        };
        Ok(self.handle(event).await)
    }

    pub fn add_row(&self) -> RowId {
        self.state().rows.add_row()
    }

    pub fn remove_row(&self, id: RowId) -> bool {
        self.state().rows.remove_row(id)
    }

    pub fn clear_fields(&self) {
        self.state().rows.clear_all_fields();
    }

    pub fn set_value(&self, id: RowId, value: impl Into<String>) -> bool {
        self.state().rows.set_value(id, value)
    }

    /// Validate the rows, send them and render whatever comes back
    pub async fn submit(&self) -> SubmitOutcome {
        let request = {
            let mut state = self.state();
            if state.in_flight {
                warn!("Submission already in progress, ignoring");
                return SubmitOutcome::Ignored;
            }
            state.alert = None;

            let built = build_request(state.rows.values());
            match built {
                Ok(request) => {
                    state.in_flight = true;
                    state.submit = SubmitControl::busy();
                    state.response = ResponseArea {
                        html: LOADING_TEXT.to_string(),
                        hidden: false,
                        is_error: false,
                    };
                    request
                }
                Err(err) => {
                    state.alert = Some(VALIDATION_MESSAGE.to_string());
                    state.response.hidden = true;
                    return SubmitOutcome::Failed(err);
                }
            }
        };

        let _guard = InFlightGuard { state: &self.state };

        let outcome = match self.service.generate(&request).await {
            Ok(payload) => normalize_envelope(&payload),
            Err(err) => {
                error!("Request failed: {}", err);
                Err(err)
            }
        };

        {
            let mut state = self.state();
            state.response = ResponseArea {
                html: render_outcome(&outcome),
                hidden: false,
                is_error: outcome.is_err(),
            };
            if outcome.is_ok() {
                state.rows.clear_all_fields();
            }
        }
        debug!("Submission finished");

        match outcome {
            Ok(record) => SubmitOutcome::Success(record),
            Err(err) => SubmitOutcome::Failed(err),
        }
    }

    pub fn rows(&self) -> RowManager {
        self.state().rows.clone()
    }

    pub fn rows_markup(&self) -> String {
        render_rows(&self.state().rows)
    }

    pub fn submit_control(&self) -> SubmitControl {
        self.state().submit.clone()
    }

    pub fn response(&self) -> ResponseArea {
        self.state().response.clone()
    }

    /// Pending user alert, if any
    pub fn alert(&self) -> Option<String> {
        self.state().alert.clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeRequest;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    struct FixedService(Value);

    #[async_trait]
    impl RecipeService for FixedService {
        async fn generate(&self, _request: &RecipeRequest) -> Result<Value, FormError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_control_ids_round_trip() {
        for control in [
            Control::AddIngredient,
            Control::GenerateRecipe,
            Control::ClearIngredients,
        ] {
            assert_eq!(Control::from_id(control.as_str()), Some(control));
        }
        assert_eq!(Control::from_id("response"), None);
    }

    #[test]
    fn test_initial_state() {
        let controller = FormController::new(&FormConfig::default(), FixedService(Value::Null));
        assert_eq!(controller.rows().len(), 3);
        assert!(controller.rows().rows().iter().all(|r| !r.remove_enabled));
        assert_eq!(controller.submit_control(), SubmitControl::idle());
        assert!(controller.response().hidden);
        assert!(controller.alert().is_none());
    }

    #[tokio::test]
    async fn test_unknown_control_id() {
        let controller = FormController::new(&FormConfig::default(), FixedService(Value::Null));
        let result = controller.click("delete-everything-btn").await;
        assert!(matches!(result, Err(FormError::UnknownControl(_))));
    }

    #[tokio::test]
    async fn test_success_clears_fields() {
        let controller = FormController::new(
            &FormConfig::default(),
            FixedService(json!({"titulo": "X", "ingredientes": ["a"], "modo_de_fazer": ["s1"]})),
        );
        for (id, text) in controller.rows().ids().into_iter().zip(["a", "b", "c"]) {
            controller.set_value(id, text);
        }

        let outcome = controller.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Success(_)));
        assert!(controller.rows().values().iter().all(|v| v.is_empty()));
        assert!(!controller.response().is_error);
        assert!(!controller.is_submitting());
    }
}
