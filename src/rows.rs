use std::fmt;

use log::{debug, warn};

/// Minimum number of rows that stay on the form
pub const MIN_ROWS: usize = 3;

/// Stable identifier of an ingredient row. Never reused within a manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// One ingredient text field plus its remove control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientRow {
    pub id: RowId,
    pub value: String,
    pub remove_enabled: bool,
}

/// Ordered registry of ingredient rows
#[derive(Debug, Clone)]
pub struct RowManager {
    rows: Vec<IngredientRow>,
    next_id: u64,
}

impl Default for RowManager {
    fn default() -> Self {
        Self::new(MIN_ROWS)
    }
}

impl RowManager {
    /// Create a manager with `initial` empty rows (at least [`MIN_ROWS`])
    pub fn new(initial: usize) -> Self {
        let mut manager = RowManager {
            rows: Vec::new(),
            next_id: 0,
        };
        for _ in 0..initial.max(MIN_ROWS) {
            manager.push_empty();
        }
        manager.refresh_remove_buttons_state();
        manager
    }

    fn push_empty(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.rows.push(IngredientRow {
            id,
            value: String::new(),
            remove_enabled: true,
        });
        id
    }

    /// Append an empty row and re-evaluate the remove controls
    pub fn add_row(&mut self) -> RowId {
        let id = self.push_empty();
        debug!("Added {}", id);
        self.refresh_remove_buttons_state();
        id
    }

    /// Remove the row owning `id`.
    ///
    /// Returns `false` when the row is unknown or its remove control is
    /// disabled. Remove controls are re-evaluated either way.
    pub fn remove_row(&mut self, id: RowId) -> bool {
        let removed = match self.position(id) {
            Some(index) if self.rows[index].remove_enabled => {
                self.rows.remove(index);
                debug!("Removed {}", id);
                true
            }
            Some(_) => {
                warn!("Remove control of {} is disabled", id);
                false
            }
            None => {
                warn!("Could not find {} to remove", id);
                false
            }
        };
        self.refresh_remove_buttons_state();
        removed
    }

    /// Disable every remove control while the row count is at or below the minimum
    pub fn refresh_remove_buttons_state(&mut self) {
        let enabled = self.rows.len() > MIN_ROWS;
        for row in &mut self.rows {
            row.remove_enabled = enabled;
        }
    }

    /// Empty every row's text without removing rows
    pub fn clear_all_fields(&mut self) {
        for row in &mut self.rows {
            row.value.clear();
        }
        debug!("Cleared {} ingredient fields", self.rows.len());
    }

    /// Replace the text of a row; `false` if the row is unknown
    pub fn set_value(&mut self, id: RowId, value: impl Into<String>) -> bool {
        match self.rows.iter_mut().find(|row| row.id == id) {
            Some(row) => {
                row.value = value.into();
                true
            }
            None => {
                warn!("Could not find {} to edit", id);
                false
            }
        }
    }

    pub fn value(&self, id: RowId) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.id == id)
            .map(|row| row.value.as_str())
    }

    /// Raw row values in display order
    pub fn values(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.value.as_str()).collect()
    }

    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|row| row.id).collect()
    }

    pub fn rows(&self) -> &[IngredientRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id == id)
    }
}
