//! List view state for the duty list.
//!
//! The board never edits its list locally. Every successful mutation is
//! followed by a full refetch so concurrent editors converge on what the
//! server holds. Failures land in a single error dialog as a flat string.

use tracing::warn;

use super::DutyClient;
use crate::db::Duty;
use crate::models::MAX_NAME_LEN;

/// Form message for an empty duty.
pub const REQUIRED_MESSAGE: &str = "Please input your duty!";

/// Form message for an over-long duty.
pub const TOO_LONG_MESSAGE: &str = "Duty must be at most 255 characters";

/// Check a name typed into the add or edit form.
///
/// Rejected input never reaches the server.
pub fn validate_form_input(input: &str) -> std::result::Result<&str, &'static str> {
    if input.is_empty() {
        return Err(REQUIRED_MESSAGE);
    }
    if input.chars().count() > MAX_NAME_LEN {
        return Err(TOO_LONG_MESSAGE);
    }
    Ok(input)
}

/// Top-level view state: the list plus the edit and error dialogs.
pub struct DutyBoard {
    client: DutyClient,
    todos: Vec<Duty>,
    editing: Option<Duty>,
    error: Option<String>,
}

impl DutyBoard {
    pub fn new(client: DutyClient) -> Self {
        Self {
            client,
            todos: Vec::new(),
            editing: None,
            error: None,
        }
    }

    /// Create the board and load the list, as a view does when mounted.
    pub async fn mount(client: DutyClient) -> Self {
        let mut board = Self::new(client);
        board.refresh().await;
        board
    }

    pub fn todos(&self) -> &[Duty] {
        &self.todos
    }

    /// The duty open in the edit dialog, if any.
    pub fn editing(&self) -> Option<&Duty> {
        self.editing.as_ref()
    }

    /// Message shown in the error dialog, if it is open.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    fn show_error(&mut self, message: String) {
        warn!(%message, "Duty board error");
        self.error = Some(message);
    }

    /// Replace the list with the server's current one.
    ///
    /// On failure the previous list stays on screen.
    pub async fn refresh(&mut self) {
        match self.client.list().await {
            Ok(todos) => self.todos = todos,
            Err(e) => self.show_error(format!("Error fetching todos: {}", e)),
        }
    }

    /// Add a duty typed into the input form.
    pub async fn add(&mut self, input: &str) -> std::result::Result<(), &'static str> {
        let name = validate_form_input(input)?;

        match self.client.create(name).await {
            Ok(_) => self.refresh().await,
            Err(e) => self.show_error(format!("Error adding todos: {}", e)),
        }
        Ok(())
    }

    pub async fn remove(&mut self, id: &str) {
        match self.client.delete(id).await {
            Ok(_) => self.refresh().await,
            Err(e) => self.show_error(format!("Error deleting todo: {}", e)),
        }
    }

    /// Open the edit dialog for a duty.
    pub fn open_editor(&mut self, duty: Duty) {
        self.editing = Some(duty);
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save the edit dialog.
    ///
    /// The dialog closes once the input passes validation, whatever the
    /// server answers. Without an open dialog nothing is sent.
    pub async fn save_edit(&mut self, input: &str) -> std::result::Result<(), &'static str> {
        let name = validate_form_input(input)?;
        let Some(duty) = self.editing.take() else {
            return Ok(());
        };

        match self.client.update(&duty.id, name).await {
            Ok(_) => self.refresh().await,
            Err(e) => self.show_error(format!("Error updating todo: {}", e)),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_requires_input() {
        assert_eq!(validate_form_input(""), Err(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_form_caps_length() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(validate_form_input(&long), Err(TOO_LONG_MESSAGE));
        assert!(validate_form_input(&long[..MAX_NAME_LEN]).is_ok());
    }
}
