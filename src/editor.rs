//! The generic sub-resource editor.
//!
//! Each independently editable slice of the aggregate (profile+contacts,
//! checklist, technical sheet, company network) gets one editor. The
//! state machine is `Viewing -> Editing -> Saving -> Viewing` on success
//! and `Editing -> Saving -> Editing` on failure, so a failed save never
//! loses the user's input. Every successful save must be followed by a
//! cache invalidation before the view is considered consistent; that
//! wiring lives in the host.

use std::future::Future;

use crate::checklist::ChecklistState;
use crate::error::{FichaError, Result};
use crate::remote::RemoteStore;
use crate::types::{CompanyId, FichaPayload, NetworkConfig, TechnicalSheet};

/// Editor lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorState {
    #[default]
    Viewing,
    Editing,
    Saving,
}

impl EditorState {
    pub fn name(&self) -> &'static str {
        match self {
            EditorState::Viewing => "viewing",
            EditorState::Editing => "editing",
            EditorState::Saving => "saving",
        }
    }
}

/// An aggregate slice that can be edited and written back whole.
///
/// `put` issues one `PUT` of the entire buffer to the sub-resource
/// endpoint; there is no partial patching anywhere in the protocol.
pub trait SubResource: Clone + Send + Sync {
    /// Short name used in log lines.
    fn kind() -> &'static str;

    /// Local validation, run before any write. A failure here never
    /// reaches the wire.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn put<S: RemoteStore>(
        &self,
        store: &S,
        company: CompanyId,
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Owns the local edit buffer and the view/edit mode flag for one
/// sub-resource kind.
#[derive(Debug)]
pub struct SubResourceEditor<T: SubResource> {
    state: EditorState,
    buffer: Option<T>,
}

impl<T: SubResource> SubResourceEditor<T> {
    pub fn new() -> Self {
        Self {
            state: EditorState::Viewing,
            buffer: None,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// The edit buffer, present while editing or saving.
    pub fn buffer(&self) -> Option<&T> {
        self.buffer.as_ref()
    }

    /// Mutable access for in-place edits (e.g. toggling a checklist key).
    pub fn buffer_mut(&mut self) -> Option<&mut T> {
        match self.state {
            EditorState::Editing => self.buffer.as_mut(),
            _ => None,
        }
    }

    /// Copy the cached slice into a private edit buffer. Only valid
    /// while viewing.
    pub fn enter_edit(&mut self, slice: T) -> Result<()> {
        if self.state != EditorState::Viewing {
            return Err(FichaError::InvalidTransition {
                state: self.state.name(),
                action: "enter edit",
            });
        }
        self.buffer = Some(slice);
        self.state = EditorState::Editing;
        Ok(())
    }

    /// Discard the buffer and return to viewing without any write.
    pub fn cancel(&mut self) {
        self.buffer = None;
        self.state = EditorState::Viewing;
    }

    /// Validate and write the whole buffer. On success the editor
    /// returns to viewing and the caller must invalidate the cache; on
    /// failure it stays in editing with the buffer untouched so the
    /// user can retry.
    pub async fn save<S: RemoteStore>(&mut self, store: &S, company: CompanyId) -> Result<()> {
        let buffer = match (self.state, &self.buffer) {
            (EditorState::Editing, Some(buffer)) => buffer.clone(),
            _ => {
                return Err(FichaError::InvalidTransition {
                    state: self.state.name(),
                    action: "save",
                });
            }
        };

        buffer.validate()?;

        self.state = EditorState::Saving;
        match buffer.put(store, company).await {
            Ok(()) => {
                self.state = EditorState::Viewing;
                self.buffer = None;
                tracing::debug!(kind = T::kind(), company = company.0, "sub-resource saved");
                Ok(())
            }
            Err(e) => {
                self.state = EditorState::Editing;
                Err(e)
            }
        }
    }
}

fn require_non_blank(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(FichaError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

impl SubResource for FichaPayload {
    fn kind() -> &'static str {
        "ficha"
    }

    fn validate(&self) -> Result<()> {
        require_non_blank(&self.name, "company name")
    }

    async fn put<S: RemoteStore>(&self, store: &S, company: CompanyId) -> Result<()> {
        store.put_ficha(company, self).await
    }
}

impl SubResource for ChecklistState {
    fn kind() -> &'static str {
        "checklist"
    }

    async fn put<S: RemoteStore>(&self, store: &S, company: CompanyId) -> Result<()> {
        store.put_checklist(company, self).await
    }
}

impl SubResource for TechnicalSheet {
    fn kind() -> &'static str {
        "ficha-tecnica"
    }

    async fn put<S: RemoteStore>(&self, store: &S, company: CompanyId) -> Result<()> {
        store.put_technical_sheet(company, self).await
    }
}

impl SubResource for NetworkConfig {
    fn kind() -> &'static str {
        "isp"
    }

    async fn put<S: RemoteStore>(&self, store: &S, company: CompanyId) -> Result<()> {
        store.put_network(company, self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::ChecklistKey;

    #[test]
    fn test_editor_starts_viewing() {
        let editor: SubResourceEditor<ChecklistState> = SubResourceEditor::new();
        assert_eq!(editor.state(), EditorState::Viewing);
        assert!(editor.buffer().is_none());
    }

    #[test]
    fn test_enter_edit_copies_slice() {
        let mut editor: SubResourceEditor<ChecklistState> = SubResourceEditor::new();
        let mut slice = ChecklistState::default();
        slice.set(ChecklistKey::MapaRed, true);

        editor.enter_edit(slice.clone()).unwrap();
        assert_eq!(editor.state(), EditorState::Editing);
        assert_eq!(editor.buffer(), Some(&slice));
    }

    #[test]
    fn test_enter_edit_twice_rejected() {
        let mut editor: SubResourceEditor<ChecklistState> = SubResourceEditor::new();
        editor.enter_edit(ChecklistState::default()).unwrap();

        let result = editor.enter_edit(ChecklistState::default());
        assert!(matches!(
            result,
            Err(FichaError::InvalidTransition { state: "editing", .. })
        ));
    }

    #[test]
    fn test_cancel_discards_buffer() {
        let mut editor: SubResourceEditor<ChecklistState> = SubResourceEditor::new();
        editor.enter_edit(ChecklistState::default()).unwrap();
        editor.cancel();
        assert_eq!(editor.state(), EditorState::Viewing);
        assert!(editor.buffer().is_none());
    }

    #[test]
    fn test_buffer_mut_only_while_editing() {
        let mut editor: SubResourceEditor<ChecklistState> = SubResourceEditor::new();
        assert!(editor.buffer_mut().is_none());

        editor.enter_edit(ChecklistState::default()).unwrap();
        editor
            .buffer_mut()
            .unwrap()
            .set(ChecklistKey::AccesoRemoto, true);
        assert!(editor.buffer().unwrap().get(ChecklistKey::AccesoRemoto));
    }

    #[test]
    fn test_ficha_validation_requires_name() {
        let payload = FichaPayload {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            payload.validate(),
            Err(FichaError::Validation(_))
        ));

        let payload = FichaPayload {
            name: "Acme".to_string(),
            ..Default::default()
        };
        assert!(payload.validate().is_ok());
    }
}
