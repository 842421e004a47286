use crate::PostId;

/// The async action a confirmation dialog runs on accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    DeletePost(PostId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    pub action: DialogAction,
    running: bool,
}

impl ConfirmDialog {
    pub fn delete_post(post_id: PostId, post_title: &str) -> Self {
        Self {
            title: "Delete post".to_string(),
            message: format!("\"{post_title}\" will be removed permanently."),
            confirm_text: "Accept".to_string(),
            cancel_text: "Cancel".to_string(),
            action: DialogAction::DeletePost(post_id),
            running: false,
        }
    }

    /// True once accepted and until the action reports back.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Marks the action as started. Returns it unless already running.
    pub fn accept(&mut self) -> Option<DialogAction> {
        if self.running {
            return None;
        }
        self.running = true;
        Some(self.action.clone())
    }

    pub fn targets(&self, post_id: &PostId) -> bool {
        matches!(&self.action, DialogAction::DeletePost(id) if id == post_id)
    }
}
