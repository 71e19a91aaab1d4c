#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Dialog {
    content: ModalContent,
    visible: bool,
}

/// One reusable message dialog per page load. The dialog is built on the
/// first `show_message` and only hidden, never dropped, afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalNotifier {
    dialog: Option<Dialog>,
    displays: u64,
}

impl ModalNotifier {
    pub fn show_message(&mut self, title: impl Into<String>, message: impl Into<String>) {
        let content = ModalContent {
            title: title.into(),
            message: message.into(),
        };
        tracing::debug!(title = %content.title, "showing message");
        match self.dialog.as_mut() {
            Some(dialog) => {
                dialog.content = content;
                dialog.visible = true;
            }
            None => {
                self.dialog = Some(Dialog {
                    content,
                    visible: true,
                });
            }
        }
        self.displays += 1;
    }

    pub fn close(&mut self) {
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.visible = false;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.dialog.as_ref().is_some_and(|d| d.visible)
    }

    /// Content of the dialog while it is on screen.
    pub fn content(&self) -> Option<&ModalContent> {
        self.dialog
            .as_ref()
            .filter(|d| d.visible)
            .map(|d| &d.content)
    }

    pub fn is_constructed(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn display_count(&self) -> u64 {
        self.displays
    }
}
