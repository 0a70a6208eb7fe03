pub mod controller;
pub mod form;

pub use controller::SubscriptionPage;
pub use form::FormFields;

/// Navigation outcome of a page operation. The caller owns actual
/// navigation; the page only reports that the session must move to login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nav {
    Stay,
    Redirect(String),
}

/// Where a click landed relative to the modal surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The modal backdrop itself. Closes the modal.
    Backdrop,
    /// Inside the modal content. Must not close it.
    ModalContent,
    Elsewhere,
}

/// Modal visibility. An open modal is in create mode when the form's hidden
/// id field is empty and in edit mode otherwise; the id field is the sole
/// discriminator between the two submission paths.
#[derive(Clone, Debug, Default)]
pub enum ModalState {
    #[default]
    Hidden,
    Open {
        form: FormFields,
    },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open { .. })
    }
}

/// Blocking yes/no confirmation shown before destructive actions.
#[cfg_attr(test, mockall::automock)]
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

/// Rendered page fragments for one frame.
#[derive(Clone, Debug)]
pub struct PageView {
    pub table_html: String,
    /// Empty when the modal is hidden.
    pub modal_html: String,
    pub messages_html: String,
    pub status_html: String,
}
