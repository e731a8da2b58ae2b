//! User-facing collaborators: confirmation before destructive actions and
//! fire-and-forget warnings.

use log::warn;
use std::rc::Rc;

/// Answer to a confirmation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Accepted,
    Cancelled,
}

/// Asks the user to confirm a destructive operation.
pub trait ConfirmationPrompt {
    fn confirm(&self, message: &str) -> Confirmation;
}

/// Surfaces a warning to the user. Nothing is returned.
pub trait WarningNotifier {
    fn notify(&self, title: &str, message: &str);
}

impl<T: ConfirmationPrompt + ?Sized> ConfirmationPrompt for Rc<T> {
    fn confirm(&self, message: &str) -> Confirmation {
        (**self).confirm(message)
    }
}

impl<T: ConfirmationPrompt + ?Sized> ConfirmationPrompt for &T {
    fn confirm(&self, message: &str) -> Confirmation {
        (**self).confirm(message)
    }
}

impl<T: WarningNotifier + ?Sized> WarningNotifier for Rc<T> {
    fn notify(&self, title: &str, message: &str) {
        (**self).notify(title, message)
    }
}

/// Prompt that always gives the same answer. Used by headless callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConfirmation(pub Confirmation);

impl ConfirmationPrompt for FixedConfirmation {
    fn confirm(&self, _message: &str) -> Confirmation {
        self.0
    }
}

/// Writes warnings to the log instead of a dialog.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl WarningNotifier for LogNotifier {
    fn notify(&self, title: &str, message: &str) {
        warn!("event=user_warning module=view_model status=warning title={title:?} message={message:?}");
    }
}
