//! Alert messages for form feedback and error panels.

use maud::{html, Markup, Render};

/// Visual variant of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertVariant {
    Success,
    Error,
    Info,
}

impl AlertVariant {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "alert alert-success",
            Self::Error => "alert alert-error",
            Self::Info => "alert alert-info",
        }
    }
}

/// A dismissible-looking message box.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub message: &'a str,
    pub variant: AlertVariant,
}

impl<'a> Alert<'a> {
    #[must_use]
    pub const fn new(message: &'a str, variant: AlertVariant) -> Self {
        Self { message, variant }
    }

    #[must_use]
    pub const fn success(message: &'a str) -> Self {
        Self::new(message, AlertVariant::Success)
    }

    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self::new(message, AlertVariant::Error)
    }

    #[must_use]
    pub const fn info(message: &'a str) -> Self {
        Self::new(message, AlertVariant::Info)
    }
}

impl Render for Alert<'_> {
    fn render(&self) -> Markup {
        html! {
            div class=(self.variant.class()) role="alert" {
                (self.message)
            }
        }
    }
}
