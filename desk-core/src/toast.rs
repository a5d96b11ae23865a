//! Transient on-screen notifications.

use std::time::Duration;

use serde::Serialize;

/// How long every toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Error,
}

impl ToastVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopRight,
}

/// Display options shared by all toasts. They cannot be overridden per
/// message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastOptions {
    duration_ms: u64,
    position: ToastPosition,
    close_on_click: bool,
    pause_on_hover: bool,
    draggable: bool,
}

impl ToastOptions {
    const FIXED: ToastOptions = ToastOptions {
        duration_ms: TOAST_DURATION.as_millis() as u64,
        position: ToastPosition::TopRight,
        close_on_click: true,
        pause_on_hover: true,
        draggable: true,
    };

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn position(&self) -> ToastPosition {
        self.position
    }

    pub fn close_on_click(&self) -> bool {
        self.close_on_click
    }

    pub fn pause_on_hover(&self) -> bool {
        self.pause_on_hover
    }

    pub fn draggable(&self) -> bool {
        self.draggable
    }
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self::FIXED
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    variant: ToastVariant,
    message: String,
    options: ToastOptions,
}

impl Toast {
    pub fn new(variant: ToastVariant, message: impl Into<String>) -> Self {
        Self {
            variant,
            message: message.into(),
            options: ToastOptions::FIXED,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastVariant::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastVariant::Error, message)
    }

    pub fn variant(&self) -> ToastVariant {
        self.variant
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn options(&self) -> &ToastOptions {
        &self.options
    }

    /// Renders through exactly one of the renderer's variant paths.
    pub fn render_with<R: ToastRenderer>(&self, renderer: &mut R) -> R::Output {
        match self.variant {
            ToastVariant::Success => renderer.success(&self.message, &self.options),
            ToastVariant::Error => renderer.error(&self.message, &self.options),
        }
    }
}

/// Turns a toast into something displayable, one method per variant.
pub trait ToastRenderer {
    type Output;

    fn success(&mut self, message: &str, options: &ToastOptions) -> Self::Output;
    fn error(&mut self, message: &str, options: &ToastOptions) -> Self::Output;
}
