//! Presentational building blocks of server-rendered pages. Each component is
//! a plain value whose [`Display`](fmt::Display) impl writes its HTML; text
//! content and attribute values are always escaped.

use std::fmt;

use desk_core::toast::{ToastOptions, ToastRenderer};

/// Writes `value` with HTML special characters escaped.
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                c => write!(f, "{}", c)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
}

impl NavLink {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for NavLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<a href="{}">{}</a>"#,
            Escaped(&self.href),
            Escaped(&self.label)
        )
    }
}

/// Button returning to the previous page in the browser history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackButton {
    pub label: String,
}

impl Default for BackButton {
    fn default() -> Self {
        Self {
            label: "Back".to_string(),
        }
    }
}

impl fmt::Display for BackButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<button type="button" class="back-button" onclick="history.back()">{}</button>"#,
            Escaped(&self.label)
        )
    }
}

/// A titled dashboard tile with exactly two navigation links.
///
/// The link count is part of the type:
///
/// ```compile_fail
/// use desk_server::ui::components::{DashboardCard, NavLink};
///
/// let card = DashboardCard {
///     title: "Customers".to_string(),
///     links: [NavLink::new("/a", "A")],
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardCard {
    pub title: String,
    pub links: [NavLink; 2],
}

impl fmt::Display for DashboardCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [first, second] = &self.links;
        write!(
            f,
            r#"<section class="card"><h2>{}</h2><nav class="card-links">{}{}</nav></section>"#,
            Escaped(&self.title),
            first,
            second
        )
    }
}

/// Toolbar entry, underlined on hover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarLink(pub NavLink);

impl fmt::Display for ToolbarLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<a class="toolbar-link hover-underline" href="{}">{}</a>"#,
            Escaped(&self.0.href),
            Escaped(&self.0.label)
        )
    }
}

pub const LOGO_ASSET: &str = "/assets/logo.svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logo;

impl fmt::Display for Logo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<img class="logo" src="{}" alt="desk" width="120" height="32">"#,
            LOGO_ASSET
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footer;

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            r#"<footer class="footer">Built with <a href="https://www.rust-lang.org">Rust</a></footer>"#,
        )
    }
}

/// Renders toasts as HTML fragments carrying their display options as data
/// attributes for the browser-side script.
pub struct HtmlToastRenderer;

impl HtmlToastRenderer {
    fn fragment(variant: &str, role: &str, message: &str, options: &ToastOptions) -> String {
        format!(
            r#"<div class="toast toast-{}" role="{}" data-duration-ms="{}" data-close-on-click="{}" data-pause-on-hover="{}" data-draggable="{}">{}</div>"#,
            variant,
            role,
            options.duration().as_millis(),
            options.close_on_click(),
            options.pause_on_hover(),
            options.draggable(),
            Escaped(message)
        )
    }
}

impl ToastRenderer for HtmlToastRenderer {
    type Output = String;

    fn success(&mut self, message: &str, options: &ToastOptions) -> String {
        Self::fragment("success", "status", message, options)
    }

    fn error(&mut self, message: &str, options: &ToastOptions) -> String {
        Self::fragment("error", "alert", message, options)
    }
}
