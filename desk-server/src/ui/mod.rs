use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use rust_embed::RustEmbed;

use crate::auth::Identity;

pub mod components;

use components::{BackButton, DashboardCard, Footer, Logo, NavLink, ToolbarLink};

pub const ASSETS_URI: &str = "/assets";

#[derive(RustEmbed)]
#[folder = "assets"]
pub struct Asset;

/// Handler for `GET /assets/{*path}`
pub async fn static_file_handler(Path(path): Path<String>) -> impl IntoResponse {
    StaticFile(path)
}

/// Handler for `GET /`
pub async fn dashboard_handler(identity: Identity) -> Html<String> {
    tracing::trace!(user_id = identity.user_id.to_string(), "rendering dashboard");
    Html(dashboard_page())
}

fn dashboard_page() -> String {
    let toolbar = [
        ToolbarLink(NavLink::new("/", "Dashboard")),
        ToolbarLink(NavLink::new("/api/v1/customers", "Customers")),
        ToolbarLink(NavLink::new("/api/v1/jobs", "Jobs")),
    ];
    let cards = [
        DashboardCard {
            title: "Customers".to_string(),
            links: [
                NavLink::new("/api/v1/customers", "Browse customers"),
                NavLink::new("/api/v1/jobs", "Browse jobs"),
            ],
        },
        DashboardCard {
            title: "Account".to_string(),
            links: [
                NavLink::new("/api/v1/identity", "Signed in as"),
                NavLink::new("/health", "Service status"),
            ],
        },
    ];

    let toolbar: String = toolbar.iter().map(ToString::to_string).collect();
    let cards: String = cards.iter().map(ToString::to_string).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>desk</title>
<link rel="stylesheet" href="{assets}/desk.css">
<script defer src="{assets}/toasts.js"></script>
</head>
<body>
<header class="toolbar">{logo}<nav>{toolbar}</nav>{back}</header>
<main class="dashboard">{cards}</main>
<div id="toasts" class="toasts top-right"></div>
{footer}
</body>
</html>
"#,
        assets = ASSETS_URI,
        logo = Logo,
        toolbar = toolbar,
        back = BackButton::default(),
        cards = cards,
        footer = Footer,
    )
}

struct StaticFile<T>(pub T);

impl<T> IntoResponse for StaticFile<T>
where
    T: Into<String>,
{
    fn into_response(self) -> Response {
        let path = self.0.into();
        match Asset::get(path.as_str()) {
            Some(content) => {
                let mime = mime_guess::from_path(&path).first_or_octet_stream();
                (
                    [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                    content.data.into_owned(),
                )
                    .into_response()
            }
            None => (StatusCode::NOT_FOUND, "404").into_response(),
        }
    }
}
