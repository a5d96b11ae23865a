use std::convert::Infallible;

use axum::{
    response::sse::{Event, KeepAlive, Sse},
    Extension,
};
use futures::{Stream, StreamExt};

use crate::{auth::Identity, notifier::Notifier, ui::components::HtmlToastRenderer};

pub const TOASTS_URI: &str = "/events/toasts";

/// Handler for `GET /events/toasts`
///
/// Streams the signed-in user's toasts as server-sent events named after the
/// toast variant, each carrying the rendered HTML fragment.
pub async fn toasts(
    identity: Identity,
    Extension(notifier): Extension<Notifier>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    tracing::debug!(user_id = identity.user_id.to_string(), "toast subscriber connected");

    let stream = notifier.subscribe(identity.user_id).map(|toast| {
        let html = toast.render_with(&mut HtmlToastRenderer);
        Ok(Event::default().event(toast.variant().as_str()).data(html))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
