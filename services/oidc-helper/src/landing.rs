//! Landing page for Google's redirect
//!
//! Google sends the browser to `http://localhost:8080/?code=...` after
//! consent. This page shows that code so it can be copied back into the
//! terminal. It has no influence on the flow: if the port is taken the helper
//! runs without it.

use std::net::SocketAddr;

use axum::Router;
use axum::extract::Query;
use axum::response::Html;
use axum::routing::get;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Port of the registered redirect URI.
pub const LANDING_ADDR: &str = "127.0.0.1:8080";

const TEMPLATE: &str = include_str!("landing.html");

const WAITING: &str = "<p>Waiting for Google to redirect here with an authorization code.</p>";

#[derive(Debug, Deserialize)]
struct LandingQuery {
    code: Option<String>,
}

/// A bound, not yet serving, landing page.
pub struct LandingPage {
    listener: TcpListener,
}

/// A running landing page. Stop it with [`LandingHandle::shutdown`].
pub struct LandingHandle {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl LandingPage {
    pub async fn bind(addr: &str) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        Ok(Self { listener })
    }

    /// Start serving on the runtime.
    pub fn spawn(self) -> std::io::Result<LandingHandle> {
        let addr = self.listener.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let result = axum::serve(self.listener, router())
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = result {
                warn!(error = %e, "landing page server failed");
            }
        });

        debug!(%addr, "landing page listening");
        Ok(LandingHandle {
            addr,
            shutdown_tx,
            task,
        })
    }
}

impl LandingHandle {
    #[cfg(test)]
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.task.await {
            warn!(error = %e, "landing page task panicked");
        }
        debug!("landing page stopped");
    }
}

/// Bind and start the landing page, or log why it is unavailable.
pub async fn start(addr: &str) -> Option<LandingHandle> {
    match LandingPage::bind(addr).await.and_then(LandingPage::spawn) {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(addr, error = %e, "landing page unavailable, copy the code from the browser address bar");
            None
        }
    }
}

pub fn router() -> Router {
    Router::new().route("/", get(landing_handler))
}

async fn landing_handler(Query(query): Query<LandingQuery>) -> Html<String> {
    Html(render(query.code.as_deref()))
}

fn render(code: Option<&str>) -> String {
    let content = match code.filter(|c| !c.is_empty()) {
        Some(code) => format!(
            "<p>Copy this code and paste it into your terminal:</p>\n    \
             <input type=\"text\" readonly onclick=\"this.select()\" value=\"{}\">",
            html_escape(code)
        ),
        None => WAITING.to_string(),
    };
    TEMPLATE.replace("{{content}}", &content)
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
