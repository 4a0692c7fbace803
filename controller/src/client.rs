use anyhow::{bail, Context, Result};
use control::{NotificationDraft, User};
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::{json, Value};

/// HTTP client for the dashboard backend.
pub struct DashboardClient {
    http: reqwest::Client,
    base: Url,
}

impl DashboardClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).with_context(|| format!("Invalid URL: {}", base_url))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("Invalid endpoint path: {}", path))
    }

    pub async fn state(&self) -> Result<Value> {
        self.send::<()>(Method::GET, "state", None).await
    }

    pub async fn set_running(&self, running: bool) -> Result<Value> {
        self.send(Method::POST, "system/running", Some(&json!({ "running": running })))
            .await
    }

    pub async fn emergency_stop(&self) -> Result<Value> {
        self.send::<()>(Method::POST, "system/emergency-stop", None).await
    }

    pub async fn login(&self, user: &User) -> Result<Value> {
        self.send(Method::PUT, "user", Some(user)).await
    }

    pub async fn logout(&self) -> Result<Value> {
        self.send::<()>(Method::DELETE, "user", None).await
    }

    pub async fn notifications(&self) -> Result<Value> {
        self.send::<()>(Method::GET, "notifications", None).await
    }

    pub async fn notify(&self, draft: &NotificationDraft) -> Result<Value> {
        self.send(Method::POST, "notifications", Some(draft)).await
    }

    pub async fn mark_read(&self, id: &str) -> Result<Value> {
        let url = self.read_url(id)?;
        self.send_to::<()>(Method::POST, url, None).await
    }

    /// `notifications/<id>/read`, with `id` percent-encoded as one path segment.
    pub fn read_url(&self, id: &str) -> Result<Url> {
        let mut url = self.endpoint("notifications/")?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base URL cannot have path segments"))?
            .pop_if_empty()
            .extend([id, "read"]);
        Ok(url)
    }

    pub async fn clear(&self) -> Result<Value> {
        self.send::<()>(Method::DELETE, "notifications", None).await
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Value> {
        let url = self.endpoint(path)?;
        self.send_to(method, url, body).await
    }

    async fn send_to<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Value> {
        let mut req = self.http.request(method, url.clone());
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req
            .send()
            .await
            .with_context(|| format!("Failed to reach dashboard backend at {}", url))?;
        let status = resp.status();
        let text = resp.text().await.context("Failed to read response body")?;

        if !status.is_success() {
            bail!("{} returned {}: {}", url, status, text);
        }
        serde_json::from_str(&text).context("Invalid JSON from dashboard backend")
    }
}
