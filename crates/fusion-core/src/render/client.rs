//! Blocking HTTP client for the Render web service.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::consts::{DEFAULT_REQUEST_TIMEOUT_SECS, RENDER_API_PREFIX};
use crate::error::{FusionError, Result};
use crate::registration::config::RenderConnection;

use super::{RenderService, SamplePoint, TileSpec, WorldCoordinate};

pub struct RenderClient {
    client: Client,
    base_url: Url,
    owner: String,
    project: String,
}

impl RenderClient {
    pub fn new(connection: &RenderConnection) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .build()?;

        let base = format_base_url(&connection.host, connection.port);
        let base_url = Url::parse(&base)
            .map_err(|e| FusionError::Config(format!("invalid Render URL {base}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FusionError::Config(format!("invalid Render URL {base}")));
        }

        Ok(Self {
            client,
            base_url,
            owner: connection.owner.clone(),
            project: connection.project.clone(),
        })
    }

    /// `{base}/owner/{owner}/project/{project}/stack/{stack}/{tail..}`, each
    /// name percent-encoded as a single path segment.
    fn stack_url(&self, stack: &str, tail: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend([
                    "owner",
                    self.owner.as_str(),
                    "project",
                    self.project.as_str(),
                    "stack",
                    stack,
                ])
                .extend(tail);
        }
        url
    }

    fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &Url) -> Result<T> {
        debug!(url = url.as_str(), "Render request");
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FusionError::Service {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }
        Ok(response.json()?)
    }
}

impl RenderService for RenderClient {
    fn name(&self) -> &str {
        self.base_url.as_str()
    }

    fn z_values(&self, stack: &str) -> Result<Vec<f64>> {
        let url = self.stack_url(stack, &["zValues"]);
        self.send_json(self.client.get(url.clone()), &url)
    }

    fn tile_specs(&self, stack: &str, z: f64) -> Result<Vec<TileSpec>> {
        let z = z.to_string();
        let url = self.stack_url(stack, &["z", &z, "tile-specs"]);
        self.send_json(self.client.get(url.clone()), &url)
    }

    fn local_to_world(
        &self,
        stack: &str,
        z: f64,
        points: &[SamplePoint],
    ) -> Result<Vec<WorldCoordinate>> {
        let z = z.to_string();
        let url = self.stack_url(stack, &["z", &z, "local-to-world-coordinates"]);
        self.send_json(self.client.put(url.clone()).json(points), &url)
    }
}

/// `http://host:port/render-ws/v1`; a host that already carries a scheme is kept as-is.
pub fn format_base_url(host: &str, port: Option<u16>) -> String {
    let server = match port {
        Some(port) => format!("{}:{}", host.trim_end_matches('/'), port),
        None => host.trim_end_matches('/').to_string(),
    };
    let server = if server.starts_with("http") {
        server
    } else {
        format!("http://{server}")
    };
    format!("{server}/{RENDER_API_PREFIX}")
}
