use std::sync::Arc;

use anyhow::{Result, anyhow};
use skillq_core::config::ClientConfig;
use skillq_core::image::ImageEncoder;
use skillq_core::notice::UserNotice;
use skillq_core::programmer::DirectoryClient;
use skillq_infrastructure::{ConfigService, FileImageEncoder};
use skillq_interaction::HttpDirectoryClient;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::creation_form::CreationFormController;
use crate::directory_view::DirectoryViewController;
use crate::write_dispatcher::WriteDispatcher;

/// Composition root holding the shared client, encoder and write dispatcher.
///
/// Controllers built from one `DirectoryApp` share its notice channel and
/// its detached writes.
pub struct DirectoryApp {
    config: ClientConfig,
    client: Arc<dyn DirectoryClient>,
    encoder: Arc<dyn ImageEncoder>,
    writes: WriteDispatcher,
    notices: UnboundedSender<UserNotice>,
}

impl DirectoryApp {
    /// Wires the HTTP client and file encoder from `config`.
    pub fn bootstrap(config: ClientConfig) -> Result<(Self, UnboundedReceiver<UserNotice>)> {
        let client = HttpDirectoryClient::from_config(&config)
            .map_err(|e| anyhow!("Failed to create directory client: {}", e))?;
        tracing::info!(
            "[Bootstrap] Directory service at {} (write policy: {:?})",
            client.base_url(),
            config.behavior.write_policy
        );
        Ok(Self::from_parts(
            config,
            Arc::new(client),
            Arc::new(FileImageEncoder::new()),
        ))
    }

    /// Loads configuration through `service` and bootstraps from it.
    pub fn from_config_service(
        service: &ConfigService,
    ) -> Result<(Self, UnboundedReceiver<UserNotice>)> {
        Self::bootstrap(service.get_config())
    }

    pub fn from_parts(
        config: ClientConfig,
        client: Arc<dyn DirectoryClient>,
        encoder: Arc<dyn ImageEncoder>,
    ) -> (Self, UnboundedReceiver<UserNotice>) {
        let (notices, receiver) = mpsc::unbounded_channel();
        let writes = WriteDispatcher::new(client.clone(), config.behavior.write_policy);
        let app = Self {
            config,
            client,
            encoder,
            writes,
            notices,
        };
        (app, receiver)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn creation_form(&self) -> CreationFormController {
        CreationFormController::new(
            self.encoder.clone(),
            self.writes.clone(),
            self.config.behavior.skill_append_policy,
            self.notices.clone(),
        )
    }

    pub fn directory_view(&self) -> DirectoryViewController {
        DirectoryViewController::new(
            self.client.clone(),
            self.writes.clone(),
            self.config.behavior.query_ordering,
            self.notices.clone(),
        )
    }

    /// Waits for detached writes to finish.
    pub async fn shutdown(&self) {
        let in_flight = self.writes.in_flight();
        if in_flight > 0 {
            tracing::info!("[Bootstrap] Waiting for {} pending write(s)", in_flight);
        }
        self.writes.settle().await;
    }
}
