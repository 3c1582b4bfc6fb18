// ── Router facade ──
//
// Owns one `QueryClient` and runs the multi-stage retrievals on top of it.
// Every method issues fresh queries; nothing is cached between calls.

use speedctl_api::{ParameterPath, QueryClient, TransportConfig};
use tracing::{debug, instrument};
use url::Url;

use crate::command::{Command, CommandOutput};
use crate::config::RouterConfig;
use crate::error::CoreError;
use crate::join::{addresses, clients, interfaces};
use crate::log::{self, LogEntry, LogFilter};
use crate::model::{ExternalAddress, WifiInterface};

/// Read-only view of one Speedport router.
pub struct Router {
    client: QueryClient,
}

impl Router {
    /// Build the HTTP client described by `config`.
    pub fn new(config: &RouterConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            tls: (&config.tls).into(),
            timeout: config.timeout,
        };
        let client = QueryClient::new(config.url.clone(), config.password.clone(), &transport)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    pub fn with_client(client: QueryClient) -> Self {
        Self { client }
    }

    pub fn url(&self) -> &Url {
        self.client.base_url()
    }

    /// Every interface slot with SSID, BSSID and, when up, radio details.
    #[instrument(skip(self))]
    pub async fn wifi_interfaces(&self) -> Result<Vec<WifiInterface>, CoreError> {
        let rows = self.client.query(&interfaces::status_paths()).await?;
        let mut list = interfaces::from_status(&rows)?;

        let rows = self.client.query(&interfaces::detail_paths(&list)).await?;
        interfaces::apply_details(&mut list, &rows)?;

        debug!(count = list.len(), up = list.iter().filter(|i| i.up).count(), "interfaces joined");
        Ok(list)
    }

    /// One interface with its associated clients resolved against the host
    /// table.
    #[instrument(skip(self))]
    pub async fn interface_with_clients(&self, id: u32) -> Result<WifiInterface, CoreError> {
        let mut iface = self
            .wifi_interfaces()
            .await?
            .into_iter()
            .find(|i| i.id == id)
            .ok_or(CoreError::InterfaceNotFound { id })?;

        if !iface.up {
            return Err(CoreError::InterfaceDown { id });
        }

        let rows = self.client.query(&clients::association_paths(id)).await?;
        let mut list = clients::from_associations(&rows)?;

        let rows = self.client.query(&clients::host_paths()).await?;
        clients::apply_hosts(&mut list, &rows)?;

        debug!(
            clients = list.len(),
            resolved = list.iter().filter(|c| c.host_list_number.is_some()).count(),
            "clients joined"
        );
        iface.clients = list;
        Ok(iface)
    }

    /// IPv4 address of every upstream interface.
    #[instrument(skip(self))]
    pub async fn external_addresses(&self) -> Result<Vec<ExternalAddress>, CoreError> {
        let rows = self.client.query(&addresses::address_paths()).await?;
        addresses::from_rows(&rows)
    }

    /// Raw device log text. An absent value reads as an empty log.
    #[instrument(skip(self))]
    pub async fn device_log(&self) -> Result<String, CoreError> {
        let path = ParameterPath::from(log::DEVICE_LOG_PATH);
        let rows = self.client.query(std::slice::from_ref(&path)).await?;

        let (_, value) = rows
            .into_iter()
            .find(|(p, _)| *p == path)
            .ok_or_else(|| CoreError::Protocol {
                message: format!("response has no {path}"),
            })?;
        Ok(value.as_text().unwrap_or_default().to_owned())
    }

    /// Classified, filtered log lines, newest first.
    pub async fn log_entries(
        &self,
        count: i64,
        filter: &LogFilter,
    ) -> Result<Vec<LogEntry>, CoreError> {
        let text = self.device_log().await?;
        Ok(log::select(&text, count, filter))
    }

    /// Run one [`Command`].
    pub async fn execute(&self, command: &Command) -> Result<CommandOutput, CoreError> {
        debug!(?command, "executing");
        match command {
            Command::ShowInterfaces => self.wifi_interfaces().await.map(CommandOutput::Interfaces),
            Command::ShowInterfaceDetail(id) => self
                .interface_with_clients(*id)
                .await
                .map(CommandOutput::InterfaceDetail),
            Command::ShowExternalIp => self
                .external_addresses()
                .await
                .map(CommandOutput::ExternalAddresses),
            Command::ShowLog { count, filter } => {
                self.log_entries(*count, filter).await.map(CommandOutput::Log)
            }
        }
    }
}
