//! Startup connectivity gate
//!
//! One TCP connect to a well-known endpoint before any window exists. This
//! is the only place the shell blocks: at most `timeout` on launch.

use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;
use crate::presenter::Presenter;

pub const NO_CONNECTION_TITLE: &str = "No Internet Connection";

pub const NO_CONNECTION_MESSAGE: &str = "You are not connected to the internet. \
The internet is required to use Silk Browser. Silk will now exit.";

/// Process exit status when the gate fails
pub const EXIT_NO_CONNECTION: i32 = 1;

#[derive(Error, Debug)]
pub enum ConnectivityError {
    #[error("Invalid probe address: {0}")]
    InvalidAddress(String),

    #[error("Cannot reach {address}: {source}")]
    Unreachable {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Connect step of the probe
pub trait Transport: Send + Sync {
    fn connect(&self, address: SocketAddr, timeout: Duration) -> std::io::Result<()>;
}

/// Standard library TCP transport
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpTransport;

impl Transport for TcpTransport {
    fn connect(&self, address: SocketAddr, timeout: Duration) -> std::io::Result<()> {
        TcpStream::connect_timeout(&address, timeout).map(drop)
    }
}

pub struct ConnectivityCheck {
    address: SocketAddr,
    timeout: Duration,
    transport: Box<dyn Transport>,
}

impl ConnectivityCheck {
    pub fn new(address: SocketAddr, timeout: Duration) -> Self {
        Self {
            address,
            timeout,
            transport: Box::new(TcpTransport),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConnectivityError> {
        let address = config
            .probe_address
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| ConnectivityError::InvalidAddress(config.probe_address.clone()))?;

        Ok(Self::new(address, config.probe_timeout()))
    }

    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn check(&self) -> Result<(), ConnectivityError> {
        tracing::debug!(address = %self.address, timeout = ?self.timeout, "Probing connectivity");

        self.transport
            .connect(self.address, self.timeout)
            .map_err(|source| ConnectivityError::Unreachable {
                address: self.address,
                source,
            })?;

        tracing::info!(address = %self.address, "Connectivity check passed");
        Ok(())
    }
}

/// Run the connectivity gate, then the UI.
///
/// On a failed probe the fatal dialog is shown, `start_ui` is never called
/// and [`EXIT_NO_CONNECTION`] is returned. Otherwise returns 0 once the UI
/// returns, or 1 if it failed.
pub fn gate_startup<E, F>(check: &ConnectivityCheck, presenter: &dyn Presenter, start_ui: F) -> i32
where
    E: std::fmt::Display,
    F: FnOnce() -> Result<(), E>,
{
    if let Err(e) = check.check() {
        tracing::error!(error = %e, "No connectivity, exiting");
        presenter.show_error(NO_CONNECTION_TITLE, NO_CONNECTION_MESSAGE);
        return EXIT_NO_CONNECTION;
    }

    match start_ui() {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "Browser exited with an error");
            1
        }
    }
}
