use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum JamfError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Jamf Pro returned {status}: {context}")]
    Api { status: u16, context: String },
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout error")]
    Timeout,
    #[error("Request error: {0}")]
    Request(String),
}

impl From<reqwest::Error> for JamfError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            JamfError::Timeout
        } else if err.is_decode() {
            JamfError::ParseError(err.to_string())
        } else {
            JamfError::Request(err.to_string())
        }
    }
}

/// The subset of the Jamf Pro APIs the sharder consumes: inventory and
/// account listings plus static group lookups. Inventory listings come from
/// the newer Pro API, the rest from the Classic API.
#[async_trait]
pub trait JamfClient {
    async fn list_computers(&self) -> Result<Vec<Computer>, JamfError>;

    async fn list_mobile_devices(&self) -> Result<Vec<MobileDevice>, JamfError>;

    async fn get_computer_group(&self, group_id: &str) -> Result<ComputerGroup, JamfError>;

    async fn get_mobile_device_group(
        &self,
        group_id: &str,
    ) -> Result<MobileDeviceGroup, JamfError>;

    async fn list_users(&self) -> Result<Vec<UserAccount>, JamfError>;
}

// Module declarations
mod client;
mod mock;
mod types;

// Re-export public APIs
pub use client::HttpJamfClient;
pub use mock::MockJamfClient;
pub use types::{
    Computer, ComputerGeneral, ComputerGroup, GroupMember, MobileDevice, MobileDeviceGroup,
    RemoteManagement, UserAccount,
};
