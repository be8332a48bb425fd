use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use url::Url;

use crate::types::{
    Computer, ComputerGroup, ComputerGroupResponse, ComputerInventoryPage, MobileDevice,
    MobileDeviceGroup, MobileDeviceGroupResponse, MobileDeviceListResponse, UserAccount,
    UserListResponse,
};
use crate::{JamfClient, JamfError};

/// Client for a single Jamf Pro server, authenticated with a static bearer
/// token. One request per call, no retries; errors are surfaced to the
/// caller as-is.
#[derive(Debug)]
pub struct HttpJamfClient {
    client: reqwest::Client,
    base_url: Url,
    page_size: u32,
}

impl HttpJamfClient {
    pub fn new(
        base_url: &str,
        token: &str,
        timeout: Duration,
        page_size: u32,
    ) -> Result<Self, JamfError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| JamfError::InvalidConfiguration(format!("invalid base URL: {e}")))?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| JamfError::InvalidConfiguration(format!("invalid API token: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);
        // Classic API endpoints answer in XML unless JSON is requested.
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| JamfError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            page_size,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T, JamfError> {
        let url = self
            .base_url
            .join(path_and_query)
            .map_err(|e| JamfError::InvalidConfiguration(format!("invalid request path: {e}")))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let context = response.text().await.unwrap_or_default();
            return Err(JamfError::Api {
                status: status.as_u16(),
                context,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl JamfClient for HttpJamfClient {
    async fn list_computers(&self) -> Result<Vec<Computer>, JamfError> {
        let mut computers: Vec<Computer> = Vec::new();
        let mut page = 0u32;

        loop {
            let path = format!(
                "/api/v1/computers-inventory?section=GENERAL&page={page}&page-size={}",
                self.page_size
            );
            let body: ComputerInventoryPage = self.get_json(&path).await?;
            let fetched = body.results.len();
            computers.extend(body.results);

            // An empty page ends the listing even if totalCount disagrees.
            if fetched == 0 || computers.len() as u64 >= body.total_count {
                break;
            }
            page += 1;
        }

        Ok(computers)
    }

    async fn list_mobile_devices(&self) -> Result<Vec<MobileDevice>, JamfError> {
        let body: MobileDeviceListResponse = self.get_json("/JSSResource/mobiledevices").await?;
        Ok(body.mobile_devices)
    }

    async fn get_computer_group(&self, group_id: &str) -> Result<ComputerGroup, JamfError> {
        let body: ComputerGroupResponse = self
            .get_json(&format!("/JSSResource/computergroups/id/{group_id}"))
            .await?;
        Ok(body.computer_group)
    }

    async fn get_mobile_device_group(
        &self,
        group_id: &str,
    ) -> Result<MobileDeviceGroup, JamfError> {
        let body: MobileDeviceGroupResponse = self
            .get_json(&format!("/JSSResource/mobiledevicegroups/id/{group_id}"))
            .await?;
        Ok(body.mobile_device_group)
    }

    async fn list_users(&self) -> Result<Vec<UserAccount>, JamfError> {
        let body: UserListResponse = self.get_json("/JSSResource/users").await?;
        Ok(body.users)
    }
}
