use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::errors::ApiError;
use crate::types::{DhcpConfig, InterfaceConfig};

use super::{CreateInterface, DeviceApi, InterfacePatch};

/// Synchronous client for the dashboard's switch routing endpoints.
pub struct DashboardClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl DashboardClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(DashboardClient {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn interfaces_path(serial: &str) -> String {
        format!("/devices/{serial}/switch/routing/interfaces")
    }

    fn interface_path(serial: &str, interface_id: &str) -> String {
        format!("/devices/{serial}/switch/routing/interfaces/{interface_id}")
    }

    fn dhcp_path(serial: &str, interface_id: &str) -> String {
        format!("/devices/{serial}/switch/routing/interfaces/{interface_id}/dhcp")
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(&self.api_key)
            .send()?;
        let body = check_status(response)?.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn put_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        debug!(path, "PUT");
        let response = self
            .client
            .put(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?;
        check_status(response).map(|_| ())
    }

    fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        debug!(path, "POST");
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()?;
        check_status(response).map(|_| ())
    }
}

fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body,
    })
}

impl DeviceApi for DashboardClient {
    fn list_routing_interfaces(&self, serial: &str) -> Result<Vec<InterfaceConfig>, ApiError> {
        self.get_json(&Self::interfaces_path(serial))
    }

    fn get_dhcp_config(&self, serial: &str, interface_id: &str) -> Result<DhcpConfig, ApiError> {
        self.get_json(&Self::dhcp_path(serial, interface_id))
    }

    fn create_interface(&self, serial: &str, request: &CreateInterface) -> Result<(), ApiError> {
        self.post_json(&Self::interfaces_path(serial), request)
    }

    fn update_interface(
        &self,
        serial: &str,
        interface_id: &str,
        patch: &InterfacePatch,
    ) -> Result<(), ApiError> {
        self.put_json(&Self::interface_path(serial, interface_id), patch)
    }

    fn delete_interface(&self, serial: &str, interface_id: &str) -> Result<(), ApiError> {
        debug!(serial, interface_id, "DELETE interface");
        let response = self
            .client
            .delete(self.url(&Self::interface_path(serial, interface_id)))
            .bearer_auth(&self.api_key)
            .send()?;
        check_status(response).map(|_| ())
    }

    fn update_dhcp_config(
        &self,
        serial: &str,
        interface_id: &str,
        dhcp: &DhcpConfig,
    ) -> Result<(), ApiError> {
        self.put_json(&Self::dhcp_path(serial, interface_id), dhcp)
    }
}
