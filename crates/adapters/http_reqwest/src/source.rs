//! [`DeviceSource`] over the REST API.

use serde::Deserialize;
use serde_json::{Value, json};

use homedeck_app::ports::DeviceSource;
use homedeck_domain::activity::NewActivity;
use homedeck_domain::device::{Device, DeviceStatus};
use homedeck_domain::error::HomeDeckError;
use homedeck_domain::id::DeviceId;

use crate::error::RemoteError;

/// `{ "devices": [..] }` body of the list endpoint.
#[derive(Deserialize)]
struct DeviceList {
    devices: Vec<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Rest {
        success: bool,
        #[serde(default)]
        data: Option<Vec<Value>>,
        #[serde(default)]
        error: Option<String>,
    },
    Plain(DeviceList),
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Remote device store reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDeviceSource {
    client: reqwest::Client,
    base: reqwest::Url,
}

impl HttpDeviceSource {
    pub(crate) fn new(client: reqwest::Client, base: reqwest::Url) -> Self {
        Self { client, base }
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<reqwest::Url, RemoteError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn expect_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RemoteError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.error)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });
        Err(RemoteError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

/// Convert raw records, skipping the ones of unknown type or without an id.
fn parse_devices(records: Vec<Value>) -> Vec<Device> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Device>(record) {
            Ok(device) => Some(device),
            Err(err) => {
                tracing::warn!(error = %err, "skipping undecodable device record");
                None
            }
        })
        .collect()
}

impl DeviceSource for HttpDeviceSource {
    async fn fetch_devices(&self) -> Result<Vec<Device>, HomeDeckError> {
        let url = self.endpoint(&["api", "devices"])?;
        let response = self.client.get(url).send().await.map_err(RemoteError::from)?;
        let response = Self::expect_success(response).await?;
        let records = match response.json::<ListBody>().await.map_err(RemoteError::from)? {
            ListBody::Plain(list) => list.devices,
            ListBody::Rest {
                success: true,
                data,
                ..
            } => data.unwrap_or_default(),
            ListBody::Rest { error, .. } => {
                return Err(RemoteError::Rejected(
                    error.unwrap_or_else(|| "device list unavailable".to_string()),
                )
                .into());
            }
        };
        let devices = parse_devices(records);
        tracing::debug!(count = devices.len(), "fetched devices");
        Ok(devices)
    }

    async fn write_status(
        &self,
        id: &DeviceId,
        status: &DeviceStatus,
    ) -> Result<(), HomeDeckError> {
        let url = self.endpoint(&["api", "devices", id.as_str()])?;
        let response = self
            .client
            .put(url)
            .json(&json!({ "status": status.to_map() }))
            .send()
            .await
            .map_err(RemoteError::from)?;
        let response = Self::expect_success(response).await?;
        tracing::debug!(status = %response.status(), "device status written");
        Ok(())
    }

    async fn record_activity(&self, activity: NewActivity) -> Result<(), HomeDeckError> {
        let url = self.endpoint(&["api", "activity-logs"])?;
        let response = self
            .client
            .post(url)
            .json(&activity)
            .send()
            .await
            .map_err(RemoteError::from)?;
        Self::expect_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn source(base: &str) -> HttpDeviceSource {
        Config::new(base).build().unwrap()
    }

    #[test]
    fn should_join_segments_onto_base_path() {
        let url = source("http://localhost:8080/")
            .endpoint(&["api", "devices"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/devices");
    }

    #[test]
    fn should_keep_base_path_prefix() {
        let url = source("http://localhost:8080/home")
            .endpoint(&["api", "devices", "1"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/home/api/devices/1");
    }

    #[test]
    fn should_escape_device_id_in_path() {
        let url = source("http://localhost")
            .endpoint(&["api", "devices", "a/b c"])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/devices/a%2Fb%20c");
    }

    #[test]
    fn should_accept_both_list_envelopes() {
        let plain: ListBody =
            serde_json::from_str(r#"{"devices": [{"id": "1"}]}"#).unwrap();
        assert!(matches!(plain, ListBody::Plain(list) if list.devices.len() == 1));

        let rest: ListBody = serde_json::from_str(r#"{"success": true, "data": []}"#).unwrap();
        assert!(matches!(rest, ListBody::Rest { success: true, .. }));
    }

    #[test]
    fn should_skip_undecodable_device_records() {
        let records = vec![
            json!({"id": "1", "name": "Lamp", "type": "light", "status": {"power": true}}),
            json!({"id": "2", "name": "Toaster", "type": "toaster"}),
            json!({"id": 3, "name": "Door", "type": "lock"}),
        ];

        let devices = parse_devices(records);

        let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn should_keep_records_the_server_stores_loosely() {
        let records = vec![
            json!({"id": "5", "name": "Termostato", "type": "thermostat", "status": {"target": 32}}),
            json!({"id": "1", "name": "Luz", "type": "light", "status": {"brightness": 50.5}}),
            json!({"id": "8", "name": "Nueva", "type": "camera", "status": false}),
        ];

        let devices = parse_devices(records);

        let ids: Vec<&str> = devices.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["5", "1", "8"]);
        assert!(matches!(&devices[0].status, DeviceStatus::Thermostat(s) if s.target == 32.0));
        assert!(matches!(&devices[1].status, DeviceStatus::Light(s) if s.brightness == 51));
        assert_eq!(devices[2].status, DeviceStatus::default_for(devices[2].device_type()));
    }
}
