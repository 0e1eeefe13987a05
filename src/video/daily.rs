// src/video/daily.rs
use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use super::VideoRoom;

#[derive(Debug, Clone, Default)]
pub struct CreateRoomOptions {
    /// Defaults to `interview-<unix millis>`.
    pub name: Option<String>,
    pub expires_in_minutes: Option<u32>,
    pub properties: RoomProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomProperties {
    pub start_audio_off: bool,
    pub start_video_off: bool,
    pub enable_chat: bool,
    pub enable_screenshare: bool,
    pub enable_recording: bool,
}

impl Default for RoomProperties {
    fn default() -> Self {
        Self {
            start_audio_off: false,
            start_video_off: false,
            enable_chat: true,
            enable_screenshare: true,
            enable_recording: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateRoomRequest<'a> {
    name: &'a str,
    properties: RequestProperties<'a>,
}

#[derive(Debug, Serialize)]
struct RequestProperties<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
    #[serde(flatten)]
    flags: &'a RoomProperties,
}

#[derive(Debug, Deserialize)]
struct CreateRoomResponse {
    url: String,
    name: String,
}

/// Flags for the embedded Daily frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyIframeProps {
    pub url: String,
    pub show_leave_button: bool,
    pub show_fullscreen_button: bool,
    pub show_local_video: bool,
    pub show_participants_bar: bool,
}

pub struct DailyClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl DailyClient {
    /// `timeout` of `None` means requests never time out.
    pub fn new(api_key: Option<String>, base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    /// One POST to the rooms endpoint; the room URL comes back from Daily.
    pub async fn create_room(&self, options: CreateRoomOptions) -> Result<VideoRoom> {
        self.request_room(options)
            .await
            .context("Failed to create video room")
    }

    async fn request_room(&self, options: CreateRoomOptions) -> Result<VideoRoom> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Daily.co API key is not configured"))?;

        let now = chrono::Utc::now();
        let name = options
            .name
            .unwrap_or_else(|| format!("interview-{}", now.timestamp_millis()));
        let exp = expiry(now.timestamp(), options.expires_in_minutes);

        let request = CreateRoomRequest {
            name: &name,
            properties: RequestProperties {
                exp,
                flags: &options.properties,
            },
        };

        let url = format!("{}/rooms", self.base_url.trim_end_matches('/'));
        info!("Creating Daily.co room {} via {}", name, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Daily.co")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Daily.co error {}: {}", status, error_text);
            anyhow::bail!("Daily.co returned error {}: {}", status, error_text);
        }

        let room: CreateRoomResponse = response
            .json()
            .await
            .context("Failed to parse Daily.co response")?;

        Ok(VideoRoom {
            url: room.url,
            room_name: room.name,
        })
    }
}

/// Unix expiry for the room; zero minutes means no expiry.
fn expiry(now: i64, expires_in_minutes: Option<u32>) -> Option<i64> {
    expires_in_minutes
        .filter(|minutes| *minutes > 0)
        .map(|minutes| now + i64::from(minutes) * 60)
}

pub fn iframe_props(url: &str) -> DailyIframeProps {
    DailyIframeProps {
        url: url.to_string(),
        show_leave_button: true,
        show_fullscreen_button: true,
        show_local_video: true,
        show_participants_bar: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_defaults() {
        let props = RoomProperties::default();
        let request = CreateRoomRequest {
            name: "interview-1",
            properties: RequestProperties {
                exp: None,
                flags: &props,
            },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "name": "interview-1",
                "properties": {
                    "start_audio_off": false,
                    "start_video_off": false,
                    "enable_chat": true,
                    "enable_screenshare": true,
                    "enable_recording": false
                }
            })
        );
    }

    #[test]
    fn test_expiry() {
        assert_eq!(expiry(1_000, None), None);
        assert_eq!(expiry(1_000, Some(0)), None);
        assert_eq!(expiry(1_000, Some(60)), Some(4_600));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = DailyClient::new(None, "https://api.daily.co/v1".into(), None).unwrap();
        let err = client
            .create_room(CreateRoomOptions::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to create video room");
        assert!(format!("{:#}", err).contains("Daily.co API key is not configured"));
    }

    #[test]
    fn test_iframe_props() {
        let props = iframe_props("https://team.daily.co/interview-1");
        assert!(props.show_leave_button && props.show_participants_bar);
        assert_eq!(
            serde_json::to_value(&props).unwrap()["showFullscreenButton"],
            true
        );
    }
}
