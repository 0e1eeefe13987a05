// src/video/jitsi.rs
//! Public Jitsi Meet rooms are just URLs: nothing is created remotely.

use anyhow::{Context, Result};
use reqwest::Url;
use serde::Serialize;

use super::VideoRoom;

const IFRAME_ALLOW: &str = "camera; microphone; fullscreen; display-capture; autoplay";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JitsiRoomOptions {
    /// Generated when absent.
    pub room_name: Option<String>,
    pub start_with_audio_muted: Option<bool>,
    pub start_with_video_muted: Option<bool>,
    pub enable_close_page: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JitsiIframeProps {
    pub url: String,
    pub allow: &'static str,
}

/// Build `<base>/<room>#config...`. Same name and flags, same URL.
pub fn build_room(base_url: &str, options: &JitsiRoomOptions) -> Result<VideoRoom> {
    let room_name = match options.room_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => generate_room_name(),
    };

    let mut url =
        Url::parse(base_url).with_context(|| format!("Invalid Jitsi base URL: {}", base_url))?;
    url.path_segments_mut()
        .map_err(|_| anyhow::anyhow!("Jitsi base URL cannot carry a path: {}", base_url))?
        .pop_if_empty()
        .push(&room_name);

    let mut params: Vec<(&str, &str)> = Vec::new();
    let flags = [
        ("config.startWithAudioMuted", options.start_with_audio_muted),
        ("config.startWithVideoMuted", options.start_with_video_muted),
        ("config.enableClosePage", options.enable_close_page),
    ];
    for (key, value) in flags {
        if let Some(on) = value {
            params.push((key, if on { "1" } else { "0" }));
        }
    }
    params.push(("config.prejoinPageEnabled", "false"));
    params.push(("config.disableDeepLinking", "true"));

    let fragment = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");
    url.set_fragment(Some(&fragment));

    Ok(VideoRoom {
        url: url.to_string(),
        room_name,
    })
}

pub fn iframe_props(url: &str) -> JitsiIframeProps {
    JitsiIframeProps {
        url: url.to_string(),
        allow: IFRAME_ALLOW,
    }
}

fn generate_room_name() -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!(
        "meeting-{}-{}",
        chrono::Utc::now().timestamp_millis(),
        &suffix[..5]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://meet.jit.si";

    #[test]
    fn test_minimal_url() {
        let room = build_room(
            BASE,
            &JitsiRoomOptions {
                room_name: Some("interview-7".into()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(room.room_name, "interview-7");
        assert_eq!(
            room.url,
            "https://meet.jit.si/interview-7#config.prejoinPageEnabled=false&config.disableDeepLinking=true"
        );
    }

    #[test]
    fn test_flags_in_order() {
        let options = JitsiRoomOptions {
            room_name: Some("standup".into()),
            start_with_audio_muted: Some(true),
            start_with_video_muted: Some(false),
            enable_close_page: Some(true),
        };
        let room = build_room(BASE, &options).unwrap();

        assert_eq!(
            room.url,
            "https://meet.jit.si/standup#config.startWithAudioMuted=1&config.startWithVideoMuted=0\
             &config.enableClosePage=1&config.prejoinPageEnabled=false&config.disableDeepLinking=true"
        );
        assert_eq!(build_room(BASE, &options).unwrap(), room);
    }

    #[test]
    fn test_generated_name() {
        let room = build_room(BASE, &JitsiRoomOptions::default()).unwrap();
        assert!(room.room_name.starts_with("meeting-"));
        assert_eq!(room.room_name.rsplit('-').next().map(str::len), Some(5));
        assert!(room.url.starts_with(&format!("{}/{}#", BASE, room.room_name)));
    }

    #[test]
    fn test_room_name_is_encoded() {
        let room = build_room(
            "https://meet.example.org/rooms/",
            &JitsiRoomOptions {
                room_name: Some("team sync".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(room.url.starts_with("https://meet.example.org/rooms/team%20sync#"));
    }

    #[test]
    fn test_iframe_permissions() {
        let props = iframe_props("https://meet.jit.si/x");
        assert!(props.allow.contains("microphone"));
        assert!(props.allow.contains("display-capture"));
    }
}
