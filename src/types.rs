//! Challenge feed payload types

use serde::{Deserialize, Serialize};

/// Lowest reportable progress
pub const MIN_PROGRESS: i32 = 0;
/// Progress of a finished challenge
pub const MAX_PROGRESS: i32 = 100;

/// One challenge assigned to the player.
///
/// Rebuilt on every fetch. Only `id` carries identity between fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Completion percentage (0 - 100)
    #[serde(default)]
    pub progress: i32,
    #[serde(default)]
    pub reward: i64,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Challenge {
    /// Create an empty challenge with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            content: String::new(),
            progress: MIN_PROGRESS,
            reward: 0,
            assets: Vec::new(),
        }
    }

    /// First asset with the given type tag (e.g. "icon")
    pub fn asset(&self, kind: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.asset_type == kind)
    }

    /// Check if progress reached 100
    pub fn is_complete(&self) -> bool {
        self.progress >= MAX_PROGRESS
    }
}

/// Media attached to a challenge. Downloading it is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub asset_type: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// Player attributes sent as metadata with every backend call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub location: String,
    pub age: u32,
    pub game_type: String,
    pub player_id: String,
}

impl PlayerInfo {
    /// Create player context
    pub fn new(
        location: impl Into<String>,
        age: u32,
        game_type: impl Into<String>,
        player_id: impl Into<String>,
    ) -> Self {
        Self {
            location: location.into(),
            age,
            game_type: game_type.into(),
            player_id: player_id.into(),
        }
    }

    /// Request headers identifying the player, in wire order
    pub fn headers(&self) -> [(&'static str, String); 4] {
        [
            ("location", self.location.clone()),
            ("age", self.age.to_string()),
            ("game-type", self.game_type.clone()),
            ("player-id", self.player_id.clone()),
        ]
    }
}

/// Clamp a progress value into the reportable range
pub fn clamp_progress(value: i32) -> i32 {
    value.clamp(MIN_PROGRESS, MAX_PROGRESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_deserialization() {
        let json = r#"{
            "id": "ch-1",
            "title": "Win 3 races",
            "content": "Finish first three times",
            "progress": 40,
            "reward": 250,
            "assets": [
                {"id": "a1", "type": "banner", "title": "Banner", "url": "https://cdn/banner.png"},
                {"id": "a2", "type": "icon", "title": "Icon", "url": "https://cdn/icon.png"}
            ]
        }"#;
        let challenge: Challenge = serde_json::from_str(json).unwrap();
        assert_eq!(challenge.id, "ch-1");
        assert_eq!(challenge.progress, 40);
        assert_eq!(challenge.reward, 250);
        assert_eq!(challenge.assets.len(), 2);
        assert_eq!(challenge.assets[1].asset_type, "icon");
    }

    #[test]
    fn test_challenge_defaults() {
        let challenge: Challenge = serde_json::from_str(r#"{"id": "bare"}"#).unwrap();
        assert_eq!(challenge, Challenge::new("bare"));
        assert!(challenge.assets.is_empty());
    }

    #[test]
    fn test_challenge_requires_id() {
        let result: Result<Challenge, _> = serde_json::from_str(r#"{"title": "no id"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_asset_serializes_type_field() {
        let asset = Asset {
            id: "a".to_string(),
            asset_type: "icon".to_string(),
            title: String::new(),
            url: String::new(),
        };
        let value = serde_json::to_value(&asset).unwrap();
        assert_eq!(value["type"], "icon");
        assert!(value.get("asset_type").is_none());
    }

    #[test]
    fn test_asset_lookup_returns_first_match() {
        let mut challenge = Challenge::new("c");
        for (id, kind) in [("a1", "banner"), ("a2", "icon"), ("a3", "icon")] {
            challenge.assets.push(Asset {
                id: id.to_string(),
                asset_type: kind.to_string(),
                title: String::new(),
                url: String::new(),
            });
        }

        assert_eq!(challenge.asset("icon").map(|a| a.id.as_str()), Some("a2"));
        assert!(challenge.asset("video").is_none());
    }

    #[test]
    fn test_is_complete() {
        let mut challenge = Challenge::new("c");
        assert!(!challenge.is_complete());
        challenge.progress = 99;
        assert!(!challenge.is_complete());
        challenge.progress = 100;
        assert!(challenge.is_complete());
    }

    #[test]
    fn test_clamp_progress() {
        assert_eq!(clamp_progress(-5), 0);
        assert_eq!(clamp_progress(0), 0);
        assert_eq!(clamp_progress(55), 55);
        assert_eq!(clamp_progress(100), 100);
        assert_eq!(clamp_progress(150), 100);
    }

    #[test]
    fn test_player_headers() {
        let player = PlayerInfo::new("Country", 18, "action", "user");
        let headers = player.headers();
        assert_eq!(headers[0], ("location", "Country".to_string()));
        assert_eq!(headers[1], ("age", "18".to_string()));
        assert_eq!(headers[2], ("game-type", "action".to_string()));
        assert_eq!(headers[3], ("player-id", "user".to_string()));
    }
}
