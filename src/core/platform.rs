//! Rendering engine hints, resolved once by the host at startup.

use serde::{Deserialize, Serialize};

/// Family of the engine that issues tile requests and composites them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineFamily {
    #[default]
    Standard,
    /// Trident (Internet Explorer)
    Trident,
    /// EdgeHTML (legacy Edge)
    EdgeHtml,
}

impl EngineFamily {
    /// Engines that request and composite in reverse submission order
    pub fn reverses_submission_order(&self) -> bool {
        matches!(self, EngineFamily::Trident | EngineFamily::EdgeHtml)
    }

    pub fn load_order(&self) -> LoadOrder {
        LoadOrder::from_platform_flip(self.reverses_submission_order())
    }
}

/// Order in which tiles are handed to the loader and drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadOrder {
    /// Farthest from the center first, center tile last
    #[default]
    FarthestFirst,
    /// Nearest to the center first
    NearestFirst,
}

impl LoadOrder {
    pub fn from_platform_flip(flip: bool) -> Self {
        if flip {
            LoadOrder::NearestFirst
        } else {
            LoadOrder::FarthestFirst
        }
    }

    pub fn is_flipped(&self) -> bool {
        matches!(self, LoadOrder::NearestFirst)
    }
}
