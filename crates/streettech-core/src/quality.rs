//! Resolution tiers offered for a simulated download.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six resolution tiers. Serialized as its value string (`"1080p"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "2160p")]
    Uhd2160,
    #[serde(rename = "1440p")]
    Qhd1440,
    #[default]
    #[serde(rename = "1080p")]
    Fhd1080,
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "480p")]
    Sd480,
    #[serde(rename = "360p")]
    Low360,
}

/// Static description of a tier as shown in the quality picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityOption {
    pub value: Quality,
    pub label: &'static str,
    pub resolution: &'static str,
}

/// All tiers, best first.
pub static QUALITY_OPTIONS: [QualityOption; 6] = [
    QualityOption {
        value: Quality::Uhd2160,
        label: "4K Ultra HD",
        resolution: "3840x2160",
    },
    QualityOption {
        value: Quality::Qhd1440,
        label: "2K Quad HD",
        resolution: "2560x1440",
    },
    QualityOption {
        value: Quality::Fhd1080,
        label: "Full HD",
        resolution: "1920x1080",
    },
    QualityOption {
        value: Quality::Hd720,
        label: "HD",
        resolution: "1280x720",
    },
    QualityOption {
        value: Quality::Sd480,
        label: "SD",
        resolution: "854x480",
    },
    QualityOption {
        value: Quality::Low360,
        label: "Low Quality",
        resolution: "640x360",
    },
];

impl Quality {
    pub const ALL: [Quality; 6] = [
        Quality::Uhd2160,
        Quality::Qhd1440,
        Quality::Fhd1080,
        Quality::Hd720,
        Quality::Sd480,
        Quality::Low360,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Uhd2160 => "2160p",
            Quality::Qhd1440 => "1440p",
            Quality::Fhd1080 => "1080p",
            Quality::Hd720 => "720p",
            Quality::Sd480 => "480p",
            Quality::Low360 => "360p",
        }
    }

    pub fn option(self) -> &'static QualityOption {
        QUALITY_OPTIONS
            .iter()
            .find(|o| o.value == self)
            .unwrap_or(&QUALITY_OPTIONS[2])
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string names no known tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown quality {0:?} (expected one of 2160p, 1440p, 1080p, 720p, 480p, 360p)")]
pub struct UnknownQuality(pub String);

impl FromStr for Quality {
    type Err = UnknownQuality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quality::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| UnknownQuality(s.to_string()))
    }
}
