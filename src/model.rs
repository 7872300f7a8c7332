//! Plant record types
//!
//! Mirrors the bundled `plants.json` schema one-to-one so that a record can be
//! round-tripped through `serde_json::Value` (the translator works on that
//! representation and deserializes the result back into a `PlantRecord`).

use serde::{Deserialize, Serialize};

/// Handling-precautions sentinel meaning "show no warning".
pub const NO_PRECAUTIONS: &str = "None required";

/// One plant species in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
    pub id: u32,
    pub common_name: String,
    pub scientific_name: String,
    pub family: String,
    #[serde(rename = "type")]
    pub plant_type: String,
    pub native_region: String,
    /// Image references; index 0 is the hero image.
    #[serde(default)]
    pub images: Vec<String>,
    pub description: Description,
    pub care: Care,
    #[serde(default)]
    pub uses: Uses,
    #[serde(default)]
    pub environmental: Environmental,
    pub propagation: Propagation,
    pub safety: Safety,
    #[serde(default)]
    pub interesting_facts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    pub height: String,
    pub leaf_color: String,
    /// Flower / general description text
    pub description: String,
    pub growth_rate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spread: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifespan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leaf_shape: Option<String>,
}

impl Description {
    /// Characters shown before the "Read more" toggle.
    pub const PREVIEW_CHARS: usize = 180;

    /// Collapsed form of the description text.
    pub fn preview(&self) -> String {
        crate::utils::truncate_preview(&self.description, Self::PREVIEW_CHARS)
    }

    pub fn is_long(&self) -> bool {
        self.description.chars().count() > Self::PREVIEW_CHARS
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Care {
    pub water: String,
    pub sunlight: String,
    pub soil_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pruning: Option<String>,
}

/// Sparse uses. Display is driven by which fields are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Uses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medicinal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ornamental: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub culinary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub religious: Option<String>,
}

impl Uses {
    /// Badge labels for the uses this plant has, in display order.
    pub fn badges(&self) -> Vec<&'static str> {
        [
            (self.medicinal.is_some(), "Medicinal"),
            (self.ornamental.is_some(), "Ornamental"),
            (self.culinary.is_some(), "Culinary"),
            (self.religious.is_some(), "Religious"),
        ]
        .into_iter()
        .filter_map(|(present, label)| present.then_some(label))
        .collect()
    }

    /// (heading, text) pairs for the "Uses and Benefits" section.
    pub fn sections(&self) -> Vec<(&'static str, &str)> {
        [
            ("Medicinal Uses", self.medicinal.as_deref()),
            ("Culinary Uses", self.culinary.as_deref()),
            ("Ornamental Uses", self.ornamental.as_deref()),
            ("Religious Significance", self.religious.as_deref()),
        ]
        .into_iter()
        .filter_map(|(heading, text)| text.map(|t| (heading, t)))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environmental {
    #[serde(default)]
    pub air_purifying: bool,
    #[serde(default)]
    pub pollinator_support: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Propagation {
    pub method: String,
    pub season: String,
    pub germination_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Safety {
    #[serde(default)]
    pub toxic_to_pets: bool,
    #[serde(default)]
    pub toxic_to_humans: bool,
    #[serde(default)]
    pub handling_precautions: String,
}

impl Safety {
    /// Precaution text to display, or `None` for the "None required" sentinel.
    pub fn precaution_warning(&self) -> Option<&str> {
        let text = self.handling_precautions.trim();
        if text.is_empty() || text == NO_PRECAUTIONS {
            None
        } else {
            Some(text)
        }
    }
}
