//! Plant image lookup table
//!
//! `images.json` maps plant ids to ordered image URIs (index 0 = hero) and
//! lists the named photos for the image gallery page:
//!
//! ```json
//! { "plants": { "1": ["/assets/palas_hero.jpeg", "..."] },
//!   "gallery": [ { "name": "Neem", "image": "/assets/neem_4.jpeg" } ] }
//! ```
//!
//! A plant id listed twice is a data error and rejected at load time rather
//! than silently letting the later entry win.

use rustc_hash::FxHashMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::Path;

use crate::error::{read_data_file, CatalogError};

/// Returned when no image is mapped for an id/index pair.
pub const PLACEHOLDER_IMAGE: &str = "/api/placeholder/400/300";

/// One photo on the image gallery page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Default)]
pub struct ImageCatalog {
    by_plant: FxHashMap<u32, Vec<String>>,
    gallery: Vec<GalleryImage>,
}

/// `plants` object kept as ordered entries so duplicate keys are visible.
struct RawEntries(Vec<(String, Vec<String>)>);

impl<'de> Deserialize<'de> for RawEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = RawEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of plant id to image list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<RawEntries, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, images)) = map.next_entry::<String, Vec<String>>()? {
                    entries.push((key, images));
                }
                Ok(RawEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

#[derive(Deserialize)]
struct RawImageFile {
    #[serde(default = "empty_entries")]
    plants: RawEntries,
    #[serde(default)]
    gallery: Vec<GalleryImage>,
}

fn empty_entries() -> RawEntries {
    RawEntries(Vec::new())
}

impl ImageCatalog {
    pub fn new(entries: impl IntoIterator<Item = (u32, Vec<String>)>, gallery: Vec<GalleryImage>) -> Result<Self, CatalogError> {
        let mut by_plant = FxHashMap::default();
        for (id, images) in entries {
            if by_plant.insert(id, images).is_some() {
                return Err(CatalogError::DuplicateImageId(id));
            }
        }
        Ok(Self { by_plant, gallery })
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: RawImageFile = serde_json::from_str(json)?;

        let entries = raw
            .plants
            .0
            .into_iter()
            .map(|(key, images)| {
                key.trim()
                    .parse::<u32>()
                    .map(|id| (id, images))
                    .map_err(|_| CatalogError::InvalidImageKey(key))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(entries, raw.gallery)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let images = Self::from_json_str(&read_data_file(path)?)?;
        tracing::info!(
            "Loaded image table for {} plants ({} gallery photos) from {}",
            images.by_plant.len(),
            images.gallery.len(),
            path.display()
        );
        Ok(images)
    }

    /// Image `index` of plant `plant_id`, or the placeholder.
    pub fn get_image(&self, plant_id: u32, index: usize) -> &str {
        self.by_plant
            .get(&plant_id)
            .and_then(|images| images.get(index))
            .map(|s| s.as_str())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    pub fn gallery(&self) -> &[GalleryImage] {
        &self.gallery
    }
}
