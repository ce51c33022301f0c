use crate::error::RaceError;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;

/// Struct representing the track.
/// Stores the items in driving order and the difficulty scalar used
/// for mechanical reliability checks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "TrackRecord")]
pub struct Track {
    items: Vec<TrackItem>,
    reliability_rating: f64,
}

impl Track {
    pub fn new(items: Vec<TrackItem>, reliability_rating: f64) -> Result<Self, RaceError> {
        if items.is_empty() {
            return Err(RaceError::EmptyTrack);
        }
        if reliability_rating.is_nan() || reliability_rating <= 0.0 {
            return Err(RaceError::InvalidTrackRating(reliability_rating));
        }
        let mut seen = HashSet::new();
        for item in items.iter() {
            if !seen.insert(item.id.as_str()) {
                return Err(RaceError::DuplicateItem(item.id.clone()));
            }
        }
        Ok(Self {
            items,
            reliability_rating,
        })
    }

    pub fn items(&self) -> &[TrackItem] {
        &self.items
    }

    pub fn reliability_rating(&self) -> f64 {
        self.reliability_rating
    }

    /// Sum of the base times of all items.
    pub fn base_lap_time(&self) -> f64 {
        self.items.iter().map(|i| i.base_time).sum()
    }

    /// Rough duration of a race in seconds, ignoring car ratings and incidents.
    pub fn estimated_duration(&self, laps: u64) -> f64 {
        self.base_lap_time() * laps as f64
    }
}

/// Struct representing a single corner or straight of the track.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackItem {
    /// Key of the item in the track file
    #[serde(skip)]
    pub id: String,
    pub base_time: f64,
    pub power: f64,
    pub handling: f64,
    #[serde(default)]
    pub is_sector_end: bool,
    #[serde(default)]
    pub is_lap_end: bool,
}

impl TrackItem {
    pub fn new(id: &str, base_time: f64, power: f64, handling: f64) -> Self {
        Self {
            id: String::from(id),
            base_time,
            power,
            handling,
            is_sector_end: false,
            is_lap_end: false,
        }
    }

    pub fn ending_lap(mut self) -> Self {
        self.is_lap_end = true;
        self
    }

    pub fn ending_sector(mut self) -> Self {
        self.is_sector_end = true;
        self
    }

    /// Reliability checks happen at every sector end, the lap end included.
    pub fn triggers_reliability_check(&self) -> bool {
        self.is_sector_end || self.is_lap_end
    }
}

/// Track as written in the track file.
#[derive(Deserialize)]
struct TrackRecord {
    #[serde(alias = "relability_rating")]
    reliability_rating: f64,
    #[serde(deserialize_with = "items_in_order")]
    items: Vec<TrackItem>,
}

impl TryFrom<TrackRecord> for Track {
    type Error = RaceError;

    fn try_from(record: TrackRecord) -> Result<Self, Self::Error> {
        Track::new(record.items, record.reliability_rating)
    }
}

/// Reads the `items` object keeping the order the items are written in.
fn items_in_order<'de, D>(deserializer: D) -> Result<Vec<TrackItem>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ItemsVisitor;

    impl<'de> Visitor<'de> for ItemsVisitor {
        type Value = Vec<TrackItem>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of track item ids to track items")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut items = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((id, mut item)) = map.next_entry::<String, TrackItem>()? {
                if items.iter().any(|i: &TrackItem| i.id == id) {
                    return Err(de::Error::custom(format!("duplicate track item {id}")));
                }
                item.id = id;
                items.push(item);
            }
            Ok(items)
        }
    }

    deserializer.deserialize_map(ItemsVisitor)
}
