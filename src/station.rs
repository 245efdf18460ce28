//! Station records feeding locations into the irradiance model.

use crate::irradiance::Location;

#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    pub id: String,
    pub location: Location,
}

/// Raw attributes of one station entry as they appear in the feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationRecord {
    pub id: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl Station {
    /// `None` when an attribute is missing, and also when the id is blank,
    /// a coordinate does not parse, or the latitude lies outside [-90, 90].
    /// A record the feed carries but that cannot become a [`Location`] is
    /// treated like a missing one.
    pub fn from_attributes(id: Option<&str>, lat: Option<&str>, lon: Option<&str>) -> Option<Self> {
        let id = id?.trim();
        if id.is_empty() {
            return None;
        }
        let latitude = lat?.trim().parse().ok()?;
        let longitude = lon?.trim().parse().ok()?;
        let location = Location::new(latitude, longitude).ok()?;
        Some(Station {
            id: id.to_string(),
            location,
        })
    }
}

impl StationRecord {
    pub fn to_station(&self) -> Option<Station> {
        Station::from_attributes(self.id.as_deref(), self.lat.as_deref(), self.lon.as_deref())
    }
}

/// Keeps the usable records, in feed order.
pub fn collect_stations<'a, I>(records: I) -> Vec<Station>
where
    I: IntoIterator<Item = &'a StationRecord>,
{
    records.into_iter().filter_map(StationRecord::to_station).collect()
}
