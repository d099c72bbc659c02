use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Road classification tag attached to every edge.
///
/// Tags follow OpenStreetMap `highway=*` values. Anything outside the known
/// set is kept verbatim in [`RoadClass::Other`] and travels at
/// [`RoadClass::DEFAULT_SPEED`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoadClass {
    Motorway,
    Trunk,
    Primary,
    Secondary,
    Tertiary,
    Unclassified,
    TrunkLink,
    PrimaryLink,
    Residential,
    Service,
    SecondaryLink,
    MotorwayLink,
    TertiaryLink,
    LivingStreet,
    Pedestrian,
    Track,
    Other(String),
}

impl RoadClass {
    /// Speed assumed for unrecognised tags.
    pub const DEFAULT_SPEED: f64 = 20.0;
    /// Fastest speed of any class.
    pub const MAX_SPEED: f64 = 70.0;

    /// Classify a tag. Matching is exact and case-sensitive.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "motorway" => RoadClass::Motorway,
            "trunk" => RoadClass::Trunk,
            "primary" => RoadClass::Primary,
            "secondary" => RoadClass::Secondary,
            "tertiary" => RoadClass::Tertiary,
            "unclassified" => RoadClass::Unclassified,
            "trunk_link" => RoadClass::TrunkLink,
            "primary_link" => RoadClass::PrimaryLink,
            "residential" => RoadClass::Residential,
            "service" => RoadClass::Service,
            "secondary_link" => RoadClass::SecondaryLink,
            "motorway_link" => RoadClass::MotorwayLink,
            "tertiary_link" => RoadClass::TertiaryLink,
            "living_street" => RoadClass::LivingStreet,
            "pedestrian" => RoadClass::Pedestrian,
            "track" => RoadClass::Track,
            other => RoadClass::Other(other.to_string()),
        }
    }

    pub fn as_tag(&self) -> &str {
        match self {
            RoadClass::Motorway => "motorway",
            RoadClass::Trunk => "trunk",
            RoadClass::Primary => "primary",
            RoadClass::Secondary => "secondary",
            RoadClass::Tertiary => "tertiary",
            RoadClass::Unclassified => "unclassified",
            RoadClass::TrunkLink => "trunk_link",
            RoadClass::PrimaryLink => "primary_link",
            RoadClass::Residential => "residential",
            RoadClass::Service => "service",
            RoadClass::SecondaryLink => "secondary_link",
            RoadClass::MotorwayLink => "motorway_link",
            RoadClass::TertiaryLink => "tertiary_link",
            RoadClass::LivingStreet => "living_street",
            RoadClass::Pedestrian => "pedestrian",
            RoadClass::Track => "track",
            RoadClass::Other(tag) => tag,
        }
    }

    /// Assumed travel speed, in length units per time unit.
    pub fn speed(&self) -> f64 {
        match self {
            RoadClass::Motorway => 70.0,
            RoadClass::Trunk => 60.0,
            RoadClass::Primary => 55.0,
            RoadClass::Secondary => 50.0,
            RoadClass::Tertiary => 45.0,
            RoadClass::Unclassified | RoadClass::TrunkLink | RoadClass::PrimaryLink => 30.0,
            RoadClass::Residential => 25.0,
            RoadClass::Service | RoadClass::SecondaryLink => 20.0,
            RoadClass::MotorwayLink => 35.0,
            RoadClass::TertiaryLink
            | RoadClass::LivingStreet
            | RoadClass::Pedestrian
            | RoadClass::Track => 15.0,
            RoadClass::Other(_) => Self::DEFAULT_SPEED,
        }
    }

    /// Time needed to cover `length` on a road of this class.
    pub fn travel_time(&self, length: f64) -> f64 {
        length / self.speed()
    }
}

impl fmt::Display for RoadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for RoadClass {
    type Err = Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(tag))
    }
}

impl From<&str> for RoadClass {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl Serialize for RoadClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}
