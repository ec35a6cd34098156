use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

/// The sports that can be booked. Cricket, Football and Badminton reserve
/// exclusive time intervals on a field; Swimming books people into shared
/// fixed-capacity sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
pub enum Sport {
    Cricket,
    Football,
    Badminton,
    Swimming,
}

impl Sport {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::Cricket => "Cricket",
            Sport::Football => "Football",
            Sport::Badminton => "Badminton",
            Sport::Swimming => "Swimming",
        }
    }

    pub fn is_interval_sport(&self) -> bool {
        !matches!(self, Sport::Swimming)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sport {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cricket" => Ok(Sport::Cricket),
            "Football" => Ok(Sport::Football),
            "Badminton" => Ok(Sport::Badminton),
            "Swimming" => Ok(Sport::Swimming),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Turf {
    pub id: i64,
    pub name: String,
    pub location: String,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct FieldSize {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}
