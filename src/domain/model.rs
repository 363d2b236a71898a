use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five weekdays the lunch guide publishes menus for, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Mandag,
    Tisdag,
    Onsdag,
    Torsdag,
    Fredag,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Mandag,
        Weekday::Tisdag,
        Weekday::Onsdag,
        Weekday::Torsdag,
        Weekday::Fredag,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Name as used both in the `veckodag` query parameter and in the output.
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Mandag => "Mandag",
            Weekday::Tisdag => "Tisdag",
            Weekday::Onsdag => "Onsdag",
            Weekday::Torsdag => "Torsdag",
            Weekday::Fredag => "Fredag",
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantEntry {
    pub name: String,
    pub image_reference: String,
    pub description: String,
    pub menu_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayMenu {
    pub day_index: usize,
    pub weekday_name: String,
    pub restaurants: Vec<RestaurantEntry>,
}

impl DayMenu {
    pub fn empty(day: Weekday) -> Self {
        Self {
            day_index: day.index(),
            weekday_name: day.name().to_string(),
            restaurants: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekMenu {
    pub city: String,
    pub week_number: u32,
    pub days: Vec<DayMenu>,
}

impl WeekMenu {
    pub const DAYS_PER_WEEK: usize = 5;

    /// A week with all five day slots present and empty.
    pub fn new(city: impl Into<String>, week_number: u32) -> Self {
        Self {
            city: city.into(),
            week_number,
            days: Weekday::ALL.iter().map(|day| DayMenu::empty(*day)).collect(),
        }
    }

    /// Places a day into its own slot, replacing whatever was there.
    pub fn set_day(&mut self, day: DayMenu) -> Result<()> {
        let slot = self
            .days
            .get_mut(day.day_index)
            .ok_or_else(|| EtlError::InvariantError {
                message: format!("day index {} is outside 0..5", day.day_index),
            })?;
        *slot = day;
        Ok(())
    }

    pub fn restaurant_count(&self) -> usize {
        self.days.iter().map(|d| d.restaurants.len()).sum()
    }

    pub fn check_invariants(&self) -> Result<()> {
        if self.days.len() != Self::DAYS_PER_WEEK {
            return Err(EtlError::InvariantError {
                message: format!(
                    "expected {} days, found {}",
                    Self::DAYS_PER_WEEK,
                    self.days.len()
                ),
            });
        }

        for (position, (day, expected)) in self.days.iter().zip(Weekday::ALL).enumerate() {
            if day.day_index != position || day.weekday_name != expected.name() {
                return Err(EtlError::InvariantError {
                    message: format!(
                        "slot {} holds day {} ({}), expected {}",
                        position, day.day_index, day.weekday_name, expected
                    ),
                });
            }
        }

        Ok(())
    }

    /// Parses a previously written menu document, rejecting anything that is
    /// not exactly five correctly ordered days.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        let week: WeekMenu = serde_json::from_slice(bytes)?;
        week.check_invariants()?;
        Ok(week)
    }
}

/// Raw outcome of fetching one day's page.
#[derive(Debug)]
pub struct DayDocument {
    pub day: Weekday,
    pub body: Result<Vec<u8>>,
}

impl DayDocument {
    pub fn fetched(day: Weekday, body: Vec<u8>) -> Self {
        Self { day, body: Ok(body) }
    }

    pub fn failed(day: Weekday, error: EtlError) -> Self {
        Self { day, body: Err(error) }
    }
}

/// Non-fatal findings collected while building the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    FetchFailed {
        day: Weekday,
        message: String,
    },
    SegmentSkipped {
        day: Weekday,
        position: usize,
        reason: String,
    },
    UnresolvedImage {
        day: Weekday,
        image_reference: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::FetchFailed { day, message } => {
                write!(f, "{}: fetch failed: {}", day, message)
            }
            Diagnostic::SegmentSkipped { day, position, reason } => {
                write!(f, "{}: restaurant #{} skipped: {}", day, position + 1, reason)
            }
            Diagnostic::UnresolvedImage { day, image_reference } => {
                write!(f, "{}: no restaurant name for image {}", day, image_reference)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Assembly {
    pub week: WeekMenu,
    pub diagnostics: Vec<Diagnostic>,
}

impl Assembly {
    pub fn unresolved_images(&self) -> Vec<&str> {
        let mut images: Vec<&str> = self
            .diagnostics
            .iter()
            .filter_map(|d| match d {
                Diagnostic::UnresolvedImage { image_reference, .. } => Some(image_reference.as_str()),
                _ => None,
            })
            .collect();
        images.sort_unstable();
        images.dedup();
        images
    }
}

/// Where the load phase put the two artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub json_path: String,
    pub digest_path: String,
    pub digest: String,
    pub bytes_written: usize,
}
