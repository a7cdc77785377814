//! Core record types for fitlog.
//!
//! This module defines the four record shapes the tracker logs:
//! - Workouts (one exercise, ordered sets)
//! - Cardio sessions
//! - Daily nutrition
//! - Bodyweight measurements
//!
//! Records carry no behavior beyond structure and display. They are built by
//! [`crate::builder`] and never mutated once created.

use crate::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Entry Kinds
// ============================================================================

/// The closed set of things that can be logged
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Workout,
    Cardio,
    Nutrition,
    Bodyweight,
}

impl EntryKind {
    /// All kinds, in menu order
    pub const ALL: [EntryKind; 4] = [
        EntryKind::Workout,
        EntryKind::Cardio,
        EntryKind::Nutrition,
        EntryKind::Bodyweight,
    ];

    /// Human-readable sheet name
    pub fn sheet_name(&self) -> &'static str {
        match self {
            EntryKind::Workout => "Workouts",
            EntryKind::Cardio => "Cardio",
            EntryKind::Nutrition => "Nutrition",
            EntryKind::Bodyweight => "Bodyweight",
        }
    }

    /// File holding this kind's sheet inside the data directory
    pub fn file_name(&self) -> &'static str {
        match self {
            EntryKind::Workout => "workouts.csv",
            EntryKind::Cardio => "cardio.csv",
            EntryKind::Nutrition => "nutrition.csv",
            EntryKind::Bodyweight => "bodyweight.csv",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sheet_name())
    }
}

impl FromStr for EntryKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "workout" | "workouts" => Ok(EntryKind::Workout),
            "cardio" => Ok(EntryKind::Cardio),
            "nutrition" => Ok(EntryKind::Nutrition),
            "bodyweight" | "weight" => Ok(EntryKind::Bodyweight),
            _ => Err(ValidationError::new(
                "entry kind",
                "must be one of workout, cardio, nutrition, bodyweight",
            )),
        }
    }
}

// ============================================================================
// Record Shapes
// ============================================================================

/// One reps/weight pair within a workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutSet {
    pub reps: u32,
    pub weight: f64,
}

/// A single exercise performed for one or more sets
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Workout {
    /// Ties the stored rows of one logging event together
    pub id: Uuid,
    pub date: NaiveDate,
    pub exercise: String,
    pub sets: Vec<WorkoutSet>,
    pub notes: String,
}

/// A cardio session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cardio {
    pub date: NaiveDate,
    pub activity: String,
    pub duration_minutes: f64,
    pub notes: String,
}

/// A full day of eating
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Nutrition {
    pub date: NaiveDate,
    pub calories: u32,
    /// Nutrient name to grams
    pub macros: BTreeMap<String, f64>,
    /// Whether everything eaten that day was tracked
    pub tracked: bool,
    pub notes: String,
}

/// A bodyweight weigh-in
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Bodyweight {
    pub date: NaiveDate,
    pub recorded_at: DateTime<Utc>,
    pub weight: f64,
    pub notes: String,
}

// ============================================================================
// Record Union
// ============================================================================

/// Any loggable record, tagged by kind
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Workout(Workout),
    Cardio(Cardio),
    Nutrition(Nutrition),
    Bodyweight(Bodyweight),
}

impl Record {
    pub fn kind(&self) -> EntryKind {
        match self {
            Record::Workout(_) => EntryKind::Workout,
            Record::Cardio(_) => EntryKind::Cardio,
            Record::Nutrition(_) => EntryKind::Nutrition,
            Record::Bodyweight(_) => EntryKind::Bodyweight,
        }
    }

    /// The calendar day this record was logged for
    pub fn date(&self) -> NaiveDate {
        match self {
            Record::Workout(w) => w.date,
            Record::Cardio(c) => c.date,
            Record::Nutrition(n) => n.date,
            Record::Bodyweight(b) => b.date,
        }
    }

    pub fn notes(&self) -> &str {
        match self {
            Record::Workout(w) => &w.notes,
            Record::Cardio(c) => &c.notes,
            Record::Nutrition(n) => &n.notes,
            Record::Bodyweight(b) => &b.notes,
        }
    }
}

impl From<Workout> for Record {
    fn from(w: Workout) -> Self {
        Record::Workout(w)
    }
}

impl From<Cardio> for Record {
    fn from(c: Cardio) -> Self {
        Record::Cardio(c)
    }
}

impl From<Nutrition> for Record {
    fn from(n: Nutrition) -> Self {
        Record::Nutrition(n)
    }
}

impl From<Bodyweight> for Record {
    fn from(b: Bodyweight) -> Self {
        Record::Bodyweight(b)
    }
}

/// One-line summary used for history listings
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  ", self.date())?;
        match self {
            Record::Workout(w) => {
                let sets: Vec<String> = w
                    .sets
                    .iter()
                    .map(|s| format!("{}x{}", s.reps, s.weight))
                    .collect();
                write!(f, "{}  {}", w.exercise, sets.join(", "))?;
            }
            Record::Cardio(c) => {
                write!(f, "{}  {} min", c.activity, c.duration_minutes)?;
            }
            Record::Nutrition(n) => {
                write!(f, "{} kcal", n.calories)?;
                for (name, grams) in &n.macros {
                    write!(f, "  {} {}g", name, grams)?;
                }
                write!(f, "  tracked: {}", if n.tracked { "yes" } else { "no" })?;
            }
            Record::Bodyweight(b) => {
                write!(f, "{}", b.weight)?;
            }
        }
        if !self.notes().is_empty() {
            write!(f, "  ({})", self.notes())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_entry_kind_parsing() {
        assert_eq!("workout".parse::<EntryKind>().unwrap(), EntryKind::Workout);
        assert_eq!("Workouts".parse::<EntryKind>().unwrap(), EntryKind::Workout);
        assert_eq!(" Cardio ".parse::<EntryKind>().unwrap(), EntryKind::Cardio);
        assert_eq!("weight".parse::<EntryKind>().unwrap(), EntryKind::Bodyweight);
        assert!("yoga".parse::<EntryKind>().is_err());
    }

    #[test]
    fn test_record_kind_and_date() {
        let record = Record::from(Cardio {
            date: day(4),
            activity: "run".into(),
            duration_minutes: 30.0,
            notes: String::new(),
        });
        assert_eq!(record.kind(), EntryKind::Cardio);
        assert_eq!(record.date(), day(4));
    }

    #[test]
    fn test_workout_display() {
        let record = Record::from(Workout {
            id: Uuid::new_v4(),
            date: day(1),
            exercise: "Squats".into(),
            sets: vec![
                WorkoutSet { reps: 10, weight: 60.0 },
                WorkoutSet { reps: 8, weight: 62.5 },
            ],
            notes: "felt strong".into(),
        });
        assert_eq!(
            record.to_string(),
            "2024-03-01  Squats  10x60, 8x62.5  (felt strong)"
        );
    }

    #[test]
    fn test_record_json_is_tagged() {
        let record = Record::from(Bodyweight {
            date: day(2),
            recorded_at: Utc::now(),
            weight: 80.5,
            notes: String::new(),
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "bodyweight");
        assert_eq!(json["weight"], 80.5);
    }
}
