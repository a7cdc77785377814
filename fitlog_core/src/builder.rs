//! Entry builder and validator.
//!
//! Turns raw prompt values into records. Every `build_*` function either
//! returns a record holding exactly the values it was given or a
//! [`ValidationError`] naming the field that was rejected. Text is never
//! trimmed or rewritten here; callers decide what counts as the raw value.
//!
//! The `parse_*` helpers convert prompt strings into the primitives the
//! builders take, so the CLI can re-prompt a single field as soon as it is
//! typed instead of after the whole entry.

use crate::types::{Bodyweight, Cardio, Nutrition, Workout, WorkoutSet};
use crate::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Characters reserved by the stored macro list
const MACRO_DELIMITERS: [char; 2] = ['=', ';'];

// ============================================================================
// Builders
// ============================================================================

/// Build a workout from an ordered list of `(reps, weight)` sets
pub fn build_workout(
    date: NaiveDate,
    exercise: &str,
    sets: &[(i64, f64)],
    notes: &str,
) -> Result<Workout, ValidationError> {
    build_workout_with_id(Uuid::new_v4(), date, exercise, sets, notes)
}

/// Same as [`build_workout`] with a caller-supplied entry id
pub fn build_workout_with_id(
    id: Uuid,
    date: NaiveDate,
    exercise: &str,
    sets: &[(i64, f64)],
    notes: &str,
) -> Result<Workout, ValidationError> {
    require_text("exercise name", exercise)?;

    if sets.is_empty() {
        return Err(ValidationError::new("sets", "must contain at least one set"));
    }

    let sets = sets
        .iter()
        .enumerate()
        .map(|(i, &(reps, weight))| {
            let n = i + 1;
            Ok(WorkoutSet {
                reps: validate_reps(&format!("set {} reps", n), reps)?,
                weight: validate_weight(&format!("set {} weight", n), weight)?,
            })
        })
        .collect::<Result<Vec<_>, ValidationError>>()?;

    Ok(Workout {
        id,
        date,
        exercise: exercise.to_string(),
        sets,
        notes: notes.to_string(),
    })
}

/// Build a cardio session
pub fn build_cardio(
    date: NaiveDate,
    activity: &str,
    duration_minutes: f64,
    notes: &str,
) -> Result<Cardio, ValidationError> {
    require_text("cardio type", activity)?;
    let duration_minutes = validate_positive("duration", duration_minutes)?;

    Ok(Cardio {
        date,
        activity: activity.to_string(),
        duration_minutes,
        notes: notes.to_string(),
    })
}

/// Build a nutrition entry from calories and `(nutrient, grams)` pairs
pub fn build_nutrition<I, S>(
    date: NaiveDate,
    calories: i64,
    macros: I,
    tracked: bool,
    notes: &str,
) -> Result<Nutrition, ValidationError>
where
    I: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    let calories = validate_count("calories", calories)?;

    let mut map = BTreeMap::new();
    for (name, grams) in macros {
        let name: String = name.into();
        require_text("nutrient name", &name)?;
        if name.contains(MACRO_DELIMITERS) {
            return Err(ValidationError::new(
                "nutrient name",
                "must not contain '=' or ';'",
            ));
        }
        if name.trim() != name {
            return Err(ValidationError::new(
                "nutrient name",
                "must not start or end with whitespace",
            ));
        }
        let grams = validate_weight(&name, grams)?;
        if map.insert(name.clone(), grams).is_some() {
            return Err(ValidationError::new(name, "was given more than once"));
        }
    }

    Ok(Nutrition {
        date,
        calories,
        macros: map,
        tracked,
        notes: notes.to_string(),
    })
}

/// Build a bodyweight entry stamped with the current time
pub fn build_bodyweight(
    date: NaiveDate,
    weight: f64,
    notes: &str,
) -> Result<Bodyweight, ValidationError> {
    build_bodyweight_at(Utc::now(), date, weight, notes)
}

/// Same as [`build_bodyweight`] with an explicit timestamp
pub fn build_bodyweight_at(
    recorded_at: DateTime<Utc>,
    date: NaiveDate,
    weight: f64,
    notes: &str,
) -> Result<Bodyweight, ValidationError> {
    let weight = validate_positive("bodyweight", weight)?;

    Ok(Bodyweight {
        date,
        recorded_at,
        weight,
        notes: notes.to_string(),
    })
}

// ============================================================================
// Field Validators
// ============================================================================

/// Required text must contain something other than whitespace
pub fn require_text(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    Ok(())
}

pub fn validate_reps(field: &str, reps: i64) -> Result<u32, ValidationError> {
    match u32::try_from(reps) {
        Ok(r) if r > 0 => Ok(r),
        _ => Err(ValidationError::new(field, "must be a positive integer")),
    }
}

/// Finite and >= 0
pub fn validate_weight(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::new(field, "must be a non-negative number"));
    }
    Ok(value)
}

/// Finite and > 0
pub fn validate_positive(field: &str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new(field, "must be a positive number"));
    }
    Ok(value)
}

pub fn validate_count(field: &str, value: i64) -> Result<u32, ValidationError> {
    u32::try_from(value)
        .map_err(|_| ValidationError::new(field, "must be a non-negative integer"))
}

// ============================================================================
// Prompt Parsers
// ============================================================================

/// Parse a positive integer rep count
pub fn parse_reps(field: &str, text: &str) -> Result<u32, ValidationError> {
    let reps = text
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::new(field, "must be a positive integer"))?;
    validate_reps(field, reps)
}

/// Parse a non-negative integer (calories, grams, set counts of zero allowed)
pub fn parse_count(field: &str, text: &str) -> Result<u32, ValidationError> {
    let value = text
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::new(field, "must be a non-negative integer"))?;
    validate_count(field, value)
}

/// Parse any finite decimal number; range checks are left to the builders
pub fn parse_number(field: &str, text: &str) -> Result<f64, ValidationError> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::new(field, "must be a number")),
    }
}

/// Parse a `YYYY-MM-DD` date, falling back to `today` for empty input
pub fn parse_date(text: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| ValidationError::new("date", "must be formatted as YYYY-MM-DD"))
}

/// Parse a yes/no answer
pub fn parse_flag(field: &str, text: &str) -> Result<bool, ValidationError> {
    match text.trim().to_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Ok(true),
        "n" | "no" | "false" | "0" => Ok(false),
        _ => Err(ValidationError::new(field, "must be yes or no")),
    }
}

/// Parse `REPSxWEIGHT` set notation, e.g. `10x60`
pub fn parse_set(text: &str) -> Result<(i64, f64), ValidationError> {
    let malformed = || ValidationError::new("set", "must look like REPSxWEIGHT, e.g. 10x60");

    let (reps, weight) = text
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(malformed)?;
    let reps = reps.trim().parse::<i64>().map_err(|_| malformed())?;
    let weight = weight.trim().parse::<f64>().map_err(|_| malformed())?;
    Ok((reps, weight))
}

/// Parse `name=grams` macro notation, e.g. `fiber=30`
pub fn parse_macro(text: &str) -> Result<(String, f64), ValidationError> {
    let (name, grams) = text
        .split_once('=')
        .ok_or_else(|| ValidationError::new("macro", "must look like NAME=GRAMS, e.g. fiber=30"))?;
    let grams = parse_number(name.trim(), grams)?;
    Ok((name.trim().to_string(), grams))
}
