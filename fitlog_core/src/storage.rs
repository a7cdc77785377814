//! CSV persistence for the record table.
//!
//! Each entry kind lives in its own CSV file inside the data directory.
//! Sheets are read under a shared lock and rewritten atomically (temp file,
//! fsync, rename) under an exclusive lock, so a sheet on disk is always
//! either the old or the new version.
//!
//! Workouts are stored one row per set; rows of the same logging event share
//! an `entry_id` and are numbered by `set_number` starting at 1.

use crate::builder::{build_bodyweight_at, build_cardio, build_nutrition, build_workout_with_id};
use crate::table::Table;
use crate::types::{Bodyweight, Cardio, EntryKind, Nutrition, Record, Workout};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use uuid::Uuid;

/// Record store trait for loading and appending records
pub trait RecordStore {
    fn load(&self) -> Result<Table>;
    fn append(&mut self, record: &Record) -> Result<()>;
}

// ============================================================================
// Row Formats
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct WorkoutRow {
    entry_id: Uuid,
    date: NaiveDate,
    exercise: String,
    set_number: u32,
    reps: i64,
    weight: f64,
    notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CardioRow {
    date: NaiveDate,
    activity: String,
    duration_minutes: f64,
    notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct NutritionRow {
    date: NaiveDate,
    calories: i64,
    macros: String,
    tracked: bool,
    notes: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct BodyweightRow {
    date: NaiveDate,
    recorded_at: DateTime<Utc>,
    weight: f64,
    notes: String,
}

fn workout_rows(workout: &Workout) -> impl Iterator<Item = WorkoutRow> + '_ {
    workout.sets.iter().zip(1..).map(move |(set, set_number)| WorkoutRow {
        entry_id: workout.id,
        date: workout.date,
        exercise: workout.exercise.clone(),
        set_number,
        reps: i64::from(set.reps),
        weight: set.weight,
        notes: workout.notes.clone(),
    })
}

impl From<&Cardio> for CardioRow {
    fn from(c: &Cardio) -> Self {
        CardioRow {
            date: c.date,
            activity: c.activity.clone(),
            duration_minutes: c.duration_minutes,
            notes: c.notes.clone(),
        }
    }
}

impl From<&Nutrition> for NutritionRow {
    fn from(n: &Nutrition) -> Self {
        let macros: Vec<String> = n
            .macros
            .iter()
            .map(|(name, grams)| format!("{}={}", name, grams))
            .collect();
        NutritionRow {
            date: n.date,
            calories: i64::from(n.calories),
            macros: macros.join(";"),
            tracked: n.tracked,
            notes: n.notes.clone(),
        }
    }
}

impl From<&Bodyweight> for BodyweightRow {
    fn from(b: &Bodyweight) -> Self {
        BodyweightRow {
            date: b.date,
            recorded_at: b.recorded_at,
            weight: b.weight,
            notes: b.notes.clone(),
        }
    }
}

/// Split one stored `name=grams` pair exactly as written
fn decode_macro(pair: &str) -> std::result::Result<(String, f64), crate::ValidationError> {
    let malformed = || crate::ValidationError::new("macros", format!("malformed entry {:?}", pair));

    let (name, grams) = pair.split_once('=').ok_or_else(malformed)?;
    let grams = grams.parse::<f64>().map_err(|_| malformed())?;
    Ok((name.to_string(), grams))
}

/// Rows are re-validated through the builder so a loaded table holds the
/// same invariants as a freshly built one.
impl TryFrom<CardioRow> for Cardio {
    type Error = crate::ValidationError;

    fn try_from(row: CardioRow) -> std::result::Result<Self, Self::Error> {
        build_cardio(row.date, &row.activity, row.duration_minutes, &row.notes)
    }
}

impl TryFrom<NutritionRow> for Nutrition {
    type Error = crate::ValidationError;

    fn try_from(row: NutritionRow) -> std::result::Result<Self, Self::Error> {
        let macros = row
            .macros
            .split(';')
            .filter(|m| !m.is_empty())
            .map(decode_macro)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        build_nutrition(row.date, row.calories, macros, row.tracked, &row.notes)
    }
}

impl TryFrom<BodyweightRow> for Bodyweight {
    type Error = crate::ValidationError;

    fn try_from(row: BodyweightRow) -> std::result::Result<Self, Self::Error> {
        build_bodyweight_at(row.recorded_at, row.date, row.weight, &row.notes)
    }
}

// ============================================================================
// CSV Store
// ============================================================================

/// CSV-backed record store rooted at a data directory
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    /// Create a store for the given data directory
    ///
    /// Nothing is touched on disk until the first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the CSV file holding `kind`
    pub fn sheet_path(&self, kind: EntryKind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    /// Write every sheet of `table` back to disk
    pub fn save(&self, table: &Table) -> Result<()> {
        for kind in EntryKind::ALL {
            self.write_sheet(kind, table.sheet(kind))?;
        }
        tracing::info!("Saved {} records to {:?}", table.len(), self.dir);
        Ok(())
    }

    fn read_sheet(&self, kind: EntryKind) -> Result<Vec<Record>> {
        let path = self.sheet_path(kind);
        if !path.exists() {
            tracing::info!("No {} sheet at {:?}, starting empty", kind, path);
            return Ok(Vec::new());
        }

        let records = match kind {
            EntryKind::Workout => read_workouts(&path)?,
            EntryKind::Cardio => read_converted::<CardioRow, Cardio>(&path)?,
            EntryKind::Nutrition => read_converted::<NutritionRow, Nutrition>(&path)?,
            EntryKind::Bodyweight => read_converted::<BodyweightRow, Bodyweight>(&path)?,
        };

        tracing::debug!("Read {} {} records from {:?}", records.len(), kind, path);
        Ok(records)
    }

    fn write_sheet(&self, kind: EntryKind, records: &[Record]) -> Result<()> {
        let path = self.sheet_path(kind);
        if records.is_empty() && !path.exists() {
            return Ok(());
        }

        std::fs::create_dir_all(&self.dir)?;

        // Temp file in the same directory so the rename stays atomic
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(true)
                .from_writer(temp.as_file());

            for record in records {
                match record {
                    Record::Workout(w) => {
                        for row in workout_rows(w) {
                            writer.serialize(row)?;
                        }
                    }
                    Record::Cardio(c) => writer.serialize(CardioRow::from(c))?,
                    Record::Nutrition(n) => writer.serialize(NutritionRow::from(n))?,
                    Record::Bodyweight(b) => writer.serialize(BodyweightRow::from(b))?,
                }
            }

            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(&path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Wrote {} {} records to {:?}", records.len(), kind, path);
        Ok(())
    }
}

impl RecordStore for CsvStore {
    fn load(&self) -> Result<Table> {
        let mut table = Table::new();
        for kind in EntryKind::ALL {
            table.set_sheet(kind, self.read_sheet(kind)?);
        }
        tracing::debug!("Loaded {} records from {:?}", table.len(), self.dir);
        Ok(table)
    }

    fn append(&mut self, record: &Record) -> Result<()> {
        let mut table = self.load()?;
        table.push(record.clone());
        self.save(&table)?;
        tracing::info!("Appended {} entry for {}", record.kind(), record.date());
        Ok(())
    }
}

// ============================================================================
// Sheet Readers
// ============================================================================

/// Deserialize every row of a sheet under a shared lock
fn read_rows<R: DeserializeOwned>(path: &Path) -> Result<Vec<R>> {
    let file = File::open(path)?;
    file.lock_shared()?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(&file);

    let mut rows = Vec::new();
    for (index, result) in reader.deserialize::<R>().enumerate() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                let _ = file.unlock();
                return Err(corrupt(path, index, e.to_string()));
            }
        }
    }

    file.unlock()?;
    Ok(rows)
}

fn read_converted<R, T>(path: &Path) -> Result<Vec<Record>>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = crate::ValidationError>,
    Record: From<T>,
{
    read_rows::<R>(path)?
        .into_iter()
        .enumerate()
        .map(|(index, row)| {
            T::try_from(row)
                .map(Record::from)
                .map_err(|e| corrupt(path, index, e.to_string()))
        })
        .collect()
}

/// Regroup per-set rows into workouts, keeping first-appearance order
fn read_workouts(path: &Path) -> Result<Vec<Record>> {
    struct Pending {
        first_row: usize,
        entry_id: Uuid,
        date: NaiveDate,
        exercise: String,
        notes: String,
        sets: Vec<(u32, (i64, f64))>,
    }

    let mut pending: Vec<Pending> = Vec::new();
    let mut by_id: HashMap<Uuid, usize> = HashMap::new();

    for (index, row) in read_rows::<WorkoutRow>(path)?.into_iter().enumerate() {
        let slot = *by_id.entry(row.entry_id).or_insert_with(|| {
            pending.push(Pending {
                first_row: index,
                entry_id: row.entry_id,
                date: row.date,
                exercise: row.exercise.clone(),
                notes: row.notes.clone(),
                sets: Vec::new(),
            });
            pending.len() - 1
        });
        pending[slot].sets.push((row.set_number, (row.reps, row.weight)));
    }

    pending
        .into_iter()
        .map(|mut p| {
            p.sets.sort_by_key(|(n, _)| *n);
            let sets: Vec<(i64, f64)> = p.sets.into_iter().map(|(_, s)| s).collect();
            build_workout_with_id(p.entry_id, p.date, &p.exercise, &sets, &p.notes)
                .map(Record::from)
                .map_err(|e| corrupt(path, p.first_row, e.to_string()))
        })
        .collect()
}

/// `index` is the zero-based data row; reported rows are one-based
fn corrupt(path: &Path, index: usize, message: String) -> Error {
    Error::CorruptRow {
        path: path.to_path_buf(),
        row: index + 1,
        message,
    }
}
