//! Interactive numbered menu.
//!
//! Every logger prints recent history first, then asks for one field at a
//! time. A field that fails to parse or validate is asked again; end of
//! input quits the menu.

use chrono::NaiveDate;
use fitlog_core::builder::{self, parse_count, parse_date, parse_flag, parse_number, parse_reps};
use fitlog_core::{recent_entries, EntryKind, Record, RecordStore, Result, ValidationError};
use std::io::{BufRead, Write};

/// Whether the menu keeps running after a logger returns
enum Flow {
    Continue,
    Quit,
}

pub struct Menu<'s, S, R, W> {
    store: &'s mut S,
    input: R,
    output: W,
    history_limit: usize,
    today: NaiveDate,
}

impl<'s, S, R, W> Menu<'s, S, R, W>
where
    S: RecordStore,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'s mut S, input: R, output: W, history_limit: usize, today: NaiveDate) -> Self {
        Self {
            store,
            input,
            output,
            history_limit,
            today,
        }
    }

    /// Run until the user exits or input ends
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\nFitness Tracker")?;
            writeln!(self.output, "1. Log workout (one exercise, multiple sets)")?;
            writeln!(self.output, "2. Log cardio")?;
            writeln!(self.output, "3. Log nutrition")?;
            writeln!(self.output, "4. Log bodyweight")?;
            writeln!(self.output, "5. Exit")?;

            let Some(choice) = self.ask("Choose: ")? else {
                break;
            };

            let outcome = match choice.to_lowercase().as_str() {
                "1" | "log workout" => self.log_workout(),
                "2" | "log cardio" => self.log_cardio(),
                "3" | "log nutrition" => self.log_nutrition(),
                "4" | "log bodyweight" => self.log_bodyweight(),
                "5" | "exit" | "quit" | "q" => break,
                _ => {
                    writeln!(self.output, "✗ Invalid choice")?;
                    continue;
                }
            };

            match outcome {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) if e.is_validation() => {
                    writeln!(self.output, "✗ {}", e)?;
                }
                Err(e) => {
                    tracing::warn!("Entry aborted: {}", e);
                    writeln!(self.output, "✗ Entry aborted: {}", e)?;
                }
            }
        }

        writeln!(self.output, "Bye!")?;
        Ok(())
    }

    // -------- Loggers --------

    fn log_workout(&mut self) -> Result<Flow> {
        self.show_history(EntryKind::Workout)?;
        let Some(date) = self.ask_date()? else {
            return Ok(Flow::Quit);
        };

        writeln!(self.output, "\n--- Logging Workout ---")?;

        loop {
            let Some(exercise) = self.ask("Exercise (empty to finish): ")? else {
                return Ok(Flow::Quit);
            };
            if exercise.is_empty() {
                writeln!(self.output, "✓ Workout complete.")?;
                break;
            }

            let Some(num_sets) = self.ask_with("How many sets? ", |s| parse_reps("sets", s))? else {
                return Ok(Flow::Quit);
            };

            let mut sets = Vec::new();
            for i in 1..=num_sets {
                let reps_field = format!("set {} reps", i);
                let Some(reps) = self.ask_with(&format!("Set {} reps: ", i), |s| {
                    parse_reps(&reps_field, s)
                })?
                else {
                    return Ok(Flow::Quit);
                };

                let weight_field = format!("set {} weight", i);
                let Some(weight) = self.ask_with(&format!("Set {} weight: ", i), |s| {
                    builder::validate_weight(&weight_field, parse_number(&weight_field, s)?)
                })?
                else {
                    return Ok(Flow::Quit);
                };

                sets.push((i64::from(reps), weight));
            }

            let Some(notes) = self.ask("Notes (optional): ")? else {
                return Ok(Flow::Quit);
            };

            match builder::build_workout(date, &exercise, &sets, &notes) {
                Ok(workout) => {
                    self.save(workout.into())?;
                    writeln!(self.output, "✓ Saved {} for {}", exercise, date)?;
                }
                Err(e) => {
                    writeln!(self.output, "✗ {}", e)?;
                    continue;
                }
            }

            let Some(again) = self.ask("Add another exercise? (y/n): ")? else {
                return Ok(Flow::Quit);
            };
            if !again.eq_ignore_ascii_case("y") {
                writeln!(self.output, "✓ Workout saved.")?;
                break;
            }
        }

        Ok(Flow::Continue)
    }

    fn log_cardio(&mut self) -> Result<Flow> {
        self.show_history(EntryKind::Cardio)?;
        let Some(date) = self.ask_date()? else {
            return Ok(Flow::Quit);
        };

        let Some(activity) = self.ask_with("Cardio type (walk, run, bike, etc.): ", |s| {
            builder::require_text("cardio type", s).map(|_| s.to_string())
        })?
        else {
            return Ok(Flow::Quit);
        };

        let Some(duration) = self.ask_with("Duration (min): ", |s| {
            builder::validate_positive("duration", parse_number("duration", s)?)
        })?
        else {
            return Ok(Flow::Quit);
        };

        let Some(notes) = self.ask("Notes (optional): ")? else {
            return Ok(Flow::Quit);
        };

        let entry = builder::build_cardio(date, &activity, duration, &notes)?;
        self.save(entry.into())?;
        writeln!(self.output, "✓ Saved cardio!")?;
        Ok(Flow::Continue)
    }

    fn log_nutrition(&mut self) -> Result<Flow> {
        self.show_history(EntryKind::Nutrition)?;
        let Some(date) = self.ask_date()? else {
            return Ok(Flow::Quit);
        };

        let Some(calories) = self.ask_with("Calories: ", |s| parse_count("calories", s))? else {
            return Ok(Flow::Quit);
        };

        let mut macros = Vec::new();
        for name in ["protein", "carbs", "fats"] {
            let Some(grams) = self.ask_with(&format!("{} (g): ", capitalize(name)), |s| {
                builder::validate_weight(name, parse_number(name, s)?)
            })?
            else {
                return Ok(Flow::Quit);
            };
            macros.push((name, grams));
        }

        let Some(tracked) =
            self.ask_with("Tracked everything? (y/n): ", |s| parse_flag("tracked", s))?
        else {
            return Ok(Flow::Quit);
        };

        let Some(notes) = self.ask("Notes (optional): ")? else {
            return Ok(Flow::Quit);
        };

        let entry =
            builder::build_nutrition(date, i64::from(calories), macros, tracked, &notes)?;
        self.save(entry.into())?;
        writeln!(self.output, "✓ Saved nutrition!")?;
        Ok(Flow::Continue)
    }

    fn log_bodyweight(&mut self) -> Result<Flow> {
        self.show_history(EntryKind::Bodyweight)?;
        let Some(date) = self.ask_date()? else {
            return Ok(Flow::Quit);
        };

        let Some(weight) = self.ask_with("Bodyweight: ", |s| {
            builder::validate_positive("bodyweight", parse_number("bodyweight", s)?)
        })?
        else {
            return Ok(Flow::Quit);
        };

        let Some(notes) = self.ask("Notes (optional): ")? else {
            return Ok(Flow::Quit);
        };

        let entry = builder::build_bodyweight(date, weight, &notes)?;
        self.save(entry.into())?;
        writeln!(self.output, "✓ Saved bodyweight!")?;
        Ok(Flow::Continue)
    }

    // -------- Helpers --------

    fn show_history(&mut self, kind: EntryKind) -> Result<()> {
        let table = self.store.load()?;
        let recent = recent_entries(&table, kind, self.history_limit);
        print_history(&mut self.output, kind, &recent)
    }

    fn save(&mut self, record: Record) -> Result<()> {
        self.store.append(&record)
    }

    fn ask_date(&mut self) -> Result<Option<NaiveDate>> {
        let today = self.today;
        self.ask_with(&format!("Date (YYYY-MM-DD) [default {}]: ", today), |s| {
            parse_date(s, today)
        })
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until `parse` accepts the answer
    fn ask_with<T, F>(&mut self, prompt: &str, parse: F) -> Result<Option<T>>
    where
        F: Fn(&str) -> std::result::Result<T, ValidationError>,
    {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    tracing::debug!("Rejected input {:?}: {}", answer, e);
                    writeln!(self.output, "✗ {}", e)?;
                }
            }
        }
    }
}

/// Print a history listing for `kind`
pub fn print_history(out: &mut impl Write, kind: EntryKind, records: &[&Record]) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "No {} entries yet.", kind)?;
        return Ok(());
    }

    writeln!(out, "\nLast {} {} entries:", records.len(), kind)?;
    for record in records {
        writeln!(out, "  {}", record)?;
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
