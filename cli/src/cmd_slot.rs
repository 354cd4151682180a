// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::path::PathBuf;

use clap::{Arg, ArgMatches, Command, ValueHint, arg, value_parser};
use colored::Colorize;
use timemesh_core::{SlotDraft, SlotKey, TimeMesh};

use crate::parser::{ArgOutputFormat, parse_date, parse_time};
use crate::slot_formatter::SlotFormatter;

fn arg_user() -> Arg {
    arg!(-u --user <USER> "Acting user id")
}

fn get_user(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("user")
        .cloned()
        .unwrap_or_default()
}

/// Add an availability slot.
#[derive(Debug, Clone)]
pub struct CmdSlotAdd {
    pub user: String,
    pub draft: SlotDraft,
    pub output_format: ArgOutputFormat,
}

impl CmdSlotAdd {
    pub const NAME: &str = "add";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("new")
            .about("Add an availability slot")
            .arg(arg_user())
            .arg(arg!(-d --date <DATE> "Calendar date (YYYY-MM-DD)"))
            .arg(arg!(-s --start <TIME> "Start time (HH:MM)"))
            .arg(arg!(-e --end <TIME> "End time (HH:MM)"))
            .arg(arg!(-l --label <LABEL> "Slot label"))
            .arg(arg!(--busy "Mark the slot as busy instead of available"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let date = parse_date(matches.get_one::<String>("date").map_or("", String::as_str))?;
        let start = parse_time(matches.get_one::<String>("start").map_or("", String::as_str))?;
        let end = parse_time(matches.get_one::<String>("end").map_or("", String::as_str))?;
        let label = matches
            .get_one::<String>("label")
            .cloned()
            .unwrap_or_default();

        Ok(Self {
            user: get_user(matches),
            draft: SlotDraft {
                date,
                start,
                end,
                label,
                available: !matches.get_flag("busy"),
            },
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, mesh: &TimeMesh) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding slot...");
        let slots = mesh.create_slot(&self.user, self.draft).await?;
        println!(
            "{} {} slot(s) created",
            "Ok:".green(),
            slots.len().to_string().bold()
        );
        let formatter = SlotFormatter::new(self.output_format);
        println!("{}", formatter.format(&slots));
        Ok(())
    }
}

/// Add many slots from a JSON file, reporting per-item outcomes.
#[derive(Debug, Clone)]
pub struct CmdSlotBatch {
    pub user: String,
    pub file: PathBuf,
    pub output_format: ArgOutputFormat,
}

impl CmdSlotBatch {
    pub const NAME: &str = "batch";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Add slots from a JSON file of drafts")
            .arg(arg_user())
            .arg(
                arg!(<FILE> "JSON file with an array of slot drafts")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let file = matches
            .get_one::<PathBuf>("FILE")
            .cloned()
            .ok_or("A drafts file is required")?;
        Ok(Self {
            user: get_user(matches),
            file,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, mesh: &TimeMesh) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding slot batch...");
        let content = tokio::fs::read_to_string(&self.file)
            .await
            .map_err(|e| format!("Failed to read {}: {}", self.file.display(), e))?;
        let drafts: Vec<SlotDraft> = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse drafts: {e}"))?;

        let report = mesh.create_slots(&self.user, drafts).await?;
        if self.output_format == ArgOutputFormat::Json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!(
            "{} {} of {} item(s) created",
            "Ok:".green(),
            report.created.len(),
            report.created.len() + report.errors.len()
        );
        for error in &report.errors {
            println!(
                "{} {} {}..{}: {}",
                "Failed:".red(),
                error.draft.date,
                error.draft.start,
                error.draft.end,
                error.error
            );
        }
        Ok(())
    }
}

/// Delete slots by exact date and time range.
#[derive(Debug, Clone)]
pub struct CmdSlotRm {
    pub user: String,
    pub keys: SlotRmKeys,
}

/// Where the keys to delete come from.
#[derive(Debug, Clone)]
pub enum SlotRmKeys {
    Single(SlotKey),
    File(PathBuf),
}

impl CmdSlotRm {
    pub const NAME: &str = "rm";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("delete")
            .about("Delete slots matching exact date and time ranges")
            .arg(arg_user())
            .arg(arg!(-d --date [DATE] "Calendar date (YYYY-MM-DD)"))
            .arg(arg!(-s --start [TIME] "Start time (HH:MM)"))
            .arg(arg!(-e --end [TIME] "End time (HH:MM)"))
            .arg(
                arg!(--file [FILE] "JSON file with an array of slot keys")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let user = get_user(matches);
        if let Some(file) = matches.get_one::<PathBuf>("file") {
            return Ok(Self {
                user,
                keys: SlotRmKeys::File(file.clone()),
            });
        }

        match (
            matches.get_one::<String>("date"),
            matches.get_one::<String>("start"),
            matches.get_one::<String>("end"),
        ) {
            (Some(date), Some(start), Some(end)) => Ok(Self {
                user,
                keys: SlotRmKeys::Single(SlotKey {
                    date: parse_date(date)?,
                    start: parse_time(start)?,
                    end: parse_time(end)?,
                }),
            }),
            _ => Err("Specify either --file or all of --date, --start and --end".into()),
        }
    }

    pub async fn run(self, mesh: &TimeMesh) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "deleting slots...");
        let keys = match &self.keys {
            SlotRmKeys::Single(key) => vec![*key],
            SlotRmKeys::File(file) => {
                let content = tokio::fs::read_to_string(file)
                    .await
                    .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
                serde_json::from_str(&content).map_err(|e| format!("Failed to parse keys: {e}"))?
            }
        };

        let report = mesh.delete_slots(&self.user, keys).await?;
        println!("{} {} slot(s) deleted", "Ok:".green(), report.deleted);
        for error in &report.errors {
            println!(
                "{} {} {}..{}: {}",
                "Failed:".red(),
                error.slot.date,
                error.slot.start,
                error.slot.end,
                error.error
            );
        }
        Ok(())
    }
}

/// List a user's slots.
#[derive(Debug, Clone)]
pub struct CmdSlotList {
    pub user: String,
    pub date: Option<chrono::NaiveDate>,
    pub output_format: ArgOutputFormat,
}

impl CmdSlotList {
    pub const NAME: &str = "list";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .alias("ls")
            .about("List slots")
            .arg(arg_user())
            .arg(arg!(-d --date [DATE] "Restrict to one date (YYYY-MM-DD)"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let date = match matches.get_one::<String>("date") {
            Some(date) => Some(parse_date(date)?),
            None => None,
        };
        Ok(Self {
            user: get_user(matches),
            date,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, mesh: &TimeMesh) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing slots...");
        let slots = mesh.list_slots(&self.user, self.date).await?;
        let formatter = SlotFormatter::new(self.output_format);
        println!("{}", formatter.format(&slots));
        Ok(())
    }
}
