// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgMatches, Command, ValueHint, arg, builder::styling, crate_version, value_parser};
use colored::Colorize;
use timemesh_core::{APP_NAME, TimeMesh};
use tracing_subscriber::EnvFilter;

use crate::cmd_group::{CmdGroupAddMember, CmdGroupMembers};
use crate::cmd_match::{CmdMatchGroup, CmdMatchUsers};
use crate::cmd_slot::{CmdSlotAdd, CmdSlotBatch, CmdSlotList, CmdSlotRm};
use crate::config::parse_config;

/// Run the TimeMesh command-line interface.
pub async fn run() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse() {
        Ok(cli) => {
            if let Err(e) = cli.run().await {
                println!("{} {}", "Error:".red(), e);
            }
        }
        Err(e) => println!("{} {}", "Error:".red(), e),
    };
    Ok(())
}

/// Command-line interface
#[derive(Debug)]
pub struct Cli {
    /// Path to the configuration file
    pub config: Option<PathBuf>,

    /// The command to execute
    pub command: Commands,
}

impl Cli {
    /// Create the command-line interface
    pub fn command() -> Command {
        const STYLES: styling::Styles = styling::Styles::styled()
            .header(styling::AnsiColor::Green.on_default().bold())
            .usage(styling::AnsiColor::Green.on_default().bold())
            .literal(styling::AnsiColor::Blue.on_default().bold())
            .placeholder(styling::AnsiColor::Cyan.on_default());

        Command::new(APP_NAME)
            .about("Share availability slots and find common free time.")
            .version(crate_version!())
            .styles(STYLES)
            .subcommand_required(true)
            .arg_required_else_help(true)
            .arg(
                arg!(-c --config [CONFIG] "Path to the configuration file")
                    .long_help(
                        "\
Path to the configuration file. Defaults to $XDG_CONFIG_HOME/timemesh/config.toml on Linux and \
MacOS, %LOCALAPPDATA%/timemesh/config.toml on Windows.",
                    )
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .subcommand(
                Command::new("slot")
                    .alias("s")
                    .about("Manage your availability slots")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdSlotAdd::command())
                    .subcommand(CmdSlotBatch::command())
                    .subcommand(CmdSlotRm::command())
                    .subcommand(CmdSlotList::command()),
            )
            .subcommand(
                Command::new("match")
                    .alias("m")
                    .about("Find common availability")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdMatchUsers::command())
                    .subcommand(CmdMatchGroup::command()),
            )
            .subcommand(
                Command::new("group")
                    .alias("g")
                    .about("Manage group membership")
                    .arg_required_else_help(true)
                    .subcommand_required(true)
                    .subcommand(CmdGroupAddMember::command())
                    .subcommand(CmdGroupMembers::command()),
            )
    }

    /// Parse the command-line arguments
    pub fn parse() -> Result<Self, Box<dyn Error>> {
        let commands = Self::command();
        let matches = commands.get_matches();
        Self::from(matches)
    }

    /// Parse the specified arguments
    pub fn try_parse_from<I, T>(args: I) -> Result<Self, Box<dyn Error>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let commands = Self::command();
        let matches = commands.try_get_matches_from(args)?;
        Self::from(matches)
    }

    /// Create a CLI instance from the `ArgMatches`
    pub fn from(matches: ArgMatches) -> Result<Self, Box<dyn Error>> {
        use Commands::*;
        let command = match matches.subcommand() {
            Some(("slot", matches)) => match matches.subcommand() {
                Some((CmdSlotAdd::NAME, matches)) => SlotAdd(CmdSlotAdd::from(matches)?),
                Some((CmdSlotBatch::NAME, matches)) => SlotBatch(CmdSlotBatch::from(matches)?),
                Some((CmdSlotRm::NAME, matches)) => SlotRm(CmdSlotRm::from(matches)?),
                Some((CmdSlotList::NAME, matches)) => SlotList(CmdSlotList::from(matches)?),
                _ => unreachable!(),
            },
            Some(("match", matches)) => match matches.subcommand() {
                Some((CmdMatchUsers::NAME, matches)) => MatchUsers(CmdMatchUsers::from(matches)?),
                Some((CmdMatchGroup::NAME, matches)) => MatchGroup(CmdMatchGroup::from(matches)?),
                _ => unreachable!(),
            },
            Some(("group", matches)) => match matches.subcommand() {
                Some((CmdGroupAddMember::NAME, matches)) => {
                    GroupAddMember(CmdGroupAddMember::from(matches))
                }
                Some((CmdGroupMembers::NAME, matches)) => {
                    GroupMembers(CmdGroupMembers::from(matches))
                }
                _ => unreachable!(),
            },
            _ => unreachable!(),
        };

        let config = matches.get_one("config").cloned();
        Ok(Cli { config, command })
    }

    /// Run the command
    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        self.command.run(self.config).await
    }
}

/// The commands available in the CLI
#[derive(Debug, Clone)]
pub enum Commands {
    /// Add an availability slot
    SlotAdd(CmdSlotAdd),

    /// Add slots from a JSON file
    SlotBatch(CmdSlotBatch),

    /// Delete slots
    SlotRm(CmdSlotRm),

    /// List slots
    SlotList(CmdSlotList),

    /// Match explicitly listed users
    MatchUsers(CmdMatchUsers),

    /// Match a group's members
    MatchGroup(CmdMatchGroup),

    /// Record an accepted group member
    GroupAddMember(CmdGroupAddMember),

    /// List a group's members
    GroupMembers(CmdGroupMembers),
}

impl Commands {
    /// Run the command with the given configuration
    pub async fn run(self, config: Option<PathBuf>) -> Result<(), Box<dyn Error>> {
        tracing::debug!("parsing configuration...");
        let core_config = parse_config(config).await?;
        let mesh = TimeMesh::new(core_config).await?;

        use Commands::*;
        let result = match self {
            SlotAdd(a) => a.run(&mesh).await,
            SlotBatch(a) => a.run(&mesh).await,
            SlotRm(a) => a.run(&mesh).await,
            SlotList(a) => a.run(&mesh).await,
            MatchUsers(a) => a.run(&mesh).await,
            MatchGroup(a) => a.run(&mesh).await,
            GroupAddMember(a) => a.run(&mesh).await,
            GroupMembers(a) => a.run(&mesh).await,
        };

        mesh.close().await;
        result
    }
}
