// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use chrono::NaiveDate;
use clap::{Arg, ArgMatches, Command, arg};
use timemesh_core::{DateSpan, TimeMesh};

use crate::match_formatter::MatchFormatter;
use crate::parser::{ArgOutputFormat, parse_date};

/// Find common availability among explicitly listed users.
#[derive(Debug, Clone)]
pub struct CmdMatchUsers {
    pub users: Vec<String>,
    pub date: NaiveDate,
    pub output_format: ArgOutputFormat,
}

impl CmdMatchUsers {
    pub const NAME: &str = "users";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Find common availability among the given users")
            .arg(arg!(-d --date <DATE> "Calendar date (YYYY-MM-DD)"))
            .arg(
                Arg::new("users")
                    .help("User ids to match")
                    .num_args(1..)
                    .required(true),
            )
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let users = matches
            .get_many::<String>("users")
            .map(|users| users.cloned().collect())
            .unwrap_or_default();
        let date = parse_date(matches.get_one::<String>("date").map_or("", String::as_str))?;
        Ok(Self {
            users,
            date,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, mesh: &TimeMesh) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "matching users...");
        let windows = mesh.match_users(&self.users, self.date).await?;
        let formatter = MatchFormatter::new(self.output_format);
        println!("{}", formatter.format(&windows));
        Ok(())
    }
}

/// Find common availability across a group's accepted members.
#[derive(Debug, Clone)]
pub struct CmdMatchGroup {
    pub group: String,
    pub user: String,
    pub span: DateSpan,
    pub output_format: ArgOutputFormat,
}

impl CmdMatchGroup {
    pub const NAME: &str = "group";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Find common availability across a group")
            .arg(arg!(<GROUP> "Group id"))
            .arg(arg!(-u --user <USER> "Requesting user id (must be a member)"))
            .arg(arg!(-d --date [DATE] "A single date (YYYY-MM-DD)"))
            .arg(arg!(--from [DATE] "Range start (YYYY-MM-DD)"))
            .arg(arg!(--to [DATE] "Range end (YYYY-MM-DD)"))
            .arg(ArgOutputFormat::arg())
    }

    pub fn from(matches: &ArgMatches) -> Result<Self, Box<dyn Error>> {
        let group = matches
            .get_one::<String>("GROUP")
            .cloned()
            .unwrap_or_default();
        let user = matches
            .get_one::<String>("user")
            .cloned()
            .unwrap_or_default();

        let date = matches.get_one::<String>("date");
        let from = matches.get_one::<String>("from");
        let to = matches.get_one::<String>("to");
        let span = match (date, from, to) {
            (Some(date), None, None) => DateSpan::Single(parse_date(date)?),
            (None, Some(from), Some(to)) => DateSpan::Range {
                start: parse_date(from)?,
                end: parse_date(to)?,
            },
            _ => return Err("Specify either --date or both --from and --to".into()),
        };

        Ok(Self {
            group,
            user,
            span,
            output_format: ArgOutputFormat::from(matches),
        })
    }

    pub async fn run(self, mesh: &TimeMesh) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "matching group...");
        let windows = mesh.match_group(&self.group, &self.user, self.span).await?;
        let formatter = MatchFormatter::new(self.output_format);
        println!("{}", formatter.format(&windows));
        Ok(())
    }
}
