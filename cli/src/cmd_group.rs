// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

use clap::{ArgMatches, Command, arg};
use colored::Colorize;
use timemesh_core::TimeMesh;

/// Record an accepted group member.
#[derive(Debug, Clone)]
pub struct CmdGroupAddMember {
    pub group: String,
    pub member: String,
}

impl CmdGroupAddMember {
    pub const NAME: &str = "add-member";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Record a user as an accepted member of a group")
            .arg(arg!(<GROUP> "Group id"))
            .arg(arg!(<USER> "User id to add"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            group: matches
                .get_one::<String>("GROUP")
                .cloned()
                .unwrap_or_default(),
            member: matches
                .get_one::<String>("USER")
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub async fn run(self, mesh: &TimeMesh) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "adding group member...");
        mesh.add_group_member(&self.group, &self.member).await?;
        println!(
            "{} {} is now a member of {}",
            "Ok:".green(),
            self.member.bold(),
            self.group.bold()
        );
        Ok(())
    }
}

/// List a group's accepted members.
#[derive(Debug, Clone)]
pub struct CmdGroupMembers {
    pub group: String,
    pub user: String,
}

impl CmdGroupMembers {
    pub const NAME: &str = "members";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("List a group's accepted members")
            .arg(arg!(<GROUP> "Group id"))
            .arg(arg!(-u --user <USER> "Requesting user id (must be a member)"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            group: matches
                .get_one::<String>("GROUP")
                .cloned()
                .unwrap_or_default(),
            user: matches
                .get_one::<String>("user")
                .cloned()
                .unwrap_or_default(),
        }
    }

    pub async fn run(self, mesh: &TimeMesh) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "listing group members...");
        let members = mesh.group_members(&self.group, &self.user).await?;
        for member in members {
            println!("{member}");
        }
        Ok(())
    }
}
