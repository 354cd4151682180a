// SPDX-FileCopyrightText: 2026 TimeMesh contributors
//
// SPDX-License-Identifier: Apache-2.0

mod cli;
mod cmd_group;
mod cmd_match;
mod cmd_slot;
mod config;
mod match_formatter;
mod parser;
mod slot_formatter;
mod table;

pub use crate::{
    cli::{Cli, Commands, run},
    cmd_group::{CmdGroupAddMember, CmdGroupMembers},
    cmd_match::{CmdMatchGroup, CmdMatchUsers},
    cmd_slot::{CmdSlotAdd, CmdSlotBatch, CmdSlotList, CmdSlotRm, SlotRmKeys},
};
