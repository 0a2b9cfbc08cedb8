// SPDX-License-Identifier: GPL-3.0-or-later

//! Library for ftalarmgen-cli.
//! Generate FactoryTalk View SE discrete alarm definitions from PLC alarm names.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod builder;
pub mod config;
pub mod markup;
pub mod message;
pub mod prompt;
pub mod record;
pub mod report;
pub mod resources;
pub mod sanitize;
pub mod session;
