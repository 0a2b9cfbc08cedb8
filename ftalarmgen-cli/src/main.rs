// SPDX-License-Identifier: GPL-3.0-or-later

//! Command line interface for ftalarmgen.
//! Generate FactoryTalk View SE discrete alarm definitions from PLC alarm names.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

mod args;

use args::Args;
use ftalarmgen::{
    prompt::Console,
    resources::Resources,
    session::{Session, SessionError},
};

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use std::{fs, io, path::Path, process};

/// Shown before the first prompt.
const BANNER: &str = "FactoryTalk View Site Edition XML Alarm Generator";

fn main() {
    let args = Args::parse();

    if !args.silent {
        // Prompts go to stdout, so logs must not
        let subscriber = FmtSubscriber::builder()
            .with_writer(io::stderr)
            .with_max_level(args.log_level.as_tracing_level())
            .without_time()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("setting default subscriber failed");
    }

    if let Err(e) = run(&args) {
        error!(error = format!("{}", e), "session failed");
        process::exit(1);
    }
}

/// Runs an interactive session on stdin and stdout.
fn run(args: &Args) -> Result<(), SessionError> {
    let resources = Resources {
        config: Some(args.config.clone()),
        template: args.template.clone(),
    };
    let session = Session::load(&resources, args.output_dir.clone())?;

    let mut console = Console::new(io::stdin().lock(), io::stdout().lock());
    let version = env!("CARGO_PKG_VERSION");
    console.say(&format!("{BANNER}\nVersion {version}\n"))?;

    let written = session.run(&mut console)?;
    info!(reports = written.len(), "session finished");

    if args.open {
        if let Some(last) = written.last() {
            open_report(last)?;
        }
    }
    Ok(())
}

/// Opens a report in the default viewer.
fn open_report(path: &Path) -> io::Result<()> {
    let canon = fs::canonicalize(path)?;
    webbrowser::open(&canon.to_string_lossy())
}
