// SPDX-License-Identifier: GPL-3.0-or-later

mod gen_config;

use clap::Parser;

#[derive(clap::Parser)]
struct Args {
    #[command(subcommand)]
    subcommand: Option<Subcommand>,
}

#[derive(clap::Subcommand)]
enum Subcommand {
    /// Writes the built-in naming config to config.json as a starting point
    GenConfig,
}

fn main() {
    let args = Args::parse();
    match &args.subcommand {
        Some(Subcommand::GenConfig) => gen_config::run(),
        None => println!("Please specify a subcommand. Run with `-h` for help."),
    };
}
