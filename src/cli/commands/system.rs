use colored::Colorize;

use crate::cli::commands::COMMANDS;
use crate::cli::output;

pub fn help() {
    output::section("Commands");
    for spec in COMMANDS {
        println!("  {:<10} {}", spec.name.bold(), spec.description);
        println!("  {:<10} {}", "", spec.usage.dimmed());
    }
}
