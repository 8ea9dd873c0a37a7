//! Colored terminal output helpers.

use std::fmt;

use colored::Colorize;

pub fn info(message: impl fmt::Display) {
    println!("{} {}", "[i]".cyan(), message);
}

pub fn success(message: impl fmt::Display) {
    println!("{} {}", "[ok]".green(), message);
}

pub fn warning(message: impl fmt::Display) {
    println!("{} {}", "[!]".yellow(), message);
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{} {}", "[x]".red(), message);
}

pub fn section(title: impl fmt::Display) {
    println!("{}", format!("== {} ==", title).bold());
}

/// Plain row printing; columns are pre-formatted by the caller.
pub fn row(cells: &[String]) {
    println!("  {}", cells.join("  "));
}
