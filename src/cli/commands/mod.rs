//! Command table and dispatch.

pub mod account;
pub mod book;
pub mod directory;
pub mod pay;
pub mod schedule;
pub mod subscription;
pub mod system;
pub mod transaction;

use crate::cli::core::{CommandError, LoopControl};
use crate::cli::shell_context::ShellContext;

pub struct CommandSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "help",
        description: "Show available commands",
        usage: "help",
    },
    CommandSpec {
        name: "book",
        description: "Create, open, list, back up, or delete owner books",
        usage: "book <new|open|list|backup|backups|delete> [name]",
    },
    CommandSpec {
        name: "account",
        description: "Manage accounts",
        usage: "account <add|list|rename|activate|deactivate> ...",
    },
    CommandSpec {
        name: "payee",
        description: "Manage payees",
        usage: "payee <add|list> [name]",
    },
    CommandSpec {
        name: "category",
        description: "Manage categories",
        usage: "category <add|list> [name] [parent]",
    },
    CommandSpec {
        name: "project",
        description: "Manage projects",
        usage: "project <add|list|archive> [name]",
    },
    CommandSpec {
        name: "tag",
        description: "Manage tags",
        usage: "tag <add|list> [name]",
    },
    CommandSpec {
        name: "sub",
        description: "Manage subscription definitions",
        usage: "sub <add|list|show|status|remove> ...",
    },
    CommandSpec {
        name: "schedule",
        description: "Materialize and inspect the occurrence schedule",
        usage: "schedule <materialize|dashboard|skip|fail> ...",
    },
    CommandSpec {
        name: "pay",
        description: "Settle a subscription charge against an account",
        usage: "pay <account> (sub <name> [YYYY-MM-DD] | occ <id>)",
    },
    CommandSpec {
        name: "tx",
        description: "Manage plain ledger entries",
        usage: "tx <add|list|remove> ...",
    },
    CommandSpec {
        name: "exit",
        description: "Leave the shell",
        usage: "exit",
    },
];

pub fn command_names() -> Vec<&'static str> {
    COMMANDS.iter().map(|spec| spec.name).collect()
}

pub fn dispatch(
    context: &mut ShellContext,
    command: &str,
    args: &[&str],
) -> Result<LoopControl, CommandError> {
    match command {
        "help" => {
            system::help();
            Ok(LoopControl::Continue)
        }
        "exit" | "quit" => Ok(LoopControl::Exit),
        "book" => book::run(context, args).map(|_| LoopControl::Continue),
        "account" => account::run(context, args).map(|_| LoopControl::Continue),
        "payee" | "category" | "project" | "tag" => {
            directory::run(context, command, args).map(|_| LoopControl::Continue)
        }
        "sub" | "subscription" => subscription::run(context, args).map(|_| LoopControl::Continue),
        "schedule" => schedule::run(context, args).map(|_| LoopControl::Continue),
        "pay" => pay::run(context, args).map(|_| LoopControl::Continue),
        "tx" | "transaction" => transaction::run(context, args).map(|_| LoopControl::Continue),
        other => Err(CommandError::UnknownCommand {
            command: other.to_string(),
            hint: suggestion_for(other),
        }),
    }
}

fn suggestion_for(input: &str) -> String {
    let mut best: Option<(&str, f64)> = None;
    for spec in COMMANDS {
        let score = strsim::jaro_winkler(input, spec.name);
        if best.map(|(_, s)| score > s).unwrap_or(true) {
            best = Some((spec.name, score));
        }
    }
    match best {
        Some((name, score)) if score >= 0.78 => format!(", did you mean `{}`?", name),
        _ => String::new(),
    }
}
