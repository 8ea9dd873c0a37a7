//! Handlers for the small name directories: payees, categories, projects, tags.

use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::core::services::{CategoryService, PayeeService, ProjectService, TagService};
use crate::domain::NamedEntity;
use crate::errors::FinanceError;

pub fn run(context: &mut ShellContext, kind: &str, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {} <add|list> [name]",
            kind
        )));
    };
    match (kind, subcommand.to_ascii_lowercase().as_str()) {
        (_, "add") => add(context, kind, rest),
        (_, "list") => list(context, kind),
        ("project", "archive") => archive_project(context, rest),
        (_, other) => Err(CommandError::InvalidArguments(format!(
            "unknown {} subcommand `{}`",
            kind, other
        ))),
    }
}

fn add(context: &mut ShellContext, kind: &str, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "usage: {} add <name>",
            kind
        )));
    }
    let name = args.join(" ");
    let book = context.book_mut()?;
    match kind {
        "payee" => {
            PayeeService::create(book, name.clone())?;
        }
        "category" => {
            CategoryService::create(book, name.clone(), None)?;
        }
        "project" => {
            ProjectService::create(book, name.clone(), None)?;
        }
        "tag" => {
            TagService::create(book, name.clone())?;
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown directory `{}`",
                other
            )))
        }
    }
    context.persist()?;
    output::success(format!("{} `{}` added", kind, name));
    Ok(())
}

fn list(context: &mut ShellContext, kind: &str) -> CommandResult {
    let book = context.book()?;
    let names: Vec<String> = match kind {
        "payee" => PayeeService::list(book).iter().map(|p| p.name().to_string()).collect(),
        "category" => CategoryService::list(book).iter().map(|c| c.name().to_string()).collect(),
        "project" => ProjectService::list(book, true)
            .iter()
            .map(|p| {
                if p.is_archived {
                    format!("{} (archived)", p.name())
                } else {
                    p.name().to_string()
                }
            })
            .collect(),
        "tag" => TagService::list(book).iter().map(|t| t.name().to_string()).collect(),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown directory `{}`",
                other
            )))
        }
    };
    if names.is_empty() {
        output::info(format!("no {} entries", kind));
        return Ok(());
    }
    output::section(format!("{}s", kind));
    for name in names {
        output::row(&[name]);
    }
    Ok(())
}

fn archive_project(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: project archive <name>".into(),
        ));
    }
    let name = args.join(" ");
    let id = {
        let book = context.book()?;
        ProjectService::find_by_name(book, &name)
            .map(|p| p.id)
            .ok_or_else(|| CommandError::Core(FinanceError::ProjectNotFound(name.clone())))?
    };
    let book = context.book_mut()?;
    ProjectService::set_archived(book, id, true)?;
    context.persist()?;
    output::success(format!("project `{}` archived", name));
    Ok(())
}
