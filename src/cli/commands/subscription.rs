use colored::Colorize;
use uuid::Uuid;

use crate::cli::core::{parse_amount, parse_date, CommandError, CommandResult};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::core::services::{
    AccountService, CategoryService, NewSubscription, PayeeService, ProjectService,
    SubscriptionService, TagService,
};
use crate::domain::{BillingInterval, IntervalUnit, SubscriptionStatus};
use crate::errors::FinanceError;

pub fn run(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: sub <add|list|show|status|remove> ...".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => add(context, rest),
        "list" => list(context),
        "show" => show(context, rest),
        "status" => set_status(context, rest),
        "remove" => remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown sub subcommand `{}`",
            other
        ))),
    }
}

const ADD_USAGE: &str = "usage: sub add <name> <amount> <start YYYY-MM-DD> [every] [unit] \
[--account <name>] [--payee <name>] [--category <name>] [--project <name>] [--tag <name>] \
[--end <YYYY-MM-DD>] [--note <text>] [--autopay] [--currency <code>]";

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, amount_raw, start_raw, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(ADD_USAGE.into()));
    };
    let amount = parse_amount(amount_raw)?;
    let start_date = parse_date(start_raw)?;

    // Optional cadence before the flags; defaults to monthly.
    let mut idx = 0usize;
    let mut every = 1u32;
    let mut unit = IntervalUnit::Month;
    if let Some(raw) = rest.first().filter(|raw| !raw.starts_with("--")) {
        every = raw
            .parse()
            .map_err(|_| CommandError::InvalidArguments(format!("invalid interval `{}`", raw)))?;
        idx += 1;
        if let Some(raw_unit) = rest.get(idx).filter(|raw| !raw.starts_with("--")) {
            unit = IntervalUnit::parse(raw_unit).ok_or_else(|| {
                CommandError::InvalidArguments(format!("unknown interval unit `{}`", raw_unit))
            })?;
            idx += 1;
        }
    }

    let mut params = NewSubscription::basic(
        name.to_string(),
        amount,
        context.config.currency.clone(),
        start_date,
        BillingInterval::new(every, unit),
    );

    let mut flags = rest[idx..].iter();
    while let Some(flag) = flags.next() {
        match *flag {
            "--autopay" => params.autopay = true,
            "--account" | "--payee" | "--category" | "--project" | "--tag" | "--end"
            | "--note" | "--currency" => {
                let value = flags.next().ok_or_else(|| {
                    CommandError::InvalidArguments(format!("{} expects a value", flag))
                })?;
                apply_flag(context, &mut params, flag, value)?;
            }
            other => {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown flag `{}`\n{}",
                    other, ADD_USAGE
                )))
            }
        }
    }

    let book = context.book_mut()?;
    SubscriptionService::create(book, params)?;
    context.persist()?;
    output::success(format!("subscription `{}` added", name));
    Ok(())
}

fn apply_flag(
    context: &ShellContext,
    params: &mut NewSubscription,
    flag: &str,
    value: &str,
) -> Result<(), CommandError> {
    let book = context.book()?;
    match flag {
        "--account" => {
            params.account_id = Some(
                AccountService::find_by_name(book, value)
                    .map(|a| a.id)
                    .ok_or_else(|| {
                        CommandError::Core(FinanceError::AccountNotFound(value.to_string()))
                    })?,
            )
        }
        "--payee" => {
            params.payee_id = Some(
                PayeeService::find_by_name(book, value)
                    .map(|p| p.id)
                    .ok_or_else(|| {
                        CommandError::Core(FinanceError::PayeeNotFound(value.to_string()))
                    })?,
            )
        }
        "--category" => {
            params.category_id = Some(
                CategoryService::find_by_name(book, value)
                    .map(|c| c.id)
                    .ok_or_else(|| {
                        CommandError::Core(FinanceError::CategoryNotFound(value.to_string()))
                    })?,
            )
        }
        "--project" => {
            params.project_id = Some(
                ProjectService::find_by_name(book, value)
                    .map(|p| p.id)
                    .ok_or_else(|| {
                        CommandError::Core(FinanceError::ProjectNotFound(value.to_string()))
                    })?,
            )
        }
        "--tag" => params.tags.push(
            TagService::find_by_name(book, value)
                .map(|t| t.id)
                .ok_or_else(|| {
                    CommandError::InvalidArguments(format!("unknown tag `{}`", value))
                })?,
        ),
        "--end" => params.end_date = Some(parse_date(value)?),
        "--note" => params.note = Some(value.to_string()),
        "--currency" => params.currency = value.to_uppercase(),
        _ => unreachable!("checked by caller"),
    }
    Ok(())
}

fn list(context: &mut ShellContext) -> CommandResult {
    let book = context.book()?;
    let subs = SubscriptionService::list(book);
    if subs.is_empty() {
        output::info("no subscriptions");
        return Ok(());
    }
    output::section("Subscriptions");
    for sub in subs {
        output::row(&[
            sub.name.clone(),
            format!("{:.2} {}", sub.amount, sub.currency),
            sub.interval.label(),
            format!("next {}", sub.next_due_date),
            sub.status.to_string(),
        ]);
    }
    Ok(())
}

fn show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = require_name(args, "usage: sub show <name>")?;
    let book = context.book()?;
    let sub = SubscriptionService::find_by_name(book, &name)
        .ok_or_else(|| CommandError::Core(FinanceError::SubscriptionNotFound(name.clone())))?;

    output::section(&sub.name);
    println!("  id        {}", sub.id);
    println!("  amount    {:.2} {}", sub.amount, sub.currency);
    println!("  cadence   {}", sub.interval.label());
    println!("  started   {}", sub.start_date);
    println!("  next due  {}", sub.next_due_date.to_string().bold());
    if let Some(end) = sub.end_date {
        println!("  ends      {}", end);
    }
    println!("  status    {}", sub.status);
    println!("  autopay   {}", if sub.autopay { "yes" } else { "no" });
    if let Some(note) = &sub.note {
        println!("  note      {}", note);
    }
    let occurrences: Vec<_> = book.occurrences_of(sub.id).collect();
    if !occurrences.is_empty() {
        output::section("Occurrences");
        for occ in occurrences {
            output::row(&[
                occ.id.to_string(),
                occ.due_date.to_string(),
                format!("{:.2} {}", occ.amount, occ.currency),
                occ.state.to_string(),
            ]);
        }
    }
    Ok(())
}

fn set_status(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, status_raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: sub status <name> <active|paused|canceled>".into(),
        ));
    };
    let status = SubscriptionStatus::parse(status_raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("unknown status `{}`", status_raw))
    })?;
    let id = resolve_subscription_id(context, name)?;
    let book = context.book_mut()?;
    SubscriptionService::set_status(book, id, status)?;
    context.persist()?;
    output::success(format!("subscription `{}` is now {}", name, status));
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = require_name(args, "usage: sub remove <name>")?;
    let id = resolve_subscription_id(context, &name)?;
    if !context.confirm(&format!(
        "Remove subscription `{}` and its schedule permanently?",
        name
    ))? {
        output::info("remove cancelled");
        return Ok(());
    }
    let book = context.book_mut()?;
    SubscriptionService::remove(book, id)?;
    context.persist()?;
    output::success(format!("subscription `{}` removed", name));
    Ok(())
}

fn require_name(args: &[&str], usage: &str) -> Result<String, CommandError> {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(usage.into()));
    }
    Ok(args.join(" "))
}

pub(crate) fn resolve_subscription_id(
    context: &ShellContext,
    name: &str,
) -> Result<Uuid, CommandError> {
    let book = context.book()?;
    SubscriptionService::find_by_name(book, name)
        .map(|sub| sub.id)
        .ok_or_else(|| CommandError::Core(FinanceError::SubscriptionNotFound(name.to_string())))
}
