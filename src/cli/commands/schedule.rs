use crate::cli::core::{parse_date, parse_id, CommandError, CommandResult};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::core::services::ScheduleService;

pub fn run(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: schedule <materialize|dashboard|skip|fail> ...".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "materialize" => materialize(context, rest),
        "dashboard" => dashboard(context, rest),
        "skip" => close(context, rest, true),
        "fail" => close(context, rest, false),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown schedule subcommand `{}`",
            other
        ))),
    }
}

fn materialize(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [horizon_raw] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: schedule materialize <through YYYY-MM-DD>".into(),
        ));
    };
    let horizon = parse_date(horizon_raw)?;
    let book = context.book_mut()?;
    let created = ScheduleService::materialize_through(book, horizon)?;
    context.persist()?;
    output::success(format!("{} occurrence(s) materialized", created));
    Ok(())
}

fn dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = match args.first() {
        Some(raw) => parse_date(raw)?,
        None => context.today(),
    };
    let book = context.book()?;
    let snapshot = ScheduleService::snapshot(book, reference, 5);

    output::section("Subscriptions");
    output::row(&[
        format!("active {}", snapshot.active),
        format!("paused {}", snapshot.paused),
        format!("canceled {}", snapshot.canceled),
    ]);

    output::section("Upcoming");
    if snapshot.upcoming.is_empty() {
        output::info("nothing due");
    }
    for charge in &snapshot.upcoming {
        output::row(&[
            charge.due_date.to_string(),
            charge.subscription_name.clone(),
            format!("{:.2} {}", charge.amount, charge.currency),
            charge
                .occurrence_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "(not materialized)".into()),
        ]);
    }
    if !snapshot.upcoming.is_empty() {
        output::info(format!("total due: {:.2}", snapshot.total_due));
    }

    if !snapshot.overdue.is_empty() {
        output::section("Overdue");
        for charge in &snapshot.overdue {
            output::row(&[
                charge.due_date.to_string(),
                charge.subscription_name.clone(),
                format!("{:.2} {}", charge.amount, charge.currency),
            ]);
        }
    }
    Ok(())
}

fn close(context: &mut ShellContext, args: &[&str], skip: bool) -> CommandResult {
    let verb = if skip { "skip" } else { "fail" };
    let [id_raw] = args else {
        return Err(CommandError::InvalidArguments(format!(
            "usage: schedule {} <occurrence-id>",
            verb
        )));
    };
    let id = parse_id(id_raw)?;
    let book = context.book_mut()?;
    if skip {
        ScheduleService::skip(book, id)?;
    } else {
        ScheduleService::mark_failed(book, id)?;
    }
    context.persist()?;
    output::success(format!("occurrence marked {}", if skip { "skipped" } else { "failed" }));
    Ok(())
}
