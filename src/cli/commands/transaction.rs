use crate::cli::commands::account;
use crate::cli::core::{parse_amount, parse_date, parse_id, CommandError, CommandResult};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::core::services::TransactionService;
use crate::domain::{Transaction, TxType};

pub fn run(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: tx <add|list|remove> ...".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => add(context, rest),
        "list" => list(context, rest),
        "remove" => remove(context, rest),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown tx subcommand `{}`",
            other
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [type_raw, amount_raw, date_raw, account_name, note @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: tx add <income|expense|transfer> <amount> <YYYY-MM-DD> <account> [note]".into(),
        ));
    };
    let tx_type = TxType::parse(type_raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("unknown transaction type `{}`", type_raw))
    })?;
    let amount = parse_amount(amount_raw)?;
    let date = parse_date(date_raw)?;
    let account_id = account::resolve_account_id(context, account_name)?;

    let currency = context.config.currency.clone();
    let book = context.book_mut()?;
    let mut transaction = Transaction::new(book.owner, tx_type, date, amount, currency, account_id);
    if !note.is_empty() {
        transaction.note = Some(note.join(" "));
    }
    TransactionService::add(book, transaction)?;
    context.persist()?;
    output::success("transaction recorded");
    Ok(())
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let filter = match args.first() {
        Some(raw) => Some(TxType::parse(raw).ok_or_else(|| {
            CommandError::InvalidArguments(format!("unknown transaction type `{}`", raw))
        })?),
        None => None,
    };
    let book = context.book()?;
    let rows = TransactionService::list(book, filter);
    if rows.is_empty() {
        output::info("no transactions");
        return Ok(());
    }
    output::section("Transactions");
    for txn in rows {
        output::row(&[
            txn.id.to_string(),
            txn.date.to_string(),
            txn.tx_type.to_string(),
            format!("{:.2} {}", txn.amount, txn.currency),
            txn.note.clone().unwrap_or_default(),
        ]);
    }
    Ok(())
}

fn remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id_raw] = args else {
        return Err(CommandError::InvalidArguments("usage: tx remove <id>".into()));
    };
    let id = parse_id(id_raw)?;
    let book = context.book_mut()?;
    TransactionService::remove(book, id)?;
    context.persist()?;
    output::success("transaction removed");
    Ok(())
}
