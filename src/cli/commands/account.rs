use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::core::services::AccountService;
use crate::domain::AccountKind;

pub fn run(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: account <add|list|rename|activate|deactivate> ...".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "add" => add(context, rest),
        "list" => list(context, rest),
        "rename" => rename(context, rest),
        "activate" => set_active(context, rest, true),
        "deactivate" => set_active(context, rest, false),
        other => Err(CommandError::InvalidArguments(format!(
            "unknown account subcommand `{}`",
            other
        ))),
    }
}

fn add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (name, kind_raw) = match args {
        [name, kind, ..] => (name.to_string(), kind.to_string()),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: account add <name> <bank|card|cash|investment|other> [currency]".into(),
            ))
        }
    };
    let kind = AccountKind::parse(&kind_raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!("unknown account kind `{}`", kind_raw))
    })?;
    let currency = args
        .get(2)
        .map(|raw| raw.to_uppercase())
        .unwrap_or_else(|| context.config.currency.clone());

    let book = context.book_mut()?;
    AccountService::create(book, name.clone(), kind, currency)?;
    context.persist()?;
    output::success(format!("account `{}` added", name));
    Ok(())
}

fn list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let only_active = args.first().map(|raw| *raw == "active").unwrap_or(false);
    let book = context.book()?;
    let accounts = AccountService::list(book, only_active);
    if accounts.is_empty() {
        output::info("no accounts");
        return Ok(());
    }
    output::section("Accounts");
    for account in accounts {
        output::row(&[
            account.name.clone(),
            format!("{:?}", account.kind),
            account.currency.clone(),
            if account.is_active { "active".into() } else { "inactive".into() },
        ]);
    }
    Ok(())
}

fn rename(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [old_name, new_name] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: account rename <old-name> <new-name>".into(),
        ));
    };
    let id = resolve_account_id(context, old_name)?;
    let book = context.book_mut()?;
    AccountService::rename(book, id, new_name.to_string())?;
    context.persist()?;
    output::success(format!("account renamed to `{}`", new_name));
    Ok(())
}

fn set_active(context: &mut ShellContext, args: &[&str], active: bool) -> CommandResult {
    let [name] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: account <activate|deactivate> <name>".into(),
        ));
    };
    let id = resolve_account_id(context, name)?;
    let book = context.book_mut()?;
    AccountService::set_active(book, id, active)?;
    context.persist()?;
    output::success(format!(
        "account `{}` {}",
        name,
        if active { "activated" } else { "deactivated" }
    ));
    Ok(())
}

pub(crate) fn resolve_account_id(
    context: &ShellContext,
    name: &str,
) -> Result<uuid::Uuid, CommandError> {
    let book = context.book()?;
    AccountService::find_by_name(book, name)
        .map(|account| account.id)
        .ok_or_else(|| {
            CommandError::Core(crate::errors::FinanceError::AccountNotFound(name.to_string()))
        })
}
