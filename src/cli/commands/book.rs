use crate::cli::core::{CommandError, CommandResult};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::storage::StorageBackend;

pub fn run(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((subcommand, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: book <new|open|list|backup|backups|delete> [name]".into(),
        ));
    };
    match subcommand.to_ascii_lowercase().as_str() {
        "new" => {
            let name = joined_name(rest, "usage: book new <name>")?;
            context.create_book(&name)?;
            output::success(format!("book `{}` created and opened", name));
            Ok(())
        }
        "open" => {
            let name = joined_name(rest, "usage: book open <name>")?;
            context.open_book(&name)?;
            output::success(format!("book `{}` opened", name));
            Ok(())
        }
        "list" => {
            let names = context.storage.list_books().map_err(CommandError::Core)?;
            if names.is_empty() {
                output::info("no books yet");
            }
            for name in names {
                output::row(&[name]);
            }
            Ok(())
        }
        "backup" => {
            let note = if rest.is_empty() {
                None
            } else {
                Some(rest.join(" "))
            };
            let book = context.book()?.clone();
            let info = context
                .storage
                .backup(&book, note.as_deref())
                .map_err(CommandError::Core)?;
            output::success(format!("backup written to {}", info.path.display()));
            Ok(())
        }
        "backups" => {
            let book = context.book()?;
            let owner_name = book.owner_name.clone();
            let backups = context
                .storage
                .list_backups(&owner_name)
                .map_err(CommandError::Core)?;
            if backups.is_empty() {
                output::info("no backups yet");
            }
            for backup in backups {
                output::row(&[backup.created_at, backup.path.display().to_string()]);
            }
            Ok(())
        }
        "delete" => {
            let name = joined_name(rest, "usage: book delete <name>")?;
            if !context.confirm(&format!("Delete book `{}` permanently?", name))? {
                output::info("delete cancelled");
                return Ok(());
            }
            context.storage.delete(&name).map_err(CommandError::Core)?;
            if context
                .book
                .as_ref()
                .map(|book| book.owner_name == name)
                .unwrap_or(false)
            {
                context.book = None;
            }
            output::success(format!("book `{}` deleted", name));
            Ok(())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown book subcommand `{}`",
            other
        ))),
    }
}

fn joined_name(args: &[&str], usage: &str) -> Result<String, CommandError> {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(usage.into()));
    }
    Ok(args.join(" "))
}
