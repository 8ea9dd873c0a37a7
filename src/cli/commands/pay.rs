//! The `pay` command: settle a subscription charge against an account.

use crate::cli::commands::{account, subscription};
use crate::cli::core::{parse_id, CommandError, CommandResult};
use crate::cli::output;
use crate::cli::shell_context::ShellContext;
use crate::core::services::{PayRequest, PayTarget, PaymentOutcome, PaymentService};

const USAGE: &str = "usage: pay <account> (sub <name> [YYYY-MM-DD] | occ <occurrence-id>)";

pub fn run(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [account_name, selector, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(USAGE.into()));
    };

    let account_id = account::resolve_account_id(context, account_name)?;
    let target = match (selector.to_ascii_lowercase().as_str(), rest) {
        ("sub", [name, due @ ..]) if due.len() <= 1 => {
            let id = subscription::resolve_subscription_id(context, name)?;
            PayTarget::Subscription {
                id,
                due_date: due.first().map(|raw| raw.to_string()),
            }
        }
        ("occ", [id_raw]) => PayTarget::Occurrence(parse_id(id_raw)?),
        _ => return Err(CommandError::InvalidArguments(USAGE.into())),
    };

    let payment_date = context.today();
    let request = PayRequest { account_id, target };
    let book = context.book_mut()?;
    let receipt = PaymentService::pay(book, &request, payment_date)?;
    context.persist()?;

    match receipt.outcome {
        PaymentOutcome::Posted => {
            output::success(format!("payment posted (transaction {})", receipt.transaction_id));
            if let Some(next) = receipt.next_due_date {
                output::info(format!("next due date is {}", next));
            }
        }
        PaymentOutcome::AlreadyPaid => {
            output::info("occurrence was already paid; nothing posted");
        }
    }
    Ok(())
}
