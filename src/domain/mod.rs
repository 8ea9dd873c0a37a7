pub mod account;
pub mod book;
pub mod category;
pub mod common;
pub mod occurrence;
pub mod payee;
pub mod project;
pub mod recurrence;
pub mod subscription;
pub mod tag;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use book::Book;
pub use category::Category;
pub use common::{Displayable, Identifiable, NamedEntity, Owned};
pub use occurrence::{OccurrenceState, SubscriptionOccurrence};
pub use payee::Payee;
pub use project::Project;
pub use recurrence::{BillingInterval, IntervalUnit};
pub use subscription::{Subscription, SubscriptionStatus};
pub use tag::Tag;
pub use transaction::{Transaction, TxType};
