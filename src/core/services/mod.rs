pub mod account_service;
pub mod category_service;
pub mod payee_service;
pub mod payment_service;
pub mod project_service;
pub mod schedule_service;
pub mod subscription_service;
pub mod tag_service;
pub mod transaction_service;

pub use account_service::AccountService;
pub use category_service::CategoryService;
pub use payee_service::PayeeService;
pub use payment_service::{PayRequest, PayTarget, PaymentOutcome, PaymentReceipt, PaymentService};
pub use project_service::ProjectService;
pub use schedule_service::{ScheduleService, ScheduleSnapshot, UpcomingCharge};
pub use subscription_service::{NewSubscription, SubscriptionService};
pub use tag_service::TagService;
pub use transaction_service::TransactionService;
