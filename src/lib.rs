pub mod accounting;
pub mod cli;
pub mod data;
pub mod session;
pub mod store;

pub use accounting::ledger::Ledger;
pub use accounting::report::{Report, ReportFilter};
pub use accounting::TransactionError;
pub use session::{Session, SessionError};
pub use store::{ResetConfirmation, SnapshotStore, StoreError};
