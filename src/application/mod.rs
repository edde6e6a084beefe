//! Use cases: the terminal coordinator, its polling schedule and the
//! portfolio overview.

pub mod coordinator;
pub mod overview;
pub mod scheduler;
pub mod state;

pub use coordinator::TerminalCoordinator;
pub use overview::{OverviewSnapshot, hydrate_overview};
pub use scheduler::RefreshScheduler;
pub use state::{Feedback, FeedbackKind, RefreshKind, RefreshOutcome, RefreshTicket, TerminalState};
