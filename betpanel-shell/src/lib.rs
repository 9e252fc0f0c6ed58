//! betpanel-shell: routing, guards, and the tenant-switching shell for
//! the betpanel admin console.

pub mod guard;
pub mod routes;
pub mod shell;

pub use guard::{GuardState, RouteGuard};
pub use routes::{match_path, RouteOutcome, View};
pub use shell::{AppShell, Header, Resolved};
