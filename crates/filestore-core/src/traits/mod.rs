//! Core traits defined in `filestore-core` and implemented by other crates.

pub mod clock;
pub mod mailer;
pub mod notifier;
pub mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use mailer::{Mailer, ShareInvitation};
pub use notifier::{NoopNotifier, NotificationKind, Notifier};
pub use storage::StorageProvider;
