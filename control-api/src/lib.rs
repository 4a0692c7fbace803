pub mod model;
pub mod traits;

pub use model::identity::{Role, User};
pub use model::notification::{Notification, NotificationDraft, NotificationKind};
pub use model::run_state::RunState;
pub use model::snapshot::ControlSnapshot;
pub use traits::clock::Clock;
pub use traits::id_source::IdSource;

