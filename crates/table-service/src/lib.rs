pub mod actor;
pub mod error;
pub mod lobby;
pub mod registry;
pub mod scheduler;

pub use actor::{spawn_table, TableMsg};
pub use error::ServiceError;
pub use lobby::{table_config_from, JoinReply, LobbyService};
pub use registry::{TableHandle, TableRegistry};
