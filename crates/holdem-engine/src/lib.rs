pub mod config;
pub mod elo;
pub mod events;
pub mod history;
pub mod pot;
pub mod seat;
pub mod table;
pub mod view;

pub use config::TableConfig;
pub use events::{PushEvent, PushEventKind, ShowdownReveal};
pub use history::{ContenderRecord, HandRecord, LogEntry, PotResult, SeatPayout};
pub use pot::Pot;
pub use seat::Seat;
pub use table::{ActionOutcome, Table, TickOutcome, TimerFingerprint, TimerOutcome};
pub use view::{PotView, PrivateView, SeatView, TableView};
