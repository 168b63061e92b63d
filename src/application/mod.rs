pub mod live_table;
pub mod poller;
pub mod input;
pub mod dashboard;

pub use live_table::{LiveTableView, Theme, ViewState, LOADING_TEXT, TITLE};
pub use poller::{PollEvent, PollHandle, Poller, PollerConfig};
pub use input::{parse_command, spawn_line_reader, ViewCommand};
pub use dashboard::Dashboard;
