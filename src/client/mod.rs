pub mod api_client;
pub mod archives;
pub mod session;

pub use api_client::ApiClient;
pub use archives::{ArchiveBrowser, LeaderboardSource};
pub use session::SessionStore;
