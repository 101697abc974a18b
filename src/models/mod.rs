pub mod commit;
pub mod issue;
pub mod repository;
pub mod user;
pub mod wakatime;

pub use commit::CommitEvent;
pub use issue::{IssueComment, IssueSummary};
pub use repository::RepositorySummary;
pub use user::{UserData, ViewerInfo};
pub use wakatime::WakaTimeStats;
