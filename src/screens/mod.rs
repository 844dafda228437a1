pub mod access;
pub mod announcements;
pub mod events;
pub mod posts;
pub mod test_records;

pub use access::AccessScreen;
pub use announcements::AnnouncementsScreen;
pub use events::EventsScreen;
pub use posts::{CurrentUser, PostsScreen};
pub use test_records::TestRecordsScreen;
