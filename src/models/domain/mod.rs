pub mod announcement;
pub mod event;
pub mod post;
pub mod test_record;
pub mod user_account;

pub use announcement::Announcement;
pub use event::Event;
pub use post::{Comment, Like, Post};
pub use test_record::TestRecord;
pub use user_account::UserAccount;
