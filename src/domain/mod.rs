pub mod announcement;
pub mod comment;
pub mod story;
pub mod event;
pub mod user;

pub use announcement::*;
pub use comment::*;
pub use story::*;
pub use event::*;
pub use user::*;
