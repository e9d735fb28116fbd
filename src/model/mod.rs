pub mod checkin;
pub mod session;
pub mod student;

pub use checkin::Checkin;
pub use session::Session;
pub use student::Student;
