pub mod descriptor;
pub mod dispatcher;
pub mod outcome;

pub use descriptor::{BodyPart, RequestBody, RequestDescriptor};
pub use dispatcher::{AuthExpiredHook, RequestDispatcher};
pub use outcome::Outcome;
