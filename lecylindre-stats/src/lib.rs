pub mod advisor;
pub mod aggregate;
pub mod report;
pub mod session;

pub use advisor::{Confidence, Decision, Recommendation};
pub use report::{Report, View};
pub use session::Session;
