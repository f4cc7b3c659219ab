mod limits;
mod project;
mod sign_in;
mod user;

pub use limits::Limits;
pub use project::{NewProject, Project};
pub use sign_in::{SignIn, SignInOutcome};
pub use user::{NewUser, User};
