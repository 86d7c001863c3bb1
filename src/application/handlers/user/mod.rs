//! Account handlers: registration and login.

mod login;
mod register;

pub use login::{LoginError, LoginHandler};
pub use register::{RegisterError, RegisterHandler, SignedInUser};
