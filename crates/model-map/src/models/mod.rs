pub mod authorization;
pub mod repository;
pub mod user;

pub use authorization::*;
pub use repository::*;
pub use user::*;
