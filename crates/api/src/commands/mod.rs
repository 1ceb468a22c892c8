//! Route handlers - HTTP to gateway bridge

mod auth;
mod groups;
mod health;
mod messages;
mod profile;
mod resources;

pub use auth::*;
pub use groups::*;
pub use health::*;
pub use messages::*;
pub use profile::*;
pub use resources::*;
