// Data models shared across services and API handlers

pub mod activity;
pub mod checklist;
pub mod goal;
pub mod nutrition;
pub mod physical;
pub mod profession;
pub mod reminder;
pub mod task;
pub mod user;

pub use activity::*;
pub use checklist::*;
pub use goal::*;
pub use nutrition::*;
pub use physical::*;
pub use profession::*;
pub use reminder::*;
pub use task::*;
pub use user::*;
