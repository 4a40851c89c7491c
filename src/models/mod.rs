pub mod activity;
pub mod common;
pub mod dashboard;
pub mod exercise;
pub mod food;
pub mod message;
pub mod settings;
pub mod user;

pub use activity::*;
pub use common::*;
pub use dashboard::*;
pub use exercise::*;
pub use food::*;
pub use message::*;
pub use settings::*;
pub use user::*;
