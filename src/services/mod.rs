pub mod auth;
pub mod catalog;
pub mod games;

pub use games::GameService;
