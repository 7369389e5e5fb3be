pub mod friend_service;

pub use friend_service::*;
