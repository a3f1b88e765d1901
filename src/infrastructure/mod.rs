//! Infrastructure layer - storage, security and service implementations

pub mod auth;
pub mod company;
pub mod job;
pub mod logging;
pub mod storage;
pub mod user;
