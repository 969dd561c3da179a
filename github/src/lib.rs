//! Types and client for GitHub's v3 REST API
//! https://developer.github.com/v3/

pub mod client;
mod org;
mod permission;
mod repo;
mod user;

pub use client::{AuthScheme, Client, ClientBuilder};
pub use org::*;
pub use permission::*;
pub use repo::*;
pub use user::*;
