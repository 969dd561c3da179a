mod api;
mod downgrade;

pub use anyhow::{Error, Result};
pub use api::{LiveApi, OrgApi};
pub use downgrade::{run, RunReport};
