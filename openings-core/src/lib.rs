mod access;
mod as_value;
mod company;
mod error;
mod executor;
mod job;
mod patch;
mod statement;
mod util;
mod value;

pub use ::anyhow::Context;
pub use access::*;
pub use as_value::*;
pub use company::*;
pub use error::*;
pub use executor::*;
pub use job::*;
pub use patch::*;
pub use statement::*;
pub use util::*;
pub use value::*;
pub mod stream {
    pub use ::futures::stream::*;
}

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
