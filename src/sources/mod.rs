use crate::model::Entries;
use anyhow::Result;

pub trait Source {
    fn load(&self) -> Result<Entries>;
}

pub mod dir;
pub mod json;
pub mod lines;
