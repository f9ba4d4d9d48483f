//! Validation trait implemented by every config section

use crate::error::Result;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
