use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommonError {
    #[error("Invalid slice: start {start} is after end {end_exclusive}")]
    InvalidSlice { start: usize, end_exclusive: usize },
}
