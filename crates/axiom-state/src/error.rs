//! State error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StateError {
    #[error("Store is closed")]
    Closed,
}
