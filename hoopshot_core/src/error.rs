// hoopshot_core/src/error.rs

use thiserror::Error;

use crate::types::AnchorId;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("a hoop is already placed on anchor {anchor:?}; only one hoop per session")]
    HoopAlreadyPlaced { anchor: AnchorId },

    #[error("invalid session configuration: {0}")]
    InvalidConfig(String),
}
