use crate::error::MoireError;

pub type Result<T> = std::result::Result<T, MoireError>;
