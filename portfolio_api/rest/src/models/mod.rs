use serde::Serialize;

pub mod contact;

#[derive(Debug, Clone, Serialize)]
pub struct ApiError<D> {
    pub error: D,
}
