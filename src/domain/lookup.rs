use async_trait::async_trait;
use thiserror::Error;

use super::entities::{CadastralRecord, ParcelIdentifier};

pub const NOT_FOUND_MESSAGE: &str = "Участок не найден";
pub const TRANSPORT_MESSAGE: &str = "Ошибка при получении данных";
pub const MALFORMED_MESSAGE: &str = "Некорректный ответ сервиса данных";

/// Any failure of a remote lookup. The display text is what the user sees.
/// Transport failures keep a short cause after the generic text.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("{}: {}", TRANSPORT_MESSAGE, .cause)]
    Transport { cause: String },
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound { status: u16 },
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error("{}", MALFORMED_MESSAGE)]
    Malformed { cause: String },
}

impl LookupError {
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

/// Source of cadastral records. One call per invocation, no retries.
#[async_trait]
pub trait ParcelLookup: Send + Sync {
    async fn fetch_record(
        &self,
        identifier: &ParcelIdentifier,
    ) -> Result<CadastralRecord, LookupError>;
}
