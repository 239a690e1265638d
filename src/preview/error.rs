use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PreviewError {
    #[error("No preview session is open")]
    NotOpen,

    #[error("Refresh is only available on the preview tab")]
    RefreshUnavailable,
}
