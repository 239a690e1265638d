use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    #[error("No track is loaded")]
    NoTrack,

    #[error("Playlist is empty")]
    EmptyPlaylist,

    #[error("Lyric line {0} does not exist")]
    LyricOutOfRange(usize),

    #[error("Track has no audio URL")]
    MissingUrl,

    #[error("Media error: {0}")]
    Media(String),
}
