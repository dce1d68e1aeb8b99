/// Why a gesture did not produce a translation request.
///
/// None of these are fatal; the controller logs them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("No translatable text at target")]
    NoTarget,

    #[error("Word trigger expects a single word, got {0:?}")]
    NotAWord(String),

    #[error("Selection is empty or collapsed")]
    EmptySelection,

    #[error("Translation request queue is full")]
    QueueFull,

    #[error("Translation service is unavailable")]
    ChannelClosed,
}
