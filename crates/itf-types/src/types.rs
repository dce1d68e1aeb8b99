use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::wire::TranslateResponse;

/// Opaque card identifier, also used as the translation request id
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host handle for a page node. Only meaningful to the host that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    Loading,
    Done,
    Closing,
}

impl CardState {
    /// Value of the card's state attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            CardState::Loading => "loading",
            CardState::Done => "done",
            CardState::Closing => "closing",
        }
    }
}

/// What a gesture asked to translate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerIntent {
    Word,
    Sentence,
}

/// Content under the card's source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardBody {
    Loading,
    Result(String),
    /// Failed translation; clicking it retries
    Error(String),
}

impl CardBody {
    pub fn is_error(&self) -> bool {
        matches!(self, CardBody::Error(_))
    }
}

/// Everything a host needs to mount a new card
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: CardId,
    pub order: u64,
    pub state: CardState,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    RemoveCard(CardId),
}

/// Inputs a host forwards to the trigger controller
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// Key names follow the host's convention, e.g. `Control`, `Alt`, `t`
    KeyDown {
        key: String,
    },
    KeyUp {
        key: String,
    },
    PointerMove(Point),
    Click {
        target: Option<NodeId>,
    },
    Scroll,
    Resize,
    CloseClicked(CardId),
    RetryClicked(CardId),
    SettingsChanged {
        enabled: bool,
    },
    TranslationResult(TranslateResponse),
    Deferred(DeferredAction),
}

/// Tells the host what to do with the native event after handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Prevent default behaviour and stop propagation
    Consumed,
    Passthrough,
}
