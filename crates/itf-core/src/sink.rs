use itf_types::TranslateRequest;

use crate::error::TriggerError;

/// Outbound half of the request/response channel to the translation worker.
///
/// Sending never blocks; responses come back later as
/// `PageEvent::TranslationResult`.
pub trait RequestSink {
    fn send_request(&mut self, request: TranslateRequest) -> Result<(), TriggerError>;
}

impl RequestSink for kanal::Sender<TranslateRequest> {
    fn send_request(&mut self, request: TranslateRequest) -> Result<(), TriggerError> {
        match self.try_send(request) {
            Ok(true) => Ok(()),
            Ok(false) => Err(TriggerError::QueueFull),
            Err(_) => Err(TriggerError::ChannelClosed),
        }
    }
}

impl RequestSink for kanal::AsyncSender<TranslateRequest> {
    fn send_request(&mut self, request: TranslateRequest) -> Result<(), TriggerError> {
        match self.try_send(request) {
            Ok(true) => Ok(()),
            Ok(false) => Err(TriggerError::QueueFull),
            Err(_) => Err(TriggerError::ChannelClosed),
        }
    }
}
