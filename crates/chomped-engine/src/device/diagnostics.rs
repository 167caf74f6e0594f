use std::sync::{Arc, Mutex, MutexGuard};

/// Latest device error, captured from wgpu's uncaptured-error hook.
///
/// wgpu reports validation failures (bad WGSL, pipeline interface mismatch,
/// misuse of a resource) through the device callback as they happen.
/// The sink keeps the most recent one until someone takes it.
#[derive(Debug, Clone, Default)]
pub struct ErrorSink {
    latest: Arc<Mutex<Option<String>>>,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes `device`'s uncaptured errors into this sink.
    pub fn install(&self, device: &wgpu::Device) {
        let sink = self.clone();
        let handler: Box<dyn wgpu::UncapturedErrorHandler> = Box::new(move |err: wgpu::Error| {
            log::debug!("wgpu error captured: {err}");
            sink.record(err.to_string());
        });
        device.on_uncaptured_error(handler.into());
    }

    /// Stores `message`, replacing any error not yet taken.
    pub fn record(&self, message: impl Into<String>) {
        *self.lock() = Some(message.into());
    }

    /// Returns and clears the stored error.
    pub fn take(&self) -> Option<String> {
        self.lock().take()
    }

    fn lock(&self) -> MutexGuard<'_, Option<String>> {
        self.latest.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
