#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Label prefixed to every log line of this store.
    pub tag: String,
    /// Drop an event equal to the one right before it.
    pub collapse_duplicate_events: bool,
    /// Deliver the initial state before any event is processed.
    pub emit_initial_state: bool,
    /// Capacity of the queue between the reducers and the delivery hub.
    pub model_buffer: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            tag: "ViewModel".to_string(),
            collapse_duplicate_events: true,
            emit_initial_state: false,
            model_buffer: 64,
        }
    }
}

impl StoreSettings {
    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }
}
