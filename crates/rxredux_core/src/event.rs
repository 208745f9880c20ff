use std::fmt::Debug;

/// Intent that starts one pass through the pipeline.
///
/// Equality is structural: two events with the same tag and payload are
/// the same event, which is what duplicate collapsing relies on.
pub trait Event: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Event for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}

/// Payload carried by state and effect models.
pub trait Bundle: Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Bundle for T where T: Clone + PartialEq + Debug + Send + Sync + 'static {}
