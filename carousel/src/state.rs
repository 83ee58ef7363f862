/// A lightweight, serializable snapshot of the current layout configuration.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutState {
    pub item_size: f64,
    pub count: usize,
    pub original_count: usize,
}

/// A lightweight, serializable snapshot of the current scroll position.
///
/// The logical index is deliberately absent: it is a pure projection of the offset
/// and is re-derived on restore.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub offset: f64,
}

/// A combined snapshot of layout + scroll state.
///
/// This is useful for restoring a carousel across frames or sessions without
/// coupling the engine to any specific UI framework.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameState {
    pub layout: LayoutState,
    pub scroll: ScrollState,
}
