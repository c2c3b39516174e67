//! Interaction policy for a list.

/// How a list behaves under interaction, as opposed to how it looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Behavior {
    pub underflow: Underflow,
    pub keyboard_adjustment_mode: KeyboardAdjustmentMode,
    pub selection_mode: SelectionMode,
}

/// What happens when the content is shorter than the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Underflow {
    /// Keep the scroll view bouncy even when nothing overflows.
    pub always_bounce: bool,

    /// Where the short content sits within the viewport.
    pub alignment: UnderflowAlignment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum UnderflowAlignment {
    #[default]
    Top,
    Center,
    Bottom,
}

impl UnderflowAlignment {
    /// The scroll-axis shift for content of `content` extent in a viewport
    /// of `viewport` extent. Zero when the content overflows.
    pub fn offset(&self, content: f32, viewport: f32) -> f32 {
        if content >= viewport {
            return 0.0;
        }

        match self {
            UnderflowAlignment::Top => 0.0,
            UnderflowAlignment::Center => (viewport - content) / 2.0,
            UnderflowAlignment::Bottom => viewport - content,
        }
    }
}

/// Whether the list repositions content to track the platform keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyboardAdjustmentMode {
    #[default]
    Adjusts,
    None,
}

/// How many items may be selected at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SelectionMode {
    None,
    #[default]
    Single,
    Multiple,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underflow_offsets() {
        assert_eq!(UnderflowAlignment::Top.offset(100.0, 300.0), 0.0);
        assert_eq!(UnderflowAlignment::Center.offset(100.0, 300.0), 100.0);
        assert_eq!(UnderflowAlignment::Bottom.offset(100.0, 300.0), 200.0);

        // Overflowing content never shifts.
        assert_eq!(UnderflowAlignment::Bottom.offset(400.0, 300.0), 0.0);
    }
}
