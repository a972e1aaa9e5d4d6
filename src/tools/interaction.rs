use egui::{Pos2, Vec2};

use crate::geometry::HandleId;

/// Per-gesture state, alive from pointer-down to pointer-up.
///
/// `last` is the pointer position of the previous step; moves apply the
/// delta since then, not since the gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    #[default]
    Idle,
    Dragging {
        last: Pos2,
    },
    Resizing {
        handle: HandleId,
        last: Pos2,
    },
}

impl InteractionState {
    pub fn name(&self) -> &'static str {
        match self {
            InteractionState::Idle => "Idle",
            InteractionState::Dragging { .. } => "Dragging",
            InteractionState::Resizing { .. } => "Resizing",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        match self {
            InteractionState::Resizing { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    /// Record `pos` as the new step origin and return the delta from the previous one
    pub(crate) fn advance(&mut self, pos: Pos2) -> Vec2 {
        match self {
            InteractionState::Idle => Vec2::ZERO,
            InteractionState::Dragging { last } | InteractionState::Resizing { last, .. } => {
                let delta = pos - *last;
                *last = pos;
                delta
            }
        }
    }
}
