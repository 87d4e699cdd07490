//! Interaction mode and pointer routing.

use bevy::prelude::States;
use serde::{Deserialize, Serialize};

use crate::face::Face;

const ACTION_STATUS: &str = "ACTION mode ON (press middle mouse button to switch mode)\n\
While in action mode press the Right mouse button to rotate top and bottom faces \
and the Left mouse button to rotate the rest.";

const VIEW_STATUS: &str = "VIEW mode ON (press middle mouse button to switch mode)\n\
While in action mode press the Right mouse button to rotate top and bottom faces \
and the Left mouse button to rotate the rest.";

/// Whether clicks rotate faces or are left to the camera.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    View,
    Action,
}

impl InteractionMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::View => Self::Action,
            Self::Action => Self::View,
        }
    }

    /// Instruction text shown for this mode.
    pub fn status_text(self) -> &'static str {
        match self {
            Self::View => VIEW_STATUS,
            Self::Action => ACTION_STATUS,
        }
    }
}

/// Abstract pointer button, decoupled from the physical mouse mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Left mouse button: side faces.
    Primary,
    /// Right mouse button: top and bottom.
    Secondary,
    /// Middle mouse button: switch mode.
    Toggle,
}

impl PointerButton {
    /// Faces this button is allowed to rotate.
    pub fn faces(self) -> &'static [Face] {
        match self {
            Self::Primary => &[Face::Left, Face::Right, Face::Front, Face::Back],
            Self::Secondary => &[Face::Top, Face::Bottom],
            Self::Toggle => &[],
        }
    }
}

/// What the router decided to do with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Rotate(Face),
    ToggleMode,
    Ignore,
}

/// Maps a pointer event to a decision.
///
/// `hits` are the faces under the pointer, nearest first. The first hit
/// that belongs to the button's group wins.
pub fn route(
    mode: InteractionMode,
    can_accept: bool,
    button: PointerButton,
    hits: &[Face],
) -> RouteDecision {
    if button == PointerButton::Toggle {
        return RouteDecision::ToggleMode;
    }
    if mode != InteractionMode::Action || !can_accept {
        return RouteDecision::Ignore;
    }
    let allowed = button.faces();
    hits.iter()
        .copied()
        .find(|face| allowed.contains(face))
        .map_or(RouteDecision::Ignore, RouteDecision::Rotate)
}
