//! Core component trait - identity for panels and shell pieces
//!
//! Every UI element implements `Component` so the App can track focus and
//! route input without knowing panel internals.

/// Unique identifier for a component
///
/// Used for focus tracking (which panel receives input) and for the
/// status bar's focus label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Population table (the master list)
    Populations,
    /// Polygon detail panel for the current population
    Polygon,
    /// Piston form
    Piston,
    /// System logs panel
    Logs,
    /// Status bar (non-focusable)
    StatusBar,
    /// Toast notification (non-focusable)
    Toast,
}

impl ComponentId {
    /// Display name, shown in the status bar while focused
    pub fn title(&self) -> &'static str {
        match self {
            Self::Populations => "populations",
            Self::Polygon => "polygon",
            Self::Piston => "piston",
            Self::Logs => "logs",
            Self::StatusBar => "status",
            Self::Toast => "toast",
        }
    }

    /// Whether this component can receive focus
    pub fn is_focusable(&self) -> bool {
        matches!(
            self,
            Self::Populations | Self::Polygon | Self::Piston | Self::Logs
        )
    }

    /// Cycle to next focusable component (Tab behavior)
    pub fn next_focus(self) -> Self {
        match self {
            Self::Populations => Self::Polygon,
            Self::Polygon => Self::Piston,
            Self::Piston => Self::Logs,
            Self::Logs => Self::Populations,
            other => other, // Non-focusable stays put
        }
    }

    /// Cycle to previous focusable component (Shift+Tab behavior)
    pub fn prev_focus(self) -> Self {
        match self {
            Self::Populations => Self::Logs,
            Self::Polygon => Self::Populations,
            Self::Piston => Self::Polygon,
            Self::Logs => Self::Piston,
            other => other,
        }
    }
}

/// Base trait for UI components: identity only. Rendering goes through
/// each panel's typed render function, which receives the data it needs.
pub trait Component {
    fn id(&self) -> ComponentId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycle_visits_every_panel() {
        let mut id = ComponentId::Populations;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(id);
            id = id.next_focus();
        }
        assert_eq!(id, ComponentId::Populations);
        assert_eq!(seen.len(), 4);
        assert!(seen.iter().all(|p| p.is_focusable()));
    }

    #[test]
    fn test_prev_focus_inverts_next_focus() {
        for id in [
            ComponentId::Populations,
            ComponentId::Polygon,
            ComponentId::Piston,
            ComponentId::Logs,
        ] {
            assert_eq!(id.next_focus().prev_focus(), id);
        }
    }

    #[test]
    fn test_shell_components_do_not_take_focus() {
        assert!(!ComponentId::StatusBar.is_focusable());
        assert_eq!(ComponentId::StatusBar.next_focus(), ComponentId::StatusBar);
    }
}
