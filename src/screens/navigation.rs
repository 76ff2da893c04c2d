//! Bottom navigation bar.

use serde::Serialize;

/// A fixed navigation destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    /// Icon identifier for the renderer
    pub icon: &'static str,
}

/// Destinations in display order; the index is the screen index.
pub const NAV_ITEMS: [NavItem; 5] = [
    NavItem { label: "Dashboard", icon: "home" },
    NavItem { label: "Log", icon: "camera" },
    NavItem { label: "Progress", icon: "trending-up" },
    NavItem { label: "Chat", icon: "message-circle" },
    NavItem { label: "Community", icon: "users" },
];

/// One rendered button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavButton {
    pub index: usize,
    pub label: &'static str,
    pub icon: &'static str,
    pub active: bool,
}

/// Navigation bar bound to the current screen index and a change callback.
///
/// The bar does not track selection itself; the owner passes the new index
/// back in on the next render.
pub struct Navigation<F: FnMut(usize)> {
    active_screen: usize,
    on_screen_change: F,
}

impl<F: FnMut(usize)> Navigation<F> {
    pub fn new(active_screen: usize, on_screen_change: F) -> Self {
        Self {
            active_screen,
            on_screen_change,
        }
    }

    pub fn active_screen(&self) -> usize {
        self.active_screen
    }

    pub fn buttons(&self) -> Vec<NavButton> {
        NAV_ITEMS
            .iter()
            .enumerate()
            .map(|(index, item)| NavButton {
                index,
                label: item.label,
                icon: item.icon,
                active: index == self.active_screen,
            })
            .collect()
    }

    /// Press the button at `index`. Returns false for an index with no button.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= NAV_ITEMS.len() {
            return false;
        }
        (self.on_screen_change)(index);
        true
    }
}
