//! Shirt appearance store: the selected color and optional logo, with
//! change notification.

use serde::{Deserialize, Serialize};

pub const DEFAULT_COLOR: &str = "#ffffff";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShirtState {
    /// Hex color code, e.g. `#2F4F4F`
    pub color: String,
    /// Logo image as a data URL
    pub logo_data_url: Option<String>,
}

impl Default for ShirtState {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            logo_data_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&ShirtState)>;

/// Observable container for [`ShirtState`]
///
/// Every mutation notifies subscribers, in subscription order, with the new
/// state. Instances are independent of each other.
#[derive(Default)]
pub struct ShirtStore {
    state: ShirtState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl ShirtStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: ShirtState) -> Self {
        Self {
            state,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &ShirtState {
        &self.state
    }

    pub fn color(&self) -> &str {
        &self.state.color
    }

    pub fn logo_data_url(&self) -> Option<&str> {
        self.state.logo_data_url.as_deref()
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.state.color = color.into();
        self.notify();
    }

    /// Set or clear the logo
    pub fn set_logo(&mut self, url: Option<String>) {
        self.state.logo_data_url = url;
        self.notify();
    }

    /// Back to a white shirt with no logo
    pub fn reset(&mut self) {
        self.state = ShirtState::default();
        self.notify();
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ShirtState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self) {
        let state = &self.state;
        for (_, listener) in &mut self.listeners {
            listener(state);
        }
    }
}

impl std::fmt::Debug for ShirtStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShirtStore")
            .field("state", &self.state)
            .field("subscribers", &self.listeners.len())
            .finish()
    }
}
