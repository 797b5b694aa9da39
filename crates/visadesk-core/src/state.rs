use std::collections::VecDeque;

use super::catalog::Country;
use super::catalog::COUNTRIES;
use super::config::Config;
use super::contact::ContactForm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Docs,
    Terms,
    Privacy,
    Features,
}

/// Navbar order.
pub const SCREEN_ORDER: [Screen; 5] = [
    Screen::Home,
    Screen::Features,
    Screen::Docs,
    Screen::Terms,
    Screen::Privacy,
];

impl Screen {
    pub fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Docs => "docs",
            Self::Terms => "terms",
            Self::Privacy => "privacy",
            Self::Features => "features",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Docs => "Docs",
            Self::Terms => "Terms",
            Self::Privacy => "Privacy",
            Self::Features => "Features",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        SCREEN_ORDER
            .iter()
            .copied()
            .find(|screen| screen.id().eq_ignore_ascii_case(id.trim()))
    }

    fn order_index(self) -> usize {
        SCREEN_ORDER
            .iter()
            .position(|screen| *screen == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        SCREEN_ORDER[(self.order_index() + 1) % SCREEN_ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.order_index();
        if idx == 0 {
            SCREEN_ORDER[SCREEN_ORDER.len() - 1]
        } else {
            SCREEN_ORDER[idx - 1]
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSection {
    Hero,
    Dashboard,
    Features,
    Pricing,
    Contact,
}

pub const HOME_SECTIONS: [HomeSection; 5] = [
    HomeSection::Hero,
    HomeSection::Dashboard,
    HomeSection::Features,
    HomeSection::Pricing,
    HomeSection::Contact,
];

impl HomeSection {
    pub fn id(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Dashboard => "dashboard",
            Self::Features => "features",
            Self::Pricing => "pricing",
            Self::Contact => "contact",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hero => "Overview",
            Self::Dashboard => "Route console",
            Self::Features => "Capabilities",
            Self::Pricing => "Pricing",
            Self::Contact => "Talk to us",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        HOME_SECTIONS
            .iter()
            .copied()
            .find(|section| section.id().eq_ignore_ascii_case(id.trim()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSelection {
    pub origin: &'static Country,
    pub destination: &'static Country,
}

impl RouteSelection {
    pub fn new(origin: &'static Country, destination: &'static Country) -> Self {
        Self {
            origin,
            destination,
        }
    }

    pub fn label(&self) -> String {
        format!("{} -> {}", self.origin.name, self.destination.name)
    }
}

impl Default for RouteSelection {
    fn default() -> Self {
        Self {
            origin: &COUNTRIES[7],
            destination: &COUNTRIES[0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyResult {
    /// Exact text of the fenced block, when the response carried one.
    pub payload: Option<String>,
    pub narrative: String,
}

impl StrategyResult {
    pub fn narrative_only(narrative: impl Into<String>) -> Self {
        Self {
            payload: None,
            narrative: narrative.into(),
        }
    }

    pub fn payload_json(&self) -> Option<serde_json::Value> {
        self.payload
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteOverlay {
    None,
    Help,
    Contact(ContactForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub seq: u64,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            seq: 0,
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LogBuffer {
    cap: usize,
    next_seq: u64,
    buf: VecDeque<LogEntry>,
}

impl LogBuffer {
    pub fn new(cap: usize) -> Self {
        Self {
            cap,
            next_seq: 1,
            buf: VecDeque::with_capacity(cap),
        }
    }

    pub fn append(&mut self, mut entry: LogEntry) {
        entry.seq = self.next_seq;
        self.next_seq += 1;

        if self.buf.len() == self.cap {
            self.buf.pop_front();
        }
        self.buf.push_back(entry);
    }

    pub fn clear(&mut self) {
        self.buf.clear();
        self.next_seq = 1;
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.buf.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.buf.back()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRouting {
    pub screen: Screen,
    /// Home section the viewport was last scrolled to.
    pub section: Option<HomeSection>,
    /// Section waiting for the Home screen to mount.
    pub pending_section: Option<HomeSection>,
}

#[derive(Debug, Clone, Default)]
pub struct StrategyState {
    pub result: Option<StrategyResult>,
    pub busy: bool,
    pub active_run_id: u64,
}

#[derive(Debug, Clone)]
pub struct SiteInteraction {
    pub overlay: SiteOverlay,
}

#[derive(Debug, Clone)]
pub struct SiteState {
    pub routing: SiteRouting,
    pub route: RouteSelection,
    pub strategy: StrategyState,
    pub interaction: SiteInteraction,
    pub activity: LogBuffer,
    pub config: Config,
}

pub const ACTIVITY_LOG_CAP: usize = 200;

impl SiteState {
    pub fn new(config: Config) -> Self {
        Self {
            routing: SiteRouting {
                screen: Screen::Home,
                section: None,
                pending_section: None,
            },
            route: RouteSelection::default(),
            strategy: StrategyState::default(),
            interaction: SiteInteraction {
                overlay: SiteOverlay::None,
            },
            activity: LogBuffer::new(ACTIVITY_LOG_CAP),
            config,
        }
    }

    pub fn screen(&self) -> Screen {
        self.routing.screen
    }

    pub fn contact_form(&self) -> Option<&ContactForm> {
        match &self.interaction.overlay {
            SiteOverlay::Contact(form) => Some(form),
            _ => None,
        }
    }
}

impl Default for SiteState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_route_uses_eighth_and_first_catalog_entries() {
        let route = RouteSelection::default();
        assert_eq!(route.origin.name, "Bangladesh");
        assert_eq!(route.destination.name, "United States");
    }

    #[test]
    fn screen_ids_round_trip_and_order_wraps() {
        for screen in SCREEN_ORDER {
            assert_eq!(Screen::from_id(screen.id()), Some(screen));
        }
        assert_eq!(Screen::from_id("team"), None);
        assert_eq!(Screen::Privacy.next(), Screen::Home);
        assert_eq!(Screen::Home.prev(), Screen::Privacy);
    }

    #[test]
    fn log_buffer_drops_oldest_when_full() {
        let mut buffer = LogBuffer::new(2);
        buffer.append(LogEntry::new(LogLevel::Info, "a"));
        buffer.append(LogEntry::new(LogLevel::Info, "b"));
        buffer.append(LogEntry::new(LogLevel::Warn, "c"));
        let messages: Vec<&str> = buffer.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
        assert_eq!(buffer.last().map(|e| e.seq), Some(3));
    }

    #[test]
    fn payload_json_parses_only_valid_json() {
        let mut result = StrategyResult {
            payload: Some("{\"a\":1}".to_string()),
            narrative: "n".to_string(),
        };
        assert_eq!(result.payload_json(), Some(serde_json::json!({"a": 1})));
        result.payload = Some("status: ok".to_string());
        assert_eq!(result.payload_json(), None);
    }
}
