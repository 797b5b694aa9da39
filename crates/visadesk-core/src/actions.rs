use super::catalog::Country;
use super::contact::ContactField;
use super::state::LogEntry;
use super::state::Screen;
use super::state::StrategyResult;

#[derive(Debug, Clone)]
pub enum SiteAction {
    User(UserAction),
    Runtime(RuntimeAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Navigate(Screen),
    NextScreen,
    PrevScreen,
    Back,
    ScrollToSection(String),

    SetOrigin(&'static Country),
    SetDestination(&'static Country),
    SwapRoute,

    GenerateStrategy,

    OpenContact,
    CloseContact,
    ContactInput(char),
    ContactBackspace,
    ContactFocusNext,
    ContactFocusPrev,
    ToggleAcceptance,
    SetContactField { field: ContactField, value: String },
    SubmitContact,

    OpenDirectChat,
    RequestRouteProposal,

    ToggleHelp,
    CloseOverlay,
}

#[derive(Debug, Clone)]
pub enum RuntimeAction {
    HomeMounted,
    StrategyResolved {
        run_id: u64,
        result: StrategyResult,
    },
    AppendLog(LogEntry),
    ClearLogs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyHint {
    pub keys: &'static str,
    pub label: &'static str,
}

pub const KEY_HINTS: [KeyHint; 15] = [
    KeyHint {
        keys: "1-5",
        label: "Jump to screen",
    },
    KeyHint {
        keys: "Tab / Shift+Tab",
        label: "Next / previous screen",
    },
    KeyHint {
        keys: "Esc / b",
        label: "Back to home",
    },
    KeyHint {
        keys: "h d f p c",
        label: "Scroll to hero, dashboard, features, pricing, contact",
    },
    KeyHint {
        keys: "D T P",
        label: "Open docs, terms, privacy",
    },
    KeyHint {
        keys: "t",
        label: "Scroll to team (not on this site)",
    },
    KeyHint {
        keys: "o / O",
        label: "Next / previous origin",
    },
    KeyHint {
        keys: "n / N",
        label: "Next / previous destination",
    },
    KeyHint {
        keys: "x",
        label: "Swap route",
    },
    KeyHint {
        keys: "g",
        label: "Generate strategy",
    },
    KeyHint {
        keys: "m",
        label: "Open contact form",
    },
    KeyHint {
        keys: "l",
        label: "Ask for a route proposal",
    },
    KeyHint {
        keys: "w",
        label: "Open direct chat",
    },
    KeyHint {
        keys: "j / k",
        label: "Scroll",
    },
    KeyHint {
        keys: "? / q",
        label: "Help / quit",
    },
];
