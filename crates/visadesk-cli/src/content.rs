use visadesk_core::state::Screen;

pub const TAGLINE: &str = "Appointment scheduling, organised per route.";

pub const HERO: &[&str] = &[
    "Pick where applicants travel from and where they are going.",
    "The route console drafts a scheduling overview for that pair,",
    "and the consultation desk sends your details to our team in one step.",
];

pub const CAPABILITIES: &[(&str, &str)] = &[
    (
        "Route overview",
        "Short status summary and advice for any origin and destination.",
    ),
    (
        "Document checklist",
        "Reminders for the paperwork each consulate usually asks for.",
    ),
    (
        "Status alerts",
        "Email, SMS or chat updates when an appointment window opens.",
    ),
    (
        "Team dashboard",
        "One place for agencies to follow every applicant they manage.",
    ),
    (
        "Human support",
        "Specialists answer on chat during business hours.",
    ),
];

const DOCS: &[(&str, &str)] = &[
    (
        "Getting started",
        "Choose an origin and a destination on the route console, then press g to draft an overview. \
The overview has two parts: a short status block and a few paragraphs of advice.",
    ),
    (
        "Talking to the team",
        "Press m to open the consultation form. Name, email and phone are required, and the terms \
must be accepted before the request can be sent. The request opens in your messaging app, \
ready to send.",
    ),
    (
        "Configuration",
        "Settings live in config.toml under your configuration directory. The [model] table picks \
the text provider (gemini, ollama or offline), the [site] table holds the brand and the \
messaging number, and [audio] turns the terminal bell on or off.",
    ),
];

const TERMS: &[(&str, &str)] = &[
    (
        "Service",
        "We provide scheduling guidance and consultation. Appointment availability is decided by \
the issuing authorities and is never guaranteed.",
    ),
    (
        "Your information",
        "You confirm that the details you send are accurate and that you may share them with us.",
    ),
    (
        "Fees",
        "Quotes are agreed in writing before any paid work begins. The ranges shown on the \
pricing section are indicative.",
    ),
];

const PRIVACY: &[(&str, &str)] = &[
    (
        "What we collect",
        "Only what you type into the consultation form, plus the route you selected.",
    ),
    (
        "How it travels",
        "Requests leave this application as a messaging link. Nothing is stored locally beyond \
the diagnostic log file.",
    ),
    (
        "Text generation",
        "Route overviews send the two country names to the configured text provider. No personal \
details are included in that prompt.",
    ),
];

/// Headed paragraphs for every screen except Home, which is built from live state.
pub fn screen_sections(screen: Screen) -> &'static [(&'static str, &'static str)] {
    match screen {
        Screen::Docs => DOCS,
        Screen::Terms => TERMS,
        Screen::Privacy => PRIVACY,
        Screen::Features => CAPABILITIES,
        Screen::Home => &[],
    }
}
