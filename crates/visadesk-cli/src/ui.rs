use std::io;
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs};
use ratatui::Terminal;
use tracing::info;

use visadesk_core::actions::{RuntimeAction, SiteAction, UserAction, KEY_HINTS};
use visadesk_core::catalog::{next_country, prev_country, PRICING_PLANS};
use visadesk_core::config::Config;
use visadesk_core::contact::{ContactField, ContactForm};
use visadesk_core::reducer::SiteEffect;
use visadesk_core::state::{
    HomeSection, LogLevel, Screen, SiteOverlay, SiteState, StrategyResult, HOME_SECTIONS,
    SCREEN_ORDER,
};
use visadesk_exec::{resolve_notifier, spawn_strategy, SiteController, StrategyClient, SystemOpener};

use crate::content;

const MIN_WRAP_WIDTH: usize = 20;
const RAIL_WIDTH: u16 = 36;
const RAIL_MIN_TOTAL_WIDTH: u16 = 100;

struct TuiGuard;

impl Drop for TuiGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
    }
}

pub fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = Arc::new(StrategyClient::from_config(&config.model));
    let notifier = resolve_notifier(&config.audio);
    let controller = SiteController::new(SiteState::new(config), notifier, Box::new(SystemOpener));
    info!(provider = client.provider(), "text provider selected");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, crossterm::cursor::Hide)?;
    let _guard = TuiGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    run_app(&mut terminal, controller, client)?;
    Ok(())
}

enum UiEvent {
    StrategyResolved { run_id: u64, result: StrategyResult },
}

/// Host-side scroll position of the main panel, plus the pending mount timer.
#[derive(Debug, Default)]
struct Viewport {
    scroll: u16,
    target: u16,
    max_scroll: u16,
    section_offsets: [u16; HOME_SECTIONS.len()],
    mount_deadline: Option<Instant>,
}

impl Viewport {
    fn scroll_to(&mut self, line: u16, smooth: bool) {
        self.target = line;
        if !smooth {
            self.scroll = line.min(self.max_scroll);
            self.target = self.scroll;
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll));
        self.scroll = u16::try_from(next).unwrap_or(0);
        self.target = self.scroll;
    }

    fn section_offset(&self, section: HomeSection) -> u16 {
        HOME_SECTIONS
            .iter()
            .position(|candidate| *candidate == section)
            .map(|idx| self.section_offsets[idx])
            .unwrap_or(0)
    }

    /// Moves a quarter of the remaining distance per frame.
    fn tick(&mut self) {
        self.target = self.target.min(self.max_scroll);
        if self.scroll == self.target {
            return;
        }
        let step = (self.scroll.abs_diff(self.target) / 4).max(1);
        if self.scroll < self.target {
            self.scroll += step;
        } else {
            self.scroll -= step;
        }
    }

    fn mount_due(&mut self, now: Instant) -> bool {
        match self.mount_deadline {
            Some(deadline) if now >= deadline => {
                self.mount_deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[derive(Clone, Copy)]
struct UiPalette {
    accent: Color,
    accent_alt: Color,
    success: Color,
    warning: Color,
    muted: Color,
    border: Color,
    panel_bg: Color,
    selected_bg: Color,
}

fn palette_for(busy: bool) -> UiPalette {
    UiPalette {
        accent: Color::Cyan,
        accent_alt: Color::Blue,
        success: Color::Green,
        warning: Color::Yellow,
        muted: Color::DarkGray,
        border: if busy { Color::Yellow } else { Color::Gray },
        panel_bg: Color::Black,
        selected_bg: Color::DarkGray,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyCommand {
    Quit,
    Dispatch(UserAction),
    Scroll(i32),
    Ignore,
}

fn map_help_key(key: KeyEvent) -> KeyCommand {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            KeyCommand::Dispatch(UserAction::CloseOverlay)
        }
        _ => KeyCommand::Ignore,
    }
}

fn map_contact_key(key: KeyEvent) -> KeyCommand {
    let action = match key.code {
        KeyCode::Esc => UserAction::CloseContact,
        KeyCode::Enter => UserAction::SubmitContact,
        KeyCode::Tab | KeyCode::Down => UserAction::ContactFocusNext,
        KeyCode::BackTab | KeyCode::Up => UserAction::ContactFocusPrev,
        KeyCode::Backspace => UserAction::ContactBackspace,
        KeyCode::Char(c) => UserAction::ContactInput(c),
        _ => return KeyCommand::Ignore,
    };
    KeyCommand::Dispatch(action)
}

fn map_global_key(key: KeyEvent, state: &SiteState) -> KeyCommand {
    let section = |id: &str| KeyCommand::Dispatch(UserAction::ScrollToSection(id.to_string()));
    let action = match key.code {
        KeyCode::Char('q') => return KeyCommand::Quit,
        KeyCode::Char('j') | KeyCode::Down => return KeyCommand::Scroll(1),
        KeyCode::Char('k') | KeyCode::Up => return KeyCommand::Scroll(-1),
        KeyCode::PageDown => return KeyCommand::Scroll(10),
        KeyCode::PageUp => return KeyCommand::Scroll(-10),

        KeyCode::Char(c @ '1'..='5') => {
            let idx = usize::from(c as u8 - b'1');
            UserAction::Navigate(SCREEN_ORDER[idx])
        }
        KeyCode::Tab => UserAction::NextScreen,
        KeyCode::BackTab => UserAction::PrevScreen,
        KeyCode::Esc | KeyCode::Char('b') => UserAction::Back,

        KeyCode::Char('h') => return section("hero"),
        KeyCode::Char('d') => return section("dashboard"),
        KeyCode::Char('f') => return section("features"),
        KeyCode::Char('p') => return section("pricing"),
        KeyCode::Char('c') => return section("contact"),
        KeyCode::Char('t') => return section("team"),
        KeyCode::Char('D') => return section("docs"),
        KeyCode::Char('T') => return section("terms"),
        KeyCode::Char('P') => return section("privacy"),

        KeyCode::Char('o') => UserAction::SetOrigin(next_country(state.route.origin)),
        KeyCode::Char('O') => UserAction::SetOrigin(prev_country(state.route.origin)),
        KeyCode::Char('n') => UserAction::SetDestination(next_country(state.route.destination)),
        KeyCode::Char('N') => UserAction::SetDestination(prev_country(state.route.destination)),
        KeyCode::Char('x') => UserAction::SwapRoute,

        KeyCode::Char('g') => UserAction::GenerateStrategy,
        KeyCode::Char('m') => UserAction::OpenContact,
        KeyCode::Char('l') => UserAction::RequestRouteProposal,
        KeyCode::Char('w') => UserAction::OpenDirectChat,
        KeyCode::Char('?') => UserAction::ToggleHelp,
        _ => return KeyCommand::Ignore,
    };
    KeyCommand::Dispatch(action)
}

fn map_key(key: KeyEvent, state: &SiteState) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyCommand::Quit;
    }
    match &state.interaction.overlay {
        SiteOverlay::Help => map_help_key(key),
        SiteOverlay::Contact(_) => map_contact_key(key),
        SiteOverlay::None => map_global_key(key, state),
    }
}

fn apply_effects(
    effects: Vec<SiteEffect>,
    view: &mut Viewport,
    client: &Arc<StrategyClient>,
    tx: &mpsc::Sender<UiEvent>,
) {
    for effect in effects {
        match effect {
            SiteEffect::ScrollToTop { smooth } => view.scroll_to(0, smooth),
            SiteEffect::ScrollIntoView { section, smooth } => {
                let line = view.section_offset(section);
                view.scroll_to(line, smooth);
            }
            SiteEffect::AwaitHomeMount { delay_ms } => {
                view.mount_deadline = Some(Instant::now() + Duration::from_millis(delay_ms));
            }
            SiteEffect::RequestStrategy {
                run_id,
                route,
                prompt,
            } => {
                info!(run_id, route = %route.label(), "strategy dispatched to worker");
                let tx = tx.clone();
                spawn_strategy(Arc::clone(client), run_id, prompt, move |run_id, result| {
                    let _ = tx.send(UiEvent::StrategyResolved { run_id, result });
                });
            }
            SiteEffect::RequestFrame | SiteEffect::Notify(_) | SiteEffect::OpenDeepLink(_) => {}
        }
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut controller: SiteController,
    client: Arc<StrategyClient>,
) -> io::Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut view = Viewport::default();
    let started = Instant::now();

    loop {
        while let Ok(event) = rx.try_recv() {
            match event {
                UiEvent::StrategyResolved { run_id, result } => {
                    let effects = controller.dispatch(SiteAction::Runtime(
                        RuntimeAction::StrategyResolved { run_id, result },
                    ));
                    apply_effects(effects, &mut view, &client, &tx);
                }
            }
        }

        if view.mount_due(Instant::now()) {
            let effects = controller.dispatch(SiteAction::Runtime(RuntimeAction::HomeMounted));
            apply_effects(effects, &mut view, &client, &tx);
        }

        view.tick();
        let spinner = spinner_frame(started.elapsed());
        terminal.draw(|f| ui(f, controller.state(), &mut view, spinner, client.provider()))?;

        if event::poll(Duration::from_millis(16))? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match map_key(key, controller.state()) {
                KeyCommand::Quit => return Ok(()),
                KeyCommand::Dispatch(action) => {
                    let effects = controller.user(action);
                    apply_effects(effects, &mut view, &client, &tx);
                }
                KeyCommand::Scroll(delta) => view.scroll_by(delta),
                KeyCommand::Ignore => {}
            }
        }
    }
}

fn spinner_frame(elapsed: Duration) -> &'static str {
    let frames = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let idx = (elapsed.as_millis() / 100) as usize % frames.len();
    frames[idx]
}

fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(MIN_WRAP_WIDTH);
    let mut out = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > width && !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        }
        out.push(line);
    }
    out
}

struct Document {
    lines: Vec<Line<'static>>,
    offsets: [u16; HOME_SECTIONS.len()],
}

impl Document {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            offsets: [0; HOME_SECTIONS.len()],
        }
    }

    fn mark(&mut self, section: HomeSection) {
        if let Some(idx) = HOME_SECTIONS.iter().position(|s| *s == section) {
            self.offsets[idx] = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        }
    }

    fn heading(&mut self, text: &str, palette: UiPalette) {
        self.lines.push(Line::from(Span::styled(
            text.to_uppercase(),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )));
    }

    fn text(&mut self, text: &str, width: usize, style: Style) {
        for line in wrap_text(text, width) {
            self.lines.push(Line::from(Span::styled(line, style)));
        }
    }

    fn spans(&mut self, spans: Vec<Span<'static>>) {
        self.lines.push(Line::from(spans));
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }
}

fn home_document(state: &SiteState, width: usize, palette: UiPalette, spinner: &str) -> Document {
    let mut doc = Document::new();
    let plain = Style::default();
    let muted = Style::default().fg(palette.muted);
    let key = Style::default().fg(palette.accent_alt);

    doc.mark(HomeSection::Hero);
    doc.heading(&state.config.site.brand, palette);
    doc.text(content::TAGLINE, width, Style::default().fg(palette.accent_alt));
    doc.blank();
    for line in content::HERO {
        doc.text(line, width, plain);
    }
    doc.blank();

    doc.mark(HomeSection::Dashboard);
    doc.heading(HomeSection::Dashboard.label(), palette);
    let route = state.route;
    doc.spans(vec![
        Span::styled("Origin       ", muted),
        Span::raw(route.origin.label()),
        Span::styled("   o/O", key),
    ]);
    doc.spans(vec![
        Span::styled("Destination  ", muted),
        Span::raw(route.destination.label()),
        Span::styled("   n/N", key),
    ]);
    doc.spans(vec![
        Span::styled("x", key),
        Span::styled(" swap  ", muted),
        Span::styled("g", key),
        Span::styled(" draft overview  ", muted),
        Span::styled("l", key),
        Span::styled(" ask for a proposal", muted),
    ]);
    doc.blank();
    if state.strategy.busy {
        doc.text(
            &format!("{spinner} drafting an overview for {}", route.label()),
            width,
            Style::default().fg(palette.warning),
        );
        doc.blank();
    }
    match &state.strategy.result {
        Some(result) => {
            if let Some(payload) = &result.payload {
                doc.text("Status", width, Style::default().fg(palette.success));
                for line in payload.lines() {
                    doc.lines
                        .push(Line::from(Span::styled(line.to_string(), muted)));
                }
                doc.blank();
            }
            doc.text(&result.narrative, width, plain);
        }
        None if !state.strategy.busy => {
            doc.text("Press g to draft an overview for this route.", width, muted);
        }
        None => {}
    }
    doc.blank();

    doc.mark(HomeSection::Features);
    doc.heading(HomeSection::Features.label(), palette);
    for (title, body) in content::CAPABILITIES {
        doc.text(&format!("- {title}"), width, Style::default().fg(palette.accent_alt));
        doc.text(body, width, plain);
    }
    doc.blank();

    doc.mark(HomeSection::Pricing);
    doc.heading(HomeSection::Pricing.label(), palette);
    for plan in PRICING_PLANS.iter() {
        doc.spans(vec![
            Span::styled(
                format!("{:<10}", plan.tier.label()),
                Style::default()
                    .fg(palette.accent_alt)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(plan.price_label()),
        ]);
        doc.text(plan.description, width, muted);
        for feature in plan.features {
            doc.text(&format!("  - {feature}"), width, plain);
        }
    }
    doc.blank();

    doc.mark(HomeSection::Contact);
    doc.heading(HomeSection::Contact.label(), palette);
    doc.spans(vec![
        Span::styled("Messaging  ", muted),
        Span::raw(state.config.site.messaging_number.clone()),
    ]);
    doc.spans(vec![
        Span::styled("m", key),
        Span::styled(" consultation form  ", muted),
        Span::styled("w", key),
        Span::styled(" direct chat  ", muted),
        Span::styled("l", key),
        Span::styled(" route proposal", muted),
    ]);
    doc
}

fn screen_document(state: &SiteState, width: usize, palette: UiPalette, spinner: &str) -> Document {
    let screen = state.screen();
    if screen == Screen::Home {
        return home_document(state, width, palette, spinner);
    }
    let mut doc = Document::new();
    doc.heading(screen.label(), palette);
    doc.blank();
    for (title, body) in content::screen_sections(screen) {
        doc.text(
            title,
            width,
            Style::default()
                .fg(palette.accent_alt)
                .add_modifier(Modifier::BOLD),
        );
        doc.text(body, width, Style::default());
        doc.blank();
    }
    doc
}

fn ui(
    f: &mut ratatui::Frame,
    state: &SiteState,
    view: &mut Viewport,
    spinner: &str,
    provider: &str,
) {
    let palette = palette_for(state.strategy.busy);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Tabs
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    let busy = if state.strategy.busy {
        format!("{spinner} drafting")
    } else {
        "idle".to_string()
    };
    let header_text = format!(
        "{} | {} | Route: {} | Provider: {} | {}",
        state.config.site.brand,
        state.screen().label(),
        state.route.label(),
        provider,
        busy
    );
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(palette.accent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border)),
        );
    f.render_widget(header, chunks[0]);

    let titles: Vec<Line> = SCREEN_ORDER
        .iter()
        .enumerate()
        .map(|(idx, screen)| Line::from(format!("{} {}", idx + 1, screen.label())))
        .collect();
    let selected = SCREEN_ORDER
        .iter()
        .position(|screen| *screen == state.screen())
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.border))
                .title("Screens"),
        )
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, chunks[1]);

    let mut main_area = chunks[2];
    if main_area.width >= RAIL_MIN_TOTAL_WIDTH {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(RAIL_WIDTH)])
            .split(chunks[2]);
        main_area = cols[0];
        render_activity_rail(f, cols[1], state, palette);
    }
    render_main(f, main_area, state, view, palette, spinner);

    render_footer(f, chunks[3], palette);

    match &state.interaction.overlay {
        SiteOverlay::Help => render_help(f, palette),
        SiteOverlay::Contact(form) => render_contact(f, form, palette),
        SiteOverlay::None => {}
    }
}

fn render_main(
    f: &mut ratatui::Frame,
    area: Rect,
    state: &SiteState,
    view: &mut Viewport,
    palette: UiPalette,
    spinner: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .style(Style::default().bg(palette.panel_bg))
        .border_style(Style::default().fg(palette.border))
        .title(state.screen().label());
    let inner = block.inner(area);
    let doc = screen_document(state, usize::from(inner.width), palette, spinner);

    let total = u16::try_from(doc.lines.len()).unwrap_or(u16::MAX);
    view.max_scroll = total.saturating_sub(inner.height);
    view.scroll = view.scroll.min(view.max_scroll);
    if state.screen() == Screen::Home {
        view.section_offsets = doc.offsets;
    }

    let paragraph = Paragraph::new(doc.lines)
        .block(block)
        .scroll((view.scroll, 0));
    f.render_widget(paragraph, area);
}

fn render_activity_rail(f: &mut ratatui::Frame, area: Rect, state: &SiteState, palette: UiPalette) {
    let visible = usize::from(area.height.saturating_sub(2));
    let skip = state.activity.len().saturating_sub(visible);
    let items: Vec<ListItem> = state
        .activity
        .iter()
        .skip(skip)
        .map(|entry| {
            let color = match entry.level {
                LogLevel::Debug => palette.muted,
                LogLevel::Info => palette.accent_alt,
                LogLevel::Warn => palette.warning,
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<5} ", entry.level.label()), Style::default().fg(color)),
                Span::raw(entry.message.clone()),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .style(Style::default().bg(palette.panel_bg))
            .title("Activity"),
    );
    f.render_widget(list, area);
}

fn render_footer(f: &mut ratatui::Frame, area: Rect, palette: UiPalette) {
    let hint = |keys: &'static str, label: &'static str| {
        [
            Span::styled(keys, Style::default().fg(palette.accent)),
            Span::styled(label, Style::default().fg(palette.muted)),
        ]
    };
    let mut spans = Vec::new();
    for (keys, label) in [
        ("1-5", " screens "),
        ("h d f p c", " sections "),
        ("g", " overview "),
        ("m", " contact "),
        ("?", " help "),
    ] {
        spans.extend(hint(keys, label));
    }
    spans.push(Span::styled("q", Style::default().fg(palette.warning)));
    spans.push(Span::styled(" quit", Style::default().fg(palette.muted)));
    f.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

fn render_help(f: &mut ratatui::Frame, palette: UiPalette) {
    let area = centered_rect(60, 70, f.area());
    let items: Vec<ListItem> = KEY_HINTS
        .iter()
        .map(|hint| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<16}", hint.keys),
                    Style::default().fg(palette.accent),
                ),
                Span::raw(hint.label),
            ]))
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .title("Keys (Esc to close)"),
    );
    f.render_widget(Clear, area);
    f.render_widget(list, area);
}

fn render_contact(f: &mut ratatui::Frame, form: &ContactForm, palette: UiPalette) {
    let area = centered_rect(70, 70, f.area());
    let muted = Style::default().fg(palette.muted);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Route  ", muted),
            Span::raw(form.route.label()),
        ]),
        Line::default(),
    ];

    for field in [
        ContactField::Name,
        ContactField::Email,
        ContactField::Phone,
        ContactField::Note,
    ] {
        let focused = form.focus == field;
        let value = match field {
            ContactField::Name => form.name.as_str(),
            ContactField::Email => form.email.as_str(),
            ContactField::Phone => form.phone.as_str(),
            _ => form.note.as_str(),
        };
        let style = if focused {
            Style::default()
                .fg(palette.accent)
                .bg(palette.selected_bg)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(if focused { "> " } else { "  " }, style),
            Span::styled(format!("{:<14}", field.label()), muted),
            Span::styled(value.to_string(), style),
            Span::styled(if focused { "_" } else { "" }, style),
        ]));
    }

    let acceptance_focused = form.focus == ContactField::Acceptance;
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::raw(if acceptance_focused { "> " } else { "  " }),
        Span::styled(
            if form.accepted { "[x] " } else { "[ ] " },
            Style::default().fg(if form.accepted {
                palette.success
            } else {
                palette.warning
            }),
        ),
        Span::raw("I have read and accept the Terms and Conditions"),
    ]));
    lines.push(Line::default());

    if form.can_submit() {
        lines.push(Line::from(Span::styled(
            "Enter  send through the messaging app",
            Style::default()
                .fg(palette.success)
                .add_modifier(Modifier::BOLD),
        )));
    } else {
        let mut pending: Vec<&str> = form
            .missing_fields()
            .into_iter()
            .map(ContactField::label)
            .collect();
        if !form.accepted {
            pending.push("accept the terms");
        }
        lines.push(Line::from(Span::styled(
            format!("Enter  send (still needed: {})", pending.join(", ")),
            muted,
        )));
    }
    lines.push(Line::from(Span::styled(
        "Tab next field  Shift+Tab previous  Space toggles the checkbox  Esc cancel",
        muted,
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent))
            .style(Style::default().bg(palette.panel_bg))
            .title("Consultation request"),
    );
    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
