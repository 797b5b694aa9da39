#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Click,
    Success,
    Transition,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteEffect {
    Notify(SoundCue),
    ScrollToTop {
        smooth: bool,
    },
    ScrollIntoView {
        section: HomeSection,
        smooth: bool,
    },
    AwaitHomeMount {
        delay_ms: u64,
    },
    RequestStrategy {
        run_id: u64,
        route: RouteSelection,
        prompt: String,
    },
    OpenDeepLink(DeepLink),
    RequestFrame,
}

use super::actions::RuntimeAction;
use super::actions::SiteAction;
use super::actions::UserAction;
use super::contact::route_proposal_message;
use super::contact::ContactField;
use super::contact::ContactForm;
use super::contact::DeepLink;
use super::state::HomeSection;
use super::state::LogEntry;
use super::state::LogLevel;
use super::state::RouteSelection;
use super::state::Screen;
use super::state::SiteOverlay;
use super::state::SiteState;
use super::strategy::build_prompt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTarget {
    Screen(Screen),
    Section(HomeSection),
    Unknown,
}

/// Resolves a free-form section id. Ids that name a whole screen win over
/// Home sections, except `features`, which only aliases its screen when the
/// site is configured with a standalone features screen.
pub fn resolve_section_target(id: &str, features_screen: bool) -> SectionTarget {
    match Screen::from_id(id) {
        Some(Screen::Features) if !features_screen => {}
        Some(screen) => return SectionTarget::Screen(screen),
        None => {}
    }
    match HomeSection::from_id(id) {
        Some(section) => SectionTarget::Section(section),
        None => SectionTarget::Unknown,
    }
}

pub fn reduce(state: &mut SiteState, action: SiteAction) -> Vec<SiteEffect> {
    match action {
        SiteAction::User(user) => reduce_user(state, user),
        SiteAction::Runtime(runtime) => reduce_runtime(state, runtime),
    }
}

fn reduce_user(state: &mut SiteState, action: UserAction) -> Vec<SiteEffect> {
    match action {
        UserAction::Navigate(screen) => navigate(state, screen),
        UserAction::NextScreen => {
            let next = state.routing.screen.next();
            navigate(state, next)
        }
        UserAction::PrevScreen => {
            let prev = state.routing.screen.prev();
            navigate(state, prev)
        }
        UserAction::Back => navigate(state, Screen::Home),
        UserAction::ScrollToSection(id) => scroll_to_section(state, &id),

        UserAction::SetOrigin(country) => {
            state.route.origin = country;
            vec![SiteEffect::Notify(SoundCue::Click), SiteEffect::RequestFrame]
        }
        UserAction::SetDestination(country) => {
            state.route.destination = country;
            vec![SiteEffect::Notify(SoundCue::Click), SiteEffect::RequestFrame]
        }
        UserAction::SwapRoute => {
            let route = state.route;
            state.route = RouteSelection::new(route.destination, route.origin);
            vec![SiteEffect::Notify(SoundCue::Click), SiteEffect::RequestFrame]
        }

        UserAction::GenerateStrategy => {
            let run_id = state.strategy.active_run_id.saturating_add(1);
            state.strategy.active_run_id = run_id;
            state.strategy.busy = true;
            let route = state.route;
            log(
                state,
                LogLevel::Info,
                format!("strategy #{run_id} requested for {}", route.label()),
            );
            vec![
                SiteEffect::Notify(SoundCue::Transition),
                SiteEffect::RequestStrategy {
                    run_id,
                    route,
                    prompt: build_prompt(&route),
                },
                SiteEffect::RequestFrame,
            ]
        }

        UserAction::OpenContact => {
            state.interaction.overlay = SiteOverlay::Contact(ContactForm::new(state.route));
            vec![SiteEffect::Notify(SoundCue::Click), SiteEffect::RequestFrame]
        }
        UserAction::CloseContact => {
            if !matches!(state.interaction.overlay, SiteOverlay::Contact(_)) {
                return Vec::new();
            }
            state.interaction.overlay = SiteOverlay::None;
            vec![SiteEffect::Notify(SoundCue::Click), SiteEffect::RequestFrame]
        }
        UserAction::ContactInput(ch) => {
            let Some(form) = contact_form_mut(state) else {
                return Vec::new();
            };
            match form.focus {
                ContactField::Acceptance => {
                    if ch == ' ' {
                        form.accepted = !form.accepted;
                    }
                }
                focus => {
                    if let Some(value) = form.field_mut(focus) {
                        value.push(ch);
                    }
                }
            }
            vec![SiteEffect::RequestFrame]
        }
        UserAction::ContactBackspace => {
            let Some(form) = contact_form_mut(state) else {
                return Vec::new();
            };
            let focus = form.focus;
            if let Some(value) = form.field_mut(focus) {
                value.pop();
            }
            vec![SiteEffect::RequestFrame]
        }
        UserAction::ContactFocusNext => {
            let Some(form) = contact_form_mut(state) else {
                return Vec::new();
            };
            form.focus = form.focus.next();
            vec![SiteEffect::RequestFrame]
        }
        UserAction::ContactFocusPrev => {
            let Some(form) = contact_form_mut(state) else {
                return Vec::new();
            };
            form.focus = form.focus.prev();
            vec![SiteEffect::RequestFrame]
        }
        UserAction::ToggleAcceptance => {
            let Some(form) = contact_form_mut(state) else {
                return Vec::new();
            };
            form.accepted = !form.accepted;
            vec![SiteEffect::Notify(SoundCue::Click), SiteEffect::RequestFrame]
        }
        UserAction::SetContactField { field, value } => {
            let Some(form) = contact_form_mut(state) else {
                return Vec::new();
            };
            match form.field_mut(field) {
                Some(slot) => *slot = value,
                None => form.accepted = matches!(value.trim(), "true" | "yes" | "1"),
            }
            vec![SiteEffect::RequestFrame]
        }
        UserAction::SubmitContact => submit_contact(state),

        UserAction::OpenDirectChat => {
            let link = DeepLink::new(&state.config.site.messaging_number, None);
            vec![SiteEffect::Notify(SoundCue::Click), SiteEffect::OpenDeepLink(link)]
        }
        UserAction::RequestRouteProposal => {
            let text = route_proposal_message(&state.route, &state.config.site.brand);
            let link = DeepLink::new(&state.config.site.messaging_number, Some(&text));
            let message = format!("route proposal requested for {}", state.route.label());
            log(state, LogLevel::Info, message);
            vec![SiteEffect::Notify(SoundCue::Click), SiteEffect::OpenDeepLink(link)]
        }

        UserAction::ToggleHelp => {
            state.interaction.overlay = match state.interaction.overlay {
                SiteOverlay::Help => SiteOverlay::None,
                // the contact modal keeps its input until explicitly closed
                SiteOverlay::Contact(_) => return Vec::new(),
                SiteOverlay::None => SiteOverlay::Help,
            };
            vec![SiteEffect::RequestFrame]
        }
        UserAction::CloseOverlay => {
            if matches!(state.interaction.overlay, SiteOverlay::Contact(_)) {
                return reduce_user(state, UserAction::CloseContact);
            }
            state.interaction.overlay = SiteOverlay::None;
            vec![SiteEffect::RequestFrame]
        }
    }
}

fn reduce_runtime(state: &mut SiteState, action: RuntimeAction) -> Vec<SiteEffect> {
    match action {
        RuntimeAction::HomeMounted => {
            if state.routing.screen != Screen::Home {
                state.routing.pending_section = None;
                return Vec::new();
            }
            let Some(section) = state.routing.pending_section.take() else {
                return Vec::new();
            };
            state.routing.section = Some(section);
            vec![
                SiteEffect::ScrollIntoView {
                    section,
                    smooth: state.config.site.scroll.is_smooth(),
                },
                SiteEffect::RequestFrame,
            ]
        }
        RuntimeAction::StrategyResolved { run_id, result } => {
            let active = state.strategy.active_run_id;
            if run_id != active {
                log(
                    state,
                    LogLevel::Debug,
                    format!("ignored stale strategy #{run_id} (active #{active})"),
                );
                return Vec::new();
            }
            let structured = if result.payload.is_some() {
                "with status block"
            } else {
                "narrative only"
            };
            log(
                state,
                LogLevel::Info,
                format!("strategy #{run_id} ready ({structured})"),
            );
            state.strategy.result = Some(result);
            state.strategy.busy = false;
            vec![SiteEffect::Notify(SoundCue::Success), SiteEffect::RequestFrame]
        }
        RuntimeAction::AppendLog(entry) => {
            state.activity.append(entry);
            vec![SiteEffect::RequestFrame]
        }
        RuntimeAction::ClearLogs => {
            state.activity.clear();
            vec![SiteEffect::RequestFrame]
        }
    }
}

fn navigate(state: &mut SiteState, screen: Screen) -> Vec<SiteEffect> {
    let changed = state.routing.screen != screen;
    state.routing.screen = screen;
    let mut effects = vec![SiteEffect::Notify(SoundCue::Transition)];
    if changed {
        state.routing.section = None;
        state.routing.pending_section = None;
        effects.push(SiteEffect::ScrollToTop {
            smooth: state.config.site.scroll.is_smooth(),
        });
        log(
            state,
            LogLevel::Debug,
            format!("screen -> {}", screen.label()),
        );
    }
    effects.push(SiteEffect::RequestFrame);
    effects
}

fn scroll_to_section(state: &mut SiteState, id: &str) -> Vec<SiteEffect> {
    let target = resolve_section_target(id, state.config.site.features_screen);
    if let SectionTarget::Screen(screen) = target {
        return navigate(state, screen);
    }
    let section = match target {
        SectionTarget::Section(section) => Some(section),
        _ => None,
    };

    if state.routing.screen != Screen::Home {
        let mut effects = navigate(state, Screen::Home);
        if section.is_some() {
            state.routing.pending_section = section;
            effects.push(SiteEffect::AwaitHomeMount {
                delay_ms: state.config.site.effective_mount_delay_ms(),
            });
        }
        return effects;
    }

    let Some(section) = section else {
        log(
            state,
            LogLevel::Debug,
            format!("no section named {id:?} on home"),
        );
        return Vec::new();
    };
    state.routing.section = Some(section);
    vec![
        SiteEffect::ScrollIntoView {
            section,
            smooth: state.config.site.scroll.is_smooth(),
        },
        SiteEffect::RequestFrame,
    ]
}

fn submit_contact(state: &mut SiteState) -> Vec<SiteEffect> {
    let Some(form) = state.contact_form() else {
        return Vec::new();
    };
    // submit stays unavailable until the form validates
    let Ok(request) = form.to_request() else {
        return Vec::new();
    };
    let message = request.compose_message(&state.config.site.brand);
    let link = DeepLink::new(&state.config.site.messaging_number, Some(&message));
    state.interaction.overlay = SiteOverlay::None;
    log(
        state,
        LogLevel::Info,
        format!(
            "consultation request sent for {} -> {}",
            request.origin, request.destination
        ),
    );
    vec![
        SiteEffect::Notify(SoundCue::Success),
        SiteEffect::OpenDeepLink(link),
        SiteEffect::RequestFrame,
    ]
}

fn contact_form_mut(state: &mut SiteState) -> Option<&mut ContactForm> {
    match &mut state.interaction.overlay {
        SiteOverlay::Contact(form) => Some(form),
        _ => None,
    }
}

fn log(state: &mut SiteState, level: LogLevel, message: String) {
    state.activity.append(LogEntry::new(level, message));
}

#[cfg(test)]
mod tests;
