use pretty_assertions::assert_eq;

pub(super) use super::reduce;
pub(super) use super::resolve_section_target;
pub(super) use super::SectionTarget;
pub(super) use super::SiteEffect;
pub(super) use super::SoundCue;
pub(super) use crate::actions::RuntimeAction;
pub(super) use crate::actions::SiteAction;
pub(super) use crate::actions::UserAction;
pub(super) use crate::catalog::find_country;
pub(super) use crate::catalog::COUNTRIES;
pub(super) use crate::config::Config;
pub(super) use crate::contact::ContactField;
pub(super) use crate::state::HomeSection;
pub(super) use crate::state::LogLevel;
pub(super) use crate::state::RouteSelection;
pub(super) use crate::state::Screen;
pub(super) use crate::state::SiteOverlay;
pub(super) use crate::state::SiteState;
pub(super) use crate::state::StrategyResult;
pub(super) use crate::state::SCREEN_ORDER;

mod activity_log;
mod contact_flow;

fn state() -> SiteState {
    SiteState::new(Config::default())
}

fn state_with(configure: impl FnOnce(&mut Config)) -> SiteState {
    let mut config = Config::default();
    configure(&mut config);
    SiteState::new(config)
}

fn user(state: &mut SiteState, action: UserAction) -> Vec<SiteEffect> {
    reduce(state, SiteAction::User(action))
}

fn runtime(state: &mut SiteState, action: RuntimeAction) -> Vec<SiteEffect> {
    reduce(state, SiteAction::Runtime(action))
}

fn country(query: &str) -> &'static crate::catalog::Country {
    find_country(query).unwrap_or_else(|| panic!("{query} is not in the catalog"))
}

fn sound_cues(effects: &[SiteEffect]) -> Vec<SoundCue> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            SiteEffect::Notify(cue) => Some(*cue),
            _ => None,
        })
        .collect()
}

fn type_into(state: &mut SiteState, text: &str) {
    for ch in text.chars() {
        user(state, UserAction::ContactInput(ch));
    }
}

fn assert_single_screen(state: &SiteState) {
    let matches = SCREEN_ORDER
        .iter()
        .filter(|screen| **screen == state.routing.screen)
        .count();
    assert_eq!(matches, 1);
}
