use super::*;
use pretty_assertions::assert_eq;

fn open_filled_contact(state: &mut SiteState) {
    user(state, UserAction::OpenContact);
    type_into(state, "Jane");
    user(state, UserAction::ContactFocusNext);
    type_into(state, "jane@x.com");
    user(state, UserAction::ContactFocusNext);
    type_into(state, "+1555");
}

fn opened_link(effects: &[SiteEffect]) -> Option<String> {
    effects.iter().find_map(|effect| match effect {
        SiteEffect::OpenDeepLink(link) => Some(link.url()),
        _ => None,
    })
}

#[test]
fn opening_snapshots_the_route_and_starts_empty() {
    let mut state = state();
    user(&mut state, UserAction::SetOrigin(country("India")));
    user(&mut state, UserAction::OpenContact);

    let form = state.contact_form().expect("contact overlay");
    assert_eq!(form.route.origin.name, "India");
    assert!(form.name.is_empty());
    assert!(!form.accepted);
    assert_eq!(form.focus, ContactField::Name);
}

#[test]
fn snapshot_ignores_route_changes_while_open_but_not_between_opens() {
    let mut state = state();
    user(&mut state, UserAction::OpenContact);
    user(&mut state, UserAction::SetDestination(country("Spain")));
    assert_eq!(
        state.contact_form().map(|f| f.route.destination.name),
        Some("United States")
    );

    user(&mut state, UserAction::CloseContact);
    user(&mut state, UserAction::OpenContact);
    assert_eq!(
        state.contact_form().map(|f| f.route.destination.name),
        Some("Spain")
    );
}

#[test]
fn reopening_discards_abandoned_input() {
    let mut state = state();
    open_filled_contact(&mut state);
    user(&mut state, UserAction::CloseContact);
    user(&mut state, UserAction::OpenContact);

    let form = state.contact_form().expect("contact overlay");
    assert!(form.name.is_empty());
    assert!(form.email.is_empty());
    assert!(form.phone.is_empty());
}

#[test]
fn submit_is_unavailable_without_acceptance() {
    let mut state = state();
    open_filled_contact(&mut state);
    user(&mut state, UserAction::ContactFocusNext);
    type_into(&mut state, "complete in every other way");

    let effects = user(&mut state, UserAction::SubmitContact);
    assert!(effects.is_empty());
    assert!(matches!(state.interaction.overlay, SiteOverlay::Contact(_)));
}

#[test]
fn submit_is_unavailable_with_blank_required_fields() {
    let mut state = state();
    user(&mut state, UserAction::OpenContact);
    user(&mut state, UserAction::ToggleAcceptance);
    assert!(user(&mut state, UserAction::SubmitContact).is_empty());
}

#[test]
fn valid_submit_hands_off_message_and_closes_modal() {
    let mut state = state();
    user(&mut state, UserAction::SetOrigin(country("Bangladesh")));
    user(&mut state, UserAction::SetDestination(country("United Arab Emirates")));
    open_filled_contact(&mut state);
    user(&mut state, UserAction::ToggleAcceptance);

    let effects = user(&mut state, UserAction::SubmitContact);
    let url = opened_link(&effects).expect("deep link");

    assert!(url.starts_with("https://wa.me/15550100199?text="));
    for needle in ["Bangladesh", "United%20Arab%20Emirates", "Jane", "jane%40x.com", "%2B1555"] {
        assert!(url.contains(needle), "missing {needle} in {url}");
    }
    assert!(url.contains("No%20additional%20notes."));
    assert_eq!(sound_cues(&effects), vec![SoundCue::Success]);
    assert!(matches!(state.interaction.overlay, SiteOverlay::None));
}

#[test]
fn space_on_acceptance_field_toggles_it() {
    let mut state = state();
    user(&mut state, UserAction::OpenContact);
    user(&mut state, UserAction::ContactFocusPrev);
    assert_eq!(
        state.contact_form().map(|f| f.focus),
        Some(ContactField::Acceptance)
    );
    user(&mut state, UserAction::ContactInput(' '));
    assert_eq!(state.contact_form().map(|f| f.accepted), Some(true));
}

#[test]
fn set_contact_field_fills_values_programmatically() {
    let mut state = state();
    user(&mut state, UserAction::OpenContact);
    for (field, value) in [
        (ContactField::Name, "Jane"),
        (ContactField::Email, "jane@x.com"),
        (ContactField::Phone, "+1555"),
        (ContactField::Acceptance, "true"),
    ] {
        user(
            &mut state,
            UserAction::SetContactField {
                field,
                value: value.to_string(),
            },
        );
    }
    assert!(state.contact_form().is_some_and(|f| f.can_submit()));
}

#[test]
fn backspace_edits_the_focused_field() {
    let mut state = state();
    user(&mut state, UserAction::OpenContact);
    type_into(&mut state, "Janex");
    user(&mut state, UserAction::ContactBackspace);
    assert_eq!(state.contact_form().map(|f| f.name.as_str()), Some("Jane"));
}

#[test]
fn contact_edits_without_modal_are_ignored() {
    let mut state = state();
    assert!(user(&mut state, UserAction::ContactInput('a')).is_empty());
    assert!(user(&mut state, UserAction::SubmitContact).is_empty());
    assert!(user(&mut state, UserAction::CloseContact).is_empty());
}

#[test]
fn route_proposal_and_direct_chat_open_links() {
    let mut state = state();
    let effects = user(&mut state, UserAction::RequestRouteProposal);
    let url = opened_link(&effects).expect("proposal link");
    assert!(url.contains("Bangladesh%20to%20United%20States"));

    let effects = user(&mut state, UserAction::OpenDirectChat);
    assert_eq!(
        opened_link(&effects).as_deref(),
        Some("https://wa.me/15550100199")
    );
}

#[test]
fn help_does_not_replace_an_open_contact_form() {
    let mut state = state();
    user(&mut state, UserAction::OpenContact);
    assert!(user(&mut state, UserAction::ToggleHelp).is_empty());
    assert!(matches!(state.interaction.overlay, SiteOverlay::Contact(_)));

    user(&mut state, UserAction::CloseOverlay);
    user(&mut state, UserAction::ToggleHelp);
    assert!(matches!(state.interaction.overlay, SiteOverlay::Help));
}
