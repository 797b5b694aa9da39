use std::collections::VecDeque;

use tracing::info;
use tracing::warn;
use visadesk_core::contact::DeepLink;
use visadesk_core::reduce;
use visadesk_core::RuntimeAction;
use visadesk_core::SiteAction;
use visadesk_core::SiteEffect;
use visadesk_core::SiteState;
use visadesk_core::UserAction;
use visadesk_core::state::LogEntry;
use visadesk_core::state::LogLevel;

use crate::client::StrategyClient;
use crate::contracts::notify;
use crate::contracts::MessagingLink;
use crate::contracts::Notifier;

/// Owns the site state and performs the effects that need no scheduling:
/// sound cues and messaging hand-offs. Everything else is returned to the host.
pub struct SiteController {
    state: SiteState,
    notifier: Box<dyn Notifier>,
    links: Box<dyn MessagingLink>,
}

impl SiteController {
    pub fn new(
        state: SiteState,
        notifier: Box<dyn Notifier>,
        links: Box<dyn MessagingLink>,
    ) -> Self {
        Self {
            state,
            notifier,
            links,
        }
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    pub fn dispatch(&mut self, action: SiteAction) -> Vec<SiteEffect> {
        let effects = reduce(&mut self.state, action);
        let mut deferred = Vec::with_capacity(effects.len());
        for effect in effects {
            match effect {
                SiteEffect::Notify(cue) => notify(self.notifier.as_ref(), cue),
                SiteEffect::OpenDeepLink(link) => self.open_link(&link),
                other => deferred.push(other),
            }
        }
        deferred
    }

    pub fn user(&mut self, action: UserAction) -> Vec<SiteEffect> {
        self.dispatch(SiteAction::User(action))
    }

    /// Resolves host effects inline: strategies run on the calling thread and
    /// Home counts as mounted immediately. Scrolling and frames are no-ops here.
    pub fn settle(&mut self, client: &StrategyClient, effects: Vec<SiteEffect>) {
        let mut queue: VecDeque<SiteEffect> = effects.into();
        while let Some(effect) = queue.pop_front() {
            let follow_up = match effect {
                SiteEffect::RequestStrategy { run_id, prompt, .. } => {
                    let result = client.complete(&prompt);
                    self.dispatch(SiteAction::Runtime(RuntimeAction::StrategyResolved {
                        run_id,
                        result,
                    }))
                }
                SiteEffect::AwaitHomeMount { .. } => {
                    self.dispatch(SiteAction::Runtime(RuntimeAction::HomeMounted))
                }
                _ => Vec::new(),
            };
            queue.extend(follow_up);
        }
    }

    fn open_link(&mut self, link: &DeepLink) {
        match self.links.open(link) {
            Ok(()) => info!(recipient = %link.recipient, "messaging link handed off"),
            Err(err) => {
                warn!(error = %err, "could not open messaging link");
                let entry = LogEntry::new(
                    LogLevel::Warn,
                    format!("could not open messaging link: {err}"),
                );
                reduce(
                    &mut self.state,
                    SiteAction::Runtime(RuntimeAction::AppendLog(entry)),
                );
            }
        }
    }
}
