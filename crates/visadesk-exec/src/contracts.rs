use visadesk_core::contact::DeepLink;
use visadesk_core::SoundCue;

use crate::error::GenerationError;
use crate::error::LinkError;

/// Produces free text for a prompt. Implementations block the calling thread.
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate(&self, prompt: &str, temperature: f32) -> Result<String, GenerationError>;
}

/// Hands a deep link to whatever messaging client the platform provides.
pub trait MessagingLink: Send {
    fn open(&self, link: &DeepLink) -> Result<(), LinkError>;
}

pub trait Notifier: Send {
    fn on_click(&self);
    fn on_success(&self);
    fn on_transition(&self);
}

pub fn notify(notifier: &dyn Notifier, cue: SoundCue) {
    match cue {
        SoundCue::Click => notifier.on_click(),
        SoundCue::Success => notifier.on_success(),
        SoundCue::Transition => notifier.on_transition(),
    }
}
