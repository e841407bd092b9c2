//! In-memory session state for the chat REPL
//!
//! Holds the logged-in profile, the active language, and the running
//! conversation. Nothing here touches disk: the conversation is gone
//! when the process exits, only workout history entries are persisted
//! through the store.

use crate::chat::ChatMessage;
use crate::i18n::Language;
use crate::store::UserProfile;

/// Conversation kept to this many messages (excluding the system
/// prompt) so long sessions don't grow the request without bound.
const MAX_HISTORY: usize = 40;

#[derive(Debug, Default)]
pub struct Session {
    pub language: Language,
    profile: Option<UserProfile>,
    messages: Vec<ChatMessage>,
}

impl Session {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            profile: None,
            messages: Vec::new(),
        }
    }

    /// Attach a logged-in profile, adopting its stored language
    /// preference.
    pub fn login(&mut self, profile: UserProfile) {
        self.language = Language::from_label(&profile.preferences.language);
        self.profile = Some(profile);
        self.messages.clear();
    }

    /// Drop the profile and the conversation.
    pub fn logout(&mut self) {
        self.profile = None;
        self.messages.clear();
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.profile.is_some()
    }

    /// Replace the profile after a store update so prompt builders see
    /// fresh values.
    pub fn refresh_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    /// Switching language starts a fresh conversation; mixing system
    /// prompts mid-thread confuses the model.
    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.messages.clear();
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
        self.trim();
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
        self.trim();
    }

    pub fn clear_history(&mut self) {
        self.messages.clear();
    }

    fn trim(&mut self) {
        if self.messages.len() > MAX_HISTORY {
            let excess = self.messages.len() - MAX_HISTORY;
            self.messages.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_adopts_stored_language() {
        let mut session = Session::new(Language::English);
        let mut profile = UserProfile::default();
        profile.preferences.language = "Korean".to_string();
        session.login(profile);
        assert_eq!(session.language, Language::Korean);
        assert!(session.is_logged_in());
    }

    #[test]
    fn test_logout_clears_conversation() {
        let mut session = Session::new(Language::English);
        session.login(UserProfile::default());
        session.push_user("hello");
        session.push_assistant("hi");
        session.logout();
        assert!(session.messages().is_empty());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn test_language_switch_resets_history() {
        let mut session = Session::new(Language::English);
        session.push_user("make me a plan");
        session.set_language(Language::Spanish);
        assert!(session.messages().is_empty());

        // same language is a no-op
        session.push_user("otra vez");
        session.set_language(Language::Spanish);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut session = Session::new(Language::English);
        for i in 0..60 {
            session.push_user(format!("message {i}"));
        }
        assert_eq!(session.messages().len(), MAX_HISTORY);
        // oldest messages dropped first
        assert_eq!(session.messages()[0].content, "message 20");
    }
}
