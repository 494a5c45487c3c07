//! Keyword response dispatch

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use super::rules::{Rule, Topic, FALLBACK_RESPONSES, RULES};

/// Maps free text to a canned reply
///
/// Stateless apart from the random source used to pick a fallback reply.
/// Safe to share across tasks.
pub struct ResponseDispatcher {
    rules: &'static [Rule],
    rng: Mutex<StdRng>,
}

impl ResponseDispatcher {
    /// Create a dispatcher whose fallback choice is seeded from the OS
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a dispatcher with a reproducible fallback sequence
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rules: &RULES,
            rng: Mutex::new(rng),
        }
    }

    /// The rule table in evaluation order
    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// The answering rule together with the keyword that selected it
    pub fn matched(&self, input: &str) -> Option<(&'static Rule, &'static str)> {
        let normalized = input.to_lowercase();
        self.rules
            .iter()
            .find_map(|rule| rule.matched_keyword(&normalized).map(|keyword| (rule, keyword)))
    }

    /// The rule that answers `input`, or `None` when the fallback applies
    pub fn find_rule(&self, input: &str) -> Option<&'static Rule> {
        self.matched(input).map(|(rule, _)| rule)
    }

    /// The topic that answers `input`, or `None` when the fallback applies
    pub fn classify(&self, input: &str) -> Option<Topic> {
        self.find_rule(input).map(|rule| rule.topic)
    }

    /// Produce the reply for one user input
    ///
    /// Callers must not pass empty or whitespace-only text; such input is
    /// never submitted.
    pub fn dispatch(&self, input: &str) -> String {
        match self.matched(input) {
            Some((rule, keyword)) => {
                debug!(topic = %rule.topic, keyword, "Matched keyword rule");
                rule.response.to_string()
            }
            None => {
                let reply = self.fallback();
                debug!("No keyword rule matched, using fallback reply");
                reply.to_string()
            }
        }
    }

    fn fallback(&self) -> &'static str {
        let mut rng = self.rng.lock();
        FALLBACK_RESPONSES
            .choose(&mut *rng)
            .copied()
            .unwrap_or(FALLBACK_RESPONSES[0])
    }
}

impl Default for ResponseDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ResponseDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseDispatcher")
            .field("rules", &self.rules.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn response_for(topic: Topic) -> &'static str {
        RULES.iter().find(|r| r.topic == topic).unwrap().response
    }

    #[test]
    fn test_every_input_gets_a_reply() {
        let dispatcher = ResponseDispatcher::with_seed(7);
        for input in ["register", "x", "?", "xyzzy", "🤖", "help me", "HEY"] {
            assert!(!dispatcher.dispatch(input).is_empty(), "empty reply for {input:?}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        let dispatcher = ResponseDispatcher::with_seed(1);
        assert_eq!(dispatcher.dispatch("REGISTER"), dispatcher.dispatch("register"));
        assert_eq!(dispatcher.dispatch("Sign In"), response_for(Topic::Login));
    }

    #[test]
    fn test_general_help_shadows_support() {
        let dispatcher = ResponseDispatcher::with_seed(1);
        assert_eq!(dispatcher.dispatch("I need help"), response_for(Topic::GeneralHelp));
        assert_eq!(dispatcher.classify("help"), Some(Topic::GeneralHelp));
    }

    #[test]
    fn test_support_reachable_without_help() {
        let dispatcher = ResponseDispatcher::with_seed(1);
        assert_eq!(dispatcher.classify("contact us"), Some(Topic::Support));
        assert_eq!(dispatcher.dispatch("support"), response_for(Topic::Support));
    }

    #[test]
    fn test_substring_matching() {
        let dispatcher = ResponseDispatcher::with_seed(1);
        assert_eq!(dispatcher.classify("unregistered"), Some(Topic::Registration));
        assert_eq!(dispatcher.classify("i want to sign up"), Some(Topic::Registration));
        assert_eq!(dispatcher.classify("application form"), Some(Topic::JobApplication));
        // "this" contains "hi"
        assert_eq!(dispatcher.classify("this"), Some(Topic::Greeting));
    }

    #[test]
    fn test_first_match_wins() {
        let dispatcher = ResponseDispatcher::with_seed(1);
        // mentions both registration and login
        assert_eq!(
            dispatcher.classify("register then login"),
            Some(Topic::Registration)
        );
        // profile is evaluated before job posting
        assert_eq!(dispatcher.classify("update profile"), Some(Topic::Profile));
        assert_eq!(dispatcher.classify("company profile"), Some(Topic::Profile));
        // "how do i apply" hits job application before general help
        assert_eq!(dispatcher.classify("how do i apply"), Some(Topic::JobApplication));
    }

    #[test]
    fn test_matched_reports_keyword() {
        let dispatcher = ResponseDispatcher::with_seed(1);
        let (rule, keyword) = dispatcher.matched("Where do I SIGN IN?").unwrap();
        assert_eq!(rule.topic, Topic::Login);
        assert_eq!(keyword, "sign in");

        let (rule, keyword) = dispatcher.matched("I need help").unwrap();
        assert_eq!((rule.topic, keyword), (Topic::GeneralHelp, "help"));
        assert!(dispatcher.matched("xyzzy").is_none());
    }

    #[test]
    fn test_no_trimming_or_tokenizing() {
        let dispatcher = ResponseDispatcher::with_seed(1);
        assert_eq!(dispatcher.classify("sign-up"), None);
        assert_eq!(dispatcher.classify("  LOGIN!!  "), Some(Topic::Login));
    }

    #[test]
    fn test_fallback_only_returns_stock_replies() {
        let dispatcher = ResponseDispatcher::new();
        let allowed: HashSet<&str> = FALLBACK_RESPONSES.iter().copied().collect();
        let mut seen = HashSet::new();

        for _ in 0..500 {
            let reply = dispatcher.dispatch("xyzzy");
            assert!(allowed.contains(reply.as_str()), "unexpected reply: {reply}");
            seen.insert(reply);
        }

        assert_eq!(seen.len(), FALLBACK_RESPONSES.len());
    }

    #[test]
    fn test_seeded_fallback_is_reproducible() {
        let a = ResponseDispatcher::with_seed(42);
        let b = ResponseDispatcher::with_seed(42);
        let first: Vec<String> = (0..10).map(|_| a.dispatch("xyzzy")).collect();
        let second: Vec<String> = (0..10).map(|_| b.dispatch("xyzzy")).collect();
        assert_eq!(first, second);
    }
}
