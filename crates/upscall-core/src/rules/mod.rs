//! Intent classification.
//!
//! [`RULES`] is an ordered table of predicate/responder pairs. Input is
//! lower-cased and checked against each rule in turn; the first match answers
//! and nothing after it is consulted. Input no rule claims goes to
//! [`FALLBACK`], so classification always yields a reply.

pub(crate) mod patterns;

use crate::random::RandomSource;
use crate::responder::{self, Turn};
use crate::session::Session;
use patterns::*;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Which rule answered a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    BusinessIntro,
    Greeting,
    Packages,
    Services,
    Process,
    Results,
    Contact,
    About,
    Contract,
    Custom,
    Budget,
    Differentiation,
    Skepticism,
    Gratitude,
    Farewell,
    Industry,
    Affirmative,
    Negative,
    Fallback,
}

/// One entry of the rule table.
pub struct Rule {
    pub intent: Intent,
    /// Tested against the lower-cased message and the current session.
    matches: fn(&str, &Session) -> bool,
    respond: fn(&mut Turn<'_>) -> String,
}

impl Rule {
    pub fn matches(&self, lower: &str, session: &Session) -> bool {
        (self.matches)(lower, session)
    }
}

/// Messages are only read as a business description this early on.
const BUSINESS_WINDOW: u32 = 3;
/// Shorter messages are never read as a business description.
const BUSINESS_MIN_CHARS: usize = 10;

fn describes_business(lower: &str, session: &Session) -> bool {
    session.user_business().is_none()
        && session.message_count() <= BUSINESS_WINDOW
        && !session.asked_about_business()
        && lower.chars().count() > BUSINESS_MIN_CHARS
        && !BUSINESS_EXCLUSION.is_match(lower)
}

macro_rules! keyword_rule {
    ($intent:ident, $pattern:ident, $respond:path) => {
        Rule {
            intent: Intent::$intent,
            matches: |lower, _| $pattern.is_match(lower),
            respond: $respond,
        }
    };
}

/// The rule table, highest priority first.
pub static RULES: [Rule; 18] = [
    Rule {
        intent: Intent::BusinessIntro,
        matches: describes_business,
        respond: responder::business_intro,
    },
    keyword_rule!(Greeting, GREETING, responder::greeting),
    keyword_rule!(Packages, PACKAGES, responder::packages),
    keyword_rule!(Services, SERVICES, responder::services),
    keyword_rule!(Process, PROCESS, responder::process),
    keyword_rule!(Results, RESULTS, responder::results),
    keyword_rule!(Contact, CONTACT, responder::contact),
    keyword_rule!(About, ABOUT, responder::about),
    keyword_rule!(Contract, CONTRACT, responder::contract),
    keyword_rule!(Custom, CUSTOM, responder::custom),
    keyword_rule!(Budget, BUDGET, responder::budget),
    keyword_rule!(Differentiation, COMPETITION, responder::differentiation),
    keyword_rule!(Skepticism, SKEPTICISM, responder::skepticism),
    keyword_rule!(Gratitude, GRATITUDE, responder::gratitude),
    keyword_rule!(Farewell, FAREWELL, responder::farewell),
    keyword_rule!(Industry, INDUSTRY, responder::industry),
    keyword_rule!(Affirmative, AFFIRMATIVE, responder::affirmative),
    keyword_rule!(Negative, NEGATIVE, responder::negative),
];

/// Catch-all used when no rule in [`RULES`] matches.
pub static FALLBACK: Rule = Rule {
    intent: Intent::Fallback,
    matches: |_, _| true,
    respond: responder::fallback,
};

/// A generated reply and the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub intent: Intent,
    pub text: String,
}

fn select(lower: &str, session: &Session) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| rule.matches(lower, session))
        .unwrap_or(&FALLBACK)
}

/// Returns the intent that would answer `input` in the current session state.
pub fn classify(input: &str, session: &Session) -> Intent {
    select(&input.to_lowercase(), session).intent
}

/// Answers `input`, applying the winning rule's side effects to `session`.
///
/// Does not touch the message log or the message count; the caller owns those.
pub fn respond(input: &str, session: &mut Session, random: &mut dyn RandomSource) -> Reply {
    let mut turn = Turn::new(input, session, random);
    let rule = select(&turn.lower, turn.session);
    tracing::debug!(
        session = %turn.session.id(),
        intent = %rule.intent,
        message_count = turn.session.message_count(),
        "Classified message"
    );

    let text = (rule.respond)(&mut turn);
    Reply {
        intent: rule.intent,
        text,
    }
}
