//! Reply synthesis.
//!
//! Each rule of the table hands its turn to one of the responders below. A
//! responder may update the session (topics, business) and returns the reply
//! text, drawing from fixed phrase pools and weaving in the visitor's name or
//! business where it has them.

use crate::random::{RandomSource, pick};
use crate::rules::patterns::*;
use crate::session::{Session, Topic, TopicTracker};

/// Greeting sent when the widget opens before the email gate is passed.
pub const WELCOME: &str = "Hey! I'm the Upscall AI — think of me as your marketing advisor. \
     Drop your email below and let's chat.";

/// The one-off prompt sent after the configured turn when no business is known.
pub const CHALLENGE_FOLLOW_UP: &str = "By the way — what's your biggest marketing challenge \
     right now? I'd love to point you in the right direction.";

const CONTACT_EMAIL: &str = "hello@upscall.com";

/// The reply to the email gate.
pub fn email_greeting(name: &str) -> String {
    format!(
        "Nice to meet you, {name}! Before we dive in — what kind of business do you run? \
         That way I can give you more relevant advice."
    )
}

/// One user message being answered.
pub struct Turn<'a> {
    /// The trimmed message as typed.
    pub input: &'a str,
    /// `input`, lower-cased. All patterns match against this.
    pub lower: String,
    pub session: &'a mut Session,
    pub random: &'a mut dyn RandomSource,
}

impl<'a> Turn<'a> {
    pub fn new(input: &'a str, session: &'a mut Session, random: &'a mut dyn RandomSource) -> Self {
        Self {
            input,
            lower: input.to_lowercase(),
            session,
            random,
        }
    }

    fn name(&self) -> String {
        self.session.user_name().unwrap_or_default().to_string()
    }

    fn pick(&mut self, pool: &[String]) -> String {
        pick(self.random, pool).clone()
    }

    fn suggest_next(&mut self) -> String {
        suggest_next(self.session.topics(), self.random)
    }
}

/// The first `count` space-separated words of `text`.
fn first_words(text: &str, count: usize) -> String {
    text.split(' ').take(count).collect::<Vec<_>>().join(" ")
}

fn suggestion_phrase(topic: Topic) -> &'static str {
    match topic {
        Topic::Packages => "our packages",
        Topic::Services => "what services we offer",
        Topic::Process => "how our process works",
        Topic::Results => "the kind of results we deliver",
        Topic::Pricing => "pricing & flexibility",
        Topic::About => "who we are",
        Topic::Industry => "the industries we work with",
    }
}

/// Picks one suggestible topic the visitor has not heard about yet.
pub fn suggest_topic(topics: &TopicTracker, random: &mut dyn RandomSource) -> Option<Topic> {
    let remaining = topics.unexplored();
    if remaining.is_empty() {
        return None;
    }
    Some(*pick(random, &remaining))
}

/// Offers an uncovered topic, e.g. `" Want to hear about our packages?"`.
///
/// Returns an empty string once every suggestible topic has been covered.
/// The leading space lets callers append it straight to a sentence.
pub fn suggest_next(topics: &TopicTracker, random: &mut dyn RandomSource) -> String {
    match suggest_topic(topics, random) {
        Some(topic) => format!(" Want to hear about {}?", suggestion_phrase(topic)),
        None => String::new(),
    }
}

// ============================================================================
// Responders, in rule priority order
// ============================================================================

pub(crate) fn business_intro(turn: &mut Turn<'_>) -> String {
    turn.session.record_business(turn.input);
    tracing::info!(session = %turn.session.id(), "Recorded visitor business");

    let name = turn.name();
    let snippet = first_words(turn.input, 4);
    turn.pick(&[
        format!(
            "Oh interesting — {snippet}... that's cool! We've worked with businesses like yours \
             before. What are you looking to improve — more leads, better brand presence, or \
             scaling your marketing?"
        ),
        "Love that! We've helped similar businesses grow significantly. Are you currently \
         running any marketing, or starting from scratch? That'll help me recommend the right \
         package for you."
            .to_string(),
        format!(
            "That's awesome, {name}. Based on that, I think we could do a lot together. What's \
             your biggest goal right now — getting more customers, building your brand, or \
             something else?"
        ),
    ])
}

pub(crate) fn greeting(turn: &mut Turn<'_>) -> String {
    let name = turn.name();
    turn.pick(&[
        format!(
            "Hey {name}! Good to have you here. What's on your mind — curious about our \
             services, or looking for something specific?"
        ),
        "Hey! What can I help you figure out today? I can break down our packages, talk \
         strategy, or answer any questions you have."
            .to_string(),
        "Hello! I'm here to help. Are you exploring marketing options, or do you already have \
         something specific in mind?"
            .to_string(),
    ])
}

pub(crate) fn packages(turn: &mut Turn<'_>) -> String {
    turn.session.track_topic(Topic::Packages);
    turn.session.track_topic(Topic::Pricing);

    if TIER_SILVER.is_match(&turn.lower) {
        let fit = match turn.session.user_business() {
            Some(business) => format!(
                " For a {} business, this could be a great foundation.",
                first_words(business, 3)
            ),
            None => String::new(),
        };
        return format!(
            "The Silver package is our starter tier — social media management, basic SEO, \
             Google Business Profile, content calendar, analytics, and email support. It's \
             perfect if you're just getting started with professional marketing.{fit} Want to \
             compare it with Gold?"
        );
    }
    if TIER_GOLD.is_match(&turn.lower) {
        return format!(
            "Gold is our most popular — and honestly what I'd recommend for most growing \
             businesses. You get everything in Silver PLUS paid ad management across Meta & \
             Google, professional content creation, email marketing automation, landing pages, \
             bi-weekly strategy calls, and a dedicated account manager. It's the sweet spot.{}",
            turn.suggest_next()
        );
    }
    if TIER_DIAMOND.is_match(&turn.lower) {
        return format!(
            "Diamond is the full partnership experience. Everything in Gold plus full-funnel \
             strategy, advanced analytics dashboards, video production, influencer \
             partnerships, CRM integration, weekly strategy sessions, and 24/7 priority \
             support. This is for businesses ready to go all in.{}",
            turn.suggest_next()
        );
    }
    if TIER_COMPARE.is_match(&turn.lower) {
        return "Here's the quick breakdown: Silver = foundations & organic growth. Gold = \
                Silver + paid ads, content creation, and a dedicated manager. Diamond = Gold + \
                video, influencers, advanced analytics, and weekly strategy sessions. Which \
                sounds closest to what you need?"
            .to_string();
    }
    "We've got three tiers: Silver (Starter) for small businesses, Gold (Accelerator) for \
     growing brands — that's our most popular — and Diamond (Elite) for the full premium \
     experience. Each one scales with you, no lock-in contracts. Which one sounds interesting?"
        .to_string()
}

pub(crate) fn services(turn: &mut Turn<'_>) -> String {
    turn.session.track_topic(Topic::Services);

    if SERVICE_SEO.is_match(&turn.lower) {
        return "SEO is huge for long-term growth. We handle technical SEO, on-page \
                optimization, content strategy, and local SEO. Most clients see noticeable \
                ranking improvements within 60-90 days. Are you getting any organic traffic \
                right now?"
            .to_string();
    }
    if SERVICE_SOCIAL.is_match(&turn.lower) {
        return "We manage the full social media lifecycle — strategy, content creation, \
                scheduling, community management, and paid social ads. We're active on \
                Instagram, TikTok, Facebook, LinkedIn, and more. Which platforms are most \
                important for your business?"
            .to_string();
    }
    if SERVICE_ADS.is_match(&turn.lower) {
        return "Paid ads are one of our specialties. We run campaigns across Google Ads and \
                Meta (Facebook/Instagram), with full targeting, A/B testing, and ongoing \
                optimization. What's your current monthly ad budget, roughly? That'll help me \
                suggest the right approach."
            .to_string();
    }
    if SERVICE_LEADS.is_match(&turn.lower) {
        return "Lead gen is at the core of what we do. We build funnels that combine paid ads, \
                landing pages, email sequences, and retargeting to turn strangers into \
                customers. What does your current lead flow look like?"
            .to_string();
    }
    turn.pick(&[
        "We cover six core areas: Growth Strategy, Digital Marketing, Brand Development, Lead \
         Generation, Web & Creative, and Content & Social Media. Everything's data-driven — we \
         don't guess, we measure. Which of those interests you most?"
            .to_string(),
        "Think of us as your outsourced marketing department. Strategy, ads, content, design, \
         SEO, lead gen — we handle it all so you can focus on running your business. What area \
         is most important to you right now?"
            .to_string(),
    ])
}

pub(crate) fn process(turn: &mut Turn<'_>) -> String {
    turn.session.track_topic(Topic::Process);
    "It's a 4-step process: 1) Discover — we learn everything about your business, audience, \
     and goals. 2) Strategize — we build a custom game plan. 3) Execute — our team launches \
     campaigns and creates content. 4) Optimize — we analyze, test, and continuously improve. \
     The whole onboarding takes about a week. Does that sound like what you're looking for?"
        .to_string()
}

pub(crate) fn results(turn: &mut Turn<'_>) -> String {
    turn.session.track_topic(Topic::Results);
    turn.pick(&[
        "Most clients see measurable improvements within 30-60 days, and significant growth \
         compounds over 3-6 months. We track everything with transparent dashboards so you \
         always know your ROI. What metrics matter most to you — leads, revenue, brand \
         awareness?"
            .to_string(),
        "We're all about measurable results. Our average client sees a 3x ROI increase. We'll \
         never hide behind vanity metrics — you'll get clear reports showing exactly what's \
         working and what we're optimizing. Want to hear about a specific type of result?"
            .to_string(),
    ])
}

pub(crate) fn contact(_turn: &mut Turn<'_>) -> String {
    format!(
        "Let's make it happen! You can reach us at {CONTACT_EMAIL}, or head to our Contact \
         page to send a message directly. We also offer free consultations — no pressure, \
         just a conversation about your goals. Want me to walk you through what to expect on \
         that call?"
    )
}

pub(crate) fn about(turn: &mut Turn<'_>) -> String {
    turn.session.track_topic(Topic::About);
    format!(
        "Upscall was built on one idea: great marketing shouldn't require a massive budget. \
         Our team is a mix of strategists, creatives, and data nerds who genuinely love what \
         they do. We've served 150+ clients with a 98% retention rate — people stick with us \
         because we deliver.{}",
        turn.suggest_next()
    )
}

pub(crate) fn contract(turn: &mut Turn<'_>) -> String {
    turn.session.track_topic(Topic::Pricing);
    "Zero lock-in contracts. We operate month-to-month because we believe in earning your \
     trust, not trapping you. You can upgrade, downgrade, pause, or cancel anytime. No hidden \
     fees, no gotchas. That's a big deal to most of our clients — does that ease any concerns?"
        .to_string()
}

pub(crate) fn custom(_turn: &mut Turn<'_>) -> String {
    "Totally! Not every business fits neatly into a package, and that's fine. Tell me a bit \
     about what you need, and we'll design something custom. Or you can describe your \
     situation on the Contact page and our team will put together a tailored proposal. What \
     would your ideal marketing setup look like?"
        .to_string()
}

pub(crate) fn budget(_turn: &mut Turn<'_>) -> String {
    "I get it — budget matters. The good news is our Silver package is designed to be \
     accessible for small businesses, and every tier is built to pay for itself through the \
     results we deliver. Think of it as an investment with measurable returns, not an \
     expense. What's your rough budget range? I can help you figure out the best fit."
        .to_string()
}

pub(crate) fn differentiation(_turn: &mut Turn<'_>) -> String {
    "Great question. Three things set us apart: 1) No lock-in contracts — we earn your \
     business monthly. 2) Every strategy is custom — we don't do cookie-cutter. 3) Transparent \
     reporting — you see exactly what your money does. Plus our 98% retention rate speaks for \
     itself. What's been your experience with agencies before?"
        .to_string()
}

pub(crate) fn skepticism(_turn: &mut Turn<'_>) -> String {
    "Healthy skepticism is good — honestly, the marketing industry has a lot of \
     overpromisers. That's exactly why we do month-to-month contracts and transparent \
     reporting. You'll see real numbers, and if we're not delivering, you can walk away. We'd \
     love the chance to prove it with a free consultation. Fair enough?"
        .to_string()
}

pub(crate) fn gratitude(turn: &mut Turn<'_>) -> String {
    let name = turn.name();
    // suggestions carry their own leading space
    let closer = if turn.session.topics().len() < 3 {
        turn.suggest_next()
    } else {
        format!(
            "If you're ready to chat with our team directly, hit up the Contact page or email \
             {CONTACT_EMAIL}!"
        )
    };
    turn.pick(&[
        format!(
            "Glad I could help, {name}! Is there anything else you're curious about? I'm here \
             as long as you need."
        ),
        "Anytime! If anything else comes up, don't hesitate to ask. And when you're ready to \
         take the next step, we're just one message away."
            .to_string(),
        format!("Happy to help! {closer}"),
    ])
}

pub(crate) fn farewell(turn: &mut Turn<'_>) -> String {
    let name = turn.name();
    format!(
        "It was great chatting with you, {name}! When you're ready, our team is at \
         {CONTACT_EMAIL}. Talk soon!"
    )
}

pub(crate) fn industry(turn: &mut Turn<'_>) -> String {
    turn.session.track_topic(Topic::Industry);
    "We work across a ton of industries — e-commerce, SaaS, local services, professional \
     firms, hospitality, health & wellness, real estate, coaches, and more. Every strategy we \
     build is tailored to your specific market and audience. What industry are you in? I'd \
     love to share what's worked for similar businesses."
        .to_string()
}

pub(crate) fn affirmative(turn: &mut Turn<'_>) -> String {
    match turn.session.topics().last() {
        Some(Topic::Packages) => "Awesome! Which tier are you leaning toward — Silver, Gold, \
             or Diamond? Or if you're not sure, tell me about your goals and I'll recommend one."
            .to_string(),
        Some(Topic::Services) => "Great! Which service is most relevant — SEO, social media, \
             paid ads, lead generation, or brand development? I can dive deep into any of \
             those."
            .to_string(),
        _ => "Awesome! What would you like to know more about? I can talk packages, services, \
              our process, results, or anything else that's on your mind."
            .to_string(),
    }
}

pub(crate) fn negative(turn: &mut Turn<'_>) -> String {
    let name = turn.name();
    turn.pick(&[
        format!(
            "No worries! If you think of anything later, I'm always here. You can also reach \
             our team at {CONTACT_EMAIL} anytime."
        ),
        format!(
            "All good! Just know we're here whenever you need us. Feel free to come back and \
             chat anytime, {name}."
        ),
    ])
}

pub(crate) fn fallback(turn: &mut Turn<'_>) -> String {
    turn.pick(&[
        "Hmm, I want to make sure I give you the best answer. Could you rephrase that or give \
         me a bit more context? I know a lot about our services, packages, and marketing in \
         general."
            .to_string(),
        "That's an interesting one! I might not have the perfect answer off the top of my \
         head, but our team definitely does. Want me to point you to the right place, or is \
         there something else I can help with?"
            .to_string(),
        "I appreciate the question! While I think that's better answered by our strategy team, \
         I can help you with info about our packages, services, process, or getting started. \
         What sounds good?"
            .to_string(),
        "Good question — let me be honest, that's a bit outside my wheelhouse. But I'm great at \
         breaking down our packages, explaining our services, and helping you figure out the \
         right fit. Want to explore any of those?"
            .to_string(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;
    use crate::session::Contact;

    fn session_with_name() -> Session {
        let mut session = Session::new();
        session.capture_contact(Contact::from_email("alex.w@acme.com"));
        session
    }

    #[test]
    fn test_first_words() {
        assert_eq!(first_words("we run a small bakery downtown", 4), "we run a small");
        assert_eq!(first_words("bakery", 3), "bakery");
    }

    #[test]
    fn test_suggest_next_skips_discussed_topics() {
        let mut tracker = TopicTracker::new();
        tracker.track(Topic::Packages);
        tracker.track(Topic::Services);

        let allowed = [Topic::Process, Topic::Results, Topic::Pricing];
        for value in [0.0, 0.2, 0.4, 0.6, 0.8, 0.99] {
            let mut random = ScriptedRandom::constant(value);
            let topic = suggest_topic(&tracker, &mut random).unwrap();
            assert!(allowed.contains(&topic), "{topic} was already discussed");

            let mut random = ScriptedRandom::constant(value);
            let text = suggest_next(&tracker, &mut random);
            assert_eq!(text, format!(" Want to hear about {}?", suggestion_phrase(topic)));
        }
    }

    #[test]
    fn test_suggest_next_is_empty_when_everything_is_covered() {
        let mut tracker = TopicTracker::new();
        for topic in Topic::SUGGESTIBLE {
            tracker.track(topic);
        }
        let mut random = ScriptedRandom::constant(0.5);
        assert_eq!(suggest_next(&tracker, &mut random), "");
    }

    #[test]
    fn test_silver_mentions_recorded_business() {
        let mut session = session_with_name();
        session.record_business("we run a bakery");
        let mut random = ScriptedRandom::constant(0.0);
        let mut turn = Turn::new("tell me about silver", &mut session, &mut random);

        let reply = packages(&mut turn);
        assert!(reply.contains("For a we run a business"));
        assert!(reply.ends_with("Want to compare it with Gold?"));
    }

    #[test]
    fn test_packages_tracks_packages_then_pricing() {
        let mut session = session_with_name();
        let mut random = ScriptedRandom::constant(0.0);
        let mut turn = Turn::new("what packages do you have", &mut session, &mut random);
        packages(&mut turn);

        assert_eq!(session.topics().discussed(), &[Topic::Packages, Topic::Pricing]);
        assert_eq!(session.topics().last(), Some(Topic::Pricing));
    }

    #[test]
    fn test_affirmative_asks_for_tier_when_packages_is_last() {
        let mut session = session_with_name();
        session.track_topic(Topic::Packages);
        let mut random = ScriptedRandom::constant(0.0);
        let mut turn = Turn::new("yes", &mut session, &mut random);

        assert!(affirmative(&mut turn).starts_with("Awesome! Which tier are you leaning toward"));
    }

    #[test]
    fn test_gratitude_closer_after_three_topics() {
        let mut session = session_with_name();
        session.track_topic(Topic::Packages);
        session.track_topic(Topic::Services);
        session.track_topic(Topic::Process);
        let mut random = ScriptedRandom::constant(0.99);
        let mut turn = Turn::new("thanks!", &mut session, &mut random);

        let reply = gratitude(&mut turn);
        assert!(reply.starts_with("Happy to help! If you're ready"));
    }

    #[test]
    fn test_gratitude_suggests_with_few_topics() {
        let mut session = session_with_name();
        // first draw picks the suggestion, second picks the third phrase; the
        // suggestion brings its own leading space
        let mut random = ScriptedRandom::new([0.0, 0.99]);
        let mut turn = Turn::new("thanks!", &mut session, &mut random);

        let reply = gratitude(&mut turn);
        assert_eq!(reply, "Happy to help!  Want to hear about our packages?");
    }

    #[test]
    fn test_farewell_uses_name() {
        let mut session = session_with_name();
        let mut random = ScriptedRandom::constant(0.0);
        let mut turn = Turn::new("bye", &mut session, &mut random);
        assert!(farewell(&mut turn).starts_with("It was great chatting with you, Alex W!"));
    }
}
