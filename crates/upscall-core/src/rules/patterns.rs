//! Keyword patterns, matched against lower-cased input.
//!
//! Unanchored patterns match anywhere in the message, so `"ads"` also hits
//! `"roads"`.

use once_cell::sync::Lazy;
use regex::Regex;

macro_rules! patterns {
    ($($name:ident => $re:expr;)*) => {
        $(
            pub(crate) static $name: Lazy<Regex> = Lazy::new(|| {
                Regex::new($re).expect(concat!("invalid pattern ", stringify!($name)))
            });
        )*

        #[cfg(test)]
        pub(crate) fn all() -> Vec<(&'static str, &'static Lazy<Regex>)> {
            vec![$((stringify!($name), &$name)),*]
        }
    };
}

patterns! {
    // Messages containing any of these are questions, not a business description.
    BUSINESS_EXCLUSION => r"package|price|service|how|what|who|when|where";

    GREETING => r"^(hi|hello|hey|sup|yo|what'?s up|good morning|good evening|good afternoon|hola)";

    PACKAGES => r"package|plan|pricing|price|cost|how much|tier|silver|gold|diamond|afford|budget";
    TIER_SILVER => r"silver|starter|basic|cheap|small";
    TIER_GOLD => r"gold|accelerator|mid|popular|recommend";
    TIER_DIAMOND => r"diamond|elite|premium|top|best|full|everything";
    TIER_COMPARE => r"compare|difference|which|between";

    SERVICES => r"service|what do you (do|offer)|help with|marketing|seo|social media|content|ads|advertising|lead|brand";
    SERVICE_SEO => r"seo|search engine|rank|google rank";
    SERVICE_SOCIAL => r"social media|instagram|tiktok|facebook|linkedin";
    SERVICE_ADS => r"ads|advertising|paid|ppc|google ads|meta ads";
    SERVICE_LEADS => r"lead|generation|leads|customers";

    PROCESS => r"process|how (do you|does it) work|steps|approach|method|onboard";
    RESULTS => r"result|roi|how fast|how long|timeline|expect|proof|case stud";
    CONTACT => r"contact|get started|start|sign up|reach out|talk|call|meeting|consultation|book|schedule|demo";
    ABOUT => r"about|team|who are you|company|founded|mission|behind";
    CONTRACT => r"contract|lock.?in|cancel|commitment|flexible|month.?to.?month";
    CUSTOM => r"custom|bespoke|tailor|specific|unique|different|doesn.?t fit";
    BUDGET => r"expensive|afford|cheap|budget|worth it|invest|money|spend";
    COMPETITION => r"why upscall|why you|competitor|better|different from|vs|compared to|agency";
    SKEPTICISM => r"scam|fake|don.?t believe|not sure|skeptic|too good|really";
    GRATITUDE => r"thank|thanks|appreciate|helpful|amazing|great|awesome|perfect";
    FAREWELL => r"bye|goodbye|see you|later|that's all|gotta go|peace|done";
    INDUSTRY => r"industry|industries|niche|ecommerce|e-commerce|saas|local|restaurant|real estate|startup|agency|coach|clinic|fitness";

    AFFIRMATIVE => r"^(yes|yeah|yep|sure|ok|okay|definitely|absolutely|please|go ahead|tell me)";
    NEGATIVE => r"^(no|nah|nope|not really|i'm good|all good)";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        for (name, pattern) in all() {
            assert!(!pattern.as_str().is_empty(), "{name} is empty");
        }
    }

    #[test]
    fn test_anchored_patterns_only_match_leading_words() {
        assert!(GREETING.is_match("hey there"));
        assert!(GREETING.is_match("what's up"));
        assert!(!GREETING.is_match("well hello"));
        assert!(AFFIRMATIVE.is_match("sure thing"));
        assert!(!AFFIRMATIVE.is_match("not sure"));
        assert!(NEGATIVE.is_match("nope"));
    }

    #[test]
    fn test_optional_separators() {
        assert!(CONTRACT.is_match("is there a lock-in"));
        assert!(CONTRACT.is_match("month to month?"));
        assert!(SKEPTICISM.is_match("i dont believe it"));
        assert!(CUSTOM.is_match("it doesn't fit"));
    }
}
