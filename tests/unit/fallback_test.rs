//! Unit tests for the offline reply selector

use webboost_api::assistant::fallback::{classify, select_reply, Topic, RULES};

const FILLERS: &[&str] = &[
    "",
    "Bonjour Élise, ",
    "Urgent !! ",
    "Pour mon restaurant, ",
    "Quel délai et ",
    "garantie ? ",
];

#[test]
fn test_pricing_keyword_always_returns_pricing_template() {
    for keyword in Topic::Pricing.keywords() {
        for prefix in FILLERS {
            for suffix in ["", " pour une boutique", " svp, c'est urgent"] {
                let message = format!("{}{}{}", prefix, keyword.to_uppercase(), suffix);
                assert_eq!(
                    select_reply(&message),
                    Topic::Pricing.reply(),
                    "message: {}",
                    message
                );
            }
        }
    }
}

#[test]
fn test_each_keyword_selects_its_topic_on_its_own() {
    for (index, (topic, keywords)) in RULES.iter().enumerate() {
        for keyword in *keywords {
            // A keyword may contain a keyword of an earlier rule
            let expected = RULES[..index]
                .iter()
                .find(|(_, earlier)| earlier.iter().any(|k| keyword.contains(k)))
                .map(|(t, _)| *t)
                .unwrap_or(*topic);
            assert_eq!(classify(keyword), expected, "keyword: {}", keyword);
        }
    }
}

#[test]
fn test_first_matching_rule_wins() {
    assert_eq!(classify("bonjour, c'est urgent"), Topic::Greeting);
    assert_eq!(classify("restaurant à ouvrir vite"), Topic::Restaurant);
    assert_eq!(classify("paiement garanti ?"), Topic::Payment);
}

#[test]
fn test_selection_is_deterministic() {
    let message = "Je voudrais une boutique en ligne";
    assert_eq!(select_reply(message), select_reply(message));
    assert_eq!(classify(message), Topic::Commerce);
}

#[test]
fn test_unmatched_message_gets_general_prompt() {
    let reply = select_reply("Qui êtes-vous ?");
    assert_eq!(reply, Topic::General.reply());
    assert!(reply.contains("Quel type d'entreprise"));
}

#[test]
fn test_replies_are_distinct() {
    let mut replies: Vec<_> = RULES.iter().map(|(topic, _)| topic.reply()).collect();
    replies.push(Topic::General.reply());
    let count = replies.len();
    replies.sort_unstable();
    replies.dedup();
    assert_eq!(replies.len(), count);
}
