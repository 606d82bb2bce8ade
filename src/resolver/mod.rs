use rand::{Rng, seq::SliceRandom};

use crate::{
    corpus::{Corpus, NAME_PLACEHOLDER, ResponseEntry},
    prompts::get_encouragement_prompt,
    services::{Responder, ResponderError},
};

pub const FALLBACK_TEMPLATES: [&str; 4] = [
    "🙏 {name}, I'm here to pray with you and encourage you. Could you tell me more about how you're feeling?",
    "💖 {name}, God loves you deeply. Would you like to share what's on your heart?",
    "✝️ {name}, remember that Jesus is always with you. How can I pray for you today?",
    "📖 {name}, sometimes we just need to be still and know that He is God. What's troubling you?",
];

const GENERATED_PREFIX: &str = "💖 ";

#[derive(Debug)]
pub enum ResponseSource {
    Corpus { reference: String },
    Generated,
    Fallback { error: ResponderError },
}

#[derive(Debug)]
pub struct Resolution {
    pub text: String,
    pub source: ResponseSource,
}

/// Turns one utterance into one reply. Holds no conversation state; the corpus,
/// the user's name and the random source are all passed per call.
pub struct Resolver<R: Responder> {
    responder: R,
}

impl<R: Responder> Resolver<R> {
    pub fn new(responder: R) -> Self {
        Self { responder }
    }

    /// Reply for one turn, with the path that produced it. Never fails.
    pub async fn resolve<G: Rng + ?Sized>(
        &self,
        corpus: &Corpus,
        utterance: &str,
        display_name: &str,
        rng: &mut G,
    ) -> Resolution {
        let matches = find_matches(corpus, utterance);

        if let Some(entry) = matches.choose(rng) {
            return Resolution {
                text: format_entry(entry, display_name),
                source: ResponseSource::Corpus {
                    reference: entry.reference.clone(),
                },
            };
        }

        let prompt = get_encouragement_prompt(display_name, utterance);

        match self.responder.generate(&prompt).await {
            Ok(reply) => Resolution {
                text: format!("{GENERATED_PREFIX}{reply}"),
                source: ResponseSource::Generated,
            },
            Err(error) => Resolution {
                text: fallback_reply(display_name, rng),
                source: ResponseSource::Fallback { error },
            },
        }
    }
}

/// Every entry with at least one keyword inside the utterance, in corpus order.
/// An entry is added once no matter how many of its keywords hit.
pub fn find_matches<'a>(corpus: &'a Corpus, utterance: &str) -> Vec<&'a ResponseEntry> {
    let utterance = utterance.to_lowercase();

    corpus
        .entries()
        .filter(|entry| {
            entry
                .keywords
                .iter()
                .any(|kw| utterance.contains(kw.to_lowercase().as_str()))
        })
        .collect()
}

pub fn format_entry(entry: &ResponseEntry, display_name: &str) -> String {
    let message = entry.message.replace(NAME_PLACEHOLDER, display_name);
    format!("{} - {}\n\n{}", entry.text, entry.reference, message)
}

pub fn fallback_reply<G: Rng + ?Sized>(display_name: &str, rng: &mut G) -> String {
    let index = rng.gen_range(0..FALLBACK_TEMPLATES.len());
    FALLBACK_TEMPLATES[index].replace("{name}", display_name)
}
