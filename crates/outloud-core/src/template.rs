//! The synthesizer command template and its substitution rules.
//!
//! The template is a single configured string, tokenized shell-style once
//! at driver construction (quoting is honored, nothing is ever passed to a
//! shell). Rendering replaces placeholder tokens inside every word with
//! the corresponding utterance field and returns the finished argv.

use crate::error::SpeechError;
use crate::utterance::Utterance;

/// An utterance field a placeholder token resolves to.
#[derive(Clone, Copy, Debug)]
enum Field {
    Volume,
    Module,
    Language,
    Voice,
    Pitch,
    Rate,
    Text,
}

/// Ordered substitution rules applied to every templated word.
///
/// Two token families resolve to the same fields: the native `outloud*`
/// names and the `genericSpeech*` names kept for compatibility with
/// existing speech-dispatcher style configurations. Substitution is plain
/// substring replacement, so a token may sit inside a larger literal
/// (`--rate=outloudRate`). Text is replaced last so substituted parameter
/// values are never re-scanned into it.
const RULES: &[(&str, Field)] = &[
    ("outloudVolume", Field::Volume),
    ("genericSpeechVolume", Field::Volume),
    ("outloudModule", Field::Module),
    ("genericSpeechModule", Field::Module),
    ("outloudLanguage", Field::Language),
    ("genericSpeechLanguage", Field::Language),
    ("outloudVoice", Field::Voice),
    ("genericSpeechVoice", Field::Voice),
    ("outloudPitch", Field::Pitch),
    ("genericSpeechPitch", Field::Pitch),
    ("outloudRate", Field::Rate),
    ("genericSpeechRate", Field::Rate),
    ("outloudText", Field::Text),
    ("genericSpeechText", Field::Text),
];

fn field_value<'a>(utterance: &'a Utterance, field: Field) -> &'a str {
    match field {
        Field::Volume => &utterance.volume,
        Field::Module => &utterance.module,
        Field::Language => &utterance.language,
        Field::Voice => &utterance.voice,
        Field::Pitch => &utterance.pitch,
        Field::Rate => &utterance.rate,
        Field::Text => &utterance.text,
    }
}

/// A parsed synthesizer command template.
///
/// Parsing happens once; rendering is a pure function from an utterance to
/// the argv handed to the spawner.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandTemplate {
    words: Vec<String>,
}

impl CommandTemplate {
    /// Tokenize a template string shell-style.
    ///
    /// Fails on unbalanced quoting or a template with no words at all.
    pub fn parse(command: &str) -> Result<Self, SpeechError> {
        let words = shlex::split(command)
            .ok_or_else(|| SpeechError::InvalidTemplate(command.to_string()))?;
        if words.is_empty() {
            return Err(SpeechError::EmptyTemplate);
        }
        Ok(Self { words })
    }

    /// The tokenized template words, placeholders unsubstituted.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Substitute an utterance into the template, producing the argv.
    ///
    /// Each element stays one literal argument; user text is never shell
    /// evaluated.
    #[must_use]
    pub fn render(&self, utterance: &Utterance) -> Vec<String> {
        self.words
            .iter()
            .map(|word| {
                let mut rendered = word.clone();
                for (token, field) in RULES {
                    if rendered.contains(token) {
                        rendered = rendered.replace(token, field_value(utterance, *field));
                    }
                }
                rendered
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utterance() -> Utterance {
        Utterance {
            text: "hi".into(),
            volume: "100".into(),
            rate: "200".into(),
            pitch: "50".into(),
            voice: "en-us".into(),
            language: "en".into(),
            module: "espeak".into(),
        }
    }

    #[test]
    fn quoting_in_the_template_is_honored() {
        let template =
            CommandTemplate::parse(r#"tool -s outloudRate -p outloudPitch -- "outloudText""#)
                .unwrap();
        assert_eq!(
            template.render(&utterance()),
            vec!["tool", "-s", "200", "-p", "50", "--", "hi"]
        );
    }

    #[test]
    fn both_token_families_resolve_to_the_same_field() {
        let native = CommandTemplate::parse("say -r outloudRate").unwrap();
        let compat = CommandTemplate::parse("say -r genericSpeechRate").unwrap();
        assert_eq!(native.render(&utterance()), compat.render(&utterance()));
    }

    #[test]
    fn tokens_substitute_inside_larger_words() {
        let template = CommandTemplate::parse("tool --rate=outloudRate").unwrap();
        assert_eq!(template.render(&utterance()), vec!["tool", "--rate=200"]);
    }

    #[test]
    fn shell_metacharacters_in_text_stay_one_literal_argument() {
        let template = CommandTemplate::parse(r#"tool -- "outloudText""#).unwrap();
        let mut dangerous = utterance();
        dangerous.text = "; rm -rf /".into();

        let argv = template.render(&dangerous);
        assert_eq!(argv, vec!["tool", "--", "; rm -rf /"]);
    }

    #[test]
    fn empty_fields_substitute_the_empty_string() {
        let template = CommandTemplate::parse("tool -v outloudVoice outloudText").unwrap();
        let argv = template.render(&Utterance::from_text("hello"));
        assert_eq!(argv, vec!["tool", "-v", "", "hello"]);
    }

    #[test]
    fn unbalanced_quoting_is_rejected() {
        assert!(matches!(
            CommandTemplate::parse(r#"tool "unterminated"#),
            Err(SpeechError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn empty_template_is_rejected() {
        assert!(matches!(
            CommandTemplate::parse("   "),
            Err(SpeechError::EmptyTemplate)
        ));
    }
}
