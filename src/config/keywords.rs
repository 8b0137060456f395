// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Declarative keyword trees.
//!
//! A keyword file describes an action tree in JSON, so a keyword search can
//! be configured without writing handlers:
//!
//! ```json
//! {
//!   "keywords": [
//!     { "name": "help", "pattern": { "literal": "help" },
//!       "suggestions": [{ "content": "help", "description": "Open help" }],
//!       "commit": { "message": "Open 'help' page!" } },
//!     { "name": "define", "pattern": "any", "capture": "word",
//!       "suggestions": [{ "content": "{token}", "description": "Define {word}" }],
//!       "commit": { "open": "https://www.merriam-webster.com/dictionary/{word}" },
//!       "children": [
//!         { "pattern": { "prefix": "synonym" },
//!           "commit": { "open": "https://www.merriam-webster.com/thesaurus/{word}" } }
//!       ] }
//!   ]
//! }
//! ```

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use super::template::{placeholders, render, Escape, Vars, BUILTIN_VARS};
use crate::action::Action;
use crate::omnibox::OmniboxConfig;
use crate::pattern::WordPattern;
use crate::types::Suggestion;

/// Top level of `keywords.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordFile {
    /// Suggestion appended after every list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_suggestion: Option<Suggestion>,
    /// Root keywords, tried in order
    #[serde(default)]
    pub keywords: Vec<KeywordSpec>,
}

/// One action in a keyword tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub pattern: PatternSpec,
    /// Session key that receives the matched word
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture: Option<String>,
    /// Suggestion templates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<Suggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<CommitSpec>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<KeywordSpec>,
}

/// Serialized form of a [`WordPattern`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSpec {
    Literal(String),
    /// Token must be a prefix of this word
    Prefix(String),
    Regex(String),
    Any,
}

/// What happens when a keyword is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitSpec {
    /// Ask the host to open a URL template (values are percent-encoded)
    Open(String),
    /// Ask the host to show a message template
    Message(String),
}

impl PatternSpec {
    pub fn to_pattern(&self) -> Result<WordPattern> {
        Ok(match self {
            Self::Literal(word) => WordPattern::literal(word.clone()),
            Self::Prefix(word) => WordPattern::prefix_of(word),
            Self::Regex(expr) => WordPattern::regex(expr)?,
            Self::Any => WordPattern::Wildcard,
        })
    }
}

impl KeywordFile {
    /// Dictionary lookup tree used when no keyword file exists.
    pub fn builtin() -> Self {
        Self {
            default_suggestion: None,
            keywords: vec![
                KeywordSpec {
                    name: Some("help".to_string()),
                    pattern: PatternSpec::Literal("help".to_string()),
                    capture: None,
                    suggestions: vec![Suggestion::new(
                        "help",
                        "Hit enter to open up the <match>help</match> page",
                    )],
                    commit: Some(CommitSpec::Message("Open 'help' page!".to_string())),
                    children: Vec::new(),
                },
                KeywordSpec {
                    name: Some("define".to_string()),
                    pattern: PatternSpec::Any,
                    capture: Some("word".to_string()),
                    suggestions: vec![Suggestion::new("{token}", "Look up the definition for {word}")],
                    commit: Some(CommitSpec::Open(
                        "https://www.merriam-webster.com/dictionary/{word}".to_string(),
                    )),
                    children: vec![KeywordSpec {
                        name: Some("synonym".to_string()),
                        pattern: PatternSpec::Prefix("synonym".to_string()),
                        capture: None,
                        suggestions: vec![Suggestion::new("{word} synonym", "Look up synonyms for {word}")],
                        commit: Some(CommitSpec::Open(
                            "https://www.merriam-webster.com/thesaurus/{word}".to_string(),
                        )),
                        children: Vec::new(),
                    }],
                },
            ],
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Keyword file is not valid JSON")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Non-fatal problems: shadowed siblings and placeholders that can never
    /// be filled.
    pub fn lint(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        lint_level(&self.keywords, &[], "", &mut warnings);
        warnings
    }

    /// Build the matcher configuration, failing on invalid patterns.
    pub fn build(&self) -> Result<OmniboxConfig> {
        for warning in self.lint() {
            tracing::warn!("{}", warning);
        }

        let actions = self
            .keywords
            .iter()
            .map(KeywordSpec::build)
            .collect::<Result<Vec<_>>>()?;

        Ok(OmniboxConfig {
            actions,
            default_suggestion: self.default_suggestion.clone(),
        })
    }
}

impl KeywordSpec {
    fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{:?}", self.pattern),
        }
    }

    /// Turn this keyword and its children into an [`Action`].
    pub fn build(&self) -> Result<Action> {
        let pattern = self
            .pattern
            .to_pattern()
            .with_context(|| format!("Keyword '{}' has an invalid pattern", self.label()))?;

        let mut action = Action::new(pattern);
        if let Some(name) = &self.name {
            action = action.named(name.clone());
        }

        if let Some(key) = &self.capture {
            if key.trim().is_empty() {
                bail!("Keyword '{}' captures into an empty key", self.label());
            }
            let key = key.clone();
            action = action.on_match(move |token, _, session| {
                session.set(key.clone(), token);
                Ok(())
            });
        }

        if !self.suggestions.is_empty() {
            let templates = self.suggestions.clone();
            action = action.suggest(move |token, rest, session| {
                let vars = Vars::matching(token, rest, session);
                Ok(templates
                    .iter()
                    .map(|t| {
                        Suggestion::new(
                            render(&t.content, &vars, Escape::None),
                            render(&t.description, &vars, Escape::None),
                        )
                    })
                    .collect())
            });
        }

        match self.commit.clone() {
            Some(CommitSpec::Open(template)) => {
                action = action.on_commit(move |session| {
                    let url = render(&template, &Vars::committed(session), Escape::Url);
                    let Some(host) = session.host() else {
                        return Ok(());
                    };
                    let disposition = session.disposition().unwrap_or_default();
                    host.open(&url, disposition, session.active_context())
                        .with_context(|| format!("Failed to open {}", url))
                });
            }
            Some(CommitSpec::Message(template)) => {
                action = action.on_commit(move |session| {
                    let message = render(&template, &Vars::committed(session), Escape::None);
                    match session.host() {
                        Some(host) => host.notify(&message),
                        None => Ok(()),
                    }
                });
            }
            None => {}
        }

        let children = self
            .children
            .iter()
            .map(KeywordSpec::build)
            .collect::<Result<Vec<_>>>()?;

        Ok(action.children_from(children))
    }

    fn templates(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .suggestions
            .iter()
            .flat_map(|s| [s.content.as_str(), s.description.as_str()])
            .collect();
        match &self.commit {
            Some(CommitSpec::Open(t)) | Some(CommitSpec::Message(t)) => out.push(t),
            None => {}
        }
        out
    }
}

fn lint_level(specs: &[KeywordSpec], captured: &[String], path: &str, warnings: &mut Vec<String>) {
    for (i, spec) in specs.iter().enumerate() {
        let here = if path.is_empty() {
            spec.label()
        } else {
            format!("{} > {}", path, spec.label())
        };

        if spec.pattern == PatternSpec::Any && i + 1 < specs.len() {
            warnings.push(format!(
                "'{}' matches any word and shadows {} later sibling(s)",
                here,
                specs.len() - i - 1
            ));
        }

        let mut scope = captured.to_vec();
        if let Some(key) = &spec.capture {
            scope.push(key.clone());
        }

        for template in spec.templates() {
            for name in placeholders(template) {
                if !BUILTIN_VARS.contains(&name.as_str()) && !scope.contains(&name) {
                    warnings.push(format!("'{}' uses {{{}}} which is never captured", here, name));
                }
            }
        }

        lint_level(&spec.children, &scope, &here, warnings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;
    use crate::omnibox::{Omnibox, SubmitOutcome};
    use crate::types::Disposition;

    #[test]
    fn test_pattern_spec_json_shapes() {
        let specs: Vec<PatternSpec> =
            serde_json::from_str(r#"[{"literal":"help"},{"prefix":"syn"},{"regex":"^\\d+$"},"any"]"#).unwrap();
        assert_eq!(
            specs,
            vec![
                PatternSpec::Literal("help".into()),
                PatternSpec::Prefix("syn".into()),
                PatternSpec::Regex(r"^\d+$".into()),
                PatternSpec::Any,
            ]
        );
    }

    #[test]
    fn test_builtin_survives_json() {
        let builtin = KeywordFile::builtin();
        let json = builtin.to_json_pretty().unwrap();
        assert_eq!(KeywordFile::from_json(&json).unwrap(), builtin);
        assert!(builtin.lint().is_empty());
    }

    #[test]
    fn test_builtin_tree_behaviour() {
        let mut omnibox = Omnibox::new(KeywordFile::builtin().build().unwrap());

        let s = omnibox.input("cat").unwrap();
        assert_eq!(s, vec![Suggestion::new("suggest 1:cat", "Look up the definition for cat")]);

        let s = omnibox.input("cat syn").unwrap();
        assert_eq!(s[0], Suggestion::new("suggest 1:cat synonym", "Look up synonyms for cat"));

        let host = RecordingHost::default();
        omnibox.submit("ice syn", Disposition::NewForegroundTab, &host).unwrap();
        omnibox.submit("help", Disposition::CurrentTab, &host).unwrap();

        let opened = host.opened();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].0, "https://www.merriam-webster.com/thesaurus/ice");
        assert_eq!(opened[0].1, Disposition::NewForegroundTab);
        assert_eq!(host.messages(), vec!["Open 'help' page!".to_string()]);
    }

    #[test]
    fn test_invalid_regex_names_keyword() {
        let file = KeywordFile::from_json(
            r#"{"keywords":[{"name":"broken","pattern":{"regex":"(oops"}}]}"#,
        )
        .unwrap();
        let err = file.build().unwrap_err();
        assert!(format!("{:#}", err).contains("broken"));
    }

    #[test]
    fn test_empty_capture_key_is_rejected() {
        let file = KeywordFile::from_json(r#"{"keywords":[{"pattern":"any","capture":"  "}]}"#).unwrap();
        assert!(file.build().is_err());
    }

    #[test]
    fn test_lint_reports_shadowing_and_unknown_placeholders() {
        let file = KeywordFile::from_json(
            r#"{"keywords":[
                {"name":"all","pattern":"any","suggestions":[{"content":"{term}","description":""}]},
                {"name":"help","pattern":{"literal":"help"}}
            ]}"#,
        )
        .unwrap();

        let warnings = file.lint();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("shadows 1 later sibling")));
        assert!(warnings.iter().any(|w| w.contains("{term}")));
    }

    #[test]
    fn test_commit_without_host_match_is_noop_outcome() {
        let file = KeywordFile::from_json(r#"{"keywords":[{"name":"x","pattern":{"literal":"x"}}]}"#).unwrap();
        let mut omnibox = Omnibox::new(file.build().unwrap());
        let host = RecordingHost::default();
        assert_eq!(
            omnibox.submit("x", Disposition::CurrentTab, &host).unwrap(),
            SubmitOutcome::NoCommitHandler("x".to_string())
        );
    }
}
