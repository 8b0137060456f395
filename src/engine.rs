// Copyright (c) 2024-2025 Jesse Morgan
// Licensed under the MIT License. See LICENSE file for details.

//! Recursive descent over the action tree.
//!
//! Each step consumes exactly one token at `cursor` and tries the sibling
//! actions in declaration order. The first match wins: its handlers run and,
//! if it has children and tokens remain, the descent continues one level
//! down. A token that matches nothing leaves the session as it was.

use anyhow::Result;

use crate::action::Action;
use crate::session::Session;
use crate::types::MatcherState;

/// Parse `tokens` against the root `actions` in a fresh session.
pub fn parse<'a>(
    actions: &'a [Action],
    tokens: Vec<String>,
    state: &MatcherState,
) -> Result<Session<'a>> {
    let mut session = Session::new(tokens, state);
    let tokens = session.args().to_vec();
    let consumed = descend(actions, &tokens, 0, &mut session, state)?;
    session.set_consumed(consumed);
    Ok(session)
}

/// Consume the token at `cursor` against one level of actions.
///
/// Returns the cursor after the deepest step taken.
pub fn descend<'a>(
    actions: &'a [Action],
    tokens: &[String],
    cursor: usize,
    session: &mut Session<'a>,
    state: &MatcherState,
) -> Result<usize> {
    let Some(token) = tokens.get(cursor) else {
        return Ok(cursor);
    };
    let next = cursor + 1;
    let rest = &tokens[next..];

    for action in actions {
        if !action.pattern().matches(Some(token), state)? {
            continue;
        }

        tracing::debug!(token = %token, action = %action.label(), depth = cursor, "matched");
        session.record_match(action, cursor);
        action.run_match(token, rest, session)?;

        if let Some(produced) = action.run_suggest(token, rest, session)? {
            tracing::debug!(count = produced.len(), action = %action.label(), "suggestions produced");
            session.prepend_suggestions(produced);
        }

        if !action.children().is_empty() && !rest.is_empty() {
            return descend(action.children(), tokens, next, session, state);
        }
        return Ok(next);
    }

    tracing::debug!(token = %token, depth = cursor, "no action matched");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::WordPattern;
    use crate::types::Suggestion;
    use std::cell::Cell;
    use std::rc::Rc;

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn suggesting(pattern: impl Into<WordPattern>, content: &'static str) -> Action {
        Action::new(pattern).suggest(move |_, _, _| Ok(vec![Suggestion::new(content, "")]))
    }

    #[test]
    fn test_empty_tokens_leave_session_untouched() {
        let actions = vec![Action::any()];
        let session = parse(&actions, Vec::new(), &MatcherState::default()).unwrap();
        assert!(session.matched_action().is_none());
        assert!(session.suggestions().is_empty());
        assert_eq!(session.consumed(), 0);
    }

    #[test]
    fn test_first_match_wins() {
        let later_fired = Rc::new(Cell::new(false));
        let flag = later_fired.clone();

        let actions = vec![
            suggesting(WordPattern::regex("^h").unwrap(), "first").named("first"),
            Action::literal("help")
                .named("second")
                .on_match(move |_, _, _| {
                    flag.set(true);
                    Ok(())
                }),
        ];

        let session = parse(&actions, toks(&["help"]), &MatcherState::default()).unwrap();
        assert_eq!(session.matched_action().and_then(Action::name), Some("first"));
        assert!(!later_fired.get());
        assert_eq!(session.raw_suggestions()[0].content, "first");
    }

    #[test]
    fn test_deepest_match_wins_and_suggestions_prepend() {
        let actions = vec![suggesting(WordPattern::Wildcard, "outer")
            .named("outer")
            .child(suggesting("syn", "inner").named("inner"))];

        let session = parse(&actions, toks(&["cat", "syn"]), &MatcherState::default()).unwrap();
        assert_eq!(session.matched_action().and_then(Action::name), Some("inner"));
        assert_eq!(session.trail(), ["outer".to_string(), "inner".to_string()]);

        let contents: Vec<String> = session.suggestions().into_iter().map(|s| s.content).collect();
        assert_eq!(contents, vec!["suggest 1:inner", "suggest 2:outer"]);
        assert_eq!(session.consumed(), 2);
    }

    #[test]
    fn test_unmatched_child_keeps_ancestor_results() {
        let actions = vec![suggesting(WordPattern::Wildcard, "outer")
            .named("outer")
            .child(suggesting("syn", "inner"))];

        let session = parse(&actions, toks(&["cat", "xyz"]), &MatcherState::default()).unwrap();
        assert_eq!(session.matched_action().and_then(Action::name), Some("outer"));
        assert_eq!(session.matched_at(), Some(0));
        assert_eq!(session.raw_suggestions().len(), 1);
        assert_eq!(session.consumed(), 2);
    }

    #[test]
    fn test_no_recursion_without_children() {
        let actions = vec![suggesting("cat", "leaf").named("leaf")];
        let session = parse(&actions, toks(&["cat", "extra", "words"]), &MatcherState::default()).unwrap();
        assert_eq!(session.consumed(), 1);
        assert_eq!(session.trail(), ["leaf".to_string()]);
    }

    #[test]
    fn test_handlers_see_token_and_rest() {
        let actions = vec![Action::any().on_match(|word, rest, session| {
            session.set("word", word);
            session.set("rest", rest.join(" "));
            Ok(())
        })];

        let session = parse(&actions, toks(&["cat", "a", "b"]), &MatcherState::default()).unwrap();
        assert_eq!(session.get_str("word"), Some("cat"));
        assert_eq!(session.get_str("rest"), Some("a b"));
    }

    #[test]
    fn test_state_flows_to_children() {
        let actions = vec![Action::any()
            .on_match(|word, _, session| {
                session.set("word", word);
                Ok(())
            })
            .child(Action::any().suggest(|_, _, session| {
                let word = session.get_str("word").unwrap_or_default();
                Ok(vec![Suggestion::new(format!("{} more", word), "")])
            }))];

        let session = parse(&actions, toks(&["cat", "x"]), &MatcherState::default()).unwrap();
        assert_eq!(session.raw_suggestions()[0].content, "cat more");
    }

    #[test]
    fn test_handler_error_aborts_parse() {
        let actions = vec![Action::any().on_match(|_, _, _| anyhow::bail!("boom"))];
        let result = parse(&actions, toks(&["cat"]), &MatcherState::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_wildcard_shadows_later_siblings() {
        let actions = vec![
            Action::any().named("fallback"),
            Action::literal("help").named("help"),
        ];
        let session = parse(&actions, toks(&["help"]), &MatcherState::default()).unwrap();
        assert_eq!(session.matched_action().and_then(Action::name), Some("fallback"));
    }
}
