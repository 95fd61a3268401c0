//! Property-based tests for the conversation store
//!
//! These verify the transcript invariants:
//! - Each submission adds exactly one user and one assistant turn
//! - The history captured before the k-th submission is exactly the
//!   first 2(k-1) turns of the transcript, in insertion order
//! - Reset always produces an empty transcript

use super::Session;
use crate::llm::TurnRole;
use proptest::prelude::*;

fn arb_submissions() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec(("[a-zA-Z0-9 .,?!]{0,60}", "[a-zA-Z0-9 .,?!]{0,60}"), 0..8)
}

proptest! {
    #[test]
    fn transcript_grows_two_turns_per_submission(pairs in arb_submissions()) {
        let mut session = Session::new();
        for (prompt, reply) in &pairs {
            session.append(TurnRole::User, prompt.clone());
            session.append(TurnRole::Assistant, reply.clone());
        }
        prop_assert_eq!(session.turns().len(), pairs.len() * 2);
    }

    #[test]
    fn history_is_a_prefix_of_the_transcript(pairs in arb_submissions()) {
        let mut session = Session::new();
        let mut histories = Vec::new();
        for (prompt, reply) in &pairs {
            // Snapshot the context the way the chat flow does: before the
            // new user turn is appended
            histories.push(session.history());
            session.append(TurnRole::User, prompt.clone());
            session.append(TurnRole::Assistant, reply.clone());
        }

        for (k, history) in histories.iter().enumerate() {
            prop_assert_eq!(history.len(), 2 * k);
            prop_assert_eq!(history.as_slice(), &session.turns()[..2 * k]);
        }
    }

    #[test]
    fn reset_always_empties_the_transcript(pairs in arb_submissions()) {
        let mut session = Session::new();
        for (prompt, reply) in &pairs {
            session.append(TurnRole::User, prompt.clone());
            session.append(TurnRole::Assistant, reply.clone());
        }
        session.clear();
        prop_assert!(session.turns().is_empty());
    }
}
