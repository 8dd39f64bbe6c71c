//! Order-independent composition of the three dependency results.

use thiserror::Error;

use crate::aggregation::types::{DependencyResult, Insult};

/// Breach of the one-noun-two-adjectives wiring invariant. This signals a
/// programming error in the caller, not a runtime dependency condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ComposeError {
    #[error("expected exactly one noun, got {0}")]
    NounCount(usize),

    #[error("expected exactly two adjectives, got {0}")]
    AdjectiveCount(usize),
}

/// Merge three resolved payloads into one insult.
///
/// Classification goes by the tag each result carries, not by call order:
/// concurrent completion order is meaningless. The two adjectives land in
/// `adj1` and `adj2` in the order encountered, with no further guarantee.
pub fn compose(results: [DependencyResult; 3]) -> Result<Insult, ComposeError> {
    let mut noun = None;
    let mut nouns_seen = 0usize;
    let mut adjectives: Vec<String> = Vec::with_capacity(2);

    for result in results {
        match result {
            DependencyResult::Noun(value) => {
                nouns_seen += 1;
                noun = Some(value);
            }
            DependencyResult::Adjective(value) => adjectives.push(value),
        }
    }

    if nouns_seen != 1 {
        return Err(ComposeError::NounCount(nouns_seen));
    }
    if adjectives.len() != 2 {
        return Err(ComposeError::AdjectiveCount(adjectives.len()));
    }

    let mut adjectives = adjectives.into_iter();
    Ok(Insult {
        noun: noun.unwrap_or_default(),
        adj1: adjectives.next().unwrap_or_default(),
        adj2: adjectives.next().unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noun() -> DependencyResult {
        DependencyResult::Noun("nincompoop".into())
    }

    fn adjective(word: &str) -> DependencyResult {
        DependencyResult::Adjective(word.into())
    }

    #[test]
    fn composes_in_call_order() {
        let insult = compose([noun(), adjective("vain"), adjective("silly")]).unwrap();
        assert_eq!(insult.noun, "nincompoop");
        assert_eq!(insult.adj1, "vain");
        assert_eq!(insult.adj2, "silly");
    }

    #[test]
    fn invariant_under_completion_order_permutation() {
        let orderings = [
            [noun(), adjective("vain"), adjective("silly")],
            [adjective("vain"), noun(), adjective("silly")],
            [adjective("vain"), adjective("silly"), noun()],
        ];
        for results in orderings {
            let insult = compose(results).unwrap();
            assert_eq!(insult.noun, "nincompoop");
            assert_eq!(insult.adj1, "vain");
            assert_eq!(insult.adj2, "silly");
        }
    }

    #[test]
    fn rejects_missing_noun() {
        let err = compose([adjective("a"), adjective("b"), adjective("c")]).unwrap_err();
        assert_eq!(err, ComposeError::NounCount(0));
    }

    #[test]
    fn rejects_surplus_nouns() {
        let err = compose([noun(), noun(), adjective("a")]).unwrap_err();
        assert_eq!(err, ComposeError::NounCount(2));
    }

    #[test]
    fn serializes_to_the_wire_shape() {
        let insult = compose([noun(), adjective("vain"), adjective("silly")]).unwrap();
        let json = serde_json::to_value(&insult).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"noun": "nincompoop", "adj1": "vain", "adj2": "silly"})
        );
    }
}
