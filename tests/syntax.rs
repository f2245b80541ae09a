extern crate chartparse;

mod test_utils;

use std::collections::HashSet;

use chartparse::lang::{Phrasal, Tokenized};
use chartparse::preprocessing::Vocab;
use chartparse::syntax::{graph, transition, Arc, Index};
use chartparse::syntax::transition::Action;

fn gold_heads<S: Phrasal>(sentence: &S) -> Vec<Index> {
    sentence
        .tokens()
        .iter()
        .map(|token| token.head().unwrap() as Index)
        .collect()
}

#[test]
fn test_arcs_from_heads() {
    let heads = vec![0, 2, 3, 0];
    let arcs = graph::arcs_from_heads(&heads);
    assert_eq!(arcs, vec![(0, 0), (2, 1), (3, 2), (0, 3)]);
    assert_eq!(graph::heads_from_arcs(&arcs, 4), heads);
}

#[test]
fn test_sentence_root() {
    assert_eq!(graph::sentence_root(&[0, 2, 3, 0]), Some(3));
    assert_eq!(graph::sentence_root(&[0, 2, 0, 2]), Some(2));
    // two words claim the root
    assert_eq!(graph::sentence_root(&[0, 0, 0]), None);
}

#[test]
fn test_contains_cycles() {
    assert!(!graph::contains_cycles(&[0, 2, 3, 0]));
    assert!(!graph::contains_cycles(&[0, 2, 0, 2]));
    // 1 and 2 head each other
    assert!(graph::contains_cycles(&[0, 2, 1, 0]));
    // the root's self reference is not a cycle
    assert!(!graph::contains_cycles(&[0]));
}

#[test]
fn test_is_projective() {
    assert!(graph::is_projective(&[0, 2, 3, 0]));
    assert!(graph::is_projective(&[0, 2, 0, 2]));
    // (4, 2) crosses (0, 3)
    assert!(!graph::is_projective(&[0, 3, 4, 0, 3]));
}

#[test]
fn test_is_well_formed() {
    assert!(graph::is_well_formed(&[0, 2, 3, 0]));
    assert!(!graph::is_well_formed(&[0, 3, 4, 0, 3]));
    assert!(!graph::is_well_formed(&[0, 2, 1, 0]));
}

#[test]
fn test_oracle_action_sequence() {
    let derivation = transition::arc_standard_oracle(&[0, 2, 3, 0]).unwrap();
    assert_eq!(
        derivation.actions,
        vec![
            Action::Shift,
            Action::Shift,
            Action::ReduceLeft,
            Action::Shift,
            Action::ReduceLeft,
            Action::ReduceRight,
            Action::Shift,
            Action::Done,
        ]
    );
    assert_eq!(derivation.arcs, vec![(2, 1), (3, 2), (0, 3), (0, 0)]);
}

#[test]
fn test_oracle_right_reduces() {
    let derivation = transition::arc_standard_oracle(&[0, 2, 0, 2]).unwrap();
    assert_eq!(
        derivation.actions,
        vec![
            Action::Shift,
            Action::Shift,
            Action::ReduceLeft,
            Action::Shift,
            Action::ReduceRight,
            Action::ReduceRight,
            Action::Shift,
            Action::Done,
        ]
    );
    assert_eq!(derivation.arcs, vec![(2, 1), (2, 3), (0, 2), (0, 0)]);
}

#[test]
fn test_oracle_is_deterministic() {
    let heads = vec![0, 2, 3, 0];
    let first = transition::arc_standard_oracle(&heads).unwrap();
    let second = transition::arc_standard_oracle(&heads).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_oracle_rejects_nonprojective() {
    assert!(transition::arc_standard_oracle(&[0, 3, 4, 0, 3]).is_err());
}

#[test]
fn test_oracle_roundtrip() {
    for sentence in &test_utils::mock::provide_conll_sentences() {
        let heads = gold_heads(sentence);
        assert!(graph::is_well_formed(&heads));
        let derivation = transition::arc_standard_oracle(&heads).unwrap();
        let replayed =
            transition::replay_actions(&derivation.actions, heads.len()).unwrap();
        assert_eq!(replayed, derivation.arcs);
        assert_eq!(graph::heads_from_arcs(&replayed, heads.len() as Index), heads);
    }
}

#[test]
fn test_reduces_attach_completed_modifiers() {
    let mut trees: Vec<Vec<Index>> = test_utils::mock::provide_conll_sentences()
        .iter()
        .map(|sentence| gold_heads(sentence))
        .collect();
    trees.push(vec![0, 2, 3, 0, 3]);
    trees.push(vec![0, 3, 1, 0]);
    for heads in &trees {
        let derivation = transition::arc_standard_oracle(heads).unwrap();
        let gold: HashSet<Arc> = graph::arcs_from_heads(heads).into_iter().collect();
        let mut attached: HashSet<Arc> = HashSet::new();
        let mut arcs = derivation.arcs.iter();
        for action in &derivation.actions {
            if !action.is_reduce() {
                continue;
            }
            let &(h, m) = arcs.next().unwrap();
            assert!(
                transition::have_completed_expected_children(m, &gold, &attached),
                "{} attaches {} before its children in {:?}",
                action,
                m,
                heads
            );
            attached.insert((h, m));
        }
        assert!(arcs.next().is_none());
        assert_eq!(attached, gold);
    }
}

#[test]
fn test_replay_rejects_corrupt_sequences() {
    assert!(transition::replay_actions(&[Action::ReduceLeft], 2).is_err());
    assert!(transition::replay_actions(&[Action::Done], 2).is_err());
    assert!(
        transition::replay_actions(&[Action::Shift, Action::Shift, Action::Shift], 2).is_err()
    );
}

#[test]
fn test_relation_sequence() {
    let mut label_v = Vocab::with_default_token("root".to_string());
    let sentences = test_utils::mock::provide_conll_sentences();
    let sentence = &sentences[0];
    let heads = gold_heads(sentence);
    let rels: Vec<u32> = sentence
        .tokens()
        .iter()
        .map(|token| label_v.add(token.deprel().unwrap()))
        .collect();
    let derivation = transition::arc_standard_oracle(&heads).unwrap();
    let relations = transition::relation_sequence(&derivation.arcs, &rels);
    assert_eq!(relations.len(), derivation.arcs.len());
    // the terminal self arc carries the root relation
    assert_eq!(
        label_v.lookup(*relations.last().unwrap()),
        Some("root")
    );
    let num_reduces = derivation
        .actions
        .iter()
        .filter(|action| action.is_reduce())
        .count();
    assert_eq!(num_reduces, relations.len());
}
