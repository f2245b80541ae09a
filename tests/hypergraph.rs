extern crate chartparse;

use std::collections::HashSet;
use std::rc::Rc;

use chartparse::syntax::Arc;
use chartparse::syntax::hypergraph::{self, Decoder, DerivationStep, Error, Item, ParseSession,
                                     ScoreItems, TransitionKind};

/// Scores an item by whether the arc it attaches is a gold arc.
struct GoldScorer {
    gold: HashSet<Arc>,
}

impl GoldScorer {
    fn new(heads: &[u32]) -> Self {
        let gold = heads
            .iter()
            .enumerate()
            .skip(1)
            .map(|(m, &h)| (h, m as u32))
            .collect();
        GoldScorer { gold: gold }
    }
}

impl ScoreItems for GoldScorer {
    fn score(&mut self, candidates: &[Rc<Item>]) -> Vec<f32> {
        candidates
            .iter()
            .map(|item| match item.merge_arc() {
                Some(ref arc) if self.gold.contains(arc) => 2.0,
                Some(_) => -1.0,
                None => 1.0,
            })
            .collect()
    }
}

struct ZeroScorer;

impl ScoreItems for ZeroScorer {
    fn score(&mut self, candidates: &[Rc<Item>]) -> Vec<f32> {
        vec![0.0; candidates.len()]
    }
}

#[test]
fn test_session_axioms() {
    let session = ParseSession::new(4, TransitionKind::ArcStandard).unwrap();
    assert_eq!(session.pending().len(), 4);
    for (i, (span, item)) in session.pending().iter().enumerate() {
        assert_eq!(*span, (i as u32, i as u32 + 1, i as u32));
        assert!(item.is_axiom());
    }
}

#[test]
fn test_unsupported_systems() {
    for &kind in &[
        TransitionKind::ArcEager,
        TransitionKind::Hybrid,
        TransitionKind::Mh4,
    ] {
        match ParseSession::new(4, kind) {
            Err(Error::UnsupportedSystem(k)) => assert_eq!(k, kind),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

#[test]
fn test_item_merge() {
    let left = Rc::new(Item::axiom(1));
    let right = Rc::new(Item::axiom(2));
    let item = Item::merge(2, left, right);
    assert_eq!(item.span(), (1, 3, 2));
    assert!(!item.is_axiom());
    assert_eq!(item.merge_arc(), Some((2, 1)));
    assert_eq!(item.arcs(), vec![(2, 1)]);
}

#[test]
fn test_chart_keeps_first_item() {
    let mut session = ParseSession::new(3, TransitionKind::ArcStandard).unwrap();
    let first = Rc::new(Item::merge(0, Rc::new(Item::axiom(0)), Rc::new(Item::axiom(1))));
    let second = Rc::new(
        Item::merge(0, Rc::new(Item::axiom(0)), Rc::new(Item::axiom(1))).with_rel(7),
    );
    session.update_chart(first);
    session.update_chart(second);
    let kept = session.chart_get(&(0, 2, 0)).unwrap();
    assert_eq!(kept.rel(), None);
}

#[test]
fn test_outgoing_expansions() {
    let mut session = ParseSession::new(3, TransitionKind::ArcStandard).unwrap();
    let ax0 = session.take_pending(&(0, 1, 0)).unwrap();
    let ax1 = session.take_pending(&(1, 2, 1)).unwrap();
    let ax2 = session.take_pending(&(2, 3, 2)).unwrap();
    session.update_chart(ax0);
    session.update_chart(ax2);
    let spans: Vec<_> = session
        .outgoing(&ax1)
        .iter()
        .map(|item| item.span())
        .collect();
    assert_eq!(spans, vec![(0, 2, 0), (0, 2, 1), (1, 3, 1), (1, 3, 2)]);
}

#[test]
fn test_gold_derivation() {
    let steps = hypergraph::gold_derivation(&[0, 2, 3, 0]).unwrap();
    assert_eq!(
        steps,
        vec![
            DerivationStep::new((1, 2, 1), (2, 3, 2), (1, 3, 2)),
            DerivationStep::new((1, 3, 2), (3, 4, 3), (1, 4, 3)),
            DerivationStep::new((0, 1, 0), (1, 4, 3), (0, 4, 0)),
        ]
    );
}

#[test]
fn test_gold_derivation_rejects_nonprojective() {
    match hypergraph::gold_derivation(&[0, 3, 4, 0, 3]) {
        Err(Error::Underivable) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_replay_agenda() {
    let steps = hypergraph::gold_derivation(&[0, 2, 3, 0]).unwrap();
    let rels = vec![0, 1, 2, 3];
    let pending = hypergraph::replay_agenda(&steps, &rels).unwrap();
    // four axioms and three derived items
    assert_eq!(pending.len(), 7);
    let derived = &pending[&(1, 3, 2)];
    // the merge attaches (2, 1), so the relation is the modifier's
    assert_eq!(derived.rel(), Some(1));
    assert!(pending.contains_key(&(0, 4, 0)));
}

#[test]
fn test_replay_agenda_rejects_undefined_child() {
    let steps = vec![DerivationStep::new((1, 3, 2), (3, 4, 3), (1, 4, 3))];
    match hypergraph::replay_agenda(&steps, &[]) {
        Err(Error::UndefinedChild(span)) => assert_eq!(span, (1, 3, 2)),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_replay_agenda_rejects_invalid_step() {
    let steps = vec![DerivationStep::new((0, 1, 0), (1, 2, 1), (0, 2, 2))];
    match hypergraph::replay_agenda(&steps, &[]) {
        Err(Error::InvalidStep(span)) => assert_eq!(span, (0, 2, 2)),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_decode_recovers_gold_tree() {
    let heads = vec![0, 2, 3, 0];
    let mut session = ParseSession::new(4, TransitionKind::ArcStandard).unwrap();
    let mut scorer = GoldScorer::new(&heads);
    let decoded = Decoder::default().decode(&mut session, &mut scorer).unwrap();
    assert_eq!(decoded.heads, heads);
    assert_eq!(decoded.arcs, vec![(0, 3), (2, 1), (3, 2)]);
}

#[test]
fn test_decode_single_word() {
    let mut session = ParseSession::new(1, TransitionKind::ArcStandard).unwrap();
    let decoded = Decoder::default()
        .decode(&mut session, &mut ZeroScorer)
        .unwrap();
    assert_eq!(decoded.heads, vec![0]);
    assert!(decoded.arcs.is_empty());
}

#[test]
fn test_decode_deadlock() {
    let mut session = ParseSession::new(2, TransitionKind::ArcStandard).unwrap();
    // strand the second axiom so that the agenda dries up
    session.take_pending(&(1, 2, 1)).unwrap();
    match Decoder::default().decode(&mut session, &mut ZeroScorer) {
        Err(Error::Deadlock) => {}
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_forced_replay_reaches_goal() {
    let heads = vec![0, 2, 3, 0];
    let steps = hypergraph::gold_derivation(&heads).unwrap();
    let rels = vec![0, 1, 2, 3];
    let mut session =
        ParseSession::with_agenda(4, TransitionKind::ArcStandard, &steps, &rels).unwrap();
    assert_eq!(session.pending_goal().map(|g| g.span()), Some((0, 4, 0)));
    let decoder = Decoder::default();
    let mut arcs = vec![];
    for step in &steps {
        let item = session.pending()[&step.derived].clone();
        if let Some(arc) = decoder.step(&mut session, &mut ZeroScorer, item) {
            arcs.push(arc);
        }
    }
    assert_eq!(arcs, vec![(2, 1), (3, 2), (0, 3)]);
    let (best_heads, best_arcs) = session.best_path().unwrap();
    assert_eq!(best_heads, heads);
    assert_eq!(best_arcs, vec![(0, 3), (2, 1), (3, 2)]);
}

#[test]
fn test_pad_roundtrip() {
    let steps = hypergraph::gold_derivation(&[0, 2, 3, 0]).unwrap();
    let table = hypergraph::pad_derivation(&steps, 5);
    assert_eq!(table.len(), 5);
    assert_eq!(table[3], [[-1; 3]; 3]);
    assert_eq!(hypergraph::unpad_derivation(&table), steps);
}
