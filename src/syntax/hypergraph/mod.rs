use std::collections::{BTreeMap, HashMap};
use std::error;
use std::fmt;
use std::rc::Rc;

use syntax::{Arc, Index};

pub use self::item::*;

mod item;

/// The transition system a chart is expanded under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionKind {
    ArcStandard,
    ArcEager,
    Hybrid,
    Mh4,
}

impl TransitionKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            TransitionKind::ArcStandard => "arc-standard",
            TransitionKind::ArcEager => "arc-eager",
            TransitionKind::Hybrid => "hybrid",
            TransitionKind::Mh4 => "mh4",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug)]
pub enum Error {
    /// The requested transition system has no chart expansion yet.
    UnsupportedSystem(TransitionKind),
    /// A derivation step referenced a non-axiom item that was never
    /// derived.
    UndefinedChild(Span),
    /// A derivation step's output does not follow from its children.
    InvalidStep(Span),
    /// The chart holds no item covering the whole sentence.
    MissingGoal,
    /// The gold tree admits no bottom-up derivation.
    Underivable,
    /// No candidate remains although the goal has not been reached.
    Deadlock,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UnsupportedSystem(kind) => {
                write!(f, "the transition system `{}` is not supported", kind)
            }
            Error::UndefinedChild((i, j, h)) => {
                write!(f, "the child item ({}, {}, {}) has not been derived", i, j, h)
            }
            Error::InvalidStep((i, j, h)) => {
                write!(
                    f,
                    "the item ({}, {}, {}) does not follow from its children",
                    i,
                    j,
                    h
                )
            }
            Error::MissingGoal => write!(f, "no item covers the whole sentence"),
            Error::Underivable => write!(f, "the tree admits no bottom-up derivation"),
            Error::Deadlock => write!(f, "no candidate remains before reaching the goal"),
        }
    }
}

impl error::Error for Error {
    fn description(&self) -> &str {
        match *self {
            Error::UnsupportedSystem(_) => "unsupported transition system",
            Error::UndefinedChild(_) => "undefined child item",
            Error::InvalidStep(_) => "invalid derivation step",
            Error::MissingGoal => "missing goal item",
            Error::Underivable => "underivable tree",
            Error::Deadlock => "deadlock",
        }
    }

    fn cause(&self) -> Option<&error::Error> {
        None
    }
}

/// The chart state for one sentence of `n` positions including the root.
///
/// `chart` holds committed items keyed by signature with first-write-wins
/// semantics, `pending` holds candidate items awaiting commitment and
/// `bucket` counts how often each signature has been consumed as a child.
#[derive(Debug)]
pub struct ParseSession {
    n: Index,
    kind: TransitionKind,
    chart: BTreeMap<Span, Rc<Item>>,
    pending: BTreeMap<Span, Rc<Item>>,
    bucket: HashMap<Span, u32>,
}

impl ParseSession {
    /// Seeds the agenda with the axioms `(i, i + 1, i)` for every
    /// position.
    pub fn new(num_tokens: Index, kind: TransitionKind) -> Result<Self, Error> {
        match kind {
            TransitionKind::ArcStandard => {}
            _ => return Err(Error::UnsupportedSystem(kind)),
        }
        let mut pending = BTreeMap::new();
        for i in 0..num_tokens {
            let item = Rc::new(Item::axiom(i));
            pending.insert(item.span(), item);
        }
        Ok(ParseSession {
            n: num_tokens,
            kind: kind,
            chart: BTreeMap::new(),
            pending: pending,
            bucket: HashMap::new(),
        })
    }

    /// Replaces the agenda with the items of a gold derivation.
    pub fn with_agenda(
        num_tokens: Index,
        kind: TransitionKind,
        steps: &[DerivationStep],
        rels: &[Index],
    ) -> Result<Self, Error> {
        let mut session = Self::new(num_tokens, kind)?;
        session.pending = replay_agenda(steps, rels)?;
        Ok(session)
    }

    #[inline]
    pub fn num_tokens(&self) -> Index {
        self.n
    }

    #[inline]
    pub fn kind(&self) -> TransitionKind {
        self.kind
    }

    pub fn pending(&self) -> &BTreeMap<Span, Rc<Item>> {
        &self.pending
    }

    pub fn chart_get(&self, span: &Span) -> Option<&Rc<Item>> {
        self.chart.get(span)
    }

    pub fn take_pending(&mut self, span: &Span) -> Option<Rc<Item>> {
        self.pending.remove(span)
    }

    pub fn push_pending(&mut self, item: Rc<Item>) {
        self.pending.insert(item.span(), item);
    }

    /// Commits an item. An already committed signature keeps its first
    /// item.
    pub fn update_chart(&mut self, item: Rc<Item>) {
        self.chart.entry(item.span()).or_insert(item);
    }

    /// Marks the item's children as consumed.
    pub fn add_bucket(&mut self, item: &Item) {
        if let Some((l, r)) = item.children() {
            *self.bucket.entry(l.span()).or_insert(0) += 1;
            *self.bucket.entry(r.span()).or_insert(0) += 1;
        }
    }

    /// Whether a child of the item has already been consumed elsewhere.
    pub fn is_consumed(&self, item: &Item) -> bool {
        match item.children() {
            Some((l, r)) => {
                self.bucket.contains_key(&l.span()) || self.bucket.contains_key(&r.span())
            }
            None => false,
        }
    }

    /// The pending item covering the whole sentence, if any.
    pub fn pending_goal(&self) -> Option<&Rc<Item>> {
        self.pending
            .iter()
            .find(|&(&(i, j, _), _)| i == 0 && j == self.n)
            .map(|(_, item)| item)
    }

    /// The committed item covering the whole sentence, if any.
    pub fn goal(&self) -> Option<&Rc<Item>> {
        self.chart
            .iter()
            .find(|&(&(i, j, _), _)| i == 0 && j == self.n)
            .map(|(_, item)| item)
    }

    /// Expands an item against committed neighbors on both sides.
    ///
    /// A left neighbor `(k, i, g)` yields `(k, j, g)` and `(k, j, h)`, a
    /// right neighbor `(j, k, g)` yields `(i, k, h)` and `(i, k, g)`.
    pub fn outgoing(&self, item: &Rc<Item>) -> Vec<Rc<Item>> {
        let (i, j, h) = item.span();
        let mut all = vec![];
        for k in 0..i {
            for g in k..i {
                if let Some(left) = self.chart.get(&(k, i, g)) {
                    all.push(Rc::new(Item::merge(g, left.clone(), item.clone())));
                    all.push(Rc::new(Item::merge(h, left.clone(), item.clone())));
                }
            }
        }
        for k in (j + 1)..(self.n + 1) {
            for g in j..k {
                if let Some(right) = self.chart.get(&(j, k, g)) {
                    all.push(Rc::new(Item::merge(h, item.clone(), right.clone())));
                    all.push(Rc::new(Item::merge(g, item.clone(), right.clone())));
                }
            }
        }
        all
    }

    /// Extracts the head array and arc set of the best committed goal
    /// derivation.
    ///
    /// Arcs are the intersection of the goal's transitive arcs with the
    /// arcs of items reachable below it, plus the goal's own merge arc,
    /// which guards against stale arcs carried by shared sub-items.
    pub fn best_path(&self) -> Result<(Vec<Index>, Vec<Arc>), Error> {
        let goal = self.goal().ok_or(Error::MissingGoal)?;
        let mut visited_arcs: Vec<Arc> = vec![];
        let mut stack: Vec<&Rc<Item>> = vec![];
        if let Some((l, r)) = goal.children() {
            stack.push(l);
            stack.push(r);
        }
        while let Some(item) = stack.pop() {
            visited_arcs.extend(item.arcs());
            if let Some((l, r)) = item.children() {
                stack.push(l);
                stack.push(r);
            }
        }
        let mut arcs: Vec<Arc> = goal.arcs()
            .into_iter()
            .filter(|arc| visited_arcs.contains(arc))
            .collect();
        if let Some(arc) = goal.merge_arc() {
            if !arcs.contains(&arc) {
                arcs.push(arc);
            }
        }
        let mut heads = vec![0; self.n as usize];
        for &(u, v) in &arcs {
            heads[v as usize] = u;
        }
        arcs.sort();
        arcs.dedup();
        Ok((heads, arcs))
    }
}

/// Scores a slice of candidate items, highest is best.
pub trait ScoreItems {
    fn score(&mut self, candidates: &[Rc<Item>]) -> Vec<f32>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub heads: Vec<Index>,
    pub arcs: Vec<Arc>,
}

/// A greedy, non-backtracking easy-first decoder.
#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    prune: bool,
}

impl Decoder {
    pub fn new(prune: bool) -> Self {
        Decoder { prune: prune }
    }

    /// Commits `item`, expands it and proposes the best expansion onto the
    /// agenda. Returns the arc the item attaches.
    ///
    /// An item whose child was already consumed elsewhere contributes its
    /// arc but is not committed.
    pub fn step<S: ScoreItems>(
        &self,
        session: &mut ParseSession,
        scorer: &mut S,
        item: Rc<Item>,
    ) -> Option<Arc> {
        let _ = session.take_pending(&item.span());
        let attached = item.merge_arc();
        if session.is_consumed(&item) {
            return attached;
        }
        session.update_chart(item.clone());
        session.add_bucket(&item);
        let expansions = session.outgoing(&item);
        if !expansions.is_empty() {
            let scores = scorer.score(&expansions);
            debug_assert_eq!(scores.len(), expansions.len());
            session.push_pending(expansions[argmax(&scores)].clone());
        }
        attached
    }

    /// Runs the agenda until an item covers the whole sentence.
    ///
    /// The sentence is lost when no candidate remains before the goal is
    /// reached.
    pub fn decode<S: ScoreItems>(
        &self,
        session: &mut ParseSession,
        scorer: &mut S,
    ) -> Result<Decoded, Error> {
        loop {
            let candidates: Vec<Rc<Item>> = session
                .pending()
                .values()
                .filter(|item| !self.prune || !session.is_consumed(item))
                .cloned()
                .collect();
            if candidates.is_empty() {
                return Err(Error::Deadlock);
            }
            let scores = scorer.score(&candidates);
            debug_assert_eq!(scores.len(), candidates.len());
            let item = candidates[argmax(&scores)].clone();
            let goal_reached = item.i() == 0 && item.j() == session.num_tokens();
            self.step(session, scorer, item);
            if goal_reached {
                break;
            }
        }
        let (heads, arcs) = session.best_path()?;
        Ok(Decoded {
            heads: heads,
            arcs: arcs,
        })
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(true)
    }
}

#[inline]
fn argmax(scores: &[f32]) -> usize {
    let mut best = 0;
    for (index, &score) in scores.iter().enumerate().skip(1) {
        if score > scores[best] {
            best = index;
        }
    }
    best
}

/// Rebuilds the agenda of a recorded gold derivation.
///
/// Children are resolved against previously derived items, or created on
/// demand when their signature is an axiom. `rels` is indexed by modifier
/// position including the root.
pub fn replay_agenda(
    steps: &[DerivationStep],
    rels: &[Index],
) -> Result<BTreeMap<Span, Rc<Item>>, Error> {
    let mut pending: BTreeMap<Span, Rc<Item>> = BTreeMap::new();
    for step in steps {
        let left = resolve_child(&mut pending, step.left)?;
        let right = resolve_child(&mut pending, step.right)?;
        let (_, _, h) = step.derived;
        if step.derived != (left.i(), right.j(), h) || (h != left.h() && h != right.h()) {
            return Err(Error::InvalidStep(step.derived));
        }
        let modifier = if left.h() == h { right.h() } else { left.h() };
        let mut item = Item::merge(h, left, right);
        if let Some(&rel) = rels.get(modifier as usize) {
            item = item.with_rel(rel);
        }
        let item = Rc::new(item);
        pending.insert(item.span(), item);
    }
    Ok(pending)
}

fn resolve_child(
    pending: &mut BTreeMap<Span, Rc<Item>>,
    span: Span,
) -> Result<Rc<Item>, Error> {
    let (i, j, h) = span;
    if j == i + 1 && h == i {
        let item = pending
            .entry(span)
            .or_insert_with(|| Rc::new(Item::axiom(i)));
        Ok(item.clone())
    } else {
        pending.get(&span).cloned().ok_or(Error::UndefinedChild(span))
    }
}

/// Derives the canonical bottom-up merge order for a gold tree.
///
/// At each step, the leftmost adjacent pair where the modifier has
/// collected its whole subtree is merged. Projective trees always admit
/// such a pair.
pub fn gold_derivation(heads: &[Index]) -> Result<Vec<DerivationStep>, Error> {
    let n = heads.len();
    // subtree intervals, propagated to a fixpoint
    let mut lo: Vec<Index> = (0..n as Index).collect();
    let mut hi: Vec<Index> = (1..(n + 1) as Index).collect();
    loop {
        let mut changed = false;
        for m in 1..n {
            let h = heads[m] as usize;
            if h == m {
                continue;
            }
            if lo[m] < lo[h] {
                lo[h] = lo[m];
                changed = true;
            }
            if hi[m] > hi[h] {
                hi[h] = hi[m];
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let saturated = |item: &Item| {
        let h = item.h() as usize;
        lo[h] == item.i() && hi[h] == item.j()
    };

    let mut spans: Vec<Rc<Item>> = (0..n as Index).map(|i| Rc::new(Item::axiom(i))).collect();
    let mut steps = Vec::with_capacity(n.saturating_sub(1));
    while spans.len() > 1 {
        let mut merge = None;
        for index in 0..spans.len() - 1 {
            let a = &spans[index];
            let b = &spans[index + 1];
            if heads[b.h() as usize] == a.h() && saturated(b.as_ref()) {
                merge = Some((index, a.h()));
                break;
            }
            if heads[a.h() as usize] == b.h() && saturated(a.as_ref()) {
                merge = Some((index, b.h()));
                break;
            }
        }
        let (index, h) = match merge {
            Some(found) => found,
            None => return Err(Error::Underivable),
        };
        let left = spans[index].clone();
        let right = spans[index + 1].clone();
        let derived = Rc::new(Item::merge(h, left.clone(), right.clone()));
        steps.push(DerivationStep::new(
            left.span(),
            right.span(),
            derived.span(),
        ));
        spans.remove(index + 1);
        spans[index] = derived;
    }
    Ok(steps)
}
