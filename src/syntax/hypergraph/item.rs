use std::rc::Rc;

use syntax::{Arc, Index};

/// An item signature `(i, j, h)`: the half-open span `[i, j)` headed by
/// `h`.
pub type Span = (Index, Index, Index);

/// A chart item. Non-axiom items keep their two children so that the
/// derivation below them can be recovered.
#[derive(Debug, Clone)]
pub struct Item {
    i: Index,
    j: Index,
    h: Index,
    left: Option<Rc<Item>>,
    right: Option<Rc<Item>>,
    rel: Option<Index>,
}

impl Item {
    /// The single-word item `(i, i + 1, i)`.
    pub fn axiom(i: Index) -> Self {
        Item {
            i: i,
            j: i + 1,
            h: i,
            left: None,
            right: None,
            rel: None,
        }
    }

    /// Joins two adjacent items under head `h`, which must be the head of
    /// one of them.
    pub fn merge(h: Index, left: Rc<Item>, right: Rc<Item>) -> Self {
        debug_assert_eq!(left.j, right.i);
        debug_assert!(h == left.h || h == right.h);
        Item {
            i: left.i,
            j: right.j,
            h: h,
            left: Some(left),
            right: Some(right),
            rel: None,
        }
    }

    pub fn with_rel(mut self, rel: Index) -> Self {
        self.rel = Some(rel);
        self
    }

    #[inline]
    pub fn i(&self) -> Index {
        self.i
    }

    #[inline]
    pub fn j(&self) -> Index {
        self.j
    }

    #[inline]
    pub fn h(&self) -> Index {
        self.h
    }

    #[inline]
    pub fn rel(&self) -> Option<Index> {
        self.rel
    }

    #[inline]
    pub fn span(&self) -> Span {
        (self.i, self.j, self.h)
    }

    #[inline]
    pub fn is_axiom(&self) -> bool {
        self.j == self.i + 1 && self.h == self.i
    }

    pub fn children(&self) -> Option<(&Rc<Item>, &Rc<Item>)> {
        match (self.left.as_ref(), self.right.as_ref()) {
            (Some(l), Some(r)) => Some((l, r)),
            _ => None,
        }
    }

    /// The arc attached by this item's merge: the child head that differs
    /// from the item's head is the modifier.
    pub fn merge_arc(&self) -> Option<Arc> {
        self.children().map(|(l, r)| {
            if l.h == self.h {
                (self.h, r.h)
            } else {
                (self.h, l.h)
            }
        })
    }

    /// All arcs entailed by the derivation below this item.
    pub fn arcs(&self) -> Vec<Arc> {
        let mut arcs = vec![];
        let mut stack: Vec<&Item> = vec![self];
        while let Some(item) = stack.pop() {
            if let Some((l, r)) = item.children() {
                let modifier = if l.h == item.h { r.h } else { l.h };
                arcs.push((item.h, modifier));
                stack.push(l);
                stack.push(r);
            }
        }
        arcs
    }
}

impl PartialEq for Item {
    fn eq(&self, other: &Item) -> bool {
        self.span() == other.span()
    }
}

impl Eq for Item {}

/// One step of a derivation: two child signatures and the signature they
/// derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivationStep {
    pub left: Span,
    pub right: Span,
    pub derived: Span,
}

impl DerivationStep {
    pub fn new(left: Span, right: Span, derived: Span) -> Self {
        DerivationStep {
            left: left,
            right: right,
            derived: derived,
        }
    }
}

const PAD: i32 = -1;

#[inline]
fn span_to_row(span: Span) -> [i32; 3] {
    [span.0 as i32, span.1 as i32, span.2 as i32]
}

#[inline]
fn row_to_span(row: [i32; 3]) -> Span {
    (row[0] as Index, row[1] as Index, row[2] as Index)
}

/// Encodes a derivation as a fixed-size table of signature rows, padded
/// with `-1` up to `rows` steps.
pub fn pad_derivation(steps: &[DerivationStep], rows: usize) -> Vec<[[i32; 3]; 3]> {
    debug_assert!(steps.len() <= rows);
    let mut table = Vec::with_capacity(rows);
    for step in steps {
        table.push([
            span_to_row(step.left),
            span_to_row(step.right),
            span_to_row(step.derived),
        ]);
    }
    while table.len() < rows {
        table.push([[PAD; 3]; 3]);
    }
    table
}

/// Decodes a padded derivation table, stopping at the first padding row.
pub fn unpad_derivation(table: &[[[i32; 3]; 3]]) -> Vec<DerivationStep> {
    let mut steps = Vec::with_capacity(table.len());
    for row in table {
        if row[0][0] == PAD {
            break;
        }
        steps.push(DerivationStep::new(
            row_to_span(row[0]),
            row_to_span(row[1]),
            row_to_span(row[2]),
        ));
    }
    steps
}
