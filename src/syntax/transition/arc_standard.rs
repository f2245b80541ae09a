use std::collections::{HashSet, VecDeque};

use syntax::{graph, Arc, Index};
use syntax::transition::{Action, Derivation, Error};

/// Derives the canonical arc-standard action sequence for a gold tree.
///
/// Actions are chosen by a fixed priority at each step so that equal head
/// arrays always produce equal derivations. A reduce that attaches the
/// root's self arc comes first, then a left reduce of the stack top, then
/// a right reduce of the buffer front, and a shift otherwise. A right
/// reduce places the popped head back at the buffer front so that it can
/// keep collecting modifiers to its right.
pub fn arc_standard_oracle(heads: &[Index]) -> Result<Derivation, Error> {
    let n = heads.len();
    let gold: HashSet<Arc> = graph::arcs_from_heads(heads).into_iter().collect();
    let mut stack: Vec<Index> = Vec::with_capacity(n);
    let mut buffer: VecDeque<Index> = (0..n as Index).collect();
    let mut attached: Vec<Arc> = Vec::with_capacity(n);
    let mut attached_set: HashSet<Arc> = HashSet::with_capacity(n);
    let mut actions: Vec<Action> = Vec::with_capacity(2 * n);

    while let Some(&front) = buffer.front() {
        let top = match stack.last() {
            Some(&top) => top,
            None => {
                actions.push(Action::Shift);
                let front = buffer.pop_front().ok_or(Error::EmptyBuffer)?;
                stack.push(front);
                if buffer.is_empty() {
                    // the last token on an empty stack must be the root
                    let top = stack.pop().ok_or(Error::EmptyStack)?;
                    if gold.contains(&(top, top)) {
                        actions.push(Action::Done);
                        attached.push((top, top));
                        attached_set.insert((top, top));
                    } else {
                        stack.push(top);
                    }
                }
                continue;
            }
        };

        if gold.contains(&(top, top)) &&
            have_completed_expected_children(top, &gold, &attached_set)
        {
            actions.push(Action::ReduceRight);
            attached.push((top, top));
            attached_set.insert((top, top));
            stack.pop();
        } else if gold.contains(&(front, top)) {
            actions.push(Action::ReduceLeft);
            attached.push((front, top));
            attached_set.insert((front, top));
            if have_completed_expected_children(top, &gold, &attached_set) {
                stack.pop();
            } else {
                // the reduced head still expects children on its right
                actions.push(Action::Shift);
                let front = buffer.pop_front().ok_or(Error::EmptyBuffer)?;
                stack.push(front);
            }
        } else if gold.contains(&(top, front)) &&
            have_completed_expected_children(front, &gold, &attached_set)
        {
            actions.push(Action::ReduceRight);
            attached.push((top, front));
            attached_set.insert((top, front));
            let top = stack.pop().ok_or(Error::EmptyStack)?;
            buffer[0] = top;
        } else {
            actions.push(Action::Shift);
            let front = buffer.pop_front().ok_or(Error::EmptyBuffer)?;
            stack.push(front);
        }
    }

    if !stack.is_empty() || attached_set != gold {
        return Err(Error::IncompleteDerivation { stack_size: stack.len() });
    }
    Ok(Derivation {
        actions: actions,
        arcs: attached,
    })
}

/// Whether every gold modifier of `head` has already been attached.
pub fn have_completed_expected_children(
    head: Index,
    gold: &HashSet<Arc>,
    attached: &HashSet<Arc>,
) -> bool {
    gold.iter().all(|&(h, m)| {
        h != head || m == head || attached.contains(&(h, m))
    })
}

/// Replays an action sequence, returning the arcs in attachment order.
pub fn replay_actions(actions: &[Action], num_tokens: usize) -> Result<Vec<Arc>, Error> {
    let mut stack: Vec<Index> = Vec::with_capacity(num_tokens);
    let mut buffer: VecDeque<Index> = (0..num_tokens as Index).collect();
    let mut arcs: Vec<Arc> = Vec::with_capacity(num_tokens);
    for action in actions {
        match *action {
            Action::Shift => {
                let front = buffer.pop_front().ok_or(Error::EmptyBuffer)?;
                stack.push(front);
            }
            Action::ReduceLeft => {
                let top = stack.pop().ok_or(Error::EmptyStack)?;
                let front = *buffer.front().ok_or(Error::EmptyBuffer)?;
                arcs.push((front, top));
            }
            Action::ReduceRight => {
                let top = stack.pop().ok_or(Error::EmptyStack)?;
                match buffer.front_mut() {
                    Some(front) => {
                        arcs.push((top, *front));
                        *front = top;
                    }
                    None => return Err(Error::EmptyBuffer),
                }
            }
            Action::Done => {
                let top = stack.pop().ok_or(Error::EmptyStack)?;
                arcs.push((top, top));
            }
        }
    }
    Ok(arcs)
}

/// Maps attached arcs to their relation labels.
///
/// `rels` is indexed by modifier position and includes the root at index
/// `0`, so the terminal self arc resolves to the root relation.
pub fn relation_sequence(arcs: &[Arc], rels: &[Index]) -> Vec<Index> {
    arcs.iter().map(|&(_h, m)| rels[m as usize]).collect()
}
