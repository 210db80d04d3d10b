//! Vector transform commands
//!
//! Every index operation (union, intersect, append, reindex, range, drop)
//! returns, next to the new index, a [`VectorCommand`] describing how to
//! turn the vectors attached to the old index into vectors attached to the
//! new one. Commands are plain data: they hold addresses, never storage, and
//! can be inspected or composed before any column is touched. Execution is
//! the job of the vector builder in `keyframe-vector`.
//!
//! ```text
//! Combine(PreferLeft)
//! ├── Relocate[0, 1, 2, -, -] ── Return(0)
//! └── Relocate[-, -, -, 0, 1] ── Return(1)
//! ```

use crate::address::Address;
use std::fmt;

/// Per-element merge used by [`VectorCommand::Combine`]
///
/// Total over `(Option<T>, Option<T>) -> Option<T>` for every element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VectorMerge {
    /// Left value when present, otherwise the right one
    #[default]
    PreferLeft,
    /// Right value when present, otherwise the left one
    PreferRight,
}

impl VectorMerge {
    /// Merge one pair of optional cells
    pub fn apply<T>(self, left: Option<T>, right: Option<T>) -> Option<T> {
        match self {
            VectorMerge::PreferLeft => left.or(right),
            VectorMerge::PreferRight => right.or(left),
        }
    }
}

/// Symbolic description of how to produce a vector from argument vectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VectorCommand {
    /// Use argument vector `slot` unchanged
    Return(usize),

    /// Gather: target address `i` takes the source value at `mapping[i]`,
    /// or stays missing when the mapping has no source
    Relocate {
        /// Command producing the source vector
        source: Box<VectorCommand>,
        /// Source address per target address; the length is the new length
        mapping: Vec<Option<Address>>,
    },

    /// Positional combination of two vectors
    Combine {
        /// Left operand
        left: Box<VectorCommand>,
        /// Right operand
        right: Box<VectorCommand>,
        /// Per-element merge
        merge: VectorMerge,
    },

    /// Contiguous slice `start..end` of the source
    RestrictRange {
        /// Command producing the source vector
        source: Box<VectorCommand>,
        /// First address kept
        start: Address,
        /// First address past the kept range
        end: Address,
    },
}

impl VectorCommand {
    /// `Return(0)`: the single argument unchanged
    pub fn identity() -> Self {
        VectorCommand::Return(0)
    }

    /// Compose `source` with a gather
    pub fn relocate(source: VectorCommand, mapping: Vec<Option<Address>>) -> Self {
        VectorCommand::Relocate {
            source: Box::new(source),
            mapping,
        }
    }

    /// Combine two commands positionally
    pub fn combine(left: VectorCommand, right: VectorCommand, merge: VectorMerge) -> Self {
        VectorCommand::Combine {
            left: Box::new(left),
            right: Box::new(right),
            merge,
        }
    }

    /// Compose `source` with a range restriction
    pub fn restrict(source: VectorCommand, start: Address, end: Address) -> Self {
        VectorCommand::RestrictRange {
            source: Box::new(source),
            start,
            end,
        }
    }

    /// Argument slots referenced anywhere in the tree, sorted and deduplicated
    pub fn arguments(&self) -> Vec<usize> {
        let mut slots = Vec::new();
        self.collect_arguments(&mut slots);
        slots.sort_unstable();
        slots.dedup();
        slots
    }

    fn collect_arguments(&self, slots: &mut Vec<usize>) {
        match self {
            VectorCommand::Return(slot) => slots.push(*slot),
            VectorCommand::Relocate { source, .. } | VectorCommand::RestrictRange { source, .. } => {
                source.collect_arguments(slots)
            }
            VectorCommand::Combine { left, right, .. } => {
                left.collect_arguments(slots);
                right.collect_arguments(slots);
            }
        }
    }

    /// Whether the command returns its argument untouched
    pub fn is_identity(&self) -> bool {
        matches!(self, VectorCommand::Return(_))
    }
}

impl fmt::Display for VectorCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorCommand::Return(slot) => write!(f, "Return({})", slot),
            VectorCommand::Relocate { source, mapping } => {
                write!(f, "Relocate[")?;
                for (i, addr) in mapping.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    match addr {
                        Some(a) => write!(f, "{}", a.index())?,
                        None => write!(f, "-")?,
                    }
                }
                write!(f, "]({})", source)
            }
            VectorCommand::Combine { left, right, merge } => {
                write!(f, "Combine[{:?}]({}, {})", merge, left, right)
            }
            VectorCommand::RestrictRange { source, start, end } => {
                write!(f, "Range[{}..{}]({})", start.index(), end.index(), source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_side() {
        assert_eq!(VectorMerge::PreferLeft.apply(Some(1), Some(2)), Some(1));
        assert_eq!(VectorMerge::PreferLeft.apply(None, Some(2)), Some(2));
        assert_eq!(VectorMerge::PreferRight.apply(Some(1), Some(2)), Some(2));
        assert_eq!(VectorMerge::PreferRight.apply(Some(1), None), Some(1));
        assert_eq!(VectorMerge::PreferLeft.apply::<i32>(None, None), None);
    }

    #[test]
    fn test_arguments_collects_all_slots() {
        let cmd = VectorCommand::combine(
            VectorCommand::relocate(VectorCommand::Return(1), vec![None]),
            VectorCommand::restrict(VectorCommand::Return(0), Address::ZERO, Address::new(1)),
            VectorMerge::PreferLeft,
        );
        assert_eq!(cmd.arguments(), vec![0, 1]);
        assert!(!cmd.is_identity());
        assert!(VectorCommand::identity().is_identity());
    }

    #[test]
    fn test_display_renders_tree() {
        let cmd = VectorCommand::relocate(
            VectorCommand::identity(),
            vec![Some(Address::new(2)), None],
        );
        assert_eq!(cmd.to_string(), "Relocate[2, -](Return(0))");
    }
}
