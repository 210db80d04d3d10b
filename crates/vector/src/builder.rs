//! Command executor
//!
//! [`VectorBuilder`] interprets a [`VectorCommand`] tree bottom-up against a
//! list of argument vectors:
//! - `Return(slot)` hands back `args[slot]` itself (shared, not copied)
//! - `Relocate` gathers into a new vector sized to the target address space
//! - `Combine` builds both subtrees and merges them positionally
//! - `RestrictRange` copies a contiguous address range
//!
//! Element types are preserved. The only place two element kinds can meet is
//! a `Combine` over columns of different kinds; [`VectorBuilder::build_column`]
//! boxes those arguments into [`Column::Value`] before merging.

use crate::column::Column;
use crate::vector::Vector;
use keyframe_core::{Address, Error, Result, ValueKind, VectorCommand};
use tracing::{debug, trace};

/// Interpreter for vector commands
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorBuilder;

impl VectorBuilder {
    /// Create a builder
    pub fn new() -> Self {
        VectorBuilder
    }

    /// Execute `command` over typed argument vectors
    ///
    /// # Errors
    ///
    /// [`Error::InvalidCommand`] if the command names an argument slot that
    /// was not supplied, relocates from an address outside its source, or
    /// restricts to a range outside its source.
    pub fn build<T: Clone>(&self, command: &VectorCommand, args: &[Vector<T>]) -> Result<Vector<T>> {
        match command {
            VectorCommand::Return(slot) => args.get(*slot).cloned().ok_or_else(|| {
                Error::InvalidCommand(format!(
                    "argument {} requested, {} supplied",
                    slot,
                    args.len()
                ))
            }),

            VectorCommand::Relocate { source, mapping } => {
                let source = self.build(source, args)?;
                if is_identity_mapping(mapping, source.len()) {
                    return Ok(source);
                }
                mapping
                    .iter()
                    .map(|addr| match addr {
                        None => Ok(None),
                        Some(a) if source.contains_address(*a) => Ok(source.get(*a).cloned()),
                        Some(a) => Err(Error::InvalidCommand(format!(
                            "relocation from {} outside source of length {}",
                            a,
                            source.len()
                        ))),
                    })
                    .collect::<Result<Vec<_>>>()
                    .map(Vector::from_optional)
            }

            VectorCommand::Combine { left, right, merge } => {
                let left = self.build(left, args)?;
                let right = self.build(right, args)?;
                let len = left.len().max(right.len());
                Ok(Address::range(len)
                    .map(|a| merge.apply(left.get(a), right.get(a)).cloned())
                    .collect())
            }

            VectorCommand::RestrictRange { source, start, end } => {
                let source = self.build(source, args)?;
                if start > end || end.index() > source.len() {
                    return Err(Error::InvalidCommand(format!(
                        "range {}..{} outside source of length {}",
                        start,
                        end,
                        source.len()
                    )));
                }
                if start.index() == 0 && end.index() == source.len() {
                    return Ok(source);
                }
                Ok(source
                    .iter_optional()
                    .skip(start.index())
                    .take(end.index() - start.index())
                    .map(|v| v.cloned())
                    .collect())
            }
        }
    }

    /// Execute `command` over heterogeneous columns
    ///
    /// When every argument referenced by the command has the same element
    /// kind the command runs over the typed vectors and the result keeps that
    /// kind. Otherwise the referenced arguments are boxed first and the result
    /// is a [`Column::Value`].
    pub fn build_column(&self, command: &VectorCommand, args: &[Column]) -> Result<Column> {
        debug!(target: "keyframe::vector", %command, args = args.len(), "build column");
        self.run_column(command, args)
    }

    fn run_column(&self, command: &VectorCommand, args: &[Column]) -> Result<Column> {
        let slots = command.arguments();
        let mut kinds = slots.iter().filter_map(|s| args.get(*s)).map(Column::kind);
        let kind = match kinds.next() {
            Some(first) if kinds.all(|k| k == first) => first,
            Some(_) => {
                trace!(target: "keyframe::vector", %command, "boxing mixed column kinds");
                ValueKind::Any
            }
            // Every referenced slot is out of range; let `build` report it.
            None => ValueKind::Any,
        };

        Ok(match kind {
            ValueKind::Bool => Column::Bool(self.build(command, &typed(args, Column::as_bool))?),
            ValueKind::Int => Column::Int(self.build(command, &typed(args, Column::as_int))?),
            ValueKind::Float => Column::Float(self.build(command, &typed(args, Column::as_float))?),
            ValueKind::String => {
                Column::String(self.build(command, &typed(args, Column::as_string))?)
            }
            ValueKind::Any => {
                let boxed: Vec<_> = args.iter().map(Column::to_values).collect();
                Column::Value(self.build(command, &boxed)?)
            }
        })
    }

    /// Apply `command` to every column of a frame's data vector
    ///
    /// Missing column slots stay missing.
    pub fn build_columns(&self, command: &VectorCommand, data: &Vector<Column>) -> Result<Vector<Column>> {
        if command.is_identity() {
            return Ok(data.clone());
        }
        debug!(target: "keyframe::vector", %command, columns = data.len(), "build columns");
        data.iter_optional()
            .map(|column| {
                column
                    .map(|c| self.run_column(command, std::slice::from_ref(c)))
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()
            .map(Vector::from_optional)
    }
}

/// Typed argument list; slots of another kind become empty vectors, which is
/// safe because the caller only uses this when every referenced slot matches.
fn typed<T>(args: &[Column], view: fn(&Column) -> Result<&Vector<T>>) -> Vec<Vector<T>> {
    args.iter()
        .map(|c| view(c).map(Vector::clone).unwrap_or_default())
        .collect()
}

fn is_identity_mapping(mapping: &[Option<Address>], source_len: usize) -> bool {
    mapping.len() == source_len
        && mapping
            .iter()
            .enumerate()
            .all(|(i, a)| *a == Some(Address::new(i)))
}
