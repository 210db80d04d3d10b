//! Heterogeneous column values
//!
//! A frame holds columns of different element types side by side. [`Column`]
//! is the closed set of element kinds a column may have; every operation
//! inside a column stays statically typed over its [`Vector<T>`], and only
//! the untyped access paths box cells into [`Value`].

use crate::vector::Vector;
use keyframe_core::{Address, Error, Result, Value, ValueKind};

/// One column of a frame
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// `bool` column
    Bool(Vector<bool>),
    /// `i64` column
    Int(Vector<i64>),
    /// `f64` column
    Float(Vector<f64>),
    /// `String` column
    String(Vector<String>),
    /// Boxed column mixing element kinds
    Value(Vector<Value>),
}

/// Run `$body` with `$v` bound to the typed vector inside `$column`.
macro_rules! with_vector {
    ($column:expr, $v:ident => $body:expr) => {
        match $column {
            Column::Bool($v) => $body,
            Column::Int($v) => $body,
            Column::Float($v) => $body,
            Column::String($v) => $body,
            Column::Value($v) => $body,
        }
    };
}

impl Column {
    /// Element kind stored by this column
    pub fn kind(&self) -> ValueKind {
        match self {
            Column::Bool(_) => ValueKind::Bool,
            Column::Int(_) => ValueKind::Int,
            Column::Float(_) => ValueKind::Float,
            Column::String(_) => ValueKind::String,
            Column::Value(_) => ValueKind::Any,
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        with_vector!(self, v => v.len())
    }

    /// Whether the column has no slots
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Boxed value at `address`, `None` when missing
    pub fn get_value(&self, address: Address) -> Option<Value> {
        match self {
            Column::Bool(v) => v.get(address).map(|b| Value::Bool(*b)),
            Column::Int(v) => v.get(address).map(|i| Value::Int(*i)),
            Column::Float(v) => v.get(address).map(|f| Value::Float(*f)),
            Column::String(v) => v.get(address).map(|s| Value::String(s.clone())),
            Column::Value(v) => v.get(address).cloned(),
        }
    }

    /// Whether `address` holds a value
    pub fn is_present(&self, address: Address) -> bool {
        with_vector!(self, v => v.get(address).is_some())
    }

    /// Whether every slot holds a value
    pub fn is_dense(&self) -> bool {
        with_vector!(self, v => v.is_dense())
    }

    /// Number of present values
    pub fn present_count(&self) -> usize {
        with_vector!(self, v => v.present_count())
    }

    /// All slots boxed, in address order
    pub fn iter_values(&self) -> impl Iterator<Item = Option<Value>> + '_ {
        Address::range(self.len()).map(move |a| self.get_value(a))
    }

    /// Box the whole column into a [`Column::Value`] vector
    pub fn to_values(&self) -> Vector<Value> {
        match self {
            Column::Value(v) => v.clone(),
            other => other.iter_values().collect(),
        }
    }

    /// A column of the same kind with `len` missing slots
    pub fn missing_like(&self, len: usize) -> Column {
        Column::missing(self.kind(), len)
    }

    /// A column of `kind` with `len` missing slots
    pub fn missing(kind: ValueKind, len: usize) -> Column {
        match kind {
            ValueKind::Bool => Column::Bool(Vector::missing(len)),
            ValueKind::Int => Column::Int(Vector::missing(len)),
            ValueKind::Float => Column::Float(Vector::missing(len)),
            ValueKind::String => Column::String(Vector::missing(len)),
            ValueKind::Any => Column::Value(Vector::missing(len)),
        }
    }

    /// Build a column of `kind` from boxed optional values
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] if a present value is not of `kind`
    /// (`ValueKind::Any` accepts everything).
    pub fn from_values<I>(kind: ValueKind, values: I) -> Result<Column>
    where
        I: IntoIterator<Item = Option<Value>>,
    {
        fn unbox<T>(
            kind: ValueKind,
            values: impl IntoIterator<Item = Option<Value>>,
            f: impl Fn(Value) -> std::result::Result<T, Value>,
        ) -> Result<Vector<T>> {
            values
                .into_iter()
                .map(|v| match v {
                    None => Ok(None),
                    Some(v) => f(v).map(Some).map_err(|v| Error::TypeMismatch {
                        expected: kind,
                        actual: v.kind(),
                    }),
                })
                .collect::<Result<Vec<_>>>()
                .map(Vector::from_optional)
        }

        Ok(match kind {
            ValueKind::Bool => Column::Bool(unbox(kind, values, |v| match v {
                Value::Bool(b) => Ok(b),
                other => Err(other),
            })?),
            ValueKind::Int => Column::Int(unbox(kind, values, |v| match v {
                Value::Int(i) => Ok(i),
                other => Err(other),
            })?),
            ValueKind::Float => Column::Float(unbox(kind, values, |v| match v {
                Value::Float(f) => Ok(f),
                other => Err(other),
            })?),
            ValueKind::String => Column::String(unbox(kind, values, |v| match v {
                Value::String(s) => Ok(s),
                other => Err(other),
            })?),
            ValueKind::Any => Column::Value(Vector::from_optional(values)),
        })
    }

    fn mismatch(&self, expected: ValueKind) -> Error {
        Error::TypeMismatch {
            expected,
            actual: self.kind(),
        }
    }

    /// Typed view of a `bool` column
    pub fn as_bool(&self) -> Result<&Vector<bool>> {
        match self {
            Column::Bool(v) => Ok(v),
            other => Err(other.mismatch(ValueKind::Bool)),
        }
    }

    /// Typed view of an `i64` column
    pub fn as_int(&self) -> Result<&Vector<i64>> {
        match self {
            Column::Int(v) => Ok(v),
            other => Err(other.mismatch(ValueKind::Int)),
        }
    }

    /// Typed view of an `f64` column
    pub fn as_float(&self) -> Result<&Vector<f64>> {
        match self {
            Column::Float(v) => Ok(v),
            other => Err(other.mismatch(ValueKind::Float)),
        }
    }

    /// Typed view of a `String` column
    pub fn as_string(&self) -> Result<&Vector<String>> {
        match self {
            Column::String(v) => Ok(v),
            other => Err(other.mismatch(ValueKind::String)),
        }
    }

    /// Typed view of a boxed column
    pub fn as_boxed(&self) -> Result<&Vector<Value>> {
        match self {
            Column::Value(v) => Ok(v),
            other => Err(other.mismatch(ValueKind::Any)),
        }
    }

    /// Whether both columns share the same allocation
    pub fn ptr_eq(&self, other: &Column) -> bool {
        match (self, other) {
            (Column::Bool(a), Column::Bool(b)) => a.ptr_eq(b),
            (Column::Int(a), Column::Int(b)) => a.ptr_eq(b),
            (Column::Float(a), Column::Float(b)) => a.ptr_eq(b),
            (Column::String(a), Column::String(b)) => a.ptr_eq(b),
            (Column::Value(a), Column::Value(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

macro_rules! impl_from_vector {
    ($variant:ident, $ty:ty) => {
        impl From<Vector<$ty>> for Column {
            fn from(v: Vector<$ty>) -> Self {
                Column::$variant(v)
            }
        }

        impl From<Vec<$ty>> for Column {
            fn from(v: Vec<$ty>) -> Self {
                Column::$variant(Vector::from_values(v))
            }
        }

        impl From<Vec<Option<$ty>>> for Column {
            fn from(v: Vec<Option<$ty>>) -> Self {
                Column::$variant(Vector::from_optional(v))
            }
        }
    };
}

impl_from_vector!(Bool, bool);
impl_from_vector!(Int, i64);
impl_from_vector!(Float, f64);
impl_from_vector!(String, String);
impl_from_vector!(Value, Value);
