#![deny(missing_docs)]
//! Core predicate structures shared by the scan pipeline.

pub(crate) mod column;
mod error;
mod value;

use std::{cmp::Ordering, fmt, sync::Arc};

pub use column::{Column, ColumnRef, ColumnValue};
pub use error::ValidationError;
pub use value::{DataType, ScalarValue, ScalarValueRef, Timestamp};

/// Column metadata consulted while validating a predicate.
pub trait ColumnSchema {
    /// Number of columns.
    fn column_count(&self) -> usize;

    /// Declared type of the column at `index`, `None` when out of range.
    fn column_type(&self, index: usize) -> Option<DataType>;

    /// Name of the column at `index`, `None` when out of range.
    fn column_name(&self, index: usize) -> Option<&str>;
}

/// Cell access consulted while evaluating a predicate.
pub trait RowCells {
    /// Cell at `index`, `None` when out of range.
    fn cell(&self, index: usize) -> Option<ScalarValueRef<'_>>;
}

/// Comparison operator used by comparison leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    /// Equals (`=`).
    Equal,
    /// Not equals (`!=`).
    NotEqual,
    /// Less than (`<`).
    LessThan,
    /// Less than or equal to (`<=`).
    LessThanOrEqual,
    /// Greater than (`>`).
    GreaterThan,
    /// Greater than or equal to (`>=`).
    GreaterThanOrEqual,
}

impl ComparisonOp {
    /// Returns a textual representation of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ComparisonOp::Equal => "=",
            ComparisonOp::NotEqual => "!=",
            ComparisonOp::LessThan => "<",
            ComparisonOp::LessThanOrEqual => "<=",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::GreaterThanOrEqual => ">=",
        }
    }

    /// Returns true when the operator only needs equality, not an ordering.
    #[must_use]
    pub fn is_equality(self) -> bool {
        matches!(self, ComparisonOp::Equal | ComparisonOp::NotEqual)
    }

    /// Returns true when columns declared as `data_type` can be compared with this operator.
    #[must_use]
    pub fn supports(self, data_type: DataType) -> bool {
        self.is_equality() || data_type.is_ordered()
    }

    /// Evaluates the operator against a comparison ordering.
    #[must_use]
    pub fn test_ordering(self, ordering: Ordering) -> bool {
        match self {
            ComparisonOp::Equal => ordering == Ordering::Equal,
            ComparisonOp::NotEqual => ordering != Ordering::Equal,
            ComparisonOp::LessThan => ordering == Ordering::Less,
            ComparisonOp::LessThanOrEqual => ordering != Ordering::Greater,
            ComparisonOp::GreaterThan => ordering == Ordering::Greater,
            ComparisonOp::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type UserFn = dyn Fn(ScalarValueRef<'_>) -> bool + Send + Sync;

/// Caller-supplied test applied to a single cell.
///
/// The callback sees `ScalarValueRef::Null` for missing cells.
#[derive(Clone)]
pub struct UserPredicate {
    func: Arc<UserFn>,
}

impl UserPredicate {
    /// Wraps an untyped cell test.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(ScalarValueRef<'_>) -> bool + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Invokes the callback.
    #[must_use]
    pub fn call(&self, cell: ScalarValueRef<'_>) -> bool {
        (self.func)(cell)
    }
}

impl fmt::Debug for UserPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UserPredicate(..)")
    }
}

/// Closed set of predicate node kinds.
#[derive(Clone, Debug)]
pub enum PredicateNode {
    /// Compares one column against a literal.
    Comparison {
        /// Column read by the comparison.
        column: ColumnRef,
        /// Operator.
        op: ComparisonOp,
        /// Right-hand literal.
        literal: ScalarValue,
    },
    /// Applies a caller-supplied test to one column. Only the column position is validated.
    UserDefined {
        /// Column handed to the callback.
        column: ColumnRef,
        /// Callback.
        func: UserPredicate,
    },
    /// Both children must hold; the right child is skipped once the left is false.
    And(Predicate, Predicate),
    /// Either child must hold; the right child is skipped once the left is true.
    Or(Predicate, Predicate),
}

/// Immutable predicate tree.
///
/// Cloning is cheap and shares the underlying nodes, so sub-trees can be
/// reused across several composite predicates.
#[derive(Clone, Debug)]
pub struct Predicate {
    node: Arc<PredicateNode>,
}

impl Predicate {
    /// Builds a predicate directly from a node.
    #[must_use]
    pub fn from_node(node: PredicateNode) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// Returns a reference to the root node.
    #[must_use]
    pub fn kind(&self) -> &PredicateNode {
        &self.node
    }

    /// Compares the column against `value` with `op`.
    #[must_use]
    pub fn compare<T: ColumnValue>(column: Column<T>, op: ComparisonOp, value: T) -> Self {
        Self::from_node(PredicateNode::Comparison {
            column: column.to_ref(),
            op,
            literal: value.into(),
        })
    }

    /// Applies `func` to the column, read as `T`.
    ///
    /// `func` receives `None` when the cell is missing or cannot be read as `T`.
    #[must_use]
    pub fn user_defined<T, F>(column: Column<T>, func: F) -> Self
    where
        T: ColumnValue,
        F: Fn(Option<T>) -> bool + Send + Sync + 'static,
    {
        Self::from_node(PredicateNode::UserDefined {
            column: column.to_ref(),
            func: UserPredicate::new(move |cell| func(T::from_cell(cell))),
        })
    }

    /// Returns a new conjunction of `self` and `other`; neither operand changes.
    #[must_use]
    pub fn and(&self, other: &Predicate) -> Predicate {
        Self::from_node(PredicateNode::And(self.clone(), other.clone()))
    }

    /// Returns a new disjunction of `self` and `other`; neither operand changes.
    #[must_use]
    pub fn or(&self, other: &Predicate) -> Predicate {
        Self::from_node(PredicateNode::Or(self.clone(), other.clone()))
    }

    /// Folds the predicates into a left-deep conjunction, if any are provided.
    #[must_use]
    pub fn conjunction<I>(predicates: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Predicate>,
    {
        predicates.into_iter().reduce(|acc, next| acc.and(&next))
    }

    /// Folds the predicates into a left-deep disjunction, if any are provided.
    #[must_use]
    pub fn disjunction<I>(predicates: I) -> Option<Predicate>
    where
        I: IntoIterator<Item = Predicate>,
    {
        predicates.into_iter().reduce(|acc, next| acc.or(&next))
    }

    /// Checks every leaf against the schema, depth-first and left to right.
    ///
    /// Stops at the first failure. Rows are never touched.
    pub fn validate<S>(&self, schema: &S) -> Result<(), ValidationError>
    where
        S: ColumnSchema + ?Sized,
    {
        match self.kind() {
            PredicateNode::Comparison {
                column,
                op,
                literal,
            } => {
                let index = resolve_index(schema, column.index)?;
                let declared = schema.column_type(index).ok_or(
                    ValidationError::ColumnIndexOutOfRange {
                        index: column.index,
                        column_count: schema.column_count(),
                    },
                )?;
                let literal_fits = literal
                    .data_type()
                    .is_some_and(|literal_type| literal_type.can_read_as(column.data_type));
                if literal_fits && declared.can_read_as(column.data_type) && op.supports(declared)
                {
                    Ok(())
                } else {
                    Err(ValidationError::IncompatibleType {
                        column: schema.column_name(index).unwrap_or_default().to_owned(),
                        index,
                        declared,
                        requested: column.data_type,
                        op: *op,
                    })
                }
            }
            PredicateNode::UserDefined { column, .. } => {
                resolve_index(schema, column.index).map(|_| ())
            }
            PredicateNode::And(left, right) | PredicateNode::Or(left, right) => {
                left.validate(schema)?;
                right.validate(schema)
            }
        }
    }

    /// Evaluates the predicate against one row.
    ///
    /// Assumes [`Predicate::validate`] already succeeded for the row's schema.
    /// Missing cells make comparisons false; they never produce an error.
    #[must_use]
    pub fn evaluate<R>(&self, row: &R) -> bool
    where
        R: RowCells + ?Sized,
    {
        match self.kind() {
            PredicateNode::Comparison {
                column,
                op,
                literal,
            } => read_cell(row, column.index)
                .and_then(|cell| cell.compare(literal.as_ref()))
                .is_some_and(|ordering| op.test_ordering(ordering)),
            PredicateNode::UserDefined { column, func } => {
                func.call(read_cell(row, column.index).unwrap_or(ScalarValueRef::Null))
            }
            PredicateNode::And(left, right) => left.evaluate(row) && right.evaluate(row),
            PredicateNode::Or(left, right) => left.evaluate(row) || right.evaluate(row),
        }
    }

    /// Column positions referenced by the leaves, left to right.
    #[must_use]
    pub fn referenced_columns(&self) -> Vec<i64> {
        let mut columns = Vec::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns(&self, out: &mut Vec<i64>) {
        match self.kind() {
            PredicateNode::Comparison { column, .. } | PredicateNode::UserDefined { column, .. } => {
                out.push(column.index)
            }
            PredicateNode::And(left, right) | PredicateNode::Or(left, right) => {
                left.collect_columns(out);
                right.collect_columns(out);
            }
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            PredicateNode::Comparison {
                column,
                op,
                literal,
            } => write!(f, "{column} {op} {literal}"),
            PredicateNode::UserDefined { column, .. } => write!(f, "udf({column})"),
            PredicateNode::And(left, right) => write!(f, "({left} AND {right})"),
            PredicateNode::Or(left, right) => write!(f, "({left} OR {right})"),
        }
    }
}

fn resolve_index<S>(schema: &S, index: i64) -> Result<usize, ValidationError>
where
    S: ColumnSchema + ?Sized,
{
    let column_count = schema.column_count();
    usize::try_from(index)
        .ok()
        .filter(|position| *position < column_count)
        .ok_or(ValidationError::ColumnIndexOutOfRange {
            index,
            column_count,
        })
}

fn read_cell<R>(row: &R, index: i64) -> Option<ScalarValueRef<'_>>
where
    R: RowCells + ?Sized,
{
    usize::try_from(index).ok().and_then(|position| row.cell(position))
}

/// `column = value`
#[must_use]
pub fn eq<T: ColumnValue>(column: Column<T>, value: T) -> Predicate {
    Predicate::compare(column, ComparisonOp::Equal, value)
}

/// `column != value`
#[must_use]
pub fn neq<T: ColumnValue>(column: Column<T>, value: T) -> Predicate {
    Predicate::compare(column, ComparisonOp::NotEqual, value)
}

/// `column < value`
#[must_use]
pub fn lt<T: ColumnValue>(column: Column<T>, value: T) -> Predicate {
    Predicate::compare(column, ComparisonOp::LessThan, value)
}

/// `column <= value`
#[must_use]
pub fn leq<T: ColumnValue>(column: Column<T>, value: T) -> Predicate {
    Predicate::compare(column, ComparisonOp::LessThanOrEqual, value)
}

/// `column > value`
#[must_use]
pub fn gt<T: ColumnValue>(column: Column<T>, value: T) -> Predicate {
    Predicate::compare(column, ComparisonOp::GreaterThan, value)
}

/// `column >= value`
#[must_use]
pub fn geq<T: ColumnValue>(column: Column<T>, value: T) -> Predicate {
    Predicate::compare(column, ComparisonOp::GreaterThanOrEqual, value)
}

/// Applies `func` to the column; see [`Predicate::user_defined`].
#[must_use]
pub fn udf<T, F>(column: Column<T>, func: F) -> Predicate
where
    T: ColumnValue,
    F: Fn(Option<T>) -> bool + Send + Sync + 'static,
{
    Predicate::user_defined(column, func)
}
