use crate::expr::aggregate::AggregateFunction;
use crate::expr::context::EvaluationContext;
use crate::expr::error::EngineError;
use crate::expr::operator::LogicalOperator;
use crate::expr::Expression;
use crate::types::column_type::ColumnType;
use crate::types::column_value::ColumnValue;
use regex::Regex;

/// Expressions of the built-in engine.
///
/// # Examples
///
/// ```
/// use groupfilter::expr::Expr;
///
/// // v > mean(v), evaluated per group by a grouped filter.
/// let above_group_mean = Expr::column("v").greater_than(Expr::mean(Expr::column("v")));
/// ```
#[derive(Debug, Clone)]
pub enum Expr {
    /// A column, restricted to the rows of the current group.
    Column(String),
    /// A grouping key of the current group, as a scalar.
    GroupVariable(String),
    Literal(ColumnValue),
    Comparison {
        lhs: Box<Expr>,
        operator: LogicalOperator,
        rhs: Box<Expr>,
    },
    Like {
        expr: Box<Expr>,
        regex: Regex,
    },
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
    IsNull(Box<Expr>),
    Aggregate {
        function: AggregateFunction,
        argument: Option<Box<Expr>>,
    },
}

/// Intermediate result: one value for the whole group or one per row.
enum Evaluated {
    Scalar(ColumnValue),
    Vector(Vec<ColumnValue>),
}

impl Evaluated {
    fn into_values(self) -> Vec<ColumnValue> {
        match self {
            Evaluated::Scalar(value) => vec![value],
            Evaluated::Vector(values) => values,
        }
    }

    fn map<F>(self, f: F) -> Result<Evaluated, EngineError>
    where
        F: Fn(&ColumnValue) -> Result<ColumnValue, EngineError>,
    {
        Ok(match self {
            Evaluated::Scalar(value) => Evaluated::Scalar(f(&value)?),
            Evaluated::Vector(values) => {
                Evaluated::Vector(values.iter().map(f).collect::<Result<_, _>>()?)
            }
        })
    }

    /// Combines two operands element-wise, broadcasting scalars.
    fn zip_with<F>(self, other: Evaluated, f: F) -> Result<Evaluated, EngineError>
    where
        F: Fn(&ColumnValue, &ColumnValue) -> Result<ColumnValue, EngineError>,
    {
        Ok(match (self, other) {
            (Evaluated::Scalar(left), Evaluated::Scalar(right)) => {
                Evaluated::Scalar(f(&left, &right)?)
            }
            (Evaluated::Vector(left), Evaluated::Scalar(right)) => Evaluated::Vector(
                left.iter()
                    .map(|value| f(value, &right))
                    .collect::<Result<_, _>>()?,
            ),
            (Evaluated::Scalar(left), Evaluated::Vector(right)) => Evaluated::Vector(
                right
                    .iter()
                    .map(|value| f(&left, value))
                    .collect::<Result<_, _>>()?,
            ),
            (Evaluated::Vector(left), Evaluated::Vector(right)) => {
                if left.len() != right.len() {
                    return Err(EngineError::LengthMismatch {
                        left: left.len(),
                        right: right.len(),
                    });
                }
                Evaluated::Vector(
                    left.iter()
                        .zip(&right)
                        .map(|(left, right)| f(left, right))
                        .collect::<Result<_, _>>()?,
                )
            }
        })
    }
}

impl Expr {
    pub fn column(name: &str) -> Self {
        Expr::Column(name.to_string())
    }

    pub fn group_variable(name: &str) -> Self {
        Expr::GroupVariable(name.to_string())
    }

    pub fn literal<V: Into<ColumnValue>>(value: V) -> Self {
        Expr::Literal(value.into())
    }

    pub fn comparison(lhs: Expr, operator: LogicalOperator, rhs: Expr) -> Self {
        Expr::Comparison {
            lhs: Box::new(lhs),
            operator,
            rhs: Box::new(rhs),
        }
    }

    /// Creates a LIKE condition matching `expr` against a regular expression.
    ///
    /// # Errors
    ///
    /// * `EngineError::InvalidPattern` if `pattern` is not a valid regular expression.
    pub fn like(expr: Expr, pattern: &str) -> Result<Self, EngineError> {
        let regex = Regex::new(pattern)?;
        Ok(Expr::Like {
            expr: Box::new(expr),
            regex,
        })
    }

    pub fn and(operands: Vec<Expr>) -> Self {
        Expr::And(operands)
    }

    pub fn or(operands: Vec<Expr>) -> Self {
        Expr::Or(operands)
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    pub fn is_null(operand: Expr) -> Self {
        Expr::IsNull(Box::new(operand))
    }

    /// `n()`: number of rows in the current group.
    pub fn n() -> Self {
        Expr::Aggregate {
            function: AggregateFunction::Count,
            argument: None,
        }
    }

    pub fn sum(argument: Expr) -> Self {
        Self::aggregate(AggregateFunction::Sum, argument)
    }

    pub fn mean(argument: Expr) -> Self {
        Self::aggregate(AggregateFunction::Mean, argument)
    }

    pub fn min(argument: Expr) -> Self {
        Self::aggregate(AggregateFunction::Min, argument)
    }

    pub fn max(argument: Expr) -> Self {
        Self::aggregate(AggregateFunction::Max, argument)
    }

    fn aggregate(function: AggregateFunction, argument: Expr) -> Self {
        Expr::Aggregate {
            function,
            argument: Some(Box::new(argument)),
        }
    }

    pub fn equal_to<R: Into<Expr>>(self, rhs: R) -> Self {
        Self::comparison(self, LogicalOperator::Eq, rhs.into())
    }

    pub fn not_equal_to<R: Into<Expr>>(self, rhs: R) -> Self {
        Self::comparison(self, LogicalOperator::NotEq, rhs.into())
    }

    pub fn greater_than<R: Into<Expr>>(self, rhs: R) -> Self {
        Self::comparison(self, LogicalOperator::Greater, rhs.into())
    }

    pub fn greater_or_equal<R: Into<Expr>>(self, rhs: R) -> Self {
        Self::comparison(self, LogicalOperator::GreaterEq, rhs.into())
    }

    pub fn less_than<R: Into<Expr>>(self, rhs: R) -> Self {
        Self::comparison(self, LogicalOperator::Lesser, rhs.into())
    }

    pub fn less_or_equal<R: Into<Expr>>(self, rhs: R) -> Self {
        Self::comparison(self, LogicalOperator::LesserEq, rhs.into())
    }

    fn eval(&self, context: &EvaluationContext<'_>) -> Result<Evaluated, EngineError> {
        match self {
            Expr::Column(name) => Ok(Evaluated::Vector(context.column(name)?)),
            Expr::GroupVariable(name) => match context.group_variable(name) {
                Some(value) => Ok(Evaluated::Scalar(value.clone())),
                None if context.is_group_key(name) => Ok(Evaluated::Vector(Vec::new())),
                None => Err(EngineError::UnknownGroupVariable(name.clone())),
            },
            Expr::Literal(value) => Ok(Evaluated::Scalar(value.clone())),
            Expr::Comparison { lhs, operator, rhs } => lhs
                .eval(context)?
                .zip_with(rhs.eval(context)?, |left, right| operator.apply(left, right)),
            Expr::Like { expr, regex } => expr.eval(context)?.map(|value| match value {
                ColumnValue::Text(text) => Ok(ColumnValue::Boolean(regex.is_match(text))),
                ColumnValue::Null => Ok(ColumnValue::Null),
                other => Err(EngineError::TypeMismatchInComparison {
                    left: other.column_type().unwrap_or(ColumnType::Text),
                    right: ColumnType::Text,
                }),
            }),
            Expr::And(operands) => Self::fold(operands, true, context),
            Expr::Or(operands) => Self::fold(operands, false, context),
            Expr::Not(operand) => operand.eval(context)?.map(|value| {
                Ok(match truth(value)? {
                    Some(value) => ColumnValue::Boolean(!value),
                    None => ColumnValue::Null,
                })
            }),
            Expr::IsNull(operand) => operand
                .eval(context)?
                .map(|value| Ok(ColumnValue::Boolean(value.is_null()))),
            Expr::Aggregate { function, argument } => {
                let values = match argument {
                    Some(argument) => argument.eval(context)?.into_values(),
                    None => vec![ColumnValue::Null; context.row_count()],
                };
                Ok(Evaluated::Scalar(function.apply(&values)?))
            }
        }
    }

    /// Kleene AND (`identity = true`) or OR (`identity = false`) over all operands.
    fn fold(
        operands: &[Expr],
        identity: bool,
        context: &EvaluationContext<'_>,
    ) -> Result<Evaluated, EngineError> {
        let mut accumulated = Evaluated::Scalar(ColumnValue::Boolean(identity));
        for operand in operands {
            accumulated = accumulated.zip_with(operand.eval(context)?, |left, right| {
                let combined = match (truth(left)?, truth(right)?) {
                    (Some(left), _) if left != identity => Some(left),
                    (_, Some(right)) if right != identity => Some(right),
                    (Some(_), Some(_)) => Some(identity),
                    _ => None,
                };
                Ok(combined.map_or(ColumnValue::Null, ColumnValue::Boolean))
            })?;
        }
        Ok(accumulated)
    }
}

/// Reads a logical operand: `Some(bool)` for booleans, `None` for null.
fn truth(value: &ColumnValue) -> Result<Option<bool>, EngineError> {
    match value {
        ColumnValue::Boolean(value) => Ok(Some(*value)),
        ColumnValue::Null => Ok(None),
        other => Err(EngineError::NonBooleanOperand(
            other.column_type().unwrap_or(ColumnType::Boolean),
        )),
    }
}

impl Expression for Expr {
    fn evaluate(&self, context: &EvaluationContext<'_>) -> Result<Vec<ColumnValue>, EngineError> {
        Ok(self.eval(context)?.into_values())
    }

    fn is_logical_constant(&self) -> bool {
        matches!(
            self,
            Expr::Literal(ColumnValue::Boolean(_)) | Expr::Literal(ColumnValue::Null)
        )
    }
}

impl From<ColumnValue> for Expr {
    fn from(value: ColumnValue) -> Self {
        Expr::Literal(value)
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::literal(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::literal(value)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::literal(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::literal(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::literal(value)
    }
}
