use crate::expr::Expression;

/// One condition of a filter, optionally carrying the name it was passed under.
#[derive(Debug)]
pub struct Predicate {
    name: Option<String>,
    expression: Box<dyn Expression>,
}

impl Predicate {
    pub fn new<E: Expression + 'static>(expression: E) -> Self {
        Self {
            name: None,
            expression: Box::new(expression),
        }
    }

    pub fn named<E: Expression + 'static>(name: &str, expression: E) -> Self {
        Self {
            name: Some(name.to_string()),
            expression: Box::new(expression),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn expression(&self) -> &dyn Expression {
        self.expression.as_ref()
    }
}

/// A filtering call: the predicates, combined with AND, and how the grouping
/// of the result is rebuilt.
///
/// # Examples
///
/// ```
/// use groupfilter::expr::Expr;
/// use groupfilter::filter::request::FilterRequest;
///
/// let request = FilterRequest::new()
///     .predicate(Expr::column("v").greater_than(10))
///     .preserve(true);
/// assert_eq!(1, request.predicates().len());
/// ```
#[derive(Debug, Default)]
pub struct FilterRequest {
    predicates: Vec<Predicate>,
    preserve: bool,
}

impl FilterRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn predicate<E: Expression + 'static>(mut self, expression: E) -> Self {
        self.predicates.push(Predicate::new(expression));
        self
    }

    /// Adds a predicate under a name. Only logical constants may be named;
    /// anything else fails the filter with `FilterError::NamedPredicate`.
    pub fn named<E: Expression + 'static>(mut self, name: &str, expression: E) -> Self {
        self.predicates.push(Predicate::named(name, expression));
        self
    }

    /// Keeps the current groups, empty ones included, instead of rebuilding
    /// the grouping from the surviving rows. Defaults to `false`.
    pub fn preserve(mut self, preserve: bool) -> Self {
        self.preserve = preserve;
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn preserves_grouping(&self) -> bool {
        self.preserve
    }
}
