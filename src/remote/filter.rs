//! Filter expression builder
//!
//! The remote data service accepts a small filter language in its list
//! queries (`user = "abc" && (title ~ "milk" || description ~ "milk")`).
//! Interpolating user input into those strings directly would let a crafted
//! search term terminate the quoted literal and inject operators, so all
//! filters are built through this expression type and rendered with the
//! string values escaped.
//!
//! Quoted values escape backslash and double-quote, the two characters with
//! meaning inside the backend's string literals.

use std::fmt;

/// A literal value on the right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Quoted, escaped string literal
    Text(String),
    /// Bare boolean literal
    Bool(bool),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

/// A composable filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `field = value`
    Eq { field: String, value: FilterValue },
    /// `field ~ "value"` (substring match)
    Contains { field: String, value: String },
    /// Conjunction, rendered with ` && `
    And(Vec<Filter>),
    /// Disjunction, rendered with ` || `
    Or(Vec<Filter>),
}

impl Filter {
    /// Equality comparison
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Substring match (the backend's `~` operator)
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Filter::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Combine with another expression using `&&`, flattening nested
    /// conjunctions
    pub fn and(self, other: Filter) -> Self {
        match self {
            Filter::And(mut children) => {
                children.push(other);
                Filter::And(children)
            }
            first => Filter::And(vec![first, other]),
        }
    }

    /// Combine with another expression using `||`, flattening nested
    /// disjunctions
    pub fn or(self, other: Filter) -> Self {
        match self {
            Filter::Or(mut children) => {
                children.push(other);
                Filter::Or(children)
            }
            first => Filter::Or(vec![first, other]),
        }
    }

    /// Render the expression as a query string for the backend
    pub fn to_query(&self) -> String {
        let mut out = String::new();
        self.write_into(&mut out, false);
        out
    }

    fn write_into(&self, out: &mut String, grouped: bool) {
        match self {
            Filter::Eq { field, value } => {
                out.push_str(field);
                out.push_str(" = ");
                match value {
                    FilterValue::Text(text) => {
                        out.push('"');
                        out.push_str(&escape(text));
                        out.push('"');
                    }
                    FilterValue::Bool(flag) => {
                        out.push_str(if *flag { "true" } else { "false" });
                    }
                }
            }
            Filter::Contains { field, value } => {
                out.push_str(field);
                out.push_str(" ~ \"");
                out.push_str(&escape(value));
                out.push('"');
            }
            Filter::And(children) => {
                if grouped {
                    out.push('(');
                }
                for (index, child) in children.iter().enumerate() {
                    if index > 0 {
                        out.push_str(" && ");
                    }
                    child.write_into(out, child.is_composite());
                }
                if grouped {
                    out.push(')');
                }
            }
            Filter::Or(children) => {
                if grouped {
                    out.push('(');
                }
                for (index, child) in children.iter().enumerate() {
                    if index > 0 {
                        out.push_str(" || ");
                    }
                    child.write_into(out, child.is_composite());
                }
                if grouped {
                    out.push(')');
                }
            }
        }
    }

    fn is_composite(&self) -> bool {
        matches!(self, Filter::And(_) | Filter::Or(_))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query())
    }
}

fn escape(raw: &str) -> String {
    raw.replace('\\', "\\\\").replace('"', "\\\"")
}
