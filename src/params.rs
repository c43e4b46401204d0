use std::fmt::Write;

use crate::error::MysqlMiddlewareError;
use crate::types::RowValues;

/// Type-tag characters recognized by [`ParamSpec`]:
/// `i` integer, `s` string, `d` double, `b` binary/blob.
pub const RECOGNIZED_TAGS: [char; 4] = ['i', 's', 'd', 'b'];

/// A positional parameter list paired with its type-tag string.
///
/// The tag declares, one character per value, how each parameter is bound:
///
/// | tag | binds as        | accepted values                          |
/// |-----|-----------------|------------------------------------------|
/// | `i` | integer         | `Int`, `Bool`                            |
/// | `s` | string          | `Text`, `Timestamp`, `JSON`              |
/// | `d` | double          | `Float`, `Int`                           |
/// | `b` | binary blob     | `Blob`, `Text`                           |
///
/// `Null` binds as SQL NULL under any tag. The tag length must equal the
/// number of values; anything else is a
/// [`BindError`](MysqlMiddlewareError::BindError).
///
/// ```rust
/// use mysql_middleware::{ParamSpec, RowValues};
///
/// let spec = ParamSpec::new("is", vec![RowValues::Int(5), RowValues::Text("Alice".into())]);
/// assert_eq!(spec.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    tag: String,
    values: Vec<RowValues>,
}

impl ParamSpec {
    /// Pair a type-tag string with its positional values.
    #[must_use]
    pub fn new(tag: impl Into<String>, values: Vec<RowValues>) -> Self {
        Self {
            tag: tag.into(),
            values,
        }
    }

    /// A spec for a statement with no parameters.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            tag: String::new(),
            values: Vec::new(),
        }
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The type-tag string.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The positional values.
    #[must_use]
    pub fn values(&self) -> &[RowValues] {
        &self.values
    }

    /// Convert into driver parameters, validating arity and tag characters.
    ///
    /// Values are bound by value; the driver observes exactly the
    /// caller-supplied values, in order.
    ///
    /// # Errors
    ///
    /// Returns `MysqlMiddlewareError::BindError` if the tag length does not
    /// match the value count, a tag character is unrecognized, or a value
    /// cannot be coerced to its declared tag type.
    pub fn to_mysql_params(&self) -> Result<mysql::Params, MysqlMiddlewareError> {
        let tag_len = self.tag.chars().count();
        if tag_len != self.values.len() {
            return Err(MysqlMiddlewareError::BindError(format!(
                "type tag `{}` declares {} parameter(s) but {} value(s) were supplied",
                self.tag,
                tag_len,
                self.values.len()
            )));
        }

        if self.values.is_empty() {
            return Ok(mysql::Params::Empty);
        }

        let mut converted = Vec::with_capacity(self.values.len());
        for (position, (tag, value)) in self.tag.chars().zip(self.values.iter()).enumerate() {
            converted.push(bind_value(tag, value, position)?);
        }
        Ok(mysql::Params::Positional(converted))
    }
}

/// Convert one tagged value to a driver value.
fn bind_value(
    tag: char,
    value: &RowValues,
    position: usize,
) -> Result<mysql::Value, MysqlMiddlewareError> {
    if !RECOGNIZED_TAGS.contains(&tag) {
        return Err(MysqlMiddlewareError::BindError(format!(
            "unrecognized type tag `{tag}` at position {position} (expected one of i, s, d, b)"
        )));
    }

    if value.is_null() {
        return Ok(mysql::Value::NULL);
    }

    match (tag, value) {
        ('i', RowValues::Int(i)) => Ok(mysql::Value::Int(*i)),
        ('i', RowValues::Bool(b)) => Ok(mysql::Value::Int(i64::from(*b))),
        ('s', RowValues::Text(s)) => Ok(mysql::Value::Bytes(s.clone().into_bytes())),
        ('s', RowValues::Timestamp(dt)) => {
            let mut formatted = String::with_capacity(32);
            // Infallible: formatting into a String cannot fail.
            let _ = write!(formatted, "{}", dt.format("%F %T%.f"));
            Ok(mysql::Value::Bytes(formatted.into_bytes()))
        }
        ('s', RowValues::JSON(jval)) => Ok(mysql::Value::Bytes(jval.to_string().into_bytes())),
        ('d', RowValues::Float(f)) => Ok(mysql::Value::Double(*f)),
        ('d', RowValues::Int(i)) => Ok(mysql::Value::Double(*i as f64)),
        ('b', RowValues::Blob(bytes)) => Ok(mysql::Value::Bytes(bytes.clone())),
        ('b', RowValues::Text(s)) => Ok(mysql::Value::Bytes(s.clone().into_bytes())),
        (tag, other) => Err(MysqlMiddlewareError::BindError(format!(
            "parameter at position {position} tagged `{tag}` cannot bind a {} value",
            value_kind(other)
        ))),
    }
}

fn value_kind(value: &RowValues) -> &'static str {
    match value {
        RowValues::Int(_) => "Int",
        RowValues::Float(_) => "Float",
        RowValues::Text(_) => "Text",
        RowValues::Bool(_) => "Bool",
        RowValues::Timestamp(_) => "Timestamp",
        RowValues::Null => "Null",
        RowValues::JSON(_) => "JSON",
        RowValues::Blob(_) => "Blob",
    }
}

/// A query and its tagged parameters bundled together.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The tagged parameters to bind
    pub params: ParamSpec,
}

impl QueryAndParams {
    /// Create a new `QueryAndParams` with the given query and parameters.
    #[must_use]
    pub fn new(query: impl Into<String>, params: ParamSpec) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    /// Create a new `QueryAndParams` with no parameters.
    #[must_use]
    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: ParamSpec::empty(),
        }
    }
}
