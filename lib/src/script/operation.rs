use std::{backtrace::Backtrace, fmt::Display, num::ParseIntError};

use snafu::Snafu;

use crate::util::parse::parse_i64;

use super::{ParseContext, iter_attributes};

/// Largest number of keys a single `probe` line may look up.
pub const MAX_PROBE_LEN: u64 = 1 << 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Assigns `value` to every key in `[begin, end)`.
    Assign { begin: i64, end: i64, value: String },
    /// Looks up a single key.
    Lookup { key: i64 },
    /// Looks up every key in `[start, end)`.
    Probe { start: i64, end: i64 },
}

#[derive(Debug, Snafu)]
pub enum OperationParseError {
    #[snafu(display("{context}: expected operation 'base', 'assign', 'lookup' or 'probe' but got '{name}':\n{backtrace}"))]
    UnknownOperation { context: ParseContext, name: String, backtrace: Backtrace },
    #[snafu(display("{context}: unknown attribute '{key}' for operation '{operation}':\n{backtrace}"))]
    UnknownAttribute { context: ParseContext, operation: String, key: String, backtrace: Backtrace },
    #[snafu(display("{context}: missing '{attribute}' attribute:\n{backtrace}"))]
    MissingAttribute { context: ParseContext, attribute: String, backtrace: Backtrace },
    #[snafu(display("{context}: failed to parse {attribute} '{value}': {error}\n{backtrace}"))]
    ParseKey { context: ParseContext, attribute: String, value: String, error: ParseIntError, backtrace: Backtrace },
    #[snafu(display("{context}: attribute '{attribute}' must not be empty:\n{backtrace}"))]
    EmptyValue { context: ParseContext, attribute: String, backtrace: Backtrace },
    #[snafu(display("{context}: probe from {start} to {end} exceeds the limit of {MAX_PROBE_LEN} keys:\n{backtrace}"))]
    ProbeTooLarge { context: ParseContext, start: i64, end: i64, backtrace: Backtrace },
}

impl Operation {
    /// Parses an operation line with comments already stripped. Returns `None` for blank lines.
    pub(crate) fn parse(line: &str, context: &ParseContext) -> Result<Option<Self>, OperationParseError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else { return Ok(None) };

        let operation = match name {
            "assign" => {
                let mut begin = None;
                let mut end = None;
                let mut value = None;
                for (key, attr) in iter_attributes(words) {
                    match key {
                        "begin" => begin = Some(parse_key(key, attr, context)?),
                        "end" => end = Some(parse_key(key, attr, context)?),
                        "value" => value = Some(parse_value(key, attr, context)?),
                        _ => return UnknownAttributeSnafu { context, operation: name, key }.fail(),
                    }
                }
                Operation::Assign {
                    begin: begin.ok_or_else(|| MissingAttributeSnafu { context, attribute: "begin" }.build())?,
                    end: end.ok_or_else(|| MissingAttributeSnafu { context, attribute: "end" }.build())?,
                    value: value.ok_or_else(|| MissingAttributeSnafu { context, attribute: "value" }.build())?,
                }
            }
            "lookup" => {
                let mut lookup_key = None;
                for (key, attr) in iter_attributes(words) {
                    match key {
                        "key" => lookup_key = Some(parse_key(key, attr, context)?),
                        _ => return UnknownAttributeSnafu { context, operation: name, key }.fail(),
                    }
                }
                let Some(key) = lookup_key else {
                    return MissingAttributeSnafu { context, attribute: "key" }.fail();
                };
                Operation::Lookup { key }
            }
            "probe" => {
                let mut start = None;
                let mut end = None;
                for (key, attr) in iter_attributes(words) {
                    match key {
                        "start" => start = Some(parse_key(key, attr, context)?),
                        "end" => end = Some(parse_key(key, attr, context)?),
                        _ => return UnknownAttributeSnafu { context, operation: name, key }.fail(),
                    }
                }
                let Some(start) = start else {
                    return MissingAttributeSnafu { context, attribute: "start" }.fail();
                };
                let Some(end) = end else {
                    return MissingAttributeSnafu { context, attribute: "end" }.fail();
                };
                if (end as i128 - start as i128) > MAX_PROBE_LEN as i128 {
                    return ProbeTooLargeSnafu { context, start, end }.fail();
                }
                Operation::Probe { start, end }
            }
            _ => return UnknownOperationSnafu { context, name }.fail(),
        };
        Ok(Some(operation))
    }

    /// Parses the value of a `base` line, the part after the `base` keyword.
    pub(crate) fn parse_base(line: &str, context: &ParseContext) -> Result<String, OperationParseError> {
        let mut base_value = None;
        for (key, attr) in iter_attributes(line.split_whitespace()) {
            match key {
                "value" => base_value = Some(parse_value(key, attr, context)?),
                _ => return UnknownAttributeSnafu { context, operation: "base", key }.fail(),
            }
        }
        base_value.ok_or_else(|| MissingAttributeSnafu { context, attribute: "value" }.build())
    }
}

fn parse_key(attribute: &str, value: &str, context: &ParseContext) -> Result<i64, OperationParseError> {
    parse_i64(value).map_err(|error| ParseKeySnafu { context, attribute, value, error }.build())
}

fn parse_value(attribute: &str, value: &str, context: &ParseContext) -> Result<String, OperationParseError> {
    if value.is_empty() {
        return EmptyValueSnafu { context, attribute }.fail();
    }
    Ok(value.to_string())
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Assign { begin, end, value } => write!(f, "assign begin:{begin} end:{end} value:{value}"),
            Operation::Lookup { key } => write!(f, "lookup key:{key}"),
            Operation::Probe { start, end } => write!(f, "probe start:{start} end:{end}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> ParseContext {
        ParseContext { file_path: "test.txt".to_string(), row: 1 }
    }

    #[test]
    fn test_parse_assign() {
        let operation = Operation::parse("assign begin:-3 end:0x10 value:B", &context()).unwrap();
        assert_eq!(operation, Some(Operation::Assign { begin: -3, end: 16, value: "B".to_string() }));
    }

    #[test]
    fn test_parse_lookup_and_probe() {
        assert_eq!(Operation::parse("lookup key:7", &context()).unwrap(), Some(Operation::Lookup { key: 7 }));
        assert_eq!(
            Operation::parse("probe end:4 start:-1", &context()).unwrap(),
            Some(Operation::Probe { start: -1, end: 4 })
        );
        assert_eq!(Operation::parse("   ", &context()).unwrap(), None);
    }

    #[test]
    fn test_parse_errors() {
        let context = context();
        assert!(matches!(Operation::parse("erase key:1", &context), Err(OperationParseError::UnknownOperation { .. })));
        assert!(matches!(
            Operation::parse("lookup key:1 extra:2", &context),
            Err(OperationParseError::UnknownAttribute { .. })
        ));
        assert!(matches!(
            Operation::parse("assign begin:1 value:B", &context),
            Err(OperationParseError::MissingAttribute { attribute, .. }) if attribute == "end"
        ));
        assert!(matches!(Operation::parse("lookup key:abc", &context), Err(OperationParseError::ParseKey { .. })));
        assert!(matches!(
            Operation::parse("assign begin:1 end:2 value", &context),
            Err(OperationParseError::EmptyValue { .. })
        ));
        assert!(matches!(
            Operation::parse("probe start:0 end:1000000", &context),
            Err(OperationParseError::ProbeTooLarge { .. })
        ));
    }

    #[test]
    fn test_parse_base() {
        assert_eq!(Operation::parse_base(" value:A", &context()).unwrap(), "A");
        assert!(matches!(Operation::parse_base("", &context()), Err(OperationParseError::MissingAttribute { .. })));
    }

    #[test]
    fn test_display_parses_back() {
        let operation = Operation::Assign { begin: -5, end: 9, value: "X".to_string() };
        let text = operation.to_string();
        assert_eq!(Operation::parse(&text, &context()).unwrap(), Some(operation));
    }
}
