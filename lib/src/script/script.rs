use std::{backtrace::Backtrace, fmt::Display, path::Path};

use snafu::Snafu;

use crate::{
    map::IntervalMap,
    util::io::{FileError, read_to_string},
};

use super::{Operation, OperationParseError, ParseContext, strip_comment};

/// A sequence of operations to apply to a fresh [`IntervalMap`], read from a text file.
#[derive(Debug, Clone)]
pub struct Script {
    base_value: Option<String>,
    operations: Vec<Operation>,
}

#[derive(Debug, Snafu)]
pub enum ScriptParseError {
    #[snafu(transparent)]
    File { source: FileError },
    #[snafu(transparent)]
    Operation { source: OperationParseError },
    #[snafu(display("{context}: base value was already set on line {first_row}:\n{backtrace}"))]
    DuplicateBase { context: ParseContext, first_row: usize, backtrace: Backtrace },
    #[snafu(display("{context}: base value must be set before any other operation:\n{backtrace}"))]
    LateBase { context: ParseContext, backtrace: Backtrace },
}

pub struct ScriptOutput {
    pub lookups: Vec<Lookup>,
    pub map: IntervalMap<i64, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub key: i64,
    pub value: String,
}

impl Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

impl Script {
    pub fn new(base_value: Option<String>, operations: Vec<Operation>) -> Self {
        Self { base_value, operations }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptParseError> {
        let path = path.as_ref();
        let text = read_to_string(path)?;
        Self::parse_str(&text, &path.to_string_lossy())
    }

    pub fn parse_str(text: &str, file_path: &str) -> Result<Self, ScriptParseError> {
        let mut context = ParseContext { file_path: file_path.to_string(), row: 0 };

        let mut base_value = None;
        let mut base_row = 0;
        let mut operations = vec![];
        for line in text.lines() {
            context.row += 1;
            let line = strip_comment(line).trim();

            if let Some(rest) = line.strip_prefix("base").filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace)) {
                if base_value.is_some() {
                    return DuplicateBaseSnafu { context, first_row: base_row }.fail();
                }
                if !operations.is_empty() {
                    return LateBaseSnafu { context }.fail();
                }
                base_value = Some(Operation::parse_base(rest, &context)?);
                base_row = context.row;
                continue;
            }

            let Some(operation) = Operation::parse(line, &context)? else {
                continue;
            };
            operations.push(operation);
        }

        log::debug!("Parsed {} operations from '{file_path}'", operations.len());
        Ok(Self { base_value, operations })
    }

    pub fn base_value(&self) -> Option<&str> {
        self.base_value.as_deref()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Applies every operation to a new map whose base value is taken from the script, or
    /// `default_base` if the script doesn't set one.
    pub fn run(&self, default_base: &str) -> ScriptOutput {
        let base_value = self.base_value.as_deref().unwrap_or(default_base);
        let mut map = IntervalMap::new(base_value.to_string());
        let mut lookups = vec![];

        for operation in &self.operations {
            log::trace!("{operation}");
            match operation {
                Operation::Assign { begin, end, value } => {
                    if begin >= end {
                        log::debug!("Skipping empty range {begin}..{end}");
                    }
                    map.assign(*begin, *end, value.clone());
                }
                Operation::Lookup { key } => {
                    lookups.push(Lookup { key: *key, value: map.lookup(key).clone() });
                }
                Operation::Probe { start, end } => {
                    lookups.extend((*start..*end).map(|key| Lookup { key, value: map.lookup(&key).clone() }));
                }
            }
        }

        log::debug!("Map has {} change points after {} operations", map.len(), self.operations.len());
        ScriptOutput { lookups, map }
    }
}
