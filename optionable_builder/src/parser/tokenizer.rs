use std::collections::HashMap;
use thiserror::Error;

use crate::api::FieldDescriptor;
use crate::binding::ParsedOptions;
use crate::constant::*;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The failure to read the Cli tokens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The token names no declared option.
    #[error("unrecognized option '{option}'.")]
    UnknownOption {
        /// The offending option, as written on the Cli.
        option: String,
    },
    /// A value option is the last token, or is followed by another option.
    #[error("missing value for option '--{option}'.")]
    MissingValue {
        /// The long name of the option.
        option: String,
    },
    /// A flag was given an inline value (ex: `--verbose=true`).
    #[error("option '--{option}' does not take a value.")]
    UnexpectedValue {
        /// The long name of the option.
        option: String,
    },
    /// The option appears more than once.
    #[error("option '--{option}' cannot be specified more than once.")]
    RepeatedOption {
        /// The long name of the option.
        option: String,
    },
    /// A token which is neither an option nor the value of one.
    #[error("unexpected argument '{token}'.")]
    UnexpectedToken {
        /// The offending token.
        token: String,
    },
}

/// The Cli view of one [`FieldDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDefinition {
    short: char,
    long: String,
    description: String,
    flag: bool,
    required: bool,
}

impl OptionDefinition {
    /// Create a definition.
    pub fn new(
        short: char,
        long: impl Into<String>,
        description: impl Into<String>,
        flag: bool,
        required: bool,
    ) -> Self {
        Self {
            short,
            long: long.into(),
            description: description.into(),
            flag,
            required,
        }
    }

    /// The short option name (`-c`).
    pub fn short(&self) -> char {
        self.short
    }

    /// The long option name (`--count`).
    pub fn long(&self) -> &str {
        &self.long
    }

    /// The option documentation.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the option takes no value.
    pub fn is_flag(&self) -> bool {
        self.flag
    }

    /// Whether the option must be present on the Cli.
    pub fn required(&self) -> bool {
        self.required
    }
}

impl<C> From<&FieldDescriptor<C>> for OptionDefinition {
    fn from(descriptor: &FieldDescriptor<C>) -> Self {
        Self::new(
            descriptor.short(),
            descriptor.long(),
            descriptor.description(),
            descriptor.is_flag(),
            descriptor.required(),
        )
    }
}

impl<C> FieldDescriptor<C> {
    /// The Cli definition of this option.
    pub fn definition(&self) -> OptionDefinition {
        OptionDefinition::from(self)
    }
}

/// The options read off the Cli, keyed by long name.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandLine {
    values: HashMap<String, Option<String>>,
}

impl CommandLine {
    /// The number of options present.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no option is present.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn record(&mut self, long: &str, value: Option<&str>) -> Result<(), ParseError> {
        if self.values.contains_key(long) {
            return Err(ParseError::RepeatedOption {
                option: long.to_string(),
            });
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Read option '{long}' with {value:?}.");
        }

        self.values
            .insert(long.to_string(), value.map(str::to_string));
        Ok(())
    }
}

impl ParsedOptions for CommandLine {
    fn present(&self, long: &str) -> bool {
        self.values.present(long)
    }

    fn value_of(&self, long: &str) -> Option<&str> {
        self.values.value_of(long)
    }
}

/// Reads Cli tokens against a set of [`OptionDefinition`]s.
///
/// Accepted forms:
/// * `--long`, `--long value`, `--long=value`
/// * `-s`, `-s value`, `-s=value`
/// * `-abc`: combined short options, where only the last may take a value.
#[derive(Debug)]
pub struct Tokenizer<'d> {
    definitions: &'d [OptionDefinition],
}

impl<'d> Tokenizer<'d> {
    /// Create a tokenizer over the `definitions`.
    pub fn new(definitions: &'d [OptionDefinition]) -> Self {
        Self { definitions }
    }

    /// Read the `tokens`.
    ///
    /// On failure, also reports the character offset of the offending token (spaces excluded).
    pub fn tokenize(&self, tokens: &[&str]) -> Result<CommandLine, (usize, ParseError)> {
        let mut command_line = CommandLine::default();
        let mut index = 0;
        let mut offset = 0;

        while index < tokens.len() {
            let token = tokens[index];
            let next = tokens.get(index + 1).copied();
            let consumed = self
                .read(token, next, &mut command_line)
                .map_err(|error| (offset, error))?;

            for consumed_token in &tokens[index..index + consumed] {
                offset += consumed_token.chars().count();
            }

            index += consumed;
        }

        Ok(command_line)
    }

    // Returns the number of tokens consumed.
    fn read(
        &self,
        token: &str,
        next: Option<&str>,
        command_line: &mut CommandLine,
    ) -> Result<usize, ParseError> {
        if let Some(name) = token.strip_prefix(LONG_PREFIX) {
            if name.is_empty() {
                return Err(ParseError::UnexpectedToken {
                    token: token.to_string(),
                });
            }

            let (name, inline) = split_inline(name);
            let definition = self
                .definitions
                .iter()
                .find(|definition| definition.long == name)
                .ok_or_else(|| ParseError::UnknownOption {
                    option: format!("{LONG_PREFIX}{name}"),
                })?;

            return self.accept(definition, inline, next, command_line);
        }

        match token.strip_prefix(SHORT_PREFIX) {
            Some(names) if !names.is_empty() => {
                let (names, inline) = split_inline(names);
                let letters: Vec<char> = names.chars().collect();

                for (i, letter) in letters.iter().enumerate() {
                    let definition = self.find_short(*letter).ok_or_else(|| {
                        ParseError::UnknownOption {
                            option: format!("{SHORT_PREFIX}{letter}"),
                        }
                    })?;

                    if i + 1 < letters.len() {
                        // Only the final letter may take a value.
                        if !definition.flag {
                            return Err(ParseError::MissingValue {
                                option: definition.long.clone(),
                            });
                        }

                        command_line.record(&definition.long, None)?;
                    } else {
                        return self.accept(definition, inline, next, command_line);
                    }
                }

                Err(ParseError::UnexpectedToken {
                    token: token.to_string(),
                })
            }
            _ => Err(ParseError::UnexpectedToken {
                token: token.to_string(),
            }),
        }
    }

    fn accept(
        &self,
        definition: &OptionDefinition,
        inline: Option<&str>,
        next: Option<&str>,
        command_line: &mut CommandLine,
    ) -> Result<usize, ParseError> {
        if definition.flag {
            if inline.is_some() {
                return Err(ParseError::UnexpectedValue {
                    option: definition.long.clone(),
                });
            }

            command_line.record(&definition.long, None)?;
            return Ok(1);
        }

        match (inline, next) {
            (Some(value), _) => {
                command_line.record(&definition.long, Some(value))?;
                Ok(1)
            }
            (None, Some(value)) if !self.is_option(value) => {
                command_line.record(&definition.long, Some(value))?;
                Ok(2)
            }
            _ => Err(ParseError::MissingValue {
                option: definition.long.clone(),
            }),
        }
    }

    fn find_short(&self, letter: char) -> Option<&OptionDefinition> {
        self.definitions
            .iter()
            .find(|definition| definition.short == letter)
    }

    // Negative numbers (ex: `-5`) are values, unless a short option shares the letter.
    fn is_option(&self, token: &str) -> bool {
        if token.starts_with(LONG_PREFIX) {
            return true;
        }

        match token.strip_prefix(SHORT_PREFIX).and_then(|t| t.chars().next()) {
            Some(letter) => self.find_short(letter).is_some(),
            None => false,
        }
    }
}

fn split_inline(name: &str) -> (&str, Option<&str>) {
    match name.split_once(VALUE_SEPARATOR) {
        Some((name, value)) => (name, Some(value)),
        None => (name, None),
    }
}
