use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::parser::interface::UserInterface;
use crate::parser::tokenizer::OptionDefinition;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;
// We'll target 95% of the total width, to ensure the printer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;
// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_DESCRIPTION_WIDTH: usize = 17;

/// Renders the usage of a set of options.
#[derive(Debug)]
pub(crate) struct Printer {
    usage: String,
    definitions: Vec<OptionDefinition>,
    terminal_width: Option<usize>,
}

impl Printer {
    pub(crate) fn terminal(usage: impl Into<String>, definitions: Vec<OptionDefinition>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(usage, definitions, terminal_width)
    }

    pub(crate) fn new(
        usage: impl Into<String>,
        mut definitions: Vec<OptionDefinition>,
        terminal_width: Option<usize>,
    ) -> Self {
        definitions.sort_by(|a, b| a.long().cmp(b.long()));
        Self {
            usage: usage.into(),
            definitions,
            terminal_width,
        }
    }

    pub(crate) fn print_usage(&self, user_interface: &(impl UserInterface + ?Sized)) {
        user_interface.print(format!("usage: {}", self.usage));

        if self.definitions.is_empty() {
            return;
        }

        let rows: Vec<(String, String)> = self
            .definitions
            .iter()
            .map(|definition| (flags(definition), description(definition)))
            .collect();
        let left_width = rows
            .iter()
            .map(|(flags, _)| flags.chars().count())
            .max()
            .unwrap_or_default();
        let description_width = self.description_width(left_width);
        let padding = format!("{:PADDING_WIDTH$}", "");

        user_interface.print("".to_string());
        user_interface.print("options:".to_string());

        for (flags, description) in rows {
            let parts = match description_width {
                Some(width) => chunk(&description, width),
                None => vec![description],
            };

            if parts.is_empty() {
                user_interface.print(format!("{:MAIN_INDENT$}{flags}", ""));
            }

            for (i, part) in parts.iter().enumerate() {
                let left = if i == 0 { flags.as_str() } else { "" };
                user_interface.print(format!("{:MAIN_INDENT$}{left:left_width$}{padding}{part}", ""));
            }
        }
    }

    fn description_width(&self, left_width: usize) -> Option<usize> {
        let total_width = self.terminal_width?;
        let target_width = (total_width as f64 * TARGET_TOTAL_FACTOR) as usize;
        let non_description = MAIN_INDENT + left_width + PADDING_WIDTH;
        let width = std::cmp::max(
            target_width.saturating_sub(non_description),
            MINIMUM_DESCRIPTION_WIDTH,
        );

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_description} within the target total {target_width}.  Selecting description width: {width}.");
        }

        Some(width)
    }
}

fn flags(definition: &OptionDefinition) -> String {
    let long = definition.long();

    if definition.is_flag() {
        format!("{SHORT_PREFIX}{s}, {LONG_PREFIX}{long}", s = definition.short())
    } else {
        let example = long.to_ascii_uppercase().replace('-', "_");
        format!(
            "{SHORT_PREFIX}{s} {example}, {LONG_PREFIX}{long} {example}",
            s = definition.short()
        )
    }
}

fn description(definition: &OptionDefinition) -> String {
    if definition.required() {
        format!("{} {REQUIRED_MARKER}", definition.description())
    } else {
        definition.description().to_string()
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ').filter(|word| !word.is_empty()) {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let letters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut start = 0;

    while letters.len() - start > width {
        let piece: String = letters[start..start + increment].iter().collect();
        lines.push(format!("{piece}-"));
        start += increment;
    }

    current.extend(&letters[start..]);
}

/// The Cli tokens, with a caret under the offending one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    /// Create the context pointing at the character `offset` (spaces excluded) of the `tokens`.
    pub fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = self.tokens.join(" ");
        let total: usize = self.tokens.iter().map(|token| token.chars().count()).sum();
        let offset = std::cmp::min(self.offset, total.saturating_sub(1));
        // One separating space per token entirely before the offset.
        let spaces = self
            .tokens
            .iter()
            .take(self.tokens.len().saturating_sub(1))
            .scan(0, |length, token| {
                *length += token.chars().count();
                Some(*length)
            })
            .filter(|length| *length <= offset)
            .count();

        write!(f, "{line}\n{:column$}^", "", column = offset + spaces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::InMemoryInterface;
    use rstest::rstest;

    fn definitions() -> Vec<OptionDefinition> {
        vec![
            OptionDefinition::new('v', "verbose", "Chatty.", true, false),
            OptionDefinition::new('c', "count", "How many.", false, true),
        ]
    }

    #[test]
    fn print_usage_empty() {
        // Setup
        let printer = Printer::new("program", Vec::default(), None);
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_usage(&interface);

        // Verify
        assert_eq!(interface.consume_message(), "usage: program");
    }

    #[rstest]
    #[case(None)]
    #[case(Some(80))]
    #[case(Some(1000))]
    fn print_usage(#[case] terminal_width: Option<usize>) {
        // Setup
        let printer = Printer::new("program [options]", definitions(), terminal_width);
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_usage(&interface);

        // Verify
        assert_eq!(
            interface.consume_message(),
            r#"usage: program [options]

options:
 -c COUNT, --count COUNT   How many. (required)
 -v, --verbose             Chatty."#
        );
    }

    #[test]
    fn print_usage_wrapped() {
        // Setup
        let printer = Printer::new("program", definitions(), Some(40));
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_usage(&interface);

        // Verify
        let message = interface.consume_message();
        let lines: Vec<&str> = message.lines().collect();
        assert_eq!(lines[3], " -c COUNT, --count COUNT   How many.");
        assert_eq!(lines[4], format!("{:27}(required)", ""));
        assert_eq!(lines[5], " -v, --verbose             Chatty.");
    }

    #[test]
    fn print_usage_no_description() {
        // Setup
        let printer = Printer::new(
            "program",
            vec![OptionDefinition::new('d', "dry-run", "", true, false)],
            Some(80),
        );
        let interface = InMemoryInterface::default();

        // Execute
        printer.print_usage(&interface);

        // Verify
        let message = interface.consume_message();
        assert_eq!(message.lines().last(), Some(" -d, --dry-run"));
    }

    #[test]
    fn flags_example() {
        let definition = OptionDefinition::new('o', "output-file", "", false, false);
        assert_eq!(
            flags(&definition),
            "-o OUTPUT_FILE, --output-file OUTPUT_FILE"
        );
    }

    #[rstest]
    #[case("", 5, vec![])]
    #[case("  ", 5, vec![])]
    #[case("abc", 5, vec!["abc"])]
    #[case("a bb ccc", 4, vec!["a bb", "ccc"])]
    #[case("a  bb", 4, vec!["a bb"])]
    #[case("abcdefghij", 4, vec!["abc-", "def-", "ghij"])]
    #[case("x abcdefghij", 4, vec!["x", "abc-", "def-", "ghij"])]
    #[case("ééééé", 4, vec!["ééé-", "éé"])]
    fn chunk_paragraph(#[case] paragraph: &str, #[case] width: usize, #[case] expected: Vec<&str>) {
        assert_eq!(chunk(paragraph, width), expected);
    }

    #[rstest]
    #[case(vec!["abc"], 0, "abc\n^")]
    #[case(vec!["abc"], 2, "abc\n  ^")]
    #[case(vec!["abc"], 9, "abc\n  ^")]
    #[case(vec!["-v", "abc"], 2, "-v abc\n   ^")]
    #[case(vec!["--count", "1", "-c", "2"], 8, "--count 1 -c 2\n          ^")]
    #[case(vec!["--count", "é", "-x"], 8, "--count é -x\n          ^")]
    fn error_context(#[case] tokens: Vec<&str>, #[case] offset: usize, #[case] expected: &str) {
        assert_eq!(ErrorContext::new(offset, tokens.as_slice()).to_string(), expected);
    }
}
