pub(crate) const DEFAULT_DESCRIPTION: &str = "Description not provided.";
pub(crate) const SHORT_ALPHABET: usize = 26;
pub(crate) const LONG_PREFIX: &str = "--";
pub(crate) const SHORT_PREFIX: char = '-';
pub(crate) const VALUE_SEPARATOR: char = '=';
pub(crate) const PARSE_FAILURE: &str = "An error occurred while parsing command line parameters";
pub(crate) const REQUIRED_MARKER: &str = "(required)";
