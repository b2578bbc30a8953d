use crate::parser::printer::ErrorContext;

/// Where the binder reports to.
pub trait UserInterface {
    /// Print one line of regular output.
    fn print(&self, message: String);

    /// Print one line of error output.
    fn print_error(&self, message: String);

    /// Point at the offending Cli token.
    fn print_error_context(&self, error_context: ErrorContext);
}

/// Reports to stdout/stderr.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }

    fn print_error_context(&self, error_context: ErrorContext) {
        eprintln!("{error_context}");
    }
}

#[cfg(any(test, feature = "unit_test"))]
mod util {
    use super::*;
    use std::cell::RefCell;

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Swallows all output.
    #[derive(Debug, Default)]
    pub struct QuietInterface {}

    impl UserInterface for QuietInterface {
        fn print(&self, _message: String) {}

        fn print_error(&self, _message: String) {}

        fn print_error_context(&self, _error_context: ErrorContext) {}
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Records all output, for inspection after the fact.
    #[derive(Debug, Default)]
    pub struct InMemoryInterface {
        messages: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
        error_context: RefCell<Option<String>>,
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }

        fn print_error(&self, message: String) {
            self.errors.borrow_mut().push(message);
        }

        fn print_error_context(&self, error_context: ErrorContext) {
            // Only the first context is kept.
            let mut slot = self.error_context.borrow_mut();

            if slot.is_none() {
                slot.replace(error_context.to_string());
            }
        }
    }

    impl InMemoryInterface {
        /// The recorded (message, error, error context) output, with lines joined by `'\n'`.
        pub fn consume(self) -> (Option<String>, Option<String>, Option<String>) {
            let InMemoryInterface {
                messages,
                errors,
                error_context,
            } = self;

            (
                join(messages.into_inner()),
                join(errors.into_inner()),
                error_context.into_inner(),
            )
        }

        /// The recorded regular output; panics if any error output was recorded.
        pub fn consume_message(self) -> String {
            let (message, error, error_context) = self.consume();
            assert_eq!(error, None);
            assert_eq!(error_context, None);
            message.unwrap_or_default()
        }
    }

    fn join(lines: Vec<String>) -> Option<String> {
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

#[cfg(any(test, feature = "unit_test"))]
pub use util::*;
