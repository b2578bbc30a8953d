mod interface;
mod middleware;
mod printer;
mod tokenizer;

pub use interface::*;
pub use middleware::*;
pub use printer::ErrorContext;
pub use tokenizer::*;
