pub mod revision;
pub mod structure;
pub mod token;

pub use revision::Revision;
pub use structure::{Paragraph, Sentence};
pub use token::Token;
