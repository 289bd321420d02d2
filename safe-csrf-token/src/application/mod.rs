mod token;

pub use token::{sanitize, token, token_value};
