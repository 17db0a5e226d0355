mod parser;

pub mod error;
pub mod types;

/// Parse the text of a WSDL document into a [`types::Definition`].
pub fn parse(text: &str) -> Result<types::Definition, error::Error> {
    parser::parse(text)
}
