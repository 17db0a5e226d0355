use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error parsing XML input")]
    Xml(#[from] quick_xml::Error),

    #[error("Document root is not a WSDL definitions element")]
    NotAServiceDescription,

    #[error("Element {element} is missing required attribute {attribute}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
}
