//! Language-neutral code model produced by the importer and consumed by the
//! emitters.

use std::str::FromStr;

use crate::error::Error;

/// Whether generated code is a calling client proxy or a serving skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStyle {
    Client,
    Server,
}

impl Default for ImportStyle {
    fn default() -> Self {
        ImportStyle::Client
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Soap,
    HttpGet,
    HttpPost,
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Error> {
        match name.to_ascii_lowercase().as_str() {
            "soap" => Ok(Protocol::Soap),
            "httpget" => Ok(Protocol::HttpGet),
            "httppost" => Ok(Protocol::HttpPost),
            _ => Err(Error::UnsupportedProtocol(name.to_owned())),
        }
    }
}

/// How the generated binding class locates the service endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// The port address from the document, hard-coded.
    Fixed(String),

    /// Read from the application configuration under `key`, optionally
    /// concatenated with the part of the port address relative to the
    /// configured base URL.
    AppSetting {
        key: String,
        relative: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireType {
    String,
    Int,
    Long,
    Short,
    Bool,
    Float,
    Double,
    Opaque(String),
}

impl WireType {
    pub fn from_xsd(name: &str) -> Self {
        match name {
            "string" => WireType::String,
            "int" | "integer" => WireType::Int,
            "long" => WireType::Long,
            "short" => WireType::Short,
            "boolean" => WireType::Bool,
            "float" => WireType::Float,
            "double" | "decimal" => WireType::Double,
            other => WireType::Opaque(other.to_owned()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: WireType,
}

#[derive(Debug, Clone)]
pub struct OperationStub {
    pub name: String,
    pub action: Option<String>,
    pub documentation: Option<String>,
    pub params: Vec<Param>,
    pub returns: Option<WireType>,
}

#[derive(Debug, Clone)]
pub struct BindingClass {
    pub name: String,
    pub binding_name: String,
    pub style: ImportStyle,
    pub protocol: Protocol,
    pub endpoint: Endpoint,
    pub operations: Vec<OperationStub>,
}

#[derive(Default, Debug, Clone)]
pub struct CodeUnit {
    pub header_comment: Option<String>,
    pub namespace: Option<String>,
    pub classes: Vec<BindingClass>,
}
