//! Resolves a parsed service description into the code model.
//!
//! Only the first service definition in the document is imported; additional
//! services are skipped. Links that cannot be resolved (a port naming an
//! undefined binding, a binding naming an undefined port type) are reported
//! as warnings rather than aborting the import.

use tracing::warn;

use wsdlgen_wsdl::types::Definition;

use crate::{
    error::Error,
    model::{BindingClass, CodeUnit, Endpoint, ImportStyle, OperationStub, Param, Protocol, WireType},
};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    pub style: ImportStyle,
    pub protocol: String,
    pub namespace: Option<String>,
    pub url_setting_key: Option<String>,
    pub base_url: Option<String>,
    pub product_signature: Option<String>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            style: ImportStyle::default(),
            protocol: "Soap".to_owned(),
            namespace: None,
            url_setting_key: None,
            base_url: None,
            product_signature: None,
        }
    }
}

/// Non-fatal conditions encountered while importing a description. These are
/// reported to the user but do not abort generation.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImportWarning {
    #[error("port {port} references undefined binding {binding}")]
    UnresolvedBinding { port: String, binding: String },

    #[error("binding {binding} references undefined port type {port_type}")]
    UnresolvedPortType { binding: String, port_type: String },

    #[error("binding {binding} uses unsupported transport {transport}")]
    UnsupportedTransport { binding: String, transport: String },

    #[error("operation {operation} has no usable input message")]
    SkippedOperation { operation: String },
}

pub fn import(
    definition: &Definition,
    options: &ImportOptions,
) -> Result<(CodeUnit, Vec<ImportWarning>), Error> {
    let protocol: Protocol = options.protocol.parse()?;

    if options.base_url.is_some() && options.url_setting_key.is_none() {
        return Err(Error::BaseUrlWithoutUrlKey);
    }

    let service = definition.services.first().ok_or(Error::NoServices)?;
    for skipped in definition.services.iter().skip(1) {
        warn!(service = %skipped.name, "skipping additional service definition");
    }

    let mut warnings = Vec::new();
    let mut classes = Vec::new();

    for port in &service.ports {
        let binding = match definition.binding(&port.binding) {
            Some(binding) => binding,
            None => {
                warnings.push(ImportWarning::UnresolvedBinding {
                    port: port.name.clone(),
                    binding: port.binding.clone(),
                });
                continue;
            }
        };

        if !binding.transport.is_empty() && !binding.transport.contains("http") {
            warnings.push(ImportWarning::UnsupportedTransport {
                binding: binding.name.clone(),
                transport: binding.transport.clone(),
            });
            continue;
        }

        let port_type = match definition.port_type(&binding.port_type) {
            Some(port_type) => port_type,
            None => {
                warnings.push(ImportWarning::UnresolvedPortType {
                    binding: binding.name.clone(),
                    port_type: binding.port_type.clone(),
                });
                continue;
            }
        };

        let mut operations = Vec::new();

        for operation in &port_type.operations {
            let input = match operation
                .input
                .as_ref()
                .and_then(|name| definition.message(name))
            {
                Some(message) => message,
                None => {
                    warnings.push(ImportWarning::SkippedOperation {
                        operation: operation.name.clone(),
                    });
                    continue;
                }
            };

            let params = input
                .parts
                .iter()
                .map(|part| Param {
                    name: part.name.clone(),
                    ty: WireType::from_xsd(&part.ty),
                })
                .collect();

            let returns = operation
                .output
                .as_ref()
                .and_then(|name| definition.message(name))
                .and_then(|message| message.parts.first())
                .map(|part| WireType::from_xsd(&part.ty));

            let action = binding
                .operations
                .iter()
                .find(|bound| bound.name == operation.name)
                .and_then(|bound| bound.soap_action.clone());

            operations.push(OperationStub {
                name: operation.name.clone(),
                action,
                documentation: operation.documentation.clone(),
                params,
                returns,
            });
        }

        let endpoint = match &options.url_setting_key {
            Some(key) => Endpoint::AppSetting {
                key: key.clone(),
                relative: options
                    .base_url
                    .as_ref()
                    .map(|base| relative_to(&port.location, base)),
            },
            None => Endpoint::Fixed(port.location.clone()),
        };

        // A single-port service takes the service name; with several ports
        // each class is named after its port.
        let name = if service.ports.len() == 1 {
            service.name.clone()
        } else {
            port.name.clone()
        };

        classes.push(BindingClass {
            name,
            binding_name: binding.name.clone(),
            style: options.style,
            protocol,
            endpoint,
            operations,
        });
    }

    let header_comment = options
        .product_signature
        .as_ref()
        .map(|signature| format!("This source code was auto-generated by {}", signature));

    let unit = CodeUnit {
        header_comment,
        namespace: options.namespace.clone(),
        classes,
    };

    Ok((unit, warnings))
}

fn relative_to(location: &str, base: &str) -> String {
    location.strip_prefix(base).unwrap_or(location).to_owned()
}
