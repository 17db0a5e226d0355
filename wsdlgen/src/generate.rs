//! Generation orchestration: select an emitter, import the parsed
//! description into the code model, emit source text and write it out.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

use wsdlgen_codegen::{
    import::{import, ImportOptions, ImportWarning},
    Emitter, EmitterRegistry, Error as CodegenError, ImportStyle,
};
use wsdlgen_wsdl::types::Definition;

use crate::{error::Error, options::GenerationConfig};

#[derive(Debug)]
pub struct GeneratedOutput {
    pub path: PathBuf,
    pub warnings: Vec<ImportWarning>,
}

pub fn generate(
    definition: &Definition,
    config: &GenerationConfig,
    registry: &EmitterRegistry,
) -> Result<GeneratedOutput, Error> {
    // The emitter is resolved first so an unsupported language can never
    // leave a file behind.
    let emitter = registry.get(&config.language)?;

    let options = ImportOptions {
        style: if config.server {
            ImportStyle::Server
        } else {
            ImportStyle::Client
        },
        protocol: config.protocol.clone(),
        namespace: config.namespace.clone(),
        url_setting_key: config.url_setting_key.clone(),
        base_url: config.base_url.clone(),
        product_signature: config.product_signature.clone(),
    };

    let (unit, warnings) = import(definition, &options)?;
    let source = emitter.emit(&unit);

    let path = resolve_output_path(config, definition, emitter)?;
    write_output(&path, &source)?;

    Ok(GeneratedOutput { path, warnings })
}

/// An explicit `-out` filename is used verbatim; otherwise the output is
/// named after the first service with the emitter's extension.
pub fn resolve_output_path(
    config: &GenerationConfig,
    definition: &Definition,
    emitter: &dyn Emitter,
) -> Result<PathBuf, Error> {
    if let Some(filename) = &config.out_filename {
        return Ok(PathBuf::from(filename));
    }

    let service = definition
        .services
        .first()
        .ok_or(CodegenError::NoServices)?;

    Ok(PathBuf::from(format!(
        "{}.{}",
        service.name,
        emitter.file_extension()
    )))
}

fn write_output(path: &Path, source: &str) -> Result<(), Error> {
    let mut file = File::create(path).map_err(|error| Error::OutputWrite {
        path: path.to_owned(),
        source: error,
    })?;

    file.write_all(source.as_bytes())
        .map_err(|error| Error::OutputWrite {
            path: path.to_owned(),
            source: error,
        })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const ECHO_WSDL: &str = r#"<?xml version="1.0"?>
<definitions name="EchoService" targetNamespace="urn:echo"
    xmlns="http://schemas.xmlsoap.org/wsdl/"
    xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
    xmlns:tns="urn:echo"
    xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <message name="EchoRequest">
    <part name="text" type="xsd:string"/>
  </message>
  <message name="EchoResponse">
    <part name="result" type="xsd:string"/>
  </message>
  <portType name="EchoPortType">
    <operation name="EchoBack">
      <input message="tns:EchoRequest"/>
      <output message="tns:EchoResponse"/>
    </operation>
  </portType>
  <binding name="EchoBinding" type="tns:EchoPortType">
    <soap:binding style="rpc" transport="http://schemas.xmlsoap.org/soap/http"/>
    <operation name="EchoBack">
      <soap:operation soapAction="urn:echo#EchoBack"/>
      <input><soap:body use="encoded"/></input>
      <output><soap:body use="encoded"/></output>
    </operation>
  </binding>
  <service name="Echo">
    <port name="EchoPort" binding="tns:EchoBinding">
      <soap:address location="http://example.com/echo"/>
    </port>
  </service>
</definitions>"#;

    fn echo_definition() -> Definition {
        wsdlgen_wsdl::parse(ECHO_WSDL).unwrap()
    }

    #[test]
    fn default_output_path_is_service_name_and_extension() {
        let registry = EmitterRegistry::with_builtin();
        let emitter = registry.get("CS").unwrap();

        let path =
            resolve_output_path(&GenerationConfig::default(), &echo_definition(), emitter).unwrap();

        assert_eq!(path, PathBuf::from("Echo.cs"));
    }

    #[test]
    fn explicit_out_filename_wins_over_service_name() {
        let config = GenerationConfig {
            out_filename: Some("custom.cs".to_owned()),
            ..Default::default()
        };

        let registry = EmitterRegistry::with_builtin();
        let emitter = registry.get("CS").unwrap();

        let path = resolve_output_path(&config, &echo_definition(), emitter).unwrap();
        assert_eq!(path, PathBuf::from("custom.cs"));
    }

    #[test]
    fn round_trip_generates_a_client_proxy() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Echo.cs");

        let config = GenerationConfig {
            out_filename: Some(out.to_string_lossy().into_owned()),
            product_signature: Some("wsdlgen test".to_owned()),
            ..Default::default()
        };

        let registry = EmitterRegistry::with_builtin();
        let output = generate(&echo_definition(), &config, &registry).unwrap();

        assert!(output.warnings.is_empty());
        assert_eq!(output.path, out);

        let source = std::fs::read_to_string(&out).unwrap();
        assert!(!source.is_empty());
        assert!(source.contains("class Echo"));
        assert!(source.contains("SoapHttpClientProtocol"));
        assert!(source.contains("urn:echo#EchoBack"));
        assert!(source.contains("auto-generated by wsdlgen test"));
    }

    #[test]
    fn server_config_generates_a_skeleton() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Echo.cs");

        let config = GenerationConfig {
            out_filename: Some(out.to_string_lossy().into_owned()),
            server: true,
            ..Default::default()
        };

        let registry = EmitterRegistry::with_builtin();
        generate(&echo_definition(), &config, &registry).unwrap();

        let source = std::fs::read_to_string(&out).unwrap();
        assert!(source.contains("public abstract class Echo"));
    }

    #[test]
    fn unsupported_language_fails_before_any_file_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("Echo.xx");

        let config = GenerationConfig {
            language: "xx".to_owned(),
            out_filename: Some(out.to_string_lossy().into_owned()),
            ..Default::default()
        };

        let registry = EmitterRegistry::with_builtin();
        let error = generate(&echo_definition(), &config, &registry).unwrap_err();

        assert!(matches!(
            error,
            Error::Codegen(CodegenError::UnsupportedLanguage(_))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn unwritable_output_path_is_an_output_write_error() {
        let config = GenerationConfig {
            out_filename: Some("no/such/directory/Echo.cs".to_owned()),
            ..Default::default()
        };

        let registry = EmitterRegistry::with_builtin();
        let error = generate(&echo_definition(), &config, &registry).unwrap_err();

        assert!(matches!(error, Error::OutputWrite { .. }));
    }
}
