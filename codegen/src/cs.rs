//! Built-in C#-family emitter. Client style produces a proxy class deriving
//! from the protocol client base; server style produces an abstract web
//! service skeleton.

use crate::{
    emitter::Emitter,
    model::{BindingClass, CodeUnit, Endpoint, ImportStyle, OperationStub, Param, Protocol, WireType},
};

pub struct CSharpEmitter;

impl Emitter for CSharpEmitter {
    fn file_extension(&self) -> &str {
        "cs"
    }

    fn emit(&self, unit: &CodeUnit) -> String {
        let mut out = Writer::default();

        if let Some(comment) = &unit.header_comment {
            out.line("//");
            out.line(&format!("// {}", comment));
            out.line("//");
            out.blank();
        }

        out.line("using System;");
        out.line("using System.Web.Services;");
        out.line("using System.Web.Services.Protocols;");
        out.blank();

        if let Some(namespace) = &unit.namespace {
            out.line(&format!("namespace {}", namespace));
            out.open();
        }

        for (index, class) in unit.classes.iter().enumerate() {
            if index > 0 {
                out.blank();
            }

            match class.style {
                ImportStyle::Client => emit_client(&mut out, class),
                ImportStyle::Server => emit_server(&mut out, class),
            }
        }

        if unit.namespace.is_some() {
            out.close();
        }

        out.finish()
    }
}

#[derive(Default)]
struct Writer {
    out: String,
    indent: usize,
}

impl Writer {
    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }

    fn open(&mut self) {
        self.line("{");
        self.indent += 1;
    }

    fn close(&mut self) {
        self.indent -= 1;
        self.line("}");
    }

    fn finish(self) -> String {
        self.out
    }
}

fn emit_client(out: &mut Writer, class: &BindingClass) {
    out.line(&format!(
        "[System.Web.Services.WebServiceBindingAttribute(Name=\"{}\")]",
        class.binding_name
    ));
    out.line(&format!(
        "public class {} : {}",
        class.name,
        client_base(class.protocol)
    ));
    out.open();

    out.line(&format!("public {}()", class.name));
    out.open();
    emit_endpoint(out, &class.endpoint);
    out.close();

    for operation in &class.operations {
        out.blank();
        emit_client_operation(out, class.protocol, operation);
    }

    out.close();
}

fn emit_server(out: &mut Writer, class: &BindingClass) {
    out.line(&format!(
        "[System.Web.Services.WebServiceBindingAttribute(Name=\"{}\")]",
        class.binding_name
    ));
    out.line(&format!(
        "public abstract class {} : System.Web.Services.WebService",
        class.name
    ));
    out.open();

    for (index, operation) in class.operations.iter().enumerate() {
        if index > 0 {
            out.blank();
        }

        emit_documentation(out, operation);
        out.line("[System.Web.Services.WebMethodAttribute()]");
        out.line(&format!(
            "public abstract {} {}({});",
            return_type(operation.returns.as_ref()),
            operation.name,
            parameter_list(&operation.params)
        ));
    }

    out.close();
}

fn emit_endpoint(out: &mut Writer, endpoint: &Endpoint) {
    match endpoint {
        Endpoint::Fixed(url) => out.line(&format!("this.Url = \"{}\";", url)),

        Endpoint::AppSetting { key, relative } => match relative {
            None => out.line(&format!(
                "this.Url = System.Configuration.ConfigurationSettings.AppSettings[\"{}\"];",
                key
            )),
            Some(relative) => {
                out.line(&format!(
                    "string urlSetting = System.Configuration.ConfigurationSettings.AppSettings[\"{}\"];",
                    key
                ));
                out.line(&format!(
                    "this.Url = string.Concat(urlSetting, \"{}\");",
                    relative
                ));
            }
        },
    }
}

fn emit_client_operation(out: &mut Writer, protocol: Protocol, operation: &OperationStub) {
    emit_documentation(out, operation);

    if protocol == Protocol::Soap {
        out.line(&format!(
            "[System.Web.Services.Protocols.SoapRpcMethodAttribute(\"{}\")]",
            operation.action.as_deref().unwrap_or("")
        ));
    }

    out.line(&format!(
        "public {} {}({})",
        return_type(operation.returns.as_ref()),
        operation.name,
        parameter_list(&operation.params)
    ));
    out.open();

    let arguments = operation
        .params
        .iter()
        .map(|param| param.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let array = if arguments.is_empty() {
        "new object[0]".to_owned()
    } else {
        format!("new object[] {{ {} }}", arguments)
    };

    match &operation.returns {
        Some(ty) => {
            out.line(&format!(
                "object[] results = this.Invoke(\"{}\", {});",
                operation.name, array
            ));
            out.line(&format!("return (({})(results[0]));", cs_type(ty)));
        }
        None => out.line(&format!("this.Invoke(\"{}\", {});", operation.name, array)),
    }

    out.close();
}

fn emit_documentation(out: &mut Writer, operation: &OperationStub) {
    if let Some(documentation) = &operation.documentation {
        out.line("/// <summary>");
        for line in documentation.lines() {
            out.line(&format!("/// {}", line.trim()));
        }
        out.line("/// </summary>");
    }
}

fn client_base(protocol: Protocol) -> &'static str {
    match protocol {
        Protocol::Soap => "System.Web.Services.Protocols.SoapHttpClientProtocol",
        Protocol::HttpGet => "System.Web.Services.Protocols.HttpGetClientProtocol",
        Protocol::HttpPost => "System.Web.Services.Protocols.HttpPostClientProtocol",
    }
}

fn parameter_list(params: &[Param]) -> String {
    params
        .iter()
        .map(|param| format!("{} {}", cs_type(&param.ty), param.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn return_type(ty: Option<&WireType>) -> &'static str {
    match ty {
        Some(ty) => cs_type(ty),
        None => "void",
    }
}

fn cs_type(ty: &WireType) -> &'static str {
    match ty {
        WireType::String => "string",
        WireType::Int => "int",
        WireType::Long => "long",
        WireType::Short => "short",
        WireType::Bool => "bool",
        WireType::Float => "float",
        WireType::Double => "double",
        WireType::Opaque(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo_unit(style: ImportStyle) -> CodeUnit {
        CodeUnit {
            header_comment: Some("This source code was auto-generated by wsdlgen".to_owned()),
            namespace: Some("Example.Generated".to_owned()),
            classes: vec![BindingClass {
                name: "Echo".to_owned(),
                binding_name: "EchoBinding".to_owned(),
                style,
                protocol: Protocol::Soap,
                endpoint: Endpoint::Fixed("http://example.com/echo".to_owned()),
                operations: vec![OperationStub {
                    name: "EchoBack".to_owned(),
                    action: Some("urn:echo#EchoBack".to_owned()),
                    documentation: None,
                    params: vec![Param {
                        name: "text".to_owned(),
                        ty: WireType::String,
                    }],
                    returns: Some(WireType::String),
                }],
            }],
        }
    }

    #[test]
    fn client_proxy_derives_from_soap_client_protocol() {
        let source = CSharpEmitter.emit(&echo_unit(ImportStyle::Client));

        assert!(source.contains("namespace Example.Generated"));
        assert!(source.contains(
            "public class Echo : System.Web.Services.Protocols.SoapHttpClientProtocol"
        ));
        assert!(source.contains("this.Url = \"http://example.com/echo\";"));
        assert!(source.contains("SoapRpcMethodAttribute(\"urn:echo#EchoBack\")"));
        assert!(source.contains("public string EchoBack(string text)"));
        assert!(source.contains("return ((string)(results[0]));"));
    }

    #[test]
    fn server_skeleton_is_abstract() {
        let source = CSharpEmitter.emit(&echo_unit(ImportStyle::Server));

        assert!(source.contains(
            "public abstract class Echo : System.Web.Services.WebService"
        ));
        assert!(source.contains("public abstract string EchoBack(string text);"));
        assert!(!source.contains("this.Invoke"));
    }

    #[test]
    fn app_setting_endpoint_reads_configuration() {
        let mut unit = echo_unit(ImportStyle::Client);
        unit.classes[0].endpoint = Endpoint::AppSetting {
            key: "EchoUrl".to_owned(),
            relative: Some("/echo".to_owned()),
        };

        let source = CSharpEmitter.emit(&unit);
        assert!(source.contains("ConfigurationSettings.AppSettings[\"EchoUrl\"]"));
        assert!(source.contains("string.Concat(urlSetting, \"/echo\");"));
    }

    #[test]
    fn header_comment_leads_the_file() {
        let source = CSharpEmitter.emit(&echo_unit(ImportStyle::Client));
        assert!(source.starts_with("//\n// This source code was auto-generated by wsdlgen\n//\n"));
    }
}
