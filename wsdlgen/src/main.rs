//! Driver: parses the command line, reports banner/usage, and sequences
//! retrieval, parsing and generation.

use tracing::debug;

use wsdlgen_codegen::EmitterRegistry;
use wsdlgen_wsdl as wsdl;

mod error;
mod generate;
mod options;
mod retrieve;

use error::Error;

const PRODUCT_ID: &str = concat!("wsdlgen - WSDL proxy generator v", env!("CARGO_PKG_VERSION"));

const USAGE: &str = "wsdlgen [options] {path | URL}
   -appsettingurlkey:key        (short -urlkey)
   -appsettingbaseurl:baseurl   (short -baseurl)
   -domain:domain (short -d)    Domain of username for server authentication
   -language:language           Language of generated code. Allowed CS
                                (default) (short -l)
   -namespace:ns                The namespace of the generated code, default
                                none (short -n)
   -nologo                      Suppress the startup logo
   -out:filename                The target file for generated code
                                (short -o)
   -password:pwd                Password used to contact server (short -p)
   -protocol:protocol           Protocol to implement. Allowed: Soap
                                (default), HttpGet, HttpPost
   -server                      Generate server skeleton instead of client
                                proxy code
   -username:username           Username used to contact server (short -u)
   -?                           Display this message

Options can be of the forms  -option, --option or /option";

fn main() {
    tracing_subscriber::fmt::init();
    std::process::exit(run(std::env::args().skip(1).collect()));
}

fn run(args: Vec<String>) -> i32 {
    match execute(args) {
        Ok(()) => 0,
        Err(error) => {
            debug!(?error, "run failed");
            eprintln!("Error: {}", error);
            1
        }
    }
}

fn execute(args: Vec<String>) -> Result<(), Error> {
    let mut parsed = options::parse(args)?;

    if !parsed.no_logo {
        println!("{}", PRODUCT_ID);
    }

    if parsed.help || !parsed.has_source() {
        println!("{}", USAGE);
        return Ok(());
    }

    parsed.config.product_signature = Some(PRODUCT_ID.to_owned());

    let document = parsed.retrieval.fetch()?;
    let definition = wsdl::parse(&document)?;

    let registry = EmitterRegistry::with_builtin();
    let output = generate::generate(&definition, &parsed.config, &registry)?;

    for warning in &output.warnings {
        println!("WARNING: {}", warning);
    }

    println!("Wrote {}", output.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn no_arguments_prints_usage_and_succeeds() {
        assert_eq!(run(Vec::new()), 0);
    }

    #[test]
    fn help_with_other_valid_options_succeeds() {
        assert_eq!(run(vec!["-nologo".to_owned(), "-?".to_owned()]), 0);
    }

    #[test]
    fn unknown_option_is_a_failure() {
        assert_eq!(run(vec!["-badopt:1".to_owned()]), 1);
    }

    #[test]
    fn unreachable_source_is_a_failure() {
        assert_eq!(run(vec!["no/such/file.wsdl".to_owned()]), 1);
    }

    #[test]
    fn generates_from_a_local_document() {
        let dir = tempfile::tempdir().unwrap();

        let wsdl_path = dir.path().join("echo.wsdl");
        let mut file = std::fs::File::create(&wsdl_path).unwrap();
        write!(
            file,
            r#"<definitions name="EchoService" targetNamespace="urn:echo"
    xmlns="http://schemas.xmlsoap.org/wsdl/"
    xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
    xmlns:tns="urn:echo" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <message name="EchoRequest"><part name="text" type="xsd:string"/></message>
  <message name="EchoResponse"><part name="result" type="xsd:string"/></message>
  <portType name="EchoPortType">
    <operation name="EchoBack">
      <input message="tns:EchoRequest"/>
      <output message="tns:EchoResponse"/>
    </operation>
  </portType>
  <binding name="EchoBinding" type="tns:EchoPortType">
    <soap:binding style="rpc" transport="http://schemas.xmlsoap.org/soap/http"/>
    <operation name="EchoBack"><soap:operation soapAction="urn:echo#EchoBack"/></operation>
  </binding>
  <service name="Echo">
    <port name="EchoPort" binding="tns:EchoBinding">
      <soap:address location="http://example.com/echo"/>
    </port>
  </service>
</definitions>"#
        )
        .unwrap();

        // A bare absolute path would be read as a /option marker; a file URL
        // exercises the positional path.
        let source_url = url::Url::from_file_path(&wsdl_path).unwrap();

        let out_path = dir.path().join("Echo.cs");
        let status = run(vec![
            "-nologo".to_owned(),
            format!("-out:{}", out_path.display()),
            source_url.to_string(),
        ]);

        assert_eq!(status, 0);

        let source = std::fs::read_to_string(&out_path).unwrap();
        assert!(source.contains("class Echo"));
        assert!(source.contains(&format!("auto-generated by {}", PRODUCT_ID)));
    }
}
