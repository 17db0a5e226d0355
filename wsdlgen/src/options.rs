//! Command-line argument handling.
//!
//! Arguments are classified by their leading marker: `-option`, `--option`
//! and `/option` are equivalent option forms, split on the first `:` into a
//! name and an optional value. Anything else is the positional document
//! source, of which exactly one is accepted.

use crate::{error::Error, retrieve::RetrievalRequest};

#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub language: String,
    pub namespace: Option<String>,
    pub out_filename: Option<String>,
    pub protocol: String,
    pub server: bool,
    pub url_setting_key: Option<String>,
    pub base_url: Option<String>,
    pub product_signature: Option<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            language: "CS".to_owned(),
            namespace: None,
            out_filename: None,
            protocol: "Soap".to_owned(),
            server: false,
            url_setting_key: None,
            base_url: None,
            product_signature: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ParsedArguments {
    pub config: GenerationConfig,
    pub retrieval: RetrievalRequest,
    pub help: bool,
    pub no_logo: bool,
}

impl ParsedArguments {
    pub fn has_source(&self) -> bool {
        self.retrieval.has_source()
    }
}

pub fn parse<I>(args: I) -> Result<ParsedArguments, Error>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = ParsedArguments::default();

    for argument in args {
        import_argument(&mut parsed, &argument)?;
    }

    Ok(parsed)
}

fn import_argument(parsed: &mut ParsedArguments, argument: &str) -> Result<(), Error> {
    let pair = if let Some(rest) = argument.strip_prefix("--") {
        rest
    } else if let Some(rest) = argument.strip_prefix('-') {
        rest
    } else if let Some(rest) = argument.strip_prefix('/') {
        rest
    } else {
        return parsed.retrieval.set_url(argument.to_owned());
    };

    let (option, value) = match pair.split_once(':') {
        Some((option, value)) => (option, Some(value)),
        None => (pair, None),
    };

    match option {
        "appsettingurlkey" | "urlkey" => {
            parsed.config.url_setting_key = Some(required(option, value)?)
        }

        "appsettingbaseurl" | "baseurl" => parsed.config.base_url = Some(required(option, value)?),

        "d" | "domain" => parsed.retrieval.set_domain(required(option, value)?),

        "l" | "language" => parsed.config.language = required(option, value)?,

        "n" | "namespace" => parsed.config.namespace = Some(required(option, value)?),

        "nologo" => parsed.no_logo = true,

        "o" | "out" => parsed.config.out_filename = Some(required(option, value)?),

        "p" | "password" => parsed.retrieval.set_password(required(option, value)?),

        // The bare form leaves the default protocol in place.
        "protocol" => {
            if let Some(value) = value {
                parsed.config.protocol = value.to_owned();
            }
        }

        "proxy" | "proxydomain" | "pd" | "proxypassword" | "pp" | "proxyusername" | "pu" => {
            return Err(Error::UnsupportedOption(option.to_owned()))
        }

        "server" => parsed.config.server = true,

        "u" | "username" => parsed.retrieval.set_username(required(option, value)?),

        "?" => parsed.help = true,

        _ => return Err(Error::UnknownOption(option.to_owned())),
    }

    Ok(())
}

fn required(option: &str, value: Option<&str>) -> Result<String, Error> {
    value
        .map(str::to_owned)
        .ok_or_else(|| Error::MissingValue(option.to_owned()))
}
