use quick_xml::{
    events::{attributes::Attributes, BytesStart, BytesText, Event},
    Reader,
};
use tracing::debug;

use super::{
    error,
    types::{
        Binding, BindingOperation, Definition, Message, Operation, Part, Port, PortType, Service,
    },
};

fn get_attributes<const N: usize>(
    reader: &Reader<&[u8]>,
    attributes: Attributes<'_>,
    names: [&'static str; N],
) -> Result<[Option<String>; N], error::Error> {
    const INIT: Option<String> = None;
    let mut result = [INIT; N];

    for attribute in attributes {
        let attribute = attribute?;
        let key = local_name(reader.decode(attribute.key)?);

        for (index, name) in names.iter().enumerate() {
            if key == *name {
                result[index] = Some(reader.decode(attribute.value.as_ref())?.to_owned());
                break;
            }
        }
    }

    Ok(result)
}

fn local_name(prefixed_name: &str) -> &str {
    match prefixed_name.rsplit_once(':') {
        Some((_, local)) => local,
        None => prefixed_name,
    }
}

fn require(
    element: &'static str,
    attribute: &'static str,
    value: Option<String>,
) -> Result<String, error::Error> {
    value.ok_or(error::Error::MissingAttribute { element, attribute })
}

#[derive(Debug)]
enum ParseState {
    Definitions,

    Message {
        name: String,
        parts: Vec<Part>,
    },
    Part {
        name: String,
        ty: String,
    },

    PortType {
        name: String,
        operations: Vec<Operation>,
    },
    Operation {
        name: String,
        documentation: Option<String>,
        input: Option<String>,
        output: Option<String>,
    },
    Documentation(Option<String>),
    Input {
        message: String,
    },
    Output {
        message: String,
    },

    Binding {
        name: String,
        port_type: String,
        transport: Option<String>,
        operations: Vec<BindingOperation>,
    },
    Transport {
        transport: String,
    },
    BindingOperation {
        name: String,
        action: Option<String>,
    },
    OperationAction {
        action: String,
    },

    Service {
        name: String,
        ports: Vec<Port>,
    },
    Port {
        name: String,
        binding: String,
        address: Option<String>,
    },
    Address {
        location: String,
    },

    Other(String),
}

#[derive(Default)]
struct Parser {
    definition: Definition,
    seen_definitions: bool,
}

impl Parser {
    fn handle_start(
        &mut self,
        stack: &mut Vec<ParseState>,
        reader: &Reader<&[u8]>,
        start: &BytesStart<'_>,
    ) -> Result<(), error::Error> {
        let name = local_name(reader.decode(start.name())?).to_owned();

        let state = stack.pop();
        let mut new_state = ParseState::Other(name.clone());

        match state {
            None => {
                if name != "definitions" {
                    return Err(error::Error::NotAServiceDescription);
                }

                self.seen_definitions = true;
                new_state = ParseState::Definitions;
            }

            Some(ParseState::Definitions) => match name.as_str() {
                "message" => {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::Message {
                        name: require("message", "name", name)?,
                        parts: Vec::new(),
                    };
                }

                "portType" => {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::PortType {
                        name: require("portType", "name", name)?,
                        operations: Vec::new(),
                    };
                }

                "binding" => {
                    let [name, ty] = get_attributes(reader, start.attributes(), ["name", "type"])?;
                    let ty = require("binding", "type", ty)?;

                    new_state = ParseState::Binding {
                        name: require("binding", "name", name)?,
                        port_type: local_name(&ty).to_owned(),
                        transport: None,
                        operations: Vec::new(),
                    };
                }

                "service" => {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::Service {
                        name: require("service", "name", name)?,
                        ports: Vec::new(),
                    };
                }

                other => debug!(element = other, "skipping element in definitions block"),
            },

            Some(ParseState::Message { .. }) => match name.as_str() {
                "part" => {
                    let [name, element, ty] =
                        get_attributes(reader, start.attributes(), ["name", "element", "type"])?;
                    let ty = require("part", "type", element.or(ty))?;

                    new_state = ParseState::Part {
                        name: require("part", "name", name)?,
                        ty: local_name(&ty).to_owned(),
                    };
                }

                other => debug!(element = other, "skipping element in message block"),
            },

            Some(ParseState::PortType { .. }) => match name.as_str() {
                "operation" => {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::Operation {
                        name: require("operation", "name", name)?,
                        documentation: None,
                        input: None,
                        output: None,
                    };
                }

                other => debug!(element = other, "skipping element in portType block"),
            },

            Some(ParseState::Operation { .. }) => match name.as_str() {
                "documentation" => new_state = ParseState::Documentation(None),

                "input" | "output" => {
                    let [message] = get_attributes(reader, start.attributes(), ["message"])?;

                    if name == "input" {
                        let message = local_name(&require("input", "message", message)?).to_owned();
                        new_state = ParseState::Input { message };
                    } else {
                        let message =
                            local_name(&require("output", "message", message)?).to_owned();
                        new_state = ParseState::Output { message };
                    }
                }

                other => debug!(element = other, "skipping element in operation block"),
            },

            Some(ParseState::Binding { .. }) => match name.as_str() {
                // A nested binding element carries the transport URI.
                "binding" => {
                    let [transport] = get_attributes(reader, start.attributes(), ["transport"])?;

                    if let Some(transport) = transport {
                        new_state = ParseState::Transport { transport };
                    }
                }

                "operation" => {
                    let [name] = get_attributes(reader, start.attributes(), ["name"])?;

                    new_state = ParseState::BindingOperation {
                        name: require("operation", "name", name)?,
                        action: None,
                    };
                }

                other => debug!(element = other, "skipping element in binding block"),
            },

            Some(ParseState::BindingOperation { .. }) => match name.as_str() {
                "operation" => {
                    let [action] = get_attributes(reader, start.attributes(), ["soapAction"])?;

                    if let Some(action) = action {
                        new_state = ParseState::OperationAction { action };
                    }
                }

                other => debug!(element = other, "skipping element in binding operation block"),
            },

            Some(ParseState::Service { .. }) => match name.as_str() {
                "port" => {
                    let [name, binding] =
                        get_attributes(reader, start.attributes(), ["name", "binding"])?;
                    let binding = require("port", "binding", binding)?;

                    new_state = ParseState::Port {
                        name: require("port", "name", name)?,
                        binding: local_name(&binding).to_owned(),
                        address: None,
                    };
                }

                other => debug!(element = other, "skipping element in service block"),
            },

            Some(ParseState::Port { .. }) => match name.as_str() {
                "address" => {
                    let [location] = get_attributes(reader, start.attributes(), ["location"])?;

                    new_state = ParseState::Address {
                        location: require("address", "location", location)?,
                    };
                }

                other => debug!(element = other, "skipping element in port block"),
            },

            Some(ref state) => debug!(element = %name, state = ?state, "skipping element"),
        }

        stack.extend(state);
        stack.push(new_state);

        Ok(())
    }

    fn handle_end(&mut self, stack: &mut Vec<ParseState>) {
        let finished_state = stack.pop();
        let mut next_state = stack.pop();

        match finished_state {
            Some(ParseState::Message { name, parts }) => {
                self.definition.messages.push(Message { name, parts })
            }

            Some(ParseState::Part { name, ty }) => {
                if let Some(ParseState::Message { ref mut parts, .. }) = next_state {
                    parts.push(Part { name, ty });
                }
            }

            Some(ParseState::PortType { name, operations }) => self
                .definition
                .port_types
                .push(PortType { name, operations }),

            Some(ParseState::Operation {
                name,
                documentation,
                input,
                output,
            }) => {
                if let Some(ParseState::PortType {
                    ref mut operations, ..
                }) = next_state
                {
                    operations.push(Operation {
                        name,
                        documentation,
                        input,
                        output,
                    });
                }
            }

            Some(ParseState::Documentation(text)) => {
                if let Some(ParseState::Operation {
                    ref mut documentation,
                    ..
                }) = next_state
                {
                    *documentation = text;
                }
            }

            Some(ParseState::Input { message }) => {
                if let Some(ParseState::Operation { ref mut input, .. }) = next_state {
                    *input = Some(message);
                }
            }

            Some(ParseState::Output { message }) => {
                if let Some(ParseState::Operation { ref mut output, .. }) = next_state {
                    *output = Some(message);
                }
            }

            Some(ParseState::Binding {
                name,
                port_type,
                transport,
                operations,
            }) => self.definition.bindings.push(Binding {
                name,
                port_type,
                transport: transport.unwrap_or_default(),
                operations,
            }),

            Some(ParseState::Transport { transport: kind }) => {
                if let Some(ParseState::Binding {
                    ref mut transport, ..
                }) = next_state
                {
                    if transport.is_none() {
                        *transport = Some(kind);
                    }
                }
            }

            Some(ParseState::BindingOperation { name, action }) => {
                if let Some(ParseState::Binding {
                    ref mut operations, ..
                }) = next_state
                {
                    operations.push(BindingOperation {
                        name,
                        soap_action: action,
                    });
                }
            }

            Some(ParseState::OperationAction { action }) => {
                if let Some(ParseState::BindingOperation {
                    action: ref mut slot,
                    ..
                }) = next_state
                {
                    *slot = Some(action);
                }
            }

            Some(ParseState::Service { name, ports }) => {
                self.definition.services.push(Service { name, ports })
            }

            Some(ParseState::Port {
                name,
                binding,
                address,
            }) => {
                if let Some(ParseState::Service { ref mut ports, .. }) = next_state {
                    ports.push(Port {
                        name,
                        binding,
                        location: address.unwrap_or_default(),
                    });
                }
            }

            Some(ParseState::Address { location }) => {
                if let Some(ParseState::Port {
                    ref mut address, ..
                }) = next_state
                {
                    *address = Some(location);
                }
            }

            _ => (),
        }

        stack.extend(next_state);
    }

    fn handle_text(
        &mut self,
        stack: &mut Vec<ParseState>,
        reader: &Reader<&[u8]>,
        text: &BytesText<'_>,
    ) -> Result<(), error::Error> {
        let unescaped = text.unescaped()?;
        let text = reader.decode(unescaped.as_ref())?;
        let mut state = stack.pop();

        if let Some(ParseState::Documentation(ref mut docs)) = state {
            *docs = Some(text.trim().to_owned());
        }

        stack.extend(state);
        Ok(())
    }
}

pub fn parse(text: &str) -> Result<Definition, error::Error> {
    let mut reader = Reader::from_str(text);
    let mut parser = Parser::default();

    let mut stack = Vec::new();
    let mut buffer = Vec::new();

    loop {
        match reader.read_event(&mut buffer)? {
            Event::Decl(..) | Event::Comment(..) => (),

            Event::Start(start) => parser.handle_start(&mut stack, &reader, &start)?,
            Event::End(..) => parser.handle_end(&mut stack),

            Event::Empty(start) => {
                parser.handle_start(&mut stack, &reader, &start)?;
                parser.handle_end(&mut stack);
            }

            Event::Text(text) => parser.handle_text(&mut stack, &reader, &text)?,

            Event::Eof => break,

            event => debug!(?event, "ignoring event"),
        }

        buffer.clear();
    }

    if parser.seen_definitions {
        Ok(parser.definition)
    } else {
        Err(error::Error::NotAServiceDescription)
    }
}
