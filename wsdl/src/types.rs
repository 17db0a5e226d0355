//! Object model for a parsed service description.
//!
//! Names are stored without their namespace prefix; the definitions this
//! tool consumes are linked up by local name only.

#[derive(Debug, Clone)]
pub struct Part {
    pub name: String,
    pub ty: String,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub name: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone)]
pub struct Operation {
    pub name: String,
    pub documentation: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PortType {
    pub name: String,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone)]
pub struct BindingOperation {
    pub name: String,
    pub soap_action: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Binding {
    pub name: String,
    pub port_type: String,
    pub transport: String,
    pub operations: Vec<BindingOperation>,
}

#[derive(Debug, Clone)]
pub struct Port {
    pub name: String,
    pub binding: String,
    pub location: String,
}

#[derive(Debug, Clone)]
pub struct Service {
    pub name: String,
    pub ports: Vec<Port>,
}

#[derive(Default, Debug, Clone)]
pub struct Definition {
    pub messages: Vec<Message>,
    pub port_types: Vec<PortType>,
    pub bindings: Vec<Binding>,
    pub services: Vec<Service>,
}

impl Definition {
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|message| message.name == name)
    }

    pub fn port_type(&self, name: &str) -> Option<&PortType> {
        self.port_types
            .iter()
            .find(|port_type| port_type.name == name)
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().find(|binding| binding.name == name)
    }
}
