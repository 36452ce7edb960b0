//! Protocol-tagged references.
//!
//! A [`Reference`] is a protocol, a resource, and an ordered list of
//! parameters. The protocol fixes how many parameters there are and what each
//! position means:
//!
//! | Protocol  | Resource            | Parameters                                        |
//! |-----------|---------------------|---------------------------------------------------|
//! | `Node`    | content locator     | parent reference                                  |
//! | `Virtual` | template            | template path, actual location                    |
//! | `Vanilla` | template            | template path, actual location, vanilla template  |
//!
//! Fields are private and every constructor checks the layout, so a
//! `Reference` that exists is always well-formed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::locator::ContentLocator;
use crate::resource::Resource;

/// The template path naming the root of a virtual folder tree.
pub const ROOT_PATH: &str = "/";

/// Returns `true` if `path` is the root template path.
pub fn is_root_path(path: &str) -> bool {
    path == ROOT_PATH
}

/// How a reference is resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// Points directly at a stored item.
    Node,
    /// A template-resolved location backed by an actual repository location.
    Virtual,
    /// A virtual reference further qualified by a vanilla template.
    Vanilla,
}

impl Protocol {
    pub fn name(&self) -> &'static str {
        match self {
            Protocol::Node => "node",
            Protocol::Virtual => "virtual",
            Protocol::Vanilla => "vanilla",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A positional argument of a reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    String(String),
    Resource(Resource),
    Reference(Box<Reference>),
}

/// Index of the template path parameter of virtual and vanilla references.
const TEMPLATE_PATH_INDEX: usize = 0;
/// Index of the actual-location parameter of virtual and vanilla references.
const ACTUAL_LOCATION_INDEX: usize = 1;
/// Index of the vanilla template parameter.
const VANILLA_TEMPLATE_INDEX: usize = 2;
/// Index of the parent reference parameter of node references.
const PARENT_INDEX: usize = 0;

/// An immutable, structured pointer into the repository.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ReferenceParts", into = "ReferenceParts")]
pub struct Reference {
    protocol: Protocol,
    resource: Resource,
    parameters: Vec<Parameter>,
}

impl Reference {
    /// Build a reference, checking the parameter layout for `protocol`.
    pub fn new(
        protocol: Protocol,
        resource: Resource,
        parameters: Vec<Parameter>,
    ) -> Result<Self, TypeError> {
        check_shape(protocol, &resource, &parameters)?;
        Ok(Self {
            protocol,
            resource,
            parameters,
        })
    }

    /// A node reference to `locator`, reached through `parent`.
    pub fn node(locator: ContentLocator, parent: Reference) -> Self {
        Self {
            protocol: Protocol::Node,
            resource: Resource::locator(locator),
            parameters: vec![Parameter::Reference(Box::new(parent))],
        }
    }

    /// A virtual reference: `template` evaluated at `template_path` over `actual`.
    pub fn virtual_ref(template: Resource, template_path: impl Into<String>, actual: Resource) -> Self {
        Self {
            protocol: Protocol::Virtual,
            resource: template,
            parameters: vec![
                Parameter::String(template_path.into()),
                Parameter::Resource(actual),
            ],
        }
    }

    /// A vanilla reference: a virtual reference qualified by `vanilla_template`.
    pub fn vanilla(
        template: Resource,
        template_path: impl Into<String>,
        actual: Resource,
        vanilla_template: Resource,
    ) -> Self {
        Self {
            protocol: Protocol::Vanilla,
            resource: template,
            parameters: vec![
                Parameter::String(template_path.into()),
                Parameter::Resource(actual),
                Parameter::Resource(vanilla_template),
            ],
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Returns `true` for virtual and vanilla references.
    pub fn is_virtual(&self) -> bool {
        matches!(self.protocol, Protocol::Virtual | Protocol::Vanilla)
    }

    /// The node's own locator. `None` unless this is a node reference.
    pub fn locator(&self) -> Option<&ContentLocator> {
        match self.protocol {
            Protocol::Node => self.resource.as_locator(),
            Protocol::Virtual | Protocol::Vanilla => None,
        }
    }

    /// The parent of a node reference.
    pub fn parent(&self) -> Option<&Reference> {
        match (self.protocol, self.parameters.get(PARENT_INDEX)) {
            (Protocol::Node, Some(Parameter::Reference(parent))) => Some(parent),
            _ => None,
        }
    }

    /// The template path of a virtual or vanilla reference.
    pub fn template_path(&self) -> Option<&str> {
        if !self.is_virtual() {
            return None;
        }
        match self.parameters.get(TEMPLATE_PATH_INDEX) {
            Some(Parameter::String(path)) => Some(path),
            _ => None,
        }
    }

    /// The location that actually backs this reference.
    ///
    /// For node references this is the reference's own resource.
    pub fn actual_resource(&self) -> &Resource {
        if self.is_virtual() {
            if let Some(Parameter::Resource(actual)) = self.parameters.get(ACTUAL_LOCATION_INDEX) {
                return actual;
            }
        }
        &self.resource
    }

    /// The vanilla template of a vanilla reference.
    pub fn vanilla_template(&self) -> Option<&Resource> {
        match (self.protocol, self.parameters.get(VANILLA_TEMPLATE_INDEX)) {
            (Protocol::Vanilla, Some(Parameter::Resource(template))) => Some(template),
            _ => None,
        }
    }

    /// A copy of this virtual or vanilla reference at another template path.
    pub fn with_template_path(&self, template_path: impl Into<String>) -> Option<Reference> {
        if !self.is_virtual() {
            return None;
        }
        let mut parameters = self.parameters.clone();
        parameters[TEMPLATE_PATH_INDEX] = Parameter::String(template_path.into());
        Some(Self {
            protocol: self.protocol,
            resource: self.resource.clone(),
            parameters,
        })
    }
}

fn check_shape(
    protocol: Protocol,
    resource: &Resource,
    parameters: &[Parameter],
) -> Result<(), TypeError> {
    let invalid = |reason: &str| TypeError::InvalidShape {
        protocol: protocol.name(),
        reason: reason.to_string(),
    };
    match protocol {
        Protocol::Node => {
            if resource.as_locator().is_none() {
                return Err(invalid("resource must be a content locator"));
            }
            match parameters {
                [Parameter::Reference(_)] => Ok(()),
                _ => Err(invalid("expected exactly one parent reference parameter")),
            }
        }
        Protocol::Virtual => match parameters {
            [Parameter::String(_), Parameter::Resource(_)] => Ok(()),
            _ => Err(invalid("expected [template path, actual resource] parameters")),
        },
        Protocol::Vanilla => match parameters {
            [Parameter::String(_), Parameter::Resource(_), Parameter::Resource(_)] => Ok(()),
            _ => Err(invalid(
                "expected [template path, actual resource, vanilla template] parameters",
            )),
        },
    }
}

/// Unchecked serde form of [`Reference`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReferenceParts {
    pub protocol: Protocol,
    pub resource: Resource,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl TryFrom<ReferenceParts> for Reference {
    type Error = TypeError;

    fn try_from(parts: ReferenceParts) -> Result<Self, Self::Error> {
        Reference::new(parts.protocol, parts.resource, parts.parameters)
    }
}

impl From<Reference> for ReferenceParts {
    fn from(reference: Reference) -> Self {
        Self {
            protocol: reference.protocol,
            resource: reference.resource,
            parameters: reference.parameters,
        }
    }
}
