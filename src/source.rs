use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Raw shader text together with the type tag it was declared with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderScript {
    pub type_tag: String,
    pub text: String,
}

/// Named shader scripts, looked up by identifier.
pub trait ShaderSource {
    fn script(&self, id: &str) -> Option<ShaderScript>;
}

/// A child node of a script element.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(String),
    Element {
        tag: String,
        #[serde(default)]
        children: Vec<Node>,
    },
    Comment {
        comment: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptElement {
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl ScriptElement {
    /// Concatenation of the direct text children. Nested elements and
    /// comments contribute nothing, not even their own text.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// JSON5 document holding script elements keyed by id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShaderDocument {
    #[serde(default)]
    scripts: HashMap<String, ScriptElement>,
}

impl ShaderDocument {
    /// Document shipped with the binary: a white square shader pair.
    pub fn builtin() -> Result<Self, DocumentError> {
        Self::from_str(include_str!("../assets/square.json5"))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(src: &str) -> Result<Self, DocumentError> {
        json5::from_str(src).map_err(DocumentError::FormatError)
    }

    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let src = std::fs::read_to_string(path).map_err(DocumentError::InputError)?;
        Self::from_str(&src)
    }

    /// Adds a script made of a single text node.
    pub fn with_script(mut self, id: &str, type_tag: &str, text: &str) -> Self {
        self.scripts.insert(
            id.to_owned(),
            ScriptElement {
                type_tag: type_tag.to_owned(),
                children: vec![Node::Text(text.to_owned())],
            },
        );
        self
    }

    pub fn element(&self, id: &str) -> Option<&ScriptElement> {
        self.scripts.get(id)
    }
}

impl ShaderSource for ShaderDocument {
    fn script(&self, id: &str) -> Option<ShaderScript> {
        self.element(id).map(|e| ShaderScript {
            type_tag: e.type_tag.clone(),
            text: e.text(),
        })
    }
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Input error: {0}")]
    InputError(#[from] std::io::Error),
    #[error("Format error: {0}")]
    FormatError(#[from] json5::Error),
}
