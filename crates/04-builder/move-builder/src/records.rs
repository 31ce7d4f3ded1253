//! JSON records returned by the VM's decode operations.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use payload_codec::{Address, CodecResult};

use crate::error::{BuilderError, BuilderResult};

/// Identity of a compiled module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    /// Short hex form, e.g. `0x4`.
    pub address: String,
    pub name: String,
}

impl ModuleInfo {
    pub fn parsed_address(&self) -> CodecResult<Address> {
        Address::parse(&self.address)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedFunction {
    pub name: String,
    /// `public`, `friend` or `private`.
    pub visibility: String,
    pub is_entry: bool,
    pub is_view: bool,
    pub generic_type_params: Vec<Value>,
    pub params: Vec<String>,
    #[serde(rename = "return")]
    pub returns: Vec<String>,
}

/// A script decodes to its single entry function.
pub type DecodedScript = DecodedFunction;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedStruct {
    pub name: String,
    #[serde(default)]
    pub is_native: bool,
    #[serde(default)]
    pub abilities: Vec<String>,
    #[serde(default)]
    pub generic_type_params: Vec<Value>,
    #[serde(default)]
    pub fields: Vec<DecodedField>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecodedModule {
    pub address: String,
    pub name: String,
    pub friends: Vec<String>,
    /// Public and friend functions in declaration order.
    pub exposed_functions: Vec<DecodedFunction>,
    pub structs: Vec<DecodedStruct>,
}

impl DecodedModule {
    pub fn function(&self, name: &str) -> Option<&DecodedFunction> {
        self.exposed_functions.iter().find(|function| function.name == name)
    }
}

pub(crate) fn parse_record<T: DeserializeOwned>(what: &'static str, text: &str) -> BuilderResult<T> {
    serde_json::from_str(text).map_err(|source| BuilderError::Record { what, source })
}
