//! Operations on compiled module, script and type-tag bytes.

use bridge::catalog::{
    CONVERT_MODULE_IDENTIFIER, DECODE_MODULE_BYTES, DECODE_SCRIPT_BYTES, PARSE_STRUCT_TAG,
    READ_MODULE_METADATA, STRINGIFY_STRUCT_TAG,
};
use bridge::{Bridge, CallArgs};

use crate::error::BuilderResult;
use crate::records::{parse_record, DecodedModule, DecodedScript, ModuleInfo};

/// Renames a compiled module, returning the rewritten bytecode.
pub async fn convert_module_name(
    bridge: &Bridge,
    module: &[u8],
    new_name: &str,
) -> BuilderResult<Vec<u8>> {
    let args = CallArgs::new().bytes(module).text(new_name);
    Ok(bridge.call(CONVERT_MODULE_IDENTIFIER, args)?.await?.into_bytes())
}

pub async fn decode_module_bytes(bridge: &Bridge, module: &[u8]) -> BuilderResult<DecodedModule> {
    let text = call_text(bridge, DECODE_MODULE_BYTES, module).await?;
    parse_record("module", &text)
}

pub async fn decode_script_bytes(bridge: &Bridge, script: &[u8]) -> BuilderResult<DecodedScript> {
    let text = call_text(bridge, DECODE_SCRIPT_BYTES, script).await?;
    parse_record("script", &text)
}

/// Address and name of a compiled module.
pub async fn read_module_info(bridge: &Bridge, module: &[u8]) -> BuilderResult<ModuleInfo> {
    let text = call_text(bridge, READ_MODULE_METADATA, module).await?;
    parse_record("module info", &text)
}

/// Renders BCS struct-tag bytes as `0x1::module::Name<...>`.
pub async fn stringify_struct_tag(bridge: &Bridge, tag: &[u8]) -> BuilderResult<String> {
    call_text(bridge, STRINGIFY_STRUCT_TAG, tag).await
}

/// Parses a struct tag string into its BCS bytes.
pub async fn parse_struct_tag(bridge: &Bridge, tag: &str) -> BuilderResult<Vec<u8>> {
    let args = CallArgs::new().text(tag);
    Ok(bridge.call(PARSE_STRUCT_TAG, args)?.await?.into_bytes())
}

async fn call_text(bridge: &Bridge, operation: &str, bytes: &[u8]) -> BuilderResult<String> {
    let payload = bridge.call(operation, CallArgs::new().bytes(bytes))?.await?;
    Ok(payload.into_text()?)
}
