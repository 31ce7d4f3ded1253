//! Fixed table of bridged operations.
//!
//! Each entry names the native symbol, the library exporting it, the ordered
//! argument shape (the error slot is implicit and always first) and how the
//! result buffer is decoded. Adding an operation means adding one entry here
//! and one typed wrapper; the adapter itself does not change.

use crate::args::CallArgs;
use crate::error::{BridgeError, BridgeResult};

/// Native libraries the bridge loads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NativeLibrary {
    Compiler,
    MoveVm,
}

impl NativeLibrary {
    pub const ALL: [NativeLibrary; 2] = [NativeLibrary::Compiler, NativeLibrary::MoveVm];

    /// Library name without platform prefix or suffix.
    pub const fn stem(self) -> &'static str {
        match self {
            NativeLibrary::Compiler => "compiler",
            NativeLibrary::MoveVm => "movevm",
        }
    }
}

/// Type of one positional argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArgKind {
    View,
    Bool,
    U32,
    U64,
}

/// How a present result buffer is decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultShape {
    /// UTF-8 text: status strings and JSON records.
    Text,
    /// Raw bytes, e.g. compiled modules.
    Binary,
}

#[derive(Debug, PartialEq, Eq)]
pub struct OperationSpec {
    pub name: &'static str,
    pub symbol: &'static str,
    pub library: NativeLibrary,
    pub args: &'static [ArgKind],
    pub result: ResultShape,
}

impl OperationSpec {
    /// Rejects argument lists that do not match the declared shape.
    pub fn check_args(&self, args: &CallArgs) -> BridgeResult<()> {
        if args.len() != self.args.len() {
            return Err(BridgeError::shape(format!(
                "`{}` takes {} arguments, got {}",
                self.name,
                self.args.len(),
                args.len()
            )));
        }
        for (position, (expected, actual)) in self.args.iter().zip(args.kinds()).enumerate() {
            if *expected != actual {
                return Err(BridgeError::shape(format!(
                    "`{}` argument {position}: expected {expected:?}, got {actual:?}",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Release operation exported by every native library.
pub const RELEASE_SYMBOL: &str = "destroy_unmanaged_vector";

pub const CREATE_PACKAGE: &str = "create_package";
pub const CLEAN_PACKAGE: &str = "clean_package";
pub const BUILD_PACKAGE: &str = "build_package";
pub const TEST_PACKAGE: &str = "test_package";
pub const CONVERT_MODULE_IDENTIFIER: &str = "convert_module_identifier";
pub const DECODE_MODULE_BYTES: &str = "decode_module_bytes";
pub const DECODE_SCRIPT_BYTES: &str = "decode_script_bytes";
pub const READ_MODULE_METADATA: &str = "read_module_metadata";
pub const STRINGIFY_STRUCT_TAG: &str = "stringify_struct_tag";
pub const PARSE_STRUCT_TAG: &str = "parse_struct_tag";

use ArgKind::{Bool, View};

pub static CATALOG: [OperationSpec; 10] = [
    OperationSpec {
        name: CREATE_PACKAGE,
        symbol: "create_new_move_package",
        library: NativeLibrary::Compiler,
        args: &[View, View, View, Bool],
        result: ResultShape::Text,
    },
    OperationSpec {
        name: CLEAN_PACKAGE,
        symbol: "clean_move_package",
        library: NativeLibrary::Compiler,
        args: &[View, Bool, Bool, Bool],
        result: ResultShape::Text,
    },
    OperationSpec {
        name: BUILD_PACKAGE,
        symbol: "build_move_package",
        library: NativeLibrary::Compiler,
        args: &[View],
        result: ResultShape::Text,
    },
    OperationSpec {
        name: TEST_PACKAGE,
        symbol: "test_move_package",
        library: NativeLibrary::Compiler,
        args: &[View, View],
        result: ResultShape::Text,
    },
    OperationSpec {
        name: CONVERT_MODULE_IDENTIFIER,
        symbol: "convert_module_name",
        library: NativeLibrary::MoveVm,
        args: &[View, View],
        result: ResultShape::Binary,
    },
    OperationSpec {
        name: DECODE_MODULE_BYTES,
        symbol: "decode_module_bytes",
        library: NativeLibrary::MoveVm,
        args: &[View],
        result: ResultShape::Text,
    },
    OperationSpec {
        name: DECODE_SCRIPT_BYTES,
        symbol: "decode_script_bytes",
        library: NativeLibrary::MoveVm,
        args: &[View],
        result: ResultShape::Text,
    },
    OperationSpec {
        name: READ_MODULE_METADATA,
        symbol: "read_module_info",
        library: NativeLibrary::MoveVm,
        args: &[View],
        result: ResultShape::Text,
    },
    OperationSpec {
        name: STRINGIFY_STRUCT_TAG,
        symbol: "stringify_struct_tag",
        library: NativeLibrary::MoveVm,
        args: &[View],
        result: ResultShape::Text,
    },
    OperationSpec {
        name: PARSE_STRUCT_TAG,
        symbol: "parse_struct_tag",
        library: NativeLibrary::MoveVm,
        args: &[View],
        result: ResultShape::Binary,
    },
];

/// Finds a catalog entry by operation name.
pub fn lookup(name: &str) -> BridgeResult<&'static OperationSpec> {
    CATALOG
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| BridgeError::UnknownOperation(name.to_owned()))
}

/// Entries whose symbols live in `library`.
pub fn entries(library: NativeLibrary) -> impl Iterator<Item = &'static OperationSpec> {
    CATALOG.iter().filter(move |spec| spec.library == library)
}
