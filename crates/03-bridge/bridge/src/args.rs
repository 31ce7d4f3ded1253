use bridge_abi::{ByteSliceView, ViewBuffer};
use smallvec::SmallVec;

use crate::catalog::ArgKind;

/// Owned argument value, kept alive until its call completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArgValue {
    View(ViewBuffer),
    Bool(bool),
    U32(u32),
    U64(u64),
}

impl ArgValue {
    pub fn kind(&self) -> ArgKind {
        match self {
            ArgValue::View(_) => ArgKind::View,
            ArgValue::Bool(_) => ArgKind::Bool,
            ArgValue::U32(_) => ArgKind::U32,
            ArgValue::U64(_) => ArgKind::U64,
        }
    }

    fn borrow(&self) -> Arg<'_> {
        match self {
            ArgValue::View(buffer) => Arg::View(buffer.view()),
            ArgValue::Bool(value) => Arg::Bool(*value),
            ArgValue::U32(value) => Arg::U32(*value),
            ArgValue::U64(value) => Arg::U64(*value),
        }
    }
}

/// Argument in call form, borrowing view memory from an [`ArgValue`].
#[derive(Clone, Copy, Debug)]
pub enum Arg<'a> {
    View(ByteSliceView<'a>),
    Bool(bool),
    U32(u32),
    U64(u64),
}

/// Ordered arguments of one bridged call, excluding the error slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CallArgs {
    values: SmallVec<[ArgValue; 4]>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, value: ArgValue) -> Self {
        self.values.push(value);
        self
    }

    pub fn view(self, buffer: ViewBuffer) -> Self {
        self.push(ArgValue::View(buffer))
    }

    /// UTF-8 text view. Empty text becomes a nil view.
    pub fn text(self, text: &str) -> Self {
        self.view(ViewBuffer::from_text(text))
    }

    pub fn bytes(self, bytes: &[u8]) -> Self {
        self.view(ViewBuffer::from_bytes(bytes))
    }

    pub fn flag(self, value: bool) -> Self {
        self.push(ArgValue::Bool(value))
    }

    pub fn u32(self, value: u32) -> Self {
        self.push(ArgValue::U32(value))
    }

    pub fn u64(self, value: u64) -> Self {
        self.push(ArgValue::U64(value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[ArgValue] {
        &self.values
    }

    pub fn kinds(&self) -> impl Iterator<Item = ArgKind> + '_ {
        self.values.iter().map(ArgValue::kind)
    }

    /// Borrows every argument for the duration of one call.
    pub fn borrow(&self) -> SmallVec<[Arg<'_>; 4]> {
        self.values.iter().map(ArgValue::borrow).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_borrows_as_nil_view() {
        let args = CallArgs::new().text("").text("main");
        let borrowed = args.borrow();
        match (borrowed[0], borrowed[1]) {
            (Arg::View(empty), Arg::View(version)) => {
                assert!(empty.is_nil());
                assert_eq!(version.as_slice(), Some(&b"main"[..]));
            }
            other => panic!("unexpected arguments: {other:?}"),
        }
    }

    #[test]
    fn kinds_follow_push_order() {
        let args = CallArgs::new().bytes(&[1]).flag(true).u32(7).u64(9);
        let kinds: Vec<_> = args.kinds().collect();
        assert_eq!(kinds, [ArgKind::View, ArgKind::Bool, ArgKind::U32, ArgKind::U64]);
    }
}
