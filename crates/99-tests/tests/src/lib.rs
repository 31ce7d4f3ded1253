//! End-to-end scenarios for the call bridge, run against the in-process fake module.

#[cfg(test)]
mod protocol;

#[cfg(test)]
mod scenarios;

#[cfg(test)]
pub(crate) mod support {
    use std::sync::Arc;

    use bridge::fake::FakeModule;
    use bridge::{Bridge, NativeModule};

    pub fn start_bridge(fake: &Arc<FakeModule>, workers: usize) -> Bridge {
        Bridge::with_module(Arc::clone(fake) as Arc<dyn NativeModule>, workers)
            .expect("start bridge")
    }
}
