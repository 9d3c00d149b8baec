use crate::{binary::Executor, codec::ResponseCodec, config::BinaryConfig};

/// Everything needed to talk to the local node: configuration, a way to run
/// the binary and a way to read its JSON responses
#[derive(Clone, Copy)]
pub struct Node<'a> {
    pub config: &'a BinaryConfig,
    pub executor: &'a dyn Executor,
    pub codec: &'a dyn ResponseCodec,
}

impl<'a> Node<'a> {
    pub fn new(
        config: &'a BinaryConfig,
        executor: &'a dyn Executor,
        codec: &'a dyn ResponseCodec,
    ) -> Self {
        Self {
            config,
            executor,
            codec,
        }
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("appd", &self.config.appd)
            .field("home", &self.config.home)
            .finish()
    }
}
