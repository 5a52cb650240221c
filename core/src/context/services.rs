//! Collaborators handed to spawners and bosses on every call.

use lair_types::MessagesConfig;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::signals::{BossSignal, SignalHandler};
use crate::storage::KillSink;
use crate::world::{Announcer, HologramDisplay, Ledger, World};

/// Everything the core needs from its host, owned in one place so the
/// heartbeat holds a single mutable borrow.
pub struct Services {
    pub world: Box<dyn World>,
    pub holograms: Box<dyn HologramDisplay>,
    pub ledger: Box<dyn Ledger>,
    pub announcer: Box<dyn Announcer>,
    pub kills: Box<dyn KillSink>,
    pub handlers: Vec<Box<dyn SignalHandler>>,
    pub messages: MessagesConfig,
    /// Source for reward inclusion rolls
    pub rng: StdRng,
}

impl Services {
    pub fn new(
        world: Box<dyn World>,
        holograms: Box<dyn HologramDisplay>,
        ledger: Box<dyn Ledger>,
        announcer: Box<dyn Announcer>,
        kills: Box<dyn KillSink>,
    ) -> Self {
        Self {
            world,
            holograms,
            ledger,
            announcer,
            kills,
            handlers: Vec::new(),
            messages: MessagesConfig::default(),
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_messages(mut self, messages: MessagesConfig) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn add_handler(&mut self, handler: Box<dyn SignalHandler>) {
        self.handlers.push(handler);
    }

    /// Deliver a signal to every registered handler
    pub fn emit(&mut self, signal: BossSignal) {
        for handler in &mut self.handlers {
            handler.handle_signal(&signal);
        }
    }
}
