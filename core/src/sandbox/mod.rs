//! In-memory collaborators
//!
//! A self-contained host for the boss core: entity simulation, labels,
//! ledger and chat all backed by shared in-memory state. Used by the command
//! line front end and by tests.
//!
//! Every handle is a cheap clone over `Arc<Mutex<_>>`. Box one clone into
//! `Services` and keep another to inspect or drive the simulation.

mod collaborators;
mod world;

pub use collaborators::{
    Label, MemoryKills, RecordingHandler, SandboxAnnouncer, SandboxHolograms, SandboxLedger,
};
pub use world::{SandboxWorld, SimEntity};

use crate::context::Services;
use crate::storage::KillSink;

/// Inspection handles for every sandbox collaborator
#[derive(Debug, Clone, Default)]
pub struct Sandbox {
    pub world: SandboxWorld,
    pub holograms: SandboxHolograms,
    pub ledger: SandboxLedger,
    pub announcer: SandboxAnnouncer,
    pub signals: RecordingHandler,
    pub kills: MemoryKills,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Services wired to this sandbox, with kill records kept in memory
    pub fn services(&self) -> Services {
        self.services_with_sink(Box::new(self.kills.clone()))
    }

    /// Services wired to this sandbox, with kill records sent to `kills`
    pub fn services_with_sink(&self, kills: Box<dyn KillSink>) -> Services {
        let mut services = Services::new(
            Box::new(self.world.clone()),
            Box::new(self.holograms.clone()),
            Box::new(self.ledger.clone()),
            Box::new(self.announcer.clone()),
            kills,
        );
        services.add_handler(Box::new(self.signals.clone()));
        services
    }
}
