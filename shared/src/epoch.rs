use std::cell::Cell;
use std::rc::Rc;

/// Generation counter for in-flight requests. Starting a request or
/// invalidating the epoch supersedes every ticket issued before.
#[derive(Debug, Clone, Default)]
pub struct RequestEpoch {
    current: Rc<Cell<u64>>,
}

#[derive(Debug, Clone)]
pub struct EpochTicket {
    epoch: RequestEpoch,
    generation: u64,
}

impl RequestEpoch {
    pub fn begin(&self) -> EpochTicket {
        let generation = self.current.get() + 1;
        self.current.set(generation);
        EpochTicket {
            epoch: self.clone(),
            generation,
        }
    }

    pub fn invalidate(&self) {
        self.current.set(self.current.get() + 1);
    }
}

impl EpochTicket {
    pub fn is_current(&self) -> bool {
        self.epoch.current.get() == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
