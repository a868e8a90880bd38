//! Fault reporting
//!
//! A fault is an `Err` returned by an entity callback during a frame pass or
//! a click dispatch. Faults never leave the pass; they go to the scene's
//! [`FaultReporter`].

use super::{EntityError, Hook};
use crate::entity::{EntityId, EntityKind};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A failed entity callback
#[derive(Debug, Clone, PartialEq)]
pub struct Fault {
    /// Callback that failed
    pub hook: Hook,
    /// Kind of the entity
    pub kind: EntityKind,
    /// Id of the entity
    pub id: EntityId,
    /// Returned error
    pub error: EntityError,
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} [{}]: {}", self.hook, self.kind, self.id, self.error)
    }
}

/// Receiver of entity faults
pub trait FaultReporter {
    /// Record one fault
    fn report(&mut self, fault: Fault);
}

/// Default reporter: writes faults to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFaultReporter;

impl FaultReporter for LogFaultReporter {
    fn report(&mut self, fault: Fault) {
        log::warn!("Problem with executing {} @ {} [{}]", fault.hook, fault.kind, fault.id);
        log::error!("{}", fault.error);
    }
}

/// Reporter that keeps every fault, shared between clones
#[derive(Debug, Default, Clone)]
pub struct FaultLog {
    faults: Rc<RefCell<Vec<Fault>>>,
}

impl FaultLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded faults, oldest first
    pub fn faults(&self) -> Vec<Fault> {
        self.faults.borrow().clone()
    }

    /// Number of recorded faults
    pub fn len(&self) -> usize {
        self.faults.borrow().len()
    }

    /// True if nothing was reported
    pub fn is_empty(&self) -> bool {
        self.faults.borrow().is_empty()
    }

    /// Forget recorded faults
    pub fn clear(&self) {
        self.faults.borrow_mut().clear();
    }
}

impl FaultReporter for FaultLog {
    fn report(&mut self, fault: Fault) {
        log::debug!("Fault recorded: {}", fault);
        self.faults.borrow_mut().push(fault);
    }
}
