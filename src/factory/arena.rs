//! Arena factory - an in-process host that keeps instance records in a map
//!
//! Handy wherever there is no real engine behind the pool: the CLI, the
//! benches, and tests that need to tamper with instance state behind the
//! pool's back.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::traits::InstanceFactory;

/// Handle to an instance living in an [`ArenaFactory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

/// Handle to a registered template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(u64);

/// Handle to a registered holder context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HolderId(u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance#{}", self.0)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template#{}", self.0)
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "holder#{}", self.0)
    }
}

/// State the arena keeps for each live instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstanceRecord {
    /// Template the instance was cloned from
    pub template: TemplateId,
    /// Holder the instance was created under
    pub holder: HolderId,
    /// Current active flag
    pub active: bool,
}

#[derive(Debug, Default)]
struct Arena {
    next_id: u64,
    templates: HashMap<TemplateId, String>,
    holders: HashSet<HolderId>,
    instances: HashMap<InstanceId, InstanceRecord>,
    created: u64,
    destroyed: u64,
}

impl Arena {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn remove_instance(&mut self, id: InstanceId) -> bool {
        if self.instances.remove(&id).is_some() {
            self.destroyed += 1;
            true
        } else {
            false
        }
    }
}

/// Reference [`InstanceFactory`] backed by a shared, mutex-guarded arena
///
/// Cloning the factory clones the handle, not the arena, so a host can keep
/// one clone while a pool owns another.
#[derive(Debug, Clone, Default)]
pub struct ArenaFactory {
    arena: Arc<Mutex<Arena>>,
}

impl ArenaFactory {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template under a descriptive name
    pub fn register_template(&self, name: impl Into<String>) -> TemplateId {
        let mut arena = self.arena();
        let id = TemplateId(arena.next_id());
        arena.templates.insert(id, name.into());
        id
    }

    /// Register a holder context
    pub fn register_holder(&self) -> HolderId {
        let mut arena = self.arena();
        let id = HolderId(arena.next_id());
        arena.holders.insert(id);
        id
    }

    /// Name a template was registered with
    pub fn template_name(&self, template: TemplateId) -> Option<String> {
        self.arena().templates.get(&template).cloned()
    }

    /// Destroy a template. Instances already cloned from it stay alive.
    pub fn destroy_template(&self, template: TemplateId) -> bool {
        self.arena().templates.remove(&template).is_some()
    }

    /// Destroy a holder together with every instance created under it
    pub fn destroy_holder(&self, holder: HolderId) -> bool {
        let mut arena = self.arena();
        if !arena.holders.remove(&holder) {
            return false;
        }

        let children: Vec<InstanceId> = arena
            .instances
            .iter()
            .filter(|(_, record)| record.holder == holder)
            .map(|(id, _)| *id)
            .collect();
        for id in children {
            arena.remove_instance(id);
        }
        true
    }

    /// Deactivate an instance without going through its pool
    pub fn deactivate(&self, instance: InstanceId) {
        self.set_active(&instance, false);
    }

    /// Whether the instance still exists
    pub fn exists(&self, instance: InstanceId) -> bool {
        self.arena().instances.contains_key(&instance)
    }

    /// Snapshot of an instance's record
    pub fn record(&self, instance: InstanceId) -> Option<InstanceRecord> {
        self.arena().instances.get(&instance).copied()
    }

    /// Number of instances currently alive
    pub fn live_instances(&self) -> usize {
        self.arena().instances.len()
    }

    /// Number of alive instances whose active flag is set
    pub fn active_instances(&self) -> usize {
        self.arena()
            .instances
            .values()
            .filter(|record| record.active)
            .count()
    }

    /// Alive instances cloned from `template`, in id order
    pub fn instances_of(&self, template: TemplateId) -> Vec<InstanceId> {
        let mut ids: Vec<InstanceId> = self
            .arena()
            .instances
            .iter()
            .filter(|(_, record)| record.template == template)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Total instances ever created
    pub fn created_count(&self) -> u64 {
        self.arena().created
    }

    /// Total instances ever destroyed
    pub fn destroyed_count(&self) -> u64 {
        self.arena().destroyed
    }

    fn arena(&self) -> MutexGuard<'_, Arena> {
        self.arena.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl InstanceFactory for ArenaFactory {
    type Template = TemplateId;
    type Holder = HolderId;
    type Instance = InstanceId;

    fn create(&self, template: &TemplateId, holder: &HolderId) -> InstanceId {
        let mut arena = self.arena();
        if !arena.templates.contains_key(template) {
            log::warn!("creating instance from dead {}", template);
        }
        let id = InstanceId(arena.next_id());
        arena.instances.insert(
            id,
            InstanceRecord {
                template: *template,
                holder: *holder,
                active: true,
            },
        );
        arena.created += 1;
        log::trace!("created {} from {} under {}", id, template, holder);
        id
    }

    fn destroy(&self, instance: &InstanceId) {
        if !self.arena().remove_instance(*instance) {
            log::trace!("{} already destroyed", instance);
        }
    }

    fn set_active(&self, instance: &InstanceId, active: bool) {
        match self.arena().instances.get_mut(instance) {
            Some(record) => record.active = active,
            None => log::trace!("set_active on destroyed {}", instance),
        }
    }

    fn is_active(&self, instance: &InstanceId) -> bool {
        self.arena()
            .instances
            .get(instance)
            .is_some_and(|record| record.active)
    }

    fn is_holder_alive(&self, holder: &HolderId) -> bool {
        self.arena().holders.contains(holder)
    }

    fn is_template_alive(&self, template: &TemplateId) -> bool {
        self.arena().templates.contains_key(template)
    }
}
