//! Instance factory trait definition

use std::{fmt::Debug, sync::Arc};

/// Host collaborator that creates, destroys and toggles pooled instances
///
/// The pool never touches instances directly: every observable state change
/// goes through the factory, so the same pool logic can sit on top of any
/// engine's object model.
pub trait InstanceFactory {
    /// Prototype instances are cloned from
    type Template;
    /// Context new instances are created under
    type Holder;
    /// Handle to a created instance
    type Instance: Clone + PartialEq + Debug;

    /// Create a new instance of `template` scoped under `holder`
    fn create(&self, template: &Self::Template, holder: &Self::Holder) -> Self::Instance;

    /// Release an instance permanently
    fn destroy(&self, instance: &Self::Instance);

    /// Toggle the instance's active state
    fn set_active(&self, instance: &Self::Instance, active: bool);

    /// Observe the instance's active state
    fn is_active(&self, instance: &Self::Instance) -> bool;

    /// Check whether the holder context still exists
    fn is_holder_alive(&self, holder: &Self::Holder) -> bool;

    /// Check whether the template still exists
    fn is_template_alive(&self, template: &Self::Template) -> bool;
}

/// Common factory operations
pub trait InstanceFactoryExt: InstanceFactory {
    /// Create `count` instances, each deactivated before it is returned
    fn create_inactive_batch(
        &self,
        template: &Self::Template,
        holder: &Self::Holder,
        count: usize,
    ) -> Vec<Self::Instance> {
        (0..count)
            .map(|_| {
                let instance = self.create(template, holder);
                self.set_active(&instance, false);
                instance
            })
            .collect()
    }

    /// Both the template and the holder are still alive
    fn is_context_alive(&self, template: &Self::Template, holder: &Self::Holder) -> bool {
        self.is_holder_alive(holder) && self.is_template_alive(template)
    }
}

impl<T: InstanceFactory + ?Sized> InstanceFactoryExt for T {}

impl<F: InstanceFactory + ?Sized> InstanceFactory for &F {
    type Template = F::Template;
    type Holder = F::Holder;
    type Instance = F::Instance;

    fn create(&self, template: &Self::Template, holder: &Self::Holder) -> Self::Instance {
        (**self).create(template, holder)
    }

    fn destroy(&self, instance: &Self::Instance) {
        (**self).destroy(instance)
    }

    fn set_active(&self, instance: &Self::Instance, active: bool) {
        (**self).set_active(instance, active)
    }

    fn is_active(&self, instance: &Self::Instance) -> bool {
        (**self).is_active(instance)
    }

    fn is_holder_alive(&self, holder: &Self::Holder) -> bool {
        (**self).is_holder_alive(holder)
    }

    fn is_template_alive(&self, template: &Self::Template) -> bool {
        (**self).is_template_alive(template)
    }
}

impl<F: InstanceFactory + ?Sized> InstanceFactory for Arc<F> {
    type Template = F::Template;
    type Holder = F::Holder;
    type Instance = F::Instance;

    fn create(&self, template: &Self::Template, holder: &Self::Holder) -> Self::Instance {
        (**self).create(template, holder)
    }

    fn destroy(&self, instance: &Self::Instance) {
        (**self).destroy(instance)
    }

    fn set_active(&self, instance: &Self::Instance, active: bool) {
        (**self).set_active(instance, active)
    }

    fn is_active(&self, instance: &Self::Instance) -> bool {
        (**self).is_active(instance)
    }

    fn is_holder_alive(&self, holder: &Self::Holder) -> bool {
        (**self).is_holder_alive(holder)
    }

    fn is_template_alive(&self, template: &Self::Template) -> bool {
        (**self).is_template_alive(template)
    }
}
