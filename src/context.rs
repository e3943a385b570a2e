//! The `Context` owns all the state of a simulation run.
//!
//! Modules register their own data by defining a [`DataPlugin`] with
//! [`define_data_plugin!`](crate::define_data_plugin) and expose functionality
//! through extension traits on `Context` (e.g. `ContextPopulationExt`).
use std::any::{Any, TypeId};

use crate::{HashMap, HashMapExt};

/// A trait for objects that can provide data containers to be held by `Context`
pub trait DataPlugin: Any {
    type DataContainer;

    fn create_data_container() -> Self::DataContainer;
}

pub struct Context {
    data_plugins: HashMap<TypeId, Box<dyn Any>>,
    current_time: f64,
}

impl Context {
    #[must_use]
    pub fn new() -> Context {
        Context {
            data_plugins: HashMap::new(),
            current_time: 0.0,
        }
    }

    fn add_plugin<T: DataPlugin>(&mut self) {
        self.data_plugins
            .insert(TypeId::of::<T>(), Box::new(T::create_data_container()));
    }

    /// Retrieves a mutable reference to the data container of `T`,
    /// creating it with its default value on first use.
    #[allow(clippy::missing_panics_doc)]
    pub fn get_data_mut<T: DataPlugin>(&mut self, _plugin: T) -> &mut T::DataContainer {
        let type_id = TypeId::of::<T>();
        if !self.data_plugins.contains_key(&type_id) {
            self.add_plugin::<T>();
        }
        self.data_plugins
            .get_mut(&type_id)
            .and_then(|container| container.downcast_mut::<T::DataContainer>())
            .expect("data container has the type registered for its plugin")
    }

    /// Retrieves the data container of `T`, or `None` if nothing has
    /// been stored for it yet.
    #[must_use]
    pub fn get_data<T: DataPlugin>(&self, _plugin: T) -> Option<&T::DataContainer> {
        self.data_plugins
            .get(&TypeId::of::<T>())
            .and_then(|container| container.downcast_ref::<T::DataContainer>())
    }

    #[must_use]
    pub fn get_current_time(&self) -> f64 {
        self.current_time
    }

    /// Moves the simulation clock. Time never runs backwards.
    ///
    /// # Panics
    ///
    /// Panics if `time` is NaN, infinite, or earlier than the current time.
    pub fn set_current_time(&mut self, time: f64) {
        assert!(
            time.is_finite() && time >= self.current_time,
            "Invalid time value {time}, current time is {}",
            self.current_time
        );
        self.current_time = time;
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::define_data_plugin;

    define_data_plugin!(ComponentA, Vec<u32>, vec![]);

    #[test]
    fn empty_context() {
        let context = Context::new();
        assert_eq!(context.get_current_time(), 0.0);
        assert!(context.get_data(ComponentA).is_none());
    }

    #[test]
    fn data_container_created_lazily() {
        let mut context = Context::new();
        context.get_data_mut(ComponentA).push(1);
        context.get_data_mut(ComponentA).push(2);
        assert_eq!(context.get_data(ComponentA), Some(&vec![1, 2]));
    }

    #[test]
    fn advance_time() {
        let mut context = Context::new();
        context.set_current_time(1.0);
        context.set_current_time(1.0);
        context.set_current_time(2.5);
        assert_eq!(context.get_current_time(), 2.5);
    }

    #[test]
    #[should_panic(expected = "Invalid time value")]
    fn time_cannot_go_backwards() {
        let mut context = Context::new();
        context.set_current_time(2.0);
        context.set_current_time(1.0);
    }

    #[test]
    #[should_panic(expected = "Invalid time value")]
    fn nan_time() {
        let mut context = Context::new();
        context.set_current_time(f64::NAN);
    }
}
