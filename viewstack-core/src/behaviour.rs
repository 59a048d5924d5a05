//! Typed initialization of freshly pushed views.
//!
//! Sugar over [`ViewStack::push_with`]: instead of a raw init hook the caller
//! names the behaviour component it expects on the new view and either works
//! on it directly or passes it a typed argument bundle.

use std::any::type_name;
use std::rc::Rc;

use crate::error::{NavigationError, Result};
use crate::stack::{InitFn, Navigation, ViewStack};
use crate::transition::Transition;
use crate::view::{Component, ViewRef};

/// A view behaviour that accepts a typed argument bundle when pushed.
pub trait ViewBehaviour<Args> {
    fn init(&mut self, args: Args);
}

impl ViewStack {
    /// Push `id` and run `init` on its `B` behaviour.
    ///
    /// Fails with [`NavigationError::MissingBehaviour`] when the root node of
    /// the new view carries no `B`. The stack is unchanged in that case.
    pub fn push_behaviour<'a, B: Component>(
        &self,
        id: &'a str,
        init: impl FnOnce(&mut B) + 'a,
        transition: Option<Rc<dyn Transition>>,
    ) -> Result<Navigation> {
        let hook: InitFn<'a> = Box::new(move |view: &ViewRef| {
            view.with_behaviour::<B, _>(init)
                .ok_or_else(|| NavigationError::MissingBehaviour {
                    view: id.to_string(),
                    behaviour: type_name::<B>(),
                })
        });
        self.push_with(id, Some(hook), transition)
    }

    /// Push `id` and hand `args` to its `B` behaviour.
    pub fn push_with_args<'a, B, A: 'a>(
        &self,
        id: &'a str,
        args: A,
        transition: Option<Rc<dyn Transition>>,
    ) -> Result<Navigation>
    where
        B: Component + ViewBehaviour<A>,
    {
        self.push_behaviour::<B>(id, move |behaviour| behaviour.init(args), transition)
    }
}
