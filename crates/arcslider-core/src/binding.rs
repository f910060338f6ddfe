use derive_more::From;
use std::cell::Cell;
use std::rc::Rc;

/// Two-way access to a value the host owns. The slider reads the current value before each
/// drag update and writes the result back; it never keeps a copy of its own.
pub trait ValueBinding {
    fn get(&self) -> f64;
    fn set(&mut self, value: f64);
}

impl ValueBinding for f64 {
    fn get(&self) -> f64 {
        *self
    }

    fn set(&mut self, value: f64) {
        *self = value;
    }
}

impl<T: ValueBinding + ?Sized> ValueBinding for &mut T {
    fn get(&self) -> f64 {
        (**self).get()
    }

    fn set(&mut self, value: f64) {
        (**self).set(value);
    }
}

/// A getter/setter pair supplied by the host.
pub struct Binding<G, S> {
    getter: G,
    setter: S,
}

impl<G, S> Binding<G, S>
where
    G: Fn() -> f64,
    S: FnMut(f64),
{
    pub fn new(getter: G, setter: S) -> Self {
        Self { getter, setter }
    }
}

impl<G, S> ValueBinding for Binding<G, S>
where
    G: Fn() -> f64,
    S: FnMut(f64),
{
    fn get(&self) -> f64 {
        (self.getter)()
    }

    fn set(&mut self, value: f64) {
        (self.setter)(value);
    }
}

/// Cheaply clonable handle to a value shared between a widget and its host on one thread.
#[derive(Debug, Clone, Default, From)]
pub struct SharedValue(Rc<Cell<f64>>);

impl SharedValue {
    pub fn new(value: f64) -> Self {
        Self(Rc::new(Cell::new(value)))
    }
}

impl ValueBinding for SharedValue {
    fn get(&self) -> f64 {
        self.0.get()
    }

    fn set(&mut self, value: f64) {
        self.0.set(value);
    }
}
