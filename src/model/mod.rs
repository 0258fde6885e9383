//! Model module - simulation driver tying configuration, stepper and persistence together.

mod driver;

pub use driver::DiracModel;
