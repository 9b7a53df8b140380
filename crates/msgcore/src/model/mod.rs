use std::cell::RefCell;
use std::rc::Rc;

pub mod channel;
pub mod embed;
pub mod emoji;
pub mod guild;
pub mod message;
pub mod permission;
pub mod reaction;
pub mod snowflake;
pub mod user;

/// A host-owned record. The host may mutate it in place or replace it with a
/// fresh allocation; the allocation is what gives a record its identity.
pub type Record<T> = Rc<RefCell<T>>;

/// Moves `value` into a new record.
pub fn record<T>(value: T) -> Record<T> {
    Rc::new(RefCell::new(value))
}
