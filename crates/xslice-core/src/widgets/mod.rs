//! Extended widget controllers built on the element registry.
//!
//! Each controller adds `create_*` constructors and state accessors to
//! [`Gui`](crate::Gui), plus the draw and touch handlers reached through
//! the registry's dispatch.

pub mod checkbox;
pub mod items;
pub mod listbox;
