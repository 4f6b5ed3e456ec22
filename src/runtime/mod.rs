//! Host value model and execution contexts.
//!
//! # Cross-context independence
//! Each [`Context`](context::Context) owns its values outright. `Rc`-backed
//! variants may alias freely inside one context (including cycles through
//! tables and self-capturing closures), but no `Rc` is ever shared between
//! two contexts. The replication engine in [`crate::replicate`] rebuilds
//! value graphs in the destination heap instead of handing allocations
//! across; external resources cross over only through [`handle::Handle`]s
//! and their atomically counted [`handle::SharedResource`].

use crate::runtime::value::Value;

pub mod closure;
pub mod compiled_function;
pub mod context;
pub mod coroutine;
pub mod foreign_function;
pub mod handle;
pub mod jit_closure;
pub mod table;
pub mod table_key;
pub mod value;

pub type ForeignFn = fn(Vec<Value>) -> Result<Value, String>;
