//! Data sources: the fetch capability injected into a controller.
//!
//! - [`DataSource`]: Object-safe trait a controller fetches through
//! - [`source_fn`]: Adapts an async function into a data source
//! - [`InMemorySource`]: Mock backend answering with the reference engine
//!
//! | Source              | Backed by                 | Best for                    |
//! |---------------------|---------------------------|-----------------------------|
//! | `InMemorySource`    | [`simulate`](crate::simulate) | Demos, tests, no backend yet |
//! | `source_fn(..)`     | Any async function        | REST clients, adapters      |
//! | `testing::MockSource` | Scripted responses      | Controller unit tests       |

mod in_memory;
mod traits;

pub use in_memory::InMemorySource;
pub use traits::{DataSource, FetchFuture, FnSource, source_fn};
