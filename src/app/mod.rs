/*!
 * Application Handle
 * Mockable bundle of process inputs with lazily created logger and error channel
 */

mod builder;
mod error_channel;
mod handle;
mod lookup;

pub use builder::AppBuilder;
pub use error_channel::{ErrorReceiver, TryRecvError};
pub use handle::{App, ExitHandler};
