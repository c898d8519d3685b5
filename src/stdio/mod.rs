/*!
 * Standard I/O Handles
 *
 * Mockable stand-ins for fd0/fd1/fd2. Each handle is either bound to the
 * real process stream, to an in-memory buffer, or to an arbitrary reader or
 * writer supplied by the caller.
 */

mod buffer;
mod input;
mod output;

pub use buffer::SharedBuffer;
pub use input::Input;
pub use output::Output;
