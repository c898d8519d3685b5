/*!
 * Execution Context
 * Cooperative cancellation scope shared by a handle and its background tasks
 */

mod token;

pub use token::Context;
