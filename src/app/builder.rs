/*!
 * App Builder
 */

use super::{App, ExitHandler};
use crate::context::Context;
use crate::stdio::{Input, Output};
use parking_lot::Mutex;
use std::sync::Arc;
use uuid::Uuid;

/// Builder for `App` handles with mocked values
///
/// Unset streams default to an empty input and discarding outputs; an unset
/// exit handler means `std::process::exit`.
#[derive(Default)]
pub struct AppBuilder {
    arguments: Vec<String>,
    environment: Vec<String>,
    context: Option<Context>,
    stdin: Option<Input>,
    stdout: Option<Output>,
    stderr: Option<Output>,
    exit_handler: Option<ExitHandler>,
}

impl AppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arguments<I, S>(mut self, arguments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arguments = arguments.into_iter().map(Into::into).collect();
        self
    }

    /// Raw `KEY=VALUE` entries; malformed entries are kept but never match
    pub fn environment<I, S>(mut self, environment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environment = environment.into_iter().map(Into::into).collect();
        self
    }

    /// Append a single `KEY=VALUE` entry
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.environment.push(format!("{}={}", key, value));
        self
    }

    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn stdin(mut self, stdin: Input) -> Self {
        self.stdin = Some(stdin);
        self
    }

    pub fn stdout(mut self, stdout: Output) -> Self {
        self.stdout = Some(stdout);
        self
    }

    pub fn stderr(mut self, stderr: Output) -> Self {
        self.stderr = Some(stderr);
        self
    }

    pub fn exit_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(i32) + Send + Sync + 'static,
    {
        self.exit_handler = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> App {
        App {
            id: Uuid::new_v4(),
            arguments: self.arguments.into(),
            environment: self.environment.into(),
            context: self.context.unwrap_or_default(),
            stdin: self.stdin.unwrap_or_else(Input::empty),
            stdout: self.stdout.unwrap_or_else(Output::sink),
            stderr: self.stderr.unwrap_or_else(Output::sink),
            exit_handler: self.exit_handler,
            logger: Mutex::new(None),
            errors: Mutex::new(None),
        }
    }
}
