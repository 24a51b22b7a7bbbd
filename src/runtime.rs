//! Runtime context for generated programs.
//!
//! Bundles the pieces a compiled program needs at run time: the global
//! scope at the root of every environment chain, the setter capability
//! registry, and the output/input channels. Generated code holds one
//! `Runtime` for the life of the process and calls its surface for every
//! operation it cannot express natively.

use crate::cell::CellValue;
use crate::dispatch;
use crate::env::ScopeRef;
use crate::errors::{EvalError, EvalResult};
use crate::input::InputSource;
use crate::object::ObjectValue;
use crate::output::{stdout_handler, SharedOutputHandler};
use crate::setters::SetterRegistry;
use crate::shared::Shared;
use crate::value::Value;

/// Builder for creating `Runtime` instances with various configurations.
///
/// Defaults: stdout output, real stdin input, empty setter registry.
#[derive(Default)]
pub struct RuntimeBuilder {
    output: Option<SharedOutputHandler>,
    input: Option<InputSource>,
    setters: Option<SetterRegistry>,
}

impl RuntimeBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output handler.
    #[must_use]
    pub fn output(mut self, handler: SharedOutputHandler) -> Self {
        self.output = Some(handler);
        self
    }

    /// Set the input source.
    #[must_use]
    pub fn input(mut self, input: InputSource) -> Self {
        self.input = Some(input);
        self
    }

    /// Set a pre-populated setter capability registry.
    #[must_use]
    pub fn setters(mut self, setters: SetterRegistry) -> Self {
        self.setters = Some(setters);
        self
    }

    /// Build the runtime.
    pub fn build(self) -> Runtime {
        Runtime {
            globals: ScopeRef::root(),
            setters: Shared::new(self.setters.unwrap_or_default()),
            output: self.output.unwrap_or_else(stdout_handler),
            input: self.input.unwrap_or_default(),
        }
    }
}

/// The runtime surface consumed by generated programs.
pub struct Runtime {
    /// Root of every environment chain: the outermost (global) scope.
    globals: ScopeRef,
    /// Declared setter capabilities, per shape.
    setters: Shared<SetterRegistry>,
    /// Destination of `log` output.
    output: SharedOutputHandler,
    /// Program input context.
    input: InputSource,
}

impl Runtime {
    /// Create a runtime with default configuration.
    pub fn new() -> Self {
        RuntimeBuilder::new().build()
    }

    /// Start building a configured runtime.
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// The global scope node.
    pub fn globals(&self) -> ScopeRef {
        self.globals.clone()
    }

    /// Create a child environment node.
    ///
    /// Generated code calls this on entry to every block; with no parent
    /// the child delegates to the global scope.
    pub fn create_child(&self, parent: Option<&ScopeRef>) -> ScopeRef {
        parent.unwrap_or(&self.globals).child()
    }

    /// Create an empty mutable cell.
    pub fn make_cell(&self) -> Value {
        Value::Cell(CellValue::new())
    }

    /// Declare a setter capability for a shape's member.
    pub fn register_setter(
        &self,
        shape: impl Into<String>,
        member: impl Into<String>,
        setter: impl Fn(&ObjectValue, Value) -> Result<(), EvalError> + 'static,
    ) {
        self.setters.borrow_mut().register(shape, member, setter);
    }

    /// Unified read-or-call-or-assign over a target's named member.
    pub fn dispatch(&self, target: &Value, member: &str, args: &[Value]) -> EvalResult {
        dispatch::dispatch(&self.setters.borrow(), target, member, args)
    }

    /// Forward values to the output channel, space-joined, each rendered
    /// via its default textual representation.
    pub fn log(&self, values: &[Value]) {
        self.output.log_values(values);
    }

    /// Write `message` without a newline, then block for one line of
    /// input, trimmed of trailing whitespace; empty string on
    /// end-of-input.
    pub fn prompt(&self, message: &str) -> String {
        self.output.print(message);
        self.input.read_line()
    }

    /// The entire input stream, read once and memoized for the process
    /// lifetime.
    pub fn stdin_all(&self) -> String {
        self.input.read_all()
    }

    /// Whether the input channel is an interactive terminal.
    pub fn is_tty(&self) -> bool {
        self.input.is_tty()
    }

    /// The configured output handler (for inspecting captured output).
    pub fn output(&self) -> &SharedOutputHandler {
        &self.output
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}
