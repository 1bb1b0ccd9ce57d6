use tracing::debug;

use crate::{
    ast::{BindingMode, Statement},
    error::{Error, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, Flow, Halt, MAX_EXECUTION_STEPS},
            function::input::INPUT_VARIABLE,
            scope::ScopeId,
        },
        lexer::tokenize,
        parser::statement::parse_program,
        value::{
            binding::VariableBinding,
            core::{Type, Value},
        },
    },
};

/// Settings for a [`Runner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Evaluation steps allowed per call to [`Runner::run`] or
    /// [`Runner::resume`].
    pub max_steps: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self { max_steps: MAX_EXECUTION_STEPS }
    }
}

/// Where a run stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    /// Every statement ran.
    Finished,
    /// The program called `input` and waits for [`Runner::resume`].
    AwaitingInput {
        /// The prompt passed to `input`.
        prompt: String,
    },
}

/// Runs a parsed program and keeps it alive across requests for input.
///
/// Top-level statements run one after another in the root scope. When a
/// statement asks for input, the runner remembers that statement and stops.
/// [`resume`](Self::resume) hands the input over and runs that statement
/// again from its start, so anything it did before calling `input` happens
/// twice.
///
/// # Example
/// ```
/// use m87::interpreter::driver::{RunState, Runner};
///
/// let source = "let name: string = input(\"name? \")\nprint(\"hi \", name)";
/// let mut runner = Runner::new(source).unwrap();
///
/// assert_eq!(runner.run().unwrap(),
///            RunState::AwaitingInput { prompt: "name? ".into() });
/// assert_eq!(runner.prompt(), Some("name? "));
///
/// assert_eq!(runner.resume("Ada".into()).unwrap(), RunState::Finished);
/// assert_eq!(runner.output(), ["hi Ada"]);
/// ```
#[derive(Debug)]
pub struct Runner {
    program:  Vec<Statement>,
    context:  Context,
    next:     usize,
    awaiting: bool,
    prompt:   Option<String>,
}

impl Runner {
    /// Tokenizes and parses `source` with the default configuration.
    ///
    /// # Errors
    /// Any lexer or parser error.
    pub fn new(source: &str) -> Result<Self, Error> {
        Self::with_config(source, RunnerConfig::default())
    }

    /// Tokenizes and parses `source`.
    ///
    /// # Errors
    /// Any lexer or parser error.
    pub fn with_config(source: &str, config: RunnerConfig) -> Result<Self, Error> {
        let tokens = tokenize(source)?;
        let program = parse_program(&tokens)?;

        Ok(Self { program,
                  context: Context::new(config.max_steps),
                  next: 0,
                  awaiting: false,
                  prompt: None })
    }

    /// Runs the program from the current statement until it finishes or
    /// asks for input.
    ///
    /// Calling `run` while input is awaited reports the same prompt again
    /// without running anything.
    ///
    /// # Errors
    /// The first runtime error. The runner is finished afterwards.
    pub fn run(&mut self) -> Result<RunState, Error> {
        if self.awaiting {
            let prompt = self.prompt.clone().unwrap_or_default();
            return Ok(RunState::AwaitingInput { prompt });
        }

        debug!(from = self.next, total = self.program.len(), "running program");
        self.drive()
    }

    /// Supplies a line of input and continues the run.
    ///
    /// The statement that asked for input runs again from its start; its
    /// `input` call now returns `value`.
    ///
    /// # Errors
    /// - `General` if the program is not waiting for input.
    /// - The first runtime error of the continued run.
    pub fn resume(&mut self, value: String) -> Result<RunState, Error> {
        if !self.awaiting {
            let line = self.current_line();
            return Err(RuntimeError::general("the program is not waiting for input", line).into());
        }

        debug!(statement = self.next, "resuming with input");
        self.context.env.declare(ScopeId::ROOT,
                                 INPUT_VARIABLE,
                                 VariableBinding::new(Value::Str(value),
                                                      BindingMode::Let,
                                                      Type::String));
        self.awaiting = false;
        self.prompt = None;

        self.drive()
    }

    /// Lines printed so far, oldest first.
    #[must_use]
    pub fn output(&self) -> &[String] {
        &self.context.output
    }

    /// Whether the program waits for [`resume`](Self::resume).
    #[must_use]
    pub const fn is_awaiting_input(&self) -> bool {
        self.awaiting
    }

    /// The pending prompt, if the program waits for input.
    #[must_use]
    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    /// Forgets any pending request for input and rewinds to the first
    /// statement. Variables and output are kept.
    pub fn stop(&mut self) {
        debug!(statement = self.next, "runner stopped");
        self.context.env.remove(ScopeId::ROOT, INPUT_VARIABLE);
        self.awaiting = false;
        self.prompt = None;
        self.next = 0;
    }

    /// Steps taken by the latest [`run`](Self::run) or
    /// [`resume`](Self::resume).
    #[must_use]
    pub const fn steps_taken(&self) -> usize {
        self.context.steps
    }

    /// The source line of the statement the runner stands on, or 0 once the
    /// program has ended.
    #[must_use]
    pub fn current_line(&self) -> usize {
        self.program.get(self.next).map_or(0, Statement::line_number)
    }

    /// Executes top-level statements from `self.next` on.
    fn drive(&mut self) -> Result<RunState, Error> {
        self.context.steps = 0;

        while let Some(statement) = self.program.get(self.next) {
            match self.context.execute(statement, ScopeId::ROOT) {
                Ok(Flow::Completed) => self.next += 1,
                Ok(Flow::Returned(_)) => {
                    let line = statement.line_number();
                    self.next = self.program.len();
                    return Err(RuntimeError::general("return outside of a function", line).into());
                },
                Err(Halt::AwaitInput { prompt }) => {
                    debug!(statement = self.next, steps = self.context.steps, "awaiting input");
                    self.awaiting = true;
                    self.prompt = Some(prompt.clone());
                    return Ok(RunState::AwaitingInput { prompt });
                },
                Err(Halt::Error(e)) => {
                    debug!(kind = e.kind(), line = e.line(), "run failed");
                    self.next = self.program.len();
                    return Err(e.into());
                },
            }
        }

        debug!(steps = self.context.steps, lines = self.context.output.len(), "run finished");
        Ok(RunState::Finished)
    }
}
