//! Interactive shell for the calculator engine.
//!
//! Line-oriented front end: digits and operator characters on a line are
//! fed to the engine as discrete keystroke events, commands start with
//! `:`. The shell owns all presentation concerns; the engine only
//! produces canonical strings and history snapshots.
//!
//! # Commands
//!
//! - `:quit`, `:q` - Exit the shell
//! - `:help`, `:h` - Show help
//! - `:hex` / `:dec` - Switch display base
//! - `:width <bits>` - Set the bit width
//! - `:mode <signed|unsigned|relative>` - Set the overflow mode
//! - `:mem` / `:recall` / `:mclear` - Memory store / recall / clear
//! - `:history` - Show completed operations
//! - `:clear`, `:c` - Clear the current entry (three rapid presses
//!   clear the memory register)
//! - `:reset` - Full reset

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use crate::core::{Base, OperatorKind, OverflowMode};
use crate::engine::{Accumulator, InputEvent};

/// Shell configuration.
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Prompt string.
    pub prompt: String,
    /// Show the alternative-base line after each evaluation.
    pub show_alt_bases: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            prompt: "calc> ".to_string(),
            show_alt_bases: true,
        }
    }
}

/// Debounce collaborator for the triple-press clear-memory gesture.
///
/// The engine is stateless with respect to keystroke timing; this
/// counter lives in the front end and emits a single decision when the
/// threshold is met within the time window.
#[derive(Debug)]
pub struct TriplePress {
    threshold: u32,
    window: Duration,
    count: u32,
    last: Option<Instant>,
}

impl TriplePress {
    /// Three presses within two seconds, matching the original gesture.
    pub fn new() -> Self {
        Self::with_limits(3, Duration::from_secs(2))
    }

    /// Custom threshold and window.
    pub fn with_limits(threshold: u32, window: Duration) -> Self {
        Self {
            threshold,
            window,
            count: 0,
            last: None,
        }
    }

    /// Register a press at `now`; returns true when the gesture fires.
    ///
    /// Firing resets the counter, so holding the key down does not fire
    /// repeatedly.
    pub fn press(&mut self, now: Instant) -> bool {
        let within = self
            .last
            .map(|t| now.duration_since(t) <= self.window)
            .unwrap_or(false);
        self.count = if within { self.count + 1 } else { 1 };
        self.last = Some(now);

        if self.count >= self.threshold {
            self.count = 0;
            self.last = None;
            true
        } else {
            false
        }
    }

    /// Forget any presses in progress.
    pub fn reset(&mut self) {
        self.count = 0;
        self.last = None;
    }
}

impl Default for TriplePress {
    fn default() -> Self {
        Self::new()
    }
}

/// Interactive shell wrapping an [`Accumulator`].
pub struct Repl {
    config: ReplConfig,
    engine: Accumulator,
    clear_gesture: TriplePress,
}

impl Repl {
    /// Create a shell with a default engine.
    pub fn new() -> Self {
        Self::with_engine(Accumulator::new())
    }

    /// Wrap an already-configured engine.
    pub fn with_engine(engine: Accumulator) -> Self {
        Self {
            config: ReplConfig::default(),
            engine,
            clear_gesture: TriplePress::new(),
        }
    }

    /// Create with custom shell config.
    pub fn with_config(engine: Accumulator, config: ReplConfig) -> Self {
        Self {
            config,
            engine,
            clear_gesture: TriplePress::new(),
        }
    }

    /// Access the wrapped engine.
    pub fn engine(&self) -> &Accumulator {
        &self.engine
    }

    /// Run the interactive loop until `:quit` or EOF.
    pub fn run(&mut self) -> io::Result<()> {
        println!("bitcalc {}", env!("CARGO_PKG_VERSION"));
        println!("Type :help for commands, :quit to exit");
        println!();

        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let mut input = String::new();

        loop {
            print!("{}", self.config.prompt);
            stdout.flush()?;

            input.clear();
            if stdin.lock().read_line(&mut input)? == 0 {
                break; // EOF
            }

            let line = input.trim();
            if line.is_empty() {
                continue;
            }

            if line.starts_with(':') {
                if self.handle_command(line) {
                    break;
                }
                continue;
            }

            self.eval_line(line);
        }
        Ok(())
    }

    /// Feed one line of keystrokes to the engine and print the display.
    fn eval_line(&mut self, line: &str) {
        for event in tokenize_keys(line) {
            if let Err(e) = self.engine.apply(event) {
                println!("error: {}", e);
                return;
            }
        }
        self.print_display();
    }

    fn print_display(&self) {
        println!("[{}] {}", self.engine.base().indicator(), self.engine.display());
        if self.config.show_alt_bases {
            match self.engine.base() {
                Base::Decimal => println!(
                    "  HEX: {}  BIN: {}",
                    self.engine.hex_string(),
                    self.engine.binary_string()
                ),
                Base::Hexadecimal => println!(
                    "  DEC: {}  BIN: {}",
                    self.engine.decimal_string(),
                    self.engine.binary_string()
                ),
            }
        }
    }

    /// Handle a `:command`. Returns true to exit the shell.
    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.split_whitespace();
        let cmd = parts.next().unwrap_or("");
        let arg = parts.next();

        match cmd {
            ":quit" | ":q" => return true,
            ":help" | ":h" => self.print_help(),
            ":hex" => {
                if self.engine.base() != Base::Hexadecimal {
                    self.try_event(InputEvent::ToggleBase);
                }
            }
            ":dec" => {
                if self.engine.base() != Base::Decimal {
                    self.try_event(InputEvent::ToggleBase);
                }
            }
            ":width" => match arg.and_then(|a| a.parse::<u32>().ok()) {
                Some(bits) => self.try_event(InputEvent::SetWidth(bits)),
                None => println!("usage: :width <bits>"),
            },
            ":mode" => match arg.map(str::to_lowercase).as_deref() {
                Some("signed") => self.try_event(InputEvent::SetOverflowMode(OverflowMode::Signed)),
                Some("unsigned") => {
                    self.try_event(InputEvent::SetOverflowMode(OverflowMode::Unsigned))
                }
                Some("relative") | Some("rel") => {
                    self.try_event(InputEvent::SetOverflowMode(OverflowMode::Relative))
                }
                _ => println!("usage: :mode <signed|unsigned|relative>"),
            },
            ":mem" => self.try_event(InputEvent::MemoryStore),
            ":recall" => {
                self.try_event(InputEvent::MemoryRecall);
                self.print_display();
            }
            ":mclear" => self.try_event(InputEvent::ClearMemory),
            ":clear" | ":c" => {
                if self.clear_gesture.press(Instant::now()) {
                    self.try_event(InputEvent::ClearMemory);
                    println!("memory cleared");
                }
                self.try_event(InputEvent::ClearEntry);
                self.print_display();
            }
            ":reset" => {
                self.try_event(InputEvent::ClearAll);
                self.print_display();
            }
            ":history" => self.print_history(),
            _ => println!("unknown command: {} (try :help)", cmd),
        }
        false
    }

    fn try_event(&mut self, event: InputEvent) {
        if let Err(e) = self.engine.apply(event) {
            println!("error: {}", e);
        }
    }

    fn print_history(&self) {
        if self.engine.history().is_empty() {
            println!("(no history)");
            return;
        }
        for record in self.engine.history().iter() {
            match self.engine.base() {
                Base::Decimal => println!("  {}", record.render_decimal()),
                Base::Hexadecimal => {
                    println!("  {}", record.render_hex(self.engine.format()))
                }
            }
        }
    }

    fn print_help(&self) {
        println!("Keys: 0-9 A-F digits, + - * / % & | ^ << >> operators, = equals");
        println!();
        println!("Commands:");
        println!("  :quit, :q        Exit");
        println!("  :hex / :dec      Switch display base");
        println!("  :width <bits>    Set bit width (multiple of 8, 8-128)");
        println!("  :mode <m>        signed | unsigned | relative");
        println!("  :mem             Store current value to memory");
        println!("  :recall          Recall memory");
        println!("  :mclear          Clear memory");
        println!("  :clear, :c       Clear entry (3x quickly clears memory)");
        println!("  :reset           Clear everything");
        println!("  :history         Show completed operations");
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a line of text into keystroke events.
///
/// Digits become `Digit` events, operator characters become `Operator`
/// events (`<` and `>` must be doubled), `=` becomes `Equals`.
/// Whitespace separates tokens and is otherwise ignored.
pub fn tokenize_keys(line: &str) -> Vec<InputEvent> {
    let mut events = Vec::new();
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            ' ' | '\t' => {}
            '=' => events.push(InputEvent::Equals),
            '<' | '>' => {
                if chars.peek() == Some(&c) {
                    chars.next();
                    let op = if c == '<' { OperatorKind::Shl } else { OperatorKind::Shr };
                    events.push(InputEvent::Operator(op));
                } else {
                    // Single angle bracket has no meaning; pass it through
                    // as a digit so the engine reports InvalidDigit.
                    events.push(InputEvent::Digit(c));
                }
            }
            _ => {
                if let Some(op) = OperatorKind::from_symbol(&c.to_string()) {
                    events.push(InputEvent::Operator(op));
                } else {
                    events.push(InputEvent::Digit(c));
                }
            }
        }
    }
    events
}
