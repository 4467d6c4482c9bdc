use std::collections::HashMap;
use std::io;
use std::io::{BufRead, Write};

use crate::rsrock::common::error::{convert_error, RockResult};
use crate::rsrock::common::strings::parse_numeric;
use crate::rsrock::interpreted::ast::{
    Argument, AssignedValue, Conditional, Expression, FunctionDef, Operand, OperatorKind, Statement,
};
use crate::rsrock::interpreted::ast::BinaryOperator;
use crate::rsrock::interpreted::builder::tree::Tree;
use crate::rsrock::interpreted::interpreter::environment::Environment;
use crate::rsrock::interpreted::interpreter::result::{InterpretResult, RuntimeError, Signal, unary_type_error};
use crate::rsrock::interpreted::interpreter::rock_value::RockValue;
use crate::rsrock::interpreted::interpreter::rock_value::RockValue::{Boolean, Mysterious, Null, Number};

pub mod coercion;
pub mod environment;
pub mod result;
pub mod rock_value;

/// Everything one run of a program may change. Created fresh by each [`Interpreter::execute`].
struct ExecutionContext<'t> {
    functions: HashMap<&'t str, &'t FunctionDef>,
    environment: Environment,
}

impl<'t> ExecutionContext<'t> {
    // Functions may be called before the line declaring them.
    fn new(root: &'t [Statement]) -> Self {
        let functions = root
            .iter()
            .filter_map(|s| match s {
                Statement::Function(f) => Some((f.name.as_str(), f)),
                _ => None,
            })
            .collect();
        ExecutionContext { functions, environment: Environment::new() }
    }
}

pub struct Interpreter<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn new(input: R, output: W) -> Self { Interpreter { input, output } }

    pub fn into_output(self) -> W { self.output }

    /// Runs a whole program. Nothing carries over from previous runs except consumed input and
    /// written output.
    pub fn execute(&mut self, tree: &Tree) -> RockResult<()> {
        let mut context = ExecutionContext::new(tree.root());
        let result = self.run_block(&mut context, tree.root()).map(|_| ());
        let flushed = result.and_then(|_| self.output.flush().map_err(|e| RuntimeError::Output(e.to_string())));
        convert_error(flushed)
    }

    // Stops at the first statement that signals anything and hands the signal to the caller.
    fn run_block<'t>(&mut self, ctx: &mut ExecutionContext<'t>, block: &'t [Statement]) -> InterpretResult<Signal> {
        let mut chain_satisfied = false;
        for statement in block {
            let signal = match statement {
                Statement::If(c) => {
                    chain_satisfied = false;
                    self.run_branch(ctx, c, &mut chain_satisfied)?
                }
                Statement::ElseIf(c) => self.run_branch(ctx, c, &mut chain_satisfied)?,
                Statement::Else(body) =>
                    if chain_satisfied {
                        Signal::Completed
                    } else {
                        chain_satisfied = true;
                        self.run_block(ctx, body)?
                    },
                _ => self.run_statement(ctx, statement)?,
            };
            if signal != Signal::Completed {
                return Ok(signal);
            }
        }
        Ok(Signal::Completed)
    }

    fn run_branch<'t>(
        &mut self, ctx: &mut ExecutionContext<'t>, conditional: &'t Conditional, chain_satisfied: &mut bool,
    ) -> InterpretResult<Signal> {
        if *chain_satisfied || !self.evaluate(ctx, &conditional.cond)?.truthiness() {
            return Ok(Signal::Completed);
        }
        *chain_satisfied = true;
        self.run_block(ctx, &conditional.body)
    }

    fn run_statement<'t>(&mut self, ctx: &mut ExecutionContext<'t>, statement: &'t Statement) -> InterpretResult<Signal> {
        match statement {
            Statement::Assign { target, value } => {
                let value = match value {
                    AssignedValue::Expression(e) => self.evaluate(ctx, e)?,
                    AssignedValue::Literal(lit) => lit.into(),
                };
                ctx.environment.assign(target, value);
            }
            Statement::Increment(name) => step(ctx, name, 1.0)?,
            Statement::Decrement(name) => step(ctx, name, -1.0)?,
            Statement::While { cond, invert, body } => return self.run_loop(ctx, cond, *invert, body),
            // The tree only allows these inside a loop.
            Statement::Break => return Ok(Signal::Break),
            Statement::Continue => return Ok(Signal::Continue),
            // Hoisted before the run started.
            Statement::Function(_) => (),
            Statement::Call { name, args } => {
                self.call_function(ctx, name, args)?;
            }
            Statement::Return(value) => {
                let value = value.as_ref().map(|a| argument_value(ctx, a)).unwrap_or(Mysterious);
                return Ok(Signal::Return(value));
            }
            Statement::Input(target) => {
                let value = self.read_input()?;
                if let Some(name) = target {
                    ctx.environment.assign(name, value);
                }
            }
            Statement::Output(e) => {
                let value = self.evaluate(ctx, e)?;
                writeln!(self.output, "{}", value.stringify()).map_err(|e| RuntimeError::Output(e.to_string()))?;
            }
            Statement::If(_) | Statement::ElseIf(_) | Statement::Else(_) =>
                panic!("Conditional chains are run by their enclosing block"),
        }
        Ok(Signal::Completed)
    }

    fn run_loop<'t>(
        &mut self, ctx: &mut ExecutionContext<'t>, cond: &'t Expression, invert: bool, body: &'t [Statement],
    ) -> InterpretResult<Signal> {
        while self.evaluate(ctx, cond)?.truthiness() != invert {
            match self.run_block(ctx, body)? {
                Signal::Completed | Signal::Continue => (),
                Signal::Break => break,
                returned @ Signal::Return(_) => return Ok(returned),
            }
        }
        Ok(Signal::Completed)
    }

    fn call_function<'t>(
        &mut self, ctx: &mut ExecutionContext<'t>, name: &str, args: &'t [Argument],
    ) -> InterpretResult<RockValue> {
        let function = *ctx.functions.get(name).ok_or_else(|| RuntimeError::UndefinedFunction(name.to_owned()))?;
        let values = args.iter().map(|a| argument_value(ctx, a)).collect::<Vec<_>>();
        ctx.environment.push_scope();
        for (i, param) in function.params.iter().enumerate() {
            ctx.environment.define_local(param, values.get(i).cloned().unwrap_or(Mysterious));
        }
        let result = self.run_block(ctx, &function.body);
        ctx.environment.pop_scope();
        match result? {
            Signal::Return(value) => Ok(value),
            _ => Ok(Mysterious),
        }
    }

    fn evaluate<'t>(&mut self, ctx: &mut ExecutionContext<'t>, expression: &'t Expression) -> InterpretResult<RockValue> {
        match expression {
            Expression::Operand(Operand::Variable(name)) => Ok(variable_value(ctx, name)),
            Expression::Operand(Operand::Literal(lit)) => Ok(lit.into()),
            Expression::Operand(Operand::Call { name, args }) => self.call_function(ctx, name, args),
            Expression::Binary(op, e1, e2) => match op.kind() {
                OperatorKind::Boolean => {
                    let left = self.evaluate(ctx, e1)?;
                    let decided = match op {
                        BinaryOperator::And => !left.truthiness(),
                        _ => left.truthiness(),
                    };
                    if decided { Ok(left) } else { self.evaluate(ctx, e2) }
                }
                OperatorKind::Arithmetic => {
                    let left = self.evaluate(ctx, e1)?;
                    let right = self.evaluate(ctx, e2)?;
                    coercion::arithmetic(op, &left, &right)
                }
                OperatorKind::Comparison => {
                    let left = self.evaluate(ctx, e1)?;
                    let right = self.evaluate(ctx, e2)?;
                    Ok(Boolean(coercion::comparison(op, &left, &right)))
                }
            },
        }
    }

    // End of input reads as an empty line.
    fn read_input(&mut self) -> InterpretResult<RockValue> {
        let mut line = String::new();
        self.input.read_line(&mut line).map_err(|e| RuntimeError::Input(e.to_string()))?;
        let line = line.strip_suffix('\n').map(|l| l.strip_suffix('\r').unwrap_or(l)).unwrap_or(&line);
        Ok(parse_numeric(line).map(Number).unwrap_or_else(|| RockValue::string(line)))
    }
}

/// Runs a program against the process's standard streams.
pub fn interpret(tree: &Tree) -> RockResult<()> {
    let stdin = io::stdin();
    Interpreter::new(stdin.lock(), io::stdout()).execute(tree)
}

fn step(ctx: &mut ExecutionContext, name: &str, by: f64) -> InterpretResult<()> {
    let current = ctx.environment.get(name).ok_or_else(|| RuntimeError::Uninitialized(name.to_owned()))?;
    let next = match current {
        Boolean(b) => Boolean(!b),
        Null | Mysterious => Number(by),
        Number(n) => Number(n + by),
        RockValue::String(_) =>
            return unary_type_error(if by > 0.0 { "increment" } else { "decrement" }, current),
    };
    ctx.environment.assign(name, next);
    Ok(())
}

fn variable_value(ctx: &ExecutionContext, name: &str) -> RockValue {
    ctx.environment.get(name).cloned().unwrap_or(Mysterious)
}

fn argument_value(ctx: &ExecutionContext, argument: &Argument) -> RockValue {
    match argument {
        Argument::Variable(name) => variable_value(ctx, name),
        Argument::Literal(lit) => lit.into(),
    }
}
