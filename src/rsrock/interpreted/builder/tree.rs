use option_ext::OptionExt;

use crate::rsrock::interpreted::ast::{
    Argument, AssignedValue, BlockKind, Conditional, FunctionDef, Literal, Statement,
};
use crate::rsrock::interpreted::ast::Expression;
use crate::rsrock::interpreted::builder::{BuilderError, BuilderResult, checked_name};
use crate::rsrock::interpreted::builder::argument_list::ArgumentList;
use crate::rsrock::interpreted::builder::expression::ExpressionBuilder;

/// A statement tree under construction. Statements are appended to the current block; statements
/// that open a block become the current block until [`Tree::end_block`].
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Tree {
    root: Vec<Statement>,
    // Child indices from the root down to the current block.
    open_blocks: Vec<usize>,
}

impl Tree {
    pub fn new() -> Self { Tree { root: Vec::new(), open_blocks: Vec::new() } }

    pub fn root(&self) -> &[Statement] { &self.root }

    pub fn add_assignment<S: Into<String>>(&mut self, name: S, expression: ExpressionBuilder) -> BuilderResult<()> {
        let target = checked_name(name)?;
        let value = AssignedValue::Expression(expression.to_tree()?);
        self.add(Statement::Assign { target, value });
        Ok(())
    }

    pub fn add_assignment_with_literal<S: Into<String>>(&mut self, name: S, lit: Literal) -> BuilderResult<()> {
        let target = checked_name(name)?;
        self.add(Statement::Assign { target, value: AssignedValue::Literal(lit) });
        Ok(())
    }

    pub fn add_increment<S: Into<String>>(&mut self, name: S) -> BuilderResult<()> {
        let name = checked_name(name)?;
        self.add(Statement::Increment(name));
        Ok(())
    }

    pub fn add_decrement<S: Into<String>>(&mut self, name: S) -> BuilderResult<()> {
        let name = checked_name(name)?;
        self.add(Statement::Decrement(name));
        Ok(())
    }

    pub fn add_if(&mut self, expression: ExpressionBuilder) -> BuilderResult<()> {
        let cond = expression.to_tree()?;
        self.add(Statement::If(Conditional { cond, body: Vec::new() }));
        Ok(())
    }

    /// The matcher ends the `if` block first; this only checks that one was just closed.
    pub fn add_else_if(&mut self, expression: ExpressionBuilder) -> BuilderResult<()> {
        self.check_follows_if()?;
        let cond = expression.to_tree()?;
        self.add(Statement::ElseIf(Conditional { cond, body: Vec::new() }));
        Ok(())
    }

    pub fn add_else(&mut self) -> BuilderResult<()> {
        self.check_follows_if()?;
        self.add(Statement::Else(Vec::new()));
        Ok(())
    }

    /// `invert` turns the loop into an `until` loop.
    pub fn add_loop(&mut self, expression: ExpressionBuilder, invert: bool) -> BuilderResult<()> {
        let cond = expression.to_tree()?;
        self.add(Statement::While { cond, invert, body: Vec::new() });
        Ok(())
    }

    pub fn add_break(&mut self) -> BuilderResult<()> {
        if !self.in_loop_block() {
            return Err(BuilderError::OutsideLoop("break"));
        }
        self.add(Statement::Break);
        Ok(())
    }

    pub fn add_continue(&mut self) -> BuilderResult<()> {
        if !self.in_loop_block() {
            return Err(BuilderError::OutsideLoop("continue"));
        }
        self.add(Statement::Continue);
        Ok(())
    }

    pub fn add_function_declaration<S: Into<String>>(&mut self, name: S, params: ArgumentList) -> BuilderResult<()> {
        if self.in_any_block() {
            return Err(BuilderError::NotAtRoot);
        }
        let name = checked_name(name)?;
        let params = params.into_parameters()?;
        self.add(Statement::Function(FunctionDef { name, params, body: Vec::new() }));
        Ok(())
    }

    pub fn add_function_call<S: Into<String>>(&mut self, name: S, args: ArgumentList) -> BuilderResult<()> {
        let name = checked_name(name)?;
        let args = args.into_arguments()?;
        self.add(Statement::Call { name, args });
        Ok(())
    }

    pub fn add_return(&mut self, name: Option<&str>) -> BuilderResult<()> {
        let value = name.map(|n| checked_name(n).map(Argument::Variable)).transpose()?;
        self.add_checked_return(value)
    }

    pub fn add_return_with_literal(&mut self, lit: Literal) -> BuilderResult<()> {
        self.add_checked_return(Some(Argument::Literal(lit)))
    }

    pub fn add_input(&mut self, name: Option<&str>) -> BuilderResult<()> {
        let target = name.map(checked_name).transpose()?;
        self.add(Statement::Input(target));
        Ok(())
    }

    pub fn add_output(&mut self, expression: ExpressionBuilder) -> BuilderResult<()> {
        let expression = expression.to_tree()?;
        self.add(Statement::Output(expression));
        Ok(())
    }

    pub fn add_output_with_literal(&mut self, lit: Literal) -> BuilderResult<()> {
        self.add(Statement::Output(Expression::literal(lit)));
        Ok(())
    }

    /// Does nothing at the root.
    pub fn end_block(&mut self) {
        self.open_blocks.pop();
    }

    pub fn end_all_blocks(&mut self) {
        self.open_blocks.clear();
    }

    pub fn current_block_is_if(&self) -> bool {
        let kind = self.current_block_kind();
        kind.contains(&BlockKind::If) || kind.contains(&BlockKind::ElseIf)
    }

    pub fn in_any_block(&self) -> bool { !self.open_blocks.is_empty() }

    pub fn in_loop_block(&self) -> bool { self.in_block(BlockKind::While) }

    pub fn in_function_block(&self) -> bool { self.in_block(BlockKind::Function) }

    pub fn pretty_print(&self) -> String {
        self.root.iter().map(|s| s.pretty_print()).collect::<Vec<_>>().join("\n")
    }

    fn add_checked_return(&mut self, value: Option<Argument>) -> BuilderResult<()> {
        if !self.in_function_block() {
            return Err(BuilderError::OutsideFunction);
        }
        self.add(Statement::Return(value));
        Ok(())
    }

    fn check_follows_if(&self) -> BuilderResult<()> {
        let previous = self.current_block().last().and_then(|s| s.block_kind());
        if previous.contains(&BlockKind::If) || previous.contains(&BlockKind::ElseIf) {
            Ok(())
        } else {
            Err(BuilderError::DanglingElse)
        }
    }

    fn add(&mut self, statement: Statement) {
        let opens_block = statement.block_kind().is_some();
        let block = self.current_block_mut();
        block.push(statement);
        let index = block.len() - 1;
        if opens_block {
            self.open_blocks.push(index);
        }
    }

    fn open_kinds(&self) -> Vec<BlockKind> {
        let mut kinds = Vec::new();
        let mut block = &self.root;
        for &i in &self.open_blocks {
            let statement = &block[i];
            kinds.extend(statement.block_kind());
            block = statement.body().expect("Open block is not a block statement");
        }
        kinds
    }

    fn current_block_kind(&self) -> Option<BlockKind> {
        self.open_kinds().last().copied()
    }

    fn in_block(&self, kind: BlockKind) -> bool {
        self.open_kinds().contains(&kind)
    }

    fn current_block(&self) -> &Vec<Statement> {
        let mut block = &self.root;
        for &i in &self.open_blocks {
            block = block[i].body().expect("Open block is not a block statement");
        }
        block
    }

    fn current_block_mut(&mut self) -> &mut Vec<Statement> {
        let mut block = &mut self.root;
        for &i in &self.open_blocks {
            block = block[i].body_mut().expect("Open block is not a block statement");
        }
        block
    }
}
