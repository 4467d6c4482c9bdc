use nonempty::NonEmpty;

use crate::rsrock::common::error::{convert_errors, ParserError, RockError, RockResult};
use crate::rsrock::common::lexer::{Token, TokenType};
use crate::rsrock::common::strings::{count_letters, is_capitalized};
use crate::rsrock::common::token_cursor::TokenCursor;
use crate::rsrock::interpreted::ast::{BinaryOperator, Literal, OperatorKind};
use crate::rsrock::interpreted::builder::argument_list::ArgumentList;
use crate::rsrock::interpreted::builder::BuilderResult;
use crate::rsrock::interpreted::builder::expression::ExpressionBuilder;
use crate::rsrock::interpreted::builder::tree::Tree;
use crate::rsrock::interpreted::keywords::{
    ASSIGNMENT_VERBS, COMMON_PREFIXES, HIGH, HIGHER, is_keyword, is_one_of, IS, IS_NOT, literal_for,
    LOW, LOWER, MINUS, OUTPUT_VERBS, OVER, PLUS, POETIC_STRING_VERBS, PRONOUNS, TIMES,
};

/// Matches lines of tokens to statements. Every line's error is collected; parsing resumes on the
/// next line.
pub fn parse(tokens: &[Token]) -> RockResult<Tree> {
    let tokens = mark_blank_lines(tokens);
    convert_errors(Parser::new(&tokens).parse())
}

// A linebreak right after another one ends a block. Comments are dropped afterwards, so a line
// holding only a comment is not blank.
fn mark_blank_lines(tokens: &[Token]) -> Vec<Token> {
    let mut previous = None;
    let mut result = Vec::with_capacity(tokens.len());
    for token in tokens {
        let original = token.get_type();
        if original == TokenType::Comment {
            previous = Some(original);
            continue;
        }
        let mut token = token.clone();
        if original == TokenType::Linebreak && previous == Some(TokenType::Linebreak) {
            token.r#type = TokenType::BlankLine;
        }
        previous = Some(original);
        result.push(token);
    }
    result
}

type ParseResult<A> = Result<A, ParserError>;

struct Parser<'a> {
    cursor: TokenCursor<'a>,
    tree: Tree,
    errors: Vec<ParserError>,
    // What pronouns refer to.
    last_variable: Option<String>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Parser { cursor: TokenCursor::new(tokens), tree: Tree::new(), errors: Vec::new(), last_variable: None }
    }

    fn parse(mut self) -> Result<Tree, NonEmpty<ParserError>> {
        while let Ok(token) = self.cursor.peek(false) {
            match token.get_type() {
                TokenType::Linebreak => {
                    self.skip();
                }
                TokenType::BlankLine => {
                    self.skip();
                    self.tree.end_block();
                }
                TokenType::EndAllBlocks => {
                    self.skip();
                    self.tree.end_all_blocks();
                }
                _ => if let Err(e) = self.line() {
                    self.errors.push(e);
                    self.cursor.pop_line();
                }
            }
        }
        NonEmpty::from_vec(self.errors).map(Err).unwrap_or(Ok(self.tree))
    }

    fn skip(&mut self) {
        let _ = self.cursor.pop(false, false);
    }

    fn line(&mut self) -> ParseResult<()> {
        self.statement()?;
        let token = self.cursor.peek(false)?;
        match token.get_type() {
            TokenType::Linebreak => {
                self.skip();
                Ok(())
            }
            TokenType::BlankLine | TokenType::EndAllBlocks => Ok(()),
            _ => Err(ParserError::at(format!("Expected end of line, got {}", token), token)),
        }
    }

    fn statement(&mut self) -> ParseResult<()> {
        let first = self.peek_token()?;
        let keyword = if first.get_type() == TokenType::Word { first.lowercase() } else { String::new() };
        match keyword.as_str() {
            "put" => {
                self.skip();
                let expression = self.expression()?;
                self.expect(&["into"])?;
                let name = self.variable()?;
                built(self.tree.add_assignment(name, expression), first)
            }
            "build" | "knock" => {
                self.skip();
                let name = self.variable()?;
                let up = keyword == "build";
                let direction: &[&str] = if up { &["up"] } else { &["down"] };
                self.expect(direction)?;
                loop {
                    let added =
                        if up { self.tree.add_increment(name.as_str()) } else { self.tree.add_decrement(name.as_str()) };
                    built(added, first)?;
                    if !self.accept(&[direction])? {
                        return Ok(());
                    }
                }
            }
            "if" => {
                self.skip();
                let expression = self.expression()?;
                built(self.tree.add_if(expression), first)
            }
            "else" => {
                self.skip();
                let conditional = self.accept(&[&["if"]])?;
                let expression = if conditional { Some(self.expression()?) } else { None };
                if self.tree.current_block_is_if() {
                    self.tree.end_block();
                }
                match expression {
                    Some(e) => built(self.tree.add_else_if(e), first),
                    None => built(self.tree.add_else(), first),
                }
            }
            "while" | "until" => {
                self.skip();
                let expression = self.expression()?;
                built(self.tree.add_loop(expression, keyword == "until"), first)
            }
            "break" => {
                self.skip();
                self.accept(&[&["it"], &["down"]])?;
                built(self.tree.add_break(), first)
            }
            "continue" => {
                self.skip();
                built(self.tree.add_continue(), first)
            }
            "take" if self.accept(&[&["take"], &["it"], &["to"], &["the"], &["top"]])? =>
                built(self.tree.add_continue(), first),
            "give" if self.accept(&[&["give"], &["back"]])? => self.give_back(first),
            "listen" => {
                self.skip();
                if self.accept(&[&["to"]])? {
                    let name = self.variable()?;
                    built(self.tree.add_input(Some(name.as_str())), first)
                } else {
                    built(self.tree.add_input(None), first)
                }
            }
            _ if is_one_of(&keyword, OUTPUT_VERBS) => {
                self.skip();
                let expression = self.expression()?;
                built(self.tree.add_output(expression), first)
            }
            _ => self.variable_statement(first),
        }
    }

    fn give_back(&mut self, first: &Token) -> ParseResult<()> {
        let token = self.cursor.peek(false)?;
        if token.is_line_end() {
            return built(self.tree.add_return(None), first);
        }
        match literal(token) {
            Some(lit) => {
                self.skip();
                built(self.tree.add_return_with_literal(lit), first)
            }
            None => {
                let name = self.variable()?;
                built(self.tree.add_return(Some(name.as_str())), first)
            }
        }
    }

    // Statements led by a variable or function name.
    fn variable_statement(&mut self, first: &'a Token) -> ParseResult<()> {
        let name = self.name()?;
        let verb = self.peek_token()?;
        let word = verb.lowercase();
        if word == "takes" {
            self.skip();
            let params = self.argument_list(false)?;
            built(self.tree.add_function_declaration(name, params), first)
        } else if word == "taking" {
            self.skip();
            let args = self.argument_list(true)?;
            built(self.tree.add_function_call(name, args), first)
        } else if is_one_of(&word, POETIC_STRING_VERBS) {
            self.skip();
            self.last_variable = Some(name.clone());
            let text = self.rest_of_line()?;
            built(self.tree.add_assignment_with_literal(name, Literal::String(text)), first)
        } else if is_one_of(&word, ASSIGNMENT_VERBS) {
            self.skip();
            self.last_variable = Some(name.clone());
            let lit = self.assigned_literal()?;
            built(self.tree.add_assignment_with_literal(name, lit), first)
        } else {
            Err(ParserError::at(format!("Unrecognized statement starting with {}", first), first))
        }
    }

    // A single literal, or else a poetic number.
    fn assigned_literal(&mut self) -> ParseResult<Literal> {
        let tokens = self.cursor.peek_many(2, false);
        if let [token, end] = tokens.as_slice() {
            if end.is_line_end() {
                if let Some(lit) = literal(token) {
                    self.skip();
                    return Ok(lit);
                }
            }
        }
        self.poetic_number().map(Literal::Number)
    }

    // Each word's letter count, modulo 10, is a digit. The first word ending in a period ends the
    // integer part.
    fn poetic_number(&mut self) -> ParseResult<f64> {
        let start = self.peek_token()?;
        let mut integer = String::new();
        let mut fraction = String::new();
        let mut in_fraction = false;
        while let Some(token) = self.next_on_line()? {
            let letters = count_letters(&token.text);
            if letters > 0 {
                let digit = (letters % 10).to_string();
                if in_fraction { fraction.push_str(&digit) } else { integer.push_str(&digit) }
            }
            in_fraction = in_fraction || token.ends_with('.');
        }
        if integer.is_empty() {
            return Err(ParserError::at("Expected a literal or a poetic number", start));
        }
        let digits = if fraction.is_empty() { integer } else { format!("{}.{}", integer, fraction) };
        digits.parse::<f64>().map_err(|_| ParserError::at(format!("Invalid poetic number {}", digits), start))
    }

    fn rest_of_line(&mut self) -> ParseResult<String> {
        let mut words = Vec::new();
        while let Some(token) = self.next_on_line()? {
            words.push(match token.get_type() {
                TokenType::StringLiteral => format!("\"{}\"{}", token.text, token.trailing_punctuation),
                _ => format!("{}{}", token.text, token.trailing_punctuation),
            });
        }
        Ok(words.join(" "))
    }

    fn expression(&mut self) -> ParseResult<ExpressionBuilder> {
        let mut expression = ExpressionBuilder::new();
        self.operand(&mut expression)?;
        loop {
            let token = self.cursor.peek(false)?;
            let op = match self.operator()? {
                Some(op) => op,
                None => return Ok(expression),
            };
            let level = op.precedence().level();
            let added = match op.kind() {
                OperatorKind::Arithmetic => expression.add_arithmetic_operator(op, level).map(|_| ()),
                OperatorKind::Comparison => expression.add_comparison_operator(op, level).map(|_| ()),
                OperatorKind::Boolean => expression.add_boolean_operator(op, level).map(|_| ()),
            };
            built(added, token)?;
            self.operand(&mut expression)?;
        }
    }

    fn operand(&mut self, expression: &mut ExpressionBuilder) -> ParseResult<()> {
        let token = self.peek_token()?;
        if let Some(lit) = literal(token) {
            self.skip();
            return built(expression.add_literal_operand(lit).map(|_| ()), token);
        }
        let name = self.name()?;
        if self.accept(&[&["taking"]])? {
            let args = self.argument_list(true)?;
            built(expression.add_function_call_operand(name, args).map(|_| ()), token)
        } else {
            self.last_variable = Some(name.clone());
            built(expression.add_variable_operand(name).map(|_| ()), token)
        }
    }

    fn operator(&mut self) -> ParseResult<Option<BinaryOperator>> {
        let op =
            if self.accept(&[&["or"]])? {
                BinaryOperator::Or
            } else if self.accept(&[&["and"]])? {
                BinaryOperator::And
            } else if self.accept(&[PLUS])? {
                BinaryOperator::Plus
            } else if self.accept(&[MINUS])? {
                BinaryOperator::Minus
            } else if self.accept(&[TIMES])? {
                BinaryOperator::Mult
            } else if self.accept(&[OVER])? {
                BinaryOperator::Div
            } else if self.accept(&[IS_NOT])? || self.accept(&[IS, &["not"]])? {
                BinaryOperator::BangEqual
            } else if self.accept(&[IS, HIGHER, &["than"]])? {
                BinaryOperator::Greater
            } else if self.accept(&[IS, LOWER, &["than"]])? {
                BinaryOperator::Less
            } else if self.accept(&[IS, &["as"], HIGH, &["as"]])? {
                BinaryOperator::GreaterEqual
            } else if self.accept(&[IS, &["as"], LOW, &["as"]])? {
                BinaryOperator::LessEqual
            } else if self.accept(&[IS])? {
                BinaryOperator::EqualEqual
            } else {
                return Ok(None);
            };
        Ok(Some(op))
    }

    // Items are separated by "and" or by a comma after the previous item.
    fn argument_list(&mut self, for_call: bool) -> ParseResult<ArgumentList> {
        let mut list = ArgumentList::new(for_call);
        loop {
            let token = self.peek_token()?;
            match literal(token) {
                Some(lit) if for_call => {
                    self.skip();
                    built(list.add_argument_with_literal(lit).map(|_| ()), token)?;
                }
                _ => {
                    let name = self.variable()?;
                    built(list.add_argument(name).map(|_| ()), token)?;
                }
            }
            let comma = self.cursor.last_token().map(|t| t.ends_with(',')).unwrap_or(false);
            if !self.accept(&[&["and"]])? && !comma {
                return Ok(list);
            }
        }
    }

    /// A variable name that pronouns will refer to from now on.
    fn variable(&mut self) -> ParseResult<String> {
        let name = self.name()?;
        self.last_variable = Some(name.clone());
        Ok(name)
    }

    // Names a variable or a function. Pronouns resolve to the last variable.
    fn name(&mut self) -> ParseResult<String> {
        let token = self.peek_token()?;
        if token.get_type() != TokenType::Word {
            return Err(ParserError::at(format!("Expected a variable, got {}", token), token));
        }
        let word = token.lowercase();
        if is_one_of(&word, PRONOUNS) {
            self.skip();
            self.last_variable
                .clone()
                .ok_or_else(|| ParserError::at(format!("'{}' does not refer to any variable", token.text), token))
        } else if is_one_of(&word, COMMON_PREFIXES) {
            self.skip();
            let noun = self.peek_token()?;
            if noun.get_type() != TokenType::Word || is_keyword(&noun.text) {
                return Err(ParserError::at(format!("Expected a variable name after '{}'", token.text), noun));
            }
            self.skip();
            Ok(format!("{} {}", word, noun.lowercase()))
        } else if is_keyword(&word) {
            Err(ParserError::at(format!("Expected a variable, got keyword {}", token), token))
        } else if is_capitalized(&token.text) {
            self.proper_variable()
        } else {
            self.skip();
            Ok(word)
        }
    }

    // Consecutive capitalized words, up to the first one carrying punctuation.
    fn proper_variable(&mut self) -> ParseResult<String> {
        let mut words = Vec::new();
        loop {
            let token = self.cursor.pop(true, false)?;
            words.push(token.lowercase());
            if !token.trailing_punctuation.is_empty() {
                break;
            }
            let continues = self.cursor.peek(false).map(|next| {
                next.get_type() == TokenType::Word && is_capitalized(&next.text) && !is_keyword(&next.text)
            });
            if !continues.unwrap_or(false) {
                break;
            }
        }
        Ok(words.join(" "))
    }

    fn peek_token(&self) -> ParseResult<&'a Token> {
        let token = self.cursor.peek(false)?;
        if token.is_line_end() {
            let after = self.cursor.last_token().unwrap_or(token);
            return Err(ParserError::at(format!("Unexpected end of line after {}", after), after));
        }
        Ok(token)
    }

    fn next_on_line(&mut self) -> ParseResult<Option<&'a Token>> {
        let token = self.cursor.peek(false)?;
        if token.is_line_end() {
            return Ok(None);
        }
        Ok(Some(self.cursor.pop(false, false)?))
    }

    fn expect(&mut self, group: &[&str]) -> ParseResult<()> {
        if self.accept(&[group])? {
            Ok(())
        } else {
            let token = self.cursor.peek(false)?;
            Err(ParserError::at(format!("Expected '{}', got {}", group.join("' or '"), token), token))
        }
    }

    /// Consumes one word from each group in order, or nothing at all.
    fn accept(&mut self, groups: &[&[&str]]) -> ParseResult<bool> {
        let start = match self.cursor.peek(false) {
            Ok(token) => token,
            Err(_) => return Ok(false),
        };
        for group in groups {
            let matches = self.cursor
                .peek(false)
                .map(|t| t.get_type() == TokenType::Word && is_one_of(&t.text, group))
                .unwrap_or(false);
            if !matches {
                self.cursor.rewind(start)?;
                return Ok(false);
            }
            self.skip();
        }
        Ok(true)
    }
}

fn literal(token: &Token) -> Option<Literal> {
    match token.get_type() {
        TokenType::StringLiteral => Some(Literal::string(&token.text)),
        TokenType::NumericLiteral => token.text.parse::<f64>().ok().map(Literal::Number),
        TokenType::Word => literal_for(&token.text),
        _ => None,
    }
}

fn built<A>(result: BuilderResult<A>, token: &Token) -> ParseResult<A> {
    result.map_err(|e| ParserError::at(e.get_message(), token))
}
