//! # Parser
//!
//! A hand-rolled recursive-descent parser over the `Schemes:`/`Facts:`/
//! `Rules:`/`Queries:` grammar sketched in spec.md §6.1, turning a
//! [`Token`] stream from [`crate::lexer`] into a [`Program`]. Schemes and
//! facts hold only [`Parameter::Variable`]/[`Parameter::Constant`]
//! respectively; rule bodies and queries may hold either, matching
//! spec.md §3.
//!
//! Control flow follows `original_source/code/Parser.cpp`'s
//! token-match-and-recurse shape (`scheme`/`schemeList`, `fact`/`factList`,
//! ...); grammar details that source leaves ambiguous (whether a scheme
//! declaration ends with a period) follow the conventional reading of the
//! section grammar rather than inventing new punctuation.

use crate::ast::{Parameter, Predicate, Program, Rule};
use crate::error::{DatalogError, Result};
use crate::lexer::{lex, Token, TokenKind};
use crate::value::Value;

pub fn parse_program(source: &str) -> Result<Program> {
    let tokens = lex(source).map_err(|e| DatalogError::Parse {
        token_kind: "LEX".to_string(),
        lexeme: e.lexeme,
        line: e.line,
    })?;
    let mut parser = Parser { tokens, pos: 0 };
    parser.datalog_program()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn error_here(&self) -> DatalogError {
        let token = self.current();
        DatalogError::Parse {
            token_kind: token.kind.to_string(),
            lexeme: token.lexeme.clone(),
            line: token.line,
        }
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.kind() == kind {
            Ok(self.advance())
        } else {
            Err(self.error_here())
        }
    }

    fn datalog_program(&mut self) -> Result<Program> {
        let mut program = Program::new();

        self.expect(TokenKind::Schemes)?;
        self.expect(TokenKind::Colon)?;
        program.schemes.push(self.scheme()?);
        while self.kind() == TokenKind::Id {
            program.schemes.push(self.scheme()?);
        }

        self.expect(TokenKind::Facts)?;
        self.expect(TokenKind::Colon)?;
        while self.kind() == TokenKind::Id {
            program.facts.push(self.fact(&mut program.domain)?);
        }

        self.expect(TokenKind::Rules)?;
        self.expect(TokenKind::Colon)?;
        while self.kind() == TokenKind::Id {
            program.rules.push(self.rule()?);
        }

        self.expect(TokenKind::Queries)?;
        self.expect(TokenKind::Colon)?;
        program.queries.push(self.query()?);
        while self.kind() == TokenKind::Id {
            program.queries.push(self.query()?);
        }

        self.expect(TokenKind::Eof)?;
        Ok(program)
    }

    /// `name(A,B,...).` — variables only.
    fn scheme(&mut self) -> Result<Predicate> {
        let name = self.expect(TokenKind::Id)?.lexeme;
        self.expect(TokenKind::LeftParen)?;
        let mut params = vec![Parameter::Variable(self.expect(TokenKind::Id)?.lexeme)];
        while self.kind() == TokenKind::Comma {
            self.advance();
            params.push(Parameter::Variable(self.expect(TokenKind::Id)?.lexeme));
        }
        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::Period)?;
        Ok(Predicate::new(name, params))
    }

    /// `name("a","b",...).` — constants only; each constant is added to the
    /// program's Herbrand domain as it's seen.
    fn fact(&mut self, domain: &mut std::collections::HashSet<Value>) -> Result<Predicate> {
        let name = self.expect(TokenKind::Id)?.lexeme;
        self.expect(TokenKind::LeftParen)?;
        let mut params = vec![Parameter::Constant(self.string_constant(domain)?)];
        while self.kind() == TokenKind::Comma {
            self.advance();
            params.push(Parameter::Constant(self.string_constant(domain)?));
        }
        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::Period)?;
        Ok(Predicate::new(name, params))
    }

    fn string_constant(&mut self, domain: &mut std::collections::HashSet<Value>) -> Result<Value> {
        let token = self.expect(TokenKind::String)?;
        let value = Value::from(token.lexeme);
        domain.insert(value.clone());
        Ok(value)
    }

    /// `head :- body1,body2,....` — head is variables-only, body predicates
    /// may mix constants and variables.
    fn rule(&mut self) -> Result<Rule> {
        let head = self.head_predicate()?;
        self.expect(TokenKind::ColonDash)?;
        let mut body = vec![self.predicate()?];
        while self.kind() == TokenKind::Comma {
            self.advance();
            body.push(self.predicate()?);
        }
        self.expect(TokenKind::Period)?;
        Ok(Rule::new(head, body))
    }

    fn head_predicate(&mut self) -> Result<Predicate> {
        let name = self.expect(TokenKind::Id)?.lexeme;
        self.expect(TokenKind::LeftParen)?;
        let mut params = vec![Parameter::Variable(self.expect(TokenKind::Id)?.lexeme)];
        while self.kind() == TokenKind::Comma {
            self.advance();
            params.push(Parameter::Variable(self.expect(TokenKind::Id)?.lexeme));
        }
        self.expect(TokenKind::RightParen)?;
        Ok(Predicate::new(name, params))
    }

    /// `name(a,b,...)` — used by rule bodies and queries, where each
    /// parameter may be either a constant or a variable.
    fn predicate(&mut self) -> Result<Predicate> {
        let name = self.expect(TokenKind::Id)?.lexeme;
        self.expect(TokenKind::LeftParen)?;
        let mut params = vec![self.parameter()?];
        while self.kind() == TokenKind::Comma {
            self.advance();
            params.push(self.parameter()?);
        }
        self.expect(TokenKind::RightParen)?;
        Ok(Predicate::new(name, params))
    }

    fn parameter(&mut self) -> Result<Parameter> {
        match self.kind() {
            TokenKind::String => Ok(Parameter::Constant(Value::from(self.advance().lexeme))),
            TokenKind::Id => Ok(Parameter::Variable(self.advance().lexeme)),
            _ => Err(self.error_here()),
        }
    }

    /// `predicate?`
    fn query(&mut self) -> Result<Predicate> {
        let predicate = self.predicate()?;
        self.expect(TokenKind::QMark)?;
        Ok(predicate)
    }
}
