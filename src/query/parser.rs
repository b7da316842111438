#![forbid(unsafe_code)]

//! Recursive-descent parser for the statement grammar.
//!
//! ```text
//! KeyValueList  ::= ident ":" string ("," KeyValueList)?
//! Data          ::= "{" KeyValueList "}"
//! Type          ::= ident "as" ident | ident ":" ident | ":" ident | ident
//! Node          ::= "(" Type Data? ")"
//! Edge          ::= "-" "[" (ident | ":" ident | ident ":" ident) "]" "-" ">"
//! NodeList      ::= Node (Edge Node)? ("," NodeList)?
//! Create        ::= "create" NodeList
//! Set           ::= ident "." ident "=" string | "(" ident ")" Edge "(" ident ")"
//! SetList       ::= "set" Set SetList | ε
//! IdentList     ::= ident ("." ident)? ("," IdentList)?
//! Return        ::= "return" IdentList | ε
//! Match         ::= "match" NodeList SetList Return
//! Expr          ::= (Create | Match) Expr | ε
//! ```
//!
//! The whole statement is parsed before anything executes. Right-recursive
//! productions count against a nesting limit.

use tracing::warn;

use crate::query::ast::{
    Clause, CreateClause, EdgeDecl, EdgeSetDecl, MatchClause, NodeDecl, NodeRef, NodeSetDecl,
    Pattern, ReturnItem, Statement,
};
use crate::query::errors::QueryError;
use crate::query::lexer::{Lexer, Symbol, Token};

type ParseResult<T> = Result<T, QueryError>;

/// Command whose node list is being parsed.
///
/// Identical node syntax binds differently: inside `CREATE` a bare identifier
/// must name an earlier node, inside `MATCH` it introduces a new one.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Create,
    Match,
}

/// Parser state for a single statement.
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    lookahead: Option<Token>,
    command: Command,
    depth: usize,
    max_depth: usize,
}

/// Parses `input` with the given nesting limit.
pub fn parse(input: &str, max_depth: usize) -> ParseResult<Statement> {
    Parser::new(input, max_depth).parse()
}

impl<'a> Parser<'a> {
    /// Prepares a parser over `input`.
    pub fn new(input: &'a str, max_depth: usize) -> Self {
        let mut lexer = Lexer::new(input);
        let lookahead = lexer.next_token();
        Self {
            lexer,
            lookahead,
            command: Command::Create,
            depth: 0,
            max_depth,
        }
    }

    /// Consumes the input and returns the parsed statement.
    pub fn parse(mut self) -> ParseResult<Statement> {
        let mut clauses = Vec::new();
        self.parse_expr(&mut clauses)?;
        match self.lookahead.take() {
            Some(Token {
                symbol: Symbol::Ident,
                text,
            }) => Err(QueryError::UnknownCommand {
                found: text.unwrap_or_default(),
            }),
            Some(tok) => Err(QueryError::UnexpectedSymbol {
                found: tok.symbol,
                expected: Symbol::Create,
            }),
            None => {
                let offset = self.lexer.position();
                let rest = self.lexer.rest();
                if !rest.is_empty() {
                    warn!(
                        offset,
                        trailing = %String::from_utf8_lossy(rest),
                        "query.parse.untokenized_input"
                    );
                }
                Ok(Statement { clauses })
            }
        }
    }

    fn peek(&self, symbol: Symbol) -> bool {
        self.lookahead.as_ref().is_some_and(|tok| tok.symbol == symbol)
    }

    fn accept(&mut self, symbol: Symbol) -> Option<Token> {
        if !self.peek(symbol) {
            return None;
        }
        let tok = self.lookahead.take();
        self.lookahead = self.lexer.next_token();
        tok
    }

    fn expect(&mut self, symbol: Symbol) -> ParseResult<Token> {
        if let Some(tok) = self.accept(symbol) {
            return Ok(tok);
        }
        Err(match &self.lookahead {
            Some(tok) => QueryError::UnexpectedSymbol {
                found: tok.symbol,
                expected: symbol,
            },
            None => QueryError::UnexpectedEnd { expected: symbol },
        })
    }

    fn expect_text(&mut self, symbol: Symbol) -> ParseResult<String> {
        Ok(self.expect(symbol)?.text.unwrap_or_default())
    }

    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= self.max_depth {
            return Err(QueryError::NestingTooDeep {
                max: self.max_depth,
            });
        }
        self.depth += 1;
        let out = f(self);
        self.depth -= 1;
        out
    }

    fn parse_expr(&mut self, clauses: &mut Vec<Clause>) -> ParseResult<()> {
        let clause = if self.accept(Symbol::Create).is_some() {
            Clause::Create(self.parse_create()?)
        } else if self.accept(Symbol::Match).is_some() {
            Clause::Match(self.parse_match()?)
        } else {
            return Ok(());
        };
        clauses.push(clause);
        self.nested(|p| p.parse_expr(clauses))
    }

    fn parse_create(&mut self) -> ParseResult<CreateClause> {
        self.command = Command::Create;
        let mut clause = CreateClause::default();
        self.parse_node_list(&mut clause.pattern)?;
        Ok(clause)
    }

    fn parse_match(&mut self) -> ParseResult<MatchClause> {
        self.command = Command::Match;
        let mut clause = MatchClause::default();
        self.parse_node_list(&mut clause.pattern)?;
        self.parse_set_list(&mut clause)?;
        if self.accept(Symbol::Return).is_some() {
            self.parse_ident_list(&mut clause.returns)?;
        }
        Ok(clause)
    }

    fn parse_node_list(&mut self, pattern: &mut Pattern) -> ParseResult<()> {
        let left = self.parse_node(pattern)?;
        if self.peek(Symbol::Dash) {
            let label = self.parse_edge()?;
            let right = self.parse_node(pattern)?;
            pattern.edges.push(EdgeDecl { label, left, right });
        }
        if self.accept(Symbol::Comma).is_some() {
            self.nested(|p| p.parse_node_list(pattern))?;
        }
        Ok(())
    }

    fn parse_node(&mut self, pattern: &mut Pattern) -> ParseResult<NodeRef> {
        self.expect(Symbol::LParen)?;
        let (ident, label) = self.parse_type()?;
        let mut props = Vec::new();
        if self.accept(Symbol::LBrace).is_some() {
            self.parse_key_values(&mut props)?;
            self.expect(Symbol::RBrace)?;
        }
        self.expect(Symbol::RParen)?;

        match (ident, label) {
            (Some(ident), None) => match (pattern.lookup(&ident), self.command) {
                (Some(bound), _) => Ok(bound),
                (None, Command::Match) => Ok(pattern.add_node(NodeDecl::new(Some(ident), None))),
                (None, Command::Create) => Err(QueryError::UnidentifiedVariable { name: ident }),
            },
            (ident, label) => {
                let mut decl = NodeDecl::new(ident, label);
                decl.props = props;
                Ok(pattern.add_node(decl))
            }
        }
    }

    // Returns (identifier, label).
    fn parse_type(&mut self) -> ParseResult<(Option<String>, Option<String>)> {
        if self.accept(Symbol::Colon).is_some() {
            return Ok((None, Some(self.expect_text(Symbol::Ident)?)));
        }
        let first = self.expect_text(Symbol::Ident)?;
        if self.accept(Symbol::Colon).is_some() {
            let label = self.expect_text(Symbol::Ident)?;
            Ok((Some(first), Some(label)))
        } else if self.accept(Symbol::As).is_some() {
            let ident = self.expect_text(Symbol::Ident)?;
            Ok((Some(ident), Some(first)))
        } else if self.peek(Symbol::LBrace) {
            Ok((None, Some(first)))
        } else {
            Ok((Some(first), None))
        }
    }

    fn parse_key_values(&mut self, props: &mut Vec<(String, String)>) -> ParseResult<()> {
        let key = self.expect_text(Symbol::Ident)?;
        self.expect(Symbol::Colon)?;
        let value = self.expect_text(Symbol::Str)?;
        props.push((key, value));
        if self.accept(Symbol::Comma).is_some() {
            self.nested(|p| p.parse_key_values(props))?;
        }
        Ok(())
    }

    /// `-[label]->`, `-[:label]->` or `-[var:label]->`; the variable is dropped.
    fn parse_edge(&mut self) -> ParseResult<String> {
        self.expect(Symbol::Dash)?;
        self.expect(Symbol::LBrack)?;
        let label = if self.accept(Symbol::Colon).is_some() {
            self.expect_text(Symbol::Ident)?
        } else {
            let first = self.expect_text(Symbol::Ident)?;
            if self.accept(Symbol::Colon).is_some() {
                self.expect_text(Symbol::Ident)?
            } else {
                first
            }
        };
        self.expect(Symbol::RBrack)?;
        self.expect(Symbol::Dash)?;
        self.expect(Symbol::GreaterThan)?;
        Ok(label)
    }

    fn parse_set_list(&mut self, clause: &mut MatchClause) -> ParseResult<()> {
        if self.accept(Symbol::Set).is_none() {
            return Ok(());
        }
        self.parse_set(clause)?;
        self.nested(|p| p.parse_set_list(clause))
    }

    fn parse_set(&mut self, clause: &mut MatchClause) -> ParseResult<()> {
        if self.accept(Symbol::LParen).is_some() {
            let left = self.expect_text(Symbol::Ident)?;
            self.expect(Symbol::RParen)?;
            let label = self.parse_edge()?;
            self.expect(Symbol::LParen)?;
            let right = self.expect_text(Symbol::Ident)?;
            self.expect(Symbol::RParen)?;
            resolve(&clause.pattern, &left)?;
            resolve(&clause.pattern, &right)?;
            clause.edge_sets.push(EdgeSetDecl { label, left, right });
            return Ok(());
        }
        let ident = self.expect_text(Symbol::Ident)?;
        self.expect(Symbol::Period)?;
        let key = self.expect_text(Symbol::Ident)?;
        self.expect(Symbol::Equals)?;
        let value = self.expect_text(Symbol::Str)?;
        resolve(&clause.pattern, &ident)?;
        clause.node_sets.push(NodeSetDecl { ident, key, value });
        Ok(())
    }

    fn parse_ident_list(&mut self, items: &mut Vec<ReturnItem>) -> ParseResult<()> {
        let ident = self.expect_text(Symbol::Ident)?;
        let property = match self.accept(Symbol::Period) {
            Some(_) => Some(self.expect_text(Symbol::Ident)?),
            None => None,
        };
        items.push(ReturnItem { ident, property });
        if self.accept(Symbol::Comma).is_some() {
            self.nested(|p| p.parse_ident_list(items))?;
        }
        Ok(())
    }
}

fn resolve(pattern: &Pattern, ident: &str) -> ParseResult<NodeRef> {
    pattern
        .lookup(ident)
        .ok_or_else(|| QueryError::UnidentifiedVariable {
            name: ident.to_owned(),
        })
}
