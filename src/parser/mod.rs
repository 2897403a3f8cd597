//! Parser for signature pattern strings
//!
//! Parsing runs in two passes, the way the engine's token stream was meant
//! to be consumed: the first pass collects tokens and validates adjacency
//! with [`validate::valid_token_sequence`], the second builds the immutable
//! [`Pattern`] value. Boolean type expressions are parsed by precedence
//! climbing with `!` binding tightest, then left-associative `&&`, then
//! left-associative `||`.

/// Validation utilities for token sequences
pub mod validate;

use crate::ast::expr::{Primitive, TypeAtom, TypeExpr};
use crate::ast::{FormalPattern, ParamsPattern, Pattern};
use crate::error::{PatternError, Result};
use crate::lexer::token::{Item, Token};
use crate::lexer::Lexer;
use crate::pattern::{DottedName, NameGlob, SegmentPattern};
use validate::valid_token_sequence;

/// Parse a pattern string into its compiled representation
pub fn parse(source: &str) -> Result<Pattern> {
    Parser::new(source)?.build()
}

/// Parser that consumes tokens from the lexer and builds a [`Pattern`]
#[derive(Debug)]
pub struct Parser {
    tokens: Vec<Item>,
    source: String,
}

impl Parser {
    /// Collect tokens for the given source and validate their sequence
    pub fn new(source: &str) -> Result<Self> {
        let mut tokens = Lexer::new(source).scan();

        for item in &tokens {
            match item.token {
                Token::Error => {
                    return Err(PatternError::syntax(
                        item.pos,
                        "a pattern token",
                        item.describe(),
                    ));
                }
                Token::Unsupported => {
                    return Err(PatternError::unsupported(item.pos, item.value.clone()));
                }
                _ => {}
            }
        }

        // Whitespace is significant only between the type pattern and the
        // method name; leading and trailing runs are separators of nothing
        if tokens.first().map(|i| i.token) == Some(Token::Whitespace) {
            tokens.remove(0);
        }
        let len = tokens.len();
        if len >= 2 && tokens[len - 2].token == Token::Whitespace {
            tokens.remove(len - 2);
        }

        let mut prev = Token::Begin;
        for item in &tokens {
            if !valid_token_sequence(prev, item.token) {
                return Err(PatternError::syntax(
                    item.pos,
                    expected_after(prev),
                    item.describe(),
                ));
            }
            prev = item.token;
        }

        Ok(Self {
            tokens,
            source: source.to_string(),
        })
    }

    /// Build the pattern: `typePattern WS [ownerPattern .] namePattern ( params )`
    pub fn build(self) -> Result<Pattern> {
        let items = &self.tokens;
        let eof_pos = items.last().map(|i| i.pos).unwrap_or(0);

        let lpar_idx = items
            .iter()
            .position(|i| i.token == Token::SepLpar)
            .ok_or_else(|| PatternError::syntax(eof_pos, "'('", "end of pattern"))?;

        // The split between the leading type pattern and the name is the
        // first whitespace run not nested inside brackets
        let mut depth = 0usize;
        let mut ws_idx = None;
        for (idx, item) in items[..lpar_idx].iter().enumerate() {
            match item.token {
                Token::SepLbracket => depth += 1,
                Token::SepRbracket => depth = depth.saturating_sub(1),
                Token::Whitespace if depth == 0 => {
                    ws_idx = Some(idx);
                    break;
                }
                _ => {}
            }
        }
        let ws_idx = ws_idx.ok_or_else(|| {
            PatternError::syntax(
                items[lpar_idx].pos,
                "a return type pattern followed by whitespace",
                "'('",
            )
        })?;

        let ret_refs: Vec<&Item> = items[..ws_idx].iter().collect();
        let ret = parse_type_expr(&ret_refs, items[ws_idx].pos)?;
        let ret_explicit = !ret.is_bare_star();

        let mut name_refs: Vec<&Item> = items[ws_idx + 1..lpar_idx].iter().collect();
        while name_refs.last().map(|i| i.token) == Some(Token::Whitespace) {
            name_refs.pop();
        }
        if name_refs.is_empty() {
            return Err(PatternError::syntax(
                items[lpar_idx].pos,
                "a method name pattern",
                "'('",
            ));
        }
        if let Some(ws) = name_refs.iter().find(|i| i.token == Token::Whitespace) {
            return Err(PatternError::syntax(ws.pos, "'('", "whitespace"));
        }
        let (owner, name) = parse_qualified_name(&name_refs)?;

        let rpar_idx = items[lpar_idx..]
            .iter()
            .position(|i| i.token == Token::SepRpar)
            .map(|off| lpar_idx + off)
            .ok_or_else(|| PatternError::syntax(eof_pos, "')'", "end of pattern"))?;
        let param_refs: Vec<&Item> = items[lpar_idx + 1..rpar_idx].iter().collect();
        let params = parse_params(&param_refs, items[rpar_idx].pos)?;

        if let Some(extra) = items[rpar_idx + 1..]
            .iter()
            .find(|i| !matches!(i.token, Token::Whitespace | Token::LitEof))
        {
            return Err(PatternError::syntax(
                extra.pos,
                "end of pattern",
                extra.describe(),
            ));
        }

        Ok(Pattern {
            source: self.source,
            ret,
            ret_explicit,
            owner,
            name,
            params,
        })
    }
}

/// What the parser accepts after the given token, for error messages
fn expected_after(prev: Token) -> &'static str {
    match prev {
        Token::Begin => "a type pattern",
        Token::Dot | Token::DotDot => "a name fragment",
        Token::OpNot => "a type atom",
        Token::OpAnd | Token::OpOr => "a type pattern",
        Token::SepLbracket => "']'",
        Token::SepComma => "a parameter type pattern",
        Token::Ellipsis => "')'",
        Token::SepRpar => "end of pattern",
        Token::Whitespace => "a name or type pattern",
        _ => "'.', '(' or an operator",
    }
}

/// Split `owner.name` at the last separator and build both parts
fn parse_qualified_name(slice: &[&Item]) -> Result<(Option<TypeExpr>, NameGlob)> {
    for item in slice {
        if !matches!(
            item.token,
            Token::Identifier | Token::Star | Token::Dot | Token::DotDot
        ) {
            return Err(PatternError::syntax(
                item.pos,
                "a method name pattern",
                item.describe(),
            ));
        }
    }

    let sep = slice
        .iter()
        .rposition(|i| matches!(i.token, Token::Dot | Token::DotDot));
    match sep {
        None => Ok((None, parse_name_glob(slice, 0)?)),
        Some(idx) => {
            let sep_item = slice[idx];
            // `com.foo..baz` keeps the trailing `..` as part of the owner
            let trailing_gap = sep_item.token == Token::DotDot;
            let owner_toks = &slice[..idx];
            if owner_toks.is_empty() && !trailing_gap {
                return Err(PatternError::syntax(
                    sep_item.pos,
                    "an owner type pattern",
                    "'.'",
                ));
            }
            let owner = parse_dotted(owner_toks, trailing_gap, 0)?;
            let name_at = sep_item.pos + sep_item.value.len();
            let name = parse_name_glob(&slice[idx + 1..], name_at)?;
            Ok((Some(TypeExpr::Atom(TypeAtom::Name(owner))), name))
        }
    }
}

/// Build a method-name glob from identifier and `*` fragments
fn parse_name_glob(slice: &[&Item], at: usize) -> Result<NameGlob> {
    if slice.is_empty() {
        return Err(PatternError::syntax(at, "a method name pattern", "'('"));
    }
    let mut glob = NameGlob::new();
    for item in slice {
        match item.token {
            Token::Identifier => glob.push_literal(&item.value),
            Token::Star => glob.push_star(),
            _ => {
                return Err(PatternError::syntax(
                    item.pos,
                    "a method name pattern",
                    item.describe(),
                ));
            }
        }
    }
    Ok(glob)
}

/// Build a dotted wildcard name from a run of name tokens
fn parse_dotted(slice: &[&Item], trailing_gap: bool, dims: usize) -> Result<DottedName> {
    let mut segments = Vec::new();
    let mut current = NameGlob::new();
    for item in slice {
        match item.token {
            Token::Identifier => current.push_literal(&item.value),
            Token::Star => current.push_star(),
            Token::Dot => {
                if current.is_empty() {
                    return Err(PatternError::syntax(item.pos, "a name fragment", "'.'"));
                }
                segments.push(SegmentPattern::Glob(std::mem::take(&mut current)));
            }
            Token::DotDot => {
                if !current.is_empty() {
                    segments.push(SegmentPattern::Glob(std::mem::take(&mut current)));
                }
                segments.push(SegmentPattern::Gap);
            }
            _ => {
                return Err(PatternError::syntax(
                    item.pos,
                    "a type name",
                    item.describe(),
                ));
            }
        }
    }
    if let Some(last) = slice.last() {
        if last.token == Token::Dot {
            return Err(PatternError::syntax(
                last.pos + last.value.len(),
                "a name fragment",
                "end of type pattern",
            ));
        }
    }
    if !current.is_empty() {
        segments.push(SegmentPattern::Glob(current));
    }
    if trailing_gap {
        segments.push(SegmentPattern::Gap);
    }
    Ok(DottedName::new(segments, dims))
}

/// Parse the formal-parameter section between the parentheses
fn parse_params(slice: &[&Item], rpar_pos: usize) -> Result<ParamsPattern> {
    // Whitespace is insignificant inside the parameter list
    let toks: Vec<&Item> = slice
        .iter()
        .filter(|i| i.token != Token::Whitespace)
        .copied()
        .collect();
    if let Some(bad) = toks.iter().find(|i| i.token == Token::SepLpar) {
        return Err(PatternError::syntax(bad.pos, "')'", bad.describe()));
    }
    if toks.is_empty() {
        return Ok(ParamsPattern::Exact(Vec::new()));
    }

    let mut groups: Vec<Vec<&Item>> = Vec::new();
    let mut current: Vec<&Item> = Vec::new();
    for &item in &toks {
        if item.token == Token::SepComma {
            if current.is_empty() {
                return Err(PatternError::syntax(
                    item.pos,
                    "a parameter type pattern",
                    "','",
                ));
            }
            groups.push(std::mem::take(&mut current));
        } else {
            current.push(item);
        }
    }
    if current.is_empty() {
        return Err(PatternError::syntax(
            rpar_pos,
            "a parameter type pattern",
            "')'",
        ));
    }
    groups.push(current);

    let leading_dotdot = groups[0].len() == 1 && groups[0][0].token == Token::DotDot;
    if leading_dotdot {
        let trailing = parse_formals(&groups[1..])?;
        return Ok(ParamsPattern::DotDotPrefixed(trailing));
    }

    let mut formals = parse_formals(&groups)?;
    if formals.len() == 1 && formals[0].varargs {
        return Ok(ParamsPattern::SoloVarargs(formals.remove(0)));
    }
    Ok(ParamsPattern::Exact(formals))
}

/// Parse each comma-separated group into a formal pattern
fn parse_formals(groups: &[Vec<&Item>]) -> Result<Vec<FormalPattern>> {
    let last_idx = groups.len().saturating_sub(1);
    groups
        .iter()
        .enumerate()
        .map(|(idx, group)| {
            if group.len() == 1 && group[0].token == Token::DotDot {
                return Err(PatternError::semantic(
                    group[0].pos,
                    "at most one '..' is allowed per parameter list, and only as the first element",
                ));
            }
            let (body, marker) = match group.split_last() {
                Some((last, rest)) if last.token == Token::Ellipsis => (rest, Some(*last)),
                _ => (group.as_slice(), None),
            };
            let varargs = marker.is_some();
            if let Some(marker) = marker {
                if idx != last_idx {
                    return Err(PatternError::semantic(
                        marker.pos,
                        "a varargs marker is only legal on the final parameter",
                    ));
                }
                if body.is_empty() {
                    return Err(PatternError::syntax(
                        marker.pos,
                        "a parameter type pattern",
                        "'...'",
                    ));
                }
            }
            let end_pos = body
                .last()
                .map(|i| i.pos + i.value.len())
                .unwrap_or_default();
            let expr = parse_type_expr(body, end_pos)?;
            Ok(FormalPattern { expr, varargs })
        })
        .collect()
}

/// Parse a boolean type expression by precedence climbing
fn parse_type_expr(slice: &[&Item], end_pos: usize) -> Result<TypeExpr> {
    let mut cursor = ExprCursor {
        items: slice,
        idx: 0,
        end_pos,
    };
    let expr = cursor.parse_or()?;
    if let Some(item) = cursor.peek() {
        return Err(PatternError::syntax(
            item.pos,
            "'&&', '||' or end of type pattern",
            item.describe(),
        ));
    }
    Ok(expr)
}

struct ExprCursor<'a> {
    items: &'a [&'a Item],
    idx: usize,
    end_pos: usize,
}

impl<'a> ExprCursor<'a> {
    fn peek(&self) -> Option<&'a Item> {
        self.items.get(self.idx).copied()
    }

    fn bump(&mut self) {
        self.idx += 1;
    }

    fn parse_or(&mut self) -> Result<TypeExpr> {
        let mut lhs = self.parse_and()?;
        while self.peek().map(|i| i.token) == Some(Token::OpOr) {
            self.bump();
            let rhs = self.parse_and()?;
            lhs = TypeExpr::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<TypeExpr> {
        let mut lhs = self.parse_unary()?;
        while self.peek().map(|i| i.token) == Some(Token::OpAnd) {
            self.bump();
            let rhs = self.parse_unary()?;
            lhs = TypeExpr::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<TypeExpr> {
        if self.peek().map(|i| i.token) == Some(Token::OpNot) {
            self.bump();
            // `!` binds to the immediately following atom only
            let atom = self.parse_atom()?;
            return Ok(TypeExpr::Not(Box::new(atom)));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<TypeExpr> {
        match self.peek() {
            None => Err(PatternError::syntax(
                self.end_pos,
                "a type pattern",
                "end of type pattern",
            )),
            Some(item)
                if matches!(item.token, Token::Identifier | Token::Star | Token::DotDot) =>
            {
                let start = self.idx;
                while self.peek().is_some_and(|i| {
                    matches!(
                        i.token,
                        Token::Identifier | Token::Star | Token::Dot | Token::DotDot
                    )
                }) {
                    self.bump();
                }
                let run = &self.items[start..self.idx];
                let dims = self.parse_dims()?;
                let dotted = parse_dotted(run, false, dims)?;
                // A single wildcard-free segment naming a primitive is a
                // primitive atom, never a glob
                let atom = match dotted
                    .as_literal()
                    .and_then(|lit| Primitive::from_name(&lit))
                {
                    Some(prim) => TypeAtom::Primitive { prim, dims },
                    None => TypeAtom::Name(dotted),
                };
                Ok(TypeExpr::Atom(atom))
            }
            Some(item) => Err(PatternError::syntax(
                item.pos,
                "a type pattern",
                item.describe(),
            )),
        }
    }

    fn parse_dims(&mut self) -> Result<usize> {
        let mut dims = 0;
        while self.peek().map(|i| i.token) == Some(Token::SepLbracket) {
            self.bump();
            match self.peek() {
                Some(item) if item.token == Token::SepRbracket => self.bump(),
                Some(item) => {
                    return Err(PatternError::syntax(item.pos, "']'", item.describe()));
                }
                None => {
                    return Err(PatternError::syntax(
                        self.end_pos,
                        "']'",
                        "end of type pattern",
                    ));
                }
            }
            dims += 1;
        }
        Ok(dims)
    }
}
