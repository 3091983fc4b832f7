//! Parser for Java type expressions as written in declaration files.
//!
//! Accepts the subset of Java type syntax a declaration needs: dotted
//! class names, type arguments, wildcards, array suffixes and, for type
//! parameters, `extends` bounds joined with `&`. Names are not resolved
//! here.

/// A parsed, unresolved type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeExpr {
    /// `name` or `name<args>`. Primitives and type variables parse as
    /// names too.
    Named { name: String, args: Vec<TypeExpr> },
    Array(Box<TypeExpr>),
    Wildcard(WildcardExpr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum WildcardExpr {
    Unbounded,
    Extends(Box<TypeExpr>),
    Super(Box<TypeExpr>),
}

/// `T extends Comparable<T> & Serializable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TypeParamExpr {
    pub name: String,
    pub bounds: Vec<TypeExpr>,
}

/// Why an expression failed to parse, and the byte offset where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    pub offset: usize,
    pub message: String,
}

pub(crate) fn parse_type(input: &str) -> Result<TypeExpr, SyntaxError> {
    let mut parser = Parser::new(input);
    let ty = parser.type_expr(false)?;
    parser.finish()?;
    Ok(ty)
}

pub(crate) fn parse_type_param(input: &str) -> Result<TypeParamExpr, SyntaxError> {
    let mut parser = Parser::new(input);
    parser.skip_ws();
    let name = parser.ident()?;
    if name.contains('.') {
        return Err(parser.error_at(0, "type parameter names cannot be qualified"));
    }
    let mut bounds = Vec::new();
    parser.skip_ws();
    if parser.keyword("extends") {
        bounds.push(parser.type_expr(false)?);
        loop {
            parser.skip_ws();
            if !parser.eat('&') {
                break;
            }
            bounds.push(parser.type_expr(false)?);
        }
    }
    parser.finish()?;
    Ok(TypeParamExpr { name, bounds })
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '.'
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn error_at(&self, offset: usize, message: impl Into<String>) -> SyntaxError {
        SyntaxError {
            offset,
            message: message.into(),
        }
    }

    fn error(&self, message: impl Into<String>) -> SyntaxError {
        self.error_at(self.pos, message)
    }

    /// Consume `kw` if it appears as a whole word.
    fn keyword(&mut self, kw: &str) -> bool {
        let rest = self.rest();
        let whole_word = rest
            .strip_prefix(kw)
            .is_some_and(|after| !after.chars().next().is_some_and(is_ident_char));
        if whole_word {
            self.pos += kw.len();
        }
        whole_word
    }

    fn ident(&mut self) -> Result<String, SyntaxError> {
        let start = self.pos;
        let len = self
            .rest()
            .find(|c: char| !is_ident_char(c))
            .unwrap_or(self.rest().len());
        if len == 0 {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected a type name, found '{}'", c)),
                None => self.error("expected a type name"),
            });
        }
        let ident = &self.src[start..start + len];
        if ident.split('.').any(|segment| segment.is_empty()) {
            return Err(self.error_at(start, format!("malformed name '{}'", ident)));
        }
        if ident.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error_at(start, "names cannot start with a digit"));
        }
        self.pos += len;
        Ok(ident.to_string())
    }

    fn type_expr(&mut self, allow_wildcard: bool) -> Result<TypeExpr, SyntaxError> {
        self.skip_ws();
        if self.peek() == Some('?') {
            if !allow_wildcard {
                return Err(self.error("wildcards are only allowed as type arguments"));
            }
            self.pos += 1;
            self.skip_ws();
            let wildcard = if self.keyword("extends") {
                WildcardExpr::Extends(Box::new(self.type_expr(false)?))
            } else if self.keyword("super") {
                WildcardExpr::Super(Box::new(self.type_expr(false)?))
            } else {
                WildcardExpr::Unbounded
            };
            return Ok(TypeExpr::Wildcard(wildcard));
        }

        let name = self.ident()?;
        let mut args = Vec::new();
        self.skip_ws();
        if self.eat('<') {
            loop {
                args.push(self.type_expr(true)?);
                self.skip_ws();
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }

        let mut ty = TypeExpr::Named { name, args };
        loop {
            self.skip_ws();
            if !self.eat('[') {
                break;
            }
            self.skip_ws();
            if !self.eat(']') {
                return Err(self.error("expected ']'"));
            }
            ty = TypeExpr::Array(Box::new(ty));
        }
        Ok(ty)
    }

    fn finish(&mut self) -> Result<(), SyntaxError> {
        self.skip_ws();
        match self.peek() {
            None => Ok(()),
            Some(c) => Err(self.error(format!("unexpected '{}'", c))),
        }
    }
}
