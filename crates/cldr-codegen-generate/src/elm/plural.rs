//! CLDR plural rule parsing and compilation to Elm expressions.
//!
//! Grammar (samples after `@` are ignored):
//!
//! ```text
//! condition     = and_condition ("or" and_condition)*
//! and_condition = relation ("and" relation)*
//! relation      = expr ("=" | "!=") range_list
//! expr          = operand (("mod" | "%") value)?
//! range_list    = (value | value ".." value) ("," range_list)*
//! ```

use std::fmt;

use thiserror::Error;

/// Plural categories in CLDR order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl PluralCategory {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "zero" => Some(Self::Zero),
            "one" => Some(Self::One),
            "two" => Some(Self::Two),
            "few" => Some(Self::Few),
            "many" => Some(Self::Many),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for PluralCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plural operands; `c` is read as a synonym of `e`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    N,
    I,
    V,
    W,
    F,
    T,
    E,
}

impl Operand {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "n" => Some(Self::N),
            "i" => Some(Self::I),
            "v" => Some(Self::V),
            "w" => Some(Self::W),
            "f" => Some(Self::F),
            "t" => Some(Self::T),
            "c" | "e" => Some(Self::E),
            _ => None,
        }
    }

    fn field(self) -> &'static str {
        match self {
            Self::N => "n",
            Self::I => "i",
            Self::V => "v",
            Self::W => "w",
            Self::F => "f",
            Self::T => "t",
            Self::E => "e",
        }
    }

    /// `n` is the only fractional operand.
    fn is_float(self) -> bool {
        matches!(self, Self::N)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub operand: Operand,
    pub modulus: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeItem {
    Value(u64),
    Range(u64, u64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    pub expr: Expr,
    pub negated: bool,
    pub items: Vec<RangeItem>,
}

/// Disjunction of conjunctions. An empty condition always holds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Condition {
    pub any_of: Vec<Vec<Relation>>,
}

impl Condition {
    pub fn is_always(&self) -> bool {
        self.any_of.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },
    #[error("expected {expected} but found {found}")]
    UnexpectedToken { expected: &'static str, found: String },
    #[error("unexpected end of rule, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("number out of range: {0}")]
    NumberOutOfRange(String),
    #[error("range {0}..{1} is empty")]
    EmptyRange(u64, u64),
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Word(String),
    Number(u64),
    Eq,
    NotEq,
    Percent,
    DotDot,
    Comma,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Word(word) => write!(f, "'{word}'"),
            Token::Number(value) => write!(f, "{value}"),
            Token::Eq => f.write_str("'='"),
            Token::NotEq => f.write_str("'!='"),
            Token::Percent => f.write_str("'%'"),
            Token::DotDot => f.write_str("'..'"),
            Token::Comma => f.write_str("','"),
        }
    }
}

fn tokenize(rule: &str) -> Result<Vec<Token>, RuleError> {
    let mut tokens = Vec::new();
    let mut chars = rule.char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '@' => break,
            c if c.is_whitespace() => {}
            '=' => tokens.push(Token::Eq),
            '%' => tokens.push(Token::Percent),
            ',' => tokens.push(Token::Comma),
            '!' if matches!(chars.peek(), Some((_, '='))) => {
                chars.next();
                tokens.push(Token::NotEq);
            }
            '.' if matches!(chars.peek(), Some((_, '.'))) => {
                chars.next();
                tokens.push(Token::DotDot);
            }
            c if c.is_ascii_digit() => {
                let mut digits = c.to_string();
                while let Some((_, next)) = chars.peek().copied() {
                    if !next.is_ascii_digit() {
                        break;
                    }
                    digits.push(next);
                    chars.next();
                }
                let value = digits
                    .parse()
                    .map_err(|_| RuleError::NumberOutOfRange(digits.clone()))?;
                tokens.push(Token::Number(value));
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = c.to_string();
                while let Some((_, next)) = chars.peek().copied() {
                    if !next.is_ascii_alphabetic() {
                        break;
                    }
                    word.push(next);
                    chars.next();
                }
                tokens.push(Token::Word(word));
            }
            found => return Err(RuleError::UnexpectedChar { found, offset }),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self, expected: &'static str) -> Result<Token, RuleError> {
        let token = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or(RuleError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(token)
    }

    fn eat_word(&mut self, word: &str) -> bool {
        if matches!(self.peek(), Some(Token::Word(w)) if w == word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Result<u64, RuleError> {
        match self.next("a number")? {
            Token::Number(value) => Ok(value),
            other => Err(RuleError::UnexpectedToken {
                expected: "a number",
                found: other.to_string(),
            }),
        }
    }

    fn condition(&mut self) -> Result<Condition, RuleError> {
        let mut any_of = vec![self.and_condition()?];
        while self.eat_word("or") {
            any_of.push(self.and_condition()?);
        }
        Ok(Condition { any_of })
    }

    fn and_condition(&mut self) -> Result<Vec<Relation>, RuleError> {
        let mut all_of = vec![self.relation()?];
        while self.eat_word("and") {
            all_of.push(self.relation()?);
        }
        Ok(all_of)
    }

    fn relation(&mut self) -> Result<Relation, RuleError> {
        let expr = self.expr()?;
        let negated = match self.next("'=' or '!='")? {
            Token::Eq => false,
            Token::NotEq => true,
            other => {
                return Err(RuleError::UnexpectedToken {
                    expected: "'=' or '!='",
                    found: other.to_string(),
                });
            }
        };

        let mut items = vec![self.range_item()?];
        while matches!(self.peek(), Some(Token::Comma)) {
            self.pos += 1;
            items.push(self.range_item()?);
        }

        Ok(Relation {
            expr,
            negated,
            items,
        })
    }

    fn expr(&mut self) -> Result<Expr, RuleError> {
        let operand = match self.next("an operand")? {
            Token::Word(word) => Operand::parse(&word).ok_or(RuleError::UnexpectedToken {
                expected: "an operand",
                found: format!("'{word}'"),
            })?,
            other => {
                return Err(RuleError::UnexpectedToken {
                    expected: "an operand",
                    found: other.to_string(),
                });
            }
        };

        let modulus = if self.eat_word("mod") || matches!(self.peek(), Some(Token::Percent)) {
            if matches!(self.peek(), Some(Token::Percent)) {
                self.pos += 1;
            }
            Some(self.number()?)
        } else {
            None
        };

        Ok(Expr { operand, modulus })
    }

    fn range_item(&mut self) -> Result<RangeItem, RuleError> {
        let low = self.number()?;
        if !matches!(self.peek(), Some(Token::DotDot)) {
            return Ok(RangeItem::Value(low));
        }
        self.pos += 1;
        let high = self.number()?;
        if high < low {
            return Err(RuleError::EmptyRange(low, high));
        }
        Ok(RangeItem::Range(low, high))
    }
}

/// Parse one rule, e.g. `i = 1 and v = 0 @integer 1`.
pub fn parse_rule(rule: &str) -> Result<Condition, RuleError> {
    let tokens = tokenize(rule)?;
    if tokens.is_empty() {
        return Ok(Condition::default());
    }

    let mut parser = Parser { tokens, pos: 0 };
    let condition = parser.condition()?;
    match parser.peek() {
        None => Ok(condition),
        Some(token) => Err(RuleError::UnexpectedToken {
            expected: "'and', 'or' or end of rule",
            found: token.to_string(),
        }),
    }
}

/// Elm helper needed by rules that take `n` modulo a value.
pub const FLOAT_MOD_HELPER: &str = "floatModBy";

/// Compile a condition to an Elm boolean expression over a record named `op`.
///
/// Sets `uses_float_mod` when the expression calls [`FLOAT_MOD_HELPER`].
pub fn condition_to_elm(condition: &Condition, uses_float_mod: &mut bool) -> String {
    if condition.is_always() {
        return "True".to_string();
    }

    let disjuncts: Vec<String> = condition
        .any_of
        .iter()
        .map(|all_of| {
            let conjuncts: Vec<String> = all_of
                .iter()
                .map(|relation| relation_to_elm(relation, uses_float_mod))
                .collect();
            if condition.any_of.len() > 1 && conjuncts.len() > 1 {
                format!("({})", conjuncts.join(" && "))
            } else {
                conjuncts.join(" && ")
            }
        })
        .collect();

    disjuncts.join(" || ")
}

fn relation_to_elm(relation: &Relation, uses_float_mod: &mut bool) -> String {
    let is_float = relation.expr.operand.is_float();
    let field = format!("op.{}", relation.expr.operand.field());
    let value = match relation.expr.modulus {
        Some(modulus) if is_float => {
            *uses_float_mod = true;
            format!("({FLOAT_MOD_HELPER} {modulus} {field})")
        }
        Some(modulus) => format!("(modBy {modulus} {field})"),
        None => field,
    };

    let tests: Vec<String> = relation
        .items
        .iter()
        .map(|item| match *item {
            RangeItem::Value(v) => format!("{value} == {v}"),
            RangeItem::Range(low, high) if is_float => format!(
                "({value} == toFloat (truncate {value}) && {value} >= {low} && {value} <= {high})"
            ),
            RangeItem::Range(low, high) => format!("({value} >= {low} && {value} <= {high})"),
        })
        .collect();

    let test = if tests.len() == 1 {
        tests.into_iter().next().unwrap_or_default()
    } else {
        format!("({})", tests.join(" || "))
    };

    if relation.negated {
        format!("not ({test})")
    } else {
        test
    }
}
