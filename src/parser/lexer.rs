//! Lexer for tokenizing HTML markup.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till1, take_until, take_while, take_while1},
    character::complete::{alpha1, char, multispace0, multispace1},
    combinator::{map, opt, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, tuple},
    IResult,
};

/// A token from the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    StartTag {
        name: &'a str,
        attributes: Vec<Attribute<'a>>,
        self_closing: bool,
    },
    EndTag(&'a str),
    Comment(&'a str),
    Doctype(&'a str),
    Text(&'a str),
}

/// A raw attribute: name and undecoded value (absent for boolean attributes).
pub type Attribute<'a> = (&'a str, Option<&'a str>);

/// Parse the next token.
pub fn token(input: &str) -> IResult<&str, Token> {
    alt((comment, doctype, end_tag, start_tag, text))(input)
}

/// Parse a tag name (`div`, `h1`, `my-widget`).
fn tag_name(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alpha1,
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == ':'),
    ))(input)
}

fn attr_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'' | '<'))(
        input,
    )
}

fn attr_value(input: &str) -> IResult<&str, &str> {
    preceded(
        tuple((multispace0, char('='), multispace0)),
        alt((
            delimited(char('"'), take_while(|c: char| c != '"'), char('"')),
            delimited(char('\''), take_while(|c: char| c != '\''), char('\'')),
            take_while1(|c: char| !c.is_whitespace() && c != '>'),
        )),
    )(input)
}

fn attribute(input: &str) -> IResult<&str, Attribute> {
    pair(attr_name, opt(attr_value))(input)
}

/// Parse a start tag (`<a href="x">`, `<br/>`).
pub fn start_tag(input: &str) -> IResult<&str, Token> {
    let (input, _) = char('<')(input)?;
    let (input, name) = tag_name(input)?;
    let (input, attributes) = many0(preceded(multispace1, attribute))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, slash) = opt(char('/'))(input)?;
    let (input, _) = char('>')(input)?;
    Ok((
        input,
        Token::StartTag {
            name,
            attributes,
            self_closing: slash.is_some(),
        },
    ))
}

/// Parse an end tag (`</div>`).
pub fn end_tag(input: &str) -> IResult<&str, Token> {
    map(
        delimited(tag("</"), tag_name, pair(multispace0, char('>'))),
        Token::EndTag,
    )(input)
}

/// Parse a comment (`<!-- ... -->`).
pub fn comment(input: &str) -> IResult<&str, Token> {
    map(
        delimited(tag("<!--"), take_until("-->"), tag("-->")),
        Token::Comment,
    )(input)
}

/// Parse a doctype or other markup declaration (`<!DOCTYPE html>`).
pub fn doctype(input: &str) -> IResult<&str, Token> {
    map(delimited(tag("<!"), is_not(">"), char('>')), Token::Doctype)(input)
}

/// Parse character data up to the next `<`.
pub fn text(input: &str) -> IResult<&str, Token> {
    map(take_till1(|c: char| c == '<'), Token::Text)(input)
}
