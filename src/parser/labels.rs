// Labels parser

use nom::{
    bytes::complete::tag,
    character::complete::char,
    error::{Error, ErrorKind},
    multi::separated_list0,
    IResult,
};

use super::ast::Labels;
use super::lexer::{identifier, quoted_string, ws};

enum LabsField {
    Title(String),
    X(String),
    Y(String),
}

fn parse_labs_field(input: &str) -> IResult<&str, LabsField> {
    let (input, key) = ws(identifier)(input)?;
    let (input, _) = ws(char(':'))(input)?;
    let (input, value) = ws(quoted_string)(input)?;

    let field = match key.as_str() {
        "title" => LabsField::Title(value),
        "x" => LabsField::X(value),
        "y" => LabsField::Y(value),
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Verify))),
    };
    Ok((input, field))
}

/// Parse a labels command
/// Format: labs(title: "...", x: "...", y: "...") — all fields optional
pub fn parse_labs(input: &str) -> IResult<&str, Labels> {
    let (input, _) = ws(tag("labs"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, fields) = separated_list0(ws(char(',')), parse_labs_field)(input)?;
    let (input, _) = ws(char(')'))(input)?;

    let mut labels = Labels::default();
    for field in fields {
        match field {
            LabsField::Title(v) => labels.title = Some(v),
            LabsField::X(v) => labels.x = Some(v),
            LabsField::Y(v) => labels.y = Some(v),
        }
    }

    Ok((input, labels))
}
