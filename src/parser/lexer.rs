// Shared token parsers for the chart DSL

use nom::{
    bytes::complete::take_while,
    character::complete::{char, multispace0, satisfy},
    combinator::recognize,
    multi::many0_count,
    sequence::{delimited, pair},
    IResult,
};

/// Wrap a parser so it tolerates surrounding whitespace.
pub fn ws<'a, O, F>(inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    delimited(multispace0, inner, multispace0)
}

/// Column/keyword identifier: alphabetic or underscore start, then
/// alphanumerics and underscores.
pub fn identifier(input: &str) -> IResult<&str, String> {
    let (input, name) = recognize(pair(
        satisfy(|c: char| c.is_alphabetic() || c == '_'),
        many0_count(satisfy(|c: char| c.is_alphanumeric() || c == '_')),
    ))(input)?;
    Ok((input, name.to_string()))
}

/// Double-quoted string literal (no escape handling).
pub fn quoted_string(input: &str) -> IResult<&str, String> {
    let (input, value) = delimited(char('"'), take_while(|c| c != '"'), char('"'))(input)?;
    Ok((input, value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nom::bytes::complete::tag;

    #[test]
    fn test_identifier() {
        let (rest, name) = identifier("AvgLikes,").unwrap();
        assert_eq!(name, "AvgLikes");
        assert_eq!(rest, ",");
    }

    #[test]
    fn test_identifier_rejects_leading_digit() {
        assert!(identifier("1likes").is_err());
    }

    #[test]
    fn test_quoted_string() {
        let (rest, value) = quoted_string(r#""Likes per day" |"#).unwrap();
        assert_eq!(value, "Likes per day");
        assert_eq!(rest, " |");
    }

    #[test]
    fn test_ws_strips_whitespace() {
        let (rest, _) = ws(tag("line"))("  line  (")
            .unwrap();
        assert_eq!(rest, "(");
    }
}
