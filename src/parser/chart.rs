// Chart command parsers

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::char,
    combinator::opt,
    sequence::preceded,
    IResult,
};

use super::ast::{BarsChart, BoxplotChart, ChartKind, LineChart};
use super::lexer::{identifier, quoted_string, ws};

pub fn parse_chart(input: &str) -> IResult<&str, ChartKind> {
    alt((parse_boxplot, parse_bars, parse_line))(input)
}

/// `name: Column` argument.
fn named_col<'a>(name: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, String> {
    move |input| {
        let (input, _) = ws(tag(name))(input)?;
        let (input, _) = ws(char(':'))(input)?;
        ws(identifier)(input)
    }
}

/// Parse a boxplot command
/// Format: boxplot(x: col, y: col)
fn parse_boxplot(input: &str) -> IResult<&str, ChartKind> {
    let (input, _) = ws(tag("boxplot"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, x) = named_col("x")(input)?;
    let (input, _) = ws(char(','))(input)?;
    let (input, y) = named_col("y")(input)?;
    let (input, _) = ws(char(')'))(input)?;

    Ok((input, ChartKind::Boxplot(BoxplotChart { x, y })))
}

/// Parse a grouped bar command
/// Format: bars(x: col, group: col, y: col)
fn parse_bars(input: &str) -> IResult<&str, ChartKind> {
    let (input, _) = ws(tag("bars"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, x) = named_col("x")(input)?;
    let (input, _) = ws(char(','))(input)?;
    let (input, group) = named_col("group")(input)?;
    let (input, _) = ws(char(','))(input)?;
    let (input, y) = named_col("y")(input)?;
    let (input, _) = ws(char(')'))(input)?;

    Ok((input, ChartKind::Bars(BarsChart { x, group, y })))
}

/// Parse a line command
/// Format: line(x: col, y: col[, format: "pattern"])
fn parse_line(input: &str) -> IResult<&str, ChartKind> {
    let (input, _) = ws(tag("line"))(input)?;
    let (input, _) = ws(char('('))(input)?;
    let (input, x) = named_col("x")(input)?;
    let (input, _) = ws(char(','))(input)?;
    let (input, y) = named_col("y")(input)?;
    let (input, format) = opt(preceded(ws(char(',')), |i| {
        let (i, _) = ws(tag("format"))(i)?;
        let (i, _) = ws(char(':'))(i)?;
        ws(quoted_string)(i)
    }))(input)?;
    let (input, _) = ws(char(')'))(input)?;

    Ok((input, ChartKind::Line(LineChart { x, y, format })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_boxplot() {
        let (_, kind) = parse_chart("boxplot(x: Platform, y: Likes)").unwrap();
        assert_eq!(
            kind,
            ChartKind::Boxplot(BoxplotChart {
                x: "Platform".to_string(),
                y: "Likes".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_bars() {
        let (_, kind) = parse_chart("bars(x: Platform, group: PostType, y: AvgLikes)").unwrap();
        assert_eq!(
            kind,
            ChartKind::Bars(BarsChart {
                x: "Platform".to_string(),
                group: "PostType".to_string(),
                y: "AvgLikes".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_line_default_format() {
        let (_, kind) = parse_chart("line(x: Date, y: AvgLikes)").unwrap();
        assert_eq!(
            kind,
            ChartKind::Line(LineChart {
                x: "Date".to_string(),
                y: "AvgLikes".to_string(),
                format: None,
            })
        );
    }

    #[test]
    fn test_parse_line_custom_format() {
        let (_, kind) = parse_chart(r#"line(x: Date, y: AvgLikes, format: "%Y-%m-%d")"#).unwrap();
        if let ChartKind::Line(line) = kind {
            assert_eq!(line.format.as_deref(), Some("%Y-%m-%d"));
        } else {
            panic!("Expected line chart");
        }
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert!(parse_chart("  boxplot ( x: Platform , y: Likes )  ").is_ok());
    }

    #[test]
    fn test_parse_wrong_argument_order() {
        // y before x should fail (parser expects x first)
        assert!(parse_chart("boxplot(y: Likes, x: Platform)").is_err());
    }

    #[test]
    fn test_parse_missing_group() {
        assert!(parse_chart("bars(x: Platform, y: AvgLikes)").is_err());
    }

    #[test]
    fn test_parse_unclosed_paren() {
        assert!(parse_chart("line(x: Date, y: AvgLikes").is_err());
    }
}
