// Chart DSL parser module

pub mod ast;
pub mod chart;
pub mod labels;
pub mod lexer;

use nom::{
    bytes::complete::tag,
    combinator::{eof, opt},
    sequence::preceded,
    IResult,
};

use ast::ChartSpec;
use lexer::ws;

/// Parse a complete chart specification
/// Format: chart [ | labs(...) ]
pub fn parse_chart_spec(input: &str) -> IResult<&str, ChartSpec> {
    let (input, kind) = chart::parse_chart(input)?;
    let (input, labels) = opt(preceded(ws(tag("|")), labels::parse_labs))(input)?;
    let (input, _) = ws(eof)(input)?;

    Ok((input, ChartSpec { kind, labels }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ast::ChartKind;

    #[test]
    fn test_parse_chart_with_labels() {
        let (_, spec) = parse_chart_spec(
            r#"boxplot(x: Platform, y: Likes) | labs(title: "Likes by platform", y: "Likes")"#,
        )
        .unwrap();

        assert!(matches!(spec.kind, ChartKind::Boxplot(_)));
        let labels = spec.labels.unwrap();
        assert_eq!(labels.title.as_deref(), Some("Likes by platform"));
        assert_eq!(labels.x, None);
        assert_eq!(labels.y.as_deref(), Some("Likes"));
    }

    #[test]
    fn test_parse_chart_without_labels() {
        let (_, spec) = parse_chart_spec("line(x: Date, y: AvgLikes)").unwrap();
        assert!(matches!(spec.kind, ChartKind::Line(_)));
        assert!(spec.labels.is_none());
    }

    #[test]
    fn test_parse_rejects_trailing_input() {
        assert!(parse_chart_spec("line(x: Date, y: AvgLikes) extra").is_err());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(parse_chart_spec("").is_err());
    }
}
