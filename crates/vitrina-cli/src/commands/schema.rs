use serde::Serialize;
use vitrina_core::FieldRule;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FieldRow<'a> {
    field: &'a str,
    label: &'a str,
    kind: &'static str,
    required: bool,
    rules: Vec<String>,
}

pub fn run(resource: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = ctx.schema(resource)?;
    if flags.format != OutputFormat::Table {
        return output(&schema, flags.format);
    }

    println!(
        "{} ({}) -> {}",
        schema.plural,
        schema.name,
        ctx.config.api.endpoint(&schema.owner, &schema.resource)
    );
    let rows = schema
        .fields
        .iter()
        .map(|field| FieldRow {
            field: &field.name,
            label: &field.label,
            kind: field.kind.as_str(),
            required: field.required,
            rules: field.rules.iter().map(describe_rule).collect(),
        })
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}

fn describe_rule(rule: &FieldRule) -> String {
    match rule {
        FieldRule::NoDigits => "no_digits".to_string(),
        FieldRule::Positive => "positive".to_string(),
        FieldRule::NonNegative => "non_negative".to_string(),
        FieldRule::Pattern { regex, .. } => format!("pattern {regex}"),
        FieldRule::OneOf { values } => format!("one_of {}", values.join("|")),
    }
}

#[cfg(test)]
mod tests {
    use vitrina_core::FieldRule;

    use super::describe_rule;

    #[test]
    fn rules_are_described() {
        assert_eq!(describe_rule(&FieldRule::NoDigits), "no_digits");
        assert_eq!(
            describe_rule(&FieldRule::pattern(r"^\d+$", "solo dígitos")),
            r"pattern ^\d+$"
        );
        assert_eq!(
            describe_rule(&FieldRule::OneOf {
                values: vec!["a".into(), "b".into()]
            }),
            "one_of a|b"
        );
    }
}
