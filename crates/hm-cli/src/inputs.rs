use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use hm_api::missing_inputs;
use hm_core::{HeroMlError, HmValue};
use tracing::debug;

use crate::map_cli_input_read;

/// `--var` and prompted values are JSON when they parse as JSON, text otherwise.
pub(crate) fn parse_input_value(raw: &str) -> HmValue {
    serde_json::from_str::<serde_json::Value>(raw)
        .map(HmValue::from)
        .unwrap_or_else(|_| HmValue::from(raw))
}

pub(crate) fn parse_var(raw: &str) -> Result<(String, HmValue), HeroMlError> {
    let Some((name, value)) = raw.split_once('=') else {
        return Err(HeroMlError::new(
            "CLI_VAR_INVALID",
            format!("Expected NAME=VALUE, got \"{}\"", raw),
        ));
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(HeroMlError::new(
            "CLI_VAR_INVALID",
            format!("Variable name is empty in \"{}\"", raw),
        ));
    }
    Ok((name.to_string(), parse_input_value(value)))
}

/// Builds the initial values from `--var` flags, asking for each required
/// name that is still missing unless `no_prompt` is set.
pub(crate) fn collect_inputs<R, W>(
    required: &[String],
    vars: &[String],
    no_prompt: bool,
    reader: &mut R,
    prompt_out: &mut W,
) -> Result<BTreeMap<String, HmValue>, HeroMlError>
where
    R: BufRead,
    W: Write,
{
    let mut values = BTreeMap::new();
    for raw in vars {
        let (name, value) = parse_var(raw)?;
        if !required.contains(&name) {
            debug!(variable = %name, "supplied value is not used by the first step");
        }
        values.insert(name, value);
    }

    let missing = missing_inputs(required, &values);
    if missing.is_empty() {
        return Ok(values);
    }
    if no_prompt {
        return Err(HeroMlError::new(
            "CLI_INPUT_MISSING",
            format!("Missing initial values: {}", missing.join(", ")),
        ));
    }

    for name in missing {
        write!(prompt_out, "Enter value for {}: ", name).map_err(map_cli_input_read)?;
        prompt_out.flush().map_err(map_cli_input_read)?;

        let mut line = String::new();
        let read = reader.read_line(&mut line).map_err(map_cli_input_read)?;
        if read == 0 {
            return Err(HeroMlError::new(
                "CLI_INPUT_MISSING",
                format!("Input ended before a value for \"{}\" was given", name),
            ));
        }
        let value = parse_input_value(line.trim_end_matches(['\r', '\n']));
        values.insert(name, value);
    }
    Ok(values)
}

#[cfg(test)]
mod inputs_tests {
    use super::*;
    use std::io::Cursor;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parse_var_reads_json_or_text() {
        assert_eq!(
            parse_var("count=3").expect("number"),
            ("count".to_string(), HmValue::Number(3.0))
        );
        assert_eq!(
            parse_var("topic=SEO tips").expect("text"),
            ("topic".to_string(), HmValue::from("SEO tips"))
        );
        assert_eq!(
            parse_var(r#"colors=["red","blue"]"#).expect("array").1,
            HmValue::Array(vec![HmValue::from("red"), HmValue::from("blue")])
        );
        assert_eq!(
            parse_var("eq=a=b").expect("split on first").1,
            HmValue::from("a=b")
        );
    }

    #[test]
    fn parse_var_rejects_malformed_flags() {
        assert_eq!(
            parse_var("novalue").expect_err("no equals").code,
            "CLI_VAR_INVALID"
        );
        assert_eq!(
            parse_var(" =x").expect_err("empty name").code,
            "CLI_VAR_INVALID"
        );
    }

    #[test]
    fn collect_inputs_prompts_only_for_missing_names() {
        let mut reader = Cursor::new("formal\n");
        let mut prompts = Vec::new();
        let values = collect_inputs(
            &names(&["topic", "tone"]),
            &names(&["topic=SEO"]),
            false,
            &mut reader,
            &mut prompts,
        )
        .expect("collect should pass");

        assert_eq!(values.get("topic"), Some(&HmValue::from("SEO")));
        assert_eq!(values.get("tone"), Some(&HmValue::from("formal")));
        assert_eq!(
            String::from_utf8(prompts).expect("utf8"),
            "Enter value for tone: "
        );
    }

    #[test]
    fn collect_inputs_fails_without_prompting_or_on_eof() {
        let mut prompts = Vec::new();
        let error = collect_inputs(
            &names(&["topic"]),
            &[],
            true,
            &mut Cursor::new(""),
            &mut prompts,
        )
        .expect_err("no prompt should fail");
        assert_eq!(error.code, "CLI_INPUT_MISSING");
        assert!(prompts.is_empty());

        let error = collect_inputs(
            &names(&["topic"]),
            &[],
            false,
            &mut Cursor::new(""),
            &mut prompts,
        )
        .expect_err("eof should fail");
        assert_eq!(error.code, "CLI_INPUT_MISSING");
    }
}
