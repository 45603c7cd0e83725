use hm_core::HeroMlError;
use std::fmt::Display;

fn map_error(code: &'static str, error: impl Display) -> HeroMlError {
    HeroMlError::new(code, error.to_string())
}

pub(crate) fn emit_error(error: HeroMlError) -> i32 {
    println!("RESULT:ERROR");
    println!("ERROR_CODE:{}", error.code);
    if let Some(step) = error.step {
        println!("ERROR_STEP:{}", step);
    }
    println!(
        "ERROR_MSG_JSON:{}",
        serde_json::to_string(&error.message).expect("string json")
    );
    1
}

pub(crate) fn map_cli_source_path(error: std::io::Error) -> HeroMlError {
    map_error("CLI_SOURCE_PATH", error)
}

pub(crate) fn map_cli_source_scan(error: walkdir::Error) -> HeroMlError {
    map_error("CLI_SOURCE_SCAN", error)
}

pub(crate) fn map_cli_source_read(error: std::io::Error) -> HeroMlError {
    map_error("CLI_SOURCE_READ", error)
}

pub(crate) fn map_cli_input_read(error: std::io::Error) -> HeroMlError {
    map_error("CLI_INPUT_READ", error)
}

pub(crate) fn map_cli_output_write(error: std::io::Error) -> HeroMlError {
    map_error("CLI_OUTPUT_WRITE", error)
}

pub(crate) fn map_cli_output_encode(error: serde_json::Error) -> HeroMlError {
    map_error("CLI_OUTPUT_ENCODE", error)
}

pub(crate) fn map_cli_provider_config(error: anyhow::Error) -> HeroMlError {
    HeroMlError::new("CLI_PROVIDER_CONFIG", format!("{:#}", error))
}

#[cfg(test)]
mod error_map_tests {
    use super::*;

    #[test]
    fn emit_error_returns_non_zero_exit_code() {
        assert_eq!(emit_error(HeroMlError::new("ERR", "failed")), 1);
        assert_eq!(emit_error(HeroMlError::at_step("ERR", "failed", 2)), 1);
    }

    #[test]
    fn mapping_helpers_keep_error_codes() {
        assert_eq!(
            map_cli_source_path(std::io::Error::other("path")).code,
            "CLI_SOURCE_PATH"
        );
        assert_eq!(
            map_cli_source_read(std::io::Error::other("read")).code,
            "CLI_SOURCE_READ"
        );
        assert_eq!(
            map_cli_input_read(std::io::Error::other("stdin")).code,
            "CLI_INPUT_READ"
        );
        assert_eq!(
            map_cli_output_write(std::io::Error::other("write")).code,
            "CLI_OUTPUT_WRITE"
        );

        let scan = walkdir::WalkDir::new("/definitely/not/here/heroml")
            .into_iter()
            .find_map(Result::err)
            .expect("missing root should yield a walk error");
        assert_eq!(map_cli_source_scan(scan).code, "CLI_SOURCE_SCAN");

        let invalid = serde_json::from_str::<serde_json::Value>("{").expect_err("invalid json");
        assert_eq!(map_cli_output_encode(invalid).code, "CLI_OUTPUT_ENCODE");

        let provider = map_cli_provider_config(
            anyhow::anyhow!("root cause").context("Failed to create HTTP client"),
        );
        assert_eq!(provider.code, "CLI_PROVIDER_CONFIG");
        assert!(provider.message.contains("root cause"));
    }
}
