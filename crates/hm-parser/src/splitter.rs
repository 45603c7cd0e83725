use hm_core::{Step, STEP_DELIMITER};

pub fn split_steps(script: &str) -> Vec<Step> {
    script
        .split(STEP_DELIMITER)
        .enumerate()
        .map(|(offset, text)| Step {
            index: offset + 1,
            text: text.trim().to_string(),
        })
        .collect()
}
