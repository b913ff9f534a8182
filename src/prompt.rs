pub const SYSTEM_PROMPT: &str = "You are a senior QA engineer.";

/// Wraps the diff into the test plan request. The diff is inserted verbatim,
/// with no escaping or truncation.
pub fn build_prompt(diff: &str) -> String {
    format!(
        "\nYou are an expert QA engineer.\n\nGenerate a detailed test plan based on the following code diff from a GitHub Pull Request. Include:\n\n- Acceptance criteria\n- Manual test steps\n- Pre-conditions\n- Test data (as a markdown table)\n- Regression checklist\n\nCode diff:\n{}\n",
        diff
    )
}
