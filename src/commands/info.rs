pub fn render(prefix: char) -> String {
    format!(
        "I keep this server running: verification nudges for newcomers, emoji slash commands, \
         and a coin for every message you write. See `{prefix}help` for the command list."
    )
}
